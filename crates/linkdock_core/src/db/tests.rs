use super::Database;
use crate::error::AppError;
use crate::models::category::CategoryUpdate;
use crate::models::site::{NewSite, SiteUpdate};
use tempfile::TempDir;

fn temp_db() -> (Database, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("db").to_str().unwrap()).unwrap();
    (db, dir)
}

fn draft(title: &str, url: &str) -> NewSite {
    NewSite {
        id: None,
        title: title.to_string(),
        url: url.to_string(),
        description: String::new(),
        is_public: true,
        category: String::new(),
    }
}

#[test]
fn empty_store_reads_as_empty_collections() {
    let (db, _dir) = temp_db();
    assert!(db.list_sites().unwrap().is_empty());
    assert!(db.list_categories().unwrap().is_empty());
    assert_eq!(db.sites.load_raw().unwrap(), "[]");
}

#[test]
fn add_site_assigns_uuid_and_zero_clicks() {
    let (db, _dir) = temp_db();
    let id = db.add_site(draft("Example", "https://example.com")).unwrap();
    assert!(!id.is_empty());

    let sites = db.list_sites().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].id, id);
    assert_eq!(sites[0].clicks, 0);
    assert!(sites[0].is_public);
}

#[test]
fn add_site_keeps_caller_supplied_id() {
    let (db, _dir) = temp_db();
    let mut site = draft("Example", "https://example.com");
    site.id = Some("fixed-id".to_string());
    assert_eq!(db.add_site(site).unwrap(), "fixed-id");
}

#[test]
fn add_site_rejects_duplicate_url_and_id() {
    let (db, _dir) = temp_db();
    let mut first = draft("One", "https://example.com");
    first.id = Some("one".to_string());
    db.add_site(first).unwrap();

    let same_url = draft("Two", "https://example.com");
    assert!(matches!(db.add_site(same_url), Err(AppError::Conflict(_))));

    let mut same_id = draft("Three", "https://other.example");
    same_id.id = Some("one".to_string());
    assert!(matches!(db.add_site(same_id), Err(AppError::Conflict(_))));
}

#[test]
fn add_site_validates_category_reference() {
    let (db, _dir) = temp_db();
    let mut site = draft("Example", "https://example.com");
    site.category = "missing".to_string();
    assert!(matches!(
        db.add_site(site),
        Err(AppError::UnknownCategory(name)) if name == "missing"
    ));

    db.add_category("tools".to_string(), String::new()).unwrap();
    let mut site = draft("Example", "https://example.com");
    site.category = "tools".to_string();
    db.add_site(site).unwrap();
}

#[test]
fn update_site_applies_partial_fields() {
    let (db, _dir) = temp_db();
    let id = db.add_site(draft("Old", "https://example.com")).unwrap();

    db.update_site(
        &id,
        SiteUpdate {
            title: Some("New".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    let sites = db.list_sites().unwrap();
    assert_eq!(sites[0].title, "New");
    assert_eq!(sites[0].url, "https://example.com");
}

#[test]
fn update_site_rejects_url_collision_with_other_site() {
    let (db, _dir) = temp_db();
    db.add_site(draft("One", "https://one.example")).unwrap();
    let id = db.add_site(draft("Two", "https://two.example")).unwrap();

    let collide = SiteUpdate {
        url: Some("https://one.example".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        db.update_site(&id, collide),
        Err(AppError::Conflict(_))
    ));

    // Re-submitting the current url is not a collision.
    let keep = SiteUpdate {
        url: Some("https://two.example".to_string()),
        ..Default::default()
    };
    db.update_site(&id, keep).unwrap();
}

#[test]
fn update_site_clears_category_without_validation() {
    let (db, _dir) = temp_db();
    db.add_category("tools".to_string(), String::new()).unwrap();
    let mut site = draft("Example", "https://example.com");
    site.category = "tools".to_string();
    let id = db.add_site(site).unwrap();

    db.update_site(
        &id,
        SiteUpdate {
            category: Some(String::new()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(db.list_sites().unwrap()[0].category, "");
}

#[test]
fn update_missing_site_is_not_found() {
    let (db, _dir) = temp_db();
    assert!(matches!(
        db.update_site("nope", SiteUpdate::default()),
        Err(AppError::NotFound)
    ));
}

#[test]
fn delete_site_removes_record() {
    let (db, _dir) = temp_db();
    let id = db.add_site(draft("Example", "https://example.com")).unwrap();
    db.delete_site(&id).unwrap();
    assert!(db.list_sites().unwrap().is_empty());
    assert!(matches!(db.delete_site(&id), Err(AppError::NotFound)));
}

#[test]
fn click_increments_by_exactly_one() {
    let (db, _dir) = temp_db();
    let id = db.add_site(draft("Example", "https://example.com")).unwrap();
    assert_eq!(db.click_site(&id).unwrap(), 1);
    assert_eq!(db.click_site(&id).unwrap(), 2);
    assert_eq!(db.list_sites().unwrap()[0].clicks, 2);
    assert!(matches!(db.click_site("nope"), Err(AppError::NotFound)));
}

#[test]
fn add_category_upserts_description() {
    let (db, _dir) = temp_db();
    db.add_category("tools".to_string(), String::new()).unwrap();
    db.add_category("tools".to_string(), "useful things".to_string())
        .unwrap();

    let categories = db.list_categories().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].desc, "useful things");

    // An upsert without a description keeps the stored one.
    db.add_category("tools".to_string(), String::new()).unwrap();
    assert_eq!(db.list_categories().unwrap()[0].desc, "useful things");
}

#[test]
fn rename_category_propagates_to_sites() {
    let (db, _dir) = temp_db();
    db.add_category("tools".to_string(), String::new()).unwrap();
    let mut site = draft("Example", "https://example.com");
    site.category = "tools".to_string();
    db.add_site(site).unwrap();

    db.update_category(
        "tools",
        CategoryUpdate {
            new_name: Some("utilities".to_string()),
            desc: None,
            update_sites: true,
        },
    )
    .unwrap();

    assert_eq!(db.list_categories().unwrap()[0].name, "utilities");
    assert_eq!(db.list_sites().unwrap()[0].category, "utilities");
}

#[test]
fn rename_category_can_leave_sites_untouched() {
    let (db, _dir) = temp_db();
    db.add_category("tools".to_string(), String::new()).unwrap();
    let mut site = draft("Example", "https://example.com");
    site.category = "tools".to_string();
    db.add_site(site).unwrap();

    db.update_category(
        "tools",
        CategoryUpdate {
            new_name: Some("utilities".to_string()),
            desc: None,
            update_sites: false,
        },
    )
    .unwrap();

    assert_eq!(db.list_sites().unwrap()[0].category, "tools");
}

#[test]
fn rename_category_rejects_taken_name() {
    let (db, _dir) = temp_db();
    db.add_category("tools".to_string(), String::new()).unwrap();
    db.add_category("news".to_string(), String::new()).unwrap();

    let update = CategoryUpdate {
        new_name: Some("news".to_string()),
        desc: None,
        update_sites: true,
    };
    assert!(matches!(
        db.update_category("tools", update),
        Err(AppError::Conflict(_))
    ));
}

#[test]
fn delete_category_clears_referencing_sites() {
    let (db, _dir) = temp_db();
    db.add_category("tools".to_string(), String::new()).unwrap();
    let mut site = draft("Example", "https://example.com");
    site.category = "tools".to_string();
    db.add_site(site).unwrap();
    db.add_site(draft("Plain", "https://plain.example")).unwrap();

    db.delete_category("tools").unwrap();

    assert!(db.list_categories().unwrap().is_empty());
    let sites = db.list_sites().unwrap();
    assert_eq!(sites[0].category, "");
    assert_eq!(sites[1].category, "");
    assert!(matches!(
        db.delete_category("tools"),
        Err(AppError::NotFound)
    ));
}

#[test]
fn legacy_string_categories_normalize_and_migrate_on_write() {
    let (db, _dir) = temp_db();
    db.db
        .insert(crate::constants::CATEGORIES_KEY, br#"["tools","news"]"#.as_slice())
        .unwrap();

    let categories = db.list_categories().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "tools");
    assert_eq!(categories[0].desc, "");

    // Legacy names still validate as site references.
    let mut site = draft("Example", "https://example.com");
    site.category = "news".to_string();
    db.add_site(site).unwrap();

    // Any write migrates the stored document to the object shape.
    db.add_category("blogs".to_string(), String::new()).unwrap();
    let raw = db.categories.load_raw().unwrap();
    assert!(raw.contains(r#"{"name":"tools","desc":""}"#));
}

#[test]
fn corrupt_documents_read_as_empty() {
    let (db, _dir) = temp_db();
    db.db
        .insert(crate::constants::SITES_KEY, b"not json".as_slice())
        .unwrap();
    db.db
        .insert(crate::constants::CATEGORIES_KEY, br#"{"not":"an array"}"#.as_slice())
        .unwrap();

    assert!(db.list_sites().unwrap().is_empty());
    assert!(db.list_categories().unwrap().is_empty());

    // A mutating write replaces the corrupt document wholesale.
    db.add_site(draft("Example", "https://example.com")).unwrap();
    assert_eq!(db.list_sites().unwrap().len(), 1);
}

#[test]
fn null_array_entries_are_dropped_by_readers() {
    let (db, _dir) = temp_db();
    db.db
        .insert(
            crate::constants::SITES_KEY,
            br#"[null,{"id":"a","title":"A","url":"https://a.example"}]"#.as_slice(),
        )
        .unwrap();

    let sites = db.list_sites().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].id, "a");
}

#[test]
fn reopened_database_sees_persisted_documents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db");
    let path = path.to_str().unwrap();

    let id = {
        let db = Database::new(path).unwrap();
        let id = db.add_site(draft("Example", "https://example.com")).unwrap();
        db.flush().unwrap();
        id
    };

    let db = Database::new(path).unwrap();
    let sites = db.list_sites().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].id, id);
}

#[test]
fn mutations_survive_a_poisoned_write_lock() {
    let (db, _dir) = temp_db();

    let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = db.write_guard();
        panic!("holder dies");
    }));
    assert!(poisoned.is_err());

    db.add_category("tools".to_string(), String::new()).unwrap();
    let id = db.add_site(draft("Example", "https://example.com")).unwrap();
    assert!(!id.is_empty());
    assert_eq!(db.list_categories().unwrap().len(), 1);
}
