//! `ldock` - command-line client for the linkdock API.

mod cache;

use clap::{Parser, Subcommand};
use linkdock_core::constants::{DEFAULT_CACHE_TTL_MS, DEFAULT_CLI_SERVER_URL};
use serde_json::{json, Value};
use std::path::Path;

#[derive(Parser)]
#[command(name = "ldock", about = "linkdock CLI", version)]
struct Cli {
    /// Server base URL.
    #[arg(short, long, default_value = DEFAULT_CLI_SERVER_URL, env = "LINKDOCK_SERVER")]
    server: String,

    /// Admin bearer token for gated commands.
    #[arg(short, long, env = "LINKDOCK_TOKEN")]
    token: Option<String>,

    /// Bypass the local list cache.
    #[arg(long)]
    refresh: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Site commands.
    Sites {
        #[command(subcommand)]
        command: SiteCommands,
    },
    /// Category commands.
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Check the configured admin token against the server.
    Verify,
}

#[derive(Subcommand)]
enum SiteCommands {
    /// List sites from the public directory (cached for 3 days).
    List {
        /// Query the admin list instead (requires a token, never cached).
        #[arg(long)]
        all: bool,
    },
    /// Add a site.
    Add {
        title: String,
        url: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Hide the site from public listings.
        #[arg(long)]
        private: bool,
        /// Explicit id instead of a generated UUID.
        #[arg(long)]
        id: Option<String>,
    },
    /// Update fields on a site.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a site.
    Delete { id: String },
    /// Record a click on a site.
    Click { id: String },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories (cached for 3 days).
    List,
    /// Add a category, or refresh the description of an existing one.
    Add {
        name: String,
        #[arg(short, long)]
        desc: Option<String>,
    },
    /// Rename a category and/or update its description.
    Update {
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(short, long)]
        desc: Option<String>,
        /// Leave referencing sites pointing at the old name.
        #[arg(long)]
        keep_sites: bool,
    },
    /// Delete a category, clearing it from referencing sites.
    Delete { name: String },
}

struct ApiClient {
    http: reqwest::Client,
    server: String,
    token: Option<String>,
}

impl ApiClient {
    fn new(server: String, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            server,
            token,
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json(&self, path: &str) -> anyhow::Result<Value> {
        let request = self.authorize(self.http.get(format!("{}{}", self.server, path)));
        parse_response(request.send().await?).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> anyhow::Result<Value> {
        let request = self
            .authorize(self.http.post(format!("{}{}", self.server, path)))
            .json(body);
        parse_response(request.send().await?).await
    }
}

async fn parse_response(response: reqwest::Response) -> anyhow::Result<Value> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    if status.is_success() {
        return Ok(body);
    }
    let code = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("server_error");
    anyhow::bail!("server returned {}: {}", status.as_u16(), code)
}

async fn cached_sites(
    client: &ApiClient,
    cache_dir: &Path,
    refresh: bool,
) -> anyhow::Result<Vec<Value>> {
    if !refresh {
        if let Some(sites) = cache::read_cache::<Vec<Value>>(cache_dir, cache::SITES_KEY) {
            return Ok(sites);
        }
    }
    let body = client.get_json("/api/sites/public").await?;
    let sites = body["sites"].as_array().cloned().unwrap_or_default();
    cache::write_cache(cache_dir, cache::SITES_KEY, &sites, DEFAULT_CACHE_TTL_MS);
    Ok(sites)
}

async fn cached_categories(
    client: &ApiClient,
    cache_dir: &Path,
    refresh: bool,
) -> anyhow::Result<Vec<Value>> {
    if !refresh {
        if let Some(categories) = cache::read_cache::<Vec<Value>>(cache_dir, cache::CATEGORIES_KEY)
        {
            return Ok(categories);
        }
    }
    let body = client.get_json("/api/categories/list").await?;
    let categories = body["categories"].as_array().cloned().unwrap_or_default();
    cache::write_cache(
        cache_dir,
        cache::CATEGORIES_KEY,
        &categories,
        DEFAULT_CACHE_TTL_MS,
    );
    Ok(categories)
}

fn print_sites(sites: &[Value]) {
    for site in sites {
        println!(
            "{:<38} {:<30} {}",
            site["id"].as_str().unwrap_or("?"),
            site["title"].as_str().unwrap_or(""),
            site["url"].as_str().unwrap_or("")
        );
    }
}

fn print_categories(categories: &[Value]) {
    for category in categories {
        println!(
            "{:<24} {}",
            category["name"].as_str().unwrap_or(""),
            category["desc"].as_str().unwrap_or("")
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(cli.server.clone(), cli.token.clone());
    let cache_dir = cache::default_cache_dir();

    match cli.command {
        Commands::Sites { command } => match command {
            SiteCommands::List { all } => {
                if all {
                    let body = client.get_json("/api/sites/list").await?;
                    let sites = body.as_array().cloned().unwrap_or_default();
                    print_sites(&sites);
                } else {
                    let sites = cached_sites(&client, &cache_dir, cli.refresh).await?;
                    print_sites(&sites);
                }
            }
            SiteCommands::Add {
                title,
                url,
                description,
                category,
                private,
                id,
            } => {
                let mut body = json!({ "title": title, "url": url });
                if let Some(description) = description {
                    body["description"] = description.into();
                }
                if let Some(category) = category {
                    body["category"] = category.into();
                }
                if let Some(id) = id {
                    body["id"] = id.into();
                }
                if private {
                    body["isPublic"] = false.into();
                }
                let created = client.post_json("/api/sites/add", &body).await?;
                cache::invalidate(&cache_dir, Some(&[cache::SITES_KEY]));
                println!("Added site: {}", created["id"].as_str().unwrap_or("?"));
            }
            SiteCommands::Update {
                id,
                title,
                url,
                description,
                category,
            } => {
                let mut body = json!({ "id": id });
                if let Some(title) = title {
                    body["title"] = title.into();
                }
                if let Some(url) = url {
                    body["url"] = url.into();
                }
                if let Some(description) = description {
                    body["description"] = description.into();
                }
                if let Some(category) = category {
                    body["category"] = category.into();
                }
                client.post_json("/api/sites/update", &body).await?;
                cache::invalidate(&cache_dir, Some(&[cache::SITES_KEY]));
                println!("Updated site: {}", body["id"].as_str().unwrap_or("?"));
            }
            SiteCommands::Delete { id } => {
                client
                    .post_json("/api/sites/delete", &json!({ "id": id }))
                    .await?;
                cache::invalidate(&cache_dir, Some(&[cache::SITES_KEY]));
                println!("Deleted site: {}", id);
            }
            SiteCommands::Click { id } => {
                let body = client
                    .post_json("/api/sites/click", &json!({ "id": id }))
                    .await?;
                println!("Clicks: {}", body["clicks"].as_u64().unwrap_or(0));
            }
        },
        Commands::Categories { command } => match command {
            CategoryCommands::List => {
                let categories = cached_categories(&client, &cache_dir, cli.refresh).await?;
                print_categories(&categories);
            }
            CategoryCommands::Add { name, desc } => {
                let mut body = json!({ "name": name });
                if let Some(desc) = desc {
                    body["desc"] = desc.into();
                }
                client.post_json("/api/categories/add", &body).await?;
                cache::invalidate(&cache_dir, Some(&[cache::CATEGORIES_KEY]));
                println!("Added category: {}", body["name"].as_str().unwrap_or("?"));
            }
            CategoryCommands::Update {
                name,
                new_name,
                desc,
                keep_sites,
            } => {
                let mut body = json!({ "name": name });
                if let Some(new_name) = new_name {
                    body["newName"] = new_name.into();
                }
                if let Some(desc) = desc {
                    body["desc"] = desc.into();
                }
                if keep_sites {
                    body["updateSites"] = false.into();
                }
                client.post_json("/api/categories/update", &body).await?;
                // A rename may rewrite sites too, so drop both boxes.
                cache::invalidate(&cache_dir, None);
                println!("Updated category: {}", body["name"].as_str().unwrap_or("?"));
            }
            CategoryCommands::Delete { name } => {
                client
                    .post_json("/api/categories/delete", &json!({ "name": name }))
                    .await?;
                cache::invalidate(&cache_dir, None);
                println!("Deleted category: {}", name);
            }
        },
        Commands::Verify => {
            client.get_json("/api/auth/verify").await?;
            println!("Token accepted");
        }
    }

    Ok(())
}
