use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "forge-cli")]
#[command(about = "Client for a running SpecForge server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// Header carrying the mock credential.
    #[arg(long, default_value = "X-API-Key")]
    header: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a mock API for two services
    Generate {
        #[arg(long)]
        app1: String,
        #[arg(long)]
        app2: String,
        /// Field name; repeat for more. Defaults to id, name, status.
        #[arg(long = "field")]
        fields: Vec<String>,
        /// Serve the live mock without a credential check
        #[arg(long)]
        no_auth: bool,
    },
    /// Call a live mock endpoint
    Call {
        /// Path such as /slacktojira
        path: String,
        /// Credential returned by `generate`
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Download a generated API file
    Download {
        file: String,
        /// Where to write it; defaults to the file name
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Check server status
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Generate {
            app1,
            app2,
            fields,
            no_auth,
        } => {
            let mut query = vec![("app1", app1), ("app2", app2)];
            query.extend(fields.into_iter().map(|f| ("fields", f)));
            query.push(("require_auth", (!no_auth).to_string()));

            let res = client
                .get(format!("{}/generate_api", base))
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Call { path, key } => {
            let mut headers = HeaderMap::new();
            if let Some(key) = key {
                headers.insert(
                    reqwest::header::HeaderName::from_bytes(cli.header.as_bytes())?,
                    HeaderValue::from_str(&key)?,
                );
            }
            let path = if path.starts_with('/') { path } else { format!("/{}", path) };
            let res = client
                .get(format!("{}{}", base, path))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Download { file, out } => {
            let res = client
                .get(format!("{}/download_api", base))
                .query(&[("file", &file)])
                .send()
                .await?;
            if !res.status().is_success() {
                return print_response(res).await;
            }
            let out = out.unwrap_or_else(|| PathBuf::from(&file));
            let bytes = res.bytes().await?;
            tokio::fs::write(&out, &bytes).await?;
            println!("Saved {} bytes to {}", bytes.len(), out.display());
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
