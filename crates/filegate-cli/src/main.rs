//! Filegate CLI — command-line client for the Filegate gateway.
//!
//! Set FILEGATE_URL (or API_URL) to point at the gateway.

use anyhow::Context;
use clap::{Parser, Subcommand};
use filegate_api_client::ApiClient;
use filegate_cli::init_tracing;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "filegate", about = "Filegate gateway CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file (remote key defaults to the file's basename)
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Remote object key
        #[arg(long)]
        key: Option<String>,
    },
    /// Download an object to a local file
    Download {
        /// Remote object key
        path: String,
        /// Output file; defaults to the basename of the remote key
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },
    /// Get a signed preview URL
    Preview {
        /// Remote object key
        path: String,
    },
    /// Get a signed download URL
    Link {
        /// Remote object key
        path: String,
    },
    /// Delete an object
    Delete {
        /// Remote object key
        path: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client =
        ApiClient::from_env().context("Failed to create API client. Set FILEGATE_URL (or API_URL)")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload { file, key } => {
            let response = client
                .upload(&file.to_string_lossy(), key.as_deref())
                .await?;
            print_json(&response)?;
        }
        Commands::Download { path, output } => {
            let data = client.download(&path).await?;
            let target = output.unwrap_or_else(|| {
                std::path::PathBuf::from(path.rsplit('/').next().unwrap_or(&path))
            });
            std::fs::write(&target, &data)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            print_json(&serde_json::json!({
                "saved": target.display().to_string(),
                "bytes": data.len(),
            }))?;
        }
        Commands::Preview { path } => {
            print_json(&client.preview(&path).await?)?;
        }
        Commands::Link { path } => {
            print_json(&client.download_link(&path).await?)?;
        }
        Commands::Delete { path } => {
            print_json(&client.delete(&path).await?)?;
        }
    }

    Ok(())
}
