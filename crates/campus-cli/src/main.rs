//! Campus CLI: upload files through the presigned-upload broker.
//!
//! Set CAMPUS_API_URL and CAMPUS_ACCESS_TOKEN (sent as the `access_token`
//! session cookie).

use anyhow::Context;
use campus_api_client::ApiClient;
use campus_cli::{init_tracing, load_payload, print_json, SigninHint, UploadOutput};
use campus_core::UploadIntent;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "campus", about = "Campus upload broker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file and print the storage key plus a fresh read URL
    Upload {
        /// Form field the file belongs to (e.g. photo, signature)
        #[arg(long)]
        field: String,
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Override the content type derived from the file extension
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Request a presigned write URL without uploading
    Presign {
        #[arg(long)]
        field: String,
        #[arg(long)]
        filename: String,
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Resolve a stored key (or legacy absolute URL) to a display URL
    Resolve {
        /// Storage key
        key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = ApiClient::from_env()
        .context("Failed to create API client. Set CAMPUS_API_URL and CAMPUS_ACCESS_TOKEN")?
        .with_session_expired_handler(Arc::new(SigninHint));

    match cli.command {
        Commands::Upload {
            field,
            file,
            content_type,
        } => {
            let payload = load_payload(&file, content_type).await?;
            let write = client.upload_file(&field, &payload).await?;
            tracing::info!(key = %write.key, "Upload complete");

            let read_url = client.resolve_read_url(&write.key).await;
            print_json(&UploadOutput {
                key: write.key,
                read_url,
            })?;
        }
        Commands::Presign {
            field,
            filename,
            content_type,
        } => {
            let intent = match content_type {
                Some(ct) => UploadIntent::new(field, filename).with_content_type(ct),
                None => UploadIntent::new(field, filename),
            };
            let write = client.request_upload_url(&intent).await?;
            print_json(&write)?;
        }
        Commands::Resolve { key } => {
            let url = client.resolve_read_url(&key).await;
            print_json(&url)?;
        }
    }

    Ok(())
}
