//! CloudDrive CLI: upload, browse, download and delete files through the
//! CloudDrive API.
//!
//! Set CLOUDDRIVE_API_URL (or API_URL); defaults to http://localhost:3000.

use anyhow::Context;
use clap::{Parser, Subcommand};
use clouddrive_api_client::{ApiClient, Drive, OrphanPolicy, PendingFile, StatusKind, ViewMode};
use clouddrive_cli::{confirm, init_tracing, truncate_string};
use clouddrive_core::constants::MAX_FILES_PER_UPLOAD;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clouddrive", about = "CloudDrive file manager CLI")]
struct Cli {
    /// Print raw JSON responses where available
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service information
    Info,
    /// Check API health
    Health,
    /// Upload one or more files as a single batch
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Delete objects already stored when a later file in the batch fails
        #[arg(long)]
        cleanup_orphans: bool,
    },
    /// List stored files
    List {
        /// Layout: grid or list
        #[arg(long, default_value = "grid")]
        view: ViewMode,
    },
    /// Show metadata for one stored file
    Preview {
        /// Storage key, e.g. uploads/report-<uuid>.pdf
        key: String,
    },
    /// Get a download URL, or save the object locally with --output
    Download {
        /// Storage key
        key: String,
        /// Write the object to this path instead of printing the URL
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Delete a stored file
    Delete {
        /// Storage key
        key: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Print the status log; fail when the last message is an error.
fn report_status(drive: &Drive) -> anyhow::Result<()> {
    for message in drive.status().messages() {
        println!("{}", message);
    }
    match drive.status().latest() {
        Some(last) if last.kind == StatusKind::Error => Err(anyhow::anyhow!("{}", last.text)),
        _ => Ok(()),
    }
}

fn file_name_of(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ApiClient::from_env().context("Failed to create API client")?;
    tracing::debug!(base_url = %client.base_url(), "Using CloudDrive API");

    match cli.command {
        Commands::Info => {
            let info = client.service_info().await?;
            print_json(&info)?;
        }
        Commands::Health => {
            let health = client.health().await?;
            print_json(&health)?;
        }
        Commands::Upload {
            files,
            cleanup_orphans,
        } => {
            let policy = if cleanup_orphans {
                OrphanPolicy::Delete
            } else {
                OrphanPolicy::Retain
            };
            let mut drive = Drive::new(client).with_orphan_policy(policy);

            for path in &files {
                let file = PendingFile::from_path(path).await?;
                if !drive.add_file(file) {
                    eprintln!("Skipping duplicate: {}", path.display());
                }
            }
            if drive.selection().exceeds_batch_limit(MAX_FILES_PER_UPLOAD) {
                eprintln!(
                    "Warning: {} files selected; the server advertises a limit of {}",
                    drive.selection().len(),
                    MAX_FILES_PER_UPLOAD
                );
            }

            let report = drive
                .upload(|percent| eprintln!("Uploading... {:.0}%", percent))
                .await;

            if cli.json {
                if let Some(report) = report {
                    print_json(&report.uploaded)?;
                }
            }
            report_status(&drive)?;
        }
        Commands::List { view } => {
            let mut drive = Drive::new(client);
            drive.toggle_view(view).await;

            if let Some(error) = drive.view().error() {
                anyhow::bail!("{}", error);
            }
            if cli.json {
                print_json(&drive.view().files())?;
            } else {
                println!("{}", drive.view().render());
            }
        }
        Commands::Preview { key } => {
            let mut drive = Drive::new(client);
            drive.refresh().await;

            if let Some(error) = drive.view().error() {
                anyhow::bail!("{}", error);
            }
            let preview = drive
                .preview(&key)
                .with_context(|| format!("File not found: {}", truncate_string(&key, 80)))?;
            println!("{}", preview);
        }
        Commands::Download { key, output } => {
            let mut drive = Drive::new(client);
            let file_name = file_name_of(&key).to_string();

            if let Some(url) = drive.download(&key, &file_name).await {
                match output {
                    Some(path) => {
                        let data = drive.client().fetch_object(&url).await?;
                        tokio::fs::write(&path, &data)
                            .await
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        eprintln!("Saved {} bytes to {}", data.len(), path.display());
                    }
                    None => println!("{}", url),
                }
            }
            report_status(&drive)?;
        }
        Commands::Delete { key, yes } => {
            let mut drive = Drive::new(client);
            let file_name = file_name_of(&key).to_string();

            let deleted = drive
                .delete(&key, &file_name, |prompt| yes || confirm(prompt))
                .await;
            if !deleted && drive.status().messages().is_empty() {
                println!("Cancelled");
                return Ok(());
            }
            report_status(&drive)?;
        }
    }

    Ok(())
}
