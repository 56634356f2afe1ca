//! Command line surface.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use sortiment_catalog::{Catalog, negative_list};
use sortiment_document::{assemble, negative_list_xlsx};
use sortiment_infra::{SpreadsheetFile, load_catalog};

use crate::app::{AppServices, build_app};
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "sortiment")]
#[command(about = "Find master-catalog articles missing from a store's assortment")]
#[command(after_help = "Environment:\n  RUST_LOG   Log filter (default: info)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API with the master catalog loaded once at startup.
    Serve {
        #[arg(long)]
        master: PathBuf,
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Compare one positive list offline and write the outputs.
    Generate {
        #[arg(long)]
        master: PathBuf,
        #[arg(long)]
        positive: PathBuf,
        /// Barcode PDF output.
        #[arg(long)]
        pdf: Option<PathBuf>,
        /// Spreadsheet output.
        #[arg(long)]
        xlsx: Option<PathBuf>,
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve {
            master,
            bind,
            settings,
        } => serve(&master, bind, settings.as_deref()).await,
        Command::Generate {
            master,
            positive,
            pdf,
            xlsx,
            settings,
        } => generate(&master, &positive, pdf.as_deref(), xlsx.as_deref(), settings.as_deref()),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = Settings::load(path)?;
    settings.validate().with_context(|| match path {
        Some(path) => format!("checking settings {}", path.display()),
        None => "checking default settings".to_string(),
    })?;
    Ok(settings)
}

fn load_master(path: &Path, settings: &Settings) -> anyhow::Result<Catalog> {
    load_catalog(&SpreadsheetFile::new(path), &settings.schema)
        .with_context(|| format!("loading master catalog {}", path.display()))
}

async fn serve(master: &Path, bind: SocketAddr, settings: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(settings)?;
    let master = load_master(master, &settings)?;
    let app = build_app(AppServices::new(master, settings));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn generate(
    master: &Path,
    positive: &Path,
    pdf: Option<&Path>,
    xlsx: Option<&Path>,
    settings: Option<&Path>,
) -> anyhow::Result<()> {
    let settings = load_settings(settings)?;
    let master = load_master(master, &settings)?;
    let positive_catalog = load_catalog(&SpreadsheetFile::new(positive), &settings.schema)
        .with_context(|| format!("loading positive list {}", positive.display()))?;

    let list = negative_list(&master, &positive_catalog);
    println!("{}", list.message());

    if let Some(path) = pdf {
        let config = settings.document_for_today();
        let doc = assemble(list.entries(), &config)?;
        std::fs::write(path, &doc.bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        for placeholder in &doc.summary.placeholders {
            eprintln!(
                "no barcode for {}: {}",
                placeholder.identifier, placeholder.reason
            );
        }
        println!("{} ({} pages)", path.display(), doc.summary.pages);
    }

    if let Some(path) = xlsx {
        let bytes = negative_list_xlsx(list.entries(), master.columns(), &settings.schema)?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        println!("{}", path.display());
    }

    Ok(())
}
