//! Command-line exporter.
//!
//! Reads a project JSON file and writes one of the three export
//! artifacts. Verbosity is controlled with `RUST_LOG`.

use clap::{Parser, ValueEnum};
use folio_export::{ExportFile, Exporter, Project};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "folio-export",
    version,
    about = "Export a portfolio project to standalone HTML, a ZIP package, or a PDF"
)]
struct Args {
    /// Project JSON file
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Output path (defaults to the artifact's suggested filename)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Zip,
    Pdf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&args.input)?;
    if raw.trim().is_empty() {
        // Nothing to export yet; not an error
        eprintln!("nothing to export: {} is empty", args.input.display());
        return Ok(());
    }
    let project: Project = serde_json::from_str(&raw)?;
    let exporter = Exporter::new(project);

    let file: ExportFile = match args.format {
        Format::Html => exporter.export_as_html().await?,
        Format::Zip => exporter.export_as_zip().await?,
        Format::Pdf => exporter.export_as_pdf().await?,
    };

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&file.filename));
    std::fs::write(&path, &file.bytes)?;
    println!("wrote {} ({} bytes)", path.display(), file.bytes.len());
    Ok(())
}
