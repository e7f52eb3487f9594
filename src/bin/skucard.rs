use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use skucard::{RunReport, TableFont, run_batch};

/// Normalize product photos and compose catalog cards from a CSV catalog.
#[derive(Parser, Debug)]
#[command(name = "skucard", version)]
struct Cli {
    /// Catalog CSV: a header row, then identifier,brand,name,model records.
    #[arg(long, default_value = "list.csv")]
    catalog: PathBuf,

    /// Directory searched for source images.
    #[arg(long, default_value = ".")]
    images: PathBuf,

    /// Output directory, created if absent.
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Explicit font file for the table text; without it, well-known
    /// locations are probed and a builtin face is the fallback.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let font = TableFont::resolve(cli.font.as_deref());

    match run_batch(&cli.catalog, &cli.images, &cli.out, &font) {
        Ok(report) => {
            print!("{}", report.render());
            Ok(())
        }
        Err(e) => {
            // The summary is emitted even when the run dies before any row.
            print!("{}", RunReport::new().render());
            Err(e).context("batch aborted")
        }
    }
}
