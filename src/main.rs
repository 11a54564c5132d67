use std::path::PathBuf;

use clap::Parser;
use report_aligner::align;
use report_aligner::columns::ColumnSelection;
use report_aligner::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;

    if !cli.input.is_dir() {
        return Err(ToolError::MissingInput(cli.input));
    }

    let selection = match &cli.columns {
        Some(path) => ColumnSelection::load(path)?,
        None => ColumnSelection::default_selection(),
    };

    let summary = align::align_directory(&cli.input, &cli.output, &selection.columns)?;
    println!(
        "wrote {} ({} rows, {} columns; {} of {} files skipped)",
        summary.output_path.display(),
        summary.rows,
        summary.columns,
        summary.files_skipped,
        summary.files_found,
    );
    Ok(())
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Combine a folder of XML test reports into one aligned workbook."
)]
struct Cli {
    /// Directory containing the XML report files.
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving the workbook; defaults to the current directory.
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Optional JSON file ({"columns": [...]}) overriding the built-in
    /// column selection for the filtered sheet.
    #[arg(long)]
    columns: Option<PathBuf>,
}
