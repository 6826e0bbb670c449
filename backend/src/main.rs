//! csvtidy CLI - inspect and clean CSV files
//!
//! ```bash
//! csvtidy serve                                  # Start HTTP server (port 3000)
//! csvtidy stats input.csv                        # Row/column/missing/duplicate counts
//! csvtidy preview input.csv --rows 10            # First rows, missing cells marked
//! csvtidy clean input.csv -d -f -o cleaned.csv   # Dedup + fill, write CSV
//! ```

use clap::{Parser, Subcommand};
use csvtidy::{parse_file, preview_rows, CleanOptions, Preview, ServerConfig, Session, PREVIEW_ROWS};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "csvtidy")]
#[command(about = "Inspect, deduplicate and fill missing values in CSV files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (default: CSVTIDY_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (default: CSVTIDY_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<IpAddr>,
    },

    /// Show summary statistics of a CSV file
    Stats {
        /// Input CSV file
        input: PathBuf,
    },

    /// Show the first rows of a CSV file
    Preview {
        /// Input CSV file
        input: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value_t = PREVIEW_ROWS)]
        rows: usize,
    },

    /// Clean a CSV file and write the result
    Clean {
        /// Input CSV file
        input: PathBuf,

        /// Drop repeated rows, keeping the first occurrence
        #[arg(short = 'd', long)]
        remove_duplicates: bool,

        /// Fill missing numeric cells with the column average
        #[arg(short = 'f', long)]
        fill_missing: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, host } => cmd_serve(port, host).await,

        Commands::Stats { input } => cmd_stats(&input),

        Commands::Preview { input, rows } => cmd_preview(&input, rows),

        Commands::Clean {
            input,
            remove_duplicates,
            fill_missing,
            output,
        } => cmd_clean(
            &input,
            CleanOptions {
                remove_duplicates,
                fill_missing,
            },
            output.as_deref(),
        ),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: Option<u16>, host: Option<IpAddr>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(host) = host {
        config = config.with_host(host);
    }

    csvtidy::server::start_server(config).await
}

/// Load a file from disk into a fresh session.
fn load(input: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut session = Session::new();
    let size = usize::try_from(fs::metadata(input)?.len()).unwrap_or(usize::MAX);
    session.validate_upload(&file_name, size)?;
    session.install(&file_name, parse_file(input)?)?;
    Ok(session)
}

fn cmd_stats(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = load(input)?;
    let raw = session.raw().ok_or("no data loaded")?;
    let stats = csvtidy::compute_stats(raw);

    println!("File:       {}", session.file_name().unwrap_or_default());
    println!("Columns:    {}", raw.headers().join(", "));
    println!("Rows:       {}", stats.row_count);
    println!("Col count:  {}", stats.col_count);
    println!("Missing:    {}", stats.missing_count);
    println!("Duplicates: {}", stats.duplicate_count);

    Ok(())
}

fn cmd_preview(input: &Path, rows: usize) -> Result<(), Box<dyn std::error::Error>> {
    let session = load(input)?;
    let raw = session.raw().ok_or("no data loaded")?;

    print_preview(&preview_rows(raw, rows));
    Ok(())
}

fn print_preview(preview: &Preview) {
    println!("{}", preview.columns.join(" | "));
    for row in &preview.rows {
        let cells: Vec<&str> = row
            .iter()
            .map(|cell| if cell.missing { "<empty>" } else { cell.value.as_str() })
            .collect();
        println!("{}", cells.join(" | "));
    }
}

fn cmd_clean(
    input: &Path,
    options: CleanOptions,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load(input)?;

    let summary = session.on_clean_requested(options)?;
    for line in summary.report.lines() {
        eprintln!("{}", line);
    }

    let download = session.on_download_requested()?;
    match output {
        Some(path) => {
            fs::write(path, &download.body)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => print!("{}", download.body),
    }

    Ok(())
}
