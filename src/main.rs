use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use maru_kit::model::{find_report_files, read_parquet, write_parquet};
use maru_kit::{
    stavanger_output_specs_202508, ConvertConfig, MaruError, MaruModel, MaruVersion,
    VariablesConfig,
};

#[derive(Parser, Debug)]
#[command(name = "maru-kit", about = "Tools for MarU maritime-emissions report files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Consolidate MarU XLSX reports into a single Parquet file.
    XlsxToParquet {
        /// Directory to search recursively for .xlsx files
        #[arg(long)]
        search_dir: PathBuf,

        /// Path for the output .parquet file
        #[arg(long)]
        out_file: PathBuf,

        /// MarU report release version of the data
        #[arg(long, value_parser = parse_version)]
        version: MaruVersion,
    },

    /// Create MarU output variables for one municipality from a consolidated
    /// Parquet file. Only Excel output is supported.
    Variables {
        /// Path for the input .parquet file
        #[arg(long)]
        in_file: PathBuf,

        /// Path for the output .xlsx file
        #[arg(long)]
        out_file: PathBuf,

        /// MarU report release version of the data
        #[arg(long, value_parser = parse_version)]
        version: MaruVersion,

        /// Municipality name, not including the municipality number
        #[arg(long)]
        municipality_name: String,

        /// Name of the value column in every output sheet
        #[arg(long)]
        output_value_col: Option<String>,
    },
}

fn parse_version(s: &str) -> std::result::Result<MaruVersion, String> {
    s.parse().map_err(|e: MaruError| e.to_string())
}

fn xlsx_to_parquet(config: ConvertConfig) -> Result<()> {
    config.validate()?;

    info!("Searching for .xlsx files in {}", config.search_dir.display());
    let files = find_report_files(&config.search_dir)?;
    if files.is_empty() {
        return Err(MaruError::NoData(format!(
            "No .xlsx files found in {}",
            config.search_dir.display()
        ))
        .into());
    }
    info!("Found {} files to process", files.len());

    let model = MaruModel::new(config.version)?;
    let mut df = model.load_reports(&files)?;

    info!("Writing consolidated data to {}", config.out_file.display());
    write_parquet(&mut df, &config.out_file)
        .with_context(|| format!("writing {}", config.out_file.display()))?;
    info!("Final DataFrame shape: {:?}", df.shape());
    Ok(())
}

fn variables(config: VariablesConfig) -> Result<()> {
    config.validate()?;
    let specs = stavanger_output_specs_202508()?;
    let model = MaruModel::new(config.version)?;

    info!("Opening input file {}", config.in_file.display());
    let df = read_parquet(&config.in_file)?;
    let input = model.filter_municipality(df, &config.municipality_name)?;

    model
        .write_variables(
            input,
            &specs,
            config.output_value_col.as_deref(),
            &config.out_file,
        )
        .with_context(|| format!("writing {}", config.out_file.display()))?;
    info!("Processing finished");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::XlsxToParquet {
            search_dir,
            out_file,
            version,
        } => xlsx_to_parquet(ConvertConfig {
            search_dir,
            out_file,
            version,
        }),
        Command::Variables {
            in_file,
            out_file,
            version,
            municipality_name,
            output_value_col,
        } => variables(VariablesConfig {
            in_file,
            out_file,
            version,
            municipality_name,
            output_value_col,
        }),
    }
}
