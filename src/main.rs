//! schema-scout CLI - semantic schema inference for CSV tables

use clap::{Args as ClapArgs, Parser, Subcommand};
use schema_scout::{CsvReader, DatePreference, FormatSampling, SchemaInferrer, export};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Infer semantic column types and datetime formats from CSV tables.
#[derive(Parser, Debug)]
#[command(name = "schema-scout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Infer metadata for a CSV file and save it as JSON
    Infer(InferArgs),

    /// Generate investigation questions from three table schemas
    #[cfg(feature = "http")]
    Questions(QuestionsArgs),
}

#[derive(ClapArgs, Debug)]
struct InferArgs {
    /// Input CSV file
    file: PathBuf,

    /// Output path (default: {table_name}_metadata.json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Table name (default: the file name without extension)
    #[arg(long)]
    name: Option<String>,

    /// Table description
    #[arg(long, default_value = "")]
    description: String,

    /// Field delimiter (single character)
    #[arg(short = 'd', long, default_value = ",")]
    delimiter: char,

    /// Use day-month-year date format preference (default: month-day-year)
    #[arg(long)]
    dmy: bool,

    /// Choose the datetime format from the first N values, not just the first
    #[arg(long, value_name = "N")]
    format_sample: Option<usize>,

    /// Detect columns in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the metadata JSON instead of writing a file
    #[arg(long)]
    stdout: bool,
}

#[cfg(feature = "http")]
#[derive(ClapArgs, Debug)]
struct QuestionsArgs {
    /// Model endpoint configuration (JSON)
    #[arg(long, default_value = "openai_config.json")]
    model_config: PathBuf,

    /// Schema and output locations (JSON)
    #[arg(long, default_value = "data_config.json")]
    data_config: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Infer(args) => infer(args),
        #[cfg(feature = "http")]
        Command::Questions(args) => questions(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so `--stdout` output stays clean.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn infer(args: &InferArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.delimiter.is_ascii() {
        return Err(format!(
            "delimiter must be a single ASCII character: {:?}",
            args.delimiter
        )
        .into());
    }

    let mut reader = CsvReader::new();
    reader.delimiter(args.delimiter as u8);

    let mut inferrer = SchemaInferrer::new();
    inferrer.parallel(args.parallel);
    if args.dmy {
        inferrer.date_preference(DatePreference::DmyFormat);
    }
    if let Some(n) = args.format_sample {
        inferrer.format_sampling(FormatSampling::Leading(n));
    }

    let table = reader.read_path(&args.file)?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| schema_scout::table_name_for(&args.file));
    let metadata = inferrer.infer(&table, &name, &args.description);

    if args.stdout {
        println!("{}", export::to_json_string(&metadata)?);
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| export::default_output_path(&metadata.table_name));
    export::write_json(&metadata, &output)?;
    println!("Metadata saved to: {}", output.display());
    Ok(())
}

#[cfg(feature = "http")]
fn questions(args: &QuestionsArgs) -> Result<(), Box<dyn std::error::Error>> {
    use schema_scout::{AzureOpenAiClient, DataConfig, ModelConfig, generate_questions};

    let model = ModelConfig::load(&args.model_config)?;
    let data = DataConfig::load(&args.data_config)?;
    let client = AzureOpenAiClient::new(model)?;

    let path = generate_questions(&data, &client)?;
    println!("Questions saved to: {}", path.display());
    Ok(())
}
