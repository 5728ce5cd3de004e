//! relief-normalize CLI - one row per work type for case exports
//!
//! # Commands
//!
//! ```bash
//! relief-normalize                          # input_data.csv -> output_data_<MMDDYYHHMMSS>.csv
//! relief-normalize normalize cases.csv -o normalized.csv
//! relief-normalize summary normalized.csv   # frequency tables of a normalized file
//! relief-normalize parse cases.csv          # dump parsed rows as JSON
//! ```
//!
//! `RELIEF_INPUT`, `RELIEF_OUTPUT_DIR` and `RELIEF_LOG_FORMAT` may be set in
//! the environment or a `.env` file.

use clap::{Parser, Subcommand};
use relief_normalize::logs::{log_error, log_info, log_success, LogFormat, LOGGER};
use relief_normalize::{
    normalize_file, parse_csv_file, timestamped_output_path, NormalizeOptions, Summary,
    DEFAULT_INPUT_FILE,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "relief-normalize")]
#[command(about = "Split multi-work-type case rows into one row per work type", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log format on stderr (text or json)
    #[arg(long, global = true, env = "RELIEF_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Suppress progress logs
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a case export (the default command)
    Normalize(NormalizeArgs),

    /// Print value counts of an already-normalized file
    Summary {
        /// Normalized CSV file
        input: PathBuf,

        /// Field delimiter
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a case export and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Field delimiter
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Force input encoding (auto-detect if not specified)
        #[arg(long)]
        encoding: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct NormalizeArgs {
    /// Input CSV file
    #[arg(env = "RELIEF_INPUT", default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Output file (default: output_data_<MMDDYYHHMMSS>.csv in --output-dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the timestamped output file
    #[arg(long, env = "RELIEF_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Force input encoding (auto-detect if not specified)
    #[arg(long)]
    encoding: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    LOGGER.set_format(cli.log_format);
    LOGGER.set_quiet(cli.quiet);

    let result = match cli.command {
        Some(Commands::Normalize(args)) => cmd_normalize(args),
        None => cmd_normalize(NormalizeArgs::parse_from(["relief-normalize"])),

        Some(Commands::Summary {
            input,
            delimiter,
            json,
        }) => cmd_summary(&input, delimiter, json),

        Some(Commands::Parse {
            input,
            delimiter,
            encoding,
            output,
        }) => cmd_parse(&input, delimiter, encoding.as_deref(), output.as_deref()),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!("delimiter must be a single ASCII character, got '{}'", s)),
            }
        }
    }
}

fn cmd_normalize(args: NormalizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let output = args
        .output
        .unwrap_or_else(|| timestamped_output_path(&args.output_dir));

    let options = NormalizeOptions {
        delimiter: args.delimiter,
        encoding: args.encoding,
    };

    let result = normalize_file(&args.input, &output, &options)?;

    print_summary(&result.summary, args.json)?;
    Ok(())
}

fn cmd_summary(input: &Path, delimiter: u8, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = parse_csv_file(input, delimiter, None)?;
    let records = &parsed.table.records;

    print_summary(&Summary::from_records(records.len(), records), json)?;
    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: u8,
    encoding: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("📄 Parsing CSV: {}", input.display()));

    let result = parse_csv_file(input, delimiter, encoding)?;
    log_info(format!("Encoding: {}", result.encoding));
    log_info(format!("Columns: {}", result.table.schema.headers().join(", ")));
    log_success(format!("Parsed {} records", result.table.records.len()));

    let json = serde_json::to_string_pretty(&result.table.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn print_summary(summary: &Summary, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!();
        print!("{}", summary);
    }
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            log_success(format!("💾 Output written to: {}", p.display()));
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
