//! csv-guess CLI - guess a CSV parser configuration

use clap::Parser;
use csv_guess::{
    CsvGuesser, DatePreference, Guess, GuessMode, GuessPolicy, GuessResult, ParserConfig,
    SampleSize,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Guess a CSV parser configuration from the start of a file.
///
/// Prints the configuration diff (delimiter, quote, escape, header skip,
/// column schema) that a CSV parser needs to read the file. Fields given in
/// the seed are kept as-is and not printed.
#[derive(Parser, Debug)]
#[command(name = "csv-guess")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file(s) to guess
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON file with the seed parser configuration
    #[arg(short = 's', long)]
    seed: Option<PathBuf>,

    /// JSON file with candidate delimiters, quotes, escapes and literals
    #[arg(short = 'p', long)]
    policy: Option<PathBuf>,

    /// Type every column as string
    #[arg(long)]
    all_strings: bool,

    /// Maximum number of lines to sample
    #[arg(short = 'n', long, default_value = "100")]
    sample_lines: usize,

    /// Maximum number of bytes to sample
    #[arg(short = 'b', long, default_value = "32768")]
    sample_bytes: usize,

    /// Use day-month-year date format preference (default: month-day-year)
    #[arg(long)]
    dmy: bool,

    /// Output format: json (default) or text
    #[arg(short = 'f', long, default_value = "json")]
    format: OutputFormat,

    /// Parse and print the first N records with the guessed dialect
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let guesser = match build_guesser(&args) {
        Ok(guesser) => guesser,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let seed = match load_seed(args.seed.as_deref()) {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("Error reading seed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut exit_code = ExitCode::SUCCESS;

    for file in &args.files {
        if let Err(e) = guess_file(file, &guesser, &seed, &args) {
            eprintln!("Error processing {}: {}", file.display(), e);
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "csv_guess=debug",
        _ => "csv_guess=trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn build_guesser(args: &Args) -> csv_guess::Result<CsvGuesser> {
    let mut guesser = CsvGuesser::new();
    guesser.sample_size(SampleSize::new(args.sample_lines, args.sample_bytes));

    if args.dmy {
        guesser.date_preference(DatePreference::DmyFormat);
    }
    if args.all_strings {
        guesser.mode(GuessMode::AllStrings);
    }
    if let Some(path) = &args.policy {
        let json = std::fs::read_to_string(path)?;
        guesser.policy(GuessPolicy::from_json(&json)?);
    }

    Ok(guesser)
}

fn load_seed(path: Option<&Path>) -> csv_guess::Result<ParserConfig> {
    match path {
        Some(path) => ParserConfig::from_json(&std::fs::read_to_string(path)?),
        None => Ok(ParserConfig::default()),
    }
}

fn guess_file(
    path: &Path,
    guesser: &CsvGuesser,
    seed: &ParserConfig,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = guesser.guess_path(path, seed)?;

    match args.format {
        OutputFormat::Json => println!("{}", result.to_config_diff(seed).to_json_pretty()?),
        OutputFormat::Text => print_text_output(path, &result),
    }

    if let (Some(limit), Some(guess)) = (args.preview, result.guess()) {
        print_preview(path, guess, limit)?;
    }

    Ok(())
}

fn print_text_output(path: &Path, result: &GuessResult) {
    println!("File: {}", path.display());

    let guess = match result {
        GuessResult::Empty(reason) => {
            println!("  No suggestion: {reason}");
            println!();
            return;
        }
        GuessResult::Suggested(guess) => guess,
    };

    println!("  Delimiter: {:?}", guess.dialect.delimiter);
    println!("  Quote: {}", guess.dialect.quote);
    println!("  Escape: {}", guess.dialect.escape);
    if let Some(null) = &guess.dialect.null_string {
        println!("  Null string: {null:?}");
    }
    if let Some(marker) = &guess.comment_line_marker {
        println!("  Comment marker: {marker:?}");
    }
    println!("  Has header: {}", guess.header);
    println!("  Skip header lines: {}", guess.skip_header_lines);
    println!("  Trim: {}", guess.trim);
    println!("  Columns:");
    for (i, column) in guess.columns.iter().enumerate() {
        match column.column_type.timestamp_format() {
            Some(ts) => println!(
                "    {}: {} ({}, format {})",
                i + 1,
                column.name,
                column.column_type,
                ts.patterns().collect::<Vec<_>>().join(" | ")
            ),
            None => println!("    {}: {} ({})", i + 1, column.name, column.column_type),
        }
    }

    println!();
}

fn print_preview(path: &Path, guess: &Guess, limit: usize) -> csv_guess::Result<()> {
    let Some(builder) = guess.dialect.reader_builder(guess.trim) else {
        eprintln!("Preview unavailable: dialect characters are not single bytes");
        return Ok(());
    };

    let mut reader = builder.from_path(path)?;
    let skip = guess.skip_header_lines as u64;

    println!("  Preview:");
    let mut shown = 0;
    for record in reader.records() {
        if shown == limit {
            break;
        }
        let record = record?;
        // positions are 1-based lines; preamble and header end at `skip`
        if record.position().is_some_and(|pos| pos.line() <= skip) {
            continue;
        }
        if let Some(marker) = &guess.comment_line_marker
            && record.get(0).is_some_and(|field| field.starts_with(marker.as_str()))
        {
            continue;
        }
        let fields: Vec<&str> = record.iter().collect();
        println!("    {}", fields.join(" | "));
        shown += 1;
    }
    println!();

    Ok(())
}
