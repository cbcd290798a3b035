//! kvtree CLI
//!
//! Usage:
//!   kvtree                     - print usage
//!   kvtree <input>             - parse <input> and write it back to stdout
//!   kvtree <input> <output>    - parse <input>, write it to <output>, report timings

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use kvtree::{from_path, to_path, to_writer, Error};

const EXIT_SUCCESS: u8 = 0;
const EXIT_INVALID_ARGS: u8 = 1;
const EXIT_SYNTAX_ERROR: u8 = 2;
const EXIT_IO_ERROR: u8 = 3;

#[derive(Parser)]
#[command(name = "kvtree", about = "Key-Value parser", version)]
struct Cli {
    /// File to read
    input: Option<String>,

    /// File to write; stdout when omitted
    output: Option<String>,

    /// Log parser activity to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn init_tracing(cli: &Cli) {
    // stdout carries the document, so logs always go to stderr.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("kvtree=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_usage() {
    println!("Key-Value Parser Library");
    println!();
    println!("Arguments:");
    println!("\t0\tDisplay this help");
    println!("\t1\tRead file from 1st argument and output its data to standard output.");
    println!("\t2\tRead file from 1st argument and output its data to file from 2nd argument.");
}

fn exit_code(err: &Error) -> u8 {
    match err {
        Error::UnexpectedEndOfSection { .. } => EXIT_SYNTAX_ERROR,
        Error::NotFound(_) => EXIT_INVALID_ARGS,
        Error::Io(_) => EXIT_IO_ERROR,
    }
}

fn run(cli: Cli) -> Result<u8, Error> {
    let Some(input) = cli.input else {
        print_usage();
        return Ok(EXIT_SUCCESS);
    };

    if input.is_empty() {
        eprintln!("Invalid input file name.");
        return Ok(EXIT_INVALID_ARGS);
    }
    if !Path::new(&input).exists() {
        eprintln!("Input file does not exist.");
        return Ok(EXIT_INVALID_ARGS);
    }

    let load_started = Instant::now();
    let doc = from_path(&input)?;
    let load_time = load_started.elapsed();

    let Some(output) = cli.output else {
        let stdout = io::stdout();
        to_writer(stdout.lock(), &doc)?;
        return Ok(EXIT_SUCCESS);
    };

    println!("Load Time: {} ms", load_time.as_secs_f64() * 1000.0);

    if output.is_empty() {
        eprintln!("Invalid output file name.");
        return Ok(EXIT_INVALID_ARGS);
    }

    let save_started = Instant::now();
    to_path(&output, &doc)?;
    let save_time = save_started.elapsed();

    println!("Save Time: {} ms", save_time.as_secs_f64() * 1000.0);
    println!(
        "Total Time: {} ms",
        (load_time + save_time).as_secs_f64() * 1000.0
    );
    io::stdout().flush().map_err(Error::from)?;

    Ok(EXIT_SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}
