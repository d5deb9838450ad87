use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lz77::{encode, encode_chained, Code, EncodedStream, WindowClass};

const DEMO_INPUT: &str = "12341234abcabcabcabcXXXXXXXXXXXXX";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an input file and report the size of the result
    Encode {
        /// Input file path (use - for stdin)
        input: String,
        /// Where to write the flat little-endian buffer (use - for stdout)
        output: Option<String>,
        /// Window class: 8, 16 or 32
        #[arg(long, default_value = "8")]
        class: WindowClass,
        /// Use the hash-chained match finder
        #[arg(long)]
        chained: bool,
    },
    /// Check that both match finders agree on an input, for every class
    Compare {
        /// Input file path (use - for stdin)
        input: String,
    },
    /// Encode a built-in sample and print every Code
    Demo,
}

// Helper to open input (file or stdin)
fn open_input(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        let file = File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

// Helper to open output (file or stdout)
fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(BufWriter::new(io::stdout())))
    } else {
        let file = File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn read_all(path: &str) -> Result<Vec<u8>> {
    let mut reader = open_input(path)?;
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .with_context(|| format!("Failed to read input: {}", path))?;
    Ok(input)
}

fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => bail!("Unknown log level: {}", other),
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

struct ClassReport {
    class: WindowClass,
    codes: usize,
    reference: Duration,
    chained: Duration,
    agree: bool,
}

fn compare_class(input: &[u8], class: WindowClass) -> Result<ClassReport> {
    let (reference_codes, reference) = timed(|| encode(input, class));
    let (chained_codes, chained) = timed(|| encode_chained(input, class));

    let reference_stream = EncodedStream::from_codes(&reference_codes, class)
        .with_context(|| format!("Reference encoding does not fit class {}", class))?;
    let chained_stream = EncodedStream::from_codes(&chained_codes, class)
        .with_context(|| format!("Chained encoding does not fit class {}", class))?;

    Ok(ClassReport {
        class,
        codes: reference_codes.len(),
        reference,
        chained,
        agree: reference_stream == chained_stream,
    })
}

fn print_codes(codes: &[Code]) {
    let rendered: Vec<String> = codes.iter().map(|code| code.to_string()).collect();
    println!("{}", rendered.join(","));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Encode {
            input,
            output,
            class,
            chained,
        } => {
            let data = read_all(&input)?;
            info!(path = %input, bytes = data.len(), class = class.bits(), chained, "encoding");

            let (codes, elapsed) = if chained {
                timed(|| encode_chained(&data, class))
            } else {
                timed(|| encode(&data, class))
            };
            let stream = EncodedStream::from_codes(&codes, class)
                .with_context(|| format!("Encoding of {} does not fit class {}", input, class))?;

            eprintln!("File is {} bytes long.", data.len());
            eprintln!("Encoding size: {} codes, {} bytes.", stream.code_count(), stream.byte_len());
            eprintln!("Encoded in {:.3?}.", elapsed);

            if let Some(output) = output {
                let mut writer = open_output(&output)?;
                stream
                    .write_le(&mut writer)
                    .with_context(|| format!("Failed to write encoding to {}", output))?;
            }
        }
        Commands::Compare { input } => {
            let data = read_all(&input)?;
            info!(path = %input, bytes = data.len(), "comparing match finders");

            let reports: Vec<Result<ClassReport>> = WindowClass::ALL
                .par_iter()
                .map(|&class| compare_class(&data, class))
                .collect();

            let mut mismatched = Vec::new();
            for report in reports {
                let report = report?;
                eprintln!(
                    "class {:>2}: {} codes, reference {:.3?}, chained {:.3?}, {}",
                    report.class.bits(),
                    report.codes,
                    report.reference,
                    report.chained,
                    if report.agree { "identical" } else { "MISMATCH" }
                );
                if !report.agree {
                    mismatched.push(report.class.to_string());
                }
            }
            if !mismatched.is_empty() {
                bail!("Match finders disagree on {} for class {}", input, mismatched.join(", "));
            }
        }
        Commands::Demo => {
            let codes = encode(DEMO_INPUT.as_bytes(), WindowClass::Bits8);
            println!("{} is the input.", DEMO_INPUT);
            print_codes(&codes);
            let literals = codes.iter().filter(|code| code.is_literal()).count();
            println!("Input has {} bytes, encoded in {} codes.", DEMO_INPUT.len(), codes.len());
            println!("{} literal codes, {} back-references.", literals, codes.len() - literals);
        }
    }

    Ok(())
}
