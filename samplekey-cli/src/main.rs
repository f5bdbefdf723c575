//! CLI for inspecting and ordering encoded sample keys.
//!
//! Keys are passed and printed as hex strings, the way they appear in
//! storage dumps. Every command uses the same comparator the storage engine
//! loads, so `sort` output is the order keys hold on disk.

use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use samplekey::{FingerprintSummary, KeyComparator, SampleKey, SampleKeyComparator};
use tracing_subscriber::EnvFilter;

/// Inspect and order encoded time-series sample keys.
#[derive(Parser)]
#[command(name = "samplekey", version, about)]
struct Cli {
    /// Log decode diagnostics (repeat for more detail). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the comparator name recorded by the storage engine.
    Identity,

    /// Decode hex-encoded keys.
    Decode {
        /// Hex-encoded keys (`-` for the empty key).
        #[arg(required = true)]
        keys: Vec<String>,

        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Fail on malformed keys instead of decoding them as empty.
        #[arg(long)]
        strict: bool,
    },

    /// Compare two hex-encoded keys; prints -1, 0 or 1.
    Compare {
        /// Left key (`-` for the empty key).
        left: String,

        /// Right key (`-` for the empty key).
        right: String,
    },

    /// Encode a key from its fields; prints hex.
    Encode {
        /// Fingerprint hash.
        #[arg(long, default_value = "0")]
        hash: u64,

        /// Fingerprint first character.
        #[arg(long, default_value = "")]
        first: String,

        /// Fingerprint label matter modulus.
        #[arg(long, default_value = "0")]
        modulus: u32,

        /// Fingerprint last character.
        #[arg(long, default_value = "")]
        last: String,

        /// Key timestamp.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        timestamp: i64,

        /// Newest sample timestamp under the key.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        last_timestamp: i64,

        /// Number of samples under the key.
        #[arg(long, default_value = "0")]
        sample_count: u32,
    },

    /// Sort hex-encoded keys, one per line, into storage order.
    Sort {
        /// Input file (stdin if omitted). Blank lines and `#` comments are skipped.
        file: Option<PathBuf>,

        /// Only check that the input is already sorted.
        #[arg(long)]
        check: bool,
    },
}

/// Output format for decoded keys.
#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One human-readable line per key.
    Text,
    /// JSON array of objects.
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Identity => {
            println!("{}", SampleKeyComparator::new().identity());
            Ok(())
        }
        Commands::Decode {
            keys,
            format,
            strict,
        } => cmd_decode(&keys, &format, strict),
        Commands::Compare { left, right } => cmd_compare(&left, &right),
        Commands::Encode {
            hash,
            first,
            modulus,
            last,
            timestamp,
            last_timestamp,
            sample_count,
        } => {
            let fingerprint = FingerprintSummary::new(hash, first, modulus, last);
            let key = SampleKey::new(fingerprint, timestamp)
                .with_payload(last_timestamp, sample_count);
            println!("{}", format_key(&key.encode()));
            Ok(())
        }
        Commands::Sort { file, check } => cmd_sort(file.as_deref(), check),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Implements `samplekey decode <KEY>...`.
fn cmd_decode(
    keys: &[String],
    format: &OutputFormat,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut decoded = Vec::with_capacity(keys.len());
    for key in keys {
        let bytes = parse_key(key)?;
        let record = if strict {
            SampleKey::try_decode(&bytes).map_err(|e| format!("key '{key}': {e}"))?
        } else {
            SampleKey::decode(&bytes)
        };
        decoded.push((key, record));
    }

    match format {
        OutputFormat::Text => {
            for (key, record) in &decoded {
                println!("{key}\t{record}");
            }
        }
        OutputFormat::Json => {
            let json_data: Vec<serde_json::Value> = decoded
                .iter()
                .map(|(key, record)| {
                    serde_json::json!({
                        "hex": key,
                        "key": record,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json_data)?);
        }
    }

    Ok(())
}

/// Implements `samplekey compare <LEFT> <RIGHT>`.
fn cmd_compare(left: &str, right: &str) -> Result<(), Box<dyn std::error::Error>> {
    let left = parse_key(left)?;
    let right = parse_key(right)?;
    let verdict = SampleKeyComparator::new().compare(&left, &right);
    println!("{}", samplekey::ffi::ordering_to_c(verdict));
    Ok(())
}

/// Implements `samplekey sort [FILE]`.
fn cmd_sort(file: Option<&Path>, check: bool) -> Result<(), Box<dyn std::error::Error>> {
    let keys = match file {
        Some(path) => {
            let file = std::fs::File::open(path)
                .map_err(|e| format!("cannot open '{}': {e}", path.display()))?;
            read_keys(BufReader::new(file))?
        }
        None => read_keys(io::stdin().lock())?,
    };
    tracing::debug!("read {} keys", keys.len());

    for (line, key) in &keys {
        if SampleKey::try_decode(key).is_err() {
            tracing::warn!("key on line {line} is malformed; it sorts as the empty key");
        }
    }

    let comparator = SampleKeyComparator::new();

    if check {
        if let Some(pair) = keys
            .windows(2)
            .find(|pair| comparator.compare(&pair[0].1, &pair[1].1).is_gt())
        {
            return Err(format!("keys out of order at line {}", pair[1].0).into());
        }
        println!("{} keys in order", keys.len());
        return Ok(());
    }

    for key in comparator.sort(keys.into_iter().map(|(_, key)| key)) {
        println!("{}", format_key(&key));
    }

    Ok(())
}

/// Reads one hex key per line, returning each with its 1-based line number.
fn read_keys(reader: impl BufRead) -> Result<Vec<(usize, Vec<u8>)>, Box<dyn std::error::Error>> {
    let mut keys = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let key = parse_key(trimmed).map_err(|e| format!("line {}: {e}", index + 1))?;
        keys.push((index + 1, key));
    }
    Ok(keys)
}

/// Parses a hex-encoded key. `-` is the empty key.
fn parse_key(s: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let s = s.trim();
    if s == "-" {
        return Ok(Vec::new());
    }
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if !s.len().is_multiple_of(2) {
        return Err(format!("odd number of hex digits in '{s}'").into());
    }

    s.as_bytes()
        .chunks(2)
        .map(|pair| -> Result<u8, Box<dyn std::error::Error>> {
            let digits = std::str::from_utf8(pair)?;
            Ok(u8::from_str_radix(digits, 16)
                .map_err(|_| format!("invalid hex digits '{digits}'"))?)
        })
        .collect()
}

/// Formats a key as lowercase hex. The empty key is `-`.
fn format_key(key: &[u8]) -> String {
    if key.is_empty() {
        return "-".to_string();
    }
    key.iter().map(|b| format!("{b:02x}")).collect()
}
