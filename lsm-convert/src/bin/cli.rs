// SPDX-License-Identifier: GPL-3.0-only

//! CLI for inspecting plugin payloads with the lsm-convert library

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lsm_convert::{
    ConvertConfig, Entity, ErrorNumber, WireRecord, class_of, records_to_value,
    value_array_to_records,
};
use lsm_types::{
    AccessGroup, BlockRange, Capabilities, Disk, FileSystem, FsSnapshot, Heap, Initiator,
    NfsExport, OptionalData, Pool, RecordKind, System, Volume,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Decode plugin wire values into native records and back
#[derive(Parser)]
#[command(name = "lsm-convert-cli")]
#[command(about = "Inspect libstoragemgmt plugin payloads", long_about = None)]
struct Cli {
    /// TOML config with `log_level` and `heap_limit`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a payload to native records and print the re-encoded value
    Decode {
        /// Class of array elements; taken from the first element when omitted
        #[arg(long)]
        class: Option<String>,
        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Convert a payload and print only the outcome
    Check {
        /// Class of array elements; taken from the first element when omitted
        #[arg(long)]
        class: Option<String>,
        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct Outcome {
    class: Option<&'static str>,
    count: usize,
    error_number: ErrorNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

struct Converted {
    outcome: Outcome,
    value: Value,
}

fn read_input(input: &Path) -> Result<Value> {
    let raw = if input.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading stdin")?;
        raw
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?
    };
    serde_json::from_str(&raw).context("payload is not valid JSON")
}

fn resolve_kind(class: Option<&str>, value: &Value) -> Result<Option<RecordKind>> {
    let class = match class {
        Some(class) => Some(class),
        None => match value {
            Value::Array(items) => items.first().and_then(class_of),
            other => class_of(other),
        },
    };
    match class {
        None => Ok(None),
        Some(class) => match RecordKind::from_class_name(class) {
            Some(kind) => Ok(Some(kind)),
            None => bail!("unknown class '{class}'"),
        },
    }
}

fn convert_array<T: WireRecord>(heap: &dyn Heap, value: &Value) -> Converted {
    let class = Some(T::KIND.class_name());
    match value_array_to_records::<T>(heap, value) {
        Ok(Some(records)) => Converted {
            outcome: Outcome {
                class,
                count: records.len(),
                error_number: ErrorNumber::Ok,
                error: None,
            },
            value: records_to_value(&records),
        },
        Ok(None) => Converted {
            outcome: Outcome {
                class,
                count: 0,
                error_number: ErrorNumber::Ok,
                error: None,
            },
            value: Value::Array(Vec::new()),
        },
        Err(error) => Converted {
            outcome: Outcome {
                class,
                count: 0,
                error_number: error.code(),
                error: Some(error.to_string()),
            },
            value: Value::Null,
        },
    }
}

fn convert(heap: &dyn Heap, kind: Option<RecordKind>, value: &Value) -> Result<Converted> {
    if value.is_array() {
        let Some(kind) = kind else {
            if value.as_array().is_some_and(|items| !items.is_empty()) {
                bail!("cannot infer class of array elements; pass --class");
            }
            return Ok(Converted {
                outcome: Outcome {
                    class: None,
                    count: 0,
                    error_number: ErrorNumber::Ok,
                    error: None,
                },
                value: Value::Array(Vec::new()),
            });
        };
        let converted = match kind {
            RecordKind::Volume => convert_array::<Volume>(heap, value),
            RecordKind::Disk => convert_array::<Disk>(heap, value),
            RecordKind::Pool => convert_array::<Pool>(heap, value),
            RecordKind::System => convert_array::<System>(heap, value),
            RecordKind::Initiator => convert_array::<Initiator>(heap, value),
            RecordKind::AccessGroup => convert_array::<AccessGroup>(heap, value),
            RecordKind::FileSystem => convert_array::<FileSystem>(heap, value),
            RecordKind::FsSnapshot => convert_array::<FsSnapshot>(heap, value),
            RecordKind::NfsExport => convert_array::<NfsExport>(heap, value),
            RecordKind::BlockRange => convert_array::<BlockRange>(heap, value),
            RecordKind::Capabilities => convert_array::<Capabilities>(heap, value),
            RecordKind::OptionalData => convert_array::<OptionalData>(heap, value),
            RecordKind::StringList => bail!("string lists have no array converter"),
        };
        return Ok(converted);
    }

    if let Some(kind) = kind {
        if class_of(value) != Some(kind.class_name()) {
            bail!("object is not tagged as {kind}");
        }
    }

    match Entity::from_value(heap, value) {
        Ok(Some(entity)) => Ok(Converted {
            outcome: Outcome {
                class: Some(entity.kind().class_name()),
                count: 1,
                error_number: ErrorNumber::Ok,
                error: None,
            },
            value: entity.to_value(),
        }),
        Ok(None) => Ok(Converted {
            outcome: Outcome {
                class: kind.map(RecordKind::class_name),
                count: 0,
                error_number: ErrorNumber::Ok,
                error: None,
            },
            value: Value::Null,
        }),
        Err(error) => Ok(Converted {
            outcome: Outcome {
                class: kind.map(RecordKind::class_name),
                count: 0,
                error_number: ErrorNumber::InternalError,
                error: Some(error.to_string()),
            },
            value: Value::Null,
        }),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConvertConfig::load(path)?,
        None => ConvertConfig::default(),
    };

    // Initialize tracing to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.as_directive())),
        )
        .init();

    let heap = config.heap();
    debug!(heap_limit = ?config.heap_limit, "heap configured");

    let (class, input, print_value) = match &cli.command {
        Commands::Decode { class, input } => (class.as_deref(), input, true),
        Commands::Check { class, input } => (class.as_deref(), input, false),
    };

    let value = read_input(input)?;
    let kind = resolve_kind(class, &value)?;
    let converted = convert(heap.as_ref(), kind, &value)?;

    if print_value {
        println!("{}", serde_json::to_string_pretty(&converted.value)?);
    } else {
        println!("{}", serde_json::to_string(&converted.outcome)?);
    }

    let number = converted.outcome.error_number;
    if number != ErrorNumber::Ok {
        if let Some(error) = &converted.outcome.error {
            eprintln!("conversion failed: {error}");
        }
        std::process::exit(number.code());
    }

    info!(count = converted.outcome.count, "conversion succeeded");
    Ok(())
}
