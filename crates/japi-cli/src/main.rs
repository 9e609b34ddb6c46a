use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::process;
use tabwriter::TabWriter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use japi_io::document_json::{
    deserialize_document_json_str, parse_document_json_str, parse_records_json_str,
    parse_schema_json_str, serialize_records,
};
use japi_io::prelude::*;
use serde_json::{Map, Value};

#[derive(Debug, Parser)]
#[command(name = "japi", version, about = "JSON:API document codec CLI")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print a machine-readable summary of the codec call on stderr.
    #[arg(long, global = true)]
    telemetry: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a flat record (or an array of records) as a JSON:API document.
    Serialize {
        /// Schema configuration JSON path
        #[arg(long)]
        schema: String,
        /// Record JSON path: one object, or an array of objects
        record: String,
        /// Optional top-level meta JSON object path
        #[arg(long)]
        meta: Option<String>,
        /// Output minified JSON
        #[arg(long, conflicts_with = "canonical")]
        min: bool,
        /// Output canonical JSON (sorted members and `included`, minified)
        #[arg(long)]
        canonical: bool,
    },
    /// Read flat records back out of a JSON:API document.
    Deserialize {
        /// Schema configuration JSON path
        #[arg(long)]
        schema: String,
        /// Document JSON path
        document: String,
    },
    /// Tabulate the primary and included resources of a document.
    Inspect {
        /// Document JSON path
        document: String,
    },
}

/// Exit code for rejections by the codec. I/O and parse failures exit with 1.
const EXIT_CODEC: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        process::exit(exit_code(&err));
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    let codec = err.downcast_ref::<CodecError>().is_some()
        || err
            .downcast_ref::<DocumentJsonError>()
            .is_some_and(DocumentJsonError::is_codec);
    if codec { EXIT_CODEC } else { 1 }
}

fn read(path: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.cmd {
        Command::Serialize {
            schema,
            record,
            meta,
            min,
            canonical,
        } => {
            let schema = parse_schema_json_str(&read(&schema)?)?;
            let records = parse_records_json_str(&read(&record)?)?;
            let options = match meta {
                Some(path) => RenderOptions::with_meta(read_meta(&path)?),
                None => RenderOptions::default(),
            };

            let result = serialize_records(records, &schema, &options);
            if cli.telemetry {
                let telemetry = match &result {
                    Ok(doc) => CodecTelemetry::for_document("serialize", &schema, doc),
                    Err(e) => CodecTelemetry::for_error("serialize", &schema, e),
                };
                eprintln!("{}", serde_json::to_string(&telemetry)?);
            }
            let doc = result?;

            println!("{}", OutputFormat::from_flags(min, canonical).write(&doc)?);
        }
        Command::Deserialize { schema, document } => {
            let schema = parse_schema_json_str(&read(&schema)?)?;
            let s = read(&document)?;

            let result = deserialize_document_json_str(&s, &schema);
            if cli.telemetry {
                let telemetry = match &result {
                    Ok(_) => {
                        let doc = parse_document_json_str(&s)?;
                        Some(CodecTelemetry::for_document("deserialize", &schema, &doc))
                    }
                    Err(DocumentJsonError::Codec(e)) => {
                        Some(CodecTelemetry::for_error("deserialize", &schema, e))
                    }
                    // Nothing reached the codec.
                    Err(_) => None,
                };
                if let Some(telemetry) = telemetry {
                    eprintln!("{}", serde_json::to_string(&telemetry)?);
                }
            }

            println!("{}", serde_json::to_string_pretty(&result?)?);
        }
        Command::Inspect { document } => {
            let doc = parse_document_json_str(&read(&document)?)?;
            debug!(shape = doc.data.shape(), "inspecting document");
            print_table(&doc)?;
        }
    }
    Ok(())
}

fn read_meta(path: &str) -> anyhow::Result<Map<String, Value>> {
    let v: Value = serde_json::from_str(&read(path)?)
        .with_context(|| format!("failed to parse meta JSON {path}"))?;
    match v {
        Value::Object(meta) => Ok(meta),
        _ => bail!("meta JSON {path} must be an object"),
    }
}

fn print_table(doc: &Document) -> anyhow::Result<()> {
    let mut tw = TabWriter::new(io::stdout());
    writeln!(tw, "section\ttype\tid\tattributes\trelationships")?;

    let sections = [
        ("data", doc.data.resources()),
        ("included", doc.included()),
    ];
    for (section, resources) in sections {
        for res in resources {
            let attributes = res
                .attributes
                .as_ref()
                .map(|a| a.keys().map(String::as_str).collect::<Vec<_>>().join(","));
            let relationships = res
                .relationships
                .as_ref()
                .map(|r| r.keys().map(String::as_str).collect::<Vec<_>>().join(","));
            writeln!(
                tw,
                "{section}\t{}\t{}\t{}\t{}",
                res.kind,
                if res.id.is_empty() { "-" } else { res.id.as_str() },
                cell(attributes),
                cell(relationships),
            )?;
        }
    }
    tw.flush()?;
    Ok(())
}

fn cell(joined: Option<String>) -> String {
    joined.filter(|s| !s.is_empty()).unwrap_or_else(|| "-".to_string())
}
