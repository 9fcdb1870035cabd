/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use citeproc_crosswalk::converter::IMPLEMENTATIONS;
use citeproc_crosswalk::{
    CrosswalkConfig, CrosswalkEngine, DiagnosticSink, Diagnostics, MetadataRecord, Properties,
    TracingSink,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const LEGACY_PREFIX: &str = "nz.ac.lconz.irr.crosswalk.citeproc.";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an item's metadata to CSL-JSON
    Transform {
        /// Path to the crosswalk configuration (.properties/.cfg or YAML)
        #[arg(index = 1)]
        config: PathBuf,

        /// Path to the item metadata (JSON or YAML)
        #[arg(index = 2)]
        record: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Exit with an error if any diagnostic was reported
        #[arg(long)]
        strict: bool,
    },
    /// Validate a crosswalk configuration and show what it maps
    Check {
        /// Path to the crosswalk configuration
        config: PathBuf,
    },
    /// List the converter implementations configuration may name
    Converters,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);
    debug!(?cli, "CLI arguments parsed");

    match cli.command {
        Commands::Transform {
            config,
            record,
            pretty,
            strict,
        } => {
            let mut diagnostics = Diagnostics::new();
            let engine = load_engine(&config, &mut diagnostics);

            let record = match load_record(&record) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Error reading record: {}", e);
                    std::process::exit(1);
                }
            };
            info!(values = record.len(), "record loaded");

            let doc = engine.transform_with(&record, &mut diagnostics);
            diagnostics.forward(&mut TracingSink);

            let json = if pretty {
                doc.to_json_pretty()
            } else {
                doc.to_json()
            };
            match json {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing document: {}", e);
                    std::process::exit(1);
                }
            }

            let status = transform_status(&diagnostics, strict);
            if status != 0 {
                eprintln!(
                    "{} diagnostic(s) reported in strict mode",
                    diagnostics.len()
                );
                std::process::exit(status);
            }
        }
        Commands::Check { config } => {
            let mut diagnostics = Diagnostics::new();
            let engine = load_engine(&config, &mut diagnostics);
            print_config(engine.config());

            if diagnostics.is_empty() {
                println!("\nConfiguration is valid.");
                return;
            }
            println!("\nDiagnostics:");
            for diagnostic in &diagnostics {
                println!("  [{:?}] {}", diagnostic.severity(), diagnostic);
            }
            std::process::exit(check_status(&diagnostics));
        }
        Commands::Converters => {
            for (id, converter) in IMPLEMENTATIONS {
                let id = if id.ends_with("Converter") {
                    format!("{}{}", LEGACY_PREFIX, id)
                } else {
                    id.to_string()
                };
                println!("  {:<56} {}", id, converter);
            }
        }
    }
}

/// Sets up logging on stderr; `RUST_LOG` overrides the flags.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Exit status of `transform`: in strict mode any diagnostic fails the run.
fn transform_status(diagnostics: &Diagnostics, strict: bool) -> i32 {
    if strict && !diagnostics.is_empty() {
        2
    } else {
        0
    }
}

/// Exit status of `check`: only error-severity diagnostics fail it.
fn check_status(diagnostics: &Diagnostics) -> i32 {
    if diagnostics.has_errors() { 1 } else { 0 }
}

fn load_engine(path: &Path, sink: &mut dyn DiagnosticSink) -> CrosswalkEngine {
    let properties = match Properties::load(path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error reading configuration {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };
    CrosswalkEngine::new(CrosswalkConfig::from_properties(&properties, sink))
}

fn load_record(path: &Path) -> Result<MetadataRecord, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(&content).map_err(|e| e.to_string()),
    }
}

fn print_config(config: &CrosswalkConfig) {
    println!("Converters:");
    for (name, converter) in config.registry().iter() {
        println!("  {:<12} {}", name, converter);
    }

    println!("\nFields:");
    for mapping in config.mappings().iter() {
        let sources: Vec<String> = mapping.sources().iter().map(|s| s.to_string()).collect();
        let converter = config.mappings().converter_for(mapping);
        let resolved = converter.and_then(|name| config.registry().get(name));
        let converter = match (converter, resolved) {
            (Some(name), Some(c)) => format!("{} ({})", name, c),
            (Some(name), None) => format!("{} (not registered)", name),
            (None, _) => "-".to_string(),
        };
        println!(
            "  {:<16} {:<48} {}",
            mapping.output(),
            sources.join(" | "),
            converter
        );
        let aux = resolved.map(|c| c.auxiliary_fields()).unwrap_or_default();
        if !aux.is_empty() {
            println!("  {:<16} also reads {}", "", aux.join(", "));
        }
    }
}
