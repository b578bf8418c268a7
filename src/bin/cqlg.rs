//! cqlg: compile, bind and normalize CQL from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Compile a JSON descriptor
//! cqlg compile update.json
//!
//! # Bind values into a statement
//! cqlg bind "select * from t where id = ? and name = ?" --bind 5,bob
//!
//! # Strip table qualifiers
//! cqlg strip "select * from users where users.id = ?"
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use cql_grammar::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cqlg")]
#[command(version)]
#[command(about = "Compile query descriptors to CQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    cqlg compile insert.json --bound
    cqlg bind 'select * from t where id = ?' --bind 42
    cqlg strip 'update ks.users set users.name = ? where users.id = ?'")]
struct Cli {
    /// Connection config file (TOML)
    #[arg(long, global = true, env = "CQLG_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON query descriptor
    Compile {
        /// Descriptor file, `-` for stdin
        path: PathBuf,

        /// Print the fully bound statement
        #[arg(short, long)]
        bound: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Bind values into the `?` markers of a statement
    Bind {
        /// Statement text
        query: String,

        /// Values in marker order
        #[arg(short, long, value_delimiter = ',')]
        bind: Vec<String>,
    },
    /// Remove `table.` qualifiers from where/set clauses
    Strip {
        /// Statement text
        query: String,
    },
    /// Show the resolved connection configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Compile {
            path,
            bound,
            format,
        } => compile(cli, path, *bound, format),
        Commands::Bind { query, bind } => bind_values(query, bind),
        Commands::Strip { query } => strip(query),
        Commands::Config => show_config(cli),
    }
}

fn read_descriptor(path: &PathBuf) -> Result<QueryDescriptor> {
    let content = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    Ok(QueryDescriptor::from_json(&content)?)
}

fn compile(cli: &Cli, path: &PathBuf, bound: bool, format: &OutputFormat) -> Result<()> {
    let desc = read_descriptor(path)?;
    let stmt = desc.to_cql()?;

    let finished = if bound {
        let (config, _) = ConnectionConfig::discover(cli.config.as_deref())?;
        Some(stmt.finalize(&config, &InlineBinder)?)
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "operation": desc.operation,
                "text": stmt.text,
                "parameters": stmt.parameters,
                "bound": finished,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("{}", "Generated CQL:".green().bold());
            println!("  {}", stmt.text.white());

            if !stmt.parameters.is_empty() {
                println!();
                println!("{}", "Parameters:".cyan());
                for (i, p) in stmt.parameters.iter().enumerate() {
                    println!("  ?{} = {}", i + 1, p.to_literal().yellow());
                }
            }

            if let Some(cql) = finished {
                println!();
                println!("{}", "Bound:".green().bold());
                println!("  {}", cql.white());
            }
        }
    }
    Ok(())
}

fn bind_values(query: &str, raw: &[String]) -> Result<()> {
    let values: Vec<Scalar> = raw.iter().map(|v| Scalar::parse_loose(v)).collect();
    let cql = bind(query, &values)?;
    println!("{}", cql);
    Ok(())
}

fn strip(query: &str) -> Result<()> {
    let cql = strip_qualifiers(query)?;
    if cql == query {
        tracing::debug!("query has no qualified columns");
    }
    println!("{}", cql);
    Ok(())
}

fn show_config(cli: &Cli) -> Result<()> {
    let (config, source) = ConnectionConfig::discover(cli.config.as_deref())?;

    match source {
        Some(path) => println!("{} {}", "Config:".dimmed(), path.display().to_string().cyan()),
        None => println!("{}", "Config: (defaults)".dimmed()),
    }
    println!();
    print!("{}", config.to_masked_toml()?);

    println!();
    println!("{}", "Nodes:".green().bold());
    for node in config.nodes() {
        println!("  • {}:{}", node.host.white(), node.port.to_string().yellow());
    }
    Ok(())
}
