//! odata-jpql - translate OData query trees into parameterized JPQL

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::info;
use odata_jpql::request::{TranslationRequest, TranslationResponse};
use odata_jpql::{JpqlTranslator, TranslatorConfig};
use std::path::PathBuf;

/// Translate a JSON OData query request into JPQL fragments
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Request file, `-` or absent for stdin
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Table alias, overrides the alias in the request
    #[arg(short, long)]
    alias: Option<String>,

    /// Placeholder prefix
    #[arg(short, long)]
    prefix: Option<String>,

    /// Composite key separator
    #[arg(short, long)]
    separator: Option<String>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = load_config(&args)?;
    let translator = JpqlTranslator::new(config);

    let request = match args.request.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            info!("Reading request from {}", path.display());
            TranslationRequest::from_file(path).context("Failed to load request")?
        }
        _ => TranslationRequest::from_reader(std::io::stdin().lock())
            .context("Failed to read request from stdin")?,
    };

    let response = request
        .translate(&translator, args.alias.as_deref())
        .context("Failed to translate request")?;
    print_response(&response);

    Ok(())
}

/// Defaults, then the config file, then explicit flags
fn load_config(args: &Args) -> Result<TranslatorConfig> {
    let mut config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TranslatorConfig::default(),
    };
    if let Some(prefix) = &args.prefix {
        config.placeholder_prefix = prefix.clone();
    }
    if let Some(separator) = &args.separator {
        config.composite_separator = separator.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn print_response(response: &TranslationResponse) {
    if let Some(select) = &response.select {
        println!("SELECT {}", select);
    }
    if let Some(condition) = response.where_clause() {
        println!("WHERE {}", condition);
    }
    if let Some(order_by) = &response.order_by {
        println!("ORDER BY {}", order_by);
    }
    for (index, value) in response.parameters.iter() {
        println!("  {} = {}", index, value);
    }
}
