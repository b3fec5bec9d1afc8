use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use sitekit_dev_settings::overrides::{OAUTH_SECRET_FILTER, SITE_URL_FILTER};
use sitekit_dev_settings::{
    FilterRegistry, OverrideController, SettingStore, SettingsError, TomlSettingStore,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

/// Developer-mode configuration overrides for Site Kit installs
///
/// Pins the reported site URL, OAuth client credentials, and Search
/// Console property ID from a local settings file.
#[derive(Parser, Debug)]
#[command(name = "sitekit-dev")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (bypasses the usual discovery)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Home URL of the local install, used for the OAuth redirect URI
    #[arg(long, default_value = "http://localhost")]
    home_url: Url,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show which overrides are active
    Status,
    /// Print the OAuth client-secret JSON document
    ClientSecret,
    /// Run a JSON value through a hook's filter chain
    Apply {
        /// Hook name (see `status` for the registered names)
        #[arg(long)]
        hook: String,

        /// JSON input file (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt().with_env_filter(filter).with_target(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file.clone())?;

    let store: Arc<dyn SettingStore> = match &args.settings {
        Some(path) => Arc::new(TomlSettingStore::from_path(path)?),
        None => Arc::new(TomlSettingStore::discover()?),
    };

    let controller = Arc::new(OverrideController::new(
        Arc::clone(&store),
        args.home_url.clone(),
    ));

    let mut filters = FilterRegistry::new();
    controller.register(&mut filters);
    info!("Filters registered: {:?}", filters.filter_names());

    match args.command {
        Command::Status => status(&store, &filters),
        Command::ClientSecret => client_secret(&filters),
        Command::Apply { hook, input } => apply(&filters, &hook, input.as_deref()),
    }
}

/// Applies a hook to a null sentinel to see whether an override kicks
/// in.
fn active_override(filters: &FilterRegistry, name: &str) -> Option<String> {
    match filters.apply(name, Value::Null) {
        Value::String(value) => Some(value),
        _ => None,
    }
}

fn status(store: &Arc<dyn SettingStore>, filters: &FilterRegistry) -> Result<()> {
    match active_override(filters, SITE_URL_FILTER) {
        Some(url) => println!("site URL override:        {}", url),
        None => println!("site URL override:        (inactive)"),
    }

    match active_override(filters, OAUTH_SECRET_FILTER) {
        Some(_) => println!("OAuth client secret:      configured"),
        None => println!("OAuth client secret:      (inactive)"),
    }

    match store.search_console_property_id() {
        Some(property_id) => println!("Search Console property:  {}", property_id),
        None => println!("Search Console property:  (inactive)"),
    }

    Ok(())
}

fn client_secret(filters: &FilterRegistry) -> Result<()> {
    match active_override(filters, OAUTH_SECRET_FILTER) {
        Some(document) => {
            println!("{}", document);
            Ok(())
        }
        None => anyhow::bail!("OAuth client credentials are not configured"),
    }
}

fn apply(filters: &FilterRegistry, hook: &str, input: Option<&Path>) -> Result<()> {
    if !filters.has_filter(hook) {
        return Err(SettingsError::UnknownHook(hook.to_string()).into());
    }

    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let value: Value = serde_json::from_str(raw.trim())?;
    let result = filters.apply(hook, value);

    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}
