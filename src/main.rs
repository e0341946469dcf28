//! Operator CLI: inspect translations and dictionary coverage of a site.

use std::io::{
    self,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use portfolio_core::config::ConfigManager;
use portfolio_core::i18n::{
    Catalog,
    FsSource,
    LoadStatus,
    Resolver,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portfolio", version, about = "Inspect portfolio translations")]
struct Cli {
    /// Site root containing `.portfolio.json`
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve keys for a locale
    Translate {
        #[arg(long)]
        locale: String,
        /// Namespaces to load in addition to the base namespace
        #[arg(long = "ns")]
        namespaces: Vec<String>,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// List namespaces and keys a locale is missing
    Coverage {
        #[arg(long)]
        locale: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = Vec::new();
    let result = run(cli, &mut out).await;
    if let Err(error) = io::stdout().lock().write_all(&out) {
        tracing::error!(%error, "Failed to write output");
        return ExitCode::FAILURE;
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "portfolio failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, out: &mut (impl Write + Send)) -> Result<(), Box<dyn std::error::Error>> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.root))?;
    let settings = config_manager.get_settings();
    let messages_dir = config_manager.messages_dir();
    tracing::debug!(
        config = ?config_manager.config_path(),
        messages_dir = %messages_dir.display(),
        "Using site configuration"
    );

    let resolver = Resolver::from_settings(FsSource::new(&messages_dir), &settings.i18n)?;

    match cli.command {
        Command::Translate { locale, namespaces, keys } => {
            let namespaces: Vec<&str> = namespaces.iter().map(String::as_str).collect();
            let resolution = resolver.resolve(&locale, &namespaces).await;

            writeln!(out, "locale: {} ({})", resolution.locale, resolution.direction)?;
            for entry in resolution.report.entries() {
                let status = match &entry.status {
                    LoadStatus::Loaded => "loaded".to_string(),
                    LoadStatus::Missing => "missing".to_string(),
                    LoadStatus::Failed(reason) => format!("failed: {reason}"),
                };
                writeln!(out, "  {}/{}: {status}", entry.locale, entry.namespace)?;
            }
            for key in &keys {
                writeln!(out, "{key} = {}", resolution.translator.t(key))?;
            }
        }
        Command::Coverage { locale } => {
            let catalog = Catalog::scan(&messages_dir)?;
            let target = resolver.locales().negotiate(&locale);
            let default = resolver.locales().default_locale();
            let coverage = catalog
                .coverage(
                    resolver.source(),
                    default.as_str(),
                    target.as_str(),
                    &settings.i18n.key_separator,
                )
                .await;

            if coverage.is_complete() {
                writeln!(out, "{target}: complete")?;
            }
            for namespace in &coverage.missing_namespaces {
                writeln!(out, "{target}: missing namespace {namespace}")?;
            }
            for key in &coverage.missing_keys {
                writeln!(out, "{target}: missing key {key}")?;
            }
        }
    }

    Ok(())
}
