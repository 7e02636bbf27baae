use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use readiness::coverage::{self, Band};
use readiness::{Location, MetaField, ReadinessConfig, Session};
use readiness_dialoguer_wizard::{
    DialoguerWizard, FileParamStore, FileSecureStore, WizardError, export, wizard,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Walk through the SRE readiness assessment and export it as CSV.
#[derive(Debug, Parser)]
#[command(name = "sre-readiness", version)]
struct Cli {
    /// File holding the shareable answers as a query string.
    #[arg(long, default_value = "readiness.state")]
    state: PathBuf,

    /// File holding the sensitive answers.
    #[arg(long, default_value = "readiness.secure.json")]
    secure: PathBuf,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the CSV report is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Disable colors.
    #[arg(long)]
    plain: bool,

    /// Clear every answer before starting.
    #[arg(long)]
    reset: bool,

    /// Print the shareable query string and exit.
    #[arg(long)]
    share: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ReadinessConfig::load(path)?,
        None => ReadinessConfig::default(),
    };
    let params = FileParamStore::open(&cli.state)
        .with_context(|| format!("Failed to open state file '{}'", cli.state.display()))?;
    let mut session = Session::new(params, FileSecureStore::open(&cli.secure), config);

    if cli.reset {
        session.reset();
        tracing::info!("answers cleared");
    }
    if cli.share {
        println!("?{}", session.shareable_query());
        return Ok(());
    }

    let prompter = if cli.plain {
        DialoguerWizard::plain()
    } else {
        DialoguerWizard::new()
    };
    match wizard::run(&mut session, &prompter) {
        Ok(_) => {}
        Err(WizardError::Cancelled) => {
            println!("Assessment cancelled. Answers so far are saved.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    let answers = session.answers();
    if let Some(location) = Location::parse(answers.text(MetaField::Location)) {
        print_coverage(&coverage::coverage(&answers, location));
    }

    let today = chrono::Local::now().date_naive();
    match export(&session, &cli.out_dir, today) {
        Ok(exported) => {
            println!("\nReport written to {}", exported.path.display());
            println!("Attach it to the email:\n{}", exported.draft.to_mailto_uri());
            Ok(())
        }
        Err(WizardError::Blocked(blocked)) => {
            println!("\n{blocked}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_coverage(stats: &[coverage::CapabilityCoverage]) {
    if stats.is_empty() {
        return;
    }
    println!("\nMonitoring coverage");
    for stat in stats {
        let band = match stat.overall.band() {
            Some(Band::Green) => "good",
            Some(Band::Orange) => "partial",
            Some(Band::Red) => "poor",
            None => "-",
        };
        println!(
            "  {:<10} overall {:>4} ({band})  monitoring {:>4}  alerting {:>4}",
            stat.capability.title(),
            stat.overall.to_string(),
            stat.monitoring.to_string(),
            stat.alerting.to_string(),
        );
    }
}
