//! hitfeed terminal client entry point.
//!
//! # Usage
//!
//! ```bash
//! # Watch a local service
//! hitfeed
//!
//! # Watch a deployed service, preset the badge, log to a file
//! hitfeed --origin https://hits.example.com --username foo --repository bar \
//!     --log-file hitfeed.log --log-level debug
//!
//! # Print the badge snippets and exit
//! hitfeed --origin https://hits.example.com --username foo --print-badge
//! ```

use std::{io::Write, path::PathBuf};

use clap::Parser;
use hitfeed_app::{BadgeField, BadgeGenerator, Runtime};
use hitfeed_core::{Origin, SystemEnv, endpoint::DEFAULT_ORIGIN};
use hitfeed_tui::{TerminalDriver, logging, report};

/// hitfeed terminal client
#[derive(Parser, Debug)]
#[command(name = "hitfeed")]
#[command(about = "Live hit counter activity feed and badge generator")]
#[command(version)]
struct Args {
    /// Origin of the hit counter service
    #[arg(short, long, default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Initial badge username
    #[arg(short, long)]
    username: Option<String>,

    /// Initial badge repository
    #[arg(short, long)]
    repository: Option<String>,

    /// Append logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the badge snippets and exit
    #[arg(long)]
    print_badge: bool,
}

impl Args {
    /// Badge inputs given on the command line.
    fn badge_inputs(&self) -> impl Iterator<Item = (BadgeField, &str)> {
        [(BadgeField::Username, &self.username), (BadgeField::Repository, &self.repository)]
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let origin = Origin::parse(&args.origin)?;

    if let Some(ref path) = args.log_file {
        logging::init(path, &args.log_level)?;
    }

    if args.print_badge {
        let mut badge = BadgeGenerator::new(&origin);
        for (field, value) in args.badge_inputs() {
            badge.on_input_change(field, value);
        }
        writeln!(std::io::stdout().lock(), "{}", report::badge_report(&badge))?;
        return Ok(());
    }

    tracing::info!(%origin, "hitfeed starting");

    let driver = TerminalDriver::new()?;
    let mut runtime = Runtime::new(driver, SystemEnv::new(), origin);
    for (field, value) in args.badge_inputs() {
        runtime.app_mut().apply_badge_input(field, value);
    }

    runtime.run().await?;

    tracing::info!("hitfeed stopped");
    Ok(())
}
