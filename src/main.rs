use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use hoyolab_daily_bot::checkin::{CheckInRunner, LoopOutcome, TokioDelay};
use hoyolab_daily_bot::client::CheckInClient;
use hoyolab_daily_bot::config::AppConfig;
use hoyolab_daily_bot::schedule::{self, PowershellTaskScheduler};
use hoyolab_daily_bot::session::{CookieFile, CookieSource, SessionCredential};
use hoyolab_daily_bot::update;

#[derive(Parser)]
#[command(name = "hoyolab-daily-bot", about = "Hoyolab Daily Check-In Bot")]
struct Cli {
    /// Show program version
    #[arg(short = 'v', long)]
    version: bool,

    /// Run without re-registering the scheduled task (what the registered
    /// task invokes)
    #[arg(short = 'R', long)]
    runascron: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("Bot ver. {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let _guard = hoyolab_daily_bot::init_logging();

    let config = AppConfig::load();
    let credential = load_credential(&config);

    // The scheduled task passes -R to skip re-registration; jittered
    // installs re-plan on every run regardless so the trigger keeps moving.
    if !cli.runascron || config.randomize_enabled {
        info!("Registering scheduled task...");
        if let Err(e) = schedule::install(&config, &PowershellTaskScheduler) {
            error!("Task registration failed: {}", e);
            error!("Please run as administrator to enable task scheduling");
            std::process::exit(1);
        }
    }

    let client = match CheckInClient::new(&config, &credential) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build check-in client: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = CheckInRunner::new(client, TokioDelay).run().await;
    match outcome {
        LoopOutcome::AlreadyClaimed => info!("Reward has been claimed!"),
        LoopOutcome::Claimed { message } => info!("Claiming completed! message: {}", message),
    }

    if update::notify_if_newer().await {
        // Leave the notice on screen for interactive runs
        tokio::time::sleep(Duration::from_secs(60)).await;
    }

    tokio::time::sleep(Duration::from_secs(2)).await;
}

/// Load the session credential or exit with remediation instructions.
fn load_credential(config: &AppConfig) -> SessionCredential {
    let source = match CookieFile::default_path() {
        Some(path) => CookieFile::new(path),
        None => {
            error!("No config directory available for the cookie export");
            std::process::exit(1);
        }
    };

    match source.load(&config.cookie_domain, config.browser_selector) {
        Ok(credential) => credential,
        Err(e) => {
            error!("Cookies not found: {}", e);
            error!(
                "Please log in to https://www.hoyolab.com/ once in Chrome/Firefox/Opera/Edge/Chromium, \
                 then export the cookies to {:?}",
                source.path()
            );
            info!("You only need to log in once a year for the bot to work.");
            std::process::exit(1);
        }
    }
}
