//! DICE: Over/Under dice betting game
//!
//! Entry point. Loads configuration, initialises structured logging,
//! optionally starts the dashboard, and runs the interactive shell with
//! graceful shutdown.

use anyhow::Result;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Sleep;
use tracing::{info, warn};

use dice::config;
use dice::dashboard::{self, DashboardState};
use dice::engine::source_from_seed;
use dice::feedback::Feedback;
use dice::session::{PendingRoll, Session};
use dice::shell::{Command, Shell, Step};

const BANNER: &str = r#"
 ____ ___ ____ _____
|  _ \_ _/ ___| ____|
| | | | | |   |  _|
| |_| | | |___| |___
|____/___\____|_____|

  Over / Under, 1% house edge
  v0.1.0, type `help` for commands
"#;

/// A roll waiting for its reveal timer.
type Reveal = (PendingRoll, Pin<Box<Sleep>>);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = config::AppConfig::load_or_default("config.toml")?;

    init_logging();

    println!("{BANNER}");
    info!(
        bet = cfg.session.default_bet,
        target = cfg.session.default_target,
        direction = %cfg.session.default_direction,
        seeded = cfg.rng.seed.is_some(),
        "DICE starting up"
    );

    // -- Initialise components -------------------------------------------

    let session = Session::with_slip(cfg.session.slip());
    let feedback = Feedback::new(cfg.shell.start_muted);
    let rng = source_from_seed(cfg.rng.seed);
    let mut shell = Shell::new(session, feedback, rng);

    let dashboard_state = if cfg.dashboard.enabled {
        let state = Arc::new(DashboardState::new(shell.session().snapshot()));
        dashboard::spawn_dashboard(state.clone(), cfg.dashboard.port).await?;
        Some(state)
    } else {
        None
    };

    println!("{}", shell.session());

    // -- Main loop -------------------------------------------------------

    let reveal_delay = Duration::from_millis(cfg.shell.reveal_delay_ms);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut reveal: Option<Reveal> = None;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed.");
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };

                match shell.execute(command) {
                    Step::Output(output) => println!("{output}"),
                    Step::Rolling { pending, output } => {
                        println!("{output}");
                        reveal = Some((pending, Box::pin(tokio::time::sleep(reveal_delay))));
                    }
                    Step::Quit => break,
                }
                publish(&dashboard_state, &shell).await;
            }
            pending = wait_reveal(&mut reveal) => {
                println!("{}", shell.finish_roll(pending));
                publish(&dashboard_state, &shell).await;
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    if let Some((pending, _)) = reveal.take() {
        warn!(bet = pending.request().bet_amount, "Settling in-flight roll before exit");
        println!("{}", shell.finish_roll(pending));
    }

    let stats = shell.session().history().stats();
    info!(
        balance = shell.session().balance(),
        rounds = stats.rounds,
        profit = stats.total_profit,
        "DICE shut down cleanly."
    );

    Ok(())
}

/// Resolve once the pending roll's timer fires. Never resolves when no
/// roll is in flight.
async fn wait_reveal(reveal: &mut Option<Reveal>) -> PendingRoll {
    match reveal.as_mut() {
        Some((_, sleep)) => sleep.as_mut().await,
        None => std::future::pending::<()>().await,
    }
    match reveal.take() {
        Some((pending, _)) => pending,
        None => std::future::pending().await,
    }
}

/// Push the current session state to the dashboard, if one is running.
async fn publish(state: &Option<Arc<DashboardState>>, shell: &Shell) {
    if let Some(state) = state {
        state.publish(shell.session().snapshot()).await;
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dice=info"));

    let json_logging = std::env::var("DICE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
