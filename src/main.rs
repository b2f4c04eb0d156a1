//! Interactive CPU scheduling simulator.
//!
//! Environment variables:
//! - RUST_LOG: log filter (default: warn). Logs go to stderr.

use std::io::{self, BufRead, Write};

use cpu_sched_sim::cli::{Outcome, Session, HELP};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> io::Result<()> {
    init_tracing();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new();

    writeln!(stdout, "--- OS CPU Scheduling Simulator ---")?;
    writeln!(stdout, "Welcome! Add processes and run simulations.\n")?;
    writeln!(stdout, "{HELP}\n")?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "Scheduler > ")?;
        stdout.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match session.handle_line(&line) {
            Outcome::Continue(text) => {
                if !text.is_empty() {
                    writeln!(stdout, "{text}")?;
                }
            }
            Outcome::Quit(text) => {
                writeln!(stdout, "{text}")?;
                break;
            }
        }
    }

    info!("session ended");
    Ok(())
}
