//! Interactive command interface.
//!
//! Parses one line of user input into a [`Command`] and executes it
//! against a [`Session`], which owns the engine and the most recent
//! report. The binary wraps this in a prompt loop.
//!
//! # Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `add <arrival> <burst>` | Register a process |
//! | `run fcfs` | First-Come-First-Served |
//! | `run rr <quantum>` | Round-Robin |
//! | `list` | Show registered processes |
//! | `reset` | Clear processes, identifiers restart at 1 |
//! | `gen <count> <seed>` | Register a random workload |
//! | `idle <jump\|tick>` | Idle advancement mode |
//! | `json` | Last report as JSON |
//! | `help` | Command summary |
//! | `quit` | Exit |

use thiserror::Error;
use tracing::debug;

use crate::config::IdleAdvance;
use crate::error::SimulationError;
use crate::render;
use crate::scheduler::{SchedulingEngine, SimulationReport};
use crate::validation::ValidationError;
use crate::workload::{WorkloadGenerator, MAX_GENERATED};

/// Help text printed by `help` and at startup.
pub const HELP: &str = "\
--- Commands ---
  add <arrival_time> <burst_time> - Add a new process (e.g., add 0 10)
  run fcfs                        - Run simulation using First-Come, First-Served
  run rr <quantum>                - Run simulation using Round Robin (e.g., run rr 2)
  list                            - List all added processes
  reset                           - Clear all processes
  gen <count> <seed>              - Add a random workload (count 1..=10000)
  idle <jump|tick>                - Set idle advancement mode
  json                            - Print the last report as JSON
  help                            - Show this help
  quit                            - Exit the simulator
------------------";

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a process.
    Add {
        /// Arrival tick.
        arrival: i64,
        /// Burst length.
        burst: i64,
    },
    /// Run FCFS.
    RunFcfs,
    /// Run Round-Robin.
    RunRoundRobin {
        /// Time quantum.
        quantum: i64,
    },
    /// List processes.
    List,
    /// Clear all processes.
    Reset,
    /// Register a random workload.
    Generate {
        /// Number of processes.
        count: usize,
        /// RNG seed.
        seed: u64,
    },
    /// Change idle advancement.
    Idle(IdleAdvance),
    /// Print the last report as JSON.
    Json,
    /// Print help.
    Help,
    /// Exit.
    Quit,
    /// Blank line.
    Empty,
}

/// Command-level errors. None of them end the session.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Unrecognised command word.
    #[error("Unknown command '{0}'. Type 'help' for commands.")]
    Unknown(String),

    /// Wrong number or shape of arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// Argument that should be an integer.
    #[error("Invalid input '{0}': expected an integer.")]
    NotAnInteger(String),

    /// Rejected by validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Engine failure.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// `json` before any run.
    #[error("No simulation has been run yet.")]
    NoReport,

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

const GEN_USAGE: &str = "gen <count 1..=10000> <seed>";

fn int<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::NotAnInteger(word.to_string()))
}

impl Command {
    /// Parses one input line (case-insensitive).
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let lowered = line.trim().to_lowercase();
        let parts: Vec<&str> = lowered.split_whitespace().collect();

        let Some((&head, args)) = parts.split_first() else {
            return Ok(Command::Empty);
        };

        match (head, args) {
            ("add", [arrival, burst]) => Ok(Command::Add {
                arrival: int(arrival)?,
                burst: int(burst)?,
            }),
            ("add", _) => Err(CommandError::Usage("add <arrival_time> <burst_time>")),
            ("run", ["fcfs"]) => Ok(Command::RunFcfs),
            ("run", ["fcfs", ..]) => Err(CommandError::Usage("run fcfs")),
            ("run", ["rr", quantum]) => Ok(Command::RunRoundRobin {
                quantum: int(quantum)?,
            }),
            ("run", ["rr", ..]) => Err(CommandError::Usage("run rr <quantum>")),
            ("run", _) => Err(CommandError::Usage("run <fcfs|rr> [quantum_for_rr]")),
            ("list", []) => Ok(Command::List),
            ("reset", []) => Ok(Command::Reset),
            ("gen", [count, seed]) => {
                let count: usize = int(count)?;
                if !(1..=MAX_GENERATED).contains(&count) {
                    return Err(CommandError::Usage(GEN_USAGE));
                }
                Ok(Command::Generate {
                    count,
                    seed: int(seed)?,
                })
            }
            ("gen", _) => Err(CommandError::Usage(GEN_USAGE)),
            ("idle", ["jump"]) => Ok(Command::Idle(IdleAdvance::Jump)),
            ("idle", ["tick"]) => Ok(Command::Idle(IdleAdvance::Tick)),
            ("idle", _) => Err(CommandError::Usage("idle <jump|tick>")),
            ("json", []) => Ok(Command::Json),
            ("help", _) => Ok(Command::Help),
            ("quit" | "exit", _) => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print; keep going.
    Continue(String),
    /// Exit the loop after printing.
    Quit(String),
}

/// Interactive session state.
#[derive(Debug, Default)]
pub struct Session {
    engine: SchedulingEngine,
    last_report: Option<SimulationReport>,
}

impl Session {
    /// Creates a session with a default engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session around an existing engine.
    pub fn with_engine(engine: SchedulingEngine) -> Self {
        Self {
            engine,
            last_report: None,
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &SchedulingEngine {
        &self.engine
    }

    /// The most recent report, if any run has completed.
    pub fn last_report(&self) -> Option<&SimulationReport> {
        self.last_report.as_ref()
    }

    /// Parses and executes one line; errors become printable text.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line).and_then(|cmd| self.execute(cmd)) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(error = %err, "command failed");
                Outcome::Continue(err.to_string())
            }
        }
    }

    /// Executes a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        let text = match command {
            Command::Add { arrival, burst } => {
                let pid = self.engine.register(arrival, burst)?;
                format!("Added {pid}(Arr={arrival}, Burst={burst})")
            }
            Command::RunFcfs => {
                let report = self.engine.run_fcfs()?;
                self.record(report)
            }
            Command::RunRoundRobin { quantum } => {
                let report = self.engine.run_round_robin(quantum)?;
                self.record(report)
            }
            Command::List => render::process_list(&self.engine.list_processes()),
            Command::Reset => {
                self.engine.reset_all();
                self.last_report = None;
                "All processes cleared. Scheduler reset.".to_string()
            }
            Command::Generate { count, seed } => {
                let batch = WorkloadGenerator::new(seed).generate(count);
                let ids = self.engine.register_all(&batch)?;
                format!("Added {} random processes (seed {seed}).", ids.len())
            }
            Command::Idle(mode) => {
                let config = self.engine.config().clone().with_idle_advance(mode);
                self.engine.set_config(config);
                format!("Idle advancement set to {mode:?}.")
            }
            Command::Json => {
                let report = self.last_report.as_ref().ok_or(CommandError::NoReport)?;
                serde_json::to_string_pretty(report)?
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit("Exiting simulator. Goodbye!".to_string())),
            Command::Empty => String::new(),
        };
        Ok(Outcome::Continue(text))
    }

    fn record(&mut self, report: SimulationReport) -> String {
        let text = render::report(&report);
        self.last_report = Some(report);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(outcome: Outcome) -> String {
        match outcome {
            Outcome::Continue(t) | Outcome::Quit(t) => t,
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("ADD 0 10").unwrap(),
            Command::Add {
                arrival: 0,
                burst: 10
            }
        );
        assert_eq!(Command::parse("run fcfs").unwrap(), Command::RunFcfs);
        assert_eq!(
            Command::parse("  run RR 2 ").unwrap(),
            Command::RunRoundRobin { quantum: 2 }
        );
        assert_eq!(Command::parse("").unwrap(), Command::Empty);
        assert_eq!(
            Command::parse("idle tick").unwrap(),
            Command::Idle(IdleAdvance::Tick)
        );
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("add 1").unwrap_err(),
            CommandError::Usage(_)
        ));
        assert!(matches!(
            Command::parse("add x 2").unwrap_err(),
            CommandError::NotAnInteger(_)
        ));
        assert!(matches!(
            Command::parse("run sjf").unwrap_err(),
            CommandError::Usage(_)
        ));
        assert!(matches!(
            Command::parse("frobnicate").unwrap_err(),
            CommandError::Unknown(_)
        ));
    }

    #[test]
    fn test_session_flow() {
        let mut session = Session::new();
        assert_eq!(
            text(session.handle_line("add 0 5")),
            "Added P1(Arr=0, Burst=5)"
        );
        session.handle_line("add 1 3");
        let out = text(session.handle_line("run rr 2"));
        assert!(out.contains("Total Simulation Time: 8 units"));
        assert!(out.contains("| P1 (2u) | P2 (2u) | P1 (2u) | P2 (1u) | P1 (1u) |"));
        assert_eq!(session.last_report().unwrap().total_ticks, 8);
    }

    #[test]
    fn test_validation_message() {
        let mut session = Session::new();
        let out = text(session.handle_line("add -1 5"));
        assert!(out.contains("cannot be negative"));
        let out = text(session.handle_line("run rr 0"));
        assert!(out.contains("positive integer"));
        assert!(session.engine().is_empty());
    }

    #[test]
    fn test_rejected_input_keeps_session_open() {
        let mut session = Session::new();
        assert_eq!(
            session.handle_line("frobnicate"),
            Outcome::Continue(
                "Unknown command 'frobnicate'. Type 'help' for commands.".to_string()
            )
        );
        assert_eq!(
            text(session.handle_line("add 0 1")),
            "Added P1(Arr=0, Burst=1)"
        );
    }

    #[test]
    fn test_json_requires_report() {
        let mut session = Session::new();
        assert!(text(session.handle_line("json")).contains("No simulation"));
        session.handle_line("add 0 2");
        session.handle_line("run fcfs");
        let json = text(session.handle_line("json"));
        let parsed: SimulationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_ticks, 2);
    }

    #[test]
    fn test_reset_restarts_ids() {
        let mut session = Session::new();
        session.handle_line("add 0 5");
        session.handle_line("reset");
        assert_eq!(
            text(session.handle_line("add 2 2")),
            "Added P1(Arr=2, Burst=2)"
        );
    }

    #[test]
    fn test_gen_rejects_oversized_count() {
        assert!(matches!(
            Command::parse("gen 18446744073709551615 1").unwrap_err(),
            CommandError::Usage(_)
        ));
        assert!(matches!(
            Command::parse("gen 0 1").unwrap_err(),
            CommandError::Usage(_)
        ));
        assert_eq!(
            Command::parse("gen 10000 1").unwrap(),
            Command::Generate {
                count: MAX_GENERATED,
                seed: 1
            }
        );

        let mut session = Session::new();
        let out = text(session.handle_line("gen 18446744073709551615 1"));
        assert!(out.starts_with("Usage: gen"));
        assert!(session.engine().is_empty());
    }

    #[test]
    fn test_gen_and_quit() {
        let mut session = Session::new();
        session.handle_line("gen 4 9");
        assert_eq!(session.engine().len(), 4);
        assert!(matches!(session.handle_line("quit"), Outcome::Quit(_)));
    }
}
