//! Nebula Field CLI - binary entry point and terminal session management.
//!
//! With no arguments the dashboard runs full-screen. `nebula score <wallet>
//! [narrative...]` prints the scorer output as JSON and exits.
//!
//! # Event Loop
//!
//! The dashboard renders on a fixed cadence (8ms by default):
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`nebula_tui::InputPump`])
//! 3. Run queued wallet work (`app.process_wallet_requests().await`)
//! 4. Apply fired emission stages and advance animations (`app.tick()`)
//! 5. Render frame

use anyhow::{Result, bail};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    env,
    fs::{self, OpenOptions},
    io::{Stdout, Write, stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use nebula_core::compute_intent;
use nebula_engine::{App, NebulaConfig, WalletConnector};
use nebula_tui::{InputPump, draw, handle_events};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_nebula_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than draw over the dashboard.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_nebula_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in nebula_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn nebula_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.nebula/logs/nebula.log
    if let Some(config_path) = NebulaConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("nebula.log"));
    }

    candidates.push(PathBuf::from(".nebula").join("logs").join("nebula.log"));

    candidates
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Dashboard,
    Score { wallet: String, narrative: String },
}

fn parse_command(args: &[String]) -> Result<Command> {
    match args.split_first() {
        None => Ok(Command::Dashboard),
        Some((sub, rest)) if sub == "score" => {
            let Some((wallet, narrative)) = rest.split_first() else {
                bail!("usage: nebula score <wallet> [narrative...]");
            };
            Ok(Command::Score {
                wallet: wallet.clone(),
                narrative: narrative.join(" "),
            })
        }
        Some((other, _)) => bail!("unknown command: {other}\nusage: nebula [score <wallet> [narrative...]]"),
    }
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Enables raw mode, bracketed paste and the alternate screen; all three are
/// restored on drop, including after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnableBracketedPaste, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen, DisableBracketedPaste);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = parse_command(&args)?;

    init_tracing();

    match command {
        Command::Score { wallet, narrative } => {
            let result = compute_intent(&wallet, &narrative);
            let mut out = stdout();
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
            Ok(())
        }
        Command::Dashboard => {
            let config = NebulaConfig::load();
            let frame_duration = config
                .as_ref()
                .map_or(Duration::from_millis(8), NebulaConfig::frame_duration);
            let mut app = App::new(config.as_ref());

            let result = {
                let mut session = TerminalSession::new()?;
                run_app(&mut session.terminal, &mut app, frame_duration).await
            };
            if let Err(err) = &result {
                tracing::error!("Dashboard exited with error: {err:?}");
            }
            result
        }
    }
}

async fn run_app<B, W>(
    terminal: &mut Terminal<B>,
    app: &mut App<W>,
    frame_duration: Duration,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    W: WalletConnector,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(frame_duration);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(app, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        app.process_wallet_requests().await;
        app.tick();

        if let Err(e) = terminal.draw(|frame| draw(frame, app)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
