//! Terminal block-stacking game (default binary).
//!
//! Keys arrive on a blocking reader thread and are forwarded over a channel
//! to the single-threaded run loop, which owns the session and the gravity
//! timer.

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tui_blockfall::core::{BoardConfig, GameState};
use tui_blockfall::engine::{run, EventLog, GameLoop, LoopConfig, LoopEvent};
use tui_blockfall::input::{map_key, should_quit};
use tui_blockfall::term::TerminalRenderer;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Board width in cells (overrides BLOCKFALL_WIDTH).
    #[arg(long)]
    width: Option<usize>,
    /// Board height in cells (overrides BLOCKFALL_HEIGHT).
    #[arg(long)]
    height: Option<usize>,
    /// Piece sequence seed, as a 64-bit integer (overrides BLOCKFALL_SEED).
    /// The same seed replays the same pieces.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Append a JSON-lines event log to this file (overrides BLOCKFALL_LOG_PATH).
    #[arg(long)]
    log_path: Option<String>,
}

impl Args {
    fn apply(self, mut config: LoopConfig) -> LoopConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.log_path.is_some() {
            config.log_path = self.log_path;
        }
        config
    }
}

fn main() -> Result<()> {
    let config = Args::parse().apply(LoopConfig::from_env()?);
    // Bad settings are reported before the terminal is touched.
    let board = config.board_config()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (log, writer) = runtime.block_on(open_log(&config))?;

    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ =
            crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::style::ResetColor);
        let _ = crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::cursor::Show);
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stderr(),
            crossterm::terminal::LeaveAlternateScreen,
        );
        eprint!("{panic_info}\n\n");
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = runtime.block_on(play(&config, board, log, writer, &mut term));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

async fn open_log(config: &LoopConfig) -> Result<(EventLog, Option<JoinHandle<()>>)> {
    match &config.log_path {
        Some(path) => {
            let (log, writer) = EventLog::to_file(path).await?;
            Ok((log, Some(writer)))
        }
        None => Ok((EventLog::disabled(), None)),
    }
}

async fn play(
    config: &LoopConfig,
    board: BoardConfig,
    log: EventLog,
    writer: Option<JoinHandle<()>>,
    term: &mut TerminalRenderer,
) -> Result<()> {
    let state = GameState::new(board, config.piece_source());
    let mut game = GameLoop::new(state).with_log(log);

    let (tx, mut rx) = mpsc::channel(64);
    std::thread::spawn(move || forward_keys(tx));

    run(&mut game, &mut rx, term, map_key).await?;

    // Dropping the loop closes the log channel so the writer can drain.
    drop(game);
    if let Some(writer) = writer {
        let _ = writer.await;
    }
    Ok(())
}

fn forward_keys(tx: mpsc::Sender<LoopEvent<KeyEvent>>) {
    loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(_) => {
                let _ = tx.blocking_send(LoopEvent::Quit);
                return;
            }
        };

        let Event::Key(key) = event else {
            continue;
        };

        if should_quit(key) {
            let _ = tx.blocking_send(LoopEvent::Quit);
            return;
        }
        if tx.blocking_send(LoopEvent::Input(key)).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_environment() {
        let env = LoopConfig {
            width: 12,
            height: 22,
            seed: Some(1),
            log_path: Some("env.jsonl".to_string()),
        };
        let args = Args::parse_from(["tui-blockfall", "--width", "8", "--seed", "99"]);

        let config = args.apply(env);
        assert_eq!(config.width, 8);
        assert_eq!(config.height, 22);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.log_path.as_deref(), Some("env.jsonl"));
    }
}
