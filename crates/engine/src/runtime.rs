//! Async run loop.
//!
//! A single task waits on whichever comes first: the next gravity deadline
//! or the next input event. Ticks and commands therefore never overlap, and
//! each handled event is followed by one render.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tui_blockfall_core::rng::PieceSource;
use tui_blockfall_core::GameSnapshot;

use crate::controller::GameLoop;
use crate::types::{GameCommand, ParticleBurst};

/// Draws a frame. Bursts are the cosmetic events produced since the last frame.
pub trait Renderer {
    fn render(&mut self, snapshot: &GameSnapshot, bursts: &[ParticleBurst]) -> anyhow::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, snapshot: &GameSnapshot, bursts: &[ParticleBurst]) -> anyhow::Result<()> {
        (**self).render(snapshot, bursts)
    }
}

/// Events fed to the run loop by the input side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent<K> {
    Input(K),
    Quit,
}

/// Drive `game` until a `Quit` event arrives or the sender side is dropped.
///
/// `map` turns a raw input into a command; it is told whether the game is
/// over so the same key can mean different things.
pub async fn run<S, K, R, M>(
    game: &mut GameLoop<S, Instant>,
    events: &mut mpsc::Receiver<LoopEvent<K>>,
    renderer: &mut R,
    mut map: M,
) -> anyhow::Result<()>
where
    S: PieceSource,
    R: Renderer + ?Sized,
    M: FnMut(K, bool) -> Option<GameCommand>,
{
    let mut snapshot = GameSnapshot::default();

    if !game.started() {
        game.start(Instant::now());
    }
    draw(game, renderer, &mut snapshot)?;

    loop {
        let deadline = game.next_deadline();

        tokio::select! {
            _ = wait_for(deadline) => {
                game.on_timer(Instant::now());
            }
            event = events.recv() => match event {
                Some(LoopEvent::Input(key)) => {
                    let game_over = game.state().game_over();
                    if let Some(command) = map(key, game_over) {
                        game.on_command(command, Instant::now());
                    }
                }
                Some(LoopEvent::Quit) | None => break,
            },
        }

        draw(game, renderer, &mut snapshot)?;
    }

    Ok(())
}

fn draw<S, R>(
    game: &mut GameLoop<S, Instant>,
    renderer: &mut R,
    snapshot: &mut GameSnapshot,
) -> anyhow::Result<()>
where
    S: PieceSource,
    R: Renderer + ?Sized,
{
    game.snapshot_into(snapshot);
    let bursts = game.take_particle_bursts();
    renderer.render(snapshot, &bursts)
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
