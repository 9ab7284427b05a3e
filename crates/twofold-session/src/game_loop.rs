//! Game loop thread: owns one `Session` and serializes every command into it.
//!
//! The session is moved into the thread, so no other code can touch its
//! engine. Commands arrive via `mpsc` channel. Each processed command
//! publishes a snapshot on the snapshot channel and in shared state for
//! synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use log::debug;

use twofold_core::commands::PlayerCommand;
use twofold_core::state::GameStateSnapshot;

use crate::session::Session;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the session.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Caller side of a running game loop.
pub struct GameLoopHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    snapshot_rx: mpsc::Receiver<GameStateSnapshot>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    thread: Option<JoinHandle<()>>,
}

impl GameLoopHandle {
    /// Forward a player command to the loop.
    pub fn send(&self, command: PlayerCommand) -> Result<(), mpsc::SendError<GameLoopCommand>> {
        self.command_tx.send(GameLoopCommand::Player(command))
    }

    /// Block until the next snapshot. `None` once the loop has exited.
    pub fn next_snapshot(&self) -> Option<GameStateSnapshot> {
        self.snapshot_rx.recv().ok()
    }

    /// Latest published snapshot, without waiting.
    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for GameLoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns the game loop in a new thread, taking ownership of `session`.
///
/// The session's current state is published as the first snapshot.
pub fn spawn_game_loop(session: Session) -> io::Result<GameLoopHandle> {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let (snapshot_tx, snapshot_rx) = mpsc::channel::<GameStateSnapshot>();
    let latest_snapshot = Arc::new(Mutex::new(None));

    let shared = Arc::clone(&latest_snapshot);
    let thread = std::thread::Builder::new()
        .name("twofold-game-loop".into())
        .spawn(move || {
            run_game_loop(session, command_rx, snapshot_tx, &shared);
        })?;

    Ok(GameLoopHandle {
        command_tx,
        snapshot_rx,
        latest_snapshot,
        thread: Some(thread),
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut session: Session,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    snapshot_tx: mpsc::Sender<GameStateSnapshot>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    publish(session.snapshot(), &snapshot_tx, latest_snapshot);

    while let Ok(command) = command_rx.recv() {
        match command {
            GameLoopCommand::Player(cmd) => {
                debug!("processing {cmd:?}");
                let snapshot = session.apply(cmd);
                publish(snapshot, &snapshot_tx, latest_snapshot);
            }
            GameLoopCommand::Shutdown => break,
        }
    }
}

fn publish(
    snapshot: GameStateSnapshot,
    snapshot_tx: &mpsc::Sender<GameStateSnapshot>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(snapshot.clone());
    }
    // The caller may have stopped listening; polling still works.
    let _ = snapshot_tx.send(snapshot);
}
