//! The single event loop that owns the practice session

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::{
    engine::{Fired, TokioScheduler},
    state::{Action, ActionOutcome, Session, Snapshot},
};

/// Capacity of the action queue between the API and the loop
const COMMAND_BUFFER: usize = 32;

/// Request sent from the API to the loop
#[derive(Debug)]
pub struct Command {
    pub action: Action,
    pub reply: oneshot::Sender<(ActionOutcome, Snapshot)>,
}

/// Ends of the channels the API talks to
#[derive(Debug)]
pub struct LoopChannels {
    pub commands: mpsc::Sender<Command>,
    pub snapshots: watch::Receiver<Snapshot>,
}

/// Spawn the event loop on the current runtime
pub fn spawn_event_loop(session: Session) -> LoopChannels {
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
    let (fired_tx, fired_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

    let scheduler = TokioScheduler::new(fired_tx);
    tokio::spawn(event_loop_task(
        session,
        scheduler,
        commands_rx,
        fired_rx,
        snapshot_tx,
    ));

    LoopChannels {
        commands: commands_tx,
        snapshots: snapshot_rx,
    }
}

/// Process actions and due callbacks one at a time until every sender is gone
pub async fn event_loop_task(
    mut session: Session,
    mut scheduler: TokioScheduler,
    mut commands: mpsc::Receiver<Command>,
    mut fired: mpsc::UnboundedReceiver<Fired>,
    snapshots: watch::Sender<Snapshot>,
) {
    info!("Starting event loop");

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(Command { action, reply }) = command else {
                    break;
                };
                debug!("Event loop received action: {:?}", action);

                let outcome = session.apply(action, &mut scheduler);
                let snapshot = session.snapshot();
                snapshots.send_replace(snapshot.clone());

                // The caller may have given up waiting
                let _ = reply.send((outcome, snapshot));
            }

            Some(due) = fired.recv() => {
                if !scheduler.claim(&due) {
                    debug!("Dropping cancelled callback {}", due.id.raw());
                    continue;
                }
                session.on_fired(due, &mut scheduler);
                snapshots.send_replace(session.snapshot());
            }
        }
    }

    info!("Event loop stopped");
}
