//! Floor actor: an isolated Tokio task that owns the dancer registry.
//!
//! Every operation on the floor is a command sent over one channel and
//! handled one at a time by the actor. No lock is needed: a join-time
//! replay, a registry insert/remove, and a "record last move + fan out"
//! each happen inside a single command, so nobody can observe them
//! half-done.

use std::collections::BTreeMap;

use dancefloor_protocol::{DancerId, Frame, Message};
use tokio::sync::{mpsc, oneshot};

use crate::{DancerState, FloorConfig, FloorError, FloorSnapshot};

/// Channel sender for delivering frames to one dancer's connection.
///
/// Unbounded: a slow peer must never stall the floor (and with it every
/// other dancer). A stalled peer's queue grows until its transport gives
/// up and the dancer leaves; the floor itself imposes no limit. Frames to
/// a closed receiver are dropped.
pub type DancerSender = mpsc::UnboundedSender<Frame>;

/// Commands sent to the floor actor through its channel.
enum FloorCommand {
    /// Register a dancer and replay the floor to it.
    Join {
        dancer: DancerId,
        sender: DancerSender,
        reply: oneshot::Sender<Result<(), FloorError>>,
    },

    /// Fan a message out to everyone but its sender.
    Publish { dancer: DancerId, message: Message },

    /// Unregister a dancer and announce its departure.
    Leave {
        dancer: DancerId,
        reply: oneshot::Sender<Result<(), FloorError>>,
    },

    /// Read the registry.
    Snapshot { reply: oneshot::Sender<FloorSnapshot> },

    /// Stop the actor.
    Shutdown,
}

/// Handle to the running floor actor.
///
/// Cheap to clone: it's just an `mpsc::Sender` wrapper. Every connection
/// task holds one.
#[derive(Clone)]
pub struct FloorHandle {
    sender: mpsc::Sender<FloorCommand>,
}

impl FloorHandle {
    /// Registers `dancer` on the floor with `sender` as its delivery sink.
    ///
    /// In one step the floor announces `join` to every other dancer, sends
    /// the newcomer its own `<id>:join` followed by each peer's last move
    /// and mood (directly, not as a broadcast), and adds the newcomer to
    /// the fan-out set.
    ///
    /// # Errors
    /// - [`FloorError::AlreadyJoined`] if the id is already registered
    /// - [`FloorError::Unavailable`] if the floor has stopped
    pub async fn join(
        &self,
        dancer: DancerId,
        sender: DancerSender,
    ) -> Result<(), FloorError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(FloorCommand::Join {
            dancer,
            sender,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(|_| FloorError::Unavailable)?
    }

    /// Publishes `message` from `dancer` to every other registered dancer.
    ///
    /// `move` and `mood` also become the dancer's last-known state, in the
    /// same step as the fan-out. Fire-and-forget: returns once the command
    /// is queued.
    ///
    /// # Errors
    /// [`FloorError::Unavailable`] if the floor has stopped.
    pub async fn publish(
        &self,
        dancer: DancerId,
        message: Message,
    ) -> Result<(), FloorError> {
        self.send(FloorCommand::Publish { dancer, message }).await
    }

    /// Removes `dancer` from the floor and tells everyone else it left.
    ///
    /// Once this returns the dancer receives no further frames.
    ///
    /// # Errors
    /// - [`FloorError::NotJoined`] if the id is not registered
    /// - [`FloorError::Unavailable`] if the floor has stopped
    pub async fn leave(&self, dancer: DancerId) -> Result<(), FloorError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(FloorCommand::Leave {
            dancer,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(|_| FloorError::Unavailable)?
    }

    /// Returns every registered dancer with its last-known state.
    pub async fn snapshot(&self) -> Result<FloorSnapshot, FloorError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(FloorCommand::Snapshot { reply: reply_tx }).await?;
        reply_rx.await.map_err(|_| FloorError::Unavailable)
    }

    /// Tells the floor to stop. Pending commands queued before this one are
    /// still handled.
    pub async fn shutdown(&self) -> Result<(), FloorError> {
        self.send(FloorCommand::Shutdown).await
    }

    async fn send(&self, cmd: FloorCommand) -> Result<(), FloorError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| FloorError::Unavailable)
    }
}

/// One registry entry: where to deliver, and what the dancer last did.
struct Seat {
    sender: DancerSender,
    state: DancerState,
}

/// The internal actor state. Runs inside a Tokio task.
struct FloorActor {
    /// Registered dancers. Ordered so replay order is deterministic.
    seats: BTreeMap<DancerId, Seat>,
    receiver: mpsc::Receiver<FloorCommand>,
}

impl FloorActor {
    /// Runs the actor loop, processing commands until shutdown or until
    /// every handle is dropped.
    async fn run(mut self) {
        tracing::info!("dance floor open");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                FloorCommand::Join {
                    dancer,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(dancer, sender);
                    let _ = reply.send(result);
                }
                FloorCommand::Publish { dancer, message } => {
                    self.handle_publish(dancer, message);
                }
                FloorCommand::Leave { dancer, reply } => {
                    let result = self.handle_leave(dancer);
                    let _ = reply.send(result);
                }
                FloorCommand::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot());
                }
                FloorCommand::Shutdown => {
                    tracing::info!(
                        dancers = self.seats.len(),
                        "dance floor shutting down"
                    );
                    break;
                }
            }
        }

        tracing::info!("dance floor closed");
    }

    fn handle_join(
        &mut self,
        dancer: DancerId,
        sender: DancerSender,
    ) -> Result<(), FloorError> {
        if self.seats.contains_key(&dancer) {
            return Err(FloorError::AlreadyJoined(dancer));
        }

        self.broadcast(dancer, Message::Join);

        // The newcomer's own `join` comes first: it is how a client
        // learns its id. Then replay the floor straight to it.
        let _ = sender.send(Frame::new(dancer, Message::Join));
        for (peer, seat) in &self.seats {
            let _ = sender.send(Frame::new(*peer, seat.state.move_message()));
            let _ = sender.send(Frame::new(*peer, seat.state.mood_message()));
        }

        self.seats.insert(
            dancer,
            Seat {
                sender,
                state: DancerState::default(),
            },
        );
        tracing::info!(%dancer, dancers = self.seats.len(), "dancer joined");
        Ok(())
    }

    fn handle_publish(&mut self, dancer: DancerId, message: Message) {
        let Some(seat) = self.seats.get_mut(&dancer) else {
            tracing::warn!(%dancer, "message from dancer not on the floor, ignoring");
            return;
        };

        seat.state.record(&message);
        tracing::trace!(%dancer, command = %message.command(), "publish");
        self.broadcast(dancer, message);
    }

    fn handle_leave(&mut self, dancer: DancerId) -> Result<(), FloorError> {
        if self.seats.remove(&dancer).is_none() {
            return Err(FloorError::NotJoined(dancer));
        }

        self.broadcast(dancer, Message::Leave);
        tracing::info!(%dancer, dancers = self.seats.len(), "dancer left");
        Ok(())
    }

    /// Sends `message` from `from` to every registered dancer except `from`.
    fn broadcast(&self, from: DancerId, message: Message) {
        let frame = Frame::new(from, message);
        for (peer, seat) in &self.seats {
            if *peer != from {
                // A closed sink means that dancer is on its way out.
                let _ = seat.sender.send(frame);
            }
        }
    }

    fn snapshot(&self) -> FloorSnapshot {
        FloorSnapshot {
            dancers: self
                .seats
                .iter()
                .map(|(id, seat)| (*id, seat.state))
                .collect(),
        }
    }
}

/// Spawns the floor actor task and returns a handle to it.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_floor(config: &FloorConfig) -> FloorHandle {
    let (tx, rx) = mpsc::channel(config.command_buffer.max(1));

    let actor = FloorActor {
        seats: BTreeMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    FloorHandle { sender: tx }
}
