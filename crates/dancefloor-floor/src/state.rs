//! Last-known dancer state and registry snapshots.

use dancefloor_protocol::{DancerId, Message, Mood, Position};

/// What the floor remembers about a dancer, for replay to newcomers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DancerState {
    /// Position from the dancer's latest `move`.
    pub last_move: Position,
    /// Value from the dancer's latest `mood`.
    pub last_mood: Mood,
}

impl DancerState {
    /// Folds a published message into the state.
    ///
    /// Only `move` and `mood` are remembered; everything else is transient.
    pub fn record(&mut self, message: &Message) {
        match message {
            Message::Move(pos) => self.last_move = *pos,
            Message::Mood(mood) => self.last_mood = *mood,
            _ => {}
        }
    }

    /// The `move` message that reproduces this state.
    pub fn move_message(&self) -> Message {
        Message::Move(self.last_move)
    }

    /// The `mood` message that reproduces this state.
    pub fn mood_message(&self) -> Message {
        Message::Mood(self.last_mood)
    }
}

impl Default for DancerState {
    fn default() -> Self {
        Self {
            last_move: Position::DEFAULT,
            last_mood: Mood::DEFAULT,
        }
    }
}

/// A point-in-time copy of the registry, ordered by dancer id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorSnapshot {
    pub dancers: Vec<(DancerId, DancerState)>,
}

impl FloorSnapshot {
    /// Number of dancers on the floor.
    pub fn len(&self) -> usize {
        self.dancers.len()
    }

    /// Returns `true` if nobody is dancing.
    pub fn is_empty(&self) -> bool {
        self.dancers.is_empty()
    }

    /// Whether `dancer` is registered.
    pub fn contains(&self, dancer: DancerId) -> bool {
        self.get(dancer).is_some()
    }

    /// Looks up one dancer's state.
    pub fn get(&self, dancer: DancerId) -> Option<&DancerState> {
        self.dancers
            .iter()
            .find(|(id, _)| *id == dancer)
            .map(|(_, state)| state)
    }
}
