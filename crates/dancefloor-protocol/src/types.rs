//! Core protocol types for the dance floor wire format.
//!
//! This module defines every value that travels "on the wire": the
//! identity of a dancer, the commands a dancer can issue, and the typed
//! payloads those commands carry.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for a dancer (one connected client).
///
/// Newtype over `u64` so a dancer id can't be confused with a transport
/// connection id or a plain counter. Ids are handed out monotonically by
/// the server and never reused while it runs.
///
/// `Display` renders the bare decimal value because that is exactly what
/// goes in front of every outbound frame (`"7:m:0.5,0.5"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DancerId(pub u64);

impl fmt::Display for DancerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// The kind of a [`Message`], without its payload.
///
/// Each command has a short wire token (what clients actually send) and a
/// long name (used in logs and accepted as an alias when parsing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Bounce,
    Join,
    Fire,
    Leave,
    Mood,
    Move,
    Spin,
}

impl Command {
    /// Every command, in declaration order.
    pub const ALL: [Command; 7] = [
        Command::Bounce,
        Command::Join,
        Command::Fire,
        Command::Leave,
        Command::Mood,
        Command::Move,
        Command::Spin,
    ];

    /// The token written on the wire.
    pub fn token(self) -> &'static str {
        match self {
            Command::Bounce => "b",
            Command::Join => "join",
            Command::Fire => "f",
            Command::Leave => "leave",
            Command::Mood => "e",
            Command::Move => "m",
            Command::Spin => "s",
        }
    }

    /// The human-readable name of the command.
    pub fn name(self) -> &'static str {
        match self {
            Command::Bounce => "bounce",
            Command::Join => "join",
            Command::Fire => "fire",
            Command::Leave => "leave",
            Command::Mood => "mood",
            Command::Move => "move",
            Command::Spin => "spin",
        }
    }

    /// Looks a command up by wire token or long name.
    pub fn from_token(token: &str) -> Option<Command> {
        Command::ALL
            .into_iter()
            .find(|c| c.token() == token || c.name() == token)
    }

    /// Whether clients are allowed to send this command.
    ///
    /// `join` and `leave` are produced by the server when a connection
    /// opens or closes; a client sending them is a protocol violation.
    pub fn is_inbound(self) -> bool {
        !matches!(self, Command::Join | Command::Leave)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A point on the dance floor.
///
/// Coordinates are nominally in `0.0..=1.0` but the protocol does not
/// enforce a range: any finite or infinite number is accepted, only NaN is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Where a dancer stands before its first `move`: the center.
    pub const DEFAULT: Position = Position { x: 0.5, y: 0.5 };

    /// Creates a position from its two coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A dancer's mood, an integer in `0..=Mood::MAX`.
///
/// The inner value is private so a `Mood` can only be built through
/// [`Mood::new`], which enforces the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mood(u8);

impl Mood {
    /// The highest valid mood value.
    pub const MAX: u8 = 6;

    /// The mood every dancer starts with.
    pub const DEFAULT: Mood = Mood(3);

    /// Validates and wraps a mood value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMood`] if `value > Mood::MAX`.
    pub fn new(value: u8) -> Result<Self, ProtocolError> {
        if value > Self::MAX {
            return Err(ProtocolError::InvalidMood(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the underlying value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Mood {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Mood::new(value)
    }
}

impl From<Mood> for u8 {
    fn from(mood: Mood) -> u8 {
        mood.0
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// One protocol message: a command together with its arguments.
///
/// Each variant carries exactly the payload its command declares, so a
/// `Message` with the wrong argument shape cannot be constructed. Parsing
/// and serialization live in the `codec` module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Jump in place. No arguments.
    Bounce,
    /// A dancer arrived. Server-generated.
    Join,
    /// Shoot towards a point.
    Fire(Position),
    /// A dancer left. Server-generated.
    Leave,
    /// Change mood.
    Mood(Mood),
    /// Walk to a point.
    Move(Position),
    /// Turn around. No arguments.
    Spin,
}

impl Message {
    /// Returns the command this message carries.
    pub fn command(&self) -> Command {
        match self {
            Message::Bounce => Command::Bounce,
            Message::Join => Command::Join,
            Message::Fire(_) => Command::Fire,
            Message::Leave => Command::Leave,
            Message::Mood(_) => Command::Mood,
            Message::Move(_) => Command::Move,
            Message::Spin => Command::Spin,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
