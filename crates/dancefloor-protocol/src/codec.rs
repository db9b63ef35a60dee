//! Text codec: turning [`Message`]s and [`Frame`]s into wire text and back.
//!
//! The wire format is deliberately tiny:
//!
//! ```text
//! inbound  (client → server):  <command>[:<args>]          e.g.  m:0.25,0.75
//! outbound (server → client):  <dancerId>:<command>[:<args>]  e.g.  3:e:5
//! ```
//!
//! `<args>` is `"<x>,<y>"` for `move`/`fire`, a decimal integer for `mood`,
//! and absent for everything else.

use std::fmt;
use std::str::FromStr;

use crate::{Command, DancerId, Message, Mood, Position, ProtocolError};

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

impl Message {
    /// Parses one inbound client frame.
    ///
    /// The text is split at the first `:` into a command token and an
    /// argument string. Commands without arguments ignore anything after
    /// the separator, so `"b:whatever"` is a valid bounce.
    ///
    /// # Errors
    /// - [`ProtocolError::InvalidMessage`]: unknown token, or `join`/`leave`
    /// - [`ProtocolError::InvalidPosition`]: bad `move`/`fire` coordinates
    /// - [`ProtocolError::InvalidMood`]: non-integer or out-of-range mood
    pub fn parse(text: &str) -> Result<Message, ProtocolError> {
        decode(text, true)
    }

    /// Serializes this message to wire text.
    ///
    /// Equivalent to `self.to_string()`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::parse(s)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command().token())?;
        match self {
            Message::Fire(pos) | Message::Move(pos) => {
                write!(f, ":{},{}", pos.x, pos.y)
            }
            Message::Mood(mood) => write!(f, ":{mood}"),
            Message::Bounce
            | Message::Join
            | Message::Leave
            | Message::Spin => Ok(()),
        }
    }
}

/// Shared decoder for inbound messages and the message part of frames.
///
/// `inbound_only` rejects the server-generated commands.
fn decode(text: &str, inbound_only: bool) -> Result<Message, ProtocolError> {
    let (token, args) = match text.split_once(':') {
        Some((token, args)) => (token, args),
        None => (text, ""),
    };

    let command = Command::from_token(token)
        .filter(|c| !inbound_only || c.is_inbound())
        .ok_or_else(|| ProtocolError::InvalidMessage(text.to_owned()))?;

    match command {
        Command::Bounce => Ok(Message::Bounce),
        Command::Spin => Ok(Message::Spin),
        Command::Join => Ok(Message::Join),
        Command::Leave => Ok(Message::Leave),
        Command::Fire => parse_position(args).map(Message::Fire),
        Command::Move => parse_position(args).map(Message::Move),
        Command::Mood => parse_mood(args).map(Message::Mood),
    }
}

/// Parses `"<x>,<y>"`. Both halves must be numbers; NaN is rejected.
fn parse_position(args: &str) -> Result<Position, ProtocolError> {
    let invalid = || ProtocolError::InvalidPosition(args.to_owned());

    let (x, y) = args.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;

    if x.is_nan() || y.is_nan() {
        return Err(invalid());
    }
    Ok(Position::new(x, y))
}

/// Parses a decimal mood value and range-checks it.
fn parse_mood(args: &str) -> Result<Mood, ProtocolError> {
    let value: u8 = args
        .trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidMood(args.to_owned()))?;
    Mood::new(value)
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One outbound frame: a message tagged with the dancer it is about.
///
/// This is what the server delivers to each connection. Its text form is
/// `"<dancerId>:<message>"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// The dancer that produced (or is described by) the message.
    pub dancer: DancerId,
    /// The message itself.
    pub message: Message,
}

impl Frame {
    /// Creates a frame.
    pub fn new(dancer: DancerId, message: Message) -> Self {
        Self { dancer, message }
    }

    /// Parses an outbound frame, as a client would.
    ///
    /// Unlike [`Message::parse`], this accepts `join` and `leave`.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidFrame`] if the id prefix is missing or not
    /// a number, otherwise whatever decoding the message part produced.
    pub fn parse(text: &str) -> Result<Frame, ProtocolError> {
        let (id, rest) = text
            .split_once(':')
            .ok_or_else(|| ProtocolError::InvalidFrame(text.to_owned()))?;
        let id: u64 = id
            .parse()
            .map_err(|_| ProtocolError::InvalidFrame(text.to_owned()))?;
        let message = decode(rest, false)?;
        Ok(Frame::new(DancerId(id), message))
    }
}

impl FromStr for Frame {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frame::parse(s)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.dancer, self.message)
    }
}

// =========================================================================
// Tests
// =========================================================================
