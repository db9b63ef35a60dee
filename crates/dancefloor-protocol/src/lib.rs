//! Wire protocol for the dance floor relay.
//!
//! This crate defines the "language" that dancers and the server speak:
//!
//! - **Types** ([`Message`], [`Command`], [`Position`], [`Mood`],
//!   [`DancerId`]): what a message means.
//! - **Codec** ([`Message::parse`], [`Message::serialize`], [`Frame`]):
//!   how those messages look as text frames.
//! - **Errors** ([`ProtocolError`]): why a frame was rejected.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw text frames) and the
//! session layer (per-connection state). It doesn't know about
//! connections or the floor; it only knows how to read and write messages.
//!
//! ```text
//! Transport (text) → Protocol (Message) → Session (dancer context)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Frame;
pub use error::ProtocolError;
pub use types::{Command, DancerId, Message, Mood, Position};
