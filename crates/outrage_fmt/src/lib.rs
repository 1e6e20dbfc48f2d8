//! Decoders for the chunked, versioned binary formats of the Outrage game
//! engine, as consumed by the level editor.
//!
//! The two formats handled here are the compiled game table (a flat sequence
//! of length-framed, type-tagged pages holding texture and sound definitions)
//! and the HOG2 archive container the game ships its data in.
//!
//! All of the decoding is strictly sequential and single-pass. Any violation
//! of a format invariant surfaces as a [`FormatError`] and aborts the decode;
//! there is no partial recovery below the page framing level.

pub mod hog2;
pub mod stream;
pub mod table;

mod error;
pub use error::*;
