//! HLP - Hex Lookup Processor
//!
//! Composes chains of two-comparator layers that together implement an
//! arbitrary-looking mapping from a 4-bit input (0-15) to a 4-bit output.
//!
//! # Architecture
//!
//! - `circuit`: gate semantics, layers, and the chain that folds the fixed
//!   input vector `[0..15]` through them
//! - `codec`: the canonical `side,back; ` text form
//! - `session`: the edit-command surface and the session owning a chain
//! - `cli`: the command-line front end

pub mod circuit;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod session;

pub use circuit::{Chain, Layer};
pub use config::EditorConfig;
pub use error::{DecodeError, HlpError, Result};
pub use session::{EditCommand, EditSession};
