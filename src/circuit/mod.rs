//! Comparator Circuit Model
//!
//! Gates, layers and the chain that folds the fixed input vector through
//! them. All values stay within the 4-bit signal range by construction.

mod chain;
mod gate;
mod layer;

pub use chain::{Chain, Transfer, SEED};
pub use gate::{Direction, GateSlot, GateUnit, Signal, SIGNAL_LEVELS, SIGNAL_MAX};
pub use layer::Layer;
