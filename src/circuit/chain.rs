//! Comparator chain
//!
//! Layers are evaluated in chain order (index 0 first), mirroring the
//! left-to-right wiring of the physical circuit. The fixed seed vector
//! `[0, 1, ..., 15]` is folded through every layer to produce the transfer
//! function of the whole chain.
//!
//! Edits mark the chain stale instead of recomputing eagerly so that callers
//! can batch several edits; `output()` recomputes on demand.

use serde::{Deserialize, Serialize};

use super::gate::{Direction, GateSlot, Signal, SIGNAL_LEVELS};
use super::layer::Layer;
use crate::error::Result;

/// A full 16-entry transfer vector, indexed by input signal
pub type Transfer = [Signal; SIGNAL_LEVELS];

/// Constant input of every chain
pub const SEED: Transfer = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Ordered list of layers and the transfer vector they produce.
///
/// Never holds zero layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ChainFields", into = "ChainFields")]
pub struct Chain {
    layers: Vec<Layer>,
    output: Transfer,
    stale: bool,
}

// output is derived from the layers, so only they take part in equality
impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
    }
}

impl Eq for Chain {}

/// Serde form of a chain
#[derive(Serialize, Deserialize)]
struct ChainFields {
    layers: Vec<Layer>,
    #[serde(default, skip_deserializing)]
    output: Transfer,
}

impl From<ChainFields> for Chain {
    fn from(fields: ChainFields) -> Self {
        Chain::from_layers(fields.layers)
    }
}

impl From<Chain> for ChainFields {
    fn from(chain: Chain) -> Self {
        let output = chain.evaluate();
        ChainFields {
            layers: chain.layers,
            output,
        }
    }
}

impl Chain {
    /// Create a chain holding one default layer
    pub fn new() -> Self {
        Self::from_layers(vec![Layer::default()])
    }

    /// Create a chain from parsed layers.
    ///
    /// An empty list is coerced to a single default layer.
    pub fn from_layers(mut layers: Vec<Layer>) -> Self {
        if layers.is_empty() {
            layers.push(Layer::default());
        }
        let mut chain = Self {
            layers,
            output: SEED,
            stale: true,
        };
        chain.recompute();
        chain
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Number of layers (always at least one)
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Whether an edit happened since the last `recompute`
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Fold the seed through every layer without touching cached state
    pub fn evaluate(&self) -> Transfer {
        let mut values = SEED;
        for layer in &self.layers {
            layer.transform_all(&mut values);
        }
        values
    }

    /// Refresh the cached output from the current layers
    pub fn recompute(&mut self) {
        self.output = self.evaluate();
        self.stale = false;
    }

    /// Transfer vector of the chain, recomputed first if stale
    pub fn output(&mut self) -> &Transfer {
        if self.stale {
            self.recompute();
        }
        &self.output
    }

    /// Cached transfer vector, or `None` while an edit is pending
    pub fn cached_output(&self) -> Option<&Transfer> {
        if self.stale {
            None
        } else {
            Some(&self.output)
        }
    }

    /// Insert a default layer right after `index`.
    ///
    /// Returns `false` (and changes nothing) when `index` is out of range.
    pub fn insert_layer_after(&mut self, index: usize) -> bool {
        if index >= self.layers.len() {
            return false;
        }
        self.layers.insert(index + 1, Layer::default());
        self.stale = true;
        true
    }

    /// Remove the layer following `index`, if there is one.
    ///
    /// The first layer can never be removed this way, so the chain keeps at
    /// least one layer.
    pub fn remove_layer_after(&mut self, index: usize) -> bool {
        let target = match index.checked_add(1) {
            Some(target) if target < self.layers.len() => target,
            _ => return false,
        };
        self.layers.remove(target);
        self.stale = true;
        true
    }

    /// Step the reference of one gate; out-of-range layers are ignored
    pub fn bump_gate(&mut self, layer: usize, slot: GateSlot, direction: Direction) -> bool {
        match self.layers.get_mut(layer) {
            Some(target) => {
                target.gate_mut(slot).bump(direction);
                self.stale = true;
                true
            }
            None => false,
        }
    }

    /// Flip the mode of one gate; out-of-range layers are ignored
    pub fn toggle_gate(&mut self, layer: usize, slot: GateSlot) -> bool {
        match self.layers.get_mut(layer) {
            Some(target) => {
                target.gate_mut(slot).toggle_mode();
                self.stale = true;
                true
            }
            None => false,
        }
    }

    /// Serialize layers and current output to JSON
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::gate::GateUnit;

    fn layer(side: (Signal, bool), back: (Signal, bool)) -> Layer {
        Layer::new(
            GateUnit::new(side.0, side.1).unwrap(),
            GateUnit::new(back.0, back.1).unwrap(),
        )
    }

    #[test]
    fn test_chain_new() {
        let mut chain = Chain::new();
        assert_eq!(chain.layer_count(), 1);
        assert!(!chain.is_stale());
        assert_eq!(chain.output(), &SEED);
    }

    #[test]
    fn test_from_empty_layers_coerced() {
        let chain = Chain::from_layers(Vec::new());
        assert_eq!(chain.layers(), &[Layer::default()]);
    }

    #[test]
    fn test_fold_applies_layers_in_order() {
        // threshold at 8, then subtract 8
        let threshold = layer((8, false), (0, false));
        let shift = layer((8, true), (0, false));

        let mut forward = Chain::from_layers(vec![threshold, shift]);
        let mut reversed = Chain::from_layers(vec![shift, threshold]);

        let forward_out = *forward.output();
        let reversed_out = *reversed.output();

        assert_eq!(&forward_out[..8], &[0; 8]);
        assert_eq!(&forward_out[8..], &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(reversed_out, [0; SIGNAL_LEVELS]);
    }

    #[test]
    fn test_recompute_idempotent() {
        let mut chain = Chain::from_layers(vec![layer((3, true), (12, false))]);
        chain.recompute();
        let first = *chain.cached_output().unwrap();
        chain.recompute();
        assert_eq!(chain.cached_output(), Some(&first));
    }

    #[test]
    fn test_edit_marks_stale_until_read() {
        let mut chain = Chain::new();
        assert!(chain.bump_gate(0, GateSlot::Side, Direction::Up));
        assert!(chain.is_stale());
        assert!(chain.cached_output().is_none());

        let expected = chain.evaluate();
        assert_eq!(chain.output(), &expected);
        assert!(!chain.is_stale());
    }

    #[test]
    fn test_insert_layer_after() {
        let mut chain = Chain::new();
        chain.toggle_gate(0, GateSlot::Back);

        assert!(chain.insert_layer_after(0));
        assert_eq!(chain.layer_count(), 2);
        assert!(chain.layers()[0].back.subtract_mode());
        assert_eq!(chain.layers()[1], Layer::default());

        assert!(!chain.insert_layer_after(2));
        assert_eq!(chain.layer_count(), 2);
    }

    #[test]
    fn test_remove_layer_after() {
        let mut chain = Chain::new();
        chain.insert_layer_after(0);
        chain.insert_layer_after(1);
        chain.bump_gate(2, GateSlot::Side, Direction::Down);

        assert!(chain.remove_layer_after(0));
        assert_eq!(chain.layer_count(), 2);
        assert_eq!(chain.layers()[1].side.reference(), 15);

        assert!(!chain.remove_layer_after(1));
        assert!(!chain.remove_layer_after(usize::MAX));
        assert_eq!(chain.layer_count(), 2);
    }

    #[test]
    fn test_never_reaches_zero_layers() {
        let mut chain = Chain::new();
        for index in 0..4 {
            chain.remove_layer_after(index);
            chain.remove_layer_after(0);
        }
        assert_eq!(chain.layer_count(), 1);
    }

    #[test]
    fn test_out_of_range_gate_edits_ignored() {
        let mut chain = Chain::new();
        assert!(!chain.bump_gate(1, GateSlot::Side, Direction::Up));
        assert!(!chain.toggle_gate(7, GateSlot::Back));
        assert!(!chain.is_stale());
        assert_eq!(chain.layers(), &[Layer::default()]);
    }

    #[test]
    fn test_equality_ignores_cached_state() {
        let mut edited = Chain::new();
        edited.toggle_gate(0, GateSlot::Side);
        assert!(edited.is_stale());

        let fresh = Chain::from_layers(edited.layers().to_vec());
        assert!(!fresh.is_stale());
        assert_eq!(edited, fresh);

        edited.bump_gate(0, GateSlot::Back, Direction::Up);
        assert_ne!(edited, fresh);
    }

    #[test]
    fn test_json_round_trip() {
        let mut chain = Chain::from_layers(vec![layer((5, false), (3, true))]);
        chain.insert_layer_after(0);

        let json = chain.to_json().unwrap();
        assert_eq!(json["layers"].as_array().unwrap().len(), 2);
        assert_eq!(json["output"].as_array().unwrap().len(), SIGNAL_LEVELS);

        let restored: Chain = serde_json::from_value(json).unwrap();
        assert_eq!(restored.layers(), chain.layers());
        assert_eq!(restored.cached_output(), Some(&chain.evaluate()));
    }

    #[test]
    fn test_json_empty_layers_coerced() {
        let chain: Chain = serde_json::from_str(r#"{"layers": []}"#).unwrap();
        assert_eq!(chain.layer_count(), 1);
    }
}
