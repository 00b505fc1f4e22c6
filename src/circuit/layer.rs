//! Layer - one stage of the comparator chain
//!
//! Two comparators share an output line. The side comparator receives the
//! incoming signal at its back input and its own reference at its side input;
//! the back comparator is wired the other way round. The stage output is the
//! stronger of the two.

use serde::{Deserialize, Serialize};

use super::gate::{GateSlot, GateUnit, Signal, SIGNAL_LEVELS};

/// A pair of comparators forming one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layer {
    pub side: GateUnit,
    pub back: GateUnit,
}

impl Layer {
    pub fn new(side: GateUnit, back: GateUnit) -> Self {
        Self { side, back }
    }

    /// Borrow the gate in `slot`
    pub fn gate(&self, slot: GateSlot) -> &GateUnit {
        match slot {
            GateSlot::Side => &self.side,
            GateSlot::Back => &self.back,
        }
    }

    /// Mutably borrow the gate in `slot`
    pub fn gate_mut(&mut self, slot: GateSlot) -> &mut GateUnit {
        match slot {
            GateSlot::Side => &mut self.side,
            GateSlot::Back => &mut self.back,
        }
    }

    /// Map a single input through this stage.
    ///
    /// Argument order differs between the two gates and must not be
    /// normalized: subtract mode makes `apply` non-commutative.
    pub fn transform(&self, input: Signal) -> Signal {
        let side_out = self.side.apply(self.side.reference(), input);
        let back_out = self.back.apply(input, self.back.reference());
        side_out.max(back_out)
    }

    /// Map every entry of a transfer vector through this stage in place
    pub fn transform_all(&self, values: &mut [Signal; SIGNAL_LEVELS]) {
        for value in values.iter_mut() {
            *value = self.transform(*value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::gate::SIGNAL_MAX;

    fn gate(reference: Signal, subtract: bool) -> GateUnit {
        GateUnit::new(reference, subtract).unwrap()
    }

    #[test]
    fn test_default_layer_is_identity() {
        let layer = Layer::default();
        for input in 0..=SIGNAL_MAX {
            assert_eq!(layer.transform(input), input);
        }
    }

    #[test]
    fn test_side_gate_thresholds_input() {
        // back gate at 0 in compare mode only passes input 0
        let layer = Layer::new(gate(5, false), gate(0, false));
        assert_eq!(layer.transform(4), 0);
        assert_eq!(layer.transform(5), 5);
        assert_eq!(layer.transform(12), 12);
    }

    #[test]
    fn test_back_gate_passes_reference_when_input_low() {
        // side gate at 15 only passes input 15
        let layer = Layer::new(gate(15, false), gate(9, false));
        assert_eq!(layer.transform(3), 9);
        assert_eq!(layer.transform(9), 9);
        assert_eq!(layer.transform(10), 0);
        assert_eq!(layer.transform(15), 15);
    }

    #[test]
    fn test_subtract_argument_order_preserved() {
        // side: input - 3, back: 10 - input
        let layer = Layer::new(gate(3, true), gate(10, true));
        assert_eq!(layer.transform(0), 10);
        assert_eq!(layer.transform(2), 8);
        assert_eq!(layer.transform(7), 4);
        assert_eq!(layer.transform(12), 9);
    }

    #[test]
    fn test_transform_all_matches_scalar() {
        let layer = Layer::new(gate(4, true), gate(11, false));
        let mut values = [0; SIGNAL_LEVELS];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as Signal;
        }
        layer.transform_all(&mut values);
        for (i, v) in values.iter().enumerate() {
            assert_eq!(*v, layer.transform(i as Signal));
        }
    }

    #[test]
    fn test_gate_mut_addresses_slot() {
        let mut layer = Layer::default();
        layer.gate_mut(GateSlot::Back).toggle_mode();
        assert!(layer.gate(GateSlot::Back).subtract_mode());
        assert!(!layer.gate(GateSlot::Side).subtract_mode());
    }
}
