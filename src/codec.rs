//! Canonical text form of a chain
//!
//! Each layer is written as `{side},{back}; ` where a field is an optional
//! `*` (subtract mode) followed by the reference as one uppercase hex digit.
//! The trailing `"; "` after the last layer is part of the canonical form.
//!
//! Decoding is more lenient than encoding: fields may be padded with
//! whitespace, values may be decimal (`12`) or a hex digit in either case
//! (`c`), and blank segments are skipped. Blank segments still count when
//! reporting the index of a malformed one.

use std::fmt::Write;

use log::debug;

use crate::circuit::{Chain, GateUnit, Layer, Signal, SIGNAL_MAX};
use crate::error::{DecodeError, LayerFault};

/// Render a chain in canonical form
pub fn encode(chain: &Chain) -> String {
    let mut text = String::with_capacity(chain.layer_count() * 8);
    for layer in chain.layers() {
        // writing into a String cannot fail
        let _ = write!(
            text,
            "{}{:X},{}{:X}; ",
            mode_mark(&layer.side),
            layer.side.reference(),
            mode_mark(&layer.back),
            layer.back.reference()
        );
    }
    text
}

fn mode_mark(gate: &GateUnit) -> &'static str {
    if gate.subtract_mode() {
        "*"
    } else {
        ""
    }
}

/// Parse the text form into a freshly computed chain.
///
/// Empty input is rejected with [`DecodeError::Empty`]. Input made only of
/// blank segments yields a chain with one default layer.
pub fn decode(text: &str) -> Result<Chain, DecodeError> {
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut layers = Vec::new();
    for (index, segment) in text.split(';').enumerate() {
        if segment.trim().is_empty() {
            continue;
        }
        let layer =
            parse_layer(segment).map_err(|reason| DecodeError::MalformedLayer { index, reason })?;
        layers.push(layer);
    }

    debug!("Decoded {} layer(s)", layers.len());
    Ok(Chain::from_layers(layers))
}

fn parse_layer(segment: &str) -> Result<Layer, LayerFault> {
    let (side, back) = segment.split_once(',').ok_or(LayerFault::MissingComma)?;
    let side = parse_gate(side)?;
    let back = parse_gate(back)?;
    Ok(Layer::new(side, back))
}

fn parse_gate(field: &str) -> Result<GateUnit, LayerFault> {
    let field = field.trim();
    if field.is_empty() {
        return Err(LayerFault::EmptyField);
    }

    let (subtract_mode, value) = match field.strip_prefix('*') {
        Some(rest) => (true, rest.trim()),
        None => (false, field),
    };

    let reference = parse_value(value)?;
    GateUnit::new(reference, subtract_mode).map_err(|_| LayerFault::OutOfRange(reference as u32))
}

fn parse_value(value: &str) -> Result<Signal, LayerFault> {
    if value.is_empty() {
        return Err(LayerFault::EmptyField);
    }

    let parsed = if value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse::<u32>()
    } else if value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        u32::from_str_radix(value, 16)
    } else {
        return Err(LayerFault::InvalidValue(value.to_string()));
    };

    let number = parsed.map_err(|_| LayerFault::InvalidValue(value.to_string()))?;
    if number > SIGNAL_MAX as u32 {
        return Err(LayerFault::OutOfRange(number));
    }
    Ok(number as Signal)
}
