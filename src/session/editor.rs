//! Editing session
//!
//! Owns exactly one chain. Every public mutation applies its edits first and
//! recomputes afterwards, so the output read back through the session is
//! never stale.

use log::{debug, warn};

use super::command::EditCommand;
use crate::circuit::{Chain, Transfer};
use crate::codec;
use crate::config::EditorConfig;
use crate::error::DecodeError;

/// A single editing session over one chain
#[derive(Debug, Clone)]
pub struct EditSession {
    chain: Chain,
    config: EditorConfig,
}

impl EditSession {
    /// Start a session with a one-layer default chain
    pub fn new(config: EditorConfig) -> Self {
        Self {
            chain: Chain::new(),
            config,
        }
    }

    /// Start a session from optional initial text.
    ///
    /// Text that fails to decode (including empty text) falls back to a
    /// default chain; the decode error is returned alongside.
    pub fn open(initial: Option<&str>, config: EditorConfig) -> (Self, Option<DecodeError>) {
        let mut session = Self::new(config);
        let Some(text) = initial else {
            return (session, None);
        };

        match codec::decode(text) {
            Ok(chain) => {
                session.chain = chain;
                (session, None)
            }
            Err(err) => {
                warn!("Initial text rejected ({}), starting from a default chain", err);
                (session, Some(err))
            }
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Current transfer vector
    pub fn output(&mut self) -> Transfer {
        *self.chain.output()
    }

    /// Canonical text of the current chain
    pub fn export_text(&self) -> String {
        codec::encode(&self.chain)
    }

    /// Apply one command and recompute.
    ///
    /// Returns `Ok(false)` when the command addressed a layer that does not
    /// exist or would break a policy limit. A rejected load leaves the
    /// current chain untouched.
    pub fn apply(&mut self, command: EditCommand) -> Result<bool, DecodeError> {
        let applied = self.apply_pending(command);
        self.chain.recompute();
        applied
    }

    /// Apply several commands and recompute once at the end.
    ///
    /// Stops at the first rejected load; earlier edits are kept. Returns how
    /// many commands took effect.
    pub fn apply_batch<I>(&mut self, commands: I) -> Result<usize, DecodeError>
    where
        I: IntoIterator<Item = EditCommand>,
    {
        let mut applied = 0;
        let mut structural = 0;
        let mut result = Ok(());
        for command in commands {
            let is_structural = command.is_structural();
            match self.apply_pending(command) {
                Ok(true) => {
                    applied += 1;
                    if is_structural {
                        structural += 1;
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        self.chain.recompute();
        debug!(
            "Batch applied {} command(s), {} structural; {} layer(s)",
            applied,
            structural,
            self.chain.layer_count()
        );
        result.map(|_| applied)
    }

    /// Replace the chain with decoded text, keeping the old one on failure
    pub fn load_text(&mut self, text: &str) -> Result<(), DecodeError> {
        self.chain = codec::decode(text)?;
        Ok(())
    }

    fn apply_pending(&mut self, command: EditCommand) -> Result<bool, DecodeError> {
        let applied = match &command {
            EditCommand::InsertLayerAfter { layer } => {
                if self.chain.layer_count() >= self.config.max_layers {
                    warn!(
                        "Ignoring '{}': chain already has {} layer(s)",
                        command, self.config.max_layers
                    );
                    return Ok(false);
                }
                self.chain.insert_layer_after(*layer)
            }
            EditCommand::RemoveLayerAfter { layer } => self.chain.remove_layer_after(*layer),
            EditCommand::BumpGate {
                layer,
                slot,
                direction,
            } => self.chain.bump_gate(*layer, *slot, *direction),
            EditCommand::ToggleGate { layer, slot } => self.chain.toggle_gate(*layer, *slot),
            EditCommand::LoadFromText { text } => {
                self.load_text(text)?;
                true
            }
        };

        if applied {
            debug!("Applied '{}'", command);
        } else if let Some(reason) = self.ignored_reason(&command) {
            warn!("Ignoring '{}': {}", command, reason);
        }
        Ok(applied)
    }

    /// Why a command left the chain unchanged, judged against the current
    /// layer count
    fn ignored_reason(&self, command: &EditCommand) -> Option<String> {
        let count = self.chain.layer_count();
        match command {
            EditCommand::RemoveLayerAfter { layer } if layer.checked_add(1) == Some(count) => {
                Some(format!("layer {} is the last layer", layer))
            }
            EditCommand::InsertLayerAfter { layer }
            | EditCommand::RemoveLayerAfter { layer }
            | EditCommand::BumpGate { layer, .. }
            | EditCommand::ToggleGate { layer, .. }
                if *layer >= count =>
            {
                Some(format!("no layer {} in a chain of {}", layer, count))
            }
            _ => None,
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
