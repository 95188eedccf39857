//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Why a call could not be served from the cassette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// Nothing was recorded for the port/method pair.
    #[error(
        "cassette has no interactions for port={port:?} method={method:?} \
         (recorded pairs: [{available}])"
    )]
    Unrecorded {
        /// Port that was called.
        port: String,
        /// Method that was called.
        method: String,
        /// Recorded `port::method` pairs, comma separated.
        available: String,
    },

    /// Every interaction for the pair has been served.
    #[error(
        "cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
         have been consumed (last seq={last_seq})"
    )]
    Exhausted {
        /// Port that was called.
        port: String,
        /// Method that was called.
        method: String,
        /// Interactions recorded for the pair.
        count: usize,
        /// Sequence number of the last of them.
        last_seq: u64,
    },

    /// The call differs from the one recorded next.
    #[error(
        "cassette mismatch at seq={seq} for port={port:?} method={method:?}:\n  \
         recorded: {recorded}\n  replayed: {replayed}"
    )]
    Mismatch {
        /// Sequence number of the recorded interaction.
        seq: u64,
        /// Port that was called.
        port: String,
        /// Method that was called.
        method: String,
        /// Recorded input, as JSON.
        recorded: String,
        /// Input of this call, as JSON.
        replayed: String,
    },
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair and checking that each call matches its recording.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for `port`/`method`, which must have been
    /// recorded with exactly `input`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReplayError`] if the cassette has no (more) interactions
    /// for the pair, or if the next one was recorded with a different input.
    /// Both mean the code under replay no longer behaves the way it did
    /// while recording.
    pub fn next_interaction(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Result<&Interaction, ReplayError> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(ReplayError::Unrecorded {
                port: port.to_string(),
                method: method.to_string(),
                available: available.join(", "),
            });
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        let Some(interaction) = queue.get(*cursor) else {
            return Err(ReplayError::Exhausted {
                port: port.to_string(),
                method: method.to_string(),
                count: queue.len(),
                last_seq: queue.last().map_or(0, |i| i.seq),
            });
        };

        if interaction.input != *input {
            return Err(ReplayError::Mismatch {
                seq: interaction.seq,
                port: port.to_string(),
                method: method.to_string(),
                recorded: interaction.input.to_string(),
                replayed: input.to_string(),
            });
        }
        *cursor += 1;
        Ok(interaction)
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues
            .iter()
            .map(|(key, queue)| queue.len() - self.cursors.get(key).copied().unwrap_or(0))
            .sum()
    }
}
