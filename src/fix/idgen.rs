//! Pluggable id and placeholder-suffix generation.
//!
//! Repairs that need fresh identifiers (node ids, webhook paths) go through
//! this trait so tests can pin a seed and get deterministic output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait IdGenerator {
    /// A fresh identifier for a node or workflow.
    fn next_id(&mut self) -> String;

    /// A short suffix for generated placeholder paths.
    fn suffix(&mut self) -> String;
}

pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub fn new() -> Self {
        RandomIds {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomIds {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn alphanumeric(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(rand::distr::Alphanumeric)
            .take(len)
            .map(char::from)
            .collect::<String>()
            .to_ascii_lowercase()
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        format!("node-{}", self.alphanumeric(8))
    }

    fn suffix(&mut self) -> String {
        self.alphanumeric(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generator_is_deterministic() {
        let mut a = RandomIds::seeded(7);
        let mut b = RandomIds::seeded(7);
        assert_eq!(a.next_id(), b.next_id());
        assert_eq!(a.suffix(), b.suffix());
    }

    #[test]
    fn ids_are_prefixed_and_lowercase() {
        let mut ids = RandomIds::seeded(1);
        let id = ids.next_id();
        assert!(id.starts_with("node-"));
        assert_eq!(id, id.to_ascii_lowercase());
    }
}
