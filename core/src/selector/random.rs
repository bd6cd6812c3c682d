use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::RuleSelector;

/// Uniform rule draw backed by a seeded `SmallRng`, so a session replayed
/// with the same seed sees the same sequence of rules.
#[derive(Clone, Debug)]
pub struct RandomRuleSelector {
    rng: SmallRng,
}

impl RandomRuleSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RuleSelector for RandomRuleSelector {
    fn pick(&mut self, pool_len: usize) -> usize {
        self.rng.gen_range(0..pool_len)
    }
}
