pub use random::*;

mod random;

/// Injected random source for the rule draw. Implementations return an index
/// in `0..pool_len`; `pool_len` is never zero because every tier pool is
/// nonempty.
pub trait RuleSelector {
    fn pick(&mut self, pool_len: usize) -> usize;
}

/// Deterministic selector, always picks the same slot (clamped to the pool).
/// Meant for tests and replays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedRuleSelector {
    pub index: usize,
}

impl FixedRuleSelector {
    pub const fn new(index: usize) -> Self {
        Self { index }
    }
}

impl RuleSelector for FixedRuleSelector {
    fn pick(&mut self, pool_len: usize) -> usize {
        self.index.min(pool_len - 1)
    }
}
