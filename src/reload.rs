//! Reload decision logic
//!
//! One decision per load call: whether the generator must run, and why.
//! Separated from the store so the decision table is testable without
//! touching the filesystem.

/// Default reload predicate: regenerate whenever the state differs
pub fn state_changed<S: PartialEq>(previous: &S, new: &S) -> bool {
    new != previous
}

/// Why (or whether) the generator runs for a load call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// No prior entry exists; generate for the first time
    Bootstrap,
    /// A prior entry exists but regeneration was forced
    Forced,
    /// The reload predicate flagged the stored state as out of date
    Stale,
    /// The stored object is still valid; the generator does not run
    Reuse,
}

impl Decision {
    /// Whether the generator runs under this decision
    pub fn regenerate(&self) -> bool {
        !matches!(self, Self::Reuse)
    }

    /// Whether regeneration was triggered by the reload predicate.
    /// Bootstrap has nothing to compare against and force never consults
    /// the predicate, so neither counts as a state change.
    pub fn state_change(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Decide whether to regenerate given the previous state (if any), the new
/// state, the reload predicate, and the force flag
pub fn decide<S, R>(previous: Option<&S>, state: &S, reload: R, force_update: bool) -> Decision
where
    R: FnOnce(&S, &S) -> bool,
{
    let Some(prev) = previous else {
        return Decision::Bootstrap;
    };
    if force_update {
        Decision::Forced
    } else if reload(prev, state) {
        Decision::Stale
    } else {
        Decision::Reuse
    }
}
