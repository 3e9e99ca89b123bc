//! Options for subset construction.

/// Configuration for [`crate::subset_construction::subset_construction_with`].
///
/// ```
/// use subset_dfa::Config;
///
/// let config = Config::new().state_limit(Some(10_000));
/// assert_eq!(config.get_state_limit(), Some(10_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    state_limit: Option<usize>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort construction once the DFA would need more than `limit` nodes.
    ///
    /// Subset construction can produce exponentially many states; `None`
    /// (the default) leaves it unbounded.
    pub fn state_limit(mut self, limit: Option<usize>) -> Self {
        self.state_limit = limit;
        self
    }

    pub fn get_state_limit(&self) -> Option<usize> {
        self.state_limit
    }
}
