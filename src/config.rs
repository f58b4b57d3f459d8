/// Deepest paren nesting the parser will descend into.
pub const DEFAULT_MAX_NESTING: usize = 32;

/// Number of recent inputs whose suggestions are memoized.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Construction-time settings for [`crate::Evaluator`] and [`crate::omnibox::Omnibox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Paren depth past which the input is cut before parsing.
    pub max_nesting: usize,
    /// Capacity of the keystroke cache. `0` disables caching.
    pub cache_capacity: usize,
    /// Wrap the recognized prefix in `<url>` markup in suggestion descriptions.
    pub highlight_recognized: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nesting: DEFAULT_MAX_NESTING,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            highlight_recognized: true,
        }
    }
}

impl Config {
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn with_highlight_recognized(mut self, highlight_recognized: bool) -> Self {
        self.highlight_recognized = highlight_recognized;
        self
    }
}
