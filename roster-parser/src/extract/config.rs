//! Parser configuration.

/// Configuration parameters for roster extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of matched fragments (off tokens, standby tokens,
    /// flight blocks and legs together) accepted from one document.
    /// Exceeding it aborts the parse.
    pub max_fragments: usize,

    /// How many consecutive months, starting at the period's first month,
    /// the date resolver searches for a matching weekday. Never less
    /// than one month is searched.
    pub date_search_months: u32,
}

impl ParserConfig {
    /// Create a new configuration with the given parameters.
    ///
    /// A zero `date_search_months` is raised to one.
    pub fn new(max_fragments: usize, date_search_months: u32) -> Self {
        Self {
            max_fragments,
            date_search_months: date_search_months.max(1),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_fragments: 5000,
            date_search_months: 2,
        }
    }
}
