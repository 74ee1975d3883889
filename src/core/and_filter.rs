//! AND-combined filter chains
//!
//! [`AndFilter`] passes an event only if every predicate lets it through.
//! Two rules differ from a plain conjunction of verdicts:
//!
//! - `LoggerMatch` predicates are evaluated as an *exact* ordinal comparison
//!   of logger names instead of the hierarchical starts-with match they use
//!   on their own, and deny on mismatch.
//! - Any other predicate must explicitly `Accept`; `Neutral` counts as a deny.
//!
//! Evaluation stops at the first deny.

use super::filter::{FilterDecision, FilterPredicate};
use super::log_event::LogEvent;
use super::log_level::LogLevel;

#[derive(Debug, Clone, Default)]
pub struct AndFilter {
    filters: Vec<FilterPredicate>,
}

impl AndFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate to the end of the chain
    #[must_use]
    pub fn with(mut self, predicate: FilterPredicate) -> Self {
        self.filters.push(predicate);
        self
    }

    /// Append a predicate to the end of the chain
    pub fn push(&mut self, predicate: FilterPredicate) {
        self.filters.push(predicate);
    }

    pub fn get(&self, index: usize) -> Option<&FilterPredicate> {
        self.filters.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FilterPredicate> {
        self.filters.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterPredicate> {
        self.filters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FilterPredicate> {
        self.filters.iter_mut()
    }

    /// Decide whether `event` passes every predicate
    ///
    /// Returns `Neutral` when there is no event, otherwise `Accept` or `Deny`.
    pub fn decide(&self, event: Option<&LogEvent>) -> FilterDecision {
        let Some(event) = event else {
            return FilterDecision::Neutral;
        };

        for filter in &self.filters {
            match filter {
                FilterPredicate::LoggerMatch {
                    logger_to_match, ..
                } => {
                    if logger_to_match.as_str() != event.logger_name.as_str() {
                        return FilterDecision::Deny;
                    }
                }
                other => {
                    if other.decide(event) != FilterDecision::Accept {
                        return FilterDecision::Deny;
                    }
                }
            }
        }

        FilterDecision::Accept
    }

    /// First `LevelRange` predicate, for in-place rewriting
    pub fn first_level_range_mut(&mut self) -> Option<(&mut LogLevel, &mut LogLevel)> {
        self.filters.iter_mut().find_map(|filter| match filter {
            FilterPredicate::LevelRange { min, max, .. } => Some((min, max)),
            _ => None,
        })
    }
}

impl FromIterator<FilterPredicate> for AndFilter {
    fn from_iter<I: IntoIterator<Item = FilterPredicate>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

/// One link of an appender's filter list
///
/// The head of the list may or may not be an AND chain; callers that need
/// chain-specific behavior match on the variant.
#[derive(Debug, Clone)]
pub enum ChainFilter {
    And(AndFilter),
    Predicate(FilterPredicate),
}

impl ChainFilter {
    pub fn decide(&self, event: Option<&LogEvent>) -> FilterDecision {
        match (self, event) {
            (ChainFilter::And(chain), event) => chain.decide(event),
            (ChainFilter::Predicate(predicate), Some(event)) => predicate.decide(event),
            (ChainFilter::Predicate(_), None) => FilterDecision::Neutral,
        }
    }

    pub fn as_and_filter(&self) -> Option<&AndFilter> {
        match self {
            ChainFilter::And(chain) => Some(chain),
            ChainFilter::Predicate(_) => None,
        }
    }

    pub fn as_and_filter_mut(&mut self) -> Option<&mut AndFilter> {
        match self {
            ChainFilter::And(chain) => Some(chain),
            ChainFilter::Predicate(_) => None,
        }
    }
}

impl From<AndFilter> for ChainFilter {
    fn from(chain: AndFilter) -> Self {
        ChainFilter::And(chain)
    }
}

impl From<FilterPredicate> for ChainFilter {
    fn from(predicate: FilterPredicate) -> Self {
        ChainFilter::Predicate(predicate)
    }
}
