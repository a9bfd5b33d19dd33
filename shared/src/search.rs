use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::event::HistoricalEvent;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|\S+"#).expect("token pattern"));

/// Split input into words, keeping double-quoted runs as single tokens with
/// the quotes stripped. Case is not normalized here; callers lower-case
/// before tokenizing for case-insensitive search.
pub fn tokenize(input: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(input)
        .map(|caps| {
            match caps.get(1) {
                Some(quoted) if !quoted.as_str().is_empty() => quoted.as_str().to_string(),
                // Empty quotes fall through as the literal match.
                _ => caps[0].to_string(),
            }
        })
        .collect()
}

/// Inclusive year window. Construction rejects reversed bounds; merging a
/// batch of windows is defensive and tolerates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, MapError> {
        if start > end {
            return Err(MapError::InvalidInput(format!(
                "year range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Collapse raw `(start, end)` pairs to the single covering window
    /// `[min, max]`. Reversed pairs contribute both endpoints, so a caller
    /// that failed to sanitize still gets a usable window. `None` when no
    /// pairs are supplied.
    pub fn merge(spans: &[(i32, i32)]) -> Option<YearRange> {
        let mut spans = spans.iter();
        let &(a, b) = spans.next()?;
        let mut merged = YearRange {
            start: a.min(b),
            end: a.max(b),
        };
        for &(a, b) in spans {
            merged.start = merged.start.min(a.min(b));
            merged.end = merged.end.max(a.max(b));
        }
        Some(merged)
    }
}

/// The two filter policies are mutually exclusive by construction: absence
/// of a query in `Search` mode shows nothing, while `YearWindow` ignores
/// descriptions entirely. `SearchUpTo` is the single-year ceiling variant,
/// conjunctive with the token match.
#[derive(Debug, Clone, PartialEq)]
pub enum EventFilter {
    Search { terms: String },
    YearWindow { range: YearRange },
    SearchUpTo { terms: String, year: i32 },
}

impl EventFilter {
    pub fn matches(&self, event: &HistoricalEvent) -> bool {
        match self {
            EventFilter::Search { terms } => matches_terms(event, terms),
            EventFilter::YearWindow { range } => range.contains(event.year),
            EventFilter::SearchUpTo { terms, year } => {
                event.year <= *year && matches_terms(event, terms)
            }
        }
    }
}

/// True when at least one token of the lower-cased search phrase is a
/// substring of the lower-cased, markup-stripped description. An empty
/// phrase has no tokens and therefore matches nothing.
fn matches_terms(event: &HistoricalEvent, terms: &str) -> bool {
    let description = event.plain_description().to_lowercase();
    tokenize(&terms.to_lowercase())
        .iter()
        .any(|token| description.contains(token.as_str()))
}

pub fn filter_events(events: &[HistoricalEvent], filter: &EventFilter) -> Vec<HistoricalEvent> {
    events
        .iter()
        .filter(|event| filter.matches(event))
        .cloned()
        .collect()
}
