use chrono::Month;
use serde::{Deserialize, Serialize};

/// A historical event harvested from an "on this day" page.
/// Immutable once loaded; negative years are BCE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub day: u8,
    pub month: String,
    pub year: i32,
    /// May embed simple HTML markup (links, emphasis) from the source page.
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl HistoricalEvent {
    /// Description with markup removed, for search matching and marker keys.
    pub fn plain_description(&self) -> String {
        strip_html(&self.description)
    }

    pub fn era(&self) -> &'static str {
        if self.year < 0 { "BCE" } else { "CE" }
    }

    /// Tooltip date line, e.g. `"March 15, 44 BCE"`.
    pub fn date_label(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.month,
            self.day,
            self.year.unsigned_abs(),
            self.era()
        )
    }

    /// Whether day and month name form a calendar date that can exist.
    /// February 29 is allowed since the corpus spans leap years.
    pub fn is_plausible(&self) -> bool {
        let Ok(month) = self.month.parse::<Month>() else {
            return false;
        };
        let max_day = match month {
            Month::February => 29,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        };
        (1..=max_day).contains(&self.day)
    }
}

/// Concatenate month-partitioned corpus files into one corpus.
/// No sort order is guaranteed afterward.
pub fn merge_monthly(monthly: Vec<Vec<HistoricalEvent>>) -> Vec<HistoricalEvent> {
    let total = monthly.iter().map(Vec::len).sum();
    let mut corpus = Vec::with_capacity(total);
    for month in monthly {
        corpus.extend(month);
    }
    corpus
}

/// Remove HTML tags and decode the handful of entities the scraper emits.
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    if out.contains('&') {
        out = out
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&nbsp;", " ");
    }
    out
}
