//! Text matchers shared by the family and generic extractors.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// A named regex whose first capture group is the extracted value.
pub struct Shape {
    pub name: &'static str,
    pub regex: Regex,
}

impl Shape {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("valid shape regex"),
        }
    }

    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Tried in order by the generic extractor; the first that matches wins.
pub static DATE_SHAPES: Lazy<Vec<Shape>> = Lazy::new(|| {
    vec![
        Shape::new("numeric-slash", r"(\d{1,2}/\d{1,2}/\d{2,4})"),
        Shape::new("iso-numeric", r"(\d{4}-\d{1,2}-\d{1,2})"),
        Shape::new("month-day-year", r"(\w+ \d{1,2}, \d{4})"),
        Shape::new("day-month-year", r"(\d{1,2} \w+ \d{4})"),
    ]
});

pub static TIME_SHAPES: Lazy<Vec<Shape>> = Lazy::new(|| {
    vec![
        Shape::new("clock-meridiem", r"(?i)(\d{1,2}:\d{2} [AP]M)"),
        Shape::new("hour-meridiem", r"(?i)(\d{1,2} [AP]M)"),
        Shape::new("clock-24h", r"(\d{2}:\d{2})"),
    ]
});

pub static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\d+(\.\d+)?").expect("valid amount regex"));
static FREE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)free").expect("valid free regex"));

pub const LOCATION_KEYWORDS: &[&str] = &["location", "venue", "place", "where"];
pub const HOST_KEYWORDS: &[&str] = &["organizer", "host", "presented by", "by"];
pub const PRICE_KEYWORDS: &[&str] = &["price", "cost", "fee", "ticket", "admission"];

/// A `keyword:` label: one regex to spot the label inside a text node, one
/// to capture what follows it up to the end of the line.
pub struct Label {
    pub keyword: &'static str,
    marker: Regex,
    capture: Regex,
}

impl Label {
    fn new(keyword: &'static str) -> Self {
        let escaped = regex::escape(keyword);
        Self {
            keyword,
            marker: Regex::new(&format!("(?i){escaped}:")).expect("valid label regex"),
            capture: Regex::new(&format!("(?i){escaped}:([^\n]*)")).expect("valid label regex"),
        }
    }

    pub fn is_in(&self, text: &str) -> bool {
        self.marker.is_match(text)
    }

    /// Trimmed text after the label, `None` when nothing follows it.
    pub fn value_in(&self, text: &str) -> Option<String> {
        let caps = self.capture.captures(text)?;
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

fn labels(keywords: &'static [&'static str]) -> Vec<Label> {
    keywords.iter().map(|kw| Label::new(*kw)).collect()
}

pub static LOCATION_LABELS: Lazy<Vec<Label>> = Lazy::new(|| labels(LOCATION_KEYWORDS));
pub static HOST_LABELS: Lazy<Vec<Label>> = Lazy::new(|| labels(HOST_KEYWORDS));
pub static PRICE_LABELS: Lazy<Vec<Label>> = Lazy::new(|| labels(PRICE_KEYWORDS));

pub fn first_shape<'t>(shapes: &[Shape], text: &'t str) -> Option<(&'static str, &'t str)> {
    shapes
        .iter()
        .find_map(|shape| shape.find(text).map(|value| (shape.name, value)))
}

pub fn mentions_free(text: &str) -> bool {
    FREE_RE.is_match(text)
}

pub fn find_amount(text: &str) -> Option<String> {
    AMOUNT_RE.find(text).map(|m| m.as_str().to_string())
}

/// Wall-clock date and time of an ISO 8601 timestamp, kept in the offset it
/// was written in. `Z`, numeric offsets and offset-less values are accepted.
pub fn parse_iso_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive);
        }
    }
    None
}

/// Parses a date phrase with the given chrono format and renders it as
/// `YYYY-MM-DD`.
pub fn reformat_date(input: &str, fmt: &str) -> Option<String> {
    NaiveDate::parse_from_str(input.trim(), fmt)
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}
