//! Heuristic extraction for pages with no known markup.
//!
//! Every field walks an ordered table of strategies and keeps the first
//! non-empty result. Fields already set in the draft are left alone.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::base;
use crate::models::{EventDraft, Field, Pricing};
use crate::patterns::{self, Label};

const DESCRIPTION_SELECTORS: &[&str] = &[
    ".event-description",
    ".description",
    "#description",
    r#"[itemprop="description"]"#,
    ".about",
    ".details",
];
const IMAGE_SELECTORS: &[&str] = &[
    ".event-image img",
    ".featured-image img",
    r#"[itemprop="image"]"#,
    ".hero-image img",
    ".banner img",
    "img.event",
];
const TITLE_SEPARATOR: char = '|';
const MIN_PARAGRAPH_CHARS: usize = 100;
const MIN_IMAGE_AREA: u64 = 10_000;

static DESCRIPTION_CASCADE: Lazy<Vec<Selector>> = Lazy::new(|| compile(DESCRIPTION_SELECTORS));
static IMAGE_CASCADE: Lazy<Vec<Selector>> = Lazy::new(|| compile(IMAGE_SELECTORS));
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("h1 selector"));
static P_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("p selector"));
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("img selector"));

fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|css| Selector::parse(css).expect("generic cascade selector"))
        .collect()
}

/// The document with its visible text nodes and joined text, gathered once
/// and shared by every step.
struct Page<'a> {
    document: &'a Html,
    nodes: Vec<(&'a str, ElementRef<'a>)>,
    text: String,
}

impl<'a> Page<'a> {
    fn new(document: &'a Html) -> Self {
        let nodes = base::visible_text_nodes(document);
        let text = base::visible_text(&nodes);
        Self {
            document,
            nodes,
            text,
        }
    }
}

type Step = fn(&Page<'_>, &mut EventDraft);

/// Field steps in the order they run.
const STEPS: &[(&str, Step)] = &[
    ("event_name", event_name),
    ("date", date),
    ("time", time),
    ("location", location),
    ("description", description),
    ("host", host),
    ("price", price),
    ("image_url", image_url),
];

pub fn extract(document: &Html) -> EventDraft {
    let mut draft = EventDraft::new();
    fill(document, &mut draft);
    draft
}

/// Fills the unset fields of `draft` from `document`.
pub fn fill(document: &Html, draft: &mut EventDraft) {
    let page = Page::new(document);
    for (name, step) in STEPS {
        debug!(step = name, "generic step");
        step(&page, draft);
    }
}

fn event_name(page: &Page<'_>, draft: &mut EventDraft) {
    if draft.is_set(Field::EventName) {
        return;
    }
    let from_title = base::title_text(page.document).and_then(|title| {
        title
            .split(TITLE_SEPARATOR)
            .next()
            .map(|segment| segment.trim().to_string())
    });
    if draft.propose_opt(Field::EventName, from_title) {
        return;
    }
    draft.propose_opt(Field::EventName, base::first_text(page.document, &H1_SELECTOR));
}

fn date(page: &Page<'_>, draft: &mut EventDraft) {
    if draft.is_set(Field::Date) {
        return;
    }
    if let Some((shape, value)) = patterns::first_shape(&patterns::DATE_SHAPES, &page.text) {
        debug!(shape, value, "generic date match");
        draft.propose(Field::Date, value);
    }
}

fn time(page: &Page<'_>, draft: &mut EventDraft) {
    if draft.is_set(Field::Time) {
        return;
    }
    if let Some((shape, value)) = patterns::first_shape(&patterns::TIME_SHAPES, &page.text) {
        debug!(shape, value, "generic time match");
        draft.propose(Field::Time, value);
    }
}

fn location(page: &Page<'_>, draft: &mut EventDraft) {
    if draft.is_set(Field::Location) {
        return;
    }
    draft.propose_opt(
        Field::Location,
        first_labeled_value(page, &patterns::LOCATION_LABELS),
    );
}

fn host(page: &Page<'_>, draft: &mut EventDraft) {
    if draft.is_set(Field::Host) {
        return;
    }
    draft.propose_opt(Field::Host, first_labeled_value(page, &patterns::HOST_LABELS));
}

fn description(page: &Page<'_>, draft: &mut EventDraft) {
    if draft.is_set(Field::Description) {
        return;
    }
    for selector in DESCRIPTION_CASCADE.iter() {
        if draft.propose_opt(Field::Description, base::first_block(page.document, selector)) {
            return;
        }
    }
    let paragraph = page
        .document
        .select(&P_SELECTOR)
        .map(base::block_text)
        .find(|text| text.chars().count() > MIN_PARAGRAPH_CHARS);
    draft.propose_opt(Field::Description, paragraph);
}

fn price(page: &Page<'_>, draft: &mut EventDraft) {
    if draft.pricing.is_some() {
        return;
    }
    for label in patterns::PRICE_LABELS.iter() {
        let Some(value) = labeled_value(page, label) else {
            continue;
        };
        if value.to_lowercase().contains("free") {
            draft.propose_pricing(Pricing::Free);
            return;
        }
        if let Some(amount) = patterns::find_amount(&value) {
            draft.propose_pricing(Pricing::Paid(amount));
            return;
        }
    }
}

fn image_url(page: &Page<'_>, draft: &mut EventDraft) {
    if draft.is_set(Field::ImageUrl) {
        return;
    }
    for selector in IMAGE_CASCADE.iter() {
        if draft.propose_opt(Field::ImageUrl, base::first_attr(page.document, selector, "src")) {
            return;
        }
    }
    draft.propose_opt(Field::ImageUrl, largest_image(page.document));
}

fn first_labeled_value(page: &Page<'_>, labels: &[Label]) -> Option<String> {
    labels.iter().find_map(|label| {
        let value = labeled_value(page, label)?;
        debug!(keyword = label.keyword, value = %value, "generic label match");
        Some(value)
    })
}

/// Text after `keyword:` in the element holding the first text node with
/// that label. Labels wrapped in their own element (`<b>Venue:</b> Hall`)
/// are read from the grandparent.
fn labeled_value(page: &Page<'_>, label: &Label) -> Option<String> {
    let parent = page
        .nodes
        .iter()
        .find(|(text, _)| label.is_in(text))
        .map(|(_, parent)| *parent)?;
    let scopes = std::iter::once(parent).chain(parent.parent().and_then(ElementRef::wrap));
    for scope in scopes {
        let text = scope.text().collect::<String>();
        if let Some(value) = label.value_in(&text) {
            return Some(base::clean_text(&value));
        }
    }
    None
}

/// `src` of the largest image with explicit integer dimensions whose area
/// exceeds the icon threshold. Ties keep the earlier image.
fn largest_image(document: &Html) -> Option<String> {
    let mut best: Option<(u64, String)> = None;
    for img in document.select(&IMG_SELECTOR) {
        let element = img.value();
        let Some(src) = element.attr("src").map(str::trim).filter(|src| !src.is_empty()) else {
            continue;
        };
        let width = element.attr("width").and_then(|w| w.trim().parse::<u64>().ok());
        let height = element.attr("height").and_then(|h| h.trim().parse::<u64>().ok());
        let (Some(width), Some(height)) = (width, height) else {
            continue;
        };
        let area = width.saturating_mul(height);
        if area <= MIN_IMAGE_AREA {
            continue;
        }
        if best.as_ref().map_or(true, |(max, _)| area > *max) {
            best = Some((area, src.to_string()));
        }
    }
    best.map(|(_, src)| src)
}
