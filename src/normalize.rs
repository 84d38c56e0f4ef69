use url::Url;

use crate::models::{EventDraft, EventRecord, Pricing};
use crate::utils;

pub const MAX_DESCRIPTION_CHARS: usize = 5000;
pub const TRUNCATION_MARKER: &str = "...";

/// Turns a draft into a complete record: unset text becomes empty, unset
/// pricing means free, long descriptions are capped and relative image
/// references are made absolute against the page origin.
pub fn normalize(draft: EventDraft, page_url: &Url) -> EventRecord {
    let (is_free, price) = match draft.pricing {
        Some(Pricing::Paid(amount)) => (false, Some(amount)),
        Some(Pricing::Free) | None => (true, None),
    };

    EventRecord {
        event_name: draft.event_name.unwrap_or_default(),
        date: draft.date.unwrap_or_default(),
        time: draft.time.unwrap_or_default(),
        location: draft.location.unwrap_or_default(),
        description: truncate_description(draft.description.unwrap_or_default()),
        host: draft.host.unwrap_or_default(),
        is_free,
        price,
        image_url: draft
            .image_url
            .filter(|src| !src.trim().is_empty())
            .map(|src| absolutize(&src, page_url)),
    }
}

pub fn truncate_description(description: String) -> String {
    match description.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => {
            let mut truncated = description[..cut].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => description,
    }
}

pub fn is_absolute(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// Joins `src` onto the page origin. Purely structural, never fails.
pub fn absolutize(src: &str, page_url: &Url) -> String {
    let src = src.trim();
    if is_absolute(src) {
        return src.to_string();
    }
    if let Some(rest) = src.strip_prefix("//") {
        return format!("{}://{}", page_url.scheme(), rest);
    }
    let origin = utils::origin_of(page_url);
    if src.starts_with('/') {
        format!("{origin}{src}")
    } else {
        format!("{origin}/{src}")
    }
}
