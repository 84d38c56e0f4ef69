use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use super::base;
use super::FamilyExtractor;
use crate::error::StepError;
use crate::models::{EventDraft, Field, Pricing};
use crate::patterns;

const FAMILY_ID: &str = "facebook";
const HOST_MARKER: &str = "facebook.com";
const TITLE_SUFFIX: &str = " | Facebook";

static DATETIME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span[content]").expect("facebook datetime selector"));
static LOCATION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="maps"]"#).expect("facebook location selector"));
static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-testid="event-description-text"]"#)
        .expect("facebook description selector")
});
static HOST_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[href*="facebook.com"][role="link"]"#).expect("facebook host selector")
});
static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"img[data-imgperflogname="profileCoverPhoto"]"#)
        .expect("facebook image selector")
});

pub struct Facebook;

impl FamilyExtractor for Facebook {
    fn family_id(&self) -> &'static str {
        FAMILY_ID
    }

    fn host_marker(&self) -> &'static str {
        HOST_MARKER
    }

    fn extract(&self, document: &Html, draft: &mut EventDraft) -> Result<(), StepError> {
        draft.propose_opt(
            Field::EventName,
            base::title_text(document)
                .map(|title| title.replace(TITLE_SUFFIX, "").trim().to_string()),
        );

        if let Some((date, time)) = start_datetime(document) {
            draft.propose(Field::Date, date);
            draft.propose(Field::Time, time);
        }

        draft.propose_opt(
            Field::Location,
            base::first_text(document, &LOCATION_SELECTOR),
        );
        draft.propose_opt(
            Field::Description,
            base::first_block(document, &DESCRIPTION_SELECTOR),
        );
        draft.propose_opt(Field::Host, host_name(document));

        if let Some(pricing) = page_pricing(document) {
            draft.propose_pricing(pricing);
        }

        draft.propose_opt(
            Field::ImageUrl,
            base::first_attr(document, &IMAGE_SELECTOR, "src"),
        );

        Ok(())
    }
}

/// First `span[content]` holding a readable ISO timestamp, split into date
/// and time. Unreadable timestamps are skipped.
fn start_datetime(document: &Html) -> Option<(String, String)> {
    for element in document.select(&DATETIME_SELECTOR) {
        let Some(content) = element.value().attr("content") else {
            continue;
        };
        if !content.contains('T') {
            continue;
        }
        let Some(dt) = patterns::parse_iso_datetime(content) else {
            debug!(content, "skipping unreadable start timestamp");
            continue;
        };
        return Some((
            dt.format("%Y-%m-%d").to_string(),
            dt.format("%H:%M").to_string(),
        ));
    }
    None
}

fn host_name(document: &Html) -> Option<String> {
    document
        .select(&HOST_SELECTOR)
        .map(base::inner_text)
        .find(|text| !text.is_empty() && !text.starts_with("http"))
}

/// Facebook has no price block, so the whole page is the scope.
fn page_pricing(document: &Html) -> Option<Pricing> {
    let nodes = base::visible_text_nodes(document);
    if nodes.iter().any(|(text, _)| patterns::mentions_free(text)) {
        return Some(Pricing::Free);
    }
    nodes
        .iter()
        .find_map(|(text, _)| patterns::find_amount(text))
        .map(Pricing::Paid)
}
