use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use super::base;
use super::FamilyExtractor;
use crate::error::StepError;
use crate::models::{EventDraft, Field};
use crate::patterns;

const FAMILY_ID: &str = "notl_official";
const HOST_MARKER: &str = "niagaraonthelake.com";
const DATE_FORMAT: &str = "%B %d, %Y";

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.entry-title").expect("notl title selector"));
static DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".event-date").expect("notl date selector"));
static LOCATION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".event-location").expect("notl location selector"));
static DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".event-description").expect("notl description selector"));
static HOST_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".event-organizer").expect("notl organizer selector"));
static PRICE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".event-cost").expect("notl cost selector"));
static IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".event-featured-image img").expect("notl image selector"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+ \d+, \d{4})").expect("notl date regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+:\d+ [ap]m)").expect("notl time regex"));

/// The town's official events calendar.
pub struct NotlOfficial;

impl FamilyExtractor for NotlOfficial {
    fn family_id(&self) -> &'static str {
        FAMILY_ID
    }

    fn host_marker(&self) -> &'static str {
        HOST_MARKER
    }

    fn extract(&self, document: &Html, draft: &mut EventDraft) -> Result<(), StepError> {
        let mut failure = None;

        draft.propose_opt(Field::EventName, base::first_text(document, &TITLE_SELECTOR));

        if let Some(date_text) = base::first_text(document, &DATE_SELECTOR) {
            if let Some(phrase) = DATE_RE.captures(&date_text).and_then(|caps| caps.get(1)) {
                match patterns::reformat_date(phrase.as_str(), DATE_FORMAT) {
                    Some(date) => {
                        draft.propose(Field::Date, date);
                    }
                    None => {
                        failure = Some(StepError::DateParse {
                            field: "date",
                            input: phrase.as_str().to_string(),
                        });
                    }
                }
            }
            if let Some(time) = TIME_RE.captures(&date_text).and_then(|caps| caps.get(1)) {
                draft.propose(Field::Time, time.as_str());
            }
        }

        draft.propose_opt(
            Field::Location,
            base::first_text(document, &LOCATION_SELECTOR),
        );
        draft.propose_opt(
            Field::Description,
            base::first_block(document, &DESCRIPTION_SELECTOR),
        );
        draft.propose_opt(Field::Host, base::first_text(document, &HOST_SELECTOR));

        if let Some(pricing) = base::first_text(document, &PRICE_SELECTOR)
            .as_deref()
            .and_then(base::pricing_from_text)
        {
            draft.propose_pricing(pricing);
        }

        draft.propose_opt(
            Field::ImageUrl,
            base::first_attr(document, &IMAGE_SELECTOR, "src"),
        );

        failure.map_or(Ok(()), Err)
    }
}
