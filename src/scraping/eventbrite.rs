use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use super::base;
use super::FamilyExtractor;
use crate::error::StepError;
use crate::models::{EventDraft, Field};
use crate::patterns;

const FAMILY_ID: &str = "eventbrite";
const HOST_MARKER: &str = "eventbrite";
const DATE_FORMAT: &str = "%B %d, %Y";

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.event-title").expect("eventbrite title selector"));
static WHEN_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"span[data-automation="event-details-time-date"]"#)
        .expect("eventbrite date selector")
});
static LOCATION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-automation="event-details-location"]"#)
        .expect("eventbrite location selector")
});
static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-automation="listing-event-description"]"#)
        .expect("eventbrite description selector")
});
static HOST_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[data-automation="listing-organizer-name"]"#)
        .expect("eventbrite organizer selector")
});
static PRICE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-automation="event-details-price"]"#)
        .expect("eventbrite price selector")
});
static IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("picture img").expect("eventbrite image selector"));
// "Saturday, April 15, 2023 at 7:00 PM"; the weekday is not checked.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+, (\w+ \d+, \d{4})").expect("eventbrite date regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+:\d+ [AP]M)").expect("eventbrite time regex"));

pub struct Eventbrite;

impl FamilyExtractor for Eventbrite {
    fn family_id(&self) -> &'static str {
        FAMILY_ID
    }

    fn host_marker(&self) -> &'static str {
        HOST_MARKER
    }

    fn extract(&self, document: &Html, draft: &mut EventDraft) -> Result<(), StepError> {
        let mut failure = None;

        draft.propose_opt(Field::EventName, base::first_text(document, &TITLE_SELECTOR));

        if let Some(when) = base::first_text(document, &WHEN_SELECTOR) {
            if let Some(phrase) = DATE_RE.captures(&when).and_then(|caps| caps.get(1)) {
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
            if let Some(time) = TIME_RE.captures(&when).and_then(|caps| caps.get(1)) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pricing;

    const HERO_IMAGE: &str = "https://img.evbuc.com/hero.jpg";

    fn page(price_block: &str, when: &str) -> String {
        format!(
            r#"
            <html><body>
              <picture><source srcset="/hero.webp"><img src="{HERO_IMAGE}"></picture>
              <h1 class="event-title"> Shaw Festival Gala </h1>
              <span data-automation="event-details-time-date">{when}</span>
              <div data-automation="event-details-location">
                Festival Theatre <br> 10 Queen's Parade
              </div>
              <div data-automation="listing-event-description">
                <p>An evening of music.</p>
                <p>Dress code: cocktail.</p>
              </div>
              <a data-automation="listing-organizer-name" href="/o/shaw">Shaw Festival</a>
              <div data-automation="event-details-price">{price_block}</div>
            </body></html>
            "#
        )
    }

    fn extract(html: &str) -> (EventDraft, Result<(), StepError>) {
        let mut draft = EventDraft::new();
        let outcome = Eventbrite.extract(&Html::parse_document(html), &mut draft);
        (draft, outcome)
    }

    #[test]
    fn parses_eventbrite_event() {
        let html = page("$25.00 – $40.00", "Saturday, April 15, 2023 at 7:00 PM");
        let (draft, outcome) = extract(&html);
        outcome.expect("extract eventbrite page");
        assert_eq!(draft.event_name.as_deref(), Some("Shaw Festival Gala"));
        assert_eq!(draft.date.as_deref(), Some("2023-04-15"));
        assert_eq!(draft.time.as_deref(), Some("7:00 PM"));
        assert_eq!(
            draft.location.as_deref(),
            Some("Festival Theatre 10 Queen's Parade")
        );
        assert_eq!(
            draft.description.as_deref(),
            Some("An evening of music.\nDress code: cocktail.")
        );
        assert_eq!(draft.host.as_deref(), Some("Shaw Festival"));
        assert_eq!(draft.pricing, Some(Pricing::Paid("$25.00".to_string())));
        assert_eq!(draft.image_url.as_deref(), Some(HERO_IMAGE));
    }

    #[test]
    fn free_price_block() {
        let html = page("Free", "Saturday, April 15, 2023 at 7:00 PM");
        let (draft, outcome) = extract(&html);
        outcome.expect("extract");
        assert_eq!(draft.pricing, Some(Pricing::Free));
    }

    #[test]
    fn weekday_that_disagrees_with_the_date_is_ignored() {
        // April 15, 2023 was a Saturday.
        let html = page("$40.00", "Sunday, April 15, 2023 at 7:00 PM");
        let (draft, outcome) = extract(&html);
        outcome.expect("weekday is not checked");
        assert_eq!(draft.date.as_deref(), Some("2023-04-15"));
        assert_eq!(draft.time.as_deref(), Some("7:00 PM"));
        assert_eq!(draft.pricing, Some(Pricing::Paid("$40.00".to_string())));
    }

    #[test]
    fn unreadable_date_fails_but_keeps_other_fields() {
        let html = page("Free", "Someday, Smarch 45, 2023 at 7:00 PM");
        let (draft, outcome) = extract(&html);
        assert_eq!(
            outcome,
            Err(StepError::DateParse {
                field: "date",
                input: "Smarch 45, 2023".to_string(),
            })
        );
        assert_eq!(draft.date, None);
        assert_eq!(draft.time.as_deref(), Some("7:00 PM"));
        assert_eq!(draft.event_name.as_deref(), Some("Shaw Festival Gala"));
        assert_eq!(draft.host.as_deref(), Some("Shaw Festival"));
        assert_eq!(draft.pricing, Some(Pricing::Free));
    }

    #[test]
    fn missing_blocks_leave_fields_unset() {
        let (draft, outcome) = extract("<html><body><p>nothing</p></body></html>");
        outcome.expect("extract");
        assert_eq!(draft, EventDraft::new());
    }
}
