pub mod base;
pub mod eventbrite;
pub mod facebook;
pub mod generic;
pub mod notl;

use scraper::Html;
use tracing::{info, warn};
use url::Url;

use crate::error::StepError;
use crate::models::{EventDraft, EventRecord};
use crate::normalize;
use crate::utils;

/// Structured extraction for one known site family.
pub trait FamilyExtractor: Send + Sync {
    fn family_id(&self) -> &'static str;
    /// Substring of the page host that selects this family.
    fn host_marker(&self) -> &'static str;
    /// Runs every step against `draft`. A step that fails does not stop the
    /// others; the first failure is returned once all steps have run.
    fn extract(&self, document: &Html, draft: &mut EventDraft) -> Result<(), StepError>;
}

/// Which extractor produced a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Family(&'static str),
    Generic,
    /// The family pass had a failing step; generic filled the gaps it left.
    Fallback {
        family: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub record: EventRecord,
    pub strategy: Strategy,
}

/// Checked in order; the first marker contained in the host wins.
fn active_families() -> Vec<Box<dyn FamilyExtractor>> {
    vec![
        Box::new(facebook::Facebook),
        Box::new(eventbrite::Eventbrite),
        Box::new(notl::NotlOfficial),
    ]
}

pub fn find_family(host: &str) -> Option<Box<dyn FamilyExtractor>> {
    let host = host.to_lowercase();
    active_families()
        .into_iter()
        .find(|family| host.contains(family.host_marker()))
}

/// Runs the extractor chosen for the page host and normalizes the result.
/// When a family step fails, the fields the family did find are kept and the
/// generic pass fills the ones still unset.
pub fn extract_event(page_url: &Url, document: &Html) -> Extraction {
    let host = utils::host_of(page_url);
    let mut draft = EventDraft::new();
    let strategy = match find_family(&host) {
        Some(family) => match family.extract(document, &mut draft) {
            Ok(()) => Strategy::Family(family.family_id()),
            Err(err) => {
                warn!(
                    family = family.family_id(),
                    url = %page_url,
                    error = %err,
                    "family step failed; filling remaining fields with generic"
                );
                generic::fill(document, &mut draft);
                Strategy::Fallback {
                    family: family.family_id(),
                    reason: err.to_string(),
                }
            }
        },
        None => {
            generic::fill(document, &mut draft);
            Strategy::Generic
        }
    };
    info!(url = %page_url, strategy = ?strategy, "extracted event");

    Extraction {
        record: normalize::normalize(draft, page_url),
        strategy,
    }
}

pub fn extract_html(page_url: &Url, html: &str) -> Extraction {
    let document = Html::parse_document(html);
    extract_event(page_url, &document)
}
