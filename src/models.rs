use serde::{Deserialize, Serialize};

/// The normalized event produced by a single scrape run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub host: String,
    pub is_free: bool,
    pub price: Option<String>,
    pub image_url: Option<String>,
}

/// Price and free flag travel together so they can never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pricing {
    Free,
    Paid(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    EventName,
    Date,
    Time,
    Location,
    Description,
    Host,
    ImageUrl,
}

/// A partially extracted event. Every slot accepts exactly one value: the
/// first non-empty proposal wins and later ones are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub event_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub host: Option<String>,
    pub pricing: Option<Pricing>,
    pub image_url: Option<String>,
}

impl EventDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the value was accepted.
    pub fn propose(&mut self, field: Field, value: impl Into<String>) -> bool {
        let slot = self.slot_mut(field);
        if slot.is_some() {
            return false;
        }
        let value = value.into();
        if value.trim().is_empty() {
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn propose_opt(&mut self, field: Field, value: Option<String>) -> bool {
        match value {
            Some(value) => self.propose(field, value),
            None => false,
        }
    }

    pub fn propose_pricing(&mut self, pricing: Pricing) -> bool {
        if self.pricing.is_some() {
            return false;
        }
        self.pricing = Some(pricing);
        true
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.slot(field).is_some()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::EventName => &self.event_name,
            Field::Date => &self.date,
            Field::Time => &self.time,
            Field::Location => &self.location,
            Field::Description => &self.description,
            Field::Host => &self.host,
            Field::ImageUrl => &self.image_url,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::EventName => &mut self.event_name,
            Field::Date => &mut self.date,
            Field::Time => &mut self.time,
            Field::Location => &mut self.location,
            Field::Description => &mut self.description,
            Field::Host => &mut self.host,
            Field::ImageUrl => &mut self.image_url,
        }
    }
}

impl From<EventRecord> for EventDraft {
    fn from(record: EventRecord) -> Self {
        let pricing = match (record.is_free, record.price) {
            (false, Some(price)) => Some(Pricing::Paid(price)),
            _ => Some(Pricing::Free),
        };
        Self {
            event_name: Some(record.event_name),
            date: Some(record.date),
            time: Some(record.time),
            location: Some(record.location),
            description: Some(record.description),
            host: Some(record.host),
            pricing,
            image_url: record.image_url,
        }
    }
}
