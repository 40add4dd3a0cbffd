use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::models::EventRecord;
use crate::errors::AggregationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_event_date(value: &str, source_name: &str) -> Result<NaiveDate, AggregationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| AggregationError::InvalidDate {
        value: value.to_string(),
        source_name: source_name.to_string(),
    })
}

/// Collection of events indexed by date, iterated in ascending date order
#[derive(Debug, Clone, Default)]
pub struct EventCollection {
    events: BTreeMap<NaiveDate, EventRecord>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self {
            events: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, event: EventRecord) -> Result<(), AggregationError> {
        let date = parse_event_date(&event.date, &event.name)?;
        if self.events.contains_key(&date) {
            return Err(AggregationError::DuplicateEventDate(event.date));
        }
        self.events.insert(date, event);
        Ok(())
    }

    pub fn from_events(events: Vec<EventRecord>) -> Result<Self, AggregationError> {
        let mut collection = Self::new();
        for event in events {
            collection.add(event)?;
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in strictly ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &EventRecord)> {
        self.events.iter().map(|(date, event)| (*date, event))
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.events.keys().copied().collect()
    }
}
