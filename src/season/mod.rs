use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::errors::AggregationError;

const MONTHS_PER_SEASON: i32 = 6;

/// 1-based half-year season number, displayed as "sNN"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeasonId(pub u32);

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{:02}", self.0)
    }
}

impl Serialize for SeasonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The Jan 1 or Jul 1 boundary at or before `first_event`
pub fn season_anchor(first_event: NaiveDate) -> NaiveDate {
    let month = if first_event.month() <= 6 { 1 } else { 7 };
    NaiveDate::from_ymd_opt(first_event.year(), month, 1).unwrap_or(first_event)
}

/// Season containing `date`, counting half-year buckets from `anchor`.
/// Dates before the anchor fall into the first season.
pub fn season(date: NaiveDate, anchor: NaiveDate) -> SeasonId {
    let months = (date.year() - anchor.year()) * 12 + date.month0() as i32 - anchor.month0() as i32;
    let buckets = months.max(0) / MONTHS_PER_SEASON;
    SeasonId(buckets as u32 + 1)
}

/// Every season that holds at least one event, ascending
pub fn all_seasons(dates: &[NaiveDate]) -> Vec<SeasonId> {
    let Some(anchor) = dates.iter().min().copied().map(season_anchor) else {
        return Vec::new();
    };

    let mut seasons: Vec<SeasonId> = dates.iter().map(|&date| season(date, anchor)).collect();
    seasons.sort_unstable();
    seasons.dedup();
    seasons
}

/// Season of the most recent event
pub fn current_season(dates: &[NaiveDate]) -> Result<SeasonId, AggregationError> {
    let first = dates.iter().min().copied().ok_or(AggregationError::NoEvents)?;
    let last = dates.iter().max().copied().ok_or(AggregationError::NoEvents)?;
    Ok(season(last, season_anchor(first)))
}

/// Season lookup fixed to one dataset's anchor
#[derive(Debug, Clone)]
pub struct SeasonCalendar {
    anchor: NaiveDate,
    seasons: Vec<SeasonId>,
    current: SeasonId,
}

impl SeasonCalendar {
    pub fn from_dates(dates: &[NaiveDate]) -> Result<Self, AggregationError> {
        let first = dates.iter().min().copied().ok_or(AggregationError::NoEvents)?;
        Ok(Self {
            anchor: season_anchor(first),
            seasons: all_seasons(dates),
            current: current_season(dates)?,
        })
    }

    pub fn season_of(&self, date: NaiveDate) -> SeasonId {
        season(date, self.anchor)
    }

    pub fn seasons(&self) -> &[SeasonId] {
        &self.seasons
    }

    pub fn current(&self) -> SeasonId {
        self.current
    }
}
