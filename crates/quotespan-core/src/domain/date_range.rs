use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{CalendarDate, RangeError};

/// Inclusive, non-empty range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl DateRange {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse both boundaries; the first malformed boundary is reported.
    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        let start = CalendarDate::parse(start)?;
        let end = CalendarDate::parse(end)?;
        Self::new(start, end)
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Calendar years touched by the range, one fetch unit each.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start.year()..=self.end.year()
    }

    pub fn year_count(&self) -> usize {
        (self.end.year() - self.start.year()) as usize + 1
    }
}

/// Ascending, duplicate-free list of every day in a [`DateRange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSequence {
    dates: Vec<CalendarDate>,
}

impl DateSequence {
    pub fn expand(start: &str, end: &str) -> Result<Self, RangeError> {
        DateRange::parse(start, end).map(|range| Self::from_range(&range))
    }

    pub fn from_range(range: &DateRange) -> Self {
        let mut dates = Vec::new();
        let mut cursor = Some(range.start());
        while let Some(day) = cursor {
            if day > range.end() {
                break;
            }
            dates.push(day);
            cursor = day.next_day();
        }
        Self { dates }
    }

    pub fn first(&self) -> Option<CalendarDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<CalendarDate> {
        self.dates.last().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn as_slice(&self) -> &[CalendarDate] {
        &self.dates
    }

    /// Every date rendered as the quote service's `date` field, in order.
    pub fn service_keys(&self) -> Vec<String> {
        self.dates.iter().copied().map(CalendarDate::service_key).collect()
    }
}
