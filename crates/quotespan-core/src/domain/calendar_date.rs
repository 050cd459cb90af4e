use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::RangeError;

/// Wire format shared by range boundaries and the quote service, e.g. `1-January-2000`.
const SERVICE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day padding:none]-[month repr:long]-[year]");

/// Naive calendar date rendered in the quote service's `d-Month-yyyy` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    pub fn parse(input: &str) -> Result<Self, RangeError> {
        Date::parse(input.trim(), SERVICE_FORMAT)
            .map(Self)
            .map_err(|_| RangeError::DateParse {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    /// The following calendar day, `None` past the last representable date.
    pub fn next_day(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// Key used by the quote service for this day.
    pub fn service_key(self) -> String {
        format!("{}-{}-{:04}", self.0.day(), self.0.month(), self.0.year())
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.service_key())
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.service_key())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
