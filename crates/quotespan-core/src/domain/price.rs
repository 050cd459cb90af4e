use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

/// Daily OHLC record as published by the quote service.
///
/// Absent or `null` fields decode to their zero value instead of failing the
/// whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub open: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub high: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub low: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub close: f64,
}

/// One page of the quote service response for a single year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub page: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub per_page: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<PriceRecord>,
}

impl YearResponse {
    /// `false` when the page is declared empty or carries no records.
    pub fn has_data(&self) -> bool {
        self.per_page > 0 && !self.data.is_empty()
    }
}

/// Matched output row: the open and close for one requested day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayQuote {
    pub date: String,
    pub open: f64,
    pub close: f64,
}

impl DayQuote {
    pub fn from_record(record: &PriceRecord) -> Self {
        Self {
            date: record.date.clone(),
            open: record.open,
            close: record.close,
        }
    }
}

impl Display for DayQuote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.date, self.open, self.close)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
