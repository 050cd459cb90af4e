use std::collections::HashMap;

use crate::{DateSequence, DayQuote, PriceRecord, YearResponse};

/// Lookup from service-formatted date to the record for that day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateToRecordIndex {
    records: HashMap<String, PriceRecord>,
}

impl DateToRecordIndex {
    /// Index every record of `response`. A page declaring `per_page <= 0` is
    /// treated as empty. Later duplicates of a date replace earlier ones.
    pub fn from_response(response: &YearResponse) -> Self {
        if response.per_page <= 0 {
            return Self::default();
        }

        let records = response
            .data
            .iter()
            .map(|record| (record.date.clone(), record.clone()))
            .collect();
        Self { records }
    }

    pub fn get(&self, date: &str) -> Option<&PriceRecord> {
        self.records.get(date)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Join `dates` against one year's records, preserving the sequence order.
///
/// The whole sequence is scanned; dates from other years simply miss the index.
pub fn match_days(response: &YearResponse, dates: &DateSequence) -> Vec<DayQuote> {
    let index = DateToRecordIndex::from_response(response);
    if index.is_empty() {
        return Vec::new();
    }

    dates
        .iter()
        .filter_map(|date| index.get(&date.service_key()))
        .map(DayQuote::from_record)
        .collect()
}

/// Same join as [`match_days`] over keys already rendered with
/// [`CalendarDate::service_key`](crate::CalendarDate::service_key).
pub fn match_service_keys(response: &YearResponse, keys: &[String]) -> Vec<DayQuote> {
    let index = DateToRecordIndex::from_response(response);
    if index.is_empty() {
        return Vec::new();
    }

    keys.iter()
        .filter_map(|key| index.get(key))
        .map(DayQuote::from_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, open: f64, close: f64) -> PriceRecord {
        PriceRecord {
            date: date.to_owned(),
            open,
            high: open.max(close),
            low: open.min(close),
            close,
        }
    }

    fn response(per_page: i64, data: Vec<PriceRecord>) -> YearResponse {
        YearResponse {
            page: 1,
            per_page,
            total: data.len() as i64,
            total_pages: 1,
            data,
        }
    }

    #[test]
    fn emits_matches_in_sequence_order() {
        let dates = DateSequence::expand("1-January-2000", "11-January-2000").expect("valid");
        let year = response(
            500,
            vec![
                record("5-January-2000", 110.0, 108.0),
                record("1-January-2000", 100.0, 105.0),
                record("20-January-2000", 1.0, 2.0),
            ],
        );

        let rows: Vec<String> = match_days(&year, &dates).iter().map(ToString::to_string).collect();
        assert_eq!(rows, vec!["1-January-2000 100 105", "5-January-2000 110 108"]);
    }

    #[test]
    fn zero_per_page_yields_nothing() {
        let dates = DateSequence::expand("1-January-2000", "3-January-2000").expect("valid");
        let year = response(0, vec![record("1-January-2000", 1.0, 2.0)]);

        assert!(DateToRecordIndex::from_response(&year).is_empty());
        assert!(match_days(&year, &dates).is_empty());
    }

    #[test]
    fn duplicate_dates_keep_the_last_record() {
        let dates = DateSequence::expand("2-January-2000", "2-January-2000").expect("valid");
        let year = response(
            500,
            vec![
                record("2-January-2000", 1.0, 1.0),
                record("2-January-2000", 9.0, 9.5),
            ],
        );

        let rows = match_days(&year, &dates);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].open, 9.0);
        assert_eq!(rows[0].close, 9.5);
    }

    #[test]
    fn join_follows_the_index_across_a_multi_year_sequence() {
        let dates = DateSequence::expand("28-December-1999", "2-January-2000").expect("valid");
        let year_1999 = response(
            500,
            vec![
                record("30-December-1999", 3.0, 4.0),
                record("28-December-1999", 1.0, 2.0),
                record("1-January-2000", 99.0, 99.0),
            ],
        );

        let rows = match_days(&year_1999, &dates);
        let dates: Vec<&str> = rows.iter().map(|row| row.date.as_str()).collect();
        assert_eq!(dates, vec!["28-December-1999", "30-December-1999", "1-January-2000"]);
    }
}
