use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::{DailySeries, DailyVolume, Record};

/// Group records by calendar date into a date-ordered series.
///
/// `BTreeMap` keys give the ascending, de-duplicated date order for free;
/// texts are appended in the order the records arrive.
pub fn aggregate_daily(records: &[Record]) -> DailySeries {
    let mut by_date: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for rec in records {
        by_date.entry(rec.date).or_default().push(rec.text.clone());
    }

    let days = by_date
        .into_iter()
        .map(|(date, texts)| DailyVolume {
            date,
            volume: texts.len(),
            texts,
        })
        .collect();

    DailySeries { days }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn groups_same_day_records() {
        let records = vec![
            Record::new(date(2024, 1, 1), "a"),
            Record::new(date(2024, 1, 1), "b"),
            Record::new(date(2024, 1, 2), "c"),
        ];
        let series = aggregate_daily(&records);

        assert_eq!(series.len(), 2);
        let first = series.get(0).unwrap();
        assert_eq!(first.date, date(2024, 1, 1));
        assert_eq!(first.volume, 2);
        assert_eq!(first.texts, vec!["a".to_string(), "b".to_string()]);
        let second = series.get(1).unwrap();
        assert_eq!(second.date, date(2024, 1, 2));
        assert_eq!(second.volume, 1);
    }

    #[test]
    fn unsorted_input_comes_out_strictly_increasing() {
        let records = vec![
            Record::new(date(2024, 2, 10), "x"),
            Record::new(date(2023, 12, 31), "y"),
            Record::new(date(2024, 2, 10), "z"),
            Record::new(date(2024, 1, 15), "w"),
        ];
        let series = aggregate_daily(&records);

        assert!(series.days().windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(series.total_volume(), records.len());
        assert!(series.days().iter().all(|d| d.volume == d.texts.len()));
    }

    #[test]
    fn empty_input_gives_empty_series() {
        assert!(aggregate_daily(&[]).is_empty());
    }
}
