// Shared test data: the reference truck/train fleet
use super::fleet::PositionRecord;
use chrono::{NaiveDate, NaiveDateTime};

pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn reference_records() -> Vec<PositionRecord> {
    vec![
        PositionRecord::new("Camión 1", 21.8823, -102.2826, at(8, 0), 100.0),
        PositionRecord::new("Camión 1", 21.8850, -102.2700, at(8, 30), 120.0),
        PositionRecord::new("Camión 1", 21.8900, -102.2600, at(9, 0), 110.0),
        PositionRecord::new("Tren 1", 21.8700, -102.3000, at(8, 15), 90.0),
        PositionRecord::new("Tren 1", 21.8750, -102.2850, at(8, 45), 130.0),
        PositionRecord::new("Tren 1", 21.8800, -102.2700, at(9, 15), 95.0),
    ]
}
