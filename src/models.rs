use serde::{Deserialize, Serialize};
use std::fmt;

/// The four daily observation types this crate requests and averages.
///
/// Variant order is the fixed column order of the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Daily maximum temperature (`TMAX`).
    Tmax,
    /// Daily minimum temperature (`TMIN`).
    Tmin,
    /// Precipitation (`PRCP`).
    Prcp,
    /// Average wind speed (`AWND`).
    Awnd,
}

impl DataType {
    /// All types, in export column order.
    pub const ALL: [DataType; 4] = [
        DataType::Tmax,
        DataType::Tmin,
        DataType::Prcp,
        DataType::Awnd,
    ];

    /// Upstream datatype id as used in `datatypeid` and in `results` records.
    pub fn id(self) -> &'static str {
        match self {
            DataType::Tmax => "TMAX",
            DataType::Tmin => "TMIN",
            DataType::Prcp => "PRCP",
            DataType::Awnd => "AWND",
        }
    }

    /// Parse an upstream datatype id. Ids outside the four handled types
    /// yield `None`; callers drop such records.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "TMAX" => Some(DataType::Tmax),
            "TMIN" => Some(DataType::Tmin),
            "PRCP" => Some(DataType::Prcp),
            "AWND" => Some(DataType::Awnd),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unit system passed through to the API's `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Units {
    /// Fahrenheit and inches.
    #[default]
    Standard,
    /// Celsius and millimeters.
    Metric,
}

impl Units {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
        }
    }
}

/// A geographic region to fetch: the opaque upstream location id (e.g.
/// `FIPS:26`) plus the display name used in the output (e.g. `Michigan`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Raw record from the API `results` array. Extra fields (`station`,
/// `attributes`) are accepted but unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub datatype: String,
    pub value: f64,
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default)]
    pub attributes: Option<String>,
}

/// Pagination bookkeeping the API returns under `metadata.resultset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    pub offset: u32,
    pub count: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub resultset: ResultSet,
}

/// One page of the data endpoint response. A missing or empty `results`
/// array signals the end of pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub results: Vec<RawRecord>,
}

/// Tidy observation used by the aggregation table: calendar date (string,
/// `YYYY-MM-DD`), region display name, observation type, value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: String,
    pub region: String,
    pub datatype: DataType,
    pub value: f64,
}

impl Observation {
    /// Convert a wire record for the given region. The wire date is a longer
    /// timestamp (`2024-01-01T00:00:00`); the calendar-day prefix is kept by
    /// truncating to the first 10 characters, without validation. Records
    /// with an unhandled datatype id yield `None`.
    pub fn from_record(record: RawRecord, region_name: &str) -> Option<Self> {
        let datatype = DataType::from_id(&record.datatype)?;
        let mut date = record.date;
        if let Some((idx, _)) = date.char_indices().nth(10) {
            date.truncate(idx);
        }
        Some(Self {
            date,
            region: region_name.to_string(),
            datatype,
            value: record.value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datatype_ids_round_trip() {
        for dt in DataType::ALL {
            assert_eq!(DataType::from_id(dt.id()), Some(dt));
        }
        assert_eq!(DataType::from_id("SNOW"), None);
    }

    #[test]
    fn observation_truncates_timestamp_to_date() {
        let rec = RawRecord {
            date: "2024-01-03T00:00:00".into(),
            datatype: "TMAX".into(),
            value: 41.0,
            station: None,
            attributes: None,
        };
        let obs = Observation::from_record(rec, "Michigan").unwrap();
        assert_eq!(obs.date, "2024-01-03");
        assert_eq!(obs.region, "Michigan");
        assert_eq!(obs.datatype, DataType::Tmax);
    }

    #[test]
    fn observation_keeps_short_dates_as_is() {
        let rec = RawRecord {
            date: "2024-01-03".into(),
            datatype: "PRCP".into(),
            value: 0.2,
            station: None,
            attributes: None,
        };
        let obs = Observation::from_record(rec, "Arizona").unwrap();
        assert_eq!(obs.date, "2024-01-03");
    }

    #[test]
    fn unknown_datatype_is_dropped() {
        let rec = RawRecord {
            date: "2024-01-03".into(),
            datatype: "SNWD".into(),
            value: 3.0,
            station: None,
            attributes: None,
        };
        assert!(Observation::from_record(rec, "Michigan").is_none());
    }
}
