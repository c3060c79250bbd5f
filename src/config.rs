use crate::models::{DataType, Units};
use chrono::NaiveDate;

/// Run configuration for a fetch: which dataset, which date range, and how
/// pages are requested. Regions and the API token travel separately (regions
/// belong to the run's region list, the token to the [`crate::Client`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Dataset id, e.g. `GHCND` (daily summaries).
    pub dataset: String,
    /// Inclusive start of the date range.
    pub start: NaiveDate,
    /// Inclusive end of the date range.
    pub end: NaiveDate,
    /// Max records per request.
    pub limit: u32,
    pub units: Units,
    /// Observation types to request, comma-joined into `datatypeid`.
    pub datatypes: Vec<DataType>,
}

impl Params {
    /// Daily-summaries defaults: `GHCND`, 1000 records per page, standard
    /// units, all four observation types.
    pub fn daily(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            dataset: "GHCND".into(),
            start,
            end,
            limit: 1000,
            units: Units::Standard,
            datatypes: DataType::ALL.to_vec(),
        }
    }

    pub fn datatype_spec(&self) -> String {
        self.datatypes
            .iter()
            .map(|dt| dt.id())
            .collect::<Vec<_>>()
            .join(",")
    }
}
