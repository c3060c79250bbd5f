use crate::models::{DataType, Observation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of one output row: a calendar date and a region display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub date: String,
    pub region: String,
}

/// In-memory accumulator for raw per-station values, keyed by
/// (date, region) and then by observation type. Both levels are created
/// lazily on first insertion. Values are never deduplicated: if upstream
/// repeats a record, it counts toward the mean again.
#[derive(Debug, Clone, Default)]
pub struct AggregationTable {
    cells: BTreeMap<CellKey, BTreeMap<DataType, Vec<f64>>>,
}

/// One averaged export row. Means are `None` when no values were collected
/// for that observation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub date: String,
    pub region: String,
    pub tmax_avg: Option<f64>,
    pub tmin_avg: Option<f64>,
    pub prcp_avg: Option<f64>,
    pub awnd_avg: Option<f64>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().copied().sum::<f64>() / values.len() as f64)
    }
}

impl AggregationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the observation's value under its (date, region, type) path.
    pub fn insert(&mut self, obs: Observation) {
        self.cells
            .entry(CellKey {
                date: obs.date,
                region: obs.region,
            })
            .or_default()
            .entry(obs.datatype)
            .or_default()
            .push(obs.value);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of (date, region) cells, i.e. export rows.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Raw values collected for one cell and type, if any.
    pub fn values(&self, date: &str, region: &str, datatype: DataType) -> Option<&[f64]> {
        self.cells
            .get(&CellKey {
                date: date.into(),
                region: region.into(),
            })
            .and_then(|types| types.get(&datatype))
            .map(Vec::as_slice)
    }

    /// Averaged rows in date-major, region-minor order.
    pub fn rows(&self) -> Vec<OutputRow> {
        self.cells
            .iter()
            .map(|(key, types)| {
                let avg = |dt: DataType| types.get(&dt).and_then(|v| mean(v));
                OutputRow {
                    date: key.date.clone(),
                    region: key.region.clone(),
                    tmax_avg: avg(DataType::Tmax),
                    tmin_avg: avg(DataType::Tmin),
                    prcp_avg: avg(DataType::Prcp),
                    awnd_avg: avg(DataType::Awnd),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: &str, region: &str, datatype: DataType, value: f64) -> Observation {
        Observation {
            date: date.into(),
            region: region.into(),
            datatype,
            value,
        }
    }

    #[test]
    fn insert_auto_creates_both_levels() {
        let mut table = AggregationTable::new();
        assert!(table.is_empty());
        table.insert(obs("2024-01-01", "Michigan", DataType::Tmax, 30.0));
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.values("2024-01-01", "Michigan", DataType::Tmax),
            Some(&[30.0][..])
        );
        assert_eq!(table.values("2024-01-01", "Michigan", DataType::Prcp), None);
    }

    #[test]
    fn rows_average_exactly_the_inserted_values() {
        let mut table = AggregationTable::new();
        for v in [28.0, 30.0, 35.0] {
            table.insert(obs("2024-01-01", "Michigan", DataType::Tmax, v));
        }
        table.insert(obs("2024-01-01", "Michigan", DataType::Prcp, 0.4));
        let rows = table.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tmax_avg, Some(31.0));
        assert_eq!(rows[0].prcp_avg, Some(0.4));
        assert_eq!(rows[0].tmin_avg, None);
        assert_eq!(rows[0].awnd_avg, None);
    }

    #[test]
    fn mean_is_insertion_order_independent() {
        let values = [3.5, -1.0, 12.25, 0.0];
        let mut forward = AggregationTable::new();
        let mut reverse = AggregationTable::new();
        for v in values {
            forward.insert(obs("2024-01-02", "Arizona", DataType::Tmin, v));
        }
        for v in values.iter().rev() {
            reverse.insert(obs("2024-01-02", "Arizona", DataType::Tmin, *v));
        }
        assert_eq!(forward.rows(), reverse.rows());
    }

    #[test]
    fn duplicates_increase_the_divisor() {
        let mut table = AggregationTable::new();
        table.insert(obs("2024-01-01", "Michigan", DataType::Awnd, 10.0));
        table.insert(obs("2024-01-01", "Michigan", DataType::Awnd, 10.0));
        table.insert(obs("2024-01-01", "Michigan", DataType::Awnd, 4.0));
        // (10 + 10 + 4) / 3, not (10 + 4) / 2.
        assert_eq!(table.rows()[0].awnd_avg, Some(8.0));
    }

    #[test]
    fn rows_sort_by_date_then_region() {
        let mut table = AggregationTable::new();
        table.insert(obs("2024-01-02", "Arizona", DataType::Tmax, 60.0));
        table.insert(obs("2024-01-01", "Michigan", DataType::Tmax, 30.0));
        table.insert(obs("2024-01-01", "Arizona", DataType::Tmax, 55.0));
        let rows = table.rows();
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.date.as_str(), r.region.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2024-01-01", "Arizona"),
                ("2024-01-01", "Michigan"),
                ("2024-01-02", "Arizona"),
            ]
        );
    }
}
