use crate::aggregate::AggregationTable;
use anyhow::Result;
use csv::WriterBuilder;
use std::path::Path;

/// Column headers of the exported CSV, in order.
pub const HEADERS: [&str; 6] = ["Date", "State", "TMAX_AVG", "TMIN_AVG", "PRCP_AVG", "AWND_AVG"];

/// Write the averaged rows as CSV with header, one row per (date, region).
/// Absent means become empty cells. An existing file at `path` is replaced.
pub fn save_csv<P: AsRef<Path>>(table: &AggregationTable, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(HEADERS)?;
    for row in table.rows() {
        wtr.serialize((
            &row.date,
            &row.region,
            row.tmax_avg,
            row.tmin_avg,
            row.prcp_avg,
            row.awnd_avg,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}
