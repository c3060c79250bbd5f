//! cdo-weather
//!
//! A lightweight Rust library for pulling daily weather observations from the
//! NOAA Climate Data Online (CDO) API, averaging them per region and day, and
//! exporting the result as CSV. Pairs with the `cdo-weather` CLI.
//!
//! ### Features
//! - Paginated, rate-limit-friendly fetch of TMAX/TMIN/PRCP/AWND records for
//!   one or more regions and a date range
//! - In-memory aggregation into one averaged row per (date, region)
//! - CSV export with absent cells for missing observation types
//!
//! ### Example
//! ```no_run
//! use cdo_weather::{AggregationTable, Client, Params, Region};
//! use chrono::NaiveDate;
//!
//! let client = Client::new("my-cdo-token");
//! let params = Params::daily(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
//! );
//! let regions = [
//!     Region::new("FIPS:26", "Michigan"),
//!     Region::new("FIPS:04", "Arizona"),
//! ];
//! let mut table = AggregationTable::new();
//! for region in &regions {
//!     for obs in client.fetch_region(&params, region) {
//!         table.insert(obs);
//!     }
//! }
//! cdo_weather::export::save_csv(&table, "noaa_weather_data.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod export;
pub mod models;

pub use aggregate::{AggregationTable, OutputRow};
pub use api::Client;
pub use config::Params;
pub use models::{DataType, Observation, Region, Units};
