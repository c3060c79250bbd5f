/// Synchronous client for the **NOAA Climate Data Online API (v2)** `data`
/// endpoint.
///
/// One call to [`Client::fetch_region`] pulls every page of observations for
/// a single region and date range, converting wire records into tidy
/// [`Observation`]s as they arrive. Pagination is offset-based: the first
/// request uses `offset=1` and each subsequent request advances by the page
/// limit until the API stops returning results.
///
/// ### Notes
/// - Auth is a `token` request header (obtain one at
///   <https://www.ncdc.noaa.gov/cdo-web/token>).
/// - The free tier is rate-limited (~5 requests/second); a fixed 250 ms delay
///   separates successive page requests. Tests override it via
///   [`Client::with_page_delay`].
/// - Fetch failures are region-local, never fatal: a non-success status,
///   a JSON decode failure, or a transport error is logged and ends
///   pagination for that region; whatever was collected so far is returned
///   and the caller moves on to the next region.
///
/// Typical usage:
/// ```no_run
/// # use cdo_weather::{Client, Params, Region};
/// # use chrono::NaiveDate;
/// let client = Client::new("my-cdo-token");
/// let params = Params::daily(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
/// );
/// let obs = client.fetch_region(&params, &Region::new("FIPS:26", "Michigan"));
/// println!("{} observations", obs.len());
/// ```
use crate::config::Params;
use crate::models::{Observation, Page, Region};
use log::{debug, info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Default CDO v2 data endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.ncei.noaa.gov/cdo-web/api/v2/data";

/// Delay between successive page requests, sized for the free-tier rate
/// limit of ~5 requests/second.
const PAGE_DELAY: Duration = Duration::from_millis(250);

// Allow -, _, . unescaped in query values (common in dataset/location ids).
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string()
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    token: String,
    page_delay: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("cdo_weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            token: token.into(),
            page_delay: PAGE_DELAY,
            http,
        }
    }

    /// Point the client at a different endpoint (tests use a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    fn page_url(&self, params: &Params, location_id: &str, offset: u32) -> String {
        format!(
            "{}?datasetid={}&locationid={}&startdate={}&enddate={}&limit={}&units={}&datatypeid={}&offset={}",
            self.base_url,
            enc(&params.dataset),
            enc(location_id),
            params.start.format("%Y-%m-%d"),
            params.end.format("%Y-%m-%d"),
            params.limit,
            params.units.as_query_value(),
            params.datatype_spec(),
            offset
        )
    }

    /// Fetch all observations for one region across however many pages the
    /// API needs. Failures end pagination for this region only; the
    /// observations collected up to that point are returned.
    pub fn fetch_region(&self, params: &Params, region: &Region) -> Vec<Observation> {
        let mut out: Vec<Observation> = Vec::new();
        let mut offset: u32 = 1;
        loop {
            let url = self.page_url(params, &region.id, offset);
            let resp = match self.http.get(&url).header("token", self.token.as_str()).send() {
                Ok(r) => r,
                Err(e) => {
                    warn!("{}: request failed: {}", region.name, e);
                    break;
                }
            };
            let status = resp.status();
            let body = match resp.text() {
                Ok(b) => b,
                Err(e) => {
                    warn!("{}: failed to read response body: {}", region.name, e);
                    break;
                }
            };
            if !status.is_success() {
                warn!(
                    "{}: HTTP {} from {}; response text: {}",
                    region.name, status, self.base_url, body
                );
                break;
            }
            let page: Page = match serde_json::from_str(&body) {
                Ok(p) => p,
                Err(e) => {
                    warn!(
                        "{}: failed to decode JSON ({}); response text: {}",
                        region.name, e, body
                    );
                    break;
                }
            };
            // No more results: normal end of pagination.
            if page.results.is_empty() {
                break;
            }
            debug!(
                "{}: page at offset {} returned {} records",
                region.name,
                offset,
                page.results.len()
            );
            out.extend(
                page.results
                    .into_iter()
                    .filter_map(|r| Observation::from_record(r, &region.name)),
            );
            offset += params.limit;
            std::thread::sleep(self.page_delay);
        }
        info!("{}: collected {} observations", region.name, out.len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params() -> Params {
        Params::daily(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        )
    }

    #[test]
    fn page_url_carries_all_query_params() {
        let client = Client::new("t").with_base_url("http://localhost:9/data");
        let url = client.page_url(&params(), "FIPS:26", 1001);
        assert_eq!(
            url,
            "http://localhost:9/data?datasetid=GHCND&locationid=FIPS%3A26\
             &startdate=2024-01-01&enddate=2024-01-07&limit=1000\
             &units=standard&datatypeid=TMAX,TMIN,PRCP,AWND&offset=1001"
        );
    }
}
