use anyhow::Result;
use cdo_weather::{AggregationTable, Client, Params, Region, Units, export};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cdo-weather",
    version,
    about = "Fetch NOAA Climate Data Online observations & export daily regional averages"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch observations for the given regions and write the averages CSV.
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum UnitsArg {
    /// Fahrenheit and inches
    Standard,
    /// Celsius and millimeters
    Metric,
}

impl From<UnitsArg> for Units {
    fn from(u: UnitsArg) -> Self {
        match u {
            UnitsArg::Standard => Units::Standard,
            UnitsArg::Metric => Units::Metric,
        }
    }
}

#[derive(Args, Debug)]
struct GetArgs {
    /// CDO API token (https://www.ncdc.noaa.gov/cdo-web/token)
    #[arg(short, long)]
    token: String,
    /// Regions as ID=Name pairs separated by comma or semicolon
    /// (e.g., FIPS:26=Michigan,FIPS:04=Arizona)
    #[arg(short, long)]
    regions: String,
    /// Dataset id (GHCND = daily summaries)
    #[arg(long, default_value = "GHCND")]
    dataset: String,
    /// Start of the date range (YYYY-MM-DD)
    #[arg(long)]
    start: String,
    /// End of the date range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: String,
    /// Max records per request
    #[arg(long, default_value_t = 1000)]
    limit: u32,
    /// Unit system for returned values
    #[arg(long, value_enum, default_value = "standard")]
    units: UnitsArg,
    /// Output CSV path (overwritten if it exists)
    #[arg(long, default_value = "noaa_weather_data.csv")]
    out: PathBuf,
    /// API endpoint
    #[arg(long, default_value = cdo_weather::api::DEFAULT_BASE_URL)]
    base_url: String,
}

fn parse_regions(s: &str) -> Result<Vec<Region>> {
    let mut regions = Vec::new();
    for part in s.split([',', ';']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (id, name) = part.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("invalid region '{}', expected ID=Name (e.g., FIPS:26=Michigan)", part)
        })?;
        regions.push(Region::new(id.trim(), name.trim()));
    }
    if regions.is_empty() {
        anyhow::bail!("at least one region required");
    }
    Ok(regions)
}

fn parse_date(label: &str, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid --{} '{}': {}", label, s, e))
}

fn main() -> Result<()> {
    // Fetch failures are reported via warn!; they must reach the console even
    // when RUST_LOG is unset.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let regions = parse_regions(&args.regions)?;
    let start = parse_date("start", &args.start)?;
    let end = parse_date("end", &args.end)?;
    if end < start {
        anyhow::bail!("--end must not precede --start");
    }

    let mut params = Params::daily(start, end);
    params.dataset = args.dataset;
    params.limit = args.limit;
    params.units = args.units.into();

    let client = Client::new(args.token).with_base_url(args.base_url);
    let mut table = AggregationTable::new();
    for region in &regions {
        for obs in client.fetch_region(&params, region) {
            table.insert(obs);
        }
    }

    export::save_csv(&table, &args.out)?;
    println!("Data saved to '{}'", args.out.display());
    Ok(())
}
