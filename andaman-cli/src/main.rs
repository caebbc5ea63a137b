mod reports;
mod selection;
mod source;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Duration;

use andaman_planner::{FerryClass, PlannerPolicy, PlannerSession, load_reference_data};
use reports::PlanReport;
use selection::{HotelChoice, SelectionArgs};
use source::FileDataSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Coloured terminal summary
    Console,
    /// Machine-readable plan and cost breakdown
    Json,
    /// Markdown document
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "andaman-planner", version)]
#[command(about = "Plan an Andaman island-hopping trip and estimate what it costs")]
struct Args {
    /// Directory holding locations.json, activities.json, location_adventures.json, ferries.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Locations to visit (comma-separated ids)
    #[arg(long)]
    locations: Option<String>,

    /// Add-on activities (comma-separated ids)
    #[arg(long)]
    activities: Option<String>,

    /// Hotel per island, e.g. `--hotel Havelock=hl_h2` (repeatable)
    #[arg(long = "hotel", value_name = "ISLAND=HOTEL")]
    hotels: Vec<HotelChoice>,

    /// Rent a scooter on this island (repeatable)
    #[arg(long = "scooter", value_name = "ISLAND")]
    scooters: Vec<String>,

    /// Rent a bicycle on this island (repeatable)
    #[arg(long = "bicycle", value_name = "ISLAND")]
    bicycles: Vec<String>,

    /// Ferry seating class
    #[arg(long, value_parser = parse_ferry_class)]
    ferry_class: Option<FerryClass>,

    /// Cab model id for cab days
    #[arg(long)]
    cab: Option<String>,

    #[arg(long)]
    adults: Option<u32>,

    #[arg(long)]
    infants: Option<u32>,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Do not force Port Blair to be the first island
    #[arg(long)]
    no_start_home: bool,

    /// JSON file overriding planner heuristics and fares
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Per-dataset load timeout in milliseconds
    #[arg(long, default_value_t = 5_000)]
    timeout_ms: u64,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List selectable locations and exit
    #[arg(long)]
    list_locations: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_ferry_class(raw: &str) -> Result<FerryClass, String> {
    raw.parse().map_err(|err: andaman_planner::ParseLabelError| err.to_string())
}

impl Args {
    fn selection_args(&self) -> SelectionArgs {
        SelectionArgs {
            locations: self.locations.clone(),
            activities: self.activities.clone(),
            hotels: self.hotels.clone(),
            scooters: self.scooters.clone(),
            bicycles: self.bicycles.clone(),
            ferry_class: self.ferry_class,
            cab: self.cab.clone(),
            adults: self.adults,
            infants: self.infants,
            start_date: self.start_date,
            no_start_home: self.no_start_home,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let policy = load_policy(args.policy.as_ref())?;
    let source = FileDataSource::new(&args.data_dir);
    log::debug!("loading reference data from {}", source.dir().display());

    let mut session = PlannerSession::new(andaman_planner::ReferenceData::empty(), policy);
    let ticket = session.begin_load();
    let reference =
        load_reference_data(&source, Duration::from_millis(args.timeout_ms)).await;
    session.finish_load(ticket, reference);

    let mut output_target = OutputTarget::new(args.output.clone())?;
    if args.list_locations {
        reports::write_location_list(&mut output_target, session.reference())?;
        output_target.flush_inner()?;
        return Ok(());
    }

    let selection = args.selection_args().to_selection();
    for id in &selection.location_ids {
        if session.reference().location(id).is_none() {
            eprintln!("⚠️  Unknown location: {}", id.yellow());
        }
    }
    for id in &selection.activity_ids {
        if session.reference().activity(id).is_none() {
            eprintln!("⚠️  Unknown activity: {}", id.yellow());
        }
    }
    session.apply_selection(selection);

    let itinerary = session.dated_itinerary();
    let costs = session.cost();
    let report = PlanReport {
        selection: session.selection(),
        itinerary: &itinerary,
        costs: &costs,
    };
    match args.report {
        ReportFormat::Console => reports::generate_console_report(&mut output_target, &report)?,
        ReportFormat::Json => reports::generate_json_report(&mut output_target, &report)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, &report)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_policy(path: Option<&PathBuf>) -> Result<PlannerPolicy> {
    let Some(path) = path else {
        return Ok(PlannerPolicy::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read policy {}", path.display()))?;
    PlannerPolicy::from_json(&raw).with_context(|| format!("invalid policy {}", path.display()))
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_repeatable_flags() {
        let args = Args::try_parse_from([
            "andaman-planner",
            "--locations",
            "a,b",
            "--hotel",
            "Havelock=hl_h1",
            "--hotel",
            "neil=nl_h2",
            "--scooter",
            "Neil",
            "--ferry-class",
            "luxury",
            "--start-date",
            "2026-12-20",
            "--report",
            "markdown",
        ])
        .unwrap();
        assert_eq!(args.hotels.len(), 2);
        assert_eq!(args.ferry_class, Some(FerryClass::Luxury));
        assert_eq!(args.report, ReportFormat::Markdown);
        assert_eq!(args.start_date, NaiveDate::from_ymd_opt(2026, 12, 20));
        let selection = args.selection_args().to_selection();
        assert_eq!(selection.location_ids, ["a", "b"]);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Args::try_parse_from(["andaman-planner", "--hotel", "nope"]).is_err());
        assert!(Args::try_parse_from(["andaman-planner", "--ferry-class", "steerage"]).is_err());
        assert!(Args::try_parse_from(["andaman-planner", "--report", "csv"]).is_err());
    }

    #[test]
    fn missing_policy_file_is_an_error() {
        assert!(load_policy(None).is_ok());
        let missing = PathBuf::from("/definitely/not/here.json");
        assert!(load_policy(Some(&missing)).is_err());
    }
}
