use anyhow::{Context, Result};
use chrono::{Duration, Local, Utc};
use clap::{ArgAction, Parser};
use log::{debug, info, warn, LevelFilter};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use zeitfenster::time::{parse_duration, DEFAULT_SLOT_MINUTES};
use zeitfenster::{CategoryTable, PollExport, Report, SearchOptions, SlotLength, WindowFinder};

/// To make an availability data file, open the when2meet page and run
/// `[PeopleNames,PeopleIDs,TimeOfSlot,AvailableAtSlot]` in the browser console,
/// then copy the resulting array into a text file.
#[derive(Parser)]
#[command(name = "zeitfenster", version)]
#[command(about = "Find the times in a when2meet poll when enough people can meet")]
struct Cli {
    /// Availability data file
    datafile: PathBuf,

    /// Minimum window length, H:MM
    #[arg(value_parser = parse_duration)]
    mintime: Duration,

    /// Minimum available people count (default: everyone). An explicit 0 means no minimum
    #[arg(short, long)]
    people: Option<usize>,

    /// People categorization file, one `<name><TAB><category>` per line
    #[arg(short, long)]
    categories: Option<PathBuf>,

    /// Output file name (default: standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Length of one poll slot in minutes
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SLOT_MINUTES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    slot_minutes: u32,

    /// Show times in UTC instead of the local time zone
    #[arg(long)]
    utc: bool,

    /// More logging on stderr, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let export = File::open(&cli.datafile)
        .map(BufReader::new)
        .with_context(|| format!("Failed to open {}", cli.datafile.display()))?;
    let export = PollExport::from_reader(export)
        .with_context(|| format!("Failed to read {}", cli.datafile.display()))?;

    let categories = match &cli.categories {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            CategoryTable::parse(&contents)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => CategoryTable::default(),
    };

    let people = export.people(&categories);

    let slot_length = SlotLength::from_minutes(cli.slot_minutes)
        .context("Slot length must be at least one minute")?;
    let slots = export.slots(slot_length)?;

    let gaps = slots.gaps();
    if !gaps.is_empty() {
        warn!("{} gaps between slots, windows will not span them", gaps.len());
        for (before, after) in gaps {
            debug!("gap of {}s after {}", after - before, before);
        }
    }

    let options = SearchOptions::new(cli.mintime, cli.people.unwrap_or(people.len()));
    info!(
        "{} people, {} slots, looking for {} people for {} minutes",
        people.len(),
        slots.len(),
        options.min_people,
        options.min_duration.num_minutes()
    );

    let search = WindowFinder::new(&slots, options).search(&people);
    info!("found {} windows", search.windows.len());

    let report = if cli.utc {
        Report::new(&search, &people, &Utc)?
    } else {
        Report::new(&search, &people, &Local)?
    };

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_report(&report, BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))
        }
        None => write_report(&report, io::stdout().lock()),
    }
}

fn write_report<W: Write>(report: &Report, mut writer: W) -> Result<()> {
    report.write_csv(&mut writer)?;
    Ok(())
}
