use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use bus_stats::analysis::{self, AnalysisConfig, filter, latest_arrival};
use bus_stats::domain::{Line, StopId};
use bus_stats::ingest::{self, ObservationStore};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let [_, batch, stop, target, other] = args.as_slice() else {
        eprintln!("usage: bus-stats <batch.json> <stop-id> <target-line> <other-line>");
        eprintln!();
        eprintln!("Reads a JSON batch of scraped observations, collapses them to one");
        eprintln!("arrival per (line, day) at the stop, and reports how often the");
        eprintln!("target line arrives before the other one.");
        return ExitCode::from(2);
    };

    match run(batch, stop, target, other) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(batch: &str, stop: &str, target: &str, other: &str) -> Result<(), Box<dyn Error>> {
    let stop_id = StopId::new(stop.parse()?)?;
    let target_line = Line::parse(target)?;
    let other_line = Line::parse(other)?;

    let mut store = ObservationStore::new();
    let saved = store.insert_batch(ingest::load_batch(Path::new(batch))?);
    println!("Loaded {} observations ({saved} new)", store.len());

    let config = AnalysisConfig::default();
    let events = store.arrival_events();

    let target_arrivals = analysis::cluster(
        &filter::for_group(&events, &target_line, stop_id),
        config.epsilon_minutes,
        latest_arrival,
    )?;
    let other_arrivals = analysis::cluster(
        &filter::for_group(&events, &other_line, stop_id),
        config.epsilon_minutes,
        latest_arrival,
    )?;
    println!(
        "Stop {stop_id}: {} arrivals for line {target_line}, {} for line {other_line}",
        target_arrivals.len(),
        other_arrivals.len()
    );

    let report = analysis::compare(
        &target_line,
        &target_arrivals,
        &other_line,
        &other_arrivals,
        config.window.as_ref(),
    );

    println!();
    for (date, day) in report.days() {
        let fmt = |t: Option<chrono::NaiveTime>| match t {
            Some(t) => t.format("%H:%M").to_string(),
            None => "--:--".to_string(),
        };
        println!(
            "{date}  {target_line}: {}  {other_line}: {}  {:?}",
            fmt(day.target),
            fmt(day.other),
            day.outcome
        );
    }
    println!();
    println!("{report}");

    Ok(())
}
