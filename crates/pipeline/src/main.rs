use anyhow::Context;
use chrono::NaiveDate;
use contracts::dashboards::d410_report_pipeline::FilterState;
use contracts::enums::{Period, ReportType};
use std::sync::Arc;

use pipeline::dashboards::d410_report_pipeline::{CycleOutcome, ReportPipeline};
use pipeline::shared::config::load_config;
use pipeline::shared::data_source::HttpDataSource;
use pipeline::shared::logger;

const USAGE: &str = "usage: pipeline <sales|customers|inventory|marketing|financial> <start YYYY-MM-DD> <end YYYY-MM-DD> [day|week|month|quarter|year|custom]";

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

fn parse_filter(args: &[String]) -> anyhow::Result<FilterState> {
    let [report_type, start, end, rest @ ..] = args else {
        anyhow::bail!(USAGE);
    };
    let report_type = ReportType::from_code(report_type)
        .with_context(|| format!("unknown report type: {report_type}\n{USAGE}"))?;
    let period = match rest.first() {
        Some(code) => Period::from_code(code)
            .with_context(|| format!("unknown period: {code}\n{USAGE}"))?,
        None => Period::default(),
    };
    Ok(FilterState::new(
        report_type,
        period,
        parse_date(start)?,
        parse_date(end)?,
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let filter = parse_filter(&args)?;

    let config = load_config()?;
    tracing::info!("Data source: {}", config.data_source.base_url);
    let source = HttpDataSource::new(&config.data_source)?;

    let pipeline = ReportPipeline::new(Arc::new(source), config.charts);
    let outcome = pipeline.on_filter_change(filter).await;

    let state = pipeline.current();
    println!("{}", serde_json::to_string_pretty(&state)?);

    if outcome == CycleOutcome::Failed {
        anyhow::bail!(state.error.unwrap_or_else(|| "report cycle failed".into()));
    }
    Ok(())
}
