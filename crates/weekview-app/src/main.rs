//! Delivery binary: reads an ICS file, resolves the current week, and
//! prints the occurrence projection as JSON.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use weekview_ical::OccurrenceView;

use crate::config::load_config;

fn main() -> anyhow::Result<()> {
    let settings = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.logging.level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(source = %settings.source.path, "reading ICS text");

    let text = std::fs::read_to_string(&settings.source.path)
        .with_context(|| format!("reading ICS file {}", settings.source.path))?;

    let calendar = weekview_ical::parse(&text);
    tracing::info!(
        events = calendar.events.len(),
        timezone = %calendar.timezone,
        "parsed calendar"
    );

    let occurrences = weekview_ical::current_week(Some(&calendar))?;
    let views: Vec<OccurrenceView> = occurrences.iter().map(OccurrenceView::from).collect();

    println!("{}", serde_json::to_string_pretty(&views)?);

    Ok(())
}
