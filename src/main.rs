//! saleslens – command-line sales analytics dashboard.
//!
//! Loads a tabular sales dataset, applies Region / Category / Store_ID
//! filters, and renders summary metrics, grouped revenue aggregates, a
//! correlation matrix, and a row preview, with optional CSV export of the
//! filtered view.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use saleslens::cli::{Args, OutputFormat};
use saleslens::data::filter::FilterDimension;
use saleslens::data::model::Dataset;
use saleslens::session::Session;
use saleslens::{data, render};

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .init();
    debug!("arguments: {args:?}");

    let dataset = data::loader::load_file(&args.data_file)
        .with_context(|| format!("loading {}", args.data_file.display()))?;
    info!(
        "loaded {} records from {}",
        dataset.len(),
        args.data_file.display()
    );
    if dataset.is_empty() {
        warn!("the dataset contains no records; every aggregate will be empty");
    }

    if args.list_values {
        print_distinct_values(&dataset);
        return Ok(());
    }

    let mut session = Session::with_preview(dataset, args.preview);
    if let Some(regions) = args.region.clone() {
        session.select_only(FilterDimension::Region, regions);
    }
    if let Some(categories) = args.category.clone() {
        session.select_only(FilterDimension::Category, categories);
    }
    if let Some(stores) = args.store.clone() {
        session.select_only(FilterDimension::StoreId, stores);
    }
    debug!(
        "{} of {} records match the selection",
        session.view().matched,
        session.view().total
    );

    match args.format {
        OutputFormat::Text => print!("{}", render::dashboard(session.view())),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(session.view())
                .context("serializing view model")?;
            println!("{json}");
        }
    }

    if let Some(path) = &args.export {
        data::export::export_csv(&session.filtered_view(), path)?;
        info!(
            "exported {} rows to {}",
            session.view().matched,
            path.display()
        );
    }

    Ok(())
}

/// Print the distinct values that seed the filter controls.
fn print_distinct_values(dataset: &Dataset) {
    for dim in FilterDimension::ALL {
        println!("{}:", dim.name());
        for value in dim.distinct(dataset) {
            println!("  {value}");
        }
    }
}
