use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;
use super::model::COLUMNS;

// ---------------------------------------------------------------------------
// CSV export of a filtered view
// ---------------------------------------------------------------------------

/// Serialize the view as UTF-8 CSV with exactly the canonical column set and
/// order. An empty view produces a header-only file.
pub fn write_csv<W: Write>(view: &FilteredView, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS).context("writing CSV header")?;

    for rec in view.records() {
        wtr.write_record([
            rec.date.to_string(),
            rec.region.clone(),
            rec.category.clone(),
            rec.store_id.clone(),
            rec.units_sold.to_string(),
            rec.unit_price.to_string(),
            rec.discount.to_string(),
            rec.revenue.to_string(),
            rec.marketing_spend.to_string(),
            rec.competitor_price.to_string(),
            rec.customer_rating.to_string(),
        ])
        .context("writing CSV row")?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write the view to a file at `path`.
pub fn export_csv(view: &FilteredView, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    write_csv(view, file)
}

#[cfg(test)]
mod tests {
    use super::super::filter::FilterSelection;
    use super::super::model::test_support::record;
    use super::super::model::Dataset;
    use super::*;

    fn export_string(ds: &Dataset, sel: &FilterSelection) -> String {
        let view = FilteredView::new(ds, sel);
        let mut buf = Vec::new();
        write_csv(&view, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_matches_the_input_layout() {
        let ds = Dataset::from_records(vec![]);
        let out = export_string(&ds, &FilterSelection::all(&ds));
        assert_eq!(out.trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn empty_view_exports_header_only() {
        let ds = Dataset::from_records(vec![record(
            "2021-01-01",
            "East",
            "Electronics",
            "S001",
            100.0,
        )]);
        let mut sel = FilterSelection::all(&ds);
        sel.store_ids.clear();

        let out = export_string(&ds, &sel);
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn rows_carry_the_filtered_records_in_order() {
        let ds = Dataset::from_records(vec![
            record("2021-01-01", "East", "Electronics", "S001", 100.0),
            record("2021-01-02", "West", "Clothing", "S002", 50.0),
            record("2021-01-03", "East", "Clothing", "S001", 200.0),
        ]);
        let mut sel = FilterSelection::all(&ds);
        sel.regions = ["East".to_string()].into_iter().collect();

        let out = export_string(&ds, &sel);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2021-01-01,East,Electronics,S001,10,25,0.1,100,"));
        assert!(lines[2].starts_with("2021-01-03,East,Clothing,S001,"));
    }
}
