//! Plain-text rendering of a [`ViewModel`]: the command-line counterpart of
//! the dashboard's metric, chart, and table widgets.

use std::fmt::Write;

use crate::data::aggregate::{CorrelationMatrix, Summary, ViewModel};
use crate::data::model::NumericColumn;

/// Width of the longest bar in the bar charts.
const BAR_WIDTH: usize = 40;

/// Date rows printed before the time series is elided.
const MAX_DATE_ROWS: usize = 30;

/// Render the full dashboard.
pub fn dashboard(vm: &ViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Sales dashboard — {} of {} records match the current filters",
        vm.matched, vm.total
    );
    out.push('\n');

    out.push_str(&metrics(&vm.summary));
    out.push('\n');

    out.push_str(&section("Revenue over time", &date_series(&vm.revenue_by_date)));
    out.push_str(&section(
        "Revenue by category",
        &bar_chart(&vm.revenue_by_category),
    ));
    out.push_str(&section(
        "Revenue by region",
        &bar_chart(&vm.revenue_by_region),
    ));
    out.push_str(&section("Correlation matrix", &correlation(&vm.correlation)));
    out.push_str(&section(
        &format!("Preview (first {} rows)", vm.preview.len()),
        &preview_table(vm),
    ));

    out
}

fn section(title: &str, body: &str) -> String {
    format!("{title}\n{}\n{body}\n", "-".repeat(title.len()))
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

fn metrics(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total revenue      {}", money(summary.total_revenue));
    let _ = writeln!(
        out,
        "Avg units sold     {}",
        mean_or_no_data(summary.avg_units_sold, 1)
    );
    let _ = writeln!(
        out,
        "Avg rating         {}",
        mean_or_no_data(summary.avg_rating, 2)
    );
    out
}

fn mean_or_no_data(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "no data".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// Dollar amount rounded to whole units, with thousands separators.
fn money(value: f64) -> String {
    format!("${}", group_thousands(value.round() as i64))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ---------------------------------------------------------------------------
// Time series and bar charts
// ---------------------------------------------------------------------------

fn date_series(groups: &[(chrono::NaiveDate, f64)]) -> String {
    if groups.is_empty() {
        return "  (no data)\n".to_string();
    }
    let mut out = String::new();
    for (date, revenue) in groups.iter().take(MAX_DATE_ROWS) {
        let _ = writeln!(out, "  {date}  {:>12}", money(*revenue));
    }
    if groups.len() > MAX_DATE_ROWS {
        let _ = writeln!(out, "  … ({} more dates)", groups.len() - MAX_DATE_ROWS);
    }
    out
}

fn bar_chart(groups: &[(String, f64)]) -> String {
    if groups.is_empty() {
        return "  (no data)\n".to_string();
    }
    let label_width = groups.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let max_value = groups.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (label, value) in groups {
        let bar_len = if max_value > 0.0 {
            ((value / max_value) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {label:<label_width$}  {:<BAR_WIDTH$}  {:>12}",
            "#".repeat(bar_len),
            money(*value)
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

fn correlation(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();

    let _ = write!(out, "  {:<7}", "");
    for col in NumericColumn::ALL {
        let _ = write!(out, "{:>7}", col.short_name());
    }
    out.push('\n');

    for (i, col) in NumericColumn::ALL.iter().enumerate() {
        let _ = write!(out, "  {:<7}", col.short_name());
        for j in 0..NumericColumn::ALL.len() {
            let r = matrix.get(i, j);
            if r.is_nan() {
                let _ = write!(out, "{:>7}", "n/a");
            } else {
                let _ = write!(out, "{r:>7.2}");
            }
        }
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Preview table
// ---------------------------------------------------------------------------

fn preview_table(vm: &ViewModel) -> String {
    if vm.preview.is_empty() {
        return "  (no rows)\n".to_string();
    }

    let region_width = column_width(vm, "Region", |r| r.region.len());
    let category_width = column_width(vm, "Category", |r| r.category.len());
    let store_width = column_width(vm, "Store", |r| r.store_id.len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<10}  {:<region_width$}  {:<category_width$}  {:<store_width$}  {:>5}  {:>8}  {:>5}  {:>10}  {:>8}  {:>8}  {:>6}",
        "Date", "Region", "Category", "Store", "Units", "Price", "Disc", "Revenue", "Mktg", "Comp", "Rating"
    );
    for rec in &vm.preview {
        let _ = writeln!(
            out,
            "  {:<10}  {:<region_width$}  {:<category_width$}  {:<store_width$}  {:>5}  {:>8.2}  {:>5.2}  {:>10.2}  {:>8.2}  {:>8.2}  {:>6.2}",
            rec.date.to_string(),
            rec.region,
            rec.category,
            rec.store_id,
            rec.units_sold,
            rec.unit_price,
            rec.discount,
            rec.revenue,
            rec.marketing_spend,
            rec.competitor_price,
            rec.customer_rating
        );
    }
    out
}

fn column_width<F>(vm: &ViewModel, header: &str, len: F) -> usize
where
    F: Fn(&crate::data::model::Record) -> usize,
{
    vm.preview
        .iter()
        .map(len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::recompute;
    use crate::data::filter::FilterSelection;
    use crate::data::model::test_support::record;
    use crate::data::model::Dataset;

    fn sample_view() -> ViewModel {
        let ds = Dataset::from_records(vec![
            record("2021-01-01", "East", "Electronics", "S001", 100.0),
            record("2021-01-02", "East", "Clothing", "S002", 200.0),
            record("2021-01-03", "West", "Electronics", "S001", 50.0),
        ]);
        recompute(&ds, &FilterSelection::all(&ds))
    }

    #[test]
    fn groups_thousands_with_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn dashboard_shows_metrics_and_sections() {
        let out = dashboard(&sample_view());
        assert!(out.contains("3 of 3 records"));
        assert!(out.contains("Total revenue      $350"));
        assert!(out.contains("Revenue by category"));
        assert!(out.contains("Correlation matrix"));
        assert!(out.contains("East"));
    }

    #[test]
    fn empty_view_renders_no_data_everywhere() {
        let ds = Dataset::from_records(vec![record(
            "2021-01-01",
            "East",
            "Electronics",
            "S001",
            100.0,
        )]);
        let mut sel = FilterSelection::all(&ds);
        sel.regions.clear();

        let out = dashboard(&recompute(&ds, &sel));
        assert!(out.contains("0 of 1 records"));
        assert!(out.contains("Total revenue      $0"));
        assert!(out.contains("Avg rating         no data"));
        assert!(out.contains("(no data)"));
        assert!(out.contains("(no rows)"));
    }

    #[test]
    fn constant_columns_render_as_not_available() {
        // test_support::record holds Unit_Price constant across rows.
        let out = correlation(&sample_view().correlation);
        assert!(out.contains("n/a"));
    }

    #[test]
    fn bars_scale_with_the_largest_group() {
        let groups = vec![("East".to_string(), 300.0), ("West".to_string(), 150.0)];
        let out = bar_chart(&groups);

        let bars: Vec<usize> = out
            .lines()
            .map(|l| l.matches('#').count())
            .collect();
        assert_eq!(bars[0], BAR_WIDTH);
        assert_eq!(bars[1], BAR_WIDTH / 2);
    }
}
