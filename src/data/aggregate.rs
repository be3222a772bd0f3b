use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::filter::{FilterSelection, FilteredView};
use super::model::{Dataset, NumericColumn, Record};

/// Rows shown in the dashboard preview table.
pub const PREVIEW_ROWS: usize = 20;

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Scalar summary metrics over a view. Means over an empty view are NaN
/// (serialized as JSON null); the revenue total of an empty view is 0.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_revenue: f64,
    pub avg_units_sold: f64,
    pub avg_rating: f64,
}

/// Compute the three headline metrics in one pass.
pub fn summary(view: &FilteredView) -> Summary {
    let mut total_revenue = 0.0;
    let mut units = 0.0;
    let mut rating = 0.0;
    let mut n = 0usize;

    for rec in view.records() {
        total_revenue += rec.revenue;
        units += rec.units_sold as f64;
        rating += rec.customer_rating;
        n += 1;
    }

    let (avg_units_sold, avg_rating) = if n == 0 {
        (f64::NAN, f64::NAN)
    } else {
        (units / n as f64, rating / n as f64)
    };

    Summary {
        total_revenue,
        avg_units_sold,
        avg_rating,
    }
}

// ---------------------------------------------------------------------------
// Grouped revenue aggregates
// ---------------------------------------------------------------------------

/// Revenue summed per exact date, ascending.
pub fn revenue_by_date(view: &FilteredView) -> Vec<(NaiveDate, f64)> {
    let mut groups: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for rec in view.records() {
        *groups.entry(rec.date).or_insert(0.0) += rec.revenue;
    }
    groups.into_iter().collect()
}

/// Revenue summed per product category, in sorted key order.
pub fn revenue_by_category(view: &FilteredView) -> Vec<(String, f64)> {
    sum_by_key(view, |rec| rec.category.as_str())
}

/// Revenue summed per region, in sorted key order.
pub fn revenue_by_region(view: &FilteredView) -> Vec<(String, f64)> {
    sum_by_key(view, |rec| rec.region.as_str())
}

fn sum_by_key<'a, F>(view: &FilteredView<'a>, key: F) -> Vec<(String, f64)>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for rec in view.records() {
        *groups.entry(key(rec)).or_insert(0.0) += rec.revenue;
    }
    groups
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlation over [`NumericColumn::ALL`]. Symmetric by
/// construction; diagonal entries are exactly 1, or NaN when the column has
/// zero variance in the view.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<&'static str>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

pub fn correlation_matrix(view: &FilteredView) -> CorrelationMatrix {
    let series: Vec<Vec<f64>> = NumericColumn::ALL
        .iter()
        .map(|col| view.records().map(|rec| col.value(rec)).collect())
        .collect();

    let n = series.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = if variance_sum(&series[i]) > 0.0 {
            1.0
        } else {
            f64::NAN
        };
        // Off-diagonal cells computed once and mirrored.
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: NumericColumn::ALL.iter().map(|c| c.name()).collect(),
        values,
    }
}

fn variance_sum(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    xs.iter().map(|x| (x - mean) * (x - mean)).sum()
}

/// Pearson correlation coefficient; NaN for empty input or when either
/// series is constant.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

// ---------------------------------------------------------------------------
// ViewModel – everything the dashboard surface needs for one selection
// ---------------------------------------------------------------------------

/// The derived state for one filter selection, produced by [`recompute`].
/// The UI layer only reads this; it never touches the dataset directly.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    /// Records passing the selection.
    pub matched: usize,
    /// Records in the full dataset.
    pub total: usize,
    pub summary: Summary,
    pub revenue_by_date: Vec<(NaiveDate, f64)>,
    pub revenue_by_category: Vec<(String, f64)>,
    pub revenue_by_region: Vec<(String, f64)>,
    pub correlation: CorrelationMatrix,
    /// First rows of the filtered view, in dataset order.
    pub preview: Vec<Record>,
}

/// Pure recomputation pass: filter, then derive every dashboard aggregate.
/// Invoked by the UI layer on every selection change.
pub fn recompute(dataset: &Dataset, selection: &FilterSelection) -> ViewModel {
    recompute_with_preview(dataset, selection, PREVIEW_ROWS)
}

pub fn recompute_with_preview(
    dataset: &Dataset,
    selection: &FilterSelection,
    preview_rows: usize,
) -> ViewModel {
    let view = FilteredView::new(dataset, selection);
    ViewModel {
        matched: view.len(),
        total: dataset.len(),
        summary: summary(&view),
        revenue_by_date: revenue_by_date(&view),
        revenue_by_category: revenue_by_category(&view),
        revenue_by_region: revenue_by_region(&view),
        correlation: correlation_matrix(&view),
        preview: view.records().take(preview_rows).cloned().collect(),
    }
}
