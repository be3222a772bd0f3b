use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Canonical column layout
// ---------------------------------------------------------------------------

/// Header order of the canonical CSV layout. Loading requires every column;
/// export reproduces the same set in the same order.
pub const COLUMNS: [&str; 11] = [
    "Date",
    "Region",
    "Category",
    "Store_ID",
    "Units_Sold",
    "Unit_Price",
    "Discount",
    "Revenue",
    "Marketing_Spend",
    "Competitor_Price",
    "Customer_Rating",
];

// ---------------------------------------------------------------------------
// Record – one row of the sales table
// ---------------------------------------------------------------------------

/// A single sales observation (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    pub region: String,
    pub category: String,
    pub store_id: String,
    pub units_sold: i64,
    pub unit_price: f64,
    pub discount: f64,
    pub revenue: f64,
    pub marketing_spend: f64,
    pub competitor_price: f64,
    pub customer_rating: f64,
}

// ---------------------------------------------------------------------------
// NumericColumn – the fixed column set for the correlation matrix
// ---------------------------------------------------------------------------

/// The numeric columns the correlation matrix is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    UnitsSold,
    UnitPrice,
    Discount,
    Revenue,
    MarketingSpend,
    CompetitorPrice,
    CustomerRating,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 7] = [
        NumericColumn::UnitsSold,
        NumericColumn::UnitPrice,
        NumericColumn::Discount,
        NumericColumn::Revenue,
        NumericColumn::MarketingSpend,
        NumericColumn::CompetitorPrice,
        NumericColumn::CustomerRating,
    ];

    /// Column name as it appears in the file header.
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::UnitsSold => "Units_Sold",
            NumericColumn::UnitPrice => "Unit_Price",
            NumericColumn::Discount => "Discount",
            NumericColumn::Revenue => "Revenue",
            NumericColumn::MarketingSpend => "Marketing_Spend",
            NumericColumn::CompetitorPrice => "Competitor_Price",
            NumericColumn::CustomerRating => "Customer_Rating",
        }
    }

    /// Short label for fixed-width table headers.
    pub fn short_name(self) -> &'static str {
        match self {
            NumericColumn::UnitsSold => "Units",
            NumericColumn::UnitPrice => "Price",
            NumericColumn::Discount => "Disc",
            NumericColumn::Revenue => "Rev",
            NumericColumn::MarketingSpend => "Mktg",
            NumericColumn::CompetitorPrice => "Comp",
            NumericColumn::CustomerRating => "Rating",
        }
    }

    /// Read this column's value from a record as `f64`.
    pub fn value(self, rec: &Record) -> f64 {
        match self {
            NumericColumn::UnitsSold => rec.units_sold as f64,
            NumericColumn::UnitPrice => rec.unit_price,
            NumericColumn::Discount => rec.discount,
            NumericColumn::Revenue => rec.revenue,
            NumericColumn::MarketingSpend => rec.marketing_spend,
            NumericColumn::CompetitorPrice => rec.competitor_price,
            NumericColumn::CustomerRating => rec.customer_rating,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values per filter
/// dimension. Built once at load time and treated as immutable afterwards;
/// it is always passed explicitly, never cached in process-wide state.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Sorted distinct Region values.
    pub regions: BTreeSet<String>,
    /// Sorted distinct Category values.
    pub categories: BTreeSet<String>,
    /// Sorted distinct Store_ID values.
    pub store_ids: BTreeSet<String>,
}

impl Dataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut regions = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut store_ids = BTreeSet::new();

        for rec in &records {
            regions.insert(rec.region.clone());
            categories.insert(rec.category.clone());
            store_ids.insert(rec.store_id.clone());
        }
        Dataset {
            records,
            regions,
            categories,
            store_ids,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Shorthand record constructor used across the data-layer tests.
    pub fn record(date: &str, region: &str, category: &str, store: &str, revenue: f64) -> Record {
        Record {
            date: date.parse().unwrap(),
            region: region.to_string(),
            category: category.to_string(),
            store_id: store.to_string(),
            units_sold: 10,
            unit_price: 25.0,
            discount: 0.1,
            revenue,
            marketing_spend: 500.0,
            competitor_price: 24.0,
            customer_rating: 4.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::record;
    use super::*;

    #[test]
    fn from_records_builds_distinct_value_sets() {
        let ds = Dataset::from_records(vec![
            record("2021-01-01", "East", "Electronics", "S001", 100.0),
            record("2021-01-02", "East", "Clothing", "S002", 200.0),
            record("2021-01-03", "West", "Electronics", "S001", 50.0),
        ]);

        assert_eq!(ds.len(), 3);
        let regions: Vec<&str> = ds.regions.iter().map(String::as_str).collect();
        assert_eq!(regions, ["East", "West"]);
        assert_eq!(ds.categories.len(), 2);
        let stores: Vec<&str> = ds.store_ids.iter().map(String::as_str).collect();
        assert_eq!(stores, ["S001", "S002"]);
    }

    #[test]
    fn numeric_column_reads_the_matching_field() {
        let rec = record("2021-01-01", "East", "Electronics", "S001", 123.5);
        assert_eq!(NumericColumn::Revenue.value(&rec), 123.5);
        assert_eq!(NumericColumn::UnitsSold.value(&rec), 10.0);
        assert_eq!(NumericColumn::CustomerRating.value(&rec), 4.2);
    }

    #[test]
    fn numeric_column_names_match_the_header_layout() {
        for col in NumericColumn::ALL {
            assert!(COLUMNS.contains(&col.name()), "{} not in COLUMNS", col);
        }
    }
}
