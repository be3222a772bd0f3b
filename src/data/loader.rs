use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, Record};

/// Input-shape problems detected before any row is accepted. Always fatal;
/// there is no partial load.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the canonical columns (recommended)
/// * `.json`    – records-oriented array: `[{ "Date": "...", ... }, ...]`
/// * `.parquet` – flat columns matching the canonical layout
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    }
}

/// Dates are accepted in ISO `YYYY-MM-DD` form only.
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("'{s}' is not a YYYY-MM-DD date"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the canonical columns within a header row.
struct ColumnMap {
    date: usize,
    region: usize,
    category: usize,
    store_id: usize,
    units_sold: usize,
    unit_price: usize,
    discount: usize,
    revenue: usize,
    marketing_spend: usize,
    competitor_price: usize,
    customer_rating: usize,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Result<Self, SchemaError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(SchemaError::MissingColumn(name))
        };
        Ok(ColumnMap {
            date: find("Date")?,
            region: find("Region")?,
            category: find("Category")?,
            store_id: find("Store_ID")?,
            units_sold: find("Units_Sold")?,
            unit_price: find("Unit_Price")?,
            discount: find("Discount")?,
            revenue: find("Revenue")?,
            marketing_spend: find("Marketing_Spend")?,
            competitor_price: find("Competitor_Price")?,
            customer_rating: find("Customer_Rating")?,
        })
    }
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let cols = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();
        let float = |idx: usize, name: &'static str| {
            cell(idx)
                .parse::<f64>()
                .with_context(|| format!("CSV row {row_no}, {name}: '{}' is not a number", cell(idx)))
        };

        records.push(Record {
            date: parse_date(cell(cols.date)).with_context(|| format!("CSV row {row_no}, Date"))?,
            region: cell(cols.region).to_string(),
            category: cell(cols.category).to_string(),
            store_id: cell(cols.store_id).to_string(),
            units_sold: cell(cols.units_sold).parse::<i64>().with_context(|| {
                format!(
                    "CSV row {row_no}, Units_Sold: '{}' is not an integer",
                    cell(cols.units_sold)
                )
            })?,
            unit_price: float(cols.unit_price, "Unit_Price")?,
            discount: float(cols.discount, "Discount")?,
            revenue: float(cols.revenue, "Revenue")?,
            marketing_spend: float(cols.marketing_spend, "Marketing_Spend")?,
            competitor_price: float(cols.competitor_price, "Competitor_Price")?,
            customer_rating: float(cols.customer_rating, "Customer_Rating")?,
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Date": "2021-06-01",
///     "Region": "East",
///     "Category": "Electronics",
///     "Store_ID": "S001",
///     "Units_Sold": 12,
///     "Unit_Price": 25.0,
///     ...
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let string = |name: &'static str| -> Result<String> {
            obj.get(name)
                .ok_or(SchemaError::MissingColumn(name))?
                .as_str()
                .map(str::to_string)
                .with_context(|| format!("Row {i}, {name}: not a string"))
        };
        let float = |name: &'static str| -> Result<f64> {
            obj.get(name)
                .ok_or(SchemaError::MissingColumn(name))?
                .as_f64()
                .with_context(|| format!("Row {i}, {name}: not a number"))
        };

        records.push(Record {
            date: parse_date(&string("Date")?).with_context(|| format!("Row {i}, Date"))?,
            region: string("Region")?,
            category: string("Category")?,
            store_id: string("Store_ID")?,
            units_sold: obj
                .get("Units_Sold")
                .ok_or(SchemaError::MissingColumn("Units_Sold"))?
                .as_i64()
                .with_context(|| format!("Row {i}, Units_Sold: not an integer"))?,
            unit_price: float("Unit_Price")?,
            discount: float("Discount")?,
            revenue: float("Revenue")?,
            marketing_spend: float("Marketing_Spend")?,
            competitor_price: float("Competitor_Price")?,
            customer_rating: float("Customer_Rating")?,
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns matching the canonical layout.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): the Date column may be Utf8 or Date32,
/// integers Int32/Int64, floats Float32/Float64.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<&Arc<dyn Array>, SchemaError> {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx))
                .map_err(|_| SchemaError::MissingColumn(name))
        };

        let date_col = column("Date")?;
        let region_col = column("Region")?;
        let category_col = column("Category")?;
        let store_col = column("Store_ID")?;
        let units_col = column("Units_Sold")?;
        let price_col = column("Unit_Price")?;
        let discount_col = column("Discount")?;
        let revenue_col = column("Revenue")?;
        let marketing_col = column("Marketing_Spend")?;
        let competitor_col = column("Competitor_Price")?;
        let rating_col = column("Customer_Rating")?;

        for row in 0..batch.num_rows() {
            records.push(Record {
                date: date_value(date_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Date'"))?,
                region: string_value(region_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Region'"))?,
                category: string_value(category_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Category'"))?,
                store_id: string_value(store_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Store_ID'"))?,
                units_sold: int_value(units_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Units_Sold'"))?,
                unit_price: float_value(price_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Unit_Price'"))?,
                discount: float_value(discount_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Discount'"))?,
                revenue: float_value(revenue_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Revenue'"))?,
                marketing_spend: float_value(marketing_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Marketing_Spend'"))?,
                competitor_price: float_value(competitor_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Competitor_Price'"))?,
                customer_rating: float_value(rating_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'Customer_Rating'"))?,
            });
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn string_value(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn date_value(col: &Arc<dyn Array>, row: usize) -> Result<NaiveDate> {
    if col.is_null(row) {
        bail!("null value in date column");
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => parse_date(&string_value(col, row)?),
        DataType::Date32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .context("expected Date32Array")?;
            arrow::temporal_conversions::date32_to_datetime(arr.value(row))
                .map(|dt| dt.date())
                .context("Date32 value out of range")
        }
        other => bail!("Expected Utf8 or Date32 date column, got {other:?}"),
    }
}

fn int_value(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        other => bail!("Expected Int32 or Int64 column, got {other:?}"),
    }
}

fn float_value(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in float column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        // Integer-typed numeric columns are accepted and widened.
        DataType::Int32 | DataType::Int64 => Ok(int_value(col, row)? as f64),
        other => bail!("Expected Float32/Float64 column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Date,Region,Category,Store_ID,Units_Sold,Unit_Price,\
                          Discount,Revenue,Marketing_Spend,Competitor_Price,Customer_Rating";

    fn write_temp(ext: &str, contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn loads_a_well_formed_csv() {
        let path = write_temp(
            "csv",
            &format!(
                "{HEADER}\n\
                 2021-01-05,East,Electronics,S001,12,25.0,0.1,270.0,500.0,24.5,4.2\n\
                 2021-01-06,West,Clothing,S002,3,40.0,0.0,120.0,200.0,41.0,3.8\n"
            ),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].date, "2021-01-05".parse().unwrap());
        assert_eq!(ds.records[0].units_sold, 12);
        assert_eq!(ds.records[1].revenue, 120.0);
        assert!(ds.regions.contains("West"));
    }

    #[test]
    fn missing_column_is_fatal() {
        let path = write_temp(
            "csv",
            "Date,Region,Category,Store_ID,Units_Sold\n2021-01-05,East,Electronics,S001,12\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unit_Price"), "{err}");
    }

    #[test]
    fn malformed_date_is_fatal() {
        let path = write_temp(
            "csv",
            &format!(
                "{HEADER}\n\
                 05/01/2021,East,Electronics,S001,12,25.0,0.1,270.0,500.0,24.5,4.2\n"
            ),
        );

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Date"), "{err:#}");
    }

    #[test]
    fn malformed_number_is_fatal() {
        let path = write_temp(
            "csv",
            &format!(
                "{HEADER}\n\
                 2021-01-05,East,Electronics,S001,many,25.0,0.1,270.0,500.0,24.5,4.2\n"
            ),
        );

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Units_Sold"), "{err:#}");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let path = write_temp("xlsx", "not a table");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("xlsx"), "{err}");
    }

    #[test]
    fn loads_records_oriented_json() {
        let path = write_temp(
            "json",
            r#"[{"Date":"2021-01-05","Region":"East","Category":"Electronics",
                 "Store_ID":"S001","Units_Sold":12,"Unit_Price":25.0,"Discount":0.1,
                 "Revenue":270.0,"Marketing_Spend":500.0,"Competitor_Price":24.5,
                 "Customer_Rating":4.2}]"#,
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].store_id, "S001");
        assert_eq!(ds.records[0].customer_rating, 4.2);
    }

    #[test]
    fn json_missing_field_is_fatal() {
        let path = write_temp(
            "json",
            r#"[{"Date":"2021-01-05","Region":"East"}]"#,
        );

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Category"), "{err:#}");
    }
}
