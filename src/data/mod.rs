/// Data layer: core types, loading, filtering, aggregation, and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, distinct values per dimension
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSelection → FilteredView
///   └──────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌───────────┐      ┌──────────┐
///   │ aggregate  │      │  export   │
///   │ → ViewModel│      │ → CSV     │
///   └───────────┘      └──────────┘
/// ```
pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
