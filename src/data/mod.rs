/// Data layer: core types, loading, and selection filters.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file via ColumnMapping → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<LaunchRecord>, payload bounds, site names
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site selector + payload range → matching records
///   └──────────┘
/// ```

pub mod columns;
pub mod filter;
pub mod loader;
pub mod model;
