/// Data layer: raw tables, loading, and the working frames used by preparation.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  column names, rows of CellValue
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Frame    │  column-major copy: encode, stack, reconcile
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ FeatureMatrix │  numeric rows for the model
///   └──────────────┘
/// ```

pub mod frame;
pub mod loader;
pub mod matrix;
pub mod model;
