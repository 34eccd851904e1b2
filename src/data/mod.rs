/// Data layer: core types, loading, filtering, aggregation, export.
///
/// Architecture:
/// ```text
///  all_data.csv (path or URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows, derive Year/Month/Season → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, unique season/year/month index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply Selection → filtered indices
///   └──────────┘
///        │
///        ├──▶ stats   (means, quartiles, datetime ordering)
///        └──▶ export  (CSV re-encoding + session cache)
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
