/// Data layer: table types, loading, renaming, sampling, and writing.
///
/// Architecture:
/// ```text
///   gaia_DR3.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  rename  │  strict old → new header substitution
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ sampler  │  uniform draw without replacement → Sample
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer  │  Sample → CSV with index column
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod rename;
pub mod sampler;
pub mod writer;
