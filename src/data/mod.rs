/// Data layer: core types, loading, filtering, and metric derivation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset   (cached by `source`)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (season, team, game type) → FilteredGames
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  metrics  │  → CumulativeSeries + SummaryTotals
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod source;
