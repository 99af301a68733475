//! Data layer: core types, loading, aggregation and peak detection.
//!
//! Architecture:
//! ```text
//!  .csv / .xlsx / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<Record>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  group by date → DailySeries
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  date range → windowed DailySeries
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ analysis  │  peaks + top-N → VolumeAnalysis
//!   └──────────┘
//! ```

pub mod aggregate;
pub mod analysis;
pub mod filter;
pub mod loader;
pub mod model;
pub mod peaks;
