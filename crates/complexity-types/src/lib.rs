// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Data model, column mapping, configuration, and error hierarchy for
//! the Complexity Kernel — economic-complexity indicators over
//! (period, place, sector, value) panel data.

pub mod columns;
pub mod config;
pub mod error;
pub mod observation;
pub mod record;

pub use columns::{ColumnMapping, JsonRow};
pub use config::{ComplexityConfig, StdConvention};
pub use error::{ComplexityError, ComplexityResult};
pub use observation::{Activity, Label, Observation};
pub use record::{AdvantageRecord, CellKey, ComplexityRecord};
