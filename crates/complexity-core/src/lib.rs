// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Economic-complexity pipeline over (period, place, sector, value)
//! panel data.
//!
//! Per period: sanitize → build the place × sector matrix → location
//! quotients → binary revealed advantage (M) → method of reflections →
//! standardized complexity indices (ICE for places, ICS for sectors).
//! Per-cell results are merged back onto the input observations.
//!
//! # Invariants
//!
//! 1. **No zero-sum axes reach the quotient stage**: the sanitizer drops
//!    places and sectors whose period total is zero. If one slips
//!    through anyway the quotient engine fails with `DegeneratePeriod`
//!    instead of emitting NaN/Inf.
//!
//! 2. **Labels travel with the data**: every derived matrix carries the
//!    same place and sector label vectors as the matrix it came from,
//!    and result rows are assembled per (place, sector) cell, never by
//!    flattening and re-tiling.
//!
//! 3. **Reflections update simultaneously**: each step reads immutable
//!    snapshots of the previous Kr and Ks.
//!
//! 4. **Periods are independent**: no state is shared between periods;
//!    the run is deterministic for a given input and configuration.

pub mod advantage;
pub mod convergence;
pub mod matrix;
pub mod pipeline;
pub mod quotient;
pub mod reflections;
pub mod sanitizer;

pub use advantage::binarize;
pub use convergence::convergence_index;
pub use matrix::{build_period_matrix, AdvantageMatrix, LabeledMatrix, PeriodMatrix, QuotientMatrix};
pub use pipeline::{ComplexityPipeline, PeriodResult};
pub use quotient::location_quotient;
pub use reflections::{method_of_reflections, standardize, Reflections};
pub use sanitizer::{distinct_periods, fill_missing, sanitize_period};
