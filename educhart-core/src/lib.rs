//! # EduChart Core
//!
//! Data model and editing session for the EduChart bar chart tool.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                educhart-core                │
//! ├──────────────────────┬──────────────────────┤
//! │  Dataset             │  Settings            │
//! │  - DataRow (<= 5)    │  - ChartType         │
//! │  - RowId             │  - Swatch palette    │
//! │  - RowEdit           │  - Pattern catalog   │
//! ├──────────────────────┴──────────────────────┤
//! │  ChartSession: single owner, revisioned     │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod row;
pub mod session;
pub mod settings;

pub use error::{ChartError, ChartResult};
pub use row::{parse_value, DataRow, RowEdit, RowId};
pub use session::{ChartSession, MAX_ROWS, MIN_ROWS};
pub use settings::{ChartSettings, ChartType, Pattern, PatternVariant, SettingsPatch, Swatch};

/// EduChart core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
