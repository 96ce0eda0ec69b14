//! Recruit Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the Recruit workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the ingestion error taxonomy and result alias
//! - **Normalization**: NFKC text normalization applied to every extracted string
//! - **Logging**: `tracing` subscriber setup shared by all binaries
//! - **Types**: the extracted [`Record`] and its [`Value`]s
//!
//! # Example
//!
//! ```
//! use recruit_common::normalize::normalize;
//! use recruit_common::{Record, Value};
//!
//! let mut record = Record::new();
//! record.insert("first_name", Value::from(normalize("Ｉｖａｎ")));
//! assert_eq!(record.get_str("first_name"), Some("Ivan"));
//! ```

pub mod error;
pub mod logging;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use error::{RecruitError, Result};
pub use types::{Record, Value};
