//! Markdown formatting of lists, summaries and operation results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes get newtype wrappers so the CLI and the MCP server
//! print the same markdown.
//!
//! - [`collections`]: `ListSummaries`, `UpcomingTasks`, `QueryHistory`
//! - [`results`]: merge and generation outcomes
//! - [`status`]: `OperationStatus` confirmations
//! - [`datetime`]: local rendering of timestamps
//!
//! ```rust
//! use tasqe_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Renamed list");
//! assert_eq!(status.to_string(), "Success: Renamed list\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{ListSummaries, QueryHistory, UpcomingTasks};
pub use datetime::LocalDateTime;
pub use status::OperationStatus;
