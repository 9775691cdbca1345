mod engine;
mod error;
mod types;

pub use engine::{Engine, RunOptions, Session};
pub use error::{CoreError, CoreErrorCode};
pub use types::{Report, ReportKind};
