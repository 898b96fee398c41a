mod list;
mod run;

pub use list::List;
pub use run::Run;

/// Default content directory, relative to the workspace root.
pub(crate) const DEFAULT_CONTENT_DIR: &str = "crates/battle/content/data";
