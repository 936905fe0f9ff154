//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `source` - transition delivery ingestion (JSONL over stdin)
//! - `settings` - file-backed key-value store for preferences and the
//!   persisted activity snapshot
//! - `launcher` - action executor launching apps with URL fallback

pub mod launcher;
pub mod settings;
pub mod source;

// Re-export commonly used types
pub use launcher::AppLauncher;
pub use settings::FileSettings;
pub use source::{parse_delivery, start_stdin_source};
