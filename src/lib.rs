pub mod error;
pub mod render;
pub mod scanner;

// Re-export error types for convenience
pub use error::ScanError;
pub use scanner::{Scanned, scan};
