// Modal rendering modules
mod utils;
mod confirm;
mod help;
mod report;

// Re-export all public functions
pub use confirm::*;
pub use help::*;
pub use report::*;
