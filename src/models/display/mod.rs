//! Display models for table and JSON output

mod app;

pub use app::AppDisplay;
