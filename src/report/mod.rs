//! Report rendering.

pub mod generator;
pub mod size;

pub use generator::{
    generate_breakdown_report, generate_catalog_listing, generate_json_report,
    generate_markdown_report,
};
pub use size::{SizeFormat, MAX_DECIMAL_PLACES};
