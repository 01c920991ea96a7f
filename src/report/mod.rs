pub mod generator;
pub mod stats;

pub use generator::generate_summary;
