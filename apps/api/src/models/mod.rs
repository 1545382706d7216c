pub mod stats;
pub mod wrapped;
