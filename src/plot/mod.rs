pub mod stats;
pub mod transform;
