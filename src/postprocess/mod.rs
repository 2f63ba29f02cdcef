pub mod detection;
pub mod geometry;
