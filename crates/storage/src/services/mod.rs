pub mod rivalry_aggregator;
pub mod rivalry_lifecycle;
