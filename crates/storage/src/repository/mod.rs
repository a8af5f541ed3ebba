pub mod prediction;
pub mod race;
pub mod rivalry;
