pub mod common;
pub mod rivalry;
