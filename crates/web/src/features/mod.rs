pub mod rivalries;
