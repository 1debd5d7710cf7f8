pub mod infraction;
pub mod series;
pub mod trigger;
