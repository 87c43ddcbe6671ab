pub mod fees;
pub mod geo;
pub mod hours;
