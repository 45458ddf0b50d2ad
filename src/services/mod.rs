pub mod ideas;
pub mod stripe;
