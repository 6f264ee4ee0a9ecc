pub mod click;
pub mod hashchange;
