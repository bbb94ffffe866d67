//MIT License
pub mod approximation;
