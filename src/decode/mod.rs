pub mod gif;
pub mod patch;
