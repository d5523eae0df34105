pub mod compositor;
pub mod summary;
