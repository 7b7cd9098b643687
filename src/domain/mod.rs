pub mod entities;
pub mod error;

// CSV import module
pub mod import;
