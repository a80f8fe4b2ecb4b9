//! Level files, grids, and directions.

pub mod catalog;
pub mod direction;
pub mod level;
pub mod parser;

pub use level::Level;
