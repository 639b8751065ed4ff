pub mod boundaries;

pub use boundaries::*;
