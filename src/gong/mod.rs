pub mod client;
pub mod names;

pub use client::*;
pub use names::*;
