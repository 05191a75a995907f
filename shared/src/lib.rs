// Value types and pure helpers shared by the registro crates.
// Nothing here does I/O or keeps state.

pub mod date;
pub mod format;
pub mod models;
pub mod money;
pub mod utils;

pub use date::{Date, DateRange};
pub use money::{Amount, Currency};
