// Engine library root: domain logic on top of the `shared` value types.

pub mod camps;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod groups;
pub mod store;
pub mod stream;
pub mod timeline;

pub use error::{RegistroError, Result};
