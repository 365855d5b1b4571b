pub mod config;
pub mod error;
pub mod symbols;

pub use error::{DemangleError, Error, Result};
pub use symbols::{bare_function_name, reduce, DemangleResult};
