//! HTTP Handlers

mod health;
mod index;
mod stylize;

pub use health::*;
pub use index::*;
pub use stylize::*;
