//! Command Handlers 实现

mod stylize_handlers;

pub use stylize_handlers::*;
