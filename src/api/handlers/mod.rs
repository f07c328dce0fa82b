//! HTTP request handlers.

mod submit;

pub use submit::submit_loyalty_program;
