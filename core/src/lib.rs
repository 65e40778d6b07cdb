extern crate self as quarry_core;

pub mod core;
pub mod log;
pub mod panic;
pub mod service;
pub mod time;
