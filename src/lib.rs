// src/lib.rs — Library root for refiner

pub mod cli;
pub mod core;
pub mod infra;
pub mod portfolio;
pub mod util;
