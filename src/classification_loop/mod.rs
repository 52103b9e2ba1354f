pub mod core;
pub mod main;
mod run_effect;
