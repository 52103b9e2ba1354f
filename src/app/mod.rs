pub mod console;
pub mod core;
pub mod gui;
pub mod main;
pub mod render;
#[cfg(test)]
mod tests;
