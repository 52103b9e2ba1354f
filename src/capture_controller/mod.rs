pub mod interface;
pub mod main;
pub mod video_sink;

#[cfg(test)]
mod tests;
