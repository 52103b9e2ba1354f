pub mod lock;
pub mod logger;
pub mod scheduler;
