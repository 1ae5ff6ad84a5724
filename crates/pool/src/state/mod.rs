pub mod config;
pub mod pool;
pub mod record;

pub use config::*;
pub use pool::*;
pub use record::*;
