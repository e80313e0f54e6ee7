pub mod ai;
pub mod services;
pub mod utils;
