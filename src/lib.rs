pub mod charset;
pub mod config;
pub mod controller;
pub mod delay;
pub mod engine;
pub mod injector;
pub mod keyboard;
pub mod mistakes;
pub mod model;
pub mod sim;
pub mod zhuyin;

#[cfg(feature = "system")]
pub mod system;
