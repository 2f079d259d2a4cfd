// The binary in main.rs owns the terminal; everything it drives lives here so
// integration tests and criterion benchmarks can reach it as `codedrill::*`.

pub mod app;
pub mod config;
pub mod event;
pub mod generator;
pub mod session;
pub mod store;
pub mod ui;
