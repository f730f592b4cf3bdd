// Library target exists for the integration tests under tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// test harnesses can import types via `studyr::engine::*` / `studyr::store::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by integration tests
pub mod ai;
pub mod engine;
pub mod store;
pub mod video;

// Private: required transitively (won't compile without them)
mod app;
mod config;
mod diag;
mod event;
mod quotes;
mod ui;
