pub mod client;
pub mod extract;
pub mod prompts;
pub mod task;

pub use client::{GenClient, GenError};
pub use task::{GenOutcome, GenRequest};
