pub mod discipline;
pub mod schedule;
pub mod test;
pub mod timer;
pub mod vocab;
