//! The event producer loop.

pub mod producer;

pub use producer::{run_cycle, ProducerLoop};
