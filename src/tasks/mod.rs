//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: purges expired memory engine entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
