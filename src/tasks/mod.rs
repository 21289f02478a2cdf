//! Background Tasks Module
//!
//! # Tasks
//! - Sweeper: prunes expired read cache entries at a fixed interval

mod sweeper;

pub use sweeper::spawn_sweeper;
