//! Bounded Ring Buffer
//!
//! Provides a fixed-capacity FIFO window for per-frame detection history.
//! Single-owner: the attention engine mutates it from one update call.

mod buffer;

pub use buffer::RingBuffer;
