//! Range math and partition planning.
//!
//! Splits a resource into a fixed number of contiguous byte ranges and
//! renders each one as an inclusive `start-end` span for libcurl.

mod range;

pub use range::{partition, ByteRange};
