//! Test support: a recording render surface and a tree harness.
//!
//! These helpers are compiled into the library so downstream crates can
//! drive their controls in integration tests the same way unit tests here
//! do.

/// The tree test harness.
mod harness;
/// The recording surface.
mod surface;

pub use harness::{Harness, HarnessBuilder};
pub use surface::{DrawOp, TestSurface};
