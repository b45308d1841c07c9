//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the bridge over raw bytes
//! against mock adapters. All tests run on the host (x86_64) with no real
//! hardware required.

mod bridge_tests;
mod mock_hw;
mod simulator_tests;
