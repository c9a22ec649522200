//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the driver against the
//! simulated chip.  All tests run on the host (x86_64) with no real
//! hardware required.

mod driver_tests;
