//! ruling-test - Regression test framework for the ruling workspace
//!
//! Regression tests live in `crates/<crate>/tests/*_reg.rs`. Each one
//! opens a [`RegParams`], records numbered comparisons, and asserts on
//! [`RegParams::cleanup`] at the end. Pages are drawn with [`PageBuilder`]
//! instead of being loaded from disk.
//!
//! # Usage
//!
//! ```ignore
//! use ruling_test::{PageBuilder, RegParams};
//!
//! let mut rp = RegParams::new("linefind");
//! let pix = PageBuilder::new(500, 300)?.hline(100, 10, 400, 3).build();
//! rp.compare_values(1.0, lines.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log filter for the library crates (e.g. `ruling_lines=trace`)

mod error;
mod page;
mod params;

pub use error::{TestError, TestResult};
pub use page::PageBuilder;
pub use params::RegParams;

/// Route `log` output of the library crates to the test harness.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
