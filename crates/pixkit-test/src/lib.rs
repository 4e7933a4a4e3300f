//! pixkit-test - Regression test framework for pixkit
//!
//! This crate provides the helpers shared by the regression tests of the
//! other pixkit crates:
//!
//! - [`RegParams`]: records numeric and image comparisons and reports them
//!   at the end of a test
//! - [`create_sub_image_of_gray`] / [`create_sub_image_of_interleaved`]:
//!   copy an image into a padded, strided buffer so algorithms are checked
//!   against sub-images too
//! - [`init_tracing`]: route `tracing` output to the test harness
//!
//! # Usage
//!
//! ```ignore
//! use pixkit_test::RegParams;
//!
//! let mut rp = RegParams::new("thin");
//! rp.compare_values(18.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print intermediate images
//! - `RUST_LOG`: filter for [`init_tracing`]

mod error;
mod params;
mod subimage;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use subimage::{SUB_IMAGE_PAD, create_sub_image_of_gray, create_sub_image_of_interleaved};

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
