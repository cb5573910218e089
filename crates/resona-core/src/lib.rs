//! Resona Core - DSP primitives for acoustic measurement
//!
//! This crate provides the numerical building blocks used by the resona
//! analysis engine:
//!
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook band-pass
//!   coefficients and 64-bit accumulation
//! - [`linear_fit`] - Least-squares linear regression with Pearson
//!   correlation, used for decay-slope estimation
//! - Level math: [`db_to_linear`], [`linear_to_db`], [`rms`], [`peak_abs`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! resona-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod math;
pub mod regression;

// Re-export main types at crate root
pub use biquad::{Biquad, BiquadCoefficients};
pub use math::{DB_FLOOR, db_to_linear, linear_to_db, peak_abs, rms};
pub use regression::{LinearFit, linear_fit};
