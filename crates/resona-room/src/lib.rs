//! Resona Room - geometric room model and reverberation prediction
//!
//! This crate holds the data model side of a reverberation measurement:
//!
//! - [`FrequencyBand`] - the six ISO octave bands from 125 Hz to 4 kHz
//! - [`AcousticMaterial`] - per-band absorption profiles, with a preset
//!   library of common building materials in [`material::presets`]
//! - [`Surface`] / [`RoomModel`] - named surfaces and the room they bound
//! - [`predict`] - Sabine and Eyring RT60 predictions with the simplified
//!   air-absorption correction
//!
//! The model is consumed by `resona-engine`, which compares measured decay
//! times against the predictions computed here.

pub mod band;
pub mod error;
pub mod material;
pub mod predict;
pub mod room;
pub mod surface;

// Re-export main types at crate root
pub use band::FrequencyBand;
pub use error::RoomError;
pub use material::AcousticMaterial;
pub use predict::{absorption_area, air_attenuation, eyring_rt60, sabine_rt60};
pub use room::RoomModel;
pub use surface::Surface;
