//! Noise generation for aspiration and frication.

pub mod noise_filter;
pub mod noise_source;
