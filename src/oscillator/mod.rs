//! Glottal excitation.

pub mod glottal_source;
