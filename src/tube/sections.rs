//! Topology of the oropharynx and nasal tubes.
//!
//! The oropharynx has 8 regions of controllable radius simulated as 10 delay
//! sections. Regions 4 and 5 span two sections each; the nasal branch couples
//! in through a three-way junction in the middle of region 4 (between S4 and
//! S5). The nasal tract has 6 sections of fixed radius except for the velum
//! port N1.
//!
//! ```text
//!  region   R1  R2  R3  R4      R5      R6  R7  R8
//!  section  S1  S2  S3  S4 | S5  S6  S7  S8  S9  S10 -> mouth
//!                          |
//!                          N1  N2  N3  N4  N5  N6 -> nose
//! ```

/// Number of oropharynx regions (and of oropharynx scattering coefficients).
pub const OROPHARYNX_REGIONS: usize = 8;

/// Number of oropharynx delay sections.
pub const OROPHARYNX_SECTIONS: usize = 10;

/// Number of nasal delay sections (and of nasal scattering coefficients).
pub const NASAL_SECTIONS: usize = 6;

/// Regions whose radius is carried by the control frame (R2..R8).
pub const CONTROLLED_REGIONS: usize = OROPHARYNX_REGIONS - 1;

/// Number of frication injection points (S3..S10).
pub const FRICATION_TAPS: usize = 8;

/// Fixed radius of region 1, just above the glottis, in cm.
pub const GLOTTAL_REGION_RADIUS: f64 = 0.8;

// Oropharynx sections.
pub const S1: usize = 0;
pub const S2: usize = 1;
pub const S3: usize = 2;
pub const S4: usize = 3;
pub const S5: usize = 4;
pub const S6: usize = 5;
pub const S7: usize = 6;
pub const S8: usize = 7;
pub const S9: usize = 8;
pub const S10: usize = 9;

// Oropharynx regions.
pub const R1: usize = 0;
pub const R2: usize = 1;
pub const R3: usize = 2;
pub const R4: usize = 3;
pub const R5: usize = 4;
pub const R6: usize = 5;
pub const R7: usize = 6;
pub const R8: usize = 7;

// Oropharynx scattering coefficients.
pub const C1: usize = R1; // R1-R2 (S1-S2)
pub const C2: usize = R2; // R2-R3 (S2-S3)
pub const C3: usize = R3; // R3-R4 (S3-S4)
pub const C4: usize = R4; // R4-R5 (S5-S6)
pub const C5: usize = R5; // R5-R6 (S7-S8)
pub const C6: usize = R6; // R6-R7 (S8-S9)
pub const C7: usize = R7; // R7-R8 (S9-S10)
pub const C8: usize = R8; // R8-air (mouth aperture)

// Nasal sections.
pub const N1: usize = 0;
pub const N2: usize = 1;
pub const N3: usize = 2;
pub const N4: usize = 3;
pub const N5: usize = 4;
pub const N6: usize = 5;

// Nasal scattering coefficients.
pub const NC1: usize = N1; // N1-N2
pub const NC2: usize = N2;
pub const NC3: usize = N3;
pub const NC4: usize = N4;
pub const NC5: usize = N5;
pub const NC6: usize = N6; // N6-air (nostril aperture)

// Three-way junction branches.
pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;
pub const UPPER: usize = 2;

// Frication taps.
pub const FC1: usize = 0; // S3
pub const FC2: usize = 1; // S4
pub const FC3: usize = 2; // S5
pub const FC4: usize = 3; // S6
pub const FC5: usize = 4; // S7
pub const FC6: usize = 5; // S8
pub const FC7: usize = 6; // S9
pub const FC8: usize = 7; // S10

/// Region each oropharynx section belongs to.
pub const SECTION_REGION: [usize; OROPHARYNX_SECTIONS] = [R1, R2, R3, R4, R4, R5, R5, R6, R7, R8];

/// Pressure components travelling towards the lips (`top`) and towards the
/// glottis (`bottom`) in one section.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Wave {
    pub top: f64,
    pub bottom: f64,
}

/// Wave components of every section at one time step.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TubeState {
    pub oropharynx: [Wave; OROPHARYNX_SECTIONS],
    pub nasal: [Wave; NASAL_SECTIONS],
}
