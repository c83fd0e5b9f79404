//! Data layer: spectra, the peaks identified on them, and peak variants.
//!
//! Ownership:
//! ```text
//!   ┌───────────────┐
//!   │ SpectrumStore │  owns every Spectrum, hands out SpectrumId
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Spectrum │  x, y, Vec<DynPeak>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   Peak   │  position, height, SpectrumId (back-reference), kind
//!   └──────────┘
//! ```

pub mod kinds;
pub mod model;
pub mod peak;
