//! Labeled peaks and bands attached to spectra.

pub mod config;
pub mod data;
pub mod error;

pub use config::PeakDefaults;
pub use data::kinds::{Band, SimplePeak};
pub use data::model::{Spectrum, SpectrumId, SpectrumStore};
pub use data::peak::{DynPeak, Peak, SpectrumLabel};
pub use error::{PeakError, Result};
