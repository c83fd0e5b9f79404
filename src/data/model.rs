use std::fmt;

use log::debug;

use super::peak::{DynPeak, Peak, SpectrumLabel};
use crate::error::{PeakError, Result};

// ---------------------------------------------------------------------------
// SpectrumId – non-owning handle to a spectrum in a store
// ---------------------------------------------------------------------------

/// Handle to a spectrum held by a [`SpectrumStore`].
///
/// Peaks keep one of these instead of a pointer so a spectrum and its peaks
/// never own each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpectrumId(usize);

impl SpectrumId {
    pub fn from_raw(slot: usize) -> Self {
        SpectrumId(slot)
    }
}

impl fmt::Display for SpectrumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Spectrum – one measured curve and its peaks
// ---------------------------------------------------------------------------

/// A single spectrum with the peaks identified on it.
#[derive(Debug)]
pub struct Spectrum {
    pub title: String,
    /// Abscissa (wavenumber, ppm, m/z, ...).
    pub x: Vec<f64>,
    /// Intensity axis – same length as `x`.
    pub y: Vec<f64>,
    peaks: Vec<DynPeak>,
}

impl Spectrum {
    pub fn new(title: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(PeakError::AxisLengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        Ok(Spectrum {
            title: title.into(),
            x,
            y,
            peaks: Vec::new(),
        })
    }

    pub fn peaks(&self) -> &[DynPeak] {
        &self.peaks
    }

    /// Mutable access to individual peaks. The list itself only changes
    /// through the store, which keeps back-references consistent.
    pub fn peaks_mut(&mut self) -> &mut [DynPeak] {
        &mut self.peaks
    }

    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }

    /// Whether the spectrum has no data points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SpectrumStore – owner of all spectra
// ---------------------------------------------------------------------------

/// Arena of spectra addressed by [`SpectrumId`].
///
/// Released slots stay empty, so an old handle never resolves to a newer
/// spectrum.
#[derive(Debug, Default)]
pub struct SpectrumStore {
    slots: Vec<Option<Spectrum>>,
    live: usize,
}

impl SpectrumStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spectrum: Spectrum) -> SpectrumId {
        let id = SpectrumId(self.slots.len());
        debug!("insert spectrum {id} '{}' ({} points)", spectrum.title, spectrum.x.len());
        self.slots.push(Some(spectrum));
        self.live += 1;
        id
    }

    pub fn get(&self, id: SpectrumId) -> Result<&Spectrum> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(PeakError::UnknownSpectrum(id))
    }

    pub fn get_mut(&mut self, id: SpectrumId) -> Result<&mut Spectrum> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(PeakError::UnknownSpectrum(id))
    }

    /// Hand a peak over to spectrum `id`, pointing its back-reference there.
    /// Returns the index of the peak within the spectrum.
    pub fn attach_peak<K>(&mut self, id: SpectrumId, peak: Peak<K>) -> Result<usize>
    where
        K: SpectrumLabel + 'static,
    {
        self.attach_dyn(id, peak.into_dyn())
    }

    /// Same as [`attach_peak`](Self::attach_peak) for a peak that is already
    /// type-erased, e.g. one returned by [`detach_peak`](Self::detach_peak).
    pub fn attach_dyn(&mut self, id: SpectrumId, mut peak: DynPeak) -> Result<usize> {
        let spectrum = self.get_mut(id)?;
        peak.set_spectrum(id);
        debug!("attach {peak} to spectrum {id}");
        spectrum.peaks.push(peak);
        Ok(spectrum.peaks.len() - 1)
    }

    /// Remove the peak at `index` from spectrum `id` and give it back.
    pub fn detach_peak(&mut self, id: SpectrumId, index: usize) -> Result<DynPeak> {
        let spectrum = self.get_mut(id)?;
        let len = spectrum.peaks.len();
        if index >= len {
            debug!("no peak {index} on spectrum {id} ({len} peaks)");
            return Err(PeakError::IndexOutOfRange { index, len });
        }
        let peak = spectrum.peaks.remove(index);
        debug!("detach {peak} from spectrum {id}");
        Ok(peak)
    }

    /// Drop spectrum `id` from the store; its peaks leave with it.
    pub fn release(&mut self, id: SpectrumId) -> Result<Spectrum> {
        let spectrum = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(PeakError::UnknownSpectrum(id))?;
        self.live -= 1;
        debug!("release spectrum {id} with {} peaks", spectrum.peaks.len());
        Ok(spectrum)
    }

    /// Handles of all spectra still held, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = SpectrumId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| SpectrumId(i))
    }

    /// Number of spectra still held.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
