use std::fmt;

use log::{debug, trace};

use super::model::SpectrumId;
use crate::config::{PeakDefaults, DEFAULT_HEIGHT};
use crate::error::{PeakError, Result};

// ---------------------------------------------------------------------------
// SpectrumLabel – the per-variant capability
// ---------------------------------------------------------------------------

/// Something that can name a feature of a spectrum, e.g. an assignment or a
/// chemical shift annotation.
pub trait SpectrumLabel: fmt::Debug {
    /// The label displayed next to the feature.
    fn label(&self) -> String;
}

impl<T: SpectrumLabel + ?Sized> SpectrumLabel for Box<T> {
    fn label(&self) -> String {
        (**self).label()
    }
}

/// A peak whose variant has been erased, as stored inside a [`Spectrum`].
///
/// [`Spectrum`]: super::model::Spectrum
pub type DynPeak = Peak<Box<dyn SpectrumLabel>>;

// ---------------------------------------------------------------------------
// Peak – position, height and back-reference shared by all variants
// ---------------------------------------------------------------------------

/// A peak or band of a spectrum.
///
/// `K` supplies the label. The position length is fixed when the peak is
/// built; setters only overwrite coordinates in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Peak<K> {
    position: Vec<f64>,
    height: f64,
    spectrum: SpectrumId,
    kind: K,
}

impl<K: SpectrumLabel> Peak<K> {
    /// Create a peak at a copy of `position`.
    pub fn new(spectrum: SpectrumId, position: &[f64], height: f64, kind: K) -> Self {
        Self {
            position: position.to_vec(),
            height,
            spectrum,
            kind,
        }
    }

    /// Create a peak of height `1.0`.
    pub fn with_default_height(spectrum: SpectrumId, position: &[f64], kind: K) -> Self {
        Self::new(spectrum, position, DEFAULT_HEIGHT, kind)
    }

    /// Create a peak whose position and height both come from `defaults`.
    pub fn from_defaults(spectrum: SpectrumId, defaults: &PeakDefaults, kind: K) -> Self {
        Self::new(spectrum, &defaults.position, defaults.height, kind)
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Overwrite the height. Any value is accepted.
    pub fn set_height(&mut self, height: f64) {
        trace!("peak height {} -> {}", self.height, height);
        self.height = height;
    }

    /// Read-only view of the coordinates. Use `to_vec()` for an owned copy.
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Overwrite the first two coordinates with the first two values of
    /// `position`. Coordinates from index 2 on are left as they are.
    ///
    /// Fails without modifying the peak if either sequence is shorter than 2.
    pub fn set_position(&mut self, position: &[f64]) -> Result<()> {
        check_index(1, position.len())?;
        check_index(1, self.position.len())?;
        trace!(
            "peak position [{}, {}] -> [{}, {}]",
            self.position[0],
            self.position[1],
            position[0],
            position[1]
        );
        self.position[0] = position[0];
        self.position[1] = position[1];
        Ok(())
    }

    /// Shift the peak along the first axis by `amount[0]`. Only coordinate 0
    /// moves; the rest of `amount` is ignored.
    pub fn translate(&mut self, amount: &[f64]) -> Result<()> {
        check_index(0, amount.len())?;
        check_index(0, self.position.len())?;
        trace!("translate peak by {}", amount[0]);
        self.position[0] += amount[0];
        Ok(())
    }

    /// Handle of the spectrum this peak belongs to.
    pub fn spectrum(&self) -> SpectrumId {
        self.spectrum
    }

    /// Point the peak at another spectrum. Does not move it between
    /// collections; see [`SpectrumStore::attach_peak`] for that.
    ///
    /// [`SpectrumStore::attach_peak`]: super::model::SpectrumStore::attach_peak
    pub fn set_spectrum(&mut self, spectrum: SpectrumId) {
        self.spectrum = spectrum;
    }

    pub fn label(&self) -> String {
        self.kind.label()
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut K {
        &mut self.kind
    }

    /// Erase the variant so the peak can sit next to other variants.
    pub fn into_dyn(self) -> DynPeak
    where
        K: 'static,
    {
        let kind: Box<dyn SpectrumLabel> = Box::new(self.kind);
        Peak {
            position: self.position,
            height: self.height,
            spectrum: self.spectrum,
            kind,
        }
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        debug!("rejected access to index {index} of a length {len} sequence");
        Err(PeakError::IndexOutOfRange { index, len })
    }
}

/// Render a coordinate the way JCAMP-era tooling prints doubles: plain
/// decimal with at least one fractional digit for `1e-3 <= |v| < 1e7`,
/// `d.dddE±n` outside that range, and `NaN` / `Infinity` / `-Infinity`.
pub(crate) fn format_coordinate(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        // keeps the sign of -0.0
        return format!("{v:?}");
    }

    let magnitude = v.abs();
    if (1e-3..1e7).contains(&magnitude) {
        let plain = format!("{v}");
        return if plain.contains('.') {
            plain
        } else {
            plain + ".0"
        };
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `4.0013e8`, `5e-4`.
    let sci = format!("{v:e}");
    match sci.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => sci,
    }
}

/// Debug form: `Peak[p0,p1,...]: label`.
impl<K: SpectrumLabel> fmt::Display for Peak<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coords: Vec<String> = self.position.iter().map(|&v| format_coordinate(v)).collect();
        write!(f, "Peak[{}]: {}", coords.join(","), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::kinds::{Band, SimplePeak};
    use approx::assert_relative_eq;

    fn sid() -> SpectrumId {
        SpectrumId::from_raw(0)
    }

    fn peak(position: &[f64]) -> Peak<SimplePeak> {
        Peak::with_default_height(sid(), position, SimplePeak::new("A"))
    }

    #[test]
    fn new_copies_position_and_height() {
        let mut source = vec![3.0, 4.0, 5.0];
        let p = Peak::new(sid(), &source, 2.5, SimplePeak::new("A"));
        source[0] = 99.0;
        assert_eq!(p.position(), &[3.0, 4.0, 5.0]);
        assert_eq!(p.height(), 2.5);
    }

    #[test]
    fn default_height_is_one() {
        assert_eq!(peak(&[1.0, 2.0]).height(), 1.0);
    }

    #[test]
    fn from_defaults_uses_unit_pair() {
        let p = Peak::from_defaults(sid(), &PeakDefaults::default(), SimplePeak::new("x"));
        assert_eq!(p.position(), &[0.0, 1.0]);
        assert_eq!(p.height(), 1.0);
    }

    #[test]
    fn set_height_accepts_negative() {
        let mut p = peak(&[1.0, 2.0]);
        p.set_height(-7.25);
        assert_eq!(p.height(), -7.25);
    }

    #[test]
    fn set_position_only_writes_first_two() {
        let mut p = peak(&[1.0, 2.0, 3.0, 4.0]);
        p.set_position(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(p.position(), &[10.0, 20.0, 3.0, 4.0]);
    }

    #[test]
    fn set_position_short_argument_fails_untouched() {
        let mut p = peak(&[1.0, 2.0]);
        let err = p.set_position(&[5.0]).unwrap_err();
        assert_eq!(err, PeakError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(p.position(), &[1.0, 2.0]);
    }

    #[test]
    fn set_position_on_one_dimensional_peak_fails() {
        let mut p = peak(&[1.0]);
        let err = p.set_position(&[5.0, 6.0]).unwrap_err();
        assert_eq!(err, PeakError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(p.position(), &[1.0]);
    }

    #[test]
    fn translate_moves_first_axis_only() {
        let mut p = peak(&[1.0, 2.0, 3.0]);
        p.translate(&[0.5, 100.0]).unwrap();
        assert_relative_eq!(p.position()[0], 1.5);
        assert_eq!(&p.position()[1..], &[2.0, 3.0]);
    }

    #[test]
    fn translate_empty_amount_fails() {
        let mut p = peak(&[1.0, 2.0]);
        let err = p.translate(&[]).unwrap_err();
        assert_eq!(err, PeakError::IndexOutOfRange { index: 0, len: 0 });
        assert_eq!(p.position(), &[1.0, 2.0]);
    }

    #[test]
    fn translate_empty_position_fails() {
        let mut p = peak(&[]);
        assert!(p.translate(&[1.0]).is_err());
    }

    #[test]
    fn display_matches_debug_format() {
        assert_eq!(peak(&[1.0, 2.0]).to_string(), "Peak[1.0,2.0]: A");
        assert_eq!(peak(&[0.25]).to_string(), "Peak[0.25]: A");
        assert_eq!(peak(&[]).to_string(), "Peak[]: A");
    }

    #[test]
    fn display_uses_exponent_form_outside_plain_range() {
        let p = peak(&[1.0e7, 0.0005, f64::INFINITY, 400.13e6]);
        assert_eq!(p.to_string(), "Peak[1.0E7,5.0E-4,Infinity,4.0013E8]: A");
    }

    #[test]
    fn coordinate_plain_range_keeps_fraction() {
        assert_eq!(format_coordinate(0.001), "0.001");
        assert_eq!(format_coordinate(1234567.0), "1234567.0");
        assert_eq!(format_coordinate(9999999.5), "9999999.5");
        assert_eq!(format_coordinate(-2.5), "-2.5");
    }

    #[test]
    fn coordinate_exponent_form() {
        assert_eq!(format_coordinate(1.0e7), "1.0E7");
        assert_eq!(format_coordinate(-1.5e-7), "-1.5E-7");
        assert_eq!(format_coordinate(9.99e-4), "9.99E-4");
        assert_eq!(format_coordinate(1.0e300), "1.0E300");
        assert_eq!(format_coordinate(f64::MIN_POSITIVE), "2.2250738585072014E-308");
    }

    #[test]
    fn coordinate_special_values() {
        assert_eq!(format_coordinate(f64::NAN), "NaN");
        assert_eq!(format_coordinate(f64::INFINITY), "Infinity");
        assert_eq!(format_coordinate(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_coordinate(0.0), "0.0");
        assert_eq!(format_coordinate(-0.0), "-0.0");
    }

    #[test]
    fn spectrum_handle_round_trips() {
        let mut p = peak(&[1.0, 2.0]);
        assert_eq!(p.spectrum(), sid());
        p.set_spectrum(SpectrumId::from_raw(7));
        assert_eq!(p.spectrum(), SpectrumId::from_raw(7));
    }

    #[test]
    fn into_dyn_keeps_state_and_label() {
        let p = Peak::new(sid(), &[4.0, 5.0], 3.0, Band::new("C=O", 12.0));
        let expected = p.to_string();
        let d: DynPeak = p.into_dyn();
        assert_eq!(d.to_string(), expected);
        assert_eq!(d.height(), 3.0);
        assert_eq!(d.label(), "C=O (width 12.0)");
    }
}
