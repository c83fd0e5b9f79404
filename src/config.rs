// ---------------------------------------------------------------------------
// Peak defaults
// ---------------------------------------------------------------------------

/// Values used for a peak whose position or height is not given.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakDefaults {
    /// Position of an unplaced peak.
    pub position: Vec<f64>,
    /// Height of a peak created without one.
    pub height: f64,
}

pub const DEFAULT_HEIGHT: f64 = 1.0;

impl Default for PeakDefaults {
    fn default() -> Self {
        Self {
            position: vec![0.0, 1.0],
            height: DEFAULT_HEIGHT,
        }
    }
}
