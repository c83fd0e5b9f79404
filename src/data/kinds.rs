use super::peak::{format_coordinate, SpectrumLabel};

// ---------------------------------------------------------------------------
// Concrete peak variants
// ---------------------------------------------------------------------------

/// A plain peak annotated with free text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimplePeak {
    pub annotation: String,
}

impl SimplePeak {
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
        }
    }
}

impl SpectrumLabel for SimplePeak {
    fn label(&self) -> String {
        self.annotation.clone()
    }
}

/// A broad feature: an annotation plus the band width in axis units.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub annotation: String,
    pub width: f64,
}

impl Band {
    pub fn new(annotation: impl Into<String>, width: f64) -> Self {
        Self {
            annotation: annotation.into(),
            width,
        }
    }
}

impl SpectrumLabel for Band {
    fn label(&self) -> String {
        format!("{} (width {})", self.annotation, format_coordinate(self.width))
    }
}
