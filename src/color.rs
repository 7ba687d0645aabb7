use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: predicted class → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct predicted classes to distinct colours.
///
/// Only built for class-like outputs; continuous (float) predictions get no map.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// At most this many classes get their own colour.
    pub const MAX_CLASSES: usize = 24;

    /// Build a colour map from a prediction column, or `None` for
    /// continuous outputs.
    pub fn for_predictions(values: &[CellValue]) -> Option<Self> {
        if values.iter().any(|v| matches!(v, CellValue::Float(_))) {
            return None;
        }
        let classes: BTreeSet<String> = values.iter().map(|v| v.to_string()).collect();
        if classes.is_empty() || classes.len() > Self::MAX_CLASSES {
            return None;
        }
        let palette = generate_palette(classes.len());
        Some(ColorMap {
            mapping: classes.into_iter().zip(palette).collect(),
            default_color: Color32::GRAY,
        })
    }

    /// Look up the colour for a predicted value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(&value.to_string())
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (class label → colour), sorted by label.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping.iter().map(|(v, c)| (v.clone(), *c)).collect()
    }
}
