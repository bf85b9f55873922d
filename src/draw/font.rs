//! Font descriptor for text stamping.

use serde::{Deserialize, Serialize};

/// Font configuration for text stamping.
///
/// Size is not part of the descriptor: the stamp size is derived from the brush
/// size at commit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this descriptor to a Pango font description string without size.
    ///
    /// Format: "Family Style Weight", e.g. "Sans Bold" or "Monospace Italic".
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.join(" ")
    }

    /// Builds a Pango description with an absolute pixel size.
    pub fn to_pango(&self, pixel_size: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.to_pango_string());
        desc.set_absolute_size(pixel_size * pango::SCALE as f64);
        desc
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_descriptor_is_plain_sans() {
        assert_eq!(FontDescriptor::default().to_pango_string(), "Sans");
    }

    #[test]
    fn style_and_weight_are_capitalized() {
        let font = FontDescriptor::new(
            "JetBrains Mono".to_string(),
            "bold".to_string(),
            "italic".to_string(),
        );
        assert_eq!(font.to_pango_string(), "JetBrains Mono Italic Bold");
    }
}
