//! Page lines as delivered by the PDF text-layer extractor.

use serde::{Deserialize, Serialize};

/// A single line of text as it appeared on one page of the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLine {
    /// Whitespace-normalized line text
    pub text: String,

    /// Whether the line was set in a bold face
    #[serde(default)]
    pub is_bold: bool,

    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,

    /// Vertical position in page coordinates (ordering only)
    #[serde(default, rename = "y", alias = "verticalPosition")]
    pub vertical_position: f32,

    /// Font name reported by the extractor (e.g., "Helvetica-Bold")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
}

fn default_page() -> u32 {
    1
}

impl PageLine {
    /// Create a new line.
    pub fn new(text: impl Into<String>, page: u32, vertical_position: f32) -> Self {
        Self {
            text: text.into(),
            is_bold: false,
            page,
            vertical_position,
            font_name: None,
        }
    }

    /// Mark the line as bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    /// Attach a font name; bold faces also set `is_bold`.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        let font_name = font_name.into();
        self.is_bold |= is_bold_font_name(&font_name);
        self.font_name = Some(font_name);
        self
    }

    /// Whether the line counts as bold, from either the flag or the font name.
    pub fn effective_bold(&self) -> bool {
        self.is_bold || self.font_name.as_deref().is_some_and(is_bold_font_name)
    }
}

/// Check whether a font name denotes a bold weight.
pub fn is_bold_font_name(font_name: &str) -> bool {
    let name = font_name.to_lowercase();
    ["bold", "black", "heavy", "semibold", "demi"]
        .iter()
        .any(|weight| name.contains(weight))
}
