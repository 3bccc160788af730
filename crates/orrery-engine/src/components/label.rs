use serde::Serialize;

/// Billboard text rendered by the page (body names).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelComponent {
    /// Display text, already upper-cased.
    pub text: String,
}

impl LabelComponent {
    pub fn new(text: &str) -> Self {
        Self { text: text.to_uppercase() }
    }
}
