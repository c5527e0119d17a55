// src/types/rich_text.rs
//! Inline rich text runs — the text content inside blocks.

use serde::{Deserialize, Serialize};

/// The content variant of a rich text run.
///
/// Only `Text` carries structured content. Mentions and equations are
/// opaque to the blog renderer and fall back to `plain_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    Mention,
    Equation(EquationData),
}

/// One span of text carrying its own style annotations.
///
/// `plain_text` is the display fallback for every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item — the most common rich text variant.
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Create a styled text item.
    pub fn styled(text: &str, annotations: Annotations) -> Self {
        Self {
            annotations,
            ..Self::plain_text(text)
        }
    }

    /// Create a text item that links to a URL.
    pub fn linked(text: &str, url: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: Some(Link {
                    url: url.to_string(),
                }),
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: Some(url.to_string()),
        }
    }
}

/// Concatenates the plain display text of a run sequence.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|i| i.plain_text.as_str()).collect()
}

/// An inline hyperlink target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

/// Independent boolean style annotations on a run.
///
/// Several may be active simultaneously; the formatter nests them in a
/// fixed order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationData {
    pub expression: String,
}
