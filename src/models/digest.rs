//! Rendered message body for one tracked listing.

use serde::Serialize;

/// Stand-in for an empty field name or value. Discord rejects empty fields.
pub const BLANK_FIELD: &str = "\u{200b}";

/// A single titled field of a digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A message body ready to hand to a [`MessageSink`](crate::sink::MessageSink).
///
/// Mirrors the shape of a Discord embed: title, accent color, optional
/// description, ordered fields and an optional footer caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    pub title: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<DigestField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Digest {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            description: None,
            fields: Vec::new(),
            footer: None,
        }
    }

    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) {
        self.fields.push(DigestField {
            name: name.into(),
            value: value.into(),
            inline,
        });
    }

    /// Remove the last `count` fields (fewer if the digest holds fewer).
    pub fn truncate_fields(&mut self, count: usize) {
        let keep = self.fields.len().saturating_sub(count);
        self.fields.truncate(keep);
    }

    /// Total character count of all text, as Discord measures embed size.
    ///
    /// Empty field names and values count as [`BLANK_FIELD`], which is what
    /// gets sent in their place.
    pub fn size(&self) -> usize {
        let chars = |s: &str| s.chars().count();
        let field_chars = |s: &str| {
            if s.is_empty() {
                chars(BLANK_FIELD)
            } else {
                chars(s)
            }
        };

        chars(&self.title)
            + self.description.as_deref().map_or(0, chars)
            + self
                .fields
                .iter()
                .map(|f| field_chars(&f.name) + field_chars(&f.value))
                .sum::<usize>()
            + self.footer.as_deref().map_or(0, chars)
    }
}
