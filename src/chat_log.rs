use crate::types::{ChatEntry, Content, Role};

/// Append-only transcript. Entries are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, role: Role, text: impl Into<String>) {
        self.entries
            .push(ChatEntry::new(role, Content::Text(text.into())));
    }

    pub fn append_image(&mut self, role: Role, src: impl Into<String>, alt: impl Into<String>) {
        self.entries.push(ChatEntry::new(
            role,
            Content::Image {
                src: src.into(),
                alt: alt.into(),
            },
        ));
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
