use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// CSS class used for the message bubble.
    pub fn css_class(&self) -> &'static str {
        match self {
            Role::User => "user-msg",
            Role::Assistant => "ai-msg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Pebble",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Image { src: String, alt: String },
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub role: Role,
    pub content: Content,
}

impl ChatEntry {
    pub fn new(role: Role, content: Content) -> Self {
        Self { role, content }
    }

    pub fn user(text: String) -> Self {
        Self::new(Role::User, Content::Text(text))
    }

    pub fn assistant(text: String) -> Self {
        Self::new(Role::Assistant, Content::Text(text))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Image { .. } => None,
        }
    }
}

/// A single label/probability pair as returned by `Model.predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    #[serde(rename = "className")]
    pub class_name: String,
    pub probability: f64,
}

impl Prediction {
    pub fn new(class_name: impl Into<String>, probability: f64) -> Self {
        Self {
            class_name: class_name.into(),
            probability,
        }
    }
}
