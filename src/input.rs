/// Smallest cap on the text area height, in CSS pixels.
pub const MIN_HEIGHT_CAP: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Idle,
    Composing,
    Submitted,
}

/// What a keydown on the text area should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send the message; the default newline must be suppressed.
    Submit,
    /// Let the browser insert a newline.
    Newline,
    Ignore,
}

/// Text entry state: current value, lifecycle state and the height the
/// text area should be rendered at.
#[derive(Debug, Clone, PartialEq)]
pub struct InputController {
    value: String,
    state: InputState,
    /// `None` renders as `height: auto`.
    height: Option<f64>,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            state: InputState::Idle,
            height: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    #[cfg(test)]
    pub fn state(&self) -> InputState {
        self.state
    }

    #[cfg(test)]
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    pub fn edit(&mut self, value: String) {
        self.state = if value.is_empty() {
            InputState::Idle
        } else {
            InputState::Composing
        };
        self.value = value;
    }

    pub fn key(&self, key: &str, shift: bool) -> KeyAction {
        match (key, shift) {
            ("Enter", false) => KeyAction::Submit,
            ("Enter", true) => KeyAction::Newline,
            _ => KeyAction::Ignore,
        }
    }

    /// Takes the trimmed text out of the input. Whitespace-only text is
    /// left in place and yields `None`.
    pub fn submit(&mut self) -> Option<String> {
        let text = self.value.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.value.clear();
        self.height = None;
        self.state = InputState::Submitted;
        Some(text)
    }

    /// Returns to `Idle` once the reply for a submission has been logged.
    /// Text typed in the meantime keeps the input `Composing`.
    pub fn settle(&mut self) {
        if self.state == InputState::Submitted {
            self.state = InputState::Idle;
        }
    }

    /// Records the rendered content height, clamped to the viewport cap.
    pub fn resize(&mut self, scroll_height: f64, viewport_height: f64) -> f64 {
        let height = capped_height(scroll_height, viewport_height);
        self.height = Some(height);
        height
    }

    /// Inline style for the text area.
    pub fn height_style(&self) -> String {
        match self.height {
            Some(h) => format!("height: {h}px;"),
            None => "height: auto;".to_string(),
        }
    }
}

/// Half the viewport, never below [`MIN_HEIGHT_CAP`].
pub fn height_cap(viewport_height: f64) -> f64 {
    (viewport_height * 0.5).max(MIN_HEIGHT_CAP)
}

pub fn capped_height(scroll_height: f64, viewport_height: f64) -> f64 {
    scroll_height.min(height_cap(viewport_height))
}
