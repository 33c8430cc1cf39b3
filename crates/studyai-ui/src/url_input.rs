//! Controlled URL field with a generate button.

/// Glyph shown on the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIcon {
    Idle,
    Busy,
}

impl SubmitIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            SubmitIcon::Idle => "⚡",
            SubmitIcon::Busy => "⏳",
        }
    }

    pub fn spinning(&self) -> bool {
        matches!(self, SubmitIcon::Busy)
    }
}

/// Emits the trimmed URL to `on_generate`. Starts no work of its own.
pub struct UrlInput<F> {
    value: String,
    loading: bool,
    on_generate: F,
}

impl<F> UrlInput<F>
where
    F: FnMut(String),
{
    pub fn new(on_generate: F) -> Self {
        Self {
            value: String::new(),
            loading: false,
            on_generate,
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.value.trim().is_empty()
    }

    pub fn icon(&self) -> SubmitIcon {
        if self.loading {
            SubmitIcon::Busy
        } else {
            SubmitIcon::Idle
        }
    }

    /// Form submission, by button or enter. Suppressed while loading or blank.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let url = self.value.trim().to_string();
        (self.on_generate)(url.clone());
        Some(url)
    }
}
