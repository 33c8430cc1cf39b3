/// Upload/generation status shown by the UI.
///
/// `idle -> uploading -> {success -> idle, error -> idle}`; success and error are
/// transient display states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Uploading,
    Success,
    Error(String),
}

impl GenerationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GenerationState::Idle)
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, GenerationState::Uploading)
    }

    /// Label of the generate button in this state.
    pub fn button_label(&self) -> &'static str {
        match self {
            GenerationState::Uploading => "Processing...",
            GenerationState::Success => "Success!",
            GenerationState::Idle | GenerationState::Error(_) => "Generate",
        }
    }
}

/// Bytes handed to the transport so far, out of `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub sent: u64,
    pub total: u64,
}

impl TransferProgress {
    /// Whole percentage, clamped to 0..=100. An empty body counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.sent.min(self.total).saturating_mul(100) / self.total;
        pct as u8
    }
}
