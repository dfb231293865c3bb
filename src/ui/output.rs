//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Values plus status and warning lines.
    #[default]
    Normal,
    /// Values and errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows status and warning messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
