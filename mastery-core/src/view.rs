//! View-mode selection persisted in the location fragment.
//!
//! The host UI owns the location bar; the core owns only the pure
//! round-trip between the three calculator modes and their fragment tokens.

/// One of the three calculator views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Mastery,
    Packs,
    Draw,
}

impl ViewMode {
    /// The location-fragment token for this mode.
    #[must_use]
    pub const fn fragment(self) -> &'static str {
        match self {
            Self::Mastery => "mastery",
            Self::Packs => "packs",
            Self::Draw => "draw",
        }
    }

    /// Parse a location fragment (with or without the leading `#`).
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        match fragment.trim_start_matches('#') {
            "mastery" => Some(Self::Mastery),
            "packs" => Some(Self::Packs),
            "draw" => Some(Self::Draw),
            _ => None,
        }
    }
}
