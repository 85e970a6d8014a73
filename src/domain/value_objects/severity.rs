use serde::{Deserialize, Serialize};

/// Severity level of a banner, drives its styling and tone frequency
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Danger,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

impl Severity {
    /// Style class carried by a banner of this severity (`alert-<type>`)
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Info => "alert-info",
            Self::Warning => "alert-warning",
            Self::Danger => "alert-danger",
        }
    }

    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Info => "\u{2139}\u{fe0f}",
            Self::Warning => "\u{26a0}\u{fe0f}",
            Self::Danger => "\u{1f534}",
        }
    }
}
