use std::fmt;

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Dashboard,
    Banners,
}

impl ActivePanel {
    /// Cycle to the next panel.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Banners,
            Self::Banners => Self::Dashboard,
        }
    }

    /// Cycle to the previous panel.
    #[must_use]
    pub const fn prev(self) -> Self {
        // Two panels: backwards and forwards land on the same one
        self.next()
    }
}

impl fmt::Display for ActivePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Banners => write!(f, "Alerts"),
        }
    }
}
