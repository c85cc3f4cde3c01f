//! Theme module - the palette the user picked

/// Display theme selection, persisted with the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Light palette (default)
    #[default]
    Light,

    /// Dark palette
    Dark,

    /// Colorblind-safe palette
    Colorblind,
}

impl Theme {
    /// Get the theme name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Colorblind => "colorblind",
        }
    }

    /// Parse a theme from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "colorblind" => Some(Theme::Colorblind),
            _ => None,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid theme: {}", s))
    }
}
