//! Error types for table configuration.

use std::fmt;

/// Errors that can occur while loading or validating [`crate::TableSettings`].
#[derive(Debug)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    Io(std::io::Error),
    /// The settings file is not valid JSON for this schema.
    Parse(serde_json::Error),
    /// A coefficient is non-finite or outside its allowed range.
    OutOfRange { field: &'static str, value: f32 },
    /// The pocket layout is empty.
    EmptyLayout,
    /// A number appears in more than one pocket.
    DuplicatePocket { number: u8 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings i/o failed: {}", e),
            SettingsError::Parse(e) => write!(f, "settings parse failed: {}", e),
            SettingsError::OutOfRange { field, value } => {
                write!(f, "{} out of range: {}", field, value)
            }
            SettingsError::EmptyLayout => write!(f, "wheel layout has no pockets"),
            SettingsError::DuplicatePocket { number } => {
                write!(f, "pocket number {} appears more than once", number)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
