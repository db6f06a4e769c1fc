//! Per-owner display preferences.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::OwnerId;

/// Validation errors for preference input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferencesValidationError {
    #[error("theme must be one of light, dark; got {value}")]
    UnknownTheme { value: String },
}

/// Colour scheme for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Wire and storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = PreferencesValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(PreferencesValidationError::UnknownTheme {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored preferences; one row per owner.
///
/// `updated_at` is `None` for the defaults served before the owner has
/// saved anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(rename = "ownerId")]
    pub owner: OwnerId,
    pub theme: Theme,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPreferences {
    /// Defaults for an owner with no saved row.
    #[must_use]
    pub fn defaults_for(owner: OwnerId) -> Self {
        Self {
            owner,
            theme: Theme::default(),
            updated_at: None,
        }
    }

    /// Preferences saved at `now`.
    #[must_use]
    pub fn saved(owner: OwnerId, theme: Theme, now: DateTime<Utc>) -> Self {
        Self {
            owner,
            theme,
            updated_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("light", Theme::Light)]
    #[case("dark", Theme::Dark)]
    fn known_themes_parse(#[case] raw: &str, #[case] expected: Theme) {
        assert_eq!(raw.parse::<Theme>(), Ok(expected));
    }

    #[rstest]
    #[case("Dark")]
    #[case("solarized")]
    #[case("")]
    fn other_themes_are_rejected(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<Theme>(),
            Err(PreferencesValidationError::UnknownTheme {
                value: raw.to_owned()
            })
        );
    }

    #[rstest]
    fn defaults_serialise_as_light_without_timestamp() {
        let prefs = UserPreferences::defaults_for(OwnerId::new("user-1").expect("owner"));
        assert_eq!(
            serde_json::to_value(&prefs).expect("serialises"),
            json!({ "ownerId": "user-1", "theme": "light", "updatedAt": null })
        );
    }
}
