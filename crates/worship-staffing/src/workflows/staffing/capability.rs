use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form of a member capability ("Piano", " PIANO " and "piano" share one token).
///
/// The `UNSPECIFIED` sentinel stands in for missing or unreadable input and never
/// satisfies a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub struct CapabilityToken(Option<String>);

impl CapabilityToken {
    pub const UNSPECIFIED: Self = Self(None);

    /// Lower-cases, trims, collapses inner whitespace, folds compatibility forms
    /// (full-width letters, ligatures) and strips diacritics.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::UNSPECIFIED;
        };

        let folded: String = raw
            .nfkd()
            .filter(|ch| !is_combining_mark(*ch))
            .filter(|ch| !ch.is_control() && !matches!(ch, '\u{feff}' | '\u{200b}'))
            .collect();
        let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
        let token = collapsed.to_lowercase();

        if token.chars().any(char::is_alphanumeric) {
            Self(Some(token))
        } else {
            Self::UNSPECIFIED
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::normalize(Some(raw))
    }

    pub fn is_unspecified(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn label(&self) -> &str {
        self.as_str().unwrap_or("unspecified")
    }

    /// True when a member holding `self` can fill a role requiring `required`.
    pub fn satisfies(&self, required: &CapabilityToken) -> bool {
        !self.is_unspecified() && self == required
    }
}

impl Default for CapabilityToken {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl From<Option<String>> for CapabilityToken {
    fn from(value: Option<String>) -> Self {
        Self::normalize(value.as_deref())
    }
}

impl From<CapabilityToken> for Option<String> {
    fn from(value: CapabilityToken) -> Self {
        value.0
    }
}

impl fmt::Display for CapabilityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
