// ── Locale and localized text ──
//
// Content text is locale-paired on the wire (`title` / `titleUk`); the
// domain model generalizes that into a locale→string map with a defined
// fallback chain: requested locale → fallback locale → any available value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Supported display locales.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    En,
    Uk,
}

impl Locale {
    /// The locale every `LocalizedText` falls back to.
    pub const FALLBACK: Self = Self::En;

    /// Flip between the two supported display languages.
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Uk,
            Self::Uk => Self::En,
        }
    }
}

/// A string with per-locale values and deterministic fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText {
    values: BTreeMap<Locale, String>,
}

impl LocalizedText {
    /// Create with a value for the fallback locale.
    pub fn new(text: impl Into<String>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(Locale::FALLBACK, text.into());
        Self { values }
    }

    /// Builder-style insert; empty strings are not stored, so fallback
    /// resolution skips them naturally.
    pub fn with(mut self, locale: Locale, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.values.insert(locale, text);
        }
        self
    }

    /// Exact lookup, no fallback.
    pub fn get(&self, locale: Locale) -> Option<&str> {
        self.values.get(&locale).map(String::as_str)
    }

    /// Resolve for display: requested locale, then [`Locale::FALLBACK`],
    /// then any available value, then the empty string.
    pub fn resolve(&self, locale: Locale) -> &str {
        self.get(locale)
            .or_else(|| self.get(Locale::FALLBACK))
            .or_else(|| self.values.values().next().map(String::as_str))
            .unwrap_or_default()
    }

    /// True when no locale has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_requested_locale() {
        let text = LocalizedText::new("Flight test").with(Locale::Uk, "Льотні випробування");
        assert_eq!(text.resolve(Locale::Uk), "Льотні випробування");
        assert_eq!(text.resolve(Locale::En), "Flight test");
    }

    #[test]
    fn resolve_falls_back_to_default_locale() {
        let text = LocalizedText::new("Flight test");
        assert_eq!(text.resolve(Locale::Uk), "Flight test");
    }

    #[test]
    fn resolve_falls_back_to_any_value() {
        let text = LocalizedText::default().with(Locale::Uk, "Тільки українська");
        assert_eq!(text.resolve(Locale::En), "Тільки українська");
    }

    #[test]
    fn empty_strings_are_not_stored() {
        let text = LocalizedText::new("Title").with(Locale::Uk, "");
        assert_eq!(text.get(Locale::Uk), None);
        assert_eq!(text.resolve(Locale::Uk), "Title");
    }

    #[test]
    fn toggled_flips_locale() {
        assert_eq!(Locale::En.toggled(), Locale::Uk);
        assert_eq!(Locale::Uk.toggled(), Locale::En);
    }
}
