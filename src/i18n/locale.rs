// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use unic_langid::LanguageIdentifier;

/// Locales the options page ships strings for.
pub const SUPPORTED_LOCALES: &[&str] = &["en-US", "fr", "de", "es"];

/// Locale used when no preference matches a supported locale.
pub const DEFAULT_LOCALE: &str = "en-US";

pub struct Locales {
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for Locales {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl Locales {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let available_locales: Vec<LanguageIdentifier> = SUPPORTED_LOCALES
            .iter()
            .filter_map(|tag| tag.parse().ok())
            .collect();

        let current_locale = resolve_locale(cli_lang, config, &available_locales)
            .unwrap_or_else(default_locale);

        Self {
            available_locales,
            current_locale,
        }
    }

    /// Switches to `locale` if it is supported. Returns whether it changed.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) -> bool {
        if self.available_locales.contains(&locale) && self.current_locale != locale {
            self.current_locale = locale;
            true
        } else {
            false
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }
}

fn default_locale() -> LanguageIdentifier {
    LanguageIdentifier::from_bytes(DEFAULT_LOCALE.as_bytes()).unwrap_or_default()
}

fn parse_available(raw: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = raw.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    // "fr-CA" falls back to "fr" when only the bare language is supported
    available
        .iter()
        .find(|candidate| candidate.language == lang.language && candidate.region.is_none())
        .cloned()
}

pub fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    if let Some(lang) = cli_lang.as_deref().and_then(|raw| parse_available(raw, available)) {
        return Some(lang);
    }

    if let Some(lang) = config
        .general
        .language
        .as_deref()
        .and_then(|raw| parse_available(raw, available))
    {
        return Some(lang);
    }

    sys_locale::get_locale().and_then(|raw| parse_available(&raw, available))
}
