//! Locale identifiers and preference resolution.
//!
//! A locale is a lowercase language code with an optional uppercase region,
//! written `language` or `language_REGION` (`en`, `en_US`, `pt_BR`). Both
//! parts are 1 to 31 ASCII letters; anything else is not a locale.

use std::fmt;
use std::str::FromStr;

use crate::error::LangtabError;

/// Maximum length of the language and region parts. The generated runtime
/// keeps preferences in 32-byte buffers, one byte reserved for the
/// terminator.
pub const MAX_PART_LEN: usize = 31;

/// A parsed `language[_REGION]` locale identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleId {
    language: String,
    region: Option<String>,
}

impl LocaleId {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl FromStr for LocaleId {
    type Err = LangtabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = || LangtabError::InvalidLocale {
            value: s.to_string(),
        };
        let (language, region) = match s.split_once('_') {
            Some((language, region)) => (language, Some(region)),
            None => (s, None),
        };
        if language.is_empty()
            || language.len() > MAX_PART_LEN
            || !language.bytes().all(|b| b.is_ascii_lowercase())
        {
            return Err(reject());
        }
        if let Some(region) = region {
            if region.is_empty()
                || region.len() > MAX_PART_LEN
                || !region.bytes().all(|b| b.is_ascii_uppercase())
            {
                return Err(reject());
            }
        }
        Ok(Self {
            language: language.to_string(),
            region: region.map(str::to_string),
        })
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

/// Resolves an ordered preference list against an ordered locale list.
///
/// For each preference in turn: an exact (language, region) pair wins
/// immediately, as does a regionless preference meeting a regionless locale;
/// otherwise the first locale sharing the language wins once the scan ends.
/// Returns `None` when no preference matches anything, in which case the
/// caller falls back to the default locale. The generated C lookup resolves
/// identically, entry by entry.
pub fn best_match<'a>(available: &'a [LocaleId], preferred: &[LocaleId]) -> Option<&'a LocaleId> {
    for pref in preferred {
        let mut language_only = None;
        for locale in available {
            if locale.language != pref.language {
                continue;
            }
            match (locale.region(), pref.region()) {
                (Some(have), Some(want)) if have == want => return Some(locale),
                (None, None) => return Some(locale),
                _ => {}
            }
            if language_only.is_none() {
                language_only = Some(locale);
            }
        }
        if language_only.is_some() {
            return language_only;
        }
    }
    None
}
