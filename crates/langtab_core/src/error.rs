use std::path::PathBuf;

use thiserror::Error;

use crate::locale::LocaleId;

/// Conditions that abort the whole run.
///
/// Skippable problems (an unrecognized locale directory name, a record file
/// whose stem is not an identifier) are logged as warnings and never reach
/// this type.
#[derive(Debug, Error)]
pub enum LangtabError {
    #[error("io error at `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{value}` is not a locale (expected `language` or `language_REGION`, e.g. `en` or `en_US`)")]
    InvalidLocale { value: String },

    #[error("default locale directory `{locale}` not found under `{}`", root.display())]
    MissingDefaultLocale { locale: LocaleId, root: PathBuf },

    #[error("locale `{locale}` is missing record `{record}`")]
    MissingRecord { record: String, locale: LocaleId },

    #[error("invalid yaml in `{}`", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("`{}` is not a flat key/value mapping", path.display())]
    NotAMapping { path: PathBuf },

    #[error("key `{key}` in `{}` is not a C identifier", path.display())]
    InvalidKey { key: String, path: PathBuf },

    #[error("value for key `{key}` in `{}` must be text", path.display())]
    ValueNotText { key: String, path: PathBuf },

    #[error("record `{record}` locale `{locale}`: plain string keys differ from the default locale (missing {missing:?}, unexpected {unexpected:?})")]
    PlainKeyMismatch {
        record: String,
        locale: LocaleId,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("record `{record}` locale `{locale}`: formatted string keys differ from the default locale (missing {missing:?}, unexpected {unexpected:?})")]
    FormattedKeyMismatch {
        record: String,
        locale: LocaleId,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("record `{record}` locale `{locale}` key `{key}`: arguments [{found}] do not match the default locale [{expected}]")]
    ArgumentMismatch {
        record: String,
        locale: LocaleId,
        key: String,
        expected: String,
        found: String,
    },
}
