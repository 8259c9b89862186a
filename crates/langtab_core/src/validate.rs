//! Cross-locale consistency checks against the default locale.

use indexmap::IndexMap;

use crate::catalog::Record;
use crate::error::LangtabError;
use crate::locale::LocaleId;
use crate::template::ArgSpec;

/// Checks a candidate locale's record against the default locale's.
///
/// The default defines the contract: the same plain keys, the same
/// formatted keys, and for every formatted key the same arguments with the
/// same names and types in the same order. Order matters because generated
/// render functions bind call-site arguments positionally; a permuted
/// locale would otherwise format with mismatched types.
pub fn validate_record(
    default: &Record,
    candidate: &Record,
    record: &str,
    locale: &LocaleId,
) -> Result<(), LangtabError> {
    let (missing, unexpected) = key_diff(&default.plain, &candidate.plain);
    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(LangtabError::PlainKeyMismatch {
            record: record.to_string(),
            locale: locale.clone(),
            missing,
            unexpected,
        });
    }

    let (missing, unexpected) = key_diff(&default.formatted, &candidate.formatted);
    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(LangtabError::FormattedKeyMismatch {
            record: record.to_string(),
            locale: locale.clone(),
            missing,
            unexpected,
        });
    }

    for (key, reference) in &default.formatted {
        let args = &candidate.formatted[key].args;
        if args != &reference.args {
            return Err(LangtabError::ArgumentMismatch {
                record: record.to_string(),
                locale: locale.clone(),
                key: key.clone(),
                expected: render_args(&reference.args),
                found: render_args(args),
            });
        }
    }
    Ok(())
}

fn key_diff<A, B>(
    default: &IndexMap<String, A>,
    candidate: &IndexMap<String, B>,
) -> (Vec<String>, Vec<String>) {
    let missing = default
        .keys()
        .filter(|key| !candidate.contains_key(key.as_str()))
        .cloned()
        .collect();
    let unexpected = candidate
        .keys()
        .filter(|key| !default.contains_key(key.as_str()))
        .cloned()
        .collect();
    (missing, unexpected)
}

/// `name:type` pairs joined for error messages.
fn render_args(args: &[ArgSpec]) -> String {
    args.iter()
        .map(|arg| format!("{}:{}", arg.name, arg.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_record;
    use std::path::Path;

    fn record(text: &str) -> Record {
        parse_record(text, Path::new("test.yml"), false).unwrap()
    }

    fn check(default: &str, candidate: &str) -> Result<(), LangtabError> {
        let locale = "fr".parse().unwrap();
        validate_record(&record(default), &record(candidate), "greeting", &locale)
    }

    #[test]
    fn matching_records_pass() {
        let default = "hello: Hello\nwelcome: \"Hi %name:s%, %age:d%\"\n";
        let candidate = "hello: Bonjour\nwelcome: \"Salut %name:s%, %age:d%\"\n";
        assert!(check(default, candidate).is_ok());
    }

    #[test]
    fn key_order_differences_are_tolerated() {
        let default = "a: One\nb: Two\n";
        let candidate = "b: Deux\na: Un\n";
        assert!(check(default, candidate).is_ok());
    }

    #[test]
    fn missing_plain_key_is_fatal() {
        let err = check("hello: Hello\nbye: Bye\n", "hello: Bonjour\n").unwrap_err();
        match err {
            LangtabError::PlainKeyMismatch {
                record,
                locale,
                missing,
                unexpected,
            } => {
                assert_eq!(record, "greeting");
                assert_eq!(locale.to_string(), "fr");
                assert_eq!(missing, ["bye"]);
                assert!(unexpected.is_empty());
            }
            other => panic!("expected PlainKeyMismatch, got {other}"),
        }
    }

    #[test]
    fn extra_formatted_key_is_fatal() {
        let default = "hi: \"Hi %name:s%\"\n";
        let candidate = "hi: \"Salut %name:s%\"\nextra: \"%n:d%\"\n";
        let err = check(default, candidate).unwrap_err();
        match err {
            LangtabError::FormattedKeyMismatch {
                missing, unexpected, ..
            } => {
                assert!(missing.is_empty());
                assert_eq!(unexpected, ["extra"]);
            }
            other => panic!("expected FormattedKeyMismatch, got {other}"),
        }
    }

    #[test]
    fn plain_to_formatted_flip_is_fatal() {
        // The key exists in both, but changes class: plain in the default,
        // formatted in the candidate.
        let err = check("note: fixed text\n", "note: \"%pct:d% percent\"\n").unwrap_err();
        assert!(matches!(err, LangtabError::PlainKeyMismatch { .. }), "{err}");
    }

    #[test]
    fn argument_type_mismatch_is_fatal_and_names_the_key() {
        let default = "age_line: \"You are %age:d%\"\n";
        let candidate = "age_line: \"Tu as %age:ld%\"\n";
        let err = check(default, candidate).unwrap_err();
        match err {
            LangtabError::ArgumentMismatch {
                record,
                locale,
                key,
                expected,
                found,
            } => {
                assert_eq!(record, "greeting");
                assert_eq!(locale.to_string(), "fr");
                assert_eq!(key, "age_line");
                assert_eq!(expected, "age:int");
                assert_eq!(found, "age:long");
            }
            other => panic!("expected ArgumentMismatch, got {other}"),
        }
    }

    #[test]
    fn argument_rename_is_fatal() {
        let default = "hi: \"Hi %name:s%\"\n";
        let candidate = "hi: \"Salut %nom:s%\"\n";
        let err = check(default, candidate).unwrap_err();
        assert!(matches!(err, LangtabError::ArgumentMismatch { .. }), "{err}");
    }

    #[test]
    fn argument_order_mismatch_is_fatal() {
        let default = "pair: \"%a:d% %b:s%\"\n";
        let candidate = "pair: \"%b:s% %a:d%\"\n";
        let err = check(default, candidate).unwrap_err();
        match err {
            LangtabError::ArgumentMismatch { expected, found, .. } => {
                assert_eq!(expected, "a:int, b:const char *");
                assert_eq!(found, "b:const char *, a:int");
            }
            other => panic!("expected ArgumentMismatch, got {other}"),
        }
    }

    #[test]
    fn missing_argument_is_fatal() {
        let default = "hi: \"Hi %name:s% %age:d%\"\n";
        let candidate = "hi: \"Salut %name:s%\"\n";
        let err = check(default, candidate).unwrap_err();
        assert!(matches!(err, LangtabError::ArgumentMismatch { .. }), "{err}");
    }
}
