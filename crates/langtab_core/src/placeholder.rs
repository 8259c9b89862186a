//! Placeholder grammar and C type inference.
//!
//! A placeholder embeds a named printf conversion in catalog text:
//! `%NAME:CONVERSION%`, where NAME is a C identifier and CONVERSION is a
//! standard printf conversion specification (flags, width, precision,
//! length, conversion character), e.g. `%count:d%`, `%price:+8.2f%`,
//! `%label:ls%`. A percent-delimited sequence that does not match the
//! grammar is not an error; it stays literal text.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Every C type the inference table can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CType {
    Char,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    IntMax,
    UIntMax,
    Size,
    PtrDiff,
    Double,
    LongDouble,
    WideChar,
    ConstCharPtr,
    ConstWideCharPtr,
    VoidPtr,
}

impl CType {
    /// The spelling used in generated signatures. Pointer spellings keep a
    /// trailing `*` so parameter names attach without a space.
    pub fn c_name(self) -> &'static str {
        match self {
            CType::Char => "char",
            CType::UnsignedChar => "unsigned char",
            CType::Short => "short",
            CType::UnsignedShort => "unsigned short",
            CType::Int => "int",
            CType::UnsignedInt => "unsigned int",
            CType::Long => "long",
            CType::UnsignedLong => "unsigned long",
            CType::LongLong => "long long",
            CType::UnsignedLongLong => "unsigned long long",
            CType::IntMax => "intmax_t",
            CType::UIntMax => "uintmax_t",
            CType::Size => "size_t",
            CType::PtrDiff => "ptrdiff_t",
            CType::Double => "double",
            CType::LongDouble => "long double",
            CType::WideChar => "wchar_t",
            CType::ConstCharPtr => "const char *",
            CType::ConstWideCharPtr => "const wchar_t *",
            CType::VoidPtr => "void *",
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

/// One recognized placeholder occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Argument name from the `NAME:` prefix.
    pub name: String,
    /// Bare conversion spec without the name or delimiters, e.g. `+8.2f`.
    pub conversion: String,
    /// Inferred argument type.
    pub ty: CType,
    /// Byte offset of the opening `%` in the source text.
    pub start: usize,
    /// Byte offset one past the closing `%`.
    pub end: usize,
}

fn grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Regex::new(
            r"%(?P<name>[A-Za-z_][A-Za-z0-9_]*):(?P<conv>[+\- ]*[0-9]*(?:\.[0-9]+)?(?P<length>hh|ll|h|l|j|z|t|L)?(?P<kind>[diouxXfFeEgGaAcsp]))%",
        )
        .expect("placeholder grammar is a valid pattern")
    })
}

/// Finds every placeholder in `text`, left to right, non-overlapping.
pub fn find_placeholders(text: &str, wide: bool) -> Vec<Placeholder> {
    grammar()
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("group 0 is the whole match");
            let length = caps.name("length").map_or("", |m| m.as_str());
            let kind = caps["kind"].as_bytes()[0] as char;
            Placeholder {
                name: caps["name"].to_string(),
                conversion: caps["conv"].to_string(),
                ty: infer_type(kind, length, wide),
                start: whole.start(),
                end: whole.end(),
            }
        })
        .collect()
}

/// Maps (conversion character, length modifier, wide mode) to a C type.
///
/// Total over everything the grammar accepts, including redundant pairs:
/// an integer conversion with length `L` falls through to `int`, `hs` is a
/// narrow string, and so on.
pub fn infer_type(kind: char, length: &str, wide: bool) -> CType {
    match kind {
        'd' | 'i' | 'o' | 'u' | 'x' | 'X' => {
            let unsigned = matches!(kind, 'u' | 'x' | 'X');
            match length {
                "hh" if unsigned => CType::UnsignedChar,
                "hh" => CType::Char,
                "h" if unsigned => CType::UnsignedShort,
                "h" => CType::Short,
                "l" if unsigned => CType::UnsignedLong,
                "l" => CType::Long,
                "ll" if unsigned => CType::UnsignedLongLong,
                "ll" => CType::LongLong,
                "j" if unsigned => CType::UIntMax,
                "j" => CType::IntMax,
                "z" => CType::Size,
                "t" => CType::PtrDiff,
                _ if unsigned => CType::UnsignedInt,
                _ => CType::Int,
            }
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'a' | 'A' => {
            if length == "L" {
                CType::LongDouble
            } else {
                CType::Double
            }
        }
        's' => {
            if wide || length == "l" {
                CType::ConstWideCharPtr
            } else {
                CType::ConstCharPtr
            }
        }
        'c' => {
            if wide || length == "l" {
                CType::WideChar
            } else {
                CType::Char
            }
        }
        // The grammar admits no conversion characters beyond 'p' here.
        _ => CType::VoidPtr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integer_lengths_follow_the_table() {
        assert_eq!(infer_type('d', "", false), CType::Int);
        assert_eq!(infer_type('i', "", false), CType::Int);
        assert_eq!(infer_type('u', "", false), CType::UnsignedInt);
        assert_eq!(infer_type('o', "", false), CType::Int);
        assert_eq!(infer_type('x', "", false), CType::UnsignedInt);
        assert_eq!(infer_type('X', "", false), CType::UnsignedInt);
        assert_eq!(infer_type('d', "hh", false), CType::Char);
        assert_eq!(infer_type('x', "hh", false), CType::UnsignedChar);
        assert_eq!(infer_type('d', "h", false), CType::Short);
        assert_eq!(infer_type('u', "h", false), CType::UnsignedShort);
        assert_eq!(infer_type('d', "l", false), CType::Long);
        assert_eq!(infer_type('X', "l", false), CType::UnsignedLong);
        assert_eq!(infer_type('i', "ll", false), CType::LongLong);
        assert_eq!(infer_type('u', "ll", false), CType::UnsignedLongLong);
        assert_eq!(infer_type('d', "j", false), CType::IntMax);
        assert_eq!(infer_type('x', "j", false), CType::UIntMax);
        assert_eq!(infer_type('d', "z", false), CType::Size);
        assert_eq!(infer_type('u', "z", false), CType::Size);
        assert_eq!(infer_type('d', "t", false), CType::PtrDiff);
        assert_eq!(infer_type('d', "L", false), CType::Int);
    }

    #[test]
    fn float_conversions_widen_only_with_capital_l() {
        for kind in ['f', 'F', 'e', 'E', 'g', 'G', 'a', 'A'] {
            assert_eq!(infer_type(kind, "", false), CType::Double);
            assert_eq!(infer_type(kind, "l", false), CType::Double);
            assert_eq!(infer_type(kind, "L", false), CType::LongDouble);
        }
    }

    #[test]
    fn text_conversions_respect_wide_mode() {
        assert_eq!(infer_type('s', "", false), CType::ConstCharPtr);
        assert_eq!(infer_type('s', "l", false), CType::ConstWideCharPtr);
        assert_eq!(infer_type('s', "", true), CType::ConstWideCharPtr);
        assert_eq!(infer_type('s', "h", false), CType::ConstCharPtr);
        assert_eq!(infer_type('c', "", false), CType::Char);
        assert_eq!(infer_type('c', "l", false), CType::WideChar);
        assert_eq!(infer_type('c', "", true), CType::WideChar);
        assert_eq!(infer_type('p', "", false), CType::VoidPtr);
        assert_eq!(infer_type('p', "", true), CType::VoidPtr);
    }

    #[test]
    fn inference_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(infer_type('d', "ll", false), CType::LongLong);
            assert_eq!(infer_type('s', "", true), CType::ConstWideCharPtr);
        }
    }

    #[test]
    fn extracts_name_conversion_and_span() {
        let found = find_placeholders("pay %price:+8.2f% now", false);
        assert_eq!(found.len(), 1);
        let ph = &found[0];
        assert_eq!(ph.name, "price");
        assert_eq!(ph.conversion, "+8.2f");
        assert_eq!(ph.ty, CType::Double);
        assert_eq!(&"pay %price:+8.2f% now"[ph.start..ph.end], "%price:+8.2f%");
    }

    #[test]
    fn finds_matches_in_source_order() {
        let found = find_placeholders("%b:s% then %a:d%", false);
        let names: Vec<&str> = found.iter().map(|ph| ph.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn length_modifiers_parse_greedily() {
        let found = find_placeholders("%v:lld% %w:ld% %y:hhd%", false);
        let types: Vec<CType> = found.iter().map(|ph| ph.ty).collect();
        assert_eq!(types, [CType::LongLong, CType::Long, CType::Char]);
    }

    #[test]
    fn space_flag_is_part_of_the_conversion() {
        let found = find_placeholders("%v: d%", false);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].conversion, " d");
    }

    #[test]
    fn malformed_bodies_are_not_placeholders() {
        for text in [
            "%val:q%",
            "%val:d",
            "%:d%",
            "% val:d%",
            "%val d%",
            "%val:.f%",
            "%1val:d%",
            "100%",
        ] {
            assert!(find_placeholders(text, false).is_empty(), "matched `{text}`");
        }
    }

    #[test]
    fn unrecognized_conversion_characters_never_match() {
        for kind in ['q', 'b', 'n', 'P', 'S', '%'] {
            let text = format!("%val:{kind}%");
            assert!(find_placeholders(&text, false).is_empty(), "matched `{text}`");
        }
    }
}
