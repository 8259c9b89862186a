//! C header emission.
//!
//! One generated header per record, plus the shared runtime support header.
//! Identical input produces byte-identical text: everything renders in the
//! default locale's document order and the discovery order of locales, and
//! nothing (timestamps, paths, environment) leaks into the output.

use crate::catalog::Catalog;
use crate::template::ArgSpec;

/// Renders the complete generated header for one record.
///
/// The aggregate carries the default locale's plain keys first, then its
/// formatted keys as function pointers. Every locale's render functions use
/// the default locale's parameter list, so all table entries share one call
/// signature; validation has already pinned the argument lists together.
pub fn render_record_unit(catalog: &Catalog, wide: bool) -> String {
    let record = catalog.name.as_str();
    let default = &catalog.locales[0].1;
    let guard = format!("LANGTAB_{}_H", record.to_uppercase());
    let char_ty = if wide { "wchar_t" } else { "char" };
    let lit = if wide { "L" } else { "" };
    let body_macro = if wide {
        "LT_FORMATTED_BODY_W"
    } else {
        "LT_FORMATTED_BODY"
    };

    let mut out = String::new();
    out.push_str(&format!(
        "/* Auto-generated by langtab from the `{record}` catalogs - DO NOT EDIT. */\n\n"
    ));
    out.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
    out.push_str("#include \"langtab.h\"\n\n");

    out.push_str(&format!("typedef struct lt_{record}_s\n{{\n"));
    for key in default.plain.keys() {
        out.push_str(&format!("    const {char_ty} *{key};\n"));
    }
    for (key, spec) in &default.formatted {
        out.push_str(&format!(
            "    {char_ty} *(*{key})({});\n",
            parameter_list(&spec.args)
        ));
    }
    out.push_str(&format!("}} lt_{record}_t;\n\n"));

    out.push_str(&format!(
        "LT_DEC const lt_{record}_t *lt_{record}_get(void);\n\n"
    ));
    out.push_str("#ifdef LANGTAB_IMPL\n\n");

    for (locale, translations) in &catalog.locales {
        for (key, spec) in &default.formatted {
            out.push_str(&format!(
                "static {char_ty} *lt_{record}_{key}_{locale}({})\n{{\n",
                parameter_list(&spec.args)
            ));
            out.push_str(&format!(
                "    {body_macro}({lit}\"{}\", {})\n}}\n\n",
                c_escape(&translations.formatted[key].text),
                argument_list(&spec.args)
            ));
        }

        out.push_str(&format!(
            "static const lt_{record}_t lt_{record}_{locale} = {{\n"
        ));
        for key in default.plain.keys() {
            out.push_str(&format!(
                "    .{key} = {lit}\"{}\",\n",
                c_escape(&translations.plain[key])
            ));
        }
        for key in default.formatted.keys() {
            out.push_str(&format!("    .{key} = lt_{record}_{key}_{locale},\n"));
        }
        out.push_str("};\n\n");
    }

    out.push_str(&format!(
        "static const lt_translation_mapping_t lt_{record}_map[] = {{\n"
    ));
    for (locale, _) in &catalog.locales {
        let region = match locale.region() {
            Some(region) => format!("\"{region}\""),
            None => "NULL".to_string(),
        };
        out.push_str(&format!(
            "    {{ &lt_{record}_{locale}, \"{}\", {region} }},\n",
            locale.language()
        ));
    }
    out.push_str("};\n\n");

    out.push_str(&format!(
        "LT_IMPL const lt_{record}_t *lt_{record}_get(void)\n{{\n    \
         return (const lt_{record}_t *)lt_get_translations(\n        \
         lt_{record}_map, sizeof(lt_{record}_map) / sizeof(lt_{record}_map[0]));\n}}\n\n"
    ));
    out.push_str(&format!("#endif /* LANGTAB_IMPL */\n\n#endif /* {guard} */\n"));
    out
}

/// `type name` pairs for a signature; pointer spellings already end in `*`,
/// so the name attaches directly.
fn parameter_list(args: &[ArgSpec]) -> String {
    let params: Vec<String> = args
        .iter()
        .map(|arg| {
            let ty = arg.ty.c_name();
            if ty.ends_with('*') {
                format!("{ty}{}", arg.name)
            } else {
                format!("{ty} {}", arg.name)
            }
        })
        .collect();
    params.join(", ")
}

fn argument_list(args: &[ArgSpec]) -> String {
    let names: Vec<&str> = args.iter().map(|arg| arg.name.as_str()).collect();
    names.join(", ")
}

/// Escapes text for a C string literal: backslash, form feed, newline,
/// carriage return, tab, vertical tab, and double quote.
fn c_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

/// Static runtime support, written once per run as `langtab.h`. Generated
/// headers include it for the dispatch-table entry type, the preference
/// list, the lookup walk, and the allocate-and-format function bodies.
pub const RUNTIME_HEADER: &str = r#"/* langtab runtime support - shared by every generated header. */

#ifndef LANGTAB_H
#define LANGTAB_H

#define _CRT_SECURE_NO_WARNINGS
#include <stdlib.h>
#include <stdio.h>
#include <stdbool.h>
#include <string.h>

#ifdef _MSC_VER
    #define lt_snprintf(buffer, count, format, ...) \
        _snprintf(buffer, count, format, __VA_ARGS__)
    #define lt_snwprintf(buffer, count, format, ...) \
        _snwprintf(buffer, count, format, __VA_ARGS__)
#else
    #define lt_snprintf(buffer, count, format, ...) \
        snprintf(buffer, count, format, __VA_ARGS__)
#endif

#ifdef __cplusplus
    #define LT_DEC   extern "C"
    #define LT_IMPL  extern "C"
#else
    #define LT_DEC   extern
    #define LT_IMPL
#endif

#define LT_FORMATTED_BODY(format_str, ...) \
    static const char *format = format_str; \
    size_t length = (size_t)lt_snprintf(NULL, 0, format, __VA_ARGS__); \
    char *buffer = (char *)malloc(length + 1); \
    if (!buffer) \
        return NULL; \
    buffer[length] = '\0'; \
    lt_snprintf(buffer, length + 1, format, __VA_ARGS__); \
    return buffer;

#define LT_FORMATTED_BODY_W(format_str, ...) \
    static const wchar_t *format = format_str; \
    size_t length = (size_t)lt_snwprintf(NULL, 0, format, __VA_ARGS__); \
    wchar_t *buffer = (wchar_t *)malloc((length + 1) * sizeof(wchar_t)); \
    if (!buffer) \
        return NULL; \
    buffer[length] = L'\0'; \
    lt_snwprintf(buffer, length + 1, format, __VA_ARGS__); \
    return buffer;

typedef struct lt_preferred_lang_s
{
    char lang[32];
    char region[32];
} lt_preferred_lang_t;

typedef struct lt_translation_mapping_s
{
    const void *translations;
    const char *lang;
    const char *region;
} lt_translation_mapping_t;

/*
 * Replaces the preference list, in order from most to least preferred.
 * Each entry is `language` or `language_REGION`: language 1-31 lowercase
 * letters, region 1-31 uppercase letters. Returns false and keeps the
 * previous list when any entry is malformed.
 */
LT_DEC bool lt_set_preferred_langs(const char **preferred_langs, size_t preferred_lang_count);

/* Empties the preference list; lookups then resolve to the default. */
LT_DEC void lt_clear_preferred_langs(void);

#ifdef LANGTAB_IMPL

/* Preference list shared by every dispatch table in the program. */
lt_preferred_lang_t *lt_preferred_langs = NULL;
size_t lt_preferred_lang_count = 0;

static void lt_copy_part(char *buffer, const char *source, size_t count)
{
    strncpy(buffer, source, count);
    buffer[count] = '\0';
}

static bool lt_parse_pref(lt_preferred_lang_t *pref, const char *lang)
{
    const char *underscore;
    size_t lang_length, region_length, i;

    if (!lang || !lang[0])
        return false;

    underscore = strchr(lang, '_');
    if (!underscore)
    {
        lang_length = strlen(lang);
        region_length = 0;
    }
    else
    {
        lang_length = (size_t)(underscore - lang);
        region_length = strlen(underscore + 1);
    }

    if (!lang_length || lang_length >= sizeof(pref->lang))
        return false;
    if (underscore && (!region_length || region_length >= sizeof(pref->region)))
        return false;

    lt_copy_part(pref->lang, lang, lang_length);
    if (underscore)
        lt_copy_part(pref->region, underscore + 1, region_length);
    else
        pref->region[0] = '\0';

    for (i = 0; i < lang_length; i++)
    {
        if (pref->lang[i] < 'a' || pref->lang[i] > 'z')
            return false;
    }
    for (i = 0; i < region_length; i++)
    {
        if (pref->region[i] < 'A' || pref->region[i] > 'Z')
            return false;
    }
    return true;
}

LT_IMPL bool lt_set_preferred_langs(
    const char **preferred_langs,
    size_t preferred_lang_count)
{
    lt_preferred_lang_t *new_langs;
    size_t i;

    if (!preferred_langs || !preferred_lang_count)
        return false;

    new_langs = (lt_preferred_lang_t *)malloc(sizeof(lt_preferred_lang_t) * preferred_lang_count);
    if (!new_langs)
        return false;

    for (i = 0; i < preferred_lang_count; i++)
    {
        if (!lt_parse_pref(&new_langs[i], preferred_langs[i]))
        {
            free(new_langs);
            return false;
        }
    }

    free(lt_preferred_langs);
    lt_preferred_langs = new_langs;
    lt_preferred_lang_count = preferred_lang_count;
    return true;
}

LT_IMPL void lt_clear_preferred_langs(void)
{
    free(lt_preferred_langs);
    lt_preferred_langs = NULL;
    lt_preferred_lang_count = 0;
}

/*
 * Walks the preference list in order; for each preference an exact
 * (language, region) entry wins immediately, then the first entry sharing
 * the language. Falls back to the first table slot, which generated tables
 * reserve for the default locale.
 */
static const void *lt_get_translations(
    const lt_translation_mapping_t *map,
    size_t map_length)
{
    size_t i, j;

    if (!map || !map_length)
        return NULL;

    for (i = 0; i < lt_preferred_lang_count; i++)
    {
        const lt_preferred_lang_t *pref = &lt_preferred_langs[i];
        const lt_translation_mapping_t *lang_match = NULL;

        for (j = 0; j < map_length; j++)
        {
            const lt_translation_mapping_t *entry = &map[j];
            if (strcmp(entry->lang, pref->lang))
                continue;

            if (entry->region && !strcmp(entry->region, pref->region))
                return entry->translations;

            if ((!entry->region || !entry->region[0]) && !pref->region[0])
                return entry->translations;

            if (!lang_match)
                lang_match = entry;
        }

        if (lang_match)
            return lang_match->translations;
    }

    return map[0].translations;
}

#endif /* LANGTAB_IMPL */

#endif /* LANGTAB_H */
"#;
