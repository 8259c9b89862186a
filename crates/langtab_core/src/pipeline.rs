//! Compilation pipeline.
//!
//! Walks a catalog tree, loads and validates every record against the
//! default locale, and writes the generated headers. Single pass, single
//! thread; the first fatal error aborts the run, and output written before
//! the failure stays on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::catalog::{self, Catalog};
use crate::emit;
use crate::error::LangtabError;
use crate::locale::LocaleId;
use crate::validate;

/// Settings for one compilation run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Locale whose catalogs define key sets, argument lists, and field order.
    pub default_locale: LocaleId,
    /// Emit `wchar_t` strings and render functions instead of `char`.
    pub wide: bool,
    /// Directory receiving `langtab.h` and the generated record headers.
    pub out_dir: PathBuf,
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSummary {
    /// Record names compiled, in output order.
    pub records: Vec<String>,
    /// Locales found in the tree, default first.
    pub locales: Vec<LocaleId>,
}

/// Compiles every record under `root` into C headers in the output
/// directory.
///
/// The default locale's directory defines the record set. Every other
/// locale must carry a file for every record; that is checked up front so
/// a hole in the tree surfaces before any catalog is parsed.
pub fn compile_tree(root: &Path, options: &CompileOptions) -> Result<CompileSummary, LangtabError> {
    let locales = discover_locales(root, &options.default_locale)?;
    let records = discover_records(&root.join(locales[0].to_string()))?;

    for locale in &locales[1..] {
        for record in &records {
            if !record_path(root, locale, record).is_file() {
                return Err(LangtabError::MissingRecord {
                    record: record.clone(),
                    locale: locale.clone(),
                });
            }
        }
    }

    fs::create_dir_all(&options.out_dir).map_err(|e| io_error(&options.out_dir, e))?;
    write_file(&options.out_dir.join("langtab.h"), emit::RUNTIME_HEADER)?;

    for record in &records {
        let catalog = load_catalog(root, &locales, record, options.wide)?;
        let unit = emit::render_record_unit(&catalog, options.wide);
        write_file(&options.out_dir.join(format!("{record}.h")), &unit)?;
        info!(record = %record, "generated header");
    }

    Ok(CompileSummary { records, locales })
}

/// Locale directories under `root`: the default first, then the rest in
/// bytewise name order. Directories whose names are not locale names are
/// skipped with a warning; top-level files are ignored.
fn discover_locales(root: &Path, default_locale: &LocaleId) -> Result<Vec<LocaleId>, LangtabError> {
    let mut locales = vec![default_locale.clone()];
    let mut saw_default = false;

    for name in sorted_names(root, EntryKind::Dir)? {
        let Ok(locale) = name.parse::<LocaleId>() else {
            warn!(directory = %name, "skipping directory that is not a locale name");
            continue;
        };
        if locale == *default_locale {
            saw_default = true;
        } else {
            locales.push(locale);
        }
    }

    if !saw_default {
        return Err(LangtabError::MissingDefaultLocale {
            locale: default_locale.clone(),
            root: root.to_path_buf(),
        });
    }

    debug!(count = locales.len(), "discovered locales");
    Ok(locales)
}

/// Record names from the default locale's directory: the stems of its
/// `.yml` files, in bytewise order. Other extensions are ignored; a `.yml`
/// stem that is not a C identifier is skipped with a warning.
fn discover_records(default_dir: &Path) -> Result<Vec<String>, LangtabError> {
    let mut records = Vec::new();
    for name in sorted_names(default_dir, EntryKind::File)? {
        let Some(stem) = name.strip_suffix(".yml") else {
            continue;
        };
        if !catalog::is_identifier(stem) {
            warn!(file = %name, "skipping record file whose stem is not an identifier");
            continue;
        }
        records.push(stem.to_string());
    }
    debug!(count = records.len(), "discovered records");
    Ok(records)
}

/// Reads one record's catalog from every locale, validating each against
/// the default as it loads.
fn load_catalog(
    root: &Path,
    locales: &[LocaleId],
    record: &str,
    wide: bool,
) -> Result<Catalog, LangtabError> {
    let mut loaded: Vec<(LocaleId, catalog::Record)> = Vec::with_capacity(locales.len());
    for locale in locales {
        let path = record_path(root, locale, record);
        let text = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        let parsed = catalog::parse_record(&text, &path, wide)?;
        if let Some((_, default)) = loaded.first() {
            validate::validate_record(default, &parsed, record, locale)?;
        }
        debug!(record = %record, locale = %locale, "loaded catalog");
        loaded.push((locale.clone(), parsed));
    }
    Ok(Catalog {
        name: record.to_string(),
        locales: loaded,
    })
}

fn record_path(root: &Path, locale: &LocaleId, record: &str) -> PathBuf {
    root.join(locale.to_string()).join(format!("{record}.yml"))
}

#[derive(Clone, Copy)]
enum EntryKind {
    Dir,
    File,
}

/// Entry names of one kind under `dir`, bytewise sorted so every run sees
/// the same order regardless of filesystem enumeration.
fn sorted_names(dir: &Path, kind: EntryKind) -> Result<Vec<String>, LangtabError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let file_type = entry.file_type().map_err(|e| io_error(&entry.path(), e))?;
        let wanted = match kind {
            EntryKind::Dir => file_type.is_dir(),
            EntryKind::File => file_type.is_file(),
        };
        if !wanted {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            warn!(path = %entry.path().display(), "skipping entry with a non-unicode name");
            continue;
        };
        names.push(name);
    }
    names.sort_unstable();
    Ok(names)
}

fn write_file(path: &Path, contents: &str) -> Result<(), LangtabError> {
    fs::write(path, contents).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> LangtabError {
    LangtabError::Io {
        path: path.to_path_buf(),
        source,
    }
}
