//! Compiles per-locale YAML string catalogs into statically typed C headers.
//!
//! A catalog tree holds one directory per locale, each containing one
//! `.yml` file per record. Values may embed `%name:conversion%`
//! placeholders in printf style; the compiler infers a C type for every
//! placeholder, checks all locales against the default locale, and emits
//! one include-guarded header per record plus a shared `langtab.h` runtime.
//! Generated code selects a locale at run time through a preference list
//! and renders formatted strings into newly allocated storage.
//!
//! - [`locale`]: locale identifiers and preference matching
//! - [`placeholder`]: the placeholder grammar and C type inference
//! - [`template`]: canonical printf text and argument extraction
//! - [`catalog`]: YAML record parsing
//! - [`validate`]: cross-locale consistency checks
//! - [`emit`]: C header rendering
//! - [`pipeline`]: tree walking and output
//!
//! ```no_run
//! use std::path::Path;
//!
//! use langtab_core::{compile_tree, CompileOptions};
//!
//! # fn main() -> Result<(), langtab_core::LangtabError> {
//! let options = CompileOptions {
//!     default_locale: "en_US".parse()?,
//!     wide: false,
//!     out_dir: "build".into(),
//! };
//! let summary = compile_tree(Path::new("strings"), &options)?;
//! println!("compiled {} records", summary.records.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod emit;
pub mod error;
pub mod locale;
pub mod pipeline;
pub mod placeholder;
pub mod template;
pub mod validate;

pub use catalog::{Catalog, Record};
pub use error::LangtabError;
pub use locale::LocaleId;
pub use pipeline::{compile_tree, CompileOptions, CompileSummary};
pub use placeholder::CType;
pub use template::{ArgSpec, Entry, Template};
