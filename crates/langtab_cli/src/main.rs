//! langtab - compiles per-locale YAML string catalogs into C headers.
//!
//! Point it at a tree with one directory per locale, each holding one
//! `.yml` file per record. The output directory receives `langtab.h` plus
//! one generated header per record; defining `LANGTAB_IMPL` in exactly one
//! translation unit before including them pulls in the implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use langtab_core::{compile_tree, CompileOptions, LocaleId};

/// Compiles per-locale YAML string catalogs into C headers
#[derive(Parser, Debug)]
#[command(name = "langtab")]
#[command(about = "Compiles per-locale YAML string catalogs into C headers")]
#[command(version)]
struct Args {
    /// Catalog tree root, one subdirectory per locale
    dir: PathBuf,

    /// Directory for langtab.h and the generated record headers
    #[arg(short, long, default_value = "build")]
    out_dir: PathBuf,

    /// Emit wchar_t strings instead of char
    #[arg(short, long)]
    wide: bool,

    /// Locale whose catalogs define keys, argument lists, and field order
    #[arg(short, long, default_value = "en_US")]
    default_language: LocaleId,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let options = CompileOptions {
        default_locale: args.default_language,
        wide: args.wide,
        out_dir: args.out_dir,
    };
    let summary = compile_tree(&args.dir, &options)
        .with_context(|| format!("compiling catalogs under `{}`", args.dir.display()))?;

    tracing::info!(
        records = summary.records.len(),
        locales = summary.locales.len(),
        "catalogs compiled"
    );
    Ok(())
}
