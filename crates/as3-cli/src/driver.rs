//! File driver: discovers program-tree files, feeds them through the
//! core, and persists the generated AS3 sources.
//!
//! Directories recurse; only `.json` tree files are picked up on the way
//! down, and the output tree mirrors the input tree. A single input file
//! translates to the given output path, or to a sibling `.as` file when
//! no output is named.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use as3_core::{Severity, Translator};

#[derive(Debug, Default, Clone, Copy)]
pub struct CompileStats {
    pub units: usize,
    pub warnings: usize,
    pub errors: usize,
}

pub fn compile_path(
    translator: &Translator,
    input: &Path,
    output: Option<&Path>,
) -> Result<CompileStats> {
    let mut stats = CompileStats::default();
    compile_recursive(translator, input, output, &mut stats)?;
    Ok(stats)
}

fn compile_recursive(
    translator: &Translator,
    input: &Path,
    output: Option<&Path>,
    stats: &mut CompileStats,
) -> Result<()> {
    if !input.is_dir() {
        return compile_file(translator, input, output, stats);
    }

    for entry in fs::read_dir(input).with_context(|| format!("reading {}", input.display()))? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let child_output = output.map(|o| o.join(entry.file_name()));
            compile_recursive(translator, &path, child_output.as_deref(), stats)?;
        } else if path.extension().is_some_and(|e| e == "json") {
            compile_file(translator, &path, output, stats)?;
        }
    }
    Ok(())
}

fn compile_file(
    translator: &Translator,
    input: &Path,
    output: Option<&Path>,
    stats: &mut CompileStats,
) -> Result<()> {
    info!(input = %input.display(), "translating");

    let text =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let result = translator
        .translate_json(&text)
        .with_context(|| format!("translating {}", input.display()))?;

    for diag in &result.diagnostics {
        match diag.severity {
            Severity::Error => {
                stats.errors += 1;
                eprintln!("{}: {diag}", input.display());
            }
            Severity::Warn => {
                stats.warnings += 1;
                eprintln!("{}: {diag}", input.display());
            }
            Severity::Info => {}
        }
    }

    let out_path = resolve_output(input, output);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(&out_path, result.source)
        .with_context(|| format!("writing {}", out_path.display()))?;
    stats.units += 1;
    Ok(())
}

/// Where the generated source goes: the named file, a `.as` file inside
/// the named directory, or a `.as` sibling of the input.
fn resolve_output(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        None => input.with_extension("as"),
        Some(o) if o.is_dir() || o.extension().is_none() => {
            let name = input.file_name().expect("input is a file");
            o.join(name).with_extension("as")
        }
        Some(o) => o.to_path_buf(),
    }
}
