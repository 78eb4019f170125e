//! Orchestration for one generation run.
//!
//! Walks the configured scope, groups files into source units (one unit per
//! directory, mirroring how sibling files share a namespace), computes each
//! unit's declared-name snapshot once, then streams eligible declarations
//! through extraction and rendering in traversal order. After a file-target
//! run, the output is handed to rustfmt when one can be found.

use crate::config::{GeneratorConfig, OutputTarget};
use crate::eligibility::{self, Skip};
use crate::errors::GeneratorError;
use crate::render;
use crate::signature::{self, Candidate};
use crate::typename::UnsupportedType;
use crate::walker::SourceWalker;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use syn::visit::Visit;
use syn::{ImplItem, Item};

/// Counts reported after a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Scaffolds written to the output stream.
    pub scaffolds: usize,
    /// Declarations that matched the filter but were passed over.
    pub skipped: usize,
}

/// Run the generator end to end with the given configuration.
pub fn run(config: &GeneratorConfig) -> Result<RunSummary, GeneratorError> {
    let mut out = open_target(&config.target)?;

    let files = SourceWalker::new(config.scope.clone())
        .with_exclude_patterns(config.exclude.clone())
        .walk()?;
    let units = group_by_unit(files);

    let mut emitted: HashSet<String> = HashSet::new();
    let mut summary = RunSummary::default();

    for (unit_dir, paths) in &units {
        log::debug!("scanning unit {}", unit_dir.display());
        let parsed = parse_unit(paths)?;
        let declared = declared_names(&parsed);

        for (path, file) in &parsed {
            log::debug!("processing {}", path.display());
            generate_for_file(
                file,
                config,
                &declared,
                &mut emitted,
                &mut summary,
                out.as_mut(),
            )?;
        }
    }

    out.flush().map_err(|e| GeneratorError::Output {
        path: target_path(&config.target),
        source: e,
    })?;
    drop(out);

    match &config.target {
        OutputTarget::File(path) => format_output(path),
        OutputTarget::Stdout => {
            log::warn!("stdout output is not post-processed; run rustfmt and fix imports manually");
        }
    }

    Ok(summary)
}

fn open_target(target: &OutputTarget) -> Result<Box<dyn Write>, GeneratorError> {
    match target {
        OutputTarget::Stdout => Ok(Box::new(io::stdout())),
        OutputTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| GeneratorError::Output {
                    path: path.clone(),
                    source: e,
                })?;
            Ok(Box::new(file))
        }
    }
}

fn target_path(target: &OutputTarget) -> PathBuf {
    match target {
        OutputTarget::Stdout => PathBuf::from("<stdout>"),
        OutputTarget::File(path) => path.clone(),
    }
}

/// Source units are directories: sibling files see each other's declared
/// names, so a generated test next to its target blocks regeneration.
fn group_by_unit(files: Vec<PathBuf>) -> BTreeMap<PathBuf, Vec<PathBuf>> {
    let mut units: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let unit = file.parent().unwrap_or(Path::new("")).to_path_buf();
        units.entry(unit).or_default().push(file);
    }
    for paths in units.values_mut() {
        paths.sort();
    }
    units
}

fn parse_unit(paths: &[PathBuf]) -> Result<Vec<(PathBuf, syn::File)>, GeneratorError> {
    let mut parsed = Vec::new();
    for path in paths {
        let content = fs::read_to_string(path).map_err(|e| GeneratorError::Read {
            path: path.clone(),
            source: e,
        })?;
        let file = syn::parse_file(&content).map_err(|e| GeneratorError::Parse {
            path: path.clone(),
            source: e,
        })?;
        parsed.push((path.clone(), file));
    }
    Ok(parsed)
}

/// Collect every name declared anywhere in the unit, including inside
/// nested modules, so tests living in `#[cfg(test)] mod tests` blocks are
/// visible to duplicate detection. Sibling declarations share one
/// namespace, so types, consts and the like block a clashing test name
/// just as functions do.
fn declared_names(parsed: &[(PathBuf, syn::File)]) -> HashSet<String> {
    struct NameCollector {
        names: HashSet<String>,
    }

    impl<'ast> Visit<'ast> for NameCollector {
        fn visit_item(&mut self, node: &'ast Item) {
            let ident = match node {
                Item::Struct(item) => Some(&item.ident),
                Item::Enum(item) => Some(&item.ident),
                Item::Union(item) => Some(&item.ident),
                Item::Const(item) => Some(&item.ident),
                Item::Static(item) => Some(&item.ident),
                Item::Type(item) => Some(&item.ident),
                Item::Trait(item) => Some(&item.ident),
                Item::Mod(item) => Some(&item.ident),
                _ => None,
            };
            if let Some(ident) = ident {
                self.names.insert(ident.to_string());
            }
            syn::visit::visit_item(self, node);
        }

        fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
            self.names.insert(node.sig.ident.to_string());
            syn::visit::visit_item_fn(self, node);
        }

        fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
            self.names.insert(node.sig.ident.to_string());
            syn::visit::visit_impl_item_fn(self, node);
        }
    }

    let mut collector = NameCollector {
        names: HashSet::new(),
    };
    for (_, file) in parsed {
        collector.visit_file(file);
    }
    collector.names
}

fn generate_for_file(
    file: &syn::File,
    config: &GeneratorConfig,
    declared: &HashSet<String>,
    emitted: &mut HashSet<String>,
    summary: &mut RunSummary,
    out: &mut dyn Write,
) -> Result<(), GeneratorError> {
    for item in &file.items {
        match item {
            Item::Fn(item_fn) => {
                if has_test_attr(&item_fn.attrs) {
                    continue;
                }
                process(
                    &item_fn.sig,
                    || signature::extract_fn(item_fn),
                    config,
                    declared,
                    emitted,
                    summary,
                    out,
                )?;
            }
            Item::Impl(item_impl) => {
                // Trait impls are not candidates: their callee expression is
                // not derivable from the impl alone.
                if item_impl.trait_.is_some() {
                    continue;
                }
                for impl_item in &item_impl.items {
                    let ImplItem::Fn(method) = impl_item else {
                        continue;
                    };
                    if has_test_attr(&method.attrs) {
                        continue;
                    }
                    process(
                        &method.sig,
                        || signature::extract_impl_fn(&item_impl.self_ty, method),
                        config,
                        declared,
                        emitted,
                        summary,
                        out,
                    )?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn process(
    sig: &syn::Signature,
    extract: impl FnOnce() -> Result<Candidate, UnsupportedType>,
    config: &GeneratorConfig,
    declared: &HashSet<String>,
    emitted: &mut HashSet<String>,
    summary: &mut RunSummary,
    out: &mut dyn Write,
) -> Result<(), GeneratorError> {
    let ident = sig.ident.to_string();

    if let Err(skip) = eligibility::check(sig, &config.pattern, declared, emitted) {
        if skip.is_diagnostic() {
            log::warn!("skipping '{}': {}", ident, skip.reason());
        } else {
            log::debug!("skipping '{}': {}", ident, skip.reason());
        }
        if skip != Skip::FilterMismatch {
            summary.skipped += 1;
        }
        return Ok(());
    }

    let candidate = match extract() {
        Ok(candidate) => candidate,
        Err(unsupported) => {
            log::warn!("skipping '{}': {}", ident, unsupported);
            summary.skipped += 1;
            return Ok(());
        }
    };

    render::render(&candidate, out).map_err(|e| GeneratorError::Render {
        function: ident,
        source: e,
    })?;
    emitted.insert(candidate.test_name());
    summary.scaffolds += 1;
    Ok(())
}

fn has_test_attr(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "test")
    })
}

/// Hand the output file to rustfmt. Unavailability or failure is advisory.
fn format_output(path: &Path) {
    let Some(rustfmt) = find_rustfmt() else {
        log::warn!("could not find rustfmt; format the output and resolve imports manually");
        return;
    };

    match Command::new(&rustfmt).arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("rustfmt exited with {status}"),
        Err(e) => log::warn!("rustfmt failed to run: {e}"),
    }
}

/// Look for rustfmt on PATH first, then in the conventional cargo bin dir.
fn find_rustfmt() -> Option<PathBuf> {
    if let Ok(path) = which::which("rustfmt") {
        return Some(path);
    }

    let fallback = dirs::home_dir()?
        .join(".cargo")
        .join("bin")
        .join(format!("rustfmt{}", std::env::consts::EXE_SUFFIX));
    fallback.is_file().then_some(fallback)
}
