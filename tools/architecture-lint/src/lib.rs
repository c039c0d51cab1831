//! Repo-local architectural lint for the login flow crate.
//!
//! The `frontend` crate is laid out hexagonally: `domain` (with its ports),
//! `presentation`, inbound adapters and outbound adapters. The `app` module
//! and the binary are the composition root and are not linted. Rules:
//!
//! - `domain` depends on no other layer and no transport, storage, CLI or
//!   configuration crate
//! - `presentation` depends on `domain` at most
//! - `inbound` never reaches into `outbound` or the HTTP/filesystem crates
//! - `outbound` never reaches into `inbound` or `presentation`
//!
//! Run with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Name under which integration code refers to the linted crate.
const CRATE_NAME: &str = "frontend";

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `frontend/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// A file could not be parsed or placed in a layer.
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "Architecture boundary violations:")?;
                violations
                    .iter()
                    .try_for_each(|violation| writeln!(f, "- {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `frontend/src`.
    pub file: PathBuf,
    pub contents: String,
}

impl LintSource {
    pub fn new(file: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Presentation,
    Inbound,
    Outbound,
}

const LAYERS: [Layer; 4] = [
    Layer::Domain,
    Layer::Presentation,
    Layer::Inbound,
    Layer::Outbound,
];

/// Internal module roots that count as layers or the composition root.
const MODULE_ROOTS: [&str; 5] = ["domain", "presentation", "inbound", "outbound", "app"];

impl Layer {
    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Presentation => "presentation",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn for_path(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        LAYERS.into_iter().find(|layer| layer.dir() == first)
    }

    const fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["presentation", "inbound", "outbound", "app"],
            Self::Presentation => &["inbound", "outbound", "app"],
            Self::Inbound => &["outbound", "app"],
            Self::Outbound => &["presentation", "inbound", "app"],
        }
    }

    const fn forbidden_crates(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                "reqwest",
                "cap_std",
                "clap",
                "ortho_config",
                "tracing_subscriber",
                "color_eyre",
            ],
            Self::Presentation => &["reqwest", "cap_std", "clap", "ortho_config"],
            Self::Inbound => &["reqwest", "cap_std", "ortho_config", "tracing_subscriber"],
            Self::Outbound => &["clap", "ortho_config", "color_eyre"],
        }
    }
}

/// Lint the `frontend` crate sources on disk.
///
/// `crate_dir` must be the `frontend/` directory at the repository root.
pub fn lint_frontend_sources(crate_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = crate_dir.join("src");
    let mut sources = Vec::new();
    for layer in LAYERS {
        let dir = src_dir.join(layer.dir());
        if dir.is_dir() {
            collect_sources_under(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let layer = Layer::for_path(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is outside every linted layer".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn check_file(file: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        match classify(segments) {
            Some(Target::Module(root)) if layer.forbidden_modules().contains(&root) => {
                messages.insert(format!("{} must not depend on crate::{root}", layer.dir()));
            }
            Some(Target::Crate(root)) if layer.forbidden_crates().contains(&root) => {
                messages.insert(format!(
                    "{} must not depend on external crate `{root}`",
                    layer.dir()
                ));
            }
            _ => {}
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

enum Target<'a> {
    Module(&'a str),
    Crate(&'a str),
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn classify(segments: &[String]) -> Option<Target<'_>> {
    let first = segments.first()?.as_str();
    if MODULE_ROOTS.contains(&first) {
        return Some(Target::Module(first));
    }
    if is_relative(first) {
        let root = segments.iter().find(|segment| !is_relative(segment))?;
        return Some(Target::Module(root.as_str()));
    }
    if first == CRATE_NAME {
        return segments.get(1).map(|root| Target::Module(root.as_str()));
    }
    Some(Target::Crate(first))
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources_under(
    src_root: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources_under(src_root, &path, sources)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }

        let relative = path
            .strip_prefix(src_root)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_path_buf();
        sources.push(LintSource::new(relative, fs::read_to_string(&path)?));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
