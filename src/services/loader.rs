//! Document loading from the working tree or from a git revision.
//!
//! A document spec is either a plain path or `REVISION:path`, where the
//! revision is anything `git show` accepts. All keymap-related documents are
//! read through [`DocumentLoader`] so that the override document of a
//! historical keymap comes from the same revision.

use crate::constants::{OVERRIDES_RELATIVE_PATH, PRESERVE_LIST_RELATIVE_PATH};
use crate::models::{KeymapDocument, OverrideSet, PreserveList};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Location of a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSpec {
    /// File in the working tree
    Path(PathBuf),
    /// File as of a git revision
    Revision {
        /// Commit, tag or branch
        revision: String,
        /// Path relative to the repository root
        path: PathBuf,
    },
}

impl DocumentSpec {
    /// Parses a spec string.
    ///
    /// A string containing `:` is a revision spec unless a file with that
    /// exact name exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerkit::services::loader::DocumentSpec;
    ///
    /// let spec = DocumentSpec::parse("4e473df:keymap.json");
    /// assert_eq!(spec.revision(), Some("4e473df"));
    /// assert_eq!(spec.to_string(), "4e473df:keymap.json");
    /// ```
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if let Some((revision, path)) = spec.split_once(':') {
            if !Path::new(spec).exists() {
                return Self::Revision {
                    revision: revision.to_string(),
                    path: PathBuf::from(path),
                };
            }
        }
        Self::Path(PathBuf::from(spec))
    }

    /// The file path (relative to the repository root for revisions).
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Path(path) | Self::Revision { path, .. } => path,
        }
    }

    /// The git revision, if any.
    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        match self {
            Self::Path(_) => None,
            Self::Revision { revision, .. } => Some(revision),
        }
    }

    /// A document next to this one (same directory, same revision).
    #[must_use]
    pub fn sibling(&self, relative: impl AsRef<Path>) -> Self {
        let dir = self.path().parent().unwrap_or_else(|| Path::new(""));
        let path = dir.join(relative);
        match self {
            Self::Path(_) => Self::Path(path),
            Self::Revision { revision, .. } => Self::Revision {
                revision: revision.clone(),
                path,
            },
        }
    }

    /// The override document belonging to this keymap.
    #[must_use]
    pub fn overrides(&self) -> Self {
        self.sibling(OVERRIDES_RELATIVE_PATH)
    }

    /// The preserve list belonging to this keymap.
    #[must_use]
    pub fn preserve_list(&self) -> Self {
        self.sibling(PRESERVE_LIST_RELATIVE_PATH)
    }
}

impl fmt::Display for DocumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Revision { revision, path } => write!(f, "{}:{}", revision, path.display()),
        }
    }
}

/// Source of document contents.
pub trait DocumentLoader {
    /// Reads a document.
    ///
    /// Returns `Ok(None)` when the document does not exist, and an error
    /// when it exists but cannot be read or the revision cannot be resolved.
    fn read(&self, spec: &DocumentSpec) -> Result<Option<String>>;
}

/// Reads plain paths from disk and revision specs through `git show`.
#[derive(Debug, Clone, Default)]
pub struct GitLoader {
    /// Directory git runs in (the current directory when `None`)
    pub repo_dir: Option<PathBuf>,
}

impl GitLoader {
    /// Creates a loader running git in the current directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { repo_dir: None }
    }

    fn git_show(&self, object: &str) -> Result<String> {
        let mut command = Command::new("git");
        command.args(["show", object]);
        if let Some(dir) = &self.repo_dir {
            command.current_dir(dir);
        }

        tracing::debug!("running git show {}", object);
        let output = command
            .output()
            .context("Failed to run git - is it installed?")?;

        if !output.status.success() {
            anyhow::bail!(
                "git show {} failed: {}",
                object,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("git show {object} returned non-UTF-8 data"))
    }
}

impl DocumentLoader for GitLoader {
    fn read(&self, spec: &DocumentSpec) -> Result<Option<String>> {
        match spec {
            DocumentSpec::Path(path) => {
                if !path.is_file() {
                    return Ok(None);
                }
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(Some(content))
            }
            DocumentSpec::Revision { .. } => self.git_show(&spec.to_string()).map(Some),
        }
    }
}

/// Loads a keymap document. Missing and malformed keymaps are errors.
pub fn load_keymap<N: DeserializeOwned>(
    loader: &dyn DocumentLoader,
    spec: &DocumentSpec,
) -> Result<KeymapDocument<N>> {
    let content = loader
        .read(spec)?
        .with_context(|| format!("missing keymap file: {spec}"))?;

    let keymap: KeymapDocument<N> =
        serde_json::from_str(&content).with_context(|| format!("failed to parse {spec}"))?;
    keymap
        .validate()
        .with_context(|| format!("invalid keymap {spec}"))?;

    tracing::debug!("loaded {} layers from {}", keymap.layers.len(), spec);
    Ok(keymap)
}

/// Loads an override document, degrading to an empty set.
///
/// A missing document (or an unresolvable revision) yields an empty set
/// silently; an unreadable or malformed file yields an empty set with a
/// warning.
pub fn load_overrides(loader: &dyn DocumentLoader, spec: &DocumentSpec) -> OverrideSet {
    let content = match loader.read(spec) {
        Ok(Some(content)) => content,
        Ok(None) => return OverrideSet::default(),
        Err(e) if spec.revision().is_some() => {
            tracing::debug!("no overrides at {}: {:#}", spec, e);
            return OverrideSet::default();
        }
        Err(e) => {
            tracing::warn!("failed to read overrides at {}: {:#}", spec, e);
            return OverrideSet::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(overrides) => overrides,
        Err(e) => {
            tracing::warn!("failed to parse overrides at {}: {}", spec, e);
            OverrideSet::default()
        }
    }
}

/// Loads an override document that is about to be rewritten.
///
/// Only a missing document yields an empty set. An unreadable or malformed
/// one is an error, so the hand edits it holds are never overwritten.
pub fn load_overrides_strict(
    loader: &dyn DocumentLoader,
    spec: &DocumentSpec,
) -> Result<OverrideSet> {
    let Some(content) = loader.read(spec)? else {
        return Ok(OverrideSet::default());
    };

    serde_json::from_str(&content).with_context(|| format!("failed to parse {spec}"))
}

/// Loads a preserve list. Returns `Ok(None)` when the document is missing.
pub fn load_preserve_list(
    loader: &dyn DocumentLoader,
    spec: &DocumentSpec,
) -> Result<Option<PreserveList>> {
    let Some(content) = loader.read(spec)? else {
        return Ok(None);
    };

    let list = serde_json::from_str(&content).with_context(|| {
        format!("{spec} must contain a JSON array of layer names")
    })?;
    Ok(Some(list))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::BindingNode;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// In-memory loader keyed by the spec's display form.
    #[derive(Default)]
    pub(crate) struct MemoryLoader {
        pub(crate) documents: HashMap<String, String>,
    }

    impl MemoryLoader {
        pub(crate) fn with(mut self, spec: &str, content: &str) -> Self {
            self.documents.insert(spec.to_string(), content.to_string());
            self
        }
    }

    impl DocumentLoader for MemoryLoader {
        fn read(&self, spec: &DocumentSpec) -> Result<Option<String>> {
            Ok(self.documents.get(&spec.to_string()).cloned())
        }
    }

    #[test]
    fn test_parse_plain_and_revision_specs() {
        assert_eq!(
            DocumentSpec::parse("keymap.json"),
            DocumentSpec::Path(PathBuf::from("keymap.json"))
        );
        assert_eq!(
            DocumentSpec::parse("HEAD~1:config/keymap.json"),
            DocumentSpec::Revision {
                revision: "HEAD~1".to_string(),
                path: PathBuf::from("config/keymap.json"),
            }
        );
    }

    #[test]
    fn test_parse_existing_file_with_colon_is_a_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v1:keymap.json");
        fs::write(&path, "{}").unwrap();

        let spec = DocumentSpec::parse(path.to_str().unwrap());
        assert_eq!(spec, DocumentSpec::Path(path));
    }

    #[test]
    fn test_sibling_keeps_revision() {
        let spec = DocumentSpec::parse("abc123:config/keymap.json");
        assert_eq!(spec.overrides().to_string(), "abc123:config/custom/layer-overrides.json");

        let spec = DocumentSpec::parse("keymap.json");
        assert_eq!(spec.preserve_list().to_string(), "custom/layers_to_preserve.json");
    }

    #[test]
    fn test_git_loader_reads_plain_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keymap.json");
        fs::write(&path, "{\"a\": 1}").unwrap();

        let loader = GitLoader::new();
        assert_eq!(
            loader.read(&DocumentSpec::Path(path)).unwrap().as_deref(),
            Some("{\"a\": 1}")
        );
        assert_eq!(
            loader
                .read(&DocumentSpec::Path(dir.path().join("missing.json")))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_load_keymap_errors_name_the_spec() {
        let loader = MemoryLoader::default().with("broken.json", "{ not json");

        let missing = load_keymap::<BindingNode>(&loader, &DocumentSpec::parse("nope.json"))
            .unwrap_err();
        assert!(format!("{missing:#}").contains("missing keymap file: nope.json"));

        let broken = load_keymap::<BindingNode>(&loader, &DocumentSpec::parse("broken.json"))
            .unwrap_err();
        assert!(format!("{broken:#}").contains("failed to parse broken.json"));
    }

    #[test]
    fn test_load_keymap_requires_layer_names() {
        let loader = MemoryLoader::default().with("keymap.json", r#"{"layers": []}"#);
        assert!(load_keymap::<BindingNode>(&loader, &DocumentSpec::parse("keymap.json")).is_err());
    }

    #[test]
    fn test_load_overrides_degrades_to_empty() {
        let loader = MemoryLoader::default()
            .with("good.json", r#"{"layers": {"Base": []}}"#)
            .with("bad.json", "[[[");

        assert!(load_overrides(&loader, &DocumentSpec::parse("missing.json")).is_empty());
        assert!(load_overrides(&loader, &DocumentSpec::parse("bad.json")).is_empty());
        assert!(!load_overrides(&loader, &DocumentSpec::parse("good.json")).is_empty());
    }

    #[test]
    fn test_load_overrides_strict_rejects_malformed() {
        let loader = MemoryLoader::default()
            .with("good.json", r#"{"layers": {"Base": []}}"#)
            .with("bad.json", r#"{"layers": {"Base": [],}}"#);

        assert!(load_overrides_strict(&loader, &DocumentSpec::parse("missing.json"))
            .unwrap()
            .is_empty());
        assert!(!load_overrides_strict(&loader, &DocumentSpec::parse("good.json"))
            .unwrap()
            .is_empty());

        let err = load_overrides_strict(&loader, &DocumentSpec::parse("bad.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse bad.json"));
    }

    #[test]
    fn test_load_overrides_unreadable_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layer-overrides.json");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let spec = DocumentSpec::Path(path);

        assert!(load_overrides(&GitLoader::new(), &spec).is_empty());
        assert!(load_overrides_strict(&GitLoader::new(), &spec).is_err());
    }

    #[test]
    fn test_load_preserve_list() {
        let loader = MemoryLoader::default()
            .with("list.json", r#"["QWERTY"]"#)
            .with("bad.json", r#"{"names": 1}"#);

        assert_eq!(
            load_preserve_list(&loader, &DocumentSpec::parse("list.json"))
                .unwrap()
                .unwrap()
                .names(),
            ["QWERTY"]
        );
        assert!(load_preserve_list(&loader, &DocumentSpec::parse("missing.json"))
            .unwrap()
            .is_none());
        assert!(load_preserve_list(&loader, &DocumentSpec::parse("bad.json")).is_err());
    }
}
