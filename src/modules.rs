//! Module references and the host resolution seam.
//!
//! A config lists the framework modules to install, either as package names
//! (`"@nuxtjs/i18n"`) or as local source references (`{ name, path }`). This
//! crate never loads modules; it hands each reference to a host-provided
//! [`ModuleResolver`] and reports the host's verdict.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Opaque handle to a module listed in `modules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleRef {
    source: ModuleSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum ModuleSource {
    Package(String),
    Local {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        path: String,
    },
}

impl ModuleRef {
    /// Reference a module by package name.
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            source: ModuleSource::Package(name.into()),
        }
    }

    /// Reference a module by local source path.
    pub fn local(name: Option<String>, path: impl Into<String>) -> Self {
        Self {
            source: ModuleSource::Local {
                name,
                path: path.into(),
            },
        }
    }

    /// Identifier for messages: the package name, the local module's name,
    /// or its path when it has no name.
    pub fn id(&self) -> &str {
        match &self.source {
            ModuleSource::Package(name) => name,
            ModuleSource::Local {
                name: Some(name), ..
            } => name,
            ModuleSource::Local { path, .. } => path,
        }
    }

    /// Package name, if this is a package reference.
    pub fn package_name(&self) -> Option<&str> {
        match &self.source {
            ModuleSource::Package(name) => Some(name),
            ModuleSource::Local { .. } => None,
        }
    }

    /// Source path, if this is a local reference.
    pub fn local_path(&self) -> Option<&str> {
        match &self.source {
            ModuleSource::Package(_) => None,
            ModuleSource::Local { path, .. } => Some(path),
        }
    }
}

impl std::fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Host hook that decides whether a module reference exists.
///
/// Returning `Err(reason)` makes the loader fail with
/// `ConfigError::ModuleResolution`.
pub trait ModuleResolver: Send + Sync {
    fn resolve(&self, module: &ModuleRef) -> Result<(), String>;
}

impl<F> ModuleResolver for F
where
    F: Fn(&ModuleRef) -> Result<(), String> + Send + Sync,
{
    fn resolve(&self, module: &ModuleRef) -> Result<(), String> {
        self(module)
    }
}

/// Resolver that accepts every module. Used when the host does its own
/// resolution later.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ModuleResolver for AcceptAll {
    fn resolve(&self, _module: &ModuleRef) -> Result<(), String> {
        Ok(())
    }
}

/// Extensions tried when a local module path has none.
const LOCAL_MODULE_EXTENSIONS: &[&str] = &["ts", "js", "mjs", "cjs"];

/// Resolver backed by a fixed set of package names and a directory that
/// local paths are resolved against.
#[derive(Debug, Clone, Default)]
pub struct KnownModules {
    packages: BTreeSet<String>,
    root: Option<PathBuf>,
}

impl KnownModules {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
            root: None,
        }
    }

    /// Resolve local module paths relative to `root`. Without a root, local
    /// references are accepted unchecked.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    fn local_exists(root: &Path, path: &str) -> bool {
        let candidate = root.join(path);
        if candidate.exists() {
            return true;
        }
        LOCAL_MODULE_EXTENSIONS
            .iter()
            .any(|ext| candidate.with_extension(ext).exists())
    }
}

impl ModuleResolver for KnownModules {
    fn resolve(&self, module: &ModuleRef) -> Result<(), String> {
        match &module.source {
            ModuleSource::Package(name) => {
                if self.packages.contains(name) {
                    Ok(())
                } else {
                    Err(format!("package '{}' is not installed", name))
                }
            }
            ModuleSource::Local { path, .. } => match &self.root {
                Some(root) if !Self::local_exists(root, path) => Err(format!(
                    "no module source at '{}'",
                    root.join(path).display()
                )),
                _ => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_package_and_local_refs() {
        let refs: Vec<ModuleRef> = serde_json::from_str(
            r#"["@nuxtjs/i18n", {"name": "nuxt-seo", "path": "../module/src/module"}, {"path": "./local"}]"#,
        )
        .unwrap();

        assert_eq!(refs[0], ModuleRef::package("@nuxtjs/i18n"));
        assert_eq!(refs[0].package_name(), Some("@nuxtjs/i18n"));
        assert_eq!(refs[1].id(), "nuxt-seo");
        assert_eq!(refs[1].local_path(), Some("../module/src/module"));
        assert_eq!(refs[2].id(), "./local");
        assert_eq!(refs[2].package_name(), None);
    }

    #[test]
    fn serializes_back_to_input_shape() {
        let refs = vec![
            ModuleRef::package("@nuxtjs/i18n"),
            ModuleRef::local(None, "./local"),
        ];
        let json = serde_json::to_string(&refs).unwrap();
        assert_eq!(json, r#"["@nuxtjs/i18n",{"path":"./local"}]"#);
    }

    #[test]
    fn accept_all_accepts_everything() {
        assert!(AcceptAll.resolve(&ModuleRef::package("anything")).is_ok());
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |m: &ModuleRef| {
            if m.id() == "missing" {
                Err("not found".to_string())
            } else {
                Ok(())
            }
        };
        assert!(resolver.resolve(&ModuleRef::package("present")).is_ok());
        assert_eq!(
            resolver.resolve(&ModuleRef::package("missing")),
            Err("not found".to_string())
        );
    }

    #[test]
    fn known_modules_checks_packages() {
        let known = KnownModules::new(["@nuxtjs/i18n"]);
        assert!(known.resolve(&ModuleRef::package("@nuxtjs/i18n")).is_ok());

        let err = known
            .resolve(&ModuleRef::package("@nuxtjs/sitemap"))
            .unwrap_err();
        assert!(err.contains("@nuxtjs/sitemap"));
    }

    #[test]
    fn known_modules_checks_local_paths_against_root() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("module/src")).unwrap();
        std::fs::write(dir.path().join("module/src/module.ts"), "export {}").unwrap();

        let known = KnownModules::new(Vec::<String>::new()).with_root(dir.path());
        assert!(
            known
                .resolve(&ModuleRef::local(None, "module/src/module"))
                .is_ok()
        );
        assert!(
            known
                .resolve(&ModuleRef::local(None, "module/src/other"))
                .is_err()
        );
    }

    #[test]
    fn known_modules_without_root_accepts_local_paths() {
        let known = KnownModules::default();
        assert!(known.resolve(&ModuleRef::local(None, "nowhere")).is_ok());
    }
}
