use std::{
    fs,
    path::{Path, PathBuf},
};

use oxc_allocator::Allocator;
use rch_logger::Logger;

use crate::{
    analyze::find_reexport_source,
    config::BuildOptions,
    parse::parse_module,
    util::{absolutize, with_suffix},
    TreeError,
};

const INDEX_FILES: [&str; 2] = ["index.js", "index.jsx"];

/// Expands a base path into the files it may refer to, in probe order.
pub fn expand_candidates(base: &Path) -> [PathBuf; 5] {
    [
        base.to_path_buf(),
        with_suffix(base, ".js"),
        with_suffix(base, ".jsx"),
        base.join("index.js"),
        base.join("index.jsx"),
    ]
}

/// A module file that was found and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedModule {
    pub path: PathBuf,
    pub content: String,
}

/// Finds the file backing a component.
pub struct ModuleLocator<'o> {
    options: &'o BuildOptions,
}

impl<'o> ModuleLocator<'o> {
    pub fn new(options: &'o BuildOptions) -> Self {
        Self { options }
    }

    /// All candidate files for a node, deduplicated, in probe order:
    /// alias candidates, then candidates from the node's own filename, then
    /// candidates below the secondary module directory.
    ///
    /// Relative specifiers never go through the alias table.
    pub fn candidates(
        &self,
        declared_source: Option<&str>,
        filename: &Path,
        parent_dir: Option<&Path>,
    ) -> Vec<PathBuf> {
        let mut bases = Vec::new();

        if let Some(specifier) = declared_source {
            if !self.options.alias.is_empty() && !specifier.starts_with('.') {
                let aliased = self.options.alias.resolve(specifier);
                bases.push(absolutize(&self.options.base_dir, Path::new(&aliased)));
            }
        }

        bases.push(filename.to_path_buf());

        if let (Some(module_dir), Some(parent_dir)) = (&self.options.module_dir, parent_dir) {
            if let Ok(rest) = filename.strip_prefix(parent_dir) {
                bases.push(absolutize(&self.options.base_dir, module_dir).join(rest));
            }
        }

        let mut candidates: Vec<PathBuf> = Vec::with_capacity(bases.len() * 5);
        for candidate in bases.iter().flat_map(|base| expand_candidates(base)) {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }

        candidates
    }

    /// Probes `candidates` in order and reads the first existing file.
    ///
    /// Index files that re-export `component_name` are followed one hop to
    /// the file they re-export from. Missing candidates are skipped; an
    /// existing file that cannot be read is an error.
    pub fn locate(
        &self,
        component_name: &str,
        candidates: &[PathBuf],
    ) -> Result<Option<LocatedModule>, TreeError> {
        for candidate in candidates {
            if !candidate.is_file() {
                Logger::debug(&format!("No file at {}", candidate.display()), 3);
                continue;
            }

            let content = read_module(candidate)?;

            if is_index_file(candidate) {
                if let Some(located) = self.follow_index(component_name, candidate, &content) {
                    return Ok(Some(located));
                }
            }

            return Ok(Some(LocatedModule {
                path: candidate.clone(),
                content,
            }));
        }

        Ok(None)
    }

    /// Resolves `component_name` through an index file, if it re-exports it.
    fn follow_index(
        &self,
        component_name: &str,
        index_path: &Path,
        content: &str,
    ) -> Option<LocatedModule> {
        let allocator = Allocator::default();
        let program = match parse_module(&allocator, index_path, content) {
            Ok(program) => program,
            Err(e) => {
                Logger::debug(&format!("Not following index file: {}", e), 2);
                return None;
            }
        };

        let source = find_reexport_source(&program.body, component_name)?;
        let index_dir = index_path.parent()?;
        let target = absolutize(index_dir, Path::new(&source));

        Logger::debug(
            &format!(
                "{} re-exports {} from {}",
                index_path.display(),
                component_name,
                source
            ),
            2,
        );

        let mut targets = Vec::with_capacity(3);
        if has_module_extension(&target) {
            targets.push(target.clone());
        }
        targets.push(with_suffix(&target, ".jsx"));
        targets.push(with_suffix(&target, ".js"));

        targets.into_iter().find_map(|path| {
            if !path.is_file() {
                return None;
            }
            match read_module(&path) {
                Ok(content) => Some(LocatedModule { path, content }),
                Err(e) => {
                    Logger::error(&e.to_string());
                    None
                }
            }
        })
    }
}

fn read_module(path: &Path) -> Result<String, TreeError> {
    fs::read_to_string(path).map_err(|source| TreeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn is_index_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| INDEX_FILES.contains(&name))
}

fn has_module_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| matches!(ext, "js" | "jsx"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::test_utils::create_mock_project, AliasTable};

    fn options(base_dir: &Path) -> BuildOptions {
        BuildOptions::new(base_dir.to_path_buf())
    }

    #[test]
    fn test_expand_candidates_order() {
        let candidates = expand_candidates(Path::new("/p/Foo"));

        assert_eq!(
            candidates,
            [
                PathBuf::from("/p/Foo"),
                PathBuf::from("/p/Foo.js"),
                PathBuf::from("/p/Foo.jsx"),
                PathBuf::from("/p/Foo/index.js"),
                PathBuf::from("/p/Foo/index.jsx"),
            ]
        );
    }

    #[test]
    fn test_candidates_alias_first_then_direct_then_module_dir() {
        let options = options(Path::new("/p"))
            .with_alias(AliasTable::from_iter([("Components", "src/components")]))
            .with_module_dir(PathBuf::from("lib"));
        let locator = ModuleLocator::new(&options);

        let candidates = locator.candidates(
            Some("Components/Widget"),
            Path::new("/p/src/Components/Widget"),
            Some(Path::new("/p/src")),
        );

        assert_eq!(candidates.len(), 15);
        assert_eq!(candidates[0], PathBuf::from("/p/src/components/Widget"));
        assert_eq!(candidates[5], PathBuf::from("/p/src/Components/Widget"));
        assert_eq!(candidates[10], PathBuf::from("/p/lib/Components/Widget"));
    }

    #[test]
    fn test_relative_specifier_skips_alias() {
        let options = options(Path::new("/p"))
            .with_alias(AliasTable::from_iter([(".", "/somewhere/else")]));
        let locator = ModuleLocator::new(&options);

        let candidates = locator.candidates(Some("./Foo"), Path::new("/p/src/Foo"), None);

        assert_eq!(candidates.to_vec(), expand_candidates(Path::new("/p/src/Foo")).to_vec());
    }

    #[test]
    fn test_candidates_are_deduplicated() {
        let options = options(Path::new("/p"))
            .with_alias(AliasTable::from_iter([("Components", "src/Components")]));
        let locator = ModuleLocator::new(&options);

        let candidates = locator.candidates(
            Some("Components/Widget"),
            Path::new("/p/src/Components/Widget"),
            None,
        );

        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_locate_prefers_js_over_jsx() {
        let temp_dir = create_mock_project(&[
            ("src/Foo.js", "export default 1;"),
            ("src/Foo.jsx", "export default 2;"),
        ]);
        let options = options(temp_dir.path());
        let locator = ModuleLocator::new(&options);
        let candidates = expand_candidates(&temp_dir.path().join("src/Foo"));

        let located = locator.locate("Foo", &candidates).unwrap().unwrap();

        assert_eq!(located.path, temp_dir.path().join("src/Foo.js"));
        assert_eq!(located.content, "export default 1;");
    }

    #[test]
    fn test_locate_directory_index() {
        let temp_dir = create_mock_project(&[(
            "src/Foo/index.jsx",
            "import React from 'react'; export default () => <div />;",
        )]);
        let options = options(temp_dir.path());
        let locator = ModuleLocator::new(&options);
        let candidates = expand_candidates(&temp_dir.path().join("src/Foo"));

        let located = locator.locate("Foo", &candidates).unwrap().unwrap();

        assert_eq!(located.path, temp_dir.path().join("src/Foo/index.jsx"));
    }

    #[test]
    fn test_locate_follows_index_reexport() {
        let temp_dir = create_mock_project(&[
            ("src/components/index.js", "export { Button } from './Button';"),
            ("src/components/Button.jsx", "export const Button = () => null;"),
        ]);
        let options = options(temp_dir.path());
        let locator = ModuleLocator::new(&options);
        let candidates = expand_candidates(&temp_dir.path().join("src/components"));

        let located = locator.locate("Button", &candidates).unwrap().unwrap();

        assert_eq!(located.path, temp_dir.path().join("src/components/Button.jsx"));
    }

    #[test]
    fn test_locate_falls_back_to_index_itself() {
        let temp_dir = create_mock_project(&[(
            "src/components/index.js",
            "export { Button } from './Button';",
        )]);
        let options = options(temp_dir.path());
        let locator = ModuleLocator::new(&options);
        let candidates = expand_candidates(&temp_dir.path().join("src/components"));

        let located = locator.locate("Button", &candidates).unwrap().unwrap();

        assert_eq!(located.path, temp_dir.path().join("src/components/index.js"));
    }

    #[test]
    fn test_locate_nothing_found() {
        let temp_dir = create_mock_project(&[]);
        let options = options(temp_dir.path());
        let locator = ModuleLocator::new(&options);
        let candidates = expand_candidates(&temp_dir.path().join("react-router-dom"));

        assert_eq!(locator.locate("Link", &candidates).unwrap(), None);
    }
}
