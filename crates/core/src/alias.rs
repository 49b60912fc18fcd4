use std::{collections::BTreeMap, path::MAIN_SEPARATOR_STR};

/// Maps the first path segment of a module specifier to a real path prefix,
/// the way a bundler's `resolve.alias` does.
///
/// # Example
///
/// ```
/// use rch_core::AliasTable;
///
/// let alias = AliasTable::from_iter([("Components", "src/components")]);
/// let resolved = alias.resolve("Components/Widget");
/// assert!(resolved.ends_with("Widget"));
/// assert_eq!(alias.resolve("react"), "react");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, segment: impl Into<String>, replacement: impl Into<String>) {
        self.entries.insert(segment.into(), replacement.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, segment: &str) -> Option<&str> {
        self.entries.get(segment).map(String::as_str)
    }

    /// Substitutes the first segment of `specifier` if it is an alias.
    ///
    /// Specifiers are always split on `/`, the separator used in import
    /// statements. The result uses the platform separator and is not checked
    /// against the file system.
    pub fn resolve(&self, specifier: &str) -> String {
        let (head, tail) = match specifier.split_once('/') {
            Some((head, tail)) => (head, Some(tail)),
            None => (specifier, None),
        };

        let Some(replacement) = self.get(head) else {
            return specifier.to_string();
        };

        let prefix = to_platform_separators(replacement);
        match tail {
            Some(tail) if !tail.is_empty() => {
                format!("{}{}{}", prefix, MAIN_SEPARATOR_STR, to_platform_separators(tail))
            }
            _ => prefix,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (segment, replacement) in iter {
            table.insert(segment, replacement);
        }
        table
    }
}

fn to_platform_separators(path: &str) -> String {
    path.split('/').collect::<Vec<_>>().join(MAIN_SEPARATOR_STR)
}
