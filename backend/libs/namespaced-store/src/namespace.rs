//! Key namespacing
//!
//! Physical key format: `{namespace}:{logical_key}`, or the logical key
//! unchanged when the namespace is empty.

use std::fmt;

const SEPARATOR: char = ':';

/// Immutable key prefix isolating one application's keys from others
/// sharing the same Redis database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let prefix = if namespace.is_empty() {
            namespace
        } else {
            format!("{}{}", namespace, SEPARATOR)
        };
        Self { prefix }
    }

    /// No namespacing; keys are sent as given
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Namespace name without the trailing separator
    pub fn as_str(&self) -> &str {
        self.prefix
            .strip_suffix(SEPARATOR)
            .unwrap_or(self.prefix.as_str())
    }

    /// Logical key -> key sent to Redis
    pub fn to_physical(&self, key: &str) -> String {
        if self.is_empty() {
            key.to_string()
        } else {
            format!("{}{}", self.prefix, key)
        }
    }

    /// Key returned by Redis -> logical key.
    ///
    /// Strips one leading `{namespace}:`. Keys without the prefix are
    /// returned unmodified.
    pub fn to_logical(&self, key: &str) -> String {
        if self.is_empty() {
            return key.to_string();
        }
        key.strip_prefix(self.prefix.as_str())
            .unwrap_or(key)
            .to_string()
    }

    pub fn to_physical_all<I, S>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| self.to_physical(key.as_ref()))
            .collect()
    }

    pub fn to_logical_all<I, S>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| self.to_logical(key.as_ref()))
            .collect()
    }

    /// Scope a KEYS glob pattern to this namespace.
    ///
    /// Glob metacharacters in the namespace itself are escaped so they match
    /// literally; `pattern` is passed through as a glob.
    pub fn pattern(&self, pattern: &str) -> String {
        let mut scoped = String::with_capacity(self.prefix.len() + pattern.len());
        for c in self.prefix.chars() {
            if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                scoped.push('\\');
            }
            scoped.push(c);
        }
        scoped.push_str(pattern);
        scoped
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Namespace {
    fn from(s: &str) -> Self {
        Namespace::new(s)
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        Namespace::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_physical_with_namespace() {
        let ns = Namespace::new("app");
        assert_eq!(ns.to_physical("user:1"), "app:user:1");
        assert_eq!(ns.to_physical(""), "app:");
    }

    #[test]
    fn test_empty_namespace_is_identity() {
        let ns = Namespace::none();
        for key in ["a", "user:1", "", "app:x"] {
            assert_eq!(ns.to_physical(key), key);
            assert_eq!(ns.to_logical(key), key);
        }
        assert_eq!(Namespace::new(""), Namespace::none());
    }

    #[test]
    fn test_logical_physical_roundtrip() {
        let ns = Namespace::new("shop");
        for key in ["a", "cart:42", "", "x:y:z", "shopping"] {
            assert_eq!(ns.to_logical(&ns.to_physical(key)), key);
        }
    }

    #[test]
    fn test_to_logical_strips_only_leading_prefix_once() {
        let ns = Namespace::new("app");
        assert_eq!(ns.to_logical("app:app:k"), "app:k");
        assert_eq!(ns.to_logical("other:app:k"), "other:app:k");
        assert_eq!(ns.to_logical("apple"), "apple");
    }

    #[test]
    fn test_bulk_helpers() {
        let ns = Namespace::new("n");
        let physical = ns.to_physical_all(["a", "b"]);
        assert_eq!(physical, vec!["n:a".to_string(), "n:b".to_string()]);
        assert_eq!(ns.to_logical_all(&physical), vec!["a", "b"]);
    }

    #[test]
    fn test_pattern_and_display() {
        let ns = Namespace::new("app");
        assert_eq!(ns.pattern("user:*"), "app:user:*");
        assert_eq!(ns.as_str(), "app");
        assert_eq!(ns.to_string(), "app");
        assert_eq!(Namespace::none().pattern("*"), "*");
    }

    #[test]
    fn test_pattern_escapes_glob_characters_in_namespace() {
        let ns = Namespace::new("a*b");
        assert_eq!(ns.pattern("*"), "a\\*b:*");
        assert_eq!(ns.to_physical("k"), "a*b:k");

        let ns = Namespace::new("t[1]?\\x");
        assert_eq!(ns.pattern("k?"), "t\\[1\\]\\?\\\\x:k?");
    }
}
