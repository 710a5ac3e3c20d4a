//! Cursor configuration

use crate::dom::parser::DEFAULT_MAX_DEPTH;

/// How scalar cursor reads resolve a missing tag, attribute or text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissPolicy {
    /// Return the caller-supplied default
    #[default]
    UseDefault,
    /// Return the type's zero value and ignore the supplied default
    ZeroValue,
}

/// Serializer layout
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteOptions {
    /// Indentation unit; empty writes everything on one line
    pub indent: String,
    /// Emit `<?xml version="1.0"?>` first
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            declaration: true,
        }
    }
}

impl WriteOptions {
    /// Single line, no declaration
    pub fn compact() -> Self {
        Self {
            indent: String::new(),
            declaration: false,
        }
    }
}

/// Configuration for a [`Cursor`](crate::Cursor)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Codec encodes update an existing attribute instead of appending another
    pub check_duplicates: bool,
    pub miss_policy: MissPolicy,
    /// Maximum element nesting accepted on load (0 means unlimited)
    pub max_depth: u16,
    pub write: WriteOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_duplicates: true,
            miss_policy: MissPolicy::UseDefault,
            max_depth: DEFAULT_MAX_DEPTH,
            write: WriteOptions::default(),
        }
    }
}

impl Config {
    /// Behavior of the older settings API: scalar reads ignore defaults and
    /// encodes always append
    pub fn legacy() -> Self {
        Self {
            check_duplicates: false,
            miss_policy: MissPolicy::ZeroValue,
            ..Self::default()
        }
    }

    pub const fn with_duplicate_check(mut self, check_duplicates: bool) -> Self {
        self.check_duplicates = check_duplicates;
        self
    }

    pub const fn with_miss_policy(mut self, miss_policy: MissPolicy) -> Self {
        self.miss_policy = miss_policy;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_write_options(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.check_duplicates);
        assert_eq!(config.miss_policy, MissPolicy::UseDefault);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.write.indent, "\t");
    }

    #[test]
    fn test_legacy_config() {
        let config = Config::legacy();
        assert!(!config.check_duplicates);
        assert_eq!(config.miss_policy, MissPolicy::ZeroValue);
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_duplicate_check(false)
            .with_max_depth(0)
            .with_write_options(WriteOptions::compact());
        assert!(!config.check_duplicates);
        assert_eq!(config.max_depth, 0);
        assert!(!config.write.declaration);
    }
}
