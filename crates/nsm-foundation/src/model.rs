//! Core data model for the migration engine
//!
//! These are the value types shared by every stage of the migration: which
//! side of the application a file belongs to, the canonical namespaced
//! identity derived for a legacy class, the prefix rules supplied by the
//! caller, and the file-move intents handed to the filesystem collaborator.

use serde::{Deserialize, Serialize};

/// Namespace separator of the target ecosystem (PHP)
pub const NS_SEPARATOR: char = '\\';

/// The logical side of the application a source file belongs to.
///
/// Derived from the file path, never stored independently of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationSide {
    Administrator,
    Site,
    Api,
}

impl ApplicationSide {
    /// The namespace segment for this side, e.g. `Administrator`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Site => "Site",
            Self::Api => "Api",
        }
    }

    /// The short partition key used by the persisted rename map
    pub fn partition(&self) -> &'static str {
        match self {
            Self::Administrator => "admin",
            Self::Site => "site",
            Self::Api => "api",
        }
    }

    /// Recognize a namespace segment as a side label
    pub fn from_label(segment: &str) -> Option<Self> {
        match segment {
            "Administrator" => Some(Self::Administrator),
            "Site" => Some(Self::Site),
            "Api" => Some(Self::Api),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A canonical namespaced identity: the migration target for a legacy class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalIdentity {
    /// Ordered namespace segments, e.g. `["Acme", "Example", "Administrator", "Model"]`
    pub namespace: Vec<String>,
    /// The simple class name, e.g. `FoobarModel`
    pub simple_name: String,
}

impl CanonicalIdentity {
    /// Build an identity from namespace segments and a simple name.
    ///
    /// Empty segments and empty simple names violate the identifier grammar
    /// and yield `None`.
    pub fn new(namespace: Vec<String>, simple_name: impl Into<String>) -> Option<Self> {
        let simple_name = simple_name.into();
        if simple_name.is_empty() || namespace.iter().any(|segment| segment.is_empty()) {
            return None;
        }
        Some(Self {
            namespace,
            simple_name,
        })
    }

    /// Parse a backslash-delimited fully qualified name.
    ///
    /// Leading and trailing separators are tolerated; an empty interior
    /// segment is malformed and yields `None`.
    pub fn from_fqn(fqn: &str) -> Option<Self> {
        let trimmed = fqn.trim_matches(NS_SEPARATOR);
        if trimmed.is_empty() {
            return None;
        }
        let mut segments: Vec<String> = trimmed.split(NS_SEPARATOR).map(String::from).collect();
        let simple_name = segments.pop()?;
        Self::new(segments, simple_name)
    }

    /// The namespace as a backslash-delimited string, empty when the
    /// identity is global.
    pub fn namespace_str(&self) -> String {
        self.namespace.join("\\")
    }

    /// The fully qualified name, without a leading separator.
    pub fn fqn(&self) -> String {
        if self.namespace.is_empty() {
            return self.simple_name.clone();
        }
        format!("{}\\{}", self.namespace_str(), self.simple_name)
    }
}

/// One legacy-prefix rule supplied by the caller's configuration.
///
/// Maps a flat class-name prefix (e.g. `Example` for `com_example`) to the
/// common namespace prefix of the migrated component (e.g. `Acme\Example`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyPrefixRule {
    /// The legacy class-name prefix, non-empty
    pub prefix: String,
    /// The common namespace prefix, stored without leading/trailing separators
    pub target_namespace: String,
    /// Class names that must never be rewritten
    #[serde(default)]
    pub excluded_names: Vec<String>,
}

impl LegacyPrefixRule {
    pub fn new(prefix: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target_namespace: target_namespace
                .into()
                .trim_matches(NS_SEPARATOR)
                .to_string(),
            excluded_names: Vec::new(),
        }
    }

    pub fn with_excluded(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Is this class name vetoed by the rule's exclusion list?
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_names.iter().any(|excluded| excluded == name)
    }
}

/// A planned file relocation, owned by the filesystem collaborator.
///
/// The engine only ever produces these; it never moves files itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMoveIntent {
    pub from_path: String,
    pub to_path: String,
}
