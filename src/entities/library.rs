//! Library entity
//!
//! A library is a namespaced, versioned container of top-level members plus
//! sub-folders and include/import directives. Member names are unique within
//! a library by convention; the container tolerates duplicates and leaves
//! enforcement to validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::children::ChildList;

/// Lifecycle status of a library, ranked for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryStatus {
    Draft,
    UnderReview,
    Final,
    Obsolete,
}

impl LibraryStatus {
    /// Numeric rank; later lifecycle stages rank higher.
    pub fn rank(self) -> u8 {
        match self {
            LibraryStatus::Draft => 10,
            LibraryStatus::UnderReview => 20,
            LibraryStatus::Final => 30,
            LibraryStatus::Obsolete => 40,
        }
    }
}

impl PartialOrd for LibraryStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LibraryStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

// Trailing version component of an assigned namespace, e.g. ".../v01_00".
static NAMESPACE_VERSION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/v[0-9]+(_[0-9]+)*/?$").unwrap());

/// Default version scheme identifier assigned to new libraries.
pub const DEFAULT_VERSION_SCHEME: &str = "default";

#[derive(Debug, Clone)]
pub struct Library {
    pub name: String,
    /// Assigned namespace, including any version suffix.
    pub namespace: String,
    pub comments: String,
    pub version: String,
    pub version_scheme: String,
    pub status: LibraryStatus,
    /// Include directives (paths of sibling libraries in the same namespace).
    pub includes: Vec<String>,
    /// Imported namespaces visible when resolving names from this library.
    pub imports: Vec<String>,
    pub members: ChildList,
    pub folders: ChildList,
}

impl Library {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            comments: String::new(),
            version: "1.0.0".to_string(),
            version_scheme: DEFAULT_VERSION_SCHEME.to_string(),
            status: LibraryStatus::Draft,
            includes: Vec::new(),
            imports: Vec::new(),
            members: ChildList::new(),
            folders: ChildList::new(),
        }
    }

    /// Namespace with the trailing version component stripped. Libraries
    /// sharing a base namespace participate in version comparison.
    pub fn base_namespace(&self) -> &str {
        match NAMESPACE_VERSION_SUFFIX.find(&self.namespace) {
            Some(found) => &self.namespace[..found.start()],
            None => &self.namespace,
        }
    }

    /// Namespaces visible when resolving a qualified name from this library:
    /// its own namespace plus every imported namespace.
    pub fn visible_namespaces(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.namespace.as_str()).chain(self.imports.iter().map(String::as_str))
    }
}
