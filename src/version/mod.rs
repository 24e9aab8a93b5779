//! Version comparator
//!
//! Answers "is entity A a later version of entity B?". The comparison only
//! makes sense under a stack of preconditions (same kind, same name, both
//! attached, libraries sharing a base namespace and version scheme); every
//! failed precondition degrades the answer to `false` instead of erroring,
//! so callers can probe arbitrary entity pairs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

use crate::model::arena::EntityId;
use crate::model::Model;

// Dotted numeric version, e.g. "1", "1.0", "2.10.3".
static DOTTED_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*$").unwrap());

/// Whether `later` is a later version of `earlier`.
///
/// True only when both handles resolve, both entities are of the same kind
/// and share a non-empty local name, both are attached, and
/// [`is_later_library_version`] holds for their owning libraries.
pub fn is_later_version(model: &Model, later: EntityId, earlier: EntityId) -> bool {
    let (Some(later_entity), Some(earlier_entity)) = (model.entity(later), model.entity(earlier))
    else {
        return false;
    };
    if later_entity.kind() != earlier_entity.kind() {
        return false;
    }
    let (Some(later_name), Some(earlier_name)) = (
        model.entity_local_name(later),
        model.entity_local_name(earlier),
    ) else {
        return false;
    };
    if later_name.is_empty() || later_name != earlier_name {
        return false;
    }
    let (Some(later_lib), Some(earlier_lib)) =
        (model.owning_library(later), model.owning_library(earlier))
    else {
        return false;
    };
    is_later_library_version(model, later_lib, earlier_lib)
}

/// Whether library `later` is a later version of library `earlier`: both
/// must be libraries sharing a non-empty base namespace and the same version
/// scheme, with `later`'s version comparing strictly greater.
pub fn is_later_library_version(model: &Model, later: EntityId, earlier: EntityId) -> bool {
    let (Some(later_lib), Some(earlier_lib)) = (
        model.entity(later).and_then(|e| e.payload.as_library()),
        model.entity(earlier).and_then(|e| e.payload.as_library()),
    ) else {
        return false;
    };
    let base = later_lib.base_namespace();
    if base.is_empty() || base != earlier_lib.base_namespace() {
        return false;
    }
    if later_lib.version_scheme != earlier_lib.version_scheme {
        return false;
    }
    compare_versions(&later_lib.version_scheme, &later_lib.version, &earlier_lib.version)
        == Ordering::Greater
}

/// Total order on version identifiers under a scheme. Every scheme currently
/// compares the same way: dotted numeric identifiers segment-by-segment with
/// missing segments read as zero, anything else lexicographically. The
/// scheme parameter stays on the signature so callers keyed by scheme do not
/// change when schemes diverge.
pub fn compare_versions(_scheme: &str, a: &str, b: &str) -> Ordering {
    if DOTTED_NUMERIC.is_match(a) && DOTTED_NUMERIC.is_match(b) {
        let mut left = a.split('.').map(|s| s.parse::<u64>().unwrap_or(0));
        let mut right = b.split('.').map(|s| s.parse::<u64>().unwrap_or(0));
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (l, r) => {
                    let ordering = l.unwrap_or(0).cmp(&r.unwrap_or(0));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
            }
        }
    } else {
        a.cmp(b)
    }
}
