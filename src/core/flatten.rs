//! core::flatten
//!
//! Assembly of sorted sources into one flattened compilation unit.
//!
//! # Output contract
//!
//! The artifact is deterministic for a given ordered source sequence:
//! one synthetic aggregate license header, then one section per source
//! (header comment + import-stripped body), separated by single blank
//! lines, with at most one encoder pragma in the whole unit. Non-import
//! content is preserved byte-for-byte.

use super::directives;
use super::types::ResolvedSource;

/// Synthetic license header prepended to every flattened artifact.
///
/// A flattened unit legitimately aggregates several original license
/// declarations; the per-module directives are renamed and this single
/// marker takes their place.
pub const AGGREGATE_LICENSE_HEADER: &str = "// SPDX-License-Identifier: MIXED";

/// Assemble sources, already in dependencies-first order, into the
/// flattened artifact.
///
/// Per source: imports are stripped, the body is trimmed, and a
/// `// File <versioned name>` header line is prepended. After
/// concatenation, per-module license directives are renamed, the aggregate
/// license header is prepended, every encoder pragma after the first is
/// deleted, and the result is trimmed.
///
/// An empty sequence assembles to an empty artifact.
///
/// # Example
///
/// ```
/// use solflat::core::flatten::assemble;
/// use solflat::core::types::{ResolvedSource, SourceName};
///
/// let base = ResolvedSource::new(
///     SourceName::new("Base.sol").unwrap(),
///     "// SPDX-License-Identifier: MIT\ncontract Base {}\n",
///     vec![],
/// );
/// let child = ResolvedSource::new(
///     SourceName::new("Child.sol").unwrap(),
///     "import \"./Base.sol\";\ncontract Child is Base {}\n",
///     vec![SourceName::new("Base.sol").unwrap()],
/// );
///
/// let artifact = assemble(&[&base, &child]);
/// assert!(artifact.starts_with("// SPDX-License-Identifier: MIXED\n"));
/// assert!(artifact.contains("// File Base.sol\n"));
/// assert!(artifact.contains("// File Child.sol\n"));
/// assert!(!artifact.contains("import"));
/// ```
pub fn assemble(ordered: &[&ResolvedSource]) -> String {
    if ordered.is_empty() {
        return String::new();
    }

    let mut flattened = String::new();
    let mut first = true;
    for source in ordered {
        if !first {
            flattened.push('\n');
        }
        flattened.push_str("// File ");
        flattened.push_str(&source.versioned_name());
        flattened.push('\n');

        let body = directives::strip_imports(&source.content);
        flattened.push_str(body.trim());
        flattened.push('\n');

        first = false;
    }

    let flattened = directives::rewrite_license_lines(&flattened);
    let artifact = format!("{AGGREGATE_LICENSE_HEADER}\n\n{flattened}");
    let artifact = directives::dedup_encoder_pragma(&artifact);
    artifact.trim().to_string()
}
