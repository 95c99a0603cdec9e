//! Fixed technology-keyword vocabulary scanned inside free-text lines.
//!
//! The list is intentionally small: a few dozen common languages and
//! frameworks. Anything outside it is not recognized as a technology.

use once_cell::sync::Lazy;
use regex::Regex;

/// Alternation order matters: longer names come before their prefixes
/// (`JavaScript` before `Java`) so the leftmost-first match takes the
/// full word.
static TECH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(JavaScript|Python|React|Node\.?js|Java|C\+\+|HTML|CSS|SQL|MongoDB|PostgreSQL|AWS|Docker|Kubernetes|Git|TypeScript|Angular|Vue|Django|Flask|Express|Spring|\.NET|Ruby|PHP|Swift|Kotlin|Go|Rust)\b",
    )
    .unwrap()
});

/// Returns every vocabulary hit on the line, in order, preserving the casing
/// of the matched substring. Duplicates are kept; the caller deduplicates
/// once per entry at the end of the scan.
pub fn scan(line: &str) -> Vec<String> {
    TECH_RE
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect()
}
