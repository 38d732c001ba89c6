//! Whole-document entity guard.
//!
//! Last line of defense after serialization: the per-field sanitizer covers
//! everything it is pointed at, but text that reaches the document through
//! other routes (attribute material, fields added later) must not ship a
//! bare non-XML entity. The guard scans the final text and escapes the
//! ampersand of every entity-shaped sequence whose name is not canonical.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use feed_transform::CANONICAL_ENTITIES;

/// `&name;` with a letter-led alphanumeric name. Sequences without the
/// closing semicolon are not entity-shaped and stay untouched.
static ENTITY_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]*);").expect("entity pattern"));

/// Result of a guard pass over serialized output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    /// Document text with residual entities escaped.
    pub text: String,
    /// Corrected entity names mapped to how often each was rewritten.
    pub corrections: BTreeMap<String, usize>,
}

impl GuardOutcome {
    /// True when the pass had to rewrite anything.
    pub fn corrected(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Escape residual non-canonical entities in serialized output.
///
/// Canonical entities, including the `&amp;` this function writes itself,
/// are left alone, so applying the guard to its own output changes nothing.
pub fn guard(serialized: &str) -> GuardOutcome {
    let mut corrections: BTreeMap<String, usize> = BTreeMap::new();
    let text = ENTITY_LIKE.replace_all(serialized, |caps: &Captures<'_>| {
        let name = &caps[1];
        if CANONICAL_ENTITIES.contains(&name) {
            caps[0].to_string()
        } else {
            *corrections.entry(name.to_string()).or_insert(0) += 1;
            format!("&amp;{name};")
        }
    });
    GuardOutcome {
        text: text.into_owned(),
        corrections,
    }
}

#[cfg(test)]
mod tests {
    use super::guard;

    #[test]
    fn clean_documents_pass_through() {
        let input = "<name>Tom &amp; Jerry &lt;3</name>";
        let outcome = guard(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.corrected());
    }

    #[test]
    fn residual_entities_are_escaped_and_counted() {
        let outcome = guard("<name>&laquo;x&raquo; and &laquo;y&raquo;</name>");
        assert_eq!(
            outcome.text,
            "<name>&amp;laquo;x&amp;raquo; and &amp;laquo;y&amp;raquo;</name>"
        );
        assert_eq!(outcome.corrections.get("laquo"), Some(&2));
        assert_eq!(outcome.corrections.get("raquo"), Some(&2));
    }

    #[test]
    fn guard_is_idempotent() {
        let first = guard("price &euro;50 &amp; up");
        let second = guard(&first.text);
        assert_eq!(second.text, first.text);
        assert!(!second.corrected());
    }

    #[test]
    fn sequences_without_semicolon_are_not_entity_shaped() {
        let input = "<p>AT&T and R&D</p>";
        let outcome = guard(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.corrected());
    }

    #[test]
    fn all_five_canonical_entities_survive() {
        let input = "&amp; &lt; &gt; &quot; &apos;";
        assert_eq!(guard(input).text, input);
    }

    #[test]
    fn canonical_check_is_case_sensitive() {
        let outcome = guard("&AMP;");
        assert_eq!(outcome.text, "&amp;AMP;");
        assert_eq!(outcome.corrections.get("AMP"), Some(&1));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let outcome = guard("");
        assert!(outcome.text.is_empty());
        assert!(outcome.corrections.is_empty());
    }
}
