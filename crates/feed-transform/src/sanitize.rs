//! Text safety for feed content.
//!
//! Sheet text is hand-maintained and regularly carries raw ampersands,
//! legacy HTML entities (`&reg;`, `&nbsp;`, ...) and the occasional literal
//! CDATA terminator. Escaping happens in three places that share one
//! canonical entity list: per-field sanitization and CDATA-safe
//! sanitization here, plus a whole-document guard that runs over the
//! serialized output.

/// Entity names that may legally follow an ampersand in the output.
/// Matching is case-sensitive: `&AMP;` is not an XML entity.
pub const CANONICAL_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Legacy HTML entities normalized to plain characters before escaping.
/// The `;`-terminated form of each name sits before its bare form so the
/// longest match wins at any given position.
const LEGACY_ENTITIES: [(&str, &str); 8] = [
    ("&reg;", "\u{ae}"),
    ("&reg", "\u{ae}"),
    ("&copy;", "\u{a9}"),
    ("&copy", "\u{a9}"),
    ("&trade;", "\u{2122}"),
    ("&trade", "\u{2122}"),
    ("&nbsp;", " "),
    ("&nbsp", " "),
];

/// Replacement for a literal `]]>` inside CDATA content: close the current
/// section, emit the terminator, reopen a section.
const CDATA_SPLIT: &str = "]]]]><![CDATA[>";

/// Make text safe for element content.
///
/// Legacy entities are normalized first, then every ampersand that does not
/// already start a canonical entity is escaped. The order matters: running
/// the generic escape first would turn `&reg;` into `&amp;reg;` before
/// normalization could see it. Text without ampersands passes through
/// unchanged, and re-applying the function is a no-op.
pub fn sanitize_text(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    escape_stray_ampersands(&replace_legacy_entities(input))
}

/// Make text safe as CDATA payload: [`sanitize_text`] plus terminator
/// splitting. The result is written verbatim inside one enclosing CDATA
/// section; a parser reassembles the pre-split text across the sections.
pub fn sanitize_cdata(input: &str) -> String {
    sanitize_text(input).replace("]]>", CDATA_SPLIT)
}

fn replace_legacy_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(position) = rest.find('&') {
        let (before, tail) = rest.split_at(position);
        out.push_str(before);
        match legacy_entity_at(tail) {
            Some((matched_len, replacement)) => {
                out.push_str(replacement);
                rest = &tail[matched_len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Legacy entity starting exactly at the head of `tail`, case-insensitive.
fn legacy_entity_at(tail: &str) -> Option<(usize, &'static str)> {
    for (entity, replacement) in LEGACY_ENTITIES {
        if tail
            .get(..entity.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(entity))
        {
            return Some((entity.len(), replacement));
        }
    }
    None
}

fn escape_stray_ampersands(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(position) = rest.find('&') {
        let (before, tail) = rest.split_at(position);
        out.push_str(before);
        if starts_canonical_entity(&tail[1..]) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

/// True when the text immediately after an ampersand begins with a canonical
/// entity name. The terminating `;` is not required, mirroring the lenient
/// lookahead the legacy pass applies to its own entities.
fn starts_canonical_entity(after_ampersand: &str) -> bool {
    CANONICAL_ENTITIES
        .iter()
        .any(|name| after_ampersand.starts_with(name))
}

#[cfg(test)]
mod tests {
    use super::{sanitize_cdata, sanitize_text};

    #[test]
    fn text_without_ampersands_is_untouched() {
        assert_eq!(sanitize_text(""), "");
        assert_eq!(sanitize_text("plain text"), "plain text");
        assert_eq!(sanitize_text("Крісло дерев'яне"), "Крісло дерев'яне");
        assert_eq!(sanitize_text("5 < 6 > 4"), "5 < 6 > 4");
    }

    #[test]
    fn stray_ampersands_are_escaped() {
        assert_eq!(sanitize_text("a & b"), "a &amp; b");
        assert_eq!(sanitize_text("AT&"), "AT&amp;");
        assert_eq!(sanitize_text("&&"), "&amp;&amp;");
        assert_eq!(sanitize_text("Tom & Jerry & Spike"), "Tom &amp; Jerry &amp; Spike");
    }

    #[test]
    fn canonical_entities_survive() {
        assert_eq!(sanitize_text("x &amp; y"), "x &amp; y");
        assert_eq!(sanitize_text("&lt;b&gt;"), "&lt;b&gt;");
        assert_eq!(sanitize_text("&quot;quoted&quot;"), "&quot;quoted&quot;");
        assert_eq!(sanitize_text("it&apos;s"), "it&apos;s");
    }

    #[test]
    fn canonical_matching_is_case_sensitive() {
        assert_eq!(sanitize_text("&AMP;"), "&amp;AMP;");
        assert_eq!(sanitize_text("&Lt;"), "&amp;Lt;");
    }

    #[test]
    fn legacy_entities_become_characters() {
        assert_eq!(sanitize_text("Brand&reg;"), "Brand\u{ae}");
        assert_eq!(sanitize_text("&copy; 2024"), "\u{a9} 2024");
        assert_eq!(sanitize_text("Name&trade; here"), "Name\u{2122} here");
        assert_eq!(sanitize_text("a&nbsp;b"), "a b");
    }

    #[test]
    fn legacy_entities_match_any_case() {
        assert_eq!(sanitize_text("&REG;"), "\u{ae}");
        assert_eq!(sanitize_text("&NbSp;x"), " x");
    }

    #[test]
    fn legacy_entities_match_without_semicolon() {
        assert_eq!(sanitize_text("Brand&reg products"), "Brand\u{ae} products");
        assert_eq!(sanitize_text("end &copy"), "end \u{a9}");
    }

    #[test]
    fn unknown_entities_get_escaped_ampersands() {
        assert_eq!(sanitize_text("&laquo;x&raquo;"), "&amp;laquo;x&amp;raquo;");
        assert_eq!(sanitize_text("&mdash;"), "&amp;mdash;");
    }

    #[test]
    fn mixed_input_handles_every_case_at_once() {
        assert_eq!(
            sanitize_text("Tom &amp; Jerry &copy; 2024 &laquo;cartoon&raquo; & more"),
            "Tom &amp; Jerry \u{a9} 2024 &amp;laquo;cartoon&amp;raquo; &amp; more"
        );
    }

    #[test]
    fn sanitize_text_is_idempotent() {
        for input in [
            "a & b",
            "&amp;",
            "&laquo;x&raquo;",
            "Brand&reg; & &copy",
            "&AMP; &nbsp &&",
        ] {
            let once = sanitize_text(input);
            assert_eq!(sanitize_text(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn cdata_without_terminator_matches_text_sanitization() {
        assert_eq!(sanitize_cdata("Desc & more"), "Desc &amp; more");
        assert_eq!(sanitize_cdata(""), "");
    }

    #[test]
    fn cdata_terminator_is_split_across_sections() {
        assert_eq!(sanitize_cdata("a]]>b"), "a]]]]><![CDATA[>b");
        assert_eq!(
            sanitize_cdata("]]>]]>"),
            "]]]]><![CDATA[>]]]]><![CDATA[>"
        );
    }

    #[test]
    fn cdata_split_combines_with_entity_handling() {
        assert_eq!(
            sanitize_cdata("card &reg; sheet ]]> tail & end"),
            "card \u{ae} sheet ]]]]><![CDATA[> tail &amp; end"
        );
    }
}
