// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Company name sanitizer.
//!
//! [`sanitize`] maps arbitrary text to a canonical identifier: lowercase ASCII
//! letters, digits and single hyphens, at most [`MAX_IDENTIFIER_LEN`] characters.
//! Accented Latin letters fold to their base letter; anything without a Latin
//! base form (emoji, other scripts, symbols) is dropped.
//!
//! Truncation is the last step and is not followed by another cleanup pass, so
//! a cut that lands right after a hyphen leaves a trailing hyphen. That output
//! is still accepted as canonical.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Maximum length of a canonical identifier, in characters.
pub const MAX_IDENTIFIER_LEN: usize = 67;

/// Derive the canonical identifier for `raw`.
///
/// Pure and total. An empty result means the input had nothing usable and
/// must be rejected by the caller.
pub fn sanitize(raw: &str) -> String {
    let folded: String = raw.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for ch in folded.chars() {
        let keep = match ch {
            c if is_separator(c) => {
                pending_hyphen = true;
                continue;
            }
            'a'..='z' | '0'..='9' => ch,
            _ => continue,
        };
        // Hyphens are only emitted between kept characters, which collapses
        // runs and strips both ends in one pass.
        if pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        pending_hyphen = false;
        slug.push(keep);
    }

    // The slug is pure ASCII here, so byte and char lengths agree.
    slug.truncate(MAX_IDENTIFIER_LEN);
    slug
}

/// Characters that become a single hyphen between kept characters.
///
/// The Unicode `White_Space` property (so U+00A0 and U+3000 count) plus the
/// ASCII hyphen. Zero-width characters such as U+200B and U+FEFF are not
/// `White_Space` and are dropped like punctuation.
fn is_separator(c: char) -> bool {
    c == '-' || c.is_whitespace()
}

/// Whether `s` is a possible output of [`sanitize`].
pub fn is_canonical(s: &str) -> bool {
    s.len() <= MAX_IDENTIFIER_LEN
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        && !s.starts_with('-')
        && !s.contains("--")
        && (!s.ends_with('-') || s.len() == MAX_IDENTIFIER_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_fold_and_emoji_drop() {
        assert_eq!(sanitize("Café 🚀!"), "cafe");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("\t\n "), "");
    }

    #[test]
    fn removable_only_is_empty() {
        assert_eq!(sanitize("🚀🎉"), "");
        assert_eq!(sanitize("!!!???"), "");
        assert_eq!(sanitize("東京"), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn long_input_truncates_to_limit() {
        assert_eq!(sanitize(&"a".repeat(100)), "a".repeat(67));
    }

    #[test]
    fn whitespace_runs_become_one_hyphen() {
        assert_eq!(sanitize("Acme   Widgets\tInc"), "acme-widgets-inc");
    }

    #[test]
    fn unicode_spaces_separate_but_zero_width_characters_drop() {
        assert_eq!(sanitize("a\u{00A0}b"), "a-b");
        assert_eq!(sanitize("a\u{3000}b"), "a-b");
        assert_eq!(sanitize("a\u{FEFF}b"), "ab");
        assert_eq!(sanitize("a\u{200B}b"), "ab");
    }

    #[test]
    fn hyphen_runs_collapse_and_ends_strip() {
        assert_eq!(sanitize("--Acme -- Corp--"), "acme-corp");
        assert_eq!(sanitize("a---b"), "a-b");
    }

    #[test]
    fn removed_characters_do_not_leave_hyphens() {
        // Punctuation disappears without becoming a separator.
        assert_eq!(sanitize("AT&T"), "att");
        assert_eq!(sanitize("Acme, Inc."), "acme-inc");
        assert_eq!(sanitize("foo 🚀 bar"), "foo-bar");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(sanitize("Studio 54"), "studio-54");
    }

    #[test]
    fn latin_diacritics_fold() {
        assert_eq!(sanitize("Crème Brûlée Ñandú"), "creme-brulee-nandu");
        assert_eq!(sanitize("ÅNGSTRÖM"), "angstrom");
    }

    #[test]
    fn letters_without_decomposition_are_dropped() {
        // ß and ø have no combining-mark decomposition.
        assert_eq!(sanitize("Straße"), "strae");
        assert_eq!(sanitize("Ørsted"), "rsted");
    }

    #[test]
    fn hyphen_as_68th_character_is_cut_cleanly() {
        let input = format!("{} b", "a".repeat(67));
        assert_eq!(sanitize(&input), "a".repeat(67));
    }

    #[test]
    fn hyphen_as_67th_character_is_kept() {
        let input = format!("{} bc", "a".repeat(66));
        let out = sanitize(&input);
        assert_eq!(out, format!("{}-", "a".repeat(66)));
        assert_eq!(out.len(), MAX_IDENTIFIER_LEN);
        assert!(is_canonical(&out));
    }

    #[test]
    fn canonical_predicate() {
        assert!(is_canonical("acme-corp"));
        assert!(is_canonical(""));
        assert!(!is_canonical("-acme"));
        assert!(!is_canonical("acme-"));
        assert!(!is_canonical("ac--me"));
        assert!(!is_canonical("Acme"));
        assert!(!is_canonical(&"a".repeat(68)));
    }
}
