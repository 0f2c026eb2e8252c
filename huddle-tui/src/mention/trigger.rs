//! `@prefix` detection and mention splicing on flat text with a byte caret.
use regex::Regex;
use std::sync::OnceLock;

fn trigger_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // `@` then ASCII word characters, ending exactly at the caret
        Regex::new(r"@([A-Za-z0-9_]*)$").expect("mention trigger pattern is valid")
    })
}

/// Return the prefix being typed after an `@` immediately before the caret
///
/// `None` when the text before the caret does not end in `@word*`, or when
/// the caret is not a valid char boundary of `text`.
pub fn detect_trigger(text: &str, caret: usize) -> Option<&str> {
    let before = text.get(..caret)?;
    trigger_regex()
        .captures(before)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Result of splicing a confirmed mention into the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub text: String,
    /// Byte offset right after the inserted trailing space
    pub caret: usize,
}

/// Replace `[last '@' before caret, caret)` with `@username `
pub fn splice_mention(text: &str, caret: usize, username: &str) -> Option<Splice> {
    let before = text.get(..caret)?;
    let start = before.rfind('@')?;

    let mut spliced = String::with_capacity(text.len() + username.len() + 2);
    spliced.push_str(&text[..start]);
    spliced.push('@');
    spliced.push_str(username);
    spliced.push(' ');
    let new_caret = spliced.len();
    spliced.push_str(&text[caret..]);

    Some(Splice {
        text: spliced,
        caret: new_caret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_detect_trigger() {
        assert_eq!(detect_trigger("hello @al", 9), Some("al"));
        assert_eq!(detect_trigger("@", 1), Some(""));
        assert_eq!(detect_trigger("hello @al", 8), Some("a"));
        assert_eq!(detect_trigger("hello @al ", 10), None);
        assert_eq!(detect_trigger("hello al", 8), None);
        assert_eq!(detect_trigger("mail me@host", 12), Some("host"));
        assert_eq!(detect_trigger("@al-b", 5), None);
        // caret past end
        assert_eq!(detect_trigger("@al", 10), None);
    }

    #[test]
    fn test_detect_trigger_ignores_non_ascii_word_chars() {
        assert_eq!(detect_trigger("@josé", "@josé".len()), None);
    }

    #[test]
    fn test_splice_mention_at_end() {
        let splice = splice_mention("hello @al", 9, "albert").unwrap();
        assert_eq!(splice.text, "hello @albert ");
        assert_eq!(splice.caret, splice.text.len());
    }

    #[test]
    fn test_splice_mention_keeps_text_after_caret() {
        let splice = splice_mention("hey @bo, welcome", 7, "bob").unwrap();
        assert_eq!(splice.text, "hey @bob , welcome");
        assert_eq!(&splice.text[..splice.caret], "hey @bob ");
    }

    #[test]
    fn test_splice_without_at_sign() {
        assert_eq!(splice_mention("plain text", 5, "alice"), None);
    }

    fn is_word(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    proptest! {
        #[test]
        fn prop_trigger_iff_at_then_word_chars(text in "[a-c_ @\\-]{0,24}", cut in 0usize..25) {
            let caret = cut.min(text.len());
            let before = &text[..caret];
            let expected = before
                .rfind('@')
                .filter(|&at| before[at + 1..].chars().all(is_word))
                .map(|at| &before[at + 1..]);
            prop_assert_eq!(detect_trigger(&text, caret), expected);
        }

        #[test]
        fn prop_splice_touches_only_the_mention_span(
            head in "[a-z ]{0,10}",
            prefix in "[a-z_]{0,6}",
            tail in "[a-z ,.]{0,10}",
            username in "[a-z0-9_]{1,12}",
        ) {
            let text = format!("{}@{}{}", head, prefix, tail);
            let caret = head.len() + 1 + prefix.len();
            let splice = splice_mention(&text, caret, &username).unwrap();
            prop_assert!(splice.text.starts_with(&head));
            prop_assert!(splice.text.ends_with(&tail));
            prop_assert_eq!(&splice.text[head.len()..splice.caret], format!("@{} ", username));
            prop_assert_eq!(splice.text.len(), head.len() + username.len() + 2 + tail.len());
        }
    }
}
