//! Context predicates over the completer's two stacks.
//!
//! Each predicate is a pure function of explicit stack-tail snapshots, so the
//! grammar's disambiguation rules can be tested without constructing a
//! completer. Slices are ordered bottom-to-top; the Mirror Stack's closing
//! suffix therefore reads from the *end* of its slice backwards.

use crate::token::Token;

/// Inside a string: an unmatched opening quote on the Token Stack and its
/// promised closing quote on the Mirror Stack.
pub(crate) fn in_string(tokens: &[Token], mirror: &[Token]) -> bool {
    matches!(tokens, [.., Token::Quote]) && matches!(mirror, [.., Token::Quote])
}

/// A quote just opened directly under `{` or after a comma, while the mirror
/// still promises `}`: this is the first character of an object key.
pub(crate) fn at_object_key_start(tokens: &[Token], mirror: &[Token]) -> bool {
    matches!(
        tokens,
        [.., Token::LeftBrace | Token::Comma, Token::Quote]
    ) && matches!(mirror, [.., Token::RightBrace])
}

/// The mirror tail still carries the key placeholder (`"` over `:`), so a
/// closing quote ends an object key rather than a string value.
pub(crate) fn at_object_key_end(mirror: &[Token]) -> bool {
    matches!(mirror, [.., Token::Colon, Token::Quote])
}

/// A quote just opened after `:` while the `null` placeholder is pending:
/// start of a string-typed object value.
pub(crate) fn at_string_value_start(tokens: &[Token], mirror: &[Token]) -> bool {
    matches!(tokens, [.., Token::Colon, Token::Quote]) && ends_with_null_placeholder(mirror)
}

/// A quote just opened directly under `[` or after a comma, while the mirror
/// promises `]`: start of a string-typed array element.
pub(crate) fn at_array_string_start(tokens: &[Token], mirror: &[Token]) -> bool {
    matches!(
        tokens,
        [.., Token::LeftBracket | Token::Comma, Token::Quote]
    ) && matches!(mirror, [.., Token::RightBracket])
}

/// A quote opened with nothing else on either stack: a root-level string.
pub(crate) fn at_root_string_start(tokens: &[Token], mirror: &[Token]) -> bool {
    matches!(tokens, [Token::Quote]) && mirror.is_empty()
}

/// A non-string value may begin here as an object member value: the colon has
/// been consumed and its `null` placeholder is still pending.
pub(crate) fn at_object_value_start(tokens: &[Token], mirror: &[Token]) -> bool {
    matches!(tokens, [.., Token::Colon]) && ends_with_null_placeholder(mirror)
}

/// A non-string value may begin here as an array element (first element or
/// right after a comma).
pub(crate) fn at_array_value_start(tokens: &[Token], mirror: &[Token]) -> bool {
    matches!(tokens, [.., Token::LeftBracket | Token::Comma])
        && matches!(mirror, [.., Token::RightBracket])
}

/// A value may begin here as the document root.
pub(crate) fn at_root_value_start(tokens: &[Token], mirror: &[Token]) -> bool {
    tokens.is_empty() && mirror.is_empty()
}

/// The mirror tail is the 4-token `null` placeholder standing in for a value
/// whose real type is not yet known.
pub(crate) fn ends_with_null_placeholder(mirror: &[Token]) -> bool {
    matches!(
        mirror,
        [.., Token::LetterL, Token::LetterL, Token::LetterU, Token::LetterN]
    )
}

/// A `true`/`false`/`null` keyword is in progress: its first letter sits on
/// the Token Stack and the Mirror Stack spells the remainder.
pub(crate) fn in_keyword(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [.., Token::LetterT | Token::LetterF | Token::LetterN]
    )
}

/// A number is in progress (integer, fraction, or exponent part).
pub(crate) fn in_number(tokens: &[Token]) -> bool {
    matches!(tokens, [.., Token::Number | Token::Dot | Token::LetterE])
}

/// A backslash is pending resolution by the next character.
pub(crate) fn in_escape(tokens: &[Token]) -> bool {
    matches!(tokens, [.., Token::Backslash])
}

/// Inside the hex digits of a `\uXXXX` escape (or its surrogate pair tail).
pub(crate) fn in_unicode_escape(tokens: &[Token]) -> bool {
    matches!(tokens, [.., Token::LetterU])
}
