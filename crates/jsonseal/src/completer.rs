//! The dual-stack streaming completer.
//!
//! One pass, one handler per token kind, amortized O(1) per character. The
//! Token Stack records the open structural and lexical contexts; the Mirror
//! Stack records, in reverse, the suffix that would close the buffer right
//! now. The invariant both stacks cooperate to maintain: as long as the input
//! received so far is a genuine prefix of well-formed JSON,
//! `content + reverse(mirror)` is itself well-formed JSON.
//!
//! Ambiguous bytes (whitespace between tokens, a comma that may turn out to
//! be trailing, a `\` whose escape is unfinished) wait in the padding buffer
//! and only join the content once a later token commits them. Value slots
//! whose type is still unknown are covered by a `null` placeholder on the
//! Mirror Stack; the first real value token swaps the placeholder for the
//! value's own closing promise.

use crate::{
    assembler::Assembler,
    error::CompleterError,
    options::CompleterOptions,
    predicates,
    sections::{self, FALLBACK_SECTION, Section},
    token::{Token, classify},
};

/// Streaming lexer/completer over an in-order sequence of text fragments.
///
/// Feed fragments with [`process_fragment`]; read back
/// [`completed_json`] (an always-valid snapshot) or [`completed_sections`]
/// (ordered top-level sections) at any point. One instance per streamed
/// document; [`reset`] reinitializes for reuse at a turn boundary.
///
/// [`process_fragment`]: StreamingCompleter::process_fragment
/// [`completed_json`]: StreamingCompleter::completed_json
/// [`completed_sections`]: StreamingCompleter::completed_sections
/// [`reset`]: StreamingCompleter::reset
///
/// # Examples
///
/// ```rust
/// use jsonseal::{CompleterOptions, StreamingCompleter};
///
/// let mut completer = StreamingCompleter::new(CompleterOptions::default());
/// completer.process_fragment("{\"response\":\"hel").unwrap();
/// assert_eq!(completer.completed_json(), "{\"response\":\"hel\"}");
///
/// completer.process_fragment("lo\"}").unwrap();
/// let sections = completer.completed_sections();
/// assert_eq!(sections[0].name, "response");
/// assert_eq!(sections[0].content, "hello");
/// ```
#[derive(Debug)]
pub struct StreamingCompleter {
    options: CompleterOptions,
    /// Open structural/lexical contexts, bottom-to-top.
    tokens: Vec<Token>,
    /// The pending closing suffix, in reverse. See module docs.
    mirror: Vec<Token>,
    assembler: Assembler,
    line: usize,
    column: usize,
    /// A grammar violation latches until reset; the producer contract is
    /// broken and no later fragment can be trusted.
    failed: Option<CompleterError>,
}

impl Default for StreamingCompleter {
    fn default() -> Self {
        Self::new(CompleterOptions::default())
    }
}

impl StreamingCompleter {
    /// Creates a completer with the given options.
    #[must_use]
    pub fn new(options: CompleterOptions) -> Self {
        Self {
            options,
            tokens: Vec::new(),
            mirror: Vec::new(),
            assembler: Assembler::new(),
            line: 1,
            column: 1,
            failed: None,
        }
    }

    /// Feed the next fragment, in stream order.
    ///
    /// # Errors
    ///
    /// Fails fast on the first character that no well-formed JSON prefix
    /// could contain at that point. The error latches: every later call
    /// returns it again until [`reset`](StreamingCompleter::reset).
    pub fn process_fragment(&mut self, text: &str) -> Result<(), CompleterError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        for ch in text.chars() {
            if let Err(err) = self.advance(ch) {
                self.failed = Some(err.clone());
                return Err(err);
            }
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        Ok(())
    }

    /// The always-valid snapshot: confirmed content plus the rendered
    /// closing suffix. Empty before any confirmed input.
    #[must_use]
    pub fn completed_json(&self) -> String {
        self.assembler.completed(&self.mirror)
    }

    /// Ordered top-level sections of the current snapshot.
    ///
    /// Pure with respect to completer state and safe to call repeatedly.
    /// Never panics: if the snapshot unexpectedly fails to parse, one
    /// catch-all section named `raw` wraps the raw text.
    #[must_use]
    pub fn completed_sections(&self) -> Vec<Section> {
        let snapshot = self.completed_json();
        match sections::parse_sections(&snapshot) {
            Some(mut found) => {
                if !self.options.permissive {
                    if let Some(allowed) = &self.options.allowed_sections {
                        found.retain(|s| allowed.iter().any(|name| *name == s.name));
                    }
                }
                found
            }
            None => vec![Section {
                name: FALLBACK_SECTION.to_string(),
                content: snapshot,
            }],
        }
    }

    /// True while padding holds bytes a later fragment may still confirm
    /// (trailing whitespace, a pending comma, an unfinished escape). If the
    /// stream ends here, those bytes are dropped; a pending comma means the
    /// producer stopped mid-element.
    #[must_use]
    pub fn has_pending_input(&self) -> bool {
        self.assembler.has_padding()
    }

    /// Clears all buffers and stacks (and any latched error) back to the
    /// initial state. Idempotent.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.mirror.clear();
        self.assembler.reset();
        self.line = 1;
        self.column = 1;
        self.failed = None;
    }

    // --------------------------------------------------------------------
    // Per-character dispatch
    // --------------------------------------------------------------------

    fn advance(&mut self, ch: char) -> Result<(), CompleterError> {
        // Escape machinery outranks everything: while it runs, the string's
        // quote is buried on the Token Stack.
        if predicates::in_unicode_escape(&self.tokens) {
            return self.unicode_escape_char(ch);
        }
        if predicates::in_escape(&self.tokens) {
            return self.escape_char(ch);
        }

        let token = classify(ch);

        if predicates::in_string(&self.tokens, &self.mirror) {
            return match token {
                Token::Quote => {
                    self.close_string();
                    Ok(())
                }
                Token::Backslash => {
                    self.tokens.push(Token::Backslash);
                    self.assembler.buffer(ch);
                    Ok(())
                }
                // Everything else, keyword letters included, is literal
                // string content.
                _ => {
                    self.assembler.confirm(ch);
                    Ok(())
                }
            };
        }

        match token {
            Token::LeftBrace | Token::LeftBracket => self.open_container(token, ch),
            Token::RightBrace | Token::RightBracket => self.close_container(token, ch),
            Token::Quote => self.open_string(),
            Token::Colon => self.colon(),
            Token::Comma => self.comma(),
            Token::Minus => self.minus(),
            Token::Dot => self.dot(),
            Token::Digit0
            | Token::Digit1
            | Token::Digit2
            | Token::Digit3
            | Token::Digit4
            | Token::Digit5
            | Token::Digit6
            | Token::Digit7
            | Token::Digit8
            | Token::Digit9 => self.digit(ch),
            Token::LetterT
            | Token::LetterR
            | Token::LetterU
            | Token::LetterE
            | Token::LetterF
            | Token::LetterA
            | Token::LetterL
            | Token::LetterS
            | Token::LetterN
            | Token::LetterB
            | Token::LetterC
            | Token::LetterD
            | Token::UpperA
            | Token::UpperB
            | Token::UpperC
            | Token::UpperD
            | Token::UpperE
            | Token::UpperF => self.letter(token, ch),
            Token::Whitespace => {
                self.assembler.buffer(ch);
                Ok(())
            }
            // Bare `\`, `/`, or any unclassified character has no structural
            // role outside a string. `Number`/`Eof` never leave the
            // classifier.
            Token::Backslash | Token::Slash | Token::Other | Token::Number | Token::Eof => {
                Err(self.unexpected(ch))
            }
        }
    }

    // --------------------------------------------------------------------
    // Strings
    // --------------------------------------------------------------------

    fn open_string(&mut self) -> Result<(), CompleterError> {
        self.tokens.push(Token::Quote);

        if predicates::at_object_key_start(&self.tokens, &self.mirror) {
            // A partially-typed key always has a pending `":null` so the
            // snapshot stays an object with that key mapped to null.
            self.mirror.extend([
                Token::LetterL,
                Token::LetterL,
                Token::LetterU,
                Token::LetterN,
                Token::Colon,
                Token::Quote,
            ]);
        } else if predicates::at_string_value_start(&self.tokens, &self.mirror) {
            self.pop_null_placeholder();
            self.mirror.push(Token::Quote);
        } else if predicates::at_array_string_start(&self.tokens, &self.mirror)
            || predicates::at_root_string_start(&self.tokens, &self.mirror)
        {
            self.mirror.push(Token::Quote);
        } else {
            self.tokens.pop();
            return Err(self.unexpected('"'));
        }

        self.assembler.confirm('"');
        Ok(())
    }

    fn close_string(&mut self) {
        if predicates::at_object_key_end(&self.mirror) {
            // The key-closing quote is now real; its placeholder twin goes,
            // leaving `:null}` promised.
            self.mirror.pop();
            self.tokens.pop();
        } else {
            // A string value (object, array, or root): the promised closing
            // quote is satisfied.
            self.mirror.pop();
            self.tokens.pop();
            if matches!(self.tokens.last(), Some(Token::Comma)) {
                // This element resolved the array separator before it.
                self.tokens.pop();
            }
        }
        self.assembler.confirm('"');
    }

    // --------------------------------------------------------------------
    // Containers
    // --------------------------------------------------------------------

    fn open_container(&mut self, token: Token, ch: char) -> Result<(), CompleterError> {
        self.begin_value(ch)?;
        let closer = if token == Token::LeftBrace {
            Token::RightBrace
        } else {
            Token::RightBracket
        };
        self.tokens.push(token);
        self.mirror.push(closer);
        self.assembler.confirm(ch);
        Ok(())
    }

    fn close_container(&mut self, token: Token, ch: char) -> Result<(), CompleterError> {
        self.finalize_number(ch)?;
        if matches!(self.tokens.last(), Some(Token::Colon)) {
            // The member value this colon introduced just ended.
            self.tokens.pop();
        }
        if self.assembler.padding().contains(',') {
            // `,}` / `,]` is unreachable from any well-formed prefix.
            return Err(self.unexpected(ch));
        }
        let opener = if token == Token::RightBrace {
            Token::LeftBrace
        } else {
            Token::LeftBracket
        };
        match (self.tokens.last(), self.mirror.last()) {
            (Some(&open), Some(&close)) if open == opener && close == token => {
                self.tokens.pop();
                self.mirror.pop();
                self.assembler.confirm(ch);
                Ok(())
            }
            _ => Err(self.unexpected(ch)),
        }
    }

    // --------------------------------------------------------------------
    // Member punctuation
    // --------------------------------------------------------------------

    fn colon(&mut self) -> Result<(), CompleterError> {
        if matches!(self.mirror.last(), Some(Token::Colon)) {
            self.mirror.pop();
            if matches!(self.tokens.last(), Some(Token::Comma)) {
                // The separator before this key is resolved by the key.
                self.tokens.pop();
            }
            self.tokens.push(Token::Colon);
            self.assembler.confirm(':');
            Ok(())
        } else {
            Err(self.unexpected(':'))
        }
    }

    fn comma(&mut self) -> Result<(), CompleterError> {
        self.finalize_number(',')?;
        if matches!(self.tokens.last(), Some(Token::Colon)) {
            // Object member complete. The comma itself stays provisional: if
            // the stream dies here it must not reach the snapshot.
            self.tokens.pop();
            self.tokens.push(Token::Comma);
            self.assembler.buffer(',');
            Ok(())
        } else if matches!(self.tokens.last(), Some(Token::LeftBracket))
            && matches!(self.mirror.last(), Some(Token::RightBracket))
        {
            self.tokens.push(Token::Comma);
            self.assembler.buffer(',');
            Ok(())
        } else {
            Err(self.unexpected(','))
        }
    }

    // --------------------------------------------------------------------
    // Numbers
    // --------------------------------------------------------------------

    fn digit(&mut self, ch: char) -> Result<(), CompleterError> {
        if predicates::in_number(&self.tokens) {
            if self.assembler.has_padding() {
                // A gap inside a number; `1 2` has no completion.
                return Err(self.unexpected(ch));
            }
            if matches!(self.mirror.last(), Some(Token::Digit0)) {
                // First digit after `-`, `.`, or `e`: the placeholder digit
                // is now real.
                self.mirror.pop();
            }
            self.assembler.confirm(ch);
            Ok(())
        } else {
            self.begin_value(ch)?;
            self.tokens.push(Token::Number);
            self.assembler.confirm(ch);
            Ok(())
        }
    }

    fn minus(&mut self) -> Result<(), CompleterError> {
        if predicates::in_number(&self.tokens) {
            // Exponent sign, valid only directly after a committed `e`/`E`
            // whose digit placeholder is still pending.
            if matches!(self.tokens.last(), Some(Token::LetterE))
                && matches!(self.mirror.last(), Some(Token::Digit0))
                && matches!(self.assembler.last_confirmed(), Some('e' | 'E'))
                && !self.assembler.has_padding()
            {
                self.assembler.confirm('-');
                Ok(())
            } else {
                Err(self.unexpected('-'))
            }
        } else {
            self.begin_value('-')?;
            self.tokens.push(Token::Number);
            self.mirror.push(Token::Digit0);
            self.assembler.confirm('-');
            Ok(())
        }
    }

    fn dot(&mut self) -> Result<(), CompleterError> {
        // A fraction needs a whole part first, so `-.` and `1..` both fail.
        if matches!(self.tokens.last(), Some(Token::Number))
            && !matches!(self.mirror.last(), Some(Token::Digit0))
            && !self.assembler.has_padding()
        {
            self.tokens.push(Token::Dot);
            self.mirror.push(Token::Digit0);
            self.assembler.confirm('.');
            Ok(())
        } else {
            Err(self.unexpected('.'))
        }
    }

    /// Resolve number markers at a delimiter. An unsatisfied digit
    /// placeholder (`-`, `1.`, `2.5e` with nothing after) means the number
    /// cannot end here.
    fn finalize_number(&mut self, ch: char) -> Result<(), CompleterError> {
        while matches!(
            self.tokens.last(),
            Some(Token::Number | Token::Dot | Token::LetterE)
        ) {
            if matches!(self.mirror.last(), Some(Token::Digit0)) {
                return Err(self.unexpected(ch));
            }
            self.tokens.pop();
        }
        Ok(())
    }

    // --------------------------------------------------------------------
    // Letters: keywords, exponents
    // --------------------------------------------------------------------

    fn letter(&mut self, token: Token, ch: char) -> Result<(), CompleterError> {
        if predicates::in_keyword(&self.tokens) {
            if self.assembler.has_padding() {
                return Err(self.unexpected(ch));
            }
            if self.mirror.last() == Some(&token) {
                self.mirror.pop();
                self.assembler.confirm(ch);
                if !matches!(self.mirror.last(), Some(t) if t.is_keyword_letter()) {
                    // Last promised letter consumed; the keyword is whole.
                    self.tokens.pop();
                }
                Ok(())
            } else {
                Err(self.unexpected(ch))
            }
        } else if matches!(token, Token::LetterE | Token::UpperE)
            && matches!(self.tokens.last(), Some(Token::Dot))
        {
            // Exponent continuation, only inside an already-started fraction.
            if matches!(self.mirror.last(), Some(Token::Digit0)) || self.assembler.has_padding() {
                return Err(self.unexpected(ch));
            }
            self.tokens.push(Token::LetterE);
            self.mirror.push(Token::Digit0);
            self.assembler.confirm(ch);
            Ok(())
        } else if matches!(token, Token::LetterT | Token::LetterF | Token::LetterN) {
            self.begin_value(ch)?;
            self.tokens.push(token);
            match token {
                Token::LetterT => self.mirror.extend([
                    Token::LetterE,
                    Token::LetterU,
                    Token::LetterR,
                ]),
                Token::LetterF => self.mirror.extend([
                    Token::LetterE,
                    Token::LetterS,
                    Token::LetterL,
                    Token::LetterA,
                ]),
                _ => self
                    .mirror
                    .extend([Token::LetterL, Token::LetterL, Token::LetterU]),
            }
            self.assembler.confirm(ch);
            Ok(())
        } else {
            Err(self.unexpected(ch))
        }
    }

    // --------------------------------------------------------------------
    // Escapes
    // --------------------------------------------------------------------

    fn escape_char(&mut self, ch: char) -> Result<(), CompleterError> {
        match ch {
            '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => {
                self.tokens.pop();
                // Flushes the buffered backslash ahead of the escape letter.
                self.assembler.confirm(ch);
                Ok(())
            }
            'u' => {
                self.tokens.pop();
                self.tokens.push(Token::LetterU);
                self.assembler.buffer('u');
                Ok(())
            }
            _ => Err(CompleterError::InvalidEscape {
                character: ch,
                line: self.line,
                column: self.column,
            }),
        }
    }

    /// One character of `\uXXXX` machinery. Padding spells the whole pending
    /// escape, so its length is the state: `\u` + up to four hex digits, then
    /// (for a high surrogate) `\u` again and four more. A completed escape
    /// flushes verbatim; a high surrogate waits for its low half because the
    /// extractor's parser rejects lone surrogates.
    fn unicode_escape_char(&mut self, ch: char) -> Result<(), CompleterError> {
        match self.assembler.padding().len() {
            2..=5 => {
                if !ch.is_ascii_hexdigit() {
                    return Err(self.invalid_unicode(ch));
                }
                self.assembler.buffer(ch);
                if self.assembler.padding().len() == 6 {
                    let code = hex_value(&self.assembler.padding()[2..6]);
                    if (0xDC00..=0xDFFF).contains(&code) {
                        return Err(self.unpaired_surrogate());
                    }
                    if !(0xD800..=0xDBFF).contains(&code) {
                        self.assembler.flush_padding();
                        self.tokens.pop();
                    }
                }
                Ok(())
            }
            6 => {
                if ch == '\\' {
                    self.assembler.buffer(ch);
                    Ok(())
                } else {
                    Err(self.unpaired_surrogate())
                }
            }
            7 => {
                if ch == 'u' {
                    self.assembler.buffer(ch);
                    Ok(())
                } else {
                    Err(self.unpaired_surrogate())
                }
            }
            _ => {
                if !ch.is_ascii_hexdigit() {
                    return Err(self.invalid_unicode(ch));
                }
                self.assembler.buffer(ch);
                if self.assembler.padding().len() == 12 {
                    let low = hex_value(&self.assembler.padding()[8..12]);
                    if (0xDC00..=0xDFFF).contains(&low) {
                        self.assembler.flush_padding();
                        self.tokens.pop();
                        Ok(())
                    } else {
                        Err(self.unpaired_surrogate())
                    }
                } else {
                    Ok(())
                }
            }
        }
    }

    // --------------------------------------------------------------------
    // Shared context resolution
    // --------------------------------------------------------------------

    /// Commit to a value beginning here: pop the `null` placeholder in an
    /// object slot, resolve a pending array separator, or accept a fresh
    /// root. Anything else cannot start a value.
    fn begin_value(&mut self, ch: char) -> Result<(), CompleterError> {
        if predicates::at_object_value_start(&self.tokens, &self.mirror) {
            self.pop_null_placeholder();
            Ok(())
        } else if predicates::at_array_value_start(&self.tokens, &self.mirror) {
            if matches!(self.tokens.last(), Some(Token::Comma)) {
                self.tokens.pop();
            }
            Ok(())
        } else if predicates::at_root_value_start(&self.tokens, &self.mirror) {
            Ok(())
        } else {
            Err(self.unexpected(ch))
        }
    }

    fn pop_null_placeholder(&mut self) {
        self.mirror.truncate(self.mirror.len() - 4);
    }

    fn unexpected(&self, ch: char) -> CompleterError {
        CompleterError::UnexpectedCharacter {
            character: ch,
            line: self.line,
            column: self.column,
        }
    }

    fn invalid_unicode(&self, ch: char) -> CompleterError {
        CompleterError::InvalidUnicodeEscape {
            character: ch,
            line: self.line,
            column: self.column,
        }
    }

    fn unpaired_surrogate(&self) -> CompleterError {
        CompleterError::UnpairedSurrogate {
            line: self.line,
            column: self.column,
        }
    }
}

/// Value of up to eight hex digits already validated by the caller.
fn hex_value(digits: &str) -> u32 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(16))
        .fold(0, |acc, d| (acc << 4) | d)
}
