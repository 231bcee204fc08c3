//! Splitting TOML text into logical statements.
//!
//! A logical statement is one header or one `key = value` pair. Most
//! statements occupy a single physical line, but a value may open a
//! multi-line string (`"""`, `'''`) or a bracketed array / inline table that
//! continues over several lines. The [`Scanner`] glues those lines together
//! (joined with `\n`), drops comments that sit outside strings, and yields
//! each statement with the line it started on.
//!
//! [`LexState`] is the small quote/nesting tracker the scanner runs over each
//! line. The value parser reuses it to split arrays and inline tables on
//! top-level commas.

use crate::error::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Quote {
    Basic,
    Literal,
    MultiBasic,
    MultiLiteral,
}

impl Quote {
    pub(crate) const fn is_multiline(self) -> bool {
        matches!(self, Quote::MultiBasic | Quote::MultiLiteral)
    }
}

/// Classification of the next chunk of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lexeme {
    /// A character outside any string.
    Code(char),
    /// An opening or closing quote run.
    Delimiter,
    /// String content.
    Quoted,
    /// A `#` outside any string; the rest of the line is a comment.
    Comment,
}

/// Tracks whether the cursor sits inside a string and how deeply brackets
/// and braces are nested outside strings.
#[derive(Clone, Debug, Default)]
pub(crate) struct LexState {
    quote: Option<Quote>,
    escaped: bool,
    depth: i32,
}

impl LexState {
    pub(crate) fn quote(&self) -> Option<Quote> {
        self.quote
    }

    pub(crate) fn depth(&self) -> i32 {
        self.depth
    }

    /// Classifies the start of `rest`, returning the lexeme and its length in
    /// bytes, or `None` at the end of input.
    pub(crate) fn next(&mut self, rest: &str) -> Option<(Lexeme, usize)> {
        let c = rest.chars().next()?;
        let len = c.len_utf8();

        let Some(quote) = self.quote else {
            let lexeme = match c {
                '#' => Lexeme::Comment,
                '"' if rest.starts_with(r#"""""#) => {
                    self.quote = Some(Quote::MultiBasic);
                    return Some((Lexeme::Delimiter, 3));
                }
                '\'' if rest.starts_with("'''") => {
                    self.quote = Some(Quote::MultiLiteral);
                    return Some((Lexeme::Delimiter, 3));
                }
                '"' => {
                    self.quote = Some(Quote::Basic);
                    Lexeme::Delimiter
                }
                '\'' => {
                    self.quote = Some(Quote::Literal);
                    Lexeme::Delimiter
                }
                '[' | '{' => {
                    self.depth += 1;
                    Lexeme::Code(c)
                }
                ']' | '}' => {
                    self.depth -= 1;
                    Lexeme::Code(c)
                }
                _ => Lexeme::Code(c),
            };
            return Some((lexeme, len));
        };

        if self.escaped {
            self.escaped = false;
            return Some((Lexeme::Quoted, len));
        }

        match (quote, c) {
            (Quote::Basic | Quote::MultiBasic, '\\') => {
                self.escaped = true;
                Some((Lexeme::Quoted, len))
            }
            (Quote::Basic, '"') | (Quote::Literal, '\'') => {
                self.quote = None;
                Some((Lexeme::Delimiter, 1))
            }
            (Quote::MultiBasic, '"') | (Quote::MultiLiteral, '\'') => {
                // Up to two quotes directly before the closing triple belong
                // to the content.
                let run = rest.bytes().take_while(|&b| b == c as u8).count();
                if run < 3 {
                    return Some((Lexeme::Quoted, run));
                }
                self.quote = None;
                Some((Lexeme::Delimiter, run.min(5)))
            }
            _ => Some((Lexeme::Quoted, len)),
        }
    }

    /// Called at each physical line break. Single-line strings cannot span
    /// lines, so an unterminated one is abandoned here and reported by the
    /// value parser.
    pub(crate) fn end_line(&mut self) {
        self.escaped = false;
        if matches!(self.quote, Some(Quote::Basic | Quote::Literal)) {
            self.quote = None;
        }
    }
}

/// Returns the part of `line` before any comment, with `state` advanced over
/// it.
pub(crate) fn strip_comment<'a>(line: &'a str, state: &mut LexState) -> &'a str {
    let mut pos = 0;
    while let Some((lexeme, len)) = state.next(&line[pos..]) {
        if lexeme == Lexeme::Comment {
            return &line[..pos];
        }
        pos += len;
    }
    line
}

/// One logical statement and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement {
    pub line: usize,
    pub text: String,
}

struct Pending {
    line: usize,
    text: String,
}

/// Iterator over the logical statements of a TOML document.
pub(crate) struct Scanner<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    state: LexState,
    pending: Option<Pending>,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Scanner {
            lines: input.lines().enumerate(),
            state: LexState::default(),
            pending: None,
            done: false,
        }
    }

    fn unterminated(&self, start: usize) -> ParseError {
        match self.state.quote() {
            Some(quote) if quote.is_multiline() => {
                ParseError::UnterminatedMultilineString { line: start }
            }
            _ => ParseError::UnterminatedMultilineArray { line: start },
        }
    }

    fn block_is_open(&self) -> bool {
        self.state.quote().map_or(false, Quote::is_multiline) || self.state.depth() > 0
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Statement, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some((index, raw)) = self.lines.next() else {
                self.done = true;
                return self.pending.take().map(|p| Err(self.unterminated(p.line)));
            };
            let line_no = index + 1;

            if let Some(mut pending) = self.pending.take() {
                pending.text.push('\n');
                pending.text.push_str(strip_comment(raw, &mut self.state));
                self.state.end_line();
                if self.block_is_open() {
                    self.pending = Some(pending);
                    continue;
                }
                self.state = LexState::default();
                return Some(Ok(Statement {
                    line: pending.line,
                    text: pending.text.trim().to_string(),
                }));
            }

            let kept = strip_comment(raw, &mut self.state);
            self.state.end_line();
            let trimmed = kept.trim();

            // Headers never continue onto the next line; a missing bracket
            // is reported by the header parser instead.
            if trimmed.starts_with('[') || !self.block_is_open() {
                self.state = LexState::default();
                if trimmed.is_empty() {
                    continue;
                }
                return Some(Ok(Statement {
                    line: line_no,
                    text: trimmed.to_string(),
                }));
            }

            log::trace!("line {}: value continues on following lines", line_no);
            self.pending = Some(Pending {
                line: line_no,
                text: kept.trim_start().to_string(),
            });
        }
    }
}
