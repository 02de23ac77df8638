//! Splits a template body into literal text and `{{...}}` markers

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One lexical unit of a template body. Every marker keeps its raw text so it can
/// be emitted verbatim when it cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    /// `{{key}}`
    Placeholder { key: &'a str, raw: &'a str },
    /// `{{#key}}`
    SectionOpen { key: &'a str, raw: &'a str },
    /// `{{^key}}`
    InvertedOpen { key: &'a str, raw: &'a str },
    /// `{{/key}}`
    SectionClose { key: &'a str, raw: &'a str },
}

impl<'a> Token<'a> {
    /// Source text the token was read from
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Literal(text) => text,
            Token::Placeholder { raw, .. }
            | Token::SectionOpen { raw, .. }
            | Token::InvertedOpen { raw, .. }
            | Token::SectionClose { raw, .. } => raw,
        }
    }
}

/// Tokenize `body`. Total: anything that is not a well-formed marker is literal text.
///
/// Keys are taken exactly as written between the braces (spaces included) and may not
/// be empty or contain a brace.
pub fn tokenize(body: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = body[cursor..].find(OPEN) {
        let start = cursor + offset;
        let inner_start = start + OPEN.len();

        let Some(close_offset) = body[inner_start..].find(CLOSE) else {
            break;
        };
        let inner_end = inner_start + close_offset;
        let end = inner_end + CLOSE.len();

        match marker(&body[inner_start..inner_end], &body[start..end]) {
            Some(token) => {
                if literal_start < start {
                    tokens.push(Token::Literal(&body[literal_start..start]));
                }
                tokens.push(token);
                literal_start = end;
                cursor = end;
            }
            // Not a marker: the first brace is text, retry from the next one
            None => cursor = start + 1,
        }
    }

    if literal_start < body.len() {
        tokens.push(Token::Literal(&body[literal_start..]));
    }

    tokens
}

fn marker<'a>(inner: &'a str, raw: &'a str) -> Option<Token<'a>> {
    let (sigil, key) = match inner.chars().next()? {
        c @ ('#' | '^' | '/') => (Some(c), &inner[1..]),
        _ => (None, inner),
    };

    if key.is_empty() || key.contains(['{', '}']) {
        return None;
    }

    Some(match sigil {
        Some('#') => Token::SectionOpen { key, raw },
        Some('^') => Token::InvertedOpen { key, raw },
        Some(_) => Token::SectionClose { key, raw },
        None => Token::Placeholder { key, raw },
    })
}
