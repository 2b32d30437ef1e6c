//! N-Quads reader
//!
//! Each line holds one statement: subject, predicate, object, an optional
//! graph label and a terminating dot. Comments and blank lines are skipped.

use crate::graph::GraphId;
use crate::store::Quad;
use crate::StoreError;
use logos::Logos;
use riskgraph_core::model::{Iri, Literal, Term, Triple};

/// N-Quads tokens
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token<'a> {
    #[regex(r#"<([^\x00-\x20<>"{}|^`\\]|\\u[0-9A-Fa-f]{4}|\\U[0-9A-Fa-f]{8})*>"#)]
    IriRef(&'a str),

    #[regex(r"_:[A-Za-z0-9_\-]+(\.[A-Za-z0-9_\-]+)*")]
    BlankNode(&'a str),

    #[regex(r#""([^"\\\n\r]|\\[tbnrf"'\\]|\\u[0-9A-Fa-f]{4}|\\U[0-9A-Fa-f]{8})*""#)]
    StringLiteral(&'a str),

    #[regex(r"@[a-zA-Z]+(-[a-zA-Z0-9]+)*")]
    LangTag(&'a str),

    #[token("^^")]
    DatatypeMarker,

    #[token(".")]
    Dot,
}

/// Parse one line; `Ok(None)` for blank and comment-only lines
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<Quad>, StoreError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(line);
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(syntax_error(
                    line_number,
                    format!("unexpected input {:?} at column {}", lexer.slice(), lexer.span().start + 1),
                ))
            }
        }
    }
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut cursor = tokens.into_iter().peekable();

    let subject = match cursor.next() {
        Some(Token::IriRef(raw)) => iri_ref(raw, line_number)?,
        Some(Token::BlankNode(raw)) => Iri::new(raw),
        other => return Err(unexpected(line_number, "subject", other)),
    };

    let predicate = match cursor.next() {
        Some(Token::IriRef(raw)) => iri_ref(raw, line_number)?,
        other => return Err(unexpected(line_number, "predicate", other)),
    };

    let object = match cursor.next() {
        Some(Token::IriRef(raw)) => Term::Iri(iri_ref(raw, line_number)?),
        Some(Token::BlankNode(raw)) => Term::Iri(Iri::new(raw)),
        Some(Token::StringLiteral(raw)) => {
            let lexical = unescape(&raw[1..raw.len() - 1], line_number)?;
            match cursor.peek() {
                Some(Token::LangTag(tag)) => {
                    let language = tag[1..].to_string();
                    cursor.next();
                    Term::Literal(Literal {
                        lexical,
                        datatype: None,
                        language: Some(language),
                    })
                }
                Some(Token::DatatypeMarker) => {
                    cursor.next();
                    match cursor.next() {
                        Some(Token::IriRef(raw)) => Term::Literal(Literal::typed(lexical, iri_ref(raw, line_number)?)),
                        other => return Err(unexpected(line_number, "datatype IRI", other)),
                    }
                }
                _ => Term::Literal(Literal::plain(lexical)),
            }
        }
        other => return Err(unexpected(line_number, "object", other)),
    };

    let graph_id = match cursor.peek() {
        Some(Token::IriRef(raw)) => {
            let graph = GraphId::Named(iri_ref(raw, line_number)?);
            cursor.next();
            graph
        }
        Some(Token::BlankNode(raw)) => {
            let graph = GraphId::Named(Iri::new(*raw));
            cursor.next();
            graph
        }
        _ => GraphId::Default,
    };

    match cursor.next() {
        Some(Token::Dot) => {}
        other => return Err(unexpected(line_number, "'.'", other)),
    }
    if let Some(extra) = cursor.next() {
        return Err(unexpected(line_number, "end of line", Some(extra)));
    }

    Ok(Some(Quad {
        triple: Triple::new(subject, predicate, object),
        graph_id,
    }))
}

fn iri_ref(raw: &str, line_number: usize) -> Result<Iri, StoreError> {
    let inner = &raw[1..raw.len() - 1];
    if inner.contains('\\') {
        Ok(Iri::from(unescape(inner, line_number)?))
    } else {
        Ok(Iri::new(inner))
    }
}

/// Resolve string and numeric escapes
fn unescape(text: &str, line_number: usize) -> Result<String, StoreError> {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => output.push('\t'),
            Some('b') => output.push('\u{8}'),
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('f') => output.push('\u{c}'),
            Some('"') => output.push('"'),
            Some('\'') => output.push('\''),
            Some('\\') => output.push('\\'),
            Some('u') => output.push(code_point(&mut chars, 4, line_number)?),
            Some('U') => output.push(code_point(&mut chars, 8, line_number)?),
            other => {
                return Err(syntax_error(line_number, format!("invalid escape sequence \\{}", other.map(String::from).unwrap_or_default())))
            }
        }
    }
    Ok(output)
}

fn code_point(chars: &mut std::str::Chars<'_>, digits: usize, line_number: usize) -> Result<char, StoreError> {
    let hex: String = chars.by_ref().take(digits).collect();
    u32::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == digits)
        .and_then(char::from_u32)
        .ok_or_else(|| syntax_error(line_number, format!("invalid code point escape {:?}", hex)))
}

fn syntax_error(line: usize, message: String) -> StoreError {
    StoreError::Parse { line, message }
}

fn unexpected(line_number: usize, expected: &str, found: Option<Token<'_>>) -> StoreError {
    let found = match found {
        Some(token) => format!("{:?}", token),
        None => "end of line".to_string(),
    };
    syntax_error(line_number, format!("expected {}, found {}", expected, found))
}
