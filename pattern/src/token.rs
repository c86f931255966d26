use once_cell::sync::Lazy;
use regex::Regex;

/// Lexical categories of the pattern grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Neg,
    Sup,
    Inf,
    Str,
    Num,
    Var,
    Idf,
    Pun,
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

/// One compiled regex alternation, in priority order, mirroring the
/// `TOKEN_PATTERNS` table of the pattern grammar this is ported from.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?P<NEG>-)"#,
        r#"|(?P<SUP>\#sup)"#,
        r#"|(?P<INF>\#inf)"#,
        r#"|(?P<STR>"([^\\"\n]|\\"|\\\\|\\n)*")"#,
        r#"|(?P<NUM>\d+)"#,
        r#"|(?P<VAR>_|[A-Z][a-zA-Z_']*)"#,
        r#"|(?P<IDF>[_']*[a-z][A-Za-z0-9_']*)"#,
        r#"|(?P<PUN>[(),])"#,
    ))
    .expect("static pattern-token regex is well-formed")
});

pub(crate) struct Tokenizer {
    tokens: Vec<Token>,
    pos: usize,
}

impl Tokenizer {
    pub fn new(expression: &str) -> Result<Self, String> {
        let mut tokens = Vec::new();
        let mut cursor = 0usize;
        let bytes = expression.as_bytes();
        while cursor < bytes.len() {
            if bytes[cursor] == b' ' || bytes[cursor] == b'\t' {
                cursor += 1;
                continue;
            }
            match TOKEN_REGEX.find_at(expression, cursor) {
                Some(m) if m.start() == cursor => {
                    let caps = TOKEN_REGEX.captures(&expression[cursor..m.end()]).unwrap();
                    let kind = [
                        (TokenKind::Neg, "NEG"),
                        (TokenKind::Sup, "SUP"),
                        (TokenKind::Inf, "INF"),
                        (TokenKind::Str, "STR"),
                        (TokenKind::Num, "NUM"),
                        (TokenKind::Var, "VAR"),
                        (TokenKind::Idf, "IDF"),
                        (TokenKind::Pun, "PUN"),
                    ]
                    .into_iter()
                    .find(|(_, name)| caps.name(name).is_some())
                    .map(|(k, _)| k)
                    .ok_or_else(|| format!("unrecognized token at offset {cursor}"))?;
                    tokens.push(Token {
                        kind,
                        text: m.as_str().to_string(),
                        offset: cursor,
                    });
                    cursor = m.end();
                }
                _ => return Err(format!("unrecognized token at offset {cursor}")),
            }
        }
        tokens.push(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            offset: expression.len(),
        });
        Ok(Tokenizer { tokens, pos: 0 })
    }

    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn consume(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    pub fn match_kind(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek().kind == kind {
            Some(self.consume())
        } else {
            None
        }
    }

    pub fn match_pun(&mut self, text: &str) -> Option<Token> {
        if self.peek().kind == TokenKind::Pun && self.peek().text == text {
            Some(self.consume())
        } else {
            None
        }
    }

    pub fn peek_pun(&self, text: &str) -> bool {
        self.peek().kind == TokenKind::Pun && self.peek().text == text
    }

    pub fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, String> {
        self.match_kind(kind)
            .ok_or_else(|| format!("unexpected token {:?} at offset {}", self.peek().kind, self.peek().offset))
    }

    pub fn expect_pun(&mut self, text: &str) -> Result<Token, String> {
        self.match_pun(text)
            .ok_or_else(|| format!("expected '{text}' at offset {}", self.peek().offset))
    }
}

/// Unquotes a string literal the way clingo would (handles `\n`, `\\`, `\"`).
pub(crate) fn unquote(quoted: &str) -> Result<String, String> {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(other) => return Err(format!("invalid escape sequence: \\{other}")),
                None => return Err("dangling escape at end of string".to_string()),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_function_call() {
        let t = Tokenizer::new("foo(X, 1)").unwrap();
        let kinds: Vec<TokenKind> = {
            let mut t = t;
            let mut kinds = Vec::new();
            loop {
                let tok = t.consume();
                let done = tok.kind == TokenKind::Eof;
                kinds.push(tok.kind);
                if done {
                    break;
                }
            }
            kinds
        };
        assert_eq!(
            kinds,
            vec![
                TokenKind::Idf,
                TokenKind::Pun,
                TokenKind::Var,
                TokenKind::Pun,
                TokenKind::Num,
                TokenKind::Pun,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn distinguishes_negation_from_identifier() {
        let mut t = Tokenizer::new("-foo").unwrap();
        assert_eq!(t.consume().kind, TokenKind::Neg);
        assert_eq!(t.consume().kind, TokenKind::Idf);
    }

    #[test]
    fn unrecognized_character_is_an_error() {
        assert!(Tokenizer::new("foo $ bar").is_err());
    }

    #[test]
    fn unquote_handles_escapes() {
        assert_eq!(unquote(r#""a\nb\\c\"d""#).unwrap(), "a\nb\\c\"d");
    }

    #[test]
    fn unquote_rejects_unknown_escape() {
        assert!(unquote(r#""a\qb""#).is_err());
    }
}
