use crate::matcher::{Matcher, Value};
use crate::token::{unquote, TokenKind, Tokenizer};

/// A recursive-descent parser for the pattern grammar: terms built from
/// identifiers, integer literals, quoted strings, `#sup`/`#inf`, tuples
/// `(…,…)`, unary minus, and variables.
pub(crate) struct Parser {
    tokens: Tokenizer,
}

impl Parser {
    pub fn new(expression: &str) -> Result<Self, String> {
        Ok(Parser {
            tokens: Tokenizer::new(expression)?,
        })
    }

    pub fn parse(mut self) -> Result<Matcher, String> {
        let matcher = self.parse_matcher()?;
        self.tokens.expect_kind(TokenKind::Eof)?;
        Ok(matcher)
    }

    fn parse_matcher(&mut self) -> Result<Matcher, String> {
        if self.tokens.match_kind(TokenKind::Sup).is_some() {
            return Ok(Matcher::Value(Value::Supremum));
        }
        if self.tokens.match_kind(TokenKind::Inf).is_some() {
            return Ok(Matcher::Value(Value::Infimum));
        }
        if let Some(tok) = self.tokens.match_kind(TokenKind::Num) {
            let n: i32 = tok
                .text
                .parse()
                .map_err(|_| format!("invalid integer literal '{}'", tok.text))?;
            return Ok(Matcher::Value(Value::Number(n)));
        }
        if let Some(tok) = self.tokens.match_kind(TokenKind::Str) {
            return Ok(Matcher::Value(Value::Str(unquote(&tok.text)?)));
        }
        if let Some(tok) = self.tokens.match_kind(TokenKind::Var) {
            return Ok(Matcher::Variable(tok.text));
        }
        if self.tokens.peek_pun("(") {
            return self.parse_function(String::new(), true);
        }
        if self.tokens.match_kind(TokenKind::Neg).is_some() {
            if let Some(tok) = self.tokens.match_kind(TokenKind::Idf) {
                return self.parse_function(tok.text, false);
            }
            let tok = self.tokens.expect_kind(TokenKind::Num)?;
            let n: i32 = tok
                .text
                .parse()
                .map_err(|_| format!("invalid integer literal '{}'", tok.text))?;
            return Ok(Matcher::Value(Value::Number(-n)));
        }
        let tok = self.tokens.expect_kind(TokenKind::Idf)?;
        self.parse_function(tok.text, true)
    }

    fn parse_function(&mut self, name: String, positive: bool) -> Result<Matcher, String> {
        if self.tokens.match_pun("(").is_none() {
            return Ok(Matcher::Function {
                name,
                arguments: Vec::new(),
                positive,
            });
        }
        let mut args = Vec::new();
        // A tuple may carry a bare trailing comma, e.g. `(,)` or `(a,)`.
        let mut trailing = !name.is_empty();

        if !trailing && self.tokens.match_pun(",").is_some() {
            self.tokens.expect_pun(")")?;
            trailing = true;
        } else {
            while self.tokens.match_pun(")").is_none() {
                if !args.is_empty() {
                    self.tokens.expect_pun(",")?;
                    if !trailing && self.tokens.match_pun(")").is_some() {
                        trailing = true;
                        break;
                    }
                }
                args.push(self.parse_matcher()?);
            }
        }

        // `f(X)` (no trailing comma, exactly one argument) is just `X`
        // parenthesized, not a one-element tuple/function wrapper.
        if !trailing && args.len() == 1 {
            return Ok(args.into_iter().next().unwrap());
        }
        Ok(Matcher::Function {
            name,
            arguments: args,
            positive,
        })
    }
}
