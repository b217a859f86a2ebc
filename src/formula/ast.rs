//! Formula grammar and recursive-descent parser.
//!
//! Accepts the infix grammar `& | ~ ( )` over feature-id identifiers, with
//! `~` binding tighter than `&`, which in turn binds tighter than `|`, and
//! all binary operators left-associative.

use crate::error::FormulaError;

/// An unparsed-into-CNF formula expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A reference to a feature id.
    Var(String),
    /// Logical negation.
    Not(Box<Expr>),
    /// Logical conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Logical disjunction.
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Parses a formula from its textual representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use needs_engine::formula::ast::Expr;
    ///
    /// let expr = Expr::parse("energy & ~small").unwrap();
    /// assert!(matches!(expr, Expr::And(_, _)));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::Parse`] if the text is not a well-formed
    /// formula.
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            source_len: source.len(),
        };
        let expr = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return Err(FormulaError::Parse {
                position: parser.tokens.get(parser.pos).map_or(source.len(), |t| t.pos),
                reason: "trailing input after formula".to_string(),
            });
        }
        Ok(expr)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Ident(String),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

fn tokenize(source: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            ' ' | '\t' | '\n' | '\r' => i += 1,
            '&' => {
                tokens.push(Token {
                    kind: TokenKind::And,
                    pos: i,
                });
                i += 1;
            }
            '|' => {
                tokens.push(Token {
                    kind: TokenKind::Or,
                    pos: i,
                });
                i += 1;
            }
            '~' => {
                tokens.push(Token {
                    kind: TokenKind::Not,
                    pos: i,
                });
                i += 1;
            }
            '(' => {
                tokens.push(Token {
                    kind: TokenKind::LParen,
                    pos: i,
                });
                i += 1;
            }
            ')' => {
                tokens.push(Token {
                    kind: TokenKind::RParen,
                    pos: i,
                });
                i += 1;
            }
            _ if is_ident_start(c) => {
                let start = i;
                while i < bytes.len() && is_ident_continue(bytes[i] as char) {
                    i += 1;
                }
                let ident = source[start..i].to_string();
                tokens.push(Token {
                    kind: TokenKind::Ident(ident),
                    pos: start,
                });
            }
            other => {
                return Err(FormulaError::Parse {
                    position: i,
                    reason: format!("unexpected character '{other}'"),
                });
            }
        }
    }
    Ok(tokens)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ':' || c == '.'
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c == '-'
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source_len: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn current_pos(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.source_len, |t| t.pos)
    }

    // Lowest precedence: left-associative `|`.
    fn parse_or(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Some(TokenKind::Or)) {
            self.pos += 1;
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // Middle precedence: left-associative `&`.
    fn parse_and(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_unary()?;
        while matches!(self.peek(), Some(TokenKind::And)) {
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // Highest precedence: prefix `~`.
    fn parse_unary(&mut self) -> Result<Expr, FormulaError> {
        if matches!(self.peek(), Some(TokenKind::Not)) {
            self.pos += 1;
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, FormulaError> {
        match self.peek().cloned() {
            Some(TokenKind::Ident(name)) => {
                self.pos += 1;
                Ok(Expr::Var(name))
            }
            Some(TokenKind::LParen) => {
                self.pos += 1;
                let inner = self.parse_or()?;
                match self.peek() {
                    Some(TokenKind::RParen) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err(FormulaError::Parse {
                        position: self.current_pos(),
                        reason: "expected closing parenthesis".to_string(),
                    }),
                }
            }
            Some(other) => Err(FormulaError::Parse {
                position: self.current_pos(),
                reason: format!("unexpected token {other:?}"),
            }),
            None => Err(FormulaError::Parse {
                position: self.source_len,
                reason: "unexpected end of input".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_var() {
        let expr = Expr::parse("energy").unwrap();
        assert_eq!(expr, Expr::Var("energy".to_string()));
    }

    #[test]
    fn test_parse_negation() {
        let expr = Expr::parse("~energy").unwrap();
        assert_eq!(expr, Expr::Not(Box::new(Expr::Var("energy".to_string()))));
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        let expr = Expr::parse("~a & b").unwrap();
        assert_eq!(
            expr,
            Expr::And(
                Box::new(Expr::Not(Box::new(Expr::Var("a".to_string())))),
                Box::new(Expr::Var("b".to_string())),
            )
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = Expr::parse("a | b & c").unwrap();
        assert_eq!(
            expr,
            Expr::Or(
                Box::new(Expr::Var("a".to_string())),
                Box::new(Expr::And(
                    Box::new(Expr::Var("b".to_string())),
                    Box::new(Expr::Var("c".to_string())),
                )),
            )
        );
    }

    #[test]
    fn test_parens_override_precedence() {
        let expr = Expr::parse("(a | b) & c").unwrap();
        assert_eq!(
            expr,
            Expr::And(
                Box::new(Expr::Or(
                    Box::new(Expr::Var("a".to_string())),
                    Box::new(Expr::Var("b".to_string())),
                )),
                Box::new(Expr::Var("c".to_string())),
            )
        );
    }

    #[test]
    fn test_left_associative_and() {
        let expr = Expr::parse("a & b & c").unwrap();
        assert_eq!(
            expr,
            Expr::And(
                Box::new(Expr::And(
                    Box::new(Expr::Var("a".to_string())),
                    Box::new(Expr::Var("b".to_string())),
                )),
                Box::new(Expr::Var("c".to_string())),
            )
        );
    }

    #[test]
    fn test_feature_ids_with_colons_and_underscores() {
        let expr = Expr::parse("feature:coat_length.long").unwrap();
        assert_eq!(expr, Expr::Var("feature:coat_length.long".to_string()));
    }

    #[test]
    fn test_parse_error_unclosed_paren() {
        let result = Expr::parse("(a & b");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_error_unexpected_character() {
        let result = Expr::parse("a + b");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_error_trailing_tokens() {
        let result = Expr::parse("a b");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_error_empty_input() {
        let result = Expr::parse("");
        assert!(result.is_err());
    }

    #[test]
    fn test_double_negation_parses() {
        let expr = Expr::parse("~~a").unwrap();
        assert_eq!(
            expr,
            Expr::Not(Box::new(Expr::Not(Box::new(Expr::Var("a".to_string())))))
        );
    }
}
