//! Abstract syntax tree built by the parser.
//!
//! Every node keeps the token it was parsed from; the token's literal
//! agrees with the node's rendered form (`"let"` for a let statement, the
//! digit string for an integer literal, and so on). Nodes own their
//! children exclusively, except function bodies, which are `Rc`-shared
//! with the closures evaluation creates from them.

use std::fmt;
use std::rc::Rc;

use crate::token::Token;

/// Root node: an ordered sequence of top-level statements.
#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Let {
        token: Token,
        name: Ident,
        value: Expr,
    },
    /// `return;` is accepted and carries no expression.
    Return {
        token: Token,
        value: Option<Expr>,
    },
    Expr {
        token: Token,
        expression: Expr,
    },
}

/// `{ … }`, the body of functions and `if` arms.
#[derive(Debug, PartialEq, Clone)]
pub struct Block {
    pub token: Token,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Ident {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Ident(Ident),
    Int {
        token: Token,
        value: i64,
    },
    Bool {
        token: Token,
        value: bool,
    },
    Prefix {
        token: Token,
        op: String,
        right: Box<Expr>,
    },
    Infix {
        token: Token,
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    If {
        token: Token,
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Function {
        token: Token,
        parameters: Vec<Ident>,
        body: Rc<Block>,
    },
    Call {
        token: Token,
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value, .. } => write!(f, "let {} = {};", name, value),
            Stmt::Return {
                value: Some(value), ..
            } => write!(f, "return {};", value),
            Stmt::Return { value: None, .. } => write!(f, "return;"),
            Stmt::Expr { expression, .. } => write!(f, "{}", expression),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(ident) => write!(f, "{}", ident),
            Expr::Int { token, .. } | Expr::Bool { token, .. } => write!(f, "{}", token.literal),
            Expr::Prefix { op, right, .. } => write!(f, "({}{})", op, right),
            Expr::Infix {
                left, op, right, ..
            } => write!(f, "({} {} {})", left, op, right),
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, "else{}", alt)?;
                }
                Ok(())
            }
            Expr::Function {
                token,
                parameters,
                body,
            } => {
                let params = parameters
                    .iter()
                    .map(Ident::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}({}) {}", token.literal, params, body)
            }
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                let args = arguments
                    .iter()
                    .map(Expr::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}({})", function, args)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn ident(name: &str) -> Ident {
        Ident {
            token: Token::new(TokenKind::Ident, name),
            value: name.to_string(),
        }
    }

    #[test]
    fn render_let_statement() {
        let program = Program {
            statements: vec![Stmt::Let {
                token: Token::new(TokenKind::Let, "let"),
                name: ident("myVar"),
                value: Expr::Ident(ident("anotherVar")),
            }],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn render_return_without_value() {
        let stmt = Stmt::Return {
            token: Token::new(TokenKind::Return, "return"),
            value: None,
        };
        assert_eq!(stmt.to_string(), "return;");
    }

    #[test]
    fn render_function_literal() {
        let body = Block {
            token: Token::new(TokenKind::LBrace, "{"),
            statements: vec![Stmt::Expr {
                token: Token::new(TokenKind::Ident, "x"),
                expression: Expr::Ident(ident("x")),
            }],
        };
        let f = Expr::Function {
            token: Token::new(TokenKind::Function, "fn"),
            parameters: vec![ident("x"), ident("y")],
            body: Rc::new(body),
        };
        assert_eq!(f.to_string(), "fn(x, y) x");
    }
}
