//! Runtime values produced by evaluation.

use std::fmt;
use std::rc::Rc;

use crate::ast::{Block, Ident};
use crate::env::Environment;

/// A first-class Monkey value.
///
/// `Return` and `Error` are value-level control markers: they bubble up
/// through nested evaluation until a function boundary (or the program
/// root) unwraps the former, while the latter propagates all the way out.
#[derive(Debug)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    Return(Rc<Object>),
    Error(String),
    Function(Function),
}

/// A closure: the parameter list and body of a function literal paired
/// with the environment the literal was evaluated in. The body is the
/// parser's own AST subtree, shared by reference.
pub struct Function {
    pub parameters: Vec<Ident>,
    pub body: Rc<Block>,
    pub env: Rc<Environment>,
}

// The captured environment may hold the closure itself, so deriving Debug
// would recurse forever. Print the shape only.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl Object {
    /// Diagnostic name of the value's type, as it appears in error
    /// messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::Return(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Function(_) => "FUNCTION",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl fmt::Display for Object {
    /// Canonical `inspect` rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Return(inner) => write!(f, "{}", inner),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Function(func) => {
                let params = func
                    .parameters
                    .iter()
                    .map(Ident::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({}) {{\n{}\n}}", params, func.body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    #[test]
    fn inspect_scalars() {
        assert_eq!(Object::Integer(5).to_string(), "5");
        assert_eq!(Object::Integer(-42).to_string(), "-42");
        assert_eq!(Object::Boolean(true).to_string(), "true");
        assert_eq!(Object::Boolean(false).to_string(), "false");
        assert_eq!(Object::Null.to_string(), "null");
    }

    #[test]
    fn inspect_wrappers() {
        let wrapped = Object::Return(Rc::new(Object::Integer(7)));
        assert_eq!(wrapped.to_string(), "7");
        let err = Object::Error("identifier not found: foo".to_string());
        assert_eq!(err.to_string(), "ERROR: identifier not found: foo");
    }

    #[test]
    fn inspect_function() {
        let mut parser = Parser::new(Lexer::new("fn(x, y) { x + y; }"));
        let program = parser.parse_program();
        assert!(parser.errors().is_empty());
        let (parameters, body) = match program.statements.into_iter().next() {
            Some(crate::ast::Stmt::Expr {
                expression: crate::ast::Expr::Function {
                    parameters, body, ..
                },
                ..
            }) => (parameters, body),
            stmt => panic!("unexpected statement: {:?}", stmt),
        };
        let func = Object::Function(Function {
            parameters,
            body,
            env: Environment::new(),
        });
        assert_eq!(func.to_string(), "fn(x, y) {\n(x + y)\n}");
    }

    #[test]
    fn type_names() {
        assert_eq!(Object::Integer(1).type_name(), "INTEGER");
        assert_eq!(Object::Boolean(true).type_name(), "BOOLEAN");
        assert_eq!(Object::Null.type_name(), "NULL");
        assert_eq!(
            Object::Return(Rc::new(Object::Null)).type_name(),
            "RETURN_VALUE"
        );
        assert_eq!(Object::Error(String::new()).type_name(), "ERROR");
    }
}
