//! API to control the interpreter.

use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::env::Environment;
use crate::eval::Evaluator;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser::Parser;

/// Tree-walk interpreter session.
///
/// Bindings and the interned singletons persist across calls to
/// [`Interpreter::eval`], so a function defined in one call can be used in
/// later ones:
///
/// ```
/// use rmonkey::interpreter::Interpreter;
///
/// let mut interp = Interpreter::new();
/// interp
///     .eval("let max = fn(x, y) { if (x > y) { x } else { y } };")
///     .expect("interpreter error");
///
/// let out = interp.eval("max(10, 20);").expect("interpreter error");
/// assert_eq!(out.expect("no result").to_string(), "20");
/// ```
#[derive(Debug)]
pub struct Interpreter {
    evaluator: Evaluator,
    env: Rc<Environment>,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            evaluator: Evaluator::new(),
            env: Environment::new(),
        }
    }

    /// Parse and evaluate `source` against the session environment.
    ///
    /// Only parse failures surface as `Err`; runtime failures are ordinary
    /// [`Object::Error`] values inside `Ok`. `Ok(None)` means the source
    /// contained no statements.
    pub fn eval(&mut self, source: &str) -> Result<Option<Rc<Object>>, ParserErrors> {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            return Err(ParserErrors {
                messages: parser.errors().to_vec(),
            });
        }
        Ok(self.evaluator.eval_program(&program, &self.env))
    }
}

/// Parse failures reported by [`Interpreter::eval`], in source order.
#[derive(Debug)]
pub struct ParserErrors {
    pub messages: Vec<String>,
}

impl fmt::Display for ParserErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parser errors:")?;
        for msg in &self.messages {
            write!(f, "\n\t{}", msg)?;
        }
        Ok(())
    }
}

impl Error for ParserErrors {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(input: &str) -> String {
        let mut interp = Interpreter::new();
        interp
            .eval(input)
            .expect("interpreter error")
            .expect("no result")
            .to_string()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(interpret("5 + 5 * 2;"), "15");
    }

    #[test]
    fn bindings_and_conditionals() {
        assert_eq!(
            interpret("let a = 5; let b = a > 3; let c = a * 99; if (b) { 10 } else { 1 };"),
            "10"
        );
    }

    #[test]
    fn closures() {
        assert_eq!(
            interpret("let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(3);"),
            "5"
        );
    }

    #[test]
    fn nested_early_return() {
        assert_eq!(
            interpret("if (10 > 1) { if (10 > 1) { return 10; } return 1; }"),
            "10"
        );
    }

    #[test]
    fn unknown_identifier() {
        assert_eq!(interpret("foobar;"), "ERROR: identifier not found: foobar");
    }

    #[test]
    fn mismatched_operand_types() {
        assert_eq!(interpret("5 + true;"), "ERROR: type mismatch: INTEGER + INTEGER");
    }

    #[test]
    fn negated_boolean() {
        assert_eq!(interpret("-true;"), "ERROR: unknown operator: -BOOLEAN");
    }

    #[test]
    fn session_persists_between_calls() {
        let mut interp = Interpreter::new();
        interp
            .eval("let add = fn(x, y) { x + y; };")
            .expect("interpreter error");
        let out = interp.eval("add(2, 3);").expect("interpreter error");
        assert_eq!(out.expect("no result").to_string(), "5");
    }

    #[test]
    fn boolean_identity_survives_between_calls() {
        let mut interp = Interpreter::new();
        interp.eval("let b = 5 > 3;").expect("interpreter error");
        let out = interp.eval("b == true;").expect("interpreter error");
        assert_eq!(out.expect("no result").to_string(), "true");
    }

    #[test]
    fn empty_source() {
        let mut interp = Interpreter::new();
        assert!(interp.eval("").expect("interpreter error").is_none());
    }

    #[test]
    fn parse_failure_surfaces_all_messages() {
        let mut interp = Interpreter::new();
        match interp.eval("let = 5;") {
            Err(errors) => {
                assert_eq!(
                    errors.messages,
                    vec![
                        "expected next token to be IDENT, got ASSIGN instead.".to_string(),
                        "no prefix parse function found for ASSIGN".to_string(),
                    ]
                );
                assert_eq!(
                    errors.to_string(),
                    "parser errors:\n\texpected next token to be IDENT, got ASSIGN instead.\n\tno prefix parse function found for ASSIGN"
                );
            }
            out => panic!("unexpected output: {:?}", out),
        }
    }
}
