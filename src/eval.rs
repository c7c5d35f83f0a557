//! Tree-walking evaluation.

use std::rc::Rc;

use crate::ast::{Block, Expr, Ident, Program, Stmt};
use crate::env::Environment;
use crate::object::{Function, Object};

/// Walks an AST and produces an [`Object`].
///
/// The evaluator owns the interned `true`, `false` and `null` singletons.
/// Equality between non-integer values and truthiness are both decided by
/// address ([`Rc::ptr_eq`]), so those comparisons only hold between values
/// produced by the same evaluator. Reuse one evaluator for every program
/// that shares an environment; [`crate::interpreter::Interpreter`] does
/// this across REPL lines.
#[derive(Debug)]
pub struct Evaluator {
    bool_true: Rc<Object>,
    bool_false: Rc<Object>,
    null: Rc<Object>,
}

/// Evaluate `program` with a throwaway [`Evaluator`].
///
/// Returns `None` for a program with no statements.
pub fn evaluate(program: &Program, env: &Rc<Environment>) -> Option<Rc<Object>> {
    Evaluator::new().eval_program(program, env)
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator {
            bool_true: Rc::new(Object::Boolean(true)),
            bool_false: Rc::new(Object::Boolean(false)),
            null: Rc::new(Object::Null),
        }
    }

    /// Evaluate the statements of `program` in order.
    ///
    /// A `Return` produced by any statement is unwrapped here and ends the
    /// program; an `Error` ends it unwrapped. The result is never a
    /// `Return` wrapper.
    pub fn eval_program(&self, program: &Program, env: &Rc<Environment>) -> Option<Rc<Object>> {
        let mut result = None;
        for stmt in &program.statements {
            let value = self.eval_stmt(stmt, env);
            match value.as_ref() {
                Object::Return(inner) => return Some(inner.clone()),
                Object::Error(_) => return Some(value),
                _ => result = Some(value),
            }
        }
        result
    }

    fn eval_stmt(&self, stmt: &Stmt, env: &Rc<Environment>) -> Rc<Object> {
        match stmt {
            Stmt::Let { name, value, .. } => {
                let val = self.eval_expr(value, env);
                if val.is_error() {
                    return val;
                }
                env.set(name.value.clone(), val.clone());
                val
            }
            Stmt::Return { value, .. } => {
                let val = match value {
                    Some(expr) => {
                        let val = self.eval_expr(expr, env);
                        if val.is_error() {
                            return val;
                        }
                        val
                    }
                    None => self.null.clone(),
                };
                Rc::new(Object::Return(val))
            }
            Stmt::Expr { expression, .. } => self.eval_expr(expression, env),
        }
    }

    /// Unlike a program, a block hands `Return` wrappers back untouched so
    /// enclosing blocks keep propagating them.
    fn eval_block(&self, block: &Block, env: &Rc<Environment>) -> Rc<Object> {
        let mut result = self.null.clone();
        for stmt in &block.statements {
            result = self.eval_stmt(stmt, env);
            if matches!(result.as_ref(), Object::Return(_) | Object::Error(_)) {
                return result;
            }
        }
        result
    }

    fn eval_expr(&self, expr: &Expr, env: &Rc<Environment>) -> Rc<Object> {
        match expr {
            Expr::Int { value, .. } => Rc::new(Object::Integer(*value)),
            Expr::Bool { value, .. } => self.native_bool(*value),
            Expr::Ident(ident) => self.eval_identifier(ident, env),
            Expr::Prefix { op, right, .. } => {
                let right = self.eval_expr(right, env);
                if right.is_error() {
                    return right;
                }
                self.eval_prefix(op, right)
            }
            Expr::Infix {
                left, op, right, ..
            } => {
                let left = self.eval_expr(left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expr(right, env);
                if right.is_error() {
                    return right;
                }
                self.eval_infix(op, left, right)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = self.eval_expr(condition, env);
                if condition.is_error() {
                    return condition;
                }
                if self.is_truthy(&condition) {
                    self.eval_block(consequence, env)
                } else if let Some(alt) = alternative {
                    self.eval_block(alt, env)
                } else {
                    self.null.clone()
                }
            }
            Expr::Function {
                parameters, body, ..
            } => Rc::new(Object::Function(Function {
                parameters: parameters.clone(),
                body: Rc::clone(body),
                env: Rc::clone(env),
            })),
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                let callee = self.eval_expr(function, env);
                if callee.is_error() {
                    return callee;
                }
                let args = match self.eval_expressions(arguments, env) {
                    Ok(args) => args,
                    Err(err) => return err,
                };
                self.apply_function(callee, args)
            }
        }
    }

    fn eval_identifier(&self, ident: &Ident, env: &Rc<Environment>) -> Rc<Object> {
        env.get(&ident.value)
            .unwrap_or_else(|| error(format!("identifier not found: {}", ident.value)))
    }

    fn eval_prefix(&self, op: &str, right: Rc<Object>) -> Rc<Object> {
        match op {
            "!" => self.eval_bang(right),
            "-" => self.eval_minus(right),
            _ => error(format!("unknown operator: {}{}", op, right.type_name())),
        }
    }

    /// `!x` is `true` only for the `false` singleton; `!0` and `!null` are
    /// both `false`.
    fn eval_bang(&self, right: Rc<Object>) -> Rc<Object> {
        if Rc::ptr_eq(&right, &self.bool_false) {
            self.bool_true.clone()
        } else {
            self.bool_false.clone()
        }
    }

    fn eval_minus(&self, right: Rc<Object>) -> Rc<Object> {
        match right.as_ref() {
            Object::Integer(value) => Rc::new(Object::Integer(value.wrapping_neg())),
            _ => error(format!("unknown operator: -{}", right.type_name())),
        }
    }

    fn eval_infix(&self, op: &str, left: Rc<Object>, right: Rc<Object>) -> Rc<Object> {
        if let (Object::Integer(l), Object::Integer(r)) = (left.as_ref(), right.as_ref()) {
            return self.eval_integer_infix(op, *l, *r);
        }
        match op {
            "==" => self.native_bool(Rc::ptr_eq(&left, &right)),
            "!=" => self.native_bool(!Rc::ptr_eq(&left, &right)),
            // The mismatch message repeats the left-hand type; downstream
            // output matching relies on it.
            _ if left.type_name() != right.type_name() => error(format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                op,
                left.type_name()
            )),
            _ => error(format!(
                "unknown operator: {}{}{}",
                left.type_name(),
                op,
                right.type_name()
            )),
        }
    }

    fn eval_integer_infix(&self, op: &str, l: i64, r: i64) -> Rc<Object> {
        match op {
            "+" => Rc::new(Object::Integer(l.wrapping_add(r))),
            "-" => Rc::new(Object::Integer(l.wrapping_sub(r))),
            "*" => Rc::new(Object::Integer(l.wrapping_mul(r))),
            "/" => {
                if r == 0 {
                    error("division by zero".to_string())
                } else {
                    Rc::new(Object::Integer(l.wrapping_div(r)))
                }
            }
            "<" => self.native_bool(l < r),
            ">" => self.native_bool(l > r),
            "==" => self.native_bool(l == r),
            "!=" => self.native_bool(l != r),
            _ => error(format!("unknown operator: INTEGER{}INTEGER", op)),
        }
    }

    fn eval_expressions(
        &self,
        exprs: &[Expr],
        env: &Rc<Environment>,
    ) -> Result<Vec<Rc<Object>>, Rc<Object>> {
        exprs
            .iter()
            .map(|expr| {
                let val = self.eval_expr(expr, env);
                if val.is_error() {
                    Err(val)
                } else {
                    Ok(val)
                }
            })
            .collect()
    }

    fn apply_function(&self, callee: Rc<Object>, args: Vec<Rc<Object>>) -> Rc<Object> {
        let func = match callee.as_ref() {
            Object::Function(func) => func,
            _ => return error(format!("not a function: {}", callee.type_name())),
        };
        if args.len() != func.parameters.len() {
            return error(format!(
                "wrong number of arguments: want={}, got={}",
                func.parameters.len(),
                args.len()
            ));
        }
        // Arguments live in a fresh scope whose outer link is the
        // environment the function literal captured, not the call site's.
        let env = Environment::enclosed(func.env.clone());
        for (param, arg) in func.parameters.iter().zip(args) {
            env.set(param.value.clone(), arg);
        }
        let evaluated = self.eval_block(&func.body, &env);
        unwrap_return(evaluated)
    }

    fn native_bool(&self, value: bool) -> Rc<Object> {
        if value {
            self.bool_true.clone()
        } else {
            self.bool_false.clone()
        }
    }

    fn is_truthy(&self, obj: &Rc<Object>) -> bool {
        !Rc::ptr_eq(obj, &self.null) && !Rc::ptr_eq(obj, &self.bool_false)
    }
}

fn error(message: String) -> Rc<Object> {
    Rc::new(Object::Error(message))
}

fn unwrap_return(obj: Rc<Object>) -> Rc<Object> {
    match obj.as_ref() {
        Object::Return(inner) => inner.clone(),
        _ => obj,
    }
}
