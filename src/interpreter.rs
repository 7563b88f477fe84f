use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Interrupt, Reporter, RuntimeError};
use crate::expr::*;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::*;
use crate::token::{Token, Type};

type EvalResult = Result<Object, Interrupt>;
type ExecResult = Result<(), Interrupt>;

/// Walks statements against a chain of environments. `environment` always
/// points at the innermost frame; the resolver's distance table says how far
/// out each variable reference must reach, and globals are the fallback for
/// references with no entry. Program output goes to the injected sink so
/// tests can capture it; diagnostics do not pass through here.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));

        for native in NativeFunction::all() {
            globals.borrow_mut().define(native.name, Object::NativeFunction(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Records the resolver's scope distance for a variable reference.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Executes the program, reporting the first runtime error and stopping.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut Reporter) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => (),
                Err(Interrupt::Error(error)) => {
                    reporter.runtime_error(&error);
                    return;
                },
                Err(Interrupt::Return(_)) => unreachable!("resolver rejects top-level return"),
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(())
            },

            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                writeln!(self.output, "{value}").expect("output sink to be writable");
                Ok(())
            },

            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::Literal(Literal::Nil),
                };

                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(())
            },

            Stmt::Block(data) => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
            },

            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },

            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.body)?;
                }
                Ok(())
            },

            Stmt::Function(data) => {
                let function = Function::new(Rc::clone(data), Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(&data.name.lexeme, Object::Function(function));
                Ok(())
            },

            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(value) => self.evaluate(value)?,
                    None => Object::Literal(Literal::Nil),
                };

                Err(Interrupt::Return(value))
            },

            Stmt::Class(data) => self.execute_class(data),
        }
    }

    /// Runs the statements in the given environment, restoring the previous
    /// one on every exit path, including runtime errors and return signals.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn execute_class(&mut self, data: &ClassData) -> ExecResult {
        let superclass = match &data.superclass {
            Some(variable) => {
                match self.look_up_variable(&variable.name, variable.id)? {
                    Object::Class(class) => Some(class),
                    _ => {
                        return Err(RuntimeError {
                            token: variable.name.clone(),
                            message: String::from("Superclass must be a class."),
                        }.into());
                    },
                }
            },
            None => None,
        };

        // The name is defined before the methods are built so they can refer
        // to the class.
        self.environment.borrow_mut().define(&data.name.lexeme, Object::Literal(Literal::Nil));

        // With a superclass, methods close over an extra environment binding
        // `super`; its distance matches the extra scope the resolver pushed.
        let previous = superclass.as_ref().map(|superclass| {
            let mut environment = Environment::with_enclosing(Rc::clone(&self.environment));
            environment.define("super", Object::Class(Rc::clone(superclass)));
            mem::replace(&mut self.environment, Rc::new(RefCell::new(environment)))
        });

        let mut methods = HashMap::new();
        for method in &data.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(Rc::clone(method), Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);

        if let Some(previous) = previous {
            self.environment = previous;
        }

        self.environment.borrow_mut().assign(&data.name, Object::Class(Rc::new(class)))?;
        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(Object::Literal(literal.clone())),

            Expr::Unary(data) => self.evaluate_unary(data),

            Expr::Binary(data) => self.evaluate_binary(data),

            Expr::Grouping(data) => self.evaluate(&data.expr),

            Expr::Variable(data) => self.look_up_variable(&data.name, data.id),

            Expr::Assign(data) => {
                let value = self.evaluate(&data.value)?;

                match self.locals.get(&data.id) {
                    Some(distance) => {
                        Environment::assign_at(&self.environment, *distance, &data.name, value.clone());
                    },
                    None => {
                        self.globals.borrow_mut().assign(&data.name, value.clone())?;
                    },
                }

                Ok(value)
            },

            Expr::Logical(data) => {
                let left = self.evaluate(&data.left)?;

                // Short-circuit: the left operand itself is the result when
                // it decides the outcome.
                match data.operator.r#type {
                    Type::Or if left.is_truthy() => Ok(left),
                    Type::And if !left.is_truthy() => Ok(left),
                    _ => self.evaluate(&data.right),
                }
            },

            Expr::Call(data) => self.evaluate_call(data),

            Expr::Get(data) => {
                let object = self.evaluate(&data.object)?;

                match &object {
                    Object::Instance(instance) => {
                        instance.borrow().get(&data.name, &object).map_err(Interrupt::from)
                    },
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: String::from("Only instances have properties."),
                    }.into()),
                }
            },

            Expr::Set(data) => {
                let object = self.evaluate(&data.object)?;

                let Object::Instance(instance) = object else {
                    return Err(RuntimeError {
                        token: data.name.clone(),
                        message: String::from("Only instances have fields."),
                    }.into());
                };

                let value = self.evaluate(&data.value)?;
                instance.borrow_mut().set(&data.name, value.clone());
                Ok(value)
            },

            Expr::This(data) => self.look_up_variable(&data.keyword, data.id),

            Expr::Super(data) => self.evaluate_super(data),
        }
    }

    fn evaluate_unary(&mut self, data: &UnaryData) -> EvalResult {
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => {
                let n = Self::check_number_operand(&data.operator, &right)?;
                Ok(Object::from(-n))
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("parser only builds '!' and '-' unary operators"),
        }
    }

    fn evaluate_binary(&mut self, data: &BinaryData) -> EvalResult {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => {
                    Ok(Object::from(l + r))
                },
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                },
                _ => Err(RuntimeError {
                    token: data.operator.clone(),
                    message: String::from("Operands must be two numbers or two strings."),
                }.into()),
            },

            Type::Minus => {
                let (l, r) = Self::check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l - r))
            },
            Type::Slash => {
                let (l, r) = Self::check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l / r))
            },
            Type::Star => {
                let (l, r) = Self::check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l * r))
            },

            Type::Greater => {
                let (l, r) = Self::check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l > r))
            },
            Type::GreaterEqual => {
                let (l, r) = Self::check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l >= r))
            },
            Type::Less => {
                let (l, r) = Self::check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l < r))
            },
            Type::LessEqual => {
                let (l, r) = Self::check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l <= r))
            },

            // Equality works on any pair of values and never raises.
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),

            _ => unreachable!("parser only builds arithmetic, comparison and equality binaries"),
        }
    }

    fn evaluate_call(&mut self, data: &CallData) -> EvalResult {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        match callee {
            Object::Function(ref function) => {
                self.check_arity(function.arity(), arguments.len(), &data.paren)?;
                function.call(self, arguments)
            },

            Object::Class(ref class) => {
                self.check_arity(class.arity(), arguments.len(), &data.paren)?;
                class.call(self, arguments)
            },

            Object::NativeFunction(ref native) => {
                self.check_arity(native.arity, arguments.len(), &data.paren)?;
                (native.function)(arguments).map_err(|message| {
                    Interrupt::Error(RuntimeError { token: data.paren.clone(), message })
                })
            },

            _ => Err(RuntimeError {
                token: data.paren.clone(),
                message: String::from("Can only call functions and classes."),
            }.into()),
        }
    }

    /// `super.m` reads the superclass at the recorded distance and `this`
    /// one environment closer in, then binds the found method to `this`.
    fn evaluate_super(&mut self, data: &SuperData) -> EvalResult {
        let distance = *self.locals.get(&data.id)
            .expect("resolver to record a distance for 'super'");

        let superclass = Environment::get_at(&self.environment, distance, "super")
            .expect("'super' to be bound at the resolved distance");
        let Object::Class(superclass) = superclass else {
            unreachable!("'super' always names a class");
        };

        let this = Environment::get_at(&self.environment, distance - 1, "this")
            .expect("'this' to be bound one scope inside 'super'");

        let Some(method) = superclass.find_method(&data.method.lexeme) else {
            return Err(RuntimeError {
                token: data.method.clone(),
                message: format!("Undefined property '{}'.", data.method.lexeme),
            }.into());
        };

        Ok(Object::Function(method.bind(this)))
    }

    /// Reads a variable through the distance table, or from globals when the
    /// resolver recorded nothing for it.
    fn look_up_variable(&self, name: &Token, id: ExprId) -> EvalResult {
        match self.locals.get(&id) {
            Some(distance) => Environment::get_at(&self.environment, *distance, &name.lexeme)
                .ok_or_else(|| RuntimeError {
                    token: name.clone(),
                    message: format!("Undefined variable '{}'.", name.lexeme),
                }.into()),
            None => self.globals.borrow().get(name).map_err(Interrupt::from),
        }
    }

    fn check_arity(&self, expected: usize, got: usize, paren: &Token) -> Result<(), Interrupt> {
        if expected == got {
            return Ok(());
        }

        Err(RuntimeError {
            token: paren.clone(),
            message: format!("Expected {expected} arguments but got {got}."),
        }.into())
    }

    fn check_number_operand(operator: &Token, operand: &Object) -> Result<f64, Interrupt> {
        operand.as_number().ok_or_else(|| RuntimeError {
            token: operator.clone(),
            message: String::from("Operand must be a number."),
        }.into())
    }

    fn check_number_operands(operator: &Token, left: &Object, right: &Object) -> Result<(f64, f64), Interrupt> {
        match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => Ok((l, r)),
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: String::from("Operands must be numbers."),
            }.into()),
        }
    }
}
