use std::collections::HashMap;
use std::mem;

use crate::error::Reporter;
use crate::expr::{Expr, ExprId};
use crate::interpreter::Interpreter;
use crate::stmt::{ClassData, FunctionData, Stmt};
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
    Subclass,
}

/// Static pre-pass that walks the parsed AST and records, for every
/// variable-referencing expression, how many environments out its binding
/// lives. Nothing is evaluated; the scope stack mirrors the environment
/// chain the evaluator will build, which is exactly what makes the recorded
/// distances valid at runtime.
///
/// Each scope maps a name to whether its initializer has finished resolving,
/// so reading a local in its own initializer can be rejected. Names that are
/// in no scope are globals and get no table entry.
pub struct Resolver<'a, 'out> {
    interpreter: &'a mut Interpreter<'out>,
    reporter: &'a mut Reporter,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'out> Resolver<'a, 'out> {
    pub fn new(interpreter: &'a mut Interpreter<'out>, reporter: &'a mut Reporter) -> Self {
        Resolver {
            interpreter,
            reporter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Marks the name as existing but not yet usable in the innermost scope.
    /// Globals are not tracked and may be redeclared freely.
    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        if self.scopes.last().expect("scope stack to be non-empty").contains_key(&name.lexeme) {
            self.reporter.error_at(name, "Already a variable with this name in this scope.");
        }

        self.scopes
            .last_mut()
            .expect("scope stack to be non-empty")
            .insert(name.lexeme.to_owned(), false);
    }

    /// Marks the name as fully initialized and usable.
    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.to_owned(), true);
        }
    }

    /// Walks the scopes innermost-first; the first hit records its distance
    /// against the expression's id. No hit means the name is global.
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, depth);
                return;
            }
        }
    }

    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(data) => self.resolve_expr(&data.expr),

            Stmt::Print(data) => self.resolve_expr(&data.expr),

            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            },

            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            },

            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            },

            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            },

            Stmt::Function(data) => {
                // The name is usable before the body resolves so a function
                // can recurse.
                self.declare(&data.name);
                self.define(&data.name);

                self.resolve_function(data, FunctionType::Function);
            },

            Stmt::Return(data) => {
                if let FunctionType::None = self.current_function {
                    self.reporter.error_at(&data.keyword, "Can't return from top-level code.");
                }

                if let Some(value) = &data.value {
                    if let FunctionType::Initializer = self.current_function {
                        self.reporter.error_at(&data.keyword, "Can't return a value from an initializer.");
                    }

                    self.resolve_expr(value);
                }
            },

            Stmt::Class(data) => self.resolve_class(data),
        }
    }

    fn resolve_class(&mut self, data: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&data.name);
        self.define(&data.name);

        if let Some(superclass) = &data.superclass {
            if superclass.name.lexeme == data.name.lexeme {
                self.reporter.error_at(&superclass.name, "A class can't inherit from itself.");
            }

            self.current_class = ClassType::Subclass;
            self.resolve_local(superclass.id, &superclass.name);

            // An extra scope around the methods binds `super`.
            self.begin_scope();
            self.scopes
                .last_mut()
                .expect("scope stack to be non-empty")
                .insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope stack to be non-empty")
            .insert("this".to_string(), true);

        for method in &data.methods {
            let declaration = if method.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, declaration);
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => (),

            Expr::Unary(data) => self.resolve_expr(&data.expr),

            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },

            Expr::Grouping(data) => self.resolve_expr(&data.expr),

            Expr::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&data.name.lexeme) == Some(&false) {
                        self.reporter.error_at(&data.name, "Can't read local variable in its own initializer.");
                    }
                }

                self.resolve_local(data.id, &data.name);
            },

            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(data.id, &data.name);
            },

            Expr::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },

            Expr::Call(data) => {
                self.resolve_expr(&data.callee);
                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            },

            Expr::Get(data) => self.resolve_expr(&data.object),

            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            },

            Expr::This(data) => {
                if let ClassType::None = self.current_class {
                    self.reporter.error_at(&data.keyword, "Can't use 'this' outside of a class.");
                    return;
                }

                self.resolve_local(data.id, &data.keyword);
            },

            Expr::Super(data) => {
                match self.current_class {
                    ClassType::Subclass => (),
                    ClassType::None => {
                        self.reporter.error_at(&data.keyword, "Can't use 'super' outside of a class.");
                    },
                    ClassType::Class => {
                        self.reporter.error_at(&data.keyword, "Can't use 'super' in a class with no superclass.");
                    },
                }

                self.resolve_local(data.id, &data.keyword);
            },
        }
    }
}
