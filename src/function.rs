use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::environment::Environment;
use crate::error::Interrupt;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::FunctionData;

/// A user-defined function: the shared declaration plus the environment
/// captured where the function was defined. Methods additionally know
/// whether they are `init`, whose calls always yield the instance.
#[derive(Clone)]
pub struct Function {
    pub declaration: Rc<FunctionData>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(declaration: Rc<FunctionData>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { declaration, closure, is_initializer }
    }

    /// Returns a copy of this function whose closure additionally binds
    /// `this` to the given instance. Method access does this at lookup time,
    /// so a method value remembers the instance it was taken from.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        environment.define("this", instance);

        Function {
            declaration: Rc::clone(&self.declaration),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    /// The instance an initializer's closure is bound to.
    fn bound_this(&self) -> Object {
        Environment::get_at(&self.closure, 0, "this")
            .expect("initializer closure to bind 'this'")
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Interrupt> {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(&param.lexeme, argument);
        }

        let result = interpreter.execute_block(&self.declaration.body, Rc::new(RefCell::new(environment)));

        match result {
            // The function boundary is where a return signal stops.
            Err(Interrupt::Return(value)) => {
                if self.is_initializer {
                    Ok(self.bound_this())
                } else {
                    Ok(value)
                }
            },
            Err(interrupt) => Err(interrupt),
            Ok(()) => {
                if self.is_initializer {
                    Ok(self.bound_this())
                } else {
                    Ok(Object::Literal(Literal::Nil))
                }
            },
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.declaration, &other.declaration) && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// A built-in registered in the globals before execution. Natives receive
/// plain argument vectors and report failures as bare messages; the call
/// site attaches the source token.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: fn(Vec<Object>) -> Result<Object, String>,
}

impl NativeFunction {
    /// The native functions every program starts with.
    pub fn all() -> Vec<NativeFunction> {
        vec![
            // Wall-clock reading in seconds since the Unix epoch.
            NativeFunction {
                name: "clock",
                arity: 0,
                function: |_| {
                    let now = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .expect("system clock to read past the Unix epoch")
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
            // The printed form of any value, as a string.
            NativeFunction {
                name: "str",
                arity: 1,
                function: |arguments| Ok(Object::from(arguments[0].to_string())),
            },
            // Numbers pass through; strings are parsed. Anything else is an
            // error.
            NativeFunction {
                name: "float",
                arity: 1,
                function: |arguments| match &arguments[0] {
                    Object::Literal(Literal::Number(n)) => Ok(Object::from(*n)),
                    Object::Literal(Literal::String(s)) => s.trim().parse::<f64>()
                        .map(Object::from)
                        .map_err(|_| String::from("Cannot convert value to a number.")),
                    _ => Err(String::from("Cannot convert value to a number.")),
                },
            },
            // Uniform random integer in [lo, hi], returned as a number.
            NativeFunction {
                name: "randint",
                arity: 2,
                function: |arguments| {
                    let (Some(lo), Some(hi)) = (arguments[0].as_number(), arguments[1].as_number()) else {
                        return Err(String::from("Operands must be numbers."));
                    };

                    let (lo, hi) = (lo as i64, hi as i64);
                    if lo > hi {
                        return Err(String::from("Range is empty."));
                    }

                    Ok(Object::from(rand::thread_rng().gen_range(lo..=hi) as f64))
                },
            },
        ]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
