#![deny(unused_crate_dependencies)]


use procdraw_core::{pretty, printer, AccessError, BuiltinId, Heap, SymbolId, Type, Value};
use procdraw_diagnostic::Source;
use procdraw_parse::{read_str, ParseError};
use std::{any::Any, rc::Rc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Access(AccessError),
    NotCallable { operator: String },
}

impl Error {
    pub fn message(&self) -> String {
        match self {
            Error::Access(err) => err.message(),
            Error::NotCallable { operator } => format!("{} is not callable", operator),
        }
    }
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        Error::Access(err)
    }
}

/// Opaque data handed back to a builtin on every call.
pub type UserData = Option<Rc<dyn Any>>;

/// A native function. It receives its arguments already evaluated, as a list,
/// along with the caller's environment.
pub type BuiltinFn = fn(&mut Interpreter, Value, Value, &UserData) -> Result<Value, Error>;

struct Builtin {
    name: Rc<str>,
    fun: BuiltinFn,
    data: UserData,
}

struct SpecialForms {
    quote: SymbolId,
    lambda: SymbolId,
    progn: SymbolId,
    setq: SymbolId,
    set: SymbolId,
    if_: SymbolId,
    def: SymbolId,
}

/// A Lisp interpreter.
///
/// The interpreter owns every value it creates. Values taken from one interpreter
/// mean nothing to another.
pub struct Interpreter {
    heap: Heap,
    builtins: Vec<Builtin>,
    forms: SpecialForms,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let mut heap = Heap::new();
        let forms = SpecialForms {
            quote: heap.intern("quote"),
            lambda: heap.intern("lambda"),
            progn: heap.intern("progn"),
            setq: heap.intern("setq"),
            set: heap.intern("set"),
            if_: heap.intern("if"),
            def: heap.intern("def"),
        };
        Interpreter {
            heap,
            builtins: Vec::new(),
            forms,
        }
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    pub fn symbol_ref(&mut self, name: &str) -> Value {
        self.heap.symbol_ref(name)
    }

    /// Read the first form in `text`.
    pub fn read(&mut self, text: &str) -> Result<Value, ParseError> {
        read_str(
            &mut self.heap,
            Source::Interactive {
                label: String::from("(string)"),
            },
            text,
        )
    }

    pub fn print(&self, value: Value) -> String {
        printer::print(&self.heap, value)
    }

    pub fn pretty_print(&self, value: Value, margin: usize, indent: usize) -> String {
        pretty::pretty_print(&self.heap, value, margin, indent)
    }

    /// A native function value that isn't bound to any symbol. `name` is only
    /// used for `builtin_name`.
    pub fn make_builtin(&mut self, name: &str, fun: BuiltinFn, data: UserData) -> Value {
        let id = BuiltinId::from_index(self.builtins.len());
        self.builtins.push(Builtin {
            name: Rc::from(name),
            fun,
            data,
        });
        Value::Builtin(id)
    }

    /// Bind `name` globally to a native function.
    pub fn set_global_builtin(&mut self, name: &str, fun: BuiltinFn, data: UserData) -> Value {
        let builtin = self.make_builtin(name, fun, data);
        self.set_global(name, builtin)
    }

    pub fn set_global(&mut self, name: &str, value: Value) -> Value {
        let symbol = self.heap.intern(name);
        self.heap.set_symbol_value(symbol, value);
        value
    }

    /// The name a builtin was registered under.
    pub fn builtin_name(&self, id: BuiltinId) -> Option<&str> {
        self.builtins.get(id.index()).map(|builtin| &*builtin.name)
    }

    /// Evaluate `expr` with no local bindings.
    pub fn eval(&mut self, expr: Value) -> Result<Value, Error> {
        self.eval_in(expr, Value::Null)
    }

    pub fn eval_in(&mut self, expr: Value, env: Value) -> Result<Value, Error> {
        match expr {
            Value::Symbol(symbol) => Ok(self.value(symbol, env)),
            Value::Cons(_) => self.eval_form(expr, env),
            _ => Ok(expr),
        }
    }

    fn eval_form(&mut self, form: Value, env: Value) -> Result<Value, Error> {
        let head = self.heap.car(form);
        match head {
            Value::Symbol(symbol) if symbol == self.forms.quote => Ok(self.heap.cadr(form)),
            Value::Symbol(symbol) if symbol == self.forms.lambda => {
                let (params, body) = (self.heap.cadr(form), self.heap.caddr(form));
                Ok(self.heap.make_expr(params, body))
            }
            Value::Symbol(symbol) if symbol == self.forms.progn => {
                self.progn(self.heap.cdr(form), env)
            }
            Value::Symbol(symbol) if symbol == self.forms.setq || symbol == self.forms.set => {
                let value = self.eval_in(self.heap.caddr(form), env)?;
                self.set(self.heap.cadr(form), value, env)
            }
            Value::Symbol(symbol) if symbol == self.forms.if_ => {
                let condition = self.eval_in(self.heap.cadr(form), env)?;
                if self.heap.bool_val(condition) {
                    self.eval_in(self.heap.caddr(form), env)
                } else {
                    self.eval_in(self.heap.cadddr(form), env)
                }
            }
            Value::Symbol(symbol) if symbol == self.forms.def => {
                let (params, body) = (self.heap.caddr(form), self.heap.cadddr(form));
                let closure = self.heap.make_expr(params, body);
                self.set(self.heap.cadr(form), closure, env)
            }
            _ => {
                let fun = self.eval_in(head, env)?;
                let args = self.evlis(self.heap.cdr(form), env)?;
                self.apply(fun, args, env)
            }
        }
    }

    fn progn(&mut self, forms: Value, env: Value) -> Result<Value, Error> {
        let forms: Vec<Value> = self.heap.iter(forms).collect();
        let mut result = Value::Null;
        for form in forms {
            result = self.eval_in(form, env)?;
        }
        Ok(result)
    }

    /// Evaluate each element of `args` from left to right, collecting the results
    /// into a fresh list.
    pub fn evlis(&mut self, args: Value, env: Value) -> Result<Value, Error> {
        let args: Vec<Value> = self.heap.iter(args).collect();
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_in(arg, env)?);
        }
        Ok(self.heap.make_list(values))
    }

    pub fn apply(&mut self, fun: Value, args: Value, env: Value) -> Result<Value, Error> {
        match fun {
            Value::Builtin(id) => {
                let (fun, data) = match self.builtins.get(id.index()) {
                    Some(builtin) => (builtin.fun, builtin.data.clone()),
                    None => return Err(self.not_callable(fun)),
                };
                fun(self, args, env, &data)
            }
            Value::Expr(_) => {
                let (params, body) = self.heap.expr_parts(fun)?;
                self.apply_closure(params, body, args)
            }
            Value::Cons(_) if self.is_lambda_form(fun) => {
                let (params, body) = (self.heap.cadr(fun), self.heap.caddr(fun));
                self.apply_closure(params, body, args)
            }
            // A symbol names a method of the dictionary passed as the first argument.
            Value::Symbol(_) => match self.heap.car(args) {
                table @ Value::Dict(_) => {
                    let method = self.heap.dict_get(fun, table, Value::Null)?;
                    match method {
                        Value::Symbol(_) | Value::Null => Err(self.not_callable(fun)),
                        method => self.apply(method, args, env),
                    }
                }
                _ => Err(self.not_callable(fun)),
            },
            _ => Err(self.not_callable(fun)),
        }
    }

    /// Evaluate `body` in a fresh environment that binds each parameter to the
    /// argument in the same position. Extra arguments are dropped and missing
    /// ones are `nil`.
    fn apply_closure(&mut self, params: Value, body: Value, args: Value) -> Result<Value, Error> {
        let params: Vec<Value> = self.heap.iter(params).collect();
        let mut env = Value::Null;
        let mut rest = args;
        for param in params {
            let arg = self.heap.car(rest);
            rest = self.heap.cdr(rest);
            env = self.bind(param, arg, env);
        }
        self.eval_in(body, env)
    }

    fn is_lambda_form(&self, value: Value) -> bool {
        matches!(self.heap.car(value), Value::Symbol(symbol) if symbol == self.forms.lambda)
    }

    fn not_callable(&self, fun: Value) -> Error {
        Error::NotCallable {
            operator: self.print(fun),
        }
    }

    /// Closures, `lambda` forms and builtins.
    pub fn functionp(&self, value: Value) -> bool {
        match value {
            Value::Builtin(_) | Value::Expr(_) => true,
            Value::Cons(_) => self.is_lambda_form(value),
            _ => false,
        }
    }

    /// Apply the global function `name` to no arguments.
    pub fn call(&mut self, name: &str) -> Result<Value, Error> {
        let symbol = self.heap.intern(name);
        let fun = self.value(symbol, Value::Null);
        self.apply(fun, Value::Null, Value::Null)
    }

    /// The value of `symbol`: its binding in `env` if there is one, otherwise its
    /// global value.
    pub fn value(&self, symbol: SymbolId, env: Value) -> Value {
        match self.assoc(Value::Symbol(symbol), env) {
            Value::Null => self.heap.symbol_value(symbol),
            binding => self.heap.cdr(binding),
        }
    }

    /// Assign to `symbol`. A binding in `env` is updated in place, otherwise the
    /// global value changes. Returns `value`.
    pub fn set(&mut self, symbol: Value, value: Value, env: Value) -> Result<Value, Error> {
        let id = match symbol {
            Value::Symbol(id) => id,
            _ => return Err(AccessError::new(Type::Symbol, &symbol).into()),
        };
        match self.assoc(symbol, env) {
            Value::Null => self.heap.set_symbol_value(id, value),
            binding => {
                self.heap.rplacd(binding, value)?;
            }
        }
        Ok(value)
    }

    /// Push a `(symbol . value)` binding onto `env`.
    pub fn bind(&mut self, symbol: Value, value: Value, env: Value) -> Value {
        let binding = self.heap.cons(symbol, value);
        self.heap.cons(binding, env)
    }

    /// The first pair in `alist` whose car is `eq` to `key`, or `nil`.
    pub fn assoc(&self, key: Value, alist: Value) -> Value {
        self.assoc_or_last(key, alist).unwrap_or(Value::Null)
    }

    /// Like `assoc`, but on a miss returns the last cell of the list instead.
    fn assoc_or_last(&self, key: Value, alist: Value) -> Result<Value, Value> {
        let mut last = alist;
        let mut node = alist;
        while let Value::Cons(_) = node {
            let pair = self.heap.car(node);
            if self.heap.eq(key, self.heap.car(pair)) {
                return Ok(pair);
            }
            last = node;
            node = self.heap.cdr(node);
        }
        Err(last)
    }

    /// Set the value for `key` in `alist`, replacing the first matching pair or
    /// appending a new pair at the end. Returns `value`.
    ///
    /// An empty list can't be extended in place, so it is left unchanged.
    pub fn putassoc(&mut self, key: Value, value: Value, alist: Value) -> Result<Value, Error> {
        if let Value::Cons(_) = alist {
            match self.assoc_or_last(key, alist) {
                Ok(pair) => {
                    self.heap.rplacd(pair, value)?;
                }
                Err(last) => {
                    let pair = self.heap.cons(key, value);
                    let tail = self.heap.cons(pair, Value::Null);
                    self.heap.rplacd(last, tail)?;
                }
            }
        }
        Ok(value)
    }

    pub fn memb(&self, value: Value, list: Value) -> bool {
        self.heap.iter(list).any(|item| self.heap.eq(value, item))
    }

    pub fn not(&self, value: Value) -> Value {
        Value::Boolean(!self.heap.bool_val(value))
    }
}
