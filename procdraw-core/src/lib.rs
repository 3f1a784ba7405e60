#![deny(unused_crate_dependencies)]


pub mod pretty;
pub mod printer;

use fnv::{FnvHashMap, FnvHasher};
use std::{
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

macro_rules! handle {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

handle!(SymbolId);
handle!(ConsId);
handle!(StringId);
handle!(DictId);
handle!(BuiltinId);

impl BuiltinId {
    /// Builtins live in the interpreter's function table, so their handles are
    /// created there rather than by the heap.
    pub fn from_index(index: usize) -> Self {
        BuiltinId(index)
    }
}

/// A Lisp value.
///
/// Everything except numbers, booleans and the singletons is a handle into a
/// [`Heap`]. Handles are only meaningful to the heap that created them.
#[derive(Debug, Clone, Copy)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    Symbol(SymbolId),
    Cons(ConsId),
    String(StringId),
    Builtin(BuiltinId),
    /// A closure: a cons cell holding `(params . body)`.
    Expr(ConsId),
    Dict(DictId),
    Eof,
}

impl Value {
    pub fn type_of(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Boolean(_) => Type::Boolean,
            Value::Number(_) => Type::Number,
            Value::Symbol(_) => Type::Symbol,
            Value::Cons(_) => Type::Cons,
            Value::String(_) => Type::String,
            Value::Builtin(_) => Type::Builtin,
            Value::Expr(_) => Type::Expr,
            Value::Dict(_) => Type::Dictionary,
            Value::Eof => Type::Eof,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_atom(&self) -> bool {
        !matches!(self, Value::Cons(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Boolean,
    Number,
    Symbol,
    Cons,
    String,
    Builtin,
    Expr,
    Dictionary,
    Eof,
}

impl Type {
    pub fn render(&self) -> &'static str {
        match self {
            Type::Null => "nil",
            Type::Boolean => "boolean",
            Type::Number => "number",
            Type::Symbol => "symbol",
            Type::Cons => "cons",
            Type::String => "string",
            Type::Builtin => "builtin",
            Type::Expr => "closure",
            Type::Dictionary => "dictionary",
            Type::Eof => "eof",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

/// A value was unwrapped as the wrong kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessError {
    pub expected: Type,
    pub actual: Type,
}

impl AccessError {
    pub fn new(expected: Type, actual: &Value) -> Self {
        AccessError {
            expected,
            actual: actual.type_of(),
        }
    }

    pub fn message(&self) -> String {
        format!("expected {}, got {}", self.expected, self.actual)
    }
}

struct Symbol {
    name: Rc<str>,
    value: Value,
}

struct Cons {
    car: Value,
    cdr: Value,
}

struct LispString {
    text: Rc<str>,
    hash: u64,
}

fn hash_str(text: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Dictionary keys follow `eq`: numbers by value, strings by content, and
/// everything else by identity.
#[derive(PartialEq, Eq, Hash)]
enum DictKey {
    Null,
    Boolean(bool),
    Number(u64),
    Symbol(SymbolId),
    Cons(ConsId),
    String(Rc<str>),
    Builtin(BuiltinId),
    Expr(ConsId),
    Dict(DictId),
    Eof,
}

/// Entries keep the original key so that `keys` can hand it back.
type Dictionary = FnvHashMap<DictKey, (Value, Value)>;

/// Storage for every non-immediate value owned by one interpreter.
///
/// Nothing is ever freed: cells, strings and dictionaries live as long as the heap.
/// Symbols are interned, so each distinct name is allocated once and carries a
/// global value cell that starts out as `nil`.
#[derive(Default)]
pub struct Heap {
    symbols: Vec<Symbol>,
    symbol_table: FnvHashMap<Rc<str>, SymbolId>,
    conses: Vec<Cons>,
    strings: Vec<LispString>,
    dicts: Vec<Dictionary>,
}

impl Heap {
    pub fn new() -> Self {
        Heap::default()
    }

    pub fn intern(&mut self, name: &str) -> SymbolId {
        match self.symbol_table.get(name) {
            Some(id) => *id,
            None => {
                let id = SymbolId(self.symbols.len());
                let name: Rc<str> = Rc::from(name);
                self.symbols.push(Symbol {
                    name: name.clone(),
                    value: Value::Null,
                });
                self.symbol_table.insert(name, id);
                id
            }
        }
    }

    /// The symbol called `name`, created on first use.
    pub fn symbol_ref(&mut self, name: &str) -> Value {
        Value::Symbol(self.intern(name))
    }

    /// Look up a symbol without creating it.
    pub fn find_symbol(&self, name: &str) -> Option<SymbolId> {
        self.symbol_table.get(name).copied()
    }

    pub fn name_of(&self, symbol: SymbolId) -> &str {
        &self.symbols[symbol.0].name
    }

    pub fn symbol_name(&self, value: Value) -> Result<&str, AccessError> {
        match value {
            Value::Symbol(symbol) => Ok(self.name_of(symbol)),
            _ => Err(AccessError::new(Type::Symbol, &value)),
        }
    }

    pub fn symbol_value(&self, symbol: SymbolId) -> Value {
        self.symbols[symbol.0].value
    }

    pub fn set_symbol_value(&mut self, symbol: SymbolId, value: Value) {
        self.symbols[symbol.0].value = value
    }

    /// The global value of `name`, or `nil` if no such symbol exists.
    pub fn global(&self, name: &str) -> Value {
        self.find_symbol(name)
            .map_or(Value::Null, |symbol| self.symbol_value(symbol))
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn cons(&mut self, car: Value, cdr: Value) -> Value {
        Value::Cons(self.alloc_cons(car, cdr))
    }

    fn alloc_cons(&mut self, car: Value, cdr: Value) -> ConsId {
        let id = ConsId(self.conses.len());
        self.conses.push(Cons { car, cdr });
        id
    }

    /// The car of a cons; `nil` for anything else.
    pub fn car(&self, value: Value) -> Value {
        match value {
            Value::Cons(id) => self.conses[id.0].car,
            _ => Value::Null,
        }
    }

    /// The cdr of a cons; `nil` for anything else.
    pub fn cdr(&self, value: Value) -> Value {
        match value {
            Value::Cons(id) => self.conses[id.0].cdr,
            _ => Value::Null,
        }
    }

    /// Apply a chain of car/cdr steps named by the middle letters of a
    /// `c[ad]+r` accessor, so `cxr("add", x)` is `(caddr x)`.
    ///
    /// Steps are applied right to left. Letters other than `a` and `d` are ignored.
    pub fn cxr(&self, path: &str, value: Value) -> Value {
        path.chars().rev().fold(value, |value, step| match step {
            'a' => self.car(value),
            'd' => self.cdr(value),
            _ => value,
        })
    }

    pub fn caar(&self, value: Value) -> Value {
        self.car(self.car(value))
    }

    pub fn cadr(&self, value: Value) -> Value {
        self.car(self.cdr(value))
    }

    pub fn cddr(&self, value: Value) -> Value {
        self.cdr(self.cdr(value))
    }

    pub fn caddr(&self, value: Value) -> Value {
        self.car(self.cddr(value))
    }

    pub fn cadddr(&self, value: Value) -> Value {
        self.cadr(self.cddr(value))
    }

    /// Overwrite the car of a cons, returning the cons.
    pub fn rplaca(&mut self, cons: Value, value: Value) -> Result<Value, AccessError> {
        match cons {
            Value::Cons(id) => {
                self.conses[id.0].car = value;
                Ok(cons)
            }
            _ => Err(AccessError::new(Type::Cons, &cons)),
        }
    }

    /// Overwrite the cdr of a cons, returning the cons.
    pub fn rplacd(&mut self, cons: Value, value: Value) -> Result<Value, AccessError> {
        match cons {
            Value::Cons(id) => {
                self.conses[id.0].cdr = value;
                Ok(cons)
            }
            _ => Err(AccessError::new(Type::Cons, &cons)),
        }
    }

    pub fn make_list<I>(&mut self, items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        let items: Vec<Value> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Value::Null, |tail, item| self.cons(item, tail))
    }

    /// Iterate over the cars of a list. Stops at the first cdr that isn't a cons,
    /// so the tail of an improper list is skipped.
    pub fn iter(&self, list: Value) -> ListIter {
        ListIter { heap: self, list }
    }

    pub fn make_string(&mut self, text: &str) -> Value {
        let id = StringId(self.strings.len());
        self.strings.push(LispString {
            text: Rc::from(text),
            hash: hash_str(text),
        });
        Value::String(id)
    }

    pub fn string_val(&self, value: Value) -> Result<&str, AccessError> {
        match value {
            Value::String(id) => Ok(&self.strings[id.0].text),
            _ => Err(AccessError::new(Type::String, &value)),
        }
    }

    pub fn num_val(&self, value: Value) -> Result<f64, AccessError> {
        match value {
            Value::Number(n) => Ok(n),
            _ => Err(AccessError::new(Type::Number, &value)),
        }
    }

    /// Truthiness: `false` and `nil` are false, everything else is true.
    pub fn bool_val(&self, value: Value) -> bool {
        match value {
            Value::Boolean(b) => b,
            Value::Null => false,
            _ => true,
        }
    }

    /// Wrap a parameter list and a single body form as a closure.
    pub fn make_expr(&mut self, params: Value, body: Value) -> Value {
        Value::Expr(self.alloc_cons(params, body))
    }

    /// The `(params, body)` of a closure.
    pub fn expr_parts(&self, value: Value) -> Result<(Value, Value), AccessError> {
        match value {
            Value::Expr(id) => {
                let cell = &self.conses[id.0];
                Ok((cell.car, cell.cdr))
            }
            _ => Err(AccessError::new(Type::Expr, &value)),
        }
    }

    /// The language's `eq`: numbers and strings compare by value, everything else
    /// by identity.
    pub fn eq(&self, x: Value, y: Value) -> bool {
        match (x, y) {
            (Value::Null, Value::Null) => true,
            (Value::Eof, Value::Eof) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::String(a), Value::String(b)) => {
                let (a, b) = (&self.strings[a.0], &self.strings[b.0]);
                a.hash == b.hash && a.text == b.text
            }
            (Value::Cons(a), Value::Cons(b)) => a == b,
            (Value::Expr(a), Value::Expr(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            _ => false,
        }
    }

    fn dict_key(&self, value: Value) -> DictKey {
        match value {
            Value::Null => DictKey::Null,
            Value::Boolean(b) => DictKey::Boolean(b),
            // 0.0 and -0.0 are eq, so they must share a key
            Value::Number(n) if n == 0.0 => DictKey::Number(0f64.to_bits()),
            Value::Number(n) => DictKey::Number(n.to_bits()),
            Value::Symbol(id) => DictKey::Symbol(id),
            Value::Cons(id) => DictKey::Cons(id),
            Value::String(id) => DictKey::String(self.strings[id.0].text.clone()),
            Value::Builtin(id) => DictKey::Builtin(id),
            Value::Expr(id) => DictKey::Expr(id),
            Value::Dict(id) => DictKey::Dict(id),
            Value::Eof => DictKey::Eof,
        }
    }

    fn dict_mut(&mut self, dict: Value) -> Result<&mut Dictionary, AccessError> {
        match dict {
            Value::Dict(id) => Ok(&mut self.dicts[id.0]),
            _ => Err(AccessError::new(Type::Dictionary, &dict)),
        }
    }

    fn dict_ref(&self, dict: Value) -> Result<&Dictionary, AccessError> {
        match dict {
            Value::Dict(id) => Ok(&self.dicts[id.0]),
            _ => Err(AccessError::new(Type::Dictionary, &dict)),
        }
    }

    pub fn make_dict(&mut self) -> Value {
        let id = DictId(self.dicts.len());
        self.dicts.push(Dictionary::default());
        Value::Dict(id)
    }

    pub fn dict_get(&self, key: Value, dict: Value, not_found: Value) -> Result<Value, AccessError> {
        let key = self.dict_key(key);
        Ok(self
            .dict_ref(dict)?
            .get(&key)
            .map_or(not_found, |(_, value)| *value))
    }

    /// Store `value` under `key`, returning `value`.
    pub fn dict_put(&mut self, key: Value, value: Value, dict: Value) -> Result<Value, AccessError> {
        let hashed = self.dict_key(key);
        self.dict_mut(dict)?.insert(hashed, (key, value));
        Ok(value)
    }

    /// The keys of a dictionary as a fresh list, in no particular order.
    pub fn dict_keys(&mut self, dict: Value) -> Result<Value, AccessError> {
        let keys: Vec<Value> = self.dict_ref(dict)?.values().map(|(key, _)| *key).collect();
        Ok(self.make_list(keys))
    }

    /// Remove every entry, returning the dictionary.
    pub fn dict_clear(&mut self, dict: Value) -> Result<Value, AccessError> {
        self.dict_mut(dict)?.clear();
        Ok(dict)
    }

    pub fn dict_len(&self, dict: Value) -> Result<usize, AccessError> {
        Ok(self.dict_ref(dict)?.len())
    }
}

pub struct ListIter<'heap> {
    heap: &'heap Heap,
    list: Value,
}

impl<'heap> Iterator for ListIter<'heap> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self.list {
            Value::Cons(id) => {
                let cell = &self.heap.conses[id.0];
                self.list = cell.cdr;
                Some(cell.car)
            }
            _ => None,
        }
    }
}
