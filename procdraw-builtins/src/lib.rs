#![deny(unused_crate_dependencies)]

#[cfg(test)]
mod test;

mod arithmetic;
mod dict;
mod list;
pub mod math;
mod signals;

use procdraw_core::Value;
use procdraw_eval::{BuiltinFn, Interpreter};

/// Every builtin function, paired with the name it is bound to.
pub fn builtins() -> Vec<(&'static str, BuiltinFn)> {
    let mut decls = Vec::new();
    decls.extend(arithmetic::decls());
    decls.extend(list::decls());
    decls.extend(dict::decls());
    decls.extend(math::decls());
    decls.extend(signals::decls());
    decls
}

/// Bind the builtin functions and constants in `interpreter`'s global scope.
pub fn install(interpreter: &mut Interpreter) {
    for (name, fun) in builtins() {
        interpreter.set_global_builtin(name, fun, None);
    }
    signals::install(interpreter);
    interpreter.set_global("pi", Value::Number(std::f64::consts::PI));
}
