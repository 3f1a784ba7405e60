use procdraw_core::Value;
use procdraw_eval::{BuiltinFn, Error, Interpreter, UserData};

fn numbers(interpreter: &Interpreter, args: Value) -> Result<Vec<f64>, Error> {
    let heap = interpreter.heap();
    heap.iter(args)
        .map(|arg| heap.num_val(arg).map_err(Error::from))
        .collect()
}

/// Fold `rest` into `first`, or apply `single` when there is only one argument.
/// No arguments at all gives `identity`.
fn reduce(
    interpreter: &Interpreter,
    args: Value,
    identity: f64,
    single: fn(f64) -> f64,
    op: fn(f64, f64) -> f64,
) -> Result<Value, Error> {
    let numbers = numbers(interpreter, args)?;
    let result = match numbers.split_first() {
        None => identity,
        Some((first, [])) => single(*first),
        Some((first, rest)) => rest.iter().fold(*first, |acc, n| op(acc, *n)),
    };
    Ok(Value::Number(result))
}

fn sum(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    reduce(interpreter, args, 0.0, |n| n, |a, b| a + b)
}

fn difference(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    reduce(interpreter, args, 0.0, |n| -n, |a, b| a - b)
}

fn product(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    reduce(interpreter, args, 1.0, |n| n, |a, b| a * b)
}

fn quotient(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    reduce(interpreter, args, 1.0, |n| 1.0 / n, |a, b| a / b)
}

pub fn decls() -> Vec<(&'static str, BuiltinFn)> {
    vec![
        ("+", sum as BuiltinFn),
        ("-", difference as BuiltinFn),
        ("*", product as BuiltinFn),
        ("/", quotient as BuiltinFn),
    ]
}
