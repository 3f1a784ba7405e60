//! Interpolation and range helpers.

use procdraw_core::Value;
use procdraw_eval::{BuiltinFn, Error, Interpreter, UserData};

pub fn lerp(start: f64, stop: f64, t: f64) -> f64 {
    start + t * (stop - start)
}

/// Where `value` lies between `start` and `stop`, as a fraction.
pub fn norm(start: f64, stop: f64, value: f64) -> f64 {
    (value - start) / (stop - start)
}

/// Map `value` from the range `[start1, stop1]` onto `[start2, stop2]`.
pub fn map_range(start1: f64, stop1: f64, start2: f64, stop2: f64, value: f64) -> f64 {
    start2 + ((value - start1) * (stop2 - start2)) / (stop1 - start1)
}

/// Wrap `value` into `[low, high)`. Values below `low` wrap around from `high`.
pub fn wrap(low: f64, high: f64, value: f64) -> f64 {
    let width = high - low;
    let wrapped = value - ((value - low) / width).floor() * width;
    // A value just below `low` can round up to exactly `high`.
    if wrapped >= high {
        low
    } else {
        wrapped
    }
}

/// The first `N` arguments as numbers.
fn numeric_args<const N: usize>(interpreter: &Interpreter, args: Value) -> Result<[f64; N], Error> {
    let heap = interpreter.heap();
    let mut numbers = [0.0; N];
    let mut rest = args;
    for number in numbers.iter_mut() {
        *number = heap.num_val(heap.car(rest))?;
        rest = heap.cdr(rest);
    }
    Ok(numbers)
}

fn lisp_lerp(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let [start, stop, t] = numeric_args::<3>(interpreter, args)?;
    Ok(Value::Number(lerp(start, stop, t)))
}

fn lisp_norm(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let [start, stop, value] = numeric_args::<3>(interpreter, args)?;
    Ok(Value::Number(norm(start, stop, value)))
}

fn lisp_map_range(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let [start1, stop1, start2, stop2, value] = numeric_args::<5>(interpreter, args)?;
    Ok(Value::Number(map_range(start1, stop1, start2, stop2, value)))
}

fn lisp_wrap(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let [low, high, value] = numeric_args::<3>(interpreter, args)?;
    Ok(Value::Number(wrap(low, high, value)))
}

pub fn decls() -> Vec<(&'static str, BuiltinFn)> {
    vec![
        ("lerp", lisp_lerp as BuiltinFn),
        ("norm", lisp_norm as BuiltinFn),
        ("map-range", lisp_map_range as BuiltinFn),
        ("wrap", lisp_wrap as BuiltinFn),
    ]
}
