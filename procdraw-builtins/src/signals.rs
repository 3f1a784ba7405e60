//! Signals: dictionaries that produce a new value at most once per frame.
//!
//! A signal keeps its state in slots. `step` holds the function that advances
//! it, `val1` holds its current output and `inputs` maps slot names to the
//! sources connected to them with `=>`. `(sigval SIGNAL)`, also written
//! `$SIGNAL`, feeds the inputs, steps the signal and records it in the global
//! `stepped-signals` dictionary, so later reads in the same frame reuse `val1`.
//! `(clear-stepped-signals)` starts a new frame.

use crate::math::{lerp, wrap};
use procdraw_core::{AccessError, Type, Value};
use procdraw_eval::{BuiltinFn, Error, Interpreter, UserData};
use std::{f64::consts::PI, rc::Rc};

const STEPPED_SIGNALS: &str = "stepped-signals";

const TRI_WAVETABLE: [f64; 3] = [0.0, 1.0, 0.0];
const SIN_WAVETABLE_LEN: usize = 1024;

fn tri_entry(index: usize) -> f64 {
    TRI_WAVETABLE[index]
}

/// One cycle of a sine scaled into `[0, 1]`, sampled at `SIN_WAVETABLE_LEN` points.
fn sin_entry(index: usize) -> f64 {
    let x = index as f64 / (SIN_WAVETABLE_LEN - 1) as f64 * 2.0 * PI;
    (x.sin() + 1.0) / 2.0
}

fn slot(interpreter: &mut Interpreter, signal: Value, name: &str) -> Result<Value, Error> {
    let key = interpreter.symbol_ref(name);
    Ok(interpreter.heap().dict_get(key, signal, Value::Null)?)
}

fn number_slot(interpreter: &mut Interpreter, signal: Value, name: &str) -> Result<f64, Error> {
    let value = slot(interpreter, signal, name)?;
    Ok(interpreter.heap().num_val(value)?)
}

fn put_slot(
    interpreter: &mut Interpreter,
    signal: Value,
    name: &str,
    value: Value,
) -> Result<Value, Error> {
    let key = interpreter.symbol_ref(name);
    Ok(interpreter.heap_mut().dict_put(key, value, signal)?)
}

fn make_signal(interpreter: &mut Interpreter, step: Value) -> Result<Value, Error> {
    let signal = interpreter.heap_mut().make_dict();
    let inputs = interpreter.heap_mut().make_dict();
    put_slot(interpreter, signal, "inputs", inputs)?;
    put_slot(interpreter, signal, "step", step)?;
    Ok(signal)
}

fn stepped_signals(interpreter: &Interpreter) -> Value {
    interpreter.heap().global(STEPPED_SIGNALS)
}

/// Store the current value of each connected source in the slot it feeds.
///
/// A signal source is read with `sigval`, a function source is called with no
/// arguments, and anything else feeds `nil`. A mapping function, when given,
/// transforms the value first.
fn apply_inputs(interpreter: &mut Interpreter, signal: Value, env: Value) -> Result<(), Error> {
    let inputs = slot(interpreter, signal, "inputs")?;
    if inputs.is_null() {
        return Ok(());
    }
    let keys = interpreter.heap_mut().dict_keys(inputs)?;
    let keys: Vec<Value> = interpreter.heap().iter(keys).collect();
    for key in keys {
        let heap = interpreter.heap();
        let connection = heap.dict_get(key, inputs, Value::Null)?;
        let (source, map) = (heap.car(connection), heap.cdr(connection));

        let value = match source {
            Value::Dict(_) => sigval(interpreter, source, env)?,
            _ if interpreter.functionp(source) => interpreter.apply(source, Value::Null, env)?,
            _ => Value::Null,
        };
        let value = if map.is_null() {
            value
        } else {
            let args = interpreter.heap_mut().cons(value, Value::Null);
            interpreter.apply(map, args, env)?
        };
        interpreter.heap_mut().dict_put(key, value, signal)?;
    }
    Ok(())
}

/// The value of `signal` for this frame, stepping it first if it hasn't been
/// stepped since the last `clear-stepped-signals`.
fn sigval(interpreter: &mut Interpreter, signal: Value, env: Value) -> Result<Value, Error> {
    if !matches!(signal, Value::Dict(_)) {
        return Err(AccessError::new(Type::Dictionary, &signal).into());
    }
    let stepped = stepped_signals(interpreter);
    if interpreter.heap().dict_get(signal, stepped, Value::Null)?.is_null() {
        apply_inputs(interpreter, signal, env)?;
        let step = interpreter.symbol_ref("step");
        let args = interpreter.heap_mut().cons(signal, Value::Null);
        interpreter.apply(step, args, env)?;
        interpreter
            .heap_mut()
            .dict_put(signal, Value::Boolean(true), stepped)?;
    }
    slot(interpreter, signal, "val1")
}

fn lisp_make_signal(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let step = interpreter.heap().car(args);
    make_signal(interpreter, step)
}

/// `(=> SOURCE SIGNAL KEY [MAP])`
fn connect(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let heap = interpreter.heap();
    let (source, signal, key, map) = (
        heap.car(args),
        heap.cadr(args),
        heap.caddr(args),
        heap.cadddr(args),
    );
    let inputs = slot(interpreter, signal, "inputs")?;
    let connection = interpreter.heap_mut().cons(source, map);
    Ok(interpreter.heap_mut().dict_put(key, connection, inputs)?)
}

fn lisp_sigval(
    interpreter: &mut Interpreter,
    args: Value,
    env: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let signal = interpreter.heap().car(args);
    sigval(interpreter, signal, env)
}

fn clear_stepped_signals(
    interpreter: &mut Interpreter,
    _: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let stepped = stepped_signals(interpreter);
    Ok(interpreter.heap_mut().dict_clear(stepped)?)
}

/// `(get-slot SIGNAL KEY)`
fn get_slot(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let heap = interpreter.heap();
    Ok(heap.dict_get(heap.cadr(args), heap.car(args), Value::Null)?)
}

/// `(put-slot SIGNAL KEY VALUE)`
fn lisp_put_slot(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let heap = interpreter.heap();
    let (signal, key, value) = (heap.car(args), heap.cadr(args), heap.caddr(args));
    Ok(interpreter.heap_mut().dict_put(key, value, signal)?)
}

/// The step function an oscillator constructor was registered with.
fn step_function(data: &UserData) -> Value {
    data.as_ref()
        .and_then(|data| data.downcast_ref::<Value>())
        .copied()
        .unwrap_or(Value::Null)
}

fn step_saw(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let signal = interpreter.heap().car(args);
    let freq = number_slot(interpreter, signal, "freq")?;
    let val1 = number_slot(interpreter, signal, "val1")?;
    put_slot(interpreter, signal, "val1", Value::Number(wrap(0.0, 1.0, val1 + freq)))
}

fn saw(interpreter: &mut Interpreter, _: Value, _: Value, data: &UserData) -> Result<Value, Error> {
    let signal = make_signal(interpreter, step_function(data))?;
    put_slot(interpreter, signal, "freq", Value::Number(0.0))?;
    put_slot(interpreter, signal, "val1", Value::Number(0.0))?;
    Ok(signal)
}

/// Advance `index` through a wavetable of `len` entries by `freq` cycles and
/// interpolate the output between neighbouring entries.
fn step_wavetable(
    interpreter: &mut Interpreter,
    signal: Value,
    len: usize,
    entry: fn(usize) -> f64,
) -> Result<Value, Error> {
    let end = (len - 1) as f64;
    let freq = number_slot(interpreter, signal, "freq")?;
    let index = number_slot(interpreter, signal, "index")?;

    let mut index = wrap(0.0, end, index + freq * end);
    if !(0.0..end).contains(&index) {
        index = 0.0;
    }
    put_slot(interpreter, signal, "index", Value::Number(index))?;

    let before = index.floor();
    let at = before as usize;
    let val1 = lerp(entry(at), entry(at + 1), index - before);
    put_slot(interpreter, signal, "val1", Value::Number(val1))
}

fn step_tri(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let signal = interpreter.heap().car(args);
    step_wavetable(interpreter, signal, TRI_WAVETABLE.len(), tri_entry)
}

fn step_sin_osc(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let signal = interpreter.heap().car(args);
    step_wavetable(interpreter, signal, SIN_WAVETABLE_LEN, sin_entry)
}

fn wavetable_oscillator(
    interpreter: &mut Interpreter,
    _: Value,
    _: Value,
    data: &UserData,
) -> Result<Value, Error> {
    let signal = make_signal(interpreter, step_function(data))?;
    put_slot(interpreter, signal, "freq", Value::Number(0.0))?;
    put_slot(interpreter, signal, "index", Value::Number(0.0))?;
    put_slot(interpreter, signal, "val1", Value::Number(0.0))?;
    Ok(signal)
}

/// Switch between the `a` and `b` slots whenever `event` is true.
fn step_toggle(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let signal = interpreter.heap().car(args);
    let event = slot(interpreter, signal, "event")?;
    if !interpreter.heap().bool_val(event) {
        return slot(interpreter, signal, "val1");
    }
    let selected = slot(interpreter, signal, "selected")?;
    let a = interpreter.symbol_ref("a");
    let next = if interpreter.heap().eq(selected, a) {
        "b"
    } else {
        "a"
    };
    let next_symbol = interpreter.symbol_ref(next);
    put_slot(interpreter, signal, "selected", next_symbol)?;
    let out = slot(interpreter, signal, next)?;
    put_slot(interpreter, signal, "val1", out)
}

fn toggle(interpreter: &mut Interpreter, _: Value, _: Value, data: &UserData) -> Result<Value, Error> {
    let signal = make_signal(interpreter, step_function(data))?;
    put_slot(interpreter, signal, "event", Value::Null)?;
    put_slot(interpreter, signal, "a", Value::Number(0.0))?;
    put_slot(interpreter, signal, "b", Value::Number(1.0))?;
    let a = interpreter.symbol_ref("a");
    put_slot(interpreter, signal, "selected", a)?;
    put_slot(interpreter, signal, "val1", Value::Number(0.0))?;
    Ok(signal)
}

pub fn decls() -> Vec<(&'static str, BuiltinFn)> {
    vec![
        ("make-signal", lisp_make_signal as BuiltinFn),
        ("=>", connect as BuiltinFn),
        ("sigval", lisp_sigval as BuiltinFn),
        ("clear-stepped-signals", clear_stepped_signals as BuiltinFn),
        ("get-slot", get_slot as BuiltinFn),
        ("put-slot", lisp_put_slot as BuiltinFn),
    ]
}

/// Bind the oscillator constructors and create the `stepped-signals`
/// dictionary. Each constructor carries its step function as user data.
pub fn install(interpreter: &mut Interpreter) {
    let oscillators: [(&str, BuiltinFn, &str, BuiltinFn); 4] = [
        ("saw", saw as BuiltinFn, "saw-step", step_saw as BuiltinFn),
        ("tri", wavetable_oscillator as BuiltinFn, "tri-step", step_tri as BuiltinFn),
        (
            "sin-osc",
            wavetable_oscillator as BuiltinFn,
            "sin-osc-step",
            step_sin_osc as BuiltinFn,
        ),
        ("toggle", toggle as BuiltinFn, "toggle-step", step_toggle as BuiltinFn),
    ];
    for (name, constructor, step_name, step) in oscillators.iter() {
        let step = interpreter.make_builtin(step_name, *step, None);
        interpreter.set_global_builtin(name, *constructor, Some(Rc::new(step)));
    }

    let stepped = interpreter.heap_mut().make_dict();
    interpreter.set_global(STEPPED_SIGNALS, stepped);
}
