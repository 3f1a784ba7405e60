use procdraw_core::Value;
use procdraw_eval::{BuiltinFn, Error, Interpreter, UserData};

fn make_dict(
    interpreter: &mut Interpreter,
    _: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    Ok(interpreter.heap_mut().make_dict())
}

/// `(get DICT KEY)`, `nil` when the key is absent.
fn get(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let heap = interpreter.heap();
    let (dict, key) = (heap.car(args), heap.cadr(args));
    Ok(heap.dict_get(key, dict, Value::Null)?)
}

/// `(put DICT KEY VALUE)`
fn put(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let heap = interpreter.heap();
    let (dict, key, value) = (heap.car(args), heap.cadr(args), heap.caddr(args));
    Ok(interpreter.heap_mut().dict_put(key, value, dict)?)
}

fn keys(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let dict = interpreter.heap().car(args);
    Ok(interpreter.heap_mut().dict_keys(dict)?)
}

fn clear(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let dict = interpreter.heap().car(args);
    Ok(interpreter.heap_mut().dict_clear(dict)?)
}

pub fn decls() -> Vec<(&'static str, BuiltinFn)> {
    vec![
        ("make-dict", make_dict as BuiltinFn),
        ("get", get as BuiltinFn),
        ("put", put as BuiltinFn),
        ("keys", keys as BuiltinFn),
        ("clear", clear as BuiltinFn),
    ]
}
