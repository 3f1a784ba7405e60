use paste::paste;
use procdraw_core::Value;
use procdraw_eval::{BuiltinFn, Error, Interpreter, UserData};

/// Defines one accessor per `a`/`d` path, named `c<path>r`, together with
/// `cxr_decls` listing them.
macro_rules! cxr {
    ($($path:ident),*) => {
        paste! {
            $(
                fn [<c $path r>](
                    interpreter: &mut Interpreter,
                    args: Value,
                    _: Value,
                    _: &UserData,
                ) -> Result<Value, Error> {
                    let heap = interpreter.heap();
                    Ok(heap.cxr(stringify!($path), heap.car(args)))
                }
            )*

            fn cxr_decls() -> Vec<(&'static str, BuiltinFn)> {
                vec![$((concat!("c", stringify!($path), "r"), [<c $path r>] as BuiltinFn)),*]
            }
        }
    };
}

cxr!(a, d, aa, ad, da, dd, add, ddd, addd, dddd, adddd);

fn cons(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let (car, cdr) = (interpreter.heap().car(args), interpreter.heap().cadr(args));
    Ok(interpreter.heap_mut().cons(car, cdr))
}

fn eq(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let heap = interpreter.heap();
    Ok(Value::Boolean(heap.eq(heap.car(args), heap.cadr(args))))
}

fn not(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    Ok(interpreter.not(interpreter.heap().car(args)))
}

fn memb(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let heap = interpreter.heap();
    let (value, list) = (heap.car(args), heap.cadr(args));
    Ok(Value::Boolean(interpreter.memb(value, list)))
}

fn functionp(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    Ok(Value::Boolean(
        interpreter.functionp(interpreter.heap().car(args)),
    ))
}

/// `(apply FUN ARGS [ENV])`. Without `ENV` the caller's environment is used.
fn apply(interpreter: &mut Interpreter, args: Value, env: Value, _: &UserData) -> Result<Value, Error> {
    let heap = interpreter.heap();
    let (fun, fun_args) = (heap.car(args), heap.cadr(args));
    let env = match heap.cddr(args) {
        Value::Cons(_) => heap.caddr(args),
        _ => env,
    };
    interpreter.apply(fun, fun_args, env)
}

fn assoc(interpreter: &mut Interpreter, args: Value, _: Value, _: &UserData) -> Result<Value, Error> {
    let heap = interpreter.heap();
    Ok(interpreter.assoc(heap.car(args), heap.cadr(args)))
}

/// `(putassoc KEY VALUE ALIST)`
fn putassoc(
    interpreter: &mut Interpreter,
    args: Value,
    _: Value,
    _: &UserData,
) -> Result<Value, Error> {
    let heap = interpreter.heap();
    let (key, value, alist) = (heap.car(args), heap.cadr(args), heap.caddr(args));
    interpreter.putassoc(key, value, alist)
}

pub fn decls() -> Vec<(&'static str, BuiltinFn)> {
    let mut decls = cxr_decls();
    decls.extend(vec![
        ("cons", cons as BuiltinFn),
        ("eq", eq as BuiltinFn),
        ("not", not as BuiltinFn),
        ("memb", memb as BuiltinFn),
        ("functionp", functionp as BuiltinFn),
        ("apply", apply as BuiltinFn),
        ("assoc", assoc as BuiltinFn),
        ("putassoc", putassoc as BuiltinFn),
    ]);
    decls
}
