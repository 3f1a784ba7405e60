use crate::{install, math};
use procdraw_core::{AccessError, Type, Value};
use procdraw_eval::{Error, Interpreter};
use quickcheck_macros::quickcheck;

fn interpreter() -> Interpreter {
    let mut interpreter = Interpreter::new();
    install(&mut interpreter);
    interpreter
}

fn eval_print(interpreter: &mut Interpreter, expr: &str) -> Result<String, Error> {
    let expr = interpreter.read(expr).unwrap();
    let value = interpreter.eval(expr)?;
    Ok(interpreter.print(value))
}

fn eval_number(interpreter: &mut Interpreter, expr: &str) -> f64 {
    let expr = interpreter.read(expr).unwrap();
    let value = interpreter.eval(expr).unwrap();
    interpreter.heap().num_val(value).unwrap()
}

/// Run each example through read, eval and print on one fresh interpreter.
fn check_function(name: &str, examples: &[(&str, &str)]) {
    let mut interpreter = interpreter();
    for (expr, expected) in examples {
        pretty_assertions::assert_eq!(
            eval_print(&mut interpreter, expr),
            Ok(String::from(*expected)),
            "{}: {}",
            name,
            expr
        );
    }
}

fn check_numbers(name: &str, examples: &[(&str, f64)]) {
    let mut interpreter = interpreter();
    for (expr, expected) in examples {
        pretty_assertions::assert_eq!(
            eval_number(&mut interpreter, expr),
            *expected,
            "{}: {}",
            name,
            expr
        );
    }
}

#[test]
fn sum() {
    check_function(
        "sum",
        &[
            ("(+)", "0"),
            ("(+ 1)", "1"),
            ("(+ 1 2)", "3"),
            ("(+ 1 2 3)", "6"),
            ("(+ 1 (+ 2 3))", "6"),
        ],
    )
}

#[test]
fn sum_with_subexpressions() {
    let mut interpreter = interpreter();
    let (a, b, c) = (
        interpreter.symbol_ref("a"),
        interpreter.symbol_ref("b"),
        interpreter.symbol_ref("c"),
    );
    let env = interpreter.bind(a, Value::Number(1.0), Value::Null);
    let env = interpreter.bind(b, Value::Number(2.0), env);
    let env = interpreter.bind(c, Value::Number(4.0), env);

    let expr = interpreter.read("(+ (+ a b 8) 16 c)").unwrap();
    let value = interpreter.eval_in(expr, env).unwrap();
    pretty_assertions::assert_eq!(interpreter.print(value), "31");
}

#[test]
fn difference() {
    check_function(
        "difference",
        &[
            ("(-)", "0"),
            ("(- 1)", "-1"),
            ("(- 10 3)", "7"),
            ("(- 10 3 2)", "5"),
        ],
    )
}

#[test]
fn product() {
    check_function(
        "product",
        &[("(*)", "1"), ("(* 4)", "4"), ("(* 2 3 4)", "24")],
    )
}

#[test]
fn quotient() {
    check_function(
        "quotient",
        &[
            ("(/)", "1"),
            ("(/ 2)", "0.5"),
            ("(/ 0)", "inf"),
            ("(/ 1 0)", "inf"),
            ("(/ 12 2 3)", "2"),
            ("(/ 1 3)", "0.333333"),
        ],
    )
}

#[test]
fn arithmetic_rejects_non_numbers() {
    let mut interpreter = interpreter();
    pretty_assertions::assert_eq!(
        eval_print(&mut interpreter, "(* 2 \"3\")"),
        Err(Error::Access(AccessError {
            expected: Type::Number,
            actual: Type::String
        }))
    );
}

#[test]
fn cons() {
    check_function(
        "cons",
        &[
            ("(cons 1 2)", "(1 . 2)"),
            ("(cons 1 nil)", "(1)"),
            ("(cons 1 '(2 3))", "(1 2 3)"),
            ("(cons)", "(nil)"),
        ],
    )
}

#[test]
fn car_cdr() {
    check_function(
        "car",
        &[
            ("(car nil)", "nil"),
            ("(car '(1 . 2))", "1"),
            ("(car '(a b))", "a"),
            ("(car 5)", "nil"),
        ],
    );
    check_function(
        "cdr",
        &[
            ("(cdr nil)", "nil"),
            ("(cdr '(1 . 2))", "2"),
            ("(cdr '(a b))", "(b)"),
        ],
    );
}

#[test]
fn cxr() {
    check_function(
        "cxr",
        &[
            ("(caar '((1 2) 3))", "1"),
            ("(cadr '(1 2 3))", "2"),
            ("(cdar '((1 2) 3))", "(2)"),
            ("(cddr '(1 2 3))", "(3)"),
            ("(caddr '(1 2 3))", "3"),
            ("(cdddr '(1 2 3 4))", "(4)"),
            ("(cadddr '(1 2 3 4))", "4"),
            ("(cddddr '(1 2 3 4 5))", "(5)"),
            ("(caddddr '(1 2 3 4 5))", "5"),
            ("(caddddr nil)", "nil"),
        ],
    )
}

#[test]
fn eq() {
    check_function(
        "eq",
        &[
            ("(eq 1 1)", "true"),
            ("(eq 1 2)", "false"),
            ("(eq 'a 'a)", "true"),
            ("(eq 'a 'b)", "false"),
            ("(eq \"ab\" \"ab\")", "true"),
            ("(eq \"ab\" \"ba\")", "false"),
            ("(eq '(1) '(1))", "false"),
            ("((lambda (x) (eq x x)) '(1))", "true"),
            ("(eq nil nil)", "true"),
            ("(eq true true)", "true"),
            ("(eq true false)", "false"),
            ("(eq nil false)", "false"),
        ],
    )
}

#[test]
fn not() {
    check_function(
        "not",
        &[
            ("(not true)", "false"),
            ("(not false)", "true"),
            ("(not nil)", "true"),
            ("(not 0)", "false"),
            ("(not 1)", "false"),
            ("(not 'hello)", "false"),
        ],
    )
}

#[test]
fn functionp() {
    check_function(
        "functionp",
        &[
            ("(functionp car)", "true"),
            ("(functionp (lambda (x) x))", "true"),
            ("(functionp '(lambda (x) x))", "true"),
            ("(functionp 1)", "false"),
            ("(functionp 'car)", "false"),
            ("(functionp '(1 2))", "false"),
        ],
    )
}

#[test]
fn memb() {
    check_function(
        "memb",
        &[
            ("(memb 1 '(1 2))", "true"),
            ("(memb 3 '(1 2))", "false"),
            ("(memb 'b '(a b c))", "true"),
            ("(memb 'a nil)", "false"),
            ("(memb \"x\" '(\"x\"))", "true"),
        ],
    )
}

#[test]
fn apply() {
    check_function(
        "apply",
        &[
            ("(apply (lambda () (+ 1 2)) (quote ()))", "3"),
            ("(apply (lambda (n) (+ n 1)) (quote (1)))", "2"),
            ("(apply (lambda (m n) (+ m n 10)) (quote (30 2)))", "42"),
            ("(apply + '(1 2 3))", "6"),
            ("(apply car '((1 2)) '((x . 5)))", "1"),
        ],
    )
}

#[test]
fn assoc() {
    check_function(
        "assoc",
        &[
            ("(assoc 'a '())", "nil"),
            ("(assoc 'a '((b . 1)))", "nil"),
            ("(assoc 'a '((b . 1) (c . 2)))", "nil"),
            ("(assoc 'a '((a . 1)))", "(a . 1)"),
            ("(assoc 'a '((b . 1) (a . 2)))", "(a . 2)"),
            ("(assoc 'a '((b . 1) (a . 2) (a . 3)))", "(a . 2)"),
            ("(assoc 'b '((a . 10) (b . 11) (c . 12)))", "(b . 11)"),
            ("(assoc 'd '((a . 10) (b . 11) (c . 12)))", "nil"),
        ],
    )
}

#[test]
fn putassoc() {
    check_function(
        "putassoc",
        &[
            ("(setq alist '((a . 1)))", "((a . 1))"),
            ("(putassoc 'a 2 alist)", "2"),
            ("alist", "((a . 2))"),
            ("(setq alist '((b . 1) (a . 2) (a . 3)))", "((b . 1) (a . 2) (a . 3))"),
            ("(putassoc 'a 4 alist)", "4"),
            ("alist", "((b . 1) (a . 4) (a . 3))"),
            ("(setq alist '((b . 1)))", "((b . 1))"),
            ("(putassoc 'a 2 alist)", "2"),
            ("alist", "((b . 1) (a . 2))"),
            ("(putassoc 'c 3 alist)", "3"),
            ("alist", "((b . 1) (a . 2) (c . 3))"),
        ],
    )
}

#[test]
fn make_dict() {
    check_function("make-dict", &[("(make-dict)", "<Dictionary>")])
}

#[test]
fn get() {
    check_function(
        "get",
        &[
            ("(get (make-dict) 'a)", "nil"),
            ("(setq d (make-dict))", "<Dictionary>"),
            ("(put d 'a 1)", "1"),
            ("(get d 'a)", "1"),
            ("(get d 'b)", "nil"),
            ("(put d \"key\" 2)", "2"),
            ("(get d \"key\")", "2"),
            ("(put d 3 'three)", "three"),
            ("(get d (+ 1 2))", "three"),
        ],
    )
}

#[test]
fn put() {
    check_function(
        "put",
        &[
            ("(put (make-dict) 'a 42)", "42"),
            ("(setq d (make-dict))", "<Dictionary>"),
            ("(put d 'a 1)", "1"),
            ("(put d 'a 2)", "2"),
            ("(get d 'a)", "2"),
        ],
    )
}

#[test]
fn keys() {
    check_function(
        "keys",
        &[
            ("(keys (make-dict))", "nil"),
            ("(setq d (make-dict))", "<Dictionary>"),
            ("(put d 'a 1)", "1"),
            ("(keys d)", "(a)"),
            ("(put d 'b 2)", "2"),
            ("(put d 'a 3)", "3"),
            ("(memb 'a (keys d))", "true"),
            ("(memb 'b (keys d))", "true"),
            ("(cddr (keys d))", "nil"),
        ],
    )
}

#[test]
fn clear() {
    check_function(
        "clear",
        &[
            ("(setq d (make-dict))", "<Dictionary>"),
            ("(put d 'a 1)", "1"),
            ("(clear d)", "<Dictionary>"),
            ("(keys d)", "nil"),
            ("(get d 'a)", "nil"),
        ],
    )
}

#[test]
fn dict_rejects_non_dict() {
    let mut interpreter = interpreter();
    pretty_assertions::assert_eq!(
        eval_print(&mut interpreter, "(get 1 'a)"),
        Err(Error::Access(AccessError {
            expected: Type::Dictionary,
            actual: Type::Number
        }))
    );
    pretty_assertions::assert_eq!(
        eval_print(&mut interpreter, "(keys '(a))").map_err(|err| err.message()),
        Err(String::from("expected dictionary, got cons"))
    );
}

#[test]
fn pi() {
    check_function("pi", &[("pi", "3.14159")])
}

#[test]
fn lerp() {
    check_numbers(
        "lerp",
        &[
            ("(lerp 0 8 0)", 0.0),
            ("(lerp 0 8 (/ 4))", 2.0),
            ("(lerp 0 8 (/ 2))", 4.0),
            ("(lerp 0 8 (/ 3 4))", 6.0),
            ("(lerp 0 8 1)", 8.0),
            ("(lerp 4 -4 0)", 4.0),
            ("(lerp 4 -4 (/ 4))", 2.0),
            ("(lerp 4 -4 (/ 2))", 0.0),
            ("(lerp 4 -4 (/ 3 4))", -2.0),
            ("(lerp 4 -4 1)", -4.0),
        ],
    )
}

#[test]
fn map_range() {
    check_numbers(
        "map-range",
        &[
            ("(map-range 0 10 -1 0 0)", -1.0),
            ("(map-range 0 10 -1 0 (/ 10 4))", -0.75),
            ("(map-range 0 10 -1 0 5)", -0.5),
            ("(map-range 0 10 -1 0 (/ 30 4))", -0.25),
            ("(map-range 0 10 -1 0 10)", 0.0),
            ("(map-range 0 10 1 -1 0)", 1.0),
            ("(map-range 0 10 1 -1 (/ 10 4))", 0.5),
            ("(map-range 0 10 1 -1 5)", 0.0),
            ("(map-range 0 10 1 -1 (/ 30 4))", -0.5),
            ("(map-range 0 10 1 -1 10)", -1.0),
        ],
    )
}

#[test]
fn norm() {
    check_numbers(
        "norm",
        &[
            ("(norm 0 8 0)", 0.0),
            ("(norm 0 8 2)", 0.25),
            ("(norm 0 8 4)", 0.5),
            ("(norm 0 8 6)", 0.75),
            ("(norm 0 8 8)", 1.0),
            ("(norm 4 -4 4)", 0.0),
            ("(norm 4 -4 2)", 0.25),
            ("(norm 4 -4 0)", 0.5),
            ("(norm 4 -4 -2)", 0.75),
            ("(norm 4 -4 -4)", 1.0),
        ],
    )
}

#[test]
fn wrap() {
    check_numbers(
        "wrap",
        &[
            ("(wrap 0 10 0)", 0.0),
            ("(wrap 0 10 10)", 0.0),
            ("(wrap 0 10 20)", 0.0),
            ("(wrap 0 10 -10)", 0.0),
            ("(wrap 0 10 8)", 8.0),
            ("(wrap 0 10 12)", 2.0),
            ("(wrap 0 10 23)", 3.0),
            ("(wrap 0 10 -2)", 8.0),
            ("(wrap 0 10 -13)", 7.0),
            ("(wrap -20 -10 -20)", -20.0),
            ("(wrap -20 -10 -10)", -20.0),
            ("(wrap -20 -10 0)", -20.0),
            ("(wrap -20 -10 -30)", -20.0),
            ("(wrap -20 -10 -12)", -12.0),
            ("(wrap -20 -10 -8)", -18.0),
            ("(wrap -20 -10 13)", -17.0),
            ("(wrap -20 -10 -22)", -12.0),
            ("(wrap -20 -10 -33)", -13.0),
        ],
    )
}

#[test]
fn wrap_negative_inputs() {
    pretty_assertions::assert_eq!(math::wrap(-20.0, -10.0, -33.0), -13.0);
    pretty_assertions::assert_eq!(math::wrap(0.0, 10.0, -13.0), 7.0);
}

#[test]
fn wrap_tiny_negative_stays_below_high() {
    pretty_assertions::assert_eq!(math::wrap(0.0, 10.0, -1e-17), 0.0);
    check_numbers("wrap", &[("(wrap 0 1 (/ -1 100000000000000000000))", 0.0)]);
}

#[quickcheck]
fn prop_wrap_in_range(low: i16, width: u8, value: i32) -> bool {
    let low = f64::from(low);
    let high = low + f64::from(width.max(1));
    let wrapped = math::wrap(low, high, f64::from(value));
    low <= wrapped && wrapped < high
}

#[quickcheck]
fn prop_sum_matches(numbers: Vec<i16>) -> bool {
    let mut interpreter = interpreter();
    let expr = format!(
        "(+ {})",
        numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    let expected: i64 = numbers.iter().map(|n| i64::from(*n)).sum();
    eval_number(&mut interpreter, &expr) == expected as f64
}

#[test]
fn recursion() {
    let mut interpreter = interpreter();
    let expr = "(progn
                  (setq f (lambda (n)
                    (if (eq n 0)
                      1
                      (* n (f (- n 1))))))
                  (f 5))";
    pretty_assertions::assert_eq!(eval_print(&mut interpreter, expr), Ok(String::from("120")));

    check_function(
        "def",
        &[
            (
                "(def fact (n) (if (eq n 0) 1 (* n (fact (- n 1)))))",
                "(lambda (n) (if (eq n 0) 1 (* n (fact (- n 1)))))",
            ),
            ("(fact 10)", "3.6288e+06"),
        ],
    );
}

#[test]
fn setq_in_lambda_modifies_environment() {
    check_function(
        "setq",
        &[
            ("(setq a 1)", "1"),
            (
                "(setq f (lambda (a) (progn (setq b a) (setq a 3) (setq c a))))",
                "(lambda (a) (progn (setq b a) (setq a 3) (setq c a)))",
            ),
            ("(f 2)", "3"),
            ("a", "1"),
            ("b", "2"),
            ("c", "3"),
        ],
    )
}

#[test]
fn if_with_environment() {
    let mut interpreter = interpreter();
    let (a, b) = (interpreter.symbol_ref("a"), interpreter.symbol_ref("b"));
    let env = interpreter.bind(a, Value::Number(1.0), Value::Null);
    let env = interpreter.bind(b, Value::Number(2.0), env);

    let cases = [
        ("(if (eq 1 2) (setq a 10))", "nil"),
        ("a", "1"),
        ("(if (eq 1 2) (setq a 10) (setq b 20))", "20"),
        ("b", "20"),
        ("(if (eq 42 42) (setq a 10))", "10"),
        ("a", "10"),
    ];
    for (expr, expected) in cases.iter() {
        let expr = interpreter.read(expr).unwrap();
        let value = interpreter.eval_in(expr, env).unwrap();
        pretty_assertions::assert_eq!(interpreter.print(value), *expected);
    }
    assert!(interpreter.heap().global("a").is_null());
}

#[test]
fn builtin_with_user_data() {
    fn add_data(
        interpreter: &mut Interpreter,
        args: Value,
        _: Value,
        data: &procdraw_eval::UserData,
    ) -> Result<Value, Error> {
        let offset = data
            .as_ref()
            .and_then(|data| data.downcast_ref::<i32>())
            .copied()
            .unwrap_or_default();
        let heap = interpreter.heap();
        Ok(Value::Number(heap.num_val(heap.car(args))? + f64::from(offset)))
    }

    let mut interpreter = interpreter();
    interpreter.set_global_builtin("test-cfun", add_data, Some(std::rc::Rc::new(42i32)));
    pretty_assertions::assert_eq!(
        eval_print(&mut interpreter, "(test-cfun 10)"),
        Ok(String::from("52"))
    );
}

/// An interpreter with `sig1`, a signal whose step adds `incr` to `val1`.
fn signal_interpreter() -> Interpreter {
    let mut interpreter = interpreter();
    for expr in [
        "(setq step-incr (lambda (self) (put self 'val1 (+ (get self 'val1) (get self 'incr)))))",
        "(setq sig1 (make-signal step-incr))",
        "(put sig1 'val1 1)",
        "(put sig1 'incr 2)",
    ]
    .iter()
    {
        eval_print(&mut interpreter, expr).unwrap();
    }
    interpreter
}

fn check_signal(name: &str, interpreter: &mut Interpreter, examples: &[(&str, f64)]) {
    for (expr, expected) in examples {
        pretty_assertions::assert_eq!(
            eval_number(interpreter, expr),
            *expected,
            "{}: {}",
            name,
            expr
        );
    }
}

#[test]
fn signal_step() {
    check_signal(
        "step",
        &mut signal_interpreter(),
        &[
            ("(get sig1 'val1)", 1.0),
            ("(progn ('step sig1) (get sig1 'val1))", 3.0),
            ("(progn ('step sig1) (get sig1 'val1))", 5.0),
        ],
    )
}

#[test]
fn sigval_steps_once_per_frame() {
    check_signal(
        "sigval",
        &mut signal_interpreter(),
        &[
            ("(sigval sig1)", 3.0),
            ("(sigval sig1)", 3.0),
            ("$sig1", 3.0),
            ("(progn (clear-stepped-signals) $sig1)", 5.0),
        ],
    )
}

#[test]
fn connect_signal_source() {
    let mut interpreter = signal_interpreter();
    for expr in [
        "(setq sig2 (make-signal step-incr))",
        "(put sig2 'val1 1)",
        "(put sig2 'incr 0)",
        "(=> sig1 sig2 'incr)",
    ]
    .iter()
    {
        eval_print(&mut interpreter, expr).unwrap();
    }
    check_signal(
        "=>",
        &mut interpreter,
        &[
            ("(sigval sig2)", 4.0),
            ("(sigval sig2)", 4.0),
            ("(sigval sig1)", 3.0),
            ("(sigval sig1)", 3.0),
            ("(progn (clear-stepped-signals) (sigval sig2))", 9.0),
            ("(sigval sig1)", 5.0),
        ],
    )
}

#[test]
fn connect_signal_source_with_mapping() {
    let mut interpreter = signal_interpreter();
    for expr in [
        "(setq sig2 (make-signal step-incr))",
        "(put sig2 'val1 1)",
        "(put sig2 'incr 0)",
        "(=> sig1 sig2 'incr (lambda (incr) (* 10 incr)))",
    ]
    .iter()
    {
        eval_print(&mut interpreter, expr).unwrap();
    }
    check_signal(
        "=> with mapping",
        &mut interpreter,
        &[
            ("(sigval sig2)", 31.0),
            ("(sigval sig2)", 31.0),
            ("(sigval sig1)", 3.0),
            ("(progn (clear-stepped-signals) (sigval sig2))", 81.0),
            ("(sigval sig1)", 5.0),
        ],
    )
}

#[test]
fn connect_function_source() {
    let mut interpreter = signal_interpreter();
    for expr in [
        "(setq sig3 (make-signal step-incr))",
        "(put sig3 'val1 4)",
        "(put sig3 'incr 0)",
        "(=> (lambda () 10) sig3 'incr)",
        "(setq sig4 (make-signal step-incr))",
        "(put sig4 'val1 4)",
        "(put sig4 'incr 0)",
        "(=> (lambda () 10) sig4 'incr (lambda (incr) (* 2 incr)))",
    ]
    .iter()
    {
        eval_print(&mut interpreter, expr).unwrap();
    }
    check_signal(
        "=> function source",
        &mut interpreter,
        &[
            ("$sig3", 14.0),
            ("$sig3", 14.0),
            ("$sig4", 24.0),
            ("(progn (clear-stepped-signals) $sig3)", 24.0),
            ("$sig4", 44.0),
        ],
    )
}

#[test]
fn signal_slots() {
    check_function(
        "get-slot",
        &[
            ("(setq s (make-signal nil))", "<Dictionary>"),
            ("(put-slot s 'x 7)", "7"),
            ("(get-slot s 'x)", "7"),
            ("(get s 'x)", "7"),
            ("(get-slot s 'y)", "nil"),
            ("(functionp (get-slot (saw) 'step))", "true"),
        ],
    )
}

#[test]
fn sigval_needs_a_signal() {
    let mut interpreter = interpreter();
    pretty_assertions::assert_eq!(
        eval_print(&mut interpreter, "(sigval 5)"),
        Err(Error::Access(AccessError {
            expected: Type::Dictionary,
            actual: Type::Number,
        }))
    );
    pretty_assertions::assert_eq!(
        eval_print(&mut interpreter, "(progn (setq s (make-signal nil)) $s)"),
        Err(Error::NotCallable {
            operator: String::from("step"),
        })
    );
}

#[test]
fn saw() {
    check_signal(
        "saw",
        &mut interpreter(),
        &[
            ("(progn (setq saw1 (saw)) (get saw1 'freq))", 0.0),
            ("(get saw1 'val1)", 0.0),
            ("(sigval saw1)", 0.0),
            ("(progn (put saw1 'freq (/ 3 8)) (clear-stepped-signals) $saw1)", 0.375),
            ("(progn (clear-stepped-signals) $saw1)", 0.75),
            ("(progn (clear-stepped-signals) $saw1)", 0.125),
            ("(progn (put saw1 'freq (/ -5 8)) (clear-stepped-signals) $saw1)", 0.5),
            ("(progn (clear-stepped-signals) $saw1)", 0.875),
        ],
    )
}

#[test]
fn tri() {
    check_signal(
        "tri",
        &mut interpreter(),
        &[
            ("(progn (setq tri1 (tri)) (get tri1 'freq))", 0.0),
            ("(get tri1 'val1)", 0.0),
            ("(sigval tri1)", 0.0),
            ("(progn (put tri1 'freq (/ 4)) (clear-stepped-signals) $tri1)", 0.5),
            ("(progn (clear-stepped-signals) $tri1)", 1.0),
            ("(progn (clear-stepped-signals) $tri1)", 0.5),
            ("(progn (clear-stepped-signals) $tri1)", 0.0),
            ("(progn (clear-stepped-signals) $tri1)", 0.5),
            ("(progn (put tri1 'freq (/ -3 8)) (clear-stepped-signals) $tri1)", 0.25),
            ("(progn (clear-stepped-signals) $tri1)", 1.0),
            ("(progn (clear-stepped-signals) $tri1)", 0.25),
            ("(progn (clear-stepped-signals) $tri1)", 0.5),
        ],
    )
}

#[test]
fn sin_osc() {
    let mut interpreter = interpreter();
    eval_print(&mut interpreter, "(setq sin1 (sin-osc))").unwrap();
    pretty_assertions::assert_eq!(eval_number(&mut interpreter, "(get sin1 'val1)"), 0.0);
    let expected = [0.5, 1.0, 0.5, 0.0, 0.5, 1.0];
    for (step, expected) in expected.iter().enumerate() {
        if step == 1 {
            eval_print(&mut interpreter, "(put sin1 'freq (/ 4))").unwrap();
        }
        let value = eval_number(&mut interpreter, "(progn (clear-stepped-signals) $sin1)");
        assert!(
            (value - expected).abs() < 0.01,
            "step {}: {} is not close to {}",
            step,
            value,
            expected
        );
    }
}

#[test]
fn toggle() {
    check_function(
        "toggle",
        &[
            ("(setq t1 (toggle))", "<Dictionary>"),
            ("$t1", "0"),
            ("(progn (clear-stepped-signals) $t1)", "0"),
            ("(progn (put t1 'event true) (clear-stepped-signals) $t1)", "1"),
            ("(get t1 'selected)", "b"),
            ("(progn (clear-stepped-signals) $t1)", "0"),
            ("(progn (put t1 'event nil) (clear-stepped-signals) $t1)", "0"),
            ("(progn (put t1 'b 7) (put t1 'event true) (clear-stepped-signals) $t1)", "7"),
        ],
    )
}
