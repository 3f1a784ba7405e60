use crate::{Heap, Value};

/// Render a number the way C++ streams do by default (`%g` with six significant
/// digits): integral values have no trailing `.0`, and very large or very small
/// magnitudes switch to exponent notation.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return String::from("nan");
    }
    if n.is_infinite() {
        return String::from(if n > 0.0 { "inf" } else { "-inf" });
    }
    if n == 0.0 {
        return String::from(if n.is_sign_negative() { "-0" } else { "0" });
    }

    let scientific = format!("{:.5e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if !(-4..6).contains(&exponent) {
        format!(
            "{}e{}{:02}",
            strip_fraction_zeros(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let fixed = format!("{:.*}", (5 - exponent) as usize, n);
        String::from(strip_fraction_zeros(&fixed))
    }
}

fn strip_fraction_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// The prefix that a two-element list headed by `quote` or `sigval` prints with.
pub(crate) fn sugar_prefix(heap: &Heap, value: Value) -> Option<&'static str> {
    let head = match heap.car(value) {
        Value::Symbol(symbol) => heap.name_of(symbol),
        _ => return None,
    };
    let rest = heap.cdr(value);
    if !matches!(rest, Value::Cons(_)) || !heap.cdr(rest).is_null() {
        return None;
    }
    match head {
        "quote" => Some("'"),
        "sigval" => Some("$"),
        _ => None,
    }
}

/// Render an atom. Returns `None` for values with structure (lists and closures).
pub(crate) fn print_atom(heap: &Heap, value: Value) -> Option<String> {
    match value {
        Value::Null => Some(String::from("nil")),
        Value::Boolean(b) => Some(String::from(if b { "true" } else { "false" })),
        Value::Number(n) => Some(format_number(n)),
        Value::Symbol(symbol) => Some(String::from(heap.name_of(symbol))),
        Value::String(_) => heap
            .string_val(value)
            .ok()
            .map(|text| format!("\"{}\"", text)),
        Value::Builtin(_) => Some(String::from("<CFunction>")),
        Value::Dict(_) => Some(String::from("<Dictionary>")),
        Value::Eof => Some(String::from("<Eof>")),
        Value::Cons(_) | Value::Expr(_) => None,
    }
}

/// Print a value back to source syntax.
///
/// Cyclic structures are not detected.
pub fn print(heap: &Heap, value: Value) -> String {
    let mut out = String::new();
    write_value(heap, value, &mut out);
    out
}

fn write_value(heap: &Heap, value: Value, out: &mut String) {
    match value {
        Value::Cons(_) => {
            if let Some(prefix) = sugar_prefix(heap, value) {
                out.push_str(prefix);
                write_value(heap, heap.cadr(value), out);
                return;
            }

            out.push('(');
            let mut node = value;
            let mut first = true;
            loop {
                match node {
                    Value::Cons(_) => {
                        if !first {
                            out.push(' ');
                        }
                        first = false;
                        write_value(heap, heap.car(node), out);
                        node = heap.cdr(node);
                    }
                    Value::Null => break,
                    tail => {
                        out.push_str(" . ");
                        write_value(heap, tail, out);
                        break;
                    }
                }
            }
            out.push(')');
        }
        Value::Expr(_) => {
            let (params, body) = match heap.expr_parts(value) {
                Ok(parts) => parts,
                Err(_) => return,
            };
            out.push_str("(lambda ");
            write_value(heap, params, out);
            out.push(' ');
            write_value(heap, body, out);
            out.push(')');
        }
        _ => {
            if let Some(atom) = print_atom(heap, value) {
                out.push_str(&atom)
            }
        }
    }
}
