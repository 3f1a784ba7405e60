use crate::{Balance, Error, Repl};
use procdraw_diagnostic::Source;
use procdraw_eval as eval;

fn repl() -> Repl {
    Repl::new(Source::Interactive {
        label: String::from("(repl)"),
    })
}

#[test]
fn do_command_prints_value() {
    let mut repl = repl();
    pretty_assertions::assert_eq!(repl.do_command("(+ 1 (+ 2 3))"), "6");
    pretty_assertions::assert_eq!(repl.do_command("'(a . b)"), "(a . b)");
}

#[test]
fn do_command_keeps_state() {
    let mut repl = repl();
    pretty_assertions::assert_eq!(repl.do_command("(def inc (n) (+ n 1))"), "(lambda (n) (+ n 1))");
    pretty_assertions::assert_eq!(repl.do_command("(inc 41)"), "42");
}

#[test]
fn do_command_reports_errors() {
    let mut repl = repl();
    pretty_assertions::assert_eq!(repl.do_command("(1 2)"), "1 is not callable");
    pretty_assertions::assert_eq!(repl.do_command("(+ 'a)"), "expected number, got symbol");
    pretty_assertions::assert_eq!(repl.do_command("\"abc"), "unterminated string");
}

#[test]
fn do_command_empty() {
    let mut repl = repl();
    pretty_assertions::assert_eq!(repl.do_command("   "), "");
}

#[test]
fn eval_show_last_form() {
    let mut repl = repl();
    pretty_assertions::assert_eq!(
        repl.eval_show("(setq x 2) (* x 21)"),
        Ok(Some(String::from("42")))
    );
    pretty_assertions::assert_eq!(repl.eval_show(""), Ok(None));
}

#[test]
fn eval_show_error_position() {
    let mut repl = repl();
    let err = repl.eval_show("(a b").unwrap_err();
    pretty_assertions::assert_eq!(err.position(), Some(4));

    let err = repl.eval_show("(undefined)").unwrap_err();
    pretty_assertions::assert_eq!(
        err,
        Error::EvalError(eval::Error::NotCallable {
            operator: String::from("nil")
        })
    );
    pretty_assertions::assert_eq!(err.position(), None);
}

#[test]
fn eval_show_pretty() {
    let mut repl = repl();
    repl.set_margin(Some(10));
    pretty_assertions::assert_eq!(
        repl.eval_show("'(10 20 30 40 50 60 70 80)"),
        Ok(Some(String::from("(10 20 30\n  40 50 60\n  70 80)")))
    );
}

#[test]
fn repl_check_balanced() {
    let repl = repl();
    pretty_assertions::assert_eq!(repl.check_balanced("(+ 1 2)"), Balance::Balanced);
    pretty_assertions::assert_eq!(repl.check_balanced("(+ 1 (* 2"), Balance::NotClosed);
    pretty_assertions::assert_eq!(repl.check_balanced("(+ 1 2))"), Balance::TooManyClosingParens);
}

#[test]
fn interpreter_access() {
    let mut repl = repl();
    repl.do_command("(setq x 7)");
    let x = repl.interpreter().heap().global("x");
    pretty_assertions::assert_eq!(repl.interpreter().print(x), "7");
}
