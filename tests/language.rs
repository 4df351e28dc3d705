//! Special forms, operators and list data

mod common;

use common::{eval, run, runtime_err};
use pretty_assertions::assert_eq;

// =============================================================================
// OPERATORS
// =============================================================================

#[test]
fn test_arithmetic_matches_f64() {
    let cases = [(3.0, 4.0), (0.1, 0.2), (7.5, 2.0), (1e10, 3.0)];
    for (a, b) in cases {
        assert_eq!(eval(&format!("(+ {} {})", a, b)), (a + b).to_string());
        assert_eq!(eval(&format!("(- {} {})", a, b)), (a - b).to_string());
        assert_eq!(eval(&format!("(* {} {})", a, b)), (a * b).to_string());
        assert_eq!(eval(&format!("(/ {} {})", a, b)), (a / b).to_string());
    }
}

#[test]
fn test_less_and_greater_agree() {
    for (a, b) in [(1, 2), (2, 1), (3, 3)] {
        let less = eval(&format!("(< {} {})", a, b));
        let greater = eval(&format!("(> {} {})", b, a));
        assert_eq!(less, greater);
    }
}

#[test]
fn test_nested_arithmetic() {
    assert_eq!(eval("(+ (* 2 3) (- 10 4))"), "12");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(eval("(+ \"ab\" \"cd\")"), "abcd");
    assert_eq!(
        runtime_err("(+ \"ab\" 1)").message,
        "Operands must be two numbers or two strings."
    );
}

#[test]
fn test_equality() {
    assert_eq!(run("(= 2 2) (= 2 3) (= \"a\" \"a\")"), vec!["true", "false", "true"]);
}

// =============================================================================
// TRUTHINESS AND COND
// =============================================================================

#[test]
fn test_cond_skips_falsy_conditions() {
    assert_eq!(eval("(cond 0 \"a\" true \"b\")"), "b");
    assert_eq!(eval("(cond nil 1 false 2 (< 1 2) 3)"), "3");
    assert_eq!(eval("(cond \"\" \"empty string is truthy\")"), "empty string is truthy");
}

#[test]
fn test_cond_without_true_condition() {
    assert_eq!(runtime_err("(cond nil \"x\")").message, "Lack of true condition");
}

#[test]
fn test_logical_forms() {
    assert_eq!(run("(and? 1 1) (and? 1 nil)"), vec!["true", "false"]);
    assert_eq!(run("(or? nil 1)"), vec!["true"]);
    // A false `or?` is nil and prints nothing.
    assert!(run("(or? nil 0)").is_empty());
    assert_eq!(run("(not? nil) (not? 1)"), vec!["true", "false"]);
}

// =============================================================================
// LISTS
// =============================================================================

#[test]
fn test_literal_list_prints_as_data() {
    assert_eq!(eval("(1 2 3)"), "(1 2 3)");
    assert_eq!(eval("(1 \"two\" (3 4))"), "(1 \"two\" (3 4))");
}

#[test]
fn test_car_cdr_round_trip() {
    assert_eq!(eval("(car (1 2 3))"), "1");
    assert_eq!(eval("(cdr (1 2 3))"), "(2 3)");
    assert_eq!(eval("(car (cdr (1 2 3)))"), "2");
    assert_eq!(eval("(cdr (cdr (1 2 3)))"), "(3)");
    assert!(run("(cdr (cdr (cdr (1 2 3))))").is_empty());
}

#[test]
fn test_list_bound_to_symbol() {
    assert_eq!(eval("(set xs (10 20 30)) (car (cdr xs))"), "20");
}

#[test]
fn test_cons_builds_lists() {
    assert_eq!(eval("(cons 1 (2 3))"), "(1 2 3)");
    assert_eq!(eval("(cons 1 nil)"), "(1)");
    assert_eq!(eval("(cons (+ 1 1) 3)"), "(2 3)");
    assert_eq!(eval("(car (cons \"a\" (1)))"), "a");
}

#[test]
fn test_cons_stores_list_values_as_data() {
    assert_eq!(eval("(set x 5) (car (cons (cdr (1 x)) nil))"), "(x)");
    assert_eq!(eval("(set pair (cons (1 2) (3))) pair"), "((1 2) 3)");
    assert_eq!(eval("(set pair (cons (1 2) (3))) (car (cdr (car pair)))"), "2");
}

#[test]
fn test_cdr_requires_list() {
    assert_eq!(
        runtime_err("(cdr 1)").message,
        "CDR operation must have a list as the first operand"
    );
}

// =============================================================================
// PREDICATES AND BINDINGS
// =============================================================================

#[test]
fn test_type_predicates() {
    assert_eq!(
        run("(number? 1) (number? (1)) (list? (1)) (list? 1) (nil? nil) (nil? 1)"),
        vec!["true", "false", "true", "false", "true", "false"]
    );
}

#[test]
fn test_symbol_predicate_looks_at_the_argument_itself() {
    assert_eq!(run("(set n 5) (symbol? n) (symbol? 5)"), vec!["true", "false"]);
}

#[test]
fn test_set_rebinds_without_printing() {
    assert_eq!(run("(set x 1) (set x (+ x 1)) x"), vec!["2"]);
}

#[test]
fn test_keyword_literals() {
    assert_eq!(run("true false"), vec!["true", "false"]);
    assert!(run("nil").is_empty());
}
