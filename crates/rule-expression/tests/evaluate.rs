//! Integration tests for rule-condition evaluation.

use rule_expression::{
    evaluate_expression, Context, ErrorKind, Evaluator, EvaluatorOptions, ExprError, Precedence,
    Value,
};
use serde_json::{json, Value as Json};

fn check(expression: &str, data: Json, expected: bool) {
    let ctx = Context::from_json(data);
    assert_eq!(
        evaluate_expression(expression, &ctx),
        expected,
        "expression: {}",
        expression
    );
}

fn value(expression: &str, data: Json) -> Value {
    let ctx = Context::from_json(data);
    Evaluator::default()
        .try_evaluate(expression, &ctx)
        .unwrap_or_else(|e| panic!("evaluate({}) failed: {}", expression, e))
}

fn error(expression: &str, data: Json) -> ExprError {
    let ctx = Context::from_json(data);
    Evaluator::default()
        .try_evaluate(expression, &ctx)
        .err()
        .unwrap_or_else(|| panic!("expected error for {}", expression))
}

// ----------------------------------------------------------------- Arithmetic

#[test]
fn test_additive_splits_before_multiplicative() {
    assert_eq!(value("10 - 2 * 3", json!({})), Value::Number(4.0));
    assert_eq!(value("2 + 3 * 4", json!({})), Value::Number(14.0));
    assert_eq!(value("2 * 3 + 4", json!({})), Value::Number(10.0));
    check("10 - 2 * 3 == 4", json!({}), true);
}

#[test]
fn test_modulo_and_division() {
    assert_eq!(value("7 % 3", json!({})), Value::Number(1.0));
    assert_eq!(value("1 / 4", json!({})), Value::Number(0.25));
}

#[test]
fn test_division_by_zero_is_not_an_error() {
    check("x / 0 > 1", json!({"x": 5}), false);
    check("x / 0 < 1", json!({"x": 5}), false);
    check("x / 0 == x / 0", json!({"x": 5}), false);
    check("x / 0 != 1", json!({"x": 5}), true);
    assert!(value("x % 0", json!({"x": 5})).as_f64().unwrap().is_nan());
}

#[test]
fn test_numeric_strings_coerce_in_arithmetic() {
    assert_eq!(value("a + 1", json!({"a": "2"})), Value::Number(3.0));
    assert!(value("a * 2", json!({"a": "abc"})).as_f64().unwrap().is_nan());
}

// ----------------------------------------------------------------- Comparison and logic

#[test]
fn test_and() {
    check("a > 5 && b < 10", json!({"a": 7, "b": 3}), true);
    check("a > 5 && b < 10", json!({"a": 2, "b": 3}), false);
}

#[test]
fn test_or_and_not() {
    check("a > 5 || b < 10", json!({"a": 2, "b": 3}), true);
    check("!(a > 5)", json!({"a": 2}), true);
    check("!flag", json!({"flag": false}), true);
}

#[test]
fn test_alert_rule_condition() {
    let data = json!({"price": 101.5, "threshold": 100, "count": 3});
    check("price > threshold && count >= 3", data.clone(), true);
    check("price > threshold && count >= 4", data.clone(), false);
    check("price <= threshold || count <= 3", data, true);
}

#[test]
fn test_loose_and_strict_equality() {
    check("a == '1'", json!({"a": 1}), true);
    check("a === '1'", json!({"a": 1}), false);
    check("a !== '1'", json!({"a": 1}), true);
    check("a == null", json!({"a": null}), true);
    check("a === undefined", json!({"a": null}), false);
    check("status == 'open'", json!({"status": "open"}), true);
    check("status != \"open\"", json!({"status": "closed"}), true);
}

#[test]
fn test_string_ordering() {
    check("name < 'm'", json!({"name": "alice"}), true);
    check("name > 'm'", json!({"name": "alice"}), false);
}

#[test]
fn test_mixed_logical_precedence() {
    let ctx = Context::new().with("a", true).with("b", true).with("c", false);
    let conventional = Evaluator::default();
    let legacy = Evaluator::new(EvaluatorOptions::default().with_precedence(Precedence::Legacy));
    assert!(conventional.evaluate("a || b && c", &ctx));
    assert!(!legacy.evaluate("a || b && c", &ctx));
}

#[test]
fn test_parenthesized_operators() {
    check("(a + b) * 2 == 10", json!({"a": 2, "b": 3}), true);
    check("(a > 1 || b > 1) && c", json!({"a": 0, "b": 2, "c": true}), true);
    check("(a > 1 || b > 1) && c", json!({"a": 0, "b": 2, "c": false}), false);
}

#[test]
fn test_legacy_mode_fails_closed_on_nested_operators() {
    let legacy = Evaluator::new(EvaluatorOptions::default().with_precedence(Precedence::Legacy));
    let ctx = Context::from_json(json!({"a": 2, "b": 3}));
    assert!(!legacy.evaluate("(a + b) * 2 == 10", &ctx));
    assert!(matches!(
        legacy.try_evaluate("(a + b) * 2 == 10", &ctx).unwrap_err().kind(),
        ErrorKind::Structural
    ));
    assert!(legacy.evaluate("a + b * 2 == 8", &ctx));
}

#[test]
fn test_legacy_mode_splits_inside_call_arguments() {
    let legacy = Evaluator::new(EvaluatorOptions::default().with_precedence(Precedence::Legacy));
    let ctx = Context::new();
    // The leftmost `+` sits inside the call, leaving `max ( 1` on the left.
    assert!(!legacy.evaluate("max(1 + 2, 3) == 3", &ctx));
    assert_eq!(
        legacy.try_evaluate("max(1 + 2, 3) == 3", &ctx).unwrap_err().kind(),
        ErrorKind::Structural
    );
    assert!(Evaluator::default().evaluate("max(1 + 2, 3) == 3", &ctx));
}

// ----------------------------------------------------------------- Functions and constants

#[test]
fn test_functions() {
    check("max(1, 2, 3) == 3", json!({}), true);
    check("min(a, b) == 2", json!({"a": 2, "b": 3}), true);
    check("abs(x) > 4", json!({"x": -5}), true);
    check("round(x) == 3", json!({"x": 2.5}), true);
    check("floor(x) + ceil(x) == 5", json!({"x": 2.5}), true);
    check("sqrt(pow(3, 2) + pow(4, 2)) == 5", json!({}), true);
}

#[test]
fn test_unknown_function_is_false() {
    check("launch(1) == 1", json!({}), false);
    assert_eq!(
        error("launch(1)", json!({})),
        ExprError::UnknownFunction("launch".to_string())
    );
}

#[test]
fn test_constants() {
    check("PI > 3.14 && PI < 3.15", json!({}), true);
    check("E > 2.71", json!({}), true);
}

// ----------------------------------------------------------------- Arrays

#[test]
fn test_array_indexing() {
    check("arr[1]", json!({"arr": [10, 20, 30]}), true);
    assert_eq!(value("arr[1]", json!({"arr": [10, 20, 30]})), Value::Number(20.0));
    check("arr[0] + arr[2] == 40", json!({"arr": [10, 20, 30]}), true);
    check("arr[i] == 'b'", json!({"arr": ["a", "b"], "i": 1}), true);
}

#[test]
fn test_array_out_of_range_is_undefined() {
    assert_eq!(value("arr[3]", json!({"arr": [10, 20, 30]})), Value::Undefined);
    check("arr[3]", json!({"arr": [10, 20, 30]}), false);
}

#[test]
fn test_indexing_undeclared_variable_is_false() {
    check("nope[0]", json!({}), false);
    assert_eq!(error("nope[0]", json!({})).kind(), ErrorKind::UnknownIdentifier);
}

// ----------------------------------------------------------------- Variables

#[test]
fn test_unknown_variable_is_false() {
    check("missing > 1", json!({}), false);
    assert_eq!(
        error("missing > 1", json!({})),
        ExprError::UnknownVariable("missing".to_string())
    );
}

#[test]
fn test_dotted_and_digit_led_names_are_single_variables() {
    check("price.usd > 1", json!({"price.usd": 5}), true);
    check("price.usd > 1", json!({"price": 5}), false);
    assert_eq!(
        error("price.usd > 1", json!({"price": 5})),
        ExprError::UnknownVariable("price.usd".to_string())
    );
    check("3abc == 'x'", json!({"3abc": "x"}), true);
}

#[test]
fn test_indexing_non_array_names_the_bound_type() {
    let err = error("n[0]", json!({"n": "abc"}));
    assert_eq!(err.kind(), ErrorKind::UnknownIdentifier);
    assert_eq!(err.to_string(), "not an array: n is string");
}

#[test]
fn test_literals_and_truthiness() {
    check("true", json!({}), true);
    check("false", json!({}), false);
    check("null", json!({}), false);
    check("0", json!({}), false);
    check("'text'", json!({}), true);
    check("''", json!({}), false);
    check("items", json!({"items": []}), true);
}

#[test]
fn test_context_is_not_mutated() {
    let ctx = Context::from_json(json!({"a": 1, "arr": [1, 2]}));
    let before = format!("{:?}", ctx.get("arr"));
    assert!(evaluate_expression("arr[0] == a", &ctx));
    assert_eq!(format!("{:?}", ctx.get("arr")), before);
    assert_eq!(ctx.len(), 2);
}

// ----------------------------------------------------------------- Guard and limits

#[test]
fn test_over_length_is_false() {
    let expression = format!("{} == 1", "1".repeat(500));
    check(&expression, json!({}), false);
    assert!(matches!(
        error(&expression, json!({})),
        ExprError::TooLong { max: 500, .. }
    ));
}

#[test]
fn test_denylisted_expressions_are_false() {
    for expression in [
        "eval('1 + 1') == 2",
        "require('fs')",
        "process.exit(1)",
        "fetch('http://example.com')",
        "constructor",
        "x => 1",
    ] {
        check(expression, json!({}), false);
        assert_eq!(error(expression, json!({})).kind(), ErrorKind::RejectedByGuard);
    }
}

#[test]
fn test_too_many_tokens() {
    let expression = vec!["1"; 51].join(" + ");
    assert_eq!(
        error(&expression, json!({})),
        ExprError::TooComplex { count: 101, max: 100 }
    );
    let expression = vec!["1"; 50].join(" + ");
    assert_eq!(value(&expression, json!({})), Value::Number(50.0));
}

#[test]
fn test_custom_limits() {
    let evaluator = Evaluator::new(EvaluatorOptions::default().with_max_length(5).with_max_tokens(3));
    let ctx = Context::new();
    assert!(evaluator.evaluate("1 < 2", &ctx));
    assert!(!evaluator.evaluate("1 < 2 ", &ctx));
    assert!(matches!(
        evaluator.try_evaluate("1+1+1", &ctx),
        Err(ExprError::TooComplex { count: 5, max: 3 })
    ));
}

#[test]
fn test_deep_nesting_fails_closed() {
    let options = EvaluatorOptions::default()
        .with_max_length(10_000)
        .with_max_tokens(10_000);
    let evaluator = Evaluator::new(options.clone());
    let ctx = Context::new();
    let expression = format!("{}1", "!".repeat(5000));
    assert!(!evaluator.evaluate(&expression, &ctx));
    assert_eq!(
        evaluator.try_evaluate(&expression, &ctx),
        Err(ExprError::TooDeep { max: 64 })
    );
    assert_eq!(
        evaluator.try_evaluate(&expression, &ctx).unwrap_err().kind(),
        ErrorKind::TooComplex
    );

    let parens = format!("{}1{}", "(".repeat(3000), ")".repeat(3000));
    assert!(!evaluator.evaluate(&parens, &ctx));

    // Configured depth is capped.
    let unbounded = Evaluator::new(options.with_max_depth(usize::MAX));
    assert_eq!(
        unbounded.try_evaluate(&expression, &ctx),
        Err(ExprError::TooDeep { max: 256 })
    );
    assert!(unbounded.evaluate("!!!!1", &ctx));
}

#[test]
fn test_lexical_errors_are_false() {
    check("a = 1", json!({"a": 1}), false);
    check("a ? 1 : 0", json!({"a": 1}), false);
    check("a == 'open", json!({"a": "open"}), false);
    assert_eq!(error("a = 1", json!({"a": 1})).kind(), ErrorKind::Lexical);
}

#[test]
fn test_unbalanced_is_structural() {
    assert_eq!(error("(a > 1", json!({"a": 2})), ExprError::Unbalanced);
    assert_eq!(error("max(1, 2]", json!({})), ExprError::Unbalanced);
}

// ----------------------------------------------------------------- Validation and purity

#[test]
fn test_validate() {
    let evaluator = Evaluator::default();
    assert!(evaluator.validate("price > threshold && count >= 3").is_ok());
    assert!(evaluator.validate("unknown_var > 1").is_ok());
    assert!(evaluator.validate("eval(1)").is_err());
    assert!(evaluator.validate("a ; b").is_err());
}

#[test]
fn test_idempotent() {
    let ctx = Context::from_json(json!({"a": 7, "b": 3}));
    let first = evaluate_expression("a > 5 && b < 10", &ctx);
    let second = evaluate_expression("a > 5 && b < 10", &ctx);
    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn test_options_from_json() {
    let options: EvaluatorOptions = serde_json::from_value(json!({"precedence": "legacy"})).unwrap();
    assert_eq!(options.precedence, Precedence::Legacy);
    assert_eq!(options.max_tokens, 100);
    let legacy = Evaluator::new(options);
    assert_eq!(
        legacy.try_evaluate("10 - 2 - 3", &Context::new()),
        Ok(Value::Number(11.0))
    );
}
