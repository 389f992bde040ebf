//! Unit tests for the analyzer.
//!
//! Each test runs the full decoration pipeline on a small program and
//! asserts on the diagnostics that come back.

use crate::ast::ast::Ast;
use crate::ast::types::{BinaryOp, DecafType, UnaryOp};
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;
use crate::symbols::builder::build_scopes;

use super::analysis::{analyze, Diagnostic, DiagnosticImpl};

fn build_source(source: &str) -> Ast {
    let tokens = tokenize(source.to_string()).unwrap();
    let mut ast = parse(tokens).unwrap();
    build_scopes(&mut ast);
    ast
}

fn check_source(source: &str) -> Vec<Diagnostic> {
    let mut ast = build_source(source);
    analyze(&mut ast)
}

#[test]
fn test_accepts_valid_program() {
    let diagnostics = check_source(
        "int g;\ndef int main() { int a; a = g + 1; if (a > 0) { a = a - 1; } return a; }",
    );
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_missing_main() {
    let diagnostics = check_source("int a;");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].internal(), &DiagnosticImpl::MissingMain);
}

#[test]
fn test_main_with_parameters_rejected() {
    let diagnostics = check_source("def int main(int a) { return a; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].internal(), &DiagnosticImpl::InvalidMain);
}

#[test]
fn test_main_with_wrong_return_type_rejected() {
    let diagnostics = check_source("def bool main() { return true; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].internal(), &DiagnosticImpl::InvalidMain);
}

#[test]
fn test_non_function_main_rejected() {
    let diagnostics = check_source("int main;\ndef int foo() { return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].internal(), &DiagnosticImpl::InvalidMain);
}

#[test]
fn test_undefined_symbol_reported_once() {
    let diagnostics = check_source("def int main() { return missing; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::UndefinedSymbol {
            name: String::from("missing")
        }
    );
}

#[test]
fn test_undefined_symbol_suppresses_cascades() {
    // missing is undefined; the addition and the return check must not
    // pile further diagnostics on top of it.
    let diagnostics = check_source("def int main() { return missing + 1; }");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_duplicate_symbol_one_diagnostic_per_name() {
    let diagnostics = check_source("int a;\nbool b;\nint a;\ndef int main() { return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::DuplicateSymbol {
            name: String::from("a")
        }
    );
}

#[test]
fn test_triplicate_symbol_still_one_diagnostic() {
    let diagnostics = check_source("int a;\nint a;\nint a;\ndef int main() { return 0; }");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_duplicates_in_separate_scopes_allowed() {
    let diagnostics = check_source("int a;\ndef int main() { int a; a = 1; return a; }");
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_void_variable_rejected() {
    let diagnostics = check_source("void v;\ndef int main() { return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::VoidVariable {
            name: String::from("v")
        }
    );
}

#[test]
fn test_zero_length_array_rejected() {
    let diagnostics = check_source("int data[0];\ndef int main() { return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::InvalidArrayLength {
            name: String::from("data"),
            length: 0
        }
    );
}

#[test]
fn test_local_array_rejected() {
    let diagnostics = check_source("def int main() { int data[4]; return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::LocalArray {
            name: String::from("data")
        }
    );
}

#[test]
fn test_array_access_without_index() {
    let diagnostics = check_source("int data[4];\ndef int main() { return data; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::MissingArrayIndex {
            name: String::from("data")
        }
    );
}

#[test]
fn test_array_index_must_be_int() {
    let diagnostics = check_source("int data[4];\ndef int main() { return data[true]; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::NonIntArrayIndex {
            found: DecafType::Bool
        }
    );
}

#[test]
fn test_indexing_scalar_rejected() {
    let diagnostics = check_source("int a;\ndef int main() { return a[0]; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::NotAnArray {
            name: String::from("a")
        }
    );
}

#[test]
fn test_non_bool_if_condition() {
    let diagnostics = check_source("def int main() { if (1) { return 0; } return 1; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::NonBoolCondition {
            found: DecafType::Int
        }
    );
}

#[test]
fn test_non_bool_while_condition() {
    let diagnostics = check_source("def int main() { while (2 + 3) { } return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::NonBoolCondition {
            found: DecafType::Int
        }
    );
}

#[test]
fn test_assignment_type_mismatch() {
    let diagnostics = check_source("def int main() { int a; a = true; return a; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::TypeMismatch {
            expected: DecafType::Int,
            found: DecafType::Bool
        }
    );
}

#[test]
fn test_arithmetic_operands_must_be_int() {
    let diagnostics = check_source("def int main() { return 1 + true; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::InvalidBinaryOperands {
            op: BinaryOp::Add,
            left: DecafType::Int,
            right: DecafType::Bool
        }
    );
}

#[test]
fn test_logical_operands_must_be_bool() {
    let diagnostics = check_source("def int main() { bool b; b = 1 || true; return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0].internal(),
        DiagnosticImpl::InvalidBinaryOperands {
            op: BinaryOp::Or,
            ..
        }
    ));
}

#[test]
fn test_equality_requires_same_types() {
    let diagnostics = check_source("def int main() { bool b; b = 1 == true; return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0].internal(),
        DiagnosticImpl::InvalidBinaryOperands {
            op: BinaryOp::Eq,
            ..
        }
    ));
}

#[test]
fn test_bad_binary_op_reports_once_not_per_parent() {
    // The bad operand error must not also flag the enclosing assignment:
    // the result type still follows the operator.
    let diagnostics = check_source("def int main() { int a; a = 1 + true; return a; }");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_unary_operand_types() {
    let diagnostics = check_source("def int main() { int a; a = -true; return a; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::InvalidUnaryOperand {
            op: UnaryOp::Neg,
            found: DecafType::Bool
        }
    );

    let diagnostics = check_source("def int main() { bool b; b = !1; return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::InvalidUnaryOperand {
            op: UnaryOp::Not,
            found: DecafType::Int
        }
    );
}

#[test]
fn test_calling_non_function_rejected() {
    let diagnostics = check_source("int a;\ndef int main() { a(); return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::NotAFunction {
            name: String::from("a")
        }
    );
}

#[test]
fn test_wrong_argument_count() {
    let diagnostics =
        check_source("def int foo(int i) { return i; }\ndef int main() { return foo(); }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::WrongArgumentCount {
            name: String::from("foo"),
            expected: 1,
            found: 0
        }
    );
}

#[test]
fn test_argument_type_mismatch_reports_position() {
    // Only the first argument is wrong: exactly one diagnostic.
    let diagnostics = check_source(
        "def int foo(int i, bool b) { return i; }\ndef int main() { return foo(true, true); }",
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::ArgumentTypeMismatch {
            name: String::from("foo"),
            position: 1,
            expected: DecafType::Int,
            found: DecafType::Bool
        }
    );
}

#[test]
fn test_builtin_print_calls_typed() {
    let diagnostics = check_source(
        "def int main() { print_int(1); print_bool(true); print_str(\"hi\"); return 0; }",
    );
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);

    let diagnostics = check_source("def int main() { print_int(true); return 0; }");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_return_type_checks() {
    let diagnostics = check_source("def int main() { return true; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::ReturnTypeMismatch {
            expected: DecafType::Int,
            found: DecafType::Bool
        }
    );

    let diagnostics = check_source("def int main() { return; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::MissingReturnValue {
            expected: DecafType::Int
        }
    );

    let diagnostics =
        check_source("def void side() { return 1; }\ndef int main() { side(); return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::ValueReturnFromVoid
    );
}

#[test]
fn test_break_continue_outside_loop() {
    let diagnostics = check_source("def int main() { break; return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].internal(), &DiagnosticImpl::BreakOutsideLoop);

    let diagnostics = check_source("def int main() { continue; return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].internal(),
        &DiagnosticImpl::ContinueOutsideLoop
    );
}

#[test]
fn test_break_inside_loop_accepted() {
    let diagnostics = check_source(
        "def int main() { while (true) { if (true) { break; } continue; } return 0; }",
    );
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_break_after_loop_rejected() {
    let diagnostics = check_source("def int main() { while (true) { break; } break; return 0; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].internal(), &DiagnosticImpl::BreakOutsideLoop);
}

#[test]
fn test_str_equality_allowed() {
    let diagnostics =
        check_source("def int main() { bool b; b = \"a\" == \"b\"; return 0; }");
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn test_diagnostic_carries_line() {
    let diagnostics = check_source("def int main() {\n  int a;\n  a = true;\n  return a;\n}");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line(), 3);
    assert!(diagnostics[0].to_string().ends_with("on line 3"));
}

#[test]
fn test_analyze_is_idempotent() {
    let mut ast = build_source("def int main() { int a; a = true; return missing; }");
    let first = analyze(&mut ast);
    let second = analyze(&mut ast);
    assert_eq!(first, second);
}

#[test]
fn test_multiple_independent_errors_all_reported() {
    let diagnostics =
        check_source("def int main() { int a; a = true; return missing; }");
    assert_eq!(diagnostics.len(), 2);
}
