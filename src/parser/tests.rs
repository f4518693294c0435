//! Unit tests for the parser and the statement builders.

use crate::statements::arena::{Arena, ContextId, NodeId};
use crate::statements::operators::BinaryOperator;

use super::build::Parser;

/// A test scope mirroring real usage: a context under Base plus a
/// method whose body scope the parser starts in.
fn arena_with_method_scope() -> (Arena, ContextId) {
    let mut arena = Arena::new();
    let context = arena.new_context(Arena::BASE, "Test").unwrap();
    let method = arena
        .new_method(context, Arena::VOID, "testMethod", &[])
        .unwrap();
    let scope = arena.method_scope(method);
    (arena, scope)
}

fn parse_one(arena: &mut Arena, scope: ContextId, source: &str) -> NodeId {
    let mut parser = Parser::new(arena, scope).unwrap();
    let statements = parser.parse(source).unwrap();
    assert_eq!(statements.len(), 1);
    statements[0]
}

#[test]
fn test_parser_context_cannot_be_base() {
    let mut arena = Arena::new();
    let error = Parser::new(&mut arena, Arena::BASE).err().unwrap();
    assert_eq!(error.name(), "ParserContextCannotBeBase");
}

#[test]
fn test_parse_empty_source() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    assert!(parser.parse("").unwrap().is_empty());
    assert!(parser.parse("\n\n").unwrap().is_empty());
}

#[test]
fn test_parse_garbage_fails() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("$%@%(").err().unwrap();
    assert_eq!(error.name(), "ParsingFailed");
}

#[test]
fn test_parse_member_from_assignment() {
    let (mut arena, scope) = arena_with_method_scope();
    let member = parse_one(&mut arena, scope, "abc = 0");
    assert_eq!(arena.statement_name(member), Some("abc"));
    assert_eq!(arena.to_text(member), "abc = 0");
    assert_eq!(arena.return_type(member), Some(Arena::NUMBER));
    assert_eq!(arena.context_members(scope), &[member]);
}

#[test]
fn test_parse_member_with_extra_whitespace() {
    let (mut arena, scope) = arena_with_method_scope();
    let member = parse_one(&mut arena, scope, "   abc   =  3");
    assert_eq!(arena.to_text(member), "abc = 3");
}

#[test]
fn test_assignment_textual_form() {
    let (mut arena, scope) = arena_with_method_scope();
    let member = parse_one(&mut arena, scope, "number = 5");
    assert_eq!(arena.to_text(member), "number = 5");
}

#[test]
fn test_parse_two_members_on_separate_lines() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let statements = parser.parse("abc = 0\ndef = 1").unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(arena.to_text(statements[0]), "abc = 0");
    assert_eq!(arena.to_text(statements[1]), "def = 1");
}

#[test]
fn test_members_outside_a_method_scope_are_not_allowed() {
    let mut arena = Arena::new();
    let context = arena.new_context(Arena::BASE, "Test").unwrap();
    let mut parser = Parser::new(&mut arena, context).unwrap();
    let error = parser.parse("number = 2").err().unwrap();
    assert_eq!(error.name(), "MembersMustBeDefinedInMethods");
}

#[test]
fn test_reassignment_invalidates_the_shadowed_member() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let statements = parser.parse("abc = 0\nabc = 1").unwrap();
    assert!(arena.member_is_invalidated(statements[0]));
    assert_eq!(arena.context_members(scope), &[statements[1]]);
}

#[test]
fn test_chained_assignment_fails() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("a = a = 5").err().unwrap();
    assert_eq!(error.name(), "ParsingFailed");
}

#[test]
fn test_invalid_member_declaration_fails() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("number string abc = \"jo\"").err().unwrap();
    assert_eq!(error.name(), "ParsingFailed");
}

#[test]
fn test_parse_typed_member_declaration() {
    let (mut arena, scope) = arena_with_method_scope();
    let member = parse_one(&mut arena, scope, "number abc = 5");
    assert_eq!(arena.statement_name(member), Some("abc"));
    assert_eq!(arena.return_type(member), Some(Arena::NUMBER));
}

#[test]
fn test_typed_member_declaration_type_must_match_value() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("number abc = \"jo\"").err().unwrap();
    assert_eq!(error.name(), "TypesMustMatch");
}

#[test]
fn test_typed_member_declaration_with_unknown_type() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("missing abc = 5").err().unwrap();
    assert_eq!(error.name(), "TypeNotFound");
}

#[test]
fn test_bare_identifiers_are_not_values() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("abc").err().unwrap();
    assert_eq!(error.name(), "ParsingFailed");
}

#[test]
fn test_two_expressions_on_one_line_fail() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("5 5").err().unwrap();
    assert_eq!(error.name(), "ParsingFailed");
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let (mut arena, scope) = arena_with_method_scope();
    let operation = parse_one(&mut arena, scope, "2+3*4");
    assert_eq!(arena.binary_operator(operation), Some(BinaryOperator::Add));

    let left = arena.children(operation)[0];
    let two = arena.new_number(2.0);
    assert!(arena.statements_equal(left, two).unwrap());

    let right = arena.children(operation)[1];
    assert_eq!(arena.binary_operator(right), Some(BinaryOperator::Multiply));
    assert_eq!(arena.to_text(right), "3 * 4");
}

#[test]
fn test_same_precedence_associates_to_the_left() {
    let (mut arena, scope) = arena_with_method_scope();
    let operation = parse_one(&mut arena, scope, "2*3+4");
    assert_eq!(arena.binary_operator(operation), Some(BinaryOperator::Add));
    assert_eq!(arena.to_text(operation), "2 * 3 + 4");
    let left = arena.children(operation)[0];
    assert_eq!(arena.binary_operator(left), Some(BinaryOperator::Multiply));
}

#[test]
fn test_operand_types_must_match() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("1 + \"a\"").err().unwrap();
    assert_eq!(error.name(), "TypesMustMatch");
}

#[test]
fn test_relational_equals_operators_are_not_supported() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("1 <= 2").err().unwrap();
    assert_eq!(error.name(), "ParsingFailed");
    let error = parser.parse("1 >= 2").err().unwrap();
    assert_eq!(error.name(), "ParsingFailed");
}

#[test]
fn test_is_not_and_isnot_are_equivalent() {
    let (mut arena, scope) = arena_with_method_scope();
    let spelled_out = parse_one(&mut arena, scope, "true is not false");
    assert_eq!(arena.binary_operator(spelled_out), Some(BinaryOperator::IsNot));
    let condensed = parse_one(&mut arena, scope, "true isnot false");
    assert_eq!(arena.binary_operator(condensed), Some(BinaryOperator::IsNot));
    assert!(arena.statements_equal(spelled_out, condensed).unwrap());
}

#[test]
fn test_parse_negation() {
    let (mut arena, scope) = arena_with_method_scope();
    let negation = parse_one(&mut arena, scope, "-3");
    assert_eq!(arena.return_type(negation), Some(Arena::NUMBER));
    assert_eq!(arena.to_text(negation), "-3");
}

#[test]
fn test_parse_not() {
    let (mut arena, scope) = arena_with_method_scope();
    let negation = parse_one(&mut arena, scope, "not true");
    assert_eq!(arena.return_type(negation), Some(Arena::BOOL));
}

#[test]
fn test_unary_minus_binds_tighter_than_multiplication() {
    let (mut arena, scope) = arena_with_method_scope();
    let operation = parse_one(&mut arena, scope, "-2 * 3");
    assert_eq!(arena.binary_operator(operation), Some(BinaryOperator::Multiply));
    assert_eq!(arena.to_text(operation), "-2 * 3");
}

#[test]
fn test_parse_empty_method_declaration() {
    let (mut arena, scope) = arena_with_method_scope();
    let method = parse_one(&mut arena, scope, "void emptyMethod()");
    assert_eq!(arena.statement_name(method), Some("emptyMethod"));
    assert_eq!(arena.return_type(method), Some(Arena::VOID));
    assert_eq!(arena.to_text(method), "void Test.testMethod.emptyMethod()");
}

#[test]
fn test_parse_method_with_parameters_named_after_their_types() {
    let (mut arena, scope) = arena_with_method_scope();
    let method = parse_one(&mut arena, scope, "void simpleMethod(number, text)");
    let parameters = arena.method_parameters(method).to_vec();
    assert_eq!(parameters.len(), 2);
    assert_eq!(arena.statement_name(parameters[0]), Some("number"));
    assert_eq!(arena.return_type(parameters[0]), Some(Arena::NUMBER));
    assert_eq!(arena.statement_name(parameters[1]), Some("text"));
    assert_eq!(arena.return_type(parameters[1]), Some(Arena::TEXT));
    assert_eq!(
        arena.to_text(method),
        "void Test.testMethod.simpleMethod(number, text)"
    );
}

#[test]
fn test_parse_method_with_named_parameter() {
    let (mut arena, scope) = arena_with_method_scope();
    let method = parse_one(&mut arena, scope, "void simpleMethod(number value)");
    let parameters = arena.method_parameters(method).to_vec();
    assert_eq!(parameters.len(), 1);
    assert_eq!(arena.statement_name(parameters[0]), Some("value"));
    assert_eq!(
        arena.to_text(method),
        "void Test.testMethod.simpleMethod(value)"
    );
}

#[test]
fn test_method_body_statements_use_the_method_scope() {
    let (mut arena, scope) = arena_with_method_scope();
    let method = parse_one(&mut arena, scope, "void fill() {\nvalue = 5\n}");
    let body_scope = arena.method_scope(method);
    assert_eq!(arena.children(method).len(), 1);
    let member = arena.children(method)[0];
    assert_eq!(arena.to_text(member), "value = 5");
    // Bound in the method's own scope, not the outer one.
    assert_eq!(arena.context_members(body_scope), &[member]);
    assert!(!arena.context_members(scope).contains(&member));
}

#[test]
fn test_outer_scope_is_restored_after_a_method_body() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let statements = parser
        .parse("void fill() {\ninner = 5\n}\nouter = 1")
        .unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(parser.current_context(), scope);
    assert_eq!(arena.context_members(scope), &[statements[1]]);
}

#[test]
fn test_parse_method_call() {
    let (mut arena, scope) = arena_with_method_scope();
    let call = parse_one(&mut arena, scope, "testMethod()");
    let method = arena.method_of(call).unwrap();
    assert_eq!(arena.statement_name(method), Some("testMethod"));
    assert_eq!(arena.to_text(call), "testMethod()");
}

#[test]
fn test_parse_nested_method_calls() {
    let mut arena = Arena::new();
    let context = arena.new_context(Arena::BASE, "Test").unwrap();
    let parameter = arena.new_parameter(Arena::NUMBER, "value").unwrap();
    arena
        .new_method(context, Arena::NUMBER, "double", &[parameter])
        .unwrap();
    let outer = arena.new_method(context, Arena::VOID, "testMethod", &[]).unwrap();
    let scope = arena.method_scope(outer);

    let call = parse_one(&mut arena, scope, "double(double(5))");
    assert_eq!(arena.return_type(call), Some(Arena::NUMBER));
    assert_eq!(arena.to_text(call), "double(double(5))");
}

#[test]
fn test_parse_qualified_method_call() {
    let (mut arena, scope) = arena_with_method_scope();
    let a = arena.new_context(Arena::BASE, "A").unwrap();
    let b = arena.new_context(a, "B").unwrap();
    arena.new_method(b, Arena::VOID, "run", &[]).unwrap();

    let call = parse_one(&mut arena, scope, "A.B.run()");
    let method = arena.method_of(call).unwrap();
    assert_eq!(arena.statement_name(method), Some("run"));
}

#[test]
fn test_qualified_call_with_missing_namespace() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("A.B.run()").err().unwrap();
    assert_eq!(error.name(), "ChildContextNotFound");
}

#[test]
fn test_call_to_unknown_method() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("missing()").err().unwrap();
    assert_eq!(error.name(), "MethodNotFound");
}

#[test]
fn test_parsing_failed_carries_the_offending_position() {
    let (mut arena, scope) = arena_with_method_scope();
    let mut parser = Parser::new(&mut arena, scope).unwrap();
    let error = parser.parse("abc = #").err().unwrap();
    assert_eq!(error.name(), "ParsingFailed");
    assert_eq!(error.position().unwrap().0, 6);
}
