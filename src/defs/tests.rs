//! Unit tests for the definition-line grammars.

use crate::statements::arena::{Arena, ContextId};

use super::methods::method_from_lines;
use super::types::type_from_lines;

fn arena_with_test_context() -> (Arena, ContextId) {
    let mut arena = Arena::new();
    let context = arena.new_context(Arena::BASE, "Test").unwrap();
    (arena, context)
}

#[test]
fn test_type_from_typed_member_lines() {
    let (mut arena, context) = arena_with_test_context();
    let of_type = type_from_lines(&mut arena, context, "point", &["number x", "number y"]).unwrap();

    assert_eq!(arena.statement_name(of_type), Some("point"));
    let members = arena.type_members(of_type).to_vec();
    assert_eq!(members.len(), 2);
    assert_eq!(arena.statement_name(members[0]), Some("x"));
    assert_eq!(arena.return_type(members[0]), Some(Arena::NUMBER));
    assert_eq!(arena.statement_name(members[1]), Some("y"));
    assert_eq!(arena.get_type(context, "point").unwrap(), of_type);
}

#[test]
fn test_single_word_member_is_named_after_its_type() {
    let (mut arena, context) = arena_with_test_context();
    let of_type = type_from_lines(&mut arena, context, "wrapper", &["number"]).unwrap();
    let members = arena.type_members(of_type).to_vec();
    assert_eq!(arena.statement_name(members[0]), Some("number"));
    assert_eq!(arena.return_type(members[0]), Some(Arena::NUMBER));
}

#[test]
fn test_member_lines_with_literal_values() {
    let (mut arena, context) = arena_with_test_context();
    let of_type = type_from_lines(
        &mut arena,
        context,
        "settings",
        &["count = 5", "label = \"hi\"", "active = true"],
    )
    .unwrap();

    let members = arena.type_members(of_type).to_vec();
    assert_eq!(arena.to_text(members[0]), "count = 5");
    assert_eq!(arena.return_type(members[1]), Some(Arena::TEXT));
    assert_eq!(arena.to_text(members[1]), "label = \"hi\"");
    assert_eq!(arena.return_type(members[2]), Some(Arena::BOOL));
}

#[test]
fn test_type_content_cannot_be_empty() {
    let (mut arena, context) = arena_with_test_context();
    let error = type_from_lines(&mut arena, context, "empty", &[]).err().unwrap();
    assert_eq!(error.name(), "ContentCannotBeEmpty");
}

#[test]
fn test_empty_member_lines_are_not_allowed() {
    let (mut arena, context) = arena_with_test_context();
    let error = type_from_lines(&mut arena, context, "gap", &["number x", ""])
        .err()
        .unwrap();
    assert_eq!(error.name(), "EmptyLinesAreNotAllowed");
}

#[test]
fn test_invalid_member_lines_are_rejected() {
    let (mut arena, context) = arena_with_test_context();
    let error = type_from_lines(&mut arena, context, "broken", &["a b c d"])
        .err()
        .unwrap();
    assert_eq!(error.name(), "InvalidTypeMemberSyntax");
    assert!(error.to_string().contains("a b c d"));

    let error = type_from_lines(&mut arena, context, "other", &["count = nonsense"])
        .err()
        .unwrap();
    assert_eq!(error.name(), "InvalidTypeMemberSyntax");
}

#[test]
fn test_member_line_with_unknown_type() {
    let (mut arena, context) = arena_with_test_context();
    let error = type_from_lines(&mut arena, context, "bad", &["missing x"])
        .err()
        .unwrap();
    assert_eq!(error.name(), "TypeNotFound");
}

#[test]
fn test_method_from_signature_filename() {
    let (mut arena, context) = arena_with_test_context();
    let method = method_from_lines(
        &mut arena,
        context,
        "customAdd(number,number)number.method",
        &["value = 1 + 2"],
    )
    .unwrap();

    assert_eq!(arena.statement_name(method), Some("customAdd"));
    assert_eq!(arena.return_type(method), Some(Arena::NUMBER));
    let parameters = arena.method_parameters(method).to_vec();
    assert_eq!(parameters.len(), 2);
    assert_eq!(arena.statement_name(parameters[0]), Some("number"));
    assert_eq!(arena.return_type(parameters[1]), Some(Arena::NUMBER));
}

#[test]
fn test_method_return_type_defaults_to_void() {
    let (mut arena, context) = arena_with_test_context();
    let method = method_from_lines(&mut arena, context, "run()", &["value = 1"]).unwrap();
    assert_eq!(arena.return_type(method), Some(Arena::VOID));
    assert!(arena.method_parameters(method).is_empty());
}

#[test]
fn test_method_body_parses_in_its_own_scope() {
    let (mut arena, context) = arena_with_test_context();
    let method = method_from_lines(
        &mut arena,
        context,
        "fill()",
        &["first = 1", "second = first is first"],
    );
    // Bare identifiers are not values, so the second line fails.
    assert_eq!(method.err().unwrap().name(), "ParsingFailed");

    let method = method_from_lines(&mut arena, context, "fill()", &["first = 1 + 2"]).unwrap();
    let scope = arena.method_scope(method);
    assert_eq!(arena.children(method).len(), 1);
    let member = arena.children(method)[0];
    assert_eq!(arena.context_members(scope), &[member]);
    assert_eq!(arena.to_text(member), "first = 1 + 2");
}

#[test]
fn test_method_filename_must_contain_brackets() {
    let (mut arena, context) = arena_with_test_context();
    let error = method_from_lines(&mut arena, context, "broken.method", &["value = 1"])
        .err()
        .unwrap();
    assert_eq!(error.name(), "MethodFilenameMustContainBrackets");

    let error = method_from_lines(&mut arena, context, ")backwards(", &["value = 1"])
        .err()
        .unwrap();
    assert_eq!(error.name(), "MethodFilenameMustContainBrackets");
}

#[test]
fn test_method_content_cannot_be_empty() {
    let (mut arena, context) = arena_with_test_context();
    let error = method_from_lines(&mut arena, context, "run()", &[]).err().unwrap();
    assert_eq!(error.name(), "ContentCannotBeEmpty");
}
