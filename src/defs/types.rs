use crate::errors::errors::Error;
use crate::statements::arena::{Arena, ContextId, NodeId};

/// Creates a type in `context` from raw member lines. Each line is
/// `name` (the type is looked up by the same token), `typeName name`,
/// or `name = literal`; anything else is invalid member syntax.
pub fn type_from_lines(
    arena: &mut Arena,
    context: ContextId,
    type_name: &str,
    member_lines: &[&str],
) -> Result<NodeId, Error> {
    if member_lines.is_empty() {
        return Err(Error::ContentCannotBeEmpty {
            name: String::from(type_name),
        });
    }
    let of_type = arena.new_type(context, type_name)?;
    for line in member_lines {
        let member = parse_member_line(arena, context, type_name, line)?;
        arena.add_type_member(of_type, member)?;
    }
    Ok(of_type)
}

fn parse_member_line(
    arena: &mut Arena,
    context: ContextId,
    type_name: &str,
    line: &str,
) -> Result<NodeId, Error> {
    if line.trim().is_empty() {
        return Err(Error::EmptyLinesAreNotAllowed {
            name: String::from(type_name),
        });
    }
    let words: Vec<&str> = line.split(' ').collect();
    match words.as_slice() {
        &[name] => typed_member(arena, context, name, name),
        &[member_type, name] => typed_member(arena, context, member_type, name),
        &[name, "=", literal] => match literal_value(arena, literal) {
            Some(value) => arena.new_member(name, value),
            None => Err(invalid_member_syntax(type_name, line)),
        },
        _ => Err(invalid_member_syntax(type_name, line)),
    }
}

fn typed_member(
    arena: &mut Arena,
    context: ContextId,
    type_name: &str,
    name: &str,
) -> Result<NodeId, Error> {
    let of_type = arena.get_type(context, type_name)?;
    let value = arena.new_value(of_type)?;
    arena.new_member(name, value)
}

fn literal_value(arena: &mut Arena, literal: &str) -> Option<NodeId> {
    if literal.len() >= 2 && literal.starts_with('"') && literal.ends_with('"') {
        return Some(arena.new_text(&literal[1..literal.len() - 1]));
    }
    if literal == "true" || literal == "false" {
        return Some(arena.new_bool(literal == "true"));
    }
    literal.parse::<f64>().ok().map(|value| arena.new_number(value))
}

fn invalid_member_syntax(type_name: &str, line: &str) -> Error {
    Error::InvalidTypeMemberSyntax {
        type_name: String::from(type_name),
        line: String::from(line),
    }
}
