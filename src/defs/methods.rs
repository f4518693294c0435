use crate::errors::errors::Error;
use crate::parser::build::Parser;
use crate::statements::arena::{Arena, ContextId, NodeId};

/// Creates a method in `context` from a definition filename and raw
/// body lines. The filename carries the signature: the name before
/// '(', parameter type names inside the brackets (each parameter is
/// named after its type), and the return type name after ')', void
/// when omitted. A trailing ".method" extension is ignored.
pub fn method_from_lines(
    arena: &mut Arena,
    context: ContextId,
    filename: &str,
    body_lines: &[&str],
) -> Result<NodeId, Error> {
    let signature = filename.strip_suffix(".method").unwrap_or(filename);
    let (name, parameter_types, return_type_name) = split_signature(filename, signature)?;
    if body_lines.is_empty() {
        return Err(Error::ContentCannotBeEmpty {
            name: format!("{}.{}", arena.context_path(context), name),
        });
    }

    let return_type = arena.get_type(context, return_type_name)?;
    let mut parameters = vec![];
    for type_name in parameter_types {
        let of_type = arena.get_type(context, type_name)?;
        parameters.push(arena.new_parameter(of_type, type_name)?);
    }
    let method = arena.new_method(context, return_type, name, &parameters)?;

    let scope = arena.method_scope(method);
    let source = body_lines.join("\n");
    let mut parser = Parser::new(arena, scope)?;
    let statements = parser.parse(&source)?;
    for statement in statements {
        arena.add_child(method, statement)?;
    }
    Ok(method)
}

fn split_signature<'a>(
    filename: &str,
    signature: &'a str,
) -> Result<(&'a str, Vec<&'a str>, &'a str), Error> {
    let open = signature.find('(');
    let close = signature.find(')');
    let (open, close) = match (open, close) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => {
            return Err(Error::MethodFilenameMustContainBrackets {
                filename: String::from(filename),
            })
        }
    };
    let name = &signature[..open];
    let parameter_types = signature[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|type_name| !type_name.is_empty())
        .collect();
    let return_type_name = signature[close + 1..].trim();
    Ok((
        name,
        parameter_types,
        if return_type_name.is_empty() {
            "void"
        } else {
            return_type_name
        },
    ))
}
