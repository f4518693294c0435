use crate::errors::errors::Error;
use crate::statements::arena::{Arena, ContextId, NodeId};
use crate::statements::operators::BinaryOperator;

use super::parse_tree::ParseNode;
use super::parser::parse_unit;

/// Builds statement nodes from parsed syntax, threading one mutable
/// current scope across the unit. Entering a method body switches the
/// current scope to the method's own scope for the duration of its
/// statements, then restores the outer scope.
pub struct Parser<'a> {
    arena: &'a mut Arena,
    current_context: ContextId,
}

impl<'a> Parser<'a> {
    /// The scope must not be Base; nothing may be bound there.
    pub fn new(arena: &'a mut Arena, context: ContextId) -> Result<Parser<'a>, Error> {
        if context == Arena::BASE {
            return Err(Error::ParserContextCannotBeBase);
        }
        Ok(Parser {
            arena,
            current_context: context,
        })
    }

    pub fn current_context(&self) -> ContextId {
        self.current_context
    }

    /// Parses one unit of newline-separated statements and returns the
    /// built statements in order. An empty unit yields an empty list;
    /// any lexical or grammatical violation fails with ParsingFailed
    /// before anything is built.
    pub fn parse(&mut self, source: &str) -> Result<Vec<NodeId>, Error> {
        let nodes = parse_unit(source, None)?;
        let mut statements = vec![];
        for node in &nodes {
            statements.push(self.build(node)?);
        }
        Ok(statements)
    }

    fn build(&mut self, node: &ParseNode) -> Result<NodeId, Error> {
        match node {
            ParseNode::Number { value, .. } => Ok(self.arena.new_number(*value)),
            ParseNode::Text { value, .. } => Ok(self.arena.new_text(value)),
            ParseNode::Bool { value, .. } => Ok(self.arena.new_bool(*value)),
            ParseNode::Symbol { name, span } => Err(Error::ParsingFailed {
                message: format!("identifier {:?} is not a value", name),
                position: span.start.clone(),
            }),
            ParseNode::Qualified { parts, span } => Err(Error::ParsingFailed {
                message: format!("{:?} is not a value", parts.join(".")),
                position: span.start.clone(),
            }),
            ParseNode::Binary {
                left,
                operator,
                right,
                ..
            } => {
                let left = self.build(left)?;
                let right = self.build(right)?;
                let binary_operator = match BinaryOperator::from_text(&operator.value) {
                    Some(binary_operator) => binary_operator,
                    None => {
                        return Err(Error::ParsingFailed {
                            message: format!("operator {:?} is not supported", operator.value),
                            position: operator.span.start.clone(),
                        })
                    }
                };
                self.arena.new_binary_operation(left, binary_operator, right)
            }
            ParseNode::Negate { value, .. } | ParseNode::Not { value, .. } => {
                let value = self.build(value)?;
                self.arena.new_negation(value)
            }
            ParseNode::Assignment { name, value, .. } => {
                self.check_inside_method()?;
                let value = self.build(value)?;
                let member = self.arena.new_member(name, value)?;
                self.arena.add_or_replace(self.current_context, member)?;
                Ok(member)
            }
            ParseNode::MemberDecl {
                type_name,
                name,
                value,
                ..
            } => {
                self.check_inside_method()?;
                let declared = self.arena.get_type(self.current_context, type_name)?;
                let value = self.build(value)?;
                let value_type = self
                    .arena
                    .return_type(value)
                    .ok_or(Error::StatementNeedsReturnType)?;
                if declared != value_type {
                    return Err(Error::TypesMustMatch {
                        left: self.arena.to_text(declared),
                        right: self.arena.to_text(value_type),
                    });
                }
                let member = self.arena.new_member(name, value)?;
                self.arena.add_or_replace(self.current_context, member)?;
                Ok(member)
            }
            ParseNode::Call {
                qualifier,
                name,
                arguments,
                ..
            } => {
                let mut built = vec![];
                for argument in arguments {
                    built.push(self.build(argument)?);
                }
                let context = if qualifier.is_empty() {
                    self.current_context
                } else {
                    self.arena
                        .get_child_context(Arena::BASE, &qualifier.join("."))?
                };
                let method = self.arena.get_method(context, name, &built)?;
                self.arena.new_method_call(method, &built)
            }
            ParseNode::MethodDecl {
                return_type,
                name,
                parameters,
                body,
                ..
            } => {
                let return_type = self.arena.get_type(self.current_context, return_type)?;
                let mut built_parameters = vec![];
                for parameter in parameters {
                    let of_type = self
                        .arena
                        .get_type(self.current_context, &parameter.type_name)?;
                    let parameter_name =
                        parameter.name.as_deref().unwrap_or(parameter.type_name.as_str());
                    built_parameters.push(self.arena.new_parameter(of_type, parameter_name)?);
                }
                let method = self.arena.new_method(
                    self.current_context,
                    return_type,
                    name,
                    &built_parameters,
                )?;

                let previous_scope = self.current_context;
                self.current_context = self.arena.method_scope(method);
                let result = self.build_method_body(method, body);
                self.current_context = previous_scope;
                result?;
                Ok(method)
            }
        }
    }

    fn build_method_body(&mut self, method: NodeId, body: &[ParseNode]) -> Result<(), Error> {
        for node in body {
            let statement = self.build(node)?;
            self.arena.add_child(method, statement)?;
        }
        Ok(())
    }

    fn check_inside_method(&self) -> Result<(), Error> {
        if !self.arena.is_method_scope(self.current_context) {
            return Err(Error::MembersMustBeDefinedInMethods);
        }
        Ok(())
    }
}
