use crate::errors::errors::Error;

use super::arena::{Arena, Literal, NodeId, NodeKind};
use super::operators::BinaryOperator;

impl Arena {
    pub fn new_number(&mut self, value: f64) -> NodeId {
        self.new_literal(Literal::Number(value), Self::NUMBER)
    }

    pub fn new_text(&mut self, value: &str) -> NodeId {
        self.new_literal(Literal::Text(String::from(value)), Self::TEXT)
    }

    pub fn new_bool(&mut self, value: bool) -> NodeId {
        self.new_literal(Literal::Bool(value), Self::BOOL)
    }

    // Base types are never disposed, so literal construction cannot fail.
    fn new_literal(&mut self, literal: Literal, of_type: NodeId) -> NodeId {
        let id = self.insert_node(super::arena::Node {
            kind: NodeKind::Value(literal),
            return_type: Some(of_type),
            parent: None,
            children: vec![],
        });
        self.register_use(of_type, id);
        id
    }

    /// A value of a user-defined type, carrying no literal.
    pub fn new_value(&mut self, of_type: NodeId) -> Result<NodeId, Error> {
        self.new_node(
            NodeKind::Value(Literal::Instance(of_type)),
            Some(of_type),
            &[],
        )
    }

    /// Binds a name to a value. The member's return type is the value's.
    pub fn new_member(&mut self, name: &str, value: NodeId) -> Result<NodeId, Error> {
        check_lower_case_name(name)?;
        let value_type = self
            .node(value)
            .return_type
            .ok_or(Error::StatementNeedsReturnType)?;
        self.new_node(
            NodeKind::Member {
                name: String::from(name),
                invalidated: false,
            },
            Some(value_type),
            &[value],
        )
    }

    pub fn new_parameter(&mut self, of_type: NodeId, name: &str) -> Result<NodeId, Error> {
        check_lower_case_name(name)?;
        self.new_node(
            NodeKind::Parameter {
                name: String::from(name),
            },
            Some(of_type),
            &[],
        )
    }

    /// A call to an already-resolved method; the arguments must match
    /// the method's signature exactly and become the call's children.
    pub fn new_method_call(&mut self, method: NodeId, arguments: &[NodeId]) -> Result<NodeId, Error> {
        if !self.arguments_match(method, arguments) {
            return Err(Error::ArgumentsDoNotMatchParameters {
                method: self
                    .statement_name(method)
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        let return_type = self
            .node(method)
            .return_type
            .ok_or(Error::StatementNeedsReturnType)?;
        self.new_node(NodeKind::MethodCall { method }, Some(return_type), arguments)
    }

    /// Both operand types must be equal; the operator method is looked
    /// up (or synthesized) on that type and also provides the return
    /// type.
    pub fn new_binary_operation(
        &mut self,
        left: NodeId,
        operator: BinaryOperator,
        right: NodeId,
    ) -> Result<NodeId, Error> {
        let left_type = self
            .node(left)
            .return_type
            .ok_or(Error::StatementNeedsReturnType)?;
        let right_type = self
            .node(right)
            .return_type
            .ok_or(Error::StatementNeedsReturnType)?;
        if left_type != right_type {
            return Err(Error::TypesMustMatch {
                left: self.to_text(left_type),
                right: self.to_text(right_type),
            });
        }
        let method = self.binary_method(left_type, operator)?;
        self.new_node(
            NodeKind::BinaryOperation { operator, method },
            Some(left_type),
            &[left, right],
        )
    }

    /// Negation is only defined for number and bool values.
    pub fn new_negation(&mut self, value: NodeId) -> Result<NodeId, Error> {
        let value_type = self
            .node(value)
            .return_type
            .ok_or(Error::StatementNeedsReturnType)?;
        if value_type != Self::NUMBER && value_type != Self::BOOL {
            return Err(Error::OperatorNotSupported {
                operator: String::from("negate"),
                type_name: self.to_text(value_type),
            });
        }
        let method = self.negate_method(value_type)?;
        self.new_node(NodeKind::Negation { method }, Some(value_type), &[value])
    }

    /// The bound value of a member; fails once the member has been
    /// invalidated by a same-name reassignment or its owner's teardown.
    pub fn member_value(&self, member: NodeId) -> Result<NodeId, Error> {
        match &self.node(member).kind {
            NodeKind::Member { name, invalidated } => {
                if *invalidated {
                    return Err(Error::MemberIsInvalidated { name: name.clone() });
                }
                self.node(member)
                    .children
                    .first()
                    .copied()
                    .ok_or(Error::MemberIsInvalidated { name: name.clone() })
            }
            _ => panic!("member_value called on a statement that is not a member"),
        }
    }

    pub fn member_is_invalidated(&self, member: NodeId) -> bool {
        matches!(
            self.node(member).kind,
            NodeKind::Member {
                invalidated: true,
                ..
            }
        )
    }

    /// Breaks the member's usage links and clears its children; any
    /// later value access or equality check on it fails.
    pub(crate) fn invalidate_member(&mut self, member: NodeId) {
        let children = std::mem::take(&mut self.node_mut(member).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
        if let Some(of_type) = self.node(member).return_type {
            if let NodeKind::Type { used_by, .. } = &mut self.node_mut(of_type).kind {
                used_by.retain(|&user| user != member);
            }
        }
        if let NodeKind::Member { invalidated, .. } = &mut self.node_mut(member).kind {
            *invalidated = true;
        }
    }
}

pub(crate) fn check_lower_case_name(name: &str) -> Result<(), Error> {
    if name.is_empty() || !name.chars().next().unwrap().is_ascii_lowercase() {
        return Err(Error::NameMustStartWithLowerCaseLetter {
            name: String::from(name),
        });
    }
    Ok(())
}
