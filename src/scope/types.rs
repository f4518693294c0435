use crate::errors::errors::Error;
use crate::statements::arena::{Arena, ContextId, NodeId, NodeKind};
use crate::statements::operators::BinaryOperator;
use crate::statements::statements::check_lower_case_name;

use super::scope::upper_first;

impl Arena {
    /// Creates a type owned by `context`. The name must start lower
    /// case, must not exist anywhere up the parent chain, must not
    /// collide with a child scope differing only in first-letter case,
    /// and cannot be created in Base at all (the seven built-ins are
    /// fixed at construction).
    pub fn new_type(&mut self, context: ContextId, name: &str) -> Result<NodeId, Error> {
        check_lower_case_name(name)?;
        if self.contains_type(context, name)? {
            return Err(Error::TypeAlreadyExists {
                name: String::from(name),
                scope: self.context_path(context),
            });
        }
        if context == Self::BASE {
            return Err(Error::CannotCreateTypeInBaseContext {
                name: String::from(name),
            });
        }
        let as_context_name = upper_first(name);
        if self.contains_child_context(context, &as_context_name) {
            return Err(Error::TypeWithThisContextNameAlreadyExists {
                name: String::from(name),
                scope: self.context_path(context),
            });
        }
        let id = self.new_node(
            NodeKind::Type {
                name: String::from(name),
                context,
                members: vec![],
                methods: vec![],
                used_by: vec![],
            },
            None,
            &[],
        )?;
        self.add_type(context, id)?;
        Ok(id)
    }

    pub fn type_context(&self, of_type: NodeId) -> ContextId {
        match self.node(of_type).kind {
            NodeKind::Type { context, .. } => context,
            _ => panic!("type_context called on a statement that is not a type"),
        }
    }

    /// Ordered member fields of the type.
    pub fn type_members(&self, of_type: NodeId) -> &[NodeId] {
        match &self.node(of_type).kind {
            NodeKind::Type { members, .. } => members,
            _ => panic!("type_members called on a statement that is not a type"),
        }
    }

    /// Every method registered against this type: any method whose
    /// return type is this type, defined in any scope.
    pub fn type_methods(&self, of_type: NodeId) -> &[NodeId] {
        match &self.node(of_type).kind {
            NodeKind::Type { methods, .. } => methods,
            _ => panic!("type_methods called on a statement that is not a type"),
        }
    }

    /// Statements constructed with this return type; lookup only.
    pub fn type_used_by(&self, of_type: NodeId) -> &[NodeId] {
        match &self.node(of_type).kind {
            NodeKind::Type { used_by, .. } => used_by,
            _ => panic!("type_used_by called on a statement that is not a type"),
        }
    }

    /// Appends a member to the type's member view and its child list.
    pub fn add_type_member(&mut self, of_type: NodeId, member: NodeId) -> Result<(), Error> {
        self.add_child(of_type, member)?;
        if let NodeKind::Type { members, .. } = &mut self.node_mut(of_type).kind {
            members.push(member);
        }
        Ok(())
    }

    /// Looks up the canonical operator method ("add", "subtract", ...)
    /// on this type, synthesizing it with parameters (left, right) on
    /// first use. Repeat calls return the same method.
    pub fn binary_method(
        &mut self,
        of_type: NodeId,
        operator: BinaryOperator,
    ) -> Result<NodeId, Error> {
        let name = operator.method_name();
        if let Some(existing) = self.find_method_by_name(of_type, name) {
            return Ok(existing);
        }
        let context = self.type_context(of_type);
        let left = self.new_parameter(of_type, "left")?;
        let right = self.new_parameter(of_type, "right")?;
        self.new_method(context, of_type, name, &[left, right])
    }

    /// Negation is only defined for number and bool; the "negate"
    /// method takes a single parameter named "argument".
    pub fn negate_method(&mut self, of_type: NodeId) -> Result<NodeId, Error> {
        if of_type != Self::NUMBER && of_type != Self::BOOL {
            return Err(Error::OperatorNotSupported {
                operator: String::from("negate"),
                type_name: self.to_text(of_type),
            });
        }
        if let Some(existing) = self.find_method_by_name(of_type, "negate") {
            return Ok(existing);
        }
        let context = self.type_context(of_type);
        let argument = self.new_parameter(of_type, "argument")?;
        self.new_method(context, of_type, "negate", &[argument])
    }

    fn find_method_by_name(&self, of_type: NodeId, name: &str) -> Option<NodeId> {
        self.type_methods(of_type)
            .iter()
            .copied()
            .find(|&method| self.statement_name(method) == Some(name))
    }

    /// First method matching name and exact positional argument types.
    /// No coercion, no scoring.
    pub fn try_get_method(
        &self,
        of_type: NodeId,
        name: &str,
        arguments: &[NodeId],
    ) -> Option<NodeId> {
        self.type_methods(of_type).iter().copied().find(|&method| {
            self.statement_name(method) == Some(name) && self.arguments_match(method, arguments)
        })
    }

    /// Disposes every registered method, then detaches the type from
    /// its owning scope. The Base built-ins cannot be disposed.
    pub fn dispose_type(&mut self, of_type: NodeId) -> Result<(), Error> {
        let context = self.type_context(of_type);
        if context == Self::BASE {
            return Err(Error::BaseTypesCannotBeDisposed {
                name: self.statement_name(of_type).unwrap_or_default().to_string(),
            });
        }
        self.dispose_type_methods(of_type);
        self.remove_type(context, of_type);
        Ok(())
    }

    pub(crate) fn dispose_type_methods(&mut self, of_type: NodeId) {
        let methods = match &mut self.node_mut(of_type).kind {
            NodeKind::Type { methods, .. } => std::mem::take(methods),
            _ => panic!("dispose_type_methods called on a statement that is not a type"),
        };
        for method in methods {
            self.dispose_method(method);
        }
    }
}
