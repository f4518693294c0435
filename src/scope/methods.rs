use crate::errors::errors::Error;
use crate::statements::arena::{Arena, ContextId, NodeId, NodeKind};
use crate::statements::statements::check_lower_case_name;

impl Arena {
    /// Creates a method in `context` with its own body scope, named
    /// after the method. The method registers against its return type,
    /// wherever that type is defined. Only the synthesized operator
    /// shapes (left/right or argument) may live in Base.
    pub fn new_method(
        &mut self,
        context: ContextId,
        return_type: NodeId,
        name: &str,
        parameters: &[NodeId],
    ) -> Result<NodeId, Error> {
        check_lower_case_name(name)?;
        if context == Self::BASE && !self.is_operator_signature(parameters) {
            return Err(Error::CannotCreateMethodInBaseContext {
                name: String::from(name),
            });
        }
        if !self.is_live_type(return_type) {
            return Err(Error::StatementNeedsReturnType);
        }
        let scope = self.create_context(context, name, true);
        let method = self.new_node(
            NodeKind::Method {
                name: String::from(name),
                parameters: parameters.to_vec(),
                context,
                scope,
            },
            Some(return_type),
            &[],
        )?;
        if let NodeKind::Type { methods, .. } = &mut self.node_mut(return_type).kind {
            methods.push(method);
        }
        self.context_mut(context).methods.push(method);
        Ok(method)
    }

    fn is_operator_signature(&self, parameters: &[NodeId]) -> bool {
        match parameters {
            [left, right] => {
                self.statement_name(*left) == Some("left")
                    && self.statement_name(*right) == Some("right")
            }
            [argument] => self.statement_name(*argument) == Some("argument"),
            _ => false,
        }
    }

    pub fn method_parameters(&self, method: NodeId) -> &[NodeId] {
        match &self.node(method).kind {
            NodeKind::Method { parameters, .. } => parameters,
            _ => panic!("method_parameters called on a statement that is not a method"),
        }
    }

    /// The scope the method was defined in.
    pub fn method_context(&self, method: NodeId) -> ContextId {
        match self.node(method).kind {
            NodeKind::Method { context, .. } => context,
            _ => panic!("method_context called on a statement that is not a method"),
        }
    }

    /// The method's own body scope.
    pub fn method_scope(&self, method: NodeId) -> ContextId {
        match self.node(method).kind {
            NodeKind::Method { scope, .. } => scope,
            _ => panic!("method_scope called on a statement that is not a method"),
        }
    }

    /// Adds a member as a child of the method and binds it in the
    /// method's body scope.
    pub fn add_method_member(&mut self, method: NodeId, member: NodeId) -> Result<(), Error> {
        self.add_child(method, member)?;
        let scope = self.method_scope(method);
        self.add_or_replace(scope, member)
    }

    /// Arity plus positional exact return-type equality. Empty
    /// arguments match only zero-parameter methods.
    pub fn arguments_match(&self, method: NodeId, arguments: &[NodeId]) -> bool {
        let parameters = match &self.node(method).kind {
            NodeKind::Method { parameters, .. } => parameters,
            _ => return false,
        };
        if parameters.len() != arguments.len() {
            return false;
        }
        parameters
            .iter()
            .zip(arguments.iter())
            .all(|(&parameter, &argument)| {
                self.node(parameter).return_type == self.node(argument).return_type
            })
    }

    /// Unregisters the method from its return type and its defining
    /// scope, then disposes the body scope.
    pub fn dispose_method(&mut self, method: NodeId) {
        let (context, scope) = match self.node(method).kind {
            NodeKind::Method { context, scope, .. } => (context, scope),
            _ => panic!("dispose_method called on a statement that is not a method"),
        };
        if let Some(return_type) = self.node(method).return_type {
            if let NodeKind::Type { methods, .. } = &mut self.node_mut(return_type).kind {
                methods.retain(|&m| m != method);
            }
        }
        if self.context_is_live(context) {
            self.context_mut(context).methods.retain(|&m| m != method);
            self.context_mut(context).children.retain(|&c| c != scope);
        }
        if self.context_is_live(scope) {
            self.dispose_context_tree(scope);
        }
    }
}
