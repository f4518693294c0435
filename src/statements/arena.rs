use crate::errors::errors::Error;

use super::operators::BinaryOperator;

/// Handle to a statement node in the arena.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct NodeId(pub(crate) usize);

/// Handle to a context (scope) in the arena.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ContextId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Bool(bool),
    /// An instance of a user-defined type, carrying no value yet.
    Instance(NodeId),
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Value(Literal),
    Member {
        name: String,
        invalidated: bool,
    },
    Parameter {
        name: String,
    },
    MethodCall {
        method: NodeId,
    },
    BinaryOperation {
        operator: BinaryOperator,
        method: NodeId,
    },
    Negation {
        method: NodeId,
    },
    Method {
        name: String,
        parameters: Vec<NodeId>,
        context: ContextId,
        scope: ContextId,
    },
    Type {
        name: String,
        context: ContextId,
        members: Vec<NodeId>,
        methods: Vec<NodeId>,
        used_by: Vec<NodeId>,
    },
}

#[derive(Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) return_type: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

#[derive(Debug)]
pub(crate) struct ContextData {
    pub(crate) name: String,
    pub(crate) parent: Option<ContextId>,
    pub(crate) children: Vec<ContextId>,
    pub(crate) members: Vec<NodeId>,
    pub(crate) types: Vec<NodeId>,
    pub(crate) methods: Vec<NodeId>,
    pub(crate) is_method_scope: bool,
}

/// Arena holding every statement node and every context. Statement
/// slots are never reused, so handles stay stable for the arena's
/// lifetime; context slots are cleared on disposal.
pub struct Arena {
    pub(crate) nodes: Vec<Node>,
    pub(crate) contexts: Vec<Option<ContextData>>,
}

const BASE_TYPE_NAMES: [&str; 7] = ["number", "text", "bool", "list", "map", "anything", "void"];

impl Arena {
    pub const BASE: ContextId = ContextId(0);
    pub const NUMBER: NodeId = NodeId(0);
    pub const TEXT: NodeId = NodeId(1);
    pub const BOOL: NodeId = NodeId(2);
    pub const LIST: NodeId = NodeId(3);
    pub const MAP: NodeId = NodeId(4);
    pub const ANYTHING: NodeId = NodeId(5);
    pub const VOID: NodeId = NodeId(6);

    /// Creates the arena with the root context already holding the 7
    /// built-in types. The root is immutable from here on: no members,
    /// no further types, no disposal.
    pub fn new() -> Arena {
        let mut arena = Arena {
            nodes: vec![],
            contexts: vec![],
        };
        arena.contexts.push(Some(ContextData {
            name: String::from("Base"),
            parent: None,
            children: vec![],
            members: vec![],
            types: vec![],
            methods: vec![],
            is_method_scope: false,
        }));
        for name in BASE_TYPE_NAMES {
            let id = NodeId(arena.nodes.len());
            arena.nodes.push(Node {
                kind: NodeKind::Type {
                    name: String::from(name),
                    context: Self::BASE,
                    members: vec![],
                    methods: vec![],
                    used_by: vec![],
                },
                return_type: None,
                parent: None,
                children: vec![],
            });
            arena.contexts[0].as_mut().unwrap().types.push(id);
        }
        arena
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn context(&self, id: ContextId) -> &ContextData {
        self.contexts[id.0].as_ref().expect("context was disposed")
    }

    pub(crate) fn context_mut(&mut self, id: ContextId) -> &mut ContextData {
        self.contexts[id.0].as_mut().expect("context was disposed")
    }

    pub(crate) fn context_is_live(&self, id: ContextId) -> bool {
        self.contexts[id.0].is_some()
    }

    pub(crate) fn insert_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn return_type(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).return_type
    }

    /// The name of a named statement (member, parameter, method, type).
    pub fn statement_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Member { name, .. }
            | NodeKind::Parameter { name }
            | NodeKind::Method { name, .. }
            | NodeKind::Type { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The resolved method behind a call, operation or negation.
    pub fn method_of(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).kind {
            NodeKind::MethodCall { method }
            | NodeKind::BinaryOperation { method, .. }
            | NodeKind::Negation { method } => Some(method),
            _ => None,
        }
    }

    pub fn binary_operator(&self, id: NodeId) -> Option<BinaryOperator> {
        match self.node(id).kind {
            NodeKind::BinaryOperation { operator, .. } => Some(operator),
            _ => None,
        }
    }

    /// Operator text of an operation node ("+" for addition, "-" for
    /// negation).
    pub fn operator_text(&self, id: NodeId) -> Option<&'static str> {
        match self.node(id).kind {
            NodeKind::BinaryOperation { operator, .. } => Some(operator.text()),
            NodeKind::Negation { .. } => Some("-"),
            _ => None,
        }
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        if self.node(child).parent.is_some() {
            return Err(Error::CannotAddChildThatAlreadyHasAParent {
                child: self.to_text(child),
            });
        }
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        if self.node(child).parent != Some(parent) {
            return Err(Error::CannotRemoveChildThatIsNotLinkedToThisParent {
                child: self.to_text(child),
            });
        }
        self.node_mut(parent).children.retain(|&c| c != child);
        self.node_mut(child).parent = None;
        Ok(())
    }

    /// Deep copy with the parent cleared, used whenever an already-owned
    /// statement is attached somewhere else.
    pub fn clone_statement(&mut self, id: NodeId) -> NodeId {
        let kind = self.node(id).kind.clone();
        let return_type = self.node(id).return_type;
        let children = self.node(id).children.clone();
        let clone = self.insert_node(Node {
            kind,
            return_type,
            parent: None,
            children: vec![],
        });
        if let Some(of_type) = return_type {
            self.register_use(of_type, clone);
        }
        for child in children {
            let child_clone = self.clone_statement(child);
            self.node_mut(clone).children.push(child_clone);
            self.node_mut(child_clone).parent = Some(clone);
        }
        clone
    }

    pub(crate) fn new_node(
        &mut self,
        kind: NodeKind,
        return_type: Option<NodeId>,
        children: &[NodeId],
    ) -> Result<NodeId, Error> {
        if let Some(of_type) = return_type {
            if !self.is_live_type(of_type) {
                return Err(Error::StatementNeedsReturnType);
            }
        }
        let id = self.insert_node(Node {
            kind,
            return_type,
            parent: None,
            children: vec![],
        });
        if let Some(of_type) = return_type {
            self.register_use(of_type, id);
        }
        for &child in children {
            self.adopt(id, child);
        }
        Ok(id)
    }

    pub(crate) fn adopt(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        let child = if self.node(child).parent.is_some() {
            self.clone_statement(child)
        } else {
            child
        };
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        child
    }

    pub(crate) fn register_use(&mut self, of_type: NodeId, user: NodeId) {
        if let NodeKind::Type { used_by, .. } = &mut self.node_mut(of_type).kind {
            used_by.push(user);
        }
    }

    /// A type is live while its context exists and still registers it.
    pub(crate) fn is_live_type(&self, id: NodeId) -> bool {
        match &self.node(id).kind {
            NodeKind::Type { context, .. } => self.contexts[context.0]
                .as_ref()
                .is_some_and(|data| data.types.contains(&id)),
            _ => false,
        }
    }

    /// Structural equality: kind data, return type and children, never
    /// parents. Comparing an invalidated member is a fault, not `false`.
    pub fn statements_equal(&self, a: NodeId, b: NodeId) -> Result<bool, Error> {
        self.check_not_invalidated(a)?;
        self.check_not_invalidated(b)?;
        if a == b {
            return Ok(true);
        }
        let (node_a, node_b) = (self.node(a), self.node(b));
        let kinds_match = match (&node_a.kind, &node_b.kind) {
            (NodeKind::Value(x), NodeKind::Value(y)) => x == y,
            (NodeKind::Member { name: x, .. }, NodeKind::Member { name: y, .. }) => x == y,
            (NodeKind::Parameter { name: x }, NodeKind::Parameter { name: y }) => x == y,
            (NodeKind::MethodCall { method: x }, NodeKind::MethodCall { method: y }) => x == y,
            (
                NodeKind::BinaryOperation { operator: x, .. },
                NodeKind::BinaryOperation { operator: y, .. },
            ) => x == y,
            (NodeKind::Negation { .. }, NodeKind::Negation { .. }) => true,
            (
                NodeKind::Method {
                    name: x,
                    parameters: params_x,
                    ..
                },
                NodeKind::Method {
                    name: y,
                    parameters: params_y,
                    ..
                },
            ) => {
                if x != y || params_x.len() != params_y.len() {
                    false
                } else {
                    let mut all = true;
                    for (&px, &py) in params_x.iter().zip(params_y.iter()) {
                        if !self.statements_equal(px, py)? {
                            all = false;
                            break;
                        }
                    }
                    all
                }
            }
            (
                NodeKind::Type {
                    name: x,
                    context: context_x,
                    ..
                },
                NodeKind::Type {
                    name: y,
                    context: context_y,
                    ..
                },
            ) => x == y && context_x == context_y,
            _ => false,
        };
        if !kinds_match || node_a.return_type != node_b.return_type {
            return Ok(false);
        }
        if node_a.children.len() != node_b.children.len() {
            return Ok(false);
        }
        for (&child_a, &child_b) in node_a.children.iter().zip(node_b.children.iter()) {
            if !self.statements_equal(child_a, child_b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn check_not_invalidated(&self, id: NodeId) -> Result<(), Error> {
        if let NodeKind::Member {
            name,
            invalidated: true,
        } = &self.node(id).kind
        {
            return Err(Error::MemberIsInvalidated { name: name.clone() });
        }
        Ok(())
    }

    pub fn to_text(&self, id: NodeId) -> String {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Value(literal) => self.literal_text(literal),
            NodeKind::Member { name, .. } => match node.children.first() {
                Some(&value) => format!("{} = {}", name, self.to_text(value)),
                None => name.clone(),
            },
            NodeKind::Parameter { name } => name.clone(),
            NodeKind::MethodCall { method } => {
                let arguments = node
                    .children
                    .iter()
                    .map(|&child| self.to_text(child))
                    .collect::<Vec<String>>()
                    .join(", ");
                let name = self.statement_name(*method).unwrap_or_default();
                format!("{}({})", name, arguments)
            }
            NodeKind::BinaryOperation { operator, .. } => format!(
                "{} {} {}",
                self.to_text(node.children[0]),
                operator.text(),
                self.to_text(node.children[1])
            ),
            NodeKind::Negation { .. } => format!("-{}", self.to_text(node.children[0])),
            NodeKind::Method {
                parameters, scope, ..
            } => {
                let names = parameters
                    .iter()
                    .map(|&parameter| self.to_text(parameter))
                    .collect::<Vec<String>>()
                    .join(", ");
                let return_type = node
                    .return_type
                    .map(|of_type| self.to_text(of_type))
                    .unwrap_or_default();
                format!("{} {}({})", return_type, self.context_path(*scope), names)
            }
            NodeKind::Type { name, context, .. } => {
                if *context == Self::BASE {
                    name.clone()
                } else {
                    format!("{}.{}", self.context_path(*context), name)
                }
            }
        }
    }

    fn literal_text(&self, literal: &Literal) -> String {
        match literal {
            Literal::Number(value) => {
                // Integral values print without a decimal point.
                if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    format!("{}", value)
                }
            }
            Literal::Text(value) => format!("\"{}\"", value),
            Literal::Bool(value) => value.to_string(),
            Literal::Instance(of_type) => self.to_text(*of_type),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
