use crate::errors::errors::Error;
use crate::statements::arena::{Arena, ContextData, ContextId, NodeId, NodeKind};

impl Arena {
    /// Creates a scope under `parent`. Names must be non-empty,
    /// dot-free and start upper case; they must be unique among the
    /// parent's children and must not collide with a type of the
    /// parent differing only in first-letter case. Method body scopes
    /// are created through `new_method` instead and are exempt from
    /// the case and uniqueness rules so overloads can coexist.
    pub fn new_context(&mut self, parent: ContextId, name: &str) -> Result<ContextId, Error> {
        if name.is_empty() {
            return Err(Error::ContextNameCannotBeEmpty);
        }
        if name.contains('.') {
            return Err(Error::NameShouldNotContainDots {
                name: String::from(name),
            });
        }
        if !name.chars().next().unwrap().is_ascii_uppercase() {
            return Err(Error::NameMustStartWithUpperCaseLetter {
                name: String::from(name),
            });
        }
        if self.contains_child_context(parent, name) {
            return Err(Error::ContextAlreadyExists {
                name: String::from(name),
                scope: self.context_path(parent),
            });
        }
        let as_type_name = lower_first(name);
        if self.find_type_in_scope(parent, &as_type_name).is_some() {
            return Err(Error::TypeWithThisContextNameAlreadyExists {
                name: String::from(name),
                scope: self.context_path(parent),
            });
        }
        Ok(self.create_context(parent, name, false))
    }

    pub(crate) fn create_context(
        &mut self,
        parent: ContextId,
        name: &str,
        is_method_scope: bool,
    ) -> ContextId {
        let id = ContextId(self.contexts.len());
        self.contexts.push(Some(ContextData {
            name: String::from(name),
            parent: Some(parent),
            children: vec![],
            members: vec![],
            types: vec![],
            methods: vec![],
            is_method_scope,
        }));
        self.context_mut(parent).children.push(id);
        id
    }

    pub fn context_name(&self, context: ContextId) -> &str {
        &self.context(context).name
    }

    pub fn context_parent(&self, context: ContextId) -> Option<ContextId> {
        self.context(context).parent
    }

    pub fn child_contexts(&self, context: ContextId) -> &[ContextId] {
        &self.context(context).children
    }

    pub fn context_members(&self, context: ContextId) -> &[NodeId] {
        &self.context(context).members
    }

    pub fn context_types(&self, context: ContextId) -> &[NodeId] {
        &self.context(context).types
    }

    pub fn is_method_scope(&self, context: ContextId) -> bool {
        self.context(context).is_method_scope
    }

    pub fn context_is_disposed(&self, context: ContextId) -> bool {
        !self.context_is_live(context)
    }

    /// Dotted path of the scope, excluding the root ("Test.testMethod").
    pub fn context_path(&self, context: ContextId) -> String {
        if context == Self::BASE {
            return String::from("Base");
        }
        let mut parts = vec![];
        let mut current = Some(context);
        while let Some(id) = current {
            if id == Self::BASE {
                break;
            }
            parts.push(self.context(id).name.clone());
            current = self.context(id).parent;
        }
        parts.reverse();
        parts.join(".")
    }

    pub(crate) fn contains_child_context(&self, context: ContextId, name: &str) -> bool {
        self.context(context)
            .children
            .iter()
            .any(|&child| self.context(child).name == name)
    }

    /// Binds a member in this scope. A same-name binding in this scope
    /// is invalidated and replaced in place; a same-name binding in an
    /// ancestor scope is invalidated but stays listed in its own scope,
    /// so the accessible-members sequence still yields it.
    pub fn add_or_replace(&mut self, context: ContextId, member: NodeId) -> Result<(), Error> {
        if context == Self::BASE {
            return Err(Error::MembersCannotBeAddedToBaseContext);
        }
        let name = match &self.node(member).kind {
            NodeKind::Member { name, .. } => name.clone(),
            _ => panic!("add_or_replace called on a statement that is not a member"),
        };
        if let Some(index) = self
            .context(context)
            .members
            .iter()
            .position(|&m| self.statement_name(m) == Some(name.as_str()))
        {
            let old = self.context(context).members[index];
            self.invalidate_member(old);
            self.context_mut(context).members[index] = member;
            return Ok(());
        }
        let mut current = self.context(context).parent;
        while let Some(id) = current {
            let shadowed = self
                .context(id)
                .members
                .iter()
                .copied()
                .find(|&m| self.statement_name(m) == Some(name.as_str()));
            if let Some(old) = shadowed {
                self.invalidate_member(old);
                break;
            }
            current = self.context(id).parent;
        }
        self.context_mut(context).members.push(member);
        Ok(())
    }

    /// Lazy sequence over this scope's members, then the parent's,
    /// up to the root. Shadowed names are not de-duplicated, so a
    /// binding and its shadower can both appear.
    pub fn accessible_members(&self, context: ContextId) -> AccessibleMembers<'_> {
        AccessibleMembers {
            arena: self,
            context: Some(context),
            index: 0,
        }
    }

    pub(crate) fn add_type(&mut self, context: ContextId, of_type: NodeId) -> Result<(), Error> {
        let name = self.statement_name(of_type).unwrap_or_default().to_string();
        if self.find_type_in_scope(context, &name).is_some() {
            return Err(Error::TypeAlreadyExists {
                name,
                scope: self.context_path(context),
            });
        }
        self.context_mut(context).types.push(of_type);
        Ok(())
    }

    pub(crate) fn remove_type(&mut self, context: ContextId, of_type: NodeId) {
        self.context_mut(context).types.retain(|&t| t != of_type);
    }

    pub(crate) fn find_type_in_scope(&self, context: ContextId, name: &str) -> Option<NodeId> {
        self.context(context)
            .types
            .iter()
            .copied()
            .find(|&of_type| self.statement_name(of_type) == Some(name))
    }

    /// Exact-name type lookup walking the parent chain.
    pub fn get_type(&self, context: ContextId, name: &str) -> Result<NodeId, Error> {
        let mut current = Some(context);
        while let Some(id) = current {
            if let Some(of_type) = self.find_type_in_scope(id, name) {
                return Ok(of_type);
            }
            current = self.context(id).parent;
        }
        Err(Error::TypeNotFound {
            name: String::from(name),
            scope: self.context_path(context),
        })
    }

    pub fn contains_type(&self, context: ContextId, name: &str) -> Result<bool, Error> {
        if name.is_empty() || name.chars().next().unwrap().is_ascii_uppercase() {
            return Err(Error::NameMustStartWithLowerCaseLetter {
                name: String::from(name),
            });
        }
        let mut current = Some(context);
        while let Some(id) = current {
            if self.find_type_in_scope(id, name).is_some() {
                return Ok(true);
            }
            current = self.context(id).parent;
        }
        Ok(false)
    }

    /// Two-phase method resolution: the type of the first argument is
    /// asked first, then every type registered directly in this scope
    /// and its ancestors. A method bound to the first argument's type
    /// therefore wins over a same-named enclosing-scope method.
    pub fn get_method(
        &self,
        context: ContextId,
        name: &str,
        arguments: &[NodeId],
    ) -> Result<NodeId, Error> {
        if let Some(&first) = arguments.first() {
            if let Some(of_type) = self.node(first).return_type {
                if let Some(method) = self.try_get_method(of_type, name, arguments) {
                    return Ok(method);
                }
            }
        }
        let mut current = Some(context);
        while let Some(id) = current {
            for &of_type in &self.context(id).types {
                if let Some(method) = self.try_get_method(of_type, name, arguments) {
                    return Ok(method);
                }
            }
            current = self.context(id).parent;
        }
        Err(Error::MethodNotFound {
            name: String::from(name),
            scope: self.context_path(context),
        })
    }

    /// Navigates children by exact segment match ("A.B.C").
    pub fn get_child_context(&self, context: ContextId, path: &str) -> Result<ContextId, Error> {
        let mut current = context;
        for segment in path.split('.') {
            match self
                .context(current)
                .children
                .iter()
                .copied()
                .find(|&child| self.context(child).name == segment)
            {
                Some(child) => current = child,
                None => {
                    return Err(Error::ChildContextNotFound {
                        name: String::from(segment),
                        scope: self.context_path(current),
                    })
                }
            }
        }
        Ok(current)
    }

    /// Find-or-create navigation, building intermediate scopes as
    /// needed ("A.B" creates A under `context` and B under A).
    pub fn namespace(&mut self, context: ContextId, path: &str) -> Result<ContextId, Error> {
        let mut current = context;
        for segment in path.split('.') {
            let existing = self
                .context(current)
                .children
                .iter()
                .copied()
                .find(|&child| self.context(child).name == segment);
            current = match existing {
                Some(child) => child,
                None => self.new_context(current, segment)?,
            };
        }
        Ok(current)
    }

    /// Cascading teardown: detaches from the parent, disposes methods
    /// defined here, recursively disposes child scopes, invalidates
    /// members, strips stale method registrations and disposes owned
    /// types. Disposing an already-disposed scope is a no-op.
    pub fn dispose_context(&mut self, context: ContextId) -> Result<(), Error> {
        if context == Self::BASE {
            return Err(Error::BaseContextCannotBeDisposed);
        }
        if !self.context_is_live(context) {
            return Ok(());
        }
        if let Some(parent) = self.context(context).parent {
            self.context_mut(parent).children.retain(|&c| c != context);
        }
        self.dispose_context_tree(context);
        Ok(())
    }

    // Each node is fully unlinked before its siblings are visited, so
    // no collection is mutated mid-iteration.
    pub(crate) fn dispose_context_tree(&mut self, context: ContextId) {
        let methods = std::mem::take(&mut self.context_mut(context).methods);
        for method in methods {
            self.dispose_method(method);
        }
        loop {
            let child = match self.context(context).children.last() {
                Some(&child) => child,
                None => break,
            };
            self.context_mut(context).children.pop();
            self.dispose_context_tree(child);
        }
        let members = std::mem::take(&mut self.context_mut(context).members);
        for member in members {
            self.invalidate_member(member);
        }
        self.remove_methods_from_context(context);
        let types = std::mem::take(&mut self.context_mut(context).types);
        for of_type in types {
            self.dispose_type_methods(of_type);
        }
        self.contexts[context.0] = None;
    }

    // Methods defined in a dying scope can be registered on types
    // living further up the chain; strip those registrations.
    fn remove_methods_from_context(&mut self, context: ContextId) {
        let mut current = Some(context);
        while let Some(id) = current {
            let types = self.context(id).types.clone();
            for of_type in types {
                let registered = self.type_methods(of_type).to_vec();
                let kept: Vec<NodeId> = registered
                    .into_iter()
                    .filter(|&method| self.method_context(method) != context)
                    .collect();
                if let NodeKind::Type { methods, .. } = &mut self.node_mut(of_type).kind {
                    *methods = kept;
                }
            }
            current = self.context(id).parent;
        }
    }
}

/// Restartable iterator behind `Arena::accessible_members`.
#[derive(Clone)]
pub struct AccessibleMembers<'a> {
    arena: &'a Arena,
    context: Option<ContextId>,
    index: usize,
}

impl<'a> Iterator for AccessibleMembers<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let context = self.context?;
            let data = self.arena.context(context);
            if self.index < data.members.len() {
                self.index += 1;
                return Some(data.members[self.index - 1]);
            }
            self.context = data.parent;
            self.index = 0;
        }
    }
}

pub(crate) fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
