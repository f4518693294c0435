//! The statement tree and its arena storage.
//!
//! Every syntax-tree node is a `Node` held in the `Arena` and addressed
//! through a `NodeId` handle. Nodes own their children exclusively: a
//! node has at most one parent, and attaching an already-owned node
//! deep-copies it instead of aliasing. Contexts (scopes) live in the
//! same arena under `ContextId` handles so that types, methods and
//! members can reference each other by id without shared ownership.
//!
//! Submodules:
//! - arena: storage, handles, child ownership, equality, textual form
//! - statements: constructors for the statement kinds
//! - operators: the fixed binary operator set

pub mod arena;
pub mod operators;
pub mod statements;
