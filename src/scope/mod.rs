//! Scopes and the definitions they own.
//!
//! A context is a lexical scope: it owns child scopes, member bindings
//! and type registrations, and resolves lookups by walking the parent
//! chain up to the root. The root scope ("Base") holds exactly the
//! seven built-in types and never changes after construction. All
//! other scopes are created explicitly and torn down explicitly with a
//! cascading dispose.
//!
//! Submodules:
//! - scope: context construction, member binding, lookups, disposal
//! - types: type construction, operator synthesis, overload matching
//! - methods: method construction, signature matching, disposal

pub mod methods;
pub mod scope;
pub mod types;
