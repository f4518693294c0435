//! Definition-line grammars for the external file collaborators.
//!
//! Type and method definitions arrive as a name plus raw lines; the
//! actual file reading lives outside the core. A type definition is a
//! list of member lines, each one, two or three space-separated
//! tokens. A method definition carries its signature in the filename
//! ("customAdd(number,number)number") and its body lines are fed to
//! the statement parser inside the method's own scope.

pub mod methods;
pub mod types;

#[cfg(test)]
mod tests;
