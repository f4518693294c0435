use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("context names cannot be empty")]
    ContextNameCannotBeEmpty,
    #[error("name {name:?} should not contain dots")]
    NameShouldNotContainDots { name: String },
    #[error("context name {name:?} must start with an upper case letter")]
    NameMustStartWithUpperCaseLetter { name: String },
    #[error("name {name:?} must start with a lower case letter")]
    NameMustStartWithLowerCaseLetter { name: String },
    #[error("context {name:?} already exists in {scope}")]
    ContextAlreadyExists { name: String, scope: String },
    #[error("a type or context only differing in case from {name:?} already exists in {scope}")]
    TypeWithThisContextNameAlreadyExists { name: String, scope: String },
    #[error("type {name:?} already exists in {scope}")]
    TypeAlreadyExists { name: String, scope: String },
    #[error("cannot create type {name:?}, the base context only holds the built-in types")]
    CannotCreateTypeInBaseContext { name: String },
    #[error("cannot create method {name:?} in the base context")]
    CannotCreateMethodInBaseContext { name: String },
    #[error("members cannot be added to the base context")]
    MembersCannotBeAddedToBaseContext,
    #[error("type {name:?} not found in {scope}")]
    TypeNotFound { name: String, scope: String },
    #[error("method {name:?} not found in {scope}")]
    MethodNotFound { name: String, scope: String },
    #[error("child context {name:?} not found in {scope}")]
    ChildContextNotFound { name: String, scope: String },
    #[error("operand types must match: {left} vs {right}")]
    TypesMustMatch { left: String, right: String },
    #[error("operator {operator:?} is not supported for type {type_name}")]
    OperatorNotSupported {
        operator: String,
        type_name: String,
    },
    #[error("arguments do not match the parameters of method {method:?}")]
    ArgumentsDoNotMatchParameters { method: String },
    #[error("member {name:?} has been invalidated and can no longer be accessed")]
    MemberIsInvalidated { name: String },
    #[error("cannot add child that already has a parent: {child}")]
    CannotAddChildThatAlreadyHasAParent { child: String },
    #[error("cannot remove child that is not linked to this parent: {child}")]
    CannotRemoveChildThatIsNotLinkedToThisParent { child: String },
    #[error("every statement needs a valid, undisposed return type")]
    StatementNeedsReturnType,
    #[error("base type {name:?} cannot be disposed")]
    BaseTypesCannotBeDisposed { name: String },
    #[error("the base context cannot be disposed")]
    BaseContextCannotBeDisposed,
    #[error("members must be defined inside a method scope")]
    MembersMustBeDefinedInMethods,
    #[error("parsers cannot use the base context as their scope")]
    ParserContextCannotBeBase,
    #[error("parsing failed at {position}: {message}")]
    ParsingFailed { message: String, position: Position },
    #[error("invalid member line in type {type_name:?}: {line:?}")]
    InvalidTypeMemberSyntax { type_name: String, line: String },
    #[error("{name:?} has no content")]
    ContentCannotBeEmpty { name: String },
    #[error("empty lines are not allowed in {name:?}")]
    EmptyLinesAreNotAllowed { name: String },
    #[error("method filename {filename:?} must contain brackets")]
    MethodFilenameMustContainBrackets { filename: String },
}

impl Error {
    pub fn name(&self) -> &'static str {
        match self {
            Error::ContextNameCannotBeEmpty => "ContextNameCannotBeEmpty",
            Error::NameShouldNotContainDots { .. } => "NameShouldNotContainDots",
            Error::NameMustStartWithUpperCaseLetter { .. } => "NameMustStartWithUpperCaseLetter",
            Error::NameMustStartWithLowerCaseLetter { .. } => "NameMustStartWithLowerCaseLetter",
            Error::ContextAlreadyExists { .. } => "ContextAlreadyExists",
            Error::TypeWithThisContextNameAlreadyExists { .. } => {
                "TypeWithThisContextNameAlreadyExists"
            }
            Error::TypeAlreadyExists { .. } => "TypeAlreadyExists",
            Error::CannotCreateTypeInBaseContext { .. } => "CannotCreateTypeInBaseContext",
            Error::CannotCreateMethodInBaseContext { .. } => "CannotCreateMethodInBaseContext",
            Error::MembersCannotBeAddedToBaseContext => "MembersCannotBeAddedToBaseContext",
            Error::TypeNotFound { .. } => "TypeNotFound",
            Error::MethodNotFound { .. } => "MethodNotFound",
            Error::ChildContextNotFound { .. } => "ChildContextNotFound",
            Error::TypesMustMatch { .. } => "TypesMustMatch",
            Error::OperatorNotSupported { .. } => "OperatorNotSupported",
            Error::ArgumentsDoNotMatchParameters { .. } => "ArgumentsDoNotMatchParameters",
            Error::MemberIsInvalidated { .. } => "MemberIsInvalidated",
            Error::CannotAddChildThatAlreadyHasAParent { .. } => {
                "CannotAddChildThatAlreadyHasAParent"
            }
            Error::CannotRemoveChildThatIsNotLinkedToThisParent { .. } => {
                "CannotRemoveChildThatIsNotLinkedToThisParent"
            }
            Error::StatementNeedsReturnType => "StatementNeedsReturnType",
            Error::BaseTypesCannotBeDisposed { .. } => "BaseTypesCannotBeDisposed",
            Error::BaseContextCannotBeDisposed => "BaseContextCannotBeDisposed",
            Error::MembersMustBeDefinedInMethods => "MembersMustBeDefinedInMethods",
            Error::ParserContextCannotBeBase => "ParserContextCannotBeBase",
            Error::ParsingFailed { .. } => "ParsingFailed",
            Error::InvalidTypeMemberSyntax { .. } => "InvalidTypeMemberSyntax",
            Error::ContentCannotBeEmpty { .. } => "ContentCannotBeEmpty",
            Error::EmptyLinesAreNotAllowed { .. } => "EmptyLinesAreNotAllowed",
            Error::MethodFilenameMustContainBrackets { .. } => "MethodFilenameMustContainBrackets",
        }
    }

    pub fn position(&self) -> Option<&Position> {
        match self {
            Error::ParsingFailed { position, .. } => Some(position),
            _ => None,
        }
    }
}
