use std::collections::HashMap;

use crate::errors::errors::Error;
use crate::lexer::tokens::TokenKind;

use super::expr::*;
use super::parse_tree::ParseNode;
use super::parser::SyntaxParser;

/// Operator precedence, loosest to tightest binding. The expression
/// loop continues while the next operator binds tighter than the
/// current level, so equal levels associate to the left.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Or,
    And,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Primary,
}

pub type NUDHandler = fn(&mut SyntaxParser) -> Result<ParseNode, Error>;
pub type LEDHandler = fn(&mut SyntaxParser, ParseNode, BindingPower) -> Result<ParseNode, Error>;

pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

pub fn create_token_lookups(parser: &mut SyntaxParser) {
    parser.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::Or, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::And, parse_binary_expr);

    // Equality; "is not" is folded into IsNot by the binary handler.
    parser.led(TokenKind::Is, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::IsNot, BindingPower::Equality, parse_binary_expr);

    // Relational; <= and >= tokenize here but have no operator
    // mapping, so the build stage rejects them.
    parser.led(TokenKind::Smaller, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::SmallerEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Bigger, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::BiggerEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::Dot, BindingPower::Call, parse_qualifier_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Text, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
}
