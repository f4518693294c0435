use crate::errors::errors::Error;
use crate::lexer::lexer::tokenize;
use crate::lexer::tokens::{Token, TokenKind};
use crate::Position;

use super::lookups::{create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup};
use super::parse_tree::ParseNode;
use super::stmt::parse_stmt;

/// Token cursor for the syntax stage. Holds the token stream and the
/// NUD/LED/binding-power lookup tables; every failure it produces is a
/// ParsingFailed carrying the offending position.
pub struct SyntaxParser {
    tokens: Vec<Token>,
    pos: usize,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl SyntaxParser {
    pub fn new(tokens: Vec<Token>) -> SyntaxParser {
        SyntaxParser {
            tokens,
            pos: 0,
            nud_lookup: NUDLookup::new(),
            led_lookup: LEDLookup::new(),
            binding_power_lookup: BPLookup::new(),
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Token kind `offset` tokens ahead, clamped to the trailing EOF.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    /// Returns the current token and moves past it. EOF is sticky.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(Error::ParsingFailed {
                message: format!(
                    "unexpected token {:?}, expected {}",
                    self.current_token().value,
                    expected_kind
                ),
                position: self.position(),
            });
        }
        Ok(self.advance())
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    pub fn unexpected(&self) -> Error {
        Error::ParsingFailed {
            message: format!("unexpected token {:?}", self.current_token().value),
            position: self.position(),
        }
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers an infix handler with its binding power.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a prefix handler. Prefix tokens keep whatever infix
    /// binding power they already have (Dash is both).
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.current_token_kind() == TokenKind::Newline {
            self.advance();
        }
    }
}

/// Parses one unit of newline-separated statements into parse nodes.
/// An empty unit yields an empty list.
pub(crate) fn parse_unit(source: &str, unit: Option<String>) -> Result<Vec<ParseNode>, Error> {
    let tokens = tokenize(source, unit)?;
    let mut parser = SyntaxParser::new(tokens);
    create_token_lookups(&mut parser);

    let mut nodes = vec![];
    loop {
        parser.skip_newlines();
        if !parser.has_tokens() {
            break;
        }
        nodes.push(parse_stmt(&mut parser)?);
        if parser.has_tokens() {
            parser.expect(TokenKind::Newline)?;
        }
    }
    Ok(nodes)
}
