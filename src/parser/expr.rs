use crate::errors::errors::Error;
use crate::lexer::tokens::{Token, TokenKind};
use crate::Span;

use super::lookups::BindingPower;
use super::parse_tree::ParseNode;
use super::parser::SyntaxParser;

pub fn parse_expr(parser: &mut SyntaxParser, bp: BindingPower) -> Result<ParseNode, Error> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(&handler) => handler,
        None => return Err(parser.unexpected()),
    };
    let mut left = nud(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if next_bp <= bp {
            break;
        }
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(&handler) => handler,
            None => return Err(parser.unexpected()),
        };
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut SyntaxParser) -> Result<ParseNode, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance();
            // Integer and floating literals both land in the one
            // number kind.
            let value = match token.value.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    return Err(Error::ParsingFailed {
                        message: format!("invalid number literal {:?}", token.value),
                        position: token.span.start,
                    })
                }
            };
            Ok(ParseNode::Number {
                value,
                span: token.span,
            })
        }
        TokenKind::Text => {
            let token = parser.advance();
            Ok(ParseNode::Text {
                value: token.value,
                span: token.span,
            })
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(ParseNode::Bool {
                value: token.kind == TokenKind::True,
                span: token.span,
            })
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(ParseNode::Symbol {
                name: token.value,
                span: token.span,
            })
        }
        _ => Err(parser.unexpected()),
    }
}

pub fn parse_binary_expr(
    parser: &mut SyntaxParser,
    left: ParseNode,
    bp: BindingPower,
) -> Result<ParseNode, Error> {
    let mut operator = parser.advance();
    // "is not" spelled as two tokens folds into the isnot operator.
    if operator.kind == TokenKind::Is && parser.current_token_kind() == TokenKind::Not {
        parser.advance();
        operator = Token {
            kind: TokenKind::IsNot,
            value: String::from("isnot"),
            span: operator.span,
        };
    }

    let right = parse_expr(parser, bp)?;
    let span = Span {
        start: left.span().start.clone(),
        end: right.span().end.clone(),
    };
    Ok(ParseNode::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        span,
    })
}

pub fn parse_prefix_expr(parser: &mut SyntaxParser) -> Result<ParseNode, Error> {
    let operator = parser.advance();
    let value = parse_expr(parser, BindingPower::Unary)?;
    let span = Span {
        start: operator.span.start.clone(),
        end: value.span().end.clone(),
    };
    if operator.kind == TokenKind::Not {
        Ok(ParseNode::Not {
            value: Box::new(value),
            span,
        })
    } else {
        Ok(ParseNode::Negate {
            value: Box::new(value),
            span,
        })
    }
}

pub fn parse_assignment_expr(
    parser: &mut SyntaxParser,
    left: ParseNode,
    _bp: BindingPower,
) -> Result<ParseNode, Error> {
    let name = match left {
        ParseNode::Symbol { name, .. } => name,
        // Catches chained assignment ("a = a = 5") too: the second
        // `=` arrives with an assignment node on the left.
        other => {
            return Err(Error::ParsingFailed {
                message: String::from("invalid assignment target"),
                position: other.span().start.clone(),
            })
        }
    };
    let start = parser.current_token().span.start.clone();
    parser.advance();
    let value = parse_expr(parser, BindingPower::Assignment)?;
    let span = Span {
        start,
        end: value.span().end.clone(),
    };
    Ok(ParseNode::Assignment {
        name,
        value: Box::new(value),
        span,
    })
}

pub fn parse_call_expr(
    parser: &mut SyntaxParser,
    left: ParseNode,
    _bp: BindingPower,
) -> Result<ParseNode, Error> {
    let (qualifier, name, start) = match left {
        ParseNode::Symbol { name, span } => (vec![], name, span.start),
        ParseNode::Qualified { mut parts, span } => {
            let name = parts.pop().unwrap();
            (parts, name, span.start)
        }
        other => {
            return Err(Error::ParsingFailed {
                message: String::from("only identifiers can be called"),
                position: other.span().start.clone(),
            })
        }
    };
    parser.advance();

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }
        arguments.push(parse_expr(parser, BindingPower::Default)?);
    }
    let close = parser.expect(TokenKind::CloseParen)?;

    let span = Span {
        start,
        end: close.span.end,
    };
    Ok(ParseNode::Call {
        qualifier,
        name,
        arguments,
        span,
    })
}

pub fn parse_qualifier_expr(
    parser: &mut SyntaxParser,
    left: ParseNode,
    _bp: BindingPower,
) -> Result<ParseNode, Error> {
    let (mut parts, start) = match left {
        ParseNode::Symbol { name, span } => (vec![name], span.start),
        ParseNode::Qualified { parts, span } => (parts, span.start),
        other => {
            return Err(Error::ParsingFailed {
                message: String::from("only identifiers can be qualified"),
                position: other.span().start.clone(),
            })
        }
    };
    parser.advance();
    let segment = parser.expect(TokenKind::Identifier)?;
    parts.push(segment.value);

    let span = Span {
        start,
        end: segment.span.end,
    };
    Ok(ParseNode::Qualified { parts, span })
}
