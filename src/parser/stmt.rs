use crate::errors::errors::Error;
use crate::lexer::tokens::TokenKind;
use crate::Span;

use super::expr::parse_expr;
use super::lookups::BindingPower;
use super::parse_tree::{ParseNode, ParsedParameter};
use super::parser::SyntaxParser;

/// One top-level statement: a member declaration (`type name = expr`),
/// a method declaration (`type name(params)` with an optional braced
/// body), or a bare expression (which covers assignments, negations
/// and method calls).
pub fn parse_stmt(parser: &mut SyntaxParser) -> Result<ParseNode, Error> {
    if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind(1) == TokenKind::Identifier
    {
        match parser.peek_kind(2) {
            TokenKind::Assignment => return parse_member_decl_stmt(parser),
            TokenKind::OpenParen => return parse_method_decl_stmt(parser),
            _ => {}
        }
    }
    parse_expr(parser, BindingPower::Default)
}

pub fn parse_member_decl_stmt(parser: &mut SyntaxParser) -> Result<ParseNode, Error> {
    let type_token = parser.advance();
    let name_token = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Assignment)?;
    // The value binds at assignment level, so a second `=` stays in
    // the stream and fails as an unterminated statement.
    let value = parse_expr(parser, BindingPower::Assignment)?;

    let span = Span {
        start: type_token.span.start,
        end: value.span().end.clone(),
    };
    Ok(ParseNode::MemberDecl {
        type_name: type_token.value,
        name: name_token.value,
        value: Box::new(value),
        span,
    })
}

pub fn parse_method_decl_stmt(parser: &mut SyntaxParser) -> Result<ParseNode, Error> {
    let return_type_token = parser.advance();
    let name_token = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }
        let type_token = parser.expect(TokenKind::Identifier)?;
        let name = if parser.current_token_kind() == TokenKind::Identifier {
            Some(parser.advance().value)
        } else {
            None
        };
        parameters.push(ParsedParameter {
            type_name: type_token.value,
            name,
            span: type_token.span,
        });
    }
    let mut end = parser.expect(TokenKind::CloseParen)?.span.end;

    let mut body = vec![];
    if parser.current_token_kind() == TokenKind::OpenCurly {
        parser.advance();
        loop {
            parser.skip_newlines();
            if parser.current_token_kind() == TokenKind::CloseCurly {
                break;
            }
            if !parser.has_tokens() {
                return Err(parser.unexpected());
            }
            body.push(parse_stmt(parser)?);
            if parser.current_token_kind() != TokenKind::CloseCurly {
                parser.expect(TokenKind::Newline)?;
            }
        }
        end = parser.expect(TokenKind::CloseCurly)?.span.end;
    }

    let span = Span {
        start: return_type_token.span.start,
        end,
    };
    Ok(ParseNode::MethodDecl {
        return_type: return_type_token.value,
        name: name_token.value,
        parameters,
        body,
        span,
    })
}
