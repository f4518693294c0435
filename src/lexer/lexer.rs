use std::rc::Rc;

use regex::Regex;

use crate::{errors::errors::Error, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: u32,
    unit: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, unit: Option<String>) -> Lexer {
        let unit_name = if let Some(unit) = unit {
            Rc::new(unit)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new("[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("[ \\t\\r]+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\"[^\"]*\"").unwrap(), handler: text_handler },
                RegexPattern { regex: Regex::new("\\n").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Newline, "\n") },
                RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
                RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
                RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SmallerEquals, "<=") },
                RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Smaller, "<") },
                RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BiggerEquals, ">=") },
                RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Bigger, ">") },
                RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
                RegexPattern { regex: Regex::new("\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
                RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
                RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
                RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
                RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
                RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
            ],
            source: String::from(source),
            unit: unit_name,
        }
    }

    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source[self.pos as usize..].chars().next().unwrap()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos as usize..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    fn position(&self) -> Position {
        Position(self.pos, Rc::clone(&self.unit))
    }

    fn span_from(&self, length: u32) -> Span {
        Span {
            start: Position(self.pos, Rc::clone(&self.unit)),
            end: Position(self.pos + length, Rc::clone(&self.unit)),
        }
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let span = lexer.span_from(matched.len() as u32);
    lexer.push(MK_TOKEN!(TokenKind::Number, matched.clone(), span));
    lexer.advance_n(matched.len() as u32);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched as u32);
}

fn text_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap();
    let literal = matched.as_str()[1..matched.end() - 1].to_string();

    let span = lexer.span_from(matched.end() as u32);
    lexer.push(MK_TOKEN!(TokenKind::Text, literal, span));
    lexer.advance_n(matched.end() as u32);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let span = lexer.span_from(value.len() as u32);
    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(*kind, value.clone(), span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value.clone(), span));
    }

    lexer.advance_n(value.len() as u32);
}

pub fn tokenize(source: &str, unit: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, unit);

    while !lex.at_eof() {
        let mut matched = false;

        for i in 0..lex.patterns.len() {
            let pattern = lex.patterns[i].clone();
            let match_here = pattern.regex.find(lex.remainder());

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, &pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::ParsingFailed {
                message: format!("unrecognised token {:?}", lex.at()),
                position: lex.position(),
            });
        }
    }

    let span = lex.span_from(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
