use crate::{
    ast::{
        ast::{LiteralValue, NodeId, NodeKind},
        types::{BinaryOp, UnaryOp},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<NodeId, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.current_line(),
        ));
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.current_line(),
            ));
        };
        let next_bp = *parser.get_bp_lookup().get(&token_kind).unwrap();

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance().clone();
            let value = token.value.parse().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.line,
                )
            })?;
            Ok(parser.add_node(
                NodeKind::Literal {
                    value: LiteralValue::Int(value),
                },
                line,
            ))
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            let value = token.kind == TokenKind::True;
            Ok(parser.add_node(
                NodeKind::Literal {
                    value: LiteralValue::Bool(value),
                },
                line,
            ))
        }
        TokenKind::Str => {
            let value = parser.advance().value.clone();
            Ok(parser.add_node(
                NodeKind::Literal {
                    value: LiteralValue::Str(value),
                },
                line,
            ))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            line,
        )),
    }
}

/// An identifier in expression position is either a call, an indexed
/// location, or a plain location.
pub fn parse_location_or_call_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let name = parser.expect(TokenKind::Identifier)?.value;

    if parser.current_token_kind() == TokenKind::OpenParen {
        return parse_call_args(parser, name, line);
    }

    let index = if parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        let index = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseBracket)?;
        Some(index)
    } else {
        None
    };

    Ok(parser.add_node(NodeKind::Location { name, index }, line))
}

/// Parses the parenthesised argument list of a call whose name has already
/// been consumed.
pub fn parse_call_args(parser: &mut Parser, name: String, line: u32) -> Result<NodeId, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        } else {
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(parser.add_node(NodeKind::FuncCall { name, arguments }, line))
}

pub fn parse_binary_expr(parser: &mut Parser, left: NodeId, bp: BindingPower) -> Result<NodeId, Error> {
    let operator_token = parser.advance().clone();
    let op = match operator_token.kind {
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::Equals => BinaryOp::Eq,
        TokenKind::NotEquals => BinaryOp::NotEq,
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::LessEquals => BinaryOp::LtEq,
        TokenKind::GreaterEquals => BinaryOp::GtEq,
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value.clone(),
                },
                operator_token.line,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(parser.add_node(NodeKind::BinaryOp { op, left, right }, operator_token.line))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let operator_token = parser.advance().clone();
    let op = match operator_token.kind {
        TokenKind::Dash => UnaryOp::Neg,
        TokenKind::Not => UnaryOp::Not,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value.clone(),
                },
                operator_token.line,
            ))
        }
    };

    let child = parse_expr(parser, BindingPower::Unary)?;

    Ok(parser.add_node(NodeKind::UnaryOp { op, child }, operator_token.line))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}
