use crate::{
    ast::{ast::{NodeId, NodeKind, Param}, types::DecafType},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::{parse_call_args, parse_expr}, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    Err(Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a statement"),
        },
        parser.current_line(),
    ))
}

pub fn parse_type(parser: &mut Parser) -> Result<DecafType, Error> {
    let token = parser.advance().clone();
    match token.kind {
        TokenKind::Int => Ok(DecafType::Int),
        TokenKind::Bool => Ok(DecafType::Bool),
        TokenKind::Void => Ok(DecafType::Void),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from("expected a type keyword"),
            },
            token.line,
        )),
    }
}

pub fn parse_var_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let ty = parse_type(parser)?;

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected identifier during variable declaration"),
        },
        parser.current_line(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let is_array;
    let array_length;
    if parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        let length_token = parser.expect(TokenKind::Number)?;
        array_length = length_token.value.parse().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: length_token.value.clone(),
                },
                length_token.line,
            )
        })?;
        parser.expect(TokenKind::CloseBracket)?;
        is_array = true;
    } else {
        is_array = false;
        array_length = 1;
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.add_node(
        NodeKind::VarDecl {
            name,
            ty,
            is_array,
            array_length,
        },
        line,
    ))
}

pub fn parse_func_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    parser.expect(TokenKind::Def)?;

    let return_type = parse_type(parser)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if !parameters.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }
        let ty = parse_type(parser)?;
        let param_name = parser.expect(TokenKind::Identifier)?.value;
        parameters.push(Param {
            name: param_name,
            ty,
        });
    }
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(parser.add_node(
        NodeKind::FuncDecl {
            name,
            return_type,
            parameters,
            body,
        },
        line,
    ))
}

/// A block is declarations first, then statements.
pub fn parse_block(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    parser.expect(TokenKind::OpenCurly)?;

    let mut variables = vec![];
    while matches!(
        parser.current_token_kind(),
        TokenKind::Int | TokenKind::Bool | TokenKind::Void
    ) {
        variables.push(parse_var_decl(parser)?);
    }

    let mut statements = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::EOF {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected '}' to close block"),
                },
                parser.current_line(),
            ));
        }
        statements.push(parse_stmt(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(parser.add_node(
        NodeKind::Block {
            variables,
            statements,
        },
        line,
    ))
}

/// An identifier at statement position starts either an assignment or a
/// call statement.
pub fn parse_assignment_or_call_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let name = parser.expect(TokenKind::Identifier)?.value;

    if parser.current_token_kind() == TokenKind::OpenParen {
        let call = parse_call_args(parser, name, line)?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(call);
    }

    let index = if parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        let index = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseBracket)?;
        Some(index)
    } else {
        None
    };
    let location = parser.add_node(NodeKind::Location { name, index }, line);

    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.add_node(NodeKind::Assignment { location, value }, line))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let if_block = parse_block(parser)?;

    let else_block = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(parser.add_node(
        NodeKind::Conditional {
            condition,
            if_block,
            else_block,
        },
        line,
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(parser.add_node(NodeKind::WhileLoop { condition, body }, line))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    parser.advance();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.add_node(NodeKind::Return { value }, line))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    parser.advance();
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.add_node(NodeKind::Break, line))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    parser.advance();
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.add_node(NodeKind::Continue, line))
}
