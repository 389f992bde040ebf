//! Type checking and program well-formedness.
//!
//! `analyze` runs one `Analyzer` traversal over a tree that has already
//! been decorated by `build_scopes`. Types are inferred bottom-up into the
//! INFERRED_TYPE attribute; every rule violation appends a `Diagnostic`.
//! Analysis is best-effort: it never stops at the first problem, and the
//! `Unknown` sentinel keeps one cause from producing a cascade of reports.

use std::fmt::Display;

use thiserror::Error;

use crate::ast::ast::{Ast, NodeId, NodeKind, NodeType};
use crate::ast::attributes::{INFERRED_TYPE, PARENT, SYMBOL_TABLE};
use crate::ast::types::{BinaryOp, DecafType, UnaryOp};
use crate::symbols::symbols::{lookup_symbol, Symbol, SymbolKind};
use crate::visitor::visitor::{traverse, Visitor};

/// A semantic error bound to a source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    internal: DiagnosticImpl,
    line: u32,
}

impl Diagnostic {
    pub fn new(internal: DiagnosticImpl, line: u32) -> Self {
        Diagnostic { internal, line }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn internal(&self) -> &DiagnosticImpl {
        &self.internal
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on line {}", self.internal, self.line)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticImpl {
    #[error("symbol '{name}' undefined")]
    UndefinedSymbol { name: String },
    #[error("program does not contain a 'main' function")]
    MissingMain,
    #[error("'main' must be a function with no parameters returning int")]
    InvalidMain,
    #[error("duplicate symbol '{name}' in the same scope")]
    DuplicateSymbol { name: String },
    #[error("variable '{name}' cannot be of type void")]
    VoidVariable { name: String },
    #[error("array '{name}' must have a positive length (was {length})")]
    InvalidArrayLength { name: String, length: i32 },
    #[error("array '{name}' may only be declared at global scope")]
    LocalArray { name: String },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: DecafType,
        found: DecafType,
    },
    #[error("invalid operands to '{op}': {left} and {right}")]
    InvalidBinaryOperands {
        op: BinaryOp,
        left: DecafType,
        right: DecafType,
    },
    #[error("invalid operand to '{op}': {found}")]
    InvalidUnaryOperand { op: UnaryOp, found: DecafType },
    #[error("array '{name}' accessed without an index")]
    MissingArrayIndex { name: String },
    #[error("array index must be an int, found {found}")]
    NonIntArrayIndex { found: DecafType },
    #[error("'{name}' is not an array and cannot be indexed")]
    NotAnArray { name: String },
    #[error("'{name}' is not a function and cannot be called")]
    NotAFunction { name: String },
    #[error("function '{name}' expects {expected} argument(s), was given {found}")]
    WrongArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {position} of call to '{name}' must be {expected}, found {found}")]
    ArgumentTypeMismatch {
        name: String,
        position: usize,
        expected: DecafType,
        found: DecafType,
    },
    #[error("condition must be a bool, found {found}")]
    NonBoolCondition { found: DecafType },
    #[error("return value must be {expected}, found {found}")]
    ReturnTypeMismatch {
        expected: DecafType,
        found: DecafType,
    },
    #[error("cannot return a value from a void function")]
    ValueReturnFromVoid,
    #[error("missing return value in function returning {expected}")]
    MissingReturnValue { expected: DecafType },
    #[error("'break' outside of a loop")]
    BreakOutsideLoop,
    #[error("'continue' outside of a loop")]
    ContinueOutsideLoop,
}

struct Analyzer {
    /// How many while loops enclose the cursor.
    loop_depth: u32,
    /// Return type of the function being visited.
    return_type: Option<DecafType>,
    diagnostics: Vec<Diagnostic>,
}

impl Analyzer {
    fn new() -> Self {
        Analyzer {
            loop_depth: 0,
            return_type: None,
            diagnostics: vec![],
        }
    }

    fn report(&mut self, internal: DiagnosticImpl, line: u32) {
        self.diagnostics.push(Diagnostic::new(internal, line));
    }

    /// Resolves a name from a node, reporting the failure once. Undefined
    /// names come back as `None` and the caller infers `Unknown` so later
    /// checks stay quiet about the same symbol.
    fn lookup_with_reporting(&mut self, ast: &Ast, node: NodeId, name: &str) -> Option<Symbol> {
        let symbol = lookup_symbol(ast, node, name).cloned();
        if symbol.is_none() {
            self.report(
                DiagnosticImpl::UndefinedSymbol {
                    name: String::from(name),
                },
                ast.node(node).source_line,
            );
        }
        symbol
    }

    fn inferred(&self, ast: &Ast, node: NodeId) -> DecafType {
        ast.node(node)
            .attributes
            .get(INFERRED_TYPE)
            .copied()
            .unwrap_or(DecafType::Unknown)
    }

    fn set_inferred(&self, ast: &mut Ast, node: NodeId, ty: DecafType) {
        ast.node_mut(node).attributes.set(INFERRED_TYPE, ty);
    }

    /// One diagnostic per duplicated name in the scope owned by this node,
    /// reported at the second occurrence.
    fn check_duplicates(&mut self, ast: &Ast, node: NodeId) {
        let Some(scope) = ast.node(node).attributes.get(SYMBOL_TABLE).copied() else {
            return;
        };
        let line = ast.node(node).source_line;
        let symbols = &ast.scope(scope).symbols;

        let mut reported: Vec<&str> = vec![];
        for (i, symbol) in symbols.iter().enumerate() {
            if reported.contains(&symbol.name.as_str()) {
                continue;
            }
            if symbols[..i].iter().any(|other| other.name == symbol.name) {
                reported.push(&symbol.name);
                self.report(
                    DiagnosticImpl::DuplicateSymbol {
                        name: symbol.name.clone(),
                    },
                    line,
                );
            }
        }
    }

    fn check_condition(&mut self, ast: &Ast, condition: NodeId) {
        let found = self.inferred(ast, condition);
        if found != DecafType::Bool && found != DecafType::Unknown {
            self.report(
                DiagnosticImpl::NonBoolCondition { found },
                ast.node(condition).source_line,
            );
        }
    }
}

impl Visitor for Analyzer {
    fn previsit_program(&mut self, ast: &mut Ast, node: NodeId) {
        self.check_duplicates(ast, node);

        let line = ast.node(node).source_line;
        match lookup_symbol(ast, node, "main") {
            None => self.report(DiagnosticImpl::MissingMain, line),
            Some(symbol) => match &symbol.kind {
                SymbolKind::Function { parameters } => {
                    if !parameters.is_empty() || symbol.ty != DecafType::Int {
                        self.report(DiagnosticImpl::InvalidMain, line);
                    }
                }
                _ => self.report(DiagnosticImpl::InvalidMain, line),
            },
        }
    }

    fn previsit_func_decl(&mut self, ast: &mut Ast, node: NodeId) {
        self.check_duplicates(ast, node);
        let NodeKind::FuncDecl { return_type, .. } = &ast.node(node).kind else {
            return;
        };
        self.return_type = Some(*return_type);
    }

    fn postvisit_func_decl(&mut self, _ast: &mut Ast, _node: NodeId) {
        self.return_type = None;
    }

    fn previsit_block(&mut self, ast: &mut Ast, node: NodeId) {
        self.check_duplicates(ast, node);
    }

    fn previsit_var_decl(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::VarDecl {
            name,
            ty,
            is_array,
            array_length,
        } = &ast.node(node).kind
        else {
            return;
        };
        let name = name.clone();
        let line = ast.node(node).source_line;

        if *ty == DecafType::Void {
            self.report(DiagnosticImpl::VoidVariable { name: name.clone() }, line);
        }

        if *is_array {
            if *array_length <= 0 {
                self.report(
                    DiagnosticImpl::InvalidArrayLength {
                        name: name.clone(),
                        length: *array_length,
                    },
                    line,
                );
            }

            let parent = ast.node(node).attributes.get(PARENT).copied();
            let at_global_scope = parent
                .map(|parent| ast.node(parent).kind.node_type() == NodeType::Program)
                .unwrap_or(false);
            if !at_global_scope {
                self.report(DiagnosticImpl::LocalArray { name }, line);
            }
        }
    }

    fn previsit_while_loop(&mut self, _ast: &mut Ast, _node: NodeId) {
        self.loop_depth += 1;
    }

    fn postvisit_while_loop(&mut self, ast: &mut Ast, node: NodeId) {
        self.loop_depth -= 1;
        let NodeKind::WhileLoop { condition, .. } = &ast.node(node).kind else {
            return;
        };
        self.check_condition(ast, *condition);
    }

    fn previsit_break(&mut self, ast: &mut Ast, node: NodeId) {
        if self.loop_depth == 0 {
            self.report(DiagnosticImpl::BreakOutsideLoop, ast.node(node).source_line);
        }
    }

    fn previsit_continue(&mut self, ast: &mut Ast, node: NodeId) {
        if self.loop_depth == 0 {
            self.report(
                DiagnosticImpl::ContinueOutsideLoop,
                ast.node(node).source_line,
            );
        }
    }

    fn previsit_literal(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::Literal { value } = &ast.node(node).kind else {
            return;
        };
        let ty = value.ty();
        self.set_inferred(ast, node, ty);
    }

    fn postvisit_location(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::Location { name, index } = &ast.node(node).kind else {
            return;
        };
        let name = name.clone();
        let index = *index;
        let line = ast.node(node).source_line;

        let Some(symbol) = self.lookup_with_reporting(ast, node, &name) else {
            self.set_inferred(ast, node, DecafType::Unknown);
            return;
        };

        match &symbol.kind {
            SymbolKind::Array { .. } => match index {
                None => {
                    self.report(DiagnosticImpl::MissingArrayIndex { name }, line);
                }
                Some(index) => {
                    let found = self.inferred(ast, index);
                    if found != DecafType::Int && found != DecafType::Unknown {
                        self.report(DiagnosticImpl::NonIntArrayIndex { found }, line);
                    }
                }
            },
            SymbolKind::Scalar | SymbolKind::Function { .. } => {
                if index.is_some() {
                    self.report(DiagnosticImpl::NotAnArray { name }, line);
                }
            }
        }

        self.set_inferred(ast, node, symbol.ty);
    }

    fn postvisit_unary_op(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::UnaryOp { op, child } = &ast.node(node).kind else {
            return;
        };
        let op = *op;
        let child = *child;
        let line = ast.node(node).source_line;

        let found = self.inferred(ast, child);
        let expected = op.operand_type();
        if found != expected && found != DecafType::Unknown {
            self.report(DiagnosticImpl::InvalidUnaryOperand { op, found }, line);
        }

        // Result follows the operator even when the operand was bad, so a
        // single mistake does not ripple outward.
        self.set_inferred(ast, node, expected);
    }

    fn postvisit_binary_op(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::BinaryOp { op, left, right } = &ast.node(node).kind else {
            return;
        };
        let op = *op;
        let (left, right) = (*left, *right);
        let line = ast.node(node).source_line;

        let left_ty = self.inferred(ast, left);
        let right_ty = self.inferred(ast, right);
        let known = left_ty != DecafType::Unknown && right_ty != DecafType::Unknown;

        let mismatch = if op.is_equality() {
            known && left_ty != right_ty
        } else {
            let expected = if op.is_logical() {
                DecafType::Bool
            } else {
                DecafType::Int
            };
            (left_ty != expected && left_ty != DecafType::Unknown)
                || (right_ty != expected && right_ty != DecafType::Unknown)
        };

        if mismatch {
            self.report(
                DiagnosticImpl::InvalidBinaryOperands {
                    op,
                    left: left_ty,
                    right: right_ty,
                },
                line,
            );
        }

        self.set_inferred(ast, node, op.result_type());
    }

    fn postvisit_assignment(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::Assignment { location, value } = &ast.node(node).kind else {
            return;
        };
        let (location, value) = (*location, *value);
        let line = ast.node(node).source_line;

        let expected = self.inferred(ast, location);
        let found = self.inferred(ast, value);
        if expected != DecafType::Unknown && found != DecafType::Unknown && expected != found {
            self.report(DiagnosticImpl::TypeMismatch { expected, found }, line);
        }
    }

    fn postvisit_conditional(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::Conditional { condition, .. } = &ast.node(node).kind else {
            return;
        };
        self.check_condition(ast, *condition);
    }

    fn postvisit_func_call(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::FuncCall { name, arguments } = &ast.node(node).kind else {
            return;
        };
        let name = name.clone();
        let arguments = arguments.clone();
        let line = ast.node(node).source_line;

        let Some(symbol) = self.lookup_with_reporting(ast, node, &name) else {
            self.set_inferred(ast, node, DecafType::Unknown);
            return;
        };

        let SymbolKind::Function { parameters } = &symbol.kind else {
            self.report(DiagnosticImpl::NotAFunction { name }, line);
            self.set_inferred(ast, node, DecafType::Unknown);
            return;
        };

        if arguments.len() != parameters.len() {
            self.report(
                DiagnosticImpl::WrongArgumentCount {
                    name,
                    expected: parameters.len(),
                    found: arguments.len(),
                },
                line,
            );
        } else {
            for (position, (argument, parameter)) in
                arguments.iter().zip(parameters.iter()).enumerate()
            {
                let found = self.inferred(ast, *argument);
                if found != parameter.ty && found != DecafType::Unknown {
                    self.report(
                        DiagnosticImpl::ArgumentTypeMismatch {
                            name: name.clone(),
                            position: position + 1,
                            expected: parameter.ty,
                            found,
                        },
                        line,
                    );
                }
            }
        }

        self.set_inferred(ast, node, symbol.ty);
    }

    fn postvisit_return(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::Return { value } = &ast.node(node).kind else {
            return;
        };
        let value = *value;
        let line = ast.node(node).source_line;
        let expected = self.return_type.unwrap_or(DecafType::Unknown);

        match value {
            Some(value) => {
                if expected == DecafType::Void {
                    self.report(DiagnosticImpl::ValueReturnFromVoid, line);
                    return;
                }
                let found = self.inferred(ast, value);
                if found != expected
                    && found != DecafType::Unknown
                    && expected != DecafType::Unknown
                {
                    self.report(DiagnosticImpl::ReturnTypeMismatch { expected, found }, line);
                }
            }
            None => {
                if expected != DecafType::Void && expected != DecafType::Unknown {
                    self.report(DiagnosticImpl::MissingReturnValue { expected }, line);
                }
            }
        }
    }
}

/// Checks a decorated tree and returns its diagnostics, in traversal
/// order. An empty list means the program is accepted. Requires
/// `build_scopes` to have run; re-running on the same tree produces the
/// same result.
pub fn analyze(ast: &mut Ast) -> Vec<Diagnostic> {
    let mut analyzer = Analyzer::new();
    let root = ast.root();
    traverse(&mut analyzer, ast, root);
    analyzer.diagnostics
}
