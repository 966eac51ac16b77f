//! Converts infix expression text into a [`Node`] tree.
//!
//! The parser does not use a grammar. It scans a range of tokens once from left to right, keeping
//! track of how deeply nested in parentheses it is, and records where the operators outside of any
//! parentheses are. The range is then split on the operators of the **lowest** precedence found
//! (additive, then multiplicative, then power), and each piece is parsed the same way. Operators of
//! higher precedence end up deeper in the tree because they are split later.
//!
//! A `-` that starts a range or follows another operator or `(` is a unary minus, and is never
//! used as a split point. A unary minus directly in front of a number produces a negative literal
//! (`-2`); in front of anything else it produces `0 - operand`.

pub mod error;

use crate::{
    node::{Associativity, Node, OpKind, Precedence},
    tokenizer::{tokenize_complete, Token, TokenKind},
};
use error::{Error, kind};
use std::ops::Range;

/// The maximum nesting depth [`Parser::new`] allows.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// An operator found outside of any parentheses, and where it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SplitPoint {
    /// Index of the operator's token.
    index: usize,

    /// The operator.
    op: OpKind,
}

/// The split points of a token range, grouped by precedence.
#[derive(Debug, Default)]
struct SplitPoints {
    additive: Vec<SplitPoint>,
    multiplicative: Vec<SplitPoint>,
    power: Vec<SplitPoint>,
}

/// A parser for infix expressions. This is the type to use to parse an expression with
/// non-default settings; [`parse`] covers the common case.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source code being parsed.
    source: &'source str,

    /// The non-whitespace tokens of the source.
    tokens: Box<[Token<'source>]>,

    /// How many levels of nesting are allowed before parsing fails.
    max_depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: tokenize_complete(source),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns a span pointing at the end of the source code.
    fn eof_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    /// Returns the span of the token at the given index, or the end of the source code if there is
    /// no such token.
    fn span(&self, index: usize) -> Range<usize> {
        self.tokens
            .get(index)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Creates an error pointing at the token at the given index.
    fn error_at(&self, index: usize, kind: impl calculus_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span(index)], kind)
    }

    /// Parses the whole source into a tree.
    pub fn try_parse_full(&self) -> Result<Node, Error> {
        if self.tokens.is_empty() {
            return Err(Error::new(vec![0..self.source.len()], kind::EmptyExpression));
        }

        if let Some(token) = self.tokens.iter().find(|token| token.kind == TokenKind::Symbol) {
            return Err(Error::new(vec![token.span.clone()], kind::UnexpectedCharacter {
                found: token.lexeme.to_string(),
            }));
        }

        self.parse_range(0..self.tokens.len(), 0)
    }

    /// Parses the tokens in the given range.
    fn parse_range(&self, range: Range<usize>, depth: usize) -> Result<Node, Error> {
        if depth > self.max_depth {
            return Err(self.error_at(range.start, kind::NestingTooDeep { max_depth: self.max_depth }));
        }

        if range.is_empty() {
            return Err(self.missing_operand(range.start));
        }

        let splits = self.scan(range.clone())?;
        if !splits.additive.is_empty() {
            return self.split(range, &splits.additive, depth);
        }
        if !splits.multiplicative.is_empty() {
            return self.split(range, &splits.multiplicative, depth);
        }

        if self.tokens[range.start].kind == TokenKind::Sub {
            let next_is_number = range.start + 1 < range.end
                && self.tokens[range.start + 1].kind.is_number();

            if !next_is_number {
                let operand = self.parse_range(range.start + 1..range.end, depth + 1)?;
                return Ok(Node::binary(OpKind::Sub, Node::leaf("0"), operand));
            }

            // with a power present, the negative literal is the first segment of the split
            if splits.power.is_empty() {
                if range.len() > 2 {
                    return Err(self.error_at(range.start + 2, kind::MissingOperator));
                }
                return Ok(Node::leaf(format!("-{}", self.tokens[range.start + 1].lexeme)));
            }
        }

        if !splits.power.is_empty() {
            return self.split(range, &splits.power, depth);
        }

        self.parse_atom(range, depth)
    }

    /// Returns true if the `-` at the given index is a unary minus.
    fn is_unary(&self, index: usize, range_start: usize) -> bool {
        index == range_start || {
            let prev = self.tokens[index - 1].kind;
            prev.is_operator() || prev == TokenKind::OpenParen
        }
    }

    /// Scans the range once, recording every operator outside of parentheses.
    fn scan(&self, range: Range<usize>) -> Result<SplitPoints, Error> {
        let mut splits = SplitPoints::default();
        let mut open = Vec::new();

        for index in range.clone() {
            let token = &self.tokens[index];
            match token.kind {
                TokenKind::OpenParen => open.push(index),
                TokenKind::CloseParen => {
                    if open.pop().is_none() {
                        return Err(self.error_at(index, kind::UnclosedParenthesis { opening: false }));
                    }
                },
                token_kind if open.is_empty() => {
                    let Some(op) = OpKind::from_token(token_kind) else {
                        continue;
                    };
                    if op == OpKind::Sub && self.is_unary(index, range.start) {
                        continue;
                    }

                    let point = SplitPoint { index, op };
                    match op.precedence() {
                        Precedence::Term => splits.additive.push(point),
                        Precedence::Factor => splits.multiplicative.push(point),
                        Precedence::Exp => splits.power.push(point),
                    }
                },
                _ => (),
            }
        }

        if let Some(&index) = open.last() {
            return Err(self.error_at(index, kind::UnclosedParenthesis { opening: true }));
        }

        Ok(splits)
    }

    /// Splits the range at the given points (all of the same precedence) and builds the node.
    ///
    /// For left-associative operators, consecutive operators of the same kind share a node, and a
    /// change of operator wraps everything before it: `a+b-c` is `(a+b)-c`. Right-associative
    /// operators nest to the right in binary nodes: `a^b^c` is `a^(b^c)`.
    fn split(&self, range: Range<usize>, points: &[SplitPoint], depth: usize) -> Result<Node, Error> {
        let mut operands = Vec::with_capacity(points.len() + 1);
        let mut start = range.start;
        for point in points {
            operands.push(self.parse_range(start..point.index, depth + 1)?);
            start = point.index + 1;
        }
        operands.push(self.parse_range(start..range.end, depth + 1)?);

        match points[0].op.associativity() {
            Associativity::Left => {
                let mut operands = operands.into_iter();
                let mut children = operands.next().into_iter().collect::<Vec<_>>();
                let mut current = points[0].op;
                for (point, operand) in points.iter().zip(operands) {
                    if point.op != current {
                        let grouped = Node::internal(current, std::mem::take(&mut children));
                        children.push(grouped);
                        current = point.op;
                    }
                    children.push(operand);
                }
                Ok(Node::internal(current, children))
            },
            Associativity::Right => {
                let mut operands = operands.into_iter().rev();
                let last = operands.next().ok_or_else(|| self.missing_operand(range.end))?;
                Ok(points.iter().rev().zip(operands).fold(last, |rhs, (point, lhs)| {
                    Node::binary(point.op, lhs, rhs)
                }))
            },
        }
    }

    /// Parses a range without operators outside of parentheses: a single leaf, or one
    /// parenthesized expression.
    fn parse_atom(&self, range: Range<usize>, depth: usize) -> Result<Node, Error> {
        let first = &self.tokens[range.start];
        match first.kind {
            TokenKind::OpenParen => {
                let close = self.matching_paren(range.start, range.end)?;
                if close + 1 != range.end {
                    return Err(self.error_at(close + 1, kind::MissingOperator));
                }
                if close == range.start + 1 {
                    return Err(Error::new(
                        vec![first.span.start..self.tokens[close].span.end],
                        kind::EmptyParenthesis,
                    ));
                }
                self.parse_range(range.start + 1..close, depth + 1)
            },
            TokenKind::Name | TokenKind::Int | TokenKind::Float => {
                if range.len() > 1 {
                    return Err(self.error_at(range.start + 1, kind::MissingOperator));
                }
                Ok(Node::leaf(first.lexeme))
            },
            _ => Err(self.error_at(range.start, kind::UnexpectedCharacter {
                found: first.lexeme.to_string(),
            })),
        }
    }

    /// Returns the index of the `)` matching the `(` at `open`.
    fn matching_paren(&self, open: usize, end: usize) -> Result<usize, Error> {
        let mut depth = 0usize;
        for index in open..end {
            match self.tokens[index].kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(index);
                    }
                },
                _ => (),
            }
        }
        Err(self.error_at(open, kind::UnclosedParenthesis { opening: true }))
    }

    /// Creates an error for an empty operand starting at the given token index. The error points
    /// at the operator next to the gap.
    fn missing_operand(&self, index: usize) -> Error {
        let operator = if index > 0 { index - 1 } else { index };
        self.error_at(operator, kind::EmptyOperand)
    }
}

/// Parses the given text into a tree, using the default settings.
pub fn parse(source: &str) -> Result<Node, Error> {
    Parser::new(source).try_parse_full()
}
