//! Recursive descent parser for type expressions.
//!
//! Every function returns the parsed value together with the unconsumed
//! remainder, left-trimmed. Parsing is free of side effects so callers can
//! run several trial parses over the same input and pick a winner.

use super::scan::{match_keyword, match_prefix, take_name};
use super::types::Type;
use crate::error::{TypeError, MAX_TYPE_DEPTH};

/// Parse a name: a maximal run of `[a-zA-Z0-9_-]`.
///
/// Never fails; the name is empty when the input does not start with a
/// name character. The remainder has leading whitespace removed.
pub fn parse_name(s: &str) -> (&str, &str) {
    let (name, rest) = take_name(s);
    (name, rest.trim_start())
}

/// Parse one type from the start of `input`, returning it and the remainder.
pub fn parse_type(input: &str) -> Result<(Type, &str), TypeError> {
    TypeParser::new(input, MAX_TYPE_DEPTH).parse(input)
}

/// Parse `input` as exactly one type with nothing left over.
pub fn parse_type_exact(input: &str) -> Result<Type, TypeError> {
    let (ty, rest) = parse_type(input)?;
    if rest.is_empty() {
        Ok(ty)
    } else if rest.starts_with(')') {
        Err(TypeError::MismatchedParentheses(input.to_string()))
    } else {
        Err(TypeError::LeftoverInput {
            input: input.to_string(),
            rest: rest.to_string(),
        })
    }
}

/// Type parser state: the whole input, for error fragments, and the nesting depth.
struct TypeParser<'a> {
    input: &'a str,
    depth: usize,
    limit: usize,
}

impl<'a> TypeParser<'a> {
    fn new(input: &'a str, limit: usize) -> Self {
        Self {
            input,
            depth: 0,
            limit,
        }
    }

    fn parse(&mut self, input: &'a str) -> Result<(Type, &'a str), TypeError> {
        let s = input.trim_start();

        self.depth += 1;
        if self.depth > self.limit {
            return Err(TypeError::TooDeep {
                fragment: s.to_string(),
                limit: self.limit,
            });
        }

        let parsed = self.parse_constructor(s)?;
        self.depth -= 1;
        Ok(parsed)
    }

    fn parse_constructor(&mut self, s: &'a str) -> Result<(Type, &'a str), TypeError> {
        // []Type
        if let Some(rest) = match_prefix(s, "[]") {
            let (element, rest) = self.parse(rest)?;
            return Ok((Type::array(element), rest));
        }

        // chan Type
        if let Some(rest) = match_keyword(s, "chan") {
            let (element, rest) = self.parse(rest)?;
            return Ok((Type::channel(element), rest));
        }

        // map[Type]Type
        if let Some(rest) = match_prefix(s, "map[") {
            let (key, rest) = self.parse(rest)?;
            let rest = match_prefix(rest, "]")
                .ok_or_else(|| TypeError::UnclosedMapKey(s.to_string()))?;
            let (value, rest) = self.parse(rest)?;
            return Ok((Type::map(key, value), rest));
        }

        // *Type
        if let Some(rest) = match_prefix(s, "*") {
            let (target, rest) = self.parse(rest)?;
            return Ok((Type::pointer(target), rest));
        }

        // (Type)
        if let Some(rest) = match_prefix(s, "(") {
            let (inner, rest) = self.parse(rest)?;
            let rest = match_prefix(rest, ")")
                .ok_or_else(|| TypeError::MismatchedParentheses(s.to_string()))?;
            return Ok((inner, rest));
        }

        // A constructor with its operand missing: report the whole expression.
        if s.is_empty() {
            return Err(TypeError::ExpectedType(self.input.trim().to_string()));
        }

        parse_leaf(s)
    }
}

/// Name or Name.Name
fn parse_leaf(s: &str) -> Result<(Type, &str), TypeError> {
    let (name, rest) = parse_name(s);
    if name.is_empty() {
        return Err(TypeError::ExpectedType(s.to_string()));
    }

    if let Some(after_dot) = rest.strip_prefix('.') {
        let (inner, rest) = parse_name(after_dot.trim_start());
        if inner.is_empty() {
            return Err(TypeError::ExpectedQualifiedName(s.to_string()));
        }
        return Ok((Type::qualified(name, inner), rest));
    }

    Ok((Type::named(name), rest))
}
