//! Comment block scanner and directive grammars.
//!
//! A block is scanned line by line. Until the first `@fuzz interface:` only
//! that directive is recognised; afterwards the harness-only directives
//! mutate the open [`HarnessSpec`]. Any directive failure aborts the block.

use super::spec::{Comparator, ComparatorStyle, Generator, HarnessSpec};
use crate::error::{DirectiveError, ParseError};
use crate::syntax::scan::{comment_line, match_prefix};
use crate::syntax::{parse_name, parse_type, Type};
use tracing::debug;

/// `@fuzz interface: Name`
pub const FUZZ_INTERFACE: &str = "@fuzz interface:";
/// `@known correct: [&] Name Type*`
pub const KNOWN_CORRECT: &str = "@known correct:";
/// `@comparison: Type:Name | Name Type`
pub const COMPARISON: &str = "@comparison:";
/// `@generator: [!] Name Type`
pub const GENERATOR: &str = "@generator:";
/// `@generator state: Expression`
pub const GENERATOR_STATE: &str = "@generator state:";
/// `@invariant: Expression`
pub const INVARIANT: &str = "@invariant:";

type DirectiveResult<T> = Result<T, DirectiveError>;

/// A recognised directive line with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive<'a> {
    FuzzInterface(&'a str),
    KnownCorrect(&'a str),
    Comparison(&'a str),
    Generator(&'a str),
    GeneratorState(&'a str),
    Invariant(&'a str),
}

impl<'a> Directive<'a> {
    fn classify(line: &'a str) -> Option<Self> {
        let table: [(&str, fn(&'a str) -> Directive<'a>); 6] = [
            (FUZZ_INTERFACE, Directive::FuzzInterface),
            (KNOWN_CORRECT, Directive::KnownCorrect),
            (COMPARISON, Directive::Comparison),
            (GENERATOR, Directive::Generator),
            (GENERATOR_STATE, Directive::GeneratorState),
            (INVARIANT, Directive::Invariant),
        ];
        table
            .iter()
            .find_map(|(prefix, make)| match_prefix(line, prefix).map(make))
    }

    fn keyword(&self) -> &'static str {
        match self {
            Directive::FuzzInterface(_) => FUZZ_INTERFACE,
            Directive::KnownCorrect(_) => KNOWN_CORRECT,
            Directive::Comparison(_) => COMPARISON,
            Directive::Generator(_) => GENERATOR,
            Directive::GeneratorState(_) => GENERATOR_STATE,
            Directive::Invariant(_) => INVARIANT,
        }
    }

    /// Apply a harness-only directive to the open specification.
    fn apply(self, spec: &mut HarnessSpec) -> DirectiveResult<()> {
        match self {
            Directive::FuzzInterface(_) => {}
            Directive::KnownCorrect(payload) => {
                let (name, params, by_value) = parse_known_correct(payload)?;
                spec.set_reference(name, params, by_value);
            }
            Directive::Comparison(payload) => {
                spec.add_comparator(parse_comparison(payload)?);
            }
            Directive::Generator(payload) => {
                let (ty, generator) = parse_generator(payload)?;
                spec.add_generator(&ty, generator);
            }
            Directive::GeneratorState(payload) => {
                spec.generator_state = Some(parse_generator_state(payload)?);
            }
            Directive::Invariant(payload) => {
                spec.invariants.push(parse_invariant(payload)?);
            }
        }
        Ok(())
    }
}

/// Parse every comment block, collecting one error per failing block.
///
/// Specifications come back in the order their `@fuzz interface:` lines
/// appear; a failing block contributes no specifications.
pub fn parse_harnesses<S: AsRef<str>>(blocks: &[S]) -> (Vec<HarnessSpec>, Vec<ParseError>) {
    let mut specs = Vec::new();
    let mut errors = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        match parse_block(index, block.as_ref()) {
            Ok(found) => specs.extend(found),
            Err(err) => {
                debug!(block = index, error = %err, "rejected comment block");
                errors.push(err);
            }
        }
    }

    (specs, errors)
}

/// Parse one comment block into zero or more harness specifications.
pub fn parse_block(index: usize, block: &str) -> Result<Vec<HarnessSpec>, ParseError> {
    let mut sealed = Vec::new();
    let mut current: Option<HarnessSpec> = None;

    for (number, raw) in block.lines().enumerate() {
        let fail = |kind| ParseError {
            block: index,
            line: number + 1,
            kind,
        };

        let directive = match Directive::classify(comment_line(raw)) {
            Some(directive) => directive,
            None => continue,
        };

        if let Directive::FuzzInterface(payload) = directive {
            let name = parse_fuzz_interface(payload).map_err(fail)?;
            debug!(block = index, interface = %name, "harness start");
            if let Some(done) = current.replace(HarnessSpec::new(name)) {
                sealed.push(done);
            }
            continue;
        }

        match current.as_mut() {
            Some(spec) => directive.apply(spec).map_err(fail)?,
            None => {
                let keyword = directive.keyword().to_string();
                return Err(fail(DirectiveError::OutsideHarness(keyword)));
            }
        }
    }

    sealed.extend(current);
    Ok(sealed)
}

/// SYNTAX: Name
pub fn parse_fuzz_interface(line: &str) -> DirectiveResult<String> {
    let (name, rest) = parse_name(line);
    if name.is_empty() {
        return Err(DirectiveError::ExpectedName(line.to_string()));
    }
    if !rest.is_empty() {
        return Err(leftover(line, rest));
    }
    Ok(name.to_string())
}

/// SYNTAX: [&] FunctionName [ArgType1 ... ArgTypeN]
///
/// Returns the constructor name, its parameter types, and whether it
/// returns a value rather than a reference.
pub fn parse_known_correct(line: &str) -> DirectiveResult<(String, Vec<Type>, bool)> {
    if line.is_empty() {
        return Err(DirectiveError::EmptyReference);
    }

    let (line, by_value) = match match_prefix(line, "&") {
        Some(rest) => (rest, true),
        None => (line, false),
    };

    let (name, mut rest) = parse_name(line);
    if name.is_empty() {
        return Err(DirectiveError::MissingReferenceName(line.to_string()));
    }

    let mut params = Vec::new();
    while !rest.is_empty() {
        let (ty, next) = parse_type(rest)?;
        params.push(ty);
        rest = next;
    }

    Ok((name.to_string(), params, by_value))
}

/// SYNTAX: (Type:FunctionName | FunctionName Type)
pub fn parse_comparison(line: &str) -> DirectiveResult<Comparator> {
    let (comparator, rest) = parse_function_or_method(line)?;
    if !rest.is_empty() {
        return Err(leftover(line, rest));
    }
    Ok(comparator)
}

/// SYNTAX: [!] FunctionName Type
pub fn parse_generator(line: &str) -> DirectiveResult<(Type, Generator)> {
    let (line, stateful) = match match_prefix(line, "!") {
        Some(rest) => (rest, true),
        None => (line, false),
    };

    let (name, rest) = parse_name(line);
    if name.is_empty() {
        return Err(DirectiveError::ExpectedName(line.to_string()));
    }

    let (ty, rest) = parse_type(rest)?;
    if !rest.is_empty() {
        return Err(leftover(line, rest));
    }

    let generator = Generator {
        name: name.to_string(),
        stateful,
    };
    Ok((ty, generator))
}

/// SYNTAX: Expression
///
/// Only presence is checked.
pub fn parse_generator_state(line: &str) -> DirectiveResult<String> {
    if line.is_empty() {
        return Err(DirectiveError::EmptyGeneratorState);
    }
    Ok(line.to_string())
}

/// SYNTAX: Expression
///
/// Only presence is checked.
pub fn parse_invariant(line: &str) -> DirectiveResult<String> {
    if line.is_empty() {
        return Err(DirectiveError::EmptyInvariant);
    }
    Ok(line.to_string())
}

/// Parse a function or a method, returning the remainder.
///
/// Names and types overlap, so both readings are tried. A type followed
/// by `:` is a method; otherwise a name followed by a type is a function.
pub fn parse_function_or_method(line: &str) -> DirectiveResult<(Comparator, &str)> {
    if let Some((ty, after_colon)) = try_method_receiver(line) {
        let (name, rest) = parse_name(after_colon);
        if name.is_empty() {
            return Err(DirectiveError::ExpectedName(line.to_string()));
        }
        let comparator = Comparator {
            name: name.to_string(),
            style: ComparatorStyle::Method,
            ty,
        };
        return Ok((comparator, rest));
    }

    let (name, after_name) = parse_name(line);
    if name.is_empty() {
        return Err(DirectiveError::NotFunctionOrMethod(line.to_string()));
    }

    let (ty, rest) = parse_type(after_name)?;
    let comparator = Comparator {
        name: name.to_string(),
        style: ComparatorStyle::Function,
        ty,
    };
    Ok((comparator, rest))
}

/// `Type :` prefix of a method comparator, with the text after the colon.
fn try_method_receiver(line: &str) -> Option<(Type, &str)> {
    let (ty, rest) = parse_type(line).ok()?;
    let after_colon = match_prefix(rest, ":")?;
    Some((ty, after_colon))
}

fn leftover(line: &str, rest: &str) -> DirectiveError {
    DirectiveError::LeftoverInput {
        line: line.to_string(),
        rest: rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TypeError;

    #[test]
    fn test_classify_distinguishes_generator_state() {
        assert_eq!(
            Directive::classify("@generator state: uint(0)"),
            Some(Directive::GeneratorState("uint(0)"))
        );
        assert_eq!(
            Directive::classify("@generator: gen int"),
            Some(Directive::Generator("gen int"))
        );
        assert_eq!(Directive::classify("@generators: gen int"), None);
        assert_eq!(Directive::classify("plain text"), None);
    }

    #[test]
    fn test_fuzz_interface_requires_single_name() {
        assert_eq!(parse_fuzz_interface("Store"), Ok("Store".to_string()));
        assert_eq!(
            parse_fuzz_interface(""),
            Err(DirectiveError::ExpectedName(String::new()))
        );
        assert_eq!(
            parse_fuzz_interface("Store extra"),
            Err(DirectiveError::LeftoverInput {
                line: "Store extra".into(),
                rest: "extra".into()
            })
        );
    }

    #[test]
    fn test_known_correct_variants() {
        assert_eq!(
            parse_known_correct("& makeReferenceStore int"),
            Ok(("makeReferenceStore".into(), vec![Type::named("int")], true))
        );
        assert_eq!(
            parse_known_correct("newStore"),
            Ok(("newStore".into(), vec![], false))
        );
        assert_eq!(
            parse_known_correct("mk []int *(model.ID) map[string]int"),
            Ok((
                "mk".into(),
                vec![
                    Type::array(Type::named("int")),
                    Type::pointer(Type::qualified("model", "ID")),
                    Type::map(Type::named("string"), Type::named("int")),
                ],
                false
            ))
        );
    }

    #[test]
    fn test_known_correct_errors() {
        assert_eq!(parse_known_correct(""), Err(DirectiveError::EmptyReference));
        assert_eq!(
            parse_known_correct("&"),
            Err(DirectiveError::MissingReferenceName(String::new()))
        );
        assert_eq!(
            parse_known_correct("mk (int"),
            Err(DirectiveError::Type(TypeError::MismatchedParentheses(
                "(int".into()
            )))
        );
    }

    #[test]
    fn test_comparison_method_form() {
        let cmp = parse_comparison("*MessageIterator:Equal").unwrap();
        assert_eq!(cmp.style, ComparatorStyle::Method);
        assert_eq!(cmp.name, "Equal");
        assert_eq!(cmp.ty, Type::pointer(Type::named("MessageIterator")));

        let cmp = parse_comparison("model.ID : Same").unwrap();
        assert_eq!(cmp.style, ComparatorStyle::Method);
        assert_eq!(cmp.ty, Type::qualified("model", "ID"));
    }

    #[test]
    fn test_comparison_function_form() {
        let cmp = parse_comparison("compareMessageIterators *MessageIterator").unwrap();
        assert_eq!(cmp.style, ComparatorStyle::Function);
        assert_eq!(cmp.name, "compareMessageIterators");
        assert_eq!(cmp.ty.render(), "*(MessageIterator)");
    }

    #[test]
    fn test_comparison_errors() {
        assert_eq!(
            parse_comparison("[]int"),
            Err(DirectiveError::NotFunctionOrMethod("[]int".into()))
        );
        assert_eq!(
            parse_comparison("T:"),
            Err(DirectiveError::ExpectedName("T:".into()))
        );
        assert_eq!(
            parse_comparison("eq int int"),
            Err(DirectiveError::LeftoverInput {
                line: "eq int int".into(),
                rest: "int".into()
            })
        );
        assert!(matches!(
            parse_comparison("eq"),
            Err(DirectiveError::Type(TypeError::ExpectedType(_)))
        ));
    }

    #[test]
    fn test_generator_variants() {
        let (ty, generator) = parse_generator("generateChannel model.Channel").unwrap();
        assert_eq!(ty, Type::qualified("model", "Channel"));
        assert!(!generator.stateful);

        let (ty, generator) = parse_generator("! generateID model.ID").unwrap();
        assert_eq!(ty.render(), "model.ID");
        assert_eq!(generator.name, "generateID");
        assert!(generator.stateful);
    }

    #[test]
    fn test_generator_errors() {
        assert_eq!(
            parse_generator(""),
            Err(DirectiveError::ExpectedName(String::new()))
        );
        assert_eq!(
            parse_generator("gen int extra"),
            Err(DirectiveError::LeftoverInput {
                line: "gen int extra".into(),
                rest: "extra".into()
            })
        );
    }

    #[test]
    fn test_opaque_payloads_require_presence() {
        assert_eq!(parse_generator_state("uint(0)"), Ok("uint(0)".to_string()));
        assert_eq!(parse_generator_state(""), Err(DirectiveError::EmptyGeneratorState));
        assert_eq!(parse_invariant(""), Err(DirectiveError::EmptyInvariant));
    }

    #[test]
    fn test_block_error_carries_position() {
        let block = "@fuzz interface: Store\n\n@generator: gen (int";
        let err = parse_block(3, block).unwrap_err();
        assert_eq!(err.block, 3);
        assert_eq!(err.line, 3);
    }
}
