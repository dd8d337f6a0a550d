//! Type grammar tests.
//!
//! Exercises the public parser and canonical rendering the way directive
//! parsing and declaration loading use them.

use ifuzz::error::TypeError;
use ifuzz::syntax::{parse_type, parse_type_exact, Type};

// ============================================================================
// Canonical Rendering
// ============================================================================

#[test]
fn rendering_parenthesises_every_component() {
    let cases = [
        ("int", "int"),
        ("[]int", "[](int)"),
        ("chan int", "chan (int)"),
        ("*Store", "*(Store)"),
        ("model.ID", "model.ID"),
        ("map[string][]*model.ID", "map[string]([](*(model.ID)))"),
        ("chan chan bool", "chan (chan (bool))"),
        ("[][]byte", "[]([](byte))"),
    ];
    for (input, expected) in cases {
        let ty = parse_type_exact(input).unwrap();
        assert_eq!(ty.render(), expected, "rendering of '{}'", input);
    }
}

#[test]
fn rendering_reparses_to_same_tree() {
    for input in ["map[model.ID](chan (*(int)))", "[](map[string](bool))", "pkg.T"] {
        let ty = parse_type_exact(input).unwrap();
        assert_eq!(parse_type_exact(&ty.render()).unwrap(), ty);
    }
}

#[test]
fn redundant_parentheses_do_not_change_the_tree() {
    assert_eq!(
        parse_type_exact("((([]((int)))))").unwrap(),
        Type::array(Type::named("int"))
    );
}

#[test]
fn display_matches_render() {
    let ty = Type::map(Type::named("string"), Type::pointer(Type::qualified("m", "Msg")));
    assert_eq!(ty.to_string(), ty.render());
    assert_eq!("map[string]*m.Msg".parse::<Type>().unwrap(), ty);
}

// ============================================================================
// Remainder Handling
// ============================================================================

#[test]
fn parse_returns_trimmed_remainder() {
    let (ty, rest) = parse_type("  []int   map[a]b").unwrap();
    assert_eq!(ty, Type::array(Type::named("int")));
    assert_eq!(rest, "map[a]b");
}

#[test]
fn successive_parses_consume_a_type_list() {
    let mut rest = "int *(model.ID) chan []byte map[string]bool";
    let mut types = Vec::new();
    while !rest.is_empty() {
        let (ty, next) = parse_type(rest).unwrap();
        types.push(ty.render());
        rest = next;
    }
    assert_eq!(
        types,
        vec!["int", "*(model.ID)", "chan ([](byte))", "map[string](bool)"]
    );
}

#[test]
fn group_never_reads_past_its_close() {
    let (ty, rest) = parse_type("[](int) string").unwrap();
    assert_eq!(ty, Type::array(Type::named("int")));
    assert_eq!(rest, "string");
}

// ============================================================================
// Malformed Types
// ============================================================================

#[test]
fn unbalanced_groups_are_rejected() {
    assert!(matches!(
        parse_type("*(int"),
        Err(TypeError::MismatchedParentheses(_))
    ));
    assert!(matches!(
        parse_type_exact("(int))"),
        Err(TypeError::MismatchedParentheses(_))
    ));
}

#[test]
fn channel_prefix_inside_a_name_is_a_name() {
    assert_eq!(parse_type_exact("chanFoo").unwrap(), Type::named("chanFoo"));
}

#[test]
fn empty_and_symbolic_input_is_not_a_type() {
    assert!(matches!(parse_type(""), Err(TypeError::ExpectedType(_))));
    assert!(matches!(parse_type("&int"), Err(TypeError::ExpectedType(_))));
    assert!(matches!(parse_type("map[]int"), Err(TypeError::ExpectedType(_))));
}

#[test]
fn error_messages_name_the_fragment() {
    let err = parse_type("map[int bool").unwrap_err();
    assert!(err.to_string().contains("map[int bool"));
}

#[test]
fn missing_operand_names_the_expression() {
    assert_eq!(
        parse_type("map[int]").unwrap_err().to_string(),
        "expected a type in 'map[int]'"
    );
    assert_eq!(
        parse_type("[]*").unwrap_err().to_string(),
        "expected a type in '[]*'"
    );
}

// ============================================================================
// Serde
// ============================================================================

#[test]
fn types_serialize_as_canonical_strings() {
    let ty = parse_type_exact("[]model.ID").unwrap();
    assert_eq!(serde_json::to_string(&ty).unwrap(), r#""[](model.ID)""#);
    let back: Type = serde_json::from_str(r#""[]model.ID""#).unwrap();
    assert_eq!(back, ty);
    assert!(serde_json::from_str::<Type>(r#""map[int""#).is_err());
}
