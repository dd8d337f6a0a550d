//! The three generated routines.
//!
//! For an interface `Store` whose reference constructor takes an `int`:
//!
//! ```text
//! FuzzTestStore(makeTest func(int) Store, t *testing.T)
//! FuzzStore(makeTest func(int) Store, rand *rand.Rand, max uint) error
//! FuzzStoreWith(reference Store, test Store, rand *rand.Rand, maxops uint) error
//! ```
//!
//! The entry routine runs the default driver with a fixed seed, the driver
//! builds both implementations from the same random constructor arguments,
//! and the core routine performs the random operations and compares every
//! result.

use super::defaults::{comparison_template, default_generator, instantiate};
use super::naming::{actual_names, arg_names, expected_names};
use super::writer::{quote, CodeWriter};
use super::GenerateContext;
use crate::directive::{ReferenceConstructor, INVARIANT_PLACEHOLDER};
use crate::error::GenerateErrorKind;
use crate::interface::MethodSignature;
use crate::reconcile::ReconciledFuzzer;
use crate::syntax::Type;

type EmitResult<T> = Result<T, GenerateErrorKind>;

/// `FuzzTest<I>`: a test case running the default driver.
pub fn generate_entry(fuzzer: &ReconciledFuzzer, ctx: &GenerateContext) -> EmitResult<String> {
    let name = fuzzer.name();
    let reference = reference(fuzzer)?;

    let mut w = CodeWriter::new();
    w.open(format!(
        "func FuzzTest{}(makeTest {}, t *testing.T) {{",
        name,
        constructor_type(name, reference)
    ));
    w.line(format!("rand := rand.New(rand.NewSource({}))", ctx.seed));
    w.blank();
    w.line(format!("err := Fuzz{}(makeTest, rand, {})", name, ctx.iterations));
    w.blank();
    w.open("if err != nil {");
    w.line("t.Error(err)");
    w.close("}");
    w.close("}");
    Ok(w.finish())
}

/// `Fuzz<I>`: builds the reference and the tested implementation, then
/// runs the core routine on them.
pub fn generate_driver(fuzzer: &ReconciledFuzzer, _ctx: &GenerateContext) -> EmitResult<String> {
    let name = fuzzer.name();
    let reference = reference(fuzzer)?;
    let signature = &reference.signature;

    let mut w = CodeWriter::new();
    w.open(format!(
        "func Fuzz{}(makeTest {}, rand *rand.Rand, max uint) error {{",
        name,
        constructor_type(name, reference)
    ));
    declare_state(&mut w, fuzzer, &signature.params)?;
    emit_calls(&mut w, fuzzer, signature, &signature.name, "makeTest")?;
    w.blank();

    let expected = expected_names(signature);
    let actual = actual_names(signature);
    let (expected, actual) = match (expected.first(), actual.first()) {
        (Some(e), Some(a)) => (e, a),
        _ => return Err(GenerateErrorKind::MissingReference),
    };
    let address = if reference.by_value { "&" } else { "" };
    w.line(format!(
        "return Fuzz{}With({}{}, {}, rand, max)",
        name, address, expected, actual
    ));
    w.close("}");
    Ok(w.finish())
}

/// `Fuzz<I>With`: the differential loop over two implementations.
pub fn generate_core(fuzzer: &ReconciledFuzzer, ctx: &GenerateContext) -> EmitResult<String> {
    let name = fuzzer.name();
    let methods = &fuzzer.interface.methods;

    let mut w = CodeWriter::new();
    w.open(format!(
        "func Fuzz{0}With(reference {0}, test {0}, rand *rand.Rand, maxops uint) error {{",
        name
    ));

    declare_state(&mut w, fuzzer, methods.iter().flat_map(|m| m.params.iter()))?;

    w.open("for i := uint(0); i < maxops; i++ {");
    if !methods.is_empty() {
        w.line(format!("actionToPerform := rand.Intn({})", methods.len()));
        w.blank();
        w.line("switch actionToPerform {");
        for (index, method) in methods.iter().enumerate() {
            if index > 0 {
                w.blank();
            }
            w.line(format!("case {}:", index));
            w.indent();
            emit_method_case(&mut w, fuzzer, ctx, method)?;
            w.dedent();
        }
        w.line("}");
    }

    for invariant in &fuzzer.spec.invariants {
        w.blank();
        let check = invariant.replace(INVARIANT_PLACEHOLDER, "reference");
        w.open(format!("if !({}) {{", check));
        w.line(format!(
            "return errors.New({})",
            quote(&format!("invariant violated: {}", invariant))
        ));
        w.close("}");
    }
    w.close("}");
    w.blank();
    w.line("return nil");
    w.close("}");
    Ok(w.finish())
}

fn reference(fuzzer: &ReconciledFuzzer) -> EmitResult<&ReferenceConstructor> {
    fuzzer
        .spec
        .reference
        .as_ref()
        .ok_or(GenerateErrorKind::MissingReference)
}

/// `func(<params>) <I>`
fn constructor_type(name: &str, reference: &ReferenceConstructor) -> String {
    format!("func({}) {}", type_list(&reference.signature.params), name)
}

fn type_list(types: &[Type]) -> String {
    types
        .iter()
        .map(Type::render)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `state := <init>`, if any of `types` comes from a stateful generator.
fn declare_state<'a>(
    w: &mut CodeWriter,
    fuzzer: &ReconciledFuzzer,
    types: impl IntoIterator<Item = &'a Type>,
) -> EmitResult<()> {
    let Some(ty) = fuzzer.spec.first_stateful(types) else {
        return Ok(());
    };
    let init = fuzzer
        .spec
        .generator_state
        .as_deref()
        .ok_or_else(|| GenerateErrorKind::StatefulWithoutState(ty.render()))?;
    w.line("// Create initial state");
    w.line(format!("state := {}", init));
    w.blank();
    Ok(())
}

fn emit_method_case(
    w: &mut CodeWriter,
    fuzzer: &ReconciledFuzzer,
    ctx: &GenerateContext,
    method: &MethodSignature,
) -> EmitResult<()> {
    emit_calls(
        w,
        fuzzer,
        method,
        &format!("reference.{}", method.name),
        &format!("test.{}", method.name),
    )?;

    let expected = expected_names(method);
    let actual = actual_names(method);
    let location = error_location(&ctx.module, fuzzer.name(), &method.name);
    for ((ty, e), a) in method.returns.iter().zip(&expected).zip(&actual) {
        w.blank();
        w.open(format!("if !{} {{", comparison(fuzzer, ty, e, a)));
        let message = format!(
            "inconsistent result in {}\nexpected: %v\nactual:   %v",
            location
        );
        w.line(format!("return fmt.Errorf({}, {}, {})", quote(&message), e, a));
        w.close("}");
    }
    Ok(())
}

/// Declare and fill the arguments, then call both functions with them.
fn emit_calls(
    w: &mut CodeWriter,
    fuzzer: &ReconciledFuzzer,
    signature: &MethodSignature,
    expected_fn: &str,
    actual_fn: &str,
) -> EmitResult<()> {
    let args = arg_names(signature);
    if !args.is_empty() {
        w.open("var (");
        for (arg, ty) in args.iter().zip(&signature.params) {
            w.line(format!("{} {}", arg, ty.render()));
        }
        w.close(")");
        for (arg, ty) in args.iter().zip(&signature.params) {
            w.line(generate_value(fuzzer, arg, ty)?);
        }
        w.blank();
    }

    let call_args = args.join(", ");
    if signature.returns.is_empty() {
        w.line(format!("{}({})", expected_fn, call_args));
        w.line(format!("{}({})", actual_fn, call_args));
    } else {
        w.line(format!(
            "{} := {}({})",
            expected_names(signature).join(", "),
            expected_fn,
            call_args
        ));
        w.line(format!(
            "{} := {}({})",
            actual_names(signature).join(", "),
            actual_fn,
            call_args
        ));
    }
    Ok(())
}

/// A statement assigning a random value of `ty` to `var`.
fn generate_value(fuzzer: &ReconciledFuzzer, var: &str, ty: &Type) -> EmitResult<String> {
    let key = ty.render();
    if let Some(generator) = fuzzer.spec.generator_for(ty) {
        if !generator.stateful {
            return Ok(format!("{} = {}(rand)", var, generator.name));
        }
        if fuzzer.spec.generator_state.is_none() {
            return Err(GenerateErrorKind::StatefulWithoutState(key));
        }
        return Ok(format!("{}, state = {}(rand, state)", var, generator.name));
    }
    match default_generator(&key) {
        Some(expr) => Ok(format!("{} = {}", var, expr)),
        None => Err(GenerateErrorKind::NoGenerator(key)),
    }
}

/// A boolean expression that holds when both results agree.
fn comparison(fuzzer: &ReconciledFuzzer, ty: &Type, expected: &str, actual: &str) -> String {
    match fuzzer.spec.comparator_for(ty) {
        Some(comparator) => comparator.call(expected, actual),
        None => instantiate(comparison_template(&ty.render()), expected, actual),
    }
}

/// `<module>.<I>.<Method>` with `%` escaped for a format string.
fn error_location(module: &str, interface: &str, method: &str) -> String {
    let location = if module.is_empty() {
        format!("{}.{}", interface, method)
    } else {
        format!("{}.{}.{}", module, interface, method)
    };
    location.replace('%', "%%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{Comparator, ComparatorStyle, Generator, HarnessSpec};
    use crate::interface::InterfaceDeclaration;

    fn named(s: &str) -> Type {
        Type::named(s)
    }

    fn counter() -> ReconciledFuzzer {
        let mut spec = HarnessSpec::new("Counter");
        spec.set_reference("newCounter".into(), vec![], false);
        ReconciledFuzzer {
            interface: InterfaceDeclaration::new(
                "Counter",
                vec![MethodSignature::new("Add", vec![named("int")], vec![named("int")])],
            ),
            spec,
        }
    }

    fn ctx() -> GenerateContext {
        GenerateContext::new("counter")
    }

    #[test]
    fn test_core_calls_both_implementations() {
        let code = generate_core(&counter(), &ctx()).unwrap();
        assert!(code.starts_with(
            "func FuzzCounterWith(reference Counter, test Counter, rand *rand.Rand, maxops uint) error {"
        ));
        assert!(code.contains("\t\tactionToPerform := rand.Intn(1)"));
        assert!(code.contains("argInt = rand.Int()"));
        assert!(code.contains("expectedInt := reference.Add(argInt)"));
        assert!(code.contains("actualInt := test.Add(argInt)"));
        assert!(code.contains("if !reflect.DeepEqual(expectedInt, actualInt) {"));
        assert!(code.contains(
            r#"return fmt.Errorf("inconsistent result in counter.Counter.Add\nexpected: %v\nactual:   %v", expectedInt, actualInt)"#
        ));
        assert!(!code.contains("state :="));
        assert!(code.ends_with("\treturn nil\n}"));
    }

    #[test]
    fn test_no_methods_no_switch() {
        let mut fuzzer = counter();
        fuzzer.interface.methods.clear();
        let code = generate_core(&fuzzer, &ctx()).unwrap();
        assert!(!code.contains("switch"));
        assert!(!code.contains("rand.Intn"));
        assert!(code.contains("for i := uint(0); i < maxops; i++ {"));
    }

    #[test]
    fn test_stateful_generator_declares_state() {
        let mut fuzzer = counter();
        fuzzer.interface.methods[0].params = vec![named("ID")];
        fuzzer
            .spec
            .add_generator(&named("ID"), Generator { name: "genID".into(), stateful: true });
        fuzzer.spec.generator_state = Some("uint(0)".into());
        let code = generate_core(&fuzzer, &ctx()).unwrap();
        assert!(code.contains("\tstate := uint(0)\n"));
        assert!(code.contains("argID, state = genID(rand, state)"));
    }

    #[test]
    fn test_stateful_generator_without_state() {
        let mut fuzzer = counter();
        fuzzer.interface.methods[0].params = vec![named("ID")];
        fuzzer
            .spec
            .add_generator(&named("ID"), Generator { name: "genID".into(), stateful: true });
        assert_eq!(
            generate_core(&fuzzer, &ctx()),
            Err(GenerateErrorKind::StatefulWithoutState("ID".into()))
        );
    }

    #[test]
    fn test_unknown_argument_type() {
        let mut fuzzer = counter();
        fuzzer.interface.methods[0].params = vec![Type::array(named("string"))];
        assert_eq!(
            generate_core(&fuzzer, &ctx()),
            Err(GenerateErrorKind::NoGenerator("[](string)".into()))
        );
    }

    #[test]
    fn test_comparators_and_error_presence() {
        let mut fuzzer = counter();
        fuzzer.interface.methods[0].returns = vec![named("Msg"), named("error")];
        fuzzer.spec.add_comparator(Comparator {
            name: "Same".into(),
            style: ComparatorStyle::Method,
            ty: named("Msg"),
        });
        let code = generate_core(&fuzzer, &ctx()).unwrap();
        assert!(code.contains("expectedMsg, expectedError := reference.Add(argInt)"));
        assert!(code.contains("if !expectedMsg.Same(actualMsg) {"));
        assert!(code.contains("if !((expectedError == nil) == (actualError == nil)) {"));
        assert!(!code.contains("reflect.DeepEqual"));
    }

    #[test]
    fn test_no_returns_calls_only() {
        let mut fuzzer = counter();
        fuzzer.interface.methods[0].returns.clear();
        let code = generate_core(&fuzzer, &ctx()).unwrap();
        assert!(code.contains("\treference.Add(argInt)\n"));
        assert!(code.contains("\ttest.Add(argInt)\n"));
        assert!(!code.contains("if !"));
    }

    #[test]
    fn test_invariants_follow_switch() {
        let mut fuzzer = counter();
        fuzzer.spec.invariants = vec!["%var.Total() >= 0".into(), "%var.Name() != \"\"".into()];
        let code = generate_core(&fuzzer, &ctx()).unwrap();
        let first = code.find("if !(reference.Total() >= 0) {").unwrap();
        assert!(first > code.rfind("return fmt.Errorf").unwrap());
        assert!(first < code.find("return nil").unwrap());
        assert!(code.contains(r#"return errors.New("invariant violated: %var.Total() >= 0")"#));
        assert!(code.contains(r#"return errors.New("invariant violated: %var.Name() != \"\"")"#));
    }

    #[test]
    fn test_percent_in_module_is_escaped() {
        let code = generate_core(&counter(), &GenerateContext::new("100%")).unwrap();
        assert!(code.contains("inconsistent result in 100%%.Counter.Add"));
    }

    #[test]
    fn test_driver_by_value_takes_address() {
        let mut fuzzer = counter();
        fuzzer
            .spec
            .set_reference("makeCounter".into(), vec![named("int")], true);
        let code = generate_driver(&fuzzer, &ctx()).unwrap();
        assert!(code.starts_with(
            "func FuzzCounter(makeTest func(int) Counter, rand *rand.Rand, max uint) error {"
        ));
        assert!(code.contains("expectedCounter := makeCounter(argInt)"));
        assert!(code.contains("actualCounter := makeTest(argInt)"));
        assert!(code.contains("return FuzzCounterWith(&expectedCounter, actualCounter, rand, max)"));
    }

    #[test]
    fn test_driver_without_reference() {
        let mut fuzzer = counter();
        fuzzer.spec.reference = None;
        assert_eq!(
            generate_driver(&fuzzer, &ctx()),
            Err(GenerateErrorKind::MissingReference)
        );
        assert_eq!(
            generate_entry(&fuzzer, &ctx()),
            Err(GenerateErrorKind::MissingReference)
        );
    }

    #[test]
    fn test_entry_uses_seed_and_iterations() {
        let mut context = ctx();
        context.seed = 42;
        context.iterations = 7;
        let code = generate_entry(&counter(), &context).unwrap();
        assert!(code.starts_with("func FuzzTestCounter(makeTest func() Counter, t *testing.T) {"));
        assert!(code.contains("rand := rand.New(rand.NewSource(42))"));
        assert!(code.contains("err := FuzzCounter(makeTest, rand, 7)"));
        assert!(code.contains("t.Error(err)"));
    }

    #[test]
    fn test_function_comparator() {
        let mut fuzzer = counter();
        fuzzer.spec.add_comparator(Comparator {
            name: "sameInt".into(),
            style: ComparatorStyle::Function,
            ty: named("int"),
        });
        let code = generate_core(&fuzzer, &ctx()).unwrap();
        assert!(code.contains("if !sameInt(expectedInt, actualInt) {"));
    }
}
