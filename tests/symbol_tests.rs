use codelang::ast::Program;
use codelang::parser::Parser;
use codelang::symbol::builder::{check, Builder};

fn parse_program(source: &str) -> Program {
    let mut parser = Parser::from_source(source);
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "unexpected parse errors: {:?}",
        parser.errors()
    );
    program
}

fn diagnostics(source: &str) -> Vec<String> {
    check(&parse_program(source))
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn clean_program_has_no_diagnostics() {
    let messages = diagnostics(
        "let a = 1; let add = fn(x, y) { return x + y; }; add(a, 2); len(\"abc\");",
    );
    assert!(messages.is_empty(), "unexpected diagnostics: {messages:?}");
}

#[test]
fn undefined_identifier_is_reported_with_position() {
    let messages = diagnostics("let a = missing;");
    assert_eq!(messages.len(), 1);
    assert!(
        messages[0].contains("undefined identifier: missing"),
        "got {messages:?}"
    );
    assert!(messages[0].starts_with("[Line 1, Column 9]"), "got {messages:?}");
}

#[test]
fn const_reassignment_is_reported() {
    let messages = diagnostics("const k = 1; k = 2;");
    assert!(
        messages.iter().any(|m| m.contains("cannot reassign to const: k")),
        "got {messages:?}"
    );

    let messages = diagnostics("const k = 1; k += 2;");
    assert!(
        messages.iter().any(|m| m.contains("cannot reassign to const: k")),
        "got {messages:?}"
    );
}

#[test]
fn const_reassignment_found_up_the_chain() {
    let messages = diagnostics("const k = 1; let f = fn() { k = 2; };");
    assert!(
        messages.iter().any(|m| m.contains("cannot reassign to const: k")),
        "got {messages:?}"
    );
}

#[test]
fn let_shadowing_const_in_same_scope_is_reported() {
    let messages = diagnostics("const x = 1; let x = 2;");
    assert!(
        messages.iter().any(|m| m.contains("cannot re-declare constant: x")),
        "got {messages:?}"
    );

    // A function-literal RHS is no exception.
    let messages = diagnostics("const k = 1; let k = fn() { return 1; };");
    assert!(
        messages.iter().any(|m| m.contains("cannot re-declare constant: k")),
        "got {messages:?}"
    );
}

#[test]
fn duplicate_const_is_reported() {
    let messages = diagnostics("let x = 1; const x = 2;");
    assert!(
        messages.iter().any(|m| m.contains("identifier already defined: x")),
        "got {messages:?}"
    );
}

#[test]
fn let_overwrite_in_same_scope_is_allowed() {
    assert!(diagnostics("let x = 1; let x = 2;").is_empty());
}

#[test]
fn block_scopes_allow_shadowing() {
    let messages = diagnostics("let x = 1; if (x) { let x = 2; x; };");
    assert!(messages.is_empty(), "unexpected diagnostics: {messages:?}");
}

#[test]
fn function_parameters_resolve_in_body() {
    assert!(diagnostics("let f = fn(n) { return n * 2; };").is_empty());
    let messages = diagnostics("let f = fn(n) { return m; };");
    assert!(
        messages.iter().any(|m| m.contains("undefined identifier: m")),
        "got {messages:?}"
    );
}

#[test]
fn loop_scopes_and_import_definitions() {
    assert!(diagnostics("for (let i = 0; i < 3; i = i + 1) { i; };").is_empty());
    assert!(diagnostics("import \"utils\";").is_empty());

    // The loop variable is not visible after the loop.
    let messages = diagnostics("for (let i = 0; i < 3; i = i + 1) { i; }; i;");
    assert!(
        messages.iter().any(|m| m.contains("undefined identifier: i")),
        "got {messages:?}"
    );
}

#[test]
fn struct_names_are_defined() {
    assert!(diagnostics("struct P { x: 0 }; let p = P { x: 1 }; ").is_empty());
}

#[test]
fn resolutions_record_scope_distances() {
    let program = parse_program("let a = 1; let f = fn(x) { return x; };");
    let mut builder = Builder::new();
    builder.build(&program);
    assert!(builder.errors().is_empty());
    // The parameter use inside the function body resolves upward.
    assert!(!builder.resolutions().is_empty());
}
