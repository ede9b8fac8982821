use codelang::ast::{Expr, Program, Stmt};
use codelang::parser::Parser;

fn parse_program(source: &str) -> Program {
    let mut parser = Parser::from_source(source);
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "unexpected parse errors for {source:?}: {:?}",
        parser.errors()
    );
    program
}

fn parse_errors(source: &str) -> Vec<String> {
    let mut parser = Parser::from_source(source);
    parser.parse_program();
    parser.errors().iter().map(ToString::to_string).collect()
}

#[test]
fn let_and_const_statements() {
    let program = parse_program("let x = 5; const y = 10; let z = x;");
    assert_eq!(program.statements.len(), 3);
    match &program.statements[0] {
        Stmt::Let { name, .. } => assert_eq!(name.name, "x"),
        other => panic!("expected let, got {other:?}"),
    }
    match &program.statements[1] {
        Stmt::Const { name, .. } => assert_eq!(name.name, "y"),
        other => panic!("expected const, got {other:?}"),
    }
}

#[test]
fn return_break_continue_and_import() {
    let program = parse_program("return 5; break; continue; import \"utils\";");
    assert!(matches!(program.statements[0], Stmt::Return { .. }));
    assert!(matches!(program.statements[1], Stmt::Break { .. }));
    assert!(matches!(program.statements[2], Stmt::Continue { .. }));
    match &program.statements[3] {
        Stmt::Import { path, .. } => assert_eq!(path, "utils"),
        other => panic!("expected import, got {other:?}"),
    }
}

#[test]
fn operator_precedence_rendering() {
    let cases = [
        ("-a * b;", "((-a) * b);"),
        ("!-a;", "(!(-a));"),
        ("a + b + c;", "((a + b) + c);"),
        ("a * b / c;", "((a * b) / c);"),
        ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f);"),
        ("5 < 4 != 3 > 4;", "((5 < 4) != (3 > 4));"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5;", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)));"),
        ("3 ** 2 * 2;", "((3 ** 2) * 2);"),
        ("10 // 3 + 1;", "((10 // 3) + 1);"),
        ("a <= b == c >= d;", "((a <= b) == (c >= d));"),
        ("a && b || c && d;", "((a && b) || (c && d));"),
        ("1 + (2 + 3) + 4;", "((1 + (2 + 3)) + 4);"),
        ("(5 + 5) * 2;", "((5 + 5) * 2);"),
        ("-(5 + 5);", "(-(5 + 5));"),
        ("a + add(b * c) + d;", "((a + add((b * c))) + d);"),
        ("add(a + b + c * d / f + g);", "add((((a + b) + ((c * d) / f)) + g));"),
        ("a * [1, 2, 3, 4][b * c] * d;", "((a * ([1, 2, 3, 4][(b * c)])) * d);"),
    ];
    for (input, expected) in cases {
        assert_eq!(parse_program(input).to_string(), expected, "input {input}");
    }
}

#[test]
fn assignment_parses_right_associative_at_lowest_binding() {
    assert_eq!(parse_program("a = b = 2;").to_string(), "(a = (b = 2));");
    assert_eq!(
        parse_program("x = 1 + 2 * 3;").to_string(),
        "(x = (1 + (2 * 3)));"
    );
    assert_eq!(parse_program("x += 2 + 1;").to_string(), "(x += (2 + 1));");
    assert_eq!(parse_program("x **= 2 + 1;").to_string(), "(x **= (2 + 1));");
    assert_eq!(parse_program("x //= y //= 2;").to_string(), "(x //= (y //= 2));");
}

#[test]
fn if_with_elseif_chain_and_else() {
    let program = parse_program("if (a) { 1; } elseif (b) { 2; } elseif (c) { 3; } else { 4; };");
    match &program.statements[0] {
        Stmt::Expression {
            expr:
                Expr::If {
                    else_ifs,
                    alternative,
                    ..
                },
            ..
        } => {
            assert_eq!(else_ifs.len(), 2);
            assert!(alternative.is_some());
        }
        other => panic!("expected if expression, got {other:?}"),
    }
}

#[test]
fn while_and_for_forms() {
    parse_program("while (x < 10) { x = x + 1; };");
    parse_program("for (let i = 0; i < 10; i = i + 1) { i; };");
    parse_program("for (; x < 3; ) { x = x + 1; };");

    let program = parse_program("for (;;) { break; };");
    match &program.statements[0] {
        Stmt::Expression {
            expr:
                Expr::For {
                    init,
                    condition,
                    post,
                    ..
                },
            ..
        } => {
            assert!(init.is_none());
            assert!(condition.is_none());
            assert!(post.is_none());
        }
        other => panic!("expected for expression, got {other:?}"),
    }
}

#[test]
fn function_literals_and_calls() {
    let program = parse_program("let add = fn(a, b) { return a + b; }; add(1, 2 * 3);");
    match &program.statements[0] {
        Stmt::Let {
            value: Expr::Function { parameters, .. },
            ..
        } => {
            let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["a", "b"]);
        }
        other => panic!("expected function literal, got {other:?}"),
    }

    parse_program("let noop = fn() { };");
}

#[test]
fn array_hash_index_and_member() {
    parse_program("[1, 2 * 2, 3 + 3];");
    parse_program("let h = {\"one\": 1, 2: \"two\", true: 3};");
    parse_program("h[\"one\"];");
    assert_eq!(parse_program("obj.prop;").to_string(), "(obj.prop);");
}

#[test]
fn struct_declaration_and_literal() {
    let program = parse_program("struct Point { x: 0, y: 0 }; let p = Point { x: 3 };");
    match &program.statements[0] {
        Stmt::Struct { name, fields, .. } => {
            assert_eq!(name.name, "Point");
            let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
            assert_eq!(names, ["x", "y"]);
        }
        other => panic!("expected struct statement, got {other:?}"),
    }
    match &program.statements[1] {
        Stmt::Let {
            value: Expr::StructLiteral { name, fields, .. },
            ..
        } => {
            assert_eq!(name.name, "Point");
            assert_eq!(fields.len(), 1);
        }
        other => panic!("expected struct literal, got {other:?}"),
    }
}

#[test]
fn duplicate_struct_fields_are_rejected() {
    let errors = parse_errors("struct P { x: 1, x: 2 };");
    assert!(errors.iter().any(|e| e.contains("duplicate field name: x")));

    let errors = parse_errors("struct P { x: 1 }; let p = P { y: 1, y: 2 };");
    assert!(errors.iter().any(|e| e.contains("duplicate field name: y")));
}

#[test]
fn errors_accumulate_with_positions() {
    let errors = parse_errors("let = 5;\nlet y 10;");
    assert!(errors.len() >= 2, "expected multiple errors, got {errors:?}");
    assert!(errors[0].starts_with("[Line 1, Column"));
    assert!(errors.iter().any(|e| e.contains("expect next token to be")));
}

#[test]
fn display_round_trips_to_an_equivalent_program() {
    let sources = [
        "let a = 1 + 2 * 3;",
        "let fib = fn(n) { if ((n < 2)) { return n; } return (fib((n - 1)) + fib((n - 2))); };",
        "struct Point { x: 0, y: 0 };",
        "let h = {\"x\": 1};",
        "while ((x < 3)) { x = (x + 1); };",
        "for (let i = 0; (i < 3); i = (i + 1)) { i; };",
        "import \"utils\";",
    ];
    for source in sources {
        let first = parse_program(source).to_string();
        let second = parse_program(&first).to_string();
        assert_eq!(first, second, "round-trip changed for {source:?}");
    }
}
