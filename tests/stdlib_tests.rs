use codelang::evaluator::Evaluator;
use codelang::object::{Environment, RuntimeError, Value};
use codelang::parser::Parser;
use tempfile::tempdir;

fn eval(source: &str) -> Value {
    let mut parser = Parser::from_source(source);
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "parse errors for {source:?}: {:?}",
        parser.errors()
    );
    let env = Environment::new();
    Evaluator::new()
        .eval_program(&program, &env)
        .unwrap_or_else(|err| panic!("unexpected error for {source:?}: {err}"))
        .unwrap_or(Value::Null)
}

fn eval_err(source: &str) -> RuntimeError {
    let mut parser = Parser::from_source(source);
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(), "parse errors: {:?}", parser.errors());
    let env = Environment::new();
    match Evaluator::new().eval_program(&program, &env) {
        Ok(value) => panic!("expected error for {source:?}, got {value:?}"),
        Err(err) => err,
    }
}

#[test]
fn strings_module_contracts() {
    assert_eq!(
        eval("import \"strings\"; strings.to_upper(\"abc\");").to_string(),
        "ABC"
    );
    assert_eq!(
        eval("import \"strings\"; strings.to_lower(\"AbC\");").to_string(),
        "abc"
    );
    assert_eq!(
        eval("import \"strings\"; strings.split(\"a,b,c\", \",\");").to_string(),
        "[a, b, c]"
    );
    assert_eq!(
        eval("import \"strings\"; strings.join([1, 2, 3], \"-\");").to_string(),
        "1-2-3"
    );
    assert_eq!(
        eval("import \"strings\"; strings.contains(\"hello\", \"ell\");"),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("import \"strings\"; strings.replace(\"aaa\", \"a\", \"b\");").to_string(),
        "bbb"
    );
    assert_eq!(
        eval("import \"strings\"; strings.trim(\"  pad  \");").to_string(),
        "pad"
    );
    assert_eq!(
        eval("import \"strings\"; strings.trim_left(\"  pad  \");").to_string(),
        "pad  "
    );
    assert_eq!(
        eval("import \"strings\"; strings.trim_right(\"  pad  \");").to_string(),
        "  pad"
    );
    assert_eq!(
        eval("import \"strings\"; strings.starts_with(\"hello\", \"he\");"),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("import \"strings\"; strings.ends_with(\"hello\", \"lo\");"),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("import \"strings\"; strings.index(\"hello\", \"ll\");"),
        Value::Integer(2)
    );
    assert_eq!(
        eval("import \"strings\"; strings.index(\"hello\", \"zz\");"),
        Value::Integer(-1)
    );
    assert_eq!(
        eval("import \"strings\"; strings.count(\"banana\", \"na\");"),
        Value::Integer(2)
    );
    assert_eq!(
        eval("import \"strings\"; strings.repeat(\"ab\", 3);").to_string(),
        "ababab"
    );
    assert_eq!(
        eval("import \"strings\"; strings.reverse(\"abc\");").to_string(),
        "cba"
    );

    let err = eval_err("import \"strings\"; strings.to_upper(1);");
    assert!(err.message.contains("argument must be a string"));
    let err = eval_err("import \"strings\"; strings.split(\"a\");");
    assert!(err.message.contains("takes 2 arguments"));
}

#[test]
fn strings_reverse_is_an_involution_over_scalars() {
    assert_eq!(
        eval("import \"strings\"; strings.reverse(strings.reverse(\"héllo wörld\"));").to_string(),
        "héllo wörld"
    );
}

#[test]
fn arrays_module_returns_fresh_arrays() {
    assert_eq!(
        eval("import \"arrays\"; arrays.first([5, 6]);"),
        Value::Integer(5)
    );
    assert_eq!(
        eval("import \"arrays\"; arrays.last([5, 6]);"),
        Value::Integer(6)
    );
    assert_eq!(
        eval("import \"arrays\"; arrays.rest([5, 6, 7]);").to_string(),
        "[6, 7]"
    );
    // push leaves the original untouched.
    assert_eq!(
        eval("import \"arrays\"; let a = [1]; let b = arrays.push(a, 2); len(a) + len(b);"),
        Value::Integer(3)
    );
}

#[test]
fn hash_module_contracts() {
    assert_eq!(
        eval("import \"hash\"; let h = {\"a\": 1, \"b\": 2}; len(hash.keys(h));"),
        Value::Integer(2)
    );
    assert_eq!(
        eval("import \"hash\"; let h = {\"a\": 1}; hash.has_key(h, \"a\");"),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("import \"hash\"; let h = {\"a\": 1}; hash.has_key(h, \"b\");"),
        Value::Boolean(false)
    );
    assert_eq!(
        eval("import \"hash\"; let h = hash.merge({\"a\": 1}, {\"b\": 2}); h[\"a\"] + h[\"b\"];"),
        Value::Integer(3)
    );
    // Merge prefers the right-hand side.
    assert_eq!(
        eval("import \"hash\"; let h = hash.merge({\"a\": 1}, {\"a\": 9}); h[\"a\"];"),
        Value::Integer(9)
    );
    assert_eq!(
        eval("import \"hash\"; let h = {\"a\": 1}; hash.delete(h, \"a\"); h[\"a\"];"),
        Value::Null
    );
}

#[test]
fn json_round_trips_canonical_documents() {
    for doc in ["[1,2,3]", "true", "null", "[1,[2,3],4]"] {
        let source = format!("import \"json\"; json.stringify(json.parse(\"{doc}\"));");
        assert_eq!(eval(&source).to_string(), doc, "doc {doc}");
    }

    // Quoted documents are assembled with char concatenation because
    // string literals carry no escape sequences.
    let source = "import \"json\"; let q = '\"'; json.stringify(json.parse(\"{\" + q + \"a\" + q + \":1}\"));";
    assert_eq!(eval(source).to_string(), "{\"a\":1}");
}

#[test]
fn json_parse_produces_language_values() {
    assert_eq!(
        eval("import \"json\"; let q = '\"'; json.parse(\"{\" + q + \"n\" + q + \": 3}\")[\"n\"];"),
        Value::Integer(3)
    );
    assert_eq!(
        eval("import \"json\"; json.parse(\"1.5\");"),
        Value::Float(1.5)
    );
    assert_eq!(
        eval("import \"json\"; json.parse(\"7\");"),
        Value::Integer(7)
    );
    let err = eval_err("import \"json\"; json.parse(\"not json\");");
    assert!(err.message.contains("json.parse error"));
}

#[test]
fn math_module_contracts() {
    assert_eq!(
        eval("import \"math\"; math.pow(2, 10);"),
        Value::Float(1024.0)
    );
    assert_eq!(eval("import \"math\"; math.sqrt(16);"), Value::Float(4.0));
    assert_eq!(eval("import \"math\"; math.floor(3.7);"), Value::Float(3.0));
    assert_eq!(eval("import \"math\"; math.ceil(3.2);"), Value::Float(4.0));
    assert_eq!(eval("import \"math\"; math.round(3.5);"), Value::Float(4.0));
    assert_eq!(eval("import \"math\"; math.trunc(3.9);"), Value::Float(3.0));
    assert_eq!(eval("import \"math\"; math.abs(-3);"), Value::Integer(3));
    assert_eq!(eval("import \"math\"; math.abs(-3.5);"), Value::Float(3.5));
    assert_eq!(eval("import \"math\"; math.min(2, 3);"), Value::Float(2.0));
    assert_eq!(eval("import \"math\"; math.max(2, 3);"), Value::Float(3.0));
    assert!(matches!(
        eval("import \"math\"; math.log(math.E);"),
        Value::Float(x) if (x - 1.0).abs() < 1e-12
    ));
    assert_eq!(eval("import \"math\"; math.log10(100);"), Value::Float(2.0));
    assert!(matches!(
        eval("import \"math\"; math.PI;"),
        Value::Float(pi) if (pi - std::f64::consts::PI).abs() < 1e-12
    ));

    let err = eval_err("import \"math\"; math.sqrt(\"four\");");
    assert!(err.message.contains("argument must be a number"));
}

#[test]
fn fmt_module_contracts() {
    assert_eq!(
        eval("import \"fmt\"; fmt.typeof(1);").to_string(),
        "INTEGER"
    );
    assert_eq!(
        eval("import \"fmt\"; fmt.typeof(\"s\");").to_string(),
        "STRING"
    );
    assert_eq!(
        eval("import \"fmt\"; fmt.typeof(null);").to_string(),
        "NULL"
    );
    assert_eq!(eval("import \"fmt\"; fmt.int(\"42\");"), Value::Integer(42));
    assert_eq!(eval("import \"fmt\"; fmt.float(\"2.5\");"), Value::Float(2.5));
    assert_eq!(eval("import \"fmt\"; fmt.float(2);"), Value::Float(2.0));
    assert_eq!(eval("import \"fmt\"; fmt.len([1, 2]);"), Value::Integer(2));
    assert_eq!(
        eval("import \"fmt\"; fmt.print(\"side\", \"effects\");"),
        Value::Null
    );

    let err = eval_err("import \"fmt\"; fmt.int(\"abc\");");
    assert!(err.message.contains("could not parse"));
    let err = eval_err("import \"fmt\"; fmt.int(1.5);");
    assert!(err.message.contains("input must be a string"));
}

#[test]
fn fs_module_round_trips_in_a_tempdir() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("note.txt");
    let path_str = path.to_string_lossy().replace('\\', "\\\\");

    let wrote = eval(&format!(
        "import \"fs\"; fs.writefile(\"{path_str}\", \"hello fs\");"
    ));
    assert_eq!(wrote, Value::Boolean(true));

    let read = eval(&format!("import \"fs\"; fs.readfile(\"{path_str}\");"));
    assert_eq!(read.to_string(), "hello fs");

    let err = eval_err("import \"fs\"; fs.readfile(\"/definitely/not/here.txt\");");
    assert!(err.message.contains("could not read"));
}

#[test]
fn time_module_basics() {
    assert!(matches!(eval("import \"time\"; time.unix();"), Value::Integer(t) if t > 1_500_000_000));
    assert!(matches!(
        eval("import \"time\"; time.year(time.now());"),
        Value::Integer(y) if y >= 2024
    ));
    assert!(matches!(
        eval("import \"time\"; time.month(time.now());"),
        Value::Integer(m) if (1..=12).contains(&m)
    ));
    assert!(matches!(
        eval("import \"time\"; time.since(time.now());"),
        Value::Integer(ms) if ms >= 0
    ));
    let formatted = eval("import \"time\"; time.format(time.now(), \"%Y\");").to_string();
    assert_eq!(formatted.len(), 4);
    assert!(formatted.chars().all(|c| c.is_ascii_digit()));

    let err = eval_err("import \"time\"; time.year(1);");
    assert!(err.message.contains("argument must be a Time object"));
}

#[test]
fn net_module_registers_routes() {
    // Route registration is synchronous; only listen() blocks.
    assert_eq!(
        eval("import \"net\"; let s = net.server(); s.get(\"/\", fn(req) { return \"ok\"; });"),
        Value::Null
    );
    let err = eval_err("import \"net\"; let s = net.server(); s.get(\"/\", 5);");
    assert!(err.message.contains("handler must be a function"));
    let err = eval_err("import \"net\"; let s = net.server(); s.teapot();");
    assert!(err.message.contains("server has no member: teapot"));
}

#[test]
fn module_member_access_and_assignment() {
    // Modules accept member overrides, per the assignment rules.
    assert_eq!(
        eval("import \"math\"; math.tau = 6.0; math.tau;"),
        Value::Float(6.0)
    );
    let err = eval_err("import \"math\"; math.unknown;");
    assert!(err.message.contains("module has no member: unknown"));
}
