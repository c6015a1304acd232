use std::fs;

use scopecalc::{
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        evaluator::{core::Context, reduce::evaluate},
        lexer::{Token, tokenize},
        parser::{inline::inline, postfix::to_postfix},
        value::core::{Function, VarKind},
    },
    run,
};
use walkdir::WalkDir;

#[test]
fn program_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        count += 1;
        assert_eq!(output_of(&source), expected, "program {path:?} printed unexpected output");
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn output_of(src: &str) -> String {
    let mut out = Vec::new();
    run(src, "infix", &mut out).expect("writing to a Vec cannot fail");
    String::from_utf8(out).expect("output is UTF-8")
}

fn assert_success(src: &str) {
    let mut out = Vec::new();
    let summary = run(src, "infix", &mut out).unwrap();
    if summary.failures > 0 {
        panic!("Script failed: {}", String::from_utf8_lossy(&out));
    }
}

fn assert_failure(src: &str) {
    let mut out = Vec::new();
    let summary = run(src, "infix", &mut out).unwrap();
    if summary.failures == 0 {
        panic!("Script succeeded but was expected to fail")
    }
}

fn eval(expression: &str) -> String {
    Context::new().evaluate_line(1, expression, "infix")
                  .unwrap_or_else(|e| panic!("'{expression}' failed: {e}"))
}

fn eval_err(expression: &str) -> Error {
    Context::new().evaluate_line(1, expression, "infix")
                  .expect_err("expression was expected to fail")
}

#[test]
fn tokenizer_splits_words_and_punctuation() {
    assert_eq!(tokenize("3+4*2"),
               vec![Token::word("3"),
                    Token::Plus,
                    Token::word("4"),
                    Token::Star,
                    Token::word("2")]);
    assert_eq!(tokenize("  radius * 2.5 "),
               vec![Token::word("radius"), Token::Star, Token::word("2.5")]);
    assert_eq!(tokenize("3 4"), vec![Token::word("34")]);
    assert_eq!(tokenize("f(a,b):a;"),
               vec![Token::word("f"),
                    Token::LParen,
                    Token::word("a"),
                    Token::Comma,
                    Token::word("b"),
                    Token::RParen,
                    Token::Colon,
                    Token::word("a"),
                    Token::Semicolon]);
    assert!(tokenize("").is_empty());
}

#[test]
fn tokenizer_marks_unary_minus() {
    assert_eq!(tokenize("-3+4"),
               vec![Token::Negate, Token::word("3"), Token::Plus, Token::word("4")]);
    assert_eq!(tokenize("3-4"), vec![Token::word("3"), Token::Minus, Token::word("4")]);
    assert_eq!(tokenize("2*-x"),
               vec![Token::word("2"), Token::Star, Token::Negate, Token::word("x")]);
    assert_eq!(tokenize("(-1)"),
               vec![Token::LParen, Token::Negate, Token::word("1"), Token::RParen]);
    assert_eq!(tokenize("3--4"),
               vec![Token::word("3"), Token::Minus, Token::Negate, Token::word("4")]);
    assert_eq!(tokenize("--3"), vec![Token::Negate, Token::Negate, Token::word("3")]);
    assert_eq!(tokenize("f(1,-2)")[4], Token::Negate);
    assert_eq!(tokenize(")-1")[1], Token::Minus);
}

#[test]
fn basic_arithmetic() {
    assert_eq!(eval("3+4*2"), "11");
    assert_eq!(eval("8-5"), "3");
    assert_eq!(eval("7*9"), "63");
    assert_eq!(eval("10/4"), "2.5");
    assert_eq!(eval("1/4"), "0.25");
    assert_eq!(eval("0.1+0.2"), "0.30000000000000004");
    assert_eq!(eval("5.0"), "5");
}

#[test]
fn operator_precedence_and_grouping() {
    assert_eq!(eval("2+3*4"), "14");
    assert_eq!(eval("(2+3)*4"), "20");
    assert_eq!(eval("10-2-3"), "5");
    assert_eq!(eval("8/2/2"), "2");
    assert_eq!(eval("2*(3+(4-1))*2"), "24");
}

#[test]
fn unary_negation() {
    assert_eq!(eval("-3+4"), "1");
    assert_eq!(eval("--3"), "3");
    assert_eq!(eval("3--4"), "7");
    assert_eq!(eval("2*-3"), "-6");
    assert_eq!(eval("-(2+3)*2"), "-10");
    assert_eq!(eval("2+-3*4"), "-10");
}

#[test]
fn literal_expressions_match_float_arithmetic() {
    let cases = [("((1.5*4)-(2/8))", 1.5f64 * 4.0 - 2.0 / 8.0),
                 ("((3.25+0.75)/(0.5*4))", (3.25 + 0.75) / (0.5 * 4.0)),
                 ("(-(7/3)*(1.2+(4-0.9)))", -(7.0f64 / 3.0) * (1.2 + (4.0 - 0.9))),
                 ("((100-(1/3))*3)", (100.0 - 1.0 / 3.0) * 3.0)];

    for (expression, expected) in cases {
        let actual: f64 = eval(expression).parse().unwrap();
        assert!((actual - expected).abs() < 1e-9,
                "{expression}: expected {expected}, got {actual}");
    }
}

#[test]
fn division_by_zero_is_infinite() {
    assert_eq!(eval("5/0"), "inf");
    assert_eq!(eval("-5/0"), "-inf");
    assert_eq!(eval("0/0"), "NaN");
}

#[test]
fn trailing_semicolon_is_ignored() {
    assert_eq!(eval("1+1;"), "2");
}

#[test]
fn variable_round_trip() {
    let mut context = Context::new();
    context.declare_variable("x", "i", "5", 1).unwrap();

    assert_eq!(context.evaluate_line(2, "x+1", "infix").unwrap(), "6");
    assert_eq!(context.scopes.lookup_variable("x").unwrap().kind, VarKind::Int);
}

#[test]
fn negative_declarations_are_kept_verbatim() {
    assert_eq!(output_of("x(i)=: -5;\ny(i)=:0;\ny = x*2;\nprint x, y"),
               "Variables:\nx = -5\ny = -10\n");
    assert_eq!(output_of("x(f)=:-2.5;\ny(f)=:0;\ny = -x;\nprint y"),
               "Variables:\ny = 2.5\n");
}

#[test]
fn assignments_use_previous_values() {
    assert_success("x(i)=:2;\nx = x + 3;\nx = x * x;");
    assert_eq!(output_of("x(i)=:2;\nx = x + 3;\nx = x * x;\nprint x"),
               "Variables:\nx = 25\n");
}

#[test]
fn function_inlining_produces_evaluable_tokens() {
    let mut context = Context::new();
    let double = Function::new(vec!["n".to_string()], tokenize("n*2"));
    context.define_function("double", double.clone(), 1).unwrap();

    let inlined = inline(&context.scopes, "double", &double, &tokenize("(5)"), 2).unwrap();
    let postfix = to_postfix(&inlined, &context.scopes, 2).unwrap();

    assert_eq!(evaluate(postfix, 2).unwrap(), "10");
    assert_eq!(context.evaluate_line(3, "double(5)", "infix").unwrap(), "10");
}

#[test]
fn parameters_are_substituted_at_every_occurrence() {
    assert_eq!(output_of("square(n): n*n;\nconst(n): 7;\nx(i)=:0;\nx = square(1+2) + const(100);\nprint x"),
               "Variables:\nx = 16\n");
}

#[test]
fn nested_and_composed_calls() {
    let src = "double(n): n*2;\n\
               add(a, b): a + b;\n\
               quad(n): double(double(n));\n\
               pick(a, b): a;\n\
               r(f)=:0;\n\
               r = add(double(3), add(1, 2));\n\
               print r\n\
               r = quad(2) - pick((1 + 2), 3);\n\
               print r";

    assert_eq!(output_of(src), "Variables:\nr = 9\nVariables:\nr = 5\n");
}

#[test]
fn zero_argument_functions() {
    assert_eq!(output_of("five(): 5;\nx(i)=:0;\nx = five() + 1;\nprint x"),
               "Variables:\nx = 6\n");
}

#[test]
fn negative_arguments_and_bodies() {
    assert_eq!(output_of("neg(n): -n;\nsub(a, b): a - b;\nx(i)=:0;\nx = sub(1, -2) + neg(4);\nprint x"),
               "Variables:\nx = -1\n");
}

#[test]
fn too_many_arguments_is_error() {
    let mut context = Context::new();
    context.define_function("double", Function::new(vec!["n".to_string()], tokenize("n*2")), 1)
           .unwrap();

    let err = context.evaluate_line(2, "double(1, 2)", "infix").unwrap_err();
    assert_eq!(err,
               Error::Runtime(RuntimeError::ArgumentCountMismatch { name:     "double".to_string(),
                                                                    expected: 1,
                                                                    found:    2,
                                                                    line:     2, }));
}

#[test]
fn self_referential_function_is_error() {
    let mut context = Context::new();
    context.define_function("forever", Function::new(vec!["n".to_string()], tokenize("forever(n)+1")), 1)
           .unwrap();

    let err = context.evaluate_line(4, "forever(1)", "infix").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::InliningTooDeep { line: 4, .. })));
}

#[test]
fn inner_scopes_shadow_outer_ones() {
    let mut context = Context::new();
    context.declare_variable("x", "i", "1", 1).unwrap();
    context.scopes.push_scope();
    context.declare_variable("x", "f", "2.5", 2).unwrap();

    assert_eq!(context.evaluate_line(3, "x*2", "infix").unwrap(), "5");
    assert_eq!(context.lookup_named_variables(&["x"]),
               vec![("x".to_string(), "2.5".to_string())]);
    assert_eq!(context.lookup_all_variables(),
               vec![("x".to_string(), "2.5".to_string()),
                    ("x".to_string(), "1".to_string())]);

    context.scopes.pop_scope();
    assert_eq!(context.evaluate_line(4, "x*2", "infix").unwrap(), "2");
}

#[test]
fn inner_functions_shadow_outer_ones() {
    let mut context = Context::new();
    context.define_function("f", Function::new(vec!["n".to_string()], tokenize("n+1")), 1)
           .unwrap();
    context.scopes.push_scope();
    context.define_function("f", Function::new(vec!["n".to_string()], tokenize("n+100")), 2)
           .unwrap();

    assert_eq!(context.evaluate_line(3, "f(1)", "infix").unwrap(), "101");

    context.scopes.pop_scope();
    assert_eq!(context.evaluate_line(4, "f(1)", "infix").unwrap(), "2");
}

#[test]
fn updates_land_in_the_owning_scope() {
    let mut context = Context::new();
    context.declare_variable("x", "i", "1", 1).unwrap();
    context.scopes.push_scope();
    context.declare_variable("y", "i", "10", 2).unwrap();

    context.scopes.update_variable("x", "7", 3).unwrap();
    assert!(context.scopes.iter().next().unwrap().variables.get("x").is_none());

    context.scopes.pop_scope();
    assert_eq!(context.lookup_named_variables(&["x", "y"]),
               vec![("x".to_string(), "7".to_string())]);
}

#[test]
fn updates_prefer_the_shadowing_variable() {
    let mut context = Context::new();
    context.declare_variable("x", "i", "1", 1).unwrap();
    context.scopes.push_scope();
    context.declare_variable("x", "i", "2", 2).unwrap();

    context.scopes.update_variable("x", "3", 3).unwrap();
    context.scopes.pop_scope();

    assert_eq!(context.lookup_named_variables(&["x"]),
               vec![("x".to_string(), "1".to_string())]);
}

#[test]
fn base_scope_cannot_be_popped() {
    let mut context = Context::new();
    assert!(!context.scopes.pop_scope());
    context.ensure_base_scope();
    context.ensure_base_scope();
    assert_eq!(context.scopes.depth(), 1);
    assert_eq!(eval("1+1"), "2");
}

#[test]
fn unknown_identifier_reports_its_line() {
    let err = eval_err("1 + ghost");
    assert_eq!(err,
               Error::Parse(ParseError::UnknownToken { token: "ghost".to_string(),
                                                       line:  1, }));

    let out = output_of("x(i)=:1;\n\nx = ghost * 2;\nx = x + 1;\nprint x");
    assert_eq!(out, "[3] ERROR: unknown token: ghost\nVariables:\nx = 2\n");
}

#[test]
fn invalid_operands_are_reported() {
    let err = output_of("x(i)=:abc;\ny(i)=:0;\ny = x + 1;");
    assert_eq!(err, "[3] ERROR: can't parse float abc\n");
}

#[test]
fn malformed_expressions_are_errors() {
    assert!(matches!(eval_err(""),
                     Error::Runtime(RuntimeError::MalformedExpression { line: 1 })));
    assert!(matches!(eval_err("(1)(2)"),
                     Error::Runtime(RuntimeError::MalformedExpression { line: 1 })));
    assert!(matches!(eval_err("*3"),
                     Error::Runtime(RuntimeError::MissingOperand { line: 1, .. })));
    assert_eq!(eval_err("1,2"),
               Error::Parse(ParseError::UnknownToken { token: ",".to_string(),
                                                       line:  1, }));
}

#[test]
fn notation_selection() {
    let mut context = Context::new();

    let err = context.evaluate_line(3, "1+1", "prefix").unwrap_err();
    assert_eq!(err.to_string(), "[3] ERROR: notation not implemented: prefix");

    let err = context.evaluate_line(4, "1 1 +", "postfix").unwrap_err();
    assert_eq!(err.to_string(), "[4] ERROR: notation not implemented: postfix");

    let err = context.evaluate_line(5, "1+1", "polish").unwrap_err();
    assert_eq!(err.to_string(), "[5] ERROR: unknown notation: polish");

    let mut out = Vec::new();
    run("x(i)=:1;\nx = 2;", "polish", &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "[2] ERROR: unknown notation: polish\n");
}

#[test]
fn invalid_type_tag_is_error() {
    let mut context = Context::new();
    let err = context.declare_variable("x", "s", "1", 6).unwrap_err();
    assert_eq!(err,
               ParseError::InvalidTypeTag { tag:  "s".to_string(),
                                            line: 6, });
    assert!(context.lookup_named_variables(&["x"]).is_empty());
}

#[test]
fn malformed_lines_do_not_stop_the_program() {
    assert_failure("x(i)=:1;\nthis is not an instruction\nx = 2;");
    assert_failure("f(: n;");
    assert_failure("f(a,): a;");
    assert_failure("f(a) a;");
    assert_failure("(i)=:1;");
    assert_failure("x(i)=:;");
    assert_failure("undeclared = 1;");
    assert_failure("expression(x): x;");

    let out = output_of("x(i)=:1;\n3 + 4\nx = 2;\nprint");
    assert_eq!(out, "[2] ERROR: unrecognised instruction\nVariables:\nx = 2\n");
}

#[test]
fn display_lists_every_variable_or_the_named_ones() {
    let src = "b(i)=:2;\na(f)=:1.5;\n# comment lines are skipped\nprint\nprint b, missing, a;";
    assert_eq!(output_of(src),
               "Variables:\na = 1.5\nb = 2\nVariables:\nb = 2\na = 1.5\n");
}

#[test]
fn redefinition_overwrites_silently() {
    assert_eq!(output_of("f(n): n+1;\nf(n): n+2;\nx(i)=:0;\nx = f(1);\nx(i)=:10;\nx = x + f(0);\nprint x"),
               "Variables:\nx = 12\n");
}

#[test]
fn contexts_are_independent_snapshots() {
    let mut snapshot = Context::new();
    snapshot.declare_variable("x", "i", "1", 1).unwrap();

    let mut fork = snapshot.clone();
    fork.scopes.update_variable("x", "99", 2).unwrap();

    assert_eq!(snapshot.evaluate_line(3, "x", "infix").unwrap(), "1");
    assert_eq!(fork.evaluate_line(3, "x", "infix").unwrap(), "99");
}

#[test]
fn unbalanced_parentheses_are_errors() {
    for expression in ["2*(3", "2+3)", "(2+3", "((1)", "(2+3))"] {
        assert_eq!(eval_err(expression),
                   Error::Parse(ParseError::UnbalancedParentheses { line: 1 }),
                   "{expression} was accepted");
    }

    let mut context = Context::new();
    context.define_function("open", Function::new(vec!["n".to_string()], tokenize("(n+1")), 1)
           .unwrap();
    let err = context.evaluate_line(2, "open(1)", "infix").unwrap_err();
    assert_eq!(err.to_string(), "[2] ERROR: unbalanced parentheses");
    assert_eq!(err.line(), 2);

    assert_eq!(output_of("x(i)=:1;\nx = (x + 1;\nprint x"),
               "[2] ERROR: unbalanced parentheses\nVariables:\nx = 1\n");
}

#[test]
fn stray_commas_do_not_mention_the_wrapper() {
    let out = output_of("x(i)=:1;\nx = 1, 2;");
    assert_eq!(out, "[2] ERROR: unknown token: ,\n");
    assert!(!out.contains("expression"));
}

#[test]
fn errors_and_instructions_keep_their_line() {
    use scopecalc::{ast::Instruction, interpreter::parser::statement::parse_instruction};

    let instruction = parse_instruction("  y = 3 * 2;", 9).unwrap().unwrap();
    assert!(matches!(instruction, Instruction::Assignment { .. }));
    assert_eq!(instruction.line_number(), 9);

    let err = Context::new().execute(&instruction, "infix").unwrap_err();
    assert_eq!(err.line(), 9);
    assert_eq!(err.to_string(), "[9] ERROR: unknown variable: y");
}
