// tests/compile_tests.rs

use jimongo::{
    BinOp, CompileError, Expr, LexError, ParseError, Query, Segment, Selector, Slice, UnaryOp,
    compile, to_json_pretty, to_value,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const VALID_QUERIES: &[&str] = &[
    "$",
    "@",
    "$.hello",
    "$['hello']",
    "$['hello'][0]",
    "$.store.book[0].title",
    "$..author",
    "$..book[?(@.price<10)]",
    "$..book[?(@.price > 10)]",
    "$..book[?(@.price > 10 && @.price < 30)]",
    "$..book[?(@.title)]",
    "$..book[0:3]",
    "$..book[:3]",
    "$..book[1:]",
    "$..book[::-1]",
    "$[*]",
    "$..*",
    "@.price",
    "@.books[1].title",
    "$..book[?(@.price==null)]",
    "$..book[?(@.price!=null)]",
    "$..book[?(@.available==true)]",
    "$..book[?(@.available==false)]",
    "$..book[?(@.price>=10)]",
    "$..book[?(@.price<=10)]",
    "$..[0]",
    "$..book[::]",
    "$.store..book",
    "$[?@int(@.stock) > 0 || @str(@.id) == \"7\"]",
    "$[?@bool(@.flag) != @array(@.list)]",
    "$[?!(@.a == 1) && -@.b < 2]",
    "$[?size(@.tags) >= 2, 'name', *, -1, 0:2]",
    "$['it\\'s', \"a\\\\b\", 'line\\nbreak']",
    "$.a.*..b[?@.c == $.d[0]]",
    "$[?f()]",
    "$[?f(1, g(@), 'x')]",
    "$[?@ == *]",
    "$[?@]",
];

const INVALID_QUERIES: &[&str] = &[
    "",
    "   ",
    "$.length()",
    "$.store.length()",
    "$..book[?(@.price >> 10)]",
    "$..book[?(@.price = 10)]",
    "$..book[?(@.price >< 10)]",
    "$..book[?(@.price <)]",
    "$..book[?()]",
    "$['unclosed",
    "$.store.[book]",
    "$..book[?(@.price &&)]",
    "$..book[?(&& @.price)]",
    "$[?(@.price < 10)",
    "$[]",
    "$[1,]",
    "$[1:2:3:4]",
    "$[?@float(@.x)]",
    "$ | $",
    "$[?a & b]",
];

// ============================================================================
// Acceptance
// ============================================================================

#[test]
fn test_valid_queries_compile() {
    for query in VALID_QUERIES {
        if let Err(e) = compile(query) {
            panic!("Expected {:?} to compile, got: {}", query, e);
        }
    }
}

#[test]
fn test_invalid_queries_fail() {
    for query in INVALID_QUERIES {
        assert!(compile(query).is_err(), "Expected {:?} to fail", query);
    }
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_segment_count_matches_top_level_steps() {
    let test_cases = vec![
        ("$", 0),
        ("$.a", 1),
        ("$['a']", 1),
        ("$..a", 1),
        ("$.a.b.c", 3),
        ("$.store..book[0].title", 4),
        ("$..book[?(@.a.b.c && @.d[1])]", 2),
        ("@[0][1]..*", 3),
    ];

    for (input, count) in test_cases {
        let query = compile(input).unwrap();
        assert_eq!(query.segments().len(), count, "Failed for input: {}", input);
    }
}

#[test]
fn test_compilation_is_idempotent() {
    for query in VALID_QUERIES {
        assert_eq!(compile(query), compile(query), "Failed for input: {}", query);
    }
}

#[test]
fn test_printed_query_compiles_to_same_tree() {
    for source in VALID_QUERIES {
        let query = compile(source).unwrap();
        let printed = query.to_string();
        let reparsed = compile(&printed)
            .unwrap_or_else(|e| panic!("{:?} printed as {:?}, which fails: {}", source, printed, e));
        assert_eq!(reparsed, query, "Failed for input: {}", source);
    }
}

#[test]
fn test_canonical_printing() {
    let test_cases = vec![
        ("$ . store [ 0 ]", "$.store[0]"),
        ("$..book[?(@.price<10)]", "$..book[?(@.price < 10)]"),
        ("$..[*]", "$..*"),
        ("$..['a','b']", "$..['a', 'b']"),
        ("$[::]", "$[:]"),
        ("$[1:2:-1]", "$[1:2:-1]"),
        ("$[\"say \\\"hi\\\"\"]", "$['say \"hi\"']"),
        ("$[?@int(@.x)]", "$[?(@int(@.x))]"),
        ("$[?(a || b) && c]", "$[?((a || b) && c)]"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(compile(input).unwrap().to_string(), expected, "Failed for input: {}", input);
    }
}

// ============================================================================
// Reference Queries
// ============================================================================

#[test]
fn test_slice_queries() {
    let query = compile("$..book[::-1]").unwrap();
    assert_eq!(
        query.segments()[1],
        Segment::Child(vec![Selector::Slice(Slice::new(
            None,
            None,
            Some(Expr::unary(UnaryOp::Minus, Expr::Integer(1)))
        ))])
    );

    let query = compile("$..book[::]").unwrap();
    assert_eq!(
        query.segments()[1],
        Segment::Child(vec![Selector::Slice(Slice::default())])
    );
}

#[test]
fn test_filter_query() {
    let query = compile("$..book[?(@.price<10)]").unwrap();
    let Segment::Child(selectors) = &query.segments()[1] else {
        panic!("Expected a bracketed segment, got {:?}", query.segments()[1]);
    };
    let Selector::Filter(cond) = &selectors[0] else {
        panic!("Expected a filter, got {:?}", selectors[0]);
    };

    assert_eq!(
        *cond,
        Expr::binary(
            BinOp::Lt,
            Expr::Query(Box::new(Query::Relative(vec![Segment::DotChild(
                Selector::Name("price".to_string())
            )]))),
            Expr::Integer(10)
        )
    );
}

#[test]
fn test_string_selector_is_decoded() {
    let query = compile(r"$['it\'s', 'a\nb']").unwrap();
    assert_eq!(
        query.segments()[0],
        Segment::Child(vec![
            Selector::Expr(Expr::String("it's".to_string())),
            Selector::Expr(Expr::String(r"a\nb".to_string())),
        ])
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_input_is_a_syntax_error() {
    assert_eq!(
        compile("").unwrap_err(),
        CompileError::Parse(ParseError::UnterminatedQuery { position: 0 })
    );
}

#[test]
fn test_unterminated_string_is_a_lexical_error() {
    let err = compile("$['unclosed").unwrap_err();
    assert_eq!(err, CompileError::Lex(LexError::UnterminatedString { position: 2 }));
    assert_eq!(err.position(), 2);
    assert_eq!(
        err.to_string(),
        "lexer error: unterminated string literal starting at position 3"
    );
}

#[test]
fn test_lexical_errors_reach_the_caller_unparsed() {
    for input in ["$[?(@.a = 1)]", "$[?@.a & @.b]", "$[?@.a | @.b]", "$['a"] {
        assert!(
            matches!(compile(input), Err(CompileError::Lex(_))),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_empty_brackets_error() {
    assert_eq!(
        compile("$[]").unwrap_err(),
        CompileError::Parse(ParseError::EmptyBracketedSelectors { position: 2 })
    );
}

#[test]
fn test_dangling_operator_is_a_syntax_error() {
    let err = compile("$..book[?(@.price &&)]").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse(ParseError::UnexpectedToken { .. })
    ));
    assert_eq!(err.to_string(), "parser error: unexpected token RPAREN at position 21");
}

// ============================================================================
// JSON Rendering
// ============================================================================

#[test]
fn test_render_filter_query() {
    let query = compile("$..book[?(@.price<10)]").unwrap();
    assert_eq!(
        to_value(&query),
        json!({
            "type": "AbsQuery",
            "segments": [
                {
                    "type": "DescendantSegment",
                    "selectors": [{ "type": "NameSelector", "name": "book" }],
                },
                {
                    "type": "ChildSegment",
                    "selectors": [{
                        "type": "FilterSelector",
                        "cond": {
                            "type": "LtExpr",
                            "lhs": {
                                "type": "RelQuery",
                                "segments": [{
                                    "type": "DotChildSegment",
                                    "selector": { "type": "NameSelector", "name": "price" },
                                }],
                            },
                            "rhs": { "type": "IntExpr", "value": 10 },
                        },
                    }],
                },
            ],
        })
    );
}

#[test]
fn test_render_literals_and_calls() {
    let query = compile("$[?f('s', true, false, null, x, *)]").unwrap();
    let cond = &to_value(&query)["segments"][0]["selectors"][0]["cond"];
    assert_eq!(
        *cond,
        json!({
            "type": "FnExpr",
            "name": "f",
            "params": [
                { "type": "StringExpr", "value": "s" },
                { "type": "TrueExpr", "value": true },
                { "type": "FalseExpr", "value": false },
                { "type": "NullExpr", "value": null },
                { "type": "NameSelector", "name": "x" },
                { "type": "WildCardSelector" },
            ],
        })
    );
}

#[test]
fn test_pretty_rendering_is_indented() {
    let query = compile("$.a").unwrap();
    let pretty = to_json_pretty(&query);
    assert!(pretty.starts_with("{\n  \""));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&pretty).unwrap(),
        to_value(&query)
    );
}
