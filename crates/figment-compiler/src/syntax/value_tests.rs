use apollo_parser::Parser;
use apollo_parser::cst;
use indexmap::IndexMap;
use indoc::indoc;

use super::value::{ConstValue, unquote};
use super::name_of;

fn arguments(src: &str) -> IndexMap<String, ConstValue> {
    let tree = Parser::new(src).parse();
    assert_eq!(tree.errors().len(), 0);

    let Some(cst::Definition::ObjectTypeDefinition(object)) = tree.document().definitions().next()
    else {
        panic!("expected an object type");
    };
    let directive = object.directives().unwrap().directives().next().unwrap();
    directive
        .arguments()
        .unwrap()
        .arguments()
        .map(|arg| {
            let name = name_of(arg.name()).unwrap();
            (name, ConstValue::from_cst(&arg.value().unwrap()))
        })
        .collect()
}

#[test]
fn literal_kinds() {
    let args = arguments(
        r#"type A @x(s: "text", i: 42, f: 1.5, b: false, e: RED, n: null, l: ["a", "b"], o: { k: true }) { a: Int }"#,
    );

    assert_eq!(args["s"], ConstValue::String("text".into()));
    assert_eq!(args["i"], ConstValue::Int("42".into()));
    assert_eq!(args["f"], ConstValue::Float("1.5".into()));
    assert_eq!(args["b"], ConstValue::Bool(false));
    assert_eq!(args["e"], ConstValue::Enum("RED".into()));
    assert_eq!(args["n"], ConstValue::Null);
    assert_eq!(
        args["l"],
        ConstValue::List(vec![
            ConstValue::String("a".into()),
            ConstValue::String("b".into())
        ])
    );
    assert_eq!(
        args["o"],
        ConstValue::Object(IndexMap::from([("k".to_string(), ConstValue::Bool(true))]))
    );
}

#[test]
fn string_lists_accept_single_strings() {
    let args = arguments(r#"type A @x(one: "a", many: ["a", "b"], bad: [1]) { a: Int }"#);

    assert_eq!(args["one"].as_string_list(), Some(vec!["a".to_string()]));
    assert_eq!(
        args["many"].as_string_list(),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(args["bad"].as_string_list(), None);
}

#[test]
fn accessors() {
    assert_eq!(ConstValue::String("x".into()).as_str(), Some("x"));
    assert_eq!(ConstValue::Enum("RED".into()).as_str(), Some("RED"));
    assert_eq!(ConstValue::Int("1".into()).as_str(), None);
    assert_eq!(ConstValue::Bool(true).as_bool(), Some(true));
    assert_eq!(ConstValue::Null.as_bool(), None);
}

#[test]
fn unquote_escapes() {
    assert_eq!(unquote(r#""plain""#), "plain");
    assert_eq!(unquote(r#""a\nb\t\"c\"""#), "a\nb\t\"c\"");
    assert_eq!(unquote(r#""été""#), "été");
    assert_eq!(unquote(r#""back\\slash""#), "back\\slash");
}

#[test]
fn unquote_block_string() {
    let raw = indoc! {r#"
        """
            Widget shown on the home screen.

              Indented detail.
        """"#};

    assert_eq!(
        unquote(raw),
        "Widget shown on the home screen.\n\n  Indented detail."
    );
}

#[test]
fn unquote_block_string_single_line() {
    assert_eq!(unquote(r#""""  keeps "quotes" """"#), "  keeps \"quotes\" ");
}
