use apollo_parser::Parser;
use apollo_parser::cst::{self, CstNode};
use indoc::indoc;

use super::wire::wire_text;

fn first_definition_text(src: &str) -> String {
    let tree = Parser::new(src).parse();
    assert_eq!(tree.errors().len(), 0, "fixture parses");
    let definition = tree
        .document()
        .definitions()
        .next()
        .expect("fixture has a definition");
    wire_text(definition.syntax())
}

#[test]
fn plain_operation_is_unchanged() {
    let text = first_definition_text("  query AllWidgets { widgets { id } }\n\n");

    assert_eq!(text, "query AllWidgets { widgets { id } }");
}

#[test]
fn internal_directives_are_stripped() {
    let text = first_definition_text(indoc! {r#"
        query GetWidget($id: ID! @id, $tag: String @figment(name: "label")) @unique @figment(auth: "user") {
          widget(id: $id) @client_cache {
            id @local
            name @include(if: true)
            old @deprecated
          }
        }
    "#});

    insta::assert_snapshot!(text, @r"
    query GetWidget($id: ID!, $tag: String) {
      widget(id: $id) @client_cache {
        id
        name @include(if: true)
        old @deprecated
      }
    }
    ");
}

#[test]
fn directives_on_their_own_line_leave_no_blank_line() {
    let text = first_definition_text(indoc! {"
        query Q($id: ID)
          @unique {
          widget(id: $id) {
            id
              @local
            name
          }
        }
    "});

    insta::assert_snapshot!(text, @r"
    query Q($id: ID) {
      widget(id: $id) {
        id
        name
      }
    }
    ");
}

#[test]
fn fragment_directives_are_stripped() {
    let text = first_definition_text("fragment F on Widget @figment(name: \"G\") { id @id name }");

    assert_eq!(text, "fragment F on Widget { id name }");
}

#[test]
fn definition_kind_is_preserved() {
    let tree = Parser::new("mutation M { go }").parse();
    let definition = tree.document().definitions().next();

    assert!(matches!(definition, Some(cst::Definition::OperationDefinition(_))));
}
