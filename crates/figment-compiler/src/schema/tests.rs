use indoc::indoc;

use crate::FigmentBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::test_utils::documents;

#[test]
fn fields_keep_declaration_order() {
    let dump = documents(
        indoc! {"
            type Widget {
              id: ID!
              name: String
              size: Int
            }
        "},
        "",
    )
    .expect_valid_dump();

    insta::assert_snapshot!(dump, @r"
    thing Widget
      remote default
      field id: ID!
      field name: String
      field size: Int
    ");
}

#[test]
fn extension_fields_are_appended() {
    let dump = documents(
        indoc! {r#"
            type Widget {
              id: ID!
              name: String
            }

            extend type Widget @extend(field: "id", id: true) {
              size: Int
            }
        "#},
        "",
    )
    .expect_valid_dump();

    insta::assert_snapshot!(dump, @r"
    thing Widget
      remote default
      field id: ID! identifying
      field name: String
      field size: Int
    ");
}

#[test]
fn extend_directive_sets_derivations_in_place() {
    let dump = documents(
        indoc! {r#"
            type Widget {
              id: ID!
              total: Int
              name: String
            }

            extend type Widget
              @extend(field: "total", reactive: ["price", "count"], instructions: "sum")
        "#},
        "",
    )
    .expect_valid_dump();

    insta::assert_snapshot!(dump, @r#"
    thing Widget
      remote default
      field id: ID!
      field total: Int reactive(price, count) instructions("sum")
      field name: String
    "#);
}

#[test]
fn extension_field_renames_aliased_primary_field() {
    let dump = documents(
        indoc! {r#"
            type Widget {
              id: ID!
              display_name: String
            }

            extend type Widget {
              title: String @figment(default_alias: "display_name")
            }
        "#},
        "",
    )
    .expect_valid_dump();

    insta::assert_snapshot!(dump, @r"
    thing Widget
      remote default
      field id: ID!
      field title: String alias(default: display_name)
    ");
}

#[test]
fn unknown_extend_target_warns() {
    let figments = documents(
        indoc! {r#"
            type Widget {
              id: ID!
            }

            extend type Widget @extend(field: "missing", id: true)
        "#},
        "",
    )
    .expect_valid();

    insta::assert_snapshot!(
        figments.dump_warnings(),
        @"warning at schema.graphqls:5: `@extend` names unknown field `missing`"
    );
}

#[test]
fn duplicate_primary_is_fatal_in_any_order() {
    let forward = FigmentBuilder::new()
        .schema("a.graphqls", "type Widget { id: ID }")
        .schema("b.graphqls", "type Widget { name: String }")
        .expect_invalid();
    insta::assert_snapshot!(
        forward,
        @"error at b.graphqls:1: `Widget` is already defined (related: first defined here at a.graphqls:1)"
    );

    let backward = FigmentBuilder::new()
        .schema("b.graphqls", "type Widget { name: String }")
        .schema("a.graphqls", "type Widget { id: ID }")
        .expect_invalid();
    insta::assert_snapshot!(
        backward,
        @"error at a.graphqls:1: `Widget` is already defined (related: first defined here at b.graphqls:1)"
    );
}

#[test]
fn duplicate_mutation_type_is_fatal_in_any_order() {
    let forward = FigmentBuilder::new()
        .schema("a.graphqls", r#"type Mutation @figment(auth: "user") { a: ID }"#)
        .schema("b.graphqls", r#"type Mutation @figment(auth: "admin") { b: ID }"#)
        .expect_invalid();
    insta::assert_snapshot!(
        forward,
        @"error at b.graphqls:1: `Mutation` is already defined (related: first defined here at a.graphqls:1)"
    );

    let backward = FigmentBuilder::new()
        .schema("b.graphqls", r#"type Mutation @figment(auth: "admin") { b: ID }"#)
        .schema("a.graphqls", r#"type Mutation @figment(auth: "user") { a: ID }"#)
        .expect_invalid();
    insta::assert_snapshot!(
        backward,
        @"error at a.graphqls:1: `Mutation` is already defined (related: first defined here at b.graphqls:1)"
    );
}

#[test]
fn primary_after_extension_keeps_first_seen_position() {
    let dump = FigmentBuilder::new()
        .schema("a.graphqls", "extend type Widget { size: Int }")
        .schema("b.graphqls", "type Gadget { id: ID }\ntype Widget { id: ID }")
        .expect_valid_dump();

    insta::assert_snapshot!(dump, @r"
    thing Widget
      remote default
      field id: ID
      field size: Int
    thing Gadget
      remote default
      field id: ID
    ");
}

#[test]
fn duplicate_field_in_extension_is_fatal() {
    let out = documents(
        indoc! {"
            type Widget {
              id: ID!
            }

            extend type Widget {
              id: ID
            }
        "},
        "",
    )
    .expect_invalid();

    insta::assert_snapshot!(
        out,
        @"error at schema.graphqls:6: field `id` is already defined (related: first defined here at schema.graphqls:2)"
    );
}

#[test]
fn query_extension_is_fatal() {
    let out = documents(
        indoc! {"
            type Query {
              widget: Widget
            }

            type Widget {
              id: ID
            }

            extend type Query {
              widgets: [Widget]
            }
        "},
        "",
    )
    .expect_invalid();

    insta::assert_snapshot!(
        out,
        @"error at schema.graphqls:9-11: the Query type cannot be extended: declare queries on the primary Query type"
    );
}

#[test]
fn extension_without_primary_is_fatal() {
    let out = documents("extend type Ghost { id: ID }", "").expect_invalid();

    insta::assert_snapshot!(out, @"error at schema.graphqls:1: `Ghost` is extended but never defined");
}

#[test]
fn extension_kind_must_match_primary() {
    let out = documents("type Widget { id: ID }\n\nextend input Widget { x: Int }", "").expect_invalid();

    insta::assert_snapshot!(
        out,
        @"error at schema.graphqls:3: extension kind differs from its primary definition: `Widget` is an object type, extended as an input type (related: primary definition at schema.graphqls:1)"
    );
}

#[test]
fn builtin_names_are_reserved() {
    let out = documents("scalar Timestamp", "").expect_invalid();
    insta::assert_snapshot!(out, @"error at schema.graphqls:1: `Timestamp` is reserved for a built-in definition");

    let out = documents(r#"type Widget @figment(name: "String") { id: ID }"#, "").expect_invalid();
    insta::assert_snapshot!(out, @"error at schema.graphqls:1: `String` is reserved for a built-in definition");
}

#[test]
fn operation_in_schema_document_is_fatal() {
    let out = documents("type Widget { id: ID }\nquery Q { widget { id } }", "").expect_invalid();

    insta::assert_snapshot!(
        out,
        @"error at schema.graphqls:2: definition not allowed here: operation in schema document `schema.graphqls`"
    );
}

#[test]
fn mutation_fields_become_actions() {
    let dump = documents(
        indoc! {r#"
            type Widget {
              id: ID!
            }

            type Mutation @figment(auth: "user") {
              createWidget(name: String!): Widget
              deleteWidget(id: ID!): Boolean @figment(auth: "admin")
            }

            extend type Mutation {
              renameWidget(id: ID!, name: String!): Widget
            }
        "#},
        "",
    )
    .expect_valid_dump();

    insta::assert_snapshot!(dump, @r"
    thing Widget
      remote default
      field id: ID!
    action createWidget
      resolves createWidget: Widget
      remote default
      auth user
      field name: String!
    action deleteWidget
      resolves deleteWidget: Boolean
      remote default
      auth admin
      field id: ID!
    action renameWidget
      resolves renameWidget: Widget
      remote default
      auth user
      field id: ID!
      field name: String!
    ");
}

#[test]
fn type_renames_follow_references() {
    let dump = documents(
        indoc! {r#"
            type Widget @figment(name: "Gadget") {
              id: ID!
              parent: Widget
              display_name: String @figment(name: "displayName")
            }

            union Item = Widget | Other

            type Other {
              id: ID
            }
        "#},
        "",
    )
    .expect_valid_dump();

    insta::assert_snapshot!(dump, @r"
    thing Gadget
      remote default
      field id: ID!
      field parent: Gadget
      field displayName: String alias(default: display_name)
    variety Item
      remote default
      variant Gadget: Gadget?
      variant Other: Other?
    thing Other
      remote default
      field id: ID
    ");
}

#[test]
fn variety_input_lists_fields_as_variants() {
    let dump = documents(
        indoc! {"
            input Shape @variety {
              circle: Circle
              square: Square
            }
        "},
        "",
    )
    .expect_valid_dump();

    insta::assert_snapshot!(dump, @r"
    variety Shape
      remote default
      variant circle: Circle
      variant square: Square
    ");
}

#[test]
fn union_members_are_variants() {
    let figments = documents(
        "union Item = Widget | Gadget\ntype Widget { id: ID }\ntype Gadget { id: ID }",
        "",
    )
    .expect_valid();

    let variety = figments
        .find("Item")
        .and_then(|d| d.as_variety())
        .expect("Item is a variety");
    let variants: Vec<_> = variety.variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(variants, ["Widget", "Gadget"]);
    assert!(figments.find("Widget").and_then(|d| d.as_variety()).is_none());
}

#[test]
fn interfaces_and_field_markers() {
    let dump = documents(
        indoc! {r#"
            interface Node {
              id: ID!
            }

            type Widget implements Node @unique {
              id: ID! @id @hash_target
              cached: String @local
              value: Int @root_value
              label: String @derives(first_available: ["title", "name"], remap: "meta.label")
              old: String @deprecated(reason: "gone")
            }
        "#},
        "",
    )
    .expect_valid_dump();

    insta::assert_snapshot!(dump, @r#"
    thing Node interface
      remote default
      field id: ID!
    thing Widget unique
      remote default
      implements Node
      field id: ID! identifying hash_target
      field cached: String local
      field value: Int root
      field label: String first_available(title, name) remap(meta.label)
      field old: String deprecated("gone")
    "#);
}

#[test]
fn enum_overrides_apply_by_name() {
    let figments = documents(
        indoc! {r#"
            enum Color {
              RED
              GREEN @deprecated(reason: "use LIME")
            }

            extend enum Color @enum_value(name: "RED", value: "r") @enum_value(name: "BLUE", value: "b") {
              LIME
            }
        "#},
        "",
    )
    .expect_valid();

    insta::assert_snapshot!(figments.printer().with_builtins(false).dump(), @r#"
    enum Color
      remote default
      value RED = "r"
      value GREEN deprecated("use LIME")
      value LIME
    "#);
    insta::assert_snapshot!(
        figments.dump_warnings(),
        @"warning at schema.graphqls:6: `@enum_value` names unknown value `BLUE`"
    );

    let color = figments
        .find("Color")
        .and_then(|d| d.as_enum())
        .expect("Color is an enum");
    let values: Vec<_> = color.values.iter().map(|v| v.effective_value()).collect();
    assert_eq!(values, ["r", "GREEN", "LIME"]);
}

#[test]
fn remote_with_base_action() {
    let dump = FigmentBuilder::new()
        .schema(
            "billing.graphqls",
            indoc! {r#"
                extend schema
                  @remote(name: "billing", address: "https://billing.example.com")
                  @base_action(name: "BillingAction")
                  @base_action_field(name: "account", type: "ID!", description: "Billing account")
                  @base_action_field(name: "tags", type: "{String}")

                type Invoice @figment(auth: "user") {
                  id: ID!
                }
            "#},
        )
        .expect_valid_dump();

    insta::assert_snapshot!(dump, @r"
    action BillingAction base
      remote billing
      field account: ID!
      field tags: {String}
    thing Invoice
      remote billing
      auth user
      field id: ID!
    remote billing
      endpoint https://billing.example.com
      base_action BillingAction
    ");
}

#[test]
fn remote_declared_twice_with_different_addresses_is_fatal() {
    let out = FigmentBuilder::new()
        .schema("a.graphqls", r#"extend schema @remote(name: "billing", address: "https://a")"#)
        .schema("b.graphqls", r#"extend schema @remote(name: "billing", address: "https://b")"#)
        .expect_invalid();

    insta::assert_snapshot!(
        out,
        @"error at b.graphqls:1: remote declared with different addresses: `billing` is `https://b` here and `https://a` elsewhere (related: first address at a.graphqls:1)"
    );
}

#[test]
fn bad_base_action_type_string_is_fatal() {
    let out = documents(
        indoc! {r#"
            extend schema
              @remote(name: "billing")
              @base_action(name: "BillingAction")
              @base_action_field(name: "account", type: "[ID")
        "#},
        "",
    )
    .expect_invalid();

    insta::assert_snapshot!(
        out,
        @"error at schema.graphqls:4: invalid type string: `[ID` for `account`: expected `]`"
    );
}

#[test]
fn remote_without_name_warns() {
    let figments = documents(
        indoc! {r#"
            extend schema @remote(address: "https://x.example.com")

            type Widget {
              id: ID
            }
        "#},
        "",
    )
    .expect_valid();

    insta::assert_snapshot!(
        figments.dump_warnings(),
        @"warning at schema.graphqls:1: `@remote` is missing its `name` argument"
    );
    assert!(figments.warnings().contains(DiagnosticKind::MissingRemoteArguments));
    insta::assert_snapshot!(figments.printer().with_builtins(false).dump(), @r"
    thing Widget
      remote default
      field id: ID
    ");
}

#[test]
fn figments_carry_source_lines() {
    let dump = documents(
        indoc! {"
            type Widget {
              id: ID!

              name: String
            }
        "},
        "",
    )
    .expect_valid()
    .printer()
    .with_builtins(false)
    .with_sources(true)
    .dump();

    insta::assert_snapshot!(dump, @r"
    thing Widget @ schema.graphqls:1-5
      remote default
      field id: ID! @ schema.graphqls:2
      field name: String @ schema.graphqls:4
    ");
}
