//! Test utilities.

use crate::{Error, FigmentBuilder, Figments};

impl FigmentBuilder {
    /// Parse, panicking with the rendered diagnostics on failure.
    pub fn expect_valid(self) -> Figments {
        let sources = self.sources().clone();
        match self.parse() {
            Ok(figments) => figments,
            Err(err) => match err.diagnostics() {
                Some(diagnostics) => panic!(
                    "expected valid documents, got:\n{}",
                    diagnostics.render(&sources)
                ),
                None => panic!("expected valid documents, got: {}", err),
            },
        }
    }

    /// Dump of the parse without built-ins.
    pub fn expect_valid_dump(self) -> String {
        self.expect_valid().printer().with_builtins(false).dump()
    }

    pub fn expect_error(self) -> Error {
        match self.parse() {
            Ok(figments) => panic!(
                "expected an error, got:\n{}",
                figments.printer().with_builtins(false).dump()
            ),
            Err(err) => err,
        }
    }

    /// One line per diagnostic of the failed parse.
    pub fn expect_invalid(self) -> String {
        let err = self.expect_error();
        match err.diagnostics() {
            Some(diagnostics) => diagnostics.printer().render(),
            None => panic!("expected diagnostics, got: {}", err),
        }
    }
}

impl Figments {
    /// One line per warning.
    pub fn dump_warnings(&self) -> String {
        self.warnings().printer().render()
    }
}

/// A builder over one schema document and one operation document.
pub fn documents(schema: &str, operations: &str) -> FigmentBuilder {
    let builder = FigmentBuilder::new().schema("schema.graphqls", schema);
    if operations.is_empty() {
        builder
    } else {
        builder.operation("operations.graphql", operations)
    }
}
