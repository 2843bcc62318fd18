//! Names of definitions the compiler synthesizes into every parse.

/// Primitive scalars, in emission order.
pub const BUILTIN_SCALARS: [&str; 6] = ["String", "Boolean", "Int", "Float", "ID", TIMESTAMP];

pub const TIMESTAMP: &str = "Timestamp";

/// Action contributing [`TIME_FIELD`] to every action.
pub const BASE_ACTION: &str = "BaseAction";

pub const TIME_FIELD: &str = "time";

/// Auth kinds, in emission order.
pub const AUTH_KINDS: [&str; 6] = [
    "none",
    "guid",
    "user",
    "user_optional",
    "access_token",
    "admin",
];

/// Remote owning definitions from documents without their own `@remote`.
pub const DEFAULT_REMOTE: &str = "default";

pub const QUERY_TYPE: &str = "Query";

pub const MUTATION_TYPE: &str = "Mutation";

/// Whether a user definition named `name` would collide with a synthesized one.
pub fn is_reserved_name(name: &str) -> bool {
    name == BASE_ACTION || BUILTIN_SCALARS.contains(&name)
}
