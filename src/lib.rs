//! Dynamic field synthesis for declarative GraphQL schema builders.
//!
//! Given a compact field description — a base name, an optional input shape,
//! one or more result shapes, and a resolver callback — this crate derives
//! the full set of auxiliary type declarations (input type, payload/result
//! type, union members, union, sort input, pagination wrapper) and registers
//! a single field wiring them together with sensible defaults.
//!
//! The underlying schema builder is reached through the narrow
//! [`SchemaBuilder`] capability; an in-memory [`TypeRegistry`] implementation
//! is provided. Resolver callbacks are opaque to the synthesis core: they are
//! stored and forwarded, never invoked.
//!
//! ```
//! use std::sync::Arc;
//!
//! use graphql_dynamic_fields::{
//!     DynamicFieldsConfig, MutationField, SchemaBuilder as _, Shape, TypeRegistry,
//!     dynamic_fields_plugin,
//! };
//!
//! let plugin = dynamic_fields_plugin(DynamicFieldsConfig::default()).mutation_field(
//!     "createUser",
//!     MutationField::new(
//!         "createUser",
//!         Shape::define(|t| t.string("id")),
//!         Arc::new(|_| serde_json::json!({"id": "1"})),
//!     )
//!     .input(Shape::define(|t| t.string("email"))),
//! );
//!
//! let mut registry = TypeRegistry::new();
//! plugin.on_install(&mut registry).unwrap();
//! assert!(registry.has_type("createUserInput"));
//! assert!(registry.has_type("createUserPayload"));
//! ```

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};

mod declaration;
mod mutation;
mod plugin;
mod query;
mod registry;
mod resolve;
mod shape;
mod types;
mod util;

pub use crate::{
    declaration::{
        ArgumentDeclaration, EnumDeclaration, EnumValueDeclaration, FieldDeclaration,
        FieldPosition, FieldResolverFn, FieldsBlock, InputObjectDeclaration, NonNullDefaults,
        ObjectDeclaration, ScalarDeclaration, TypeDeclaration, UnionDeclaration, resolve_defaults,
    },
    mutation::{MutationField, synthesize_mutation_field},
    plugin::{DynamicFieldsConfig, DynamicFieldsPlugin, dynamic_fields_plugin},
    query::{ListMode, QueryField, ResultMeta, SortTypeConfig, synthesize_query_field},
    registry::{BUILTIN_SCALARS, RegistryError, SchemaBuilder, TypeRegistry},
    shape::{DefineFn, MemberShape, Shape},
    types::Type,
    util::{capitalize_first, singularize},
};

/// An error that aborted dynamic field synthesis.
///
/// All synthesis errors are detected synchronously, before the field's
/// registration completes; they are caller-configuration errors and abort the
/// current build pass.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum SynthesisError {
    /// A shape referenced a type name that is not registered.
    #[display("type \"{name}\" is not registered")]
    UnknownType {
        /// The missing type name.
        #[error(not(source))]
        name: ArcStr,
    },

    /// A shape map carried no entries.
    #[display("\"{type_name}\" must declare at least one member shape")]
    EmptyShape {
        /// The derived name of the type the map was resolved for.
        #[error(not(source))]
        type_name: ArcStr,
    },

    /// The underlying builder rejected a registration.
    #[display("registry error: {_0}")]
    Registry(RegistryError),
}

impl From<RegistryError> for SynthesisError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}
