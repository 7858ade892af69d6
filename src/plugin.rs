//! The installable plugin surface: collects field specs and synthesizes them
//! into a schema builder on install.

use arcstr::ArcStr;
use serde_json::Value as Json;
use tracing::debug;

use crate::{
    SynthesisError,
    declaration::NonNullDefaults,
    mutation::{MutationField, synthesize_mutation_field},
    query::{QueryField, SortTypeConfig, synthesize_query_field},
    registry::SchemaBuilder,
};

/// Configuration accepted by [`dynamic_fields_plugin`].
///
/// Every knob is optional; unset knobs fall back to the documented defaults.
#[derive(Clone, Debug, Default)]
pub struct DynamicFieldsConfig {
    /// The plugin instance name hosts identify the installed plugin by.
    ///
    /// Defaults to `"dynamic-fields"`.
    pub field_name: Option<ArcStr>,

    /// Plugin-wide nullability defaults, overridable per field.
    pub non_null_defaults: Option<NonNullDefaults>,

    /// Name of the shared sort-direction enum.
    ///
    /// Defaults to `"SortType"`.
    pub sort_type_name: Option<ArcStr>,

    /// Underlying values of the sort enum's `ASC` and `DESC` members, in
    /// that order.
    ///
    /// Defaults to `"asc"` / `"desc"`.
    pub sort_type_values: Option<[Json; 2]>,

    /// Root type mutation fields are attached to.
    ///
    /// Defaults to `"Mutation"`.
    pub mutation_type: Option<ArcStr>,

    /// Root type query fields are attached to.
    ///
    /// Defaults to `"Query"`.
    pub query_type: Option<ArcStr>,
}

/// An installable plugin synthesizing dynamic fields into a schema build.
///
/// Collect field specs with [`mutation_field`](DynamicFieldsPlugin::mutation_field)
/// and [`query_field`](DynamicFieldsPlugin::query_field), then hand the
/// plugin to the host; its [`on_install`](DynamicFieldsPlugin::on_install)
/// hook performs all synthesis in declaration order during one build pass.
pub struct DynamicFieldsPlugin {
    config: DynamicFieldsConfig,
    mutations: Vec<(ArcStr, MutationField)>,
    queries: Vec<(ArcStr, QueryField)>,
}

/// Builds a [`DynamicFieldsPlugin`] from the given configuration.
pub fn dynamic_fields_plugin(config: DynamicFieldsConfig) -> DynamicFieldsPlugin {
    DynamicFieldsPlugin::new(config)
}

impl DynamicFieldsPlugin {
    /// Builds an empty plugin with the given configuration.
    pub fn new(config: DynamicFieldsConfig) -> Self {
        Self {
            config,
            mutations: vec![],
            queries: vec![],
        }
    }

    /// The stable name of this plugin instance.
    pub fn name(&self) -> &str {
        self.config.field_name.as_deref().unwrap_or("dynamic-fields")
    }

    /// Collects a mutation field to synthesize on install.
    #[must_use]
    pub fn mutation_field(mut self, field_name: impl Into<ArcStr>, field: MutationField) -> Self {
        self.mutations.push((field_name.into(), field));
        self
    }

    /// Collects a query field to synthesize on install.
    #[must_use]
    pub fn query_field(mut self, field_name: impl Into<ArcStr>, field: QueryField) -> Self {
        self.queries.push((field_name.into(), field));
        self
    }

    /// Synthesizes every collected field into `b`, in declaration order.
    ///
    /// Errors abort the install; registered auxiliary types are additive, so
    /// there is no partial state to roll back.
    pub fn on_install<B>(&self, b: &mut B) -> Result<(), SynthesisError>
    where
        B: SchemaBuilder + ?Sized,
    {
        debug!(plugin = self.name(), "installing dynamic fields");
        let defaults = self.config.non_null_defaults;
        let mutation_type = self
            .config
            .mutation_type
            .clone()
            .unwrap_or(arcstr::literal!("Mutation"));
        let query_type = self
            .config
            .query_type
            .clone()
            .unwrap_or(arcstr::literal!("Query"));
        let sort_default = SortTypeConfig::default();
        let sort_type = SortTypeConfig {
            name: self
                .config
                .sort_type_name
                .clone()
                .unwrap_or(sort_default.name),
            values: self
                .config
                .sort_type_values
                .clone()
                .unwrap_or(sort_default.values),
        };

        for (field_name, field) in &self.mutations {
            synthesize_mutation_field(b, &mutation_type, field_name.clone(), field, defaults)?;
        }
        for (field_name, field) in &self.queries {
            synthesize_query_field(
                b,
                &query_type,
                field_name.clone(),
                field,
                defaults,
                &sort_type,
            )?;
        }
        Ok(())
    }
}
