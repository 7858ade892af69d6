//! Query field synthesis: filter/sort inputs, item types, and list/pagination
//! result wrappers.

use arcstr::ArcStr;
use serde_json::{Value as Json, json};
use tracing::debug;

use crate::{
    SynthesisError,
    declaration::{
        ArgumentDeclaration, EnumDeclaration, EnumValueDeclaration, FieldDeclaration,
        FieldPosition, FieldResolverFn, InputObjectDeclaration, NonNullDefaults,
        ObjectDeclaration, merge_arguments, resolve_defaults,
    },
    registry::SchemaBuilder,
    resolve::resolve_shape,
    shape::Shape,
    types::Type,
    util::singularize,
};

/// How the `items` list of a result wrapper is wrapped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListMode {
    /// Non-null list of non-null items, `[Item!]!`.
    NonNull,
    /// Nullable list of nullable items, `[Item]`.
    Nullable,
}

/// Output wrapping metadata for a query field.
///
/// When either knob is set, the field's output becomes a `<name>Result`
/// wrapper object around the item type instead of the item type itself.
#[derive(Clone, Debug, Default)]
pub struct ResultMeta {
    /// List wrapping of the wrapper's `items` field; a singular `data` field
    /// is used when absent.
    pub list: Option<ListMode>,
    /// Shape of the wrapper's non-null `pagination` field; a bare name must
    /// already be registered.
    pub pagination: Option<Shape>,
}

impl ResultMeta {
    fn is_empty(&self) -> bool {
        self.list.is_none() && self.pagination.is_none()
    }
}

/// Name and underlying values of the shared sort-direction enum.
///
/// The enum is created once per build pass and reused by every query field.
#[derive(Clone, Debug)]
pub struct SortTypeConfig {
    /// Enum type name.
    pub name: ArcStr,
    /// Underlying values of the `ASC` and `DESC` members, in that order.
    pub values: [Json; 2],
}

impl Default for SortTypeConfig {
    fn default() -> Self {
        Self {
            name: arcstr::literal!("SortType"),
            values: [json!("asc"), json!("desc")],
        }
    }
}

/// Compact description of a query field.
///
/// The `name` derives every auxiliary type name (`<name>FilterInput`,
/// `<name>SortInput`, `<name>Result`, union members, the singular item type);
/// it lives only for the duration of one schema-build pass.
#[derive(Clone)]
pub struct QueryField {
    pub(crate) name: ArcStr,
    pub(crate) description: Option<ArcStr>,
    pub(crate) non_null_defaults: Option<NonNullDefaults>,
    pub(crate) args: Vec<ArgumentDeclaration>,
    pub(crate) filter: Option<Shape>,
    pub(crate) sort_fields: Vec<ArcStr>,
    pub(crate) result: Shape,
    pub(crate) result_meta: Option<ResultMeta>,
    pub(crate) resolve: FieldResolverFn,
}

impl QueryField {
    /// Builds a new [`QueryField`] with the given base `name`, output
    /// `result` shape, and resolver.
    pub fn new(name: impl Into<ArcStr>, result: Shape, resolve: FieldResolverFn) -> Self {
        Self {
            name: name.into(),
            description: None,
            non_null_defaults: None,
            args: vec![],
            filter: None,
            sort_fields: vec![],
            result,
            result_meta: None,
            resolve,
        }
    }

    /// Sets the `description` attached to the synthesized field.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the plugin-level nullability defaults for this field.
    #[must_use]
    pub fn non_null_defaults(mut self, defaults: NonNullDefaults) -> Self {
        self.non_null_defaults = Some(defaults);
        self
    }

    /// Adds a caller-supplied argument, kept unless a derived argument
    /// shadows it.
    #[must_use]
    pub fn argument(mut self, argument: ArgumentDeclaration) -> Self {
        self.args.push(argument);
        self
    }

    /// Sets the shape of the field's `filter` argument.
    #[must_use]
    pub fn filter(mut self, filter: Shape) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Declares the sortable keys exposed through the `sort` argument, in
    /// order.
    #[must_use]
    pub fn sort_fields<N: Into<ArcStr>>(mut self, fields: impl IntoIterator<Item = N>) -> Self {
        self.sort_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output wrapping metadata.
    #[must_use]
    pub fn result_meta(mut self, meta: ResultMeta) -> Self {
        self.result_meta = Some(meta);
        self
    }
}

/// Synthesizes one query field onto the type named `target`.
///
/// Registers the shared sort enum, the derived filter/sort input types, the
/// item type, and the optional `<name>Result` wrapper as needed (reusing
/// already-registered ones), then adds exactly one field carrying the stored
/// resolver and the merged arguments.
pub fn synthesize_query_field<B>(
    b: &mut B,
    target: &str,
    field_name: impl Into<ArcStr>,
    field: &QueryField,
    plugin_defaults: Option<NonNullDefaults>,
    sort_type: &SortTypeConfig,
) -> Result<(), SynthesisError>
where
    B: SchemaBuilder + ?Sized,
{
    let field_name = field_name.into();
    let defaults = resolve_defaults(field.non_null_defaults, plugin_defaults);
    let base = &field.name;
    debug!(field = %field_name, base = %base, "synthesizing query field");

    if !b.has_type(&sort_type.name) {
        b.add_type(
            EnumDeclaration::new(
                sort_type.name.clone(),
                vec![
                    EnumValueDeclaration::new("ASC", sort_type.values[0].clone()),
                    EnumValueDeclaration::new("DESC", sort_type.values[1].clone()),
                ],
            )
            .into_declaration(),
        )?;
    }

    let mut derived = vec![];

    if let Some(filter) = &field.filter {
        let filter_name = ArcStr::from(format!("{base}FilterInput"));
        let ty = resolve_shape(b, base, &filter_name, FieldPosition::Input, filter, defaults)?;
        // Plain forms yield a nullable argument; wrappers state their own
        // nullability and pass through resolve_shape verbatim.
        derived.push(ArgumentDeclaration::new(arcstr::literal!("filter"), ty));
    }

    if !field.sort_fields.is_empty() {
        let sort_input = ArcStr::from(format!("{base}SortInput"));
        if !b.has_type(&sort_input) {
            let input_fields = field
                .sort_fields
                .iter()
                .map(|name| {
                    ArgumentDeclaration::new(name.clone(), Type::Named(sort_type.name.clone()))
                })
                .collect();
            b.add_type(
                InputObjectDeclaration::new(sort_input.clone(), input_fields).into_declaration(),
            )?;
        }
        derived.push(ArgumentDeclaration::new(
            arcstr::literal!("sort"),
            Type::Named(sort_input),
        ));
    }

    let meta = field.result_meta.as_ref().filter(|m| !m.is_empty());
    let ty = match meta {
        None => {
            let result_name = ArcStr::from(format!("{base}Result"));
            resolve_shape(
                b,
                base,
                &result_name,
                FieldPosition::Output,
                &field.result,
                defaults,
            )?
        }
        Some(meta) => {
            // The wrapper takes the `<name>Result` name, so the item type
            // falls back to the singular form of the base name.
            let item_name = singular_item_name(b, base);
            let item = resolve_shape(
                b,
                base,
                &item_name,
                FieldPosition::Output,
                &field.result,
                defaults,
            )?;

            let wrapper_name = ArcStr::from(format!("{base}Result"));
            if !b.has_type(&wrapper_name) {
                let mut fields = vec![];
                match meta.list {
                    Some(ListMode::NonNull) => {
                        fields.push(FieldDeclaration::new(
                            arcstr::literal!("items"),
                            item.clone().non_null().list().non_null(),
                        ));
                    }
                    Some(ListMode::Nullable) => {
                        fields.push(FieldDeclaration::new(
                            arcstr::literal!("items"),
                            item.clone().list(),
                        ));
                    }
                    None => {
                        let data = if defaults.output {
                            item.clone().non_null()
                        } else {
                            item.clone()
                        };
                        fields.push(FieldDeclaration::new(arcstr::literal!("data"), data));
                    }
                }
                if let Some(pagination) = &meta.pagination {
                    let pagination_name = ArcStr::from(format!("{base}Pagination"));
                    let pagination_ty = resolve_shape(
                        b,
                        base,
                        &pagination_name,
                        FieldPosition::Output,
                        pagination,
                        defaults,
                    )?;
                    fields.push(FieldDeclaration::new(
                        arcstr::literal!("pagination"),
                        pagination_ty.non_null(),
                    ));
                }
                debug!(name = %wrapper_name, "registering result wrapper type");
                b.add_type(ObjectDeclaration::new(wrapper_name.clone(), fields).into_declaration())?;
            }
            Type::Named(wrapper_name)
        }
    };
    let field_type = match &field.result {
        // A pre-built wrapper is the field's exact output type.
        Shape::Wrapped(_) if meta.is_none() => ty,
        _ if defaults.output => ty.non_null(),
        _ => ty,
    };

    let mut decl = FieldDeclaration::new(field_name, field_type).resolver(field.resolve.clone());
    if let Some(description) = &field.description {
        decl = decl.description(description.clone());
    }
    for arg in merge_arguments(&field.args, derived) {
        decl = decl.argument(arg);
    }
    b.add_field(target, decl)?;
    Ok(())
}

/// Picks the item type name for a wrapped result: the singular form of the
/// base name, or `<singular>Item` when no distinct singular form exists or
/// the bare singular is already taken by a registered type.
fn singular_item_name<B>(b: &B, base: &str) -> ArcStr
where
    B: SchemaBuilder + ?Sized,
{
    let singular = singularize(base);
    if singular != base && !b.has_type(&singular) {
        return ArcStr::from(&*singular);
    }
    ArcStr::from(format!("{singular}Item"))
}
