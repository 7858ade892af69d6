//! Mutation field synthesis: `<name>Input` / `<name>Payload` derivation.

use arcstr::ArcStr;
use tracing::debug;

use crate::{
    SynthesisError,
    declaration::{
        ArgumentDeclaration, FieldDeclaration, FieldPosition, FieldResolverFn, NonNullDefaults,
        merge_arguments, resolve_defaults,
    },
    registry::SchemaBuilder,
    resolve::resolve_shape,
    shape::Shape,
};

/// Compact description of a mutation field.
///
/// The `name` derives every auxiliary type name (`<name>Input`,
/// `<name>Payload`, union members); it lives only for the duration of one
/// schema-build pass.
#[derive(Clone)]
pub struct MutationField {
    pub(crate) name: ArcStr,
    pub(crate) description: Option<ArcStr>,
    pub(crate) non_null_defaults: Option<NonNullDefaults>,
    pub(crate) args: Vec<ArgumentDeclaration>,
    pub(crate) input: Option<Shape>,
    pub(crate) payload: Shape,
    pub(crate) resolve: FieldResolverFn,
}

impl MutationField {
    /// Builds a new [`MutationField`] with the given base `name`, output
    /// `payload` shape, and resolver.
    pub fn new(name: impl Into<ArcStr>, payload: Shape, resolve: FieldResolverFn) -> Self {
        Self {
            name: name.into(),
            description: None,
            non_null_defaults: None,
            args: vec![],
            input: None,
            payload,
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

    /// Sets the shape of the field's `input` argument.
    #[must_use]
    pub fn input(mut self, input: Shape) -> Self {
        self.input = Some(input);
        self
    }

    /// Adds a caller-supplied argument, kept unless a derived argument
    /// shadows it.
    #[must_use]
    pub fn argument(mut self, argument: ArgumentDeclaration) -> Self {
        self.args.push(argument);
        self
    }
}

/// Synthesizes one mutation field onto the type named `target`.
///
/// Registers the derived `<name>Input` / `<name>Payload` auxiliary types as
/// needed (reusing already-registered ones) and adds exactly one field
/// carrying the stored resolver.
pub fn synthesize_mutation_field<B>(
    b: &mut B,
    target: &str,
    field_name: impl Into<ArcStr>,
    field: &MutationField,
    plugin_defaults: Option<NonNullDefaults>,
) -> Result<(), SynthesisError>
where
    B: SchemaBuilder + ?Sized,
{
    let field_name = field_name.into();
    let defaults = resolve_defaults(field.non_null_defaults, plugin_defaults);
    let base = &field.name;
    debug!(field = %field_name, base = %base, "synthesizing mutation field");

    let mut derived = vec![];
    if let Some(input) = &field.input {
        let input_name = ArcStr::from(format!("{base}Input"));
        let ty = resolve_shape(b, base, &input_name, FieldPosition::Input, input, defaults)?;
        let arg_type = match input {
            // A pre-built wrapper already states the wanted nullability.
            Shape::Wrapped(_) => ty,
            // A bare reference follows the merged input defaults.
            Shape::Named(_) => {
                if defaults.input {
                    ty.non_null()
                } else {
                    ty
                }
            }
            // Derived input types make the argument required.
            Shape::Define(_) | Shape::Map(_) => ty.non_null(),
        };
        derived.push(ArgumentDeclaration::new(arcstr::literal!("input"), arg_type));
    }

    let payload_name = ArcStr::from(format!("{base}Payload"));
    let ty = resolve_shape(
        b,
        base,
        &payload_name,
        FieldPosition::Output,
        &field.payload,
        defaults,
    )?;
    let field_type = match &field.payload {
        // A pre-built wrapper is the field's exact output type.
        Shape::Wrapped(_) => ty,
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{MutationField, synthesize_mutation_field};
    use crate::{
        SynthesisError,
        declaration::{FieldResolverFn, NonNullDefaults, ObjectDeclaration, TypeDeclaration},
        registry::{SchemaBuilder as _, TypeRegistry},
        shape::{MemberShape, Shape},
        types::Type,
    };

    fn noop_resolver() -> FieldResolverFn {
        Arc::new(|_| json!(null))
    }

    #[test]
    fn synthesizes_input_payload_and_field() {
        let mut registry = TypeRegistry::new();
        let field = MutationField::new(
            "createUser",
            Shape::define(|t| t.string("id")),
            noop_resolver(),
        )
        .description("Creates a user.")
        .input(Shape::define(|t| t.string("email")));

        synthesize_mutation_field(&mut registry, "Mutation", "createUser", &field, None).unwrap();

        assert!(matches!(
            registry.type_by_name("createUserInput"),
            Some(TypeDeclaration::InputObject(_)),
        ));
        assert!(matches!(
            registry.type_by_name("createUserPayload"),
            Some(TypeDeclaration::Object(_)),
        ));

        let fields = registry.fields_of("Mutation").unwrap();
        assert_eq!(fields.len(), 1);
        let field = &fields[0];
        assert_eq!(field.name.as_str(), "createUser");
        assert_eq!(field.description.as_deref(), Some("Creates a user."));
        assert_eq!(field.field_type, Type::named("createUserPayload"));
        assert_eq!(field.arguments.len(), 1);
        assert_eq!(field.arguments[0].name.as_str(), "input");
        assert_eq!(
            field.arguments[0].arg_type,
            Type::named("createUserInput").non_null(),
        );
        assert!(field.resolver.is_some());
    }

    #[test]
    fn absent_input_means_no_arguments() {
        let mut registry = TypeRegistry::new();
        let field = MutationField::new("ping", Shape::define(|t| t.boolean("ok")), noop_resolver());
        synthesize_mutation_field(&mut registry, "Mutation", "ping", &field, None).unwrap();
        assert!(!registry.has_type("pingInput"));
        assert!(registry.fields_of("Mutation").unwrap()[0].arguments.is_empty());
    }

    #[test]
    fn wrapped_input_keeps_its_wrapping() {
        let mut registry = TypeRegistry::new();
        registry
            .add_type(ObjectDeclaration::new("Filter", vec![]).into_declaration())
            .unwrap();
        let field = MutationField::new(
            "applyFilters",
            Shape::define(|t| t.boolean("ok")),
            noop_resolver(),
        )
        .input(Shape::from(Type::named("Filter").non_null().list()));
        synthesize_mutation_field(&mut registry, "Mutation", "applyFilters", &field, None).unwrap();
        let args = &registry.fields_of("Mutation").unwrap()[0].arguments;
        assert_eq!(args[0].arg_type, Type::named("Filter").non_null().list());
    }

    #[test]
    fn wrapped_payload_becomes_the_field_type_verbatim() {
        let mut registry = TypeRegistry::new();
        registry
            .add_type(ObjectDeclaration::new("User", vec![]).into_declaration())
            .unwrap();
        let before = registry.type_list().len();
        let field = MutationField::new(
            "importUsers",
            Shape::from(Type::named("User").non_null().list()),
            noop_resolver(),
        );
        synthesize_mutation_field(&mut registry, "Mutation", "importUsers", &field, None).unwrap();
        assert_eq!(
            registry.fields_of("Mutation").unwrap()[0].field_type,
            Type::named("User").non_null().list(),
        );
        // Mutation itself is the only addition; no payload type is created.
        assert_eq!(registry.type_list().len(), before + 1);
        assert!(!registry.has_type("importUsersPayload"));
    }

    #[test]
    fn named_input_keeps_default_nullability() {
        let mut registry = TypeRegistry::new();
        registry
            .add_type(
                crate::declaration::InputObjectDeclaration::new("UserInput", vec![])
                    .into_declaration(),
            )
            .unwrap();
        let field = MutationField::new(
            "createUser",
            Shape::define(|t| t.string("id")),
            noop_resolver(),
        )
        .input(Shape::named("UserInput"));
        synthesize_mutation_field(&mut registry, "Mutation", "createUser", &field, None).unwrap();
        let args = &registry.fields_of("Mutation").unwrap()[0].arguments;
        assert_eq!(args[0].arg_type, Type::named("UserInput"));
    }

    #[test]
    fn named_input_follows_non_null_input_defaults() {
        let mut registry = TypeRegistry::new();
        registry
            .add_type(
                crate::declaration::InputObjectDeclaration::new("UserInput", vec![])
                    .into_declaration(),
            )
            .unwrap();
        let field = MutationField::new(
            "createUser",
            Shape::define(|t| t.string("id")),
            noop_resolver(),
        )
        .input(Shape::named("UserInput"))
        .non_null_defaults(NonNullDefaults {
            input: true,
            output: false,
        });
        synthesize_mutation_field(&mut registry, "Mutation", "createUser", &field, None).unwrap();
        let args = &registry.fields_of("Mutation").unwrap()[0].arguments;
        assert_eq!(args[0].arg_type, Type::named("UserInput").non_null());
    }

    #[test]
    fn payload_union_members_are_derived_from_map_keys() {
        let mut registry = TypeRegistry::new();
        let field = MutationField::new(
            "createUser",
            Shape::map([
                ("ok", MemberShape::define(|t| t.string("id"))),
                ("error", MemberShape::define(|t| t.string("message"))),
            ]),
            noop_resolver(),
        );
        synthesize_mutation_field(&mut registry, "Mutation", "createUser", &field, None).unwrap();
        assert!(registry.has_type("createUserOk"));
        assert!(registry.has_type("createUserError"));
        match registry.type_by_name("createUserPayload") {
            Some(TypeDeclaration::Union(union)) => {
                let members: Vec<_> = union.members.iter().map(|m| m.as_str()).collect();
                assert_eq!(members, vec!["createUserOk", "createUserError"]);
            }
            other => panic!("expected union, got {other:?}"),
        }
    }

    #[test]
    fn unknown_payload_reference_aborts_before_field_registration() {
        let mut registry = TypeRegistry::new();
        let field = MutationField::new("createUser", Shape::named("Ghost"), noop_resolver());
        let err = synthesize_mutation_field(&mut registry, "Mutation", "createUser", &field, None)
            .unwrap_err();
        assert_eq!(
            err,
            SynthesisError::UnknownType {
                name: "Ghost".into()
            }
        );
        assert!(registry.fields_of("Mutation").is_none());
    }

    #[test]
    fn output_defaults_make_field_type_non_null() {
        let mut registry = TypeRegistry::new();
        let field = MutationField::new("ping", Shape::define(|t| t.boolean("ok")), noop_resolver())
            .non_null_defaults(NonNullDefaults {
                input: false,
                output: true,
            });
        synthesize_mutation_field(&mut registry, "Mutation", "ping", &field, None).unwrap();
        assert_eq!(
            registry.fields_of("Mutation").unwrap()[0].field_type,
            Type::named("pingPayload").non_null(),
        );
    }
}
