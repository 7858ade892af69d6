//! Type, field, and argument declarations accepted by a schema builder.

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use serde_json::Value as Json;

use crate::types::Type;

/// Resolver callback attached to a synthesized field.
///
/// The synthesis core stores and forwards this callback only; it is invoked
/// by the schema builder at request time, never during synthesis.
pub type FieldResolverFn = Arc<dyn Fn(&Json) -> Json + Send + Sync>;

/// Whether omitted nullability defaults to non-null, per position.
///
/// The builder-wide default is all-nullable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NonNullDefaults {
    /// Default for input positions (arguments and input object fields).
    pub input: bool,
    /// Default for output positions (object fields).
    pub output: bool,
}

/// Merges a field-level nullability override with the plugin-level policy.
///
/// Applied once at the top of each synthesizer; the builder-wide default
/// applies when neither level sets a policy.
pub fn resolve_defaults(
    field: Option<NonNullDefaults>,
    plugin: Option<NonNullDefaults>,
) -> NonNullDefaults {
    field.or(plugin).unwrap_or_default()
}

/// The position a definition block declares fields for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldPosition {
    /// Arguments and input object fields.
    Input,
    /// Object fields.
    Output,
}

/// A fresh type-definition block handed to shape definition callbacks.
///
/// Fields declared through the scalar shorthands pick up the effective
/// [`NonNullDefaults`] for the block's position; [`FieldsBlock::field`]
/// stores an explicit type verbatim.
pub struct FieldsBlock {
    position: FieldPosition,
    defaults: NonNullDefaults,
    fields: Vec<(ArcStr, Type)>,
}

impl FieldsBlock {
    pub(crate) fn new(position: FieldPosition, defaults: NonNullDefaults) -> Self {
        Self {
            position,
            defaults,
            fields: vec![],
        }
    }

    /// Declares a field with an explicit type, bypassing the null-defaults.
    pub fn field(&mut self, name: impl Into<ArcStr>, ty: Type) {
        self.fields.push((name.into(), ty));
    }

    /// Declares a `String` field, nullability per the block's defaults.
    pub fn string(&mut self, name: impl Into<ArcStr>) {
        self.scalar(name, arcstr::literal!("String"));
    }

    /// Declares an `ID` field, nullability per the block's defaults.
    pub fn id(&mut self, name: impl Into<ArcStr>) {
        self.scalar(name, arcstr::literal!("ID"));
    }

    /// Declares an `Int` field, nullability per the block's defaults.
    pub fn int(&mut self, name: impl Into<ArcStr>) {
        self.scalar(name, arcstr::literal!("Int"));
    }

    /// Declares a `Float` field, nullability per the block's defaults.
    pub fn float(&mut self, name: impl Into<ArcStr>) {
        self.scalar(name, arcstr::literal!("Float"));
    }

    /// Declares a `Boolean` field, nullability per the block's defaults.
    pub fn boolean(&mut self, name: impl Into<ArcStr>) {
        self.scalar(name, arcstr::literal!("Boolean"));
    }

    fn scalar(&mut self, name: impl Into<ArcStr>, scalar: ArcStr) {
        let non_null = match self.position {
            FieldPosition::Input => self.defaults.input,
            FieldPosition::Output => self.defaults.output,
        };
        let ty = Type::Named(scalar);
        self.field(name, if non_null { ty.non_null() } else { ty });
    }

    pub(crate) fn into_object_fields(self) -> Vec<FieldDeclaration> {
        self.fields
            .into_iter()
            .map(|(name, ty)| FieldDeclaration::new(name, ty))
            .collect()
    }

    pub(crate) fn into_input_fields(self) -> Vec<ArgumentDeclaration> {
        self.fields
            .into_iter()
            .map(|(name, ty)| ArgumentDeclaration::new(name, ty))
            .collect()
    }
}

/// Generic named type declaration.
#[derive(Clone, Debug)]
pub enum TypeDeclaration {
    /// A scalar type.
    Scalar(ScalarDeclaration),
    /// An object type.
    Object(ObjectDeclaration),
    /// An input object type.
    InputObject(InputObjectDeclaration),
    /// A union type.
    Union(UnionDeclaration),
    /// An enum type.
    Enum(EnumDeclaration),
}

impl TypeDeclaration {
    /// The name this declaration registers under.
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(ScalarDeclaration { name, .. })
            | Self::Object(ObjectDeclaration { name, .. })
            | Self::InputObject(InputObjectDeclaration { name, .. })
            | Self::Union(UnionDeclaration { name, .. })
            | Self::Enum(EnumDeclaration { name, .. }) => name,
        }
    }

    /// The description of the declared type, if any.
    pub fn description(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(ScalarDeclaration { description, .. })
            | Self::Object(ObjectDeclaration { description, .. })
            | Self::InputObject(InputObjectDeclaration { description, .. })
            | Self::Union(UnionDeclaration { description, .. })
            | Self::Enum(EnumDeclaration { description, .. }) => description.as_ref(),
        }
    }
}

/// Scalar type declaration.
#[derive(Clone, Debug)]
pub struct ScalarDeclaration {
    /// Type name.
    pub name: ArcStr,
    /// Optional description.
    pub description: Option<ArcStr>,
}

impl ScalarDeclaration {
    /// Builds a new [`ScalarDeclaration`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the `description` of this scalar.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this declaration into a generic [`TypeDeclaration`].
    pub fn into_declaration(self) -> TypeDeclaration {
        TypeDeclaration::Scalar(self)
    }
}

/// Object type declaration.
#[derive(Clone, Debug)]
pub struct ObjectDeclaration {
    /// Type name.
    pub name: ArcStr,
    /// Optional description.
    pub description: Option<ArcStr>,
    /// Declared fields, in declaration order.
    pub fields: Vec<FieldDeclaration>,
}

impl ObjectDeclaration {
    /// Builds a new [`ObjectDeclaration`] with the given `name` and `fields`.
    pub fn new(name: impl Into<ArcStr>, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    /// Sets the `description` of this object type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this declaration into a generic [`TypeDeclaration`].
    pub fn into_declaration(self) -> TypeDeclaration {
        TypeDeclaration::Object(self)
    }
}

/// Input object type declaration.
#[derive(Clone, Debug)]
pub struct InputObjectDeclaration {
    /// Type name.
    pub name: ArcStr,
    /// Optional description.
    pub description: Option<ArcStr>,
    /// Declared input fields, in declaration order.
    pub input_fields: Vec<ArgumentDeclaration>,
}

impl InputObjectDeclaration {
    /// Builds a new [`InputObjectDeclaration`] with the given `name` and
    /// `input_fields`.
    pub fn new(name: impl Into<ArcStr>, input_fields: Vec<ArgumentDeclaration>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_fields,
        }
    }

    /// Sets the `description` of this input object type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this declaration into a generic [`TypeDeclaration`].
    pub fn into_declaration(self) -> TypeDeclaration {
        TypeDeclaration::InputObject(self)
    }
}

/// Union type declaration with ordered members.
#[derive(Clone, Debug)]
pub struct UnionDeclaration {
    /// Type name.
    pub name: ArcStr,
    /// Optional description.
    pub description: Option<ArcStr>,
    /// Member type names, in declaration order.
    pub members: Vec<ArcStr>,
}

impl UnionDeclaration {
    /// Builds a new [`UnionDeclaration`] with the given `name` and ordered
    /// `members`.
    pub fn new(name: impl Into<ArcStr>, members: Vec<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members,
        }
    }

    /// Sets the `description` of this union type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Picks the union member a runtime value represents.
    ///
    /// Uses the value's explicit `"__typename"` tag when it names a declared
    /// member, and falls back to the first declared member otherwise.
    pub fn resolve_member(&self, value: &Json) -> Option<&str> {
        value
            .get("__typename")
            .and_then(Json::as_str)
            .and_then(|tag| {
                self.members
                    .iter()
                    .find(|m| m.as_str() == tag)
                    .map(ArcStr::as_str)
            })
            .or_else(|| self.members.first().map(ArcStr::as_str))
    }

    /// Wraps this declaration into a generic [`TypeDeclaration`].
    pub fn into_declaration(self) -> TypeDeclaration {
        TypeDeclaration::Union(self)
    }
}

/// Enum type declaration.
#[derive(Clone, Debug)]
pub struct EnumDeclaration {
    /// Type name.
    pub name: ArcStr,
    /// Optional description.
    pub description: Option<ArcStr>,
    /// Declared values, in declaration order.
    pub values: Vec<EnumValueDeclaration>,
}

impl EnumDeclaration {
    /// Builds a new [`EnumDeclaration`] with the given `name` and `values`.
    pub fn new(name: impl Into<ArcStr>, values: Vec<EnumValueDeclaration>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values,
        }
    }

    /// Sets the `description` of this enum type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this declaration into a generic [`TypeDeclaration`].
    pub fn into_declaration(self) -> TypeDeclaration {
        TypeDeclaration::Enum(self)
    }
}

/// A single value of an enum type.
#[derive(Clone, Debug)]
pub struct EnumValueDeclaration {
    /// The name of the enum value.
    ///
    /// This is the literal representation of the value in the schema.
    pub name: ArcStr,
    /// The underlying value handed to resolvers.
    pub value: Json,
}

impl EnumValueDeclaration {
    /// Builds a new [`EnumValueDeclaration`] with the given `name` and
    /// underlying `value`.
    pub fn new(name: impl Into<ArcStr>, value: Json) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Declaration of a single field on an object type.
#[derive(Clone)]
pub struct FieldDeclaration {
    /// Field name.
    pub name: ArcStr,
    /// Optional description.
    pub description: Option<ArcStr>,
    /// Declared arguments, in declaration order.
    pub arguments: Vec<ArgumentDeclaration>,
    /// The field's type.
    pub field_type: Type,
    /// The stored resolver callback, forwarded to the builder unmodified.
    pub resolver: Option<FieldResolverFn>,
}

impl FieldDeclaration {
    /// Builds a new [`FieldDeclaration`] of the given [`Type`] with the given
    /// `name`.
    pub fn new(name: impl Into<ArcStr>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: vec![],
            field_type,
            resolver: None,
        }
    }

    /// Sets the `description` of this field.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an `argument` to this field.
    #[must_use]
    pub fn argument(mut self, argument: ArgumentDeclaration) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Attaches the caller-supplied resolver callback.
    ///
    /// Overwrites any previously attached resolver.
    #[must_use]
    pub fn resolver(mut self, resolver: FieldResolverFn) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

impl fmt::Debug for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDeclaration")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("field_type", &self.field_type)
            .field("resolver", &self.resolver.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Declaration of an argument to a field, or of an input object field.
#[derive(Clone, Debug)]
pub struct ArgumentDeclaration {
    /// Argument name.
    pub name: ArcStr,
    /// Optional description.
    pub description: Option<ArcStr>,
    /// The argument's type.
    pub arg_type: Type,
}

impl ArgumentDeclaration {
    /// Builds a new [`ArgumentDeclaration`] of the given [`Type`] with the
    /// given `name`.
    pub fn new(name: impl Into<ArcStr>, arg_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arg_type,
        }
    }

    /// Sets the `description` of this argument.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Merges caller-supplied arguments with synthesizer-derived ones.
///
/// Derived arguments win on a name collision; the caller's colliding entry is
/// dropped rather than duplicated.
pub(crate) fn merge_arguments(
    caller: &[ArgumentDeclaration],
    derived: Vec<ArgumentDeclaration>,
) -> Vec<ArgumentDeclaration> {
    let mut merged: Vec<_> = caller
        .iter()
        .filter(|a| derived.iter().all(|d| d.name != a.name))
        .cloned()
        .collect();
    merged.extend(derived);
    merged
}
