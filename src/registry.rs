//! The schema-builder capability consumed by the synthesizers, and an
//! in-memory implementation of it.

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};
use fnv::FnvHashMap;

use crate::declaration::{
    FieldDeclaration, ObjectDeclaration, ScalarDeclaration, TypeDeclaration,
};

/// A failure inside a type registry.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum RegistryError {
    /// A declaration was added under a name that is already registered.
    #[display("type \"{_0}\" is already registered")]
    DuplicateType(#[error(not(source))] ArcStr),

    /// A field was attached to a type that cannot carry fields.
    #[display("type \"{_0}\" cannot carry fields")]
    NotAnObject(#[error(not(source))] ArcStr),
}

/// Capabilities the synthesis core consumes from a schema builder.
///
/// The core only calls these operations and reacts to their results; it never
/// inspects the builder's internal representation. Every creation step is
/// preceded by a [`has_type`](SchemaBuilder::has_type) check, so repeated
/// declarations of the same auxiliary type reuse the registered one.
pub trait SchemaBuilder {
    /// Whether a type with `name` is already registered.
    fn has_type(&self, name: &str) -> bool;

    /// Registers a new named type declaration.
    ///
    /// Registering a name twice is an error; callers check first.
    fn add_type(&mut self, decl: TypeDeclaration) -> Result<(), RegistryError>;

    /// Adds a field to the object type named `type_name`, creating an empty
    /// object declaration under that name when absent.
    fn add_field(
        &mut self,
        type_name: &str,
        field: FieldDeclaration,
    ) -> Result<(), RegistryError>;
}

/// In-memory type registry implementing [`SchemaBuilder`].
///
/// Pre-seeds the built-in scalar names (`String`, `Int`, `Float`, `Boolean`,
/// `ID`) so bare scalar references resolve without further setup.
pub struct TypeRegistry {
    types: FnvHashMap<ArcStr, TypeDeclaration>,
    order: Vec<ArcStr>,
}

/// Names of the built-in scalar types every registry starts with.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

impl TypeRegistry {
    /// Creates a registry holding only the built-in scalars.
    pub fn new() -> Self {
        let mut registry = Self {
            types: FnvHashMap::default(),
            order: vec![],
        };
        for scalar in BUILTIN_SCALARS {
            registry.insert(ScalarDeclaration::new(scalar).into_declaration());
        }
        registry
    }

    /// Looks up a registered type declaration by name.
    pub fn type_by_name(&self, name: &str) -> Option<&TypeDeclaration> {
        self.types.get(name)
    }

    /// All registered type declarations, in registration order.
    pub fn type_list(&self) -> Vec<&TypeDeclaration> {
        self.order
            .iter()
            .filter_map(|name| self.types.get(name))
            .collect()
    }

    /// The fields of the object type named `name`, if it is an object.
    pub fn fields_of(&self, name: &str) -> Option<&[FieldDeclaration]> {
        match self.types.get(name) {
            Some(TypeDeclaration::Object(obj)) => Some(&obj.fields),
            _ => None,
        }
    }

    /// Whether `name` is one of the pre-seeded built-in scalars.
    pub fn is_builtin(name: &str) -> bool {
        BUILTIN_SCALARS.contains(&name)
    }

    fn insert(&mut self, decl: TypeDeclaration) {
        self.order.push(decl.name().clone());
        self.types.insert(decl.name().clone(), decl);
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for TypeRegistry {
    fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    fn add_type(&mut self, decl: TypeDeclaration) -> Result<(), RegistryError> {
        if self.has_type(decl.name()) {
            return Err(RegistryError::DuplicateType(decl.name().clone()));
        }
        self.insert(decl);
        Ok(())
    }

    fn add_field(
        &mut self,
        type_name: &str,
        field: FieldDeclaration,
    ) -> Result<(), RegistryError> {
        if !self.has_type(type_name) {
            self.insert(ObjectDeclaration::new(type_name, vec![]).into_declaration());
        }
        match self.types.get_mut(type_name) {
            Some(TypeDeclaration::Object(obj)) => {
                obj.fields.push(field);
                Ok(())
            }
            _ => Err(RegistryError::NotAnObject(type_name.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{RegistryError, SchemaBuilder as _, TypeRegistry};
    use crate::{
        declaration::{FieldDeclaration, ObjectDeclaration},
        types::Type,
    };

    #[test]
    fn seeds_builtin_scalars() {
        let registry = TypeRegistry::new();
        for scalar in ["String", "Int", "Float", "Boolean", "ID"] {
            assert!(registry.has_type(scalar), "missing builtin {scalar}");
        }
        assert!(!registry.has_type("User"));
    }

    #[test]
    fn rejects_duplicate_registration() {
        let mut registry = TypeRegistry::new();
        registry
            .add_type(ObjectDeclaration::new("User", vec![]).into_declaration())
            .unwrap();
        let err = registry
            .add_type(ObjectDeclaration::new("User", vec![]).into_declaration())
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateType("User".into()));
    }

    #[test]
    fn add_field_creates_missing_target_object() {
        let mut registry = TypeRegistry::new();
        registry
            .add_field("Query", FieldDeclaration::new("ping", Type::named("String")))
            .unwrap();
        let fields = registry.fields_of("Query").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name.as_str(), "ping");
    }

    #[test]
    fn add_field_rejects_non_object_target() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .add_field("String", FieldDeclaration::new("x", Type::named("Int")))
            .unwrap_err();
        assert_eq!(err, RegistryError::NotAnObject("String".into()));
    }
}
