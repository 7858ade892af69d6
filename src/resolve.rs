//! The result-shape resolver: turns a [`Shape`] into a concrete type
//! reference, registering any missing auxiliary types as a side effect.

use arcstr::ArcStr;
use itertools::Itertools as _;
use tracing::debug;

use crate::{
    SynthesisError,
    declaration::{
        FieldPosition, FieldsBlock, InputObjectDeclaration, NonNullDefaults, ObjectDeclaration,
        UnionDeclaration,
    },
    registry::SchemaBuilder,
    shape::{DefineFn, MemberShape, Shape},
    types::Type,
    util::capitalize_first,
};

/// Resolves `shape` into a type reference under `type_name`, creating any
/// missing auxiliary types through `b`.
///
/// `base` is the field's base name, used to derive union member names;
/// `type_name` is the fully-derived `<base><Suffix>` name for the type this
/// shape describes. Resolution is idempotent: a type that is already
/// registered is reused, never re-declared.
pub(crate) fn resolve_shape<B>(
    b: &mut B,
    base: &str,
    type_name: &ArcStr,
    position: FieldPosition,
    shape: &Shape,
    defaults: NonNullDefaults,
) -> Result<Type, SynthesisError>
where
    B: SchemaBuilder + ?Sized,
{
    match shape {
        Shape::Named(name) => resolve_named(b, name),
        Shape::Define(def) => {
            define_type(b, type_name, position, def, defaults)?;
            Ok(Type::Named(type_name.clone()))
        }
        // The wrapper already carries the exact nullability/list layering the
        // caller wants; re-apply it around the inner reference as-is.
        Shape::Wrapped(ty) => Ok(ty.clone()),
        Shape::Map(map) => {
            if map.is_empty() {
                return Err(SynthesisError::EmptyShape {
                    type_name: type_name.clone(),
                });
            }

            // A singleton map behaves exactly as its single entry's shape.
            if let Some((_, member)) = map.first().filter(|_| map.len() == 1) {
                return match member {
                    MemberShape::Named(name) => resolve_named(b, name),
                    MemberShape::Define(def) => {
                        define_type(b, type_name, position, def, defaults)?;
                        Ok(Type::Named(type_name.clone()))
                    }
                };
            }

            let mut members = Vec::with_capacity(map.len());
            for (key, member) in map {
                match member {
                    MemberShape::Define(def) => {
                        let member_name =
                            ArcStr::from(format!("{base}{}", capitalize_first(key)));
                        define_type(b, &member_name, position, def, defaults)?;
                        members.push(member_name);
                    }
                    MemberShape::Named(name) => members.push(name.clone()),
                }
            }

            if !b.has_type(type_name) {
                debug!(
                    name = %type_name,
                    members = %members.iter().join(", "),
                    "registering synthesized union type",
                );
                b.add_type(UnionDeclaration::new(type_name.clone(), members).into_declaration())?;
            }
            Ok(Type::Named(type_name.clone()))
        }
    }
}

fn resolve_named<B>(b: &mut B, name: &ArcStr) -> Result<Type, SynthesisError>
where
    B: SchemaBuilder + ?Sized,
{
    if !b.has_type(name) {
        return Err(SynthesisError::UnknownType { name: name.clone() });
    }
    Ok(Type::Named(name.clone()))
}

fn define_type<B>(
    b: &mut B,
    name: &ArcStr,
    position: FieldPosition,
    def: &DefineFn,
    defaults: NonNullDefaults,
) -> Result<(), SynthesisError>
where
    B: SchemaBuilder + ?Sized,
{
    if b.has_type(name) {
        return Ok(());
    }
    let mut block = FieldsBlock::new(position, defaults);
    def(&mut block);
    let decl = match position {
        FieldPosition::Input => {
            InputObjectDeclaration::new(name.clone(), block.into_input_fields()).into_declaration()
        }
        FieldPosition::Output => {
            ObjectDeclaration::new(name.clone(), block.into_object_fields()).into_declaration()
        }
    };
    debug!(name = %name, "registering synthesized type");
    b.add_type(decl)?;
    Ok(())
}
