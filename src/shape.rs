//! The tagged shape descriptions callers build field specs from.

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{declaration::FieldsBlock, types::Type};

/// Callback declaring the fields of a new object or input object type.
///
/// Invoked against a fresh [`FieldsBlock`] carrying the effective
/// nullability defaults for its position.
pub type DefineFn = Arc<dyn Fn(&mut FieldsBlock) + Send + Sync>;

/// A tagged description of how to obtain or build a schema type for a
/// field's input or output.
///
/// The synthesis core dispatches on the variant only; there is no runtime
/// type inspection.
#[derive(Clone)]
pub enum Shape {
    /// A reference to an already-registered type by name.
    ///
    /// Resolution fails if no type with this name is registered.
    Named(ArcStr),

    /// A definition callback for a new type, named after the field it is
    /// resolved for.
    Define(DefineFn),

    /// A pre-built nullability/list wrapper around a registered type
    /// reference, applied verbatim.
    Wrapped(Type),

    /// An ordered mapping of member shapes.
    ///
    /// A single entry behaves exactly as passing that entry's shape
    /// directly; two or more entries become a union of the per-key member
    /// types.
    Map(IndexMap<ArcStr, MemberShape>),
}

impl Shape {
    /// Shorthand for a [`Shape::Named`] reference.
    pub fn named(name: impl Into<ArcStr>) -> Self {
        Self::Named(name.into())
    }

    /// Shorthand for a [`Shape::Define`] callback.
    pub fn define(f: impl Fn(&mut FieldsBlock) + Send + Sync + 'static) -> Self {
        Self::Define(Arc::new(f))
    }

    /// Shorthand for a [`Shape::Map`] built from ordered entries.
    pub fn map<N: Into<ArcStr>>(entries: impl IntoIterator<Item = (N, MemberShape)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Type> for Shape {
    fn from(ty: Type) -> Self {
        Self::Wrapped(ty)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => f.debug_tuple("Named").field(n).finish(),
            Self::Define(_) => f.write_str("Define(..)"),
            Self::Wrapped(ty) => f.debug_tuple("Wrapped").field(ty).finish(),
            Self::Map(m) => f.debug_map().entries(m.iter()).finish(),
        }
    }
}

/// A single entry of a [`Shape::Map`].
#[derive(Clone)]
pub enum MemberShape {
    /// A reference to an already-registered type by name.
    Named(ArcStr),

    /// A definition callback for a new member object type.
    Define(DefineFn),
}

impl MemberShape {
    /// Shorthand for a [`MemberShape::Named`] reference.
    pub fn named(name: impl Into<ArcStr>) -> Self {
        Self::Named(name.into())
    }

    /// Shorthand for a [`MemberShape::Define`] callback.
    pub fn define(f: impl Fn(&mut FieldsBlock) + Send + Sync + 'static) -> Self {
        Self::Define(Arc::new(f))
    }
}

impl fmt::Debug for MemberShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => f.debug_tuple("Named").field(n).finish(),
            Self::Define(_) => f.write_str("Define(..)"),
        }
    }
}
