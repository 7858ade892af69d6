//! Type literals and nullability/list modifiers.

use std::fmt;

use arcstr::ArcStr;

/// A type literal referencing a named type, with nullability and list
/// modifiers applied.
///
/// This carries no semantic information and might refer to types that do not
/// exist; the synthesis core validates bare references against the builder's
/// registry before using them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Type {
    /// A nullable named type, e.g. `String`.
    Named(ArcStr),
    /// A nullable list type, e.g. `[String]`.
    ///
    /// The list itself is what's nullable, the contained type might be
    /// non-null.
    List(Box<Type>),
    /// A non-null named type, e.g. `String!`.
    NonNullNamed(ArcStr),
    /// A non-null list type, e.g. `[String]!`.
    ///
    /// The list itself is what's non-null, the contained type might be null.
    NonNullList(Box<Type>),
}

impl Type {
    /// Returns a nullable reference to the type named `name`.
    pub fn named(name: impl Into<ArcStr>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the name of the innermost named type.
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named(n) | Self::NonNullNamed(n) => n,
            Self::List(l) | Self::NonNullList(l) => l.innermost_name(),
        }
    }

    /// Whether this type can only represent non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNullNamed(_) | Self::NonNullList(_))
    }

    /// Applies the non-null modifier to the outermost level.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            Self::Named(n) => Self::NonNullNamed(n),
            Self::List(l) => Self::NonNullList(l),
            t => t,
        }
    }

    /// Removes the non-null modifier from the outermost level.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            Self::NonNullNamed(n) => Self::Named(n),
            Self::NonNullList(l) => Self::List(l),
            t => t,
        }
    }

    /// Wraps this type in a nullable list.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::NonNullNamed(n) => write!(f, "{n}!"),
            Self::List(i) => write!(f, "[{i}]"),
            Self::NonNullList(i) => write!(f, "[{i}]!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Type;

    #[test]
    fn displays_modifier_layers() {
        let ty = Type::named("User").non_null().list().non_null();
        assert_eq!(ty.to_string(), "[User!]!");
        assert_eq!(ty.innermost_name(), "User");
        assert!(ty.is_non_null());
    }

    #[test]
    fn nullable_unwraps_one_level() {
        let ty = Type::named("User").non_null().list().non_null().nullable();
        assert_eq!(ty.to_string(), "[User!]");
        assert!(!ty.is_non_null());
    }

    #[test]
    fn non_null_is_idempotent() {
        let ty = Type::named("User").non_null().non_null();
        assert_eq!(ty, Type::NonNullNamed("User".into()));
    }
}
