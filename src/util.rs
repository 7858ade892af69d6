//! Naming helpers for derived type names.

use std::borrow::Cow;

/// Uppercases the first letter of `s`, leaving the rest untouched.
///
/// Used to derive union member type names from shape map keys, e.g. the
/// `active` entry of a field named `users` becomes `usersActive`.
pub fn capitalize_first(s: &str) -> Cow<'_, str> {
    match s.chars().next() {
        Some(first) if !first.is_uppercase() => {
            let mut dest = String::with_capacity(s.len());
            dest.extend(first.to_uppercase());
            dest.push_str(&s[first.len_utf8()..]);
            Cow::Owned(dest)
        }
        _ => Cow::Borrowed(s),
    }
}

/// Best-effort English singular form of a field base name.
///
/// `"users"` becomes `"user"` and `"categories"` becomes `"category"`. Names
/// without a distinct singular form are returned unchanged; callers fall back
/// to an `Item` suffix in that case.
pub fn singularize(s: &str) -> Cow<'_, str> {
    if let Some(stem) = s.strip_suffix("ies") {
        if !stem.is_empty() {
            return Cow::Owned(format!("{stem}y"));
        }
    }
    if s.len() > 1 && s.ends_with('s') && !s.ends_with("ss") {
        return Cow::Borrowed(&s[..s.len() - 1]);
    }
    Cow::Borrowed(s)
}

#[test]
fn test_capitalize_first() {
    assert_eq!(&capitalize_first("active")[..], "Active");
    assert_eq!(&capitalize_first("Active")[..], "Active");
    assert_eq!(&capitalize_first("a")[..], "A");
    assert_eq!(&capitalize_first("")[..], "");
    assert_eq!(&capitalize_first("not_found")[..], "Not_found");
}

#[test]
fn test_singularize() {
    assert_eq!(&singularize("users")[..], "user");
    assert_eq!(&singularize("categories")[..], "category");
    assert_eq!(&singularize("person")[..], "person");
    assert_eq!(&singularize("address")[..], "address");
    assert_eq!(&singularize("s")[..], "s");
    assert_eq!(&singularize("")[..], "");
}
