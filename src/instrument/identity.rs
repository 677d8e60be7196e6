// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Method and parameter identities.

use std::any::{type_name, TypeId};
use std::fmt;

/// Identity of an instrumented method: its name plus the owning type.
///
/// The owner is keyed by [`TypeId`], so two types that share a short name
/// (say `reader::Reader` and `legacy::Reader`) never alias each other.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodIdentity {
    method: &'static str,
    owner: TypeId,
    owner_name: &'static str,
}

impl MethodIdentity {
    /// Identity of `method` on type `T`.
    pub fn of<T: 'static>(method: &'static str) -> Self {
        Self {
            method,
            owner: TypeId::of::<T>(),
            owner_name: short_type_name(type_name::<T>()),
        }
    }

    /// Method name.
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Short name of the owning type, for display.
    pub fn owner_name(&self) -> &'static str {
        self.owner_name
    }

    pub fn owner(&self) -> TypeId {
        self.owner
    }

    /// Identity of the parameter at `position` of this method.
    pub fn param(&self, position: usize) -> ParameterIdentity {
        ParameterIdentity {
            position,
            method: *self,
        }
    }
}

impl fmt::Display for MethodIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.method, self.owner_name)
    }
}

impl fmt::Debug for MethodIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodIdentity({self})")
    }
}

/// Identity of one positional parameter of an instrumented method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterIdentity {
    position: usize,
    method: MethodIdentity,
}

impl ParameterIdentity {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn method(&self) -> &MethodIdentity {
        &self.method
    }
}

impl fmt::Display for ParameterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.position, self.method)
    }
}

/// Strip the module path (and any generic arguments' paths) from a type name.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod first {
        pub struct Reader;
    }

    mod second {
        pub struct Reader;
    }

    #[test]
    fn test_display_matches_method_at_type() {
        let id = MethodIdentity::of::<first::Reader>("query");
        assert_eq!(id.to_string(), "query@Reader");
        assert_eq!(id.param(0).to_string(), "0@query@Reader");
    }

    #[test]
    fn test_same_short_name_does_not_alias() {
        let a = MethodIdentity::of::<first::Reader>("query");
        let b = MethodIdentity::of::<second::Reader>("query");
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
        assert_ne!(a.param(0), b.param(0));
    }

    #[test]
    fn test_same_type_same_method_is_equal() {
        let a = MethodIdentity::of::<first::Reader>("query");
        let b = MethodIdentity::of::<first::Reader>("query");
        assert_eq!(a, b);
        assert_ne!(a, MethodIdentity::of::<first::Reader>("sum"));
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("verbosity::reader::FakeDdfCsvReader"), "FakeDdfCsvReader");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper<b::Inner>");
    }
}
