//! Canonical types by kind.

use crate::kind::TypeKind;
use crate::ty::{StaticType, TypeRef};
use rustc_hash::FxHashMap;
use std::cell::OnceCell;

/// Source of the canonical type for each [`TypeKind`].
///
/// # Panics
///
/// Implementations panic when asked for [`TypeKind::Other`], which has no
/// canonical type.
pub trait TypeRepository {
    fn type_by_kind(&self, kind: TypeKind) -> TypeRef;
}

/// The lookup discipline shared by repositories: fixed singletons built at
/// construction, plus scalar built-ins loaded at most once on first demand.
pub struct BuiltInCache {
    any: TypeRef,
    null: TypeRef,
    undefined: TypeRef,
    object: TypeRef,
    function: TypeRef,
    scalars: OnceCell<FxHashMap<TypeKind, TypeRef>>,
}

impl BuiltInCache {
    pub fn new() -> Self {
        Self {
            any: StaticType::of_kind(TypeKind::Any),
            null: StaticType::of_kind(TypeKind::Null),
            undefined: StaticType::of_kind(TypeKind::Undefined),
            object: StaticType::of_kind(TypeKind::Object),
            function: StaticType::of_kind(TypeKind::Function),
            scalars: OnceCell::new(),
        }
    }

    /// Resolve `kind`, running `load` the first time a scalar built-in is
    /// requested. `load` must not re-enter this cache.
    pub fn type_by_kind(
        &self,
        kind: TypeKind,
        load: impl FnOnce() -> FxHashMap<TypeKind, TypeRef>,
    ) -> TypeRef {
        assert!(
            kind != TypeKind::Other,
            "TypeKind::Other has no canonical type and cannot be looked up"
        );
        match kind {
            TypeKind::Any => self.any.clone(),
            TypeKind::Null => self.null.clone(),
            TypeKind::Undefined => self.undefined.clone(),
            TypeKind::Object => self.object.clone(),
            TypeKind::Function => self.function.clone(),
            _ => match self.ensure_loaded(load).get(&kind) {
                Some(ty) => ty.clone(),
                None => panic!("built-in type for kind `{kind}` is missing after loading"),
            },
        }
    }

    /// Run `load` unless the scalar built-ins are already cached.
    pub fn ensure_loaded(
        &self,
        load: impl FnOnce() -> FxHashMap<TypeKind, TypeRef>,
    ) -> &FxHashMap<TypeKind, TypeRef> {
        self.scalars.get_or_init(load)
    }

    pub fn is_loaded(&self) -> bool {
        self.scalars.get().is_some()
    }
}

impl Default for BuiltInCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Repository backed by a static table of built-in types.
#[derive(Default)]
pub struct StaticTypeRepository {
    cache: BuiltInCache,
}

impl StaticTypeRepository {
    pub fn new() -> Self {
        Self { cache: BuiltInCache::new() }
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_loaded()
    }
}

impl TypeRepository for StaticTypeRepository {
    fn type_by_kind(&self, kind: TypeKind) -> TypeRef {
        self.cache.type_by_kind(kind, || {
            TypeKind::REPOSITORY_KINDS
                .into_iter()
                .filter(|kind| kind.is_scalar_built_in())
                .map(|kind| (kind, StaticType::of_kind(kind)))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fixed_kinds_do_not_load() {
        let repo = StaticTypeRepository::new();
        repo.type_by_kind(TypeKind::Any);
        repo.type_by_kind(TypeKind::Null);
        repo.type_by_kind(TypeKind::Undefined);
        assert!(!repo.is_loaded());
        repo.type_by_kind(TypeKind::Number);
        assert!(repo.is_loaded());
    }

    #[test]
    fn test_load_runs_once() {
        let cache = BuiltInCache::new();
        let mut calls = 0;
        let load = |calls: &mut i32| {
            *calls += 1;
            let mut map = FxHashMap::default();
            map.insert(TypeKind::String, StaticType::of_kind(TypeKind::String));
            map
        };
        let first = cache.type_by_kind(TypeKind::String, || load(&mut calls));
        let second = cache.type_by_kind(TypeKind::String, || load(&mut calls));
        assert_eq!(calls, 1);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    #[should_panic(expected = "missing after loading")]
    fn test_missing_built_in_panics() {
        let cache = BuiltInCache::new();
        cache.type_by_kind(TypeKind::Symbol, FxHashMap::default);
    }
}
