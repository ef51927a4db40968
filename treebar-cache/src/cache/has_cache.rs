use std::{
    ops::{
        Deref,
        DerefMut,
    },
    sync::{
        RwLockReadGuard,
        RwLockWriteGuard,
    },
};

use crate::{
    cache::{
        TreeCache,
        TreeCacheRef,
    },
    node::Entity,
};

/// Read access to a tree cache, abstract over owning it directly or through
/// a shared handle.
pub trait HasTreeCache<E: Entity> {
    type Guard<'a>: Deref<Target = TreeCache<E>>
    where
        Self: 'a;
    fn cache(&self) -> Self::Guard<'_>;
}

pub trait HasTreeCacheMut<E: Entity>: HasTreeCache<E> {
    type GuardMut<'a>: DerefMut<Target = TreeCache<E>>
    where
        Self: 'a;
    fn cache_mut(&mut self) -> Self::GuardMut<'_>;
}

impl<E: Entity> HasTreeCache<E> for TreeCache<E> {
    type Guard<'a>
        = &'a TreeCache<E>
    where
        Self: 'a;
    fn cache(&self) -> Self::Guard<'_> {
        self
    }
}

impl<E: Entity> HasTreeCacheMut<E> for TreeCache<E> {
    type GuardMut<'a>
        = &'a mut TreeCache<E>
    where
        Self: 'a;
    fn cache_mut(&mut self) -> Self::GuardMut<'_> {
        self
    }
}

impl<E: Entity> HasTreeCache<E> for TreeCacheRef<E> {
    type Guard<'a>
        = RwLockReadGuard<'a, TreeCache<E>>
    where
        Self: 'a;
    fn cache(&self) -> Self::Guard<'_> {
        self.read().unwrap()
    }
}

impl<E: Entity> HasTreeCacheMut<E> for TreeCacheRef<E> {
    type GuardMut<'a>
        = RwLockWriteGuard<'a, TreeCache<E>>
    where
        Self: 'a;
    fn cache_mut(&mut self) -> Self::GuardMut<'_> {
        self.write().unwrap()
    }
}
