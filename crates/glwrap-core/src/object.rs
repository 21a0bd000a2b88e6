//! Shared ownership of driver-allocated GL names.

use std::fmt;
use std::marker::PhantomData;

use gl::types::GLuint;

use crate::ref_counted::RefCounted;

/// A category of GL object: buffers, textures, programs, ...
///
/// Implementors are zero-sized markers. Only the release side is required
/// here; kinds whose names come from a parameterless `glGen*` call also
/// implement [`Generate`].
pub trait ObjectKind: 'static {
    /// Human-readable kind name, used in diagnostics.
    const NAME: &'static str;

    /// Releases `name` in the driver (`glDelete*`).
    fn delete(name: GLuint);
}

/// Object kinds that can allocate a fresh name without arguments (`glGen*`).
pub trait Generate: ObjectKind {
    fn generate() -> GLuint;
}

/// A shared GL name.
///
/// Cloning an `Object` aliases the same name and bumps the shared count.
/// Dropping the last owning clone calls [`ObjectKind::delete`] exactly once.
/// Non-owning objects (see [`Object::from_raw`]) never delete.
///
/// A generate call that failed in the driver leaves the name at 0. That is
/// stored as-is; the debug layer is what reports it.
pub struct Object<K: ObjectKind> {
    name: GLuint,
    owner: Option<RefCounted>,
    _kind: PhantomData<K>,
}

impl<K: Generate> Object<K> {
    /// Allocates a new name through [`Generate::generate`].
    pub fn new() -> Self {
        Self::adopt(K::generate())
    }
}

impl<K: Generate> Default for Object<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ObjectKind> Object<K> {
    /// Takes ownership of a name allocated elsewhere, e.g. by
    /// `glCreateShader(type)`.
    pub fn adopt(name: GLuint) -> Self {
        Self {
            name,
            owner: Some(RefCounted::new()),
            _kind: PhantomData,
        }
    }

    /// Wraps an existing name without taking ownership of it.
    pub fn from_raw(name: GLuint) -> Self {
        Self {
            name,
            owner: None,
            _kind: PhantomData,
        }
    }

    /// The raw GL name.
    pub fn name(&self) -> GLuint {
        self.name
    }

    /// Returns true if this is the only owner of the name.
    ///
    /// Non-owning objects are never unique.
    pub fn is_unique(&self) -> bool {
        self.owner.as_ref().map_or(false, RefCounted::is_last)
    }

    /// Number of owning clones alive, 0 for non-owning objects.
    pub fn ref_count(&self) -> usize {
        self.owner.as_ref().map_or(0, RefCounted::count)
    }

    pub fn is_owning(&self) -> bool {
        self.owner.is_some()
    }
}

impl<K: ObjectKind> Clone for Object<K> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            owner: self.owner.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ObjectKind> Drop for Object<K> {
    fn drop(&mut self) {
        // The counter still includes `self` here; it is decremented when the
        // field is dropped right after.
        if self.is_unique() {
            K::delete(self.name);
        }
    }
}

impl<K: ObjectKind> PartialEq for Object<K> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<K: ObjectKind> Eq for Object<K> {}

impl<K: ObjectKind> fmt::Debug for Object<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::NAME)
            .field("name", &self.name)
            .field("ref_count", &self.ref_count())
            .field("owning", &self.is_owning())
            .finish()
    }
}

impl<K: ObjectKind> From<&Object<K>> for GLuint {
    fn from(object: &Object<K>) -> GLuint {
        object.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    thread_local! {
        static NEXT_NAME: Cell<GLuint> = const { Cell::new(1) };
        static DELETED: RefCell<Vec<GLuint>> = const { RefCell::new(Vec::new()) };
    }

    struct MockKind;

    impl ObjectKind for MockKind {
        const NAME: &'static str = "Mock";

        fn delete(name: GLuint) {
            DELETED.with(|deleted| deleted.borrow_mut().push(name));
        }
    }

    impl Generate for MockKind {
        fn generate() -> GLuint {
            NEXT_NAME.with(|next| {
                let name = next.get();
                next.set(name + 1);
                name
            })
        }
    }

    fn deleted() -> Vec<GLuint> {
        DELETED.with(|deleted| deleted.borrow().clone())
    }

    #[test]
    fn delete_waits_for_the_last_copy() {
        let a = Object::<MockKind>::new();
        let name = a.name();
        let b = a.clone();

        drop(a);
        assert!(deleted().is_empty());

        drop(b);
        assert_eq!(deleted(), vec![name]);
    }

    #[test]
    fn many_copies_dropped_out_of_order_delete_once() {
        let original = Object::<MockKind>::new();
        let name = original.name();
        let mut copies: Vec<_> = (0..8).map(|_| original.clone()).collect();
        assert_eq!(original.ref_count(), 9);

        // Interleave drops from both ends, with the original in the middle.
        drop(copies.remove(3));
        drop(copies.pop());
        drop(original);
        drop(copies.remove(0));
        assert!(deleted().is_empty());

        while let Some(copy) = copies.pop() {
            assert!(deleted().is_empty());
            drop(copy);
        }
        assert_eq!(deleted(), vec![name]);
    }

    #[test]
    fn uniqueness_follows_the_clones() {
        let a = Object::<MockKind>::new();
        assert!(a.is_unique());
        let b = a.clone();
        assert!(!a.is_unique());
        assert_eq!(a, b);
        drop(b);
        assert!(a.is_unique());
    }

    #[test]
    fn non_owning_objects_never_delete() {
        let borrowed = Object::<MockKind>::from_raw(42);
        let copy = borrowed.clone();
        assert!(!borrowed.is_unique());
        assert_eq!(copy.ref_count(), 0);
        drop(borrowed);
        drop(copy);
        assert!(deleted().is_empty());
    }

    #[test]
    fn adopted_zero_name_is_still_released_once() {
        let failed = Object::<MockKind>::adopt(0);
        assert_eq!(failed.name(), 0);
        drop(failed);
        assert_eq!(deleted(), vec![0]);
    }
}
