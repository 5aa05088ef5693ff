// src/handle.rs

//! Intrusive reference counting over FreeType objects.
//!
//! FreeType keeps its own reference count on libraries and faces
//! (`FT_Reference_*` / `FT_Done_*`). `Handle` ties that count to Rust's
//! `Clone` and `Drop`: every live handle owns exactly one reference, and the
//! object is freed by FreeType when the last handle goes away.
//!
//! Handles wrap raw pointers and are therefore neither `Send` nor `Sync`.
//! FreeType asks for one library per thread of execution, and this keeps
//! the whole object graph pinned to the thread that created it.

use log::{trace, warn};
use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::{self, NonNull};

/// A foreign object whose lifetime is governed by an external reference count.
///
/// # Safety
///
/// `acquire` must add one reference to the object and `release` must remove
/// one, freeing it once none remain. Both are only called with pointers that
/// a `Handle` currently holds a reference to (or, for `acquire`, that the
/// caller of `Handle::from_raw` vouched for).
pub unsafe trait Referenced {
    /// Short name used in log lines.
    const KIND: &'static str;

    unsafe fn acquire(ptr: NonNull<Self>);

    unsafe fn release(ptr: NonNull<Self>);
}

/// An owning, reference-counted pointer to a `Referenced` object. May be null.
pub struct Handle<T: Referenced> {
    ptr: *mut T,
    _owns: PhantomData<T>,
}

impl<T: Referenced> Handle<T> {
    /// A handle that holds nothing.
    pub const fn null() -> Self {
        Handle {
            ptr: ptr::null_mut(),
            _owns: PhantomData,
        }
    }

    /// Wraps `ptr`.
    ///
    /// With `add_ref == false` the handle adopts a reference the caller
    /// already owns (the usual case right after a FreeType constructor).
    /// With `add_ref == true` it takes a fresh one.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live object of kind `T`. When
    /// `add_ref` is false the caller hands over one reference it owns.
    pub unsafe fn from_raw(ptr: *mut T, add_ref: bool) -> Self {
        if let Some(nn) = NonNull::new(ptr) {
            if add_ref {
                trace!("Acquiring {} {:p}", T::KIND, ptr);
                T::acquire(nn);
            }
        }
        Handle {
            ptr,
            _owns: PhantomData,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.ptr.is_null()
    }

    /// The borrowed raw pointer. Ownership stays with the handle.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Gives up this handle's reference to the caller without releasing it.
    pub fn into_raw(self) -> *mut T {
        let this = ManuallyDrop::new(self);
        this.ptr
    }

    /// Releases the held reference (if any) and leaves the handle null.
    pub fn invalidate(&mut self) {
        let old = std::mem::replace(&mut self.ptr, ptr::null_mut());
        // SAFETY: `old` was owned by this handle.
        unsafe { Self::release_raw(old) };
    }

    unsafe fn release_raw(ptr: *mut T) {
        if let Some(nn) = NonNull::new(ptr) {
            trace!("Releasing {} {:p}", T::KIND, ptr);
            T::release(nn);
        }
    }
}

impl<T: Referenced> Clone for Handle<T> {
    fn clone(&self) -> Self {
        // SAFETY: a live handle keeps its object alive.
        unsafe { Handle::from_raw(self.ptr, true) }
    }

    fn clone_from(&mut self, source: &Self) {
        if self.ptr == source.ptr {
            return;
        }
        // The new reference is taken before the old one is dropped.
        *self = source.clone();
    }
}

impl<T: Referenced> Drop for Handle<T> {
    fn drop(&mut self) {
        // SAFETY: the reference is owned by this handle and is not used again.
        unsafe { Self::release_raw(self.ptr) };
        self.ptr = ptr::null_mut();
    }
}

impl<T: Referenced> Default for Handle<T> {
    fn default() -> Self {
        Handle::null()
    }
}

impl<T: Referenced> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T: Referenced> Eq for Handle<T> {}

impl<T: Referenced> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({:p})", T::KIND, self.ptr)
    }
}

/// Logs a nonzero code from an acquire or release call. Neither has a caller
/// to return it to.
pub(crate) fn log_refcount_failure(kind: &str, op: &str, code: crate::ffi::FT_Error) {
    if code != 0 {
        warn!("{} on {} reported FreeType error 0x{:02x}", op, kind, code);
    }
}
