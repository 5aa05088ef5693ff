// src/charmap.rs

use crate::face::Face;
use crate::ffi::{self, FT_CharMapRec};
use crate::types::{Encoding, Int, Tag, TagDisplay, UShort};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A borrowed view of one of a face's charmaps.
#[derive(Clone, Copy)]
pub struct CharMap<'a> {
    ptr: NonNull<FT_CharMapRec>,
    _face: PhantomData<&'a Face>,
}

impl<'a> CharMap<'a> {
    pub(crate) fn new(ptr: NonNull<FT_CharMapRec>) -> Self {
        CharMap {
            ptr,
            _face: PhantomData,
        }
    }

    fn rec(&self) -> &FT_CharMapRec {
        // SAFETY: charmaps live as long as their face, which `'a` borrows.
        unsafe { self.ptr.as_ref() }
    }

    pub fn as_ptr(&self) -> *mut FT_CharMapRec {
        self.ptr.as_ptr()
    }

    /// Raw encoding tag, e.g. `unic`.
    pub fn encoding_tag(&self) -> Tag {
        self.rec().encoding as Tag
    }

    /// `None` for tags this crate has no variant for.
    pub fn encoding(&self) -> Option<Encoding> {
        Encoding::from_tag(self.encoding_tag())
    }

    pub fn platform_id(&self) -> UShort {
        self.rec().platform_id
    }

    pub fn encoding_id(&self) -> UShort {
        self.rec().encoding_id
    }

    /// Position in the face's charmap table (`FT_Get_Charmap_Index`), or -1
    /// when the charmap does not belong to a face.
    pub fn index(&self) -> Int {
        unsafe { ffi::FT_Get_Charmap_Index(self.as_ptr()) }
    }
}

impl fmt::Debug for CharMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharMap")
            .field("encoding", &TagDisplay(self.encoding_tag()).to_string())
            .field("platform_id", &self.platform_id())
            .field("encoding_id", &self.encoding_id())
            .finish()
    }
}
