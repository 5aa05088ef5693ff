// src/parameter.rs

use crate::ffi::FT_Parameter;
use crate::types::{image_tag, ULong};
use libc::c_void;
use std::ptr;

/// A generic parameter passed to `Library::open_face` (`FT_Parameter`).
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Parameter(FT_Parameter);

impl Parameter {
    /// Ignore the typographic family name (`name` IDs 16/21).
    pub const IGNORE_TYPOGRAPHIC_FAMILY: ULong = image_tag(b'i', b'g', b'p', b'f') as ULong;
    /// Ignore the typographic subfamily name (`name` IDs 17/22).
    pub const IGNORE_TYPOGRAPHIC_SUBFAMILY: ULong = image_tag(b'i', b'g', b'p', b's') as ULong;
    /// Ignore the `sbix` table.
    pub const IGNORE_SBIX: ULong = image_tag(b'i', b's', b'b', b'x') as ULong;
    pub const INCREMENTAL: ULong = image_tag(b'i', b'n', b'c', b'r') as ULong;
    pub const LCD_FILTER_WEIGHTS: ULong = image_tag(b'l', b'c', b'd', b'f') as ULong;
    pub const RANDOM_SEED: ULong = image_tag(b's', b'e', b'e', b'd') as ULong;
    pub const STEM_DARKENING: ULong = image_tag(b'd', b'a', b'r', b'k') as ULong;

    /// `data` must stay valid until the face has been opened.
    pub fn new(tag: ULong, data: *mut c_void) -> Self {
        Parameter(FT_Parameter { tag, data })
    }

    /// A parameter that carries no data; its presence is the setting.
    pub fn flag(tag: ULong) -> Self {
        Parameter::new(tag, ptr::null_mut())
    }

    /// Four-byte identification tag.
    pub fn tag(&self) -> ULong {
        self.0.tag
    }

    pub fn data(&self) -> *mut c_void {
        self.0.data
    }

    pub fn tag_mut(&mut self) -> &mut ULong {
        &mut self.0.tag
    }

    pub fn data_mut(&mut self) -> &mut *mut c_void {
        &mut self.0.data
    }
}
