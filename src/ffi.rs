// src/ffi.rs

//! Raw FreeType items used by the handle types.
//!
//! Nearly everything comes from `freetype-sys`, which also links (or
//! builds) the native library. Declared here are only the module entry
//! points that crate does not bind, plus a typed opaque library record:
//! `freetype-sys` aliases `FT_LibraryRec` to `c_void`, which cannot carry
//! a reference-counting impl of its own.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use libc::{c_char, c_int, c_long, c_ulong, c_void};
use std::ffi::CStr;

pub use freetype_sys::{
    FT_BBox, FT_Bitmap_Size, FT_CharMapRec, FT_Error, FT_FaceRec, FT_GlyphSlotRec,
    FT_Glyph_Metrics, FT_Library, FT_Open_Args, FT_Outline, FT_Parameter, FT_SizeRec,
    FT_Size_Metrics, FT_Size_RequestRec, FT_Vector, FT_OPEN_PARAMS, FT_OPEN_PATHNAME,
};

pub use freetype_sys::{
    FT_Done_Face, FT_Done_FreeType, FT_Done_Library, FT_Get_Char_Index, FT_Get_Charmap_Index,
    FT_Get_FSType_Flags, FT_Get_First_Char, FT_Get_Glyph_Name, FT_Get_Name_Index,
    FT_Get_Next_Char, FT_Get_Postscript_Name, FT_Init_FreeType, FT_Load_Char, FT_Load_Glyph,
    FT_New_Face, FT_New_Memory_Face, FT_Open_Face, FT_Reference_Face, FT_Reference_Library,
    FT_Request_Size, FT_Select_Charmap, FT_Select_Size, FT_Set_Char_Size, FT_Set_Charmap,
    FT_Set_Pixel_Sizes,
};

/// Opaque library record. Only ever handled by pointer; cast to
/// `FT_Library` when calling into `freetype-sys`.
#[repr(C)]
pub struct FT_LibraryRec {
    _private: [u8; 0],
}

/// Leading fields of `FT_Module_Class`. Never constructed on the Rust side.
#[repr(C)]
pub struct FT_Module_Class {
    pub module_flags: c_ulong,
    pub module_size: c_long,
    pub module_name: *const c_char,
    pub module_version: c_long,
    pub module_requires: c_long,
}

/// Leading fields of `FT_ModuleRec`. Never constructed on the Rust side.
#[repr(C)]
pub struct FT_ModuleRec {
    pub clazz: *const FT_Module_Class,
    pub library: *mut FT_LibraryRec,
    pub memory: *mut c_void,
}

extern "C" {
    pub fn FT_Library_Version(
        library: *mut FT_LibraryRec,
        amajor: *mut c_int,
        aminor: *mut c_int,
        apatch: *mut c_int,
    );
    pub fn FT_Get_Module(library: *mut FT_LibraryRec, module_name: *const c_char)
        -> *mut FT_ModuleRec;
    pub fn FT_Remove_Module(library: *mut FT_LibraryRec, module: *mut FT_ModuleRec) -> FT_Error;
}

/// Copies a C string owned by FreeType. Null maps to `None`.
///
/// # Safety
///
/// `p` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub(crate) unsafe fn string_from_ptr(p: *const c_char) -> Option<String> {
    if p.is_null() {
        None
    } else {
        Some(CStr::from_ptr(p).to_string_lossy().into_owned())
    }
}
