// src/module.rs

use crate::ffi::{string_from_ptr, FT_ModuleRec, FT_Module_Class};
use crate::library::Library;
use crate::types::{Fixed, ULong};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A borrowed view of a module (driver, renderer, auto-hinter...) registered
/// with a `Library`. Modules are owned by the library and carry no
/// reference count of their own.
pub struct Module<'a> {
    ptr: NonNull<FT_ModuleRec>,
    _library: PhantomData<&'a Library>,
}

impl<'a> Module<'a> {
    pub(crate) fn new(ptr: NonNull<FT_ModuleRec>) -> Self {
        Module {
            ptr,
            _library: PhantomData,
        }
    }

    pub fn as_ptr(&self) -> *mut FT_ModuleRec {
        self.ptr.as_ptr()
    }

    fn class(&self) -> Option<&FT_Module_Class> {
        // SAFETY: the module and its class live as long as the library.
        unsafe { self.ptr.as_ref().clazz.as_ref() }
    }

    pub fn name(&self) -> Option<String> {
        // SAFETY: class strings are static data inside FreeType.
        self.class()
            .and_then(|c| unsafe { string_from_ptr(c.module_name) })
    }

    /// 16.16 version of the module.
    pub fn version(&self) -> Fixed {
        self.class().map_or(0, |c| c.module_version)
    }

    /// 16.16 FreeType version the module requires.
    pub fn requires(&self) -> Fixed {
        self.class().map_or(0, |c| c.module_requires)
    }

    /// `FT_MODULE_*` flags.
    pub fn flags(&self) -> ULong {
        self.class().map_or(0, |c| c.module_flags)
    }
}

impl fmt::Debug for Module<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name())
            .field("version", &format_args!("{:#x}", self.version()))
            .finish()
    }
}
