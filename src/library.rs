// src/library.rs

//! The FreeType library object: the root of every face and module.

use crate::error::{check, Error, Result};
use crate::face::Face;
use crate::ffi::{self, FT_LibraryRec};
use crate::handle::{log_refcount_failure, Handle, Referenced};
use crate::module::Module;
use crate::parameter::Parameter;
use crate::types::{Int, Long};
use log::{debug, trace, warn};
use serde::Serialize;
use std::ffi::CString;
use std::fmt;
use std::mem;
use std::path::Path;
use std::ptr::{self, NonNull};
use std::rc::Rc;

unsafe impl Referenced for FT_LibraryRec {
    const KIND: &'static str = "FT_Library";

    unsafe fn acquire(ptr: NonNull<Self>) {
        let code = ffi::FT_Reference_Library(ptr.as_ptr().cast());
        log_refcount_failure(Self::KIND, "FT_Reference_Library", code);
    }

    unsafe fn release(ptr: NonNull<Self>) {
        let code = ffi::FT_Done_Library(ptr.as_ptr().cast());
        log_refcount_failure(Self::KIND, "FT_Done_Library", code);
    }
}

/// Owns the reference created by `FT_Init_FreeType`, together with the
/// memory object FreeType allocated for it. Torn down with `FT_Done_FreeType`
/// once no `Library` clone is left.
struct Root {
    ptr: *mut FT_LibraryRec,
}

impl Root {
    fn finish(self) -> Result<()> {
        let ptr = self.ptr;
        mem::forget(self);
        trace!("FT_Done_FreeType on {:p}", ptr);
        // SAFETY: the root reference is owned by `self` and every handle
        // reference has already been released.
        check(unsafe { ffi::FT_Done_FreeType(ptr.cast()) })
    }
}

impl Drop for Root {
    fn drop(&mut self) {
        trace!("FT_Done_FreeType on {:p} (drop)", self.ptr);
        // SAFETY: as in `finish`.
        let code = unsafe { ffi::FT_Done_FreeType(self.ptr.cast()) };
        if code != 0 {
            warn!("FT_Done_FreeType failed with 0x{:02x}", code);
        }
    }
}

/// A handle to a FreeType library instance.
///
/// Cloning is cheap and shares the same instance. The instance, and every
/// face and module it owns, is destroyed when the last clone (including the
/// clones held by faces) is dropped or passed to `done`.
#[derive(Clone)]
pub struct Library {
    // Field order matters: the handle reference goes before the root.
    handle: Handle<FT_LibraryRec>,
    root: Rc<Root>,
}

/// Runtime version of the linked FreeType.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Version {
    pub major: Int,
    pub minor: Int,
    pub patch: Int,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Library {
    /// Creates a library with the default module set (`FT_Init_FreeType`).
    pub fn init() -> Result<Library> {
        let mut raw: ffi::FT_Library = ptr::null_mut();
        // SAFETY: FFI call with a valid out-pointer.
        check(unsafe { ffi::FT_Init_FreeType(&mut raw) })?;
        let raw: *mut FT_LibraryRec = raw.cast();
        if raw.is_null() {
            return Err(Error::INVALID_LIBRARY_HANDLE);
        }
        debug!("Initialised FreeType library {:p}", raw);

        // The init reference belongs to the root; the handle takes its own.
        let root = Rc::new(Root { ptr: raw });
        // SAFETY: `raw` is a live library.
        let handle = unsafe { Handle::from_raw(raw, true) };
        Ok(Library { handle, root })
    }

    /// Releases this clone. When it is the last one, the library is torn
    /// down with `FT_Done_FreeType` and that call's code is returned.
    /// Otherwise teardown is left to whichever clone goes last.
    pub fn done(self) -> Result<()> {
        let Library { handle, root } = self;
        drop(handle);
        match Rc::try_unwrap(root) {
            Ok(root) => root.finish(),
            Err(_) => {
                trace!("Library still shared; teardown deferred");
                Ok(())
            }
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut FT_LibraryRec {
        self.handle.as_ptr()
    }

    fn raw(&self) -> ffi::FT_Library {
        self.as_ptr().cast()
    }

    pub fn version(&self) -> Version {
        let (mut major, mut minor, mut patch) = (0, 0, 0);
        // SAFETY: live library, valid out-pointers.
        unsafe { ffi::FT_Library_Version(self.as_ptr(), &mut major, &mut minor, &mut patch) };
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Opens face `face_index` of the font file at `path` (`FT_New_Face`).
    ///
    /// A negative index only probes the file: the returned face is valid
    /// for reading `num_faces` and little else.
    pub fn new_face<P: AsRef<Path>>(&self, path: P, face_index: Long) -> Result<Face> {
        let path = path_to_cstring(path.as_ref())?;
        let mut raw = ptr::null_mut();
        // SAFETY: live library, NUL-terminated path, valid out-pointer.
        check(unsafe { ffi::FT_New_Face(self.raw(), path.as_ptr(), face_index, &mut raw) })?;
        debug!("Opened face {:p} from {:?} (index {})", raw, path, face_index);
        // SAFETY: FT_New_Face handed us a fresh face with one reference.
        unsafe { Face::from_raw(self, raw, false) }.ok_or(Error::INVALID_FACE_HANDLE)
    }

    /// Opens a face from an in-memory font file (`FT_New_Memory_Face`).
    ///
    /// FreeType reads from the buffer for as long as the face lives, so the
    /// face (and each of its clones) keeps `data` alive.
    pub fn new_memory_face<D: Into<Rc<[u8]>>>(&self, data: D, face_index: Long) -> Result<Face> {
        let data: Rc<[u8]> = data.into();
        let size = Long::try_from(data.len()).map_err(|_| Error::INVALID_ARGUMENT)?;
        let mut raw = ptr::null_mut();
        // SAFETY: live library; the buffer outlives the face via `Face::data`.
        check(unsafe {
            ffi::FT_New_Memory_Face(self.raw(), data.as_ptr(), size, face_index, &mut raw)
        })?;
        debug!("Opened face {:p} from {} bytes (index {})", raw, data.len(), face_index);
        // SAFETY: fresh face with one reference.
        let face = unsafe { Face::from_raw(self, raw, false) }.ok_or(Error::INVALID_FACE_HANDLE)?;
        Ok(face.with_data(data))
    }

    /// Opens a face from a file, passing extra `params` to the driver
    /// (`FT_Open_Face`).
    pub fn open_face<P: AsRef<Path>>(
        &self,
        path: P,
        face_index: Long,
        params: &[Parameter],
    ) -> Result<Face> {
        let path = path_to_cstring(path.as_ref())?;
        let num_params = Int::try_from(params.len()).map_err(|_| Error::INVALID_ARGUMENT)?;
        let mut flags = ffi::FT_OPEN_PATHNAME;
        if !params.is_empty() {
            flags |= ffi::FT_OPEN_PARAMS;
        }
        let args = ffi::FT_Open_Args {
            flags,
            memory_base: ptr::null(),
            memory_size: 0,
            pathname: path.as_ptr() as *mut _,
            stream: ptr::null_mut(),
            driver: ptr::null_mut(),
            num_params,
            // FreeType only reads the parameter array.
            params: params.as_ptr() as *mut ffi::FT_Parameter,
        };
        let mut raw = ptr::null_mut();
        // SAFETY: `args` and everything it points to outlive the call.
        check(unsafe { ffi::FT_Open_Face(self.raw(), &args, face_index, &mut raw) })?;
        debug!(
            "Opened face {:p} from {:?} with {} parameter(s)",
            raw,
            path,
            params.len()
        );
        // SAFETY: fresh face with one reference.
        unsafe { Face::from_raw(self, raw, false) }.ok_or(Error::INVALID_FACE_HANDLE)
    }

    /// Looks up a registered module, e.g. `"truetype"` or `"autofitter"`.
    pub fn module(&self, name: &str) -> Option<Module<'_>> {
        let name = CString::new(name).ok()?;
        // SAFETY: live library, NUL-terminated name.
        let raw = unsafe { ffi::FT_Get_Module(self.as_ptr(), name.as_ptr()) };
        NonNull::new(raw).map(Module::new)
    }

    /// Unregisters `module` (`FT_Remove_Module`).
    ///
    /// # Safety
    ///
    /// FreeType destroys every face opened through the removed driver. No
    /// `Face` created by such a driver, and no other view of `module`, may
    /// be alive.
    pub unsafe fn remove_module(&self, module: Module<'_>) -> Result<()> {
        check(ffi::FT_Remove_Module(self.as_ptr(), module.as_ptr()))
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("ptr", &self.as_ptr())
            .field("clones", &Rc::strong_count(&self.root))
            .finish()
    }
}

fn path_to_cstring(path: &Path) -> Result<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path.to_string_lossy().into_owned().into_bytes();

    CString::new(bytes).map_err(|_| Error::INVALID_ARGUMENT)
}
