// src/error.rs

//! The single error type of the crate.
//!
//! FreeType reports failures as plain integer codes, zero meaning success.
//! This layer applies no taxonomy: a nonzero code is carried to the caller
//! exactly as FreeType returned it.

use crate::ffi::FT_Error;
use std::fmt;

/// A nonzero FreeType error code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error(FT_Error);

impl Error {
    /// `FT_Err_Invalid_Argument`, also used when an argument cannot be
    /// marshalled (e.g. a path with an interior NUL).
    pub const INVALID_ARGUMENT: Error = Error(0x06);
    /// `FT_Err_Invalid_Library_Handle`.
    pub const INVALID_LIBRARY_HANDLE: Error = Error(0x21);
    /// `FT_Err_Invalid_Face_Handle`.
    pub const INVALID_FACE_HANDLE: Error = Error(0x23);

    /// Wraps a raw code. Callers should only pass nonzero values; `check`
    /// is the usual way in.
    pub const fn from_code(code: FT_Error) -> Self {
        Error(code)
    }

    /// The raw FreeType code, unchanged.
    pub const fn code(&self) -> FT_Error {
        self.0
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error(0x{:02x})", self.0)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FreeType error 0x{:02x}", self.0)
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Maps a FreeType return code onto `Result`.
#[inline]
pub fn check(code: FT_Error) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(Error(code))
    }
}
