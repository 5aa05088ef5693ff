// src/lib.rs

//! Reference-counted handles over the FreeType 2 C library.
//!
//! `Library` and `Face` are thin owning wrappers around `FT_Library` and
//! `FT_Face`: cloning takes a FreeType reference, dropping releases it.
//! Everything else (glyph slots, sizes, charmaps, modules) is a borrowed
//! view tied to the face or library it came from.
//!
//! ```no_run
//! use freetype_rc::{Library, LoadFlags};
//!
//! let library = Library::init()?;
//! let face = library.new_face("/usr/share/fonts/DejaVuSans.ttf", 0)?;
//! face.set_char_size(0, 16 * 64, 300, 300)?;
//! face.load_char('A' as _, LoadFlags::NO_BITMAP)?;
//! # Ok::<(), freetype_rc::Error>(())
//! ```

pub mod charmap;
pub mod config;
pub mod error;
pub mod face;
pub mod ffi;
pub mod glyph;
pub mod handle;
pub mod library;
pub mod module;
pub mod parameter;
pub mod report;
pub mod size;
pub mod types;

pub use charmap::CharMap;
pub use error::{check, Error, Result};
pub use face::{BBox, BitmapSize, Chars, Face};
pub use glyph::{GlyphMetrics, GlyphSlot, Outline, OutlinePoint, Vector};
pub use handle::{Handle, Referenced};
pub use library::{Library, Version};
pub use module::Module;
pub use parameter::Parameter;
pub use size::{Size, SizeMetrics, SizeRequest};
pub use types::{
    CurveTag, Encoding, FaceFlags, FsTypeFlags, GlyphFormat, LoadFlags, PixelMode, PointKind,
    RenderMode, SizeRequestType, StyleFlags,
};
