// src/face.rs

//! `Face`: a reference-counted handle to an `FT_Face`.
//!
//! Accessors read fields of the underlying `FT_FaceRec` directly; every
//! other method forwards to exactly one FreeType call and hands back its
//! error code untouched.

use crate::charmap::CharMap;
use crate::error::{check, Result};
use crate::ffi::{self, string_from_ptr, FT_FaceRec};
use crate::glyph::GlyphSlot;
use crate::handle::{log_refcount_failure, Handle, Referenced};
use crate::library::Library;
use crate::size::{Size, SizeRequest};
use crate::types::{
    Encoding, F26Dot6, FaceFlags, FsTypeFlags, Int, LoadFlags, Long, Pos, Short, StyleFlags, UInt,
    ULong, UShort,
};
use serde::Serialize;
use std::ffi::{CStr, CString};
use std::fmt;
use std::ptr::NonNull;
use std::rc::Rc;
use std::slice;

unsafe impl Referenced for FT_FaceRec {
    const KIND: &'static str = "FT_Face";

    unsafe fn acquire(ptr: NonNull<Self>) {
        let code = ffi::FT_Reference_Face(ptr.as_ptr());
        log_refcount_failure(Self::KIND, "FT_Reference_Face", code);
    }

    unsafe fn release(ptr: NonNull<Self>) {
        let code = ffi::FT_Done_Face(ptr.as_ptr());
        log_refcount_failure(Self::KIND, "FT_Done_Face", code);
    }
}

/// Font bounding box in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BBox {
    pub x_min: Pos,
    pub y_min: Pos,
    pub x_max: Pos,
    pub y_max: Pos,
}

/// One bitmap strike of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitmapSize {
    pub height: Short,
    pub width: Short,
    /// Nominal size in 26.6 points.
    pub size: Pos,
    /// Horizontal ppem in 26.6 pixels.
    pub x_ppem: Pos,
    /// Vertical ppem in 26.6 pixels.
    pub y_ppem: Pos,
}

/// A handle to a typographic face: a given typeface in a given style.
///
/// Clones share one `FT_Face` through FreeType's reference count. Each
/// handle also keeps its `Library` (and, for memory faces, the font bytes)
/// alive, so the face can never outlive what it was opened from.
#[derive(Clone)]
pub struct Face {
    // Drop order: the face reference first, then what it depends on.
    handle: Handle<FT_FaceRec>,
    library: Library,
    data: Option<Rc<[u8]>>,
}

impl Face {
    /// Wraps a raw face opened from `library`. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live face created from `library`. With
    /// `add_ref == false` the caller hands over one reference it owns.
    pub unsafe fn from_raw(library: &Library, ptr: *mut FT_FaceRec, add_ref: bool) -> Option<Face> {
        if ptr.is_null() {
            return None;
        }
        Some(Face {
            handle: Handle::from_raw(ptr, add_ref),
            library: library.clone(),
            data: None,
        })
    }

    pub(crate) fn with_data(mut self, data: Rc<[u8]>) -> Face {
        self.data = Some(data);
        self
    }

    /// Always true for a face obtained through this crate.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut FT_FaceRec {
        self.handle.as_ptr()
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// The raw face record.
    #[inline]
    pub fn rec(&self) -> &FT_FaceRec {
        // SAFETY: a `Face` is never null and holds a reference.
        unsafe { &*self.as_ptr() }
    }

    /// Mutable access to the raw face record.
    ///
    /// # Safety
    ///
    /// FreeType owns these fields. Only write the ones it documents as
    /// client-writable (e.g. `generic`), and remember that every clone of
    /// this face sees the change.
    pub unsafe fn rec_mut(&mut self) -> &mut FT_FaceRec {
        &mut *self.as_ptr()
    }

    // ------------------------------------------------------------------
    // Structure accessors
    // ------------------------------------------------------------------

    /// Number of faces in the font file.
    pub fn num_faces(&self) -> Long {
        self.rec().num_faces
    }

    /// Index of this face in its file (0 for single-face files).
    pub fn face_index(&self) -> Long {
        self.rec().face_index
    }

    pub fn face_flags(&self) -> FaceFlags {
        FaceFlags::from_bits_retain(self.rec().face_flags)
    }

    pub fn style_flags(&self) -> StyleFlags {
        StyleFlags::from_bits_truncate(self.rec().style_flags)
    }

    /// Named instance index carried in the upper bits of `style_flags`.
    pub fn named_instance_index(&self) -> Long {
        self.rec().style_flags >> 16
    }

    /// Glyph count; for CID-keyed fonts, the highest CID in use.
    pub fn num_glyphs(&self) -> Long {
        self.rec().num_glyphs
    }

    pub fn family_name(&self) -> Option<String> {
        // SAFETY: FreeType keeps the string alive with the face.
        unsafe { string_from_ptr(self.rec().family_name) }
    }

    pub fn style_name(&self) -> Option<String> {
        // SAFETY: as for `family_name`.
        unsafe { string_from_ptr(self.rec().style_name) }
    }

    /// Number of bitmap strikes.
    pub fn num_fixed_sizes(&self) -> Int {
        self.rec().num_fixed_sizes
    }

    pub fn available_sizes(&self) -> Vec<BitmapSize> {
        let rec = self.rec();
        let len = usize::try_from(rec.num_fixed_sizes).unwrap_or(0);
        if rec.available_sizes.is_null() || len == 0 {
            return Vec::new();
        }
        // SAFETY: FreeType sizes the array by `num_fixed_sizes`.
        unsafe { slice::from_raw_parts(rec.available_sizes, len) }
            .iter()
            .map(|s| BitmapSize {
                height: s.height,
                width: s.width,
                size: s.size,
                x_ppem: s.x_ppem,
                y_ppem: s.y_ppem,
            })
            .collect()
    }

    pub fn num_charmaps(&self) -> Int {
        self.rec().num_charmaps
    }

    pub fn charmaps(&self) -> Vec<CharMap<'_>> {
        let rec = self.rec();
        let len = usize::try_from(rec.num_charmaps).unwrap_or(0);
        if rec.charmaps.is_null() || len == 0 {
            return Vec::new();
        }
        // SAFETY: FreeType sizes the array by `num_charmaps`.
        unsafe { slice::from_raw_parts(rec.charmaps, len) }
            .iter()
            .filter_map(|&cm| NonNull::new(cm).map(CharMap::new))
            .collect()
    }

    /// The active charmap, if one is selected.
    pub fn charmap(&self) -> Option<CharMap<'_>> {
        NonNull::new(self.rec().charmap).map(CharMap::new)
    }

    /// Scalable formats only.
    pub fn bbox(&self) -> BBox {
        let b = &self.rec().bbox;
        BBox {
            x_min: b.xMin,
            y_min: b.yMin,
            x_max: b.xMax,
            y_max: b.yMax,
        }
    }

    /// Typically 2048 for TrueType and 1000 for Type 1.
    pub fn units_per_em(&self) -> UShort {
        self.rec().units_per_EM
    }

    pub fn ascender(&self) -> Short {
        self.rec().ascender
    }

    /// Usually negative.
    pub fn descender(&self) -> Short {
        self.rec().descender
    }

    /// Baseline-to-baseline distance in font units.
    pub fn height(&self) -> Short {
        self.rec().height
    }

    pub fn max_advance_width(&self) -> Short {
        self.rec().max_advance_width
    }

    pub fn max_advance_height(&self) -> Short {
        self.rec().max_advance_height
    }

    pub fn underline_position(&self) -> Short {
        self.rec().underline_position
    }

    pub fn underline_thickness(&self) -> Short {
        self.rec().underline_thickness
    }

    /// The face's glyph slot, filled by `load_glyph` / `load_char`.
    pub fn glyph(&self) -> Option<GlyphSlot<'_>> {
        NonNull::new(self.rec().glyph).map(GlyphSlot::new)
    }

    /// The active size object.
    pub fn size(&self) -> Option<Size<'_>> {
        NonNull::new(self.rec().size).map(Size::new)
    }

    pub fn has_horizontal(&self) -> bool {
        self.face_flags().contains(FaceFlags::HORIZONTAL)
    }

    pub fn has_vertical(&self) -> bool {
        self.face_flags().contains(FaceFlags::VERTICAL)
    }

    pub fn has_kerning(&self) -> bool {
        self.face_flags().contains(FaceFlags::KERNING)
    }

    pub fn is_scalable(&self) -> bool {
        self.face_flags().contains(FaceFlags::SCALABLE)
    }

    pub fn is_sfnt(&self) -> bool {
        self.face_flags().contains(FaceFlags::SFNT)
    }

    pub fn is_fixed_width(&self) -> bool {
        self.face_flags().contains(FaceFlags::FIXED_WIDTH)
    }

    pub fn has_fixed_sizes(&self) -> bool {
        self.face_flags().contains(FaceFlags::FIXED_SIZES)
    }

    pub fn has_fast_glyphs(&self) -> bool {
        self.face_flags().contains(FaceFlags::FAST_GLYPHS)
    }

    pub fn has_glyph_names(&self) -> bool {
        self.face_flags().contains(FaceFlags::GLYPH_NAMES)
    }

    pub fn has_multiple_masters(&self) -> bool {
        self.face_flags().contains(FaceFlags::MULTIPLE_MASTERS)
    }

    pub fn is_cid_keyed(&self) -> bool {
        self.face_flags().contains(FaceFlags::CID_KEYED)
    }

    pub fn is_tricky(&self) -> bool {
        self.face_flags().contains(FaceFlags::TRICKY)
    }

    // ------------------------------------------------------------------
    // Forwarding operations
    // ------------------------------------------------------------------

    /// Selects bitmap strike `strike_index` (`FT_Select_Size`).
    pub fn select_size(&self, strike_index: Int) -> Result<()> {
        check(unsafe { ffi::FT_Select_Size(self.as_ptr(), strike_index) })
    }

    /// Requests a nominal size in 26.6 points at the given resolution.
    /// A zero width or height means "same as the other"; zero resolutions
    /// default to 72 dpi.
    pub fn set_char_size(
        &self,
        char_width: F26Dot6,
        char_height: F26Dot6,
        horz_resolution: UInt,
        vert_resolution: UInt,
    ) -> Result<()> {
        check(unsafe {
            ffi::FT_Set_Char_Size(
                self.as_ptr(),
                char_width,
                char_height,
                horz_resolution,
                vert_resolution,
            )
        })
    }

    /// Requests a nominal size in whole pixels.
    pub fn set_pixel_sizes(&self, pixel_width: UInt, pixel_height: UInt) -> Result<()> {
        check(unsafe { ffi::FT_Set_Pixel_Sizes(self.as_ptr(), pixel_width, pixel_height) })
    }

    pub fn request_size(&self, request: &SizeRequest) -> Result<()> {
        // FreeType takes a mutable pointer but does not write through it.
        let mut req = *request.as_raw();
        check(unsafe { ffi::FT_Request_Size(self.as_ptr(), &mut req) })
    }

    /// Loads glyph `glyph_index` into the glyph slot.
    pub fn load_glyph(&self, glyph_index: UInt, load_flags: LoadFlags) -> Result<()> {
        check(unsafe { ffi::FT_Load_Glyph(self.as_ptr(), glyph_index, load_flags.bits()) })
    }

    /// Loads the glyph for `char_code` in the active charmap.
    pub fn load_char(&self, char_code: ULong, load_flags: LoadFlags) -> Result<()> {
        check(unsafe { ffi::FT_Load_Char(self.as_ptr(), char_code, load_flags.bits()) })
    }

    /// ASCII name of a glyph. Only meaningful when `has_glyph_names()`.
    /// Names longer than the internal buffer are truncated by FreeType.
    pub fn glyph_name(&self, glyph_index: UInt) -> Result<String> {
        let mut buf = [0u8; 128];
        check(unsafe {
            ffi::FT_Get_Glyph_Name(
                self.as_ptr(),
                glyph_index,
                buf.as_mut_ptr().cast(),
                buf.len() as UInt,
            )
        })?;
        let name = match CStr::from_bytes_until_nul(&buf) {
            Ok(s) => s.to_string_lossy().into_owned(),
            Err(_) => String::from_utf8_lossy(&buf).into_owned(),
        };
        Ok(name)
    }

    /// PostScript name, for PostScript and TrueType fonts that carry one.
    pub fn postscript_name(&self) -> Option<String> {
        // SAFETY: the returned string is owned by the face.
        unsafe { string_from_ptr(ffi::FT_Get_Postscript_Name(self.as_ptr())) }
    }

    pub fn select_charmap(&self, encoding: Encoding) -> Result<()> {
        check(unsafe { ffi::FT_Select_Charmap(self.as_ptr(), encoding.tag()) })
    }

    /// Makes `charmap` (one of this face's `charmaps()`) the active one.
    pub fn set_charmap(&self, charmap: &CharMap<'_>) -> Result<()> {
        check(unsafe { ffi::FT_Set_Charmap(self.as_ptr(), charmap.as_ptr()) })
    }

    /// Glyph index for `charcode` in the active charmap; 0 means missing.
    pub fn char_index(&self, charcode: ULong) -> UInt {
        unsafe { ffi::FT_Get_Char_Index(self.as_ptr(), charcode) }
    }

    /// First `(charcode, glyph_index)` of the active charmap. A glyph
    /// index of 0 means the charmap is empty.
    pub fn first_char(&self) -> (ULong, UInt) {
        let mut gindex = 0;
        let code = unsafe { ffi::FT_Get_First_Char(self.as_ptr(), &mut gindex) };
        (code, gindex)
    }

    /// The mapping following `char_code`. A glyph index of 0 ends the walk.
    pub fn next_char(&self, char_code: ULong) -> (ULong, UInt) {
        let mut gindex = 0;
        let code = unsafe { ffi::FT_Get_Next_Char(self.as_ptr(), char_code, &mut gindex) };
        (code, gindex)
    }

    /// Iterates all `(charcode, glyph_index)` pairs of the active charmap.
    pub fn chars(&self) -> Chars<'_> {
        Chars {
            face: self,
            next: Some(self.first_char()),
        }
    }

    /// Glyph index for a glyph name; 0 when unknown.
    pub fn name_index(&self, glyph_name: &str) -> UInt {
        match CString::new(glyph_name) {
            Ok(name) => unsafe { ffi::FT_Get_Name_Index(self.as_ptr(), name.as_ptr()) },
            Err(_) => 0,
        }
    }

    /// Embedding permissions (`fsType`).
    pub fn fstype_flags(&self) -> FsTypeFlags {
        FsTypeFlags::from_bits_retain(unsafe { ffi::FT_Get_FSType_Flags(self.as_ptr()) })
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Face")
            .field("ptr", &self.as_ptr())
            .field("family", &self.family_name())
            .field("style", &self.style_name())
            .field("in_memory", &self.data.is_some())
            .finish()
    }
}

/// Iterator returned by `Face::chars`.
pub struct Chars<'a> {
    face: &'a Face,
    next: Option<(ULong, UInt)>,
}

impl Iterator for Chars<'_> {
    type Item = (ULong, UInt);

    fn next(&mut self) -> Option<Self::Item> {
        let (code, gindex) = self.next.take()?;
        if gindex == 0 {
            return None;
        }
        self.next = Some(self.face.next_char(code));
        Some((code, gindex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GlyphFormat, PointKind};
    use std::path::{Path, PathBuf};
    use test_log::test;

    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
        "/Library/Fonts/Arial Unicode.ttf",
    ];

    /// A scalable system font, or `None` on machines without one.
    fn system_font() -> Option<PathBuf> {
        let found = CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
            .map(Path::to_path_buf);
        if found.is_none() {
            log::info!("No system font found; skipping font-backed test");
        }
        found
    }

    #[test]
    fn face_reads_basic_fields() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();

        assert!(face.is_valid());
        assert!(face.num_faces() >= 1);
        assert_eq!(face.face_index(), 0);
        assert!(face.num_glyphs() > 0);
        assert!(face.family_name().is_some());
        assert!(face.is_scalable());
        assert!(face.is_sfnt());
        assert!(face.units_per_em() > 0);
        assert!(face.ascender() > 0);
        assert!(face.descender() <= 0);
        assert_eq!(face.charmaps().len(), face.num_charmaps() as usize);
    }

    #[test]
    fn face_outlives_the_library_handle_it_came_from() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        drop(library);

        let copy = face.clone();
        drop(face);
        assert!(copy.family_name().is_some());
        assert_eq!(copy.library().version().major, 2);
    }

    #[test]
    fn memory_face_keeps_its_bytes() {
        let Some(path) = system_font() else { return };
        let bytes = std::fs::read(&path).unwrap();
        let library = Library::init().unwrap();
        let face = library.new_memory_face(bytes, 0).unwrap();
        let clone = face.clone();
        drop(face);
        assert!(clone.num_glyphs() > 0);
        assert!(clone.family_name().is_some());
    }

    #[test]
    fn unicode_lookup_and_outline() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();

        face.select_charmap(Encoding::Unicode).unwrap();
        let active = face.charmap().expect("active charmap");
        assert_eq!(active.encoding(), Some(Encoding::Unicode));
        assert!(active.index() >= 0);

        face.set_char_size(0, 16 * 64, 300, 300).unwrap();
        let index = face.char_index('A' as ULong);
        assert_ne!(index, 0);

        face.load_char('A' as ULong, LoadFlags::NO_BITMAP | LoadFlags::NO_SCALE)
            .unwrap();
        let slot = face.glyph().unwrap();
        assert_eq!(slot.format(), Some(GlyphFormat::Outline));

        let outline = slot.outline();
        assert!(outline.n_contours() > 0);
        let total: usize = outline.contours().map(|c| c.len()).sum();
        assert_eq!(total, outline.n_points());
        assert!(outline
            .points()
            .iter()
            .any(|p| p.tag.kind() == PointKind::On));
    }

    #[test]
    fn char_walk_matches_char_index() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        face.select_charmap(Encoding::Unicode).unwrap();

        let mut seen = 0;
        for (code, gindex) in face.chars().take(64) {
            assert_ne!(gindex, 0);
            assert_eq!(face.char_index(code), gindex);
            seen += 1;
        }
        assert!(seen > 0);
    }

    #[test]
    fn bad_glyph_index_passes_the_error_through() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        let past_end = face.num_glyphs() as UInt + 10;
        let err = face.load_glyph(past_end, LoadFlags::DEFAULT).unwrap_err();
        // FT_Err_Invalid_Argument
        assert_eq!(err.code(), 0x06);
    }

    #[test]
    fn size_metrics_follow_pixel_size() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        face.set_pixel_sizes(0, 32).unwrap();
        let metrics = face.size().unwrap().metrics();
        assert_eq!(metrics.y_ppem, 32);
        assert_eq!(metrics.x_ppem, 32);
    }

    #[test]
    fn request_size_matches_pixel_request() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        face.request_size(&SizeRequest::pixels(20)).unwrap();
        assert_eq!(face.size().unwrap().metrics().y_ppem, 20);
    }

    #[test]
    fn select_size_needs_bitmap_strikes() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        if !face.has_fixed_sizes() {
            assert!(face.select_size(0).is_err());
            assert!(face.available_sizes().is_empty());
        }
    }

    #[test]
    fn glyph_names_round_trip_through_name_index() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        assert!(face.postscript_name().is_some());
        if !face.has_glyph_names() {
            return;
        }
        let index = face.char_index('A' as ULong);
        let name = face.glyph_name(index).unwrap();
        assert!(!name.is_empty());
        assert_eq!(face.name_index(&name), index);
        assert_eq!(face.name_index("no\0such"), 0);
    }

    #[test]
    fn set_charmap_switches_the_active_one() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        let charmaps = face.charmaps();
        assert_eq!(charmaps.len(), face.num_charmaps() as usize);
        for cm in &charmaps {
            face.set_charmap(cm).unwrap();
            assert_eq!(face.charmap().unwrap().index(), cm.index());
        }
    }

    #[test]
    fn fstype_flags_are_readable() {
        let Some(path) = system_font() else { return };
        let library = Library::init().unwrap();
        let face = library.new_face(&path, 0).unwrap();
        // Free fonts ship installable; no restriction bits set.
        assert!(!face.fstype_flags().contains(FsTypeFlags::RESTRICTED_LICENSE_EMBEDDING));
    }
}
