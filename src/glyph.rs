// src/glyph.rs

//! Views of a face's glyph slot and the outline loaded into it.

use crate::face::Face;
use crate::ffi::{FT_GlyphSlotRec, FT_Outline, FT_Vector};
use crate::types::{CurveTag, Fixed, GlyphFormat, Int, PixelMode, Pos, Tag};
use serde::Serialize;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Vector {
    pub x: Pos,
    pub y: Pos,
}

/// Glyph metrics in 26.6 pixels, or font units with `LoadFlags::NO_SCALE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GlyphMetrics {
    pub width: Pos,
    pub height: Pos,
    pub hori_bearing_x: Pos,
    pub hori_bearing_y: Pos,
    pub hori_advance: Pos,
    pub vert_bearing_x: Pos,
    pub vert_bearing_y: Pos,
    pub vert_advance: Pos,
}

/// A borrowed view of `face->glyph`.
///
/// Each accessor reads the slot at call time, so values reflect the most
/// recent `load_glyph` / `load_char` on the face.
#[derive(Clone, Copy)]
pub struct GlyphSlot<'a> {
    ptr: NonNull<FT_GlyphSlotRec>,
    _face: PhantomData<&'a Face>,
}

impl<'a> GlyphSlot<'a> {
    pub(crate) fn new(ptr: NonNull<FT_GlyphSlotRec>) -> Self {
        GlyphSlot {
            ptr,
            _face: PhantomData,
        }
    }

    fn rec(&self) -> &FT_GlyphSlotRec {
        // SAFETY: the slot is owned by the face borrowed for `'a`.
        unsafe { self.ptr.as_ref() }
    }

    pub fn as_ptr(&self) -> *mut FT_GlyphSlotRec {
        self.ptr.as_ptr()
    }

    pub fn format_tag(&self) -> Tag {
        self.rec().format as Tag
    }

    pub fn format(&self) -> Option<GlyphFormat> {
        GlyphFormat::from_tag(self.format_tag())
    }

    pub fn metrics(&self) -> GlyphMetrics {
        let m = &self.rec().metrics;
        GlyphMetrics {
            width: m.width,
            height: m.height,
            hori_bearing_x: m.horiBearingX,
            hori_bearing_y: m.horiBearingY,
            hori_advance: m.horiAdvance,
            vert_bearing_x: m.vertBearingX,
            vert_bearing_y: m.vertBearingY,
            vert_advance: m.vertAdvance,
        }
    }

    pub fn advance(&self) -> Vector {
        let a = &self.rec().advance;
        Vector { x: a.x, y: a.y }
    }

    /// Unhinted advance width in 16.16 pixels.
    pub fn linear_hori_advance(&self) -> Fixed {
        self.rec().linearHoriAdvance
    }

    pub fn linear_vert_advance(&self) -> Fixed {
        self.rec().linearVertAdvance
    }

    pub fn bitmap_left(&self) -> Int {
        self.rec().bitmap_left
    }

    pub fn bitmap_top(&self) -> Int {
        self.rec().bitmap_top
    }

    /// `(width, rows)` of the rendered bitmap; zero until a glyph is rendered.
    pub fn bitmap_dimensions(&self) -> (u32, u32) {
        let b = &self.rec().bitmap;
        (b.width as u32, b.rows as u32)
    }

    pub fn bitmap_pixel_mode(&self) -> Option<PixelMode> {
        PixelMode::from_raw(self.rec().bitmap.pixel_mode as u8)
    }

    /// Copies the current outline out of the slot. Empty unless the format
    /// is `GlyphFormat::Outline`.
    pub fn outline(&self) -> Outline {
        // SAFETY: the slot's outline arrays belong to the face borrowed
        // for `'a` and stay put until the next load.
        unsafe { Outline::from_raw(&self.rec().outline) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlinePoint {
    pub pos: Vector,
    pub tag: CurveTag,
}

/// An owned copy of an `FT_Outline`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    points: Vec<OutlinePoint>,
    /// Inclusive index of each contour's last point.
    contour_ends: Vec<usize>,
}

impl Outline {
    /// Copies an `FT_Outline`. Negative counts are treated as empty.
    ///
    /// # Safety
    ///
    /// Each non-null array must hold at least as many elements as its
    /// (non-negative) count says.
    pub unsafe fn from_raw(raw: &FT_Outline) -> Outline {
        let n_points = usize::try_from(raw.n_points).unwrap_or(0);
        let n_contours = usize::try_from(raw.n_contours).unwrap_or(0);
        if raw.points.is_null() || raw.tags.is_null() || raw.contours.is_null() {
            return Outline::default();
        }

        let (points, tags, ends) = (
            slice::from_raw_parts(raw.points, n_points),
            slice::from_raw_parts(raw.tags, n_points),
            slice::from_raw_parts(raw.contours, n_contours),
        );

        Outline {
            points: points
                .iter()
                .zip(tags)
                .map(|(p, &t)| OutlinePoint {
                    pos: Vector { x: p.x, y: p.y },
                    tag: CurveTag::from_bits_truncate(t as u8),
                })
                .collect(),
            contour_ends: ends
                .iter()
                .map(|&e| usize::try_from(e).unwrap_or(0))
                .collect(),
        }
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    pub fn n_contours(&self) -> usize {
        self.contour_ends.len()
    }

    pub fn points(&self) -> &[OutlinePoint] {
        &self.points
    }

    pub fn contour_ends(&self) -> &[usize] {
        &self.contour_ends
    }

    /// The points of each contour in order.
    pub fn contours(&self) -> impl Iterator<Item = &[OutlinePoint]> + '_ {
        let mut start = 0;
        self.contour_ends.iter().map(move |&end| {
            let end = (end + 1).min(self.points.len());
            let from = start.min(end);
            start = end;
            &self.points[from..end]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointKind;
    use test_log::test;

    fn point(x: Pos, y: Pos, bits: u8) -> OutlinePoint {
        OutlinePoint {
            pos: Vector { x, y },
            tag: CurveTag::from_bits_truncate(bits),
        }
    }

    #[test]
    fn contours_split_at_inclusive_ends() {
        let outline = Outline {
            points: vec![
                point(0, 0, 1),
                point(10, 0, 1),
                point(10, 10, 0),
                point(20, 20, 1),
                point(30, 20, 2),
            ],
            contour_ends: vec![2, 4],
        };

        let contours: Vec<_> = outline.contours().collect();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].len(), 3);
        assert_eq!(contours[1].len(), 2);
        assert_eq!(contours[0][2].tag.kind(), PointKind::Conic);
        assert_eq!(contours[1][1].tag.kind(), PointKind::Cubic);
    }

    #[test]
    fn malformed_ends_never_index_out_of_bounds() {
        let outline = Outline {
            points: vec![point(0, 0, 1)],
            contour_ends: vec![5, 0],
        };
        let lens: Vec<usize> = outline.contours().map(<[_]>::len).collect();
        assert_eq!(lens, vec![1, 0]);
    }

    #[test]
    fn empty_outline() {
        let outline = Outline::default();
        assert_eq!(outline.n_points(), 0);
        assert_eq!(outline.contours().count(), 0);
    }

    fn raw_outline(
        points: &mut [FT_Vector],
        tags: &mut [libc::c_char],
        ends: &mut [libc::c_short],
        n_points: libc::c_short,
        n_contours: libc::c_short,
    ) -> FT_Outline {
        FT_Outline {
            n_contours,
            n_points,
            points: points.as_mut_ptr(),
            tags: tags.as_mut_ptr(),
            contours: ends.as_mut_ptr(),
            flags: 0,
        }
    }

    #[test]
    fn raw_outline_is_copied_point_for_point() {
        let mut points = [
            FT_Vector { x: 0, y: 0 },
            FT_Vector { x: 64, y: 0 },
            FT_Vector { x: 64, y: 64 },
        ];
        let mut tags = [1, 0, 1];
        let mut ends = [2];
        let raw = raw_outline(&mut points, &mut tags, &mut ends, 3, 1);
        let outline = unsafe { Outline::from_raw(&raw) };
        assert_eq!(outline.n_points(), 3);
        assert_eq!(outline.contour_ends(), &[2]);
        assert_eq!(outline.points()[1].pos, Vector { x: 64, y: 0 });
        assert_eq!(outline.points()[1].tag.kind(), PointKind::Conic);
    }

    #[test]
    fn negative_counts_read_nothing() {
        // 0xFFFF points as stored by a FreeType whose counts are unsigned.
        let mut points = [FT_Vector { x: 1, y: 1 }];
        let mut tags = [1];
        let mut ends = [-1];
        let raw = raw_outline(&mut points, &mut tags, &mut ends, -1, -1);
        let outline = unsafe { Outline::from_raw(&raw) };
        assert_eq!(outline.n_points(), 0);
        assert_eq!(outline.n_contours(), 0);
    }

    #[test]
    fn negative_contour_end_clamps_to_zero() {
        let mut points = [FT_Vector { x: 1, y: 1 }];
        let mut tags = [1];
        let mut ends = [-5];
        let raw = raw_outline(&mut points, &mut tags, &mut ends, 1, 1);
        let outline = unsafe { Outline::from_raw(&raw) };
        assert_eq!(outline.contour_ends(), &[0]);
        let lens: Vec<usize> = outline.contours().map(<[_]>::len).collect();
        assert_eq!(lens, vec![1]);
    }

    #[test]
    fn space_glyph_has_an_empty_outline() {
        use crate::library::Library;
        use crate::types::LoadFlags;

        let Some(path) = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        ]
        .into_iter()
        .find(|p| std::path::Path::new(p).is_file()) else {
            return;
        };
        let library = Library::init().unwrap();
        let face = library.new_face(path, 0).unwrap();
        face.load_char(' ' as _, LoadFlags::NO_BITMAP).unwrap();
        let outline = face.glyph().unwrap().outline();
        assert_eq!(outline.n_contours(), 0);
        assert_eq!(outline.n_points(), 0);
        assert_eq!(outline.contours().count(), 0);
    }
}
