// src/size.rs

//! The active size of a face, and size requests.

use crate::face::Face;
use crate::ffi::{FT_SizeRec, FT_Size_RequestRec};
use crate::types::{Fixed, Long, Pos, SizeRequestType, UInt, UShort};
use serde::Serialize;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Scaled metrics of a size object. `Pos` values are 26.6 pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SizeMetrics {
    pub x_ppem: UShort,
    pub y_ppem: UShort,
    /// Font units to 26.6 pixels, 16.16.
    pub x_scale: Fixed,
    pub y_scale: Fixed,
    pub ascender: Pos,
    pub descender: Pos,
    pub height: Pos,
    pub max_advance: Pos,
}

/// A borrowed view of a face scaled to a given character size.
#[derive(Clone, Copy)]
pub struct Size<'a> {
    ptr: NonNull<FT_SizeRec>,
    _face: PhantomData<&'a Face>,
}

impl<'a> Size<'a> {
    pub(crate) fn new(ptr: NonNull<FT_SizeRec>) -> Self {
        Size {
            ptr,
            _face: PhantomData,
        }
    }

    pub fn as_ptr(&self) -> *mut FT_SizeRec {
        self.ptr.as_ptr()
    }

    pub fn metrics(&self) -> SizeMetrics {
        // SAFETY: the size object belongs to the face borrowed for `'a`.
        let m = unsafe { &self.ptr.as_ref().metrics };
        SizeMetrics {
            x_ppem: m.x_ppem,
            y_ppem: m.y_ppem,
            x_scale: m.x_scale,
            y_scale: m.y_scale,
            ascender: m.ascender,
            descender: m.descender,
            height: m.height,
            max_advance: m.max_advance,
        }
    }
}

/// A size request for `Face::request_size` (`FT_Size_RequestRec`).
///
/// Width and height are 26.6 values; resolutions are dpi, with 0 meaning
/// the value is taken to be in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SizeRequest(FT_Size_RequestRec);

impl SizeRequest {
    pub fn new(
        kind: SizeRequestType,
        width: Long,
        height: Long,
        horizontal_resolution: UInt,
        vertical_resolution: UInt,
    ) -> Self {
        SizeRequest(FT_Size_RequestRec {
            size_request_type: kind as UInt,
            width,
            height,
            horiResolution: horizontal_resolution,
            vertResolution: vertical_resolution,
        })
    }

    /// A nominal request of `pixels` in both directions.
    pub fn pixels(pixels: UInt) -> Self {
        let v = Long::from(pixels) << 6;
        SizeRequest::new(SizeRequestType::Nominal, v, v, 0, 0)
    }

    pub fn kind(&self) -> UInt {
        self.0.size_request_type
    }

    pub fn width(&self) -> Long {
        self.0.width
    }

    pub fn height(&self) -> Long {
        self.0.height
    }

    pub fn horizontal_resolution(&self) -> UInt {
        self.0.horiResolution
    }

    pub fn vertical_resolution(&self) -> UInt {
        self.0.vertResolution
    }

    pub(crate) fn as_raw(&self) -> &FT_Size_RequestRec {
        &self.0
    }
}
