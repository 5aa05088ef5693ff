// src/types.rs

//! Scalar aliases, tags, enumerations and flag sets mirroring FreeType's
//! public header.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Int = libc::c_int;
pub type UInt = libc::c_uint;
pub type Short = libc::c_short;
pub type UShort = libc::c_ushort;
pub type Long = libc::c_long;
pub type ULong = libc::c_ulong;
/// Four-byte tag, as used in SFNT tables.
pub type Tag = u32;
/// 16.16 fixed point: scales and matrix coefficients.
pub type Fixed = libc::c_long;
/// Vector coordinate; font units, 16.16 or 26.6 depending on context.
pub type Pos = libc::c_long;
/// 26.6 fixed point, used for pixel coordinates.
pub type F26Dot6 = libc::c_long;

/// Packs four characters into a big-endian tag (`FT_IMAGE_TAG`).
pub const fn image_tag(a: u8, b: u8, c: u8, d: u8) -> Tag {
    ((a as u32) << 24) | ((b as u32) << 16) | ((c as u32) << 8) | (d as u32)
}

/// Displays a tag as its four characters, most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDisplay(pub Tag);

impl fmt::Display for TagDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.to_be_bytes() {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else if byte == 0 {
                ' '
            } else {
                '?'
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Charmap encodings (`FT_ENCODING_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u32)]
pub enum Encoding {
    None = 0,
    MsSymbol = image_tag(b's', b'y', b'm', b'b'),
    Unicode = image_tag(b'u', b'n', b'i', b'c'),
    Sjis = image_tag(b's', b'j', b'i', b's'),
    Prc = image_tag(b'g', b'b', b' ', b' '),
    Big5 = image_tag(b'b', b'i', b'g', b'5'),
    Wansung = image_tag(b'w', b'a', b'n', b's'),
    Johab = image_tag(b'j', b'o', b'h', b'a'),
    AdobeStandard = image_tag(b'A', b'D', b'O', b'B'),
    AdobeExpert = image_tag(b'A', b'D', b'B', b'E'),
    AdobeCustom = image_tag(b'A', b'D', b'B', b'C'),
    AdobeLatin1 = image_tag(b'l', b'a', b't', b'1'),
    OldLatin2 = image_tag(b'l', b'a', b't', b'2'),
    AppleRoman = image_tag(b'a', b'r', b'm', b'n'),
}

impl Encoding {
    const ALL: [Encoding; 14] = [
        Encoding::None,
        Encoding::MsSymbol,
        Encoding::Unicode,
        Encoding::Sjis,
        Encoding::Prc,
        Encoding::Big5,
        Encoding::Wansung,
        Encoding::Johab,
        Encoding::AdobeStandard,
        Encoding::AdobeExpert,
        Encoding::AdobeCustom,
        Encoding::AdobeLatin1,
        Encoding::OldLatin2,
        Encoding::AppleRoman,
    ];

    pub fn from_tag(tag: Tag) -> Option<Encoding> {
        Self::ALL.iter().copied().find(|e| *e as u32 == tag)
    }

    pub const fn tag(self) -> Tag {
        self as u32
    }
}

/// Glyph image formats (`FT_GLYPH_FORMAT_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u32)]
pub enum GlyphFormat {
    None = 0,
    Composite = image_tag(b'c', b'o', b'm', b'p'),
    Bitmap = image_tag(b'b', b'i', b't', b's'),
    Outline = image_tag(b'o', b'u', b't', b'l'),
    Plotter = image_tag(b'p', b'l', b'o', b't'),
    Svg = image_tag(b'S', b'V', b'G', b' '),
}

impl GlyphFormat {
    pub fn from_tag(tag: Tag) -> Option<GlyphFormat> {
        [
            GlyphFormat::None,
            GlyphFormat::Composite,
            GlyphFormat::Bitmap,
            GlyphFormat::Outline,
            GlyphFormat::Plotter,
            GlyphFormat::Svg,
        ]
        .into_iter()
        .find(|f| *f as u32 == tag)
    }
}

/// Pixel layout of a bitmap (`FT_PIXEL_MODE_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PixelMode {
    None = 0,
    /// 1 bit per pixel, most significant bit leftmost.
    Mono,
    /// 8-bit coverage.
    Gray,
    Gray2,
    Gray4,
    /// Horizontal RGB/BGR subpixels; three times wider than the glyph.
    Lcd,
    /// Vertical RGB/BGR subpixels; three times taller than the glyph.
    LcdV,
    /// Premultiplied BGRA.
    Bgra,
}

impl PixelMode {
    pub fn from_raw(mode: u8) -> Option<PixelMode> {
        Some(match mode {
            0 => PixelMode::None,
            1 => PixelMode::Mono,
            2 => PixelMode::Gray,
            3 => PixelMode::Gray2,
            4 => PixelMode::Gray4,
            5 => PixelMode::Lcd,
            6 => PixelMode::LcdV,
            7 => PixelMode::Bgra,
            _ => return None,
        })
    }
}

/// Render modes, also used to build `LoadFlags::target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u32)]
pub enum RenderMode {
    Normal = 0,
    Light,
    Mono,
    Lcd,
    LcdV,
    Sdf,
}

/// How `Face::request_size` interprets width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u32)]
pub enum SizeRequestType {
    Nominal = 0,
    RealDim,
    Bbox,
    Cell,
    Scales,
}

bitflags! {
    /// `FT_FACE_FLAG_*`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FaceFlags: libc::c_long {
        const SCALABLE          = 1 << 0;
        const FIXED_SIZES       = 1 << 1;
        const FIXED_WIDTH       = 1 << 2;
        const SFNT              = 1 << 3;
        const HORIZONTAL        = 1 << 4;
        const VERTICAL          = 1 << 5;
        const KERNING           = 1 << 6;
        const FAST_GLYPHS       = 1 << 7;
        const MULTIPLE_MASTERS  = 1 << 8;
        const GLYPH_NAMES       = 1 << 9;
        const EXTERNAL_STREAM   = 1 << 10;
        const HINTER            = 1 << 11;
        const CID_KEYED         = 1 << 12;
        const TRICKY            = 1 << 13;
        const COLOR             = 1 << 14;
        const VARIATION         = 1 << 15;
        const SVG               = 1 << 16;
        const SBIX              = 1 << 17;
        const SBIX_OVERLAY      = 1 << 18;
    }
}

bitflags! {
    /// `FT_STYLE_FLAG_*`. The upper 16 bits of `style_flags` hold the named
    /// instance index and are not flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: libc::c_long {
        const ITALIC = 1 << 0;
        const BOLD   = 1 << 1;
    }
}

bitflags! {
    /// `FT_LOAD_*` flags for `load_glyph` and `load_char`.
    ///
    /// Serialized as `"NO_BITMAP | NO_SCALE"` in human-readable formats.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct LoadFlags: i32 {
        const NO_SCALE                    = 1 << 0;
        const NO_HINTING                  = 1 << 1;
        const RENDER                      = 1 << 2;
        const NO_BITMAP                   = 1 << 3;
        const VERTICAL_LAYOUT             = 1 << 4;
        const FORCE_AUTOHINT              = 1 << 5;
        const CROP_BITMAP                 = 1 << 6;
        const PEDANTIC                    = 1 << 7;
        const IGNORE_GLOBAL_ADVANCE_WIDTH = 1 << 9;
        const NO_RECURSE                  = 1 << 10;
        const IGNORE_TRANSFORM            = 1 << 11;
        const MONOCHROME                  = 1 << 12;
        const LINEAR_DESIGN               = 1 << 13;
        const SBITS_ONLY                  = 1 << 14;
        const NO_AUTOHINT                 = 1 << 15;
        const COLOR                       = 1 << 20;
        const COMPUTE_METRICS             = 1 << 21;
        const BITMAP_METRICS_ONLY         = 1 << 22;
        const NO_SVG                      = 1 << 24;

        // Target mode bits (FT_LOAD_TARGET_*); see `LoadFlags::target`.
        const _ = 0xF << 16;
    }
}

impl LoadFlags {
    /// `FT_LOAD_DEFAULT`.
    pub const DEFAULT: LoadFlags = LoadFlags::empty();

    /// `FT_LOAD_TARGET_(mode)`: selects the hinting algorithm.
    pub const fn target(mode: RenderMode) -> LoadFlags {
        LoadFlags::from_bits_retain(((mode as i32) & 15) << 16)
    }

    /// Inverse of `target`.
    pub const fn target_mode_bits(self) -> u32 {
        ((self.bits() >> 16) & 15) as u32
    }
}

bitflags! {
    /// Outline point tags (`FT_CURVE_TAG_*`). A point with neither `ON`
    /// nor `CUBIC` is a conic (quadratic) control point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CurveTag: u8 {
        const ON    = 0x01;
        const CUBIC = 0x02;
        const HAS_SCANMODE = 0x04;
        const TOUCH_X = 0x08;
        const TOUCH_Y = 0x10;
    }
}

impl CurveTag {
    /// The tag bits that describe the curve itself.
    pub fn kind(self) -> PointKind {
        if self.contains(CurveTag::ON) {
            PointKind::On
        } else if self.contains(CurveTag::CUBIC) {
            PointKind::Cubic
        } else {
            PointKind::Conic
        }
    }
}

/// Classification of an outline point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    On,
    Conic,
    Cubic,
}

bitflags! {
    /// Embedding permissions from the OS/2 `fsType` field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FsTypeFlags: u16 {
        const RESTRICTED_LICENSE_EMBEDDING = 0x0002;
        const PREVIEW_AND_PRINT_EMBEDDING  = 0x0004;
        const EDITABLE_EMBEDDING           = 0x0008;
        const NO_SUBSETTING                = 0x0100;
        const BITMAP_EMBEDDING_ONLY        = 0x0200;
    }
}
