// src/report.rs

//! Builds the face summary printed by `ftinfo`.
//!
//! `collect` walks a face the way the FreeType tutorial does: basic face
//! fields, the charmap list, selecting the Unicode charmap, setting a
//! character size and dumping the outline of one probe glyph. Steps after
//! opening the face are allowed to fail; each failure becomes a warning in
//! the report instead of aborting it.

use crate::config::ReportConfig;
use crate::error::Error;
use crate::face::Face;
use crate::glyph::Outline;
use crate::library::Version;
use crate::types::{Encoding, PointKind, Pos, TagDisplay, UInt, ULong};
use log::{debug, warn};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceReport {
    pub path: String,
    pub freetype_version: Version,
    pub family: Option<String>,
    pub style: Option<String>,
    pub num_fixed_sizes: i32,
    pub num_charmaps: i32,
    pub scalable: bool,
    pub num_glyphs: i64,
    pub units_per_em: u16,
    /// Four-character encoding tag of each charmap.
    pub charmaps: Vec<String>,
    /// Index of the Unicode charmap, once selected.
    pub unicode_charmap: Option<i32>,
    pub glyph: Option<GlyphReport>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlyphReport {
    pub char: char,
    pub glyph_index: UInt,
    pub format: String,
    pub contours: Vec<Vec<PointReport>>,
}

impl GlyphReport {
    pub fn n_points(&self) -> usize {
        self.contours.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointReport {
    pub x: Pos,
    pub y: Pos,
    pub kind: PointKind,
}

impl PointReport {
    fn from_outline(outline: &Outline) -> Vec<Vec<PointReport>> {
        outline
            .contours()
            .map(|contour| {
                contour
                    .iter()
                    .map(|p| PointReport {
                        x: p.pos.x,
                        y: p.pos.y,
                        kind: p.tag.kind(),
                    })
                    .collect()
            })
            .collect()
    }
}

fn note(warnings: &mut Vec<String>, what: &str, err: Error) {
    warn!("{}: {}", what, err);
    warnings.push(format!("{}: {}", what, err));
}

pub fn collect(face: &Face, path: &str, config: &ReportConfig) -> FaceReport {
    let mut warnings = Vec::new();

    let charmaps = face
        .charmaps()
        .iter()
        .map(|cm| TagDisplay(cm.encoding_tag()).to_string())
        .collect();

    let unicode_charmap = match face.select_charmap(Encoding::Unicode) {
        Ok(()) => face.charmap().map(|cm| cm.index()),
        Err(err) => {
            note(&mut warnings, "Failed to select unicode charmap", err);
            None
        }
    };

    if let Err(err) = face.set_char_size(
        config.char_width,
        config.char_height,
        config.horizontal_dpi,
        config.vertical_dpi,
    ) {
        note(&mut warnings, "Failed to set the font size", err);
    }

    let code = ULong::from(u32::from(config.probe_char));
    let glyph_index = face.char_index(code);
    debug!("'{}' maps to glyph {}", config.probe_char, glyph_index);

    let glyph = match face.load_char(code, config.load_flags) {
        Ok(()) => face.glyph().map(|slot| GlyphReport {
            char: config.probe_char,
            glyph_index,
            format: TagDisplay(slot.format_tag()).to_string(),
            contours: PointReport::from_outline(&slot.outline()),
        }),
        Err(err) => {
            let what = format!("Failed to select character '{}'", config.probe_char);
            note(&mut warnings, &what, err);
            None
        }
    };

    FaceReport {
        path: path.to_owned(),
        freetype_version: face.library().version(),
        family: face.family_name(),
        style: face.style_name(),
        num_fixed_sizes: face.num_fixed_sizes(),
        num_charmaps: face.num_charmaps(),
        scalable: face.is_scalable(),
        num_glyphs: face.num_glyphs() as i64,
        units_per_em: face.units_per_em(),
        charmaps,
        unicode_charmap,
        glyph,
        warnings,
    }
}

fn kind_label(kind: PointKind) -> (&'static str, &'static str) {
    match kind {
        PointKind::On => ("on", ""),
        PointKind::Conic => ("off", "quadratic"),
        PointKind::Cubic => ("off", "cubic"),
    }
}

impl FaceReport {
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Some info about the font:")?;
        writeln!(out, "      filepath: {}", self.path)?;
        writeln!(out, "      freetype: {}", self.freetype_version)?;
        writeln!(out, "        family: {}", self.family.as_deref().unwrap_or(""))?;
        writeln!(out, "         style: {}", self.style.as_deref().unwrap_or(""))?;
        writeln!(out, "  n fixed size: {}", self.num_fixed_sizes)?;
        writeln!(out, "    n charmaps: {}", self.num_charmaps)?;
        writeln!(out, "      scalable: {}", if self.scalable { "yes" } else { "no" })?;
        writeln!(out, "      n glyphs: {}", self.num_glyphs)?;
        writeln!(out, "  units per EM: {}", self.units_per_em)?;
        write!(out, "      charmaps:")?;
        for tag in &self.charmaps {
            write!(out, "\n                {}", tag)?;
        }
        writeln!(out, "\n")?;

        if let Some(index) = self.unicode_charmap {
            writeln!(out, "Set charmap to index: {}", index)?;
        }

        if let Some(glyph) = &self.glyph {
            writeln!(out, "for char {} :", glyph.char)?;
            writeln!(out, "    ascii: {}", u32::from(glyph.char))?;
            writeln!(out, "    index: {}", glyph.glyph_index)?;
            writeln!(out, "   format: {}", glyph.format)?;
            writeln!(out, " contours: {}", glyph.contours.len())?;
            writeln!(out, "   points: {}", glyph.n_points())?;
            for (i, contour) in glyph.contours.iter().enumerate() {
                writeln!(out, "\nContour: {}", i)?;
                for p in contour {
                    let (on, curve) = kind_label(p.kind);
                    writeln!(out, "   ({},{})  {:<3}  {}", p.x, p.y, on, curve)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;
    use std::path::Path;
    use test_log::test;

    fn sample() -> FaceReport {
        FaceReport {
            path: "/fonts/Sample.ttf".into(),
            freetype_version: Version {
                major: 2,
                minor: 13,
                patch: 2,
            },
            family: Some("Sample".into()),
            style: Some("Book".into()),
            num_fixed_sizes: 0,
            num_charmaps: 2,
            scalable: true,
            num_glyphs: 42,
            units_per_em: 2048,
            charmaps: vec!["unic".into(), "armn".into()],
            unicode_charmap: Some(0),
            glyph: Some(GlyphReport {
                char: 'A',
                glyph_index: 36,
                format: "outl".into(),
                contours: vec![
                    vec![
                        PointReport { x: 0, y: 0, kind: PointKind::On },
                        PointReport { x: 5, y: 9, kind: PointKind::Conic },
                    ],
                    vec![PointReport { x: 3, y: 3, kind: PointKind::Cubic }],
                ],
            }),
            warnings: Vec::new(),
        }
    }

    fn render(report: &FaceReport) -> String {
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_lists_face_fields_and_charmaps() {
        let text = render(&sample());
        assert!(text.contains("      filepath: /fonts/Sample.ttf\n"));
        assert!(text.contains("      scalable: yes\n"));
        assert!(text.contains("  units per EM: 2048\n"));
        assert!(text.contains("      charmaps:\n                unic\n                armn\n"));
        assert!(text.contains("Set charmap to index: 0\n"));
    }

    #[test]
    fn text_dumps_every_contour_point() {
        let text = render(&sample());
        assert!(text.contains("    ascii: 65\n"));
        assert!(text.contains(" contours: 2\n"));
        assert!(text.contains("   points: 3\n"));
        assert!(text.contains("Contour: 1\n"));
        assert!(text.contains("   (0,0)  on   \n"));
        assert!(text.contains("   (5,9)  off  quadratic\n"));
        assert!(text.contains("   (3,3)  off  cubic\n"));
    }

    #[test]
    fn text_without_glyph_stops_after_charmaps() {
        let mut report = sample();
        report.glyph = None;
        report.unicode_charmap = None;
        let text = render(&report);
        assert!(!text.contains("Set charmap"));
        assert!(!text.contains("for char"));
    }

    #[test]
    fn json_names_point_kinds() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["glyph"]["contours"][0][1]["kind"], "conic");
        assert_eq!(json["freetype_version"]["major"], 2);
    }

    #[test]
    fn collect_from_system_font() {
        let path = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
        ]
        .into_iter()
        .map(Path::new)
        .find(|p| p.is_file());
        let Some(path) = path else { return };

        let library = Library::init().unwrap();
        let face = library.new_face(path, 0).unwrap();
        let report = collect(&face, "font", &ReportConfig::default());

        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.charmaps.iter().any(|t| t == "unic"));
        assert!(report.unicode_charmap.is_some());
        let glyph = report.glyph.unwrap();
        assert_eq!(glyph.format, "outl");
        assert!(glyph.glyph_index > 0);
        assert!(!glyph.contours.is_empty());
    }
}
