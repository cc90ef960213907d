//! End-to-end tests over synthetic metafile buffers.
//!
//! The helpers below emit well-formed EMF and WMF byte streams record by
//! record, so each test owns the exact binary input it asserts against.

use pretty_assertions::assert_eq;

use metasvg::error::MetafileError;
use metasvg::gdi::{emf, wmf, ENHMETA_SIGNATURE, PLACEABLE_SIGNATURE};
use metasvg::renderer::{convert, RenderSettings, Renderer};
use metasvg::{EmfFile, WmfFile};

// ============================================================================
// Buffer builders
// ============================================================================

fn push_u16(data: &mut Vec<u8>, v: u16) {
    data.extend_from_slice(&v.to_le_bytes());
}

fn push_i16(data: &mut Vec<u8>, v: i16) {
    data.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(data: &mut Vec<u8>, v: u32) {
    data.extend_from_slice(&v.to_le_bytes());
}

fn push_i32(data: &mut Vec<u8>, v: i32) {
    data.extend_from_slice(&v.to_le_bytes());
}

/// The 88-byte EMR_HEADER record with the given bounds rectangle.
fn emf_header(bounds: [i32; 4]) -> Vec<u8> {
    let mut data = Vec::new();
    push_u32(&mut data, emf::EMR_HEADER);
    push_u32(&mut data, 88);
    for v in bounds {
        push_i32(&mut data, v);
    }
    for v in [0, 0, 2646, 2646] {
        push_i32(&mut data, v); // frame in 0.01mm
    }
    push_u32(&mut data, ENHMETA_SIGNATURE);
    push_u32(&mut data, 0x0001_0000); // version
    push_u32(&mut data, 0); // file size
    push_u32(&mut data, 0); // record count
    push_u16(&mut data, 0); // handle count
    push_u16(&mut data, 0); // reserved
    push_u32(&mut data, 0); // description length
    push_u32(&mut data, 0); // description offset
    push_u32(&mut data, 0); // palette entries
    push_u32(&mut data, 1024);
    push_u32(&mut data, 768);
    push_u32(&mut data, 320);
    push_u32(&mut data, 240);
    data
}

fn emf_eof(data: &mut Vec<u8>) {
    push_u32(data, emf::EMR_EOF);
    push_u32(data, 20);
    push_u32(data, 0);
    push_u32(data, 16);
    push_u32(data, 20);
}

fn emf_rectangle(data: &mut Vec<u8>, rect: [i32; 4]) {
    push_u32(data, emf::EMR_RECTANGLE);
    push_u32(data, 24);
    for v in rect {
        push_i32(data, v);
    }
}

/// Identity render settings: equal extents, no millimeter rescale.
fn identity_settings() -> RenderSettings {
    RenderSettings::new()
        .with_extents(100, 100, 100, 100)
        .with_end_scale(1.0)
}

/// An 18-byte bare WMF header.
fn wmf_header(data: &mut Vec<u8>) {
    push_u16(data, 1); // MEMORYMETAFILE
    push_u16(data, 9); // header size in words
    push_u16(data, 0x0300); // version
    push_u32(data, 0); // file size
    push_u16(data, 0); // object count
    push_u32(data, 0); // max record size
    push_u16(data, 0); // member count
}

fn wmf_record(data: &mut Vec<u8>, func: u16, payload_words: &[i16]) {
    push_u32(data, 3 + payload_words.len() as u32);
    push_u16(data, func);
    for &word in payload_words {
        push_i16(data, word);
    }
}

fn wmf_eof(data: &mut Vec<u8>) {
    push_u32(data, 3);
    push_u16(data, wmf::META_EOF);
}

// ============================================================================
// EMF end-to-end
// ============================================================================

#[test]
fn test_minimal_emf_renders_empty_document() {
    let mut data = emf_header([0, 0, 100, 100]);
    emf_eof(&mut data);

    let result = convert(&data, Some(identity_settings())).unwrap();
    assert_eq!(result.return_value, 0);
    assert_eq!(result.width, Some(100));
    assert_eq!(result.height, Some(100));

    let svg = &result.svg;
    assert!(svg.starts_with("<?xml version='1.0' encoding='UTF-8' standalone='yes'?>\n"));
    assert!(svg.contains("viewBox=\"0 0 100 100\""));
    // No drawing elements at all.
    assert!(!svg.contains("<rect"));
    assert!(!svg.contains("<path"));
    assert!(!svg.contains("<polygon"));
    assert!(!svg.contains("<polyline"));
    assert!(!svg.contains("<text"));
    // The outer wrapper is stripped; the first tag is the coordinate group.
    let body = svg.trim_start_matches("<?xml version='1.0' encoding='UTF-8' standalone='yes'?>\n");
    assert!(body.starts_with("<svg"));
}

#[test]
fn test_emf_default_settings_derive_from_bounds() {
    let mut data = emf_header([0, 0, 100, 100]);
    emf_eof(&mut data);

    let renderer = Renderer::new(&data).unwrap();
    let settings = renderer.default_settings();
    assert_eq!(settings.w_ext, 100);
    assert_eq!(settings.h_ext, 100);
    assert_eq!(settings.x_ext, 100);
    assert_eq!(settings.y_ext, 100);
    assert_eq!(settings.map_mode, 8);
    assert_eq!(settings.end_scale, 0.1);
}

#[test]
fn test_emf_single_rectangle_identity_transform() {
    let mut data = emf_header([0, 0, 100, 100]);
    emf_rectangle(&mut data, [10, 10, 50, 50]);
    emf_eof(&mut data);

    let result = convert(&data, Some(identity_settings())).unwrap();
    assert_eq!(result.return_value, 0);

    let svg = &result.svg;
    assert_eq!(svg.matches("<rect").count(), 1);
    assert!(svg.contains("x=\"10\""));
    assert!(svg.contains("y=\"10\""));
    assert!(svg.contains("width=\"40\""));
    assert!(svg.contains("height=\"40\""));
    // Default EMF pen and brush: black stroke, black fill.
    assert!(svg.contains("stroke=\"#000000\""));
    assert!(svg.contains("fill=\"#000000\""));
}

#[test]
fn test_emf_end_scale_rescales_viewbox_and_paths() {
    let mut data = emf_header([0, 0, 100, 100]);
    // A stroked path: begin, move, line, end, stroke.
    push_u32(&mut data, emf::EMR_BEGINPATH);
    push_u32(&mut data, 8);
    push_u32(&mut data, emf::EMR_MOVETOEX);
    push_u32(&mut data, 16);
    push_i32(&mut data, 10);
    push_i32(&mut data, 10);
    push_u32(&mut data, emf::EMR_LINETO);
    push_u32(&mut data, 16);
    push_i32(&mut data, 90);
    push_i32(&mut data, 10);
    push_u32(&mut data, emf::EMR_ENDPATH);
    push_u32(&mut data, 8);
    push_u32(&mut data, emf::EMR_STROKEPATH);
    push_u32(&mut data, 24);
    for v in [0, 0, 100, 100] {
        push_i32(&mut data, v);
    }
    emf_eof(&mut data);

    let settings = RenderSettings::new()
        .with_extents(100, 100, 100, 100)
        .with_end_scale(0.1);
    let result = convert(&data, Some(settings)).unwrap();
    let svg = &result.svg;

    assert!(svg.contains("viewBox=\"0 0 10 10\""));
    assert!(svg.contains("width=\"10mm\""));
    assert!(svg.contains("height=\"10mm\""));
    assert!(svg.contains("preserveAspectRatio=\"xMidYMid meet\""));
    // Path coordinates are rescaled with two decimals.
    assert!(svg.contains("M 1.00 1.00"));
    assert!(svg.contains("L 9.00 1.00"));
    assert!(svg.contains("fill=\"none\""));
}

#[test]
fn test_emf_handle_lifecycle_end_to_end() {
    let mut data = emf_header([0, 0, 100, 100]);
    // Create a wide red pen at handle 1 and select it.
    push_u32(&mut data, emf::EMR_CREATEPEN);
    push_u32(&mut data, 28);
    push_u32(&mut data, 1);
    push_u32(&mut data, 0); // PS_SOLID
    push_i32(&mut data, 5);
    push_i32(&mut data, 0);
    push_u32(&mut data, 0x0000_00ff); // red
    push_u32(&mut data, emf::EMR_SELECTOBJECT);
    push_u32(&mut data, 12);
    push_u32(&mut data, 1);
    // Delete it twice; the second delete is a no-op.
    for _ in 0..2 {
        push_u32(&mut data, emf::EMR_DELETEOBJECT);
        push_u32(&mut data, 12);
        push_u32(&mut data, 1);
    }
    emf_rectangle(&mut data, [0, 0, 10, 10]);
    emf_eof(&mut data);

    let result = convert(&data, Some(identity_settings())).unwrap();
    assert_eq!(result.return_value, 0);
    // The rectangle strokes with the default pen, not the deleted red one.
    assert!(result.svg.contains("stroke=\"#000000\""));
    assert!(result.svg.contains("stroke-width=\"1\""));
    assert!(!result.svg.contains("#ff0000"));
}

#[test]
fn test_emf_clip_rect_produces_clip_path() {
    let mut data = emf_header([0, 0, 100, 100]);
    push_u32(&mut data, emf::EMR_INTERSECTCLIPRECT);
    push_u32(&mut data, 24);
    for v in [20, 20, 80, 80] {
        push_i32(&mut data, v);
    }
    emf_rectangle(&mut data, [0, 0, 100, 100]);
    emf_eof(&mut data);

    let result = convert(&data, Some(identity_settings())).unwrap();
    let svg = &result.svg;
    assert!(svg.contains("<clipPath"));
    assert!(svg.contains("clipPathUnits=\"userSpaceOnUse\""));
    assert!(svg.contains("clip-path=\"url(#c0)\""));
}

#[test]
fn test_emf_save_restore_with_transform_change() {
    let mut data = emf_header([0, 0, 100, 100]);
    push_u32(&mut data, emf::EMR_SAVEDC);
    push_u32(&mut data, 8);
    push_u32(&mut data, emf::EMR_SETWINDOWORGEX);
    push_u32(&mut data, 16);
    push_i32(&mut data, 50);
    push_i32(&mut data, 50);
    emf_rectangle(&mut data, [50, 50, 60, 60]);
    push_u32(&mut data, emf::EMR_RESTOREDC);
    push_u32(&mut data, 12);
    push_i32(&mut data, -1);
    emf_rectangle(&mut data, [50, 50, 60, 60]);
    emf_eof(&mut data);

    let result = convert(&data, Some(identity_settings())).unwrap();
    let svg = &result.svg;
    // Same logical rect, two transforms: once at the shifted origin, once
    // at the restored identity origin.
    assert!(svg.contains("x=\"0\""));
    assert!(svg.contains("x=\"50\""));
    assert_eq!(svg.matches("<rect").count(), 2);
}

#[test]
fn test_emf_restore_dc_with_unsupported_argument_fails() {
    let mut data = emf_header([0, 0, 100, 100]);
    push_u32(&mut data, emf::EMR_SAVEDC);
    push_u32(&mut data, 8);
    push_u32(&mut data, emf::EMR_RESTOREDC);
    push_u32(&mut data, 12);
    push_i32(&mut data, -2); // relative restore is unimplemented
    emf_eof(&mut data);

    // Decoding is fine; replay fails, mapping to the -1 envelope.
    assert!(EmfFile::parse(&data).is_ok());
    let result = convert(&data, Some(identity_settings())).unwrap();
    assert_eq!(result.return_value, -1);
    assert_eq!(result.svg, "");
}

// ============================================================================
// EMF structural validation
// ============================================================================

#[test]
fn test_emf_bad_magic_raises() {
    let mut data = emf_header([0, 0, 100, 100]);
    data[0] = 7; // not EMR_HEADER, not a WMF type either
    emf_eof(&mut data);
    assert!(matches!(
        convert(&data, None),
        Err(MetafileError::FormatNotRecognized)
    ));
}

#[test]
fn test_emf_unaligned_header_size_is_rejected() {
    let mut data = emf_header([0, 0, 100, 100]);
    data[4] = 90; // not a multiple of 4
    emf_eof(&mut data);
    assert!(matches!(
        EmfFile::parse(&data),
        Err(MetafileError::FormatNotRecognized)
    ));
    // Still recognized as EMF input, so convert maps it to the envelope.
    let result = convert(&data, None).unwrap();
    assert_eq!(result.return_value, -1);
    assert!(result.svg.is_empty());
}

#[test]
fn test_emf_description_offset_out_of_range_raises() {
    let mut data = emf_header([0, 0, 100, 100]);
    data[60] = 4; // description length
    data[64] = 80; // offset below the fixed 88-byte part
    emf_eof(&mut data);
    assert!(matches!(
        EmfFile::parse(&data),
        Err(MetafileError::InvalidHeader(_))
    ));
}

#[test]
fn test_emf_truncated_stream_raises() {
    let data = emf_header([0, 0, 100, 100]);
    // No records, no EOF.
    assert!(matches!(
        EmfFile::parse(&data),
        Err(MetafileError::UnterminatedStream)
    ));
}

// ============================================================================
// WMF end-to-end
// ============================================================================

/// A placeable WMF drawing one rectangle under an identity transform.
fn placeable_wmf_with_rect() -> Vec<u8> {
    let mut data = Vec::new();
    push_u32(&mut data, PLACEABLE_SIGNATURE);
    push_u16(&mut data, 0); // HWmf
    for v in [0i16, 0, 100, 100] {
        push_i16(&mut data, v);
    }
    push_u16(&mut data, 96); // units per inch
    push_u32(&mut data, 0); // reserved
    push_u16(&mut data, 0); // checksum
    wmf_header(&mut data);
    wmf_record(&mut data, wmf::META_SETWINDOWORG, &[0, 0]); // y, x
    wmf_record(&mut data, wmf::META_SETWINDOWEXT, &[100, 100]);
    // META_RECTANGLE payload order is bottom, right, top, left.
    wmf_record(&mut data, wmf::META_RECTANGLE, &[50, 50, 10, 10]);
    wmf_eof(&mut data);
    data
}

#[test]
fn test_wmf_placeable_rectangle_end_to_end() {
    let data = placeable_wmf_with_rect();
    let settings = RenderSettings::new()
        .with_size("100", "100")
        .with_extents(0, 0, 100, 100);
    let result = convert(&data, Some(settings)).unwrap();
    assert_eq!(result.return_value, 0);
    // WMF conversions report no physical size.
    assert_eq!(result.width, None);

    let svg = &result.svg;
    assert!(svg.starts_with("<?xml version='1.0' encoding='UTF-8' standalone='yes'?>\n"));
    assert_eq!(svg.matches("<rect").count(), 1);
    assert!(svg.contains("x=\"10\""));
    assert!(svg.contains("width=\"40\""));
    // The WMF default brush paints nothing.
    assert!(svg.contains("fill=\"none\""));
    assert!(svg.contains("stroke=\"#000000\""));
}

#[test]
fn test_wmf_placeable_default_settings() {
    let data = placeable_wmf_with_rect();
    let renderer = Renderer::new(&data).unwrap();
    let settings = renderer.default_settings();
    assert_eq!(settings.x_ext, 100);
    // The placeable y extent is top minus bottom.
    assert_eq!(settings.y_ext, -100);
    assert_eq!(settings.map_mode, 8);
}

#[test]
fn test_wmf_text_with_opaque_background() {
    let mut data = Vec::new();
    wmf_header(&mut data);
    wmf_record(&mut data, wmf::META_SETWINDOWORG, &[0, 0]);
    wmf_record(&mut data, wmf::META_SETWINDOWEXT, &[100, 100]);
    wmf_record(&mut data, wmf::META_SETBKCOLOR, &[0x00ff, 0x0000]); // red
    // META_TEXTOUT: length, chars, y, x.
    push_u32(&mut data, 8);
    push_u16(&mut data, wmf::META_TEXTOUT);
    push_i16(&mut data, 3);
    data.extend_from_slice(b"Hi!\0");
    push_i16(&mut data, 40); // y
    push_i16(&mut data, 20); // x
    wmf_eof(&mut data);

    let settings = RenderSettings::new()
        .with_size("100", "100")
        .with_extents(0, 0, 100, 100);
    let result = convert(&data, Some(settings)).unwrap();
    let svg = &result.svg;

    assert!(svg.contains("<text"));
    assert!(svg.contains("Hi!"));
    assert!(svg.contains("font-family=\"Helvetica\""));
    // Default background mode is opaque: a flood/composite filter is
    // synthesized once and referenced by the text element.
    assert!(svg.contains("<filter"));
    assert!(svg.contains("flood-color=\"#ff0000\""));
    assert!(svg.contains("in2=\"SourceGraphic\""));
    assert!(svg.contains("filter=\"url(#"));
}

#[test]
fn test_wmf_polyline_and_pen_style() {
    let mut data = Vec::new();
    wmf_header(&mut data);
    wmf_record(&mut data, wmf::META_SETWINDOWORG, &[0, 0]);
    wmf_record(&mut data, wmf::META_SETWINDOWEXT, &[100, 100]);
    // Dashed green pen: style PS_DASH, width (2, 2), color.
    push_u32(&mut data, 8);
    push_u16(&mut data, wmf::META_CREATEPENINDIRECT);
    push_u16(&mut data, 1); // PS_DASH
    push_i16(&mut data, 2);
    push_i16(&mut data, 2);
    data.extend_from_slice(&[0x00, 0xff, 0x00, 0x00]); // green
    wmf_record(&mut data, wmf::META_SELECTOBJECT, &[0]);
    wmf_record(&mut data, wmf::META_POLYLINE, &[3, 0, 0, 50, 50, 100, 0]);
    wmf_eof(&mut data);

    let settings = RenderSettings::new()
        .with_size("100", "100")
        .with_extents(0, 0, 100, 100);
    let result = convert(&data, Some(settings)).unwrap();
    let svg = &result.svg;

    assert!(svg.contains("<polyline"));
    assert!(svg.contains("points=\"0,0 50,50 100,0\""));
    assert!(svg.contains("stroke=\"#00ff00\""));
    assert!(svg.contains("fill=\"none\""));
    // Dash pattern is width-proportional: dash 4*w, gap 2*w.
    assert!(svg.contains("stroke-dasharray=\"8,4\""));
}

#[test]
fn test_wmf_clip_exclusion_splits_into_scanline_rects() {
    let mut data = Vec::new();
    wmf_header(&mut data);
    wmf_record(&mut data, wmf::META_SETWINDOWORG, &[0, 0]);
    wmf_record(&mut data, wmf::META_SETWINDOWEXT, &[100, 100]);
    // Punch a hole in the middle of the window clip.
    // Clip rect payload order is bottom, right, top, left.
    wmf_record(&mut data, wmf::META_EXCLUDECLIPRECT, &[60, 60, 40, 40]);
    wmf_record(&mut data, wmf::META_RECTANGLE, &[100, 100, 0, 0]);
    wmf_eof(&mut data);

    let settings = RenderSettings::new()
        .with_size("100", "100")
        .with_extents(0, 0, 100, 100);
    let result = convert(&data, Some(settings)).unwrap();
    let svg = &result.svg;

    assert!(svg.contains("<clipPath"));
    // Three bands: above the hole, left+right of it, below it.
    let clip_start = svg.find("<clipPath").unwrap();
    let clip_end = svg.find("</clipPath>").unwrap();
    let clip_markup = &svg[clip_start..clip_end];
    assert_eq!(clip_markup.matches("<rect").count(), 4);
}

// ============================================================================
// WMF structural validation
// ============================================================================

#[test]
fn test_wmf_bad_version_is_not_recognized() {
    let mut data = Vec::new();
    wmf_header(&mut data);
    data[4] = 0x42; // corrupt the version word
    wmf_eof(&mut data);
    assert!(matches!(
        WmfFile::parse(&data),
        Err(MetafileError::FormatNotRecognized)
    ));
}

#[test]
fn test_wmf_stream_without_eof_raises() {
    let mut data = Vec::new();
    wmf_header(&mut data);
    wmf_record(&mut data, wmf::META_SAVEDC, &[]);
    assert!(matches!(
        WmfFile::parse(&data),
        Err(MetafileError::UnterminatedStream)
    ));
}

#[test]
fn test_empty_input_is_not_recognized() {
    assert!(matches!(
        convert(&[], None),
        Err(MetafileError::FormatNotRecognized)
    ));
}
