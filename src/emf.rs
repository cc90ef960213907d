//! EMF header parsing and record decoding.
//!
//! An EMF file is one `EMR_HEADER` record followed by a stream of 4-byte
//! aligned records, terminated by `EMR_EOF`. The header's optional
//! description string and extension blocks are located by offset/length
//! pairs that must stay inside the declared header size.

use tracing::debug;

use crate::bitmap::DIBitmap;
use crate::error::{MetafileError, MetafileResult};
use crate::gdi::{self, emf};
use crate::objects::{Brush, ColorRef, Font, Pen};
use crate::primitives::{Point, Rect, Size};
use crate::reader::ByteReader;
use crate::records::RecordOp;
use crate::region::Region;

/// The parsed `EMR_HEADER` record.
#[derive(Debug, Clone)]
pub struct EmfHeader {
    pub size: u32,
    pub bounds: Rect,
    pub frame: Rect,
    pub n_pal_entries: u32,
    pub ref_dev_cx: u32,
    pub ref_dev_cy: u32,
    pub ref_dev_cx_mm: u32,
    pub ref_dev_cy_mm: u32,
    pub description: String,
    /// Display size in micrometers, from the extension-2 block.
    pub display_dev_cx_um: u32,
    pub display_dev_cy_um: u32,
}

impl EmfHeader {
    /// Parses the header body. The caller has already consumed the record
    /// type and size; `header_size` is the declared record size.
    pub fn parse(reader: &mut ByteReader, header_size: u32) -> MetafileResult<Self> {
        let record_start = reader.pos() - 8;

        let bounds = Rect::parse_long(reader)?;
        let frame = Rect::parse_long(reader)?;
        if reader.read_u32()? != gdi::ENHMETA_SIGNATURE {
            return Err(MetafileError::InvalidHeader(
                "invalid header signature".to_string(),
            ));
        }
        reader.skip(4)?; // version
        reader.skip(4)?; // bytes
        reader.skip(4)?; // number of records
        reader.skip(2)?; // number of handles
        reader.skip(2)?; // reserved
        let description_len = reader.read_u32()?;
        let description_off = reader.read_u32()?;
        let n_pal_entries = reader.read_u32()?;
        let ref_dev_cx = reader.read_u32()?;
        let ref_dev_cy = reader.read_u32()?;
        let ref_dev_cx_mm = reader.read_u32()?;
        let ref_dev_cy_mm = reader.read_u32()?;

        let mut hdr_size = header_size;
        let description = if description_len > 0 {
            if description_off < 88 {
                return Err(MetafileError::InvalidHeader(
                    "invalid header description offset".to_string(),
                ));
            }
            hdr_size = description_off + description_len * 2;
            if hdr_size > header_size {
                return Err(MetafileError::InvalidHeader(
                    "invalid header description length".to_string(),
                ));
            }
            let prev = reader.pos();
            reader.seek(record_start + description_off as usize)?;
            let description = reader.read_fixed_size_unicode_string(description_len as usize)?;
            reader.seek(prev)?;
            description
        } else {
            String::new()
        };
        debug!("[emf] header size: {}", hdr_size);

        let mut header = Self {
            size: header_size,
            bounds,
            frame,
            n_pal_entries,
            ref_dev_cx,
            ref_dev_cy,
            ref_dev_cx_mm,
            ref_dev_cy_mm,
            description,
            display_dev_cx_um: 0,
            display_dev_cy_um: 0,
        };

        if (100..=108).contains(&hdr_size) {
            // EmfMetafileHeaderExtension1
            let pixel_format_size = reader.read_u32()?;
            let pixel_format_off = reader.read_u32()?;
            let have_open_gl = reader.read_u32()?;
            debug!(
                "[emf] pixelFormatSize: {} pixelFormatOff: {} openGL: 0x{:x}",
                pixel_format_size, pixel_format_off, have_open_gl
            );
            if pixel_format_off != 0 {
                if pixel_format_off < 100 || pixel_format_off < hdr_size {
                    return Err(MetafileError::InvalidHeader(
                        "invalid pixel format offset".to_string(),
                    ));
                }
                hdr_size = pixel_format_off + pixel_format_size;
                if hdr_size > header_size {
                    return Err(MetafileError::InvalidHeader(
                        "invalid pixel format size".to_string(),
                    ));
                }
            }
        }
        if hdr_size > 108 {
            // EmfMetafileHeaderExtension2
            header.display_dev_cx_um = reader.read_u32()?;
            header.display_dev_cy_um = reader.read_u32()?;
        }

        Ok(header)
    }
}

/// A fully decoded EMF file: header plus replayable operation stream.
#[derive(Debug)]
pub struct EmfFile {
    pub header: EmfHeader,
    pub records: Vec<RecordOp>,
}

impl EmfFile {
    /// Parses an EMF byte buffer. The first record must be an `EMR_HEADER`
    /// with a 4-byte aligned size; anything else is not an EMF file.
    pub fn parse(data: &[u8]) -> MetafileResult<Self> {
        let mut reader = ByteReader::new(data);
        let kind = reader.read_u32()?;
        if kind != emf::EMR_HEADER {
            return Err(MetafileError::FormatNotRecognized);
        }
        let size = reader.read_u32()?;
        if size % 4 != 0 {
            return Err(MetafileError::FormatNotRecognized);
        }
        let header = EmfHeader::parse(&mut reader, size)?;
        let records = decode_records(&mut reader, size as usize)?;
        Ok(Self { header, records })
    }
}

/// Walks the record stream starting at `first` until `EMR_EOF`.
fn decode_records(reader: &mut ByteReader, first: usize) -> MetafileResult<Vec<RecordOp>> {
    let mut records = Vec::new();
    let mut curpos = first;
    loop {
        if reader.seek(curpos).is_err() {
            return Err(MetafileError::UnterminatedStream);
        }
        let Ok(kind) = reader.read_u32() else {
            return Err(MetafileError::UnterminatedStream);
        };
        let Ok(size) = reader.read_u32() else {
            return Err(MetafileError::UnterminatedStream);
        };
        let size = size as usize;
        if size < 8 {
            return Err(MetafileError::InvalidRecord(
                "invalid record size".to_string(),
            ));
        }
        if kind == emf::EMR_EOF {
            return Ok(records);
        }
        if let Some(op) = decode_record(reader, kind, size, curpos)? {
            records.push(op);
        }
        // Advance by the declared size so unsupported records can never
        // desynchronize the stream.
        curpos += size;
    }
}

fn read_points_short(reader: &mut ByteReader, cnt: usize) -> MetafileResult<Vec<Point>> {
    let mut points = Vec::with_capacity(cnt);
    for _ in 0..cnt {
        points.push(Point::parse_short(reader)?);
    }
    Ok(points)
}

fn read_points_long(reader: &mut ByteReader, cnt: usize) -> MetafileResult<Vec<Point>> {
    let mut points = Vec::with_capacity(cnt);
    for _ in 0..cnt {
        points.push(Point::parse_long(reader)?);
    }
    Ok(points)
}

fn decode_record(
    reader: &mut ByteReader,
    kind: u32,
    size: usize,
    curpos: usize,
) -> MetafileResult<Option<RecordOp>> {
    let op = match kind {
        emf::EMR_SETMAPMODE => RecordOp::SetMapMode(reader.read_i32()? as u32),
        emf::EMR_SETWINDOWORGEX => {
            let x = reader.read_i32()?;
            let y = reader.read_i32()?;
            RecordOp::SetWindowOrg { x, y }
        }
        emf::EMR_SETWINDOWEXTEX => {
            let x = reader.read_u32()? as i32;
            let y = reader.read_u32()? as i32;
            RecordOp::SetWindowExt { x, y }
        }
        emf::EMR_SETVIEWPORTORGEX => {
            let x = reader.read_i32()?;
            let y = reader.read_i32()?;
            RecordOp::SetViewportOrg { x, y }
        }
        emf::EMR_SETVIEWPORTEXTEX => {
            let x = reader.read_u32()? as i32;
            let y = reader.read_u32()? as i32;
            RecordOp::SetViewportExt { x, y }
        }
        emf::EMR_SAVEDC => RecordOp::SaveDc,
        emf::EMR_RESTOREDC => RecordOp::RestoreDc(reader.read_i32()?),
        emf::EMR_SETBKMODE => RecordOp::SetBkMode(reader.read_u32()?),
        emf::EMR_SETBKCOLOR => RecordOp::SetBkColor(ColorRef::parse(reader)?),
        emf::EMR_SETTEXTCOLOR => RecordOp::SetTextColor(ColorRef::parse(reader)?),
        emf::EMR_CREATEBRUSHINDIRECT => {
            let index = reader.read_u32()?;
            let brush = Brush::parse_emf(reader)?;
            RecordOp::CreateBrush {
                index: Some(index),
                brush,
            }
        }
        emf::EMR_CREATEPEN => {
            let index = reader.read_u32()?;
            let mut pen = Pen::parse_emf(reader)?;
            // Zero-width pens exist on the wire but not in drawing tools.
            if pen.width.x == 0 {
                pen.width.x = 1;
            }
            RecordOp::CreatePen {
                index: Some(index),
                pen,
            }
        }
        emf::EMR_EXTCREATEPEN => {
            let index = reader.read_u32()?;
            let off_bmi = reader.read_u32()?;
            let cb_bmi = reader.read_u32()?;
            let off_bits = reader.read_u32()?;
            let cb_bits = reader.read_u32()?;
            let pattern = if cb_bmi > 0 {
                Some(DIBitmap::parse_ranges(
                    reader, curpos, off_bmi, cb_bmi, off_bits, cb_bits,
                )?)
            } else {
                None
            };
            let pen = Pen::parse_emf_ex(reader, pattern)?;
            RecordOp::CreatePen {
                index: Some(index),
                pen,
            }
        }
        emf::EMR_CREATEDIBPATTERNBRUSHPT => {
            let index = reader.read_u32()?;
            let usage = reader.read_u32()?;
            let off_bmi = reader.read_u32()?;
            let cb_bmi = reader.read_u32()?;
            let off_bits = reader.read_u32()?;
            let cb_bits = reader.read_u32()?;
            let dib = DIBitmap::parse_ranges(reader, curpos, off_bmi, cb_bmi, off_bits, cb_bits)?;
            RecordOp::CreateBrush {
                index: Some(index),
                brush: Brush::from_dib(usage, dib),
            }
        }
        emf::EMR_EXTCREATEFONTINDIRECTW => {
            let index = reader.read_u32()?;
            let datalength = size.saturating_sub(reader.pos() - curpos);
            let font = Font::parse_emf(reader, datalength)?;
            RecordOp::CreateFont {
                index: Some(index),
                font,
            }
        }
        emf::EMR_SELECTOBJECT => RecordOp::SelectObject {
            index: reader.read_u32()?,
            check: None,
        },
        emf::EMR_DELETEOBJECT => RecordOp::DeleteObject {
            index: reader.read_u32()?,
        },
        emf::EMR_RECTANGLE => RecordOp::Rectangle {
            rect: Rect::parse_long(reader)?,
            rx: 0,
            ry: 0,
        },
        emf::EMR_ROUNDRECT => {
            let rect = Rect::parse_long(reader)?;
            let corner = Size::parse(reader)?;
            RecordOp::Rectangle {
                rect,
                rx: corner.cx as i32,
                ry: corner.cy as i32,
            }
        }
        emf::EMR_ELLIPSE => RecordOp::Ellipse(Rect::parse_long(reader)?),
        emf::EMR_LINETO => {
            let x = reader.read_i32()?;
            let y = reader.read_i32()?;
            RecordOp::LineTo { x, y }
        }
        emf::EMR_MOVETOEX => {
            let x = reader.read_i32()?;
            let y = reader.read_i32()?;
            RecordOp::MoveTo { x, y }
        }
        emf::EMR_POLYGON | emf::EMR_POLYGON16 => {
            let is_small = kind == emf::EMR_POLYGON16;
            Rect::parse_long(reader)?; // bounds
            let cnt = reader.read_u32()? as usize;
            let points = if is_small {
                read_points_short(reader, cnt)?
            } else {
                read_points_long(reader, cnt)?
            };
            RecordOp::Polygon { points }
        }
        emf::EMR_POLYPOLYGON | emf::EMR_POLYPOLYGON16 => {
            let is_small = kind == emf::EMR_POLYPOLYGON16;
            Rect::parse_long(reader)?; // bounds
            let poly_cnt = reader.read_u32()? as usize;
            reader.skip(4)?; // total point count
            let mut counts = Vec::with_capacity(poly_cnt);
            for _ in 0..poly_cnt {
                counts.push(reader.read_u32()? as usize);
            }
            let mut polygons = Vec::with_capacity(poly_cnt);
            for &pt_cnt in &counts {
                polygons.push(if is_small {
                    read_points_short(reader, pt_cnt)?
                } else {
                    read_points_long(reader, pt_cnt)?
                });
            }
            RecordOp::PolyPolygon { polygons }
        }
        emf::EMR_SETPOLYFILLMODE => RecordOp::SetPolyFillMode(reader.read_u32()?),
        emf::EMR_POLYLINE | emf::EMR_POLYLINETO => {
            let to = kind == emf::EMR_POLYLINETO;
            Rect::parse_long(reader)?; // bounds
            let cnt = reader.read_u32()? as usize;
            let points = read_points_long(reader, cnt)?;
            RecordOp::Polyline { to, points }
        }
        emf::EMR_POLYLINE16 | emf::EMR_POLYLINETO16 => {
            let to = kind == emf::EMR_POLYLINETO16;
            Rect::parse_long(reader)?; // bounds
            let cnt = reader.read_u32()? as usize;
            let points = read_points_short(reader, cnt)?;
            RecordOp::Polyline { to, points }
        }
        emf::EMR_POLYBEZIER | emf::EMR_POLYBEZIERTO => {
            let to = kind == emf::EMR_POLYBEZIERTO;
            Rect::parse_long(reader)?; // bounds
            let cnt = reader.read_u32()? as usize;
            let points = read_points_long(reader, cnt)?;
            RecordOp::PolyBezier { to, points }
        }
        emf::EMR_POLYBEZIER16 | emf::EMR_POLYBEZIERTO16 => {
            let to = kind == emf::EMR_POLYBEZIERTO16;
            Rect::parse_long(reader)?; // bounds
            let cnt = reader.read_u32()? as usize;
            let points = read_points_short(reader, cnt)?;
            RecordOp::PolyBezier { to, points }
        }
        emf::EMR_SETTEXTALIGN => RecordOp::SetTextAlign(reader.read_u32()?),
        emf::EMR_SETSTRETCHBLTMODE => RecordOp::SetStretchBltMode(reader.read_u32()?),
        emf::EMR_SETBRUSHORGEX => RecordOp::SetBrushOrg(Point::parse_long(reader)?),
        emf::EMR_BEGINPATH => RecordOp::BeginPath,
        emf::EMR_ENDPATH => RecordOp::EndPath,
        emf::EMR_ABORTPATH => RecordOp::AbortPath,
        emf::EMR_CLOSEFIGURE => RecordOp::CloseFigure,
        emf::EMR_FILLPATH => {
            Rect::parse_long(reader)?; // bounds
            RecordOp::FillPath
        }
        emf::EMR_STROKEPATH => {
            Rect::parse_long(reader)?; // bounds
            RecordOp::StrokePath
        }
        emf::EMR_SELECTCLIPPATH => RecordOp::SelectClipPath(reader.read_u32()?),
        emf::EMR_EXCLUDECLIPRECT => RecordOp::ExcludeClipRect(Rect::parse_long(reader)?),
        emf::EMR_INTERSECTCLIPRECT => RecordOp::IntersectClipRect(Rect::parse_long(reader)?),
        emf::EMR_EXTSELECTCLIPRGN => {
            let rgn_data_size = reader.read_u32()?;
            let mode = reader.read_u32()?;
            let region = if rgn_data_size > 0 {
                Some(Region::parse_emf(reader)?)
            } else {
                None
            };
            RecordOp::SelectClipRgn { mode, region }
        }
        emf::EMR_OFFSETCLIPRGN => {
            let offset = Point::parse_long(reader)?;
            RecordOp::OffsetClipRgn {
                x: offset.x,
                y: offset.y,
            }
        }
        emf::EMR_SETMITERLIMIT => RecordOp::SetMiterLimit(reader.read_u32()?),
        emf::EMR_EXTTEXTOUTW => {
            Rect::parse_long(reader)?; // bounds
            reader.skip(4)?; // graphics mode
            reader.skip(8)?; // ex/ey scale
            let reference = Point::parse_long(reader)?;
            let chars = reader.read_u32()? as usize;
            let off_string = reader.read_u32()? as usize;
            reader.skip(4)?; // options
            let rect = Rect::parse_long(reader)?;
            let off_dx = reader.read_u32()? as usize;
            reader.seek(curpos + off_string)?;
            let text = reader.read_fixed_size_unicode_string(chars)?;
            let mut dx = Vec::new();
            if off_dx > 0 {
                reader.seek(curpos + off_dx)?;
                for _ in 0..chars {
                    dx.push(reader.read_i32()?);
                }
            }
            RecordOp::ExtTextOut {
                x: reference.x,
                y: reference.y,
                text,
                rect: Some(rect),
                dx,
            }
        }
        emf::EMR_STRETCHDIBITS => {
            Rect::parse_long(reader)?; // bounds
            let dst_x = reader.read_i32()?;
            let dst_y = reader.read_i32()?;
            let src_x = reader.read_i32()?;
            let src_y = reader.read_i32()?;
            let src_w = reader.read_i32()?;
            let src_h = reader.read_i32()?;
            let off_bmi = reader.read_u32()?;
            let cb_bmi = reader.read_u32()?;
            let off_bits = reader.read_u32()?;
            let cb_bits = reader.read_u32()?;
            reader.skip(4)?; // usage
            reader.skip(4)?; // raster operation
            let dst_w = reader.read_i32()?;
            let dst_h = reader.read_i32()?;
            let dib = DIBitmap::parse_ranges(reader, curpos, off_bmi, cb_bmi, off_bits, cb_bits)?;
            RecordOp::StretchDib {
                dst: Rect::new(dst_x, dst_y, dst_x + dst_w, dst_y + dst_h),
                src: Rect::new(src_x, src_y, src_x + src_w, src_y + src_h),
                dib,
            }
        }
        _ => {
            debug!(
                "[emf] {} record (0x{:x}) at offset 0x{:x} with {} bytes",
                emf::record_name(kind),
                kind,
                curpos,
                size
            );
            return Ok(None);
        }
    };
    Ok(Some(op))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u32(data: &mut Vec<u8>, v: u32) {
        data.extend_from_slice(&v.to_le_bytes());
    }

    fn push_i32(data: &mut Vec<u8>, v: i32) {
        data.extend_from_slice(&v.to_le_bytes());
    }

    /// A minimal 88-byte EMR_HEADER with the given bounds.
    pub fn header_bytes(bounds: [i32; 4]) -> Vec<u8> {
        let mut data = Vec::new();
        push_u32(&mut data, emf::EMR_HEADER);
        push_u32(&mut data, 88);
        for v in bounds {
            push_i32(&mut data, v);
        }
        for v in [0, 0, 2540, 1905] {
            push_i32(&mut data, v); // frame
        }
        push_u32(&mut data, gdi::ENHMETA_SIGNATURE);
        push_u32(&mut data, 0x0001_0000); // version
        push_u32(&mut data, 0); // bytes
        push_u32(&mut data, 0); // records
        data.extend_from_slice(&0u16.to_le_bytes()); // handles
        data.extend_from_slice(&0u16.to_le_bytes()); // reserved
        push_u32(&mut data, 0); // description length
        push_u32(&mut data, 0); // description offset
        push_u32(&mut data, 0); // palette entries
        push_u32(&mut data, 1024); // reference device px
        push_u32(&mut data, 768);
        push_u32(&mut data, 320); // reference device mm
        push_u32(&mut data, 240);
        data
    }

    fn eof_record(data: &mut Vec<u8>) {
        push_u32(data, emf::EMR_EOF);
        push_u32(data, 20);
        push_u32(data, 0); // palette entries
        push_u32(data, 16); // palette offset
        push_u32(data, 20); // size again
    }

    #[test]
    fn test_parse_minimal_file() {
        let mut data = header_bytes([0, 0, 100, 100]);
        eof_record(&mut data);
        let file = EmfFile::parse(&data).unwrap();
        assert_eq!(file.header.bounds, Rect::new(0, 0, 100, 100));
        assert_eq!(file.header.size, 88);
        assert!(file.records.is_empty());
    }

    #[test]
    fn test_reject_wrong_first_record() {
        let mut data = header_bytes([0, 0, 100, 100]);
        data[0] = 2;
        assert!(matches!(
            EmfFile::parse(&data),
            Err(MetafileError::FormatNotRecognized)
        ));
    }

    #[test]
    fn test_reject_unaligned_header_size() {
        let mut data = header_bytes([0, 0, 100, 100]);
        data[4] = 89;
        assert!(matches!(
            EmfFile::parse(&data),
            Err(MetafileError::FormatNotRecognized)
        ));
    }

    #[test]
    fn test_reject_bad_signature() {
        let mut data = header_bytes([0, 0, 100, 100]);
        data[40] = 0; // corrupt " EMF"
        assert!(matches!(
            EmfFile::parse(&data),
            Err(MetafileError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_description_offset_validation() {
        // Description length/offset occupy bytes 60..68 of the header.
        let mut data = header_bytes([0, 0, 100, 100]);
        data[60] = 4; // length = 4 code units
        data[64] = 80; // offset below the 88-byte fixed part
        assert!(matches!(
            EmfFile::parse(&data),
            Err(MetafileError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_description_length_validation() {
        let mut data = header_bytes([0, 0, 100, 100]);
        data[60] = 200; // 200 code units from offset 88 exceed the header
        data[64] = 88;
        assert!(matches!(
            EmfFile::parse(&data),
            Err(MetafileError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_description_string_is_read() {
        // Header grows to 100 bytes: 88 fixed + 12 bytes of description.
        let mut data = Vec::new();
        push_u32(&mut data, emf::EMR_HEADER);
        push_u32(&mut data, 100);
        data.extend_from_slice(&header_bytes([0, 0, 50, 50])[8..88]);
        // Patch size and description fields.
        data[4] = 100;
        data[60] = 5; // five code units: "demo\0"
        data[64] = 88;
        for ch in ['d', 'e', 'm', 'o', '\0'] {
            data.extend_from_slice(&(ch as u16).to_le_bytes());
        }
        data.extend_from_slice(&[0, 0]); // pad to the declared 100 bytes
        eof_record(&mut data);

        let file = EmfFile::parse(&data).unwrap();
        assert_eq!(file.header.description, "demo");
    }

    #[test]
    fn test_record_size_below_minimum_is_fatal() {
        let mut data = header_bytes([0, 0, 100, 100]);
        push_u32(&mut data, emf::EMR_SAVEDC);
        push_u32(&mut data, 4); // below the 8-byte minimum
        assert!(matches!(
            EmfFile::parse(&data),
            Err(MetafileError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_missing_eof_is_fatal() {
        let mut data = header_bytes([0, 0, 100, 100]);
        push_u32(&mut data, emf::EMR_SAVEDC);
        push_u32(&mut data, 8);
        assert!(matches!(
            EmfFile::parse(&data),
            Err(MetafileError::UnterminatedStream)
        ));
    }

    #[test]
    fn test_decode_rectangle_record() {
        let mut data = header_bytes([0, 0, 100, 100]);
        push_u32(&mut data, emf::EMR_RECTANGLE);
        push_u32(&mut data, 24);
        for v in [10, 10, 50, 50] {
            push_i32(&mut data, v);
        }
        eof_record(&mut data);

        let file = EmfFile::parse(&data).unwrap();
        assert_eq!(file.records.len(), 1);
        match &file.records[0] {
            RecordOp::Rectangle { rect, .. } => {
                assert_eq!(*rect, Rect::new(10, 10, 50, 50));
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_decode_polygon16_uses_short_points() {
        let mut data = header_bytes([0, 0, 100, 100]);
        push_u32(&mut data, emf::EMR_POLYGON16);
        push_u32(&mut data, 8 + 16 + 4 + 3 * 4);
        for v in [0, 0, 10, 10] {
            push_i32(&mut data, v);
        }
        push_u32(&mut data, 3);
        for v in [0i16, 0, 10, 0, 5, 10] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        eof_record(&mut data);

        let file = EmfFile::parse(&data).unwrap();
        match &file.records[0] {
            RecordOp::Polygon { points } => {
                assert_eq!(points.len(), 3);
                assert_eq!(points[2], Point::new(5, 10));
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_unknown_record_skipped_by_declared_size() {
        let mut data = header_bytes([0, 0, 100, 100]);
        // EMR_SETROP2 is recognized but not rendered.
        push_u32(&mut data, emf::EMR_SETROP2);
        push_u32(&mut data, 12);
        push_u32(&mut data, 13);
        push_u32(&mut data, emf::EMR_SETMAPMODE);
        push_u32(&mut data, 12);
        push_u32(&mut data, 8);
        eof_record(&mut data);

        let file = EmfFile::parse(&data).unwrap();
        assert_eq!(file.records.len(), 1);
        assert!(matches!(file.records[0], RecordOp::SetMapMode(8)));
    }

    #[test]
    fn test_create_pen_normalizes_zero_width() {
        let mut data = header_bytes([0, 0, 100, 100]);
        push_u32(&mut data, emf::EMR_CREATEPEN);
        push_u32(&mut data, 28);
        push_u32(&mut data, 1); // handle index
        push_u32(&mut data, 0); // PS_SOLID
        push_i32(&mut data, 0); // width.x = 0
        push_i32(&mut data, 0);
        push_u32(&mut data, 0x000000ff); // red
        eof_record(&mut data);

        let file = EmfFile::parse(&data).unwrap();
        match &file.records[0] {
            RecordOp::CreatePen { index, pen } => {
                assert_eq!(*index, Some(1));
                assert_eq!(pen.width.x, 1);
                assert_eq!(pen.color, ColorRef::new(0xff, 0, 0));
            }
            other => panic!("unexpected op {:?}", other),
        }
    }
}
