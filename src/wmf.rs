//! WMF header parsing and record decoding.
//!
//! A WMF file is an optional placeable preamble, a fixed 18-byte header, and
//! a stream of word-sized records. Record sizes are in 16-bit words; every
//! variable-length tail is measured against the record's own start offset.

use tracing::debug;

use crate::bitmap::{Bitmap16, DIBitmap};
use crate::error::{MetafileError, MetafileResult};
use crate::gdi::{self, metafile_type, metafile_version, wmf};
use crate::objects::{Brush, ColorRef, Font, ObjectKind, Palette, Pen};
use crate::primitives::{Point, Rect};
use crate::reader::ByteReader;
use crate::records::RecordOp;
use crate::region::Region;

/// The placeable preamble: bounding box in twips plus resolution.
#[derive(Debug, Clone)]
pub struct PlaceableHeader {
    pub bounds: Rect,
    pub units_per_inch: i32,
}

impl PlaceableHeader {
    fn parse(reader: &mut ByteReader) -> MetafileResult<Self> {
        reader.skip(2)?; // HWmf
        let bounds = Rect::parse_short(reader)?;
        let units_per_inch = reader.read_i16()? as i32;
        reader.skip(4)?; // reserved
        reader.skip(2)?; // checksum
        debug!(
            "[wmf] placeable bounding box {:?}, {} units/inch",
            bounds, units_per_inch
        );
        Ok(Self {
            bounds,
            units_per_inch,
        })
    }
}

/// A fully decoded WMF file: optional placeable header plus the replayable
/// operation stream.
#[derive(Debug)]
pub struct WmfFile {
    pub placeable: Option<PlaceableHeader>,
    pub records: Vec<RecordOp>,
}

impl WmfFile {
    /// Parses a WMF byte buffer, placeable or bare. The standard header's
    /// type, size and version are all validated; any mismatch means the
    /// input is not a WMF file.
    pub fn parse(data: &[u8]) -> MetafileResult<Self> {
        let mut reader = ByteReader::new(data);

        let key = reader.read_u32()?;
        let (placeable, header_start, mf_type, size_words) = if key == gdi::PLACEABLE_SIGNATURE {
            let placeable = PlaceableHeader::parse(&mut reader)?;
            let header_start = reader.pos();
            let mf_type = reader.read_u16()?;
            let size_words = reader.read_u16()?;
            (Some(placeable), header_start, mf_type, size_words)
        } else {
            // Bare form: the first dword packs (size << 16) | type.
            (
                None,
                0,
                (key & 0xffff) as u16,
                ((key >> 16) & 0xffff) as u16,
            )
        };

        if mf_type != metafile_type::MEMORYMETAFILE && mf_type != metafile_type::DISKMETAFILE {
            return Err(MetafileError::FormatNotRecognized);
        }
        if size_words as u32 != gdi::METAHEADER_SIZE / 2 {
            return Err(MetafileError::FormatNotRecognized);
        }
        let version = reader.read_u16()?;
        if version != metafile_version::METAVERSION100 && version != metafile_version::METAVERSION300
        {
            return Err(MetafileError::FormatNotRecognized);
        }

        let first = header_start + gdi::METAHEADER_SIZE as usize;
        let records = decode_records(&mut reader, first)?;
        Ok(Self { placeable, records })
    }
}

/// Walks the record stream starting at `first` until `META_EOF`.
fn decode_records(reader: &mut ByteReader, first: usize) -> MetafileResult<Vec<RecordOp>> {
    let mut records = Vec::new();
    let mut curpos = first;
    loop {
        if reader.seek(curpos).is_err() {
            return Err(MetafileError::UnterminatedStream);
        }
        let Ok(size) = reader.read_u32() else {
            return Err(MetafileError::UnterminatedStream);
        };
        let size = size as usize;
        if size < 3 {
            return Err(MetafileError::InvalidRecord(
                "invalid record size".to_string(),
            ));
        }
        let Ok(func) = reader.read_u16() else {
            return Err(MetafileError::UnterminatedStream);
        };
        if func == wmf::META_EOF {
            return Ok(records);
        }
        if let Some(op) = decode_record(reader, func, size, curpos)? {
            records.push(op);
        }
        // Unknown records never desynchronize the stream: the cursor is
        // advanced by the declared size, not by how much was decoded.
        curpos += size * 2;
    }
}

fn decode_record(
    reader: &mut ByteReader,
    func: u16,
    size: usize,
    curpos: usize,
) -> MetafileResult<Option<RecordOp>> {
    let op = match func {
        wmf::META_SETMAPMODE => RecordOp::SetMapMode(reader.read_u16()? as u32),
        wmf::META_SETWINDOWORG => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::SetWindowOrg { x, y }
        }
        wmf::META_SETWINDOWEXT => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::SetWindowExt { x, y }
        }
        wmf::META_OFFSETWINDOWORG => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::OffsetWindowOrg { x, y }
        }
        wmf::META_SETVIEWPORTORG => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::SetViewportOrg { x, y }
        }
        wmf::META_SETVIEWPORTEXT => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::SetViewportExt { x, y }
        }
        wmf::META_OFFSETVIEWPORTORG => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::OffsetViewportOrg { x, y }
        }
        wmf::META_SAVEDC => RecordOp::SaveDc,
        wmf::META_RESTOREDC => RecordOp::RestoreDc(reader.read_i16()? as i32),
        wmf::META_SETSTRETCHBLTMODE => RecordOp::SetStretchBltMode(reader.read_u16()? as u32),
        wmf::META_DIBBITBLT => {
            // A record exactly (func >> 8) + 3 words long carries no DIB.
            let have_src_dib = (func >> 8) as usize + 3 != size;
            let _raster_op = reader.read_u32()?;
            let _src_y = reader.read_i16()?;
            let _src_x = reader.read_i16()?;
            if !have_src_dib {
                reader.skip(2)?; // reserved
            }
            let height = reader.read_i16()? as i32;
            let width = reader.read_i16()? as i32;
            let dst_y = reader.read_i16()? as i32;
            let dst_x = reader.read_i16()? as i32;
            if !have_src_dib {
                return Ok(None);
            }
            let datalength = (size * 2).saturating_sub(reader.pos() - curpos);
            let dib = DIBitmap::parse(reader, datalength)?;
            RecordOp::DibBits {
                dst_x,
                dst_y,
                width,
                height,
                dib,
            }
        }
        wmf::META_DIBSTRETCHBLT => {
            let _raster_op = reader.read_u32()?;
            let src_h = reader.read_i16()? as i32;
            let src_w = reader.read_i16()? as i32;
            let src_y = reader.read_i16()? as i32;
            let src_x = reader.read_i16()? as i32;
            let dst_h = reader.read_i16()? as i32;
            let dst_w = reader.read_i16()? as i32;
            let dst_y = reader.read_i16()? as i32;
            let dst_x = reader.read_i16()? as i32;
            let datalength = (size * 2).saturating_sub(reader.pos() - curpos);
            let dib = DIBitmap::parse(reader, datalength)?;
            RecordOp::StretchDib {
                dst: Rect::new(dst_x, dst_y, dst_x + dst_w, dst_y + dst_h),
                src: Rect::new(src_x, src_y, src_x + src_w, src_y + src_h),
                dib,
            }
        }
        wmf::META_STRETCHDIB => {
            let _raster_op = reader.read_u32()?;
            let _color_usage = reader.read_i16()?;
            let src_h = reader.read_i16()? as i32;
            let src_w = reader.read_i16()? as i32;
            let src_y = reader.read_i16()? as i32;
            let src_x = reader.read_i16()? as i32;
            let dst_h = reader.read_i16()? as i32;
            let dst_w = reader.read_i16()? as i32;
            let dst_y = reader.read_i16()? as i32;
            let dst_x = reader.read_i16()? as i32;
            let datalength = (size * 2).saturating_sub(reader.pos() - curpos);
            let dib = DIBitmap::parse(reader, datalength)?;
            RecordOp::StretchDib {
                dst: Rect::new(dst_x, dst_y, dst_x + dst_w, dst_y + dst_h),
                src: Rect::new(src_x, src_y, src_x + src_w, src_y + src_h),
                dib,
            }
        }
        wmf::META_ESCAPE => {
            let escape_func = reader.read_u16()?;
            let count = reader.read_u16()?;
            RecordOp::Escape {
                func: escape_func,
                count,
            }
        }
        wmf::META_SETTEXTALIGN => RecordOp::SetTextAlign(reader.read_u16()? as u32),
        wmf::META_SETBKMODE => RecordOp::SetBkMode(reader.read_u16()? as u32),
        wmf::META_SETTEXTCOLOR => RecordOp::SetTextColor(ColorRef::parse(reader)?),
        wmf::META_SETBKCOLOR => RecordOp::SetBkColor(ColorRef::parse(reader)?),
        wmf::META_CREATEBRUSHINDIRECT => {
            let datalength = (size * 2).saturating_sub(reader.pos() - curpos);
            let brush = Brush::parse_wmf(reader, datalength, false)?;
            RecordOp::CreateBrush { index: None, brush }
        }
        wmf::META_DIBCREATEPATTERNBRUSH => {
            let datalength = (size * 2).saturating_sub(reader.pos() - curpos);
            let brush = Brush::parse_wmf(reader, datalength, true)?;
            RecordOp::CreateBrush { index: None, brush }
        }
        wmf::META_CREATEPENINDIRECT => RecordOp::CreatePen {
            index: None,
            pen: Pen::parse_wmf(reader)?,
        },
        wmf::META_CREATEFONTINDIRECT => {
            let datalength = (size * 2).saturating_sub(reader.pos() - curpos);
            let font = Font::parse_wmf(reader, datalength)?;
            RecordOp::CreateFont { index: None, font }
        }
        wmf::META_SELECTOBJECT => RecordOp::SelectObject {
            index: reader.read_u16()? as u32,
            check: None,
        },
        wmf::META_SELECTPALETTE => RecordOp::SelectObject {
            index: reader.read_u16()? as u32,
            check: Some(ObjectKind::Palette),
        },
        wmf::META_SELECTCLIPREGION => RecordOp::SelectObject {
            index: reader.read_u16()? as u32,
            check: Some(ObjectKind::Region),
        },
        wmf::META_DELETEOBJECT => RecordOp::DeleteObject {
            index: reader.read_u16()? as u32,
        },
        wmf::META_RECTANGLE => RecordOp::Rectangle {
            rect: Rect::parse_reversed_short(reader)?,
            rx: 0,
            ry: 0,
        },
        wmf::META_ROUNDRECT => {
            let ry = reader.read_i16()? as i32;
            let rx = reader.read_i16()? as i32;
            let rect = Rect::parse_reversed_short(reader)?;
            RecordOp::Rectangle { rect, rx, ry }
        }
        wmf::META_ELLIPSE => RecordOp::Ellipse(Rect::parse_reversed_short(reader)?),
        wmf::META_LINETO => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::LineTo { x, y }
        }
        wmf::META_MOVETO => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::MoveTo { x, y }
        }
        wmf::META_TEXTOUT => {
            let len = reader.read_i16()?;
            if len <= 0 {
                return Ok(None);
            }
            let text = reader.read_string(len as usize)?;
            reader.skip(len as usize % 2)?;
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::TextOut { x, y, text }
        }
        wmf::META_EXTTEXTOUT => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            let len = reader.read_i16()?;
            let _fw_opts = reader.read_u16()?;
            // The record size reveals which of the optional rectangle and
            // inter-character spacing array are present.
            let len_bytes = len.max(0) as usize;
            let padded = len_bytes + len_bytes % 2;
            let has_rect = size * 2 == 14 + 8 + padded || size * 2 == 14 + 8 + padded + len_bytes * 2;
            let rect = if has_rect {
                Some(Rect::parse_reversed_short(reader)?)
            } else {
                None
            };
            if len <= 0 {
                return Ok(None);
            }
            let text = reader.read_string(len_bytes)?;
            reader.skip(len_bytes % 2)?;
            let has_dx = size * 2 == 14 + padded + len_bytes * 2
                || size * 2 == 14 + 8 + padded + len_bytes * 2;
            let mut dx = Vec::new();
            if has_dx {
                for _ in 0..text.chars().count() {
                    dx.push(reader.read_i16()? as i32);
                }
            }
            RecordOp::ExtTextOut {
                x,
                y,
                text,
                rect,
                dx,
            }
        }
        wmf::META_EXCLUDECLIPRECT => {
            RecordOp::ExcludeClipRect(Rect::parse_reversed_short(reader)?)
        }
        wmf::META_INTERSECTCLIPRECT => {
            RecordOp::IntersectClipRect(Rect::parse_reversed_short(reader)?)
        }
        wmf::META_POLYGON => {
            let cnt = reader.read_i16()?.max(0) as usize;
            let mut points = Vec::with_capacity(cnt);
            for _ in 0..cnt {
                points.push(Point::parse_short(reader)?);
            }
            RecordOp::Polygon { points }
        }
        wmf::META_SETPOLYFILLMODE => RecordOp::SetPolyFillMode(reader.read_u16()? as u32),
        wmf::META_POLYPOLYGON => {
            let cnt = reader.read_u16()? as usize;
            let mut counts = Vec::with_capacity(cnt);
            for _ in 0..cnt {
                counts.push(reader.read_u16()? as usize);
            }
            let mut polygons = Vec::with_capacity(cnt);
            for &pt_cnt in &counts {
                let mut polygon = Vec::with_capacity(pt_cnt);
                for _ in 0..pt_cnt {
                    polygon.push(Point::parse_short(reader)?);
                }
                polygons.push(polygon);
            }
            RecordOp::PolyPolygon { polygons }
        }
        wmf::META_POLYLINE => {
            let cnt = reader.read_i16()?.max(0) as usize;
            let mut points = Vec::with_capacity(cnt);
            for _ in 0..cnt {
                points.push(Point::parse_short(reader)?);
            }
            RecordOp::Polyline { to: false, points }
        }
        wmf::META_CREATEPALETTE => RecordOp::CreatePalette(Palette::parse(reader)?),
        wmf::META_CREATEREGION => RecordOp::CreateRegion(Region::parse_wmf(reader)?),
        wmf::META_CREATEPATTERNBRUSH => {
            let datalength = (size * 2).saturating_sub(reader.pos() - curpos);
            let pattern = Bitmap16::parse_pattern(reader, datalength)?;
            RecordOp::CreateBrush {
                index: None,
                brush: Brush::from_pattern(pattern),
            }
        }
        wmf::META_OFFSETCLIPRGN => {
            let y = reader.read_i16()? as i32;
            let x = reader.read_i16()? as i32;
            RecordOp::OffsetClipRgn { x, y }
        }
        _ => {
            debug!(
                "[wmf] {} record (0x{:04x}) at offset 0x{:x} with {} bytes",
                wmf::record_name(func),
                func,
                curpos,
                size * 2
            );
            return Ok(None);
        }
    };
    Ok(Some(op))
}
