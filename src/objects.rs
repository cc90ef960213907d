//! Graphics objects: colors, pens, brushes, fonts, palettes.
//!
//! Objects live in the device context's handle table behind `Rc`, because
//! GDI semantics are reference semantics: selecting an object shares it,
//! deleting it must replace that exact object wherever it is still selected,
//! and pattern/clip-path definitions are cached per object identity.

use std::fmt;
use std::rc::Rc;

use crate::bitmap::{Bitmap16, DIBitmap};
use crate::error::MetafileResult;
use crate::gdi::{brush_style, pen_style, stock_object};
use crate::primitives::Point;
use crate::reader::ByteReader;
use crate::region::Region;

/// An RGB color. The trailing reserved byte of a COLORREF is consumed on
/// read and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRef {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRef {
    pub const BLACK: ColorRef = ColorRef::new(0, 0, 0);
    pub const WHITE: ColorRef = ColorRef::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(reader: &mut ByteReader) -> MetafileResult<Self> {
        let r = reader.read_u8()?;
        let g = reader.read_u8()?;
        let b = reader.read_u8()?;
        reader.skip(1)?;
        Ok(Self { r, g, b })
    }

    /// Six-digit lowercase hex without the leading `#`.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{r: {}, g: {}, b: {}}}", self.r, self.g, self.b)
    }
}

/// A logical pen.
///
/// WMF pens pack dash style, end cap and join into one style word and store
/// the width as a point; EMF classic pens carry a 32-bit style and a point
/// width, extended pens a scalar width and an embedded brush whose color
/// becomes the pen color.
#[derive(Debug, Clone)]
pub struct Pen {
    pub style: u32,
    pub width: Point,
    pub color: ColorRef,
    pub linecap: u32,
    pub join: u32,
    pub brush: Option<Brush>,
}

impl Pen {
    pub fn solid(width: i32, color: ColorRef) -> Self {
        Self {
            style: pen_style::PS_SOLID,
            width: Point::new(width, width),
            color,
            linecap: 0,
            join: 0,
            brush: None,
        }
    }

    pub fn null() -> Self {
        Self {
            style: pen_style::PS_NULL,
            width: Point::new(0, 0),
            color: ColorRef::BLACK,
            linecap: 0,
            join: 0,
            brush: None,
        }
    }

    /// WMF `META_CREATEPENINDIRECT` payload.
    pub fn parse_wmf(reader: &mut ByteReader) -> MetafileResult<Self> {
        let style = reader.read_u16()? as u32;
        let width = Point::parse_short(reader)?;
        let color = ColorRef::parse(reader)?;
        Ok(Self {
            style: style & pen_style::PS_STYLE_MASK,
            width,
            color,
            linecap: style & pen_style::PS_ENDCAP_MASK,
            join: style & pen_style::PS_JOIN_MASK,
            brush: None,
        })
    }

    /// EMF `EMR_CREATEPEN` LogPen payload.
    pub fn parse_emf(reader: &mut ByteReader) -> MetafileResult<Self> {
        let style = reader.read_u32()?;
        let width = Point::parse_long(reader)?;
        let color = ColorRef::parse(reader)?;
        Ok(Self {
            style,
            width,
            color,
            linecap: 0,
            join: 0,
            brush: None,
        })
    }

    /// EMF `EMR_EXTCREATEPEN` LogPenEx payload: style masked to its low
    /// byte, scalar width, then the embedded brush the display color is
    /// derived from.
    pub fn parse_emf_ex(reader: &mut ByteReader, pattern: Option<DIBitmap>) -> MetafileResult<Self> {
        let style = reader.read_u32()? & 0xff;
        let width = reader.read_i32()?;
        let mut brush = Brush::parse_emf(reader)?;
        if let (Some(dib), brush_style::BS_PATTERN | brush_style::BS_DIBPATTERNPT) =
            (pattern, brush.style)
        {
            brush.dib = Some(dib);
        }
        let color = brush.color.unwrap_or(ColorRef::BLACK);
        Ok(Self {
            style,
            width: Point::new(width, 0),
            color,
            linecap: 0,
            join: 0,
            brush: Some(brush),
        })
    }
}

impl fmt::Display for Pen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{style: {}, width: {}, color: {}}}",
            self.style, self.width.x, self.color
        )
    }
}

/// A logical brush. The style selects which of the remaining fields are
/// meaningful, so parsing branches exhaustively on it.
#[derive(Debug, Clone)]
pub struct Brush {
    pub style: u32,
    pub color: Option<ColorRef>,
    pub hatch_style: Option<u32>,
    /// Legacy 16-bit pattern bitmap (BS_PATTERN in WMF).
    pub pattern: Option<Bitmap16>,
    /// Full DIB pattern (BS_DIBPATTERNPT).
    pub dib: Option<DIBitmap>,
    pub color_usage: Option<u32>,
}

impl Brush {
    pub fn solid(color: ColorRef) -> Self {
        Self {
            style: brush_style::BS_SOLID,
            color: Some(color),
            hatch_style: None,
            pattern: None,
            dib: None,
            color_usage: None,
        }
    }

    pub fn null() -> Self {
        Self {
            style: brush_style::BS_NULL,
            color: None,
            hatch_style: None,
            pattern: None,
            dib: None,
            color_usage: None,
        }
    }

    /// WMF `META_CREATEBRUSHINDIRECT` / `META_DIBCREATEPATTERNBRUSH`
    /// payload. `datalength` is the remaining record size;
    /// `force_dib_pattern` turns a BS_PATTERN style word into a DIB pattern
    /// brush, as the DIB-create record mandates.
    pub fn parse_wmf(
        reader: &mut ByteReader,
        datalength: usize,
        force_dib_pattern: bool,
    ) -> MetafileResult<Self> {
        let start = reader.pos();
        let mut brush = Brush::null();
        brush.style = reader.read_u16()? as u32;
        if force_dib_pattern && brush.style != brush_style::BS_PATTERN {
            brush.style = brush_style::BS_DIBPATTERNPT;
        }
        match brush.style {
            brush_style::BS_SOLID => {
                brush.color = Some(ColorRef::parse(reader)?);
            }
            brush_style::BS_NULL => {}
            brush_style::BS_PATTERN => {
                // ColorUsage (DIB record) or the rest of the LogBrush.
                reader.skip(if force_dib_pattern { 2 } else { 6 })?;
                let remaining = datalength.saturating_sub(reader.pos() - start);
                brush.pattern = Some(Bitmap16::parse(reader, remaining)?);
            }
            brush_style::BS_DIBPATTERNPT => {
                brush.color_usage = Some(reader.read_u16()? as u32);
                let remaining = datalength.saturating_sub(reader.pos() - start);
                brush.dib = Some(DIBitmap::parse(reader, remaining)?);
            }
            brush_style::BS_HATCHED => {
                brush.color = Some(ColorRef::parse(reader)?);
                brush.hatch_style = Some(reader.read_u16()? as u32);
            }
            _ => {}
        }
        Ok(brush)
    }

    /// WMF `META_CREATEPATTERNBRUSH` payload, which carries the bitmap
    /// directly instead of a LogBrush.
    pub fn from_pattern(pattern: Bitmap16) -> Self {
        Self {
            style: brush_style::BS_PATTERN,
            color: None,
            hatch_style: None,
            pattern: Some(pattern),
            dib: None,
            color_usage: None,
        }
    }

    /// EMF LogBrushEx payload: a fixed 12 bytes regardless of style.
    pub fn parse_emf(reader: &mut ByteReader) -> MetafileResult<Self> {
        let start = reader.pos();
        let mut brush = Brush::null();
        brush.style = reader.read_u32()?;
        match brush.style {
            brush_style::BS_SOLID => {
                brush.color = Some(ColorRef::parse(reader)?);
            }
            brush_style::BS_HATCHED => {
                brush.color = Some(ColorRef::parse(reader)?);
                brush.hatch_style = Some(reader.read_u32()?);
            }
            _ => {}
        }
        reader.seek(start + 12)?;
        Ok(brush)
    }

    /// EMF `EMR_CREATEDIBPATTERNBRUSHPT` payload body (after the usage and
    /// offset fields have located the DIB).
    pub fn from_dib(usage: u32, dib: DIBitmap) -> Self {
        Self {
            style: brush_style::BS_DIBPATTERNPT,
            color: None,
            hatch_style: None,
            pattern: None,
            dib: Some(dib),
            color_usage: Some(usage),
        }
    }
}

impl fmt::Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{style: {}", self.style)?;
        if let Some(color) = self.color {
            write!(f, ", color: {}", color)?;
        }
        if let Some(hatch) = self.hatch_style {
            write!(f, ", hatchstyle: {}", hatch)?;
        }
        write!(f, "}}")
    }
}

/// A logical font. Escapement and orientation are in tenths of a degree.
#[derive(Debug, Clone)]
pub struct Font {
    pub height: i32,
    pub width: i32,
    pub escapement: i32,
    pub orientation: i32,
    pub weight: i32,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
    pub charset: u8,
    pub out_precision: u8,
    pub clip_precision: u8,
    pub quality: u8,
    pub pitch: u8,
    pub family: u8,
    pub facename: String,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            height: -80,
            width: 0,
            escapement: 0,
            orientation: 0,
            weight: 400,
            italic: false,
            underline: false,
            strikeout: false,
            charset: 0,
            out_precision: 0,
            clip_precision: 0,
            quality: 0,
            pitch: 0,
            family: 0,
            facename: "Helvetica".to_string(),
        }
    }
}

impl Font {
    /// WMF `META_CREATEFONTINDIRECT` payload: 16-bit metrics and an ANSI
    /// face name bounded by the record tail (at most 32 bytes).
    pub fn parse_wmf(reader: &mut ByteReader, datalength: usize) -> MetafileResult<Self> {
        let start = reader.pos();
        let height = reader.read_i16()? as i32;
        let width = reader.read_i16()? as i32;
        let escapement = reader.read_i16()? as i32;
        let orientation = reader.read_i16()? as i32;
        let weight = reader.read_i16()? as i32;
        let mut font = Self::parse_flags(reader, height, width, escapement, orientation, weight)?;
        let remaining = datalength.saturating_sub(reader.pos() - start);
        font.facename = reader.read_string(remaining.min(32))?;
        Ok(font)
    }

    /// EMF LogFont payload: 32-bit metrics and a fixed-size Unicode face
    /// name of `min(remaining record bytes, 32)` code units.
    pub fn parse_emf(reader: &mut ByteReader, datalength: usize) -> MetafileResult<Self> {
        let start = reader.pos();
        let height = reader.read_i32()?;
        let width = reader.read_i32()?;
        let escapement = reader.read_i32()?;
        let orientation = reader.read_i32()?;
        let weight = reader.read_i32()?;
        let mut font = Self::parse_flags(reader, height, width, escapement, orientation, weight)?;
        let remaining = datalength.saturating_sub(reader.pos() - start);
        font.facename = reader.read_fixed_size_unicode_string(remaining.min(32))?;
        Ok(font)
    }

    fn parse_flags(
        reader: &mut ByteReader,
        height: i32,
        width: i32,
        escapement: i32,
        orientation: i32,
        weight: i32,
    ) -> MetafileResult<Self> {
        let italic = reader.read_u8()? != 0;
        let underline = reader.read_u8()? != 0;
        let strikeout = reader.read_u8()? != 0;
        let charset = reader.read_u8()?;
        let out_precision = reader.read_u8()?;
        let clip_precision = reader.read_u8()?;
        let quality = reader.read_u8()?;
        let pitch_and_family = reader.read_u8()?;
        Ok(Self {
            height,
            width,
            escapement,
            orientation,
            weight,
            italic,
            underline,
            strikeout,
            charset,
            out_precision,
            clip_precision,
            quality,
            pitch: pitch_and_family & 0xf,
            family: (pitch_and_family >> 6) & 0x3,
            facename: String::new(),
        })
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{facename: {}, height: {}, weight: {}}}",
            self.facename, self.height, self.weight
        )
    }
}

/// One palette entry.
#[derive(Debug, Clone, Copy)]
pub struct PaletteEntry {
    pub flag: u8,
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

/// A logical palette. Carried through the handle table but not consulted
/// when styling output.
#[derive(Debug, Clone)]
pub struct Palette {
    pub start: u16,
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn parse(reader: &mut ByteReader) -> MetafileResult<Self> {
        let start = reader.read_u16()?;
        let count = reader.read_u16()? as usize;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            entries.push(PaletteEntry {
                flag: reader.read_u8()?,
                b: reader.read_u8()?,
                g: reader.read_u8()?,
                r: reader.read_u8()?,
            });
        }
        Ok(Self { start, entries })
    }
}

/// A path promoted into a selectable object by `EMR_ENDPATH`.
#[derive(Debug, Clone)]
pub struct PathObject {
    pub svg_path: String,
}

/// The object kinds a handle can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Pen,
    Brush,
    Font,
    Palette,
    Region,
    Path,
}

/// A handle-table entry. Shared by reference; deletion substitutes default
/// objects by pointer identity.
#[derive(Debug, Clone)]
pub enum GraphicsObject {
    Pen(Rc<Pen>),
    Brush(Rc<Brush>),
    Font(Rc<Font>),
    Palette(Rc<Palette>),
    Region(Rc<Region>),
    Path(Rc<PathObject>),
}

impl GraphicsObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            GraphicsObject::Pen(_) => ObjectKind::Pen,
            GraphicsObject::Brush(_) => ObjectKind::Brush,
            GraphicsObject::Font(_) => ObjectKind::Font,
            GraphicsObject::Palette(_) => ObjectKind::Palette,
            GraphicsObject::Region(_) => ObjectKind::Region,
            GraphicsObject::Path(_) => ObjectKind::Path,
        }
    }
}

/// The EMF stock-object table. Handles at `0x80000000 + index` resolve here
/// instead of the metafile's own object table.
pub fn lookup_stock_object(idx: u32) -> Option<GraphicsObject> {
    let obj = match idx {
        stock_object::WHITE_BRUSH => {
            GraphicsObject::Brush(Rc::new(Brush::solid(ColorRef::WHITE)))
        }
        stock_object::LTGRAY_BRUSH => {
            GraphicsObject::Brush(Rc::new(Brush::solid(ColorRef::new(212, 208, 200))))
        }
        stock_object::GRAY_BRUSH => {
            GraphicsObject::Brush(Rc::new(Brush::solid(ColorRef::new(128, 128, 128))))
        }
        stock_object::DKGRAY_BRUSH => {
            GraphicsObject::Brush(Rc::new(Brush::solid(ColorRef::new(64, 64, 64))))
        }
        stock_object::BLACK_BRUSH => GraphicsObject::Brush(Rc::new(Brush::solid(ColorRef::BLACK))),
        stock_object::NULL_BRUSH => GraphicsObject::Brush(Rc::new(Brush::null())),
        stock_object::WHITE_PEN => GraphicsObject::Pen(Rc::new(Pen::solid(1, ColorRef::WHITE))),
        stock_object::BLACK_PEN => GraphicsObject::Pen(Rc::new(Pen::solid(1, ColorRef::BLACK))),
        stock_object::NULL_PEN => GraphicsObject::Pen(Rc::new(Pen::null())),
        stock_object::SYSTEM_FONT => GraphicsObject::Font(Rc::new(Font::default())),
        _ => return None,
    };
    Some(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_hex() {
        assert_eq!(ColorRef::new(0x12, 0xab, 0x03).to_hex(), "12ab03");
        assert_eq!(ColorRef::BLACK.to_hex(), "000000");
    }

    #[test]
    fn test_parse_wmf_pen_masks_style_word() {
        // style = PS_DASH | PS_ENDCAP_SQUARE | PS_JOIN_MITER
        let style: u16 = 0x2101;
        let data = [
            (style & 0xff) as u8,
            (style >> 8) as u8,
            2,
            0, // width.x
            3,
            0, // width.y
            0xff,
            0x00,
            0x80,
            0x00, // color + reserved
        ];
        let mut r = ByteReader::new(&data);
        let pen = Pen::parse_wmf(&mut r).unwrap();
        assert_eq!(pen.style, pen_style::PS_DASH);
        assert_eq!(pen.linecap, pen_style::PS_ENDCAP_SQUARE);
        assert_eq!(pen.join, pen_style::PS_JOIN_MITER);
        assert_eq!(pen.width, Point::new(2, 3));
        assert_eq!(pen.color, ColorRef::new(0xff, 0x00, 0x80));
    }

    #[test]
    fn test_parse_emf_brush_consumes_twelve_bytes() {
        let mut data = vec![0u8; 16];
        data[0] = brush_style::BS_SOLID as u8;
        data[4] = 10;
        data[5] = 20;
        data[6] = 30;
        let mut r = ByteReader::new(&data);
        let brush = Brush::parse_emf(&mut r).unwrap();
        assert_eq!(brush.color, Some(ColorRef::new(10, 20, 30)));
        // LogBrushEx is always 12 bytes on the wire.
        assert_eq!(r.pos(), 12);
    }

    #[test]
    fn test_parse_wmf_hatched_brush() {
        let data = [
            brush_style::BS_HATCHED as u8,
            0,
            1,
            2,
            3,
            0, // color
            4,
            0, // hatch style
        ];
        let mut r = ByteReader::new(&data);
        let brush = Brush::parse_wmf(&mut r, data.len(), false).unwrap();
        assert_eq!(brush.style, brush_style::BS_HATCHED);
        assert_eq!(brush.color, Some(ColorRef::new(1, 2, 3)));
        assert_eq!(brush.hatch_style, Some(4));
    }

    #[test]
    fn test_parse_wmf_font_facename() {
        let mut data = Vec::new();
        for v in [-13i16, 0, 900, 0, 700] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0x42]); // flags + pitch/family
        data.extend_from_slice(b"Arial\0\0\0");
        let mut r = ByteReader::new(&data);
        let font = Font::parse_wmf(&mut r, data.len()).unwrap();
        assert_eq!(font.height, -13);
        assert_eq!(font.escapement, 900);
        assert_eq!(font.weight, 700);
        assert!(font.italic);
        assert_eq!(font.facename, "Arial");
        assert_eq!(font.pitch, 2);
        assert_eq!(font.family, 1);
    }

    #[test]
    fn test_stock_objects() {
        assert!(matches!(
            lookup_stock_object(stock_object::BLACK_PEN),
            Some(GraphicsObject::Pen(_))
        ));
        assert!(matches!(
            lookup_stock_object(stock_object::NULL_BRUSH),
            Some(GraphicsObject::Brush(_))
        ));
        assert!(lookup_stock_object(0x8000_0020).is_none());
    }
}
