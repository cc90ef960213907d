//! Decoded record operations.
//!
//! The decoders turn every recognized record into one of these plain data
//! values; replay happens in a second step against the device context. This
//! keeps decoding failures ahead of any drawing side effect, makes the
//! decoded stream inspectable in tests, and guarantees replay order equals
//! record order.

use crate::bitmap::DIBitmap;
use crate::objects::{Brush, ColorRef, Font, ObjectKind, Palette, Pen};
use crate::primitives::{Point, Rect};
use crate::region::Region;

/// A single decoded drawing-stream operation, covering the union of the WMF
/// and EMF record sets. Each decoder emits only its format's subset.
#[derive(Debug, Clone)]
pub enum RecordOp {
    // Transform setters
    SetMapMode(u32),
    SetWindowOrg { x: i32, y: i32 },
    SetWindowExt { x: i32, y: i32 },
    OffsetWindowOrg { x: i32, y: i32 },
    SetViewportOrg { x: i32, y: i32 },
    SetViewportExt { x: i32, y: i32 },
    OffsetViewportOrg { x: i32, y: i32 },

    // Device-context state stack
    SaveDc,
    RestoreDc(i32),

    // Plain state setters
    SetStretchBltMode(u32),
    SetPolyFillMode(u32),
    SetTextAlign(u32),
    SetBkMode(u32),
    SetBkColor(ColorRef),
    SetTextColor(ColorRef),
    SetMiterLimit(u32),
    SetBrushOrg(Point),

    // Object lifecycle. `index` is None for WMF (first free slot) and Some
    // for EMF (explicit handle index from the record).
    CreatePen { index: Option<u32>, pen: Pen },
    CreateBrush { index: Option<u32>, brush: Brush },
    CreateFont { index: Option<u32>, font: Font },
    CreatePalette(Palette),
    CreateRegion(Region),
    SelectObject { index: u32, check: Option<ObjectKind> },
    DeleteObject { index: u32 },

    // Drawing
    Rectangle { rect: Rect, rx: i32, ry: i32 },
    Ellipse(Rect),
    LineTo { x: i32, y: i32 },
    MoveTo { x: i32, y: i32 },
    Polygon { points: Vec<Point> },
    PolyPolygon { polygons: Vec<Vec<Point>> },
    Polyline { to: bool, points: Vec<Point> },
    PolyBezier { to: bool, points: Vec<Point> },
    TextOut { x: i32, y: i32, text: String },
    ExtTextOut { x: i32, y: i32, text: String, rect: Option<Rect>, dx: Vec<i32> },
    StretchDib { dst: Rect, src: Rect, dib: DIBitmap },
    DibBits { dst_x: i32, dst_y: i32, width: i32, height: i32, dib: DIBitmap },

    // Path bracket (EMF)
    BeginPath,
    EndPath,
    AbortPath,
    CloseFigure,
    FillPath,
    StrokePath,
    SelectClipPath(u32),

    // Clipping
    ExcludeClipRect(Rect),
    IntersectClipRect(Rect),
    OffsetClipRgn { x: i32, y: i32 },
    SelectClipRgn { mode: u32, region: Option<Region> },

    // Recognized but non-rendering records
    Escape { func: u16, count: u16 },
}
