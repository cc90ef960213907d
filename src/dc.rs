//! GDI-compatible device context.
//!
//! Replays decoded record operations against an SVG sink. Holds the
//! save/restore state stack, the handle-indexed object table, the active
//! window/viewport transform, the clip region, and an open path bracket.
//! Style attributes for each emitted element are derived from the currently
//! selected pen, brush and font.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{MetafileError, MetafileResult};
use crate::gdi::{
    brush_style, map_mode, mix_mode, pen_style, poly_fill_mode, region_mode, stock_object,
    stretch_mode,
};
use crate::objects::{
    lookup_stock_object, Brush, ColorRef, Font, GraphicsObject, ObjectKind, Palette, PathObject,
    Pen,
};
use crate::primitives::{Point, Rect};
use crate::records::RecordOp;
use crate::region::Region;
use crate::svg::{AttrList, NodeId, PathBuilder, SvgSink};

/// Which record vocabulary the context is replaying. A few style rules
/// differ between the formats (pen width scaling, caps and joins, pattern
/// origin, handle assignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetafileKind {
    Wmf,
    Emf,
}

/// The objects currently selected into the device context, one slot per
/// kind. Slots share the stored objects by reference.
#[derive(Debug, Clone)]
struct Selected {
    pen: Option<Rc<Pen>>,
    brush: Option<Rc<Brush>>,
    font: Option<Rc<Font>>,
    palette: Option<Rc<Palette>>,
    region: Option<Rc<Region>>,
    path: Option<Rc<PathObject>>,
}

/// One frame of device-context state. `save_dc` pushes a copy, `restore_dc`
/// pops one.
#[derive(Debug, Clone)]
struct DcState {
    svg_group: Option<NodeId>,
    clip_changed: bool,
    text_bk_filter: Option<String>,
    map_mode: u32,
    stretch_mode: u32,
    text_align: u32,
    bk_mode: u32,
    text_color: ColorRef,
    bk_color: ColorRef,
    poly_fill_mode: u32,
    miter_limit: u32,
    wx: i32,
    wy: i32,
    ww: i32,
    wh: i32,
    vx: i32,
    vy: i32,
    vw: i32,
    vh: i32,
    x: i32,
    y: i32,
    next_brx: i32,
    next_bry: i32,
    brx: i32,
    bry: i32,
    clip: Option<Rc<Region>>,
    own_clip: bool,
    selected: Selected,
}

impl DcState {
    fn initial(defaults: &Defaults) -> Self {
        Self {
            svg_group: None,
            clip_changed: false,
            text_bk_filter: None,
            map_mode: map_mode::MM_ANISOTROPIC,
            stretch_mode: stretch_mode::COLORONCOLOR,
            text_align: 0, // TA_LEFT | TA_TOP | TA_NOUPDATECP
            bk_mode: mix_mode::OPAQUE,
            text_color: ColorRef::BLACK,
            bk_color: ColorRef::WHITE,
            poly_fill_mode: poly_fill_mode::ALTERNATE,
            miter_limit: 10,
            wx: 0,
            wy: 0,
            ww: 0,
            wh: 0,
            vx: 0,
            vy: 0,
            vw: 0,
            vh: 0,
            x: 0,
            y: 0,
            next_brx: 0,
            next_bry: 0,
            brx: 0,
            bry: 0,
            clip: None,
            own_clip: false,
            selected: Selected {
                pen: Some(Rc::new(defaults.pen.clone())),
                brush: Some(Rc::new(defaults.brush.clone())),
                font: Some(Rc::new(defaults.font.clone())),
                palette: None,
                region: None,
                path: None,
            },
        }
    }

    /// The copy pushed by `save_dc`: colors and flags by value, selected
    /// objects by reference, the clip shared until first mutation.
    fn child_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.own_clip = false;
        copy
    }
}

/// Built-in default objects substituted when a deleted object is still
/// selected somewhere in the state stack.
#[derive(Debug)]
struct Defaults {
    pen: Pen,
    brush: Brush,
    font: Font,
}

/// The replay engine: a GDI device context writing to an SVG sink.
pub struct DeviceContext {
    kind: MetafileKind,
    sink: SvgSink,
    state: DcState,
    stack: Vec<DcState>,
    objects: HashMap<u32, GraphicsObject>,
    patterns: Vec<(String, Rc<Brush>)>,
    clip_paths: Vec<(String, Rc<Region>)>,
    path: Option<PathBuilder>,
    defaults: Defaults,
}

impl DeviceContext {
    pub fn new(kind: MetafileKind, sink: SvgSink) -> Self {
        let defaults = Defaults {
            pen: Pen::solid(1, ColorRef::BLACK),
            // The WMF default brush renders as no fill; the EMF one is
            // solid black.
            brush: match kind {
                MetafileKind::Wmf => Brush::null(),
                MetafileKind::Emf => Brush::solid(ColorRef::BLACK),
            },
            font: Font::default(),
        };
        let state = DcState::initial(&defaults);
        Self {
            kind,
            sink,
            state,
            stack: Vec::new(),
            objects: HashMap::new(),
            patterns: Vec::new(),
            clip_paths: Vec::new(),
            path: None,
            defaults,
        }
    }

    /// Replays a decoded record stream in order.
    pub fn play(&mut self, ops: &[RecordOp]) -> MetafileResult<()> {
        for op in ops {
            self.exec(op)?;
        }
        Ok(())
    }

    /// Gives the finished element tree back to the renderer.
    pub fn into_sink(self) -> SvgSink {
        self.sink
    }

    /// Creates the coordinate group for the current state if none exists
    /// yet. Used by the renderer so a metafile without drawing records
    /// still produces a viewBox-carrying root group.
    pub fn ensure_group(&mut self) {
        self.push_group();
    }

    pub fn exec(&mut self, op: &RecordOp) -> MetafileResult<()> {
        match op {
            RecordOp::SetMapMode(mode) => self.set_map_mode(*mode),
            RecordOp::SetWindowOrg { x, y } => self.set_window_org(*x, *y),
            RecordOp::SetWindowExt { x, y } => self.set_window_ext(*x, *y),
            RecordOp::OffsetWindowOrg { x, y } => self.offset_window_org(*x, *y),
            RecordOp::SetViewportOrg { x, y } => self.set_viewport_org(*x, *y),
            RecordOp::SetViewportExt { x, y } => self.set_viewport_ext(*x, *y),
            RecordOp::OffsetViewportOrg { x, y } => self.offset_viewport_org(*x, *y),
            RecordOp::SaveDc => self.save_dc(),
            RecordOp::RestoreDc(saved) => self.restore_dc(*saved)?,
            RecordOp::SetStretchBltMode(mode) => {
                debug!("[gdi] setStretchBltMode: stretchMode={}", mode);
                self.state.stretch_mode = *mode;
            }
            RecordOp::SetPolyFillMode(mode) => {
                debug!("[gdi] setPolyFillMode: polyFillMode={}", mode);
                self.state.poly_fill_mode = *mode;
            }
            RecordOp::SetTextAlign(align) => {
                debug!("[gdi] setTextAlign: textAlignmentMode=0x{:x}", align);
                self.state.text_align = *align;
            }
            RecordOp::SetBkMode(mode) => {
                debug!("[gdi] setBkMode: bkMode=0x{:x}", mode);
                self.state.bk_mode = *mode;
            }
            RecordOp::SetBkColor(color) => {
                debug!("[gdi] setBkColor: bkColor={}", color);
                self.state.bk_color = *color;
                self.state.text_bk_filter = None;
            }
            RecordOp::SetTextColor(color) => {
                debug!("[gdi] setTextColor: textColor={}", color);
                self.state.text_color = *color;
            }
            RecordOp::SetMiterLimit(limit) => {
                debug!("[gdi] setMiterLimit: miterLimit={}", limit);
                self.state.miter_limit = *limit;
            }
            RecordOp::SetBrushOrg(origin) => {
                debug!("[gdi] setBrushOrgEx: x={} y={}", origin.x, origin.y);
                self.state.next_brx = origin.x;
                self.state.next_bry = origin.y;
            }
            RecordOp::CreatePen { index, pen } => {
                let idx = self.store_object(GraphicsObject::Pen(Rc::new(pen.clone())), *index);
                debug!("[gdi] createPen: pen={} with handle {:?}", pen, idx);
            }
            RecordOp::CreateBrush { index, brush } => {
                let idx = self.store_object(GraphicsObject::Brush(Rc::new(brush.clone())), *index);
                debug!("[gdi] createBrush: brush={} with handle {:?}", brush, idx);
            }
            RecordOp::CreateFont { index, font } => {
                let idx = self.store_object(GraphicsObject::Font(Rc::new(font.clone())), *index);
                debug!("[gdi] createFont: font={} with handle {:?}", font, idx);
            }
            RecordOp::CreatePalette(palette) => {
                let idx =
                    self.store_object(GraphicsObject::Palette(Rc::new(palette.clone())), None);
                debug!("[gdi] createPalette with handle {:?}", idx);
            }
            RecordOp::CreateRegion(region) => {
                let idx = self.store_object(GraphicsObject::Region(Rc::new(region.clone())), None);
                debug!("[gdi] createRegion with handle {:?}", idx);
            }
            RecordOp::SelectObject { index, check } => self.select_object(*index, *check),
            RecordOp::DeleteObject { index } => self.delete_object(*index),
            RecordOp::Rectangle { rect, rx, ry } => self.rectangle(rect, *rx, *ry),
            RecordOp::Ellipse(rect) => self.ellipse(rect),
            RecordOp::LineTo { x, y } => self.line_to(*x, *y),
            RecordOp::MoveTo { x, y } => self.move_to(*x, *y),
            RecordOp::Polygon { points } => self.polygon(points, true),
            RecordOp::PolyPolygon { polygons } => self.poly_polygon(polygons),
            RecordOp::Polyline { to, points } => self.polyline(*to, points),
            RecordOp::PolyBezier { to, points } => self.polybezier(*to, points)?,
            RecordOp::TextOut { x, y, text } => self.text_out(*x, *y, text),
            RecordOp::ExtTextOut { x, y, text, .. } => self.text_out(*x, *y, text),
            RecordOp::StretchDib { dst, src, dib } => {
                let _ = src;
                self.draw_image(dst.left, dst.top, dst.width(), dst.height(), dib.base64_ref());
            }
            RecordOp::DibBits {
                dst_x,
                dst_y,
                width,
                height,
                dib,
            } => self.draw_image(*dst_x, *dst_y, *width, *height, dib.base64_ref()),
            RecordOp::BeginPath => {
                debug!("[gdi] beginPath");
                self.path = Some(PathBuilder::new());
            }
            RecordOp::EndPath => self.end_path()?,
            RecordOp::AbortPath => {
                debug!("[gdi] abortPath");
                self.path = None;
            }
            RecordOp::CloseFigure => self.close_figure()?,
            RecordOp::FillPath => self.fill_path()?,
            RecordOp::StrokePath => self.stroke_path()?,
            RecordOp::SelectClipPath(mode) => {
                debug!("[gdi] selectClipPath: rgnMode=0x{:x}", mode);
            }
            RecordOp::ExcludeClipRect(rect) => {
                debug!("[gdi] excludeClipRect: rect={:?}", rect);
                self.clip_region_mut().subtract(rect);
                self.state.clip_changed = true;
            }
            RecordOp::IntersectClipRect(rect) => {
                debug!("[gdi] intersectClipRect: rect={:?}", rect);
                self.clip_region_mut().intersect(rect);
                self.state.clip_changed = true;
            }
            RecordOp::OffsetClipRgn { x, y } => {
                debug!("[gdi] offsetClipRgn: offX={} offY={}", x, y);
                self.clip_region_mut().offset(*x, *y);
                self.state.clip_changed = true;
            }
            RecordOp::SelectClipRgn { mode, region } => self.select_clip_rgn(*mode, region)?,
            RecordOp::Escape { func, count } => {
                debug!("[gdi] escape: func={} count={}", func, count);
            }
        }
        Ok(())
    }

    // --- transform state -------------------------------------------------

    pub fn set_map_mode(&mut self, mode: u32) {
        debug!("[gdi] setMapMode: mode={}", mode);
        self.state.map_mode = mode;
        self.state.svg_group = None;
    }

    pub fn set_window_org(&mut self, x: i32, y: i32) {
        debug!("[gdi] setWindowOrg: x={} y={}", x, y);
        self.state.wx = x;
        self.state.wy = y;
        self.state.svg_group = None;
    }

    pub fn set_window_ext(&mut self, x: i32, y: i32) {
        debug!("[gdi] setWindowExt: x={} y={}", x, y);
        self.state.ww = x;
        self.state.wh = y;
        self.state.svg_group = None;
    }

    pub fn offset_window_org(&mut self, dx: i32, dy: i32) {
        debug!("[gdi] offsetWindowOrg: offX={} offY={}", dx, dy);
        self.state.wx += dx;
        self.state.wy += dy;
        self.state.svg_group = None;
    }

    pub fn set_viewport_org(&mut self, x: i32, y: i32) {
        debug!("[gdi] setViewportOrg: x={} y={}", x, y);
        self.state.vx = x;
        self.state.vy = y;
        self.state.svg_group = None;
    }

    pub fn set_viewport_ext(&mut self, x: i32, y: i32) {
        debug!("[gdi] setViewportExt: x={} y={}", x, y);
        self.state.vw = x;
        self.state.vh = y;
        self.state.svg_group = None;
    }

    pub fn offset_viewport_org(&mut self, dx: i32, dy: i32) {
        debug!("[gdi] offsetViewportOrg: offX={} offY={}", dx, dy);
        self.state.vx += dx;
        self.state.vy += dy;
        self.state.svg_group = None;
    }

    fn save_dc(&mut self) {
        debug!("[gdi] saveDC");
        let copy = self.state.child_copy();
        let saved = std::mem::replace(&mut self.state, copy);
        self.stack.push(saved);
        self.state.svg_group = None;
    }

    fn restore_dc(&mut self, saved: i32) -> MetafileResult<()> {
        debug!("[gdi] restoreDC: saved={}", saved);
        if self.stack.is_empty() {
            return Err(MetafileError::NoSavedContexts);
        }
        match saved {
            -1 => {
                self.state = self.stack.pop().unwrap();
            }
            n if n < -1 => {
                return Err(MetafileError::Unimplemented(
                    "restoreDC: relative restore".to_string(),
                ));
            }
            _ => {
                return Err(MetafileError::Unimplemented(
                    "restoreDC: absolute restore".to_string(),
                ));
            }
        }
        self.state.svg_group = None;
        Ok(())
    }

    // --- coordinate transforms -------------------------------------------

    fn scale_x(&self) -> f64 {
        if self.state.ww == 0 {
            1.0
        } else {
            self.state.vw as f64 / self.state.ww as f64
        }
    }

    fn scale_y(&self) -> f64 {
        if self.state.wh == 0 {
            1.0
        } else {
            self.state.vh as f64 / self.state.wh as f64
        }
    }

    /// Logical x to device x.
    pub fn to_dev_x(&self, val: i32) -> i32 {
        (((val - self.state.wx) as f64 * self.scale_x()).floor() as i32) + self.state.vx
    }

    /// Logical y to device y.
    pub fn to_dev_y(&self, val: i32) -> i32 {
        (((val - self.state.wy) as f64 * self.scale_y()).floor() as i32) + self.state.vy
    }

    /// Logical width to device width. The viewport origin term is part of
    /// the formula; call sites depend on it for positioning.
    pub fn to_dev_w(&self, val: i32) -> i32 {
        ((val as f64 * self.scale_x()).floor() as i32) + self.state.vx
    }

    /// Logical height to device height, with the same origin term.
    pub fn to_dev_h(&self, val: i32) -> i32 {
        ((val as f64 * self.scale_y()).floor() as i32) + self.state.vy
    }

    /// Device x back to logical x. Unused in forward rendering.
    pub fn to_logical_x(&self, val: i32) -> i32 {
        (((val - self.state.vx) as f64 / self.scale_x()).floor() as i32) + self.state.wx
    }

    /// Device y back to logical y. Unused in forward rendering.
    pub fn to_logical_y(&self, val: i32) -> i32 {
        (((val - self.state.vy) as f64 / self.scale_y()).floor() as i32) + self.state.wy
    }

    // --- object table ----------------------------------------------------

    fn store_object(&mut self, obj: GraphicsObject, index: Option<u32>) -> Option<u32> {
        let idx = match index {
            Some(idx) => idx,
            None => {
                // WMF handles take the first free slot.
                let mut idx = 0u32;
                while self.objects.contains_key(&idx) {
                    idx += 1;
                    if idx > 65535 {
                        warn!("[gdi] too many objects");
                        return None;
                    }
                }
                idx
            }
        };
        self.objects.insert(idx, obj);
        Some(idx)
    }

    fn get_object(&self, idx: u32) -> Option<GraphicsObject> {
        if let Some(obj) = self.objects.get(&idx) {
            return Some(obj.clone());
        }
        if self.kind == MetafileKind::Emf {
            return match idx {
                stock_object::DC_BRUSH => {
                    self.state.selected.brush.clone().map(GraphicsObject::Brush)
                }
                stock_object::DC_PEN => self.state.selected.pen.clone().map(GraphicsObject::Pen),
                _ => lookup_stock_object(idx),
            };
        }
        None
    }

    fn select_object(&mut self, idx: u32, check: Option<ObjectKind>) {
        match self.get_object(idx) {
            Some(obj) if check.map_or(true, |kind| kind == obj.kind()) => {
                debug!("[gdi] selectObject: objIdx={} selected {:?}", idx, obj.kind());
                self.select(obj);
            }
            Some(obj) => {
                debug!(
                    "[gdi] selectObject: objIdx={} invalid object type {:?}",
                    idx,
                    obj.kind()
                );
            }
            None => {
                debug!("[gdi] selectObject: objIdx={} [invalid index]", idx);
            }
        }
    }

    fn select(&mut self, obj: GraphicsObject) {
        match obj {
            GraphicsObject::Pen(pen) => self.state.selected.pen = Some(pen),
            GraphicsObject::Brush(brush) => {
                self.state.selected.brush = Some(brush);
                self.state.brx = self.state.next_brx;
                self.state.bry = self.state.next_bry;
            }
            GraphicsObject::Font(font) => self.state.selected.font = Some(font),
            GraphicsObject::Palette(palette) => self.state.selected.palette = Some(palette),
            GraphicsObject::Region(region) => {
                self.state.selected.region = Some(region);
                self.state.clip_changed = true;
            }
            GraphicsObject::Path(path) => self.state.selected.path = Some(path),
        }
    }

    fn delete_object(&mut self, idx: u32) {
        let Some(obj) = self.objects.remove(&idx) else {
            debug!("[gdi] cannot delete object with invalid handle {}", idx);
            return;
        };
        debug!("[gdi] deleteObject: objIdx={} deleted {:?}", idx, obj.kind());
        // Every frame still holding the exact deleted object falls back to
        // a fresh clone of the kind's default, never to a dangling handle.
        let def_pen = self.defaults.pen.clone();
        let def_brush = self.defaults.brush.clone();
        let def_font = self.defaults.font.clone();
        for frame in self.stack.iter_mut().chain(std::iter::once(&mut self.state)) {
            match &obj {
                GraphicsObject::Pen(pen) => {
                    if frame.selected.pen.as_ref().is_some_and(|s| Rc::ptr_eq(s, pen)) {
                        frame.selected.pen = Some(Rc::new(def_pen.clone()));
                    }
                }
                GraphicsObject::Brush(brush) => {
                    if frame
                        .selected
                        .brush
                        .as_ref()
                        .is_some_and(|s| Rc::ptr_eq(s, brush))
                    {
                        frame.selected.brush = Some(Rc::new(def_brush.clone()));
                    }
                }
                GraphicsObject::Font(font) => {
                    if frame
                        .selected
                        .font
                        .as_ref()
                        .is_some_and(|s| Rc::ptr_eq(s, font))
                    {
                        frame.selected.font = Some(Rc::new(def_font.clone()));
                    }
                }
                GraphicsObject::Palette(palette) => {
                    if frame
                        .selected
                        .palette
                        .as_ref()
                        .is_some_and(|s| Rc::ptr_eq(s, palette))
                    {
                        frame.selected.palette = None;
                    }
                }
                GraphicsObject::Region(region) => {
                    if frame
                        .selected
                        .region
                        .as_ref()
                        .is_some_and(|s| Rc::ptr_eq(s, region))
                    {
                        frame.selected.region = None;
                    }
                }
                GraphicsObject::Path(path) => {
                    if frame
                        .selected
                        .path
                        .as_ref()
                        .is_some_and(|s| Rc::ptr_eq(s, path))
                    {
                        frame.selected.path = None;
                    }
                }
            }
        }
    }

    // --- clipping --------------------------------------------------------

    /// Obtains the mutable clip region of the current state, cloning on the
    /// first mutation so frames sharing the region by reference stay
    /// unaffected.
    fn clip_region_mut(&mut self) -> &mut Region {
        if self.state.clip.is_none() {
            let region = if let Some(selected) = &self.state.selected.region {
                selected.as_ref().clone()
            } else {
                Region::simple(
                    self.state.wx,
                    self.state.wy,
                    self.state.wx + self.state.ww,
                    self.state.wy + self.state.wh,
                )
            };
            self.state.clip = Some(Rc::new(region));
            self.state.own_clip = true;
        } else if !self.state.own_clip {
            let cloned = self.state.clip.as_deref().unwrap().clone();
            self.state.clip = Some(Rc::new(cloned));
            self.state.own_clip = true;
        }
        Rc::make_mut(self.state.clip.as_mut().unwrap())
    }

    fn select_clip_rgn(&mut self, mode: u32, region: &Option<Region>) -> MetafileResult<()> {
        debug!("[gdi] selectClipRgn: rgnMode=0x{:x}", mode);
        if mode != region_mode::RGN_COPY {
            return Err(MetafileError::Unimplemented(format!(
                "selectClipRgn: rgnMode=0x{:x}",
                mode
            )));
        }
        self.state.selected.region = region.clone().map(Rc::new);
        self.state.clip = None;
        self.state.own_clip = false;
        self.state.clip_changed = true;
        Ok(())
    }

    fn clip_path_for_region(&mut self, region: Rc<Region>) -> String {
        if let Some((id, _)) = self
            .clip_paths
            .iter()
            .find(|(_, cached)| Rc::ptr_eq(cached, &region))
        {
            return id.clone();
        }
        let id = self.sink.make_id("c");
        let defs = self.sink.defs();
        let clip = self.sink.element(defs, "clipPath");
        self.sink.set(clip, "id", id.as_str());
        self.sink.set(clip, "clipPathUnits", "userSpaceOnUse");
        match region.complexity {
            1 => {
                if let Some(bounds) = &region.bounds {
                    self.clip_rect(clip, bounds.left, bounds.top, bounds.width(), bounds.height());
                }
            }
            2 => {
                if let Some(scans) = &region.scans {
                    for scan in scans {
                        for sl in &scan.scanlines {
                            self.clip_rect(
                                clip,
                                sl.left,
                                scan.top,
                                sl.right - sl.left,
                                scan.bottom - scan.top,
                            );
                        }
                    }
                }
            }
            _ => {}
        }
        self.clip_paths.push((id.clone(), region));
        id
    }

    fn clip_rect(&mut self, parent: NodeId, left: i32, top: i32, width: i32, height: i32) {
        let rect = self.sink.element(parent, "rect");
        let x = self.to_dev_x(left);
        let y = self.to_dev_y(top);
        let w = self.to_dev_w(width);
        let h = self.to_dev_h(height);
        self.sink.set(rect, "x", x.to_string());
        self.sink.set(rect, "y", y.to_string());
        self.sink.set(rect, "width", w.to_string());
        self.sink.set(rect, "height", h.to_string());
        self.sink.set(rect, "fill", "black");
        self.sink.set(rect, "stroke-width", "0");
    }

    // --- group management ------------------------------------------------

    /// Lazily creates the coordinate-scoped group for the current state: a
    /// nested `<svg>` carrying the viewport rectangle as its viewBox, and a
    /// clip-path reference when a clip region is active.
    fn push_group(&mut self) {
        if self.state.svg_group.is_some() && !self.state.clip_changed {
            return;
        }
        self.state.clip_changed = false;
        self.state.text_bk_filter = None;

        let clip_ref = self
            .state
            .clip
            .clone()
            .map(|clip| format!("url(#{})", self.clip_path_for_region(clip)));
        debug!(
            "[gdi] new group x={} y={} width={} height={} {} clipping",
            self.state.vx,
            self.state.vy,
            self.state.vw,
            self.state.vh,
            if clip_ref.is_some() { "with" } else { "without" }
        );

        let parent = self.state.svg_group.unwrap_or(SvgSink::ROOT);
        let group = self.sink.element(parent, "svg");
        self.sink.set(group, "x", self.state.vx.to_string());
        self.sink.set(group, "y", self.state.vy.to_string());
        self.sink.set(group, "width", self.state.vw.to_string());
        self.sink.set(group, "height", self.state.vh.to_string());
        self.sink.set(
            group,
            "viewBox",
            format!(
                "{} {} {} {}",
                self.state.vx, self.state.vy, self.state.vw, self.state.vh
            ),
        );
        self.sink.set(group, "preserveAspectRatio", "none");
        if let Some(clip) = clip_ref {
            self.sink.set(group, "clip-path", clip);
        }
        self.state.svg_group = Some(group);
    }

    fn group(&self) -> NodeId {
        self.state.svg_group.unwrap_or(SvgSink::ROOT)
    }

    // --- style application -----------------------------------------------

    fn apply_pen(&mut self, opts: &mut AttrList) {
        let Some(pen) = self.state.selected.pen.clone() else {
            return;
        };
        let style = pen.style & pen_style::PS_STYLE_MASK;
        if style == pen_style::PS_NULL {
            return;
        }
        let stroke_width = match self.kind {
            MetafileKind::Wmf => self.to_dev_w(pen.width.x),
            MetafileKind::Emf => pen.width.x,
        };
        opts.set("stroke", format!("#{}", pen.color.to_hex()));
        opts.set("stroke-width", stroke_width.to_string());

        let dot_width;
        match self.kind {
            MetafileKind::Emf => {
                opts.set("stroke-miterlimit", self.state.miter_limit.to_string());
                opts.set("stroke-linecap", "round");
                opts.set("stroke-linejoin", "round");
                dot_width = 1;
            }
            MetafileKind::Wmf => {
                if pen.linecap & pen_style::PS_ENDCAP_SQUARE != 0 {
                    opts.set("stroke-linecap", "square");
                    dot_width = 1;
                } else if pen.linecap & pen_style::PS_ENDCAP_FLAT != 0 {
                    opts.set("stroke-linecap", "butt");
                    dot_width = stroke_width;
                } else {
                    opts.set("stroke-linecap", "round");
                    dot_width = 1;
                }
                if pen.join & pen_style::PS_JOIN_BEVEL != 0 {
                    opts.set("stroke-linejoin", "bevel");
                } else if pen.join & pen_style::PS_JOIN_MITER != 0 {
                    opts.set("stroke-linejoin", "miter");
                } else {
                    opts.set("stroke-linejoin", "round");
                }
            }
        }

        let dash_width = stroke_width * 4;
        let dot_spacing = stroke_width * 2;
        match style {
            pen_style::PS_DASH => {
                opts.set("stroke-dasharray", format!("{},{}", dash_width, dot_spacing));
            }
            pen_style::PS_DOT => {
                opts.set("stroke-dasharray", format!("{},{}", dot_width, dot_spacing));
            }
            pen_style::PS_DASHDOT => {
                opts.set(
                    "stroke-dasharray",
                    format!("{},{},{},{}", dash_width, dot_spacing, dot_width, dot_spacing),
                );
            }
            pen_style::PS_DASHDOTDOT => {
                opts.set(
                    "stroke-dasharray",
                    format!(
                        "{},{},{},{},{},{}",
                        dash_width, dot_spacing, dot_width, dot_spacing, dot_width, dot_spacing
                    ),
                );
            }
            _ => {}
        }
    }

    fn apply_brush(&mut self, opts: &mut AttrList) {
        let Some(brush) = self.state.selected.brush.clone() else {
            return;
        };
        match brush.style {
            brush_style::BS_SOLID => {
                let color = brush.color.unwrap_or(ColorRef::BLACK);
                opts.set("fill", format!("#{}", color.to_hex()));
            }
            brush_style::BS_PATTERN | brush_style::BS_DIBPATTERNPT => {
                match self.pattern_for_brush(brush) {
                    Some(id) => opts.set("fill", format!("url(#{})", id)),
                    None => opts.set("fill", "none"),
                }
            }
            brush_style::BS_NULL => opts.set("fill", "none"),
            other => {
                warn!("[gdi] unsupported brush style: {}", other);
                opts.set("fill", "none");
            }
        }
    }

    fn apply_font(&mut self, opts: &mut AttrList) {
        let Some(font) = self.state.selected.font.clone() else {
            return;
        };
        opts.set("font-family", font.facename.clone());
        let size = match self.kind {
            MetafileKind::Wmf => self.to_dev_h(font.height.abs()),
            MetafileKind::Emf => font.height.abs(),
        };
        opts.set("font-size", size.to_string());
        opts.set("fill", format!("#{}", self.state.text_color.to_hex()));
    }

    fn pattern_for_brush(&mut self, brush: Rc<Brush>) -> Option<String> {
        if let Some((id, _)) = self
            .patterns
            .iter()
            .find(|(_, cached)| Rc::ptr_eq(cached, &brush))
        {
            return Some(id.clone());
        }
        let (width, height, image) = match brush.style {
            brush_style::BS_PATTERN => {
                let pattern = brush.pattern.as_ref()?;
                (pattern.width, pattern.height, None)
            }
            brush_style::BS_DIBPATTERNPT => {
                let dib = brush.dib.as_ref()?;
                (dib.width(), dib.height(), Some(dib.base64_ref()))
            }
            _ => return None,
        };
        let (org_x, org_y) = match self.kind {
            MetafileKind::Wmf => (0, 0),
            MetafileKind::Emf => (self.state.brx, self.state.bry),
        };
        let id = self.sink.make_id("p");
        let defs = self.sink.defs();
        let pattern = self.sink.element(defs, "pattern");
        self.sink.set(pattern, "id", id.as_str());
        self.sink.set(pattern, "x", org_x.to_string());
        self.sink.set(pattern, "y", org_y.to_string());
        self.sink.set(pattern, "width", width.to_string());
        self.sink.set(pattern, "height", height.to_string());
        self.sink.set(pattern, "patternUnits", "userSpaceOnUse");
        if let Some(href) = image {
            let img = self.sink.element(pattern, "image");
            self.sink.set(img, "x", "0");
            self.sink.set(img, "y", "0");
            self.sink.set(img, "width", width.to_string());
            self.sink.set(img, "height", height.to_string());
            self.sink.set(img, "href", href);
        }
        self.patterns.push((id.clone(), brush));
        Some(id)
    }

    /// The per-state flood/composite filter that simulates opaque text
    /// backgrounds, created once per state and invalidated when the
    /// background color changes.
    fn text_bk_filter(&mut self) -> String {
        if let Some(id) = &self.state.text_bk_filter {
            return id.clone();
        }
        let id = self.sink.make_id("f");
        let defs = self.sink.defs();
        let filter = self.sink.element(defs, "filter");
        self.sink.set(filter, "id", id.as_str());
        self.sink.set(filter, "x", "0");
        self.sink.set(filter, "y", "0");
        self.sink.set(filter, "width", "1");
        self.sink.set(filter, "height", "1");
        let flood = self.sink.element(filter, "feFlood");
        self.sink.set(
            flood,
            "flood-color",
            format!("#{}", self.state.bk_color.to_hex()),
        );
        self.sink.set(flood, "flood-opacity", "1");
        let composite = self.sink.element(filter, "feComposite");
        self.sink.set(composite, "in2", "SourceGraphic");
        self.state.text_bk_filter = Some(id.clone());
        id
    }

    // --- drawing ---------------------------------------------------------

    fn rectangle(&mut self, rect: &Rect, rw: i32, rh: i32) {
        if self.state.selected.brush.is_none() || self.state.selected.pen.is_none() {
            debug!("[gdi] rectangle: rect={:?} with no pen or brush selected", rect);
            return;
        }
        debug!("[gdi] rectangle: rect={:?}", rect);
        let bottom = self.to_dev_y(rect.bottom);
        let right = self.to_dev_x(rect.right);
        let top = self.to_dev_y(rect.top);
        let left = self.to_dev_x(rect.left);
        let rw = self.to_dev_h(rw);
        let rh = self.to_dev_h(rh);
        self.push_group();
        let mut opts = AttrList::new();
        self.apply_pen(&mut opts);
        self.apply_brush(&mut opts);
        let node = self.sink.element(self.group(), "rect");
        self.sink.set(node, "x", left.to_string());
        self.sink.set(node, "y", top.to_string());
        self.sink.set(node, "width", (right - left).to_string());
        self.sink.set(node, "height", (bottom - top).to_string());
        if rw / 2 != 0 {
            self.sink.set(node, "rx", (rw / 2).to_string());
        }
        if rh / 2 != 0 {
            self.sink.set(node, "ry", (rh / 2).to_string());
        }
        self.sink.apply(node, &opts);
    }

    fn ellipse(&mut self, rect: &Rect) {
        if self.state.selected.brush.is_none() || self.state.selected.pen.is_none() {
            debug!("[gdi] ellipse: rect={:?} with no pen or brush selected", rect);
            return;
        }
        debug!("[gdi] ellipse: rect={:?}", rect);
        let bottom = self.to_dev_y(rect.bottom);
        let right = self.to_dev_x(rect.right);
        let top = self.to_dev_y(rect.top);
        let left = self.to_dev_x(rect.left);
        self.push_group();
        let width2 = (right - left) as f64 / 2.0;
        let height2 = (bottom - top) as f64 / 2.0;
        let mut opts = AttrList::new();
        self.apply_pen(&mut opts);
        self.apply_brush(&mut opts);
        let node = self.sink.element(self.group(), "ellipse");
        self.sink.set(node, "cx", fmt_num(left as f64 + width2));
        self.sink.set(node, "cy", fmt_num(top as f64 + height2));
        self.sink.set(node, "rx", fmt_num(width2));
        self.sink.set(node, "ry", fmt_num(height2));
        self.sink.apply(node, &opts);
    }

    fn line_to(&mut self, x: i32, y: i32) {
        if self.state.selected.pen.is_none() {
            debug!("[gdi] lineTo: x={} y={} with no pen selected", x, y);
            return;
        }
        let to_x = self.to_dev_x(x);
        let to_y = self.to_dev_y(y);
        let from_x = self.to_dev_x(self.state.x);
        let from_y = self.to_dev_y(self.state.y);
        self.state.x = x;
        self.state.y = y;
        debug!(
            "[gdi] lineTo: TRANSLATED: toX={} toY={} fromX={} fromY={}",
            to_x, to_y, from_x, from_y
        );
        if let Some(path) = self.path.as_mut() {
            path.line(&[(from_x, from_y), (to_x, to_y)]);
            return;
        }
        self.push_group();
        let mut opts = AttrList::new();
        self.apply_pen(&mut opts);
        let node = self.sink.element(self.group(), "line");
        self.sink.set(node, "x1", from_x.to_string());
        self.sink.set(node, "y1", from_y.to_string());
        self.sink.set(node, "x2", to_x.to_string());
        self.sink.set(node, "y2", to_y.to_string());
        self.sink.apply(node, &opts);
    }

    fn move_to(&mut self, x: i32, y: i32) {
        debug!("[gdi] moveTo: x={} y={}", x, y);
        self.state.x = x;
        self.state.y = y;
        if self.path.is_some() {
            let dx = self.to_dev_x(x);
            let dy = self.to_dev_y(y);
            if let Some(path) = self.path.as_mut() {
                path.move_to(dx, dy);
            }
        }
    }

    fn polygon(&mut self, points: &[Point], first: bool) {
        if self.state.selected.brush.is_none() || self.state.selected.pen.is_none() {
            debug!("[gdi] polygon: {} points with no pen or brush selected", points.len());
            return;
        }
        debug!("[gdi] polygon: {} points", points.len());
        let pts: Vec<(i32, i32)> = points
            .iter()
            .map(|p| (self.to_dev_x(p.x), self.to_dev_y(p.y)))
            .collect();
        if first {
            self.push_group();
        }
        let mut opts = AttrList::new();
        opts.set(
            "fill-rule",
            if self.state.poly_fill_mode == poly_fill_mode::ALTERNATE {
                "evenodd"
            } else {
                "nonzero"
            },
        );
        self.apply_pen(&mut opts);
        self.apply_brush(&mut opts);
        let node = self.sink.element(self.group(), "polygon");
        self.sink.set(node, "points", join_points(&pts));
        self.sink.apply(node, &opts);
    }

    fn poly_polygon(&mut self, polygons: &[Vec<Point>]) {
        debug!("[gdi] polyPolygon: {} polygons", polygons.len());
        for (i, polygon) in polygons.iter().enumerate() {
            self.polygon(polygon, i == 0);
        }
    }

    fn polyline(&mut self, to: bool, points: &[Point]) {
        if self.state.selected.pen.is_none() {
            debug!("[gdi] polyline: {} points with no pen selected", points.len());
            return;
        }
        debug!("[gdi] polyline: isLineTo={} {} points", to, points.len());
        let pts: Vec<(i32, i32)> = points
            .iter()
            .map(|p| (self.to_dev_x(p.x), self.to_dev_y(p.y)))
            .collect();
        if self.path.is_some() {
            let start = if !to || pts.is_empty() {
                (self.to_dev_x(self.state.x), self.to_dev_y(self.state.y))
            } else {
                pts[0]
            };
            let path = self.path.as_mut().unwrap();
            path.move_to(start.0, start.1);
            path.line(&pts);
        } else {
            self.push_group();
            let mut opts = AttrList::new();
            opts.set("fill", "none");
            self.apply_pen(&mut opts);
            let mut pts = pts;
            if to && !points.is_empty() {
                let first = points[0];
                if first.x != self.state.x || first.y != self.state.y {
                    pts.insert(
                        0,
                        (self.to_dev_x(self.state.x), self.to_dev_y(self.state.y)),
                    );
                }
            }
            let node = self.sink.element(self.group(), "polyline");
            self.sink.set(node, "points", join_points(&pts));
            self.sink.apply(node, &opts);
        }
        if let Some(last) = points.last() {
            self.state.x = last.x;
            self.state.y = last.y;
        }
    }

    fn polybezier(&mut self, to: bool, points: &[Point]) -> MetafileResult<()> {
        if self.state.selected.pen.is_none() {
            debug!("[gdi] polybezier: {} points with no pen selected", points.len());
            return Ok(());
        }
        debug!("[gdi] polybezier: isPolyBezierTo={} {} points", to, points.len());
        if self.path.is_none() {
            return Err(MetafileError::Unimplemented(
                "polybezier outside a path bracket".to_string(),
            ));
        }
        let pts: Vec<(i32, i32)> = points
            .iter()
            .map(|p| (self.to_dev_x(p.x), self.to_dev_y(p.y)))
            .collect();
        if pts.len() < if to { 3 } else { 4 } {
            return Err(MetafileError::InvalidRecord(
                "not enough points to draw bezier".to_string(),
            ));
        }
        // A plain polybezier starts at its first point; the "to" variant
        // continues from the current position, every point a control point.
        let first_ctrl = if to {
            0
        } else {
            let start = pts[0];
            self.path.as_mut().unwrap().move_to(start.0, start.1);
            1
        };
        let path = self.path.as_mut().unwrap();
        let mut i = first_ctrl;
        while i + 3 <= pts.len() {
            let (cx1, cy1) = pts[i];
            let (cx2, cy2) = pts[i + 1];
            let (ex, ey) = pts[i + 2];
            path.curve_c(cx1, cy1, cx2, cy2, ex, ey);
            i += 3;
        }
        if let Some(last) = points.last() {
            self.state.x = last.x;
            self.state.y = last.y;
        }
        Ok(())
    }

    fn text_out(&mut self, x: i32, y: i32, text: &str) {
        debug!("[gdi] textOut: x={} y={} text={}", x, y, text);
        let dev_x = self.to_dev_x(x);
        let dev_y = self.to_dev_y(y);
        self.push_group();
        let mut opts = AttrList::new();
        self.apply_font(&mut opts);
        let escapement = self
            .state
            .selected
            .font
            .as_ref()
            .map_or(0, |font| font.escapement);
        if escapement != 0 {
            opts.set(
                "transform",
                format!("rotate({},{},{})", -escapement as f64 / 10.0, dev_x, dev_y),
            );
            opts.set("style", "dominant-baseline: middle; text-anchor: start;");
        }
        if self.state.bk_mode == mix_mode::OPAQUE {
            let filter = self.text_bk_filter();
            opts.set("filter", format!("url(#{})", filter));
        }
        let node = self.sink.element(self.group(), "text");
        self.sink.set(node, "x", dev_x.to_string());
        self.sink.set(node, "y", dev_y.to_string());
        self.sink.apply(node, &opts);
        self.sink.set_text(node, text);
    }

    fn draw_image(&mut self, x: i32, y: i32, width: i32, height: i32, href: String) {
        let dev_x = self.to_dev_x(x);
        let dev_y = self.to_dev_y(y);
        let dev_w = self.to_dev_w(width);
        let dev_h = self.to_dev_h(height);
        debug!(
            "[gdi] image: TRANSLATED: x={} y={} w={} h={}",
            dev_x, dev_y, dev_w, dev_h
        );
        self.push_group();
        let node = self.sink.element(self.group(), "image");
        self.sink.set(node, "x", dev_x.to_string());
        self.sink.set(node, "y", dev_y.to_string());
        self.sink.set(node, "width", dev_w.to_string());
        self.sink.set(node, "height", dev_h.to_string());
        self.sink.set(node, "href", href);
    }

    // --- path bracket ----------------------------------------------------

    fn end_path(&mut self) -> MetafileResult<()> {
        debug!("[gdi] endPath");
        let Some(builder) = self.path.take() else {
            return Err(MetafileError::InvalidRecord(
                "no path bracket: cannot end path".to_string(),
            ));
        };
        self.push_group();
        self.select(GraphicsObject::Path(Rc::new(PathObject {
            svg_path: builder.path().to_string(),
        })));
        Ok(())
    }

    fn close_figure(&mut self) -> MetafileResult<()> {
        debug!("[gdi] closeFigure");
        match self.path.as_mut() {
            Some(path) => {
                path.close();
                Ok(())
            }
            None => Err(MetafileError::InvalidRecord(
                "no path bracket: cannot close figure".to_string(),
            )),
        }
    }

    fn fill_path(&mut self) -> MetafileResult<()> {
        debug!("[gdi] fillPath");
        let Some(selected) = self.state.selected.path.clone() else {
            return Err(MetafileError::InvalidRecord("no path selected".to_string()));
        };
        self.push_group();
        let mut opts = AttrList::new();
        self.apply_pen(&mut opts);
        self.apply_brush(&mut opts);
        let node = self.sink.element(self.group(), "path");
        self.sink.set(node, "d", selected.svg_path.clone());
        self.sink.apply(node, &opts);
        self.state.selected.path = None;
        Ok(())
    }

    fn stroke_path(&mut self) -> MetafileResult<()> {
        debug!("[gdi] strokePath");
        let Some(selected) = self.state.selected.path.clone() else {
            return Err(MetafileError::InvalidRecord("no path selected".to_string()));
        };
        self.push_group();
        let mut opts = AttrList::new();
        opts.set("fill", "none");
        self.apply_pen(&mut opts);
        let node = self.sink.element(self.group(), "path");
        self.sink.set(node, "d", selected.svg_path.clone());
        self.sink.apply(node, &opts);
        self.state.selected.path = None;
        Ok(())
    }

    // --- test introspection ----------------------------------------------

    /// The currently selected pen, if any.
    pub fn selected_pen(&self) -> Option<&Pen> {
        self.state.selected.pen.as_deref()
    }

    /// The currently selected brush, if any.
    pub fn selected_brush(&self) -> Option<&Brush> {
        self.state.selected.brush.as_deref()
    }

    /// Number of saved frames below the active state.
    pub fn saved_states(&self) -> usize {
        self.stack.len()
    }
}

fn join_points(pts: &[(i32, i32)]) -> String {
    pts.iter()
        .map(|(x, y)| format!("{},{}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
