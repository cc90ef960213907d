//! Scanline-based clip regions.
//!
//! A region is either null (complexity 0), a single rectangle
//! (complexity 1), or a top-to-bottom list of horizontal bands, each holding
//! left-to-right non-overlapping spans (complexity 2). All coordinates are
//! half-open: `right` and `bottom` are excluded, matching `Rect::empty` and
//! the way clip rectangles are rasterized (`width = right - left`).

use tracing::debug;

use crate::error::{MetafileError, MetafileResult};
use crate::primitives::Rect;
use crate::reader::ByteReader;

/// One horizontal span `[left, right)` inside a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanline {
    pub left: i32,
    pub right: i32,
}

/// A horizontal band `[top, bottom)` with its spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub top: i32,
    pub bottom: i32,
    pub scanlines: Vec<Scanline>,
}

impl Scan {
    fn from_rect(r: &Rect) -> Self {
        Self {
            top: r.top,
            bottom: r.bottom,
            scanlines: vec![Scanline {
                left: r.left,
                right: r.right,
            }],
        }
    }

    fn append(&mut self, r: &Rect) {
        self.scanlines.push(Scanline {
            left: r.left,
            right: r.right,
        });
    }

    /// Removes the span `[left, right)` from every scanline, splitting
    /// scanlines the span cuts through. Returns false once no scanlines
    /// remain.
    fn subtract(&mut self, left: i32, right: i32) -> bool {
        let mut kept = Vec::with_capacity(self.scanlines.len());
        for sl in &self.scanlines {
            if sl.right <= left || sl.left >= right {
                kept.push(*sl);
                continue;
            }
            if sl.left < left {
                kept.push(Scanline {
                    left: sl.left,
                    right: left,
                });
            }
            if sl.right > right {
                kept.push(Scanline {
                    left: right,
                    right: sl.right,
                });
            }
        }
        self.scanlines = kept;
        !self.scanlines.is_empty()
    }

    /// Trims every scanline to `[left, right)`, dropping the ones that fall
    /// entirely outside. Returns false once no scanlines remain.
    fn intersect(&mut self, left: i32, right: i32) -> bool {
        self.scanlines.retain(|sl| sl.right > left && sl.left < right);
        for sl in &mut self.scanlines {
            sl.left = sl.left.max(left);
            sl.right = sl.right.min(right);
        }
        !self.scanlines.is_empty()
    }
}

/// A clip region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub bounds: Option<Rect>,
    pub scans: Option<Vec<Scan>>,
    /// 0 = null, 1 = simple rectangle, 2 = complex.
    pub complexity: u8,
}

impl Region {
    /// The null region.
    pub fn null() -> Self {
        Self {
            bounds: None,
            scans: None,
            complexity: 0,
        }
    }

    /// A simple region covering one rectangle.
    pub fn simple(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let mut rgn = Self {
            bounds: Some(Rect::new(left, top, right, bottom)),
            scans: None,
            complexity: 1,
        };
        rgn.update_complexity();
        rgn
    }

    /// Parses the RGNDATA payload of an EMF clip-region record: a fixed
    /// 32-byte sub-header, then `count` rectangles. Consecutive rectangles
    /// sharing a band are coalesced into one scan.
    pub fn parse_emf(reader: &mut ByteReader) -> MetafileResult<Self> {
        let hdr_size = reader.read_u32()?;
        if hdr_size != 32 {
            return Err(MetafileError::InvalidRecord(
                "invalid region header".to_string(),
            ));
        }
        reader.skip(4)?; // RDH_RECTANGLES
        let rect_cnt = reader.read_u32()?;
        let rgn_size = reader.read_u32()?;
        if rect_cnt * 16 != rgn_size {
            return Err(MetafileError::InvalidRecord(
                "invalid region data".to_string(),
            ));
        }
        let bounds = Rect::parse_long(reader)?;
        let mut scans: Vec<Scan> = Vec::new();
        for _ in 0..rect_cnt {
            let r = Rect::parse_long(reader)?;
            match scans.last_mut() {
                Some(scan) if scan.top == r.top && scan.bottom == r.bottom => scan.append(&r),
                _ => scans.push(Scan::from_rect(&r)),
            }
        }
        let mut rgn = if scans.is_empty() {
            Region::null()
        } else {
            Region {
                bounds: Some(bounds),
                scans: Some(scans),
                complexity: 2,
            }
        };
        rgn.update_complexity();
        Ok(rgn)
    }

    /// Parses the 16-bit region object of a `META_CREATEREGION` record.
    pub fn parse_wmf(reader: &mut ByteReader) -> MetafileResult<Self> {
        reader.skip(2)?; // nextInChain
        let obj_type = reader.read_i16()?;
        if obj_type != 0x0006 {
            return Err(MetafileError::InvalidRecord(
                "unexpected region object type".to_string(),
            ));
        }
        reader.skip(4)?; // objectCount
        reader.skip(2)?; // regionSize
        let scan_cnt = reader.read_i16()? as usize;
        reader.skip(2)?; // maxScan
        let bounds = Rect::parse_short(reader)?;
        let mut scans = Vec::with_capacity(scan_cnt);
        for _ in 0..scan_cnt {
            let coord_cnt = reader.read_u16()? as usize;
            let top = reader.read_i16()? as i32;
            let bottom = reader.read_i16()? as i32;
            let mut scan = Scan {
                top,
                bottom,
                scanlines: Vec::with_capacity(coord_cnt / 2),
            };
            for _ in 0..coord_cnt / 2 {
                let left = reader.read_i16()? as i32;
                let right = reader.read_i16()? as i32;
                scan.scanlines.push(Scanline { left, right });
            }
            reader.skip(2)?; // trailing copy of coord_cnt
            scans.push(scan);
        }
        let mut rgn = if scans.is_empty() {
            Region::null()
        } else {
            Region {
                bounds: Some(bounds),
                scans: Some(scans),
                complexity: 2,
            }
        };
        rgn.update_complexity();
        Ok(rgn)
    }

    /// Re-derives `complexity` from the presence of bounds and scans and
    /// collapses a complex region whose single scan covers its bounds back
    /// to a simple one. Must run after every structural mutation.
    pub fn update_complexity(&mut self) {
        match self.bounds {
            None => {
                self.complexity = 0;
                self.scans = None;
            }
            Some(b) if b.empty() => {
                self.complexity = 0;
                self.scans = None;
                self.bounds = None;
            }
            Some(b) => {
                if self.scans.is_none() {
                    self.complexity = 1;
                    return;
                }
                self.complexity = 2;
                let scans = self.scans.as_ref().unwrap();
                if scans.len() == 1 {
                    let scan = &scans[0];
                    if scan.top == b.top && scan.bottom == b.bottom && scan.scanlines.len() == 1 {
                        let sl = &scan.scanlines[0];
                        if sl.left == b.left && sl.right == b.right {
                            self.scans = None;
                            self.complexity = 1;
                        }
                    }
                }
            }
        }
    }

    /// Removes `rect` from the region.
    pub fn subtract(&mut self, rect: &Rect) {
        let Some(bounds) = self.bounds else {
            return;
        };
        if bounds.intersect(rect).is_none() {
            return;
        }

        // A simple region gets one synthetic scan spanning its bounds so the
        // complex-region logic below covers both cases.
        if self.scans.is_none() {
            self.scans = Some(vec![Scan::from_rect(&bounds)]);
            self.complexity = 2;
        }
        let scans = self.scans.as_mut().unwrap();

        // Split the scan straddling rect.top so everything above stays
        // untouched.
        let mut i = 0;
        while i < scans.len() {
            if scans[i].bottom > rect.top {
                if scans[i].top < rect.top {
                    debug!("[region] split top scan {} for subtraction", i);
                    let mut lower = scans[i].clone();
                    scans[i].bottom = rect.top;
                    lower.top = rect.top;
                    scans.insert(i + 1, lower);
                    i += 1;
                }
                break;
            }
            i += 1;
        }
        let first = i;

        // Symmetrically split the scan straddling rect.bottom.
        while i < scans.len() {
            if scans[i].top >= rect.bottom {
                break;
            }
            if scans[i].bottom > rect.bottom {
                debug!("[region] split bottom scan {} for subtraction", i);
                let mut lower = scans[i].clone();
                scans[i].bottom = rect.bottom;
                lower.top = rect.bottom;
                scans.insert(i + 1, lower);
                i += 1;
                break;
            }
            i += 1;
        }
        let mut last = i;

        // Every scan in [first, last) lies fully inside the band; remove the
        // horizontal span and drop scans left empty.
        let mut si = first;
        while si < last {
            if scans[si].subtract(rect.left, rect.right) {
                si += 1;
            } else {
                debug!("[region] remove now empty scan {} due to subtraction", si);
                scans.remove(si);
                last -= 1;
            }
        }

        self.recompute_bounds();
    }

    /// Intersects the region with `rect`.
    pub fn intersect(&mut self, rect: &Rect) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let Some(new_bounds) = bounds.intersect(rect) else {
            self.bounds = None;
            self.scans = None;
            self.complexity = 0;
            return;
        };
        self.bounds = Some(new_bounds);

        if let Some(scans) = self.scans.as_mut() {
            // Drop scans entirely above the new top, clamp the first
            // surviving one.
            let above = scans
                .iter()
                .take_while(|s| s.bottom <= new_bounds.top)
                .count();
            if above > 0 {
                debug!("[region] remove {} scans from top", above);
                scans.drain(0..above);
            }
            if let Some(scan) = scans.first_mut() {
                scan.top = scan.top.max(new_bounds.top);
            }

            // Trim the remainder horizontally, truncating once a scan falls
            // entirely below the new bottom.
            let mut si = 0;
            while si < scans.len() {
                if scans[si].top >= new_bounds.bottom {
                    debug!("[region] remove {} scans from bottom", scans.len() - si);
                    scans.truncate(si);
                    break;
                }
                if scans[si].intersect(new_bounds.left, new_bounds.right) {
                    si += 1;
                } else {
                    debug!("[region] remove now empty scan {} due to intersection", si);
                    scans.remove(si);
                }
            }
            if let Some(scan) = scans.last_mut() {
                scan.bottom = scan.bottom.min(new_bounds.bottom);
            }
            if scans.is_empty() {
                self.bounds = None;
                self.scans = None;
            } else {
                // The clipped scans may no longer reach the intersected
                // bounds on any side.
                self.recompute_bounds();
                return;
            }
        }
        self.update_complexity();
    }

    /// Translates the region. Pure translation, so the complexity class
    /// cannot change.
    pub fn offset(&mut self, dx: i32, dy: i32) {
        if let Some(bounds) = self.bounds.as_mut() {
            bounds.left += dx;
            bounds.top += dy;
            bounds.right += dx;
            bounds.bottom += dy;
        }
        if let Some(scans) = self.scans.as_mut() {
            for scan in scans {
                scan.top += dy;
                scan.bottom += dy;
                for sl in &mut scan.scanlines {
                    sl.left += dx;
                    sl.right += dx;
                }
            }
        }
    }

    /// Shrinks `bounds` to the envelope of the remaining scanlines; a region
    /// with nothing left becomes null.
    fn recompute_bounds(&mut self) {
        let Some(scans) = self.scans.as_ref() else {
            self.update_complexity();
            return;
        };
        let mut left: Option<i32> = None;
        let mut right: Option<i32> = None;
        for scan in scans {
            if let Some(sl) = scan.scanlines.first() {
                left = Some(left.map_or(sl.left, |l: i32| l.min(sl.left)));
            }
            if let Some(sl) = scan.scanlines.last() {
                right = Some(right.map_or(sl.right, |r: i32| r.max(sl.right)));
            }
        }
        match (scans.first(), scans.last(), left, right) {
            (Some(first), Some(last), Some(left), Some(right)) => {
                self.bounds = Some(Rect::new(left, first.top, right, last.bottom));
                self.update_complexity();
            }
            _ => {
                self.bounds = None;
                self.scans = None;
                self.complexity = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: i32 = 10;

    /// Rasterizes a region onto a GRID x GRID boolean mask.
    fn rasterize(rgn: &Region) -> Vec<bool> {
        let mut grid = vec![false; (GRID * GRID) as usize];
        let mut fill = |left: i32, top: i32, right: i32, bottom: i32| {
            for y in top.max(0)..bottom.min(GRID) {
                for x in left.max(0)..right.min(GRID) {
                    grid[(y * GRID + x) as usize] = true;
                }
            }
        };
        match rgn.complexity {
            0 => {}
            1 => {
                let b = rgn.bounds.unwrap();
                fill(b.left, b.top, b.right, b.bottom);
            }
            2 => {
                for scan in rgn.scans.as_ref().unwrap() {
                    for sl in &scan.scanlines {
                        fill(sl.left, scan.top, sl.right, scan.bottom);
                    }
                }
            }
            _ => unreachable!(),
        }
        grid
    }

    fn rect_mask(r: &Rect) -> Vec<bool> {
        let mut grid = vec![false; (GRID * GRID) as usize];
        for y in r.top.max(0)..r.bottom.min(GRID) {
            for x in r.left.max(0)..r.right.min(GRID) {
                grid[(y * GRID + x) as usize] = true;
            }
        }
        grid
    }

    /// Asserts the complexity/bounds/scans invariant of the region model.
    fn check_invariants(rgn: &Region) {
        match rgn.complexity {
            0 => {
                assert!(rgn.bounds.is_none());
                assert!(rgn.scans.is_none());
            }
            1 => {
                assert!(rgn.bounds.is_some());
                assert!(rgn.scans.is_none());
                assert!(!rgn.bounds.unwrap().empty());
            }
            2 => {
                let bounds = rgn.bounds.unwrap();
                let scans = rgn.scans.as_ref().unwrap();
                assert!(!scans.is_empty());
                for scan in scans {
                    assert!(scan.top < scan.bottom);
                    assert!(!scan.scanlines.is_empty());
                    for pair in scan.scanlines.windows(2) {
                        assert!(pair[0].right <= pair[1].left, "scanlines must not overlap");
                    }
                }
                for pair in scans.windows(2) {
                    assert!(pair[0].bottom <= pair[1].top, "scans must be sorted");
                }
                // A single full-bounds scanline must have collapsed to simple.
                if scans.len() == 1 && scans[0].scanlines.len() == 1 {
                    let scan = &scans[0];
                    let sl = scan.scanlines[0];
                    assert!(
                        !(scan.top == bounds.top
                            && scan.bottom == bounds.bottom
                            && sl.left == bounds.left
                            && sl.right == bounds.right),
                        "complex region equal to its bounds must collapse"
                    );
                }
            }
            other => panic!("invalid complexity {}", other),
        }
    }

    fn all_rects() -> Vec<Rect> {
        let coords = [0, 2, 4, 6, 8, 10];
        let mut rects = Vec::new();
        for &l in &coords {
            for &r in &coords {
                if l >= r {
                    continue;
                }
                for &t in &coords {
                    for &b in &coords {
                        if t >= b {
                            continue;
                        }
                        rects.push(Rect::new(l, t, r, b));
                    }
                }
            }
        }
        rects
    }

    #[test]
    fn test_simple_region() {
        let rgn = Region::simple(0, 0, 10, 10);
        assert_eq!(rgn.complexity, 1);
        check_invariants(&rgn);

        let rgn = Region::simple(5, 5, 5, 10);
        assert_eq!(rgn.complexity, 0);
        check_invariants(&rgn);
    }

    #[test]
    fn test_subtract_matches_brute_force() {
        for rect in all_rects() {
            let mut rgn = Region::simple(0, 0, GRID, GRID);
            rgn.subtract(&rect);
            check_invariants(&rgn);

            let expect: Vec<bool> = rect_mask(&Rect::new(0, 0, GRID, GRID))
                .iter()
                .zip(rect_mask(&rect).iter())
                .map(|(&a, &b)| a && !b)
                .collect();
            assert_eq!(rasterize(&rgn), expect, "subtract {:?}", rect);
        }
    }

    #[test]
    fn test_intersect_matches_brute_force() {
        for rect in all_rects() {
            let mut rgn = Region::simple(0, 0, GRID, GRID);
            rgn.intersect(&rect);
            check_invariants(&rgn);

            let expect: Vec<bool> = rect_mask(&Rect::new(0, 0, GRID, GRID))
                .iter()
                .zip(rect_mask(&rect).iter())
                .map(|(&a, &b)| a && b)
                .collect();
            assert_eq!(rasterize(&rgn), expect, "intersect {:?}", rect);
        }
    }

    #[test]
    fn test_subtract_then_intersect_chain() {
        for sub in all_rects().iter().step_by(7) {
            for isect in all_rects().iter().step_by(11) {
                let mut rgn = Region::simple(0, 0, GRID, GRID);
                rgn.subtract(sub);
                rgn.intersect(isect);
                check_invariants(&rgn);

                let expect: Vec<bool> = rect_mask(&Rect::new(0, 0, GRID, GRID))
                    .iter()
                    .zip(rect_mask(sub).iter())
                    .zip(rect_mask(isect).iter())
                    .map(|((&a, &s), &i)| a && !s && i)
                    .collect();
                assert_eq!(rasterize(&rgn), expect, "sub {:?} isect {:?}", sub, isect);
            }
        }
    }

    #[test]
    fn test_subtract_middle_leaves_frame() {
        let mut rgn = Region::simple(0, 0, 10, 10);
        rgn.subtract(&Rect::new(2, 2, 8, 8));
        assert_eq!(rgn.complexity, 2);
        let scans = rgn.scans.as_ref().unwrap();
        // Bands above, around, and below the hole.
        assert_eq!(scans.len(), 3);
        assert_eq!(scans[1].scanlines.len(), 2);
        check_invariants(&rgn);
    }

    #[test]
    fn test_subtract_everything_gives_null() {
        let mut rgn = Region::simple(2, 2, 8, 8);
        rgn.subtract(&Rect::new(0, 0, 10, 10));
        assert_eq!(rgn.complexity, 0);
        check_invariants(&rgn);
    }

    #[test]
    fn test_intersect_collapses_to_simple() {
        let mut rgn = Region::simple(0, 0, 10, 10);
        rgn.subtract(&Rect::new(5, 5, 10, 10));
        assert_eq!(rgn.complexity, 2);
        // Keep only the untouched upper band: one scan, one scanline,
        // matching the new bounds, which must collapse back to simple.
        rgn.intersect(&Rect::new(0, 0, 10, 5));
        assert_eq!(rgn.complexity, 1);
        assert_eq!(rgn.bounds, Some(Rect::new(0, 0, 10, 5)));
        check_invariants(&rgn);
    }

    #[test]
    fn test_offset_translates_everything() {
        let mut rgn = Region::simple(0, 0, 10, 10);
        rgn.subtract(&Rect::new(0, 0, 5, 5));
        let before = rgn.clone();
        rgn.offset(3, -2);
        check_invariants(&rgn);
        assert_eq!(rgn.complexity, before.complexity);
        let b = rgn.bounds.unwrap();
        let prev = before.bounds.unwrap();
        assert_eq!(
            (b.left, b.top, b.right, b.bottom),
            (prev.left + 3, prev.top - 2, prev.right + 3, prev.bottom - 2)
        );
    }

    #[test]
    fn test_parse_emf_region() {
        use byteorder::{ByteOrder, LittleEndian};
        // Two rects in one band plus one below: 32-byte header + 3 rects.
        let rects: [[i32; 4]; 3] = [[0, 0, 3, 2], [5, 0, 8, 2], [0, 2, 8, 4]];
        let mut data = Vec::new();
        let mut u32buf = [0u8; 4];
        let mut push_u32 = |data: &mut Vec<u8>, v: u32| {
            LittleEndian::write_u32(&mut u32buf, v);
            data.extend_from_slice(&u32buf);
        };
        push_u32(&mut data, 32);
        push_u32(&mut data, 1); // RDH_RECTANGLES
        push_u32(&mut data, 3);
        push_u32(&mut data, 48);
        for v in [0i32, 0, 8, 4] {
            push_u32(&mut data, v as u32);
        }
        for rect in &rects {
            for &v in rect {
                push_u32(&mut data, v as u32);
            }
        }

        let mut reader = ByteReader::new(&data);
        let rgn = Region::parse_emf(&mut reader).unwrap();
        assert_eq!(rgn.complexity, 2);
        let scans = rgn.scans.as_ref().unwrap();
        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].scanlines.len(), 2);
        assert_eq!(scans[1].scanlines.len(), 1);
        check_invariants(&rgn);
    }

    #[test]
    fn test_parse_emf_region_size_mismatch() {
        use byteorder::{ByteOrder, LittleEndian};
        let mut data = vec![0u8; 16];
        LittleEndian::write_u32(&mut data[0..4], 32);
        LittleEndian::write_u32(&mut data[8..12], 2); // 2 rects
        LittleEndian::write_u32(&mut data[12..16], 16); // but 16 bytes declared
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            Region::parse_emf(&mut reader),
            Err(MetafileError::InvalidRecord(_))
        ));
    }
}
