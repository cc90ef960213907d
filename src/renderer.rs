//! Renderer façade: format detection, header-derived defaults, replay, and
//! final SVG post-processing.
//!
//! The output string is the XML prolog followed by the SVG fragment's inner
//! markup; the outer `<svg>` wrapper is stripped so callers can embed the
//! result inline and re-wrap it themselves.

use tracing::{debug, info, warn};

use crate::dc::{DeviceContext, MetafileKind};
use crate::emf::EmfFile;
use crate::error::{MetafileError, MetafileResult};
use crate::gdi::{self, map_mode, metafile_type};
use crate::svg::{fmt_scaled, resize_path, resize_view_box, SvgSink};
use crate::wmf::WmfFile;

const XML_PROLOG: &str = "<?xml version='1.0' encoding='UTF-8' standalone='yes'?>\n";

/// Render settings, caller-supplied or derived from the metafile header.
///
/// `width`/`height` are CSS length strings for the output root; the extents
/// feed the initial window/viewport transform. `end_scale` only applies to
/// EMF output, rescaling the high-precision internal unit space to
/// millimeters.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub width: String,
    pub height: String,
    pub w_ext: i32,
    pub h_ext: i32,
    pub x_ext: i32,
    pub y_ext: i32,
    pub map_mode: u32,
    pub end_scale: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: "100px".to_string(),
            height: "100px".to_string(),
            w_ext: 100,
            h_ext: 100,
            x_ext: 100,
            y_ext: 100,
            map_mode: map_mode::MM_ANISOTROPIC,
            end_scale: 0.1,
        }
    }
}

impl RenderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: &str, height: &str) -> Self {
        self.width = width.to_string();
        self.height = height.to_string();
        self
    }

    pub fn with_extents(mut self, w_ext: i32, h_ext: i32, x_ext: i32, y_ext: i32) -> Self {
        self.w_ext = w_ext;
        self.h_ext = h_ext;
        self.x_ext = x_ext;
        self.y_ext = y_ext;
        self
    }

    pub fn with_map_mode(mut self, map_mode: u32) -> Self {
        self.map_mode = map_mode;
        self
    }

    pub fn with_end_scale(mut self, end_scale: f64) -> Self {
        self.end_scale = end_scale;
        self
    }
}

/// The result envelope of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    pub svg: String,
    /// `0` on success, `-1` for a recognized-but-failed decode.
    pub return_value: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

enum Metafile {
    Wmf(WmfFile),
    Emf(EmfFile),
}

/// Returns true if the buffer starts like an EMF file.
pub fn is_emf_format(data: &[u8]) -> bool {
    data.len() >= 8 && u32::from_le_bytes([data[0], data[1], data[2], data[3]]) == 1
}

/// Returns true if the buffer starts like a placeable or bare WMF file.
pub fn is_wmf_format(data: &[u8]) -> bool {
    if data.len() < 4 {
        return false;
    }
    let key = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    if key == gdi::PLACEABLE_SIGNATURE {
        return true;
    }
    let mf_type = (key & 0xffff) as u16;
    mf_type == metafile_type::MEMORYMETAFILE || mf_type == metafile_type::DISKMETAFILE
}

/// Parses a metafile and replays it into an SVG fragment.
pub struct Renderer {
    img: Metafile,
}

impl Renderer {
    /// Detects the format from the magic bytes and decodes the full record
    /// stream up front; no drawing happens yet.
    pub fn new(data: &[u8]) -> MetafileResult<Self> {
        let img = if is_emf_format(data) {
            debug!("[renderer] detected EMF input");
            Metafile::Emf(EmfFile::parse(data)?)
        } else if is_wmf_format(data) {
            debug!("[renderer] detected WMF input");
            Metafile::Wmf(WmfFile::parse(data)?)
        } else {
            return Err(MetafileError::FormatNotRecognized);
        };
        Ok(Self { img })
    }

    fn is_emf(&self) -> bool {
        matches!(self.img, Metafile::Emf(_))
    }

    /// Header-derived render settings, used when the caller supplies none.
    pub fn default_settings(&self) -> RenderSettings {
        match &self.img {
            Metafile::Emf(emf) => {
                let bounds = &emf.header.bounds;
                let w = bounds.width().abs();
                let h = bounds.height().abs();
                RenderSettings::new()
                    .with_size(&format!("{}px", w), &format!("{}px", h))
                    .with_extents(w, h, w, h)
            }
            Metafile::Wmf(wmf) => match &wmf.placeable {
                Some(placeable) => {
                    let bounds = &placeable.bounds;
                    let x_ext = bounds.right - bounds.left;
                    // The placeable settings flip the y axis: the extent is
                    // top minus bottom.
                    let y_ext = bounds.top - bounds.bottom;
                    RenderSettings::new()
                        .with_size(&x_ext.to_string(), &y_ext.to_string())
                        .with_extents(0, 0, x_ext, y_ext)
                }
                None => RenderSettings::new().with_extents(0, 0, 100, 100),
            },
        }
    }

    /// Replays the decoded records and serializes the result.
    pub fn render(&self, settings: &RenderSettings) -> MetafileResult<String> {
        match &self.img {
            Metafile::Emf(emf) => self.render_emf(emf, settings),
            Metafile::Wmf(wmf) => self.render_wmf(wmf, settings),
        }
    }

    fn render_emf(&self, emf: &EmfFile, settings: &RenderSettings) -> MetafileResult<String> {
        let mut dc = DeviceContext::new(MetafileKind::Emf, SvgSink::new());
        dc.set_window_ext(settings.w_ext, settings.h_ext);
        dc.set_viewport_ext(settings.x_ext, settings.y_ext);
        dc.set_map_mode(settings.map_mode);
        info!("[emf] BEGIN RENDERING --->");
        dc.play(&emf.records)?;
        dc.ensure_group();
        info!("[emf] <--- DONE RENDERING");

        let mut sink = dc.into_sink();
        // Convert the root coordinate group to millimeters and rescale the
        // viewBox and all path data by the end scale.
        if let Some(group) = sink.first_child_with_tag(SvgSink::ROOT, "svg") {
            if let Some(width) = sink.get(group, "width").and_then(|v| v.parse::<f64>().ok()) {
                sink.set(group, "width", format!("{}mm", fmt_scaled(width * settings.end_scale)));
            }
            if let Some(height) = sink.get(group, "height").and_then(|v| v.parse::<f64>().ok()) {
                sink.set(
                    group,
                    "height",
                    format!("{}mm", fmt_scaled(height * settings.end_scale)),
                );
            }
            if let Some(view_box) = sink.get(group, "viewBox").map(str::to_string) {
                sink.set(group, "viewBox", resize_view_box(&view_box, settings.end_scale));
            }
            sink.set(group, "preserveAspectRatio", "xMidYMid meet");
        }
        for path in sink.elements_with_tag("path") {
            if let Some(d) = sink.get(path, "d").map(str::to_string) {
                sink.set(path, "d", resize_path(&d, settings.end_scale));
            }
        }

        Ok(format!("{}{}", XML_PROLOG, sink.to_inner_markup()))
    }

    fn render_wmf(&self, wmf: &WmfFile, settings: &RenderSettings) -> MetafileResult<String> {
        let mut dc = DeviceContext::new(MetafileKind::Wmf, SvgSink::new());
        dc.set_viewport_ext(settings.x_ext, settings.y_ext);
        dc.set_map_mode(settings.map_mode);
        info!("[wmf] BEGIN RENDERING --->");
        dc.play(&wmf.records)?;
        dc.ensure_group();
        info!("[wmf] <--- DONE RENDERING");

        let mut sink = dc.into_sink();
        // The root carries the physical size and viewBox; serialization
        // strips it, leaving the inner coordinate groups.
        sink.set(
            SvgSink::ROOT,
            "viewBox",
            format!("0 0 {} {}", settings.x_ext.abs(), settings.y_ext.abs()),
        );
        sink.set(SvgSink::ROOT, "preserveAspectRatio", "none");
        if let Ok(width) = settings.width.trim_end_matches("px").parse::<f64>() {
            sink.set(SvgSink::ROOT, "width", fmt_scaled(width.abs()));
        }
        if let Ok(height) = settings.height.trim_end_matches("px").parse::<f64>() {
            sink.set(SvgSink::ROOT, "height", fmt_scaled(height.abs()));
        }

        Ok(format!("{}{}", XML_PROLOG, sink.to_inner_markup()))
    }
}

/// Converts a metafile buffer to SVG.
///
/// Unrecognized input is an error; a recognized file that fails to decode
/// maps to the `-1` envelope with an empty SVG string, with the underlying
/// message logged.
pub fn convert(data: &[u8], settings: Option<RenderSettings>) -> MetafileResult<ConvertResult> {
    if !is_emf_format(data) && !is_wmf_format(data) {
        return Err(MetafileError::FormatNotRecognized);
    }
    match convert_inner(data, settings) {
        Ok(result) => Ok(result),
        Err(err) => {
            warn!("conversion failed: {}", err);
            Ok(ConvertResult {
                svg: String::new(),
                return_value: -1,
                width: None,
                height: None,
            })
        }
    }
}

fn convert_inner(data: &[u8], settings: Option<RenderSettings>) -> MetafileResult<ConvertResult> {
    let renderer = Renderer::new(data)?;
    let settings = settings.unwrap_or_else(|| renderer.default_settings());
    let svg = renderer.render(&settings)?;
    let (width, height) = if renderer.is_emf() {
        (Some(settings.w_ext), Some(settings.h_ext))
    } else {
        (None, None)
    };
    Ok(ConvertResult {
        svg,
        return_value: 0,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        let emf = [1u8, 0, 0, 0, 88, 0, 0, 0];
        assert!(is_emf_format(&emf));
        assert!(!is_wmf_format(&[9u8, 0, 0, 0]));

        let placeable = 0x9ac6_cdd7u32.to_le_bytes();
        assert!(is_wmf_format(&placeable));
        let bare = [1u8, 0, 9, 0];
        assert!(is_wmf_format(&bare));
        assert!(!is_emf_format(&bare));
    }

    #[test]
    fn test_convert_unrecognized_input_is_an_error() {
        let garbage = [0xdeu8, 0xad, 0xbe, 0xef, 0, 0, 0, 0];
        assert!(matches!(
            convert(&garbage, None),
            Err(MetafileError::FormatNotRecognized)
        ));
    }

    #[test]
    fn test_convert_recognized_but_corrupt_gives_minus_one() {
        // EMF magic with an impossible header: recognized, fails to decode.
        let mut data = vec![1u8, 0, 0, 0, 88, 0, 0, 0];
        data.resize(88, 0); // zero signature field
        let result = convert(&data, None).unwrap();
        assert_eq!(result.return_value, -1);
        assert!(result.svg.is_empty());
    }
}
