//! GDI enumeration constants used by the record decoders and the device
//! context, plus record-type tables for both metafile formats.
//!
//! Values are from the MS-WMF and MS-EMF format specifications. Only the
//! constants the renderer actually branches on get names here; everything
//! else is matched through the record-name tables for diagnostics.

/// Map modes (MS-WMF MapMode enumeration).
pub mod map_mode {
    pub const MM_TEXT: u32 = 1;
    pub const MM_LOMETRIC: u32 = 2;
    pub const MM_HIMETRIC: u32 = 3;
    pub const MM_LOENGLISH: u32 = 4;
    pub const MM_HIENGLISH: u32 = 5;
    pub const MM_TWIPS: u32 = 6;
    pub const MM_ISOTROPIC: u32 = 7;
    pub const MM_ANISOTROPIC: u32 = 8;
}

/// Background mix modes.
pub mod mix_mode {
    pub const TRANSPARENT: u32 = 1;
    pub const OPAQUE: u32 = 2;
}

/// Stretch modes.
pub mod stretch_mode {
    pub const COLORONCOLOR: u32 = 3;
}

/// Polygon fill modes.
pub mod poly_fill_mode {
    pub const ALTERNATE: u32 = 1;
    pub const WINDING: u32 = 2;
}

/// Brush styles.
pub mod brush_style {
    pub const BS_SOLID: u32 = 0;
    pub const BS_NULL: u32 = 1;
    pub const BS_HATCHED: u32 = 2;
    pub const BS_PATTERN: u32 = 3;
    pub const BS_DIBPATTERN: u32 = 5;
    pub const BS_DIBPATTERNPT: u32 = 6;
}

/// Pen styles. The low nibble selects the dash pattern; end-cap and join
/// flags live in the high bits of the same style word.
pub mod pen_style {
    pub const PS_SOLID: u32 = 0;
    pub const PS_DASH: u32 = 1;
    pub const PS_DOT: u32 = 2;
    pub const PS_DASHDOT: u32 = 3;
    pub const PS_DASHDOTDOT: u32 = 4;
    pub const PS_NULL: u32 = 5;

    pub const PS_STYLE_MASK: u32 = 0x0000_000f;

    pub const PS_ENDCAP_SQUARE: u32 = 0x0000_0100;
    pub const PS_ENDCAP_FLAT: u32 = 0x0000_0200;
    pub const PS_ENDCAP_MASK: u32 = 0x0000_0f00;

    pub const PS_JOIN_BEVEL: u32 = 0x0000_1000;
    pub const PS_JOIN_MITER: u32 = 0x0000_2000;
    pub const PS_JOIN_MASK: u32 = 0x0000_f000;
}

/// Region combine modes (EMR_EXTSELECTCLIPRGN).
pub mod region_mode {
    pub const RGN_AND: u32 = 1;
    pub const RGN_OR: u32 = 2;
    pub const RGN_XOR: u32 = 3;
    pub const RGN_DIFF: u32 = 4;
    pub const RGN_COPY: u32 = 5;
}

/// DIB compression kinds.
pub mod bitmap_compression {
    pub const BI_RGB: u32 = 0;
    pub const BI_BITFIELDS: u32 = 3;
    pub const BI_JPEG: u32 = 4;
    pub const BI_PNG: u32 = 5;
}

pub const BITMAPCOREHEADER_SIZE: u32 = 12;
pub const BITMAPINFOHEADER_SIZE: u32 = 40;

/// Stock object indices (offset from `STOCK_OBJECT_BASE`).
pub mod stock_object {
    pub const STOCK_OBJECT_BASE: u32 = 0x8000_0000;
    pub const WHITE_BRUSH: u32 = 0x8000_0000;
    pub const LTGRAY_BRUSH: u32 = 0x8000_0001;
    pub const GRAY_BRUSH: u32 = 0x8000_0002;
    pub const DKGRAY_BRUSH: u32 = 0x8000_0003;
    pub const BLACK_BRUSH: u32 = 0x8000_0004;
    pub const NULL_BRUSH: u32 = 0x8000_0005;
    pub const WHITE_PEN: u32 = 0x8000_0006;
    pub const BLACK_PEN: u32 = 0x8000_0007;
    pub const NULL_PEN: u32 = 0x8000_0008;
    pub const SYSTEM_FONT: u32 = 0x8000_000d;
    pub const STOCK_OBJECT_LAST: u32 = 0x8000_0011;
    pub const DC_BRUSH: u32 = 0x8000_0012;
    pub const DC_PEN: u32 = 0x8000_0013;
}

/// Placeable WMF preamble signature.
pub const PLACEABLE_SIGNATURE: u32 = 0x9ac6_cdd7;
/// "` EMF`" signature stored in the EMF header.
pub const ENHMETA_SIGNATURE: u32 = 0x464d_4520;
/// Standard WMF header size in bytes.
pub const METAHEADER_SIZE: u32 = 18;

/// WMF metafile kinds.
pub mod metafile_type {
    pub const MEMORYMETAFILE: u16 = 1;
    pub const DISKMETAFILE: u16 = 2;
}

/// Supported WMF versions.
pub mod metafile_version {
    pub const METAVERSION100: u16 = 0x0100;
    pub const METAVERSION300: u16 = 0x0300;
}

/// WMF record function codes.
pub mod wmf {
    pub const META_EOF: u16 = 0x0000;
    pub const META_REALIZEPALETTE: u16 = 0x0035;
    pub const META_SETPALENTRIES: u16 = 0x0037;
    pub const META_SETBKMODE: u16 = 0x0102;
    pub const META_SETMAPMODE: u16 = 0x0103;
    pub const META_SETROP2: u16 = 0x0104;
    pub const META_SETRELABS: u16 = 0x0105;
    pub const META_SETPOLYFILLMODE: u16 = 0x0106;
    pub const META_SETSTRETCHBLTMODE: u16 = 0x0107;
    pub const META_SETTEXTCHAREXTRA: u16 = 0x0108;
    pub const META_RESTOREDC: u16 = 0x0127;
    pub const META_RESIZEPALETTE: u16 = 0x0139;
    pub const META_DIBCREATEPATTERNBRUSH: u16 = 0x0142;
    pub const META_SETLAYOUT: u16 = 0x0149;
    pub const META_SETBKCOLOR: u16 = 0x0201;
    pub const META_SETTEXTCOLOR: u16 = 0x0209;
    pub const META_SETTEXTJUSTIFICATION: u16 = 0x020a;
    pub const META_SETWINDOWORG: u16 = 0x020b;
    pub const META_SETWINDOWEXT: u16 = 0x020c;
    pub const META_SETVIEWPORTORG: u16 = 0x020d;
    pub const META_SETVIEWPORTEXT: u16 = 0x020e;
    pub const META_OFFSETWINDOWORG: u16 = 0x020f;
    pub const META_SCALEWINDOWEXT: u16 = 0x0410;
    pub const META_OFFSETVIEWPORTORG: u16 = 0x0211;
    pub const META_SCALEVIEWPORTEXT: u16 = 0x0412;
    pub const META_LINETO: u16 = 0x0213;
    pub const META_MOVETO: u16 = 0x0214;
    pub const META_EXCLUDECLIPRECT: u16 = 0x0415;
    pub const META_INTERSECTCLIPRECT: u16 = 0x0416;
    pub const META_ARC: u16 = 0x0817;
    pub const META_ELLIPSE: u16 = 0x0418;
    pub const META_FLOODFILL: u16 = 0x0419;
    pub const META_PIE: u16 = 0x081a;
    pub const META_RECTANGLE: u16 = 0x041b;
    pub const META_ROUNDRECT: u16 = 0x061c;
    pub const META_PATBLT: u16 = 0x061d;
    pub const META_SAVEDC: u16 = 0x001e;
    pub const META_SETPIXEL: u16 = 0x041f;
    pub const META_OFFSETCLIPRGN: u16 = 0x0220;
    pub const META_TEXTOUT: u16 = 0x0521;
    pub const META_BITBLT: u16 = 0x0922;
    pub const META_STRETCHBLT: u16 = 0x0b23;
    pub const META_POLYGON: u16 = 0x0324;
    pub const META_POLYLINE: u16 = 0x0325;
    pub const META_ESCAPE: u16 = 0x0626;
    pub const META_FILLREGION: u16 = 0x0228;
    pub const META_FRAMEREGION: u16 = 0x0429;
    pub const META_INVERTREGION: u16 = 0x012a;
    pub const META_PAINTREGION: u16 = 0x012b;
    pub const META_SELECTCLIPREGION: u16 = 0x012c;
    pub const META_SELECTOBJECT: u16 = 0x012d;
    pub const META_SETTEXTALIGN: u16 = 0x012e;
    pub const META_CHORD: u16 = 0x0830;
    pub const META_SETMAPPERFLAGS: u16 = 0x0231;
    pub const META_EXTTEXTOUT: u16 = 0x0a32;
    pub const META_SETDIBTODEV: u16 = 0x0d33;
    pub const META_SELECTPALETTE: u16 = 0x0234;
    pub const META_ANIMATEPALETTE: u16 = 0x0436;
    pub const META_POLYPOLYGON: u16 = 0x0538;
    pub const META_DIBBITBLT: u16 = 0x0940;
    pub const META_DIBSTRETCHBLT: u16 = 0x0b41;
    pub const META_EXTFLOODFILL: u16 = 0x0548;
    pub const META_STRETCHDIB: u16 = 0x0f43;
    pub const META_DELETEOBJECT: u16 = 0x01f0;
    pub const META_CREATEPALETTE: u16 = 0x00f7;
    pub const META_CREATEPATTERNBRUSH: u16 = 0x01f9;
    pub const META_CREATEPENINDIRECT: u16 = 0x02fa;
    pub const META_CREATEFONTINDIRECT: u16 = 0x02fb;
    pub const META_CREATEBRUSHINDIRECT: u16 = 0x02fc;
    pub const META_CREATEREGION: u16 = 0x06ff;

    /// Record name for diagnostics on skipped or unknown records.
    pub fn record_name(func: u16) -> &'static str {
        match func {
            META_EOF => "META_EOF",
            META_REALIZEPALETTE => "META_REALIZEPALETTE",
            META_SETPALENTRIES => "META_SETPALENTRIES",
            META_SETBKMODE => "META_SETBKMODE",
            META_SETMAPMODE => "META_SETMAPMODE",
            META_SETROP2 => "META_SETROP2",
            META_SETRELABS => "META_SETRELABS",
            META_SETPOLYFILLMODE => "META_SETPOLYFILLMODE",
            META_SETSTRETCHBLTMODE => "META_SETSTRETCHBLTMODE",
            META_SETTEXTCHAREXTRA => "META_SETTEXTCHAREXTRA",
            META_RESTOREDC => "META_RESTOREDC",
            META_RESIZEPALETTE => "META_RESIZEPALETTE",
            META_DIBCREATEPATTERNBRUSH => "META_DIBCREATEPATTERNBRUSH",
            META_SETLAYOUT => "META_SETLAYOUT",
            META_SETBKCOLOR => "META_SETBKCOLOR",
            META_SETTEXTCOLOR => "META_SETTEXTCOLOR",
            META_SETTEXTJUSTIFICATION => "META_SETTEXTJUSTIFICATION",
            META_SETWINDOWORG => "META_SETWINDOWORG",
            META_SETWINDOWEXT => "META_SETWINDOWEXT",
            META_SETVIEWPORTORG => "META_SETVIEWPORTORG",
            META_SETVIEWPORTEXT => "META_SETVIEWPORTEXT",
            META_OFFSETWINDOWORG => "META_OFFSETWINDOWORG",
            META_SCALEWINDOWEXT => "META_SCALEWINDOWEXT",
            META_OFFSETVIEWPORTORG => "META_OFFSETVIEWPORTORG",
            META_SCALEVIEWPORTEXT => "META_SCALEVIEWPORTEXT",
            META_LINETO => "META_LINETO",
            META_MOVETO => "META_MOVETO",
            META_EXCLUDECLIPRECT => "META_EXCLUDECLIPRECT",
            META_INTERSECTCLIPRECT => "META_INTERSECTCLIPRECT",
            META_ARC => "META_ARC",
            META_ELLIPSE => "META_ELLIPSE",
            META_FLOODFILL => "META_FLOODFILL",
            META_PIE => "META_PIE",
            META_RECTANGLE => "META_RECTANGLE",
            META_ROUNDRECT => "META_ROUNDRECT",
            META_PATBLT => "META_PATBLT",
            META_SAVEDC => "META_SAVEDC",
            META_SETPIXEL => "META_SETPIXEL",
            META_OFFSETCLIPRGN => "META_OFFSETCLIPRGN",
            META_TEXTOUT => "META_TEXTOUT",
            META_BITBLT => "META_BITBLT",
            META_STRETCHBLT => "META_STRETCHBLT",
            META_POLYGON => "META_POLYGON",
            META_POLYLINE => "META_POLYLINE",
            META_ESCAPE => "META_ESCAPE",
            META_FILLREGION => "META_FILLREGION",
            META_FRAMEREGION => "META_FRAMEREGION",
            META_INVERTREGION => "META_INVERTREGION",
            META_PAINTREGION => "META_PAINTREGION",
            META_SELECTCLIPREGION => "META_SELECTCLIPREGION",
            META_SELECTOBJECT => "META_SELECTOBJECT",
            META_SETTEXTALIGN => "META_SETTEXTALIGN",
            META_CHORD => "META_CHORD",
            META_SETMAPPERFLAGS => "META_SETMAPPERFLAGS",
            META_EXTTEXTOUT => "META_EXTTEXTOUT",
            META_SETDIBTODEV => "META_SETDIBTODEV",
            META_SELECTPALETTE => "META_SELECTPALETTE",
            META_ANIMATEPALETTE => "META_ANIMATEPALETTE",
            META_POLYPOLYGON => "META_POLYPOLYGON",
            META_DIBBITBLT => "META_DIBBITBLT",
            META_DIBSTRETCHBLT => "META_DIBSTRETCHBLT",
            META_EXTFLOODFILL => "META_EXTFLOODFILL",
            META_STRETCHDIB => "META_STRETCHDIB",
            META_DELETEOBJECT => "META_DELETEOBJECT",
            META_CREATEPALETTE => "META_CREATEPALETTE",
            META_CREATEPATTERNBRUSH => "META_CREATEPATTERNBRUSH",
            META_CREATEPENINDIRECT => "META_CREATEPENINDIRECT",
            META_CREATEFONTINDIRECT => "META_CREATEFONTINDIRECT",
            META_CREATEBRUSHINDIRECT => "META_CREATEBRUSHINDIRECT",
            META_CREATEREGION => "META_CREATEREGION",
            _ => "UNKNOWN",
        }
    }
}

/// EMF record types.
pub mod emf {
    pub const EMR_HEADER: u32 = 1;
    pub const EMR_POLYBEZIER: u32 = 2;
    pub const EMR_POLYGON: u32 = 3;
    pub const EMR_POLYLINE: u32 = 4;
    pub const EMR_POLYBEZIERTO: u32 = 5;
    pub const EMR_POLYLINETO: u32 = 6;
    pub const EMR_POLYPOLYLINE: u32 = 7;
    pub const EMR_POLYPOLYGON: u32 = 8;
    pub const EMR_SETWINDOWEXTEX: u32 = 9;
    pub const EMR_SETWINDOWORGEX: u32 = 10;
    pub const EMR_SETVIEWPORTEXTEX: u32 = 11;
    pub const EMR_SETVIEWPORTORGEX: u32 = 12;
    pub const EMR_SETBRUSHORGEX: u32 = 13;
    pub const EMR_EOF: u32 = 14;
    pub const EMR_SETPIXELV: u32 = 15;
    pub const EMR_SETMAPPERFLAGS: u32 = 16;
    pub const EMR_SETMAPMODE: u32 = 17;
    pub const EMR_SETBKMODE: u32 = 18;
    pub const EMR_SETPOLYFILLMODE: u32 = 19;
    pub const EMR_SETROP2: u32 = 20;
    pub const EMR_SETSTRETCHBLTMODE: u32 = 21;
    pub const EMR_SETTEXTALIGN: u32 = 22;
    pub const EMR_SETCOLORADJUSTMENT: u32 = 23;
    pub const EMR_SETTEXTCOLOR: u32 = 24;
    pub const EMR_SETBKCOLOR: u32 = 25;
    pub const EMR_OFFSETCLIPRGN: u32 = 26;
    pub const EMR_MOVETOEX: u32 = 27;
    pub const EMR_SETMETARGN: u32 = 28;
    pub const EMR_EXCLUDECLIPRECT: u32 = 29;
    pub const EMR_INTERSECTCLIPRECT: u32 = 30;
    pub const EMR_SCALEVIEWPORTEXTEX: u32 = 31;
    pub const EMR_SCALEWINDOWEXTEX: u32 = 32;
    pub const EMR_SAVEDC: u32 = 33;
    pub const EMR_RESTOREDC: u32 = 34;
    pub const EMR_SETWORLDTRANSFORM: u32 = 35;
    pub const EMR_MODIFYWORLDTRANSFORM: u32 = 36;
    pub const EMR_SELECTOBJECT: u32 = 37;
    pub const EMR_CREATEPEN: u32 = 38;
    pub const EMR_CREATEBRUSHINDIRECT: u32 = 39;
    pub const EMR_DELETEOBJECT: u32 = 40;
    pub const EMR_ANGLEARC: u32 = 41;
    pub const EMR_ELLIPSE: u32 = 42;
    pub const EMR_RECTANGLE: u32 = 43;
    pub const EMR_ROUNDRECT: u32 = 44;
    pub const EMR_ARC: u32 = 45;
    pub const EMR_CHORD: u32 = 46;
    pub const EMR_PIE: u32 = 47;
    pub const EMR_SELECTPALETTE: u32 = 48;
    pub const EMR_CREATEPALETTE: u32 = 49;
    pub const EMR_SETPALETTEENTRIES: u32 = 50;
    pub const EMR_RESIZEPALETTE: u32 = 51;
    pub const EMR_REALIZEPALETTE: u32 = 52;
    pub const EMR_EXTFLOODFILL: u32 = 53;
    pub const EMR_LINETO: u32 = 54;
    pub const EMR_ARCTO: u32 = 55;
    pub const EMR_POLYDRAW: u32 = 56;
    pub const EMR_SETARCDIRECTION: u32 = 57;
    pub const EMR_SETMITERLIMIT: u32 = 58;
    pub const EMR_BEGINPATH: u32 = 59;
    pub const EMR_ENDPATH: u32 = 60;
    pub const EMR_CLOSEFIGURE: u32 = 61;
    pub const EMR_FILLPATH: u32 = 62;
    pub const EMR_STROKEANDFILLPATH: u32 = 63;
    pub const EMR_STROKEPATH: u32 = 64;
    pub const EMR_FLATTENPATH: u32 = 65;
    pub const EMR_WIDENPATH: u32 = 66;
    pub const EMR_SELECTCLIPPATH: u32 = 67;
    pub const EMR_ABORTPATH: u32 = 68;
    pub const EMR_COMMENT: u32 = 70;
    pub const EMR_FILLRGN: u32 = 71;
    pub const EMR_FRAMERGN: u32 = 72;
    pub const EMR_INVERTRGN: u32 = 73;
    pub const EMR_PAINTRGN: u32 = 74;
    pub const EMR_EXTSELECTCLIPRGN: u32 = 75;
    pub const EMR_BITBLT: u32 = 76;
    pub const EMR_STRETCHBLT: u32 = 77;
    pub const EMR_MASKBLT: u32 = 78;
    pub const EMR_PLGBLT: u32 = 79;
    pub const EMR_SETDIBITSTODEVICE: u32 = 80;
    pub const EMR_STRETCHDIBITS: u32 = 81;
    pub const EMR_EXTCREATEFONTINDIRECTW: u32 = 82;
    pub const EMR_EXTTEXTOUTA: u32 = 83;
    pub const EMR_EXTTEXTOUTW: u32 = 84;
    pub const EMR_POLYBEZIER16: u32 = 85;
    pub const EMR_POLYGON16: u32 = 86;
    pub const EMR_POLYLINE16: u32 = 87;
    pub const EMR_POLYBEZIERTO16: u32 = 88;
    pub const EMR_POLYLINETO16: u32 = 89;
    pub const EMR_POLYPOLYLINE16: u32 = 90;
    pub const EMR_POLYPOLYGON16: u32 = 91;
    pub const EMR_POLYDRAW16: u32 = 92;
    pub const EMR_CREATEMONOBRUSH: u32 = 93;
    pub const EMR_CREATEDIBPATTERNBRUSHPT: u32 = 94;
    pub const EMR_EXTCREATEPEN: u32 = 95;
    pub const EMR_POLYTEXTOUTA: u32 = 96;
    pub const EMR_POLYTEXTOUTW: u32 = 97;
    pub const EMR_SETICMMODE: u32 = 98;
    pub const EMR_CREATECOLORSPACE: u32 = 99;
    pub const EMR_SETCOLORSPACE: u32 = 100;
    pub const EMR_DELETECOLORSPACE: u32 = 101;
    pub const EMR_GLSRECORD: u32 = 102;
    pub const EMR_GLSBOUNDEDRECORD: u32 = 103;
    pub const EMR_PIXELFORMAT: u32 = 104;
    pub const EMR_DRAWESCAPE: u32 = 105;
    pub const EMR_EXTESCAPE: u32 = 106;
    pub const EMR_SMALLTEXTOUT: u32 = 108;
    pub const EMR_FORCEUFIMAPPING: u32 = 109;
    pub const EMR_NAMEDESCAPE: u32 = 110;
    pub const EMR_COLORCORRECTPALETTE: u32 = 111;
    pub const EMR_SETICMPROFILEA: u32 = 112;
    pub const EMR_SETICMPROFILEW: u32 = 113;
    pub const EMR_ALPHABLEND: u32 = 114;
    pub const EMR_SETLAYOUT: u32 = 115;
    pub const EMR_TRANSPARENTBLT: u32 = 116;
    pub const EMR_GRADIENTFILL: u32 = 118;
    pub const EMR_SETLINKEDUFIS: u32 = 119;
    pub const EMR_SETTEXTJUSTIFICATION: u32 = 120;
    pub const EMR_COLORMATCHTOTARGETW: u32 = 121;
    pub const EMR_CREATECOLORSPACEW: u32 = 122;

    /// Record name for diagnostics on skipped or unknown records.
    pub fn record_name(kind: u32) -> &'static str {
        match kind {
            EMR_HEADER => "EMR_HEADER",
            EMR_POLYBEZIER => "EMR_POLYBEZIER",
            EMR_POLYGON => "EMR_POLYGON",
            EMR_POLYLINE => "EMR_POLYLINE",
            EMR_POLYBEZIERTO => "EMR_POLYBEZIERTO",
            EMR_POLYLINETO => "EMR_POLYLINETO",
            EMR_POLYPOLYLINE => "EMR_POLYPOLYLINE",
            EMR_POLYPOLYGON => "EMR_POLYPOLYGON",
            EMR_SETWINDOWEXTEX => "EMR_SETWINDOWEXTEX",
            EMR_SETWINDOWORGEX => "EMR_SETWINDOWORGEX",
            EMR_SETVIEWPORTEXTEX => "EMR_SETVIEWPORTEXTEX",
            EMR_SETVIEWPORTORGEX => "EMR_SETVIEWPORTORGEX",
            EMR_SETBRUSHORGEX => "EMR_SETBRUSHORGEX",
            EMR_EOF => "EMR_EOF",
            EMR_SETPIXELV => "EMR_SETPIXELV",
            EMR_SETMAPPERFLAGS => "EMR_SETMAPPERFLAGS",
            EMR_SETMAPMODE => "EMR_SETMAPMODE",
            EMR_SETBKMODE => "EMR_SETBKMODE",
            EMR_SETPOLYFILLMODE => "EMR_SETPOLYFILLMODE",
            EMR_SETROP2 => "EMR_SETROP2",
            EMR_SETSTRETCHBLTMODE => "EMR_SETSTRETCHBLTMODE",
            EMR_SETTEXTALIGN => "EMR_SETTEXTALIGN",
            EMR_SETCOLORADJUSTMENT => "EMR_SETCOLORADJUSTMENT",
            EMR_SETTEXTCOLOR => "EMR_SETTEXTCOLOR",
            EMR_SETBKCOLOR => "EMR_SETBKCOLOR",
            EMR_OFFSETCLIPRGN => "EMR_OFFSETCLIPRGN",
            EMR_MOVETOEX => "EMR_MOVETOEX",
            EMR_SETMETARGN => "EMR_SETMETARGN",
            EMR_EXCLUDECLIPRECT => "EMR_EXCLUDECLIPRECT",
            EMR_INTERSECTCLIPRECT => "EMR_INTERSECTCLIPRECT",
            EMR_SCALEVIEWPORTEXTEX => "EMR_SCALEVIEWPORTEXTEX",
            EMR_SCALEWINDOWEXTEX => "EMR_SCALEWINDOWEXTEX",
            EMR_SAVEDC => "EMR_SAVEDC",
            EMR_RESTOREDC => "EMR_RESTOREDC",
            EMR_SETWORLDTRANSFORM => "EMR_SETWORLDTRANSFORM",
            EMR_MODIFYWORLDTRANSFORM => "EMR_MODIFYWORLDTRANSFORM",
            EMR_SELECTOBJECT => "EMR_SELECTOBJECT",
            EMR_CREATEPEN => "EMR_CREATEPEN",
            EMR_CREATEBRUSHINDIRECT => "EMR_CREATEBRUSHINDIRECT",
            EMR_DELETEOBJECT => "EMR_DELETEOBJECT",
            EMR_ANGLEARC => "EMR_ANGLEARC",
            EMR_ELLIPSE => "EMR_ELLIPSE",
            EMR_RECTANGLE => "EMR_RECTANGLE",
            EMR_ROUNDRECT => "EMR_ROUNDRECT",
            EMR_ARC => "EMR_ARC",
            EMR_CHORD => "EMR_CHORD",
            EMR_PIE => "EMR_PIE",
            EMR_SELECTPALETTE => "EMR_SELECTPALETTE",
            EMR_CREATEPALETTE => "EMR_CREATEPALETTE",
            EMR_SETPALETTEENTRIES => "EMR_SETPALETTEENTRIES",
            EMR_RESIZEPALETTE => "EMR_RESIZEPALETTE",
            EMR_REALIZEPALETTE => "EMR_REALIZEPALETTE",
            EMR_EXTFLOODFILL => "EMR_EXTFLOODFILL",
            EMR_LINETO => "EMR_LINETO",
            EMR_ARCTO => "EMR_ARCTO",
            EMR_POLYDRAW => "EMR_POLYDRAW",
            EMR_SETARCDIRECTION => "EMR_SETARCDIRECTION",
            EMR_SETMITERLIMIT => "EMR_SETMITERLIMIT",
            EMR_BEGINPATH => "EMR_BEGINPATH",
            EMR_ENDPATH => "EMR_ENDPATH",
            EMR_CLOSEFIGURE => "EMR_CLOSEFIGURE",
            EMR_FILLPATH => "EMR_FILLPATH",
            EMR_STROKEANDFILLPATH => "EMR_STROKEANDFILLPATH",
            EMR_STROKEPATH => "EMR_STROKEPATH",
            EMR_FLATTENPATH => "EMR_FLATTENPATH",
            EMR_WIDENPATH => "EMR_WIDENPATH",
            EMR_SELECTCLIPPATH => "EMR_SELECTCLIPPATH",
            EMR_ABORTPATH => "EMR_ABORTPATH",
            EMR_COMMENT => "EMR_COMMENT",
            EMR_FILLRGN => "EMR_FILLRGN",
            EMR_FRAMERGN => "EMR_FRAMERGN",
            EMR_INVERTRGN => "EMR_INVERTRGN",
            EMR_PAINTRGN => "EMR_PAINTRGN",
            EMR_EXTSELECTCLIPRGN => "EMR_EXTSELECTCLIPRGN",
            EMR_BITBLT => "EMR_BITBLT",
            EMR_STRETCHBLT => "EMR_STRETCHBLT",
            EMR_MASKBLT => "EMR_MASKBLT",
            EMR_PLGBLT => "EMR_PLGBLT",
            EMR_SETDIBITSTODEVICE => "EMR_SETDIBITSTODEVICE",
            EMR_STRETCHDIBITS => "EMR_STRETCHDIBITS",
            EMR_EXTCREATEFONTINDIRECTW => "EMR_EXTCREATEFONTINDIRECTW",
            EMR_EXTTEXTOUTA => "EMR_EXTTEXTOUTA",
            EMR_EXTTEXTOUTW => "EMR_EXTTEXTOUTW",
            EMR_POLYBEZIER16 => "EMR_POLYBEZIER16",
            EMR_POLYGON16 => "EMR_POLYGON16",
            EMR_POLYLINE16 => "EMR_POLYLINE16",
            EMR_POLYBEZIERTO16 => "EMR_POLYBEZIERTO16",
            EMR_POLYLINETO16 => "EMR_POLYLINETO16",
            EMR_POLYPOLYLINE16 => "EMR_POLYPOLYLINE16",
            EMR_POLYPOLYGON16 => "EMR_POLYPOLYGON16",
            EMR_POLYDRAW16 => "EMR_POLYDRAW16",
            EMR_CREATEMONOBRUSH => "EMR_CREATEMONOBRUSH",
            EMR_CREATEDIBPATTERNBRUSHPT => "EMR_CREATEDIBPATTERNBRUSHPT",
            EMR_EXTCREATEPEN => "EMR_EXTCREATEPEN",
            EMR_POLYTEXTOUTA => "EMR_POLYTEXTOUTA",
            EMR_POLYTEXTOUTW => "EMR_POLYTEXTOUTW",
            EMR_SETICMMODE => "EMR_SETICMMODE",
            EMR_CREATECOLORSPACE => "EMR_CREATECOLORSPACE",
            EMR_SETCOLORSPACE => "EMR_SETCOLORSPACE",
            EMR_DELETECOLORSPACE => "EMR_DELETECOLORSPACE",
            EMR_GLSRECORD => "EMR_GLSRECORD",
            EMR_GLSBOUNDEDRECORD => "EMR_GLSBOUNDEDRECORD",
            EMR_PIXELFORMAT => "EMR_PIXELFORMAT",
            EMR_DRAWESCAPE => "EMR_DRAWESCAPE",
            EMR_EXTESCAPE => "EMR_EXTESCAPE",
            EMR_SMALLTEXTOUT => "EMR_SMALLTEXTOUT",
            EMR_FORCEUFIMAPPING => "EMR_FORCEUFIMAPPING",
            EMR_NAMEDESCAPE => "EMR_NAMEDESCAPE",
            EMR_COLORCORRECTPALETTE => "EMR_COLORCORRECTPALETTE",
            EMR_SETICMPROFILEA => "EMR_SETICMPROFILEA",
            EMR_SETICMPROFILEW => "EMR_SETICMPROFILEW",
            EMR_ALPHABLEND => "EMR_ALPHABLEND",
            EMR_SETLAYOUT => "EMR_SETLAYOUT",
            EMR_TRANSPARENTBLT => "EMR_TRANSPARENTBLT",
            EMR_GRADIENTFILL => "EMR_GRADIENTFILL",
            EMR_SETLINKEDUFIS => "EMR_SETLINKEDUFIS",
            EMR_SETTEXTJUSTIFICATION => "EMR_SETTEXTJUSTIFICATION",
            EMR_COLORMATCHTOTARGETW => "EMR_COLORMATCHTOTARGETW",
            EMR_CREATECOLORSPACEW => "EMR_CREATECOLORSPACEW",
            _ => "UNKNOWN",
        }
    }
}
