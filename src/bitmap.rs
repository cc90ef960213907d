//! Device-independent bitmap (DIB) decoding and data-URI embedding.
//!
//! Metafiles embed raster data either as a DIB (header + optional color
//! table + pixels) or, in old WMF pattern brushes, as a 16-bit
//! device-dependent bitmap. A DIB is turned into an `<image>` reference by
//! synthesizing the 14-byte BMP file header in front of the embedded bytes;
//! DIBs whose compression field says JPEG or PNG are passed through with the
//! matching MIME type instead.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::error::{MetafileError, MetafileResult};
use crate::gdi::{bitmap_compression, BITMAPCOREHEADER_SIZE, BITMAPINFOHEADER_SIZE};
use crate::reader::ByteReader;

/// BITMAPCOREHEADER, the legacy fixed-size DIB header.
#[derive(Debug, Clone)]
struct BitmapCoreHeader {
    width: u16,
    height: u16,
    bitcount: u16,
}

impl BitmapCoreHeader {
    fn parse(reader: &mut ByteReader) -> MetafileResult<Self> {
        let width = reader.read_u16()?;
        let height = reader.read_u16()?;
        reader.skip(2)?; // planes
        let bitcount = reader.read_u16()?;
        Ok(Self {
            width,
            height,
            bitcount,
        })
    }

    fn colors(&self) -> u32 {
        if self.bitcount <= 8 {
            1 << self.bitcount
        } else {
            0
        }
    }
}

/// BITMAPINFOHEADER.
#[derive(Debug, Clone)]
struct BitmapInfoHeader {
    width: i32,
    height: i32,
    bitcount: u16,
    compression: u32,
    clrused: u32,
}

impl BitmapInfoHeader {
    fn parse(reader: &mut ByteReader) -> MetafileResult<Self> {
        let width = reader.read_i32()?;
        let height = reader.read_i32()?;
        reader.skip(2)?; // planes
        let bitcount = reader.read_u16()?;
        let compression = reader.read_u32()?;
        reader.skip(4)?; // sizeimage
        reader.skip(4)?; // xpelspermeter
        reader.skip(4)?; // ypelspermeter
        let clrused = reader.read_u32()?;
        reader.skip(4)?; // clrimportant
        Ok(Self {
            width,
            height,
            bitcount,
            compression,
            clrused,
        })
    }

    fn colors(&self) -> u32 {
        if self.clrused != 0 {
            self.clrused.min(256)
        } else if self.bitcount > 8 {
            0
        } else {
            1 << self.bitcount
        }
    }
}

#[derive(Debug, Clone)]
enum DibHeader {
    Core(BitmapCoreHeader),
    Info(BitmapInfoHeader),
}

/// Parsed DIB header plus the computed size of header + color table.
#[derive(Debug, Clone)]
pub struct BitmapInfo {
    header: DibHeader,
    infosize: u32,
}

impl BitmapInfo {
    /// Parses the header that starts at the reader's current position. The
    /// declared header size field selects between the core header and the
    /// info header. `use_rgb` tells whether color-table entries are RGB
    /// quads or 16-bit palette indices.
    pub fn parse(reader: &mut ByteReader, use_rgb: bool) -> MetafileResult<Self> {
        let hdrsize = reader.read_u32()?;
        let mut infosize = hdrsize;
        let header = if hdrsize == BITMAPCOREHEADER_SIZE {
            let hdr = BitmapCoreHeader::parse(reader)?;
            infosize += hdr.colors() * if use_rgb { 3 } else { 2 };
            DibHeader::Core(hdr)
        } else {
            let hdr = BitmapInfoHeader::parse(reader)?;
            let masks = if hdr.compression == bitmap_compression::BI_BITFIELDS {
                3
            } else {
                0
            };
            if hdrsize <= BITMAPINFOHEADER_SIZE + masks * 4 {
                infosize = BITMAPINFOHEADER_SIZE + masks * 4;
            }
            infosize += hdr.colors() * if use_rgb { 4 } else { 2 };
            DibHeader::Info(hdr)
        };
        Ok(Self { header, infosize })
    }

    pub fn width(&self) -> i32 {
        match &self.header {
            DibHeader::Core(h) => h.width as i32,
            DibHeader::Info(h) => h.width,
        }
    }

    pub fn height(&self) -> i32 {
        match &self.header {
            DibHeader::Core(h) => h.height as i32,
            DibHeader::Info(h) => h.height.abs(),
        }
    }

    fn compression(&self) -> Option<u32> {
        match &self.header {
            DibHeader::Core(_) => None,
            DibHeader::Info(h) => Some(h.compression),
        }
    }

    /// Size in bytes of the header plus color table, used as the pixel-data
    /// offset in the synthesized BMP file header.
    pub fn infosize(&self) -> u32 {
        self.infosize
    }
}

/// A DIB embedded in a record, owning a copy of its bytes.
#[derive(Debug, Clone)]
pub struct DIBitmap {
    info: BitmapInfo,
    data: Vec<u8>,
}

impl DIBitmap {
    /// Parses a DIB occupying the next `size` bytes of the record.
    pub fn parse(reader: &mut ByteReader, size: usize) -> MetafileResult<Self> {
        let start = reader.pos();
        let info = BitmapInfo::parse(reader, true)?;
        reader.seek(start)?;
        let data = reader.read_binary(size)?.to_vec();
        Ok(Self { info, data })
    }

    /// Builds a DIB from an EMF record's header/bits offset pairs. The two
    /// ranges must both lie inside the record; EMF stores them contiguously
    /// so the embedded BMP body is their concatenation.
    pub fn parse_ranges(
        reader: &mut ByteReader,
        record_start: usize,
        off_bmi: u32,
        cb_bmi: u32,
        off_bits: u32,
        cb_bits: u32,
    ) -> MetafileResult<Self> {
        let prev = reader.pos();
        reader.seek(record_start + off_bmi as usize)?;
        let info = BitmapInfo::parse(reader, true)?;
        reader.seek(record_start + off_bmi as usize)?;
        let mut data = reader.read_binary(cb_bmi as usize)?.to_vec();
        reader.seek(record_start + off_bits as usize)?;
        data.extend_from_slice(reader.read_binary(cb_bits as usize)?);
        reader.seek(prev)?;
        Ok(Self { info, data })
    }

    pub fn width(&self) -> i32 {
        self.info.width()
    }

    pub fn height(&self) -> i32 {
        self.info.height()
    }

    /// Renders this DIB as a `data:` URI.
    ///
    /// Uncompressed (or RLE) DIBs get a synthetic BMP file header so viewers
    /// accept them; embedded JPEG/PNG streams are wrapped verbatim under
    /// their own MIME type.
    pub fn base64_ref(&self) -> String {
        match self.info.compression() {
            Some(bitmap_compression::BI_JPEG) => {
                format!("data:image/jpeg;base64,{}", BASE64.encode(&self.data))
            }
            Some(bitmap_compression::BI_PNG) => {
                format!("data:image/png;base64,{}", BASE64.encode(&self.data))
            }
            _ => {
                let mut blob = self.make_bitmap_file_header();
                blob.extend_from_slice(&self.data);
                format!("data:image/bmp;base64,{}", BASE64.encode(&blob))
            }
        }
    }

    /// The 14-byte BMP file header: magic, total file size, pixel offset.
    fn make_bitmap_file_header(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 14];
        buf[0] = 0x42; // 'B'
        buf[1] = 0x4d; // 'M'
        LittleEndian::write_u32(&mut buf[2..6], self.data.len() as u32 + 14);
        LittleEndian::write_u32(&mut buf[10..14], self.info.infosize() + 14);
        buf
    }
}

/// A 16-bit device-dependent bitmap, as found in legacy WMF pattern
/// brushes. Only its dimensions are usable for rendering.
#[derive(Debug, Clone)]
pub struct Bitmap16 {
    pub width: i32,
    pub height: i32,
    pub bits_pixel: u8,
}

impl Bitmap16 {
    pub fn parse(reader: &mut ByteReader, size: usize) -> MetafileResult<Self> {
        reader.skip(2)?; // type
        let width = reader.read_i16()? as i32;
        let height = reader.read_i16()? as i32;
        reader.skip(2)?; // widthBytes
        reader.skip(1)?; // planes
        let bits_pixel = reader.read_u8()?;
        let bits_size = ((((width * bits_pixel as i32 + 15) >> 4) << 1) * height) as usize;
        if size < 10 || bits_size > size - 10 {
            return Err(MetafileError::InvalidRecord(format!(
                "bitmap should have {} bytes, but has {}",
                bits_size,
                size.saturating_sub(10)
            )));
        }
        debug!("[bitmap] Bitmap16 {}x{} @{}bpp", width, height, bits_pixel);
        Ok(Self {
            width,
            height,
            bits_pixel,
        })
    }

    /// The `META_CREATEPATTERNBRUSH` variant carries 22 bytes of reserved
    /// fields between the header and the bits.
    pub fn parse_pattern(reader: &mut ByteReader, size: usize) -> MetafileResult<Self> {
        let bitmap = Self::parse(reader, size)?;
        reader.skip(22)?;
        Ok(bitmap)
    }
}
