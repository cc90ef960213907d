//! Sequential little-endian reader over a metafile byte buffer.
//!
//! Both record decoders share one cursor type: records are located by
//! absolute seeks driven by their declared sizes, and variable-length record
//! tails are measured with [`ByteReader::pos`] deltas.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{MetafileError, MetafileResult};

/// A bounds-checked little-endian cursor over a fixed byte buffer.
///
/// Every read consumes exactly the advertised byte width and fails with
/// `MetafileError::UnexpectedEof` instead of reading past the end, so a
/// corrupt length field can never turn into a hang or a wild slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor position in bytes from the start of the buffer.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Total buffer length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true once the cursor has reached the end of the buffer.
    pub fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Sets the cursor to an absolute position.
    pub fn seek(&mut self, pos: usize) -> MetafileResult<()> {
        if pos > self.data.len() {
            return Err(MetafileError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    /// Advances the cursor without decoding.
    pub fn skip(&mut self, cnt: usize) -> MetafileResult<()> {
        self.seek(self.pos + cnt)
    }

    fn take(&mut self, cnt: usize) -> MetafileResult<&'a [u8]> {
        if self.pos + cnt > self.data.len() {
            return Err(MetafileError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + cnt];
        self.pos += cnt;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> MetafileResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> MetafileResult<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> MetafileResult<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_i16(&mut self) -> MetafileResult<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> MetafileResult<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> MetafileResult<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Reads `length` bytes as a Windows-1252 string.
    ///
    /// Decoding stops at an embedded NUL, but the cursor always advances by
    /// the full `length` bytes.
    pub fn read_string(&mut self, length: usize) -> MetafileResult<String> {
        let bytes = self.take(length)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes[..end]);
        Ok(text.into_owned())
    }

    /// Reads `length` UTF-16LE code units as a string.
    ///
    /// Decoding stops at an embedded NUL code unit; the cursor advances by
    /// `length * 2` bytes regardless.
    pub fn read_fixed_size_unicode_string(&mut self, length: usize) -> MetafileResult<String> {
        let bytes = self.take(length * 2)?;
        let mut end = bytes.len();
        for i in (0..bytes.len()).step_by(2) {
            if bytes[i] == 0 && bytes[i + 1] == 0 {
                end = i;
                break;
            }
        }
        let (text, _, _) = encoding_rs::UTF_16LE.decode(&bytes[..end]);
        Ok(text.into_owned())
    }

    /// Returns `cnt` raw bytes, advancing the cursor. Used for bitmap pixel
    /// data that is later base64-embedded verbatim.
    pub fn read_binary(&mut self, cnt: usize) -> MetafileResult<&'a [u8]> {
        self.take(cnt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integers() {
        let data = [0x01, 0x00, 0x00, 0x00, 0xff, 0xff, 0x34, 0x12];
        let mut r = ByteReader::new(&data);

        assert_eq!(r.read_u32().unwrap(), 1);
        assert_eq!(r.read_i16().unwrap(), -1);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.pos(), 8);
    }

    #[test]
    fn test_read_signed() {
        let data = [0xfe, 0xff, 0xff, 0xff, 0x80];
        let mut r = ByteReader::new(&data);

        assert_eq!(r.read_i32().unwrap(), -2);
        assert_eq!(r.read_i8().unwrap(), -128);
    }

    #[test]
    fn test_seek_and_skip() {
        let data = [0u8; 16];
        let mut r = ByteReader::new(&data);

        r.skip(4).unwrap();
        assert_eq!(r.pos(), 4);
        r.seek(12).unwrap();
        assert_eq!(r.pos(), 12);
        // Seeking to the exact end is allowed, one past is not.
        r.seek(16).unwrap();
        assert!(r.eof());
        assert!(matches!(r.seek(17), Err(MetafileError::UnexpectedEof)));
    }

    #[test]
    fn test_read_past_end() {
        let data = [0u8; 3];
        let mut r = ByteReader::new(&data);

        assert!(matches!(r.read_u32(), Err(MetafileError::UnexpectedEof)));
        // A failed read must not move the cursor.
        assert_eq!(r.pos(), 0);
    }

    #[test]
    fn test_read_string_stops_at_nul() {
        let data = [b'a', b'b', 0, b'c', b'd'];
        let mut r = ByteReader::new(&data);

        assert_eq!(r.read_string(5).unwrap(), "ab");
        // Cursor advances by the full requested width.
        assert_eq!(r.pos(), 5);
    }

    #[test]
    fn test_read_fixed_size_unicode_string() {
        let data = [b'H', 0, b'i', 0, 0, 0, b'x', 0];
        let mut r = ByteReader::new(&data);

        assert_eq!(r.read_fixed_size_unicode_string(4).unwrap(), "Hi");
        assert_eq!(r.pos(), 8);
    }

    #[test]
    fn test_read_binary() {
        let data = [1, 2, 3, 4];
        let mut r = ByteReader::new(&data);

        assert_eq!(r.read_binary(3).unwrap(), &[1, 2, 3]);
        assert!(matches!(r.read_binary(2), Err(MetafileError::UnexpectedEof)));
    }
}
