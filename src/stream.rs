use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::code::{Code, WindowClass};
use crate::error::{Error, Result};
use crate::lz::encode;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Unsigned integer type one flattened element is stored in.
pub trait Element: Copy + TryFrom<usize> + From<u8> + sealed::Sealed {
    const BITS: u32;

    fn write_le<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()>;
}

impl Element for u8 {
    const BITS: u32 = 8;

    fn write_le<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self)
    }
}

impl Element for u16 {
    const BITS: u32 = 16;

    fn write_le<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self)
    }
}

impl Element for u32 {
    const BITS: u32 = 32;

    fn write_le<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self)
    }
}

/// Flattens Codes into repeating `[offset, length, literal]` elements
///
/// # Arguments
/// * `codes` - The Codes, in encode order
///
/// # Returns
/// Exactly `3 * codes.len()` elements, or `CapacityExceeded` if an offset or
/// length does not fit `E`. Values are never truncated.
pub fn encoding_to_array<E: Element>(codes: &[Code]) -> Result<Vec<E>> {
    let mut array = Vec::with_capacity(codes.len() * 3);
    for code in codes {
        array.push(narrow::<E>("offset", code.offset)?);
        array.push(narrow::<E>("length", code.length)?);
        array.push(E::from(code.literal));
    }
    Ok(array)
}

fn narrow<E: Element>(field: &'static str, value: usize) -> Result<E> {
    E::try_from(value).map_err(|_| Error::CapacityExceeded {
        field,
        value,
        bits: E::BITS,
    })
}

/// Flattened encoder output, tagged with its element width.
///
/// There is no header: whoever reads the buffer must know the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedStream {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl EncodedStream {
    pub fn from_codes(codes: &[Code], class: WindowClass) -> Result<Self> {
        Ok(match class {
            WindowClass::Bits8 => EncodedStream::U8(encoding_to_array(codes)?),
            WindowClass::Bits16 => EncodedStream::U16(encoding_to_array(codes)?),
            WindowClass::Bits32 => EncodedStream::U32(encoding_to_array(codes)?),
        })
    }

    pub fn class(&self) -> WindowClass {
        match self {
            EncodedStream::U8(_) => WindowClass::Bits8,
            EncodedStream::U16(_) => WindowClass::Bits16,
            EncodedStream::U32(_) => WindowClass::Bits32,
        }
    }

    /// Element count, three per Code.
    pub fn len(&self) -> usize {
        match self {
            EncodedStream::U8(elements) => elements.len(),
            EncodedStream::U16(elements) => elements.len(),
            EncodedStream::U32(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn code_count(&self) -> usize {
        self.len() / 3
    }

    pub fn byte_len(&self) -> usize {
        self.len() * (self.class().bits() / 8) as usize
    }

    /// Start of the element buffer, for hosts that read it as raw memory
    /// together with [`EncodedStream::len`].
    pub fn as_ptr(&self) -> *const u8 {
        match self {
            EncodedStream::U8(elements) => elements.as_ptr(),
            EncodedStream::U16(elements) => elements.as_ptr().cast(),
            EncodedStream::U32(elements) => elements.as_ptr().cast(),
        }
    }

    /// Element at `index`, widened to `u32`.
    pub fn get(&self, index: usize) -> Option<u32> {
        match self {
            EncodedStream::U8(elements) => elements.get(index).map(|&e| e.into()),
            EncodedStream::U16(elements) => elements.get(index).map(|&e| e.into()),
            EncodedStream::U32(elements) => elements.get(index).copied(),
        }
    }

    /// Writes every element little-endian, with nothing before or after.
    pub fn write_le<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        match self {
            EncodedStream::U8(elements) => writer.write_all(elements)?,
            EncodedStream::U16(elements) => write_elements(elements, writer)?,
            EncodedStream::U32(elements) => write_elements(elements, writer)?,
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_elements<E: Element, W: Write + ?Sized>(elements: &[E], writer: &mut W) -> io::Result<()> {
    for &element in elements {
        element.write_le(writer)?;
    }
    Ok(())
}

/// Encodes `input` and flattens the result for `class` in one call.
pub fn encode_to_stream(input: &[u8], class: WindowClass) -> Result<EncodedStream> {
    EncodedStream::from_codes(&encode(input, class), class)
}
