//! Byte regions the map is stored in.
//!
//! The map never allocates. It borrows or owns a fixed-size block of bytes
//! through the [`Region`] trait, which exposes exactly two primitives: a
//! bounded read and a bounded write at a byte offset. Creating, attaching and
//! unmapping the underlying memory is left to whoever supplies the region.
//!
//! Implementations are provided for plain byte buffers (`[u8]`, `Vec<u8>`,
//! `Box<[u8]>`), for mutable references to any region, and for
//! [`memmap2::MmapMut`], which covers file-backed and anonymous shared
//! mappings.

use memmap2::MmapMut;

use crate::error::{Error, Result};

/// A fixed-size, byte-addressable block of memory.
///
/// Both primitives must fail with [`Error::OutOfRange`] when
/// `offset + len` exceeds [`Region::size`]; [`check_span`] does the
/// arithmetic for implementors.
pub trait Region {
    /// Total size in bytes. Must not change for the lifetime of the region.
    fn size(&self) -> usize;

    /// Copy `buf.len()` bytes starting at `offset` into `buf`.
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()>;

    /// Copy `bytes` into the region starting at `offset`.
    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()>;
}

/// Validate that `offset..offset + len` lies within a region of `size` bytes,
/// returning the span's end.
#[inline]
pub fn check_span(size: usize, offset: usize, len: usize) -> Result<usize> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(end),
        _ => Err(Error::OutOfRange { offset, len, size }),
    }
}

impl Region for [u8] {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        let end = check_span(self.len(), offset, buf.len())?;
        buf.copy_from_slice(&self[offset..end]);
        Ok(())
    }

    #[inline]
    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let end = check_span(self.len(), offset, bytes.len())?;
        self[offset..end].copy_from_slice(bytes);
        Ok(())
    }
}

impl Region for Vec<u8> {
    #[inline]
    fn size(&self) -> usize {
        self.as_slice().size()
    }

    #[inline]
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        self.as_slice().read(offset, buf)
    }

    #[inline]
    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.as_mut_slice().write(offset, bytes)
    }
}

impl Region for Box<[u8]> {
    #[inline]
    fn size(&self) -> usize {
        (**self).size()
    }

    #[inline]
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        (**self).read(offset, buf)
    }

    #[inline]
    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        (**self).write(offset, bytes)
    }
}

impl Region for MmapMut {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        self[..].read(offset, buf)
    }

    #[inline]
    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self[..].write(offset, bytes)
    }
}

impl<R: Region + ?Sized> Region for &mut R {
    #[inline]
    fn size(&self) -> usize {
        (**self).size()
    }

    #[inline]
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        (**self).read(offset, buf)
    }

    #[inline]
    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        (**self).write(offset, bytes)
    }
}
