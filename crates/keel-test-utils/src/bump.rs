//! Header-prefixed bump allocator fixture.
//!
//! [`HeaderedBump`] drives the alignment engine the way a production
//! linear allocator does: it asks for the header-aware adjustment at the
//! real address of its cursor, writes a [`BlockHeader`] into the bytes
//! just before the aligned block, and hands back a [`BlockHandle`].
//!
//! Handles carry the allocator's reset epoch in `extra_index`, so a
//! handle from before a [`reset`](HeaderedBump::reset) is reported as
//! stale instead of silently aliasing a newer block.

use keel_core::{forward_adjustment, Alignment, Handle};

use crate::error::FixtureError;

/// Marker for [`BlockHandle`].
pub enum BlockTag {}

/// Handle to a block in a [`HeaderedBump`].
pub type BlockHandle = Handle<BlockTag>;

/// Metadata stored immediately before every user block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// User block size in bytes.
    pub size: u32,
    /// Bytes between the cursor and the user block, header included.
    pub adjustment: u32,
}

impl BlockHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 8;

    fn encode(self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..4].copy_from_slice(&self.size.to_le_bytes());
        out[4..].copy_from_slice(&self.adjustment.to_le_bytes());
        out
    }

    fn decode(bytes: &[u8]) -> Self {
        let mut size = [0u8; 4];
        let mut adjustment = [0u8; 4];
        size.copy_from_slice(&bytes[..4]);
        adjustment.copy_from_slice(&bytes[4..Self::SIZE]);
        Self {
            size: u32::from_le_bytes(size),
            adjustment: u32::from_le_bytes(adjustment),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct BlockRecord {
    /// Offset of the user block from `base`.
    offset: usize,
    len: usize,
}

/// A bump allocator over an owned byte buffer with per-block headers.
///
/// The usable region starts at an address aligned to
/// [`MAX_ALIGNMENT`](HeaderedBump::MAX_ALIGNMENT), so padding depends only
/// on the request sequence, never on where the buffer happened to land.
pub struct HeaderedBump {
    /// Backing storage. Never resized, so addresses stay stable.
    buffer: Vec<u8>,
    /// Offset of the first usable byte in `buffer`.
    base: usize,
    /// Usable bytes starting at `base`.
    capacity: usize,
    /// Bump pointer, relative to `base`.
    cursor: usize,
    blocks: Vec<BlockRecord>,
    /// Bumped on every reset; stored in each handle's `extra_index`.
    epoch: u32,
}

impl HeaderedBump {
    /// Largest alignment a request may ask for.
    pub const MAX_ALIGNMENT: usize = 4096;

    /// Create an allocator with `capacity` usable bytes.
    pub fn new(capacity: usize) -> Self {
        let buffer = vec![0u8; capacity + Self::MAX_ALIGNMENT];
        let base = forward_adjustment(buffer.as_ptr() as usize, Self::MAX_ALIGNMENT);
        Self {
            buffer,
            base,
            capacity,
            cursor: 0,
            blocks: Vec::new(),
            epoch: 0,
        }
    }

    /// Allocate `size` bytes aligned to `alignment`, preceded by a header.
    pub fn alloc(&mut self, size: usize, alignment: Alignment) -> Result<BlockHandle, FixtureError> {
        debug_assert!(alignment.get() <= Self::MAX_ALIGNMENT);
        let address = self.cursor_address();
        let adjustment = alignment.adjustment_with_header(address, BlockHeader::SIZE);
        let remaining = self.remaining();
        let needed = adjustment
            .checked_add(size)
            .filter(|&needed| needed <= remaining)
            .ok_or(FixtureError::OutOfSpace {
                requested: adjustment.saturating_add(size),
                remaining,
            })?;
        // The header records the size in 32 bits.
        let block_size = u32::try_from(size).map_err(|_| FixtureError::InvalidConfig {
            reason: format!("block size {size} does not fit a 32-bit header"),
        })?;

        let offset = self.cursor + adjustment;
        let header = BlockHeader {
            size: block_size,
            adjustment: adjustment as u32,
        };
        let header_start = self.base + offset - BlockHeader::SIZE;
        self.buffer[header_start..header_start + BlockHeader::SIZE]
            .copy_from_slice(&header.encode());
        self.cursor += needed;

        let index = self.blocks.len() as u32;
        self.blocks.push(BlockRecord { offset, len: size });
        log::trace!(
            "bump alloc: block {index}, {size} bytes at offset {offset} (align {alignment}, adjustment {adjustment})"
        );
        Ok(BlockHandle::with_extra(index, self.epoch))
    }

    /// The header written for `handle`, read back from the buffer.
    pub fn header(&self, handle: BlockHandle) -> Result<BlockHeader, FixtureError> {
        let record = self.record(handle)?;
        let start = self.base + record.offset - BlockHeader::SIZE;
        Ok(BlockHeader::decode(&self.buffer[start..start + BlockHeader::SIZE]))
    }

    /// The user block for `handle`.
    pub fn block(&self, handle: BlockHandle) -> Result<&[u8], FixtureError> {
        let record = self.record(handle)?;
        let start = self.base + record.offset;
        Ok(&self.buffer[start..start + record.len])
    }

    /// The user block for `handle`, mutably.
    pub fn block_mut(&mut self, handle: BlockHandle) -> Result<&mut [u8], FixtureError> {
        let record = self.record(handle)?;
        let start = self.base + record.offset;
        Ok(&mut self.buffer[start..start + record.len])
    }

    /// Machine address of the user block for `handle`.
    pub fn address(&self, handle: BlockHandle) -> Result<usize, FixtureError> {
        let record = self.record(handle)?;
        Ok(self.base_address() + record.offset)
    }

    /// Machine address of the bump cursor: where the next request's
    /// adjustment is measured from.
    pub fn cursor_address(&self) -> usize {
        self.base_address() + self.cursor
    }

    /// Release every block. Outstanding handles become stale.
    pub fn reset(&mut self) {
        log::debug!(
            "bump reset: {} blocks, {} of {} bytes used, epoch {}",
            self.blocks.len(),
            self.cursor,
            self.capacity,
            self.epoch
        );
        self.cursor = 0;
        self.blocks.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Bytes consumed so far, padding and headers included.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Usable bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    /// Live blocks since the last reset.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of resets so far.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    fn base_address(&self) -> usize {
        self.buffer.as_ptr() as usize + self.base
    }

    fn record(&self, handle: BlockHandle) -> Result<BlockRecord, FixtureError> {
        if handle.extra_index() != self.epoch {
            return Err(FixtureError::StaleHandle {
                index: handle.index(),
                handle_generation: handle.extra_index(),
                current_generation: self.epoch,
            });
        }
        self.blocks
            .get(handle.index() as usize)
            .copied()
            .ok_or(FixtureError::UnknownHandle {
                index: handle.index(),
            })
    }
}
