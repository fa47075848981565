/// Division of the larger file into `total_blocks` contiguous spans.
///
/// The first `remainder` blocks carry one extra byte, so the spans always add
/// up to the file size exactly. When the file is smaller than the grid, the
/// trailing blocks have a span of zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BlockPartition {
    pub(crate) total_blocks: usize,
    pub(crate) bytes_per_block: u64,
    pub(crate) remainder: u64,
}

impl BlockPartition {
    pub(crate) fn new(total_blocks: usize, largest_file_size: u64) -> Self {
        debug_assert!(total_blocks > 0, "a partition needs at least one block");
        let divisor = total_blocks.max(1) as u64;

        Self {
            total_blocks,
            bytes_per_block: largest_file_size / divisor,
            remainder: largest_file_size % divisor,
        }
    }

    pub(crate) fn span(&self, block: usize) -> u64 {
        if (block as u64) < self.remainder {
            self.bytes_per_block + 1
        } else {
            self.bytes_per_block
        }
    }

    pub(crate) fn spans(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.total_blocks).map(|block| self.span(block))
    }

    pub(crate) fn largest_span(&self) -> u64 {
        self.span(0)
    }
}
