use tracing::{debug, instrument};

use crate::{error::HexcompareError, partition::BlockPartition, source::FileSource};

const SCAN_CHUNK_BYTES: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BlockStatus {
    /// Both files are exhausted before this block.
    Empty,
    Same,
    Different,
}

/// Per-block status for the whole grid, rebuilt in full whenever the partition changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DiffCache {
    statuses: Vec<BlockStatus>,
}

impl DiffCache {
    pub(crate) fn status(&self, block: usize) -> BlockStatus {
        self.statuses
            .get(block)
            .copied()
            .unwrap_or(BlockStatus::Empty)
    }

    pub(crate) fn count(&self, status: BlockStatus) -> usize {
        self.statuses.iter().filter(|entry| **entry == status).count()
    }

    #[cfg(test)]
    pub(crate) fn statuses(&self) -> &[BlockStatus] {
        &self.statuses
    }
}

struct ScanBuffers {
    primary: Vec<u8>,
    secondary: Vec<u8>,
}

impl ScanBuffers {
    fn new(largest_span: u64) -> Self {
        let len = largest_span.min(SCAN_CHUNK_BYTES as u64) as usize;
        Self {
            primary: vec![0; len],
            secondary: vec![0; len],
        }
    }
}

/// Compares both files block by block in a single pass from offset zero.
///
/// Leaves both stream cursors wherever the scan stopped.
#[instrument(skip_all, fields(total_blocks = partition.total_blocks))]
pub(crate) fn scan(
    primary: &mut FileSource,
    secondary: &mut FileSource,
    partition: &BlockPartition,
) -> Result<DiffCache, HexcompareError> {
    primary.seek_to(0)?;
    secondary.seek_to(0)?;

    let mut statuses = vec![BlockStatus::Empty; partition.total_blocks];
    let mut buffers = ScanBuffers::new(partition.largest_span());
    let mut block_start = 0u64;

    for (block, span) in partition.spans().enumerate() {
        let status = classify_block(primary, secondary, block_start, span, &mut buffers)?;
        if status == BlockStatus::Empty {
            debug!(block, "both files exhausted");
            break;
        }

        statuses[block] = status;
        block_start += span;
    }

    Ok(DiffCache { statuses })
}

fn classify_block(
    primary: &mut FileSource,
    secondary: &mut FileSource,
    block_start: u64,
    span: u64,
    buffers: &mut ScanBuffers,
) -> Result<BlockStatus, HexcompareError> {
    let mut remaining = span;
    let mut primary_total = 0u64;
    let mut secondary_total = 0u64;

    while remaining > 0 {
        let chunk = remaining.min(buffers.primary.len() as u64) as usize;
        let primary_read = primary.read_fill(&mut buffers.primary[..chunk])?;
        let secondary_read = secondary.read_fill(&mut buffers.secondary[..chunk])?;
        primary_total += primary_read as u64;
        secondary_total += secondary_read as u64;

        if primary_read == 0 && secondary_read == 0 {
            break;
        }

        let chunk_differs = primary_read != secondary_read
            || buffers.primary[..primary_read]
                .iter()
                .zip(&buffers.secondary[..secondary_read])
                .any(|(left, right)| left != right);

        if chunk_differs {
            // Skip the unread rest of the block so the next one starts aligned.
            let block_end = block_start + span;
            primary.seek_to(block_end)?;
            secondary.seek_to(block_end)?;
            return Ok(BlockStatus::Different);
        }

        remaining -= chunk as u64;
    }

    Ok(match (primary_total, secondary_total) {
        (0, 0) => BlockStatus::Empty,
        (left, right) if left != right => BlockStatus::Different,
        _ => BlockStatus::Same,
    })
}
