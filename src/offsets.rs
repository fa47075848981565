use crate::partition::BlockPartition;

/// Starting byte offset of every block in the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct OffsetIndex {
    starts: Vec<u64>,
}

impl OffsetIndex {
    pub(crate) fn build(partition: &BlockPartition) -> Self {
        let starts = partition
            .spans()
            .scan(0u64, |next_start, span| {
                let start = *next_start;
                *next_start += span;
                Some(start)
            })
            .collect();

        Self { starts }
    }

    pub(crate) fn start(&self, block: usize) -> u64 {
        self.starts.get(block).copied().unwrap_or(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.starts.len()
    }

    /// Block containing `offset`.
    ///
    /// Stops at the first repeated start offset: blocks past that point have no
    /// content and are never selected.
    pub(crate) fn locate(&self, offset: u64) -> usize {
        let mut current = 0;
        for (block, &start) in self.starts.iter().enumerate() {
            if offset < start {
                break;
            }
            current = block;

            if self.starts.get(block + 1) == Some(&start) {
                break;
            }
        }

        current
    }
}
