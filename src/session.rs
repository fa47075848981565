use tracing::{debug, info, instrument};

use crate::{
    diff::{BlockStatus, DiffCache, scan},
    error::HexcompareError,
    geometry::GridGeometry,
    model::ViewModel,
    navigation::{ClickKind, Command, Navigator},
    offsets::OffsetIndex,
    partition::BlockPartition,
    source::FileSource,
};

/// Everything derived from the terminal size: rebuilt together, replaced together.
#[derive(Debug)]
pub(crate) struct ComparisonIndex {
    pub(crate) geometry: GridGeometry,
    pub(crate) partition: BlockPartition,
    pub(crate) cache: DiffCache,
    pub(crate) offsets: OffsetIndex,
}

impl ComparisonIndex {
    fn build(
        primary: &mut FileSource,
        secondary: &mut FileSource,
        largest_file_size: u64,
        width: u16,
        height: u16,
    ) -> Result<Self, HexcompareError> {
        let geometry = GridGeometry::compute(width, height)?;
        let partition = BlockPartition::new(geometry.total_blocks(), largest_file_size);
        let cache = scan(primary, secondary, &partition)?;
        let offsets = OffsetIndex::build(&partition);

        info!(
            grid_width = geometry.grid_width,
            grid_height = geometry.grid_height,
            bytes_per_block = partition.bytes_per_block,
            different_blocks = cache.count(BlockStatus::Different),
            "comparison index built"
        );

        Ok(Self {
            geometry,
            partition,
            cache,
            offsets,
        })
    }
}

pub(crate) struct Session {
    primary: FileSource,
    secondary: FileSource,
    largest_file_size: u64,
    pub(crate) index: ComparisonIndex,
    pub(crate) view: ViewModel,
}

impl Session {
    #[instrument(skip(primary, secondary))]
    pub(crate) fn new(
        mut primary: FileSource,
        mut secondary: FileSource,
        width: u16,
        height: u16,
    ) -> Result<Self, HexcompareError> {
        let largest_file_size = primary.size().max(secondary.size());
        info!(
            primary = primary.name(),
            secondary = secondary.name(),
            largest_file_size,
            "starting comparison"
        );
        let index = ComparisonIndex::build(
            &mut primary,
            &mut secondary,
            largest_file_size,
            width,
            height,
        )?;

        Ok(Self {
            primary,
            secondary,
            largest_file_size,
            index,
            view: ViewModel::default(),
        })
    }

    /// Rebuilds the grid for a new terminal size. The previous index stays in
    /// place if the rebuild fails.
    #[instrument(skip(self))]
    pub(crate) fn resize(&mut self, width: u16, height: u16) -> Result<(), HexcompareError> {
        let rebuilt = ComparisonIndex::build(
            &mut self.primary,
            &mut self.secondary,
            self.largest_file_size,
            width,
            height,
        )?;
        self.index = rebuilt;
        Ok(())
    }

    pub(crate) fn navigator(&self) -> Navigator<'_> {
        Navigator::new(
            &self.index.geometry,
            &self.index.offsets,
            self.largest_file_size,
        )
    }

    pub(crate) fn apply(&mut self, command: Command) {
        let navigator = Navigator::new(
            &self.index.geometry,
            &self.index.offsets,
            self.largest_file_size,
        );
        navigator.apply(&mut self.view, command);
        debug!(
            ?command,
            offset = self.view.current_offset,
            mode = %self.view.mode,
            "command applied"
        );
    }

    pub(crate) fn click(&mut self, column: usize, row: usize, kind: ClickKind) {
        let commands = self
            .navigator()
            .click_commands(self.view.mode, column, row, kind);
        for command in commands {
            self.apply(command);
        }
    }

    pub(crate) fn current_block(&self) -> usize {
        self.index.offsets.locate(self.view.current_offset)
    }

    pub(crate) fn largest_file_size(&self) -> u64 {
        self.largest_file_size
    }

    pub(crate) fn primary_name(&self) -> &str {
        self.primary.name()
    }

    pub(crate) fn secondary_name(&self) -> &str {
        self.secondary.name()
    }

    pub(crate) fn primary_basename(&self) -> &str {
        self.primary.basename()
    }

    pub(crate) fn secondary_basename(&self) -> &str {
        self.secondary.basename()
    }

    /// Bytes of both files starting at `offset`, each cut short at its own end of file.
    pub(crate) fn read_windows(
        &mut self,
        offset: u64,
        len: usize,
    ) -> Result<(Vec<u8>, Vec<u8>), HexcompareError> {
        let primary = self.primary.read_window(offset, len)?;
        let secondary = self.secondary.read_window(offset, len)?;
        Ok((primary, secondary))
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::{
        diff::BlockStatus,
        error::HexcompareError,
        model::DisplayMode,
        navigation::{ClickKind, Command},
        source::memory_source,
    };

    fn session(primary: Vec<u8>, secondary: Vec<u8>, width: u16, height: u16) -> Session {
        Session::new(
            memory_source("left/a.bin", primary),
            memory_source("right/b.bin", secondary),
            width,
            height,
        )
        .expect("session should build")
    }

    #[test]
    fn new_session_indexes_the_larger_file() {
        let session = session(vec![0; 40], vec![0; 500], 14, 16);

        assert_eq!(session.largest_file_size(), 500);
        assert_eq!(session.index.partition.total_blocks, 50);
        assert_eq!(session.index.partition.bytes_per_block, 10);
        assert_eq!(session.index.cache.statuses().len(), 50);
        assert_eq!(session.index.cache.status(3), BlockStatus::Same);
        assert_eq!(session.index.cache.status(4), BlockStatus::Different);
        assert_eq!(session.primary_basename(), "a.bin");
        assert_eq!(session.secondary_name(), "right/b.bin");
    }

    #[test]
    fn resize_rebuilds_partition_and_keeps_offset() {
        let mut session = session(vec![1; 500], vec![1; 500], 14, 16);
        session.apply(Command::JumpToOffset(123));

        session.resize(24, 16).expect("larger terminal should fit");

        assert_eq!(session.index.geometry.grid_width, 20);
        assert_eq!(session.index.partition.total_blocks, 100);
        assert_eq!(session.index.offsets.len(), 100);
        assert_eq!(session.index.cache.statuses().len(), 100);
        assert_eq!(session.index.cache.status(99), BlockStatus::Same);
        assert_eq!(session.view.current_offset, 123);
        assert_eq!(session.current_block(), 24);
    }

    #[test]
    fn failed_resize_keeps_previous_index() {
        let mut session = session(vec![1; 500], vec![1; 500], 14, 16);

        let error = session.resize(8, 16).expect_err("tiny terminal should fail");

        assert!(matches!(error, HexcompareError::TerminalTooSmall { .. }));
        assert_eq!(session.index.partition.total_blocks, 50);
    }

    #[test]
    fn too_small_terminal_aborts_session() {
        let result = Session::new(
            memory_source("a", vec![0; 4]),
            memory_source("b", vec![0; 4]),
            40,
            10,
        );
        assert!(matches!(
            result,
            Err(HexcompareError::TerminalTooSmall { .. })
        ));
    }

    #[test]
    fn double_click_opens_detail_at_block() {
        let mut session = session(vec![1; 500], vec![1; 500], 14, 16);

        session.click(4, 3, ClickKind::Double);

        assert_eq!(session.view.current_offset, 120);
        assert_eq!(session.view.mode, DisplayMode::Detail);

        session.click(5, 3, ClickKind::Single);
        assert_eq!(session.view.current_offset, 120);
    }

    #[test]
    fn read_windows_stop_at_each_file_end() {
        let mut session = session(vec![1, 2, 3, 4], vec![1, 2], 14, 16);

        let (primary, secondary) = session.read_windows(1, 8).expect("windows should read");

        assert_eq!(primary, vec![2, 3, 4]);
        assert_eq!(secondary, vec![2]);
    }
}
