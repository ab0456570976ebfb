use std::collections::VecDeque;

use image::RgbaImage;

/// Bounded undo/redo log of full canvas snapshots.
///
/// `entries[cursor]` is always the state shown on the canvas.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    entries: VecDeque<RgbaImage>,
    cursor: usize,
    capacity: usize,
}

impl SnapshotHistory {
    /// History holding just `initial`.
    pub fn new(initial: RgbaImage, capacity: usize) -> Self {
        let mut entries = VecDeque::with_capacity(capacity.max(1));
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: RgbaImage) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.cursor = 0;
    }

    /// Record `image` as the newest state.
    ///
    /// Anything after the cursor (undone states) is discarded; once the log
    /// exceeds its capacity the oldest entry is evicted.
    pub fn snapshot(&mut self, image: &RgbaImage) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(image.clone());
        self.cursor += 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.cursor -= 1;
        }
        log::debug!("history snapshot {}/{}", self.cursor + 1, self.entries.len());
    }

    /// Step back; `None` (and no change) at the oldest entry.
    pub fn undo(&mut self) -> Option<&RgbaImage> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward; `None` (and no change) at the newest entry.
    pub fn redo(&mut self) -> Option<&RgbaImage> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&RgbaImage> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame(value: u8) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([value, value, value, 255]))
    }

    fn shade(image: &RgbaImage) -> u8 {
        image.get_pixel(0, 0)[0]
    }

    #[test]
    fn undo_then_redo_walks_the_log() {
        let mut history = SnapshotHistory::new(frame(0), 20);
        history.snapshot(&frame(1));
        history.snapshot(&frame(2));

        assert_eq!(history.undo().map(shade), Some(1));
        assert_eq!(history.undo().map(shade), Some(0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), 0);

        assert_eq!(history.redo().map(shade), Some(1));
        assert_eq!(history.redo().map(shade), Some(2));
        assert_eq!(history.redo(), None);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn snapshot_after_undo_discards_the_redo_branch() {
        let mut history = SnapshotHistory::new(frame(0), 20);
        history.snapshot(&frame(1));
        history.snapshot(&frame(2));
        history.undo();
        history.snapshot(&frame(9));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.current().map(shade), Some(9));
        assert_eq!(history.undo().map(shade), Some(1));
    }

    #[test]
    fn oldest_entries_are_evicted_first() {
        let mut history = SnapshotHistory::new(frame(0), 20);
        for value in 1..=30 {
            history.snapshot(&frame(value));
            assert!(history.len() <= 20);
        }
        assert_eq!(history.len(), 20);
        assert_eq!(history.cursor(), 19);
        assert_eq!(history.current().map(shade), Some(30));

        while history.undo().is_some() {}
        assert_eq!(history.current().map(shade), Some(11));
    }

    #[test]
    fn reset_keeps_a_single_entry() {
        let mut history = SnapshotHistory::new(frame(0), 3);
        history.snapshot(&frame(1));
        history.reset(frame(7));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert_eq!(history.current().map(shade), Some(7));
    }
}
