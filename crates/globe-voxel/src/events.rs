//! Voxel change events.
//!
//! Provides [`VoxelChangedEvent`] for notifying collaborators outside the
//! storage core (audio, particles, inventory UI) when a cell changes.
//! Events are collected into a [`VoxelEventBuffer`] that is double-buffered per
//! frame.

use crate::category::Category;
use crate::coord::Coordinate;

/// Emitted when a single cell gains or loses a voxel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelChangedEvent {
    /// The affected cell.
    pub coord: Coordinate,
    /// What occupied the cell before the change.
    pub old: Option<Category>,
    /// What occupies the cell after the change.
    pub new: Option<Category>,
}

impl VoxelChangedEvent {
    /// A voxel of `category` appeared at `coord`.
    pub fn placed(coord: Coordinate, category: Category) -> Self {
        Self {
            coord,
            old: None,
            new: Some(category),
        }
    }

    /// A voxel of `category` disappeared from `coord`.
    pub fn removed(coord: Coordinate, category: Category) -> Self {
        Self {
            coord,
            old: Some(category),
            new: None,
        }
    }
}

/// Double-buffered event storage for voxel changes.
///
/// Events written in the current frame are readable in the current and next frame.
/// After two [`swap`](VoxelEventBuffer::swap) calls, events are dropped.
/// Call [`swap`](VoxelEventBuffer::swap) once per frame.
#[derive(Debug, Default)]
pub struct VoxelEventBuffer {
    /// Events from the previous frame (readable).
    prev: Vec<VoxelChangedEvent>,
    /// Events from the current frame (being written).
    current: Vec<VoxelChangedEvent>,
}

impl VoxelEventBuffer {
    /// Creates a new empty event buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one change.
    pub fn send(&mut self, event: VoxelChangedEvent) {
        self.current.push(event);
    }

    /// Returns all readable events (previous + current frame).
    pub fn read(&self) -> impl Iterator<Item = &VoxelChangedEvent> {
        self.prev.iter().chain(self.current.iter())
    }

    /// Returns the number of readable events.
    pub fn len(&self) -> usize {
        self.prev.len() + self.current.len()
    }

    /// Returns `true` if there are no readable events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advances the frame: previous events are dropped, current becomes previous.
    pub fn swap(&mut self) {
        self.prev.clear();
        std::mem::swap(&mut self.prev, &mut self.current);
    }

    /// Clears all events from both buffers.
    pub fn clear(&mut self) {
        self.prev.clear();
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let c = Coordinate::new(0, 0, 3);
        let placed = VoxelChangedEvent::placed(c, Category::Wood);
        assert_eq!(placed.old, None);
        assert_eq!(placed.new, Some(Category::Wood));
        let removed = VoxelChangedEvent::removed(c, Category::Stone);
        assert_eq!(removed.old, Some(Category::Stone));
        assert_eq!(removed.new, None);
    }

    #[test]
    fn test_events_cleared_after_two_frames() {
        let mut events = VoxelEventBuffer::new();
        events.send(VoxelChangedEvent::placed(Coordinate::ORIGIN, Category::Grass));

        // Frame N: event is readable
        assert_eq!(events.len(), 1);

        // Frame N+1: moved to prev, still readable
        events.swap();
        assert_eq!(events.len(), 1);

        // Frame N+2: gone
        events.swap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_read_orders_prev_before_current() {
        let mut events = VoxelEventBuffer::new();
        events.send(VoxelChangedEvent::placed(Coordinate::new(1, 0, 0), Category::Dirt));
        events.swap();
        events.send(VoxelChangedEvent::placed(Coordinate::new(2, 0, 0), Category::Dirt));

        let coords: Vec<_> = events.read().map(|e| e.coord.x).collect();
        assert_eq!(coords, vec![1, 2]);
    }

    #[test]
    fn test_clear() {
        let mut events = VoxelEventBuffer::new();
        events.send(VoxelChangedEvent::removed(Coordinate::ORIGIN, Category::Leaf));
        events.swap();
        events.send(VoxelChangedEvent::removed(Coordinate::ORIGIN, Category::Leaf));
        events.clear();
        assert!(events.is_empty());
    }
}
