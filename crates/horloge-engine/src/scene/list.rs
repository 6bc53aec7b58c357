use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame
///   allocation once warmed
///
/// Static content can be recorded once into its own list and replayed into
/// the frame list with [`append`](Self::append).
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem { key: SortKey::new(z, order), cmd });
        self.sorted_dirty = true;
    }

    /// Replays every item of `other` (in its insertion order) after the items
    /// already recorded. Z-indices are kept; insertion order is renumbered.
    pub fn append(&mut self, other: &DrawList) {
        self.items.reserve(other.items.len());
        for item in &other.items {
            self.push(item.key.z, item.cmd.clone());
        }
    }

    /// Iterates items in paint order (back-to-front) without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // SortKey carries insertion order, so an unstable sort is still deterministic.
        let items = &self.items;
        self.sorted_indices.sort_unstable_by_key(|&i| items[i].key);

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;

    fn rect_at(x: f32) -> Rect {
        Rect::new(x, 0.0, 1.0, 1.0)
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Rect(r) => Some(r.rect.origin.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut dl = DrawList::new();
        dl.push_rect(ZIndex(2), rect_at(0.0), Color::BLACK);
        dl.push_rect(ZIndex(1), rect_at(1.0), Color::BLACK);
        dl.push_rect(ZIndex(1), rect_at(2.0), Color::BLACK);
        assert_eq!(xs(&mut dl), vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut dl = DrawList::new();
        dl.push_rect(ZIndex(0), rect_at(0.0), Color::BLACK);
        dl.clear();
        assert!(dl.is_empty());
        dl.push_rect(ZIndex(0), rect_at(5.0), Color::BLACK);
        assert_eq!(dl.items()[0].key.order, 0);
        assert_eq!(xs(&mut dl), vec![5.0]);
    }

    #[test]
    fn append_replays_after_existing_items() {
        let mut cached = DrawList::new();
        cached.push_rect(ZIndex(0), rect_at(10.0), Color::BLACK);
        cached.push_solid_circle(ZIndex(0), Vec2::new(0.0, 0.0), 3.0, Color::BLACK);

        let mut frame = DrawList::new();
        frame.push_rect(ZIndex(0), rect_at(1.0), Color::BLACK);
        frame.append(&cached);
        frame.append(&cached);

        assert_eq!(frame.len(), 5);
        assert_eq!(cached.len(), 2);
        assert_eq!(xs(&mut frame), vec![1.0, 10.0, 10.0]);
    }
}
