//! Grid column alignment.

use crate::context::Lrud;
use crate::node::Node;
use crate::types::Orientation;

impl Lrud {
    /// Align every row of `grid_id` to the active column of the active row.
    ///
    /// Rows are the nodes running across the grid's own axis (horizontal
    /// rows in a vertical grid). A grid child that is not itself a row
    /// contributes the first row on its active branch. Shorter rows clamp to
    /// their last column.
    pub(crate) fn update_grid(&mut self, grid_id: &str) {
        let Some(grid) = self.nodes.get(grid_id) else {
            return;
        };
        let row_orientation = grid.orientation.perpendicular();
        if row_orientation == Orientation::None {
            return;
        }
        let is_row = move |n: &Node| n.orientation == row_orientation;

        let Some(column) = self
            .search_down(grid_id, is_row)
            .and_then(|row| self.active_index_of(row))
        else {
            return;
        };

        let rows: Vec<(String, usize)> = grid
            .children
            .iter()
            .filter_map(|id| {
                let child = self.nodes.get(id)?;
                let row = if is_row(child) {
                    child
                } else {
                    self.search_down(id, is_row)?
                };
                Some((row.id.clone(), row.children.len()))
            })
            .collect();

        log::trace!("update_grid: {grid_id} column {column} across {} rows", rows.len());
        for (row, len) in rows {
            if len > 0 {
                self.set_active_index(&row, column.min(len - 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Lrud;
    use crate::node::NodeOptions;
    use crate::types::Key;

    /// grid (vertical) → [row1: 4 cells, row2: 2 cells]
    fn test_ctx() -> Lrud {
        let mut lrud = Lrud::new();
        lrud.register("grid", NodeOptions::new().vertical().grid(true))
            .unwrap();
        for (row, cells) in [("row1", 4), ("row2", 2)] {
            lrud.register(row, NodeOptions::new().parent("grid").horizontal())
                .unwrap();
            for i in 0..cells {
                lrud.register(&format!("{row}-{i}"), NodeOptions::new().parent(row))
                    .unwrap();
            }
        }
        lrud
    }

    #[test]
    fn test_down_clamps_to_shorter_row() {
        let mut lrud = test_ctx();
        lrud.focus(Some("row1-3"));

        assert!(lrud.handle_key(Key::Down));
        assert_eq!(lrud.focused_id(), Some("row2-1"));
        assert_eq!(lrud.get_node_by_id("row2").unwrap().active_child(), Some("row2-1"));
    }

    #[test]
    fn test_down_keeps_column() {
        let mut lrud = test_ctx();
        lrud.focus(Some("row2-1"));
        lrud.focus(Some("row1-1"));

        assert!(lrud.handle_key(Key::Down));
        assert_eq!(lrud.focused_id(), Some("row2-1"));
    }

    #[test]
    fn test_up_aligns_longer_row() {
        let mut lrud = test_ctx();
        lrud.focus(Some("row1-3"));
        lrud.focus(Some("row2-0"));

        // row1 remembered column 3; alignment pulls it back to row2's column.
        assert!(lrud.handle_key(Key::Up));
        assert_eq!(lrud.focused_id(), Some("row1-0"));
    }

    #[test]
    fn test_without_grid_flag_rows_remember_their_column() {
        let mut lrud = test_ctx();
        lrud.register("grid", NodeOptions::new().grid(false)).unwrap();
        lrud.focus(Some("row1-3"));
        lrud.focus(Some("row2-0"));

        assert!(lrud.handle_key(Key::Up));
        assert_eq!(lrud.focused_id(), Some("row1-3"));
    }

    #[test]
    fn test_rows_found_through_wrappers() {
        let mut lrud = test_ctx();
        lrud.register("section", NodeOptions::new().parent("grid")).unwrap();
        lrud.register("row3", NodeOptions::new().parent("section").horizontal())
            .unwrap();
        for i in 0..3 {
            lrud.register(&format!("row3-{i}"), NodeOptions::new().parent("row3"))
                .unwrap();
        }

        lrud.focus(Some("row2-1"));
        assert!(lrud.handle_key(Key::Down));
        assert_eq!(lrud.focused_id(), Some("row3-1"));
    }

    #[test]
    fn test_empty_rows_skipped() {
        let mut lrud = test_ctx();
        lrud.register("row0", NodeOptions::new().parent("grid").horizontal())
            .unwrap();
        lrud.focus(Some("row2-1"));
        lrud.update_grid("grid");
        assert_eq!(lrud.get_node_by_id("row0").unwrap().active_child(), None);
        assert_eq!(lrud.get_node_by_id("row1").unwrap().active_child(), Some("row1-1"));
    }
}
