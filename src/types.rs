/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type wide enough for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional board position `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub(crate) trait GridIndex {
    fn grid_index(self) -> [usize; 2];
}

impl GridIndex for Coord2 {
    fn grid_index(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Shifts `coords` by `delta`, returning the result only while it stays in
/// bounds.
fn apply_offset(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the in-bounds Moore neighborhood of `center` on a board of size
/// `bounds`, excluding `center` itself.
pub fn neighbors(center: Coord2, bounds: Coord2) -> Neighbors {
    Neighbors {
        center,
        bounds,
        cursor: 0,
    }
}

#[derive(Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    cursor: u8,
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while usize::from(self.cursor) < OFFSETS.len() {
            let next_item = apply_offset(self.center, OFFSETS[self.cursor as usize], self.bounds);
            self.cursor += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(center: Coord2, bounds: Coord2) -> Vec<Coord2> {
        neighbors(center, bounds).collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let found = collect((1, 1), (3, 3));
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn corner_neighborhood_is_clipped() {
        let mut found = collect((0, 0), (3, 3));
        found.sort_unstable();
        assert_eq!(found, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_neighborhood_is_clipped() {
        assert_eq!(collect((0, 1), (3, 3)).len(), 5);
        assert_eq!(collect((2, 1), (3, 3)).len(), 5);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(collect((0, 0), (1, 1)).is_empty());
    }
}
