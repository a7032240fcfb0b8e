//! Property tests for the comparator and the placement policy.
//!
//! Invariants covered:
//! - A blank target cell never causes a mismatch; any other target cell
//!   must be reproduced exactly.
//! - Grids of different shape never match, and comparing them never panics.
//! - Exact placement always wins over a don't-care slot.
//! - With no placement possible, a positive budget discards and a zero
//!   budget restarts, whether or not the board is full.
//! - Placement picks the first candidate in row-major order.
//! - Placements only ever target blank interior cells.

use proptest::prelude::*;

use pipefitter::board::{Cell, Grid, ALL_CELLS};
use pipefitter::policy::{decide, Action};

fn any_cell() -> impl Strategy<Value = Cell> {
    proptest::sample::select(ALL_CELLS.to_vec())
}

fn any_pipe() -> impl Strategy<Value = Cell> {
    proptest::sample::select(ALL_CELLS.iter().copied().filter(|c| c.is_pipe()).collect::<Vec<_>>())
}

/// A rectangular grid of arbitrary cells.
fn any_grid(max: usize) -> impl Strategy<Value = Grid> {
    (1..=max, 1..=max).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(proptest::collection::vec(any_cell(), cols), rows).prop_map(Grid::new)
    })
}

/// A board/target pair of the same rectangular shape.
fn same_shape_pair(max: usize) -> impl Strategy<Value = (Grid, Grid)> {
    (1..=max, 1..=max).prop_flat_map(|(rows, cols)| {
        let g = || proptest::collection::vec(proptest::collection::vec(any_cell(), cols), rows);
        (g(), g()).prop_map(|(a, b)| (Grid::new(a), Grid::new(b)))
    })
}

/// Reference comparator written directly from the wildcard rule.
fn reference_matches(board: &Grid, target: &Grid) -> bool {
    board.rows().iter().zip(target.rows()).all(|(b, t)| {
        b.iter()
            .zip(t)
            .all(|(&found, &expected)| expected == Cell::Blank || found == expected)
    })
}

proptest! {
    #[test]
    fn comparator_follows_wildcard_rule((board, target) in same_shape_pair(8)) {
        prop_assert_eq!(board.matches(&target), reference_matches(&board, &target));
    }

    #[test]
    fn blank_target_matches_every_board(board in any_grid(8)) {
        let blank = Grid::new(board.rows().iter().map(|r| vec![Cell::Blank; r.len()]).collect());
        prop_assert!(board.matches(&blank));
    }

    #[test]
    fn blank_board_matches_only_unconstrained_targets((_, target) in same_shape_pair(8)) {
        let blank = Grid::new(target.rows().iter().map(|r| vec![Cell::Blank; r.len()]).collect());
        let constrained = target.rows().iter().flatten().any(|c| !c.is_blank());
        prop_assert_eq!(blank.matches(&target), !constrained);
    }

    #[test]
    fn different_shapes_never_match(board in any_grid(6), target in any_grid(6)) {
        let same_shape = board.row_count() == target.row_count()
            && board.rows().iter().zip(target.rows()).all(|(b, t)| b.len() == t.len());
        if !same_shape {
            prop_assert!(!board.matches(&target));
        }
    }

    #[test]
    fn ragged_board_never_matches(target in any_grid(6), extra in any_cell(), row in 0usize..6) {
        let mut rows = target.rows().to_vec();
        let row = row % rows.len();
        rows[row].push(extra);
        prop_assert!(!Grid::new(rows).matches(&target));
    }

    #[test]
    fn placements_only_fill_blank_interior_cells(
        (board, target) in same_shape_pair(7),
        piece in any_pipe(),
        discards in proptest::option::of(0u32..4),
    ) {
        let d = decide(&board, &target, Some(piece), discards);
        if let Action::PlaceAt { row, col, piece: placed } = d.action {
            prop_assert!(board.is_interior(row, col));
            prop_assert_eq!(board.get(row, col), Some(Cell::Blank));
            prop_assert_eq!(placed, piece);
            let t = target.get(row, col);
            prop_assert!(t == Some(piece) || (discards == Some(0) && t == Some(Cell::Blank)));
        }
    }

    #[test]
    fn exact_placement_is_first_in_scan_order(
        (board, target) in same_shape_pair(7),
        piece in any_pipe(),
    ) {
        prop_assume!(!board.matches(&target));
        let first = board
            .interior()
            .find(|&(r, c)| board.get(r, c) == Some(Cell::Blank) && target.get(r, c) == Some(piece));
        let d = decide(&board, &target, Some(piece), Some(0));
        if let Some((row, col)) = first {
            prop_assert_eq!(d.action, Action::PlaceAt { row, col, piece });
        }
    }

    #[test]
    fn no_placement_means_discard_or_restart(
        (board, target) in same_shape_pair(7),
        piece in any_pipe(),
        budget in 0u32..5,
    ) {
        prop_assume!(!board.matches(&target));
        let exact = board
            .interior()
            .any(|(r, c)| board.get(r, c) == Some(Cell::Blank) && target.get(r, c) == Some(piece));
        let dont_care = board
            .interior()
            .any(|(r, c)| board.get(r, c) == Some(Cell::Blank) && target.get(r, c) == Some(Cell::Blank));
        prop_assume!(!exact && !(budget == 0 && dont_care));

        let d = decide(&board, &target, Some(piece), Some(budget));
        if budget > 0 {
            prop_assert_eq!(d.action, Action::Discard);
        } else {
            prop_assert_eq!(d.action, Action::Restart);
        }
    }

    #[test]
    fn decide_never_panics_on_mismatched_grids(
        board in any_grid(6),
        target in any_grid(6),
        piece in proptest::option::of(any_cell()),
        discards in proptest::option::of(0u32..4),
    ) {
        let _ = decide(&board, &target, piece, discards);
    }
}

#[test]
fn exact_match_preferred_over_dont_care_at_zero_discards() {
    let board = Grid::from_rows(["OOOOO", "O   O", "OOOOO"]).unwrap();
    let target = Grid::from_rows(["OOOOO", "O  ┼O", "OOOOO"]).unwrap();
    let d = decide(&board, &target, Some(Cell::Cross), Some(0));
    assert_eq!(
        d.action,
        Action::PlaceAt {
            row: 1,
            col: 3,
            piece: Cell::Cross
        }
    );
}

#[test]
fn full_board_with_zero_discards_restarts() {
    let board = Grid::from_rows(["OOOO", "O──O", "O──O", "OOOO"]).unwrap();
    let target = Grid::from_rows(["OOOO", "O||O", "O||O", "OOOO"]).unwrap();
    let d = decide(&board, &target, Some(Cell::Cross), Some(0));
    assert_eq!(d.action, Action::Restart);
}

#[test]
fn three_discards_with_no_placement_discards() {
    let board = Grid::from_rows(["OOOO", "O──O", "OOOO"]).unwrap();
    let target = Grid::from_rows(["OOOO", "O||O", "OOOO"]).unwrap();
    let d = decide(&board, &target, Some(Cell::Cross), Some(3));
    assert_eq!(d.action, Action::Discard);
}
