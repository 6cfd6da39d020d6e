use super::*;

#[test]
fn from_rows_rejects_ragged_and_empty_input() {
    let ragged: Vec<Vec<u8>> = vec![vec![0, 1], vec![1]];
    assert!(matches!(
        Grid::from_rows(Levels::Binary, &ragged),
        Err(ReelError::InvalidInput(_))
    ));

    let empty: Vec<Vec<u8>> = Vec::new();
    assert!(Grid::from_rows(Levels::Binary, &empty).is_err());

    let zero_width: Vec<Vec<u8>> = vec![vec![], vec![]];
    assert!(Grid::from_rows(Levels::Binary, &zero_width).is_err());
}

#[test]
fn from_cells_rejects_out_of_domain_values() {
    assert!(Grid::from_cells(1, 2, Levels::Binary, vec![0, 2]).is_err());
    assert!(Grid::from_cells(1, 2, Levels::Ternary, vec![0, 2]).is_ok());
    assert!(Grid::from_cells(1, 2, Levels::Ternary, vec![3, 0]).is_err());
    assert!(Grid::from_cells(2, 2, Levels::Binary, vec![0, 1, 0]).is_err());
}

#[test]
fn transpose_preserves_values() {
    let g = Grid::from_rows(Levels::Ternary, &[[1u8, 2, 0], [0, 0, 1]]).unwrap();
    let t = g.transpose();
    assert_eq!((t.rows(), t.cols()), (3, 2));
    assert_eq!(t.cells(), &[1, 0, 2, 0, 0, 1]);
    for i in 0..g.rows() {
        for j in 0..g.cols() {
            assert_eq!(g.get(i, j), t.get(j, i));
        }
    }
    assert_eq!(t.transpose(), g);
}

#[test]
fn active_cells_are_row_major() {
    let g = Grid::from_rows(Levels::Binary, &[[0u8, 1], [1, 1], [0, 0]]).unwrap();
    let active: Vec<_> = g.active_cells().collect();
    assert_eq!(active, vec![(0, 1), (1, 0), (1, 1)]);
    assert_eq!(g.active_count(), 3);
}

#[test]
fn rows_and_columns_read_back() {
    let g = Grid::from_rows(Levels::Binary, &[[1u8, 0], [0, 1]]).unwrap();
    assert_eq!(g.row(1), &[0, 1]);
    assert_eq!(g.column(0).collect::<Vec<_>>(), vec![1, 0]);
    assert_eq!(g.iter_rows().count(), 2);
    assert_eq!(g.get(2, 0), None);
}
