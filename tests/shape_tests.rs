//! Shape tests - catalog contents and the clockwise remap

use mini_tetris::core::{template, Shape, CATALOG};
use mini_tetris::types::ShapeKind;

#[test]
fn test_catalog_has_four_cells_per_shape() {
    assert_eq!(CATALOG.len(), ShapeKind::ALL.len());
    for kind in ShapeKind::ALL {
        assert_eq!(template(kind).filled_count(), 4, "{kind:?}");
        assert_eq!(template(kind), CATALOG[kind.index()]);
    }
}

#[test]
fn test_templates_sit_in_top_left_of_box() {
    for kind in ShapeKind::ALL {
        let shape = template(kind);
        assert_eq!(shape.row_span().map(|(lo, _)| lo), Some(0), "{kind:?}");
        assert_eq!(shape.col_span().map(|(lo, _)| lo), Some(0), "{kind:?}");
    }
}

#[test]
fn test_rotation_remap() {
    // rotated[c][3 - r] = orig[r][c]
    for kind in ShapeKind::ALL {
        let orig = template(kind);
        let rot = orig.rotated_cw();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(orig.rows()[r][c], rot.rows()[c][3 - r]);
            }
        }
    }
}

#[test]
fn test_bar_rotates_into_last_column() {
    let bar = template(ShapeKind::Bar).rotated_cw();
    assert_eq!(
        bar,
        Shape::new([[0, 0, 0, 1], [0, 0, 0, 1], [0, 0, 0, 1], [0, 0, 0, 1]])
    );
    assert_eq!(bar.col_span(), Some((3, 3)));
    assert_eq!(bar.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), bar);
}

#[test]
fn test_square_is_not_rotation_invariant_in_its_box() {
    // No centering: the square moves to the right half of the box.
    let sq = template(ShapeKind::Square).rotated_cw();
    assert_eq!(sq.col_span(), Some((2, 3)));
    assert_eq!(sq.row_span(), Some((0, 1)));
}
