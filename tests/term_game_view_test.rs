use mini_tetris::core::{ActivePiece, Game, Grid};
use mini_tetris::term::{GameView, Viewport};
use mini_tetris::types::ShapeKind;

#[test]
fn term_view_renders_border_corners() {
    let snap = Game::new(1).snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: 10*2 by 20*1 board plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = Game::new(1).snapshot();
    snap.board[19][0] = 1;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let y0 = 1 + 19;
    assert_eq!(fb.get(1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(2, y0).unwrap().ch, '█');
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
}

#[test]
fn term_view_active_and_locked_use_different_styles() {
    let mut grid = Grid::new();
    grid.lock(19, 0);
    let snap = Game::from_parts(grid, ActivePiece::spawn(ShapeKind::Square), 1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Square at box (0,3): first cell at x = 1 + 3*2, y = 1.
    let active = fb.get(7, 1).unwrap();
    let locked = fb.get(1, 20).unwrap();
    assert_eq!(active.ch, '█');
    assert_eq!(locked.ch, '█');
    assert_ne!(active.style, locked.style);
}

#[test]
fn term_view_side_panel_shows_piece_and_seed() {
    let snap = Game::from_parts(Grid::new(), ActivePiece::spawn(ShapeKind::T), 314).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(60, 24));

    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.iter().any(|l| l.contains("PIECE")));
    assert!(text.iter().any(|l| l.contains("314")));
    assert!(!text.iter().any(|l| l.contains("STACK FULL")));
}

#[test]
fn term_view_flags_overlapping_spawn() {
    let mut grid = Grid::new();
    for c in 0..10 {
        grid.lock(0, c);
    }
    let snap = Game::from_parts(grid, ActivePiece::spawn(ShapeKind::Bar), 1).snapshot();
    assert!(snap.overlapping);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.iter().any(|l| l.contains("STACK FULL")));
}

#[test]
fn term_view_tiny_viewport_does_not_panic() {
    let snap = Game::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}
