//! Game module - the engine state machine
//!
//! Owns the settled grid and the one falling piece. Every mutation goes
//! through [`Game::can_place`], so the active piece never sits out of bounds
//! or on a locked cell after a move or rotation. The only exception is spawn,
//! which places the new piece without checking (there is no game-over state;
//! see [`Game::active_overlaps`]).

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::shape::{template, FilledCells, Shape};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Action, CellState, RenderGrid, ShapeKind, COLUMNS, ROWS, SPAWN_COL, SPAWN_ROW};

/// The falling piece: a shape and the grid position of its 4x4 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl ActivePiece {
    /// Fresh piece of `kind` at the spawn position
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            kind,
            shape: template(kind),
            row: SPAWN_ROW,
            col: SPAWN_COL,
        }
    }

    /// Absolute grid positions of the filled sub-cells.
    ///
    /// Positions that would overflow the coordinate type are skipped; they
    /// are out of bounds either way.
    pub fn cells(&self) -> FilledCells {
        let mut out = FilledCells::new();
        for (r, c) in self.shape.filled() {
            if let (Some(row), Some(col)) = (self.row.checked_add(r), self.col.checked_add(c)) {
                out.push((row, col));
            }
        }
        out
    }
}

/// Result of [`Game::move_down`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece descended one row
    Moved,
    /// The piece could not descend; it was locked and a new one spawned
    Locked,
}

/// What an [`Action`] did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Moved,
    Rotated,
    Locked,
    /// Illegal move or rotation; state unchanged
    Rejected,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Moved => "moved",
            Outcome::Rotated => "rotated",
            Outcome::Locked => "locked",
            Outcome::Rejected => "rejected",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    active: ActivePiece,
    rng: SimpleRng,
    seed: u32,
    /// Pieces spawned so far, including the current one
    pieces_spawned: u32,
    pieces_locked: u32,
}

impl Game {
    /// Start a game whose spawn sequence is fully determined by `seed`
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let active = ActivePiece::spawn(rng.next_kind());
        Self {
            grid: Grid::new(),
            active,
            rng,
            seed,
            pieces_spawned: 1,
            pieces_locked: 0,
        }
    }

    /// Start a game seeded from the wall clock
    pub fn new_game() -> Self {
        Self::new(crate::rng::clock_seed())
    }

    /// Build a state from explicit parts.
    ///
    /// The placement is taken as-is, the same way spawn does it; check
    /// [`Game::active_overlaps`] if that matters to the caller. Later spawns
    /// draw from `seed`.
    pub fn from_parts(grid: Grid, active: ActivePiece, seed: u32) -> Self {
        Self {
            grid,
            active,
            rng: SimpleRng::new(seed),
            seed,
            pieces_spawned: 1,
            pieces_locked: 0,
        }
    }

    /// Throw the current game away and start over.
    ///
    /// The new seed is drawn from the current RNG, so a seeded run stays
    /// reproducible across restarts.
    pub fn reset(&mut self) {
        let seed = self.rng.next_u32();
        *self = Self::new(seed);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Would the active shape fit with its box at `(row, col)`?
    pub fn can_place(&self, row: i8, col: i8) -> bool {
        self.fits(&self.active.shape, row, col)
    }

    /// Every filled sub-cell of `shape` at `(row, col)` is in bounds and on
    /// an empty cell.
    pub fn fits(&self, shape: &Shape, row: i8, col: i8) -> bool {
        shape.filled().iter().all(|&(r, c)| {
            match (row.checked_add(r), col.checked_add(c)) {
                (Some(rr), Some(cc)) => self.grid.is_vacant(rr, cc),
                _ => false,
            }
        })
    }

    /// True when the active piece sits on locked cells or outside the grid.
    ///
    /// Moves and rotations never produce this; it only happens when a piece
    /// spawns onto a stack that already reaches the spawn area.
    pub fn active_overlaps(&self) -> bool {
        !self.can_place(self.active.row, self.active.col)
    }

    fn try_shift(&mut self, dcol: i8) -> bool {
        let col = self.active.col.saturating_add(dcol);
        if self.can_place(self.active.row, col) {
            self.active.col = col;
            true
        } else {
            false
        }
    }

    /// Shift one column left; returns false (and changes nothing) if blocked
    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    /// Shift one column right; returns false (and changes nothing) if blocked
    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    /// Descend one row, or lock the piece and spawn the next one
    pub fn move_down(&mut self) -> DropOutcome {
        let row = self.active.row.saturating_add(1);
        if self.can_place(row, self.active.col) {
            self.active.row = row;
            return DropOutcome::Moved;
        }

        self.lock_active();
        // Full rows stay where they are; there is no line clear.
        self.spawn();
        DropOutcome::Locked
    }

    /// Rotate clockwise in place; rejected (shape unchanged) if the rotated
    /// form does not fit at the current position.
    pub fn rotate(&mut self) -> bool {
        let rotated = self.active.shape.rotated_cw();
        if !self.fits(&rotated, self.active.row, self.active.col) {
            return false;
        }
        self.active.shape = rotated;
        true
    }

    /// Dispatch a discrete action
    pub fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::Left if self.move_left() => Outcome::Moved,
            Action::Right if self.move_right() => Outcome::Moved,
            Action::Rotate if self.rotate() => Outcome::Rotated,
            Action::Down => match self.move_down() {
                DropOutcome::Moved => Outcome::Moved,
                DropOutcome::Locked => Outcome::Locked,
            },
            _ => Outcome::Rejected,
        }
    }

    /// Copy the piece's in-bounds cells into the grid.
    fn lock_active(&mut self) {
        for (row, col) in self.active.cells() {
            // Out-of-bounds cells cannot come from a legal position; drop them.
            self.grid.lock(row, col);
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
    }

    /// Replace the active piece with a random one at the spawn position.
    /// No placement check.
    fn spawn(&mut self) {
        self.active = ActivePiece::spawn(self.rng.next_kind());
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
    }

    /// Settled grid with the active piece overlaid as `2`.
    ///
    /// Always a fresh copy; writing to it has no effect on the game.
    pub fn render(&self) -> RenderGrid {
        let mut out = [[0u8; COLUMNS]; ROWS];
        self.render_into(&mut out);
        out
    }

    /// Same as [`Game::render`] but into a caller-owned buffer
    pub fn render_into(&self, out: &mut RenderGrid) {
        self.grid.write_u8_grid(out);
        for (row, col) in self.active.cells() {
            if Grid::in_bounds(row, col) {
                out[row as usize][col as usize] = CellState::Active.as_u8();
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.render_into(&mut out.board);
        out.active = ActiveSnapshot::from(self.active);
        out.seed = self.seed;
        out.pieces_spawned = self.pieces_spawned;
        out.pieces_locked = self.pieces_locked;
        out.overlapping = self.active_overlaps();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
