use ndarray::Array2;

use crate::*;

/// Valid transitions: Playing -> Won, Playing -> Lost, each at most once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Playing,
    Won,
    Lost,
}

impl RoundPhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Guarded click: finished round, exhausted budget, or an already
    /// revealed cell. State is unchanged.
    NoChange,
    Correct,
    Incorrect,
    /// This reveal completed the set of correct cells.
    Won,
    /// This reveal spent the last move short of the win condition.
    Lost,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One round from rule draw to win or loss. Owned by a single session,
/// mutated only through `reveal`, replaced wholesale on restart.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    rule: &'static Rule,
    difficulty: Difficulty,
    config: DifficultyConfig,
    tiles: Array2<TileState>,
    moves_remaining: MoveCount,
    moves_used: MoveCount,
    score: Score,
    target_count: CellCount,
    correct_found: CellCount,
    phase: RoundPhase,
}

impl Round {
    pub fn new(difficulty: Difficulty, rule: &'static Rule) -> Self {
        let config = difficulty.config();
        let size = usize::from(config.grid_size);
        // The predicate is pure, so the target computed here is the same one
        // a per-move recount would produce.
        let target_count = rule.target_count(config.grid_size);
        log::debug!(
            "new round: rule {} on {}x{}, {} correct cells, {} moves",
            rule.id,
            config.grid_size,
            config.grid_size,
            target_count,
            config.move_budget
        );
        Self {
            rule,
            difficulty,
            config,
            tiles: Array2::default((size, size)),
            moves_remaining: config.move_budget,
            moves_used: 0,
            score: 0,
            target_count,
            correct_found: 0,
            phase: RoundPhase::default(),
        }
    }

    pub fn rule(&self) -> &'static Rule {
        self.rule
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> DifficultyConfig {
        self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn moves_remaining(&self) -> MoveCount {
        self.moves_remaining
    }

    pub fn moves_used(&self) -> MoveCount {
        self.moves_used
    }

    pub fn target_count(&self) -> CellCount {
        self.target_count
    }

    pub fn correct_found(&self) -> CellCount {
        self.correct_found
    }

    pub fn tile_at(&self, coords: Coord2) -> TileState {
        self.tiles[coords.to_nd_index()]
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.config.grid_size && coords.1 < self.config.grid_size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// The single state transition of a round. Clicks that the game cannot
    /// accept are no-ops, not errors; only out-of-bounds coordinates fail.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.phase.is_finished() || self.moves_remaining == 0 {
            return Ok(RevealOutcome::NoChange);
        }
        if !self.tile_at(coords).is_unknown() {
            return Ok(RevealOutcome::NoChange);
        }

        let (row, col) = coords;
        let correct = self.rule.holds_at(row, col, self.config.grid_size);

        self.tiles[coords.to_nd_index()] = if correct {
            TileState::Correct
        } else {
            TileState::Incorrect
        };
        self.moves_remaining -= 1;
        self.moves_used += 1;
        self.score += if correct {
            self.config.correct_delta
        } else {
            self.config.wrong_delta
        };
        if correct {
            self.correct_found += 1;
        }
        log::trace!(
            "reveal ({}, {}): correct={}, score={}, moves left={}",
            row,
            col,
            correct,
            self.score,
            self.moves_remaining
        );

        // Win before loss: a last move that completes the set still wins.
        Ok(if self.correct_found >= self.target_count {
            self.phase = RoundPhase::Won;
            log::debug!("round won with score {}", self.score);
            RevealOutcome::Won
        } else if self.moves_remaining == 0 {
            self.phase = RoundPhase::Lost;
            log::debug!("round lost with score {}", self.score);
            RevealOutcome::Lost
        } else if correct {
            RevealOutcome::Correct
        } else {
            RevealOutcome::Incorrect
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_with(difficulty: Difficulty, rule_id: &str) -> Round {
        Round::new(difficulty, rule_by_id(rule_id).unwrap())
    }

    #[test]
    fn new_round_starts_at_the_tier_budget() {
        for difficulty in Difficulty::ALL {
            let round = Round::new(difficulty, &rules_for(difficulty)[0]);
            let config = difficulty.config();
            assert_eq!(round.moves_remaining(), config.move_budget);
            assert_eq!(round.score(), 0);
            assert_eq!(round.phase(), RoundPhase::Playing);
            for row in 0..config.grid_size {
                for col in 0..config.grid_size {
                    assert_eq!(round.tile_at((row, col)), TileState::Unknown);
                }
            }
        }
    }

    #[test]
    fn revealing_the_diagonal_wins_with_moves_to_spare() {
        let mut round = round_with(Difficulty::Easy, "main-diagonal");

        for i in 0..4 {
            assert_eq!(round.reveal((i, i)).unwrap(), RevealOutcome::Correct);
        }
        assert_eq!(round.reveal((4, 4)).unwrap(), RevealOutcome::Won);

        assert_eq!(round.score(), 10);
        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(round.moves_remaining(), 15);
    }

    #[test]
    fn exhausting_the_budget_on_wrong_cells_loses() {
        let mut round = round_with(Difficulty::Easy, "main-diagonal");

        let mut wrong: Vec<Coord2> = Vec::new();
        for row in 0..5 {
            for col in 0..5 {
                if row != col {
                    wrong.push((row, col));
                }
            }
        }
        assert_eq!(wrong.len(), 20);

        let (last, rest) = wrong.split_last().unwrap();
        for &coords in rest {
            assert_eq!(round.reveal(coords).unwrap(), RevealOutcome::Incorrect);
        }
        assert_eq!(round.reveal(*last).unwrap(), RevealOutcome::Lost);

        assert_eq!(round.score(), -20);
        assert_eq!(round.moves_remaining(), 0);
        assert_eq!(round.phase(), RoundPhase::Lost);
    }

    #[test]
    fn winning_on_the_very_last_move_resolves_as_won() {
        let mut round = round_with(Difficulty::Easy, "main-diagonal");

        // 15 wrong reveals leave exactly 5 moves for the 5 diagonal cells.
        let mut spent = 0;
        'outer: for row in 0..5u8 {
            for col in 0..5u8 {
                if row != col {
                    round.reveal((row, col)).unwrap();
                    spent += 1;
                    if spent == 15 {
                        break 'outer;
                    }
                }
            }
        }
        assert_eq!(round.moves_remaining(), 5);

        for i in 0..4 {
            assert_eq!(round.reveal((i, i)).unwrap(), RevealOutcome::Correct);
        }
        assert_eq!(round.reveal((4, 4)).unwrap(), RevealOutcome::Won);
        assert_eq!(round.moves_remaining(), 0);
        assert_eq!(round.score(), 15 * -1 + 5 * 2);
    }

    #[test]
    fn second_click_on_a_revealed_cell_changes_nothing() {
        let mut round = round_with(Difficulty::Easy, "main-diagonal");

        assert_eq!(round.reveal((2, 2)).unwrap(), RevealOutcome::Correct);
        let snapshot = round.clone();

        assert_eq!(round.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(round, snapshot);
    }

    #[test]
    fn finished_round_ignores_further_clicks() {
        let mut round = round_with(Difficulty::Easy, "main-diagonal");
        for i in 0..5 {
            round.reveal((i, i)).unwrap();
        }
        assert!(round.is_finished());

        assert_eq!(round.reveal((0, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(round.score(), 10);
        assert_eq!(round.moves_remaining(), 15);
    }

    #[test]
    fn moves_remaining_decreases_by_one_per_accepted_reveal() {
        let mut round = round_with(Difficulty::Easy, "checkerboard");
        let mut previous = round.moves_remaining();

        for (i, coords) in [(0u8, 0u8), (0, 1), (1, 0), (0, 0)].into_iter().enumerate() {
            round.reveal(coords).unwrap();
            let accepted = i < 3;
            let expected = if accepted { previous - 1 } else { previous };
            assert_eq!(round.moves_remaining(), expected);
            previous = round.moves_remaining();
        }
        assert_eq!(round.moves_used(), 3);
    }

    #[test]
    fn out_of_bounds_coordinates_are_an_error() {
        let mut round = round_with(Difficulty::Easy, "main-diagonal");
        assert!(matches!(
            round.reveal((5, 0)),
            Err(GameError::InvalidCoords)
        ));
        assert!(matches!(
            round.reveal((0, 5)),
            Err(GameError::InvalidCoords)
        ));
        assert_eq!(round.moves_remaining(), 20);
    }
}
