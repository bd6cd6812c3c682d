use crate::*;

/// A round engine wired to a progress store: owns the current round, the
/// rule draw, and the end-of-round bookkeeping. Each session belongs to one
/// player surface; rounds are never shared across sessions.
#[derive(Debug)]
pub struct Session<S: ProgressStore, R: RuleSelector> {
    difficulty: Difficulty,
    round: Round,
    selector: R,
    progress: S,
}

impl<S: ProgressStore, R: RuleSelector> Session<S, R> {
    pub fn new(difficulty: Difficulty, mut selector: R, progress: S) -> Self {
        let round = Round::new(difficulty, draw_rule(&mut selector, difficulty));
        Self {
            difficulty,
            round,
            selector,
            progress,
        }
    }

    /// Starts from a difficulty token, coercing unknown values to easy.
    pub fn start(token: &str, selector: R, progress: S) -> Self {
        Self::new(Difficulty::from_token(token), selector, progress)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn progress(&self) -> &S {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut S {
        &mut self.progress
    }

    pub fn into_progress(self) -> S {
        self.progress
    }

    /// Reveals a tile and, when this click ends the round, settles it
    /// against the store: a win unlocks the rule, and both outcomes record
    /// the final score. Each round settles at most once because a finished
    /// round rejects further reveals.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.round.reveal(coords)?;

        match outcome {
            RevealOutcome::Won => {
                self.progress.unlock(self.round.rule().id)?;
                self.progress
                    .record_score(self.difficulty, self.round.score())?;
            }
            RevealOutcome::Lost => {
                self.progress
                    .record_score(self.difficulty, self.round.score())?;
            }
            _ => {}
        }

        Ok(outcome)
    }

    /// Fresh round at the same difficulty with a new rule draw. An
    /// unfinished round is simply dropped and records nothing.
    pub fn restart(&mut self) {
        self.round = Round::new(self.difficulty, draw_rule(&mut self.selector, self.difficulty));
    }

    /// Fresh round at a different difficulty.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.restart();
    }
}

fn draw_rule<R: RuleSelector>(selector: &mut R, difficulty: Difficulty) -> &'static Rule {
    let pool = rules_for(difficulty);
    &pool[selector.pick(pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestSession = Session<Progress<MemoryBlobStore>, FixedRuleSelector>;

    fn session_on(rule_id: &str) -> TestSession {
        let index = rules_for(Difficulty::Easy)
            .iter()
            .position(|rule| rule.id == rule_id)
            .unwrap();
        Session::new(
            Difficulty::Easy,
            FixedRuleSelector::new(index),
            Progress::in_memory(),
        )
    }

    fn win(session: &mut TestSession) {
        for i in 0..5 {
            session.reveal((i, i)).unwrap();
        }
    }

    fn lose(session: &mut TestSession) {
        for row in 0..5 {
            for col in 0..5 {
                if row != col {
                    session.reveal((row, col)).unwrap();
                }
            }
        }
    }

    #[test]
    fn winning_unlocks_the_rule_and_records_the_score() {
        let mut session = session_on("main-diagonal");
        win(&mut session);

        assert_eq!(session.round().phase(), RoundPhase::Won);
        assert_eq!(
            session.progress().unlocked_ids().unwrap(),
            vec!["main-diagonal".to_owned()]
        );
        assert_eq!(session.progress().best(Difficulty::Easy).unwrap(), Some(10));
    }

    #[test]
    fn losing_records_the_score_but_unlocks_nothing() {
        let mut session = session_on("main-diagonal");
        lose(&mut session);

        assert_eq!(session.round().phase(), RoundPhase::Lost);
        assert!(session.progress().unlocked_ids().unwrap().is_empty());
        assert_eq!(
            session.progress().best(Difficulty::Easy).unwrap(),
            Some(-20)
        );
    }

    #[test]
    fn worse_later_rounds_do_not_lower_the_best() {
        let mut session = session_on("main-diagonal");
        win(&mut session);
        session.restart();
        lose(&mut session);

        assert_eq!(session.progress().best(Difficulty::Easy).unwrap(), Some(10));
    }

    #[test]
    fn repeated_wins_keep_the_unlocked_set_stable() {
        let mut session = session_on("main-diagonal");
        for _ in 0..3 {
            win(&mut session);
            session.restart();
        }

        assert_eq!(
            session.progress().unlocked_ids().unwrap(),
            vec!["main-diagonal".to_owned()]
        );
    }

    #[test]
    fn restart_resets_the_round_state() {
        let mut session = session_on("main-diagonal");
        session.reveal((0, 0)).unwrap();
        session.reveal((0, 1)).unwrap();

        session.restart();

        let round = session.round();
        assert_eq!(round.score(), 0);
        assert_eq!(round.moves_remaining(), 20);
        assert_eq!(round.phase(), RoundPhase::Playing);
        assert_eq!(round.tile_at((0, 0)), TileState::Unknown);
    }

    #[test]
    fn selector_controls_the_rule_draw() {
        let picks = std::cell::Cell::new(0usize);
        struct Cycling<'a>(&'a std::cell::Cell<usize>);
        impl RuleSelector for Cycling<'_> {
            fn pick(&mut self, pool_len: usize) -> usize {
                let i = self.0.get();
                self.0.set(i + 1);
                i % pool_len
            }
        }

        let mut session = Session::new(
            Difficulty::Medium,
            Cycling(&picks),
            Progress::in_memory(),
        );
        assert_eq!(session.round().rule().id, rules_for(Difficulty::Medium)[0].id);
        session.restart();
        assert_eq!(session.round().rule().id, rules_for(Difficulty::Medium)[1].id);
    }

    #[test]
    fn unknown_difficulty_token_starts_an_easy_round() {
        let session: TestSession = Session::start(
            "ultra-violence",
            FixedRuleSelector::new(0),
            Progress::in_memory(),
        );
        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(session.round().config().grid_size, 5);
    }

    #[test]
    fn change_difficulty_swaps_pool_and_config() {
        let mut session = session_on("main-diagonal");
        session.change_difficulty(Difficulty::Hard);

        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.round().config().grid_size, 7);
        assert!(rules_for(Difficulty::Hard)
            .iter()
            .any(|rule| rule.id == session.round().rule().id));
    }
}
