use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Active
    }
}

/// Why a game stopped accepting moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// Every cell is visited.
    BoardComplete,
    /// The level's move budget ran out.
    BudgetSpent,
    /// No unvisited neighbor and no bonus charge left.
    Stuck,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    level: Level,
    config: LevelConfig,
    board: Board,
    cursor: Coord2,
    moves_left: CellCount,
    moves_made: CellCount,
    bonus_charges: CellCount,
    bonuses_collected: CellCount,
    jump_armed: bool,
    seed: u64,
    clock: Chronometer,
    state: EngineState,
    finish_reason: Option<FinishReason>,
}

impl PlayEngine {
    /// Sets up the board and places the horse on the layout's start cell, which spends the first move.
    pub fn new(level: Level, config: LevelConfig, layout: &Layout, seed: u64) -> Self {
        let start = layout.start();
        let mut engine = Self {
            level,
            config,
            board: Board::from_layout(layout),
            cursor: start,
            moves_left: config.moves,
            moves_made: 0,
            bonus_charges: 0,
            bonuses_collected: 0,
            jump_armed: false,
            seed,
            clock: Chronometer::default(),
            state: Default::default(),
            finish_reason: None,
        };

        engine.occupy(start);
        engine.clock.start();
        log::debug!(
            "Level {} started at {:?} with {} moves, bonus every {}",
            level,
            start,
            config.moves,
            config.bonus_interval
        );
        engine.evaluate();
        engine
    }

    /// Generates a random layout for `config` and starts a game on it.
    pub fn generate(level: Level, config: LevelConfig, seed: u64) -> Self {
        let layout = RandomLayoutGenerator::new(seed).generate(BOARD_SIZE, &config);
        Self::new(level, config, &layout, seed)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn moves_left(&self) -> CellCount {
        self.moves_left
    }

    pub fn moves_made(&self) -> CellCount {
        self.moves_made
    }

    pub fn bonus_charges(&self) -> CellCount {
        self.bonus_charges
    }

    pub fn bonuses_collected(&self) -> CellCount {
        self.bonuses_collected
    }

    /// A charge was spent and the next move may land on any unvisited cell.
    pub fn jump_armed(&self) -> bool {
        self.jump_armed
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    /// Cells visited so far, prefilled ones included.
    pub fn score(&self) -> CellCount {
        self.board.visited_count()
    }

    pub fn report(&self) -> Option<Report> {
        Report::from_engine(self)
    }

    /// Advances the elapsed-time clock by one second, returns whether it was running.
    pub fn tick(&mut self) -> bool {
        self.clock.tick()
    }

    pub fn can_move_to(&self, coords: Coord2) -> bool {
        !self.state.is_finished()
            && self.board.validate_coords(coords).is_ok()
            && self.is_legal(coords)
    }

    /// Every cell the horse may move to next.
    pub fn options(&self) -> impl Iterator<Item = Coord2> + '_ {
        let active = !self.state.is_finished();
        self.board
            .open_cells()
            .filter(move |&pos| active && self.is_legal(pos))
    }

    pub fn option_count(&self) -> usize {
        self.options().count()
    }

    pub fn move_to(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_active()?;

        if !self.is_legal(coords) {
            log::trace!("Rejected move from {:?} to {:?}", self.cursor, coords);
            return Ok(MoveOutcome::NoChange);
        }

        self.jump_armed = false;
        self.moves_made += 1;
        if self.board.is_bonus(coords) {
            self.bonus_charges += 1;
            self.bonuses_collected += 1;
            log::debug!("Bonus collected at {:?}, charges: {}", coords, self.bonus_charges);
        }
        self.occupy(coords);
        log::trace!(
            "Moved to {:?}, moves left: {}, options: {}",
            coords,
            self.moves_left,
            self.option_count()
        );

        let outcome = self.evaluate();
        if !self.state.is_finished() && self.config.is_bonus_move(self.moves_made) {
            self.spawn_bonus();
        }
        Ok(outcome)
    }

    fn is_legal(&self, coords: Coord2) -> bool {
        !self.board.is_visited(coords)
            && (self.jump_armed || manhattan(self.cursor, coords) == 1)
    }

    fn occupy(&mut self, coords: Coord2) {
        self.moves_left = self.moves_left.saturating_sub(1);
        self.board.set(coords, BoardCell::Visited);
        self.cursor = coords;
    }

    /// Applies the end conditions after the horse lands, spending a charge when stuck.
    fn evaluate(&mut self) -> MoveOutcome {
        if self.board.is_complete() {
            self.finish(EngineState::Won, FinishReason::BoardComplete);
            MoveOutcome::Won
        } else if self.moves_left == 0 {
            self.finish(EngineState::Won, FinishReason::BudgetSpent);
            MoveOutcome::Won
        } else if self.board.unvisited_neighbors(self.cursor).next().is_none() {
            if self.bonus_charges > 0 {
                self.bonus_charges -= 1;
                self.jump_armed = true;
                log::debug!("Stuck at {:?}, spent a charge to jump", self.cursor);
                MoveOutcome::Moved
            } else {
                self.finish(EngineState::Lost, FinishReason::Stuck);
                MoveOutcome::Lost
            }
        } else {
            MoveOutcome::Moved
        }
    }

    /// Drops a bonus on a random empty cell, if any is left.
    fn spawn_bonus(&mut self) -> Option<Coord2> {
        let empty: Vec<Coord2> = self.board.empty_cells().collect();
        let mut rng = SmallRng::seed_from_u64(
            self.seed ^ u64::from(self.moves_made).wrapping_mul(0x9e37_79b9_7f4a_7c15),
        );
        let Some(&coords) = empty.choose(&mut rng) else {
            log::debug!("No empty cell left for a bonus");
            return None;
        };
        self.place_bonus(coords);
        log::debug!("Bonus spawned at {:?} after {} moves", coords, self.moves_made);
        Some(coords)
    }

    pub(crate) fn place_bonus(&mut self, coords: Coord2) {
        self.board.set(coords, BoardCell::Bonus);
    }

    fn finish(&mut self, state: EngineState, reason: FinishReason) {
        if self.state.is_finished() {
            return;
        }

        self.state = state;
        self.finish_reason = Some(reason);
        self.clock.stop();
        log::debug!(
            "Level {} ended {:?} ({:?}), score {}/{}",
            self.level,
            state,
            reason,
            self.score(),
            self.board.total_cells()
        );
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(layout: Layout, moves: CellCount, bonus_interval: CellCount) -> PlayEngine {
        let config = LevelConfig::new(moves, bonus_interval, Prefill::None);
        PlayEngine::new(1, config, &layout, 42)
    }

    fn open_engine(start: Coord2) -> PlayEngine {
        engine(Layout::open(BOARD_SIZE, start).unwrap(), 64, 100)
    }

    /// 2x3 board where stepping right from the start leaves the horse stuck:
    ///
    /// ```text
    /// S . X
    /// X X .
    /// ```
    fn trap_engine() -> PlayEngine {
        let layout = Layout::new((2, 3), &[(1, 0), (1, 1), (0, 2)], (0, 0)).unwrap();
        engine(layout, 10, 100)
    }

    fn bonus_cells(engine: &PlayEngine) -> usize {
        engine
            .board()
            .open_cells()
            .filter(|&pos| engine.board().is_bonus(pos))
            .count()
    }

    #[test]
    fn placement_spends_the_first_move() {
        let engine = open_engine((3, 3));

        assert_eq!(engine.state(), EngineState::Active);
        assert_eq!(engine.cursor(), (3, 3));
        assert_eq!(engine.moves_left(), 63);
        assert_eq!(engine.moves_made(), 0);
        assert_eq!(engine.score(), 1);
        assert!(engine.board().is_visited((3, 3)));
    }

    #[test]
    fn only_orthogonal_single_steps_are_legal() {
        let engine = open_engine((3, 3));

        for target in [(2, 3), (4, 3), (3, 2), (3, 4)] {
            assert!(engine.can_move_to(target), "{:?}", target);
        }
        for target in [(3, 3), (4, 4), (2, 2), (3, 5), (5, 3), (8, 3)] {
            assert!(!engine.can_move_to(target), "{:?}", target);
        }
        assert_eq!(engine.option_count(), 4);
    }

    #[test]
    fn illegal_move_changes_nothing() {
        let mut engine = open_engine((0, 0));
        let before = engine.clone();

        assert_eq!(engine.move_to((1, 1)).unwrap(), MoveOutcome::NoChange);
        assert_eq!(engine.move_to((0, 0)).unwrap(), MoveOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn out_of_range_move_is_an_error() {
        let mut engine = open_engine((7, 7));
        assert_eq!(engine.move_to((7, 8)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn visited_cells_cannot_be_reentered() {
        let mut engine = open_engine((0, 0));

        assert_eq!(engine.move_to((0, 1)).unwrap(), MoveOutcome::Moved);
        assert!(!engine.can_move_to((0, 0)));
        assert_eq!(engine.move_to((0, 0)).unwrap(), MoveOutcome::NoChange);
        assert_eq!(engine.moves_made(), 1);
        assert_eq!(engine.moves_left(), 62);
    }

    #[test]
    fn stuck_without_charge_loses() {
        let mut engine = trap_engine();

        assert_eq!(engine.move_to((0, 1)).unwrap(), MoveOutcome::Lost);
        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.finish_reason(), Some(FinishReason::Stuck));
        assert_eq!(engine.move_to((1, 2)), Err(GameError::AlreadyEnded));
        assert_eq!(engine.option_count(), 0);
    }

    #[test]
    fn stuck_with_charge_arms_a_jump() {
        let mut engine = trap_engine();
        engine.bonus_charges = 1;

        assert_eq!(engine.move_to((0, 1)).unwrap(), MoveOutcome::Moved);
        assert!(engine.jump_armed());
        assert_eq!(engine.bonus_charges(), 0);
        assert!(engine.can_move_to((1, 2)));
        assert_eq!(engine.option_count(), 1);

        assert_eq!(engine.move_to((1, 2)).unwrap(), MoveOutcome::Won);
        assert_eq!(engine.finish_reason(), Some(FinishReason::BoardComplete));
        assert!(!engine.jump_armed());
    }

    #[test]
    fn bonus_on_the_exit_keeps_the_game_going() {
        let layout = Layout::new((2, 3), &[(1, 0), (1, 1)], (0, 0)).unwrap();
        let mut engine = engine(layout, 10, 100);
        engine.place_bonus((0, 2));

        assert_eq!(engine.move_to((0, 1)).unwrap(), MoveOutcome::Moved);
        assert_eq!(engine.state(), EngineState::Active);
        assert!(!engine.jump_armed());
        assert!(engine.can_move_to((0, 2)));

        assert_eq!(engine.move_to((0, 2)).unwrap(), MoveOutcome::Moved);
        assert_eq!(engine.bonus_charges(), 1);
        assert_eq!(engine.finish_reason(), None);
    }

    #[test]
    fn jump_lasts_a_single_move() {
        let mut engine = open_engine((0, 0));
        engine.jump_armed = true;

        assert!(engine.can_move_to((5, 5)));
        assert_eq!(engine.option_count(), 63);
        assert_eq!(engine.move_to((5, 5)).unwrap(), MoveOutcome::Moved);

        assert!(!engine.jump_armed());
        assert!(!engine.can_move_to((0, 1)));
        assert_eq!(engine.option_count(), 4);
    }

    #[test]
    fn start_with_no_way_out_is_lost() {
        let layout = Layout::new((2, 2), &[(0, 1), (1, 0)], (0, 0)).unwrap();
        let engine = engine(layout, 10, 100);

        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.finish_reason(), Some(FinishReason::Stuck));
    }

    #[test]
    fn spending_the_budget_wins() {
        let mut engine = engine(Layout::open(BOARD_SIZE, (0, 0)).unwrap(), 3, 100);

        assert_eq!(engine.move_to((0, 1)).unwrap(), MoveOutcome::Moved);
        assert_eq!(engine.move_to((0, 2)).unwrap(), MoveOutcome::Won);
        assert_eq!(engine.finish_reason(), Some(FinishReason::BudgetSpent));
        assert_eq!(engine.moves_left(), 0);
        assert!(!engine.board().is_complete());
    }

    #[test]
    fn bonus_spawns_every_interval() {
        let mut engine = engine(Layout::open(BOARD_SIZE, (0, 0)).unwrap(), 64, 2);

        engine.move_to((0, 1)).unwrap();
        assert_eq!(bonus_cells(&engine), 0);

        engine.move_to((0, 2)).unwrap();
        assert_eq!(bonus_cells(&engine), 1);

        engine.move_to((0, 3)).unwrap();
        engine.move_to((0, 4)).unwrap();
        let awarded = bonus_cells(&engine) + usize::from(engine.bonus_charges());
        assert_eq!(awarded, 2);
    }

    #[test]
    fn collecting_a_bonus_grants_one_charge() {
        let mut engine = engine(Layout::open((1, 3), (0, 0)).unwrap(), 10, 1);

        assert_eq!(engine.move_to((0, 1)).unwrap(), MoveOutcome::Moved);
        assert!(engine.board().is_bonus((0, 2)));
        assert_eq!(engine.bonus_charges(), 0);

        assert_eq!(engine.move_to((0, 2)).unwrap(), MoveOutcome::Won);
        assert_eq!(engine.bonus_charges(), 1);
        assert_eq!(engine.bonuses_collected(), 1);
        assert!(engine.board().is_complete());
    }

    #[test]
    fn no_bonus_without_empty_cells() {
        let mut engine = engine(Layout::open((1, 3), (0, 0)).unwrap(), 10, 1);
        engine.move_to((0, 1)).unwrap();

        let before = engine.board().clone();
        assert_eq!(engine.spawn_bonus(), None);
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn clock_runs_until_the_game_ends() {
        let mut engine = trap_engine();

        assert!(engine.tick());
        assert!(engine.tick());
        engine.move_to((0, 1)).unwrap();
        assert!(!engine.tick());
        assert_eq!(engine.elapsed_secs(), 2);
    }

    #[test]
    fn reports_score_on_loss_and_time_on_win() {
        let mut lost = trap_engine();
        assert_eq!(lost.report(), None);
        lost.move_to((0, 1)).unwrap();
        let report = lost.report().unwrap();
        assert_eq!(report.title, "Game Over");
        assert_eq!(report.action, "Start Again");
        assert_eq!(report.score, "Score: 5/6");

        let mut won = engine(Layout::open((1, 2), (0, 0)).unwrap(), 10, 100);
        for _ in 0..65 {
            won.tick();
        }
        won.move_to((0, 1)).unwrap();
        let report = won.report().unwrap();
        assert_eq!(report.title, "You Win!!");
        assert_eq!(report.action, "Next Level");
        assert_eq!(report.score, "01:05");
    }

    #[test]
    fn generated_games_are_reproducible() {
        let config = *LevelTable::default().get(3).unwrap();
        let a = PlayEngine::generate(3, config, 99);
        let b = PlayEngine::generate(3, config, 99);

        assert_eq!(a, b);
        assert_eq!(a.level(), 3);
        assert_eq!(a.moves_left(), 39);
    }
}
