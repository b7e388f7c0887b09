use std::sync::Arc;

use chrono::NaiveDate;
use rand::{Rng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use crate::{
    PlaceError,
    core::{Board, LineScan, PersonId, Placement, SlotSet},
};

use super::{
    BingoResult, Catalog, DateSampler, DrawRecord, DrawSeed, FirstBingo, Player, Roulette, Tick,
};

/// Everything one committed draw changed across both boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersusDrawOutcome {
    date: NaiveDate,
    hit_names: Vec<String>,
    new_hits: [SlotSet; 2],
    scans: [LineScan; 2],
    first_bingo: FirstBingo,
}

impl VersusDrawOutcome {
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Names of all catalog persons covering the date.
    #[must_use]
    pub fn hit_names(&self) -> &[String] {
        &self.hit_names
    }

    /// Slots this draw newly hit on one player's board.
    #[must_use]
    pub const fn new_hits(&self, player: Player) -> SlotSet {
        self.new_hits[player.index()]
    }

    /// One player's line scan after applying the hits.
    #[must_use]
    pub const fn scan(&self, player: Player) -> &LineScan {
        &self.scans[player.index()]
    }

    /// Latch state after this draw.
    #[must_use]
    pub const fn first_bingo(&self) -> FirstBingo {
        self.first_bingo
    }
}

/// What one [`VersusSession::tick`] call did.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum VersusSpinStep {
    /// No spin is running.
    Idle,
    /// The roulette advanced; a new candidate date is displayed.
    Candidate(NaiveDate),
    /// The spin finished; the draw was applied to both boards.
    Drawn(VersusDrawOutcome),
}

/// Two-player controller: two boards drafting from a shared person pool,
/// one roulette and draw history, and the first-bingo latch.
///
/// Both players see the same committed dates; only their arrangements (and
/// therefore hits, lines, and scores) differ. Because the pool is shared, a
/// person sits on at most one of the two boards at a time.
#[derive(Debug, Clone)]
pub struct VersusSession {
    catalog: Arc<Catalog>,
    boards: [Board; 2],
    roulette: Roulette,
    sampler: DateSampler,
    rng: Pcg32,
    history: Vec<DrawRecord>,
    first_bingo: FirstBingo,
}

impl VersusSession {
    /// Creates a session with a random seed.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_seed(catalog, rand::rng().random())
    }

    /// Like [`Self::new`], but seeded for a reproducible game.
    #[must_use]
    pub fn with_seed(catalog: Arc<Catalog>, seed: DrawSeed) -> Self {
        let sampler = DateSampler::new(catalog.today());
        Self {
            catalog,
            boards: [Board::new(), Board::new()],
            roulette: Roulette::new(),
            sampler,
            rng: seed.rng(),
            history: Vec::new(),
            first_bingo: FirstBingo::Undecided,
        }
    }

    #[must_use]
    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player.index()]
    }

    fn check_known(&self, person: PersonId) -> Result<(), PlaceError> {
        if !self.catalog.contains(person) {
            return Err(PlaceError::UnknownPerson { id: person });
        }
        Ok(())
    }

    /// Puts a catalog person into a slot of one player's board. The shared
    /// pool applies: a person on the opposing board is rejected with
    /// [`PlaceError::PersonTaken`].
    pub fn place_for(
        &mut self,
        player: Player,
        person: PersonId,
        slot: usize,
    ) -> Result<Placement, PlaceError> {
        self.check_known(person)?;
        if self.board(player.opponent()).is_placed(person) {
            return Err(PlaceError::PersonTaken { id: person });
        }
        self.boards[player.index()].place(person, slot)
    }

    /// Takes a person off one player's board; removing someone not on that
    /// board is a successful no-op.
    pub fn remove_for(&mut self, player: Player, person: PersonId) -> Result<bool, PlaceError> {
        self.check_known(person)?;
        self.boards[player.index()].remove(person)
    }

    /// Rerolls one player's whole arrangement from the shared pool (the
    /// player's own occupants return to it first).
    pub fn random_placement_for(&mut self, player: Player) -> Result<(), PlaceError> {
        // Check the lock before consuming randomness.
        if self.board(player).is_locked() {
            return Err(PlaceError::BoardLocked);
        }
        let opponent = self.board(player.opponent());
        let mut ids: Vec<_> = self
            .catalog
            .ids()
            .filter(|&id| !opponent.is_placed(id))
            .collect();
        ids.shuffle(&mut self.rng);
        self.boards[player.index()].fill_in_order(ids)?;
        Ok(())
    }

    /// Freezes one player's arrangement.
    pub const fn lock_for(&mut self, player: Player) {
        self.boards[player.index()].lock();
    }

    /// Catalog ids on neither board, in id order.
    #[must_use]
    pub fn unplaced(&self) -> Vec<PersonId> {
        self.catalog
            .ids()
            .filter(|&id| self.boards.iter().all(|board| !board.is_placed(id)))
            .collect()
    }

    /// Arms a spin. Returns `false` unless both boards are locked and no
    /// spin is running.
    pub fn spin(&mut self) -> bool {
        self.boards.iter().all(Board::is_locked) && self.roulette.spin()
    }

    /// Advances an armed spin by one candidate date.
    pub fn tick(&mut self) -> VersusSpinStep {
        if !self.roulette.is_spinning() {
            return VersusSpinStep::Idle;
        }
        let date = self.sampler.sample(&mut self.rng);
        match self.roulette.tick(date) {
            Tick::Idle => VersusSpinStep::Idle,
            Tick::Candidate(date) => VersusSpinStep::Candidate(date),
            Tick::Committed(date) => VersusSpinStep::Drawn(self.apply_draw(date)),
        }
    }

    /// Ends a running spin immediately, committing the displayed candidate
    /// exactly as a budget-exhausted tick would. Stopping before the first
    /// tick cancels the spin; stopping an idle roulette does nothing.
    pub fn stop(&mut self) -> Option<VersusDrawOutcome> {
        let date = self.roulette.stop()?;
        Some(self.apply_draw(date))
    }

    fn apply_draw(&mut self, date: NaiveDate) -> VersusDrawOutcome {
        let hits = self.catalog.hits_on(date);
        let hit_names: Vec<_> = hits
            .iter()
            .filter_map(|&id| self.catalog.person(id))
            .map(|person| person.name().to_owned())
            .collect();
        let new_hits = [
            self.boards[0].mark_hits(&hits),
            self.boards[1].mark_hits(&hits),
        ];
        let scans = [self.boards[0].scan(), self.boards[1].scan()];
        self.first_bingo.observe(scans[0].count(), scans[1].count());
        self.history.push(DrawRecord {
            date,
            hit_names: hit_names.clone(),
        });
        VersusDrawOutcome {
            date,
            hit_names,
            new_hits,
            scans,
            first_bingo: self.first_bingo,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn history(&self) -> &[DrawRecord] {
        &self.history
    }

    /// The currently displayed date, if any.
    #[must_use]
    pub const fn candidate(&self) -> Option<NaiveDate> {
        self.roulette.candidate()
    }

    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        self.roulette.is_spinning()
    }

    /// Current latch state.
    #[must_use]
    pub const fn first_bingo(&self) -> FirstBingo {
        self.first_bingo
    }

    /// One player's full score composition, recomputed from the current
    /// board and latch state.
    #[must_use]
    pub fn result_for(&self, player: Player) -> BingoResult {
        BingoResult::compute(
            &self.catalog,
            self.board(player),
            self.first_bingo.bonus_for(player),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use crate::engine::{FIRST_BINGO_BONUS, RawRecord, draw_epoch};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Sixty persons tiling the whole draw range in disjoint 850-day terms.
    fn sample_catalog() -> Arc<Catalog> {
        let records = (0..60_i64)
            .map(|index| {
                let start = draw_epoch() + TimeDelta::days(index * 850);
                let end = start + TimeDelta::days(849);
                RawRecord {
                    name: format!("p{index}"),
                    start_date: Some(start.to_string()),
                    end_date: Some(end.to_string()),
                    terms: Vec::new(),
                }
            })
            .collect();
        Arc::new(Catalog::from_records(records, date(2026, 1, 1)))
    }

    fn seed(value: u8) -> DrawSeed {
        format!("{value:032x}").parse().unwrap()
    }

    fn ready_session(seed_value: u8) -> VersusSession {
        let mut session = VersusSession::with_seed(sample_catalog(), seed(seed_value));
        for player in Player::BOTH {
            session.random_placement_for(player).unwrap();
            session.lock_for(player);
        }
        session
    }

    fn run_spin(session: &mut VersusSession) -> VersusDrawOutcome {
        assert!(session.spin());
        loop {
            match session.tick() {
                VersusSpinStep::Candidate(_) => {}
                VersusSpinStep::Drawn(outcome) => return outcome,
                VersusSpinStep::Idle => panic!("spin went idle before committing"),
            }
        }
    }

    #[test]
    fn test_shared_pool_rejects_taken_person() {
        let mut session = VersusSession::with_seed(sample_catalog(), seed(1));
        let person = PersonId::new(0);

        session.place_for(Player::A, person, 0).unwrap();
        assert_eq!(
            session.place_for(Player::B, person, 0),
            Err(PlaceError::PersonTaken { id: person })
        );

        // Moving within the own board is not "taking".
        assert_eq!(
            session.place_for(Player::A, person, 5),
            Ok(Placement::Moved { from: 0 })
        );

        // Once released, the opponent may draft the person.
        assert_eq!(session.remove_for(Player::A, person), Ok(true));
        assert!(session.place_for(Player::B, person, 3).is_ok());
        assert_eq!(session.remove_for(Player::A, person), Ok(false));
    }

    #[test]
    fn test_random_placements_never_overlap() {
        let mut session = VersusSession::with_seed(sample_catalog(), seed(2));
        session.random_placement_for(Player::A).unwrap();
        session.random_placement_for(Player::B).unwrap();

        assert!(session.board(Player::A).is_full());
        assert!(session.board(Player::B).is_full());

        let placed_a: Vec<_> = session.board(Player::A).occupants().collect();
        for person in session.board(Player::B).occupants() {
            assert!(!placed_a.contains(&person));
        }
        assert_eq!(session.unplaced().len(), session.catalog().len() - 50);

        // Rerolling one side keeps the boards disjoint.
        session.random_placement_for(Player::B).unwrap();
        let placed_a_after: Vec<_> = session.board(Player::A).occupants().collect();
        assert_eq!(placed_a, placed_a_after);
        for person in session.board(Player::B).occupants() {
            assert!(!placed_a.contains(&person));
        }
    }

    #[test]
    fn test_spin_requires_both_boards_locked() {
        let mut session = VersusSession::with_seed(sample_catalog(), seed(3));
        session.random_placement_for(Player::A).unwrap();
        session.random_placement_for(Player::B).unwrap();

        session.lock_for(Player::A);
        assert!(!session.spin());

        session.lock_for(Player::B);
        assert!(session.spin());
        assert!(!session.spin());
    }

    #[test]
    fn test_stop_commits_the_displayed_candidate() {
        let mut session = ready_session(4);
        assert!(session.spin());

        let mut last = None;
        for _ in 0..3 {
            match session.tick() {
                VersusSpinStep::Candidate(shown) => last = Some(shown),
                step => panic!("unexpected step {step:?}"),
            }
        }

        let outcome = session.stop().expect("a candidate was displayed");
        assert_eq!(Some(outcome.date()), last);
        assert!(!session.is_spinning());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].date, outcome.date());
    }

    #[test]
    fn test_stop_before_first_tick_cancels() {
        let mut session = ready_session(5);
        assert!(session.spin());
        assert!(session.stop().is_none());
        assert!(!session.is_spinning());
        assert!(session.history().is_empty());

        // Stopping while idle is also nothing.
        assert!(session.stop().is_none());
    }

    #[test]
    fn test_draws_apply_to_both_boards() {
        let mut session = ready_session(6);
        let outcome = run_spin(&mut session);

        for player in Player::BOTH {
            // A newly hit slot implies the occupant covers the date.
            for slot in outcome.new_hits(player).iter() {
                let person = session
                    .board(player)
                    .slot(slot)
                    .occupant()
                    .expect("hit slots are occupied");
                let person = session.catalog().person(person).unwrap();
                assert!(person.covers(outcome.date(), session.catalog().today()));
            }
            assert_eq!(
                session.board(player).scan().count(),
                outcome.scan(player).count()
            );
        }
        assert!(outcome.date() >= draw_epoch());
        assert!(outcome.date() <= session.catalog().today());
    }

    #[test]
    fn test_first_bingo_latch_decides_and_stays() {
        let mut session = ready_session(7);

        let mut decided = None;
        for _ in 0..2000 {
            let outcome = run_spin(&mut session);
            if !outcome.first_bingo().is_undecided() {
                decided = Some(outcome);
                break;
            }
        }
        let outcome = decided.expect("some board should bingo within 2000 draws");

        match outcome.first_bingo() {
            FirstBingo::Winner(winner) => {
                assert!(outcome.scan(winner).is_bingo());
                assert!(!outcome.scan(winner.opponent()).is_bingo());
                let result = session.result_for(winner);
                assert_eq!(result.bonus, FIRST_BINGO_BONUS);
                assert_eq!(
                    result.total,
                    result.base_score * result.multiplier + result.bonus
                );
                assert_eq!(session.result_for(winner.opponent()).bonus, 0);
            }
            FirstBingo::Tied => {
                assert!(outcome.scan(Player::A).is_bingo());
                assert!(outcome.scan(Player::B).is_bingo());
                assert_eq!(session.result_for(Player::A).bonus, 0);
                assert_eq!(session.result_for(Player::B).bonus, 0);
            }
            FirstBingo::Undecided => unreachable!(),
        }

        // The latch is terminal: later draws never rewrite it.
        let latched = session.first_bingo();
        for _ in 0..50 {
            run_spin(&mut session);
        }
        assert_eq!(session.first_bingo(), latched);
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let mut session1 = ready_session(8);
        let mut session2 = ready_session(8);

        for _ in 0..5 {
            let outcome1 = run_spin(&mut session1);
            let outcome2 = run_spin(&mut session2);
            assert_eq!(outcome1, outcome2);
        }
        assert_eq!(session1.history(), session2.history());
        assert_eq!(session1.first_bingo(), session2.first_bingo());
        for player in Player::BOTH {
            assert_eq!(session1.result_for(player), session2.result_for(player));
        }
    }
}
