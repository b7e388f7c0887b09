use chrono::{NaiveDate, TimeDelta};
use rand::Rng;

/// Number of candidate dates a full spin animates through. The last one is
/// the committed draw; no fresh date is sampled after the animation.
pub const TICKS_PER_SPIN: u32 = 31;

/// First day of the modeled office; draws never predate it.
#[must_use]
pub fn draw_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1885, 12, 22).expect("the draw epoch is a valid calendar date")
}

/// Uniform whole-day date sampling over `[epoch, today]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSampler {
    epoch: NaiveDate,
    today: NaiveDate,
}

impl DateSampler {
    /// Samples over `[draw_epoch(), today]`. A `today` before the epoch
    /// collapses the range to the epoch itself.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let epoch = draw_epoch();
        Self {
            epoch,
            today: today.max(epoch),
        }
    }

    #[must_use]
    pub const fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Draws one date, both bounds inclusive.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        let span = (self.today - self.epoch).num_days();
        let offset = rng.random_range(0..=span);
        self.epoch + TimeDelta::days(offset)
    }
}

/// One advance of an armed roulette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Tick {
    /// The roulette was not spinning; nothing happened.
    Idle,
    /// The candidate changed; the spin continues.
    Candidate(NaiveDate),
    /// The tick budget ran out; the candidate became the committed draw.
    Committed(NaiveDate),
}

/// Tick-budgeted roulette state machine.
///
/// The roulette owns no RNG and no timer: the driver samples a date per tick
/// (so all randomness stays with the session RNG) and decides the cadence.
/// A spin arms a budget of [`TICKS_PER_SPIN`] ticks; each tick displays the
/// sampled candidate and the final one commits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Roulette {
    remaining: u32,
    candidate: Option<NaiveDate>,
}

impl Roulette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        self.remaining > 0
    }

    /// The currently displayed date: the latest candidate while spinning,
    /// or the last committed draw after one.
    #[must_use]
    pub const fn candidate(&self) -> Option<NaiveDate> {
        self.candidate
    }

    /// Arms a new spin. Returns `false` without touching anything if a spin
    /// is already running.
    pub const fn spin(&mut self) -> bool {
        if self.is_spinning() {
            return false;
        }
        self.remaining = TICKS_PER_SPIN;
        self.candidate = None;
        true
    }

    /// Advances the spin by one step, displaying `date` as the candidate.
    ///
    /// On the final budgeted tick the displayed date is returned as
    /// [`Tick::Committed`]; in between, as [`Tick::Candidate`]. Ticking an
    /// idle roulette does nothing.
    pub const fn tick(&mut self, date: NaiveDate) -> Tick {
        if !self.is_spinning() {
            return Tick::Idle;
        }
        self.candidate = Some(date);
        self.remaining -= 1;
        if self.remaining == 0 {
            Tick::Committed(date)
        } else {
            Tick::Candidate(date)
        }
    }

    /// Ends the spin immediately, committing the displayed candidate.
    ///
    /// Stopping before any tick has displayed a candidate cancels the spin
    /// with no committed draw. Stopping an idle roulette returns `None`.
    pub const fn stop(&mut self) -> Option<NaiveDate> {
        if !self.is_spinning() {
            return None;
        }
        self.remaining = 0;
        self.candidate
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_spin_commits_the_last_candidate() {
        let mut roulette = Roulette::new();
        assert!(roulette.spin());

        let mut seen = 0;
        let mut committed = None;
        for day in 1.. {
            let candidate = date(2000, 1, 1) + TimeDelta::days(day);
            seen += 1;
            match roulette.tick(candidate) {
                Tick::Candidate(shown) => assert_eq!(shown, candidate),
                Tick::Committed(drawn) => {
                    committed = Some(drawn);
                    assert_eq!(drawn, candidate);
                    break;
                }
                Tick::Idle => unreachable!("roulette went idle mid-spin"),
            }
        }

        assert_eq!(seen, TICKS_PER_SPIN);
        assert_eq!(committed, roulette.candidate());
        assert!(!roulette.is_spinning());
    }

    #[test]
    fn test_spin_is_a_noop_while_spinning() {
        let mut roulette = Roulette::new();
        assert!(roulette.spin());
        roulette.tick(date(2000, 1, 1));

        assert!(!roulette.spin());
        // The running spin kept its state.
        assert_eq!(roulette.candidate(), Some(date(2000, 1, 1)));
        let remaining_after_one = TICKS_PER_SPIN - 1;
        let mut ticks = 0;
        while roulette.is_spinning() {
            roulette.tick(date(2000, 1, 2));
            ticks += 1;
        }
        assert_eq!(ticks, remaining_after_one);
    }

    #[test]
    fn test_tick_while_idle_is_ignored() {
        let mut roulette = Roulette::new();
        assert_eq!(roulette.tick(date(2000, 1, 1)), Tick::Idle);
        assert_eq!(roulette.candidate(), None);
    }

    #[test]
    fn test_stop_commits_the_displayed_candidate() {
        let mut roulette = Roulette::new();
        roulette.spin();
        roulette.tick(date(2001, 2, 3));
        roulette.tick(date(2004, 5, 6));

        assert_eq!(roulette.stop(), Some(date(2004, 5, 6)));
        assert!(!roulette.is_spinning());
        assert_eq!(roulette.candidate(), Some(date(2004, 5, 6)));
    }

    #[test]
    fn test_stop_before_first_tick_cancels() {
        let mut roulette = Roulette::new();
        roulette.spin();
        assert_eq!(roulette.stop(), None);
        assert!(!roulette.is_spinning());
        assert_eq!(roulette.candidate(), None);

        // A fresh spin can be armed afterwards.
        assert!(roulette.spin());
    }

    #[test]
    fn test_stop_while_idle_returns_none() {
        let mut roulette = Roulette::new();
        assert_eq!(roulette.stop(), None);
    }

    #[test]
    fn test_spin_after_commit_clears_the_candidate() {
        let mut roulette = Roulette::new();
        roulette.spin();
        while roulette.is_spinning() {
            roulette.tick(date(2010, 10, 10));
        }
        assert!(roulette.candidate().is_some());

        assert!(roulette.spin());
        assert_eq!(roulette.candidate(), None);
    }

    #[test]
    fn test_sampled_dates_stay_in_range() {
        let sampler = DateSampler::new(date(2026, 8, 22));
        let mut rng = Pcg32::from_seed([7; 16]);
        for _ in 0..1000 {
            let drawn = sampler.sample(&mut rng);
            assert!(drawn >= sampler.epoch());
            assert!(drawn <= sampler.today());
        }
    }

    #[test]
    fn test_sampling_is_deterministic_per_seed() {
        let sampler = DateSampler::new(date(2026, 8, 22));
        let mut rng1 = Pcg32::from_seed([42; 16]);
        let mut rng2 = Pcg32::from_seed([42; 16]);
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut rng1), sampler.sample(&mut rng2));
        }
    }

    #[test]
    fn test_today_before_epoch_collapses_to_epoch() {
        let sampler = DateSampler::new(date(1800, 1, 1));
        let mut rng = Pcg32::from_seed([0; 16]);
        assert_eq!(sampler.sample(&mut rng), draw_epoch());
        assert_eq!(sampler.today(), draw_epoch());
    }
}
