use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Point values keyed on total days in office.
///
/// Shorter tenures are rarer hits and therefore worth more. Pairs are
/// `(exclusive upper bound in days, points)`, checked in order:
///
/// - under 100 days: 500 points
/// - under 300 days: 300 points
/// - under 1000 days: 100 points
/// - 1000 days and over: 50 points
const POINT_TIERS: [(i64, u32); 3] = [(100, 500), (300, 300), (1000, 100)];

/// Points for tenures past the last tier bound.
const POINT_FLOOR: u32 = 50;

/// Looks up the point value for a total tenure length in days.
///
/// # Example
///
/// ```
/// use tenbingo_engine::point_value;
///
/// assert_eq!(point_value(45), 500);
/// assert_eq!(point_value(5000), 50);
/// ```
#[must_use]
pub fn point_value(total_days: i64) -> u32 {
    for (bound, points) in POINT_TIERS {
        if total_days < bound {
            return points;
        }
    }
    POINT_FLOOR
}

/// Stable identifier of a person within one catalog.
///
/// Ids are assigned in first-seen record order, zero-based. They are plain
/// indices and only meaningful against the catalog that issued them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(usize);

impl PersonId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// End of a single tenure interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TermEnd {
    /// The term ended on the given day (inclusive).
    Closed(NaiveDate),
    /// The term is ongoing as of evaluation time.
    Incumbent,
}

/// One date-bounded stretch in office, inclusive on both ends.
///
/// Comparisons are day-granular by construction: both bounds and the probed
/// date are [`NaiveDate`]s, so the source data's time-of-day truncation has
/// already happened by the time an interval exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenureInterval {
    start: NaiveDate,
    end: TermEnd,
}

impl TenureInterval {
    #[must_use]
    pub const fn new(start: NaiveDate, end: TermEnd) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> TermEnd {
        self.end
    }

    /// The last day the interval covers, with [`TermEnd::Incumbent`] ending
    /// at `today`.
    #[must_use]
    pub fn effective_end(&self, today: NaiveDate) -> NaiveDate {
        match self.end {
            TermEnd::Closed(end) => end,
            TermEnd::Incumbent => today,
        }
    }

    /// Whether `date` falls within the interval, inclusive on both ends.
    #[must_use]
    pub fn covers(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.start <= date && date <= self.effective_end(today)
    }

    /// Length of the interval in whole days (`end - start`).
    #[must_use]
    pub fn days(&self, today: NaiveDate) -> i64 {
        (self.effective_end(today) - self.start).num_days()
    }
}

/// A deduplicated office holder with all tenure intervals merged.
///
/// Built once by the catalog and immutable afterwards. `total_days` and
/// `point_value` are fixed at build time against the catalog's `today`.
#[derive(Debug, Clone)]
pub struct Person {
    id: PersonId,
    name: String,
    intervals: Vec<TenureInterval>,
    total_days: i64,
    point_value: u32,
}

impl Person {
    /// Builds a person from merged intervals, deriving the day total and
    /// point value against `today`.
    pub(crate) fn new(
        id: PersonId,
        name: String,
        intervals: Vec<TenureInterval>,
        today: NaiveDate,
    ) -> Self {
        let total_days = intervals.iter().map(|interval| interval.days(today)).sum();
        Self {
            id,
            name,
            intervals,
            total_days,
            point_value: point_value(total_days),
        }
    }

    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn intervals(&self) -> &[TenureInterval] {
        &self.intervals
    }

    /// Summed length of all intervals in whole days.
    #[must_use]
    pub const fn total_days(&self) -> i64 {
        self.total_days
    }

    #[must_use]
    pub const fn point_value(&self) -> u32 {
        self.point_value
    }

    /// Whether at least one interval covers `date`.
    #[must_use]
    pub fn covers(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.intervals
            .iter()
            .any(|interval| interval.covers(date, today))
    }
}
