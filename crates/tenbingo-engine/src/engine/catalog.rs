use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::{Person, PersonId, TenureInterval, TermEnd};

/// Data-entry sentinel some sources use for a term that has not ended.
const INCUMBENT_SENTINEL: &str = "2099-12-31";

/// One raw tenure record as read from the catalog JSON.
///
/// `start_date`/`end_date` describe the record's primary interval; `terms`
/// carries additional stints for sources that bundle a person's whole career
/// into one record. An absent, empty, `"incumbent"`, `"現職"`, or
/// `"2099-12-31"` end means the term is ongoing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub terms: Vec<RawTerm>,
}

/// An additional `{start, end}` stint on a bundled record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTerm {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

/// Why a raw record was skipped during catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MalformedRecord {
    #[display("name is empty")]
    EmptyName,
    #[display("unparsable date: {text:?}")]
    BadDate { text: String },
    #[display("interval ends before it starts ({end} < {start})")]
    Inverted { start: NaiveDate, end: NaiveDate },
    #[display("record has an end but no start")]
    MissingStart,
    #[display("record has no intervals")]
    NoIntervals,
}

/// A skipped input record: its position in the input, the name it carried,
/// and why it was rejected. Kept on the catalog so callers can report data
/// problems without failing the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDiagnostic {
    pub index: usize,
    pub name: String,
    pub reason: MalformedRecord,
}

fn parse_date(text: &str) -> Result<NaiveDate, MalformedRecord> {
    text.trim().parse().map_err(|_| MalformedRecord::BadDate {
        text: text.to_owned(),
    })
}

fn parse_end(text: Option<&str>) -> Result<TermEnd, MalformedRecord> {
    let Some(text) = text else {
        return Ok(TermEnd::Incumbent);
    };
    let text = text.trim();
    if text.is_empty()
        || text.eq_ignore_ascii_case("incumbent")
        || text == "現職"
        || text == INCUMBENT_SENTINEL
    {
        return Ok(TermEnd::Incumbent);
    }
    parse_date(text).map(TermEnd::Closed)
}

fn parse_interval(
    start: &str,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<TenureInterval, MalformedRecord> {
    let start = parse_date(start)?;
    let end = parse_end(end)?;
    let interval = TenureInterval::new(start, end);
    let effective_end = interval.effective_end(today);
    if start > effective_end {
        return Err(MalformedRecord::Inverted {
            start,
            end: effective_end,
        });
    }
    Ok(interval)
}

fn record_intervals(
    record: &RawRecord,
    today: NaiveDate,
) -> Result<Vec<TenureInterval>, MalformedRecord> {
    let mut intervals = Vec::new();
    match (&record.start_date, &record.end_date) {
        (Some(start), end) => intervals.push(parse_interval(start, end.as_deref(), today)?),
        (None, Some(_)) => return Err(MalformedRecord::MissingStart),
        (None, None) => {}
    }
    for term in &record.terms {
        intervals.push(parse_interval(&term.start, term.end.as_deref(), today)?);
    }
    if intervals.is_empty() {
        return Err(MalformedRecord::NoIntervals);
    }
    Ok(intervals)
}

/// Immutable, deduplicated catalog of office holders.
///
/// Records sharing a name merge into one [`Person`] whose intervals span all
/// of them; person ids follow first-seen input order. Malformed records are
/// skipped with a [`RecordDiagnostic`] instead of failing the load, so a
/// catalog always builds from whatever parses.
///
/// `today` is fixed at construction and stands in for the end of every
/// ongoing term; the catalog never reads the clock.
#[derive(Debug, Clone)]
pub struct Catalog {
    persons: Vec<Person>,
    diagnostics: Vec<RecordDiagnostic>,
    today: NaiveDate,
}

impl Catalog {
    /// Builds a catalog from raw records, evaluating ongoing terms against
    /// `today`.
    #[must_use]
    pub fn from_records(records: Vec<RawRecord>, today: NaiveDate) -> Self {
        let mut merged: Vec<(String, Vec<TenureInterval>)> = Vec::new();
        let mut index_by_name: HashMap<String, usize> = HashMap::new();
        let mut diagnostics = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let name = record.name.trim().to_owned();
            if name.is_empty() {
                skip(&mut diagnostics, index, name, MalformedRecord::EmptyName);
                continue;
            }
            match record_intervals(&record, today) {
                Ok(mut intervals) => match index_by_name.get(&name) {
                    Some(&person) => merged[person].1.append(&mut intervals),
                    None => {
                        index_by_name.insert(name.clone(), merged.len());
                        merged.push((name, intervals));
                    }
                },
                Err(reason) => skip(&mut diagnostics, index, name, reason),
            }
        }

        let persons = merged
            .into_iter()
            .enumerate()
            .map(|(index, (name, intervals))| {
                Person::new(PersonId::new(index), name, intervals, today)
            })
            .collect();
        Self {
            persons,
            diagnostics,
            today,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// All person ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = PersonId> {
        (0..self.persons.len()).map(PersonId::new)
    }

    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(id.index())
    }

    #[must_use]
    pub fn contains(&self, id: PersonId) -> bool {
        id.index() < self.persons.len()
    }

    #[must_use]
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Ids of every person whose tenure covers `date`, in id order.
    #[must_use]
    pub fn hits_on(&self, date: NaiveDate) -> Vec<PersonId> {
        self.persons
            .iter()
            .filter(|person| person.covers(date, self.today))
            .map(Person::id)
            .collect()
    }

    /// Records skipped during construction.
    #[must_use]
    pub fn diagnostics(&self) -> &[RecordDiagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }
}

fn skip(
    diagnostics: &mut Vec<RecordDiagnostic>,
    index: usize,
    name: String,
    reason: MalformedRecord,
) {
    tracing::warn!(index, name, %reason, "skipping malformed tenure record");
    diagnostics.push(RecordDiagnostic {
        index,
        name,
        reason,
    });
}
