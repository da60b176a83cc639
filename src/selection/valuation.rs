use crate::registry::ItemRef;
use crate::types::identifiers::Timestamp;

pub trait Weighted {
    fn points(&self) -> u32;
    fn is_news(&self) -> bool;

    /// News items count for half, rounded down.
    fn contribution(&self) -> u64 {
        let points = u64::from(self.points());
        if self.is_news() {
            points / 2
        } else {
            points
        }
    }
}

impl<W: Weighted + ?Sized> Weighted for &W {
    fn points(&self) -> u32 {
        (**self).points()
    }

    fn is_news(&self) -> bool {
        (**self).is_news()
    }
}

/// Bare `(points, is_news)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub points: u32,
    pub is_news: bool,
}

impl Weighted for Record {
    fn points(&self) -> u32 {
        self.points
    }

    fn is_news(&self) -> bool {
        self.is_news
    }
}

/// An unused item annotated with its category's weighting and its
/// position in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub at: ItemRef,
    pub reference: &'a str,
    pub added_at: Timestamp,
    pub points: u32,
    pub is_news: bool,
}

impl Weighted for Candidate<'_> {
    fn points(&self) -> u32 {
        self.points
    }

    fn is_news(&self) -> bool {
        self.is_news
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Valuation {
    pub total: u64,
    pub news: u64,
    pub regular: u64,
}

impl Valuation {
    pub fn add<W: Weighted>(&mut self, record: W) {
        let contribution = record.contribution();
        self.total += contribution;
        if record.is_news() {
            self.news += contribution;
        } else {
            self.regular += contribution;
        }
    }
}

pub fn value_of<W, I>(records: I) -> Valuation
where
    W: Weighted,
    I: IntoIterator<Item = W>,
{
    let mut valuation = Valuation::default();
    for record in records {
        valuation.add(record);
    }
    valuation
}
