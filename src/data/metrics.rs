use std::fmt;

use super::error::DataError;
use super::model::{FilteredGames, GameResult};

// ---------------------------------------------------------------------------
// OutcomeKind – the two counted outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutcomeKind {
    Wins,
    Losses,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 2] = [OutcomeKind::Wins, OutcomeKind::Losses];

    /// Legend label for the cumulative line.
    pub fn cumulative_label(self) -> &'static str {
        match self {
            OutcomeKind::Wins => "Cumulative wins",
            OutcomeKind::Losses => "Cumulative losses",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Wins => f.write_str("Wins"),
            OutcomeKind::Losses => f.write_str("Losses"),
        }
    }
}

/// Per-game (win, loss) increment. Other labels count for neither.
fn increments(result: &GameResult) -> (usize, usize) {
    match result {
        GameResult::Win => (1, 0),
        GameResult::Loss => (0, 1),
        GameResult::Other(_) => (0, 0),
    }
}

// ---------------------------------------------------------------------------
// CumulativeSeries – long-form running totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulativePoint {
    /// 1-based position of the game in the filtered sequence.
    pub game_index: usize,
    pub kind: OutcomeKind,
    pub running_total: usize,
}

/// Two points per game index, `Wins` first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CumulativeSeries {
    points: Vec<CumulativePoint>,
}

impl CumulativeSeries {
    pub fn points(&self) -> &[CumulativePoint] {
        &self.points
    }

    /// `(game_index, running_total)` pairs for one outcome.
    pub fn line(&self, kind: OutcomeKind) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.points
            .iter()
            .filter(move |p| p.kind == kind)
            .map(|p| (p.game_index, p.running_total))
    }

    /// Number of games covered by the series.
    pub fn game_count(&self) -> usize {
        self.points.last().map_or(0, |p| p.game_index)
    }

    /// Running total at the last game for `kind`.
    pub fn final_total(&self, kind: OutcomeKind) -> usize {
        self.line(kind).last().map_or(0, |(_, total)| total)
    }
}

/// Running win and loss counts, one pair of points per game.
pub fn derive_cumulative(games: &FilteredGames) -> Result<CumulativeSeries, DataError> {
    if games.is_empty() {
        return Err(DataError::empty(None));
    }

    let mut points = Vec::with_capacity(games.len() * 2);
    let (mut wins, mut losses) = (0usize, 0usize);
    for (i, game) in games.iter().enumerate() {
        let (w, l) = increments(&game.result);
        wins += w;
        losses += l;
        let game_index = i + 1;
        points.push(CumulativePoint {
            game_index,
            kind: OutcomeKind::Wins,
            running_total: wins,
        });
        points.push(CumulativePoint {
            game_index,
            kind: OutcomeKind::Losses,
            running_total: losses,
        });
    }
    Ok(CumulativeSeries { points })
}

// ---------------------------------------------------------------------------
// SummaryTotals – the pie chart table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryTotals {
    pub wins: usize,
    pub losses: usize,
}

impl SummaryTotals {
    /// The two rows, `Wins` first.
    pub fn entries(&self) -> [(OutcomeKind, usize); 2] {
        [
            (OutcomeKind::Wins, self.wins),
            (OutcomeKind::Losses, self.losses),
        ]
    }

    pub fn get(&self, kind: OutcomeKind) -> usize {
        match kind {
            OutcomeKind::Wins => self.wins,
            OutcomeKind::Losses => self.losses,
        }
    }

    /// Decided games (wins + losses).
    pub fn total(&self) -> usize {
        self.wins + self.losses
    }

    /// Fraction of decided games with this outcome; 0 when nothing is decided.
    pub fn share(&self, kind: OutcomeKind) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(kind) as f64 / total as f64,
        }
    }
}

pub fn derive_summary(games: &FilteredGames) -> Result<SummaryTotals, DataError> {
    if games.is_empty() {
        return Err(DataError::empty(None));
    }

    Ok(games
        .iter()
        .map(|g| increments(&g.result))
        .fold(SummaryTotals::default(), |acc, (w, l)| SummaryTotals {
            wins: acc.wins + w,
            losses: acc.losses + l,
        }))
}

// ---------------------------------------------------------------------------
// SeasonMetrics – both derived tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonMetrics {
    pub cumulative: CumulativeSeries,
    pub summary: SummaryTotals,
}

impl SeasonMetrics {
    pub fn derive(games: &FilteredGames) -> Result<Self, DataError> {
        Ok(Self {
            cumulative: derive_cumulative(games)?,
            summary: derive_summary(games)?,
        })
    }
}
