use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// GameResult – the outcome label of one game
// ---------------------------------------------------------------------------

/// Outcome of a single game from the perspective of the row's franchise.
///
/// The source encodes results as single characters (`W` / `L`). Any other
/// non-empty label is kept verbatim so it still occupies a game slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameResult {
    Win,
    Loss,
    Other(String),
}

impl GameResult {
    /// Parse the raw label. Returns `None` for an empty label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "" => None,
            "W" => Some(GameResult::Win),
            "L" => Some(GameResult::Loss),
            other => Some(GameResult::Other(other.to_string())),
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win => write!(f, "W"),
            GameResult::Loss => write!(f, "L"),
            GameResult::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// GameRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single game as seen by one franchise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Season identifier (`year_id`).
    pub season: i32,
    /// Franchise identifier (`fran_id`).
    pub team: String,
    /// Calendar date of the game (`date_game`).
    pub date: NaiveDate,
    /// `is_playoffs` column, 0/1 in the source.
    pub is_playoffs: bool,
    /// `game_result` column.
    pub result: GameResult,
}

// ---------------------------------------------------------------------------
// GameType / FilterSelection
// ---------------------------------------------------------------------------

/// Which part of a season to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    RegularSeason,
    Playoffs,
    #[default]
    Both,
}

impl GameType {
    pub const ALL: [GameType; 3] = [GameType::RegularSeason, GameType::Playoffs, GameType::Both];

    /// Whether a game with the given playoff flag belongs to this game type.
    pub fn admits(self, is_playoffs: bool) -> bool {
        match self {
            GameType::RegularSeason => !is_playoffs,
            GameType::Playoffs => is_playoffs,
            GameType::Both => true,
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameType::RegularSeason => "Regular Season",
            GameType::Playoffs => "Playoffs",
            GameType::Both => "Both",
        };
        f.write_str(label)
    }
}

/// The user's (season, team, game type) choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub season: i32,
    pub team: String,
    pub game_type: GameType,
}

impl FilterSelection {
    pub fn new(season: i32, team: impl Into<String>, game_type: GameType) -> Self {
        Self {
            season,
            team: team.into(),
            game_type,
        }
    }

    /// Latest season and the first team (alphabetically) that played in it.
    /// `None` for an empty dataset.
    pub fn initial(dataset: &Dataset, game_type: GameType) -> Option<Self> {
        let season = *dataset.seasons().first()?;
        let team = dataset.teams_in(season).into_iter().next()?;
        Some(Self::new(season, team, game_type))
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.team, self.season, self.game_type)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with a pre-computed season → teams index.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All games (rows), in file order.
    pub games: Vec<GameRecord>,
    /// For each season the sorted set of franchises that played in it.
    teams_by_season: BTreeMap<i32, BTreeSet<String>>,
}

impl Dataset {
    /// Build the season index from the loaded games.
    pub fn from_games(games: Vec<GameRecord>) -> Self {
        let mut teams_by_season: BTreeMap<i32, BTreeSet<String>> = BTreeMap::new();
        for game in &games {
            teams_by_season
                .entry(game.season)
                .or_default()
                .insert(game.team.clone());
        }
        Dataset {
            games,
            teams_by_season,
        }
    }

    /// Distinct seasons, most recent first.
    pub fn seasons(&self) -> Vec<i32> {
        self.teams_by_season.keys().rev().copied().collect()
    }

    /// Distinct franchises that played in `season`, ascending.
    pub fn teams_in(&self, season: i32) -> Vec<String> {
        self.teams_by_season
            .get(&season)
            .map(|teams| teams.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `team` has at least one game in `season`.
    pub fn has_team(&self, season: i32, team: &str) -> bool {
        self.teams_by_season
            .get(&season)
            .is_some_and(|teams| teams.contains(team))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilteredGames – one request cycle's matching rows
// ---------------------------------------------------------------------------

/// Games matching a [`FilterSelection`], ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredGames {
    games: Vec<GameRecord>,
}

impl FilteredGames {
    /// Wrap rows that are already in date order.
    pub(crate) fn from_sorted(games: Vec<GameRecord>) -> Self {
        Self { games }
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.games.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn game(season: i32, team: &str, date: &str, playoffs: bool, result: &str) -> GameRecord {
        GameRecord {
            season,
            team: team.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            is_playoffs: playoffs,
            result: GameResult::from_label(result).unwrap(),
        }
    }

    #[test]
    fn result_labels() {
        assert_eq!(GameResult::from_label("W"), Some(GameResult::Win));
        assert_eq!(GameResult::from_label(" L "), Some(GameResult::Loss));
        assert_eq!(
            GameResult::from_label("T"),
            Some(GameResult::Other("T".to_string()))
        );
        assert_eq!(GameResult::from_label(""), None);
    }

    #[test]
    fn seasons_descending_and_teams_per_season() {
        let ds = Dataset::from_games(vec![
            game(2014, "Lakers", "2013-11-01", false, "W"),
            game(2015, "Celtics", "2014-11-01", false, "L"),
            game(2015, "Bulls", "2014-11-02", false, "W"),
            game(2015, "Celtics", "2014-11-03", false, "W"),
        ]);
        assert_eq!(ds.seasons(), vec![2015, 2014]);
        assert_eq!(ds.teams_in(2015), vec!["Bulls", "Celtics"]);
        assert_eq!(ds.teams_in(2014), vec!["Lakers"]);
        assert!(ds.teams_in(1999).is_empty());
        assert!(ds.has_team(2015, "Bulls"));
        assert!(!ds.has_team(2014, "Bulls"));
    }

    #[test]
    fn initial_selection_picks_latest_season() {
        let ds = Dataset::from_games(vec![
            game(2014, "Lakers", "2013-11-01", false, "W"),
            game(2015, "Knicks", "2014-11-01", false, "L"),
            game(2015, "Celtics", "2014-11-02", false, "W"),
        ]);
        let sel = FilterSelection::initial(&ds, GameType::Both).unwrap();
        assert_eq!(sel, FilterSelection::new(2015, "Celtics", GameType::Both));
        assert!(FilterSelection::initial(&Dataset::default(), GameType::Both).is_none());
    }

    #[test]
    fn game_type_admits() {
        assert!(GameType::RegularSeason.admits(false));
        assert!(!GameType::RegularSeason.admits(true));
        assert!(GameType::Playoffs.admits(true));
        assert!(!GameType::Playoffs.admits(false));
        assert!(GameType::Both.admits(true) && GameType::Both.admits(false));
        assert_eq!(GameType::default(), GameType::Both);
    }
}
