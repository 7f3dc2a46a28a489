use std::path::PathBuf;
use std::sync::Arc;

use crate::data::error::DataError;
use crate::data::filter::filter;
use crate::data::metrics::SeasonMetrics;
use crate::data::model::{Dataset, FilterSelection, FilteredGames, GameType};
use crate::data::source::{CachedFileSource, DatasetSource};

// ---------------------------------------------------------------------------
// What the central panel shows for the current selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionView {
    /// Nothing selected yet (no dataset).
    Idle,
    /// The selection matched no games; metrics were not derived.
    NoGames,
    /// Both derived tables, ready for charting.
    Ready(SeasonMetrics),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the dataset comes from; owns the cache.
    source: Box<dyn DatasetSource>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Current (season, team, game type).
    pub selection: Option<FilterSelection>,

    /// Game type used for a freshly loaded dataset.
    pub default_game_type: GameType,

    /// Games passing the current selection (cached).
    pub games: FilteredGames,

    /// Derived tables for `games`, or the no-data notice.
    pub view: SelectionView,

    /// Blocking load error shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: Box<dyn DatasetSource>, default_game_type: GameType) -> Self {
        Self {
            source,
            dataset: None,
            selection: None,
            default_game_type,
            games: FilteredGames::default(),
            view: SelectionView::Idle,
            status_message: None,
        }
    }

    pub fn source_name(&self) -> String {
        self.source.describe()
    }

    /// Fetch the dataset from the source (cached after the first call).
    pub fn load(&mut self) {
        match self.source.load() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => self.fail(e),
        }
    }

    /// Drop the cached dataset and read the source again.
    pub fn reload(&mut self) {
        self.source.refresh();
        self.load();
    }

    /// Switch to a different file.
    pub fn open_path(&mut self, path: PathBuf) {
        log::info!("Opening {}", path.display());
        self.source = Box::new(CachedFileSource::new(path));
        self.load();
    }

    fn fail(&mut self, err: DataError) {
        self.status_message = Some(format!("Error: {err}"));
        self.dataset = None;
        self.selection = None;
        self.games = FilteredGames::default();
        self.view = SelectionView::Idle;
    }

    /// Ingest a newly loaded dataset and select its latest season.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        // Keep the user's choice across a reload when it is still valid.
        let kept = self
            .selection
            .take()
            .filter(|sel| dataset.has_team(sel.season, &sel.team));
        self.selection = kept.or_else(|| FilterSelection::initial(&dataset, self.default_game_type));
        self.status_message = if dataset.is_empty() {
            log::warn!("{} contains no games", self.source.describe());
            Some(format!("{} contains no games.", self.source.describe()))
        } else {
            None
        };
        self.dataset = Some(dataset);
        self.recompute();
    }

    /// Change season; keeps the team if it played that season, otherwise
    /// falls back to the season's first team.
    pub fn select_season(&mut self, season: i32) {
        let (Some(ds), Some(sel)) = (&self.dataset, &mut self.selection) else {
            return;
        };
        if sel.season == season {
            return;
        }
        sel.season = season;
        if !ds.has_team(season, &sel.team) {
            match ds.teams_in(season).into_iter().next() {
                Some(team) => sel.team = team,
                None => log::warn!("Season {season} has no teams"),
            }
        }
        self.recompute();
    }

    pub fn select_team(&mut self, team: &str) {
        let Some(sel) = &mut self.selection else {
            return;
        };
        if sel.team != team {
            sel.team = team.to_string();
            self.recompute();
        }
    }

    pub fn select_game_type(&mut self, game_type: GameType) {
        let Some(sel) = &mut self.selection else {
            return;
        };
        if sel.game_type != game_type {
            sel.game_type = game_type;
            self.recompute();
        }
    }

    /// Re-run filter + metrics for the current selection.
    ///
    /// Metrics are only derived for a non-empty selection.
    pub fn recompute(&mut self) {
        let (Some(ds), Some(sel)) = (&self.dataset, &self.selection) else {
            self.games = FilteredGames::default();
            self.view = SelectionView::Idle;
            return;
        };

        self.games = filter(ds, sel);
        self.view = if self.games.is_empty() {
            log::info!("{}", DataError::empty(Some(sel)));
            SelectionView::NoGames
        } else {
            match SeasonMetrics::derive(&self.games) {
                Ok(metrics) => SelectionView::Ready(metrics),
                Err(e) => {
                    log::warn!("{e}");
                    SelectionView::NoGames
                }
            }
        };
    }

    /// Seasons for the season selector, most recent first.
    pub fn season_options(&self) -> Vec<i32> {
        self.dataset
            .as_ref()
            .map(|ds| ds.seasons())
            .unwrap_or_default()
    }

    /// Teams for the team selector (those of the selected season).
    pub fn team_options(&self) -> Vec<String> {
        match (&self.dataset, &self.selection) {
            (Some(ds), Some(sel)) => ds.teams_in(sel.season),
            _ => Vec::new(),
        }
    }
}
