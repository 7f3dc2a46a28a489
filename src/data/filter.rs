use super::model::{Dataset, FilterSelection, FilteredGames, GameRecord};

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Whether a single game passes all three predicates of `selection`.
pub fn matches(game: &GameRecord, selection: &FilterSelection) -> bool {
    game.season == selection.season
        && game.team == selection.team
        && selection.game_type.admits(game.is_playoffs)
}

/// Return the games that pass `selection`, ascending by date.
///
/// The sort is stable, so games sharing a date keep their file order.
/// An empty result is valid; callers must check it before deriving metrics.
pub fn filter(dataset: &Dataset, selection: &FilterSelection) -> FilteredGames {
    let mut games: Vec<GameRecord> = dataset
        .games
        .iter()
        .filter(|g| matches(g, selection))
        .cloned()
        .collect();
    games.sort_by_key(|g| g.date);

    log::debug!("{selection}: {} of {} games", games.len(), dataset.len());
    FilteredGames::from_sorted(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::GameType;
    use crate::data::model::tests::game;

    fn dataset() -> Dataset {
        Dataset::from_games(vec![
            game(2015, "Celtics", "2015-04-20", true, "L"),
            game(2015, "Celtics", "2014-10-29", false, "W"),
            game(2015, "Knicks", "2014-10-29", false, "L"),
            game(2015, "Celtics", "2014-11-01", false, "L"),
            game(2014, "Celtics", "2013-10-30", false, "W"),
            game(2015, "Celtics", "2015-04-19", true, "L"),
            game(2015, "Heat", "2015-01-10", true, "W"),
        ])
    }

    fn is_sorted(f: &FilteredGames) -> bool {
        f.games().windows(2).all(|w| w[0].date <= w[1].date)
    }

    #[test]
    fn filters_and_sorts() {
        let ds = dataset();
        for game_type in GameType::ALL {
            let sel = FilterSelection::new(2015, "Celtics", game_type);
            let out = filter(&ds, &sel);
            assert!(is_sorted(&out));
            assert!(out.iter().all(|g| matches(g, &sel)));
        }
        let both = filter(&ds, &FilterSelection::new(2015, "Celtics", GameType::Both));
        let dates: Vec<String> = both.iter().map(|g| g.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2014-10-29", "2014-11-01", "2015-04-19", "2015-04-20"]
        );
    }

    #[test]
    fn both_is_disjoint_union_of_regular_and_playoffs() {
        let ds = dataset();
        let regular = filter(&ds, &FilterSelection::new(2015, "Celtics", GameType::RegularSeason));
        let playoffs = filter(&ds, &FilterSelection::new(2015, "Celtics", GameType::Playoffs));
        let both = filter(&ds, &FilterSelection::new(2015, "Celtics", GameType::Both));

        assert_eq!(regular.len(), 2);
        assert_eq!(playoffs.len(), 2);
        assert!(regular.iter().all(|g| !g.is_playoffs));
        assert!(playoffs.iter().all(|g| g.is_playoffs));
        assert_eq!(both.len(), regular.len() + playoffs.len());

        let mut union: Vec<GameRecord> = regular.iter().chain(playoffs.iter()).cloned().collect();
        union.sort_by_key(|g| g.date);
        assert_eq!(union, both.games());

        let season_team = ds
            .games
            .iter()
            .filter(|g| g.season == 2015 && g.team == "Celtics")
            .count();
        assert_eq!(both.len(), season_team);
    }

    #[test]
    fn no_match_is_empty() {
        let ds = dataset();
        assert!(filter(&ds, &FilterSelection::new(1999, "Celtics", GameType::Both)).is_empty());
        assert!(filter(&ds, &FilterSelection::new(2015, "Lakers", GameType::Both)).is_empty());
        // Heat only has a playoff game in 2015.
        assert!(filter(&ds, &FilterSelection::new(2015, "Heat", GameType::RegularSeason)).is_empty());
    }

    #[test]
    fn same_date_keeps_file_order() {
        let ds = Dataset::from_games(vec![
            game(2015, "Celtics", "2014-11-02", false, "W"),
            game(2015, "Celtics", "2014-11-01", false, "W"),
            game(2015, "Celtics", "2014-11-01", false, "L"),
        ]);
        let out = filter(&ds, &FilterSelection::new(2015, "Celtics", GameType::Both));
        let results: Vec<String> = out.iter().map(|g| g.result.to_string()).collect();
        assert_eq!(results, vec!["W", "L", "W"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let ds = dataset();
        let sel = FilterSelection::new(2015, "Celtics", GameType::Both);
        assert_eq!(filter(&ds, &sel), filter(&ds, &sel));
    }
}
