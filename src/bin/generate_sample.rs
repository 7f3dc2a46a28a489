use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Date32Type, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Same column names as the Elo results export.
#[derive(Debug, Clone, Serialize)]
struct GameRow {
    gameorder: usize,
    year_id: i64,
    date_game: NaiveDate,
    is_playoffs: i64,
    fran_id: String,
    opp_fran: String,
    game_result: &'static str,
}

/// SplitMix64: small, seedable and reproducible across platforms.
struct SeasonRng(u64);

impl SeasonRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

const TEAMS: [&str; 6] = ["Bulls", "Celtics", "Heat", "Knicks", "Lakers", "Spurs"];
const ROUNDS: usize = 4;

/// Logistic win probability for `a` against `b`.
fn win_probability(a: f64, b: f64) -> f64 {
    1.0 / (1.0 + (-(a - b)).exp())
}

/// Append both rows (one per franchise) of a single game.
fn play(
    rows: &mut Vec<GameRow>,
    rng: &mut SeasonRng,
    season: i64,
    date: NaiveDate,
    playoffs: bool,
    (home, home_strength): (&str, f64),
    (away, away_strength): (&str, f64),
) -> bool {
    let home_wins = rng.next_f64() < win_probability(home_strength + 0.2, away_strength);
    let gameorder = rows.len() / 2 + 1;
    for (team, opp, won) in [(home, away, home_wins), (away, home, !home_wins)] {
        rows.push(GameRow {
            gameorder,
            year_id: season,
            date_game: date,
            is_playoffs: playoffs as i64,
            fran_id: team.to_string(),
            opp_fran: opp.to_string(),
            game_result: if won { "W" } else { "L" },
        });
    }
    home_wins
}

/// Best-of-five series; returns the winner.
fn series<'a>(
    rows: &mut Vec<GameRow>,
    rng: &mut SeasonRng,
    season: i64,
    start: NaiveDate,
    a: (&'a str, f64),
    b: (&'a str, f64),
) -> (&'a str, f64) {
    let (mut a_wins, mut b_wins) = (0, 0);
    let mut day = 0;
    while a_wins < 3 && b_wins < 3 {
        let (home, away) = if day % 2 == 0 { (a, b) } else { (b, a) };
        let home_won = play(rows, rng, season, start + Duration::days(day * 2), true, home, away);
        if (home.0 == a.0) == home_won {
            a_wins += 1;
        } else {
            b_wins += 1;
        }
        day += 1;
    }
    if a_wins == 3 { a } else { b }
}

fn generate_season(rows: &mut Vec<GameRow>, rng: &mut SeasonRng, season: i64) -> Result<()> {
    let strengths: Vec<f64> = TEAMS.iter().map(|_| rng.next_f64() * 2.0 - 1.0).collect();
    let opening = NaiveDate::from_ymd_opt(season as i32 - 1, 10, 28).context("opening day")?;

    // Regular season: every pairing meets ROUNDS times, one game per day.
    let mut day = 0i64;
    let mut wins = vec![0usize; TEAMS.len()];
    for round in 0..ROUNDS {
        for i in 0..TEAMS.len() {
            for j in (i + 1)..TEAMS.len() {
                let (h, a) = if round % 2 == 0 { (i, j) } else { (j, i) };
                let date = opening + Duration::days(day);
                let home_won = play(
                    rows,
                    rng,
                    season,
                    date,
                    false,
                    (TEAMS[h], strengths[h]),
                    (TEAMS[a], strengths[a]),
                );
                wins[if home_won { h } else { a }] += 1;
                day += 1;
            }
        }
    }

    // Playoffs: top four by wins, 1 v 4 and 2 v 3, then the final.
    let mut seeds: Vec<usize> = (0..TEAMS.len()).collect();
    seeds.sort_by(|&x, &y| wins[y].cmp(&wins[x]));
    let seed = |k: usize| (TEAMS[seeds[k]], strengths[seeds[k]]);
    let playoff_start = opening + Duration::days(day + 7);
    let first = series(rows, rng, season, playoff_start, seed(0), seed(3));
    let second = series(rows, rng, season, playoff_start + Duration::days(1), seed(1), seed(2));
    series(rows, rng, season, playoff_start + Duration::days(14), first, second);
    Ok(())
}

fn write_csv(rows: &[GameRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[GameRow], path: &str) -> Result<()> {
    let year_array = Int64Array::from(rows.iter().map(|r| r.year_id).collect::<Vec<_>>());
    let team_array = StringArray::from(rows.iter().map(|r| r.fran_id.as_str()).collect::<Vec<_>>());
    let date_array = Date32Array::from(
        rows.iter()
            .map(|r| Date32Type::from_naive_date(r.date_game))
            .collect::<Vec<_>>(),
    );
    let playoff_array = Int64Array::from(rows.iter().map(|r| r.is_playoffs).collect::<Vec<_>>());
    let result_array = StringArray::from(rows.iter().map(|r| r.game_result).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("year_id", DataType::Int64, false),
        Field::new("fran_id", DataType::Utf8, false),
        Field::new("date_game", DataType::Date32, false),
        Field::new("is_playoffs", DataType::Int64, false),
        Field::new("game_result", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(year_array),
            Arc::new(team_array),
            Arc::new(date_array),
            Arc::new(playoff_array),
            Arc::new(result_array),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SeasonRng(42);
    let mut rows = Vec::new();
    for season in 2013..=2015 {
        generate_season(&mut rows, &mut rng, season)?;
    }

    write_csv(&rows, "sample_games.csv")?;
    write_parquet(&rows, "sample_games.parquet")?;

    println!(
        "Wrote {} rows ({} games) to sample_games.csv and sample_games.parquet",
        rows.len(),
        rows.len() / 2
    );
    Ok(())
}
