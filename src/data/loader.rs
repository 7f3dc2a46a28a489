use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::error::DataError;
use super::model::{Dataset, GameRecord, GameResult};

/// Columns every source file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "year_id",
    "fran_id",
    "date_game",
    "is_playoffs",
    "game_result",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a game dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one game per row (the Elo results export)
/// * `.json`    – `[{ "year_id": 2015, "fran_id": "Celtics", ... }, ...]`
/// * `.parquet` – the same columns as typed Arrow arrays
///
/// Any schema violation fails the whole load.
pub fn load_file(path: &Path) -> Result<Dataset, DataError> {
    let dataset = load_any(path).map_err(|e| {
        log::error!("Failed to load {}: {e:#}", path.display());
        DataError::unavailable(path, &e)
    })?;

    let seasons = dataset.seasons();
    match (seasons.last(), seasons.first()) {
        (Some(first), Some(last)) => log::info!(
            "Loaded {} games from {} (seasons {first}–{last})",
            dataset.len(),
            path.display()
        ),
        _ => log::warn!("{} contains no games", path.display()),
    }
    Ok(dataset)
}

fn load_any(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Row validation shared by the text formats
// ---------------------------------------------------------------------------

/// Raw row as it appears in CSV / JSON. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawGameRow {
    year_id: i32,
    fran_id: String,
    date_game: String,
    is_playoffs: i64,
    game_result: String,
}

impl RawGameRow {
    fn into_record(self) -> Result<GameRecord> {
        build_record(
            self.year_id,
            self.fran_id,
            parse_date(&self.date_game)?,
            self.is_playoffs,
            &self.game_result,
        )
    }
}

fn build_record(
    season: i32,
    team: String,
    date: NaiveDate,
    is_playoffs: i64,
    result: &str,
) -> Result<GameRecord> {
    if team.trim().is_empty() {
        bail!("empty 'fran_id'");
    }
    let is_playoffs = match is_playoffs {
        0 => false,
        1 => true,
        other => bail!("'is_playoffs' must be 0 or 1, got {other}"),
    };
    let result = GameResult::from_label(result).context("empty 'game_result'")?;
    Ok(GameRecord {
        season,
        team,
        date,
        is_playoffs,
        result,
    })
}

/// Accept ISO dates and the `M/D/YYYY` form used by the Elo export.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .or_else(|_| {
            // Timestamps such as "2015-04-15T00:00:00" or "2015-04-15 00:00:00".
            let date_part = s.split(&['T', ' '][..]).next().unwrap_or(s);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        })
        .with_context(|| format!("'{s}' is not a date"))
}

fn ensure_columns(present: &[String], source: &str) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.iter().any(|p| p == col))
        .collect();
    if !missing.is_empty() {
        bail!("{source} missing required column(s): {}", missing.join(", "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    ensure_columns(&headers, "CSV")?;

    let mut games = Vec::new();
    for (row_no, result) in reader.deserialize::<RawGameRow>().enumerate() {
        // Row numbers are 1-based data rows (header excluded).
        let row_no = row_no + 1;
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let game = raw
            .into_record()
            .with_context(|| format!("CSV row {row_no}"))?;
        games.push(game);
    }

    Ok(Dataset::from_games(games))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: serde_json::Value = serde_json::from_str(&text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut games = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let keys: Vec<String> = obj.keys().cloned().collect();
        ensure_columns(&keys, &format!("JSON row {i}"))?;

        let raw: RawGameRow = serde_json::from_value(rec.clone())
            .with_context(|| format!("JSON row {i}"))?;
        games.push(raw.into_record().with_context(|| format!("JSON row {i}"))?);
    }

    Ok(Dataset::from_games(games))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of game rows.
///
/// Accepted column types:
/// - `year_id`: Int32 / Int64
/// - `fran_id`, `game_result`: Utf8 / LargeUtf8
/// - `date_game`: Utf8 / LargeUtf8 / Date32
/// - `is_playoffs`: Int32 / Int64 / Boolean
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    // Checked on the file schema so files without any row group are covered too.
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    ensure_columns(&names, "Parquet file")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut games = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let columns = [
            column(&batch, "year_id")?,
            column(&batch, "fran_id")?,
            column(&batch, "date_game")?,
            column(&batch, "is_playoffs")?,
            column(&batch, "game_result")?,
        ];

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row + 1;
            let game = read_parquet_row(&columns, row)
                .with_context(|| format!("Parquet row {row_no}"))?;
            games.push(game);
        }
        row_offset += batch.num_rows();
    }

    Ok(Dataset::from_games(games))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

/// Columns in [`REQUIRED_COLUMNS`] order.
fn read_parquet_row(columns: &[&ArrayRef; 5], row: usize) -> Result<GameRecord> {
    let [season_col, team_col, date_col, playoff_col, result_col] = *columns;
    let season = i32::try_from(extract_int(season_col, row, "year_id")?)
        .context("'year_id' out of range")?;
    let team = extract_str(team_col, row, "fran_id")?;
    let date = extract_date(date_col, row)?;
    let playoffs = extract_int(playoff_col, row, "is_playoffs")?;
    let result = extract_str(result_col, row, "game_result")?;
    build_record(season, team, date, playoffs, &result)
}

fn extract_int(col: &ArrayRef, row: usize, name: &str) -> Result<i64> {
    if col.is_null(row) {
        bail!("null '{name}'");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("'{name}' has type {other:?}, expected an integer"),
    }
}

fn extract_str(col: &ArrayRef, row: usize, name: &str) -> Result<String> {
    if col.is_null(row) {
        bail!("null '{name}'");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .context("expected LargeStringArray")?;
            Ok(arr.value(row).to_string())
        }
        other => bail!("'{name}' has type {other:?}, expected a string"),
    }
}

fn extract_date(col: &ArrayRef, row: usize) -> Result<NaiveDate> {
    match col.data_type() {
        DataType::Date32 => {
            if col.is_null(row) {
                bail!("null 'date_game'");
            }
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .context("expected Date32Array")?;
            arr.value_as_date(row)
                .context("'date_game' out of range")
        }
        _ => parse_date(&extract_str(col, row, "date_game")?),
    }
}
