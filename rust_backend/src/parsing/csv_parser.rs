use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::core::domain::{compute_roi, MovieRecord};
use crate::error::DataFormatError;
use crate::parsing::fields::{
    parse_amount, parse_number, parse_release_year, parse_year_column, split_multi_valued,
};

/// Columns that must be present in every dataset.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "title",
    "genres",
    "cast",
    "director",
    "popularity",
    "vote_average",
    "budget",
    "revenue",
    "status",
];

/// At least one of these must be present to derive the release year.
pub const YEAR_COLUMNS: [&str; 2] = ["release_date", "release_year"];

/// One unparsed dataset row, keyed by the dataset's column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMovieRow {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub genres: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub cast: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub release_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub popularity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub vote_average: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub revenue: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub status: Option<String>,
}

/// Read a present text cell.
///
/// Empty CSV cells and JSON nulls become an empty string; only an absent
/// column or key leaves the field `None` (through `serde(default)`).
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

/// Read a present numeric cell as text, accepting raw JSON numbers.
fn deserialize_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Some(match Option::<Cell>::deserialize(deserializer)? {
        Some(Cell::Text(s)) => s,
        Some(Cell::Int(i)) => i.to_string(),
        Some(Cell::Float(f)) => f.to_string(),
        Some(Cell::Bool(b)) => b.to_string(),
        None => String::new(),
    }))
}

fn required<'a>(
    value: &'a Option<String>,
    row: usize,
    field: &'static str,
) -> Result<&'a str, DataFormatError> {
    value
        .as_deref()
        .ok_or(DataFormatError::MissingField { row, field })
}

/// Convert one raw row into a typed record.
///
/// `row` is the 1-based data row number used in error messages.
pub fn row_to_record(raw: &RawMovieRow, row: usize) -> Result<MovieRecord, DataFormatError> {
    let title = required(&raw.title, row, "title")?.trim().to_string();
    let genres = split_multi_valued(required(&raw.genres, row, "genres")?);
    let cast = split_multi_valued(required(&raw.cast, row, "cast")?);
    let directors = split_multi_valued(required(&raw.director, row, "director")?);

    let popularity = parse_number(required(&raw.popularity, row, "popularity")?);
    let vote_average = parse_number(required(&raw.vote_average, row, "vote_average")?);
    let budget = parse_amount(required(&raw.budget, row, "budget")?);
    let revenue = parse_amount(required(&raw.revenue, row, "revenue")?);
    let status = required(&raw.status, row, "status")?.trim().to_string();

    let release_year = raw
        .release_date
        .as_deref()
        .and_then(parse_release_year)
        .or_else(|| raw.release_year.as_deref().and_then(parse_year_column))
        .ok_or_else(|| DataFormatError::InvalidReleaseYear {
            row,
            value: raw
                .release_date
                .clone()
                .or_else(|| raw.release_year.clone())
                .unwrap_or_default(),
        })?;

    Ok(MovieRecord {
        title,
        release_year,
        genres,
        directors,
        cast,
        popularity,
        vote_average,
        budget,
        revenue,
        roi: compute_roi(budget, revenue),
        status,
    })
}

/// Convert raw rows into records, failing on the first malformed row.
pub fn rows_to_records(rows: &[RawMovieRow]) -> Result<Vec<MovieRecord>, DataFormatError> {
    rows.iter()
        .enumerate()
        .map(|(i, raw)| row_to_record(raw, i + 1))
        .collect()
}

/// Check a header row for the required columns.
pub fn validate_headers<'a, I>(headers: I) -> Result<(), DataFormatError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().map(|h| h.trim()).collect();

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !present.contains(c)) {
        return Err(DataFormatError::MissingColumn(missing.to_string()));
    }
    if !YEAR_COLUMNS.iter().any(|c| present.contains(c)) {
        return Err(DataFormatError::MissingColumn(YEAR_COLUMNS.join(" or ")));
    }
    Ok(())
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::Headers);
    builder
}

fn read_rows<R: Read>(mut csv_reader: csv::Reader<R>) -> Result<Vec<RawMovieRow>, DataFormatError> {
    validate_headers(csv_reader.headers()?.iter())?;

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<RawMovieRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Parse CSV data from any reader into raw rows.
pub fn parse_raw_rows<R: Read>(reader: R) -> Result<Vec<RawMovieRow>, DataFormatError> {
    read_rows(reader_builder().from_reader(reader))
}

/// Parse CSV data from any reader into movie records.
pub fn parse_movies_reader<R: Read>(reader: R) -> Result<Vec<MovieRecord>, DataFormatError> {
    let rows = parse_raw_rows(reader)?;
    rows_to_records(&rows)
}

/// Parse a CSV string into movie records.
pub fn parse_movies_csv_str(content: &str) -> Result<Vec<MovieRecord>, DataFormatError> {
    parse_movies_reader(content.as_bytes())
}

/// Parse a CSV file into movie records.
pub fn parse_movies_csv(csv_path: &Path) -> Result<Vec<MovieRecord>, DataFormatError> {
    let rows = read_rows(reader_builder().from_path(csv_path)?)?;
    rows_to_records(&rows)
}

/// Parse a JSON array of row objects into movie records.
pub fn parse_movies_json_str(content: &str) -> Result<Vec<MovieRecord>, DataFormatError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;

    if let Some(first) = values.first().and_then(|v| v.as_object()) {
        validate_headers(first.keys().map(|k| k.as_str()))?;
    }

    let rows = values
        .into_iter()
        .map(serde_json::from_value::<RawMovieRow>)
        .collect::<Result<Vec<_>, _>>()?;
    rows_to_records(&rows)
}
