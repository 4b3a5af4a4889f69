//! Row-to-[`Movie`] mapping and the fixed column contract.
//!
//! Every planned statement selects the same seven columns in the same order
//! ([`MovieColumn::ALL`]). Stores hand back [`StoreRow`]s; the mapper checks
//! the column names once per row and then reads each cell by position.

use crate::error::{CoreError, MappingError};
use crate::movie::Movie;

/// Columns selected by every catalog query, in select-list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieColumn {
    Title,
    Year,
    Genres,
    Rating,
    NumRaters,
    ImdbId,
    Id,
}

impl MovieColumn {
    pub const ALL: [MovieColumn; 7] = [
        MovieColumn::Title,
        MovieColumn::Year,
        MovieColumn::Genres,
        MovieColumn::Rating,
        MovieColumn::NumRaters,
        MovieColumn::ImdbId,
        MovieColumn::Id,
    ];

    /// Column name in the `movies` table.
    pub fn name(self) -> &'static str {
        match self {
            MovieColumn::Title => "title",
            MovieColumn::Year => "year",
            MovieColumn::Genres => "genres",
            MovieColumn::Rating => "rating",
            MovieColumn::NumRaters => "raters",
            MovieColumn::ImdbId => "imdb_id",
            MovieColumn::Id => "id",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Select list shared by all query shapes.
pub const SELECT_LIST: &str = "title, year, genres, rating, raters, imdb_id, id";

/// A single value as reported by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
}

impl Cell {
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Null => "NULL",
            Cell::Text(_) => "text",
            Cell::Int(_) => "integer",
            Cell::Float(_) => "float",
        }
    }
}

/// An owned result row: column names paired with their values, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreRow {
    columns: Vec<(String, Cell)>,
}

impl StoreRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, cell: Cell) {
        self.columns.push((name.into(), cell));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, cell: Cell) -> Self {
        self.push(name, cell);
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|(name, _)| name.as_str())
    }

    fn cell(&self, column: MovieColumn) -> &Cell {
        &self.columns[column.index()].1
    }
}

impl From<&Movie> for StoreRow {
    fn from(movie: &Movie) -> Self {
        StoreRow::new()
            .with(MovieColumn::Title.name(), Cell::Text(movie.title.clone()))
            .with(MovieColumn::Year.name(), Cell::Int(movie.year.into()))
            .with(MovieColumn::Genres.name(), Cell::Text(movie.genres.clone()))
            .with(MovieColumn::Rating.name(), Cell::Float(movie.rating.into()))
            .with(MovieColumn::NumRaters.name(), Cell::Int(movie.num_raters.into()))
            .with(MovieColumn::ImdbId.name(), Cell::Int(movie.imdb_id))
            .with(MovieColumn::Id.name(), Cell::Int(movie.id))
    }
}

/// Map one store row to a [`Movie`].
///
/// Numeric columns accept integer cells or text holding a base-10 number;
/// anything else is a [`MappingError`]. Nothing is coerced to zero.
pub fn map_row(row: &StoreRow) -> Result<Movie, MappingError> {
    check_columns(row)?;

    let num_raters: i32 = read_int(row, MovieColumn::NumRaters)?;
    if num_raters < 0 {
        return Err(MappingError::OutOfRange {
            column: MovieColumn::NumRaters,
            value: num_raters.to_string(),
        });
    }

    Ok(Movie {
        title: read_text(row, MovieColumn::Title)?,
        year: read_int(row, MovieColumn::Year)?,
        genres: read_text(row, MovieColumn::Genres)?,
        rating: read_float(row, MovieColumn::Rating)?,
        num_raters,
        imdb_id: read_int(row, MovieColumn::ImdbId)?,
        id: read_int(row, MovieColumn::Id)?,
    })
}

/// Map every row, failing on the first bad one.
///
/// The failing row's position is reported so no partial result escapes.
pub fn map_rows(rows: &[StoreRow]) -> Result<Vec<Movie>, CoreError> {
    rows.iter()
        .enumerate()
        .map(|(row, r)| map_row(r).map_err(|source| CoreError::Mapping { row, source }))
        .collect()
}

fn check_columns(row: &StoreRow) -> Result<(), MappingError> {
    if row.len() != MovieColumn::ALL.len() {
        return Err(MappingError::ColumnCount {
            expected: MovieColumn::ALL.len(),
            actual: row.len(),
        });
    }
    for column in MovieColumn::ALL {
        let actual = row.name(column.index()).unwrap_or_default();
        if !actual.eq_ignore_ascii_case(column.name()) {
            return Err(MappingError::ColumnName {
                index: column.index(),
                expected: column.name(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}

fn read_text(row: &StoreRow, column: MovieColumn) -> Result<String, MappingError> {
    match row.cell(column) {
        Cell::Text(s) => Ok(s.clone()),
        Cell::Null => Err(MappingError::Null { column }),
        other => Err(MappingError::UnexpectedType {
            column,
            found: other.type_name(),
        }),
    }
}

fn read_int<T: TryFrom<i64>>(row: &StoreRow, column: MovieColumn) -> Result<T, MappingError> {
    let wide = match row.cell(column) {
        Cell::Int(v) => *v,
        Cell::Text(s) => s.parse::<i64>().map_err(|_| MappingError::NotNumeric {
            column,
            value: s.clone(),
        })?,
        Cell::Null => return Err(MappingError::Null { column }),
        other => {
            return Err(MappingError::UnexpectedType {
                column,
                found: other.type_name(),
            })
        }
    };
    T::try_from(wide).map_err(|_| MappingError::OutOfRange {
        column,
        value: wide.to_string(),
    })
}

/// Reads a finite float; `NaN` and infinities count as non-numeric.
fn read_float(row: &StoreRow, column: MovieColumn) -> Result<f32, MappingError> {
    let not_numeric = |value: String| MappingError::NotNumeric { column, value };
    let value = match row.cell(column) {
        Cell::Float(v) => *v as f32,
        Cell::Int(v) => *v as f32,
        Cell::Text(s) => s.parse::<f32>().map_err(|_| not_numeric(s.clone()))?,
        Cell::Null => return Err(MappingError::Null { column }),
    };
    if !value.is_finite() {
        return Err(not_numeric(value.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn matrix() -> Movie {
        Movie {
            id: 2571,
            title: "Matrix, The (1999)".into(),
            year: 1999,
            genres: "Action|Sci-Fi|Thriller".into(),
            imdb_id: 133093,
            rating: 4.19,
            num_raters: 77800,
        }
    }

    /// Row in select-list order, with every value as text (as some drivers return).
    fn text_row(values: [&str; 7]) -> StoreRow {
        MovieColumn::ALL
            .into_iter()
            .zip(values)
            .fold(StoreRow::new(), |row, (col, v)| {
                row.with(col.name(), Cell::Text(v.to_string()))
            })
    }

    #[test]
    fn select_list_matches_column_order() {
        let names: Vec<_> = MovieColumn::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(SELECT_LIST, names.join(", "));
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let movie = matrix();
        let mapped = map_row(&StoreRow::from(&movie)).unwrap();
        assert_eq!(mapped, movie);
    }

    #[test]
    fn round_trip_preserves_empty_title_and_unset_id() {
        let movie = Movie::default();
        assert_eq!(map_row(&StoreRow::from(&movie)).unwrap(), movie);
    }

    #[test]
    fn numeric_text_cells_are_parsed() {
        let row = text_row(["Heat", "1995", "Crime", "3.9", "120", "113277", "6"]);
        let movie = map_row(&row).unwrap();
        assert_eq!(movie.year, 1995);
        assert_eq!(movie.num_raters, 120);
        assert_eq!(movie.imdb_id, 113277);
        assert_eq!(movie.id, 6);
        assert!((movie.rating - 3.9).abs() < f32::EPSILON);
    }

    #[test]
    fn non_numeric_year_is_a_mapping_error() {
        let row = text_row(["Heat", "nineteen", "Crime", "3.9", "120", "113277", "6"]);
        assert_matches!(
            map_row(&row),
            Err(MappingError::NotNumeric { column: MovieColumn::Year, value }) if value == "nineteen"
        );
    }

    #[test]
    fn empty_numeric_text_is_not_zero() {
        let row = text_row(["Heat", "1995", "Crime", "", "120", "113277", "6"]);
        assert_matches!(
            map_row(&row),
            Err(MappingError::NotNumeric { column: MovieColumn::Rating, .. })
        );
    }

    #[test]
    fn null_cell_is_rejected() {
        let mut row = StoreRow::from(&matrix());
        row.columns[MovieColumn::Genres.index()].1 = Cell::Null;
        assert_matches!(
            map_row(&row),
            Err(MappingError::Null { column: MovieColumn::Genres })
        );
    }

    #[test]
    fn text_column_holding_an_integer_is_rejected() {
        let mut row = StoreRow::from(&matrix());
        row.columns[MovieColumn::Title.index()].1 = Cell::Int(1);
        assert_matches!(
            map_row(&row),
            Err(MappingError::UnexpectedType { column: MovieColumn::Title, found: "integer" })
        );
    }

    #[test]
    fn non_finite_rating_text_is_not_numeric() {
        for rating in ["NaN", "inf", "-infinity"] {
            let row = text_row(["Heat", "1995", "Crime", rating, "120", "113277", "6"]);
            assert_matches!(
                map_row(&row),
                Err(MappingError::NotNumeric { column: MovieColumn::Rating, .. }),
                "{rating}"
            );
        }
    }

    #[test]
    fn non_finite_rating_float_is_not_numeric() {
        for rating in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut row = StoreRow::from(&matrix());
            row.columns[MovieColumn::Rating.index()].1 = Cell::Float(rating);
            assert_matches!(
                map_row(&row),
                Err(MappingError::NotNumeric { column: MovieColumn::Rating, .. })
            );
        }
    }

    #[test]
    fn year_out_of_i32_range_is_rejected() {
        let mut row = StoreRow::from(&matrix());
        row.columns[MovieColumn::Year.index()].1 = Cell::Int(i64::MAX);
        assert_matches!(
            map_row(&row),
            Err(MappingError::OutOfRange { column: MovieColumn::Year, .. })
        );
    }

    #[test]
    fn negative_rater_count_is_rejected() {
        let mut row = StoreRow::from(&matrix());
        row.columns[MovieColumn::NumRaters.index()].1 = Cell::Int(-3);
        assert_matches!(
            map_row(&row),
            Err(MappingError::OutOfRange { column: MovieColumn::NumRaters, .. })
        );
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let row = StoreRow::new().with("title", Cell::Text("x".into()));
        assert_eq!(
            map_row(&row),
            Err(MappingError::ColumnCount {
                expected: 7,
                actual: 1
            })
        );
    }

    #[test]
    fn swapped_columns_are_rejected() {
        let movie = matrix();
        let row = StoreRow::new()
            .with("year", Cell::Int(movie.year.into()))
            .with("title", Cell::Text(movie.title.clone()))
            .with("genres", Cell::Text(movie.genres.clone()))
            .with("rating", Cell::Float(movie.rating.into()))
            .with("raters", Cell::Int(movie.num_raters.into()))
            .with("imdb_id", Cell::Int(movie.imdb_id))
            .with("id", Cell::Int(movie.id));
        assert_matches!(
            map_row(&row),
            Err(MappingError::ColumnName { index: 0, expected: "title", .. })
        );
    }

    #[test]
    fn map_rows_reports_failing_row_index() {
        let good = StoreRow::from(&matrix());
        let bad = text_row(["Heat", "1995", "Crime", "3.9", "many", "113277", "6"]);
        assert_matches!(
            map_rows(&[good.clone(), good, bad]),
            Err(CoreError::Mapping { row: 2, source: MappingError::NotNumeric { column: MovieColumn::NumRaters, .. } })
        );
    }
}
