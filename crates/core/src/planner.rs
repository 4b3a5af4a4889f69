//! Query planning: from a [`FilterSet`] to a parameterized statement.
//!
//! Planning happens in two steps. A [`PlannerMode`] decides which present
//! filters become [`Predicate`]s, then a single renderer turns the predicate
//! list into SQL with `$n` placeholders and a matching bind list.
//!
//! The statement text is built only from fixed keywords, column names and
//! placeholders. Request values travel exclusively as [`BindValue`]s.

use std::fmt;
use std::str::FromStr;

use crate::filters::FilterSet;
use crate::mapper::SELECT_LIST;

/// Table every catalog query reads from.
pub const MOVIES_TABLE: &str = "movies";

/// How present filters are turned into predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlannerMode {
    /// AND every present filter in the order title, genre, year from, year to.
    #[default]
    Uniform,
    /// The historical shape table. Genre is dropped whenever a single year
    /// bound is given, and with both year bounds title and genre are used only
    /// when both are present.
    Legacy,
}

impl PlannerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PlannerMode::Uniform => "uniform",
            PlannerMode::Legacy => "legacy",
        }
    }
}

impl fmt::Display for PlannerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown planner mode '{0}', expected 'uniform' or 'legacy'")]
pub struct UnknownPlannerMode(pub String);

impl FromStr for PlannerMode {
    type Err = UnknownPlannerMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(PlannerMode::Uniform),
            "legacy" => Ok(PlannerMode::Legacy),
            _ => Err(UnknownPlannerMode(s.to_string())),
        }
    }
}

/// One condition of a catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match on `title`.
    TitleContains(String),
    /// Case-insensitive substring match on `genres`.
    GenreContains(String),
    /// `year >= n`
    YearFrom(i32),
    /// `year <= n`
    YearTo(i32),
}

impl Predicate {
    fn label(&self) -> &'static str {
        match self {
            Predicate::TitleContains(_) => "title",
            Predicate::GenreContains(_) => "genre",
            Predicate::YearFrom(_) => "year_from",
            Predicate::YearTo(_) => "year_to",
        }
    }
}

/// Typed value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i32),
}

/// A statement ready for the store: SQL text plus binds in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    pub sql: String,
    pub params: Vec<BindValue>,
    predicates: Vec<Predicate>,
}

impl PlannedQuery {
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Short name of the query shape, e.g. `title+year_from`, for logs.
    pub fn shape(&self) -> String {
        if self.predicates.is_empty() {
            return "full_scan".to_string();
        }
        self.predicates
            .iter()
            .map(Predicate::label)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Plan the catalog query for a filter set.
///
/// # Examples
///
/// ```
/// use cinedex_core::filters::FilterSet;
/// use cinedex_core::planner::{plan, BindValue, PlannerMode};
///
/// let fs = FilterSet { title: Some("Matrix".into()), ..FilterSet::default() };
/// let q = plan(&fs, PlannerMode::Uniform);
/// assert!(q.sql.ends_with("WHERE title ILIKE '%' || $1 || '%'"));
/// assert_eq!(q.params, vec![BindValue::Text("Matrix".into())]);
/// ```
pub fn plan(filters: &FilterSet, mode: PlannerMode) -> PlannedQuery {
    let predicates = match mode {
        PlannerMode::Uniform => uniform_predicates(filters),
        PlannerMode::Legacy => legacy_predicates(filters),
    };
    render(predicates)
}

fn uniform_predicates(fs: &FilterSet) -> Vec<Predicate> {
    let mut predicates = Vec::with_capacity(4);
    if let Some(ref title) = fs.title {
        predicates.push(Predicate::TitleContains(title.clone()));
    }
    if let Some(ref genre) = fs.genre {
        predicates.push(Predicate::GenreContains(genre.clone()));
    }
    if let Some(from) = fs.start_year {
        predicates.push(Predicate::YearFrom(from));
    }
    if let Some(to) = fs.end_year {
        predicates.push(Predicate::YearTo(to));
    }
    predicates
}

fn legacy_predicates(fs: &FilterSet) -> Vec<Predicate> {
    let title = fs.title.clone().map(Predicate::TitleContains);
    let genre = fs.genre.clone().map(Predicate::GenreContains);

    match (fs.start_year, fs.end_year) {
        (None, None) => title.into_iter().chain(genre).collect(),
        (Some(from), None) => title.into_iter().chain([Predicate::YearFrom(from)]).collect(),
        (None, Some(to)) => title.into_iter().chain([Predicate::YearTo(to)]).collect(),
        (Some(from), Some(to)) => match (title, genre) {
            (Some(title), Some(genre)) => vec![
                title,
                genre,
                Predicate::YearFrom(from),
                Predicate::YearTo(to),
            ],
            _ => vec![Predicate::YearFrom(from), Predicate::YearTo(to)],
        },
    }
}

fn render(predicates: Vec<Predicate>) -> PlannedQuery {
    let mut conditions: Vec<String> = Vec::with_capacity(predicates.len());
    let mut params: Vec<BindValue> = Vec::with_capacity(predicates.len());
    let mut bind_idx = 1u32;

    for predicate in &predicates {
        let (condition, value) = match predicate {
            Predicate::TitleContains(text) => (
                format!("title ILIKE '%' || ${bind_idx} || '%'"),
                BindValue::Text(escape_like(text)),
            ),
            Predicate::GenreContains(text) => (
                format!("genres ILIKE '%' || ${bind_idx} || '%'"),
                BindValue::Text(escape_like(text)),
            ),
            Predicate::YearFrom(year) => (format!("year >= ${bind_idx}"), BindValue::Int(*year)),
            Predicate::YearTo(year) => (format!("year <= ${bind_idx}"), BindValue::Int(*year)),
        };
        conditions.push(condition);
        params.push(value);
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    PlannedQuery {
        sql: format!("SELECT {SELECT_LIST} FROM {MOVIES_TABLE}{where_clause}"),
        params,
        predicates,
    }
}

/// Escape LIKE metacharacters so the text matches literally.
///
/// Uses the default `\` escape character.
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
