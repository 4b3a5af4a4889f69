//! Normalized filter set derived from one catalog request.

use serde::Serialize;

use crate::decode::decode;
use crate::error::CoreError;
use crate::request::RawFilterParams;

/// The four request parameters a catalog lookup understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Title,
    Genre,
    StartYear,
    EndYear,
}

impl FilterField {
    /// All fields in request order.
    pub const ALL: [FilterField; 4] = [
        FilterField::Title,
        FilterField::Genre,
        FilterField::StartYear,
        FilterField::EndYear,
    ];

    /// Parameter name as it appears on the wire.
    pub fn param_name(self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Genre => "genre",
            FilterField::StartYear => "startYear",
            FilterField::EndYear => "endYear",
        }
    }

    pub fn from_param_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.param_name() == name)
    }

    /// Position in request order.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Filters actually present in a request.
///
/// Text filters hold decoded, non-empty text. Year filters hold a parsed
/// integer; there is no sentinel for "no bound".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl FilterSet {
    /// Decode and validate the four raw parameter values.
    ///
    /// Fails with [`CoreError::Decode`] on a malformed escape in any value and
    /// with [`CoreError::FilterParse`] when a non-empty year is not an integer.
    pub fn build(
        title_raw: &str,
        genre_raw: &str,
        start_year_raw: &str,
        end_year_raw: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            title: decode_text(FilterField::Title, title_raw)?,
            genre: decode_text(FilterField::Genre, genre_raw)?,
            start_year: decode_year(FilterField::StartYear, start_year_raw)?,
            end_year: decode_year(FilterField::EndYear, end_year_raw)?,
        })
    }

    pub fn from_raw(raw: &RawFilterParams) -> Result<Self, CoreError> {
        Self::build(&raw.title, &raw.genre, &raw.start_year, &raw.end_year)
    }

    pub fn is_present(&self, field: FilterField) -> bool {
        match field {
            FilterField::Title => self.title.is_some(),
            FilterField::Genre => self.genre.is_some(),
            FilterField::StartYear => self.start_year.is_some(),
            FilterField::EndYear => self.end_year.is_some(),
        }
    }

    /// Number of present filters.
    pub fn present_count(&self) -> usize {
        FilterField::ALL
            .into_iter()
            .filter(|f| self.is_present(*f))
            .count()
    }
}

fn decode_field(field: FilterField, raw: &str) -> Result<String, CoreError> {
    decode(raw).map_err(|source| CoreError::Decode { field, source })
}

fn decode_text(field: FilterField, raw: &str) -> Result<Option<String>, CoreError> {
    let text = decode_field(field, raw)?;
    Ok((!text.is_empty()).then_some(text))
}

fn decode_year(field: FilterField, raw: &str) -> Result<Option<i32>, CoreError> {
    let text = decode_field(field, raw)?;
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| CoreError::FilterParse { field, value: text })
}
