//! Splitting of the `title=..&genre=..&startYear=..&endYear=..` request shape.
//!
//! Values stay escaped here; decoding happens when the [`FilterSet`] is built.
//!
//! [`FilterSet`]: crate::filters::FilterSet

use crate::error::CoreError;
use crate::filters::FilterField;

/// The four raw (still escaped) filter values of one request.
///
/// A parameter missing from the request is an empty string, the same as a
/// parameter sent with no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFilterParams {
    pub title: String,
    pub genre: String,
    pub start_year: String,
    pub end_year: String,
}

impl RawFilterParams {
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        start_year: impl Into<String>,
        end_year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            start_year: start_year.into(),
            end_year: end_year.into(),
        }
    }

    /// Parse a form body or query string into raw parameter values.
    ///
    /// A trailing line terminator is ignored. Each `&`-separated segment must
    /// be `name=value` with a known name; names may not repeat.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinedex_core::request::RawFilterParams;
    /// let raw = RawFilterParams::parse("title=M%61trix&genre=&startYear=&endYear=").unwrap();
    /// assert_eq!(raw.title, "M%61trix");
    /// assert!(raw.genre.is_empty());
    /// ```
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let input = input.trim_end_matches(['\r', '\n']);
        let mut params = Self::default();
        let mut seen = [false; 4];

        for segment in input.split('&').filter(|s| !s.is_empty()) {
            let (name, value) = segment.split_once('=').ok_or_else(|| {
                CoreError::Validation(format!("parameter '{segment}' has no '=' separator"))
            })?;

            let field = FilterField::from_param_name(name)
                .ok_or_else(|| CoreError::Validation(format!("unknown parameter '{name}'")))?;

            let slot = &mut seen[field.index()];
            if *slot {
                return Err(CoreError::Validation(format!(
                    "parameter '{name}' given more than once"
                )));
            }
            *slot = true;

            *params.value_mut(field) = value.to_string();
        }

        Ok(params)
    }

    fn value_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Title => &mut self.title,
            FilterField::Genre => &mut self.genre,
            FilterField::StartYear => &mut self.start_year,
            FilterField::EndYear => &mut self.end_year,
        }
    }
}
