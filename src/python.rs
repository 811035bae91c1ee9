//! Python bindings
//!
//! Exposes the `_accelerate` extension module. Arguments are checked here,
//! at the boundary, and converted into codepoint buffers before the core
//! ever runs.

use crate::algorithms::levenshtein_codepoints;
use crate::error::DistanceError;
use crate::suggest::{format_options, ExtraRule, SuggestConfig, Suggester};
use crate::text::{Codepoints, Limits};
use pyo3::create_exception;
use pyo3::exceptions::{PyMemoryError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::PyString;
use std::borrow::Cow;

// ValidationError subclasses TypeError so `except TypeError` keeps working
// for callers that predate the dedicated exception.
create_exception!(_accelerate, ValidationError, PyTypeError);

impl From<DistanceError> for PyErr {
    fn from(err: DistanceError) -> PyErr {
        match err {
            DistanceError::Validation { .. } => ValidationError::new_err(err.to_string()),
            DistanceError::Resource { .. } => {
                log::warn!("{}", err);
                PyMemoryError::new_err(err.to_string())
            }
        }
    }
}

/// View an exact `str` as text. Other types, `str` subclasses and strings
/// holding lone surrogates are rejected with `ValidationError`.
fn exact_text<'a>(obj: &'a Bound<'_, PyAny>, expected: &str) -> PyResult<Cow<'a, str>> {
    let s = obj.downcast_exact::<PyString>().map_err(|_| {
        log::debug!("rejected non-str argument");
        ValidationError::new_err(expected.to_string())
    })?;
    s.to_cow()
        .map_err(|e| ValidationError::new_err(format!("{}: {}", expected, e)))
}

/// Collect an iterable of exact `str` objects.
fn exact_texts(obj: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
    const EXPECTED: &str = "Expected an iterable of strings";
    let iter = obj
        .try_iter()
        .map_err(|_| ValidationError::new_err(EXPECTED))?;
    let mut out = Vec::new();
    for item in iter {
        let item = item?;
        out.push(exact_text(&item, EXPECTED)?.into_owned());
    }
    Ok(out)
}

/// Compute the Levenshtein distance between two strings.
///
/// Both arguments must be exactly `str`; subclasses, bytes and other objects
/// raise `ValidationError`. Both are validated before either is decoded.
/// Releases the GIL while the matrix is filled.
#[pyfunction]
fn ldist(py: Python<'_>, a: &Bound<'_, PyAny>, b: &Bound<'_, PyAny>) -> PyResult<usize> {
    let a = exact_text(a, "Expected two strings")?;
    let b = exact_text(b, "Expected two strings")?;
    let (a, b) = Codepoints::pair(&a, &b, &Limits::unbounded())?;
    Ok(py.allow_threads(|| levenshtein_codepoints(&a, &b))?)
}

/// Suggest the closest names for a misspelled word.
///
/// Returns `None` when nothing is close enough.
///
/// # Arguments
/// * `strict` - When True, never retry without underscores (default: False)
/// * `extras` - Which related names to include besides the nearest ones
#[pyfunction]
#[pyo3(name = "suggest", signature = (word, candidates, strict=None, extras="substring"))]
fn py_suggest(
    word: &Bound<'_, PyAny>,
    candidates: &Bound<'_, PyAny>,
    strict: Option<bool>,
    extras: &str,
) -> PyResult<Option<Vec<String>>> {
    let word = exact_text(word, "Expected a string")?;
    let names = exact_texts(candidates)?;

    let defaults = SuggestConfig::default();
    let suggester = Suggester::new(SuggestConfig {
        extras: extras.parse::<ExtraRule>()?,
        strict: strict.unwrap_or(defaults.strict),
        ..defaults
    });
    let found = suggester.suggest(&word, &names)?;
    Ok(found.map(|names| names.into_iter().map(str::to_owned).collect()))
}

/// Phrase options as "Did you mean ...?", or `None` for an empty list.
#[pyfunction]
#[pyo3(name = "format_options")]
fn py_format_options(options: &Bound<'_, PyAny>) -> PyResult<Option<String>> {
    Ok(format_options(&exact_texts(options)?))
}

#[pymodule]
fn _accelerate(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("ValidationError", py.get_type::<ValidationError>())?;

    m.add_function(wrap_pyfunction!(ldist, m)?)?;
    m.add_function(wrap_pyfunction!(py_suggest, m)?)?;
    m.add_function(wrap_pyfunction!(py_format_options, m)?)?;

    Ok(())
}
