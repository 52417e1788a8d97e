//! Query-string encoding for numeric inputs.

use crate::{Error, ErrorContext, Result};
use url::Url;

/// Query parameter carrying the submitted data.
pub const DATA_PARAM: &str = "data";

/// One `data=<value>` pair per number, in input order.
///
/// Fails with [`Error::Encoding`] on NaN or infinite values, which have no
/// numeric text form the service accepts.
pub fn number_pairs(values: &[f64]) -> Result<Vec<(&'static str, String)>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if !v.is_finite() {
                return Err(Error::encoding_with_context(
                    "number is not finite",
                    ErrorContext::new()
                        .with_field_path(format!("input.numbers[{}]", i))
                        .with_details(v.to_string())
                        .with_source("request_builder"),
                ));
            }
            Ok((DATA_PARAM, v.to_string()))
        })
        .collect()
}

/// Append form-encoded pairs; leaves the URL without a query when `pairs` is empty.
pub(crate) fn append_pairs(url: &mut Url, pairs: &[(&str, String)]) {
    if pairs.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (name, value) in pairs {
        query.append_pair(name, value);
    }
}

/// Recover the numbers carried by the `data` parameters of `url`.
pub fn parse_numbers(url: &Url) -> std::result::Result<Vec<f64>, std::num::ParseFloatError> {
    url.query_pairs()
        .filter(|(name, _)| *name == DATA_PARAM)
        .map(|(_, value)| value.parse::<f64>())
        .collect()
}
