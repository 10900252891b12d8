use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Deserialize an optional number from a form or query string, treating blank
/// or unparseable input (`categoryId=`, `page=abc`) as absent instead of a
/// rejection. Required fields are then reported by the validator.
pub fn lenient_option<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let opt = Option::<String>::deserialize(de)?;
    Ok(opt.and_then(|s| s.trim().parse().ok()))
}
