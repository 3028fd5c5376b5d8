//! Per-field validators.
//!
//! Each validator checks one textual value and either accepts it or explains
//! the rejection with a [`ValidationError`]. They are pure: storing the value
//! and deciding between strict and lenient handling is up to
//! [`UrlEntry`](crate::UrlEntry).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fields::Field;

/// Maximum accepted `loc` length is one less than this.
pub const MAX_LOC_LEN: usize = 2048;

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static LOC_SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://").unwrap());

/// `YYYY-MM-DD`
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// `YYYY-MM-DDTHH:MM:SS+HH:MM`
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[+-]\d{2}:\d{2}$").unwrap()
});

/// Element names allowed for opaque extension fields.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static XML_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9._-]*(:[A-Za-z_][A-Za-z0-9._-]*)?$").unwrap());

/// Change frequency hints from the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// The page changes every time it is accessed.
    Always,
    /// The page changes hourly.
    Hourly,
    /// The page changes daily.
    Daily,
    /// The page changes weekly.
    Weekly,
    /// The page changes monthly.
    Monthly,
    /// The page changes yearly.
    Yearly,
    /// The page is archived and will not change.
    Never,
}

impl ChangeFrequency {
    /// All tokens in protocol order.
    pub const ALL: [Self; 7] = [
        Self::Always,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Never,
    ];

    /// The token as written in XML.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = ValidationError;

    /// Tokens are matched exactly; `Weekly` is not `weekly`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    Field::Changefreq.as_str(),
                    s,
                    "must be one of always, hourly, daily, weekly, monthly, yearly, never",
                )
            })
    }
}

/// A crawl priority in the closed interval `[0.0, 1.0]`.
///
/// Zero is a real value, distinct from "unset".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Priority(f64);

impl Priority {
    /// Lowest accepted priority.
    pub const MIN: Self = Self(0.0);
    /// Highest accepted priority.
    pub const MAX: Self = Self(1.0);

    /// Validate a numeric priority.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::new(
                Field::Priority.as_str(),
                value.to_string(),
                "must be a finite number",
            ));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::new(
                Field::Priority.as_str(),
                value.to_string(),
                "must be between 0.0 and 1.0 inclusive",
            ));
        }
        // `-0.0 + 0.0` is `+0.0`
        Ok(Self(value + 0.0))
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Priority {
    /// One decimal place when exact (`1.0`, `0.5`), otherwise the shortest
    /// representation that parses back to the same value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let one_decimal = format!("{:.1}", self.0);
        if one_decimal.parse::<f64>().ok() == Some(self.0) {
            f.write_str(&one_decimal)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| {
            ValidationError::new(Field::Priority.as_str(), s, "must be a number")
        })?;
        Self::new(value).map_err(|mut issue| {
            issue.value = s.to_string();
            issue
        })
    }
}

/// Check a `loc` value: an `http://` or `https://` URL shorter than 2048
/// characters, without whitespace.
pub fn validate_loc(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() >= MAX_LOC_LEN {
        return Err(ValidationError::new(
            Field::Loc.as_str(),
            value,
            format!("must be shorter than {MAX_LOC_LEN} characters"),
        ));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::new(
            Field::Loc.as_str(),
            value,
            "must not contain whitespace",
        ));
    }
    if !LOC_SCHEME_RE.is_match(value) {
        return Err(ValidationError::new(
            Field::Loc.as_str(),
            value,
            "must be a fully qualified http:// or https:// URL",
        ));
    }
    Ok(())
}

/// Check a `lastmod` value: `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS+HH:MM`
/// naming a real calendar date (and time).
pub fn validate_lastmod(value: &str) -> Result<(), ValidationError> {
    let reject = |reason: &str| ValidationError::new(Field::Lastmod.as_str(), value, reason);

    if DATE_RE.is_match(value) {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| reject("is not a valid calendar date"))
    } else if DATETIME_RE.is_match(value) {
        DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%:z")
            .map(|_| ())
            .map_err(|_| reject("is not a valid date-time"))
    } else {
        Err(reject(
            "must be YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS+HH:MM",
        ))
    }
}

/// Check the name of an opaque extension field.
pub fn validate_extension_name(name: &str) -> Result<(), ValidationError> {
    if XML_NAME_RE.is_match(name) && name != "url" {
        Ok(())
    } else {
        Err(ValidationError::new(
            name,
            name,
            "is not a usable XML element name",
        ))
    }
}
