//! Controller name casing.
//!
//! URIs carry route-style names (`default_page`); the registry keys controllers
//! by type-style names (`DefaultPage`). A [`CaseTransformer`] bridges the two.
//! [`CaseStrategy`] is the built-in, configuration-selectable set.

use std::fmt;
use std::str::FromStr;

use frontdesk_model::InvalidNameError;

/// Turns a validated route segment into the name the registry knows.
pub trait CaseTransformer: Send + Sync {
    /// Transform `raw`, which already satisfies the identifier grammar.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] when the name is ambiguous under this strategy.
    fn transform(&self, raw: &str) -> Result<String, InvalidNameError>;
}

/// Built-in casing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStrategy {
    /// `MyController` -> `mycontroller`.
    LowerCase,
    /// `myCONTROLLER` -> `Mycontroller`.
    UpperCaseFirst,
    /// `my_controller` -> `myController`.
    CamelCase,
    /// `my_controller` -> `MyController`.
    #[default]
    CamelCaseWithFirstUpper,
}

impl CaseStrategy {
    /// Configuration name of the strategy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowerCase => "lower_case",
            Self::UpperCaseFirst => "upper_case_first",
            Self::CamelCase => "camel_case",
            Self::CamelCaseWithFirstUpper => "camel_case_with_first_upper",
        }
    }
}

impl fmt::Display for CaseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown case strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown case strategy: {0}")]
pub struct UnknownCaseStrategy(pub String);

impl FromStr for CaseStrategy {
    type Err = UnknownCaseStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower_case" => Ok(Self::LowerCase),
            "upper_case_first" => Ok(Self::UpperCaseFirst),
            "camel_case" => Ok(Self::CamelCase),
            "camel_case_with_first_upper" => Ok(Self::CamelCaseWithFirstUpper),
            other => Err(UnknownCaseStrategy(other.to_owned())),
        }
    }
}

impl CaseTransformer for CaseStrategy {
    fn transform(&self, raw: &str) -> Result<String, InvalidNameError> {
        match self {
            Self::LowerCase => Ok(lower_case(raw)),
            Self::UpperCaseFirst => Ok(upper_case_first(raw)),
            Self::CamelCase => camel_case(raw, false),
            Self::CamelCaseWithFirstUpper => camel_case(raw, true),
        }
    }
}

/// Lowercase every ASCII letter.
#[must_use]
pub fn lower_case(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Lowercase, then uppercase the first character.
#[must_use]
pub fn upper_case_first(name: &str) -> String {
    let mut lowered = lower_case(name);
    if let Some(first) = lowered.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    lowered
}

/// Lowercase, optionally uppercase the first character, then drop each `_` and
/// uppercase the character following it.
///
/// # Errors
///
/// Returns [`InvalidNameError`] if two underscores are adjacent, since
/// `a__b` and `a_b` would otherwise collapse to the same name.
///
/// # Examples
///
/// ```
/// use frontdesk_core::caser::camel_case;
///
/// assert_eq!(camel_case("my_other_controller", false).unwrap(), "myOtherController");
/// assert!(camel_case("a__b", false).is_err());
/// ```
pub fn camel_case(name: &str, uc_first: bool) -> Result<String, InvalidNameError> {
    let lowered = if uc_first {
        upper_case_first(name)
    } else {
        lower_case(name)
    };

    if !lowered.contains('_') {
        return Ok(lowered);
    }

    let mut cased = String::with_capacity(lowered.len());
    let mut upper_next = false;
    for c in lowered.chars() {
        if c == '_' {
            if upper_next {
                return Err(InvalidNameError::new(lowered));
            }
            upper_next = true;
            continue;
        }

        if upper_next {
            cased.push(c.to_ascii_uppercase());
        } else {
            cased.push(c);
        }
        upper_next = false;
    }

    Ok(cased)
}
