// dpr-common/src/model/version.rs
//! Bundle-style versions and version ranges.
//!
//! Versions are plain `semver::Version`s, but parsing accepts the shorter
//! forms deployers write in application files (`1`, `1.2`) and the dotted
//! qualifier form (`1.2.3.beta`), which is stored as build metadata so it
//! sorts above the bare release.
//!
//! Ranges use interval notation:
//!
//! ```text
//! [1.0.0,2.0.0)   1.0.0 <= v < 2.0.0
//! (1.0.0,1.5.0]   1.0.0 <  v <= 1.5.0
//! 1.0.0           v >= 1.0.0
//! * or ""         any version
//! ```
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Version};
use serde::{Deserialize, Serialize};

use crate::error::{DprError, Result};

/// Parses a version, padding missing minor/patch segments with zero.
pub fn parse_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DprError::ParseError(
            "version",
            "empty version string".to_string(),
        ));
    }
    if let Ok(version) = Version::parse(trimmed) {
        return Ok(version);
    }

    let mut segments = trimmed.splitn(4, '.');
    let mut numbers = [0u64; 3];
    for slot in numbers.iter_mut() {
        let Some(segment) = segments.next() else {
            break;
        };
        *slot = segment.parse::<u64>().map_err(|_| {
            DprError::ParseError(
                "version",
                format!("'{trimmed}': segment '{segment}' is not numeric"),
            )
        })?;
    }

    let mut version = Version::new(numbers[0], numbers[1], numbers[2]);
    if let Some(qualifier) = segments.next() {
        version.build = BuildMetadata::new(&qualifier.replace('_', "-"))?;
    }
    Ok(version)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    floor: Version,
    floor_inclusive: bool,
    ceiling: Option<(Version, bool)>,
}

impl VersionRange {
    /// Every version satisfies this range.
    pub fn any() -> Self {
        Self::at_least(Version::new(0, 0, 0))
    }

    pub fn at_least(version: Version) -> Self {
        Self {
            floor: version,
            floor_inclusive: true,
            ceiling: None,
        }
    }

    pub fn exact(version: &Version) -> Self {
        Self {
            floor: version.clone(),
            floor_inclusive: true,
            ceiling: Some((version.clone(), true)),
        }
    }

    pub fn floor(&self) -> &Version {
        &self.floor
    }

    pub fn is_exact(&self) -> bool {
        matches!(&self.ceiling, Some((ceiling, true)) if self.floor_inclusive && *ceiling == self.floor)
    }

    pub fn contains(&self, version: &Version) -> bool {
        let above_floor = match version.cmp(&self.floor) {
            Ordering::Greater => true,
            Ordering::Equal => self.floor_inclusive,
            Ordering::Less => false,
        };
        if !above_floor {
            return false;
        }
        match &self.ceiling {
            None => true,
            Some((ceiling, inclusive)) => match version.cmp(ceiling) {
                Ordering::Less => true,
                Ordering::Equal => *inclusive,
                Ordering::Greater => false,
            },
        }
    }

    fn parse_interval(text: &str) -> Result<Self> {
        let invalid = |reason: &str| DprError::ParseError("version range", format!("'{text}': {reason}"));

        let floor_inclusive = match text.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(invalid("interval must start with '[' or '('")),
        };
        let ceiling_inclusive = match text.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(invalid("interval must end with ']' or ')'")),
        };
        let inner = &text[1..text.len() - 1];
        let Some((floor, ceiling)) = inner.split_once(',') else {
            return Err(invalid("interval needs a floor and a ceiling separated by ','"));
        };
        if floor.trim().is_empty() {
            return Err(invalid("interval floor is empty"));
        }

        let floor = parse_version(floor)?;
        let ceiling = if ceiling.trim().is_empty() {
            None
        } else {
            let ceiling = parse_version(ceiling)?;
            match floor.cmp(&ceiling) {
                Ordering::Greater => return Err(invalid("floor is above ceiling")),
                Ordering::Equal if !(floor_inclusive && ceiling_inclusive) => {
                    return Err(invalid("interval excludes its only version"))
                }
                _ => {}
            }
            Some((ceiling, ceiling_inclusive))
        };

        Ok(Self {
            floor,
            floor_inclusive,
            ceiling,
        })
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self::any()
    }
}

impl FromStr for VersionRange {
    type Err = DprError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.is_empty() || text == "*" {
            return Ok(Self::any());
        }
        if text.starts_with('[') || text.starts_with('(') {
            return Self::parse_interval(text);
        }
        parse_version(text).map(Self::at_least)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ceiling {
            None if self.floor_inclusive => write!(f, "{}", self.floor),
            None => write!(f, "({},)", self.floor),
            Some((ceiling, ceiling_inclusive)) => write!(
                f,
                "{}{},{}{}",
                if self.floor_inclusive { '[' } else { '(' },
                self.floor,
                ceiling,
                if *ceiling_inclusive { ']' } else { ')' }
            ),
        }
    }
}

impl TryFrom<String> for VersionRange {
    type Error = DprError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<VersionRange> for String {
    fn from(range: VersionRange) -> Self {
        range.to_string()
    }
}
