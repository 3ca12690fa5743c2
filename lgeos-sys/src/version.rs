/*
This file is part of the lgeos runtime binding layer
Copyright (C) 2022 Novel-T

The lgeos runtime binding layer is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use std::fmt;

use regex::Regex;

use crate::error::BindError;

/// (major, minor, patch) of either the library or its C API.
///
/// Derived comparison is lexicographic over the fields in declaration order,
/// which is exactly version ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTriple {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        VersionTriple {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// First library version whose exports include the "_r" reentrant variants.
pub const REENTRANT_THRESHOLD: VersionTriple = VersionTriple::new(3, 1, 0);

/// Parsed form of the string returned by `GEOSversion()`.
///
/// Computed exactly once per loaded library and immutable afterwards.
#[derive(Debug, Clone)]
pub struct GeosVersion {
    /// The raw string, e.g. `"3.8.0-CAPI-1.13.1"`.
    pub raw: String,
    /// The library version triple.
    pub library: VersionTriple,
    /// The C API (ABI) version triple.
    pub capi: VersionTriple,
}

impl GeosVersion {
    /// True when the library exports the thread-context ("reentrant") ABI.
    pub fn is_reentrant(&self) -> bool {
        self.library >= REENTRANT_THRESHOLD
    }
}

impl fmt::Display for GeosVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Parse `"<maj>.<min>.<patch>-CAPI-<maj>.<min>.<patch>"`.
///
/// The string must contain exactly two version triples. Anything else is
/// fatal: there is no safe default signature set to fall back to.
pub fn parse_version_string(raw: &str) -> Result<GeosVersion, BindError> {
    let pattern = Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("static version pattern");

    let mut triples = Vec::with_capacity(2);
    for caps in pattern.captures_iter(raw) {
        let parts: Option<Vec<u32>> = (1..=3).map(|i| caps[i].parse().ok()).collect();
        match parts {
            Some(p) => triples.push(VersionTriple::new(p[0], p[1], p[2])),
            None => return Err(BindError::MalformedVersion(raw.to_string())),
        }
    }

    if triples.len() != 2 {
        return Err(BindError::MalformedVersion(raw.to_string()));
    }

    Ok(GeosVersion {
        raw: raw.to_string(),
        library: triples[0],
        capi: triples[1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_string() {
        let v = parse_version_string("3.3.0-CAPI-1.7.0").unwrap();
        assert_eq!(v.library, VersionTriple::new(3, 3, 0));
        assert_eq!(v.capi, VersionTriple::new(1, 7, 0));
        assert!(v.is_reentrant());

        let v = parse_version_string("3.0.0-CAPI-1.4.0").unwrap();
        assert_eq!(v.library, VersionTriple::new(3, 0, 0));
        assert!(!v.is_reentrant());
    }

    #[test]
    fn test_parse_version_with_suffix() {
        // Some builds append revision info after the two triples
        let v = parse_version_string("3.8.0-CAPI-1.13.1 ").unwrap();
        assert_eq!(v.library, VersionTriple::new(3, 8, 0));
        assert_eq!(v.capi, VersionTriple::new(1, 13, 1));
    }

    #[test]
    fn test_parse_rejects_wrong_group_count() {
        assert!(parse_version_string("3.8.0").is_err());
        assert!(parse_version_string("").is_err());
        assert!(parse_version_string("3.8.0-CAPI-1.13.1 r2 4.0.1").is_err());
    }

    #[test]
    fn test_triple_ordering() {
        assert!(VersionTriple::new(3, 1, 0) > VersionTriple::new(3, 0, 9));
        assert!(VersionTriple::new(3, 3, 0) >= REENTRANT_THRESHOLD);
        assert!(VersionTriple::new(3, 0, 0) < REENTRANT_THRESHOLD);
    }
}
