//! Decoding packed version numbers
//!
//! Versions are packed as `major * 1000 + minor * 10 + patch`. Encodings up
//! to and including 190 use the older `major * 100 + minor * 10 + patch`
//! layout, where the minor number has a single digit.

use std::fmt;

const LEGACY_LIMIT: u32 = 190;

pub const fn version_major(version: u32) -> u32 {
    if version <= LEGACY_LIMIT {
        version / 100
    } else {
        version / 1000
    }
}

pub const fn version_minor(version: u32) -> u32 {
    if version <= LEGACY_LIMIT {
        version % 100 / 10
    } else {
        version % 1000 / 10
    }
}

pub const fn version_patch(version: u32) -> u32 {
    version % 10
}

/// Unpacked version triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn from_packed(version: u32) -> Self {
        Self {
            major: version_major(version),
            minor: version_minor(version),
            patch: version_patch(version),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
