//! Configuration model for unattended installations.
//!
//! A [`Config`] is produced wholesale by [`Config::load`](crate::Config::load)
//! and is read-only afterwards; it has no back-reference to the file it
//! came from.

use serde::Serialize;

/// Outcome of asking whether a config's computer constraints cover a
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerMatch {
    /// The file declared no computer constraints at all ("don't care").
    NotSpecified,
    /// At least one declared entry matches the supplied vendor/product.
    Matches,
    /// Constraints were declared and none of them match.
    DoesNotMatch,
}

/// A (vendor, product) pair identifying a class of hardware.
///
/// Case is preserved as authored; comparison happens case-insensitively at
/// match time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputerMatcher {
    pub vendor: String,
    pub product: String,
}

/// A rule selecting block devices, chosen by the pattern's first character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceMatcher {
    /// Pattern began with `/`: the whole device path must be equal.
    ExactPath(String),
    /// Bare pattern: the device path's final component must start with it.
    BasenamePrefix(String),
}

impl DeviceMatcher {
    /// Build a matcher from a pattern string. An empty pattern is
    /// rejected: it would match everything, which omitting the key
    /// already expresses.
    pub fn new(pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            None
        } else if pattern.starts_with('/') {
            Some(DeviceMatcher::ExactPath(pattern.to_owned()))
        } else {
            Some(DeviceMatcher::BasenamePrefix(pattern.to_owned()))
        }
    }

    /// Whether `device_path` satisfies this rule. Matching is purely
    /// textual; symlinks are not resolved.
    pub fn matches(&self, device_path: &str) -> bool {
        match self {
            DeviceMatcher::ExactPath(path) => path == device_path,
            DeviceMatcher::BasenamePrefix(prefix) => {
                let basename = device_path.rsplit('/').next().unwrap_or(device_path);
                basename.starts_with(prefix.as_str())
            }
        }
    }
}

/// The `[Image]` section: which disk image to install, and onto what.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageSpec {
    /// Image file to install; `None` selects no specific image.
    pub filename: Option<String>,
    /// Device constraint; `None` matches every device.
    pub device: Option<DeviceMatcher>,
}

/// An administrator-supplied unattended-installation configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    pub(crate) locale: Option<String>,
    pub(crate) computers: Vec<ComputerMatcher>,
    pub(crate) image: Option<ImageSpec>,
}

impl Config {
    /// The configured locale identifier (e.g. `pt_BR.utf8`), if any.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// The configured image filename, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.filename.as_deref())
    }

    /// Declared computer matchers, in file order.
    pub fn computers(&self) -> &[ComputerMatcher] {
        &self.computers
    }
}
