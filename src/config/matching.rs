//! Matching predicates used by the installer's flow decisions.

use super::model::{Config, ComputerMatch};

impl Config {
    /// Does this config apply to a machine with the given DMI vendor and
    /// product strings?
    ///
    /// With no `[Computer N]` sections at all the answer is
    /// [`ComputerMatch::NotSpecified`]: the administrator didn't care which
    /// machine this is, which is distinct from declaring constraints that
    /// fail. Otherwise one entry must match on both fields
    /// (case-insensitively); entries are alternatives. A `None` vendor or
    /// product never matches a declared entry.
    pub fn match_computer(&self, vendor: Option<&str>, product: Option<&str>) -> ComputerMatch {
        if self.computers.is_empty() {
            return ComputerMatch::NotSpecified;
        }

        let (Some(vendor), Some(product)) = (vendor, product) else {
            return ComputerMatch::DoesNotMatch;
        };

        let matched = self.computers.iter().any(|computer| {
            computer.vendor.eq_ignore_ascii_case(vendor)
                && computer.product.eq_ignore_ascii_case(product)
        });

        if matched {
            ComputerMatch::Matches
        } else {
            ComputerMatch::DoesNotMatch
        }
    }

    /// Should the configured image be written to the given block device?
    ///
    /// True when no image or no device constraint is configured.
    pub fn matches_device(&self, device_path: &str) -> bool {
        match self.image.as_ref().and_then(|image| image.device.as_ref()) {
            None => true,
            Some(matcher) => matcher.matches(device_path),
        }
    }
}
