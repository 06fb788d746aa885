//! Loading and structural validation of unattended config files.
//!
//! The loader makes exactly one pass over the file's sections in
//! declaration order, so diagnostics always name sections by their
//! position in the file, and the first structural violation in file order
//! wins. Unknown sections and keys are ignored for forward compatibility;
//! only sections named `Computer <digits>` count as computer matchers, so
//! something like `[Computer notes]` is an unknown section, not a
//! malformed matcher.

use super::model::{Config, ComputerMatcher, DeviceMatcher, ImageSpec};
use crate::error::{ComputerKey, ImageError, LoadError};
use crate::keyfile::Keyfile;
use std::fs;
use std::io;
use std::path::Path;

/// Section holding top-level settings such as `locale`.
pub const SETTINGS_SECTION: &str = "Unattended";
/// Section describing the image to install.
pub const IMAGE_SECTION: &str = "Image";
/// Prefix of the ordinal computer-matching sections (`Computer 1`, ...).
pub const COMPUTER_SECTION_PREFIX: &str = "Computer ";

pub const LOCALE_KEY: &str = "locale";
pub const VENDOR_KEY: &str = "vendor";
pub const PRODUCT_KEY: &str = "product";
pub const FILENAME_KEY: &str = "filename";
pub const BLOCK_DEVICE_KEY: &str = "block-device";

impl Config {
    /// Load and validate an unattended config from `path`.
    ///
    /// A missing file is reported as [`LoadError::NotFound`] because "no
    /// unattended config present" is a normal outcome for the installer;
    /// everything else (unreadable path, invalid UTF-8, malformed keyfile,
    /// structural violations) is a domain error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound(e)
            } else {
                LoadError::Read {
                    path: path.to_owned(),
                    source: e.into(),
                }
            }
        })?;

        let text = std::str::from_utf8(&bytes).map_err(|e| LoadError::Read {
            path: path.to_owned(),
            source: e.into(),
        })?;

        let keyfile = Keyfile::parse(text).map_err(|e| LoadError::Read {
            path: path.to_owned(),
            source: e.into(),
        })?;

        Self::from_keyfile(&keyfile)
    }

    /// Build a validated `Config` from parsed keyfile sections.
    fn from_keyfile(keyfile: &Keyfile) -> Result<Self, LoadError> {
        let locale = keyfile
            .section(SETTINGS_SECTION)
            .and_then(|s| s.get(LOCALE_KEY))
            .map(str::to_owned);

        let mut computers = Vec::new();
        let mut image: Option<ImageSpec> = None;
        let mut computer_ordinal = 0;
        let mut image_ordinal = 0;

        for section in keyfile.sections() {
            if is_computer_section(section.name()) {
                computer_ordinal += 1;
                computers.push(parse_computer(section, computer_ordinal)?);
            } else if section.name() == IMAGE_SECTION {
                image_ordinal += 1;
                if image_ordinal > 1 {
                    // Name every image section in the file, not just the
                    // two seen so far.
                    let total = keyfile
                        .sections()
                        .iter()
                        .filter(|s| s.name() == IMAGE_SECTION)
                        .count();
                    return Err(LoadError::InvalidImage(ImageError::Duplicate {
                        ordinals: (1..=total).collect(),
                    }));
                }
                image = Some(parse_image(section, image_ordinal)?);
            }
        }

        Ok(Config {
            locale,
            computers,
            image,
        })
    }
}

/// True for `Computer <digits>` section names. The number itself is not
/// interpreted; diagnostics use the section's position in the file.
fn is_computer_section(name: &str) -> bool {
    name.strip_prefix(COMPUTER_SECTION_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_computer(
    section: &crate::keyfile::Section,
    ordinal: usize,
) -> Result<ComputerMatcher, LoadError> {
    let vendor = section
        .get(VENDOR_KEY)
        .ok_or(LoadError::InvalidComputer {
            ordinal,
            key: ComputerKey::Vendor,
        })?;
    let product = section
        .get(PRODUCT_KEY)
        .ok_or(LoadError::InvalidComputer {
            ordinal,
            key: ComputerKey::Product,
        })?;

    Ok(ComputerMatcher {
        vendor: vendor.to_owned(),
        product: product.to_owned(),
    })
}

fn parse_image(section: &crate::keyfile::Section, ordinal: usize) -> Result<ImageSpec, LoadError> {
    let filename = section.get(FILENAME_KEY).map(str::to_owned);

    let device = match section.get(BLOCK_DEVICE_KEY) {
        None => None,
        Some(pattern) => Some(DeviceMatcher::new(pattern).ok_or(LoadError::InvalidImage(
            ImageError::EmptyBlockDevice { ordinal },
        ))?),
    };

    Ok(ImageSpec { filename, device })
}
