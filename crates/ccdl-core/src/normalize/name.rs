//! Sub-product display name rules.

use regex::Regex;
use std::sync::LazyLock;

use super::code::strip_trailing_version_run;
use super::{EditionKind, HORIZON_SLUG, VSPHERE_SLUG};

static NUMERIC_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9.,]+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static ESXI_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"VMware ESXi [0-9]+.[0-9]+ ").unwrap());

const DRIVER_LABEL: &str = "Driver - ";

/// Human-readable sub-product name for a raw catalog name.
pub fn normalize_name(raw_name: &str, slug: &str, kind: EditionKind) -> String {
    match kind {
        EditionKind::DriverCds if slug == VSPHERE_SLUG => driver_name(raw_name),
        EditionKind::ProductBinary if slug == HORIZON_SLUG => horizon_name(raw_name),
        EditionKind::ProductBinary => strip_trailing_version_run(raw_name).trim().to_string(),
        _ => raw_name.to_string(),
    }
}

/// Horizon names carry version runs anywhere, so every numeric run goes.
fn horizon_name(name: &str) -> String {
    let stripped = NUMERIC_RUN.replace_all(name, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

fn driver_name(name: &str) -> String {
    let labelled = format!("{DRIVER_LABEL}{}", ESXI_PREFIX.replace_all(name, ""));
    strip_trailing_version_run(&labelled).trim().to_string()
}
