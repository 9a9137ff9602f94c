//! License-tier duplication for dual-licensed families.
//!
//! NSX and NSX-T ship a "Limited Edition" tier under the same upstream
//! download-group code. Releases of that tier are tagged by an `-LE` id
//! suffix. The expander derives a separate `<code>_le` sub-product, and the
//! partition filter keeps the two version spaces disjoint.

use crate::source::CatalogEntry;

use super::{upsert, SubProductIndex};

/// Canonical codes published under two license tiers.
pub const DUAL_LICENSED: [&str; 2] = ["nsx", "nsx-t"];
/// Appended to a canonical code to name its license-tier sibling.
pub const TIER_CODE_SUFFIX: &str = "_le";
/// Suffix marking upstream codes and release ids of the license tier.
pub const TIER_ID_MARKER: &str = "-LE";
const TIER_LABEL: &str = " Limited Edition";

pub fn is_dual_licensed(code: &str) -> bool {
    DUAL_LICENSED.iter().any(|c| *c == code)
}

/// `nsx` → `nsx_le`.
pub fn tier_code(code: &str) -> String {
    format!("{code}{TIER_CODE_SUFFIX}")
}

/// Records the license-tier copy of `record` under `<code>_le` for
/// `major_version`. No-op unless `code` is dual-licensed.
pub fn expand(
    index: &mut SubProductIndex,
    code: &str,
    name: &str,
    major_version: &str,
    record: &CatalogEntry,
) {
    if !is_dual_licensed(code) {
        return;
    }
    let tier = CatalogEntry {
        name: format!("{}{TIER_LABEL}", record.name),
        code: format!("{}{TIER_ID_MARKER}", record.code),
        ..record.clone()
    };
    upsert(
        index,
        &tier_code(code),
        &format!("{name}{TIER_LABEL}"),
        major_version,
        tier,
    );
}

/// Partition filter for release listings.
///
/// Non dual-licensed sub-products keep every release; the base code keeps
/// only untagged ids and the `_le` sibling only `-LE` ids.
pub fn include_release(sub_product_code: &str, release_id: &str) -> bool {
    let tagged = release_id.ends_with(TIER_ID_MARKER);
    if is_dual_licensed(sub_product_code) {
        return !tagged;
    }
    match sub_product_code.strip_suffix(TIER_CODE_SUFFIX) {
        Some(base) if is_dual_licensed(base) => tagged,
        _ => true,
    }
}
