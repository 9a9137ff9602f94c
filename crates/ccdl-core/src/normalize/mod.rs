//! Code/name normalization: raw catalog entries → canonical sub-product keys.
//!
//! Catalog codes and names embed version tokens inconsistently. The rules
//! here strip them so every release of a sub-product lands on one key. They
//! are heuristics tuned to observed catalog strings, applied in a fixed
//! order (see [`code::CODE_RULES`]).

mod code;
mod name;

pub use code::{client_code, normalize_code, CodeRule, CODE_RULES};
pub use name::normalize_name;

use crate::source::DlgType;

/// Family whose product names carry version runs in arbitrary positions.
pub const HORIZON_SLUG: &str = "vmware_horizon";
/// Family whose driver editions get a readable "Driver - ..." label.
pub const VSPHERE_SLUG: &str = "vmware_vsphere";
/// Edition group name that marks driver bundles.
pub const DRIVER_CDS_GROUP: &str = "Driver CDs";

/// Classification of an edition group, driving which rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditionKind {
    /// Primary product binaries: all heuristics apply.
    ProductBinary,
    /// "Driver CDs" edition group: codes kept, vSphere names relabelled.
    DriverCds,
    DriversTools,
    CustomIso,
    Addons,
}

impl EditionKind {
    /// Classifies an edition group listed under `dlg_type`.
    pub fn classify(dlg_type: DlgType, group_name: &str) -> Self {
        if group_name == DRIVER_CDS_GROUP {
            return EditionKind::DriverCds;
        }
        match dlg_type {
            DlgType::ProductBinary => EditionKind::ProductBinary,
            DlgType::DriversTools => EditionKind::DriversTools,
            DlgType::CustomIso => EditionKind::CustomIso,
            DlgType::Addons => EditionKind::Addons,
        }
    }

    pub fn is_product_binary(self) -> bool {
        self == EditionKind::ProductBinary
    }
}
