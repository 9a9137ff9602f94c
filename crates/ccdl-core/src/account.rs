//! Account details of the established portal session.

use serde::{Deserialize, Serialize};

/// `ems/accountinfo`: user type and the entitlement accounts of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub user_type: String,
    #[serde(default, rename = "accntList")]
    pub accounts: Vec<EntitlementAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementAccount {
    #[serde(default)]
    pub ea_number: String,
    #[serde(default)]
    pub ea_name: String,
    /// Upstream sends this flag as a string.
    #[serde(default)]
    pub is_default: String,
}

impl EntitlementAccount {
    pub fn is_default_account(&self) -> bool {
        self.is_default.eq_ignore_ascii_case("true")
    }
}

impl AccountInfo {
    pub fn default_account(&self) -> Option<&EntitlementAccount> {
        self.accounts.iter().find(|a| a.is_default_account())
    }
}

/// `vmwauth/loggedinuser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default, rename = "firstname")]
    pub first_name: String,
    #[serde(default, rename = "lastname")]
    pub last_name: String,
}
