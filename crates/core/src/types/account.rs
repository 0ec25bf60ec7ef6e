//! Account scheme types.

use serde::{Deserialize, Serialize};

/// Deposit scheme an account is enrolled in.
///
/// Only recurring deposits are offered today; the enum exists so the wire
/// form stays stable when further schemes are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccountType {
    /// Recurring deposit.
    #[default]
    #[serde(rename = "RD")]
    Rd,
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rd => write!(f, "RD"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form() {
        assert_eq!(serde_json::to_string(&AccountType::Rd).unwrap(), "\"RD\"");
        let back: AccountType = serde_json::from_str("\"RD\"").unwrap();
        assert_eq!(back, AccountType::Rd);
    }
}
