//! Logical purpose of an outbound message.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a message is being sent. Each usage type maps to one provider template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UsageType {
    /// Account registration
    Register,
    /// Passwordless sign-in
    SignIn,
    /// Password reset
    ForgotPassword,
    /// Any other verification flow
    Generic,
    /// Test message sent while configuring the connector
    Test,
}

impl UsageType {
    /// Usage types every connector configuration must provide a template for
    pub const REQUIRED: [UsageType; 3] = [
        UsageType::Register,
        UsageType::SignIn,
        UsageType::ForgotPassword,
    ];

    /// All usage types, in declaration order
    pub const ALL: [UsageType; 5] = [
        UsageType::Register,
        UsageType::SignIn,
        UsageType::ForgotPassword,
        UsageType::Generic,
        UsageType::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageType::Register => "Register",
            UsageType::SignIn => "SignIn",
            UsageType::ForgotPassword => "ForgotPassword",
            UsageType::Generic => "Generic",
            UsageType::Test => "Test",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|usage| usage.as_str() == s)
            .ok_or_else(|| format!("Unknown usage type: {}", s))
    }
}
