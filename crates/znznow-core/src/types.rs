//! Domain types shared across the agreement platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Commission tier selected by the vendor.
///
/// The mapping is deliberately binary: the literal code `growth` selects the
/// 25% tier, and every other submitted value (including an empty one) falls
/// through to the 30% strategic tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnershipLevel {
    /// Growth partner, 25% commission.
    Growth,
    /// Strategic partner, 30% commission.
    Strategic,
}

impl PartnershipLevel {
    /// Map a submitted level code onto a tier.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code == "growth" {
            Self::Growth
        } else {
            Self::Strategic
        }
    }

    /// Commission percentage for this tier.
    #[must_use]
    pub const fn commission_percent(self) -> u32 {
        match self {
            Self::Growth => 25,
            Self::Strategic => 30,
        }
    }

    /// Human-readable tier name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Growth => "Growth Partner",
            Self::Strategic => "Strategic Partner",
        }
    }
}

impl fmt::Display for PartnershipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}% Commission)",
            self.label(),
            self.commission_percent()
        )
    }
}

/// Lifecycle status of an agreement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    /// Submitted but not yet signed.
    Pending,
    /// Signed by the vendor.
    Signed,
}

impl AgreementStatus {
    /// The stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Signed => "signed",
        }
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "signed" => Some(Self::Signed),
            _ => None,
        }
    }
}

impl fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated vendor agreement payload.
///
/// Only `vendor_name`, `vendor_email`, `vendor_registration` and
/// `contact_person` are mandatory at the HTTP boundary; the remaining fields
/// default to empty strings, which both the renderer and the store accept
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementForm {
    /// Registered business name.
    pub vendor_name: String,
    /// Contact email address.
    pub vendor_email: String,
    /// Business registration number.
    pub vendor_registration: String,
    /// Street address.
    #[serde(default)]
    pub vendor_address: String,
    /// City or region.
    #[serde(default)]
    pub vendor_city: String,
    /// Country.
    #[serde(default)]
    pub vendor_country: String,
    /// Contact phone number.
    #[serde(default)]
    pub vendor_phone: String,
    /// Primary contact person, who also signs for the vendor.
    pub contact_person: String,
    /// Title of the contact person.
    #[serde(default)]
    pub contact_title: String,
    /// Submitted partnership level code, stored verbatim.
    #[serde(default)]
    pub partnership_level: String,
    /// Effective date as submitted.
    #[serde(default)]
    pub effective_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_maps_to_25() {
        let level = PartnershipLevel::from_code("growth");
        assert_eq!(level, PartnershipLevel::Growth);
        assert_eq!(level.commission_percent(), 25);
        assert_eq!(level.to_string(), "Growth Partner (25% Commission)");
    }

    #[test]
    fn everything_else_maps_to_30() {
        for code in ["strategic", "platinum", "", "Growth", "GROWTH"] {
            let level = PartnershipLevel::from_code(code);
            assert_eq!(level, PartnershipLevel::Strategic, "code {code:?}");
            assert_eq!(level.commission_percent(), 30);
        }
        assert_eq!(
            PartnershipLevel::Strategic.to_string(),
            "Strategic Partner (30% Commission)"
        );
    }

    #[test]
    fn status_string_round_trip() {
        assert_eq!(
            AgreementStatus::parse(AgreementStatus::Pending.as_str()),
            Some(AgreementStatus::Pending)
        );
        assert_eq!(
            AgreementStatus::parse(AgreementStatus::Signed.as_str()),
            Some(AgreementStatus::Signed)
        );
        assert_eq!(AgreementStatus::parse("delivered"), None);
    }
}
