//! Fixed contract boilerplate rendered into every agreement.
//!
//! This text is static by design. It is never derived from the submitted
//! payload and must not be templated beyond the commission line in the
//! partnership section, which the renderer produces separately.

/// The key terms, rendered verbatim in section 3 of every document.
///
/// Each entry is a bolded clause label plus its text.
pub const KEY_TERMS: &[(&str, &str)] = &[
    (
        "Commission Structure",
        "Commission is calculated as Selling Price minus Commission Percentage equals \
         Net Earnings. Different tours can have different commission rates based on \
         agreement.",
    ),
    (
        "Payment Terms",
        "Weekly settlements via bank transfer or mobile wallet. Automatic payouts every \
         week or when balance reaches USD $1,000. Clear statements showing bookings, \
         sales, commissions, and final balance.",
    ),
    (
        "Price Parity",
        "Vendor agrees to maintain price parity between Znznow platform and direct \
         offers. No lower prices to customers who discovered through platform.",
    ),
    (
        "Booking Management",
        "Vendor shall accept and prepare bookings unless justified reason to cancel \
         (capacity, safety, force majeure).",
    ),
    (
        "Responsibilities",
        "Vendor provides accurate tour information, high-quality photos, maintains \
         operating hours and availability, and delivers services professionally.",
    ),
    (
        "Termination",
        "Either party may terminate with 15 days' written notice or immediately for \
         material breach.",
    ),
    (
        "Confidentiality",
        "Both parties treat commercial data as confidential for 2 years after \
         termination.",
    ),
    (
        "Dispute Resolution",
        "Disputes resolved through mediation first, then arbitration in Zanzibar, \
         Tanzania.",
    ),
    (
        "Governing Law",
        "This agreement is governed by the laws of Zanzibar, Tanzania.",
    ),
];

/// Closing acknowledgement line under the signature blocks.
pub const ACKNOWLEDGEMENT: &str =
    "I have read and agree to all terms and conditions outlined in this agreement.";
