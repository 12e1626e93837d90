//! Price quote models.
//!
//! This module contains the [`PriceQuote`] type and its associated structures
//! that capture every output of a pricing call: the regime that applied, the
//! PS seating split, itemised price lines and an audit trace.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeviceType;

/// The pricing regime active at a point in local time.
///
/// # Example
///
/// ```
/// use lounge_engine::models::PricingRegime;
///
/// let json = serde_json::to_string(&PricingRegime::FunNight).unwrap();
/// assert_eq!(json, "\"fun_night\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingRegime {
    /// Discounted daytime rates.
    HappyHour,
    /// Standard afternoon/evening rates.
    Normal,
    /// Late night rates, 21:00 to 06:00.
    FunNight,
    /// No named regime matches; the flat per-person fallback may apply.
    #[serde(rename = "none")]
    Unclassified,
}

impl std::fmt::Display for PricingRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingRegime::HappyHour => write!(f, "Happy Hour"),
            PricingRegime::Normal => write!(f, "Normal Hour"),
            PricingRegime::FunNight => write!(f, "Fun Night"),
            PricingRegime::Unclassified => write!(f, "Unclassified"),
        }
    }
}

/// The rate table a price line was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateCard {
    /// VR/MetaBat tiered rate, independent of the time of day.
    Flat,
    /// Happy Hour table.
    HappyHour,
    /// Normal Hour table.
    NormalHour,
    /// Fun Night table.
    FunNight,
}

/// A single itemised charge in a quote.
///
/// PS lines are one per machine (their price depends on occupancy); every
/// other device type is charged as one line covering all its machines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    /// The device type charged.
    pub device: DeviceType,
    /// The table the price came from.
    pub rate_card: RateCard,
    /// The machine ID for per-machine (PS) lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<u32>,
    /// Number of machines covered by this line.
    pub machines: u32,
    /// Occupants per machine.
    pub occupants: u64,
    /// Price of one machine.
    pub unit_price: f64,
    /// Line total.
    pub amount: f64,
}

/// The flat per-person-hour charge used when no regime matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackCharge {
    /// Session length in hours.
    pub hours: f64,
    /// Headcount charged.
    pub people: i64,
    /// Rate per person per hour.
    pub rate: f64,
    /// `hours * people * rate`.
    pub amount: f64,
}

/// A single step in the audit trace recording a pricing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning raised while pricing.
///
/// Warnings never change the price; they flag inputs the caller may want to
/// double-check, such as a console left with nobody seated at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete audit trace for a quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// All rule applications, in order.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// The itemised result of pricing a session.
///
/// `amount` is the exact engine output. `display_amount` is that value
/// rounded to whole rupees for receipts and screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Session length in hours, as passed in.
    pub duration_hours: f64,
    /// Headcount, as passed in.
    pub people_count: i64,
    /// Local wall-clock time the regime was resolved against.
    pub priced_at: NaiveDateTime,
    /// The regime that priced the session.
    pub regime: PricingRegime,
    /// Occupants per selected PS machine, in selection order.
    pub ps_occupants: Vec<u64>,
    /// Itemised charges, in the order they were added.
    pub lines: Vec<PriceLine>,
    /// Present when the flat fallback replaced the itemised charges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackCharge>,
    /// The session price.
    pub amount: f64,
    /// The session price rounded for display.
    pub display_amount: Decimal,
    /// Rule-by-rule trace of the calculation.
    pub audit_trace: AuditTrace,
}

/// The charge for extending a running session or adding people to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionQuote {
    /// What the session had been charged before the change.
    pub previous_amount: f64,
    /// The additional charge, never negative.
    pub charge: f64,
    /// The additional charge rounded for display.
    pub display_charge: Decimal,
    /// Quote for the session as it stands after the change.
    pub quote: PriceQuote,
}
