//! Session pricing.
//!
//! Ties the classifier, the seating split and the rate tables together.
//! The total is accumulated line by line in a fixed order (VR, MetaBat,
//! then the regime table's own device order) so that fractional amounts
//! come out identical on every caller: the booking screen's preview, the
//! session charge and the extension quote all call into here.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::prelude::*;
use tracing::debug;

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DeviceSelection, DeviceType, PriceLine, PriceQuote,
    PricingRegime,
};

use super::fallback::fallback_price;
use super::flat_rate::price_flat_rate_devices;
use super::fun_night::price_fun_night;
use super::happy_hour::price_happy_hour;
use super::normal_hour::price_normal_hour;
use super::price_lines::duration_minutes;
use super::time_classifier::classify;
use super::{PeopleAllocation, allocate_people};

/// Rounds an engine amount to `places` decimal places, half away from zero.
///
/// With `places = 0` this matches how receipts show prices in whole rupees.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(224.5, 0), Decimal::new(225, 0));
/// assert_eq!(round_money(198.00000000000003, 2), Decimal::new(19800, 2));
/// ```
pub fn round_money(amount: f64, places: u32) -> Decimal {
    Decimal::from_f64(amount)
        .unwrap_or_default()
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the price of a session.
///
/// `at` is local wall-clock time. `duration_hours` and `people_count` are
/// used as given; callers coerce missing or zero values before calling.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::calculate_session_price;
/// use lounge_engine::models::{DeviceSelection, DeviceType};
/// use chrono::NaiveDateTime;
///
/// // Tuesday 10:00 is Happy Hour: 3 people on one PS for 90 minutes.
/// let at = NaiveDateTime::parse_from_str("2026-01-13 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let devices = DeviceSelection::new().with(DeviceType::Ps, vec![1]);
/// assert_eq!(calculate_session_price(1.5, 3, &devices, at), 225.0);
/// ```
pub fn calculate_session_price(
    duration_hours: f64,
    people_count: i64,
    devices: &DeviceSelection,
    at: NaiveDateTime,
) -> f64 {
    quote_session(duration_hours, people_count, devices, at).amount
}

/// Prices a session and returns the itemised quote with its audit trace.
pub fn quote_session(
    duration_hours: f64,
    people_count: i64,
    devices: &DeviceSelection,
    at: NaiveDateTime,
) -> PriceQuote {
    let minutes = duration_minutes(duration_hours);
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    // Step 1: regime
    let flags = classify(at);
    let regime = flags.active_regime();
    steps.push(AuditStep {
        step_number: 1,
        rule_id: "time_classification".to_string(),
        rule_name: "Pricing Regime".to_string(),
        input: serde_json::json!({
            "priced_at": at.to_string(),
            "weekday": at.weekday().to_string(),
            "hour": at.hour(),
            "minute": at.minute(),
        }),
        output: serde_json::json!({
            "is_happy_hour": flags.is_happy_hour,
            "is_normal_hour": flags.is_normal_hour,
            "is_fun_night": flags.is_fun_night,
            "regime": regime,
        }),
        reasoning: format!("{} {:02}:{:02} prices as {}", at.weekday(), at.hour(), at.minute(), regime),
    });

    // Step 2: seating
    let allocation = allocate_people(people_count, devices);
    steps.push(allocation_step(2, people_count, devices, &allocation));
    if allocation.has_idle_console() {
        warnings.push(AuditWarning {
            code: "IDLE_CONSOLE".to_string(),
            message: format!(
                "{} people leave {} of {} PS consoles empty after single-seat machines",
                people_count,
                allocation.ps_occupants.iter().filter(|p| **p == 0).count(),
                allocation.ps_occupants.len()
            ),
        });
    }

    // Step 3: VR/MetaBat, charged under every regime
    let mut lines = price_flat_rate_devices(minutes, devices);
    let flat_total = sum_lines(&lines);
    if !lines.is_empty() {
        steps.push(lines_step(
            3,
            "flat_rate_devices",
            "VR/MetaBat Tiered Rate",
            minutes,
            &lines,
            flat_total,
        ));
    }

    // Step 4: regime table
    let regime_lines = match regime {
        PricingRegime::HappyHour => price_happy_hour(duration_hours, &allocation, devices),
        PricingRegime::Normal => price_normal_hour(duration_hours, &allocation, devices),
        PricingRegime::FunNight => price_fun_night(duration_hours, &allocation, devices),
        PricingRegime::Unclassified => Vec::new(),
    };
    let step_number = steps.len() as u32 + 1;
    if regime != PricingRegime::Unclassified {
        let regime_total = sum_lines(&regime_lines);
        steps.push(lines_step(
            step_number,
            regime_rule_id(regime),
            &format!("{} Rates", regime),
            minutes,
            &regime_lines,
            regime_total,
        ));
    }
    lines.extend(regime_lines);

    let mut amount = sum_lines(&lines);
    let mut fallback = None;

    if regime == PricingRegime::Unclassified {
        warnings.push(AuditWarning {
            code: "UNCLASSIFIED_TIME".to_string(),
            message: format!("No pricing regime covers {}", at.time()),
        });

        fallback = fallback_price(duration_hours, people_count, amount, devices);
        let step_number = steps.len() as u32 + 1;
        match &fallback {
            Some(charge) => {
                amount = charge.amount;
                steps.push(AuditStep {
                    step_number,
                    rule_id: "fallback_rate".to_string(),
                    rule_name: "Flat Per-Person Rate".to_string(),
                    input: serde_json::json!({
                        "duration_hours": duration_hours,
                        "people_count": people_count,
                    }),
                    output: serde_json::json!({
                        "rate": charge.rate,
                        "amount": charge.amount,
                    }),
                    reasoning: format!(
                        "No regime and nothing charged: {} hours × {} people × {} = {}",
                        duration_hours, people_count, charge.rate, charge.amount
                    ),
                });
            }
            None => {
                steps.push(AuditStep {
                    step_number,
                    rule_id: "fallback_rate".to_string(),
                    rule_name: "Flat Per-Person Rate".to_string(),
                    input: serde_json::json!({
                        "running_total": amount,
                        "machines": devices.total_machines(),
                    }),
                    output: serde_json::json!({ "applied": false }),
                    reasoning: "Fallback skipped: machines already charged or none selected"
                        .to_string(),
                });
            }
        }
    }

    debug!(
        regime = %regime,
        duration_hours,
        people_count,
        machines = devices.total_machines(),
        amount,
        "Priced session"
    );

    PriceQuote {
        duration_hours,
        people_count,
        priced_at: at,
        regime,
        ps_occupants: allocation.ps_occupants,
        lines,
        fallback,
        amount,
        display_amount: round_money(amount, 0),
        audit_trace: AuditTrace { steps, warnings },
    }
}

/// Sums line amounts in order, starting from zero.
fn sum_lines(lines: &[PriceLine]) -> f64 {
    lines.iter().fold(0.0, |total, line| total + line.amount)
}

fn regime_rule_id(regime: PricingRegime) -> &'static str {
    match regime {
        PricingRegime::HappyHour => "happy_hour_rates",
        PricingRegime::Normal => "normal_hour_rates",
        PricingRegime::FunNight => "fun_night_rates",
        PricingRegime::Unclassified => "fallback_rate",
    }
}

fn allocation_step(
    step_number: u32,
    people_count: i64,
    devices: &DeviceSelection,
    allocation: &PeopleAllocation,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "people_allocation".to_string(),
        rule_name: "Seat Allocation".to_string(),
        input: serde_json::json!({
            "people_count": people_count,
            "single_seat_machines": devices.single_seat_count(),
            "ps_consoles": devices.count(DeviceType::Ps),
        }),
        output: serde_json::json!({
            "ps_people": allocation.ps_people,
            "ps_occupants": allocation.ps_occupants,
        }),
        reasoning: format!(
            "{} single-seat machines take one person each; {} left for {} PS consoles",
            allocation.single_seat_people,
            allocation.ps_people,
            devices.count(DeviceType::Ps)
        ),
    }
}

fn lines_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    duration_minutes: f64,
    lines: &[PriceLine],
    total: f64,
) -> AuditStep {
    let charged: Vec<String> = lines
        .iter()
        .map(|line| match line.machine_id {
            Some(id) => format!("{} #{} ({} people) = {}", line.device, id, line.occupants, line.amount),
            None => format!("{} × {} @ {} = {}", line.machines, line.device, line.unit_price, line.amount),
        })
        .collect();

    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({ "duration_minutes": duration_minutes }),
        output: serde_json::json!({
            "lines": lines.len(),
            "amount": total,
        }),
        reasoning: if charged.is_empty() {
            "Nothing to charge".to_string()
        } else {
            charged.join("; ")
        },
    }
}
