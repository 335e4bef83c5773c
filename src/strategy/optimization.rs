// src/strategy/optimization.rs

//! Inventory policy formulas.
//!
//! Pure functions over plain numbers. Every function returns a finite,
//! non-negative value: degenerate arithmetic (zero holding cost, zero lead
//! time, missing demand) is clamped here so no NaN reaches a policy table.

/// Weeks per year used to annualise weekly demand.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Lower bound applied to lead time (in weeks) inside the square root of the
/// safety stock formula, so a zero lead time does not erase the variability term.
pub const MIN_LEAD_TIME_WEEKS: f64 = 1e-6;

/// Approximate Inverse Cumulative Distribution Function (Quantile function) for Standard Normal Distribution.
///
/// Based on Abramowitz and Stegun formula 26.2.23.
/// The absolute error is less than 4.5e-4.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    // Handle edge cases
    if p >= 1.0 {
        return 5.0;
    } // Cap at reasonable sigma
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    // Formula is valid for 0 < p <= 0.5
    // If p > 0.5, we use 1-p and negate the result
    let q = if p < 0.5 { p } else { 1.0 - p };

    let t = (-2.0 * q.ln()).sqrt();

    let c0 = 2.515517;
    let c1 = 0.802853;
    let c2 = 0.010328;

    let d1 = 1.432788;
    let d2 = 0.189269;
    let d3 = 0.001308;

    let numerator = c0 + c1 * t + c2 * t * t;
    let denominator = 1.0 + d1 * t + d2 * t * t + d3 * t * t * t;

    let x = t - (numerator / denominator);

    if p < 0.5 {
        -x
    } else {
        x
    }
}

/// Replaces negative, NaN and infinite inputs with zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Converts a lead time in days to weeks.
pub fn lead_time_weeks(lead_time_days: f64) -> f64 {
    non_negative(lead_time_days) / 7.0
}

/// Annual demand from average weekly demand.
pub fn annual_demand(avg_weekly_demand: f64) -> f64 {
    non_negative(avg_weekly_demand) * WEEKS_PER_YEAR
}

/// Calculates the Economic Order Quantity.
///
/// # Formula
/// EOQ = sqrt(2 * D * S / H)
///
/// Where:
/// - D = annual demand
/// - S = cost per order
/// - H = holding cost per unit per year
///
/// A non-positive cost on either side, or an infinite or undefined result, is 0.
pub fn economic_order_quantity(annual_demand: f64, ordering_cost: f64, holding_cost: f64) -> f64 {
    if non_negative(ordering_cost) == 0.0 || non_negative(holding_cost) == 0.0 {
        return 0.0;
    }
    let eoq = (2.0 * annual_demand * ordering_cost / holding_cost).sqrt();
    non_negative(eoq)
}

/// Standard deviation of demand over the replenishment lead time.
///
/// # Formula
/// sigma_L = sigma_week * sqrt(L_weeks), with L_weeks floored at [`MIN_LEAD_TIME_WEEKS`].
pub fn demand_std_during_lead(std_weekly_demand: f64, lead_time_weeks: f64) -> f64 {
    let weeks = non_negative(lead_time_weeks).max(MIN_LEAD_TIME_WEEKS);
    non_negative(std_weekly_demand) * weeks.sqrt()
}

/// Safety stock for a one-sided service level z-score.
///
/// # Formula
/// SS = Z * sigma_week * sqrt(L_weeks)
pub fn safety_stock(z_score: f64, std_weekly_demand: f64, lead_time_weeks: f64) -> f64 {
    non_negative(z_score * demand_std_during_lead(std_weekly_demand, lead_time_weeks))
}

/// Expected demand over the lead time (no flooring of the lead time here).
pub fn demand_during_lead(avg_weekly_demand: f64, lead_time_weeks: f64) -> f64 {
    non_negative(avg_weekly_demand) * non_negative(lead_time_weeks)
}

/// Reorder point: expected lead-time demand plus the safety buffer.
pub fn reorder_point(demand_during_lead: f64, safety_stock: f64) -> f64 {
    demand_during_lead + safety_stock
}

/// Quantity to order now to bring stock back up to the reorder point.
pub fn recommended_order_qty(reorder_point: f64, current_stock: f64) -> f64 {
    let current = if current_stock.is_finite() { current_stock } else { 0.0 };
    (reorder_point - current).max(0.0)
}

/// Annual ordering plus holding cost of running at order size `eoq`.
///
/// # Formula
/// TC = (D / Q) * S + H * Q / 2
///
/// Undefined when Q or D is not positive; returns `None` rather than zero so
/// that callers can exclude the SKU from averages.
pub fn total_annual_cost(eoq: f64, annual_demand: f64, ordering_cost: f64, holding_cost: f64) -> Option<f64> {
    if !(eoq > 0.0) || !(annual_demand > 0.0) {
        return None;
    }
    let orders_per_year = annual_demand / eoq;
    let cost = orders_per_year * ordering_cost + holding_cost * eoq / 2.0;
    cost.is_finite().then_some(cost)
}
