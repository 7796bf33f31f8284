//! Level-payment loan amortization
//!
//! Pure schedule math: given a principal, an annual rate, and a term in
//! months, compute the constant monthly payment and its per-period split
//! into interest and principal.

/// The fixed monthly payment that amortizes `principal` over `periods`
/// months at annual rate `annual_rate`.
///
/// `payment = P / sum_{k=1..N} (1 + r/12)^-k`. At a zero rate every
/// discount factor is 1 and the payment degenerates to `P / N`.
pub fn level_payment(principal: f64, annual_rate: f64, periods: usize) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let discount_sum: f64 = (1..=periods)
        .map(|k| (1.0 + monthly_rate).powi(-(k as i32)))
        .sum();
    principal / discount_sum
}

/// A fully amortized loan schedule.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    /// Constant monthly payment.
    pub payment: f64,
    /// Interest portion of each payment.
    pub interest: Vec<f64>,
    /// Principal portion of each payment.
    pub principal: Vec<f64>,
}

/// Split each level payment into interest and principal.
///
/// Balance recurrence: `interest_k = balance * r/12`,
/// `principal_k = payment - interest_k`, balance decreasing to ~0 at the
/// final period.
pub fn amortize(principal: f64, annual_rate: f64, periods: usize) -> AmortizationSchedule {
    let payment = level_payment(principal, annual_rate, periods);
    let monthly_rate = annual_rate / 12.0;

    let mut balance = principal;
    let mut interest = Vec::with_capacity(periods);
    let mut principal_paid = Vec::with_capacity(periods);

    for _ in 0..periods {
        let interest_k = balance * monthly_rate;
        let principal_k = payment - interest_k;
        balance -= principal_k;
        interest.push(interest_k);
        principal_paid.push(principal_k);
    }

    AmortizationSchedule {
        payment,
        interest,
        principal: principal_paid,
    }
}
