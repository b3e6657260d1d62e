//! Upper-tail probabilities of the reference distributions.
//!
//! Tails are taken straight from the regularized incomplete beta and gamma
//! functions instead of `1 - cdf`, so p-values far below machine epsilon
//! stay representable.

use statrs::function::beta::checked_beta_reg;
use statrs::function::gamma::checked_gamma_ur;

use crate::core::errors::{LifeboatError, Result};

fn check_df(df: f64, name: &str) -> Result<()> {
    if df.is_finite() && df > 0.0 {
        Ok(())
    } else {
        Err(LifeboatError::math(format!(
            "{name} degrees of freedom must be positive and finite, got {df}"
        )))
    }
}

fn clamp_probability(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

/// P(X ≥ x) for X ~ χ²(df)
pub fn chi_squared_sf(x: f64, df: f64) -> Result<f64> {
    check_df(df, "chi-square")?;
    if x.is_nan() {
        return Err(LifeboatError::math("chi-square statistic is NaN"));
    }
    if x <= 0.0 {
        return Ok(1.0);
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    checked_gamma_ur(df / 2.0, x / 2.0)
        .map(clamp_probability)
        .map_err(|e| LifeboatError::math(format!("chi-square tail: {e}")))
}

/// P(|T| ≥ |t|) for T ~ Student's t(df)
pub fn students_t_two_sided(t: f64, df: f64) -> Result<f64> {
    check_df(df, "t")?;
    if t.is_nan() {
        return Err(LifeboatError::math("t statistic is NaN"));
    }
    if t.is_infinite() {
        return Ok(0.0);
    }
    let x = df / (df + t * t);
    checked_beta_reg(df / 2.0, 0.5, x)
        .map(clamp_probability)
        .map_err(|e| LifeboatError::math(format!("t tail: {e}")))
}

/// P(F ≥ f) for F ~ F(d1, d2)
pub fn f_sf(f: f64, d1: f64, d2: f64) -> Result<f64> {
    check_df(d1, "numerator")?;
    check_df(d2, "denominator")?;
    if f.is_nan() {
        return Err(LifeboatError::math("F statistic is NaN"));
    }
    if f <= 0.0 {
        return Ok(1.0);
    }
    if f.is_infinite() {
        return Ok(0.0);
    }
    let x = d2 / (d2 + d1 * f);
    checked_beta_reg(d2 / 2.0, d1 / 2.0, x)
        .map(clamp_probability)
        .map_err(|e| LifeboatError::math(format!("F tail: {e}")))
}
