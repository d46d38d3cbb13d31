//! Seasonal ARIMA for the weekly demand series.
//!
//! Implements SARIMA(1,1,1)(1,0,1)[period] fitted by conditional sum of
//! squares: residuals are computed recursively on the differenced series
//! (pre-sample values conditioned to zero) and the four coefficients are
//! found with a bounded Nelder-Mead simplex. Confidence intervals come from
//! the cumulative psi weights of the integrated process.

use serde::{Deserialize, Serialize};
use sportpulse_core::{Result, SportPulseError};
use tracing::debug;

/// Point forecast with symmetric confidence bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalForecast {
    pub mean: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub confidence_level: f64,
}

/// A fittable seasonal time-series model.
///
/// Implementations must be deterministic: the same series and horizon
/// always produce the same forecast.
pub trait SeasonalModel {
    fn name(&self) -> &str;

    /// Fit on the full history. Fails with `ForecastUnfittable` when the
    /// series is too short for stable estimation.
    fn fit(&mut self, values: &[f64]) -> Result<()>;

    /// Forecast `horizon` steps ahead. Fails with `NotTrained` before `fit`.
    fn forecast(&self, horizon: usize) -> Result<SeasonalForecast>;
}

#[derive(Debug, Clone, Copy)]
struct SarimaParams {
    phi: f64,
    theta: f64,
    seasonal_phi: f64,
    seasonal_theta: f64,
}

#[derive(Debug, Clone)]
struct FittedSarima {
    params: SarimaParams,
    /// Differenced series (lag-1).
    diffed: Vec<f64>,
    residuals: Vec<f64>,
    last_value: f64,
    sigma: f64,
}

/// SARIMA(1,1,1)(1,0,1)[period].
#[derive(Debug, Clone)]
pub struct SarimaModel {
    period: usize,
    confidence_level: f64,
    fitted: Option<FittedSarima>,
}

impl SarimaModel {
    /// Stable estimation needs at least one full seasonal cycle.
    pub fn min_series_len(period: usize) -> usize {
        period.max(2)
    }

    pub fn new(period: usize, confidence_level: f64) -> Self {
        Self {
            period,
            confidence_level,
            fitted: None,
        }
    }
}

impl SeasonalModel for SarimaModel {
    fn name(&self) -> &str {
        "SARIMA(1,1,1)(1,0,1)"
    }

    fn fit(&mut self, values: &[f64]) -> Result<()> {
        let n = values.len();
        let min = Self::min_series_len(self.period);
        if n < min {
            return Err(SportPulseError::ForecastUnfittable(format!(
                "seasonal period {} requires at least {min} points, got {n}",
                self.period
            )));
        }

        let diffed: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        let period = self.period;

        let objective = |raw: &[f64]| -> f64 {
            let params = unpack(raw);
            let residuals = css_residuals(&diffed, &params, period);
            let sse: f64 = residuals.iter().map(|e| e * e).sum();
            if sse.is_finite() {
                sse
            } else {
                f64::MAX
            }
        };

        let best = nelder_mead(objective, &[0.1, 0.1, 0.1, 0.1], -0.95, 0.95, 400, 1e-8);
        let params = unpack(&best);
        let residuals = css_residuals(&diffed, &params, period);
        let sse: f64 = residuals.iter().map(|e| e * e).sum();
        // Variance floor keeps the intervals from collapsing onto the
        // point forecast for noise-free series.
        let sigma = (sse / residuals.len().max(1) as f64).sqrt().max(1e-6);

        debug!(
            phi = format!("{:.4}", params.phi),
            theta = format!("{:.4}", params.theta),
            seasonal_phi = format!("{:.4}", params.seasonal_phi),
            seasonal_theta = format!("{:.4}", params.seasonal_theta),
            sigma = format!("{:.4}", sigma),
            "SARIMA fitted"
        );

        self.fitted = Some(FittedSarima {
            params,
            diffed,
            residuals,
            last_value: values[n - 1],
            sigma,
        });
        Ok(())
    }

    fn forecast(&self, horizon: usize) -> Result<SeasonalForecast> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| SportPulseError::NotTrained("seasonal model".into()))?;

        // Extend the differenced series forward with future shocks at zero
        let s = self.period;
        let p = fitted.params;
        let mut w = fitted.diffed.clone();
        let mut e = fitted.residuals.clone();
        let n = w.len();

        let mut mean = Vec::with_capacity(horizon);
        let mut level = fitted.last_value;
        for _ in 0..horizon {
            let t = w.len();
            let step = p.phi * lagged(&w, t, 1) + p.seasonal_phi * lagged(&w, t, s)
                - p.phi * p.seasonal_phi * lagged(&w, t, s + 1)
                + p.theta * lagged(&e, t, 1)
                + p.seasonal_theta * lagged(&e, t, s)
                + p.theta * p.seasonal_theta * lagged(&e, t, s + 1);
            w.push(step);
            e.push(0.0);
            level += step;
            mean.push(level);
        }
        debug_assert_eq!(w.len(), n + horizon);

        // Forecast standard errors from cumulative psi weights (d = 1)
        let psi = psi_weights(&p, s, horizon);
        let z = z_score(self.confidence_level);
        let mut cumulative = 0.0;
        let mut variance = 0.0;
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (h, &m) in mean.iter().enumerate() {
            cumulative += psi[h];
            variance += cumulative * cumulative;
            let se = fitted.sigma * variance.sqrt();
            lower.push(m - z * se);
            upper.push(m + z * se);
        }

        Ok(SeasonalForecast {
            mean,
            lower,
            upper,
            confidence_level: self.confidence_level,
        })
    }
}

fn unpack(raw: &[f64]) -> SarimaParams {
    SarimaParams {
        phi: raw[0],
        theta: raw[1],
        seasonal_phi: raw[2],
        seasonal_theta: raw[3],
    }
}

fn lagged(values: &[f64], t: usize, lag: usize) -> f64 {
    if t >= lag {
        values[t - lag]
    } else {
        0.0
    }
}

/// One-step-ahead residuals of the multiplicative ARMA on the differenced
/// scale, conditioning pre-sample values to zero.
fn css_residuals(diffed: &[f64], p: &SarimaParams, s: usize) -> Vec<f64> {
    let mut e = vec![0.0; diffed.len()];
    for t in 0..diffed.len() {
        let pred = p.phi * lagged(diffed, t, 1) + p.seasonal_phi * lagged(diffed, t, s)
            - p.phi * p.seasonal_phi * lagged(diffed, t, s + 1)
            + p.theta * lagged(&e, t, 1)
            + p.seasonal_theta * lagged(&e, t, s)
            + p.theta * p.seasonal_theta * lagged(&e, t, s + 1);
        e[t] = diffed[t] - pred;
    }
    e
}

/// Psi weights of the ARMA part: psi_0 = 1,
/// psi_j = ma_j + sum_i ar_i * psi_{j-i}.
fn psi_weights(p: &SarimaParams, s: usize, horizon: usize) -> Vec<f64> {
    let mut ar = vec![0.0; s + 2];
    ar[1] = p.phi;
    ar[s] += p.seasonal_phi;
    ar[s + 1] += -p.phi * p.seasonal_phi;

    let mut ma = vec![0.0; s + 2];
    ma[1] = p.theta;
    ma[s] += p.seasonal_theta;
    ma[s + 1] += p.theta * p.seasonal_theta;

    let mut psi = vec![0.0; horizon.max(1)];
    psi[0] = 1.0;
    for j in 1..psi.len() {
        let mut value = if j < ma.len() { ma[j] } else { 0.0 };
        for i in 1..=j.min(s + 1) {
            value += ar[i] * psi[j - i];
        }
        psi[j] = value;
    }
    psi
}

/// Two-sided normal quantile for the requested confidence level.
fn z_score(confidence_level: f64) -> f64 {
    match confidence_level {
        x if x >= 0.99 => 2.576,
        x if x >= 0.95 => 1.96,
        x if x >= 0.90 => 1.645,
        x if x >= 0.80 => 1.282,
        _ => 1.96,
    }
}

/// Bounded Nelder-Mead simplex minimization. All coordinates share the
/// same [lower, upper] box; points are clamped into it after every move.
fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    lower: f64,
    upper: f64,
    max_iter: usize,
    tol: f64,
) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let dim = initial.len();
    let clamp = |point: &mut Vec<f64>| {
        for v in point.iter_mut() {
            *v = v.clamp(lower, upper);
        }
    };

    // Vertices as (point, value) pairs, kept sorted by value
    let mut vertices: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    let mut start = initial.to_vec();
    clamp(&mut start);
    vertices.push((start.clone(), objective(&start)));
    for i in 0..dim {
        let mut vertex = start.clone();
        let step = (upper - lower) * 0.1;
        vertex[i] = if vertex[i] + step <= upper {
            vertex[i] + step
        } else {
            vertex[i] - step
        };
        let value = objective(&vertex);
        vertices.push((vertex, value));
    }

    for _ in 0..max_iter {
        vertices.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let spread: f64 = vertices[0]
            .0
            .iter()
            .zip(vertices[dim].0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);
        if spread < tol {
            break;
        }

        // Centroid of all but the worst vertex
        let mut centroid = vec![0.0; dim];
        for (point, _) in &vertices[..dim] {
            for (c, v) in centroid.iter_mut().zip(point.iter()) {
                *c += v / dim as f64;
            }
        }

        let worst = vertices[dim].clone();
        let mut reflected: Vec<f64> = centroid
            .iter()
            .zip(worst.0.iter())
            .map(|(c, w)| 2.0 * c - w)
            .collect();
        clamp(&mut reflected);
        let reflected_value = objective(&reflected);

        if reflected_value < vertices[0].1 {
            // Try to expand further along the same direction
            let mut expanded: Vec<f64> = centroid
                .iter()
                .zip(reflected.iter())
                .map(|(c, r)| 2.0 * r - c)
                .collect();
            clamp(&mut expanded);
            let expanded_value = objective(&expanded);
            vertices[dim] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
        } else if reflected_value < vertices[dim - 1].1 {
            vertices[dim] = (reflected, reflected_value);
        } else {
            // Contract towards the centroid; shrink the simplex if even
            // that fails to improve on the worst vertex
            let mut contracted: Vec<f64> = centroid
                .iter()
                .zip(worst.0.iter())
                .map(|(c, w)| 0.5 * (c + w))
                .collect();
            clamp(&mut contracted);
            let contracted_value = objective(&contracted);
            if contracted_value < worst.1 {
                vertices[dim] = (contracted, contracted_value);
            } else {
                let best = vertices[0].0.clone();
                for (point, value) in vertices.iter_mut().skip(1) {
                    for (v, b) in point.iter_mut().zip(best.iter()) {
                        *v = 0.5 * (*v + b);
                    }
                    clamp(point);
                    *value = objective(point);
                }
            }
        }
    }

    vertices.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    vertices[0].0.clone()
}
