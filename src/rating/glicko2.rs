use std::f64::consts::PI;

use log::debug;

use super::types::{GlickoOpponent, GlickoRating};
use crate::config::settings::RatingSettings;

/// Conversion factor between the public scale and the internal Glicko-2 scale
const SCALE: f64 = 173.7178;
const CENTRE: f64 = 1500.0;
/// Upper bound for a volatility estimate taken from an unfinished solve
const MAX_VOLATILITY: f64 = 1.0;

/// Batched Glicko-2 rating period update (Glickman, 2012)
#[derive(Debug, Clone)]
pub struct Glicko2Engine {
    tau: f64,
    tolerance: f64,
    max_iterations: usize,
    min_deviation: f64,
    max_deviation: f64,
}

impl Glicko2Engine {
    pub fn new(config: &RatingSettings) -> Self {
        Self {
            tau: config.glicko_tau,
            tolerance: config.convergence_tolerance,
            max_iterations: config.max_iterations,
            min_deviation: config.min_deviation,
            max_deviation: config.max_deviation,
        }
    }

    /// Rate one player over a whole rating period. Every opponent must be
    /// the opponent's rating as it stood before the period started.
    pub fn rank(&self, current: GlickoRating, opponents: &[GlickoOpponent]) -> GlickoRating {
        if opponents.is_empty() {
            return GlickoRating {
                deviation: self.skip(current),
                ..current
            };
        }

        let mu = to_internal_rating(current.rating);
        let phi = current.deviation / SCALE;

        let (variance, improvement_sum) = estimate_variance(mu, opponents);
        let delta = variance * improvement_sum;

        let volatility = self.solve_volatility(phi, current.volatility, variance, delta);

        let phi_star = (phi * phi + volatility * volatility).sqrt();
        let new_phi = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / variance).sqrt();
        let new_mu = mu + new_phi * new_phi * improvement_sum;

        GlickoRating {
            rating: to_public_rating(new_mu),
            deviation: self.bound_deviation(new_phi * SCALE),
            volatility,
        }
    }

    /// Deviation after a rating period without games; rating and
    /// volatility stay as they are.
    pub fn skip(&self, current: GlickoRating) -> f64 {
        let phi = current.deviation / SCALE;
        let phi_star = (phi * phi + current.volatility * current.volatility).sqrt();
        self.bound_deviation(phi_star * SCALE)
    }

    fn bound_deviation(&self, deviation: f64) -> f64 {
        deviation.clamp(self.min_deviation, self.max_deviation)
    }

    /// Illinois variant of regula falsi on f(x) with x = ln(sigma^2).
    /// Stopping at the iteration cap yields the bracket end closest to the
    /// root; a root that was never bracketed keeps the prior volatility.
    fn solve_volatility(&self, phi: f64, sigma: f64, variance: f64, delta: f64) -> f64 {
        let tau = self.tau;
        let a = (sigma * sigma).ln();
        let f = |x: f64| {
            let ex = x.exp();
            let denom = phi * phi + variance + ex;
            ex * (delta * delta - phi * phi - variance - ex) / (2.0 * denom * denom) - (x - a) / (tau * tau)
        };

        let mut lower = a;
        let mut upper = if delta * delta > phi * phi + variance {
            (delta * delta - phi * phi - variance).ln()
        } else {
            let mut k = 1.0;
            let mut steps = 0;
            while f(a - k * tau) < 0.0 {
                if steps >= self.max_iterations {
                    debug!("Volatility root not bracketed after {} steps, keeping {}", steps, sigma);
                    return sigma;
                }
                k += 1.0;
                steps += 1;
            }
            a - k * tau
        };

        let mut f_lower = f(lower);
        let mut f_upper = f(upper);
        let mut iterations = 0;

        while (upper - lower).abs() > self.tolerance {
            if iterations >= self.max_iterations || (f_upper - f_lower).abs() < f64::EPSILON {
                debug!("Volatility solver stopped after {} iterations", iterations);
                let best = if f(lower).abs() <= f_upper.abs() { lower } else { upper };
                return self.fallback_volatility(best, sigma);
            }

            let candidate = lower + (lower - upper) * f_lower / (f_upper - f_lower);
            let f_candidate = f(candidate);

            if f_candidate * f_upper <= 0.0 {
                lower = upper;
                f_lower = f_upper;
            } else {
                f_lower /= 2.0;
            }

            upper = candidate;
            f_upper = f_candidate;
            iterations += 1;
        }

        (lower / 2.0).exp()
    }

    fn fallback_volatility(&self, x: f64, sigma: f64) -> f64 {
        let volatility = (x / 2.0).exp();
        if !volatility.is_finite() {
            return sigma;
        }
        volatility.clamp(0.0, MAX_VOLATILITY.max(sigma))
    }
}

fn to_internal_rating(rating: f64) -> f64 {
    (rating - CENTRE) / SCALE
}

fn to_public_rating(mu: f64) -> f64 {
    mu * SCALE + CENTRE
}

fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

fn expected(mu: f64, mu_j: f64, phi_j: f64) -> f64 {
    1.0 / (1.0 + (-g(phi_j) * (mu - mu_j)).exp())
}

/// Estimated variance `v` and the sum used for both `delta` and the new rating
fn estimate_variance(mu: f64, opponents: &[GlickoOpponent]) -> (f64, f64) {
    let mut inverse_variance = 0.0;
    let mut improvement_sum = 0.0;

    for opponent in opponents {
        let mu_j = to_internal_rating(opponent.rating);
        let phi_j = opponent.deviation / SCALE;
        let g_j = g(phi_j);
        let e_j = expected(mu, mu_j, phi_j);

        inverse_variance += g_j * g_j * e_j * (1.0 - e_j);
        improvement_sum += g_j * (opponent.score - e_j);
    }

    (1.0 / inverse_variance, improvement_sum)
}
