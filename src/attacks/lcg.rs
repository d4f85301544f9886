use tracing::{debug, error, info, warn};

use crate::errors::CrackError;
use crate::models::{LcgParameters, Prediction, PredictionSource};

/// Observations needed to try anything at all.
pub const MIN_OBSERVATIONS: usize = 2;
/// Observations needed to confirm a generator (two transitions).
pub const MIN_OBSERVATIONS_FOR_FIT: usize = 3;

/// One step of the recurrence. Computed in 128 bits so `a * prev` cannot overflow.
pub fn lcg_step(params: &LcgParameters, prev: u64) -> Result<u64, CrackError> {
    if params.m == 0 {
        return Err(CrackError::MalformedInput(format!(
            "Generator '{}' has a zero modulus",
            params.name
        )));
    }
    let next = (params.a as u128 * prev as u128 + params.c as u128) % params.m as u128;
    Ok(next as u64)
}

/// Whether every consecutive pair in `observed` follows `params`.
pub fn fits(params: &LcgParameters, observed: &[i64]) -> Result<bool, CrackError> {
    if observed.len() < MIN_OBSERVATIONS_FOR_FIT {
        return Ok(false);
    }
    for pair in observed.windows(2) {
        let (Ok(prev), Ok(next)) = (u64::try_from(pair[0]), u64::try_from(pair[1])) else {
            return Ok(false);
        };
        if lcg_step(params, prev)? != next {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Predict the next `count` values using the built-in generator catalog.
pub fn recover_and_predict(observed: &[i64], count: usize) -> Prediction {
    recover_and_predict_with(observed, count, &LcgParameters::catalog())
}

/// Try each generator in `catalog` in order; the first that fits produces the
/// prediction. Without a fit, the last delta is extended linearly and the
/// result is labeled as extrapolation.
pub fn recover_and_predict_with(observed: &[i64], count: usize, catalog: &[LcgParameters]) -> Prediction {
    if observed.len() < MIN_OBSERVATIONS {
        debug!(observed = observed.len(), "Too few observations to predict");
        return Prediction::insufficient();
    }

    for params in catalog {
        match try_generator(params, observed, count) {
            Ok(Some(values)) => {
                info!(generator = %params.name, predicted = values.len(), "LCG parameters recovered");
                return Prediction {
                    source: PredictionSource::LcgRecovery { generator: params.clone() },
                    values,
                };
            }
            Ok(None) => debug!(generator = %params.name, "Generator does not fit"),
            Err(e) if e.is_recoverable() => warn!(generator = %params.name, error = %e, "Generator skipped"),
            Err(e) => {
                error!(generator = %params.name, error = %e, "Generator check failed, abandoning catalog");
                break;
            }
        }
    }

    extrapolate(observed, count)
}

/// Predicted values when `params` fits `observed`, `None` when it does not.
fn try_generator(params: &LcgParameters, observed: &[i64], count: usize) -> Result<Option<Vec<i64>>, CrackError> {
    if !fits(params, observed)? {
        return Ok(None);
    }
    generate(params, observed, count).map(Some)
}

fn generate(params: &LcgParameters, observed: &[i64], count: usize) -> Result<Vec<i64>, CrackError> {
    let last = observed
        .last()
        .and_then(|v| u64::try_from(*v).ok())
        .ok_or_else(|| CrackError::MalformedInput("Last observation is negative".into()))?;

    let mut values = Vec::with_capacity(count);
    let mut state = last;
    for _ in 0..count {
        state = lcg_step(params, state)?;
        let value = i64::try_from(state)
            .map_err(|_| CrackError::MalformedInput(format!("Output {} exceeds i64", state)))?;
        values.push(value);
    }
    Ok(values)
}

fn extrapolate(observed: &[i64], count: usize) -> Prediction {
    let last = observed[observed.len() - 1];
    let prev = observed[observed.len() - 2];
    let Some(delta) = last.checked_sub(prev) else {
        warn!("Last delta overflows; no extrapolation possible");
        return Prediction::insufficient();
    };

    let mut values = Vec::with_capacity(count);
    let mut current = last;
    for _ in 0..count {
        match current.checked_add(delta) {
            Some(next) => {
                values.push(next);
                current = next;
            }
            None => {
                warn!(produced = values.len(), "Extrapolation overflowed, stopping early");
                break;
            }
        }
    }

    info!(delta, predicted = values.len(), "No generator fit, using linear extrapolation");
    Prediction {
        source: PredictionSource::LinearExtrapolation { delta },
        values,
    }
}
