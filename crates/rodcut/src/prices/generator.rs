//! Adversarial price tables (jumps + density valleys) with seed replay.
//!
//! Purpose
//! - Produce strictly increasing tables on which ranking cuts by price density
//!   visibly loses against the exact DP baseline.
//!
//! Model
//! - Ramp: a small seed price, then per-length increments that grow with the
//!   position, plus 3–5 large "jumps" spread over the index range. Prices are
//!   clamped at `n`; once the clamp bites, strict monotonicity forces the tail
//!   to climb by exactly one per length.
//! - Valleys: at each quarter mark a window of 3–7 prices has its density cut
//!   by 30%, kept only where the table stays strictly increasing and `<= n`.
//!   The order check rejects the cut on smooth stretches; windows bite right
//!   after a steep rise such as a jump, and on small tables.
//! - The random source is explicit: `generate_with` takes any `Rng`, and
//!   `PriceTableGenerator` derives one seed per table so draws can be replayed.

use super::PriceTable;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;

/// Largest rod length accepted; leaves headroom for the `+1` tail above `n`.
pub const MAX_SIZE: usize = (u32::MAX / 2) as usize;

/// Error type for table generation.
#[derive(Debug)]
pub enum GeneratorError {
    /// `n` was zero or above `MAX_SIZE`.
    InvalidSize { n: usize },
    /// Backing storage for `n` prices could not be reserved.
    Allocation { n: usize },
    InvalidParams { reason: String },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { n } => {
                write!(f, "rod length must be in 1..={MAX_SIZE}, got {n}")
            }
            Self::Allocation { n } => write!(f, "could not allocate a price table of {n} entries"),
            Self::InvalidParams { reason } => write!(f, "invalid generator params: {reason}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Tunables of the adversarial generator. Defaults give the reference tables.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorParams {
    /// Price of length 1 is drawn from `first_price_min..=first_price_max`, capped at `n`.
    pub first_price_min: u32,
    pub first_price_max: u32,
    /// Number of jump positions.
    pub jumps_min: usize,
    pub jumps_max: usize,
    /// Base increment between neighbouring lengths.
    pub increment_min: u32,
    pub increment_max: u32,
    /// Extra increment at index `i` is `floor(i / n * position_gain)`.
    pub position_gain: f64,
    /// Width of each density valley.
    pub valley_min: usize,
    pub valley_max: usize,
    /// Density multiplier inside a valley, in (0, 1].
    pub valley_factor: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            first_price_min: 1,
            first_price_max: 3,
            jumps_min: 3,
            jumps_max: 5,
            increment_min: 1,
            increment_max: 3,
            position_gain: 5.0,
            valley_min: 3,
            valley_max: 7,
            valley_factor: 0.7,
        }
    }
}

impl GeneratorParams {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.first_price_min == 0 {
            return Err(GeneratorError::invalid("first_price_min must be > 0"));
        }
        if self.first_price_min > self.first_price_max {
            return Err(GeneratorError::invalid(
                "first_price_min <= first_price_max required",
            ));
        }
        if self.jumps_min > self.jumps_max {
            return Err(GeneratorError::invalid("jumps_min <= jumps_max required"));
        }
        if self.increment_min > self.increment_max {
            return Err(GeneratorError::invalid(
                "increment_min <= increment_max required",
            ));
        }
        if self.increment_max > 1 << 16 {
            return Err(GeneratorError::invalid("increment_max must be <= 65536"));
        }
        if !(self.position_gain.is_finite() && (0.0..=1e6).contains(&self.position_gain)) {
            return Err(GeneratorError::invalid("position_gain must be in [0, 1e6]"));
        }
        if self.valley_min > self.valley_max {
            return Err(GeneratorError::invalid("valley_min <= valley_max required"));
        }
        if !(self.valley_factor > 0.0 && self.valley_factor <= 1.0) {
            return Err(GeneratorError::invalid("valley_factor must be in (0, 1]"));
        }
        Ok(())
    }
}

/// Seed plus size that regenerate one table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedReplay {
    pub seed: u64,
    pub n: usize,
}

/// A generated table plus its replay token.
#[derive(Clone, Debug)]
pub struct TableSample {
    pub table: PriceTable,
    pub replay: SeedReplay,
}

/// Seeded source of adversarial price tables.
pub struct PriceTableGenerator {
    params: GeneratorParams,
    master_rng: StdRng,
}

impl PriceTableGenerator {
    pub fn new(params: GeneratorParams, seed: u64) -> Result<Self, GeneratorError> {
        params.validate()?;
        Ok(Self {
            params,
            master_rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Draw the next table of length `n`. The master stream advances even on failure.
    pub fn generate_next(&mut self, n: usize) -> Result<TableSample, GeneratorError> {
        let replay = SeedReplay {
            seed: self.master_rng.next_u64(),
            n,
        };
        let table = Self::generate_single(&self.params, replay)?;
        Ok(TableSample { table, replay })
    }

    pub fn regenerate(&self, replay: &SeedReplay) -> Result<PriceTable, GeneratorError> {
        Self::generate_single(&self.params, *replay)
    }

    pub fn generate_single(
        params: &GeneratorParams,
        replay: SeedReplay,
    ) -> Result<PriceTable, GeneratorError> {
        let mut rng = StdRng::seed_from_u64(replay.seed);
        generate_with(replay.n, params, &mut rng)
    }
}

/// Generate one table of length `n` from an explicit random source.
pub fn generate_with<R: Rng>(
    n: usize,
    params: &GeneratorParams,
    rng: &mut R,
) -> Result<PriceTable, GeneratorError> {
    if n == 0 || n > MAX_SIZE {
        return Err(GeneratorError::InvalidSize { n });
    }
    params.validate()?;
    let mut prices = build_ramp(n, params, rng)?;
    carve_valleys(&mut prices, params, rng);
    Ok(PriceTable::from_raw(prices))
}

/// Seed price, jumps and position-scaled increments; clamped at `n`, strictly increasing.
fn build_ramp<R: Rng>(
    n: usize,
    params: &GeneratorParams,
    rng: &mut R,
) -> Result<Vec<u32>, GeneratorError> {
    let cap = n as u32;
    let mut prices: Vec<u32> = Vec::new();
    prices
        .try_reserve_exact(n)
        .map_err(|_| GeneratorError::Allocation { n })?;
    let first: u32 = rng.gen_range(params.first_price_min..=params.first_price_max);
    prices.push(first.min(cap));

    let jumps = jump_positions(n, params, rng);
    for i in 1..n {
        let prev = prices[i - 1];
        let mut price = if jumps.contains(&i) {
            let max_jump = cap.saturating_sub(prev) / 2;
            let half = max_jump / 2;
            let jump = if half == 0 {
                max_jump
            } else {
                half + rng.gen_range::<u32, _>(0..half)
            };
            prev.saturating_add(jump)
        } else {
            let base: u32 = rng.gen_range(params.increment_min..=params.increment_max);
            let extra = (i as f64 / n as f64 * params.position_gain) as u32;
            prev.saturating_add(base).saturating_add(extra)
        };
        price = price.min(cap);
        if price <= prev {
            price = prev + 1;
        }
        prices.push(price);
    }
    Ok(prices)
}

/// One jump per segment of `n / (k + 1)`, jittered inside its segment; none when segments are empty.
fn jump_positions<R: Rng>(n: usize, params: &GeneratorParams, rng: &mut R) -> Vec<usize> {
    let count: usize = rng.gen_range(params.jumps_min..=params.jumps_max);
    let segment = n / (count + 1);
    if segment == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|k| segment * (k + 1) + rng.gen_range::<usize, _>(0..segment))
        .collect()
}

/// Lower the density of short windows starting at each quarter mark.
fn carve_valleys<R: Rng>(prices: &mut [u32], params: &GeneratorParams, rng: &mut R) {
    let n = prices.len();
    let cap = n as u32;
    let quarter = n / 4;
    if quarter == 0 {
        return;
    }
    for start in (quarter..n).step_by(quarter) {
        let width: usize = rng.gen_range(params.valley_min..=params.valley_max);
        for idx in start..(start + width).min(n) {
            let length = (idx + 1) as f64;
            let density = f64::from(prices[idx]) / length;
            let lowered = (density * params.valley_factor * length) as u32;
            // idx >= quarter >= 1; the successor already exceeds the old price.
            if lowered > prices[idx - 1] && lowered <= cap {
                prices[idx] = lowered;
            }
        }
    }
}
