use std::convert::TryFrom;

use cosmwasm_std::{StdError, StdResult, Uint128, Uint256};

/// Denominator for every ratio and price in the protocol (1e6 = 100% / 1.00 quote unit)
pub const PRECISION: u32 = 1_000_000;

pub const SECONDS_PER_YEAR: u64 = 31_536_000u64;

/// Returns `amount * numerator / denominator` with a 256-bit intermediate
pub fn mul_div(
    amount: Uint128,
    numerator: impl Into<Uint128>,
    denominator: impl Into<Uint128>,
) -> StdResult<Uint128> {
    let numerator: Uint128 = numerator.into();
    let denominator: Uint128 = denominator.into();
    if denominator.is_zero() {
        return Err(StdError::generic_err("mul_div: zero denominator"));
    }

    let result = Uint256::from(amount)
        .checked_mul(Uint256::from(numerator))?
        .checked_div(Uint256::from(denominator))?;

    Ok(Uint128::try_from(result)?)
}

/// Applies a 1e6-denominated ratio to `amount`
pub fn apply_ratio(amount: Uint128, ratio: u32) -> StdResult<Uint128> {
    mul_div(amount, ratio, PRECISION)
}

/// Stablecoin amount -> quote value at `target_price`
pub fn convert_to_usd(amount: Uint128, target_price: Uint128) -> StdResult<Uint128> {
    mul_div(amount, target_price, PRECISION)
}

/// Quote value -> stablecoin amount at `target_price`
pub fn convert_to_sweep(amount: Uint128, target_price: Uint128) -> StdResult<Uint128> {
    mul_div(amount, PRECISION, target_price)
}

/// Effective target price at `now`.
///
/// Crawls linearly from `current` to `next` over `period_time` seconds starting at
/// `period_start`, then holds at `next`. A zero-length period is already elapsed.
pub fn interpolate_target_price(
    current: Uint128,
    next: Uint128,
    period_start: u64,
    period_time: u64,
    now: u64,
) -> StdResult<Uint128> {
    let elapsed = now.saturating_sub(period_start);
    if period_time == 0 || elapsed >= period_time {
        return Ok(next);
    }

    if next >= current {
        let step = mul_div(next - current, elapsed, period_time)?;
        Ok(current + step)
    } else {
        let step = mul_div(current - next, elapsed, period_time)?;
        Ok(current - step)
    }
}

/// Fee accrued on `principal` at an annual `rate` (1e6 scale) over `elapsed` seconds
pub fn accrue_annual_fee(principal: Uint128, rate: u32, elapsed: u64) -> StdResult<Uint128> {
    let yearly = apply_ratio(principal, rate)?;
    mul_div(yearly, elapsed, SECONDS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_crawls_between_anchors() {
        let current = Uint128::new(1_000_000);
        let next = Uint128::new(1_100_000);

        //Start, midpoint, end and past the end of the period
        assert_eq!(interpolate_target_price(current, next, 100, 1_000, 100).unwrap(), current);
        assert_eq!(
            interpolate_target_price(current, next, 100, 1_000, 600).unwrap(),
            Uint128::new(1_050_000)
        );
        assert_eq!(interpolate_target_price(current, next, 100, 1_000, 1_100).unwrap(), next);
        assert_eq!(interpolate_target_price(current, next, 100, 1_000, 9_999).unwrap(), next);
    }

    #[test]
    fn interpolation_crawls_downward() {
        let current = Uint128::new(1_000_000);
        let next = Uint128::new(900_000);

        assert_eq!(
            interpolate_target_price(current, next, 0, 100, 25).unwrap(),
            Uint128::new(975_000)
        );
        //Zero period jumps straight to the next anchor
        assert_eq!(interpolate_target_price(current, next, 0, 0, 0).unwrap(), next);
    }

    #[test]
    fn conversions_follow_target_price() {
        let price = Uint128::new(1_010_000);
        assert_eq!(convert_to_usd(Uint128::new(100_000_000), price).unwrap(), Uint128::new(101_000_000));
        assert_eq!(convert_to_sweep(Uint128::new(101_000_000), price).unwrap(), Uint128::new(100_000_000));

        assert!(convert_to_sweep(Uint128::new(1), Uint128::zero()).is_err());
    }

    #[test]
    fn annual_fee() {
        //3% on 1_000 for half a year
        let fee = accrue_annual_fee(Uint128::new(1_000_000_000), 30_000, SECONDS_PER_YEAR / 2).unwrap();
        assert_eq!(fee, Uint128::new(15_000_000));
    }
}
