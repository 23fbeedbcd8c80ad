//! Fixed-point amount arithmetic over the chain's micro-denomination.
//!
//! Every amount that reaches a persisted row has already been divided by
//! `10^PRECISION`; nothing downstream of this module ever sees a raw
//! micro-unit value.

use hub3_types::{Coin, Decimal, DENOM, PRECISION};

use crate::DecodeError;

fn precision_divisor() -> Decimal {
    Decimal::from(10u64.pow(PRECISION))
}

/// Parses a string like `"123456uatom"` into a divided `Decimal`.
///
/// An empty string is zero. Any denomination suffix other than `uatom` is a
/// hard error.
pub fn str_to_amount(raw: &str) -> Result<Decimal, DecodeError> {
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let Some(digits) = raw.strip_suffix(DENOM) else {
        let denom = raw.trim_start_matches(|c: char| c.is_ascii_digit());
        return Err(DecodeError::UnknownDenom(denom.to_string()));
    };
    let raw_amount: Decimal = digits
        .parse()
        .map_err(|_| DecodeError::Malformed(format!("not a decimal amount: {raw}")))?;
    Ok(raw_amount / precision_divisor())
}

/// Converts a single wire `Coin` into a divided `Decimal`, validating its
/// denomination. A coin with an empty denom and zero amount (the sentinel the
/// upstream node occasionally emits in place of an absent fee) is zero.
pub fn coin_amount(coin: &Coin) -> Result<Decimal, DecodeError> {
    if coin.denom.is_empty() && coin.amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if coin.denom != DENOM {
        return Err(DecodeError::UnknownDenom(coin.denom.clone()));
    }
    Ok(coin.amount / precision_divisor())
}

/// Sums a coin list into a single divided `Decimal`.
///
/// Stops at the first empty-denom/zero-amount sentinel rather than skipping
/// past it, matching the upstream node's own summation loop.
pub fn sum_coins(coins: &[Coin]) -> Result<Decimal, DecodeError> {
    let mut total = Decimal::ZERO;
    for coin in coins {
        if coin.denom.is_empty() && coin.amount.is_zero() {
            break;
        }
        if coin.denom != DENOM {
            return Err(DecodeError::UnknownDenom(coin.denom.clone()));
        }
        total += coin.amount;
    }
    Ok(total / precision_divisor())
}
