use crate::storage_types::{CrowdfundError, BASIS_POINTS};

/// Fee taken from an owner payout, rounded down.
pub fn fee_portion(amount: i128, fee_basis_points: u32) -> Result<i128, CrowdfundError> {
    amount
        .checked_mul(fee_basis_points as i128)
        .map(|scaled| scaled / BASIS_POINTS as i128)
        .ok_or(CrowdfundError::ArithmeticOverflow)
}

/// Gross threshold whose post-fee remainder is `amount`, rounded down.
///
/// Rounds independently of [`fee_portion`]; the two may leave a residual of a
/// base unit or two and must not be reconciled.
pub fn inflate_for_fee(amount: i128, fee_basis_points: u32) -> Result<i128, CrowdfundError> {
    if fee_basis_points >= BASIS_POINTS {
        return Err(CrowdfundError::InvalidFee);
    }
    let net_share = (BASIS_POINTS - fee_basis_points) as i128;
    amount
        .checked_mul(BASIS_POINTS as i128)
        .map(|scaled| scaled / net_share)
        .ok_or(CrowdfundError::ArithmeticOverflow)
}

/// `part * numerator / denominator`, rounded down.
pub fn prorate(part: i128, numerator: i128, denominator: i128) -> Result<i128, CrowdfundError> {
    if denominator == 0 {
        return Ok(0);
    }
    part.checked_mul(numerator)
        .map(|scaled| scaled / denominator)
        .ok_or(CrowdfundError::ArithmeticOverflow)
}

/// Timestamp `delay` seconds after `from`, saturating at `u64::MAX`.
pub fn after(from: u64, delay: u64) -> u64 {
    from.saturating_add(delay)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fee_portion_rounds_down() {
        assert_eq!(fee_portion(420, 0).unwrap(), 0);
        assert_eq!(fee_portion(1002, 25).unwrap(), 2);
        assert_eq!(fee_portion(399, 25).unwrap(), 0);
        assert_eq!(fee_portion(10000, 25).unwrap(), 25);
    }

    #[test]
    fn test_inflate_for_fee() {
        assert_eq!(inflate_for_fee(420, 0).unwrap(), 420);
        assert_eq!(inflate_for_fee(778, 25).unwrap(), 779);
        assert_eq!(inflate_for_fee(1000, 25).unwrap(), 1002);
        assert_eq!(inflate_for_fee(1000, 10000), Err(CrowdfundError::InvalidFee));
        assert_eq!(
            inflate_for_fee(i128::MAX, 25),
            Err(CrowdfundError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_inflation_and_fee_residual_is_kept() {
        // 779 gross at 25 bps pays a fee of 1 and nets 778; 1002 nets 1000.
        let gross = inflate_for_fee(778, 25).unwrap();
        assert_eq!(gross - fee_portion(gross, 25).unwrap(), 778);
        let gross = inflate_for_fee(1000, 25).unwrap();
        assert_eq!(gross - fee_portion(gross, 25).unwrap(), 1000);
        // 7 gross at 25 bps nets 7 (fee rounds to zero) although 6 was asked.
        let gross = inflate_for_fee(7, 25).unwrap();
        assert_eq!(gross, 7);
        assert_eq!(gross - fee_portion(gross, 25).unwrap(), 7);
    }

    #[test]
    fn test_prorate() {
        assert_eq!(prorate(100, 300, 300).unwrap(), 100);
        assert_eq!(prorate(100, 0, 300).unwrap(), 0);
        assert_eq!(prorate(1, 2, 3).unwrap(), 0);
        assert_eq!(prorate(5, 10, 0).unwrap(), 0);
    }

    #[test]
    fn test_after_saturates() {
        assert_eq!(after(10, 5), 15);
        assert_eq!(after(u64::MAX - 1, 5), u64::MAX);
    }
}
