use crate::error::*;
use crate::types::*;

/// Helper: check a condition is true and return an error if not
pub fn check_condition<E>(condition: bool, err: E) -> Result<(), HarvestError>
where
    E: Into<HarvestError>,
{
    if !condition {
        return Err(err.into());
    }
    Ok(())
}

/// Helper: checked addition that reports overflow as a ledger error
#[inline(always)]
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount, HarvestError> {
    a.checked_add(b).ok_or(HarvestError::Overflow)
}

/// Helper: floor(amount * weight / total), computed in u128.
///
/// The result never exceeds `amount` as long as `weight <= total`.
#[inline(always)]
pub fn proportional_share(
    amount: Amount,
    weight: Amount,
    total: Amount,
) -> Result<Amount, HarvestError> {
    check_condition(total > 0, HarvestError::EmptyPool)?;

    let share = (amount as u128)
        .saturating_mul(weight as u128)
        / (total as u128);

    Amount::try_from(share).map_err(|_| HarvestError::Overflow)
}

/// Helper: build an account‖epoch key (big-endian epoch so keys sort by week)
pub fn account_epoch_key(account: &Account, epoch: Epoch) -> Vec<u8> {
    let mut key = Vec::with_capacity(crate::consts::ACCOUNT_LEN + crate::consts::EPOCH_LEN);
    key.extend_from_slice(account.as_ref());
    key.extend_from_slice(&epoch.to_be_bytes());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportional_share_floors() {
        assert_eq!(proportional_share(1000, 100, 300).unwrap(), 333);
        assert_eq!(proportional_share(1000, 200, 300).unwrap(), 666);
        assert_eq!(proportional_share(200, 100, 100).unwrap(), 200);
        assert_eq!(proportional_share(1, 1, 3).unwrap(), 0);
    }

    #[test]
    fn test_proportional_share_wide_operands() {
        let share = proportional_share(u64::MAX, u64::MAX - 1, u64::MAX).unwrap();
        assert_eq!(share, u64::MAX - 1);
    }

    #[test]
    fn test_proportional_share_empty_total() {
        assert_eq!(proportional_share(10, 0, 0), Err(HarvestError::EmptyPool));
    }

    #[test]
    fn test_account_epoch_key_layout() {
        let account = Pubkey::new_unique();
        let key = account_epoch_key(&account, 3);
        assert_eq!(key.len(), 40);
        assert_eq!(&key[..32], account.as_ref());
        assert_eq!(&key[32..], &3u64.to_be_bytes());
    }
}
