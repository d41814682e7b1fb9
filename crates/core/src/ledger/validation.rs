//! Input validation shared by the ledgers.

use rust_decimal::Decimal;

use super::error::LedgerError;

/// Maximum length of an account or transaction name, in characters.
pub const MAX_NAME_LEN: usize = 120;

/// Number of fractional digits money values may carry.
pub const MONEY_SCALE: u32 = 4;

/// Largest magnitude a balance or amount may reach (`NUMERIC(19, 4)`).
#[must_use]
pub fn max_money() -> Decimal {
    Decimal::from_i128_with_scale(9_999_999_999_999_999_999, MONEY_SCALE)
}

/// Returns true if `value` fits the stored money precision.
#[must_use]
pub fn fits_money(value: Decimal) -> bool {
    value.normalize().scale() <= MONEY_SCALE && value.abs() <= max_money()
}

/// Trims an account name and checks it is non-blank and not too long.
///
/// # Errors
///
/// Returns `InvalidName` if the trimmed name is empty or too long.
pub fn account_name(raw: &str) -> Result<String, LedgerError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidName("account name is required".into()));
    }
    check_length(name)?;
    Ok(name.to_string())
}

/// Trims a transaction name. Blank names are allowed.
///
/// # Errors
///
/// Returns `InvalidName` if the trimmed name is too long.
pub fn transaction_name(raw: &str) -> Result<String, LedgerError> {
    let name = raw.trim();
    check_length(name)?;
    Ok(name.to_string())
}

fn check_length(name: &str) -> Result<(), LedgerError> {
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(LedgerError::InvalidName(format!(
            "name has {len} characters, at most {MAX_NAME_LEN} allowed"
        )));
    }
    Ok(())
}

/// Checks that a balance supplied directly by a user is not negative and
/// fits the stored money precision.
///
/// # Errors
///
/// Returns `InvalidBalance` for a negative, too precise, or too large balance.
pub fn non_negative_balance(balance: Decimal) -> Result<Decimal, LedgerError> {
    if balance < Decimal::ZERO || !fits_money(balance) {
        return Err(LedgerError::InvalidBalance(balance));
    }
    Ok(balance)
}

/// Checks that a transaction amount is strictly positive and fits the
/// stored money precision.
///
/// # Errors
///
/// Returns `InvalidAmount` for zero, negative, too precise, or too large
/// amounts.
pub fn positive_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO || !fits_money(amount) {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("  Wallet  ", "Wallet")]
    #[case("Main checking", "Main checking")]
    fn test_account_name_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(account_name(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_account_name_rejected(#[case] raw: &str) {
        assert!(matches!(account_name(raw), Err(LedgerError::InvalidName(_))));
    }

    #[test]
    fn test_name_length_limit() {
        let exact = "a".repeat(MAX_NAME_LEN);
        let over = "a".repeat(MAX_NAME_LEN + 1);
        assert!(account_name(&exact).is_ok());
        assert!(account_name(&over).is_err());
        assert!(transaction_name(&over).is_err());
    }

    #[test]
    fn test_blank_transaction_name_allowed() {
        assert_eq!(transaction_name("  ").unwrap(), "");
    }

    #[rstest]
    #[case(dec!(0), true)]
    #[case(dec!(-0.00), true)]
    #[case(dec!(0.01), true)]
    #[case(dec!(-0.01), false)]
    fn test_non_negative_balance(#[case] balance: Decimal, #[case] ok: bool) {
        assert_eq!(non_negative_balance(balance).is_ok(), ok);
    }

    #[rstest]
    #[case(dec!(0.01), true)]
    #[case(dec!(0.0001), true)]
    #[case(dec!(10.00000), true)]
    #[case(dec!(0), false)]
    #[case(dec!(-5), false)]
    #[case(dec!(0.00005), false)]
    #[case(dec!(0.00001), false)]
    fn test_positive_amount(#[case] amount: Decimal, #[case] ok: bool) {
        assert_eq!(positive_amount(amount).is_ok(), ok);
    }

    #[rstest]
    #[case(dec!(1.2345), true)]
    #[case(dec!(1.23456), false)]
    fn test_balance_precision(#[case] balance: Decimal, #[case] ok: bool) {
        assert_eq!(non_negative_balance(balance).is_ok(), ok);
    }

    #[test]
    fn test_money_magnitude_limit() {
        let max = max_money();
        assert_eq!(max.to_string(), "999999999999999.9999");
        assert!(positive_amount(max).is_ok());
        assert!(non_negative_balance(max).is_ok());

        let over = max + dec!(0.0001);
        assert!(matches!(positive_amount(over), Err(LedgerError::InvalidAmount(_))));
        assert!(matches!(non_negative_balance(over), Err(LedgerError::InvalidBalance(_))));
        assert!(matches!(
            positive_amount(Decimal::MAX),
            Err(LedgerError::InvalidAmount(_))
        ));
    }
}
