//! Input validation helpers

use bigdecimal::BigDecimal;

use crate::types::*;

/// Validate a chart-of-accounts code
pub fn validate_account_code(code: &str) -> LedgerResult<()> {
    if code.trim().is_empty() {
        return Err(LedgerError::Validation(
            "account code cannot be empty".to_string(),
        ));
    }

    if code.len() > 20 {
        return Err(LedgerError::Validation(
            "account code cannot exceed 20 characters".to_string(),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LedgerError::Validation(
            "account code can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate an account display name
pub fn validate_account_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(
            "account name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(LedgerError::Validation(
            "account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a journal entry description
pub fn validate_description(description: &str) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation(
            "entry description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(LedgerError::Validation(
            "entry description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate the amounts on a journal line
///
/// Both sides must be non-negative; conventionally one of them is zero,
/// but that is not enforced.
pub fn validate_line_amounts(line: &JournalLine) -> LedgerResult<()> {
    let zero = BigDecimal::from(0);
    if line.debit < zero || line.credit < zero {
        return Err(LedgerError::Validation(format!(
            "line amounts for account '{}' must be non-negative",
            line.account_code
        )));
    }
    validate_account_code(&line.account_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_rules() {
        assert!(validate_account_code("1000").is_ok());
        assert!(validate_account_code("misc_expenses-2").is_ok());
        assert!(validate_account_code("").is_err());
        assert!(validate_account_code("   ").is_err());
        assert!(validate_account_code("a".repeat(21).as_str()).is_err());
        assert!(validate_account_code("10 00").is_err());
    }

    #[test]
    fn name_rules() {
        assert!(validate_account_name("Cash").is_ok());
        assert!(validate_account_name("").is_err());
        assert!(validate_account_name("x".repeat(101).as_str()).is_err());
    }

    #[test]
    fn line_amount_rules() {
        let ok = JournalLine::debit("1000", "Cash", BigDecimal::from(10));
        assert!(validate_line_amounts(&ok).is_ok());

        let mut negative = JournalLine::credit("1000", "Cash", BigDecimal::from(10));
        negative.credit = BigDecimal::from(-10);
        assert!(validate_line_amounts(&negative).is_err());
    }
}
