pub mod date;
pub mod money;

use crate::error::AppError;

pub use date::normalize_date;
pub use money::normalize_amount;

/// Normaliza valor e data do formato brasileiro para as formas canônicas
/// (`"1234.56"`, `"2025-04-07"`).
pub fn normalize(amount: &str, date: &str) -> Result<(String, String), AppError> {
    Ok((normalize_amount(amount), normalize_date(date)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pair() {
        let (amount, date) = normalize("1.234,56", "07/04/2025").unwrap();
        assert_eq!(amount, "1234.56");
        assert_eq!(date, "2025-04-07");
    }

    #[test]
    fn test_normalize_fails_on_date_only() {
        assert!(matches!(
            normalize("1,00", "2025/04"),
            Err(AppError::Format(_))
        ));
    }
}
