use chrono::NaiveDate;

use crate::error::AppError;

/// Ano com quatro dígitos, como em `DD/MM/AAAA`.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Converte `DD/MM/AAAA` em `AAAA-MM-DD`, completando dia e mês com zero.
pub fn normalize_date(date: &str) -> Result<String, AppError> {
    let parts: Vec<&str> = date.trim().split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid(date));
    };

    let day: u32 = parse_component(day).ok_or_else(|| invalid(date))?;
    let month: u32 = parse_component(month).ok_or_else(|| invalid(date))?;
    let year: i32 = parse_component(year)
        .filter(|year| YEAR_RANGE.contains(year))
        .ok_or_else(|| invalid(date))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid(date))?;
    Ok(format!("{year}-{month:02}-{day:02}"))
}

fn parse_component<T: std::str::FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn invalid(date: &str) -> AppError {
    AppError::Format(format!(
        "Data de pagamento inválida: '{date}' (esperado DD/MM/AAAA)"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_padded_date() {
        assert_eq!(normalize_date("07/04/2025").unwrap(), "2025-04-07");
    }

    #[test]
    fn test_normalize_unpadded_date() {
        assert_eq!(normalize_date("7/4/2025").unwrap(), "2025-04-07");
    }

    #[test]
    fn test_rejects_wrong_component_count() {
        assert!(matches!(normalize_date("07/04"), Err(AppError::Format(_))));
        assert!(matches!(normalize_date("07/04/2025/1"), Err(AppError::Format(_))));
        assert!(matches!(normalize_date("2025-04-07"), Err(AppError::Format(_))));
        assert!(matches!(normalize_date(""), Err(AppError::Format(_))));
    }

    #[test]
    fn test_rejects_non_numeric_and_impossible_dates() {
        assert!(normalize_date("aa/04/2025").is_err());
        assert!(normalize_date("-1/04/2025").is_err());
        assert!(normalize_date("31/02/2025").is_err());
        assert!(normalize_date("07/13/2025").is_err());
    }

    #[test]
    fn test_rejects_years_without_four_digits() {
        assert!(matches!(normalize_date("7/4/25"), Err(AppError::Format(_))));
        assert!(matches!(normalize_date("1/1/10000"), Err(AppError::Format(_))));
        assert!(matches!(normalize_date("1/1/0999"), Err(AppError::Format(_))));
        assert_eq!(normalize_date("1/1/1000").unwrap(), "1000-01-01");
        assert_eq!(normalize_date("31/12/9999").unwrap(), "9999-12-31");
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(normalize_date("29/2/2024").unwrap(), "2024-02-29");
        assert!(normalize_date("29/02/2023").is_err());
    }

    proptest! {
        #[test]
        fn prop_padding_does_not_change_result(day in 1u32..=28, month in 1u32..=12, year in 1900i32..2100) {
            let padded = normalize_date(&format!("{day:02}/{month:02}/{year}")).unwrap();
            let unpadded = normalize_date(&format!("{day}/{month}/{year}")).unwrap();
            prop_assert_eq!(&padded, &unpadded);
            prop_assert_eq!(padded, format!("{year:04}-{month:02}-{day:02}"));
        }
    }
}
