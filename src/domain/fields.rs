use crate::errors::ValidationError;
use chrono::NaiveDate;

/// Require a non-blank value, returning it trimmed
pub fn required(label: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(label));
    }
    Ok(trimmed.to_string())
}

/// Parse a YYYY-MM-DD date; blank means `default`
pub fn parse_date(value: &str, default: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ValidationError::Unparsable {
        field: "date",
        value: trimmed.to_string(),
    })
}

/// Parse a money amount. Accepts a leading '$' and thousands separators.
pub fn parse_amount(value: &str) -> Result<f64, ValidationError> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Ok(0.0);
    }

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ValidationError::Unparsable {
            field: "amount",
            value: value.trim().to_string(),
        }),
    }
}

/// Format an amount as US dollars, e.g. "$1,234.50"
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let digits = dollars.to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
