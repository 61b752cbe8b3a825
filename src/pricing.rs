//! Price formatting for the offer shown on every page

use crate::config::SiteConfig;

/// Format an amount the way an en-US currency formatter does: `$1,250.00`, `¥45`
pub fn format_price(amount: f64, currency: &str) -> String {
    let decimals = minor_unit_digits(currency);
    let scale = 10i64.pow(decimals);
    let units = (amount * scale as f64).round() as i64;
    let sign = if units < 0 { "-" } else { "" };
    let units = units.abs();
    let whole = group_thousands(units / scale);
    let number = if decimals == 0 {
        whole
    } else {
        format!("{whole}.{:0width$}", units % scale, width = decimals as usize)
    };

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{} {number}", currency.to_uppercase()),
    }
}

/// ISO 4217 currencies without a minor unit print whole amounts
fn minor_unit_digits(currency: &str) -> u32 {
    match currency.to_uppercase().as_str() {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
        _ => 2,
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// One-time setup fee, or "Contact Sales" when hidden
pub fn upfront_price(site: &SiteConfig) -> String {
    if !site.display_upfront {
        return "Contact Sales".to_string();
    }
    format_price(site.upfront_amount, &site.currency)
}

/// Recurring hosting fee with its period
pub fn monthly_price(site: &SiteConfig) -> String {
    if !site.display_monthly {
        return "Contact Sales".to_string();
    }
    format!("{}/month", format_price(site.monthly_amount, &site.currency))
}

/// Like [`monthly_price`] but a zero fee reads "Free"
pub fn full_monthly_price(site: &SiteConfig) -> String {
    if site.display_monthly && site.monthly_amount == 0.0 {
        return "Free".to_string();
    }
    monthly_price(site)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_like_en_us_currency() {
        assert_eq!(format_price(45.0, "USD"), "$45.00");
        assert_eq!(format_price(5.5, "usd"), "$5.50");
        assert_eq!(format_price(1250.0, "USD"), "$1,250.00");
        assert_eq!(format_price(1234567.891, "EUR"), "€1,234,567.89");
        assert_eq!(format_price(10.0, "CHF"), "CHF 10.00");
    }

    #[test]
    fn zero_decimal_currencies_print_whole_amounts() {
        assert_eq!(format_price(45.0, "JPY"), "¥45");
        assert_eq!(format_price(4500.4, "jpy"), "¥4,500");
        assert_eq!(format_price(12000.0, "KRW"), "KRW 12,000");
    }

    #[test]
    fn offer_strings() {
        let mut site = SiteConfig::default();
        assert_eq!(upfront_price(&site), "$45.00");
        assert_eq!(monthly_price(&site), "$5.00/month");

        site.monthly_amount = 0.0;
        assert_eq!(full_monthly_price(&site), "Free");
        assert_eq!(monthly_price(&site), "$0.00/month");

        site.display_upfront = false;
        assert_eq!(upfront_price(&site), "Contact Sales");
    }
}
