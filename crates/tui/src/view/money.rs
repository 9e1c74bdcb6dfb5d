pub const CURRENCY_SYMBOL: &str = "₹";

/// `₹1234.50`, `-₹3.00`; always two fractional digits.
pub fn format_amount(amount: f64) -> String {
    let digits = format!("{:.2}", amount.abs());
    let sign = if amount < 0.0 && digits != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{CURRENCY_SYMBOL}{digits}")
}
