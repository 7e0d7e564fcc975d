/// Fixed-point rendering used for scores and normalized values.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Render an amount as whole Indonesian rupiah, e.g. `Rp 500.000.000`.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if rounded < 0.0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
