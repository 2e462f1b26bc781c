// src/menu/price.rs
// Currency formatting for menu prices, US dollars in en-US style.

/// Formats `value` like `$1,234.50`.
///
/// Cents are rounded half away from zero on the shortest decimal form of
/// the number, so 0.125 shows as `$0.13` the same way a browser shows it.
/// Negative amounts get a leading minus (`-$3.00`); a price that could not
/// be read as a number shows as `$NaN`.
pub fn format_price(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_infinite() {
        return format!("{}$∞", sign);
    }

    // Display prints the shortest form that round-trips, never exponents
    let shortest = value.abs().to_string();
    let (whole, fraction) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = whole.bytes().map(|b| b - b'0').collect();
    let mut cents: Vec<u8> = fraction.bytes().map(|b| b - b'0').collect();
    let round_up = cents.get(2).is_some_and(|digit| *digit >= 5);
    cents.resize(2, 0);
    digits.extend(cents);

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let (whole, cents) = digits.split_at(digits.len() - 2);
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.iter().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(b'0' + digit));
    }
    let cents: String = cents.iter().map(|d| char::from(b'0' + d)).collect();

    format!("{}${}.{}", sign, grouped, cents)
}
