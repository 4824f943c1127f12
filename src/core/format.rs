const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Compact rupee amount: `₹1.2Cr`, `₹11.6L`, `₹60K`, `₹950`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let magnitude = amount.abs();
    let body = if magnitude >= CRORE {
        format!("{:.1}Cr", magnitude / CRORE)
    } else if magnitude >= LAKH {
        format!("{:.1}L", magnitude / LAKH)
    } else if magnitude >= THOUSAND {
        format!("{:.0}K", magnitude / THOUSAND)
    } else {
        format_number(magnitude.round())
    };
    format!("{sign}₹{body}")
}

/// Whole number with Indian digit grouping: `12,34,567`.
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{sign}{},{tail}", groups.join(","))
}
