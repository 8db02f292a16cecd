use std::cmp::Ordering;

/// Finder-style name ordering: case-insensitive, with runs of digits
/// compared by numeric value (`lib2` < `lib10`).
///
/// Names equal under that rule fall back to plain string order so the
/// result is a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (x, y) = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => (x, y),
        };

        let ord = if x.is_ascii_digit() && y.is_ascii_digit() {
            let l = take_digits(&mut left);
            let r = take_digits(&mut right);
            compare_numeric(&l, &r)
        } else {
            left.next();
            right.next();
            Iterator::cmp(x.to_lowercase(), y.to_lowercase())
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }

    a.cmp(b)
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
