use engine::{Category, Currency, Money};

/// One-line entry: sign prefix, amount, optional note, optional `#asset`
/// tag naming the account the flow moves through.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickAdd {
    pub category: Category,
    pub amount: Money,
    pub asset: Option<String>,
    pub note: Option<String>,
}

pub fn parse(input: &str, currency: Currency) -> Result<QuickAdd, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("enter an amount".to_string());
    }

    let (category, rest) = if let Some(stripped) = trimmed.strip_prefix('r') {
        (Category::Refund, stripped.trim_start())
    } else if let Some(stripped) = trimmed.strip_prefix('R') {
        (Category::Refund, stripped.trim_start())
    } else if let Some(stripped) = trimmed.strip_prefix('+') {
        (Category::Income, stripped.trim_start())
    } else if let Some(stripped) = trimmed.strip_prefix('-') {
        (Category::Expense, stripped.trim_start())
    } else {
        (Category::Expense, trimmed)
    };

    let mut parts = rest.splitn(2, ' ');
    let amount_raw = parts.next().unwrap_or("").trim();
    if amount_raw.is_empty() {
        return Err("missing amount".to_string());
    }
    let note_raw = parts.next().unwrap_or("").trim();

    let minor = Money::parse_major(amount_raw, currency)
        .map_err(|err| err.to_string())?
        .minor()
        .abs();
    if minor == 0 {
        return Err("amount must be > 0".to_string());
    }

    let (asset, note) = parse_tag(note_raw)?;

    Ok(QuickAdd {
        category,
        amount: Money::new(minor),
        asset,
        note,
    })
}

fn parse_tag(note_raw: &str) -> Result<(Option<String>, Option<String>), String> {
    if note_raw.is_empty() {
        return Ok((None, None));
    }

    let mut asset: Option<String> = None;
    let mut kept: Vec<&str> = Vec::new();

    for token in note_raw.split_whitespace() {
        if let Some(rest) = token.strip_prefix('#') {
            if rest.is_empty() {
                kept.push(token);
                continue;
            }
            if asset.is_some() {
                return Err("too many tags: at most 1".to_string());
            }
            asset = Some(rest.to_string());
        } else {
            kept.push(token);
        }
    }

    let note = kept.join(" ");
    let note = if note.is_empty() { None } else { Some(note) };
    Ok((asset, note))
}
