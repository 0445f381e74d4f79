/// Numbers recovered from free-form text input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub values: Vec<f64>,
    /// Tokens that could not be read as a number.
    pub skipped: usize,
}

/// Parse whitespace-separated tokens. A token containing `.` is read as a
/// float, anything else as an integer. Unreadable or non-finite tokens are
/// counted in `skipped` and left out.
pub fn parse_numbers(text: &str) -> ParsedInput {
    let mut values = Vec::new();
    let mut skipped = 0usize;

    for token in text.split_whitespace() {
        match parse_token(token) {
            Some(v) => values.push(v),
            None => skipped += 1,
        }
    }

    ParsedInput { values, skipped }
}

fn parse_token(token: &str) -> Option<f64> {
    let value = if token.contains('.') {
        token.parse::<f64>().ok()?
    } else {
        token.parse::<i64>().ok()? as f64
    };
    value.is_finite().then_some(value)
}

/// Why a z-score lookup value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupInputError {
    Empty,
    NotNumeric,
}

/// Parse the single value typed into the z-score search box.
pub fn parse_lookup_value(text: &str) -> Result<f64, LookupInputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LookupInputError::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LookupInputError::NotNumeric),
    }
}

/// Text written back into the input box after a file import.
pub fn values_to_input_text(values: &[f64]) -> String {
    values.iter().map(|v| format!("{v} ")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_integers_and_floats() {
        let parsed = parse_numbers("1 2.5  -3\n4.0\t+7");
        assert_eq!(parsed.values, vec![1.0, 2.5, -3.0, 4.0, 7.0]);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn bad_tokens_are_skipped_and_counted() {
        let parsed = parse_numbers("1 abc 2 3.x 1e3 4");
        assert_eq!(parsed.values, vec![1.0, 2.0, 4.0]);
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn float_tokens_accept_exponents_with_a_point() {
        let parsed = parse_numbers("1.5e2 .5 5.");
        assert_eq!(parsed.values, vec![150.0, 0.5, 5.0]);
    }

    #[test]
    fn non_finite_tokens_are_rejected() {
        let parsed = parse_numbers("1.0e400 inf nan 2");
        assert_eq!(parsed.values, vec![2.0]);
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn blank_input_has_nothing() {
        let parsed = parse_numbers("   \n ");
        assert!(parsed.values.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn lookup_value_parsing() {
        assert_eq!(parse_lookup_value(" 4 "), Ok(4.0));
        assert_eq!(parse_lookup_value("-0.5"), Ok(-0.5));
        assert_eq!(parse_lookup_value("  "), Err(LookupInputError::Empty));
        assert_eq!(parse_lookup_value("four"), Err(LookupInputError::NotNumeric));
        assert_eq!(parse_lookup_value("inf"), Err(LookupInputError::NotNumeric));
    }

    #[test]
    fn input_text_has_trailing_spaces() {
        assert_eq!(values_to_input_text(&[1.0, -20.0, 3.0]), "1 -20 3 ");
    }
}
