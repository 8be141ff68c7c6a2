//! Literal input series read from delimited text.
//!
//! Samples are separated by commas, semicolons, or whitespace, across any
//! number of lines. Everything after a `#` on a line is ignored.

use cortex_core::Energy;

use crate::error::SignalError;

/// Parse every sample in `text`, in order.
///
/// ```
/// use cortex_signal::parse_series;
///
/// let series = parse_series("0.5, 1.0\n# rest\n-0.5 0").unwrap();
/// assert_eq!(series, vec![0.5, 1.0, -0.5, 0.0]);
/// ```
///
/// # Errors
///
/// [`SignalError::InvalidSample`] for the first token that does not parse
/// as a finite `f64`.
pub fn parse_series(text: &str) -> Result<Vec<Energy>, SignalError> {
    let mut series = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let data = line.split('#').next().unwrap_or_default();
        let tokens = data
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|t| !t.is_empty());
        for token in tokens {
            match token.parse::<Energy>() {
                Ok(v) if v.is_finite() => series.push(v),
                _ => {
                    return Err(SignalError::InvalidSample {
                        line: i + 1,
                        token: token.to_string(),
                    })
                }
            }
        }
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_value_per_line() {
        assert_eq!(parse_series("1\n2\n3\n").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn mixed_delimiters_and_blank_lines() {
        let text = "1.5;2.5\n\n  -1e-3 , 4\t5\r\n";
        assert_eq!(parse_series(text).unwrap(), vec![1.5, 2.5, -0.001, 4.0, 5.0]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(parse_series("# header\n7 # trailing").unwrap(), vec![7.0]);
    }

    #[test]
    fn bad_token_reports_line() {
        assert_eq!(
            parse_series("1, 2\n3, x4"),
            Err(SignalError::InvalidSample {
                line: 2,
                token: "x4".to_string()
            })
        );
    }

    #[test]
    fn non_finite_is_rejected() {
        match parse_series("inf") {
            Err(SignalError::InvalidSample { line: 1, .. }) => {}
            other => panic!("expected InvalidSample, got {other:?}"),
        }
    }

    #[test]
    fn empty_text_is_empty_series() {
        assert!(parse_series("").unwrap().is_empty());
    }
}
