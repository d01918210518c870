//! Payload classification using PEST for the structured forms.
//!
//! Order of attempts: aggregated gauge, simple gauge, counter delta, then a bare number.
//! Tokens carrying a `gauge,` or `count,` prefix never fall back to the bare-number form.

use crate::error::{ErrorKind, Violation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct PayloadParser;

/// The value carried by a valid payload token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadKind {
    /// `gauge,<num>`
    SimpleGauge { value: f64 },
    /// `gauge,min=<num>,max=<num>,sum=<num>,count=<uint>`
    AggregatedGauge { min: f64, max: f64, sum: f64, count: u64 },
    /// `count,delta=<num>`
    CountDelta { value: f64 },
    /// A plain number, taken as a gauge.
    BareNumericGauge { value: f64 },
}

const STRUCTURED_PREFIXES: [&str; 2] = ["gauge,", "count,"];

/// Classify a payload token.
pub fn classify_payload(token: &str) -> Result<PayloadKind, Violation> {
    if let Some(kind) = parse_structured(token) {
        return Ok(kind);
    }
    if !STRUCTURED_PREFIXES.iter().any(|p| token.starts_with(p)) {
        if let Ok(value) = token.parse::<f64>() {
            return Ok(PayloadKind::BareNumericGauge { value });
        }
    }
    Err(Violation::new(
        ErrorKind::PayloadInvalidFormat,
        format!("Invalid payload format: '{}'", token),
    ))
}

fn parse_structured(token: &str) -> Option<PayloadKind> {
    let pair = PayloadParser::parse(Rule::payload, token).ok()?.next()?;
    let form = pair.into_inner().next()?;
    let rule = form.as_rule();
    let mut numbers = form.into_inner().filter(|p| p.as_rule() != Rule::EOI);
    match rule {
        Rule::aggregated_gauge => Some(PayloadKind::AggregatedGauge {
            min: number(numbers.next()?)?,
            max: number(numbers.next()?)?,
            sum: number(numbers.next()?)?,
            // digits that overflow u64 make the payload invalid
            count: numbers.next()?.as_str().parse().ok()?,
        }),
        Rule::simple_gauge => Some(PayloadKind::SimpleGauge {
            value: number(numbers.next()?)?,
        }),
        Rule::count_delta => Some(PayloadKind::CountDelta {
            value: number(numbers.next()?)?,
        }),
        _ => None,
    }
}

fn number(pair: Pair<Rule>) -> Option<f64> {
    pair.as_str().parse().ok()
}
