//! Rate conversion: given a catalog and two selected symbols, derive an
//! output amount and a display exchange rate. All prices are quoted in
//! one common reference unit, so a conversion is a single division of
//! cross-multiplied values, never a multi-hop route.

use crate::catalog::PriceCatalog;
use crate::error::SwapError;

/// One conversion attempt. Constructed fresh on every input change and
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from_symbol: String,
    pub to_symbol: String,
    /// `None` is the idle state (empty input box), not an error.
    pub input_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionResult {
    /// Output amount with exactly 6 fractional digits, `None` while idle.
    pub output_amount: Option<String>,
    /// "1 FROM = R TO" with R to 6 fractional digits. Independent of the
    /// input amount; `None` when either price is missing.
    pub display_rate: Option<String>,
}

/// Rounds to 6 fractional digits, half away from zero (`f64::round`
/// semantics scaled by 1e6). This is the single rounding rule of the
/// whole crate; there is no currency-specific rounding.
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Formats a value the way the output box renders it: 6 fractional
/// digits, always.
pub fn format6(value: f64) -> String {
    format!("{:.6}", round6(value))
}

/// Computes the conversion for a request against an immutable catalog.
///
/// Preconditions are checked in order, each a distinct outcome:
/// 1. absent input amount -> idle result (no output, no error);
/// 2. missing price for either symbol -> `PriceUnavailable`;
/// 3. otherwise `output = round6(amount * price[from] / price[to])`.
///
/// Identical from/to symbols are well-defined here (rate 1, output =
/// input); rejecting a same-token swap is the submission step's job.
///
/// Pure and synchronous: no I/O, no side effects, idempotent for
/// identical inputs.
pub fn convert(catalog: &PriceCatalog, request: &ConversionRequest) -> Result<ConversionResult, SwapError> {
    let rate = display_rate(catalog, &request.from_symbol, &request.to_symbol);

    let amount = match request.input_amount {
        Some(amount) => amount,
        None => {
            return Ok(ConversionResult {
                output_amount: None,
                display_rate: rate,
            })
        }
    };

    let from_price = catalog.price_of(&request.from_symbol).ok_or_else(|| {
        SwapError::PriceUnavailable(format!("no price for {}", request.from_symbol))
    })?;
    let to_price = catalog
        .price_of(&request.to_symbol)
        .ok_or_else(|| SwapError::PriceUnavailable(format!("no price for {}", request.to_symbol)))?;

    let reference_value = amount * from_price;
    let output_amount = reference_value / to_price;

    Ok(ConversionResult {
        output_amount: Some(format6(output_amount)),
        display_rate: rate,
    })
}

/// The exchange-rate line shown under the amount boxes. Computed from
/// the two reference prices alone; `None` when either is missing.
pub fn display_rate(catalog: &PriceCatalog, from_symbol: &str, to_symbol: &str) -> Option<String> {
    let from_price = catalog.price_of(from_symbol)?;
    let to_price = catalog.price_of(to_symbol)?;
    Some(format!(
        "1 {} = {} {}",
        from_symbol,
        format6(from_price / to_price),
        to_symbol
    ))
}

/// Keystroke-level predicate for the amount input box: accepts exactly
/// the strings of shape "digits, at most one dot, digits" including the
/// intermediate states "", "12." and ".5". This is a pattern check, not
/// numeric validation; submission applies `parse_amount` on top.
pub fn is_valid_amount_input(value: &str) -> bool {
    let mut seen_dot = false;
    for ch in value.chars() {
        match ch {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

/// Numeric interpretation of an accepted input string. Empty and
/// dot-only strings have no numeric value.
pub fn parse_amount(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok()
}
