//! Tool options: deep merge, colour parsing and typed section views.

mod color;
mod merge;
pub mod views;

pub use color::{color_or, contrast_color, luminance, parse_color, to_css};
pub use merge::{deep_copy, merge_config, merged_with_defaults};

use serde_json::{Value, json};

use crate::constants::{DEFAULT_PRICE_PRECISION, MAX_PRICE_PRECISION};

/// Keys every tool carries on top of its shape defaults
pub fn base_defaults() -> Value {
    json!({
        "visible": true,
        "editable": true,
    })
}

/// Decimals for price text from the `precision` option, capped.
pub fn price_precision(options: &Value) -> usize {
    options
        .get("precision")
        .and_then(Value::as_u64)
        .map_or(DEFAULT_PRICE_PRECISION, |p| p.min(MAX_PRICE_PRECISION as u64) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_precision_is_capped() {
        assert_eq!(price_precision(&json!({})), DEFAULT_PRICE_PRECISION);
        assert_eq!(price_precision(&json!({ "precision": 4 })), 4);
        assert_eq!(price_precision(&json!({ "precision": 70000 })), MAX_PRICE_PRECISION);
        assert_eq!(price_precision(&json!({ "precision": -1 })), DEFAULT_PRICE_PRECISION);
    }
}
