use std::collections::HashMap;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::currency::CurrencyCode;
use super::fx_errors::FxError;
use super::fx_model::{FormatOptions, RateToBase};
use super::fx_traits::FxServiceTrait;
use crate::constants::BASE_CURRENCY;
use crate::errors::Result;

/// Normalizes an amount coming across the f64/JSON boundary. NaN and
/// infinities become zero; calculations downstream only ever see finite
/// decimals.
pub fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Currency conversion engine over a fixed rate table anchored to
/// [`BASE_CURRENCY`].
///
/// All rounding in this engine is round-half-to-even (banker's
/// rounding, `Decimal::round_dp`) at the target currency's precision.
pub struct FxService {
    rates: HashMap<CurrencyCode, Decimal>,
}

impl FxService {
    /// Builds an engine from rate-to-base entries. Rates must be
    /// positive, and a base-currency entry, if present, must be exactly 1.
    pub fn new(rate_table: Vec<RateToBase>) -> Result<Self> {
        let mut rates = HashMap::new();
        for entry in rate_table {
            if entry.rate <= Decimal::ZERO {
                return Err(FxError::InvalidRate(format!(
                    "Rate for {} must be positive, got {}",
                    entry.currency, entry.rate
                ))
                .into());
            }
            if entry.currency == BASE_CURRENCY && entry.rate != Decimal::ONE {
                return Err(FxError::InvalidRate(format!(
                    "Base currency {} must have rate 1, got {}",
                    entry.currency, entry.rate
                ))
                .into());
            }
            rates.insert(entry.currency, entry.rate);
        }
        rates.entry(BASE_CURRENCY).or_insert(Decimal::ONE);
        Ok(FxService { rates })
    }

    /// Engine preloaded with the static illustrative rate table.
    pub fn with_default_rates() -> Self {
        let mut rates = HashMap::new();
        for entry in Self::default_rate_table() {
            rates.insert(entry.currency, entry.rate);
        }
        FxService { rates }
    }

    /// Fixed illustrative rates, expressed as units of CNY per unit of
    /// the listed currency. Not market data.
    pub fn default_rate_table() -> Vec<RateToBase> {
        vec![
            RateToBase {
                currency: CurrencyCode::Cny,
                rate: Decimal::ONE,
            },
            RateToBase {
                currency: CurrencyCode::Usd,
                rate: dec!(7.2),
            },
            RateToBase {
                currency: CurrencyCode::Eur,
                rate: dec!(7.8),
            },
            RateToBase {
                currency: CurrencyCode::Gbp,
                rate: dec!(9.1),
            },
            RateToBase {
                currency: CurrencyCode::Jpy,
                rate: dec!(0.048),
            },
            RateToBase {
                currency: CurrencyCode::Hkd,
                rate: dec!(0.92),
            },
            RateToBase {
                currency: CurrencyCode::Krw,
                rate: dec!(0.0054),
            },
        ]
    }

    /// A code missing from the table can only come from a corrupted
    /// configuration, so this fails loudly instead of degrading.
    fn rate_to_base(&self, code: CurrencyCode) -> Result<Decimal> {
        self.rates.get(&code).copied().ok_or_else(|| {
            FxError::RateNotFound(format!("No rate-to-base entry for {}", code)).into()
        })
    }
}

impl FxServiceTrait for FxService {
    fn convert(&self, amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Result<Decimal> {
        // Identity still rounds, so repeated no-op conversions are stable.
        if from == to {
            return Ok(self.round_with_precision(amount, to));
        }
        let from_rate = self.rate_to_base(from)?;
        let to_rate = self.rate_to_base(to)?;
        let converted = amount * from_rate / to_rate;
        Ok(self.round_with_precision(converted, to))
    }

    fn round_with_precision(&self, amount: Decimal, code: CurrencyCode) -> Decimal {
        amount.round_dp(code.precision())
    }

    fn format(&self, amount: Decimal, code: CurrencyCode, options: &FormatOptions) -> String {
        let meta = code.meta();
        let rounded = amount.round_dp(meta.precision);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let text = rounded.abs().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part.to_string(), frac_part.to_string()),
            None => (text, String::new()),
        };

        // round_dp caps the scale at the precision; pad short fractions
        let mut frac = frac_part;
        while (frac.len() as u32) < meta.precision {
            frac.push('0');
        }

        let int_rendered = if options.use_grouping {
            group_thousands(&int_part)
        } else {
            int_part
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        if options.with_symbol {
            out.push_str(meta.symbol);
        }
        out.push_str(&int_rendered);
        if meta.precision > 0 {
            out.push('.');
            out.push_str(&frac);
        }
        out
    }

    fn convert_and_format(
        &self,
        amount: Decimal,
        from: CurrencyCode,
        to: CurrencyCode,
        options: &FormatOptions,
    ) -> Result<String> {
        let converted = self.convert(amount, from, to)?;
        Ok(self.format(converted, to, options))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> FxService {
        FxService::with_default_rates()
    }

    #[test]
    fn test_identity_conversion_still_rounds() {
        let fx = service();
        let converted = fx
            .convert(dec!(36.2999), CurrencyCode::Cny, CurrencyCode::Cny)
            .unwrap();
        assert_eq!(converted, dec!(36.30));
        assert_eq!(
            converted,
            fx.round_with_precision(dec!(36.2999), CurrencyCode::Cny)
        );
    }

    #[test]
    fn test_half_to_even_at_precision() {
        let fx = service();
        // Ties round to the even neighbour
        assert_eq!(
            fx.round_with_precision(dec!(1.005), CurrencyCode::Cny),
            dec!(1.00)
        );
        assert_eq!(
            fx.round_with_precision(dec!(1.015), CurrencyCode::Cny),
            dec!(1.02)
        );
        assert_eq!(
            fx.round_with_precision(dec!(0.5), CurrencyCode::Jpy),
            dec!(0)
        );
    }

    #[test]
    fn test_usd_to_cny_uses_fixed_rate() {
        let fx = service();
        let converted = fx
            .convert(dec!(10), CurrencyCode::Usd, CurrencyCode::Cny)
            .unwrap();
        assert_eq!(converted, dec!(72.00));
    }

    #[test]
    fn test_cross_rate_goes_through_base() {
        let fx = service();
        // 100 USD = 720 CNY = 15000 JPY
        let converted = fx
            .convert(dec!(100), CurrencyCode::Usd, CurrencyCode::Jpy)
            .unwrap();
        assert_eq!(converted, dec!(15000));
    }

    #[test]
    fn test_round_trip_within_one_minor_unit() {
        let fx = service();
        let amount = dec!(123.45);
        let there = fx
            .convert(amount, CurrencyCode::Usd, CurrencyCode::Krw)
            .unwrap();
        let back = fx
            .convert(there, CurrencyCode::Krw, CurrencyCode::Usd)
            .unwrap();
        assert!((back - amount).abs() <= dec!(0.01));
    }

    #[test]
    fn test_missing_rate_fails_loudly() {
        let fx = FxService::new(vec![]).unwrap();
        let result = fx.convert(dec!(1), CurrencyCode::Usd, CurrencyCode::Cny);
        assert!(matches!(
            result,
            Err(crate::errors::Error::Fx(FxError::RateNotFound(_)))
        ));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let result = FxService::new(vec![RateToBase {
            currency: CurrencyCode::Usd,
            rate: dec!(0),
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_base_rate_other_than_one() {
        let result = FxService::new(vec![RateToBase {
            currency: CurrencyCode::Cny,
            rate: dec!(2),
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_grouping_and_symbol() {
        let fx = service();
        let options = FormatOptions::default();
        assert_eq!(
            fx.format(dec!(1234.5), CurrencyCode::Usd, &options),
            "$1,234.50"
        );
        assert_eq!(
            fx.format(dec!(1234567), CurrencyCode::Jpy, &options),
            "JP¥1,234,567"
        );
    }

    #[test]
    fn test_format_without_symbol_or_grouping() {
        let fx = service();
        let options = FormatOptions {
            with_symbol: false,
            use_grouping: false,
        };
        assert_eq!(fx.format(dec!(9876.5), CurrencyCode::Eur, &options), "9876.50");
    }

    #[test]
    fn test_format_negative_amount() {
        let fx = service();
        assert_eq!(
            fx.format(dec!(-42.1), CurrencyCode::Gbp, &FormatOptions::default()),
            "-£42.10"
        );
    }

    #[test]
    fn test_format_pads_fraction_digits() {
        let fx = service();
        let options = FormatOptions {
            with_symbol: false,
            use_grouping: true,
        };
        assert_eq!(fx.format(dec!(7), CurrencyCode::Cny, &options), "7.00");
    }

    #[test]
    fn test_convert_and_format() {
        let fx = service();
        let rendered = fx
            .convert_and_format(
                dec!(10),
                CurrencyCode::Usd,
                CurrencyCode::Cny,
                &FormatOptions::default(),
            )
            .unwrap();
        assert_eq!(rendered, "¥72.00");
    }

    #[test]
    fn test_decimal_from_f64_normalizes_non_finite() {
        assert_eq!(decimal_from_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(decimal_from_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(decimal_from_f64(f64::NEG_INFINITY), Decimal::ZERO);
        assert_eq!(decimal_from_f64(12.5), dec!(12.5));
    }
}
