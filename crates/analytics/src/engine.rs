use core_types::{
    MetricKey, MetricResult, MetricSet, MetricStatus, RawValues, Threshold, Thresholds,
};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Which side of the bands is favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Whether a value sitting exactly on a boundary already falls into the worse band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Strict,
    Inclusive,
}

#[derive(Debug, Clone, Copy)]
enum StatusRule {
    Bands(Direction, Comparison),
    /// Green when the ratio could be computed at all, red otherwise.
    Presence,
}

/// How the computed figure is turned into the reported `value`.
#[derive(Debug, Clone, Copy)]
enum Presentation {
    Ratio,
    /// Fraction × 100, two decimals. Status is still judged on the fraction.
    Percentage,
    /// Two decimals, same unit as the inputs.
    Amount,
}

struct MetricSpec {
    key: MetricKey,
    formula: fn(&RawValues) -> Option<Decimal>,
    rule: StatusRule,
    presentation: Presentation,
}

const HIGH_STRICT: StatusRule = StatusRule::Bands(Direction::HigherIsBetter, Comparison::Strict);

/// The ten metrics, in declaration order.
///
/// The turnover metrics have thresholds in the table but are classified by
/// presence only.
const SPECS: [MetricSpec; MetricKey::COUNT] = [
    MetricSpec {
        key: MetricKey::LiquidezCorriente,
        formula: liquidez_corriente,
        rule: HIGH_STRICT,
        presentation: Presentation::Ratio,
    },
    MetricSpec {
        key: MetricKey::PruebaAcida,
        formula: prueba_acida,
        rule: HIGH_STRICT,
        presentation: Presentation::Ratio,
    },
    MetricSpec {
        key: MetricKey::MargenBruto,
        formula: margen_bruto,
        rule: HIGH_STRICT,
        presentation: Presentation::Percentage,
    },
    MetricSpec {
        key: MetricKey::MargenNeto,
        formula: margen_neto,
        rule: HIGH_STRICT,
        presentation: Presentation::Percentage,
    },
    MetricSpec {
        key: MetricKey::Endeudamiento,
        formula: endeudamiento,
        rule: StatusRule::Bands(Direction::LowerIsBetter, Comparison::Strict),
        presentation: Presentation::Percentage,
    },
    MetricSpec {
        key: MetricKey::CoberturaIntereses,
        formula: cobertura_intereses,
        rule: HIGH_STRICT,
        presentation: Presentation::Ratio,
    },
    MetricSpec {
        key: MetricKey::RotCartera,
        formula: rot_cartera,
        rule: StatusRule::Presence,
        presentation: Presentation::Ratio,
    },
    MetricSpec {
        key: MetricKey::RotInventario,
        formula: rot_inventario,
        rule: StatusRule::Presence,
        presentation: Presentation::Ratio,
    },
    MetricSpec {
        key: MetricKey::RotProveedores,
        formula: rot_proveedores,
        rule: StatusRule::Presence,
        presentation: Presentation::Ratio,
    },
    MetricSpec {
        key: MetricKey::CapitalTrabajo,
        formula: capital_trabajo,
        rule: StatusRule::Bands(Direction::HigherIsBetter, Comparison::Inclusive),
        presentation: Presentation::Amount,
    },
];

// --- Formulas ---

fn liquidez_corriente(v: &RawValues) -> Option<Decimal> {
    safe_div(v.activos_corrientes, v.pasivos_corrientes)
}

fn prueba_acida(v: &RawValues) -> Option<Decimal> {
    v.activos_corrientes
        .checked_sub(v.inventario)
        .and_then(|quick_assets| safe_div(quick_assets, v.pasivos_corrientes))
}

fn margen_bruto(v: &RawValues) -> Option<Decimal> {
    v.ventas
        .checked_sub(v.costo_ventas)
        .and_then(|gross_profit| safe_div(gross_profit, v.ventas))
}

fn margen_neto(v: &RawValues) -> Option<Decimal> {
    safe_div(v.utilidad_neta, v.ventas)
}

fn endeudamiento(v: &RawValues) -> Option<Decimal> {
    safe_div(v.pasivo_total, v.activo_total)
}

fn cobertura_intereses(v: &RawValues) -> Option<Decimal> {
    match (v.utilidad_operativa, v.gastos_financieros) {
        (Some(operating_income), Some(financial_expenses)) => {
            safe_div(operating_income, financial_expenses)
        }
        _ => None,
    }
}

fn rot_cartera(v: &RawValues) -> Option<Decimal> {
    positive(v.cuentas_por_cobrar).and_then(|receivables| safe_div(v.ventas, receivables))
}

fn rot_inventario(v: &RawValues) -> Option<Decimal> {
    positive(Some(v.inventario)).and_then(|inventory| safe_div(v.costo_ventas, inventory))
}

fn rot_proveedores(v: &RawValues) -> Option<Decimal> {
    positive(v.cuentas_por_pagar).and_then(|payables| safe_div(v.costo_ventas, payables))
}

/// Never `None` for figures that passed deserialization; out-of-range values built
/// in code come out as `None` rather than as a clamped amount.
fn capital_trabajo(v: &RawValues) -> Option<Decimal> {
    v.activos_corrientes.checked_sub(v.pasivos_corrientes)
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

// --- Arithmetic helpers ---

/// Division that yields `None` for a zero denominator (or an unrepresentable quotient).
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    numerator.checked_div(denominator)
}

/// Converts a fraction to a percentage with two decimals, rounding half away from zero.
pub fn pct(fraction: Decimal) -> Option<Decimal> {
    fraction
        .checked_mul(dec!(10000))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) / dec!(100))
}

/// Rounds to two decimals, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// --- Classification primitives ---

/// Classifies a value against a `{red, yellow}` pair. A missing value is red.
pub fn status_by_bands(
    value: Option<Decimal>,
    threshold: Threshold,
    direction: Direction,
    comparison: Comparison,
) -> MetricStatus {
    let Some(value) = value else {
        return MetricStatus::Red;
    };

    let (in_red, in_yellow) = match (direction, comparison) {
        (Direction::HigherIsBetter, Comparison::Strict) => {
            (value < threshold.red, value < threshold.yellow)
        }
        (Direction::HigherIsBetter, Comparison::Inclusive) => {
            (value <= threshold.red, value <= threshold.yellow)
        }
        (Direction::LowerIsBetter, Comparison::Strict) => {
            (value > threshold.red, value > threshold.yellow)
        }
        (Direction::LowerIsBetter, Comparison::Inclusive) => {
            (value >= threshold.red, value >= threshold.yellow)
        }
    };

    if in_red {
        MetricStatus::Red
    } else if in_yellow {
        MetricStatus::Yellow
    } else {
        MetricStatus::Green
    }
}

/// Red when the value is missing, green otherwise.
pub fn binary_status(value: Option<Decimal>) -> MetricStatus {
    match value {
        Some(_) => MetricStatus::Green,
        None => MetricStatus::Red,
    }
}

// --- Engine ---

/// A stateless calculator that maps raw accounting figures to the ten classified metrics.
#[derive(Debug, Clone, Copy)]
pub struct MetricsEngine<'a> {
    thresholds: &'a Thresholds,
}

impl<'a> MetricsEngine<'a> {
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self { thresholds }
    }

    /// Computes every metric. Never fails: nonsensical inputs simply flow
    /// through the formulas, and indeterminate ratios come out as `None`.
    pub fn compute(&self, raw: &RawValues) -> MetricSet {
        MetricSet::from_fn(|key| self.evaluate(&SPECS[key.index()], raw))
    }

    fn evaluate(&self, spec: &MetricSpec, raw: &RawValues) -> MetricResult {
        let computed = (spec.formula)(raw);

        let status = match spec.rule {
            StatusRule::Bands(direction, comparison) => status_by_bands(
                computed,
                self.thresholds.get(spec.key),
                direction,
                comparison,
            ),
            StatusRule::Presence => binary_status(computed),
        };

        let value = match spec.presentation {
            Presentation::Ratio => computed,
            Presentation::Percentage => computed.and_then(pct),
            Presentation::Amount => computed.map(round2),
        };

        MetricResult::new(spec.key, value, status)
    }
}

/// Convenience wrapper around [`MetricsEngine::compute`].
pub fn compute_metrics(raw: &RawValues, thresholds: &Thresholds) -> MetricSet {
    MetricsEngine::new(thresholds).compute(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_input() -> RawValues {
        RawValues {
            ventas: dec!(1000),
            costo_ventas: dec!(600),
            utilidad_neta: dec!(50),
            utilidad_operativa: None,
            gastos_financieros: None,
            activos_corrientes: dec!(500),
            pasivos_corrientes: dec!(600),
            inventario: dec!(100),
            cuentas_por_cobrar: None,
            cuentas_por_pagar: None,
            activo_total: dec!(2000),
            pasivo_total: dec!(1200),
        }
    }

    fn compute(raw: &RawValues) -> MetricSet {
        compute_metrics(raw, &Thresholds::default())
    }

    fn status(set: &MetricSet, key: MetricKey) -> MetricStatus {
        set.get(key).status
    }

    fn value(set: &MetricSet, key: MetricKey) -> Option<Decimal> {
        set.get(key).value
    }

    #[test]
    fn spec_table_follows_declaration_order() {
        for (spec, key) in SPECS.iter().zip(MetricKey::ALL) {
            assert_eq!(spec.key, key);
        }
    }

    #[test]
    fn always_returns_the_ten_keys() {
        let mut zeros = sample_input();
        zeros.ventas = Decimal::ZERO;
        zeros.activos_corrientes = Decimal::ZERO;
        zeros.pasivos_corrientes = Decimal::ZERO;
        zeros.activo_total = Decimal::ZERO;
        zeros.inventario = Decimal::ZERO;

        for raw in [sample_input(), zeros] {
            let set = compute(&raw);
            let keys: Vec<MetricKey> = set.iter().map(|m| m.key).collect();
            assert_eq!(keys, MetricKey::ALL.to_vec());
        }
    }

    #[test]
    fn end_to_end_scenario() {
        let set = compute(&sample_input());

        let liquidity = value(&set, MetricKey::LiquidezCorriente).unwrap();
        assert_eq!(liquidity.round_dp(3), dec!(0.833));
        assert_eq!(status(&set, MetricKey::LiquidezCorriente), MetricStatus::Red);

        assert_eq!(value(&set, MetricKey::MargenBruto), Some(dec!(40)));
        assert_eq!(status(&set, MetricKey::MargenBruto), MetricStatus::Green);

        assert_eq!(value(&set, MetricKey::MargenNeto), Some(dec!(5)));
        assert_eq!(status(&set, MetricKey::MargenNeto), MetricStatus::Yellow);

        assert_eq!(value(&set, MetricKey::Endeudamiento), Some(dec!(60)));
        assert_eq!(status(&set, MetricKey::Endeudamiento), MetricStatus::Yellow);

        assert_eq!(value(&set, MetricKey::CapitalTrabajo), Some(dec!(-100)));
        assert_eq!(status(&set, MetricKey::CapitalTrabajo), MetricStatus::Red);

        assert_eq!(value(&set, MetricKey::CoberturaIntereses), None);
        assert_eq!(status(&set, MetricKey::CoberturaIntereses), MetricStatus::Red);

        // (500 - 100) / 600
        assert_eq!(status(&set, MetricKey::PruebaAcida), MetricStatus::Red);
        // 600 / 100
        assert_eq!(value(&set, MetricKey::RotInventario), Some(dec!(6)));
        assert_eq!(status(&set, MetricKey::RotInventario), MetricStatus::Green);
    }

    #[test]
    fn percentages_round_to_two_decimals() {
        let mut raw = sample_input();
        raw.ventas = dec!(100);
        raw.costo_ventas = dec!(40);
        raw.utilidad_neta = dec!(7.555);

        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::MargenBruto), Some(dec!(60.0)));
        assert_eq!(value(&set, MetricKey::MargenNeto), Some(dec!(7.56)));
        assert_eq!(set.get(MetricKey::MargenNeto).unit, Some("%"));
    }

    #[test]
    fn negative_midpoint_rounds_away_from_zero() {
        let mut raw = sample_input();
        raw.ventas = dec!(100);
        raw.utilidad_neta = dec!(-7.555);

        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::MargenNeto), Some(dec!(-7.56)));
        assert_eq!(status(&set, MetricKey::MargenNeto), MetricStatus::Red);
    }

    #[test]
    fn zero_denominators_yield_null_and_red() {
        let mut raw = sample_input();
        raw.pasivos_corrientes = Decimal::ZERO;
        raw.ventas = Decimal::ZERO;
        raw.activo_total = Decimal::ZERO;
        raw.utilidad_operativa = Some(dec!(300));
        raw.gastos_financieros = Some(Decimal::ZERO);

        let set = compute(&raw);
        for key in [
            MetricKey::LiquidezCorriente,
            MetricKey::PruebaAcida,
            MetricKey::MargenBruto,
            MetricKey::MargenNeto,
            MetricKey::Endeudamiento,
            MetricKey::CoberturaIntereses,
        ] {
            assert_eq!(value(&set, key), None, "{key} should be null");
            assert_eq!(status(&set, key), MetricStatus::Red, "{key} should be red");
        }
    }

    #[test]
    fn liquidity_band_boundaries_are_strict() {
        let mut raw = sample_input();
        raw.pasivos_corrientes = dec!(100);

        raw.activos_corrientes = dec!(99);
        assert_eq!(status(&compute(&raw), MetricKey::LiquidezCorriente), MetricStatus::Red);

        raw.activos_corrientes = dec!(100);
        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::LiquidezCorriente), Some(dec!(1)));
        assert_eq!(status(&set, MetricKey::LiquidezCorriente), MetricStatus::Yellow);

        raw.activos_corrientes = dec!(150);
        assert_eq!(status(&compute(&raw), MetricKey::LiquidezCorriente), MetricStatus::Green);
    }

    #[test]
    fn working_capital_boundaries_are_inclusive() {
        let mut raw = sample_input();
        raw.pasivos_corrientes = dec!(100);

        raw.activos_corrientes = dec!(100);
        assert_eq!(status(&compute(&raw), MetricKey::CapitalTrabajo), MetricStatus::Red);

        raw.activos_corrientes = dec!(101);
        assert_eq!(status(&compute(&raw), MetricKey::CapitalTrabajo), MetricStatus::Yellow);

        raw.activos_corrientes = dec!(101.01);
        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::CapitalTrabajo), Some(dec!(1.01)));
        assert_eq!(status(&set, MetricKey::CapitalTrabajo), MetricStatus::Green);
    }

    #[test]
    fn working_capital_is_rounded_but_classified_unrounded() {
        let mut raw = sample_input();
        raw.activos_corrientes = dec!(101.004);
        raw.pasivos_corrientes = dec!(100);

        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::CapitalTrabajo), Some(dec!(1.00)));
        assert_eq!(status(&set, MetricKey::CapitalTrabajo), MetricStatus::Green);
    }

    #[test]
    fn leverage_is_lower_is_better_on_the_fraction() {
        let mut raw = sample_input();
        raw.activo_total = dec!(100);

        let cases = [
            (dec!(50), MetricStatus::Green),
            (dec!(60), MetricStatus::Yellow),
            (dec!(70), MetricStatus::Yellow),
            (dec!(71), MetricStatus::Red),
        ];
        for (liabilities, expected) in cases {
            raw.pasivo_total = liabilities;
            assert_eq!(status(&compute(&raw), MetricKey::Endeudamiento), expected);
        }
    }

    #[test]
    fn margin_status_uses_the_fraction_not_the_percentage() {
        let mut raw = sample_input();
        raw.ventas = dec!(100);
        raw.utilidad_neta = dec!(3);

        let set = compute(&raw);
        // 3 % is exactly the red boundary of 0.03, so it is yellow, not red.
        assert_eq!(value(&set, MetricKey::MargenNeto), Some(dec!(3)));
        assert_eq!(status(&set, MetricKey::MargenNeto), MetricStatus::Yellow);
    }

    #[test]
    fn receivables_turnover_is_binary() {
        let mut raw = sample_input();

        raw.cuentas_por_cobrar = Some(dec!(0.0001));
        let set = compute(&raw);
        assert_eq!(status(&set, MetricKey::RotCartera), MetricStatus::Green);

        // Far below the declared red boundary, still green.
        raw.cuentas_por_cobrar = Some(dec!(1000));
        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::RotCartera), Some(dec!(1)));
        assert_eq!(status(&set, MetricKey::RotCartera), MetricStatus::Green);

        for receivables in [None, Some(Decimal::ZERO), Some(dec!(-10))] {
            raw.cuentas_por_cobrar = receivables;
            let set = compute(&raw);
            assert_eq!(value(&set, MetricKey::RotCartera), None);
            assert_eq!(status(&set, MetricKey::RotCartera), MetricStatus::Red);
        }
    }

    #[test]
    fn inventory_and_payables_turnover_need_positive_denominators() {
        let mut raw = sample_input();
        raw.inventario = Decimal::ZERO;
        raw.cuentas_por_pagar = Some(dec!(200));

        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::RotInventario), None);
        assert_eq!(status(&set, MetricKey::RotInventario), MetricStatus::Red);
        assert_eq!(value(&set, MetricKey::RotProveedores), Some(dec!(3)));
        assert_eq!(status(&set, MetricKey::RotProveedores), MetricStatus::Green);
    }

    #[test]
    fn interest_coverage_needs_both_inputs() {
        let mut raw = sample_input();
        raw.utilidad_operativa = Some(dec!(300));

        assert_eq!(value(&compute(&raw), MetricKey::CoberturaIntereses), None);

        raw.gastos_financieros = Some(dec!(100));
        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::CoberturaIntereses), Some(dec!(3)));
        assert_eq!(status(&set, MetricKey::CoberturaIntereses), MetricStatus::Green);

        raw.gastos_financieros = Some(dec!(150));
        assert_eq!(status(&compute(&raw), MetricKey::CoberturaIntereses), MetricStatus::Yellow);
    }

    #[test]
    fn thresholds_come_from_the_caller() {
        let mut thresholds = Thresholds::default();
        thresholds.liquidez_corriente = Threshold::new(dec!(0.5), dec!(0.8));

        let set = compute_metrics(&sample_input(), &thresholds);
        assert_eq!(status(&set, MetricKey::LiquidezCorriente), MetricStatus::Green);
    }

    #[test]
    fn negative_revenue_is_propagated_not_rejected() {
        let mut raw = sample_input();
        raw.ventas = dec!(-1000);

        let set = compute(&raw);
        // (-1000 - 600) / -1000
        assert_eq!(value(&set, MetricKey::MargenBruto), Some(dec!(160)));
        assert_eq!(value(&set, MetricKey::MargenNeto), Some(dec!(-5)));
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let raw = sample_input();
        let first = serde_json::to_string(&compute(&raw)).unwrap();
        let second = serde_json::to_string(&compute(&raw)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn status_by_bands_treats_missing_as_red() {
        let threshold = Threshold::new(dec!(1), dec!(2));
        for (direction, comparison) in [
            (Direction::HigherIsBetter, Comparison::Strict),
            (Direction::LowerIsBetter, Comparison::Inclusive),
        ] {
            assert_eq!(
                status_by_bands(None, threshold, direction, comparison),
                MetricStatus::Red
            );
        }
        assert_eq!(binary_status(None), MetricStatus::Red);
        assert_eq!(binary_status(Some(Decimal::ZERO)), MetricStatus::Green);
    }

    #[test]
    fn lower_is_better_inclusive_puts_boundaries_in_the_worse_band() {
        let threshold = Threshold::new(dec!(0.7), dec!(0.5));
        let classify = |value| {
            status_by_bands(Some(value), threshold, Direction::LowerIsBetter, Comparison::Inclusive)
        };
        assert_eq!(classify(dec!(0.7)), MetricStatus::Red);
        assert_eq!(classify(dec!(0.5)), MetricStatus::Yellow);
        assert_eq!(classify(dec!(0.49)), MetricStatus::Green);
    }

    #[test]
    fn working_capital_overflow_is_null_not_clamped() {
        let mut raw = sample_input();
        raw.activos_corrientes = Decimal::MAX;
        raw.pasivos_corrientes = dec!(-1);
        let set = compute(&raw);
        assert_eq!(value(&set, MetricKey::CapitalTrabajo), None);
        assert_eq!(set.get(MetricKey::CapitalTrabajo).status, MetricStatus::Red);

        let raw: RawValues = serde_json::from_value(serde_json::json!({
            "ventas": 1000, "costoVentas": 600, "utilidadNeta": 50,
            "activosCorrientes": 1e28, "pasivosCorrientes": -1e28,
            "activoTotal": 2000, "pasivoTotal": 1200
        }))
        .unwrap();
        assert_eq!(
            value(&compute(&raw), MetricKey::CapitalTrabajo),
            Some(dec!(20000000000000000000000000000))
        );
    }
}
