use core_types::{number, MetricKey, MetricSet, MetricStatus};
use rust_decimal::Decimal;
use serde::Serialize;

pub const HEADLINE_CRITICAL: &str = "⚠️ Riesgos críticos detectados";
pub const HEADLINE_IMPROVEMENT: &str = "🟡 Oportunidades de mejora";
pub const HEADLINE_SOLID: &str = "🟢 Salud financiera sólida";

/// Placeholder used in the bullets when a metric has no value.
pub const NO_DATA: &str = "s/datos";

/// A short, human-facing digest of a full metric set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub headline: &'static str,
    pub bullets: Vec<String>,
    pub reds: Vec<&'static str>,
    pub yellows: Vec<&'static str>,
    pub greens: Vec<&'static str>,
}

/// Builds the executive summary: status groups in declaration order, a headline
/// driven by the worst status present, and three fixed bullets.
pub fn make_executive_summary(metrics: &MetricSet) -> ExecutiveSummary {
    let labels = |status: MetricStatus| {
        metrics
            .with_status(status)
            .map(|metric| metric.label)
            .collect::<Vec<_>>()
    };
    let reds = labels(MetricStatus::Red);
    let yellows = labels(MetricStatus::Yellow);
    let greens = labels(MetricStatus::Green);

    let headline = if !reds.is_empty() {
        HEADLINE_CRITICAL
    } else if !yellows.is_empty() {
        HEADLINE_IMPROVEMENT
    } else {
        HEADLINE_SOLID
    };

    let bullet = |prefix: &str, key: MetricKey| {
        let value = metrics
            .get(key)
            .value
            .map(format_value)
            .unwrap_or_else(|| NO_DATA.to_string());
        format!("{prefix}: {value}")
    };
    let bullets = vec![
        bullet("Liquidez Corriente", MetricKey::LiquidezCorriente),
        bullet("Margen Neto (%)", MetricKey::MargenNeto),
        bullet("Endeudamiento (%)", MetricKey::Endeudamiento),
    ];

    ExecutiveSummary {
        headline,
        bullets,
        reds,
        yellows,
        greens,
    }
}

/// Renders a value the way it appears on the wire: the shortest float form,
/// so `60.00` prints as `60` and `500/600` as `0.8333333333333334`.
pub fn format_value(value: Decimal) -> String {
    number::to_f64(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{MetricResult, RawValues, Thresholds};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn uniform(status: MetricStatus) -> MetricSet {
        MetricSet::from_fn(|key| MetricResult::new(key, Some(dec!(1)), status))
    }

    fn with_overrides(base: MetricStatus, overrides: &[(MetricKey, MetricStatus)]) -> MetricSet {
        MetricSet::from_fn(|key| {
            let status = overrides
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, s)| *s)
                .unwrap_or(base);
            MetricResult::new(key, Some(dec!(1)), status)
        })
    }

    #[test]
    fn all_green_is_solid() {
        let summary = make_executive_summary(&uniform(MetricStatus::Green));
        assert_eq!(summary.headline, HEADLINE_SOLID);
        assert_eq!(summary.greens.len(), 10);
        assert!(summary.reds.is_empty() && summary.yellows.is_empty());
    }

    #[test]
    fn any_yellow_without_red_is_improvement() {
        let metrics = with_overrides(
            MetricStatus::Green,
            &[(MetricKey::RotProveedores, MetricStatus::Yellow)],
        );
        let summary = make_executive_summary(&metrics);
        assert_eq!(summary.headline, HEADLINE_IMPROVEMENT);
        assert_eq!(summary.yellows, vec!["Rotación de Proveedores (veces)"]);
    }

    #[test]
    fn a_single_red_is_critical_regardless_of_the_rest() {
        let one_red_among_green = with_overrides(
            MetricStatus::Green,
            &[(MetricKey::CapitalTrabajo, MetricStatus::Red)],
        );
        let one_red_among_yellow = with_overrides(
            MetricStatus::Yellow,
            &[(MetricKey::LiquidezCorriente, MetricStatus::Red)],
        );
        for metrics in [one_red_among_green, one_red_among_yellow] {
            assert_eq!(make_executive_summary(&metrics).headline, HEADLINE_CRITICAL);
        }
        assert_ne!(
            make_executive_summary(&uniform(MetricStatus::Yellow)).headline,
            HEADLINE_CRITICAL
        );
    }

    #[test]
    fn groups_preserve_declaration_order() {
        let metrics = with_overrides(
            MetricStatus::Green,
            &[
                (MetricKey::CapitalTrabajo, MetricStatus::Red),
                (MetricKey::PruebaAcida, MetricStatus::Red),
                (MetricKey::MargenNeto, MetricStatus::Yellow),
            ],
        );
        let summary = make_executive_summary(&metrics);
        assert_eq!(summary.reds, vec!["Prueba Ácida", "Capital de Trabajo"]);
        assert_eq!(summary.yellows, vec!["Margen Neto (%)"]);
        assert_eq!(summary.greens.len(), 7);
        assert_eq!(summary.greens[0], "Liquidez Corriente");
    }

    #[test]
    fn bullets_show_values_or_placeholder() {
        let metrics = MetricSet::from_fn(|key| {
            let value = match key {
                MetricKey::LiquidezCorriente => Some(dec!(500) / dec!(600)),
                MetricKey::MargenNeto => Some(dec!(5.00)),
                _ => None,
            };
            MetricResult::new(key, value, MetricStatus::Red)
        });

        let summary = make_executive_summary(&metrics);
        assert_eq!(
            summary.bullets,
            vec![
                "Liquidez Corriente: 0.8333333333333334".to_string(),
                "Margen Neto (%): 5".to_string(),
                "Endeudamiento (%): s/datos".to_string(),
            ]
        );
    }

    #[test]
    fn json_value_matches_the_bullet() {
        let raw = RawValues {
            ventas: dec!(1000),
            costo_ventas: dec!(600),
            utilidad_neta: dec!(50),
            utilidad_operativa: None,
            gastos_financieros: None,
            activos_corrientes: dec!(1),
            pasivos_corrientes: dec!(3),
            inventario: Decimal::ZERO,
            cuentas_por_cobrar: None,
            cuentas_por_pagar: None,
            activo_total: dec!(2000),
            pasivo_total: dec!(1200),
        };
        let metrics = crate::compute_metrics(&raw, &Thresholds::default());
        let wire = serde_json::to_value(&metrics).unwrap();
        let summary = make_executive_summary(&metrics);

        assert_eq!(wire["liquidezCorriente"]["value"].to_string(), "0.3333333333333333");
        assert_eq!(summary.bullets[0], "Liquidez Corriente: 0.3333333333333333");
    }
}
