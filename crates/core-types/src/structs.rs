use crate::enums::{MetricKey, MetricStatus};
use crate::number;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The raw accounting figures of one company for one period.
///
/// Optional figures stay `None` when the caller did not send them; "absent" and
/// "present but zero" lead to different results for several metrics. An explicit
/// `null` is rejected, as is any figure outside `number::MIN_MAGNITUDE..=MAX_MAGNITUDE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawValues {
    #[serde(with = "number::amount")]
    pub ventas: Decimal,
    #[serde(with = "number::amount")]
    pub costo_ventas: Decimal,
    #[serde(with = "number::amount")]
    pub utilidad_neta: Decimal,
    #[serde(default, with = "number::optional_amount", skip_serializing_if = "Option::is_none")]
    pub utilidad_operativa: Option<Decimal>,
    #[serde(default, with = "number::optional_amount", skip_serializing_if = "Option::is_none")]
    pub gastos_financieros: Option<Decimal>,
    #[serde(with = "number::amount")]
    pub activos_corrientes: Decimal,
    #[serde(with = "number::amount")]
    pub pasivos_corrientes: Decimal,
    #[serde(default, with = "number::amount")]
    pub inventario: Decimal,
    #[serde(default, with = "number::optional_amount", skip_serializing_if = "Option::is_none")]
    pub cuentas_por_cobrar: Option<Decimal>,
    #[serde(default, with = "number::optional_amount", skip_serializing_if = "Option::is_none")]
    pub cuentas_por_pagar: Option<Decimal>,
    #[serde(with = "number::amount")]
    pub activo_total: Decimal,
    #[serde(with = "number::amount")]
    pub pasivo_total: Decimal,
}

/// One computed, classified and described ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub key: MetricKey,
    pub label: &'static str,
    /// `None` means indeterminate (division by zero or missing inputs), not zero.
    #[serde(serialize_with = "number::optional_amount::serialize")]
    pub value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    pub status: MetricStatus,
    pub explanation: &'static str,
    pub formula: &'static str,
}

impl MetricResult {
    /// Builds a result, filling the fixed descriptive fields from the key.
    pub fn new(key: MetricKey, value: Option<Decimal>, status: MetricStatus) -> Self {
        Self {
            key,
            label: key.label(),
            value,
            unit: key.unit(),
            status,
            explanation: key.explanation(),
            formula: key.formula(),
        }
    }
}

/// The complete set of ten metrics, always in declaration order.
///
/// Serializes as a JSON object keyed by metric key, preserving that order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    results: [MetricResult; MetricKey::COUNT],
}

impl MetricSet {
    /// Builds the set by calling `build` once per key, in declaration order.
    pub fn from_fn(mut build: impl FnMut(MetricKey) -> MetricResult) -> Self {
        let results = MetricKey::ALL.map(|key| {
            let result = build(key);
            debug_assert_eq!(result.key, key, "metric built for the wrong key");
            result
        });
        Self { results }
    }

    pub fn get(&self, key: MetricKey) -> &MetricResult {
        &self.results[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Metrics with the given status, in declaration order.
    pub fn with_status(&self, status: MetricStatus) -> impl Iterator<Item = &MetricResult> {
        self.results.iter().filter(move |metric| metric.status == status)
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for metric in &self.results {
            map.serialize_entry(metric.key.as_str(), metric)?;
        }
        map.end()
    }
}

/// A `{red, yellow}` pair of band boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(serialize_with = "number::amount::serialize")]
    pub red: Decimal,
    #[serde(serialize_with = "number::amount::serialize")]
    pub yellow: Decimal,
}

impl Threshold {
    pub const fn new(red: Decimal, yellow: Decimal) -> Self {
        Self { red, yellow }
    }
}

/// The process-wide threshold table, one pair per metric.
///
/// Built once at startup and shared read-only. Lowercase aliases exist because
/// the configuration loader folds keys read from the environment to lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    #[serde(alias = "liquidezcorriente")]
    pub liquidez_corriente: Threshold,
    #[serde(alias = "pruebaacida")]
    pub prueba_acida: Threshold,
    #[serde(alias = "margenbruto")]
    pub margen_bruto: Threshold,
    #[serde(alias = "margenneto")]
    pub margen_neto: Threshold,
    pub endeudamiento: Threshold,
    #[serde(alias = "coberturaintereses")]
    pub cobertura_intereses: Threshold,
    #[serde(alias = "rotcartera")]
    pub rot_cartera: Threshold,
    #[serde(alias = "rotinventario")]
    pub rot_inventario: Threshold,
    #[serde(alias = "rotproveedores")]
    pub rot_proveedores: Threshold,
    #[serde(alias = "capitaltrabajo")]
    pub capital_trabajo: Threshold,
}

impl Thresholds {
    pub fn get(&self, key: MetricKey) -> Threshold {
        match key {
            MetricKey::LiquidezCorriente => self.liquidez_corriente,
            MetricKey::PruebaAcida => self.prueba_acida,
            MetricKey::MargenBruto => self.margen_bruto,
            MetricKey::MargenNeto => self.margen_neto,
            MetricKey::Endeudamiento => self.endeudamiento,
            MetricKey::CoberturaIntereses => self.cobertura_intereses,
            MetricKey::RotCartera => self.rot_cartera,
            MetricKey::RotInventario => self.rot_inventario,
            MetricKey::RotProveedores => self.rot_proveedores,
            MetricKey::CapitalTrabajo => self.capital_trabajo,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            liquidez_corriente: Threshold::new(dec!(1.0), dec!(1.5)),
            prueba_acida: Threshold::new(dec!(0.8), dec!(1.0)),
            margen_bruto: Threshold::new(dec!(0.15), dec!(0.25)),
            margen_neto: Threshold::new(dec!(0.03), dec!(0.08)),
            // Lower is better: red is the upper boundary.
            endeudamiento: Threshold::new(dec!(0.7), dec!(0.5)),
            cobertura_intereses: Threshold::new(dec!(1.5), dec!(3)),
            rot_cartera: Threshold::new(dec!(8), dec!(6)),
            rot_inventario: Threshold::new(dec!(180), dec!(90)),
            rot_proveedores: Threshold::new(dec!(120), dec!(60)),
            capital_trabajo: Threshold::new(dec!(0), dec!(1)),
        }
    }
}
