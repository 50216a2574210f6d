use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic-light classification of a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Red,
    Yellow,
    Green,
}

impl MetricStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::Red => "red",
            MetricStatus::Yellow => "yellow",
            MetricStatus::Green => "green",
        }
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one of the ten financial ratios the engine produces.
///
/// The variant order is the declaration order used everywhere a metric set is
/// rendered or partitioned, so do not reorder the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    LiquidezCorriente,
    PruebaAcida,
    MargenBruto,
    MargenNeto,
    Endeudamiento,
    CoberturaIntereses,
    RotCartera,
    RotInventario,
    RotProveedores,
    CapitalTrabajo,
}

impl MetricKey {
    pub const COUNT: usize = 10;

    /// Every key, in declaration order.
    pub const ALL: [MetricKey; MetricKey::COUNT] = [
        MetricKey::LiquidezCorriente,
        MetricKey::PruebaAcida,
        MetricKey::MargenBruto,
        MetricKey::MargenNeto,
        MetricKey::Endeudamiento,
        MetricKey::CoberturaIntereses,
        MetricKey::RotCartera,
        MetricKey::RotInventario,
        MetricKey::RotProveedores,
        MetricKey::CapitalTrabajo,
    ];

    /// Position of the key in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The wire name, also used as the JSON object key.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::LiquidezCorriente => "liquidezCorriente",
            MetricKey::PruebaAcida => "pruebaAcida",
            MetricKey::MargenBruto => "margenBruto",
            MetricKey::MargenNeto => "margenNeto",
            MetricKey::Endeudamiento => "endeudamiento",
            MetricKey::CoberturaIntereses => "coberturaIntereses",
            MetricKey::RotCartera => "rotCartera",
            MetricKey::RotInventario => "rotInventario",
            MetricKey::RotProveedores => "rotProveedores",
            MetricKey::CapitalTrabajo => "capitalTrabajo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::LiquidezCorriente => "Liquidez Corriente",
            MetricKey::PruebaAcida => "Prueba Ácida",
            MetricKey::MargenBruto => "Margen Bruto (%)",
            MetricKey::MargenNeto => "Margen Neto (%)",
            MetricKey::Endeudamiento => "Nivel de Endeudamiento (%)",
            MetricKey::CoberturaIntereses => "Cobertura de Intereses (veces)",
            MetricKey::RotCartera => "Rotación de Cartera (veces)",
            MetricKey::RotInventario => "Rotación de Inventario (veces)",
            MetricKey::RotProveedores => "Rotación de Proveedores (veces)",
            MetricKey::CapitalTrabajo => "Capital de Trabajo",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            MetricKey::LiquidezCorriente => {
                "Capacidad de cubrir obligaciones de corto plazo con activos corrientes."
            }
            MetricKey::PruebaAcida => "Liquidez sin inventarios; mide solvencia inmediata.",
            MetricKey::MargenBruto => "Rentabilidad después del costo directo de ventas.",
            MetricKey::MargenNeto => "Utilidad neta sobre ventas; eficiencia final.",
            MetricKey::Endeudamiento => "Proporción del activo financiado por terceros.",
            MetricKey::CoberturaIntereses => "Capacidad operativa para cubrir gastos financieros.",
            MetricKey::RotCartera => "Veces que se convierte en efectivo la cartera al año.",
            MetricKey::RotInventario => "Veces que se renueva el inventario al año.",
            MetricKey::RotProveedores => "Veces que se pagan a proveedores al año.",
            MetricKey::CapitalTrabajo => "Recursos de corto plazo disponibles para operar.",
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            MetricKey::LiquidezCorriente => "Activos Corrientes / Pasivos Corrientes",
            MetricKey::PruebaAcida => "(Activos Corrientes − Inventario) / Pasivos Corrientes",
            MetricKey::MargenBruto => "((Ventas − Costo de Ventas) / Ventas) × 100",
            MetricKey::MargenNeto => "(Utilidad Neta / Ventas) × 100",
            MetricKey::Endeudamiento => "(Pasivo Total / Activo Total) × 100",
            MetricKey::CoberturaIntereses => "Utilidad Operativa / Gastos Financieros",
            MetricKey::RotCartera => "Ventas / Cuentas por Cobrar",
            MetricKey::RotInventario => "Costo de Ventas / Inventario",
            MetricKey::RotProveedores => "Costo de Ventas / Cuentas por Pagar",
            MetricKey::CapitalTrabajo => "Activos Corrientes − Pasivos Corrientes",
        }
    }

    /// Display unit; only the percentage metrics carry one.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            MetricKey::MargenBruto | MetricKey::MargenNeto | MetricKey::Endeudamiento => Some("%"),
            _ => None,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
