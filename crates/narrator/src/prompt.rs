use crate::AnalysisContext;
use analytics::summary::format_value;
use core_types::{MetricResult, MetricSet, MetricStatus};

pub const SYSTEM_PROMPT: &str = "Eres un analista financiero pragmático y directo.";

/// Picks the metrics quoted in the prompt: red ones first, declaration order
/// otherwise, at most `limit` of them.
pub fn rank_for_prompt(metrics: &MetricSet, limit: usize) -> Vec<&MetricResult> {
    let mut ranked: Vec<&MetricResult> = metrics.iter().collect();
    // Stable sort: `false` (red) sorts before `true`.
    ranked.sort_by_key(|metric| metric.status != MetricStatus::Red);
    ranked.truncate(limit);
    ranked
}

/// One indicator line, e.g. `Margen Neto (%): 5% [yellow] — Utilidad neta sobre ventas; eficiencia final.`
pub fn render_metric_line(metric: &MetricResult) -> String {
    let value = metric
        .value
        .map(format_value)
        .unwrap_or_else(|| "null".to_string());
    format!(
        "{}: {}{} [{}] — {}",
        metric.label,
        value,
        metric.unit.unwrap_or(""),
        metric.status,
        metric.explanation
    )
}

/// The user message sent to the model.
pub fn build_prompt(metrics: &MetricSet, context: &AnalysisContext<'_>, limit: usize) -> String {
    let top = rank_for_prompt(metrics, limit)
        .into_iter()
        .map(render_metric_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Actúa como analista financiero senior para PyMEs LATAM. Empresa: {}. Periodo: {}. Moneda: {}. \n\
         Indicadores clave:\n{}\n\n\
         Escribe un RESUMEN EJECUTIVO en español (180-220 palabras) con: 1) diagnóstico; \
         2) 3 acciones priorizadas de corto plazo; 3) 2 riesgos a monitorear; 4) tono claro y accionable.",
        context.company, context.period, context.currency, top
    )
}
