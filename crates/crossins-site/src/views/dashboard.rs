//! Staff metrics dashboard.

use crossins_client::fetcher::FetchState;
use crossins_client::{Alerts, DashboardSnapshot, Summary};

use crate::format::{Locale, format_date};
use crate::views::{escape, fill, layout, logout_form};

/// One row of an alert panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertItem {
    pub primary: String,
    pub secondary: Option<String>,
    pub meta: Option<String>,
}

/// Label/value pairs of the summary grid, in display order.
pub fn summary_items(summary: &Summary) -> [(&'static str, u64); 8] {
    [
        ("Clientes", summary.total_clients),
        ("Pólizas", summary.total_policies),
        ("Activas", summary.active_policies),
        ("Pendientes", summary.pending_policies),
        ("Renovaciones (30d)", summary.renewals_next_30_days),
        ("Facturas manuales", summary.manual_invoices),
        ("Facturas pendientes", summary.invoices_pending),
        ("Leads (7d)", summary.leads_last_7_days),
    ]
}

pub fn renewal_items(alerts: &Alerts, locale: Locale) -> Vec<AlertItem> {
    alerts
        .renewals
        .iter()
        .map(|r| AlertItem {
            primary: format!("{} • {}", r.policy_number, r.client),
            secondary: Some(r.product.clone()),
            meta: Some(format!(
                "{} • {}",
                format_date(r.renewal_date.as_deref(), locale),
                r.status
            )),
        })
        .collect()
}

pub fn invoice_items(alerts: &Alerts, locale: Locale) -> Vec<AlertItem> {
    alerts
        .invoices
        .iter()
        .map(|i| AlertItem {
            primary: format!("{} • {}", i.invoice_number, i.client),
            secondary: Some(format!("Póliza {}", i.policy_number)),
            meta: Some(format!(
                "{} • {} • {}",
                i.amount,
                i.status,
                format_date(i.due_date.as_deref(), locale)
            )),
        })
        .collect()
}

pub fn lead_items(alerts: &Alerts, locale: Locale) -> Vec<AlertItem> {
    alerts
        .leads
        .iter()
        .map(|l| AlertItem {
            primary: format!("{} ({})", l.name, l.insurance_type),
            secondary: Some(l.phone.clone()),
            meta: Some(format_date(Some(&l.created_at), locale)),
        })
        .collect()
}

/// Render the dashboard for whatever state the guarded load ended in.
pub fn render(state: &FetchState<DashboardSnapshot>, locale: Locale) -> String {
    let content = if state.loading {
        r#"<div class="card"><p class="muted">Cargando métricas...</p></div>"#.to_owned()
    } else if let Some(error) = &state.error {
        format!(r#"<div class="error-box" role="alert">{}</div>"#, escape(error))
    } else if let Some(snapshot) = &state.data {
        snapshot_sections(snapshot, locale)
    } else {
        String::new()
    };

    let body = fill(
        DASHBOARD_BODY,
        &[
            ("LOGOUT", &logout_form("/login", "btn btn-dark")),
            ("CONTENT", &content),
        ],
    );
    layout(
        "Dashboard | Cross Insurance",
        "Métricas clave del CRM: clientes, pólizas, renovaciones, facturas y leads recientes.",
        &body,
    )
}

fn snapshot_sections(snapshot: &DashboardSnapshot, locale: Locale) -> String {
    let stats: String = summary_items(&snapshot.summary)
        .iter()
        .map(|(label, value)| {
            format!(r#"<div class="card stat"><p class="label">{label}</p><p class="value">{value}</p></div>"#)
        })
        .collect();

    let alerts = &snapshot.alerts;
    let panels = [
        alert_panel("Renovaciones próximas", "30 días", &renewal_items(alerts, locale)),
        alert_panel("Facturas por gestionar", "Pendientes/Manual", &invoice_items(alerts, locale)),
        alert_panel("Leads recientes", "Últimos 5", &lead_items(alerts, locale)),
    ]
    .concat();

    format!(
        r#"<section style="padding:0"><h2 style="font-size:20px">Resumen rápido</h2><div class="summary">{stats}</div></section><section class="panels" style="padding:0">{panels}</section>"#
    )
}

fn alert_panel(title: &str, subtitle: &str, items: &[AlertItem]) -> String {
    let rows = if items.is_empty() {
        r#"<p class="muted small">Sin alertas en este momento.</p>"#.to_owned()
    } else {
        items.iter().map(alert_row).collect()
    };
    format!(
        r#"<div class="card"><div class="panel-head"><div><h3>{title}</h3><p class="muted small">{subtitle}</p></div><span class="badge">{count}</span></div>{rows}</div>"#,
        count = items.len(),
    )
}

fn alert_row(item: &AlertItem) -> String {
    let mut row = format!(
        r#"<div class="alert-item"><p class="primary">{}</p>"#,
        escape(&item.primary)
    );
    if let Some(secondary) = item.secondary.as_deref().filter(|s| !s.is_empty()) {
        row.push_str(&format!(r#"<p class="small">{}</p>"#, escape(secondary)));
    }
    if let Some(meta) = item.meta.as_deref().filter(|s| !s.is_empty()) {
        row.push_str(&format!(r#"<p class="meta">{}</p>"#, escape(meta)));
    }
    row.push_str("</div>");
    row
}

const DASHBOARD_BODY: &str = r#"<main class="dash">
<div class="dash-head">
<div><p class="eyebrow">CRM Insights</p><h1 style="font-size:32px">Dashboard de métricas y alertas</h1><p class="muted small">Debes iniciar sesión en el backend (por ejemplo en /admin/) con una cuenta del equipo para visualizar los datos.</p></div>
<div class="actions"><a href="/" class="btn btn-outline">Ir al sitio</a>{{LOGOUT}}</div>
</div>
{{CONTENT}}
</main>"#;
