//! HTML renderers.
//!
//! Pages are assembled from raw-string templates with `{{PLACEHOLDER}}`
//! slots. Every dynamic value goes through [`escape`] before it is placed.

pub mod dashboard;
pub mod landing;
pub mod login;

/// Site-wide meta description.
pub const SITE_DESCRIPTION: &str = "Correduría moderna que ofrece seguros de autos, vida, propiedad y comerciales con una plataforma CRM integral.";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Fill `{{NAME}}` slots of `template` in a single left-to-right pass.
///
/// Inserted values are never rescanned, so a value that itself looks like a
/// slot is kept verbatim. Slots without a matching entry are left in place.
pub(crate) fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let name = &after[..end];
        match slots.iter().find(|(slot, _)| *slot == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Wrap a page body in the document shell.
pub fn layout(title: &str, description: &str, body: &str) -> String {
    fill(
        LAYOUT,
        &[
            ("TITLE", &escape(title)),
            ("DESCRIPTION", &escape(description)),
            ("CSS", SITE_CSS),
            ("BODY", body),
        ],
    )
}

/// Minimal page for request errors.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"<main class="center-page"><div class="card narrow">
<h1>{title}</h1>
<p class="muted">{message}</p>
<a class="btn btn-dark" href="/">Volver al inicio</a>
</div></main>"#,
        title = escape(title),
        message = escape(message),
    );
    layout(&format!("{title} | Cross Insurance"), SITE_DESCRIPTION, &body)
}

/// Logout button as a form posting to `/logout`.
pub(crate) fn logout_form(next: &str, class: &str) -> String {
    format!(
        r#"<form method="post" action="/logout" class="inline-form"><input type="hidden" name="next" value="{next}"/><button type="submit" class="{class}">Cerrar sesión</button></form>"#,
        next = escape(next),
        class = escape(class),
    )
}

const LAYOUT: &str = r##"<!DOCTYPE html>
<html lang="es"><head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1.0"/>
<title>{{TITLE}}</title>
<meta name="description" content="{{DESCRIPTION}}"/>
<meta property="og:title" content="Cross Insurance"/>
<meta property="og:description" content="{{DESCRIPTION}}"/>
<meta property="og:url" content="https://www.crossinsurance.com"/>
<meta property="og:locale" content="es_PR"/>
<meta property="og:type" content="website"/>
<link rel="canonical" href="https://www.crossinsurance.com"/>
<link rel="icon" href="/static/logos/cross-insurance-logo-gold.png"/>
<style>{{CSS}}</style>
</head>
<body>
{{BODY}}
</body></html>
"##;

const SITE_CSS: &str = r"
*{margin:0;padding:0;box-sizing:border-box}
:root{--ink:#0f172a;--ink-soft:#334155;--muted:#64748b;--line:#e2e8f0;--paper:#f8fafc;--ok:#16a34a;--bad:#dc2626;--gold:#c9a227}
body{font-family:system-ui,-apple-system,'Segoe UI',sans-serif;background:var(--paper);color:var(--ink);line-height:1.6;min-height:100vh}
a{color:inherit;text-decoration:none}
.container{max-width:1120px;margin:0 auto;padding:0 24px}
.muted{color:var(--muted)}
.small{font-size:13px}
.btn{display:inline-flex;align-items:center;justify-content:center;border-radius:999px;padding:10px 22px;font-size:14px;font-weight:600;border:1px solid transparent;cursor:pointer;transition:background .2s}
.btn-dark{background:var(--ink);color:#fff}
.btn-dark:hover{background:#1e293b}
.btn-dark:disabled{background:#94a3b8;cursor:not-allowed}
.btn-outline{border-color:var(--line);background:#fff;color:var(--ink)}
.btn-outline:hover{border-color:var(--ink-soft)}
.inline-form{display:inline}
.site-header{position:sticky;top:0;z-index:20;background:rgba(255,255,255,.9);backdrop-filter:blur(8px);border-bottom:1px solid var(--line)}
.header-row{display:flex;align-items:center;justify-content:space-between;height:72px;gap:16px}
.brand{display:flex;align-items:center;gap:12px;font-weight:700;font-size:18px}
.brand img{width:48px;height:48px;object-fit:contain}
.nav{display:flex;gap:20px;font-size:14px;color:var(--ink-soft)}
.nav a:hover{color:var(--ink)}
.header-actions{display:flex;align-items:center;gap:10px}
.menu{position:relative}
.menu>summary{list-style:none;cursor:pointer}
.menu>summary::-webkit-details-marker{display:none}
.avatar{width:40px;height:40px;border-radius:50%;background:var(--ink);color:#fff;display:flex;align-items:center;justify-content:center;font-weight:700}
.menu-panel{position:absolute;right:0;top:48px;min-width:200px;background:#fff;border:1px solid var(--line);border-radius:16px;padding:14px;box-shadow:0 12px 32px rgba(15,23,42,.12);display:flex;flex-direction:column;gap:8px}
.menu-panel .menu-title{font-size:12px;text-transform:uppercase;letter-spacing:.08em;color:var(--muted)}
.menu-panel a,.menu-panel button{width:100%;text-align:left;background:none;border:0;font:inherit;font-size:14px;padding:6px 8px;border-radius:8px;cursor:pointer}
.menu-panel a:hover,.menu-panel button:hover{background:var(--paper)}
.mobile-menu{display:none}
.sr-only{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0,0,0,0)}
section{padding:72px 0}
.eyebrow{font-size:12px;text-transform:uppercase;letter-spacing:.2em;color:var(--gold);font-weight:600}
h1{font-size:44px;line-height:1.1;letter-spacing:-1px}
h2{font-size:32px;letter-spacing:-.5px;margin-bottom:12px}
h3{font-size:18px}
.hero{display:grid;grid-template-columns:1.3fr 1fr;gap:48px;align-items:center}
.hero img{width:100%;border-radius:24px}
.hero p{margin:18px 0 28px;font-size:18px;color:var(--ink-soft)}
.actions{display:flex;gap:12px;flex-wrap:wrap}
.grid-2{display:grid;grid-template-columns:repeat(2,1fr);gap:20px}
.grid-3{display:grid;grid-template-columns:repeat(3,1fr);gap:20px}
.card{background:#fff;border:1px solid var(--line);border-radius:20px;padding:24px}
.card.narrow{max-width:440px;width:100%}
.team-member{display:flex;gap:14px;align-items:center;margin-bottom:12px}
.team-member img{width:64px;height:64px;border-radius:50%;object-fit:cover}
.dark{background:var(--ink);color:#fff}
.dark .muted{color:#cbd5e1}
.dark .card{background:rgba(255,255,255,.06);border-color:rgba(255,255,255,.12)}
blockquote{font-size:16px;font-style:italic}
figcaption{margin-top:12px;font-weight:600}
.quote-section{display:grid;grid-template-columns:1fr 1.2fr;gap:40px;align-items:start}
.contact-list p{margin-top:8px}
.contact-list span{font-weight:600}
.form{display:flex;flex-direction:column;gap:16px}
.form label{display:flex;flex-direction:column;font-size:14px;font-weight:500;color:var(--ink-soft)}
.form input,.form select,.form textarea{margin-top:4px;border:1px solid var(--line);border-radius:10px;padding:9px 12px;font:inherit;color:var(--ink);background:#fff}
.form input[type=file]{border-style:dashed}
.msg-ok{color:var(--ok);font-size:14px}
.msg-bad{color:var(--bad);font-size:14px}
.notice{background:#fef3c7;border:1px solid #fde68a;color:#92400e;border-radius:12px;padding:10px 14px;font-size:14px}
.footer{border-top:1px solid var(--line);padding:40px 0;font-size:14px}
.footer-row{display:flex;justify-content:space-between;gap:24px;flex-wrap:wrap}
.footer-links{display:flex;flex-direction:column;gap:6px}
.center-page{min-height:100vh;display:flex;align-items:center;justify-content:center;padding:24px}
.dash{max-width:1200px;margin:0 auto;padding:40px 24px}
.dash-head{display:flex;justify-content:space-between;align-items:flex-start;gap:24px;flex-wrap:wrap;margin-bottom:32px}
.summary{display:grid;grid-template-columns:repeat(4,1fr);gap:16px;margin-top:16px}
.stat .label{font-size:13px;color:var(--muted)}
.stat .value{font-size:28px;font-weight:700}
.panels{display:grid;grid-template-columns:repeat(3,1fr);gap:20px;margin-top:32px}
.panel-head{display:flex;justify-content:space-between;align-items:flex-start;margin-bottom:12px}
.badge{background:var(--ink);color:#fff;border-radius:999px;padding:2px 10px;font-size:12px;font-weight:600}
.alert-item{border-top:1px solid var(--line);padding:10px 0}
.alert-item .primary{font-weight:600}
.alert-item .meta{font-size:12px;color:var(--muted)}
.error-box{background:#fef2f2;border:1px solid #fecaca;color:#991b1b;border-radius:16px;padding:16px}
@media(max-width:900px){.nav,.header-actions .desktop{display:none}.mobile-menu{display:block}.hero,.quote-section,.grid-2,.grid-3,.panels{grid-template-columns:1fr}.summary{grid-template-columns:repeat(2,1fr)}h1{font-size:34px}}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_does_not_rescan_inserted_values() {
        let html = fill(
            "<b>{{A}}</b><i>{{B}}</i>",
            &[("A", "{{B}}"), ("B", "second")],
        );
        assert_eq!(html, "<b>{{B}}</b><i>second</i>");
    }

    #[test]
    fn fill_keeps_unknown_and_unterminated_slots() {
        assert_eq!(fill("x {{NOPE}} y", &[("A", "1")]), "x {{NOPE}} y");
        assert_eq!(fill("{{A}} and {{tail", &[("A", "1")]), "1 and {{tail");
    }

    #[test]
    fn escape_handles_markup_and_quotes() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn layout_fills_slots() {
        let page = layout("Hola <mundo>", "desc", "<main>cuerpo</main>");
        assert!(page.contains("<title>Hola &lt;mundo&gt;</title>"));
        assert!(page.contains("<main>cuerpo</main>"));
        assert!(page.contains(r#"<html lang="es">"#));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn logout_form_posts_next() {
        let form = logout_form("/login", "btn");
        assert!(form.contains(r#"action="/logout""#));
        assert!(form.contains(r#"name="next" value="/login""#));
    }
}
