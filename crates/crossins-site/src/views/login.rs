//! Staff login page.

use crate::forms::LoginForm;
use crate::views::{escape, fill, layout};

/// Render the login page.
///
/// `notice` is shown above the form, e.g. when the dashboard sent the user
/// here.
pub fn render(form: &LoginForm, notice: Option<&str>) -> String {
    let notice = notice.map_or_else(String::new, |text| {
        format!(r#"<p class="notice" role="status">{}</p>"#, escape(text))
    });
    let error = form.error.as_deref().map_or_else(String::new, |text| {
        format!(r#"<p class="msg-bad" role="alert">{}</p>"#, escape(text))
    });
    let (button_label, disabled) = if form.is_submitting() {
        ("Iniciando sesión...", " disabled")
    } else {
        ("Entrar", "")
    };

    let body = fill(
        LOGIN_BODY,
        &[
            ("BUTTON_LABEL", button_label),
            ("DISABLED", disabled),
            ("NOTICE", &notice),
            ("ERROR", &error),
            ("USERNAME", &escape(&form.username)),
        ],
    );
    layout(
        "Iniciar sesión | Cross Insurance",
        "Acceso del equipo al CRM de Cross Insurance.",
        &body,
    )
}

const LOGIN_BODY: &str = r#"<main class="center-page"><div class="card narrow">
<form class="form" method="post" action="/login">
<div><h1 style="font-size:26px">Inicia sesión en el CRM</h1><p class="muted small">Usa tus credenciales de staff de Django. Si no cuentas con una, solicita acceso al administrador del sistema.</p></div>
{{NOTICE}}
<label>Usuario<input name="username" type="text" placeholder="tu.usuario" autocomplete="username" required value="{{USERNAME}}"/></label>
<label>Contraseña<input name="password" type="password" placeholder="••••••••" autocomplete="current-password" required/></label>
{{ERROR}}
<button type="submit" class="btn btn-dark"{{DISABLED}}>{{BUTTON_LABEL}}</button>
</form>
<p class="small muted" style="margin-top:16px"><a href="/">← Volver al sitio</a></p>
</div></main>"#;

#[cfg(test)]
mod tests {
    use crossins_client::ClientError;

    use super::*;

    #[test]
    fn fresh_form() {
        let html = render(&LoginForm::new(), None);
        assert!(html.contains("Inicia sesión en el CRM"));
        assert!(html.contains(r#"value="""#));
        assert!(!html.contains("role=\"alert\""));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn failed_attempt_keeps_username_and_drops_password() {
        let mut form = LoginForm::new();
        assert!(form.begin("maría<", "s3cret"));
        form.fail_with(&ClientError::Api {
            status_code: 400,
            detail: Some("Credenciales inválidas".to_owned()),
        });
        let html = render(&form, None);
        assert!(html.contains(r#"value="maría&lt;""#));
        assert!(html.contains(r#"role="alert">Credenciales inválidas</p>"#));
        assert!(!html.contains("s3cret"));
    }

    #[test]
    fn username_that_looks_like_a_slot_is_kept() {
        let mut form = LoginForm::new();
        assert!(form.begin("{{ERROR}}", "pw"));
        form.fail_with(&ClientError::Api {
            status_code: 400,
            detail: Some("Credenciales inválidas".to_owned()),
        });
        let html = render(&form, None);
        assert!(html.contains(r#"value="{{ERROR}}""#));
        assert_eq!(html.matches(r#"role="alert""#).count(), 1);
    }

    #[test]
    fn notice_is_rendered() {
        let html = render(&LoginForm::new(), Some("Necesitas iniciar sesión"));
        assert!(html.contains(r#"class="notice""#));
        assert!(html.contains("Necesitas iniciar sesión"));
    }
}
