//! Public landing page.

use std::fmt::Write as _;

use crossins_client::{InsuranceType, SessionInfo};

use crate::config::ContactInfo;
use crate::forms::{FormStatus, QuoteForm};
use crate::views::{SITE_DESCRIPTION, escape, fill, layout, logout_form};

/// In-page anchors of the header navigation.
const NAVIGATION: [(&str, &str); 7] = [
    ("#inicio", "Inicio"),
    ("#quienes", "Quiénes somos"),
    ("#vision", "Visión y misión"),
    ("#experiencia", "Experiencia"),
    ("#productos", "Productos"),
    ("#testimonios", "Testimonios"),
    ("#contacto", "Contacto"),
];

const PRODUCTS: [(&str, &str); 6] = [
    ("Autos", "Coberturas completas, responsabilidad pública y asistencia en carretera."),
    ("Vida", "Planes flexibles para proteger a tu familia y planificar el futuro."),
    ("Propiedad", "Seguros residenciales y comerciales contra daños y desastres naturales."),
    ("Comerciales", "Pólizas personalizadas para negocios, responsabilidad civil y más."),
    ("Anualidades", "Soluciones de ahorro y retiro con respaldo confiable."),
    ("Otros", "Planes especializados para embarcaciones, viajes, salud suplementaria y más."),
];

struct TeamMember {
    name: &'static str,
    role: &'static str,
    bio: &'static str,
    photo: &'static str,
}

const TEAM: [TeamMember; 2] = [
    TeamMember {
        name: "Johanna González",
        role: "Directora Ejecutiva",
        bio: "20 años diseñando soluciones de seguros a medida para clientes corporativos y personales.",
        photo: "/static/images/johanna_profile.jpg",
    },
    TeamMember {
        name: "Ricardo Cruz",
        role: "Gerente de Operaciones",
        bio: "Coordina el equipo de agentes y las renovaciones para garantizar renovaciones sin fricción.",
        photo: "/static/images/ricardo_profile.jpg",
    },
];

const TESTIMONIALS: [(&str, &str); 2] = [
    (
        "José Martínez",
        "El equipo de Cross Insurance me ayudó a renovar mis pólizas comerciales sin detener mi operación. La comunicación fue excelente.",
    ),
    (
        "Andrea García",
        "Su asesoría en seguros de vida fue clara y transparente. Sentí que realmente entendieron mis metas.",
    ),
];

const MEDIA_HIGHLIGHTS: [(&str, &str); 2] = [
    (
        "Podcast: Lo esencial del seguro de autos",
        "Conoce cómo optimizar coberturas y deducibles según tu perfil de riesgo.",
    ),
    (
        "Video: Guía rápida para preparar tu renovación",
        "Nuestro equipo explica los documentos que debes tener listos para una transición sin sorpresas.",
    ),
];

/// Everything the landing page needs from one request.
#[derive(Debug)]
pub struct LandingPage<'a> {
    pub session: &'a SessionInfo,
    pub contact: &'a ContactInfo,
    pub quote: &'a QuoteForm,
    /// Copyright year in the footer.
    pub year: i32,
}

/// Render the full landing page.
pub fn render(page: &LandingPage<'_>) -> String {
    let contact = page.contact;
    let body = fill(
        LANDING_BODY,
        &[
            ("NAV", &navigation_links()),
            ("PROFILE_MENU", &profile_menu(page.session)),
            ("MOBILE_MENU", &mobile_menu(page.session, contact)),
            ("TEAM", &team()),
            ("PRODUCTS", &products()),
            ("TESTIMONIALS", &testimonials()),
            ("MEDIA", &media()),
            ("YEAR", &page.year.to_string()),
            ("PHONE_HREF", &escape(&contact.phone_link())),
            ("WHATSAPP_HREF", &escape(&contact.whatsapp_link())),
            ("EMAIL_HREF", &escape(&contact.email_link())),
            ("PHONE", &escape(&contact.phone_number)),
            ("WHATSAPP", &escape(&contact.whatsapp_number)),
            ("EMAIL", &escape(&contact.support_email)),
            ("QUOTE_FORM", &quote_form(page.quote)),
        ],
    );
    layout("Cross Insurance", SITE_DESCRIPTION, &body)
}

fn navigation_links() -> String {
    NAVIGATION
        .iter()
        .map(|(href, label)| format!(r#"<a href="{href}">{label}</a>"#))
        .collect()
}

/// Desktop profile menu.
pub fn profile_menu(session: &SessionInfo) -> String {
    let items = session_items(session);
    let title = if session.authenticated { "Sesión" } else { "Acceso" };
    format!(
        r#"<details class="menu desktop"><summary class="avatar"><span class="sr-only">Abrir menú de perfil</span>{label}</summary><div class="menu-panel" role="menu"><p class="menu-title">{title}</p>{items}</div></details>"#,
        label = escape(&session.avatar_label()),
    )
}

/// Mobile menu: navigation, contact links and the same session actions.
pub fn mobile_menu(session: &SessionInfo, contact: &ContactInfo) -> String {
    format!(
        r#"<details class="menu mobile-menu"><summary class="avatar"><span class="sr-only">Abrir menú principal</span>≡</summary><div class="menu-panel" role="menu">{nav}<a href="{phone_href}">Llamar {phone}</a><a href="{wa_href}" target="_blank" rel="noreferrer">WhatsApp</a>{items}</div></details>"#,
        nav = navigation_links(),
        phone_href = escape(&contact.phone_link()),
        phone = escape(&contact.phone_number),
        wa_href = escape(&contact.whatsapp_link()),
        items = session_items(session),
    )
}

fn session_items(session: &SessionInfo) -> String {
    if !session.authenticated {
        return r#"<a href="/login">Iniciar sesión</a>"#.to_owned();
    }
    let mut items = String::new();
    if session.is_staff {
        items.push_str(r#"<a href="/dashboard">Dashboard</a>"#);
    }
    items.push_str(&logout_form("/", ""));
    items
}

fn team() -> String {
    TEAM.iter()
        .map(|m| {
            format!(
                r#"<div class="card"><div class="team-member"><img src="{photo}" alt="{name}" loading="lazy"/><div><p><strong>{name}</strong></p><p class="muted small">{role}</p></div></div><p class="muted">{bio}</p></div>"#,
                photo = m.photo,
                name = m.name,
                role = m.role,
                bio = m.bio,
            )
        })
        .collect()
}

fn products() -> String {
    PRODUCTS
        .iter()
        .map(|(title, description)| {
            format!(r#"<div class="card"><h3>{title}</h3><p class="muted">{description}</p></div>"#)
        })
        .collect()
}

fn testimonials() -> String {
    TESTIMONIALS
        .iter()
        .map(|(name, quote)| {
            format!(
                r#"<figure class="card"><blockquote>“{quote}”</blockquote><figcaption>{name}</figcaption></figure>"#
            )
        })
        .collect()
}

fn media() -> String {
    MEDIA_HIGHLIGHTS
        .iter()
        .map(|(title, description)| {
            format!(
                r#"<div class="card"><h3>{title}</h3><p class="muted">{description}</p><button type="button" class="btn btn-outline">Ver recurso</button></div>"#
            )
        })
        .collect()
}

/// Quote form with its current status and preserved values.
pub fn quote_form(form: &QuoteForm) -> String {
    let fields = &form.fields;

    let mut options = String::new();
    for option in InsuranceType::ALL {
        let selected = if option == fields.insurance_type { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{option}"{selected}>{option}</option>"#);
    }

    let (button_label, disabled) = if form.is_loading() {
        ("Enviando...", " disabled")
    } else {
        ("Enviar solicitud", "")
    };

    let message = form.message.as_deref().map_or_else(String::new, |msg| {
        let class = if form.status == FormStatus::Success { "msg-ok" } else { "msg-bad" };
        format!(r#"<p class="{class}" role="status">{}</p>"#, escape(msg))
    });

    fill(
        QUOTE_FORM,
        &[
            ("NAME", &escape(&fields.name)),
            ("PHONE", &escape(&fields.phone)),
            ("EMAIL", &escape(&fields.email)),
            ("NOTES", &escape(&fields.notes)),
            ("OPTIONS", &options),
            ("BUTTON_LABEL", button_label),
            ("DISABLED", disabled),
            ("MESSAGE", &message),
        ],
    )
}

const QUOTE_FORM: &str = r##"<form class="card form" method="post" action="/quote#cotizacion" enctype="multipart/form-data">
<div><h3>Solicita tu cotización</h3><p class="muted small">Completa el formulario y adjunta documentos si deseas acelerar tu evaluación.</p></div>
<div class="grid-2">
<label>Nombre completo<input name="name" type="text" required placeholder="Ej. Juan Pérez" value="{{NAME}}"/></label>
<label>Teléfono<input name="phone" type="tel" required placeholder="Ej. +1 787 555 1234" value="{{PHONE}}"/></label>
<label>Email<input name="email" type="email" required placeholder="tu@email.com" value="{{EMAIL}}"/></label>
<label>Tipo de seguro<select name="insurance_type">{{OPTIONS}}</select></label>
</div>
<label>Notas adicionales<textarea name="notes" rows="4" placeholder="Cuéntanos sobre tu necesidad de cobertura.">{{NOTES}}</textarea></label>
<label>Adjunta documentos (opcional)<input name="attachment" type="file" accept="image/*,application/pdf"/><span class="muted small">Licencia de conducir, identificación u otros archivos relevantes.</span></label>
<button type="submit" class="btn btn-dark"{{DISABLED}}>{{BUTTON_LABEL}}</button>
{{MESSAGE}}
<p class="muted small">Al enviar este formulario aceptas ser contactado por un asesor de Cross Insurance a través de los datos proporcionados.</p>
</form>"##;

const LANDING_BODY: &str = r##"<header class="site-header"><div class="container header-row">
<a href="#inicio" class="brand"><img src="/static/logos/cross-insurance-logo-black.png" alt="Cross Insurance Logo"/>Cross Insurance</a>
<nav class="nav">{{NAV}}</nav>
<div class="header-actions">
<a href="{{PHONE_HREF}}" class="btn btn-outline desktop">Llamar</a>
<a href="{{WHATSAPP_HREF}}" class="btn btn-dark desktop" target="_blank" rel="noreferrer">WhatsApp</a>
{{PROFILE_MENU}}
{{MOBILE_MENU}}
</div>
</div></header>
<main id="inicio">
<section><div class="container hero">
<div>
<p class="eyebrow">Corretage de Seguros</p>
<h1>Protegemos tu patrimonio con asesoría cercana y soluciones ágiles.</h1>
<p>CRM inteligente, alertas proactivas y un equipo especializado para atender a clientes individuales y corporativos en todo Puerto Rico.</p>
<div class="actions"><a href="#cotizacion" class="btn btn-dark">Solicitar cotización</a><a href="#productos" class="btn btn-outline">Ver productos</a></div>
</div>
<img src="/static/images/landing_image.jpeg" alt="Landing Image"/>
</div></section>
<section id="quienes"><div class="container grid-2">
<div>
<h2>Quiénes somos</h2>
<p class="muted">Somos un equipo multidisciplinario con más de 25 años de experiencia en seguros personales y comerciales. Nuestro CRM propietario nos permite responder más rápido, documentar cada interacción y ofrecer recomendaciones precisas en cada etapa del ciclo de vida de una póliza.</p>
<p class="muted">Trabajamos con las principales aseguradoras del país y mantenemos un acompañamiento constante para nuestros clientes, desde la selección del producto hasta la gestión de reclamaciones.</p>
</div>
<div><h3>Nuestro equipo</h3>{{TEAM}}</div>
</div></section>
<section id="vision" class="dark"><div class="container">
<h2>Visión &amp; Misión</h2>
<p class="muted">En Cross Insurance acompañamos a personas y negocios de Puerto Rico con tecnología y 17 años de experiencia, ofreciendo guía cercana y protección clara para los momentos inesperados.</p>
<div class="grid-2" style="margin-top:24px">
<div class="card"><h3>Visión</h3><p class="muted">Ser el aliado de confianza que brinda transparencia y seguridad, uniendo tecnología y cercanía humana para que cada cliente sienta que está en buenas manos.</p></div>
<div class="card"><h3>Misión</h3><p class="muted">Caminar con cada cliente desde el inicio, escuchando, simplificando procesos y respondiendo con empatía y agilidad para proteger lo que importa.</p></div>
</div>
</div></section>
<section id="experiencia"><div class="container grid-2">
<div>
<h2>Experiencia comprobada</h2>
<p class="muted">Gestionamos cientos de pólizas multirriesgo, con tasas de renovación superiores al 90%. Nuestro CRM privado sincroniza recordatorios, cartas de bienvenida y documentos críticos, asegurando que cada asegurado reciba seguimiento oportuno.</p>
<p class="muted">También atendemos reclamaciones y facturas manuales para planes especiales, coordinando pagos parciales y acuerdos personalizados.</p>
</div>
<div class="card"><h3>Capacidades destacadas</h3><ul style="list-style:none;margin-top:12px">
<li>• Dashboard con métricas de pólizas, renovaciones y facturación.</li>
<li>• Alertas automáticas vía email, SMS o WhatsApp.</li>
<li>• Biblioteca de cartas prediseñadas por tipo de cobertura.</li>
<li>• Integración con almacenamiento seguro para expedientes.</li>
</ul></div>
</div></section>
<section id="productos"><div class="container">
<div class="dash-head"><div><h2>Productos y Servicios</h2><p class="muted">Ofrecemos un portafolio amplio de soluciones para individuos y empresas. Diseñamos paquetes integrales según las necesidades de cada cliente.</p></div><a href="#cotizacion" class="btn btn-outline">Agendar asesoría</a></div>
<div class="grid-3">{{PRODUCTS}}</div>
</div></section>
<section id="testimonios" class="dark"><div class="container">
<h2>Lo que dicen nuestros clientes</h2>
<p class="muted">Historias reales de clientes que confiaron sus pólizas a Cross Insurance.</p>
<div class="grid-2" style="margin-top:24px">{{TESTIMONIALS}}</div>
</div></section>
<section id="media"><div class="container">
<h2>Recursos multimedia</h2>
<p class="muted">Mantente al día con nuestros videos breves, webinars y episodios de podcast sobre tendencias en seguros.</p>
<div class="grid-2" style="margin-top:24px">{{MEDIA}}</div>
</div></section>
<section id="cotizacion"><div class="container quote-section">
<div>
<h2>Trabaja con un asesor de confianza</h2>
<p class="muted">Nuestro formulario se conecta directo con el CRM para registrar tu solicitud, asignar un agente y enviar confirmación automática.</p>
<div class="contact-list">
<p><span>WhatsApp:</span> <a href="{{WHATSAPP_HREF}}">{{WHATSAPP}}</a></p>
<p><span>Teléfono:</span> <a href="{{PHONE_HREF}}">{{PHONE}}</a></p>
<p><span>Email:</span> <a href="{{EMAIL_HREF}}">{{EMAIL}}</a></p>
</div>
</div>
<div>{{QUOTE_FORM}}</div>
</div></section>
</main>
<footer id="contacto" class="footer"><div class="container footer-row">
<div><p><strong>Cross Insurance</strong></p><p class="muted">CRM interno, sitio público y automatizaciones integradas para brindar un servicio de seguros moderno y confiable.</p></div>
<div class="footer-links"><a href="{{EMAIL_HREF}}">{{EMAIL}}</a><a href="{{PHONE_HREF}}">{{PHONE}}</a><a href="{{WHATSAPP_HREF}}">WhatsApp directo</a></div>
<div class="muted">© {{YEAR}} Cross Insurance. Todos los derechos reservados.<p>Desarrollado por <a href="https://lexamatechnologies.com" target="_blank" rel="noopener noreferrer">Lexama Technologies</a></p></div>
</div></footer>
"##;
