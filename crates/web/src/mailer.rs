use chrono::{Datelike, Utc};
use serde::Serialize;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

/// Sends transactional mail through Resend, or logs it when no API key is set.
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_key: Option<String>,
    from: String,
}

impl Mailer {
    pub fn new(api_key: Option<String>, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Delivery failures are logged and never reach the caller, so the
    /// forgot-password response does not depend on the mail provider.
    pub async fn send_password_reset(&self, to: &str, first_name: &str, reset_url: &str) {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::info!(to, reset_url, "Mail delivery not configured, password reset link");
            return;
        };

        let email = ResendEmail {
            from: &self.from,
            to: [to],
            subject: "Restablecer contraseña - DeportyApp",
            html: password_reset_html(first_name, reset_url),
        };

        let result = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(api_key)
            .json(&email)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => tracing::info!(to, "Password reset email sent"),
            Err(e) => {
                tracing::error!(to, "Failed to send password reset email: {e}");
                tracing::info!(to, reset_url, "Password reset link");
            }
        }
    }
}

pub fn password_reset_html(first_name: &str, reset_url: &str) -> String {
    let year = Utc::now().year();
    let first_name = escape_html(first_name);

    format!(
        r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"></head>
  <body style="font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
      <h1>Restablecer Contraseña</h1>
      <p>Hola <strong>{first_name}</strong>,</p>
      <p>Recibimos una solicitud para restablecer la contraseña de tu cuenta en DeportyApp.</p>
      <p><a href="{reset_url}">Restablecer Contraseña</a></p>
      <p>O copia y pega este enlace en tu navegador:</p>
      <p style="word-break: break-all;">{reset_url}</p>
      <p><strong>Importante:</strong> Este enlace expirará en <strong>1 hora</strong>.</p>
      <p>Si no solicitaste restablecer tu contraseña, puedes ignorar este mensaje.</p>
      <p style="color: #6b7280; font-size: 12px;">© {year} DeportyApp.</p>
    </div>
  </body>
</html>"#
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_email_contains_link_and_name() {
        let html = password_reset_html("Ana", "https://deporty.app/reset-password/abc");
        assert!(html.contains("Hola <strong>Ana</strong>"));
        assert_eq!(html.matches("https://deporty.app/reset-password/abc").count(), 2);
    }

    #[test]
    fn test_reset_email_escapes_name() {
        let html = password_reset_html("<script>", "https://deporty.app/reset-password/abc");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_mailer_without_key_is_not_configured() {
        assert!(!Mailer::new(None, "Deporty <no-reply@deporty.app>".into()).is_configured());
    }
}
