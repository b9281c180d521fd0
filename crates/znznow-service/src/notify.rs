//! Submission notifications.
//!
//! After a successful submission the vendor gets an email linking their
//! signed agreement, delivered through the Resend API. Without an API key
//! the notifier logs the would-be message and reports success, which keeps
//! development and tests fully offline. Delivery failures are never allowed
//! to fail the submission.

use serde::Serialize;

use znznow_store::Agreement;

/// Resend API endpoint.
const RESEND_URL: &str = "https://api.resend.com/emails";

/// Configuration for outbound email.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Resend API key; `None` disables delivery and logs instead.
    pub api_key: Option<String>,
    /// From address on outgoing mail.
    pub from: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from: "noreply@znznow.com".to_string(),
        }
    }
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Sends agreement emails through the Resend API.
pub struct EmailNotifier {
    config: NotifierConfig,
    client: reqwest::Client,
}

impl EmailNotifier {
    /// Create a notifier.
    #[must_use]
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Notify the vendor that their signed agreement is ready.
    ///
    /// Returns whether delivery (or the logging fallback) succeeded.
    pub async fn agreement_created(&self, agreement: &Agreement, download_url: &str) -> bool {
        let subject = "Your ZNZNOW Vendor Partnership Agreement";
        let html = agreement_email_html(&agreement.vendor_name, download_url);

        let Some(api_key) = &self.config.api_key else {
            tracing::info!(
                to = %agreement.vendor_email,
                subject,
                "no email API key configured, skipping delivery"
            );
            return true;
        };

        let request = EmailRequest {
            from: &self.config.from,
            to: &agreement.vendor_email,
            subject,
            html: &html,
        };

        let response = self
            .client
            .post(RESEND_URL)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                tracing::info!(to = %agreement.vendor_email, "agreement email sent");
                true
            }
            Ok(response) => {
                tracing::error!(
                    status = %response.status(),
                    to = %agreement.vendor_email,
                    "email API rejected the message"
                );
                false
            }
            Err(err) => {
                tracing::error!(error = %err, "email delivery failed");
                false
            }
        }
    }
}

/// The email body: a greeting, a download link, and the company footer.
fn agreement_email_html(vendor_name: &str, download_url: &str) -> String {
    format!(
        "<html><body>\
         <h2>Dear {vendor_name},</h2>\
         <p>Thank you for signing your Vendor Partnership Agreement with ZNZNOW. \
         We are excited to welcome you as a partner!</p>\
         <p><a href=\"{download_url}\">Download Your Agreement</a></p>\
         <p>If you have any questions, contact us at contact@znznow.com.</p>\
         <p>Zanzisouk LTD (Trading as ZNZNOW)<br>\
         Migoz Plaza, Nyerere Road, Zanzibar, Tanzania</p>\
         </body></html>"
    )
}

/// Build a WhatsApp share link for a signed agreement.
///
/// The phone number is reduced to its digits; the message text is
/// percent-encoded into a `wa.me` URL.
#[must_use]
pub fn whatsapp_link(phone: &str, vendor_name: &str, download_url: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let message = format!(
        "Hello {vendor_name}!\n\n\
         Your ZNZNOW Vendor Partnership Agreement has been signed successfully.\n\n\
         Download your signed agreement here:\n{download_url}\n\n\
         Thank you for partnering with ZNZNOW!"
    );
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("https://wa.me/{digits}?text={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whatsapp_link_strips_phone_formatting() {
        let link = whatsapp_link("+255 123-456 789", "Spice Tours", "https://x.test/a.pdf");
        assert!(link.starts_with("https://wa.me/255123456789?text="));
        assert!(!link.contains(' '));
        assert!(link.contains("Spice+Tours") || link.contains("Spice%20Tours"));
    }

    #[test]
    fn email_html_carries_link_and_name() {
        let html = agreement_email_html("Spice Tours", "https://x.test/a.pdf");
        assert!(html.contains("Spice Tours"));
        assert!(html.contains("https://x.test/a.pdf"));
    }
}
