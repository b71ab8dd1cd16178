//! HTML rendering for the reservation notification email.
//!
//! All human-supplied text is escaped before interpolation and link
//! targets are percent-encoded; the template itself is fixed markup.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::domain::{Offer, Reservation};

/// Characters kept verbatim inside `mailto:`/`tel:` targets: the RFC 3986
/// unreserved set plus `+` for international phone prefixes.
const LINK_TARGET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~')
    .remove(b'+');

/// Escapes the five HTML-special characters `& < > " '`.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Percent-encodes a value for use inside a `mailto:` or `tel:` target.
#[must_use]
pub fn encode_link_target(value: &str) -> String {
    utf8_percent_encode(value, LINK_TARGET).to_string()
}

/// Subject line for the owner notification.
#[must_use]
pub fn reservation_subject(offer_title: &str) -> String {
    format!("🛒 Nueva reserva: {offer_title}")
}

/// Renders the owner notification body for a new reservation.
#[must_use]
pub fn reservation_email(offer: &Offer, reservation: &Reservation, owner_name: &str) -> String {
    let title = escape_html(&offer.title);
    let store_name = escape_html(&offer.store_name);
    let town = escape_html(&offer.town);
    let publisher = escape_html(owner_name);
    let subscriber = escape_html(&reservation.subscriber_name);
    let email_text = escape_html(&reservation.subscriber_email);
    let email_href = encode_link_target(&reservation.subscriber_email);
    let price = format!("{:.2}€", offer.price);

    let phone_block = reservation
        .subscriber_phone
        .as_deref()
        .map(|phone| {
            let phone_text = escape_html(phone);
            let phone_href = encode_link_target(phone);
            format!(
                "<p><span class=\"label\">Teléfono:</span> \
                 <a href=\"tel:{phone_href}\">{phone_text}</a></p>"
            )
        })
        .unwrap_or_default();

    let message_block = reservation
        .message
        .as_deref()
        .map(|message| {
            let message = escape_html(message);
            format!(
                "<p><span class=\"label\">Mensaje:</span></p>\
                 <p style=\"background: #f0f0f0; padding: 15px; border-radius: 8px;\">{message}</p>"
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <style>
      body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; }}
      .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
      .header {{ background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 12px 12px 0 0; text-align: center; }}
      .content {{ background: #f8f9fa; padding: 30px; border-radius: 0 0 12px 12px; }}
      .offer-card {{ background: white; padding: 20px; border-radius: 8px; margin: 20px 0; box-shadow: 0 2px 8px rgba(0,0,0,0.1); }}
      .price {{ font-size: 24px; font-weight: bold; color: #667eea; }}
      .subscriber-info {{ background: white; padding: 20px; border-radius: 8px; margin-top: 20px; }}
      .label {{ font-weight: 600; color: #666; }}
      .footer {{ text-align: center; margin-top: 20px; color: #888; font-size: 14px; }}
    </style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h1 style="margin: 0;">🎉 ¡Nueva Reserva!</h1>
        <p style="margin: 10px 0 0 0; opacity: 0.9;">Has recibido una reserva para tu oferta</p>
      </div>
      <div class="content">
        <p>Hola <strong>{publisher}</strong>,</p>
        <p>Un suscriptor ha mostrado interés en tu oferta:</p>

        <div class="offer-card">
          <h3 style="margin: 0 0 10px 0;">{title}</h3>
          <p class="price">{price}</p>
          <p style="margin: 5px 0;"><strong>Tienda:</strong> {store_name}</p>
          <p style="margin: 5px 0;"><strong>Población:</strong> {town}</p>
        </div>

        <div class="subscriber-info">
          <h3 style="margin: 0 0 15px 0;">📧 Datos del interesado</h3>
          <p><span class="label">Nombre:</span> {subscriber}</p>
          <p><span class="label">Email:</span> <a href="mailto:{email_href}">{email_text}</a></p>
          {phone_block}
          {message_block}
        </div>

        <p style="margin-top: 20px;">Te recomendamos ponerte en contacto con el interesado lo antes posible.</p>

        <div class="footer">
          <p>Este email fue enviado desde Publicitta</p>
        </div>
      </div>
    </div>
  </body>
</html>
"#
    )
}
