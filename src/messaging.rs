//! Pre-filled payment reminder messages for an external messaging link.
//!
//! Nothing here sends anything; the crate only builds the normalized
//! phone number, the message text, and the `wa.me` URL.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::domain::Installment;
use crate::utils::{dates, money};

/// Strips formatting and prepends the Brazilian country code when the
/// number looks like a bare national number (10 or 11 digits).
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if matches!(digits.len(), 10 | 11) {
        format!("55{digits}")
    } else {
        digits
    }
}

/// Fixed reminder phrasing with the client's name, amount, and due date.
pub fn payment_reminder(installment: &Installment) -> String {
    format!(
        "Olá {}! Lembrete: a parcela de {} com vencimento em {} está em aberto. \
         Qualquer dúvida, estamos à disposição.",
        installment.client_name,
        money::format_brl(installment.amount),
        dates::format_display(installment.due_date),
    )
}

/// `wa.me` link that opens a chat with the reminder already typed.
/// Returns `None` when the phone has no digits at all.
pub fn reminder_link(phone: &str, installment: &Installment) -> Option<String> {
    let normalized = normalize_phone(phone);
    if normalized.is_empty() {
        return None;
    }
    let message = payment_reminder(installment);
    let encoded = utf8_percent_encode(&message, NON_ALPHANUMERIC);
    Some(format!("https://wa.me/{normalized}?text={encoded}"))
}
