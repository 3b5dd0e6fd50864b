// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context composition for persona prompts.
//!
//! Both execution modes assemble the same enriched message: identity
//! header, then the short-term session block, then the literal current
//! request, joined with stable separators so the composition is
//! reconstructible in tests.

use lifeos_core::{UserProfile, UserRole};

/// Separator opening the current-request section.
pub const REQUEST_SEPARATOR: &str = "--- MENSAJE ACTUAL ---";
/// Separator opening the identity section.
pub const IDENTITY_SEPARATOR: &str = "--- IDENTIDAD ---";

/// One-line identity header, empty for guests (an unknown caller adds
/// nothing usable to the prompt).
pub fn identity_header(user: &UserProfile) -> String {
    if user.role == UserRole::Guest {
        return String::new();
    }
    let mut header = format!("Hablas con {} ({}).", user.display_name, user.role);
    if let Some(description) = &user.description {
        header.push(' ');
        header.push_str(description);
    }
    header
}

/// Composes the enriched message in the fixed order: identity, session
/// block, current request. Empty sections are omitted whole.
pub fn compose(user: &UserProfile, session_context: &str, message: &str) -> String {
    let mut out = String::new();

    let header = identity_header(user);
    if !header.is_empty() {
        out.push_str(IDENTITY_SEPARATOR);
        out.push('\n');
        out.push_str(&header);
        out.push('\n');
    }
    if !session_context.is_empty() {
        out.push_str(session_context);
        if !session_context.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(REQUEST_SEPARATOR);
    out.push('\n');
    out.push_str(message);
    out
}
