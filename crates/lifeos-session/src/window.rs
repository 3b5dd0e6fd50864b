// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sliding-window mechanics and transcript rendering, shared by every
//! session backend.

use lifeos_core::ConversationTurn;

/// Header line opening a rendered context block.
pub const CONTEXT_HEADER: &str = "--- 📜 CONTEXTO DE LA CONVERSACIÓN PREVIA ---";
/// Footer line closing a rendered context block.
pub const CONTEXT_FOOTER: &str = "--- FIN DEL CONTEXTO ---";

/// Appends one turn and prunes the window to `max_turns`, oldest first.
pub fn push_turn(window: &mut Vec<ConversationTurn>, turn: ConversationTurn, max_turns: usize) {
    window.push(turn);
    if window.len() > max_turns {
        let excess = window.len() - max_turns;
        window.drain(..excess);
    }
}

/// Renders the window as a labeled transcript block, or an empty string
/// when there is no history.
pub fn render_context(window: &[ConversationTurn]) -> String {
    if window.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str(CONTEXT_HEADER);
    out.push('\n');
    for turn in window {
        out.push_str("User: ");
        out.push_str(&turn.user_text);
        out.push('\n');
        out.push_str("AI: ");
        out.push_str(&turn.agent_text);
        out.push('\n');
    }
    out.push_str(CONTEXT_FOOTER);
    out.push('\n');
    out
}
