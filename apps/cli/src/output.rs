//! # Output Rendering
//!
//! ## Table Layout
//! ```text
//!   ID  PRODUCT                         QTY          PRICE       SUBTOTAL
//!    1  Tênis de Caminhada                2      R$ 179,90      R$ 359,80
//!   ──────────────────────────────────────────────────────────────────────
//!   1 item(s), 2 unit(s)                               Total  R$ 359,80
//! ```

use serde::Serialize;
use shoecart_core::Locale;
use shoecart_store::Notice;

use crate::commands::cart::CartResponse;
use crate::error::{ApiError, CliResult};

const TITLE_WIDTH: usize = 30;

/// What a cart command prints in `--json` mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutput {
    pub cart: CartResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub notifications: Vec<Notice>,
}

/// Renders a command result as pretty-printed JSON, newline-terminated.
pub fn render_json(output: &CommandOutput) -> CliResult<String> {
    let mut json = serde_json::to_string_pretty(output)?;
    json.push('\n');
    Ok(json)
}

/// Renders the cart as a fixed-width table.
pub fn render_table(cart: &CartResponse, locale: Locale) -> String {
    if cart.items.is_empty() {
        return match locale {
            Locale::PtBr => "  Carrinho vazio\n".to_string(),
            Locale::En => "  Cart is empty\n".to_string(),
        };
    }

    let mut out = format!(
        "  {:>3}  {:<width$}  {:>4}  {:>13}  {:>13}\n",
        "ID",
        "PRODUCT",
        "QTY",
        "PRICE",
        "SUBTOTAL",
        width = TITLE_WIDTH
    );

    for item in &cart.items {
        out.push_str(&format!(
            "  {:>3}  {:<width$}  {:>4}  {:>13}  {:>13}\n",
            item.id,
            truncate(&item.title, TITLE_WIDTH),
            item.amount,
            item.price.format(locale),
            item.line_total().format(locale),
            width = TITLE_WIDTH
        ));
    }

    out.push_str(&format!("  {}\n", "─".repeat(TITLE_WIDTH + 42)));
    out.push_str(&format!(
        "  {:<width$}  {:>13}\n",
        format!(
            "{} item(s), {} unit(s)",
            cart.totals.item_count, cart.totals.total_quantity
        ),
        cart.totals.subtotal.format(locale),
        width = TITLE_WIDTH + 27
    ));
    out
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let mut cut: String = title.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
