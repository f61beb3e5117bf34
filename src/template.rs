//! Card table template rendering.
//!
//! Templates use a small placeholder syntax:
//!
//! - `{{field}}` is replaced by the HTML-escaped value of `field`
//! - `{{#cards}} ... {{/cards}}` repeats its body once per card
//!
//! Top-level fields are `count` and `generated_at`. Inside the cards section
//! the fields are `id`, `name`, `class`, `type`, `set`, `rarity` and
//! `image_url`.
//!
//! There is no escape for a literal `{{`. Any `{{` in the template, including
//! inside inline `<script>` or `<style>` blocks, is parsed as a placeholder, so
//! an unknown name or a missing `}}` fails the render and the page comes out
//! blank. Keep scripts and styles that need double braces in separate files.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::client::Card;

const SECTION_OPEN: &str = "{{#cards}}";
const SECTION_CLOSE: &str = "{{/cards}}";

pub async fn load_template(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read template {}", path.display()))
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn card_field(card: &Card, field: &str) -> Option<String> {
    let value = match field {
        "id" => return Some(card.id.to_string()),
        "name" => &card.name,
        "class" => &card.class,
        "type" => &card.card_type,
        "set" => &card.set,
        "rarity" => &card.rarity,
        "image_url" => &card.image_url,
        _ => return None,
    };
    Some(value.clone())
}

/// Replaces every `{{field}}` in `text` using `lookup`.
fn substitute<F>(text: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .context("Unclosed placeholder in template")?;
        let field = after[..end].trim();
        let value = lookup(field)
            .with_context(|| format!("Unknown template field: {}", field))?;
        out.push_str(&escape_html(&value));
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

pub fn render_table(template: &str, cards: &[Card]) -> Result<String> {
    render_table_at(template, cards, Utc::now())
}

pub fn render_table_at(template: &str, cards: &[Card], generated_at: DateTime<Utc>) -> Result<String> {
    let count = cards.len().to_string();
    let generated_at = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let top_level = |field: &str| match field {
        "count" => Some(count.clone()),
        "generated_at" => Some(generated_at.clone()),
        _ => None,
    };

    let (head, section) = match template.find(SECTION_OPEN) {
        Some(open) => (&template[..open], Some(&template[open + SECTION_OPEN.len()..])),
        None => (template, None),
    };

    let Some(section) = section else {
        if template.contains(SECTION_CLOSE) {
            anyhow::bail!("Template closes a cards section that was never opened");
        }
        return substitute(template, top_level);
    };

    let close = section
        .find(SECTION_CLOSE)
        .context("Template opens a cards section that is never closed")?;
    let body = &section[..close];
    let tail = &section[close + SECTION_CLOSE.len()..];
    if body.contains(SECTION_OPEN) || tail.contains(SECTION_OPEN) || tail.contains(SECTION_CLOSE) {
        anyhow::bail!("Template may contain only one cards section");
    }

    let mut out = substitute(head, top_level)?;
    for card in cards {
        out.push_str(&substitute(body, |field| card_field(card, field))?);
    }
    out.push_str(&substitute(tail, top_level)?);
    Ok(out)
}
