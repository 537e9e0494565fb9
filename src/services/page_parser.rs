//! Parser for the upstream statistics responses.
//!
//! The site-statistics panel returns a generic nested "page component
//! tree": a list of cards carrying aggregate totals, plus one `VTable`
//! node whose `tbody` rows hold per-site statistics at fixed cell
//! positions. The tree shape is an undocumented internal of the upstream
//! panel and is unversioned, so parsing starts with an explicit schema
//! check that fails loudly instead of silently substituting defaults.
//!
//! The subscription-service variant returns a flat `{status, data}`
//! object instead; see [`parse_subscription`].

use serde_json::Value;

use crate::types::errors::ParseError;
use crate::types::snapshot::{SiteRow, StatSnapshot, SubscriptionSnapshot};

/// Caption strings identifying the aggregate total cards.
const CAPTION_UPLOAD: &str = "总上传量";
const CAPTION_DOWNLOAD: &str = "总下载量";
const CAPTION_SEED_COUNT: &str = "总做种数";
const CAPTION_SEED_SIZE: &str = "总做种体积";

/// Component tag marking the per-site statistics table.
const TABLE_COMPONENT: &str = "VTable";
const TABLE_BODY_COMPONENT: &str = "tbody";

/// Fixed cell positions inside one table row. Position 1 (the account
/// username) is deliberately skipped, matching the upstream layout.
const CELL_NAME: usize = 0;
const CELL_LEVEL: usize = 2;
const CELL_UPLOAD: usize = 3;
const CELL_DOWNLOAD: usize = 4;
const CELL_RATIO: usize = 5;
const CELL_BONUS: usize = 6;
const CELL_SEEDS: usize = 7;
const CELL_SIZE: usize = 8;

/// Known shapes of the upstream page tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSchema {
    /// Root array whose first element carries a `content` card list.
    V1,
}

/// Matches the response root against the known page schemas.
///
/// # Errors
/// Returns [`ParseError::SchemaMismatch`] when the root is not a
/// non-empty array whose first element carries a `content` array.
pub fn detect_schema(raw: &Value) -> Result<PageSchema, ParseError> {
    let root = raw
        .as_array()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ParseError::SchemaMismatch("root is not a non-empty array".to_string()))?;

    match root[0].get("content").and_then(Value::as_array) {
        Some(_) => Ok(PageSchema::V1),
        None => Err(ParseError::SchemaMismatch(
            "first page element has no content array".to_string(),
        )),
    }
}

/// Parses the site-statistics page tree into a [`StatSnapshot`].
///
/// Totals come from the card list (matched by caption string); per-site
/// rows come from the `VTable` body. Missing optional fields default to
/// `"0"` or `"-"`; a missing table or table body is an error.
///
/// Pure and idempotent: parsing the same value twice yields identical
/// snapshots.
pub fn parse_site_stats(raw: &Value) -> Result<StatSnapshot, ParseError> {
    detect_schema(raw)?;

    let cards = raw
        .get(0)
        .and_then(|page| page.get("content"))
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::SchemaMismatch("first page element has no content array".to_string()))?;

    let mut snapshot = StatSnapshot::default();

    for card in cards {
        if let Some((caption, value)) = card_caption_value(card) {
            match caption {
                CAPTION_UPLOAD => snapshot.upload = value,
                CAPTION_DOWNLOAD => snapshot.download = value,
                CAPTION_SEED_COUNT => snapshot.seed_count = value,
                CAPTION_SEED_SIZE => snapshot.seed_size = value,
                _ => {}
            }
        }
    }

    snapshot.sites = parse_site_rows(cards)?;

    Ok(snapshot)
}

/// Drills into one card looking for a caption/value text pair.
///
/// Card shape: `card.content[0].content[0].content` is a text node list
/// whose second element carries `[caption, {content: [value]}]`. Cards
/// that do not match the shape are skipped (they are layout filler, not
/// data).
fn card_caption_value(card: &Value) -> Option<(&str, String)> {
    let card_text = card
        .get("content")?
        .get(0)?
        .get("content")?
        .get(0)?
        .get("content")?;

    let text_content = card_text.get(1)?.get("content")?;

    let caption = text_content.get(0)?.get("text")?.as_str()?;
    let value = text_content
        .get(1)?
        .get("content")?
        .get(0)?
        .get("text")?;

    Some((caption, text_value_to_string(value)))
}

/// Locates the `VTable` column, then its `tbody`, and maps every row into
/// a [`SiteRow`].
fn parse_site_rows(cards: &[Value]) -> Result<Vec<SiteRow>, ParseError> {
    let table_column = cards
        .iter()
        .find(|col| {
            col.get("content")
                .and_then(|c| c.get(0))
                .and_then(|n| n.get("component"))
                .and_then(Value::as_str)
                == Some(TABLE_COMPONENT)
        })
        .ok_or_else(|| {
            ParseError::MissingTable(format!("no column with a {} child", TABLE_COMPONENT))
        })?;

    let table_content = table_column["content"][0]
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::MissingTable("table node has no content".to_string()))?;

    let tbody = table_content
        .iter()
        .find(|item| {
            item.get("component").and_then(Value::as_str) == Some(TABLE_BODY_COMPONENT)
        })
        .ok_or_else(|| {
            ParseError::MissingTableBody(format!("no {} in table", TABLE_BODY_COMPONENT))
        })?;

    let rows = tbody
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::MissingTableBody("table body has no rows".to_string()))?;

    Ok(rows.iter().map(parse_site_row).collect())
}

/// Maps one row's indexed cells into a [`SiteRow`]. Missing cells default
/// to "-" for text columns and "0" for numeric ones.
fn parse_site_row(row: &Value) -> SiteRow {
    let cells = row.get("content").and_then(Value::as_array);

    let cell = |index: usize, default: &str| -> String {
        cells
            .and_then(|c| c.get(index))
            .and_then(|c| c.get("text"))
            .map(text_value_to_string)
            .unwrap_or_else(|| default.to_string())
    };

    SiteRow {
        name: cell(CELL_NAME, "-"),
        level: cell(CELL_LEVEL, "-"),
        upload: cell(CELL_UPLOAD, "0"),
        download: cell(CELL_DOWNLOAD, "0"),
        ratio: cell(CELL_RATIO, "0"),
        bonus: cell(CELL_BONUS, "0"),
        seeds: cell(CELL_SEEDS, "0"),
        size: cell(CELL_SIZE, "0"),
    }
}

/// Cell text nodes may hold strings or bare numbers; both become strings.
fn text_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Parses the subscription-service response into a
/// [`SubscriptionSnapshot`].
///
/// Requires `status == "success"` and a `data` object. `u` + `d` are the
/// bytes consumed, `transfer_enable` the plan total; `reset_day` is
/// optional (absent means the plan never expires).
pub fn parse_subscription(raw: &Value) -> Result<SubscriptionSnapshot, ParseError> {
    let status = raw
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::SchemaMismatch("missing status field".to_string()))?;

    if status != "success" {
        return Err(ParseError::SchemaMismatch(format!(
            "unexpected status: {}",
            status
        )));
    }

    let data = raw
        .get("data")
        .filter(|d| d.is_object())
        .ok_or_else(|| ParseError::MissingField("data".to_string()))?;

    let plan_name = data
        .pointer("/plan/name")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::MissingField("data.plan.name".to_string()))?
        .to_string();

    let upload = data.get("u").and_then(Value::as_u64).unwrap_or(0);
    let download = data.get("d").and_then(Value::as_u64).unwrap_or(0);
    let total_bytes = data
        .get("transfer_enable")
        .and_then(Value::as_u64)
        .ok_or_else(|| ParseError::MissingField("data.transfer_enable".to_string()))?;

    let reset_day = data
        .get("reset_day")
        .and_then(Value::as_u64)
        .map(|d| d as u32);

    // Upstream values are untrusted; u64::MAX halves must not panic.
    let used_bytes = upload.saturating_add(download);
    let used_fraction = if total_bytes == 0 {
        1.0
    } else {
        (used_bytes as f64 / total_bytes as f64).min(1.0)
    };

    Ok(SubscriptionSnapshot {
        plan_name,
        used_bytes,
        total_bytes,
        reset_day,
        used_fraction,
    })
}
