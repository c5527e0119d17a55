// src/api/wire.rs
//! Wire-format deserialization: raw Notion JSON into domain types.
//!
//! The block payload lives under a key named after the block's type
//! tag, so dispatch happens on the tag string rather than through a
//! serde-tagged enum. That keeps the catch-all honest: an unknown tag
//! becomes `Block::Unsupported` carrying the tag, never a parse error.

use super::client::ApiResponse;
use super::pagination::PaginatedResponse;
use crate::error::{AppError, NotionErrorCode};
use crate::model::blocks::*;
use crate::model::{Block, BlockCommon, Page, PropertyValue, SelectValue};
use crate::model::{DateRange, NamedFile, Person};
use crate::types::{Annotations, EquationData, Link, RichTextItem, RichTextType};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The paginated list envelope shared by every Notion list endpoint.
#[derive(Debug, Deserialize)]
struct WirePaginated<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

/// Error body shape returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct WireErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Parses one page of a block children listing.
pub fn parse_blocks_page(
    response: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let envelope: WirePaginated<WireBlock> = parse_api_response(response)?;
    Ok(PaginatedResponse {
        items: envelope.results.into_iter().map(WireBlock::into_domain).collect(),
        next_cursor: envelope.next_cursor,
        has_more: envelope.has_more,
    })
}

/// Parses one page of a database query result.
pub fn parse_pages_page(
    response: ApiResponse<String>,
) -> Result<PaginatedResponse<Page>, AppError> {
    let envelope: WirePaginated<WirePage> = parse_api_response(response)?;
    Ok(PaginatedResponse {
        items: envelope.results.into_iter().map(WirePage::into_domain).collect(),
        next_cursor: envelope.next_cursor,
        has_more: envelope.has_more,
    })
}

/// Checks a response for success, discarding the body.
pub fn check_ok(response: ApiResponse<String>) -> Result<(), AppError> {
    if response.status.is_success() {
        Ok(())
    } else {
        Err(error_from_response(response))
    }
}

/// Deserializes a successful response body, or surfaces the API error.
pub fn parse_api_response<T: DeserializeOwned>(
    response: ApiResponse<String>,
) -> Result<T, AppError> {
    if !response.status.is_success() {
        return Err(error_from_response(response));
    }
    serde_json::from_str(&response.data).map_err(|e| {
        AppError::MalformedResponse(format!("{} (from {})", e, response.url))
    })
}

fn error_from_response(response: ApiResponse<String>) -> AppError {
    match serde_json::from_str::<WireErrorBody>(&response.data) {
        Ok(body) if !body.code.is_empty() => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&body.code),
            message: body.message,
            status: response.status,
        },
        _ => AppError::NotionService {
            code: NotionErrorCode::from_http_status(response.status.as_u16()),
            message: format!("HTTP {} from {}", response.status, response.url),
            status: response.status,
        },
    }
}

// ---------------------------------------------------------------------
// Rich text
// ---------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WireRichText {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<WireTextData>,
    #[serde(default)]
    equation: Option<EquationData>,
    #[serde(default)]
    annotations: Annotations,
    #[serde(default)]
    plain_text: String,
    #[serde(default)]
    href: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireTextData {
    #[serde(default)]
    content: String,
    #[serde(default)]
    link: Option<Link>,
}

impl WireRichText {
    fn into_domain(self) -> RichTextItem {
        let text_type = match self.kind.as_str() {
            "text" => {
                let data = self.text.unwrap_or_default();
                RichTextType::Text {
                    content: data.content,
                    link: data.link,
                }
            }
            "equation" => match self.equation {
                Some(eq) => RichTextType::Equation(eq),
                None => RichTextType::Mention,
            },
            // Mentions and anything newer degrade to plain text.
            _ => RichTextType::Mention,
        };
        RichTextItem {
            text_type,
            annotations: self.annotations,
            plain_text: self.plain_text,
            href: self.href,
        }
    }
}

fn rich_text_of(value: Value) -> Vec<RichTextItem> {
    match serde_json::from_value::<Vec<WireRichText>>(value) {
        Ok(items) => items.into_iter().map(WireRichText::into_domain).collect(),
        Err(_) => Vec::new(),
    }
}

// ---------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WireBlock {
    id: crate::types::BlockId,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(default)]
    archived: bool,
    /// Everything else, including the payload object keyed by the type
    /// tag itself.
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Per-type payload shapes. Only fields the renderer consumes survive.
#[derive(Debug, Default, Deserialize)]
struct WireTextPayload {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
}

impl WireTextPayload {
    fn into_content(self) -> TextBlockContent {
        TextBlockContent::new(self.rich_text.into_iter().map(WireRichText::into_domain).collect())
    }
}

#[derive(Debug, Deserialize)]
struct WireToDoPayload {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
    #[serde(default)]
    checked: bool,
}

#[derive(Debug, Deserialize)]
struct WireCodePayload {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
    #[serde(default)]
    caption: Vec<WireRichText>,
    #[serde(default)]
    language: String,
}

#[derive(Debug, Deserialize)]
struct WireCalloutPayload {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
    #[serde(default)]
    icon: Option<Icon>,
}

#[derive(Debug, Deserialize)]
struct WireMediaPayload {
    #[serde(flatten)]
    file: FileObject,
    #[serde(default)]
    caption: Vec<WireRichText>,
}

#[derive(Debug, Deserialize)]
struct WireBookmarkPayload {
    #[serde(default)]
    url: String,
    #[serde(default)]
    caption: Vec<WireRichText>,
}

#[derive(Debug, Deserialize)]
struct WireEmbedPayload {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct WireTablePayload {
    #[serde(default)]
    table_width: usize,
    #[serde(default)]
    has_column_header: bool,
    #[serde(default)]
    has_row_header: bool,
}

#[derive(Debug, Deserialize)]
struct WireTableRowPayload {
    #[serde(default)]
    cells: Vec<Vec<WireRichText>>,
}

impl WireBlock {
    pub fn into_domain(mut self) -> Block {
        let common = BlockCommon {
            id: self.id,
            children: Vec::new(),
            has_children: self.has_children,
            archived: self.archived,
        };
        let payload = self
            .rest
            .remove(&self.block_type)
            .unwrap_or(Value::Object(Map::new()));

        convert_block(&self.block_type, payload, common)
    }
}

/// Deserializes a payload, degrading to `None` on shape mismatch so the
/// caller can fall back to `Unsupported` rather than failing the fetch.
fn payload_of<T: DeserializeOwned>(block_type: &str, payload: Value) -> Option<T> {
    match serde_json::from_value(payload) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::debug!("Malformed '{}' payload, treating as unsupported: {}", block_type, e);
            None
        }
    }
}

fn convert_block(block_type: &str, payload: Value, common: BlockCommon) -> Block {
    let unsupported = |common: BlockCommon| {
        Block::Unsupported(UnsupportedBlock {
            common,
            block_type: block_type.to_string(),
        })
    };

    macro_rules! text_block {
        ($variant:ident, $payload_struct:ident) => {
            match payload_of::<WireTextPayload>(block_type, payload) {
                Some(p) => Block::$variant($payload_struct {
                    common,
                    content: p.into_content(),
                }),
                None => unsupported(common),
            }
        };
    }

    match block_type {
        "paragraph" => text_block!(Paragraph, ParagraphBlock),
        "heading_1" => text_block!(Heading1, Heading1Block),
        "heading_2" => text_block!(Heading2, Heading2Block),
        "heading_3" => text_block!(Heading3, Heading3Block),
        "bulleted_list_item" => text_block!(BulletedListItem, BulletedListItemBlock),
        "numbered_list_item" => text_block!(NumberedListItem, NumberedListItemBlock),
        "quote" => text_block!(Quote, QuoteBlock),
        "toggle" => text_block!(Toggle, ToggleBlock),
        "to_do" => match payload_of::<WireToDoPayload>(block_type, payload) {
            Some(p) => Block::ToDo(ToDoBlock {
                common,
                content: TextBlockContent::new(
                    p.rich_text.into_iter().map(WireRichText::into_domain).collect(),
                ),
                checked: p.checked,
            }),
            None => unsupported(common),
        },
        "code" => match payload_of::<WireCodePayload>(block_type, payload) {
            Some(p) => Block::Code(CodeBlock {
                common,
                language: p.language,
                caption: p.caption.into_iter().map(WireRichText::into_domain).collect(),
                content: TextBlockContent::new(
                    p.rich_text.into_iter().map(WireRichText::into_domain).collect(),
                ),
            }),
            None => unsupported(common),
        },
        "callout" => match payload_of::<WireCalloutPayload>(block_type, payload) {
            Some(p) => Block::Callout(CalloutBlock {
                common,
                icon: p.icon,
                content: TextBlockContent::new(
                    p.rich_text.into_iter().map(WireRichText::into_domain).collect(),
                ),
            }),
            None => unsupported(common),
        },
        "divider" => Block::Divider(DividerBlock { common }),
        "image" => match payload_of::<WireMediaPayload>(block_type, payload) {
            Some(p) => Block::Image(ImageBlock {
                common,
                image: p.file,
                caption: p.caption.into_iter().map(WireRichText::into_domain).collect(),
            }),
            None => unsupported(common),
        },
        "video" => match payload_of::<WireMediaPayload>(block_type, payload) {
            Some(p) => Block::Video(VideoBlock {
                common,
                video: p.file,
                caption: p.caption.into_iter().map(WireRichText::into_domain).collect(),
            }),
            None => unsupported(common),
        },
        "bookmark" => match payload_of::<WireBookmarkPayload>(block_type, payload) {
            Some(p) => Block::Bookmark(BookmarkBlock {
                common,
                url: p.url,
                caption: p.caption.into_iter().map(WireRichText::into_domain).collect(),
            }),
            None => unsupported(common),
        },
        "embed" => match payload_of::<WireEmbedPayload>(block_type, payload) {
            Some(p) => Block::Embed(EmbedBlock {
                common,
                url: p.url,
            }),
            None => unsupported(common),
        },
        "table" => match payload_of::<WireTablePayload>(block_type, payload) {
            Some(p) => Block::Table(TableBlock {
                common,
                table_width: p.table_width,
                has_column_header: p.has_column_header,
                has_row_header: p.has_row_header,
            }),
            None => unsupported(common),
        },
        "table_row" => match payload_of::<WireTableRowPayload>(block_type, payload) {
            Some(p) => Block::TableRow(TableRowBlock {
                common,
                cells: p
                    .cells
                    .into_iter()
                    .map(|cell| cell.into_iter().map(WireRichText::into_domain).collect())
                    .collect(),
            }),
            None => unsupported(common),
        },
        _ => unsupported(common),
    }
}

// ---------------------------------------------------------------------
// Pages and properties
// ---------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WirePage {
    id: crate::types::PageId,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    properties: HashMap<String, WireProperty>,
}

#[derive(Debug, Deserialize)]
struct WireProperty {
    #[serde(rename = "type")]
    property_type: String,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct WireDateValue {
    start: String,
    #[serde(default)]
    end: Option<String>,
}

impl WirePage {
    pub fn into_domain(self) -> Page {
        Page {
            id: self.id,
            archived: self.archived,
            properties: self
                .properties
                .into_iter()
                .map(|(name, prop)| (name, prop.into_domain()))
                .collect(),
        }
    }
}

impl WireProperty {
    fn into_domain(mut self) -> PropertyValue {
        // The value object sits under a key named after the type tag.
        let value = self
            .rest
            .remove(&self.property_type)
            .unwrap_or(Value::Null);

        let converted = match self.property_type.as_str() {
            "title" => Some(PropertyValue::Title {
                title: rich_text_of(value),
            }),
            "rich_text" => Some(PropertyValue::RichText {
                rich_text: rich_text_of(value),
            }),
            "number" => Some(PropertyValue::Number {
                number: value.as_f64(),
            }),
            "select" => Some(PropertyValue::Select {
                select: serde_json::from_value::<Option<SelectValue>>(value).unwrap_or(None),
            }),
            "multi_select" => Some(PropertyValue::MultiSelect {
                multi_select: serde_json::from_value(value).unwrap_or_default(),
            }),
            "status" => Some(PropertyValue::Status {
                status: serde_json::from_value::<Option<SelectValue>>(value).unwrap_or(None),
            }),
            "date" => Some(PropertyValue::Date {
                date: serde_json::from_value::<Option<WireDateValue>>(value)
                    .unwrap_or(None)
                    .and_then(date_range_of),
            }),
            "people" => Some(PropertyValue::People {
                people: serde_json::from_value::<Vec<Person>>(value).unwrap_or_default(),
            }),
            "files" => Some(PropertyValue::Files {
                files: serde_json::from_value::<Vec<NamedFile>>(value).unwrap_or_default(),
            }),
            _ => None,
        };

        converted.unwrap_or(PropertyValue::Unsupported {
            property_type: self.property_type,
        })
    }
}

fn date_range_of(wire: WireDateValue) -> Option<DateRange> {
    Some(DateRange {
        start: parse_wire_date(&wire.start)?,
        end: wire.end.as_deref().and_then(parse_wire_date),
    })
}

/// Notion dates arrive as `YYYY-MM-DD` or a full RFC 3339 timestamp;
/// only the calendar date matters for publishing.
fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
