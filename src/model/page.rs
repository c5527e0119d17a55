// src/model/page.rs
//! Pages as rows of the blog database: an ID plus a property bag.

use crate::types::{PageId, RichTextItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::blocks::FileObject;

/// A page in the blog database. Content blocks are fetched separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub properties: HashMap<String, PropertyValue>,
    pub archived: bool,
}

impl Page {
    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

/// The property value variants the blog schema actually uses.
///
/// Every variant the catalog reads is here; anything else parses to
/// `Unsupported` and is ignored, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Title { title: Vec<RichTextItem> },
    RichText { rich_text: Vec<RichTextItem> },
    Number { number: Option<f64> },
    Select { select: Option<SelectValue> },
    MultiSelect { multi_select: Vec<SelectValue> },
    Date { date: Option<DateRange> },
    Status { status: Option<SelectValue> },
    People { people: Vec<Person> },
    Files { files: Vec<NamedFile> },
    Unsupported { property_type: String },
}

/// A select / multi-select / status option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectValue {
    pub name: String,
}

/// A date property value with optional end for ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// A workspace member referenced by a People property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// A file attached through a Files property, e.g. the featured image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFile {
    pub name: Option<String>,
    #[serde(flatten)]
    pub file: FileObject,
}
