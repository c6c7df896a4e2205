//! Data source descriptors: uploaded files, Notion pages and crawled websites

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::schema::{
    EntitySchema, Field, FieldKind, FieldPath, LiteralSet, SchemaEntity, SchemaError,
};

static NOTION_PAGE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("NotionPage")
        .required("page_id", FieldKind::String)
        .required("page_name", FieldKind::String)
        .required("page_icon", FieldKind::String)
});

static NOTION_INFO_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("NotionInfo")
        .required("workspace_id", FieldKind::String)
        .required("pages", FieldKind::list_of(FieldKind::object(&NOTION_PAGE_SCHEMA)))
});

static WEBSITE_INFO_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("WebsiteInfo")
        .required("provider", FieldKind::String)
        .required("job_id", FieldKind::String)
        .required("urls", FieldKind::list_of(FieldKind::String))
        .required("only_main_content", FieldKind::Bool)
});

static FILE_INFO_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("FileInfo").required("file_ids", FieldKind::list_of(FieldKind::String))
});

static INFO_LIST_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("InfoList")
        .required("data_source_type", DataSourceType::field_kind())
        .optional(
            "notion_info_list",
            FieldKind::list_of(FieldKind::object(&NOTION_INFO_SCHEMA)),
        )
        .optional("file_info_list", FieldKind::object(&FILE_INFO_SCHEMA))
        .optional("website_info_list", FieldKind::object(&WEBSITE_INFO_SCHEMA))
});

static DATA_SOURCE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("DataSource").required("info_list", FieldKind::object(&INFO_LIST_SCHEMA))
});

/// Discriminant selecting which list of an [`InfoList`] is meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceType {
    UploadFile,
    NotionImport,
    WebsiteCrawl,
}

impl DataSourceType {
    /// Name of the `InfoList` field this discriminant selects
    pub fn list_field(&self) -> &'static str {
        match self {
            Self::UploadFile => "file_info_list",
            Self::NotionImport => "notion_info_list",
            Self::WebsiteCrawl => "website_info_list",
        }
    }
}

impl LiteralSet for DataSourceType {
    const VALUES: &'static [&'static str] = &["upload_file", "notion_import", "website_crawl"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::UploadFile => "upload_file",
            Self::NotionImport => "notion_import",
            Self::WebsiteCrawl => "website_crawl",
        }
    }
}

impl fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionPage {
    pub page_id: String,
    pub page_name: String,
    pub page_icon: String,
}

impl SchemaEntity for NotionPage {
    fn schema() -> &'static EntitySchema {
        &NOTION_PAGE_SCHEMA
    }
}

/// Pages selected from one Notion workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionInfo {
    pub workspace_id: String,
    pub pages: Vec<NotionPage>,
}

impl SchemaEntity for NotionInfo {
    fn schema() -> &'static EntitySchema {
        &NOTION_INFO_SCHEMA
    }
}

/// Result of a website crawl job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteInfo {
    pub provider: String,
    pub job_id: String,
    pub urls: Vec<String>,
    pub only_main_content: bool,
}

impl SchemaEntity for WebsiteInfo {
    fn schema() -> &'static EntitySchema {
        &WEBSITE_INFO_SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_ids: Vec<String>,
}

impl SchemaEntity for FileInfo {
    fn schema() -> &'static EntitySchema {
        &FILE_INFO_SCHEMA
    }
}

/// Documents to ingest, keyed by `data_source_type`.
///
/// The tolerant schema does not tie the discriminant to the populated list;
/// that correlation is only checked under `strict_correlations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoList {
    pub data_source_type: DataSourceType,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub notion_info_list: Field<Vec<NotionInfo>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub file_info_list: Field<FileInfo>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub website_info_list: Field<WebsiteInfo>,
}

impl InfoList {
    /// Names of the list fields carrying a value
    pub fn populated_lists(&self) -> Vec<&'static str> {
        [
            ("notion_info_list", self.notion_info_list.is_present()),
            ("file_info_list", self.file_info_list.is_present()),
            ("website_info_list", self.website_info_list.is_present()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

impl SchemaEntity for InfoList {
    fn schema() -> &'static EntitySchema {
        &INFO_LIST_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        let entity = Self::schema().name;
        let expected = self.data_source_type.list_field();
        let populated = self.populated_lists();

        if !populated.contains(&expected) {
            return Err(SchemaError::constraint(
                entity,
                path.key(expected),
                format!(
                    "{} is required when data_source_type is '{}'",
                    expected, self.data_source_type
                ),
            ));
        }

        if let Some(extra) = populated.into_iter().find(|name| *name != expected) {
            return Err(SchemaError::constraint(
                entity,
                path.key(extra),
                format!(
                    "{} must not be set when data_source_type is '{}'",
                    extra, self.data_source_type
                ),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub info_list: InfoList,
}

impl SchemaEntity for DataSource {
    fn schema() -> &'static EntitySchema {
        &DATA_SOURCE_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        self.info_list.check_correlations(&path.key("info_list"))
    }
}
