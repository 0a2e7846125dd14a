// Console-level props: identity and presentation of the dashboard surface
use serde::Serialize;
use serde_json::Value;

use super::decode::{self, FieldBag, Size};
use super::errors::{ConsoleError, FieldError};

/// Validated console props. Only ever produced by [`ConsoleProps::decode`],
/// and replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleProps {
    pub id: i64,
    pub name: String,
    pub group_id: i64,
    #[serde(rename = "backgroundURL")]
    pub background_url: Option<String>,
    pub background_color: Option<String>,
    pub is_favorite: bool,
    pub relation_line_width: i64,
    #[serde(flatten)]
    pub size: Size,
}

impl ConsoleProps {
    pub fn decode(data: &Value) -> Result<Self, ConsoleError> {
        let bag = data.as_object().ok_or(FieldError::NotAnObject)?;
        Ok(Self::decode_bag(bag)?)
    }

    fn decode_bag(bag: &FieldBag) -> Result<Self, FieldError> {
        Ok(Self {
            id: decode::required_int(bag, "id")?,
            name: decode::required_string(bag, "name")?,
            group_id: decode::required_int(bag, "groupId")?,
            background_url: decode::optional_string(bag, "backgroundURL"),
            background_color: decode::optional_string(bag, "backgroundColor"),
            is_favorite: decode::flag(bag, "isFavorite"),
            relation_line_width: decode::optional_int(bag, "relationLineWidth").unwrap_or(0),
            size: Size::decode(bag)?,
        })
    }

    /// Copy of these props with only the dimensions replaced.
    pub fn with_size(&self, size: Size) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}
