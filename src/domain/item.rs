// Item base props and the closed enumeration of item variant tags
use serde::Serialize;

use super::decode::{self, FieldBag, Position, Size};
use super::errors::FieldError;

/// Every variant tag the dashboard backend knows about. Only some of them
/// have an implemented constructor; see `application::factory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    StaticGraph,
    ModuleGraph,
    SimpleValue,
    PercentileBar,
    Label,
    Icon,
    SimpleValueMax,
    SimpleValueMin,
    SimpleValueAvg,
    PercentileBubble,
    Service,
    Group,
    BoxItem,
    Line,
    AutoSlaGraph,
    CircularProgressBar,
    CircularInteriorProgressBar,
    DonutGraph,
    BarsGraph,
    Clock,
    ColorCloud,
}

impl ItemType {
    pub fn from_tag(tag: i64) -> Option<Self> {
        let item_type = match tag {
            0 => ItemType::StaticGraph,
            1 => ItemType::ModuleGraph,
            2 => ItemType::SimpleValue,
            3 => ItemType::PercentileBar,
            4 => ItemType::Label,
            5 => ItemType::Icon,
            6 => ItemType::SimpleValueMax,
            7 => ItemType::SimpleValueMin,
            8 => ItemType::SimpleValueAvg,
            9 => ItemType::PercentileBubble,
            10 => ItemType::Service,
            11 => ItemType::Group,
            12 => ItemType::BoxItem,
            13 => ItemType::Line,
            14 => ItemType::AutoSlaGraph,
            15 => ItemType::CircularProgressBar,
            16 => ItemType::CircularInteriorProgressBar,
            17 => ItemType::DonutGraph,
            18 => ItemType::BarsGraph,
            19 => ItemType::Clock,
            20 => ItemType::ColorCloud,
            _ => return None,
        };
        Some(item_type)
    }

    pub fn tag(self) -> i64 {
        match self {
            ItemType::StaticGraph => 0,
            ItemType::ModuleGraph => 1,
            ItemType::SimpleValue => 2,
            ItemType::PercentileBar => 3,
            ItemType::Label => 4,
            ItemType::Icon => 5,
            ItemType::SimpleValueMax => 6,
            ItemType::SimpleValueMin => 7,
            ItemType::SimpleValueAvg => 8,
            ItemType::PercentileBubble => 9,
            ItemType::Service => 10,
            ItemType::Group => 11,
            ItemType::BoxItem => 12,
            ItemType::Line => 13,
            ItemType::AutoSlaGraph => 14,
            ItemType::CircularProgressBar => 15,
            ItemType::CircularInteriorProgressBar => 16,
            ItemType::DonutGraph => 17,
            ItemType::BarsGraph => 18,
            ItemType::Clock => 19,
            ItemType::ColorCloud => 20,
        }
    }
}

// Serialized as the numeric tag, the same way it is received.
impl Serialize for ItemType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Up,
    Right,
    #[default]
    Down,
    Left,
}

impl LabelPosition {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("up") => LabelPosition::Up,
            Some("right") => LabelPosition::Right,
            Some("left") => LabelPosition::Left,
            _ => LabelPosition::Down,
        }
    }
}

/// Props shared by every item variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProps {
    pub id: i64,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub label: Option<String>,
    pub label_position: LabelPosition,
    pub is_link_enabled: bool,
    pub link: Option<String>,
    pub is_on_top: bool,
    pub parent_id: Option<i64>,
    pub acl_group_id: Option<i64>,
    #[serde(flatten)]
    pub size: Size,
    #[serde(flatten)]
    pub position: Position,
}

impl ItemProps {
    /// Decodes the base fields. `item_type` has already been resolved by the
    /// factory from the same bag.
    pub fn decode(bag: &FieldBag, item_type: ItemType) -> Result<Self, FieldError> {
        Ok(Self {
            id: decode::required_int(bag, "id")?,
            item_type,
            label: decode::optional_string(bag, "label"),
            label_position: LabelPosition::parse(
                bag.get("labelPosition").and_then(|v| v.as_str()),
            ),
            is_link_enabled: decode::flag(bag, "isLinkEnabled"),
            link: decode::optional_string(bag, "link"),
            is_on_top: decode::flag(bag, "isOnTop"),
            parent_id: decode::optional_int(bag, "parentId"),
            acl_group_id: decode::optional_int(bag, "aclGroupId"),
            size: Size::decode(bag)?,
            position: Position::decode(bag),
        })
    }
}

/// Agent/module binding carried by items that display module data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedModule {
    pub agent_id: Option<i64>,
    pub agent_name: Option<String>,
    pub module_id: Option<i64>,
    pub module_name: Option<String>,
}

impl LinkedModule {
    pub fn decode(bag: &FieldBag) -> Self {
        Self {
            agent_id: decode::optional_int(bag, "agentId"),
            agent_name: decode::optional_string(bag, "agentName"),
            module_id: decode::optional_int(bag, "moduleId"),
            module_name: decode::optional_string(bag, "moduleName"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn bag(value: Value) -> FieldBag {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_tags_cover_the_enumeration() {
        for tag in 0..=20 {
            let item_type = ItemType::from_tag(tag).unwrap();
            assert_eq!(item_type.tag(), tag);
        }
        assert_eq!(ItemType::from_tag(21), None);
        assert_eq!(ItemType::from_tag(-1), None);
        assert_eq!(ItemType::from_tag(999), None);
    }

    #[test]
    fn test_base_props_defaults() {
        let props = ItemProps::decode(
            &bag(json!({ "id": 3, "type": 5, "width": 10, "height": 20 })),
            ItemType::Icon,
        )
        .unwrap();

        assert_eq!(props.id, 3);
        assert_eq!(props.label, None);
        assert_eq!(props.label_position, LabelPosition::Down);
        assert!(!props.is_link_enabled);
        assert!(!props.is_on_top);
        assert_eq!(props.parent_id, None);
        assert_eq!(props.position, Position { x: 0, y: 0 });
    }

    #[test]
    fn test_base_props_full() {
        let props = ItemProps::decode(
            &bag(json!({
                "id": "7",
                "label": "Router",
                "labelPosition": "left",
                "isLinkEnabled": true,
                "link": "https://example.com",
                "isOnTop": "1",
                "parentId": "2",
                "aclGroupId": 4,
                "width": 64,
                "height": 64,
                "x": 100,
                "y": 50,
            })),
            ItemType::Icon,
        )
        .unwrap();

        assert_eq!(props.label.as_deref(), Some("Router"));
        assert_eq!(props.label_position, LabelPosition::Left);
        assert!(props.is_link_enabled);
        assert!(props.is_on_top);
        assert_eq!(props.parent_id, Some(2));
        assert_eq!(props.acl_group_id, Some(4));
        assert_eq!(props.position, Position { x: 100, y: 50 });
    }

    #[test]
    fn test_base_props_require_id_and_size() {
        let missing_id = ItemProps::decode(&bag(json!({ "width": 1, "height": 1 })), ItemType::Icon);
        assert_eq!(missing_id, Err(FieldError::Invalid("id")));

        let missing_size = ItemProps::decode(&bag(json!({ "id": 1 })), ItemType::Icon);
        assert_eq!(missing_size, Err(FieldError::Invalid("width")));
    }

    #[test]
    fn test_type_serializes_as_tag() {
        assert_eq!(serde_json::to_value(ItemType::ColorCloud).unwrap(), json!(20));
    }
}
