// Per-variant item props and their decoders
use serde::Serialize;

use super::decode::{self, FieldBag};
use super::errors::FieldError;
use super::item::{ItemProps, ItemType, LinkedModule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LastValueTooltip {
    #[default]
    Default,
    Enabled,
    Disabled,
}

impl LastValueTooltip {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("enabled") => LastValueTooltip::Enabled,
            Some("disabled") => LastValueTooltip::Disabled,
            _ => LastValueTooltip::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticGraphProps {
    #[serde(flatten)]
    pub base: ItemProps,
    pub image_src: String,
    pub status_image_src: Option<String>,
    pub show_last_value_tooltip: LastValueTooltip,
    pub last_value: Option<String>,
    #[serde(flatten)]
    pub module: LinkedModule,
}

impl StaticGraphProps {
    pub fn decode(bag: &FieldBag) -> Result<Self, FieldError> {
        Ok(Self {
            base: ItemProps::decode(bag, ItemType::StaticGraph)?,
            image_src: decode::required_string(bag, "imageSrc")?,
            status_image_src: decode::optional_string(bag, "statusImageSrc"),
            show_last_value_tooltip: LastValueTooltip::parse(
                bag.get("showLastValueTooltip").and_then(|v| v.as_str()),
            ),
            last_value: decode::optional_string(bag, "lastValue"),
            module: LinkedModule::decode(bag),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconProps {
    #[serde(flatten)]
    pub base: ItemProps,
    pub image_src: String,
}

impl IconProps {
    pub fn decode(bag: &FieldBag) -> Result<Self, FieldError> {
        Ok(Self {
            base: ItemProps::decode(bag, ItemType::Icon)?,
            image_src: decode::required_string(bag, "imageSrc")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupProps {
    #[serde(flatten)]
    pub base: ItemProps,
    pub image_src: String,
    pub status_image_src: Option<String>,
    pub group_id: i64,
    pub show_statistics: bool,
}

impl GroupProps {
    pub fn decode(bag: &FieldBag) -> Result<Self, FieldError> {
        Ok(Self {
            base: ItemProps::decode(bag, ItemType::Group)?,
            image_src: decode::required_string(bag, "imageSrc")?,
            status_image_src: decode::optional_string(bag, "statusImageSrc"),
            group_id: decode::required_int(bag, "groupId")?,
            show_statistics: decode::flag(bag, "showStatistics"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorCloudProps {
    #[serde(flatten)]
    pub base: ItemProps,
    pub color: String,
    #[serde(flatten)]
    pub module: LinkedModule,
}

impl ColorCloudProps {
    pub fn decode(bag: &FieldBag) -> Result<Self, FieldError> {
        Ok(Self {
            base: ItemProps::decode(bag, ItemType::ColorCloud)?,
            color: decode::required_string(bag, "color")?,
            module: LinkedModule::decode(bag),
        })
    }
}

/// Validated props of any implemented variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VariantProps {
    StaticGraph(StaticGraphProps),
    Icon(IconProps),
    Group(GroupProps),
    ColorCloud(ColorCloudProps),
}

impl VariantProps {
    pub fn base(&self) -> &ItemProps {
        match self {
            VariantProps::StaticGraph(props) => &props.base,
            VariantProps::Icon(props) => &props.base,
            VariantProps::Group(props) => &props.base,
            VariantProps::ColorCloud(props) => &props.base,
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
    fn test_static_graph() {
        let props = StaticGraphProps::decode(&bag(json!({
            "id": 1,
            "type": 0,
            "width": 40,
            "height": 40,
            "imageSrc": "img/server.png",
            "statusImageSrc": "",
            "showLastValueTooltip": "enabled",
            "agentId": "12",
            "moduleName": "cpu_load",
        })))
        .unwrap();

        assert_eq!(props.image_src, "img/server.png");
        assert_eq!(props.status_image_src, None);
        assert_eq!(props.show_last_value_tooltip, LastValueTooltip::Enabled);
        assert_eq!(props.module.agent_id, Some(12));
        assert_eq!(props.module.module_name.as_deref(), Some("cpu_load"));
        assert_eq!(props.base.item_type, ItemType::StaticGraph);
    }

    #[test]
    fn test_icon_requires_image() {
        let err = IconProps::decode(&bag(json!({ "id": 1, "width": 1, "height": 1 })));
        assert_eq!(err, Err(FieldError::Invalid("imageSrc")));

        let err = IconProps::decode(&bag(json!({ "id": 1, "width": 1, "height": 1, "imageSrc": "" })));
        assert_eq!(err, Err(FieldError::Invalid("imageSrc")));
    }

    #[test]
    fn test_group_requires_group_id() {
        let err = GroupProps::decode(&bag(json!({
            "id": 1, "width": 1, "height": 1, "imageSrc": "img/group.png", "groupId": "n/a",
        })));
        assert_eq!(err, Err(FieldError::Invalid("groupId")));

        let props = GroupProps::decode(&bag(json!({
            "id": 1, "width": 1, "height": 1, "imageSrc": "img/group.png", "groupId": "9",
            "showStatistics": 1,
        })))
        .unwrap();
        assert_eq!(props.group_id, 9);
        assert!(props.show_statistics);
    }

    #[test]
    fn test_color_cloud_requires_color() {
        let err = ColorCloudProps::decode(&bag(json!({ "id": 1, "width": 1, "height": 1 })));
        assert_eq!(err, Err(FieldError::Invalid("color")));
    }

    #[test]
    fn test_variant_props_serialize_flat() {
        let props = VariantProps::Icon(
            IconProps::decode(&bag(json!({
                "id": 4, "type": 5, "width": 8, "height": 8, "imageSrc": "a.png", "isOnTop": true,
            })))
            .unwrap(),
        );
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["id"], json!(4));
        assert_eq!(json["type"], json!(5));
        assert_eq!(json["isOnTop"], json!(true));
        assert_eq!(json["imageSrc"], json!("a.png"));
        assert_eq!(props.base().id, 4);
    }
}
