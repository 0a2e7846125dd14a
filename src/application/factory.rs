// Item factory - Resolves a descriptor's variant tag and builds the instance
use serde_json::Value;

use crate::application::item::Item;
use crate::application::items::{ColorCloud, Group, Icon, StaticGraph};
use crate::domain::decode;
use crate::domain::errors::ItemError;
use crate::domain::item::ItemType;
use crate::domain::variants::{ColorCloudProps, GroupProps, IconProps, StaticGraphProps};
use crate::infrastructure::dom::Dom;

/// Builds an item from a raw descriptor. The returned item owns a freshly
/// painted element that is not attached anywhere yet.
pub fn create_item(dom: &mut Dom, descriptor: &Value) -> Result<Box<dyn Item>, ItemError> {
    let unknown = ItemError::UnknownOrUnsupportedVariant { tag: None };
    let bag = descriptor.as_object().ok_or(unknown.clone())?;
    let tag = decode::parse_int(bag.get("type")).ok_or(unknown)?;
    let unsupported = ItemError::UnknownOrUnsupportedVariant { tag: Some(tag) };
    let item_type = ItemType::from_tag(tag).ok_or(unsupported.clone())?;

    // Every tag is listed: adding a variant to `ItemType` must fail to
    // compile until it is either constructed here or rejected explicitly.
    let item: Box<dyn Item> = match item_type {
        ItemType::StaticGraph => Box::new(StaticGraph::new(dom, StaticGraphProps::decode(bag)?)),
        ItemType::Icon => Box::new(Icon::new(dom, IconProps::decode(bag)?)),
        ItemType::Group => Box::new(Group::new(dom, GroupProps::decode(bag)?)),
        ItemType::ColorCloud => Box::new(ColorCloud::new(dom, ColorCloudProps::decode(bag)?)),
        ItemType::ModuleGraph
        | ItemType::SimpleValue
        | ItemType::PercentileBar
        | ItemType::Label
        | ItemType::SimpleValueMax
        | ItemType::SimpleValueMin
        | ItemType::SimpleValueAvg
        | ItemType::PercentileBubble
        | ItemType::Service
        | ItemType::BoxItem
        | ItemType::Line
        | ItemType::AutoSlaGraph
        | ItemType::CircularProgressBar
        | ItemType::CircularInteriorProgressBar
        | ItemType::DonutGraph
        | ItemType::BarsGraph
        | ItemType::Clock => return Err(unsupported),
    };

    tracing::debug!(item_id = item.id(), tag, "Created visual console item");
    Ok(item)
}
