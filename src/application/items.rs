// Implemented item variants. Painting is kept minimal: one positioned
// container per item with the variant's content inside.
use crate::application::item::{Item, ItemCore};
use crate::domain::item::{ItemProps, LabelPosition};
use crate::domain::variants::{
    ColorCloudProps, GroupProps, IconProps, StaticGraphProps, VariantProps,
};
use crate::infrastructure::dom::{Dom, NodeId};

/// Creates the positioned container shared by every variant.
fn paint_container(dom: &mut Dom, base: &ItemProps, variant_class: &str) -> NodeId {
    let element = dom.create_element("div");
    dom.add_class(element, "visual-console-item");
    dom.add_class(element, variant_class);
    if base.is_on_top {
        dom.add_class(element, "is-on-top");
    }
    dom.set_attribute(element, "data-id", &base.id.to_string());
    dom.set_attribute(element, "data-type", &base.item_type.tag().to_string());
    if let (true, Some(link)) = (base.is_link_enabled, base.link.as_deref()) {
        dom.set_attribute(element, "data-link", link);
    }
    dom.set_style(element, "position", Some("absolute"));
    dom.set_style(element, "left", Some(format!("{}px", base.position.x).as_str()));
    dom.set_style(element, "top", Some(format!("{}px", base.position.y).as_str()));
    dom.set_style(element, "width", Some(format!("{}px", base.size.width).as_str()));
    dom.set_style(element, "height", Some(format!("{}px", base.size.height).as_str()));
    element
}

/// Adds the label, before or after `content` depending on its position.
fn paint_label(dom: &mut Dom, element: NodeId, base: &ItemProps, content: NodeId) {
    let Some(label) = base.label.as_deref() else {
        dom.append_child(element, content);
        return;
    };
    let label_node = dom.create_element("span");
    dom.add_class(label_node, "visual-console-item-label");
    dom.set_text(label_node, label);
    match base.label_position {
        LabelPosition::Up | LabelPosition::Left => {
            dom.append_child(element, label_node);
            dom.append_child(element, content);
        }
        LabelPosition::Down | LabelPosition::Right => {
            dom.append_child(element, content);
            dom.append_child(element, label_node);
        }
    }
}

fn image(dom: &mut Dom, src: &str) -> NodeId {
    let node = dom.create_element("img");
    dom.set_attribute(node, "src", src);
    node
}

pub struct StaticGraph {
    core: ItemCore,
}

impl StaticGraph {
    pub fn new(dom: &mut Dom, props: StaticGraphProps) -> Self {
        let element = paint_container(dom, &props.base, "static-graph");
        // The status image, when present, replaces the plain one.
        let src = props.status_image_src.as_deref().unwrap_or(&props.image_src);
        let content = image(dom, src);
        if let Some(last_value) = &props.last_value {
            dom.set_attribute(content, "title", last_value);
        }
        paint_label(dom, element, &props.base, content);
        Self {
            core: ItemCore::new(VariantProps::StaticGraph(props), element),
        }
    }
}

impl Item for StaticGraph {
    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}

pub struct Icon {
    core: ItemCore,
}

impl Icon {
    pub fn new(dom: &mut Dom, props: IconProps) -> Self {
        let element = paint_container(dom, &props.base, "icon");
        let content = image(dom, &props.image_src);
        paint_label(dom, element, &props.base, content);
        Self {
            core: ItemCore::new(VariantProps::Icon(props), element),
        }
    }
}

impl Item for Icon {
    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}

pub struct Group {
    core: ItemCore,
}

impl Group {
    pub fn new(dom: &mut Dom, props: GroupProps) -> Self {
        let element = paint_container(dom, &props.base, "group");
        dom.set_attribute(element, "data-group-id", &props.group_id.to_string());
        let src = props.status_image_src.as_deref().unwrap_or(&props.image_src);
        let content = image(dom, src);
        paint_label(dom, element, &props.base, content);
        Self {
            core: ItemCore::new(VariantProps::Group(props), element),
        }
    }
}

impl Item for Group {
    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}

pub struct ColorCloud {
    core: ItemCore,
}

impl ColorCloud {
    pub fn new(dom: &mut Dom, props: ColorCloudProps) -> Self {
        let element = paint_container(dom, &props.base, "color-cloud");
        let content = dom.create_element("div");
        dom.add_class(content, "color-cloud-gradient");
        dom.set_style(content, "width", Some("100%"));
        dom.set_style(content, "height", Some("100%"));
        let gradient = format!("radial-gradient(circle, {} 0%, transparent 70%)", props.color);
        dom.set_style(content, "background", Some(gradient.as_str()));
        paint_label(dom, element, &props.base, content);
        Self {
            core: ItemCore::new(VariantProps::ColorCloud(props), element),
        }
    }
}

impl Item for ColorCloud {
    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}
