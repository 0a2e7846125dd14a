// Visual console - Owns the items on one surface, their stacking order and surface patches
use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;

use crate::application::click_sink::{ClickSink, TracingSink};
use crate::application::factory::create_item;
use crate::application::item::{ClickEvent, Item};
use crate::domain::console_props::ConsoleProps;
use crate::domain::decode::Size;
use crate::domain::errors::{ConsoleError, ItemError};
use crate::infrastructure::dom::{Dom, NodeId};

/// A descriptor that could not be turned into an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position of the descriptor in the input batch.
    pub index: usize,
    pub error: ItemError,
}

/// Stacking comparator. Items flagged `isOnTop` go last (painted above the
/// rest); inside each group higher ids come first.
pub fn stacking_order(a: &dyn Item, b: &dyn Item) -> Ordering {
    a.is_on_top()
        .cmp(&b.is_on_top())
        .then_with(|| b.id().cmp(&a.id()))
}

pub struct Console {
    props: ConsoleProps,
    surface: NodeId,
    items: Vec<Box<dyn Item>>,
    diagnostics: Vec<Diagnostic>,
    sink: Arc<dyn ClickSink>,
    disposed: bool,
}

impl Console {
    /// Builds a console relaying clicks to the [`TracingSink`].
    pub fn new(dom: &mut Dom, surface: NodeId, props: ConsoleProps, descriptors: &[Value]) -> Self {
        Self::with_sink(dom, surface, props, descriptors, Arc::new(TracingSink))
    }

    /// Decodes the raw console props first; if they are invalid nothing is
    /// built and the surface is left untouched.
    pub fn from_definition(
        dom: &mut Dom,
        surface: NodeId,
        console: &Value,
        descriptors: &[Value],
        sink: Arc<dyn ClickSink>,
    ) -> Result<Self, ConsoleError> {
        let props = ConsoleProps::decode(console)?;
        Ok(Self::with_sink(dom, surface, props, descriptors, sink))
    }

    pub fn with_sink(
        dom: &mut Dom,
        surface: NodeId,
        props: ConsoleProps,
        descriptors: &[Value],
        sink: Arc<dyn ClickSink>,
    ) -> Self {
        let mut console = Self {
            props,
            surface,
            items: Vec::with_capacity(descriptors.len()),
            diagnostics: Vec::new(),
            sink,
            disposed: false,
        };

        console.render(dom);

        for (index, descriptor) in descriptors.iter().enumerate() {
            match create_item(dom, descriptor) {
                Ok(item) => console.add_item(dom, item),
                Err(error) => {
                    tracing::warn!(index, %error, "Skipping visual console item");
                    console.diagnostics.push(Diagnostic { index, error });
                }
            }
        }

        console.sort_items(dom);

        tracing::debug!(
            console_id = console.props.id,
            items = console.items.len(),
            skipped = console.diagnostics.len(),
            "Visual console ready"
        );
        console
    }

    fn add_item(&mut self, dom: &mut Dom, mut item: Box<dyn Item>) {
        if self.items.iter().any(|existing| existing.id() == item.id()) {
            tracing::warn!(
                item_id = item.id(),
                "Duplicate visual console item id; lookups and clicks reach the first in stacking order"
            );
        }
        let sink = Arc::clone(&self.sink);
        item.subscribe_click(Box::new(move |event: &ClickEvent<'_>| sink.notify(event)));
        if let Some(element) = item.element() {
            dom.append_child(self.surface, element);
        }
        self.items.push(item);
    }

    fn sort_items(&mut self, dom: &mut Dom) {
        self.items
            .sort_by(|a, b| stacking_order(a.as_ref(), b.as_ref()));
        let order: Vec<NodeId> = self.items.iter().filter_map(|item| item.element()).collect();
        dom.reorder_children(self.surface, &order);
    }

    pub fn props(&self) -> &ConsoleProps {
        &self.props
    }

    pub fn surface(&self) -> NodeId {
        self.surface
    }

    /// Items in stacking order.
    pub fn items(&self) -> impl Iterator<Item = &dyn Item> {
        self.items.iter().map(|item| item.as_ref())
    }

    /// First item with `id` in stacking order. Ids are not required to be
    /// unique; later duplicates are only reachable through [`Console::items`].
    pub fn item(&self, id: i64) -> Option<&dyn Item> {
        self.items().find(|item| item.id() == id)
    }

    pub fn item_mut(&mut self, id: i64) -> Option<&mut (dyn Item + 'static)> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .map(|item| item.as_mut())
    }

    pub fn item_ids(&self) -> Vec<i64> {
        self.items().map(|item| item.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Descriptors skipped during construction.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Replaces the props and patches only the surface attributes that
    /// changed. Returns the previous props.
    pub fn set_props(&mut self, dom: &mut Dom, props: ConsoleProps) -> ConsoleProps {
        let previous = std::mem::replace(&mut self.props, props);
        self.render_changes(dom, &previous);
        previous
    }

    /// Replaces only the dimensions, through the same diff as `set_props`.
    pub fn resize(&mut self, dom: &mut Dom, size: Size) -> ConsoleProps {
        let props = self.props.with_size(size);
        self.set_props(dom, props)
    }

    /// Delivers a click to the first item with the given id in stacking
    /// order. Returns `false` if there is no such item.
    pub fn click(&self, id: i64) -> bool {
        match self.item(id) {
            Some(item) => {
                item.click();
                true
            }
            None => false,
        }
    }

    /// Destroys every item together with its element. Idempotent.
    pub fn dispose(&mut self, dom: &mut Dom) {
        for mut item in self.items.drain(..) {
            item.dispose(dom);
        }
        if !self.disposed {
            tracing::debug!(console_id = self.props.id, "Visual console disposed");
        }
        self.disposed = true;
    }

    fn render(&self, dom: &mut Dom) {
        self.paint_background_image(dom);
        self.paint_background_color(dom);
        self.paint_width(dom);
        self.paint_height(dom);
    }

    fn render_changes(&self, dom: &mut Dom, previous: &ConsoleProps) {
        if previous.background_url != self.props.background_url {
            self.paint_background_image(dom);
        }
        if previous.background_color != self.props.background_color {
            self.paint_background_color(dom);
        }
        if previous.size.width != self.props.size.width {
            self.paint_width(dom);
        }
        if previous.size.height != self.props.size.height {
            self.paint_height(dom);
        }
    }

    fn paint_background_image(&self, dom: &mut Dom) {
        let value = self
            .props
            .background_url
            .as_ref()
            .map(|url| format!("url({url})"));
        dom.set_style(self.surface, "background-image", value.as_deref());
    }

    fn paint_background_color(&self, dom: &mut Dom) {
        dom.set_style(
            self.surface,
            "background-color",
            self.props.background_color.as_deref(),
        );
    }

    fn paint_width(&self, dom: &mut Dom) {
        let width = format!("{}px", self.props.size.width);
        dom.set_style(self.surface, "width", Some(width.as_str()));
    }

    fn paint_height(&self, dom: &mut Dom) {
        let height = format!("{}px", self.props.size.height);
        dom.set_style(self.surface, "height", Some(height.as_str()));
    }
}
