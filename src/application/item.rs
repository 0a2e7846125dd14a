// Capability contract shared by every item variant
use crate::domain::item::ItemProps;
use crate::domain::variants::VariantProps;
use crate::infrastructure::dom::{Dom, NodeId};

pub type ClickHandler = Box<dyn Fn(&ClickEvent<'_>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Delivered to click handlers. Borrows the item that was clicked.
pub struct ClickEvent<'a> {
    pub item: &'a dyn Item,
}

impl<'a> ClickEvent<'a> {
    pub fn props(&self) -> &'a VariantProps {
        self.item.props()
    }
}

/// State every item carries: validated props, the single element it owns
/// and its click subscribers.
pub struct ItemCore {
    props: VariantProps,
    element: Option<NodeId>,
    handlers: Vec<(SubscriptionId, ClickHandler)>,
    next_subscription: u64,
}

impl ItemCore {
    /// `element` must be a freshly created, unattached element; inserting it
    /// somewhere is the caller's job.
    pub fn new(props: VariantProps, element: NodeId) -> Self {
        Self {
            props,
            element: Some(element),
            handlers: Vec::new(),
            next_subscription: 0,
        }
    }

    fn subscribe(&mut self, handler: ClickHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.handlers.push((id, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    fn emit(&self, item: &dyn Item) {
        let event = ClickEvent { item };
        for (_, handler) in &self.handlers {
            handler(&event);
        }
    }

    fn dispose(&mut self, dom: &mut Dom) {
        if let Some(element) = self.element.take() {
            dom.destroy(element);
        }
        self.handlers.clear();
    }
}

/// A widget placed on the console.
pub trait Item: Send + Sync {
    fn core(&self) -> &ItemCore;
    fn core_mut(&mut self) -> &mut ItemCore;

    fn props(&self) -> &VariantProps {
        &self.core().props
    }

    fn base(&self) -> &ItemProps {
        self.props().base()
    }

    fn id(&self) -> i64 {
        self.base().id
    }

    fn is_on_top(&self) -> bool {
        self.base().is_on_top
    }

    /// The owned element, `None` once disposed.
    fn element(&self) -> Option<NodeId> {
        self.core().element
    }

    /// Handlers run in registration order.
    fn subscribe_click(&mut self, handler: ClickHandler) -> SubscriptionId {
        self.core_mut().subscribe(handler)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.core_mut().unsubscribe(id)
    }

    fn subscriber_count(&self) -> usize {
        self.core().handlers.len()
    }

    /// Destroys the owned element and drops every subscription. Idempotent.
    fn dispose(&mut self, dom: &mut Dom) {
        self.core_mut().dispose(dom);
    }
}

impl dyn Item + '_ {
    pub fn click(&self) {
        self.core().emit(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::items::Icon;
    use crate::domain::variants::IconProps;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn icon(dom: &mut Dom) -> Box<dyn Item> {
        let data = json!({ "id": 11, "type": 5, "width": 16, "height": 16, "imageSrc": "a.png" });
        let props = IconProps::decode(data.as_object().unwrap()).unwrap();
        Box::new(Icon::new(dom, props))
    }

    #[test]
    fn test_click_fans_out_in_registration_order() {
        let mut dom = Dom::new();
        let mut item = icon(&mut dom);
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            item.subscribe_click(Box::new(move |event: &ClickEvent<'_>| {
                seen.lock().unwrap().push((tag, event.props().base().id));
            }));
        }
        item.click();

        assert_eq!(*seen.lock().unwrap(), vec![("first", 11), ("second", 11)]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut dom = Dom::new();
        let mut item = icon(&mut dom);
        let hits = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&hits);
        let id = item.subscribe_click(Box::new(move |_: &ClickEvent<'_>| *counter.lock().unwrap() += 1));
        assert!(item.unsubscribe(id));
        assert!(!item.unsubscribe(id));
        item.click();

        assert_eq!(*hits.lock().unwrap(), 0);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut dom = Dom::new();
        let surface = dom.create_element("div");
        let mut item = icon(&mut dom);
        let element = item.element().unwrap();
        dom.append_child(surface, element);
        item.subscribe_click(Box::new(|_: &ClickEvent<'_>| {}));

        item.dispose(&mut dom);
        item.dispose(&mut dom);

        assert_eq!(item.element(), None);
        assert_eq!(item.subscriber_count(), 0);
        assert!(!dom.contains(element));
        assert!(dom.children(surface).is_empty());
    }
}
