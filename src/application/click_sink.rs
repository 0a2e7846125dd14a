// Where the console relays item clicks to
use crate::application::item::ClickEvent;

/// Receives every click relayed by a console. Hosts inject their own sink to
/// hook item interaction into the rest of the dashboard.
pub trait ClickSink: Send + Sync {
    fn notify(&self, event: &ClickEvent<'_>);
}

/// Default sink: logs the click.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ClickSink for TracingSink {
    fn notify(&self, event: &ClickEvent<'_>) {
        let base = event.props().base();
        tracing::info!(
            item_id = base.id,
            item_type = base.item_type.tag(),
            link = base.link.as_deref(),
            "Visual console item clicked"
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ClickSink for NoopSink {
    fn notify(&self, _event: &ClickEvent<'_>) {}
}
