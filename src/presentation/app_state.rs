// Application state for HTTP handlers
use std::sync::Mutex;

use crate::application::console::Console;
use crate::infrastructure::dom::Dom;

/// A console together with the element tree it renders into.
pub struct ConsoleSession {
    pub dom: Dom,
    pub console: Console,
}

pub struct AppState {
    pub session: Mutex<ConsoleSession>,
}

impl AppState {
    pub fn new(dom: Dom, console: Console) -> Self {
        Self {
            session: Mutex::new(ConsoleSession { dom, console }),
        }
    }

    /// Disposes the console and every item it owns.
    pub fn dispose(&self) -> anyhow::Result<()> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Console session lock poisoned"))?;
        let ConsoleSession { dom, console } = &mut *session;
        console.dispose(dom);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::click_sink::NoopSink;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_dispose_tears_down_console() {
        let mut dom = Dom::new();
        let surface = dom.create_element("div");
        let console = Console::from_definition(
            &mut dom,
            surface,
            &json!({ "id": 1, "name": "Ops", "groupId": 0, "width": 10, "height": 10 }),
            &[json!({ "id": 1, "type": 5, "width": 1, "height": 1, "imageSrc": "a.png" })],
            Arc::new(NoopSink),
        )
        .unwrap();
        let state = AppState::new(dom, console);

        state.dispose().unwrap();
        state.dispose().unwrap();

        let session = state.session.lock().unwrap();
        assert!(session.console.is_disposed());
        assert!(session.console.is_empty());
        assert!(session.dom.children(surface).is_empty());
    }
}
