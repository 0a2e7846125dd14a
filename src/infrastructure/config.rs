use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub console: ConsoleSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleSettings {
    /// Path to the JSON console definition.
    pub definition: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
}

/// Raw console definition as supplied by the dashboard backend. Nothing in
/// here is validated yet.
#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleDefinition {
    pub console: Value,
    #[serde(default)]
    pub items: Vec<Value>,
}

/// Loads `config/visual-console.*` (optional) overlaid with
/// `VISUAL_CONSOLE__SECTION__KEY` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("console.definition", "config/console.json")?
        .set_default("log.filter", "info")?
        .add_source(config::File::with_name("config/visual-console").required(false))
        .add_source(config::Environment::with_prefix("VISUAL_CONSOLE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_console_definition(path: impl AsRef<Path>) -> anyhow::Result<ConsoleDefinition> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read console definition {}", path.display()))?;
    parse_console_definition(&raw)
        .with_context(|| format!("Failed to parse console definition {}", path.display()))
}

pub fn parse_console_definition(raw: &str) -> anyhow::Result<ConsoleDefinition> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_console_definition() {
        let raw = r#"{
            "console": { "id": 1, "name": "Overview", "groupId": 0, "width": 800, "height": 600 },
            "items": [
                { "id": 1, "type": 5, "imageSrc": "a.png", "width": 10, "height": 10 },
                { "id": 2, "type": 999 }
            ]
        }"#;

        let definition = parse_console_definition(raw).unwrap();
        assert_eq!(definition.console["name"], "Overview");
        assert_eq!(definition.items.len(), 2);
    }

    #[test]
    fn test_items_default_to_empty() {
        let definition = parse_console_definition(r#"{ "console": {} }"#).unwrap();
        assert!(definition.items.is_empty());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(parse_console_definition("{ console").is_err());
    }

    #[test]
    fn test_missing_definition_file_names_the_path() {
        let err = load_console_definition("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
