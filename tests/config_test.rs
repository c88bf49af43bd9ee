use careorbit::agents::LlmProviderType;
use careorbit::config::Settings;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_without_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let settings = Settings::from_root(temp_dir.path().to_str().unwrap())?;

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8001);
    assert!(settings.completion.is_none());
    assert!(settings.demo_data);
    assert_eq!(settings.orchestration.agent_timeout_seconds, 35);
    assert_eq!(settings.orchestration.max_recommendations, 4);
    assert!(settings.router.care_gap.contains(&"screening".to_string()));

    Ok(())
}

#[test]
fn test_load_full_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let careorbit_toml = r#"
demo_data = false

[server]
host = "0.0.0.0"
port = 9000

[completion]
provider = "azure"
model = "gpt-4o-care"
base_url = "https://example.openai.azure.com"
api_key_env = "CARE_TEST_KEY"

[orchestration]
agent_timeout_seconds = 10
inclusion_threshold = 0.5

[router]
appointment = ["appointment", "booking"]
"#;
    fs::write(root.join("careorbit.toml"), careorbit_toml)?;

    let settings = Settings::from_root(root.to_str().unwrap())?;

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 9000);
    assert!(!settings.demo_data);

    let completion = settings.completion.expect("completion section");
    assert_eq!(completion.provider, LlmProviderType::AzureOpenAI);
    assert_eq!(completion.model, "gpt-4o-care");
    assert_eq!(completion.api_key_var(), "CARE_TEST_KEY");
    assert_eq!(completion.timeout_seconds, 30);
    assert_eq!(completion.api_version, "2024-02-01");

    assert_eq!(settings.orchestration.agent_timeout_seconds, 10);
    assert_eq!(settings.orchestration.inclusion_threshold, 0.5);
    assert_eq!(settings.orchestration.recommendations_per_agent, 2);

    assert_eq!(settings.router.appointment, vec!["appointment", "booking"]);
    assert!(settings.router.medication.contains(&"medication".to_string()));

    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let careorbit_toml = r#"
[server]
host = ""
port = 0

[completion]
provider = "azure"
model = "gpt-4o"

[orchestration]
inclusion_threshold = 2.0
"#;
    fs::write(root.join("careorbit.toml"), careorbit_toml)?;

    let err = Settings::from_root(root.to_str().unwrap()).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("Configuration validation failed"));
    assert!(message.contains("server.host"));
    assert!(message.contains("server.port"));
    assert!(message.contains("orchestration.inclusion_threshold"));
    assert!(message.contains("completion.base_url"));

    Ok(())
}
