use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Created .trlintrc.json"));

    let content = test.read_file(".trlintrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["callNames"], serde_json::json!(["$tr"]));
    assert_eq!(parsed["ignores"], serde_json::json!(["**/node_modules/**"]));
    assert!(parsed.get("aliases").is_some());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".trlintrc.json", "{}")?;

    let (code, _, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(code, 2);
    assert!(stderr.contains(".trlintrc.json already exists"));
    assert_eq!(test.read_file(".trlintrc.json")?, "{}");
    assert!(test.root().join(".trlintrc.json").is_file());

    Ok(())
}
