/*!
 * Common test utilities for the resxlate test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use resxlate::app_config::{Config, FailurePolicy};

/// A small resource file with three translatable strings, a comment,
/// an empty value and a binary resource.
pub const SAMPLE_RESX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <resheader name="resmimetype">
    <value>text/microsoft-resx</value>
  </resheader>
  <data name="Greeting" xml:space="preserve">
    <value>Hello</value>
    <comment>Shown on the start page</comment>
  </data>
  <data name="Empty" xml:space="preserve">
    <value></value>
  </data>
  <data name="Farewell" xml:space="preserve">
    <value>Goodbye &amp; thanks</value>
  </data>
  <data name="Logo" type="System.Resources.ResXFileRef, System.Windows.Forms">
    <value>logo.png;System.Byte[], mscorlib</value>
  </data>
  <data name="Question" xml:space="preserve">
    <value>How are you?</value>
  </data>
</root>
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes [`SAMPLE_RESX`] into `dir`
pub fn create_sample_resx(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_RESX)
}

/// Default configuration without delays, for fast tests
pub fn test_config(on_error: FailurePolicy) -> Config {
    let mut config = Config::default();
    config.translation.common.rate_limit_delay_ms = 0;
    config.translation.common.retry_backoff_ms = 1;
    config.translation.common.retry_count = 1;
    config.translation.common.on_error = on_error;
    config
}

/// Route `log` output through the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
