use crate::{commands::RenderOptions, error::CliError};
use sql_render::RenderConfig;
use tracing::debug;

/// Builds the render config: the optional JSON file first, then any flag
/// the user passed on top of it.
pub async fn load(options: &RenderOptions) -> Result<RenderConfig, CliError> {
    let base = match &options.config {
        Some(path) => {
            debug!(path = %path, "loading render config");
            let source = tokio::fs::read_to_string(path).await?;
            serde_json::from_str(&source)?
        }
        None => RenderConfig::default(),
    };
    Ok(apply_overrides(base, options))
}

fn apply_overrides(mut config: RenderConfig, options: &RenderOptions) -> RenderConfig {
    if let Some(dialect) = options.dialect {
        config.dialect = dialect;
    }
    if options.lower {
        config.uppercase = false;
    }
    if options.compact {
        config.pretty = false;
    }
    if options.parameterized {
        config.parameterized = true;
    }
    if let Some(indent) = &options.indent {
        config.indent_unit = indent.clone();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_render::DialectKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_defaults_without_file() {
        let config = load(&RenderOptions::default()).await.unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[tokio::test]
    async fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"dialect": "oracle", "uppercase": false, "max_depth": 64}}"#
        )
        .unwrap();

        let options = RenderOptions {
            config: Some(file.path().to_string_lossy().into_owned()),
            dialect: Some(DialectKind::Hive),
            compact: true,
            indent: Some("  ".into()),
            ..Default::default()
        };
        let config = load(&options).await.unwrap();
        assert_eq!(config.dialect, DialectKind::Hive);
        assert!(!config.uppercase);
        assert!(!config.pretty);
        assert!(!config.parameterized);
        assert_eq!(config.indent_unit, "  ");
        assert_eq!(config.max_depth, 64);
    }

    #[tokio::test]
    async fn test_malformed_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let options = RenderOptions {
            config: Some(file.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert!(matches!(load(&options).await, Err(CliError::Deserialize(_))));
    }
}
