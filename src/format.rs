use anyhow::{Result, bail};
use serde::Serialize;
use std::str::FromStr;

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text grid - the default
    #[default]
    Text,
    /// JSON - machine-parseable, includes full ids
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => bail!("Invalid format '{s}'. Use: text or json"),
        }
    }
}

impl OutputFormat {
    /// Resolve `--format` and the `--json` shorthand
    pub fn resolve(format: Option<Self>, json: bool) -> Self {
        if json {
            Self::Json
        } else {
            format.unwrap_or_default()
        }
    }

    /// Serialize data to the requested format
    pub fn serialize<T: Serialize>(self, data: &T) -> Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(data)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}")),
            Self::Text => {
                // Text output is rendered by the grid, not serialized
                bail!("Text format should not use serialize()")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("toon".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_flag_wins() {
        assert_eq!(OutputFormat::resolve(None, false), OutputFormat::Text);
        assert_eq!(OutputFormat::resolve(None, true), OutputFormat::Json);
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Json), false),
            OutputFormat::Json
        );
    }

    #[test]
    fn json_serializes_pretty() {
        let out = OutputFormat::Json.serialize(&vec![1, 2]).unwrap();
        assert!(out.contains('\n'));
        assert!(OutputFormat::Text.serialize(&1).is_err());
    }
}
