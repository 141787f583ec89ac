// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Rendering resolved configs to text

use crate::errors::MsaconfResult;
use crate::resolver::ResolvedConfig;

/// Output syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// Syntax implied by an output file extension
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Render a config; the text always ends with a newline
pub fn render(config: &ResolvedConfig, format: OutputFormat) -> MsaconfResult<String> {
    let mut text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(config)?,
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
    };

    if !text.ends_with('\n') {
        text.push('\n');
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ServiceTag;

    fn sample() -> ResolvedConfig {
        let mut config = ResolvedConfig::default();
        config
            .services
            .insert("gateway".into(), ServiceTag { tag: "2.0.1".into() });
        config
            .services
            .insert("auth".into(), ServiceTag { tag: "1.4.2".into() });
        config
            .versions
            .insert("default_review".into(), "1.4.0".into());
        config
    }

    #[test]
    fn test_render_yaml_is_sorted() {
        let yaml = render(&sample(), OutputFormat::Yaml).unwrap();
        insta::assert_snapshot!(yaml, @r"
        services:
          auth:
            tag: 1.4.2
          gateway:
            tag: 2.0.1
        versions:
          default_review: 1.4.0
        ");
    }

    #[test]
    fn test_render_json_parses_back() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        assert!(json.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["services"]["auth"]["tag"], "1.4.2");
        assert_eq!(value["versions"]["default_review"], "1.4.0");
    }

    #[test]
    fn test_numeric_looking_versions_stay_strings() {
        let mut config = ResolvedConfig::default();
        config.services.insert("auth".into(), ServiceTag { tag: "1.0".into() });

        let yaml = render(&config, OutputFormat::Yaml).unwrap();
        let parsed: ResolvedConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.tag("auth"), Some("1.0"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = render(&sample(), OutputFormat::Yaml).unwrap();
        let second = render(&sample(), OutputFormat::Yaml).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_extension("yml"), OutputFormat::Yaml);
    }
}
