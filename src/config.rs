use crate::model::ComplexityLevel;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".modgraph.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub scan: ScanSettings,
    pub resolve: ResolveSettings,
    pub complexity: ComplexityPolicy,
    pub diagram: DiagramLimits,
    pub recommendations: RecommendationThresholds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    /// File extensions (without the dot) the walker picks up.
    pub extensions: Vec<String>,
    /// Directory names skipped at any depth, on top of hidden directories.
    pub exclude_dirs: Vec<String>,
    pub respect_gitignore: bool,
    pub max_nodes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolveSettings {
    /// Probe order for extensionless specifiers, dot included.
    pub extensions: Vec<String>,
}

/// Weights and level thresholds for the complexity score. All tunable.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityPolicy {
    pub lines_per_point: f64,
    pub branches_per_point: f64,
    pub functions_per_point: f64,
    pub imports_per_point: f64,
    pub simple_max: u32,
    pub moderate_max: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLimits {
    pub max_edges_per_node: usize,
    pub max_edges: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationThresholds {
    /// Share of `complex` files at or above which a medium recommendation fires.
    pub complex_ratio: f64,
    /// Share of component files below which a structure hint fires.
    pub component_ratio: f64,
    pub max_styling_methods: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    scan: Option<RawScan>,
    resolve: Option<RawResolve>,
    complexity: Option<RawComplexity>,
    diagram: Option<RawDiagram>,
    recommendations: Option<RawRecommendations>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScan {
    extensions: Option<Vec<String>>,
    exclude_dirs: Option<Vec<String>>,
    respect_gitignore: Option<bool>,
    max_nodes: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResolve {
    extensions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawComplexity {
    lines_per_point: Option<f64>,
    branches_per_point: Option<f64>,
    functions_per_point: Option<f64>,
    imports_per_point: Option<f64>,
    simple_max: Option<u32>,
    moderate_max: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDiagram {
    max_edges_per_node: Option<usize>,
    max_edges: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecommendations {
    complex_ratio: Option<f64>,
    component_ratio: Option<f64>,
    max_styling_methods: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanSettings::default(),
            resolve: ResolveSettings::default(),
            complexity: ComplexityPolicy::default(),
            diagram: DiagramLimits::default(),
            recommendations: RecommendationThresholds::default(),
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: ["tsx", "ts", "jsx", "js", "css", "scss", "json"]
                .map(String::from)
                .to_vec(),
            exclude_dirs: vec!["node_modules".to_string()],
            respect_gitignore: false,
            max_nodes: 10_000,
        }
    }
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            extensions: [".tsx", ".ts", ".jsx", ".js", ".json"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Default for ComplexityPolicy {
    fn default() -> Self {
        Self {
            lines_per_point: 100.0,
            branches_per_point: 20.0,
            functions_per_point: 10.0,
            imports_per_point: 10.0,
            simple_max: 2,
            moderate_max: 5,
        }
    }
}

impl Default for DiagramLimits {
    fn default() -> Self {
        Self {
            max_edges_per_node: 5,
            max_edges: 100,
        }
    }
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            complex_ratio: 0.1,
            component_ratio: 0.3,
            max_styling_methods: 3,
        }
    }
}

impl ComplexityPolicy {
    pub fn level_for(&self, score: u32) -> ComplexityLevel {
        if score <= self.simple_max {
            ComplexityLevel::Simple
        } else if score <= self.moderate_max {
            ComplexityLevel::Moderate
        } else {
            ComplexityLevel::Complex
        }
    }
}

impl Config {
    /// Load `.modgraph.toml` from the project root, falling back to defaults
    /// when the file is absent.
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    pub fn load_file(config_path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(config_path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let scan = match raw.scan {
            Some(s) => ScanSettings {
                extensions: s
                    .extensions
                    .map(|exts| exts.iter().map(|e| e.trim_start_matches('.').to_string()).collect())
                    .unwrap_or(defaults.scan.extensions),
                exclude_dirs: s.exclude_dirs.unwrap_or(defaults.scan.exclude_dirs),
                respect_gitignore: s
                    .respect_gitignore
                    .unwrap_or(defaults.scan.respect_gitignore),
                max_nodes: s.max_nodes.unwrap_or(defaults.scan.max_nodes),
            },
            None => defaults.scan,
        };

        let resolve = match raw.resolve {
            Some(r) => ResolveSettings {
                extensions: r
                    .extensions
                    .map(|exts| exts.iter().map(|e| with_leading_dot(e)).collect())
                    .unwrap_or(defaults.resolve.extensions),
            },
            None => defaults.resolve,
        };

        let complexity = match raw.complexity {
            Some(c) => ComplexityPolicy {
                lines_per_point: c
                    .lines_per_point
                    .unwrap_or(defaults.complexity.lines_per_point),
                branches_per_point: c
                    .branches_per_point
                    .unwrap_or(defaults.complexity.branches_per_point),
                functions_per_point: c
                    .functions_per_point
                    .unwrap_or(defaults.complexity.functions_per_point),
                imports_per_point: c
                    .imports_per_point
                    .unwrap_or(defaults.complexity.imports_per_point),
                simple_max: c.simple_max.unwrap_or(defaults.complexity.simple_max),
                moderate_max: c.moderate_max.unwrap_or(defaults.complexity.moderate_max),
            },
            None => defaults.complexity,
        };

        let diagram = match raw.diagram {
            Some(d) => DiagramLimits {
                max_edges_per_node: d
                    .max_edges_per_node
                    .unwrap_or(defaults.diagram.max_edges_per_node),
                max_edges: d.max_edges.unwrap_or(defaults.diagram.max_edges),
            },
            None => defaults.diagram,
        };

        let recommendations = match raw.recommendations {
            Some(r) => RecommendationThresholds {
                complex_ratio: r
                    .complex_ratio
                    .unwrap_or(defaults.recommendations.complex_ratio),
                component_ratio: r
                    .component_ratio
                    .unwrap_or(defaults.recommendations.component_ratio),
                max_styling_methods: r
                    .max_styling_methods
                    .unwrap_or(defaults.recommendations.max_styling_methods),
            },
            None => defaults.recommendations,
        };

        Ok(Self {
            scan,
            resolve,
            complexity,
            diagram,
            recommendations,
        })
    }
}

fn with_leading_dot(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Starter config written by `modgraph init`. Every value shown is a default.
pub fn generate_config_template() -> String {
    r#"# modgraph configuration
# Every value below is the built-in default; delete what you don't change.

[scan]
# Extensions picked up by the walker
extensions = ["tsx", "ts", "jsx", "js", "css", "scss", "json"]
# Directory names skipped at any depth (hidden directories are always skipped)
exclude_dirs = ["node_modules"]
respect_gitignore = false
# Files beyond this count are dropped and the report is marked truncated
max_nodes = 10000

[resolve]
# Probe order for extensionless local imports; first match wins
extensions = [".tsx", ".ts", ".jsx", ".js", ".json"]

[complexity]
# score = round(lines/lines_per_point + branches/branches_per_point
#             + functions/functions_per_point + imports/imports_per_point)
lines_per_point = 100.0
branches_per_point = 20.0
functions_per_point = 10.0
imports_per_point = 10.0
# score <= simple_max is simple, <= moderate_max is moderate, else complex
simple_max = 2
moderate_max = 5

[diagram]
max_edges_per_node = 5
max_edges = 100

[recommendations]
complex_ratio = 0.1
component_ratio = 0.3
max_styling_methods = 3
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = Config::from_toml(&generate_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_merges_over_defaults() {
        let config = Config::from_toml(
            r#"
            [complexity]
            simple_max = 1

            [resolve]
            extensions = ["ts", ".js"]
            "#,
        )
        .unwrap();

        assert_eq!(config.complexity.simple_max, 1);
        assert_eq!(config.complexity.moderate_max, 5);
        assert_eq!(config.resolve.extensions, vec![".ts", ".js"]);
        assert_eq!(config.scan, ScanSettings::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = Config::from_toml("[scan]\nmax_node = 3\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_level_thresholds() {
        let policy = ComplexityPolicy::default();
        assert_eq!(policy.level_for(0), ComplexityLevel::Simple);
        assert_eq!(policy.level_for(2), ComplexityLevel::Simple);
        assert_eq!(policy.level_for(3), ComplexityLevel::Moderate);
        assert_eq!(policy.level_for(5), ComplexityLevel::Moderate);
        assert_eq!(policy.level_for(6), ComplexityLevel::Complex);
    }
}
