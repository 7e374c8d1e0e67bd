use serde::Serialize;

/// Advisory finding derived from the analysis. Never a validation error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub impact: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Architecture,
    Complexity,
    Structure,
    Consistency,
    Resolution,
}

impl Recommendation {
    pub fn resolve_cycles(cycle_count: usize) -> Self {
        Self {
            priority: Priority::High,
            category: Category::Architecture,
            title: "Resolve Circular Dependencies".to_string(),
            description: format!(
                "Found {} circular {} that should be resolved.",
                cycle_count,
                plural(cycle_count, "dependency", "dependencies")
            ),
            impact: "Prevents bundling issues, improves maintainability".to_string(),
        }
    }

    pub fn reduce_complexity(complex_files: usize, total_files: usize) -> Self {
        Self {
            priority: Priority::Medium,
            category: Category::Complexity,
            title: "Reduce File Complexity".to_string(),
            description: format!(
                "{} of {} files have high complexity scores.",
                complex_files, total_files
            ),
            impact: "Improves maintainability and testability".to_string(),
        }
    }

    pub fn fix_unresolved_imports(unresolved: usize, files: usize) -> Self {
        Self {
            priority: Priority::Low,
            category: Category::Resolution,
            title: "Fix Unresolved Local Imports".to_string(),
            description: format!(
                "{} local {} in {} {} did not resolve to a scanned file.",
                unresolved,
                plural(unresolved, "import", "imports"),
                files,
                plural(files, "file", "files")
            ),
            impact: "Missing or generated targets are invisible to the dependency graph"
                .to_string(),
        }
    }

    pub fn component_structure() -> Self {
        Self {
            priority: Priority::Low,
            category: Category::Structure,
            title: "Consider Component Structure".to_string(),
            description:
                "Low ratio of component files suggests potential for better organization."
                    .to_string(),
            impact: "Better code organization and reusability".to_string(),
        }
    }

    pub fn standardize_styling(methods: &[&str]) -> Self {
        Self {
            priority: Priority::Low,
            category: Category::Consistency,
            title: "Standardize Styling Approach".to_string(),
            description: format!("Multiple styling methods used: {}", methods.join(", ")),
            impact: "Consider standardizing on 1-2 styling approaches".to_string(),
        }
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Architecture => write!(f, "architecture"),
            Category::Complexity => write!(f, "complexity"),
            Category::Structure => write!(f, "structure"),
            Category::Consistency => write!(f, "consistency"),
            Category::Resolution => write!(f, "resolution"),
        }
    }
}
