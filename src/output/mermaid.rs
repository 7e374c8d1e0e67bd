use crate::config::DiagramLimits;
use crate::model::{AnalysisResult, FileKind};
use crate::output::OutputFormatter;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// `graph TD` diagram of every node and a capped subset of edges.
pub struct MermaidOutput {
    pub limits: DiagramLimits,
}

impl MermaidOutput {
    pub fn new(limits: DiagramLimits) -> Self {
        Self { limits }
    }
}

/// Edges the diagram will draw, and how many it leaves out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgePlan<'a> {
    pub edges: Vec<(&'a str, &'a str)>,
    pub omitted: usize,
}

impl EdgePlan<'_> {
    pub fn is_truncated(&self) -> bool {
        self.omitted > 0
    }
}

/// Pick edges node by node in file order: at most `max_edges_per_node` from
/// each node, `max_edges` overall.
pub fn plan_edges<'a>(result: &'a AnalysisResult, limits: &DiagramLimits) -> EdgePlan<'a> {
    let mut edges = Vec::new();

    for file in &result.files {
        if edges.len() >= limits.max_edges {
            break;
        }
        let room = limits.max_edges - edges.len();
        edges.extend(
            result
                .graph
                .depends_on(&file.path)
                .into_iter()
                .take(limits.max_edges_per_node.min(room))
                .map(|to| (file.path.as_str(), to)),
        );
    }

    EdgePlan {
        omitted: result.graph.edge_count() - edges.len(),
        edges,
    }
}

const CLASS_DEFS: &[(FileKind, &str)] = &[
    (FileKind::Component, "fill:#e1f5fe,stroke:#0277bd"),
    (FileKind::Hook, "fill:#f3e5f5,stroke:#6a1b9a"),
    (FileKind::Utility, "fill:#e8f5e9,stroke:#2e7d32"),
    (FileKind::Types, "fill:#fff8e1,stroke:#f9a825"),
    (FileKind::Test, "fill:#fce4ec,stroke:#ad1457"),
    (FileKind::Style, "fill:#ede7f6,stroke:#4527a0"),
];

fn class_name(kind: FileKind) -> Option<String> {
    CLASS_DEFS
        .iter()
        .any(|(k, _)| *k == kind)
        .then(|| format!("{}Node", kind.as_str()))
}

/// Mermaid ids allow only `[A-Za-z0-9_]`. Paths that collapse to the same id
/// get a numeric suffix in file order.
fn node_ids(result: &AnalysisResult) -> HashMap<&str, String> {
    let mut used = HashSet::new();
    let mut ids = HashMap::with_capacity(result.files.len());

    for file in &result.files {
        let base: String = file
            .path
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let mut id = base.clone();
        let mut n = 2;
        while !used.insert(id.clone()) {
            id = format!("{}_{}", base, n);
            n += 1;
        }
        ids.insert(file.path.as_str(), id);
    }

    ids
}

impl OutputFormatter for MermaidOutput {
    fn format<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> std::io::Result<()> {
        let ids = node_ids(result);

        writeln!(writer, "graph TD")?;
        for (kind, style) in CLASS_DEFS {
            writeln!(writer, "  classDef {}Node {}", kind.as_str(), style)?;
        }
        writeln!(writer)?;

        for file in &result.files {
            let label = file.file_name().replace('"', "#quot;");
            match class_name(file.kind) {
                Some(class) => writeln!(writer, "  {}[\"{}\"]:::{}", ids[file.path.as_str()], label, class)?,
                None => writeln!(writer, "  {}[\"{}\"]", ids[file.path.as_str()], label)?,
            }
        }
        writeln!(writer)?;

        let plan = plan_edges(result, &self.limits);
        for (from, to) in &plan.edges {
            writeln!(writer, "  {} --> {}", ids[from], ids[to])?;
        }
        if plan.is_truncated() {
            writeln!(
                writer,
                "  %% truncated: {} of {} edges omitted",
                plan.omitted,
                result.graph.edge_count()
            )?;
        }

        Ok(())
    }
}
