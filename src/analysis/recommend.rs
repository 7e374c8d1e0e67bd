use crate::analysis::Summary;
use crate::config::RecommendationThresholds;
use crate::model::{FileKind, Recommendation};

/// Derive advisory recommendations from the summary, highest priority first.
pub fn recommend(summary: &Summary, thresholds: &RecommendationThresholds) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if summary.circular_dependencies > 0 {
        recommendations.push(Recommendation::resolve_cycles(summary.circular_dependencies));
    }

    let complex = summary.complex_files();
    if complex > 0 && ratio(complex, summary.total_files) >= thresholds.complex_ratio {
        recommendations.push(Recommendation::reduce_complexity(complex, summary.total_files));
    }

    if summary.total_files > 0
        && ratio(summary.files_of_kind(FileKind::Component), summary.total_files)
            < thresholds.component_ratio
    {
        recommendations.push(Recommendation::component_structure());
    }

    if summary.styling_methods.len() > thresholds.max_styling_methods {
        let methods: Vec<&str> = summary.styling_methods.keys().map(|m| m.as_str()).collect();
        recommendations.push(Recommendation::standardize_styling(&methods));
    }

    if summary.unresolved_imports > 0 {
        recommendations.push(Recommendation::fix_unresolved_imports(
            summary.unresolved_imports,
            summary.files_with_unresolved_imports,
        ));
    }

    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DependencyGraph, test_support::files};
    use crate::model::{Category, ComplexityLevel, Cycle, Priority, StylingMethod};

    fn summary_for(layout: &[(&str, &[&str])], cycles: &[Cycle]) -> Summary {
        let input = files(layout);
        let graph = DependencyGraph::build(&input);
        Summary::compute(&input, &graph, cycles)
    }

    fn categories(recs: &[Recommendation]) -> Vec<Category> {
        recs.iter().map(|r| r.category).collect()
    }

    #[test]
    fn test_cycles_are_high_priority() {
        let cycle = Cycle::from_members(vec!["a".into(), "b".into()]).unwrap();
        let summary = summary_for(&[("a", &["b"]), ("b", &["a"])], &[cycle]);
        let recs = recommend(&summary, &RecommendationThresholds::default());

        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].category, Category::Architecture);
        assert!(recs[0].description.contains("1 circular dependency"));
    }

    #[test]
    fn test_complex_ratio_threshold() {
        let mut summary = summary_for(&[("a", &[]), ("b", &[]), ("c", &[])], &[]);
        *summary
            .complexity_distribution
            .get_mut(&ComplexityLevel::Complex)
            .unwrap() = 1;

        let loose = RecommendationThresholds {
            complex_ratio: 0.5,
            ..RecommendationThresholds::default()
        };
        assert!(!categories(&recommend(&summary, &loose)).contains(&Category::Complexity));

        let recs = recommend(&summary, &RecommendationThresholds::default());
        let complexity = recs
            .iter()
            .find(|r| r.category == Category::Complexity)
            .unwrap();
        assert_eq!(complexity.priority, Priority::Medium);
    }

    #[test]
    fn test_low_priority_signals_and_ordering() {
        let mut summary = summary_for(&[("a", &[])], &[]);
        summary.unresolved_imports = 2;
        summary.files_with_unresolved_imports = 1;
        for method in [
            StylingMethod::Sx,
            StylingMethod::Jss,
            StylingMethod::CssClasses,
            StylingMethod::InlineStyles,
        ] {
            summary.styling_methods.insert(method, 1);
        }
        summary.circular_dependencies = 1;

        let recs = recommend(&summary, &RecommendationThresholds::default());
        assert_eq!(
            categories(&recs),
            vec![
                Category::Architecture,
                Category::Structure,
                Category::Consistency,
                Category::Resolution,
            ]
        );
        assert!(recs.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_empty_project_has_no_recommendations() {
        let summary = summary_for(&[], &[]);
        assert!(recommend(&summary, &RecommendationThresholds::default()).is_empty());
    }
}
