//! Test-quality handler: deterministic static analysis of a test file
//!
//! No external process is involved. The analyzer scans line by line for
//! assertion smells, classifies each test block as useful or not, and
//! derives a 0-100 quality score.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rule that produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueRule {
    /// Assertion on a bare literal, no contextual comparison
    UselessTest,
    /// Installs a mock and only asserts the mock was called
    MockLoop,
    /// Assertion comparing only to undefined/null/true/false
    TrivialAssertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One finding at a specific line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityIssue {
    pub line: usize,
    pub rule: IssueRule,
    pub severity: IssueSeverity,
    pub message: String,
}

/// Aggregate counters over the file's test blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMetrics {
    pub total_tests: usize,
    pub useful_tests: usize,
    pub total_assertions: usize,
    pub useful_ratio: f64,
}

/// Full analysis outcome for one test file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestQualityReport {
    /// 0-100; higher is better
    pub quality_score: u8,
    pub issues: Vec<QualityIssue>,
    pub metrics: TestMetrics,
}

/// Analyze a test file on disk
pub fn analyze_test_file(path: &Path) -> Result<TestQualityReport, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let report = analyze_source(&content);
    debug!(
        file = %path.display(),
        score = report.quality_score,
        issues = report.issues.len(),
        "analyzed test quality"
    );
    Ok(report)
}

/// Per-test classification state
#[derive(Default)]
struct TestBlock {
    has_assertion: bool,
    has_real_behavior: bool,
    verifies_mock_call: bool,
}

impl TestBlock {
    /// A test is useful iff it asserts something AND either exercises real
    /// behavior or verifies a mock invocation.
    fn is_useful(&self) -> bool {
        self.has_assertion && (self.has_real_behavior || self.verifies_mock_call)
    }
}

/// Analyze test source text
pub fn analyze_source(content: &str) -> TestQualityReport {
    let test_start = Regex::new(r"\b(?:it|test)\s*\(").unwrap();
    let trivial = Regex::new(
        r"\.toBe(?:Truthy|Falsy|Null|Undefined|Defined)\s*\(\s*\)|\.to(?:Be|Equal|StrictEqual)\s*\(\s*(?:true|false|null|undefined)\s*\)",
    )
    .unwrap();
    let literal_subject = Regex::new(
        r#"expect\s*\(\s*(?:true|false|null|undefined|-?\d+(?:\.\d+)?|'[^']*'|"[^"]*"|`[^`]*`)\s*\)"#,
    )
    .unwrap();
    let real_behavior =
        Regex::new(r"\b(?:result|output|state|count|length)\b|\.toThrow").unwrap();
    let mock_install = Regex::new(
        r"jest\.fn\s*\(|jest\.mock\s*\(|\bmockReturnValue|\bmockResolvedValue|\bmockImplementation",
    )
    .unwrap();

    let mut issues = Vec::new();
    let mut tests: Vec<TestBlock> = Vec::new();
    let mut current: Option<TestBlock> = None;
    let mut total_assertions = 0usize;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;

        if test_start.is_match(line) {
            if let Some(block) = current.take() {
                tests.push(block);
            }
            current = Some(TestBlock::default());
        }

        let is_assertion = line.contains("expect(");
        if !is_assertion {
            continue;
        }
        total_assertions += 1;

        let exercises_real = real_behavior.is_match(line);
        let checks_mock_call = line.contains("toHaveBeenCalled");

        if let Some(block) = current.as_mut() {
            block.has_assertion = true;
            if exercises_real {
                block.has_real_behavior = true;
            }
            if checks_mock_call {
                block.verifies_mock_call = true;
            }
        }

        if literal_subject.is_match(line) {
            issues.push(QualityIssue {
                line: line_no,
                rule: IssueRule::UselessTest,
                severity: IssueSeverity::Error,
                message: "Assertion on a bare literal proves nothing about the code under test"
                    .to_string(),
            });
        }

        if mock_install.is_match(line) && checks_mock_call && !exercises_real {
            issues.push(QualityIssue {
                line: line_no,
                rule: IssueRule::MockLoop,
                severity: IssueSeverity::Error,
                message: "Mock is installed and then only the mock call itself is asserted"
                    .to_string(),
            });
        }

        if trivial.is_match(line) {
            issues.push(QualityIssue {
                line: line_no,
                rule: IssueRule::TrivialAssertion,
                severity: IssueSeverity::Warning,
                message: "Assertion only compares against a trivial literal value".to_string(),
            });
        }
    }
    if let Some(block) = current.take() {
        tests.push(block);
    }

    let metrics = calculate_metrics(&tests, total_assertions);
    let quality_score = score_from_metrics(&metrics);

    TestQualityReport {
        quality_score,
        issues,
        metrics,
    }
}

/// Aggregate per-test classifications into file-level metrics
fn calculate_metrics(tests: &[TestBlock], total_assertions: usize) -> TestMetrics {
    let total_tests = tests.len();
    let useful_tests = tests.iter().filter(|t| t.is_useful()).count();
    let useful_ratio = if total_tests == 0 {
        0.0
    } else {
        useful_tests as f64 / total_tests as f64
    };
    TestMetrics {
        total_tests,
        useful_tests,
        total_assertions,
        useful_ratio,
    }
}

/// `round(60 * useful_ratio + 40 * min(1, coverage))` where the coverage
/// estimate is the useful ratio itself (no external coverage tool).
fn score_from_metrics(metrics: &TestMetrics) -> u8 {
    let coverage_estimate = metrics.useful_ratio;
    (60.0 * metrics.useful_ratio + 40.0 * coverage_estimate.min(1.0)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_truthy_assertion_is_trivial_only() {
        let source = "\
it('works', () => {
  expect(x).toBeTruthy();
});
";
        let report = analyze_source(source);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule, IssueRule::TrivialAssertion);
        assert_eq!(report.issues[0].severity, IssueSeverity::Warning);
        assert_eq!(report.issues[0].line, 2);
        assert_eq!(report.metrics.useful_tests, 0);
        assert_eq!(report.metrics.total_tests, 1);
        assert_eq!(report.quality_score, 0);
    }

    #[test]
    fn test_literal_subject_is_useless() {
        let source = "\
it('always passes', () => {
  expect(true).toBe(true);
});
";
        let report = analyze_source(source);
        assert!(report
            .issues
            .iter()
            .any(|i| i.rule == IssueRule::UselessTest && i.severity == IssueSeverity::Error));
        assert_eq!(report.metrics.useful_tests, 0);
    }

    #[test]
    fn test_mock_loop_detection() {
        let source = "\
it('calls the service', () => {
  const send = jest.fn(); expect(send).toHaveBeenCalled();
});
";
        let report = analyze_source(source);
        assert!(report.issues.iter().any(|i| i.rule == IssueRule::MockLoop));
    }

    #[test]
    fn test_real_behavior_is_useful_and_clean() {
        let source = "\
it('computes the total', () => {
  const result = add(2, 3);
  expect(result.count).toEqual(5);
});
";
        let report = analyze_source(source);
        assert!(report.issues.is_empty());
        assert_eq!(report.metrics.total_tests, 1);
        assert_eq!(report.metrics.useful_tests, 1);
        assert_eq!(report.quality_score, 100);
    }

    #[test]
    fn test_thrown_error_counts_as_real_behavior() {
        let source = "\
it('rejects bad input', () => {
  expect(() => parse('')).toThrow();
});
";
        let report = analyze_source(source);
        assert_eq!(report.metrics.useful_tests, 1);
    }

    #[test]
    fn test_mock_verification_makes_test_useful() {
        let source = "\
it('notifies listeners', () => {
  emitter.emit('done');
  expect(listener).toHaveBeenCalledWith('done');
});
";
        let report = analyze_source(source);
        assert_eq!(report.metrics.useful_tests, 1);
    }

    #[test]
    fn test_half_useful_scores_fifty() {
        let source = "\
it('good', () => {
  const result = run();
  expect(result.length).toEqual(3);
});
it('bad', () => {
  expect(x).toBeDefined();
});
";
        let report = analyze_source(source);
        assert_eq!(report.metrics.total_tests, 2);
        assert_eq!(report.metrics.useful_tests, 1);
        // 60 * 0.5 + 40 * 0.5
        assert_eq!(report.quality_score, 50);
    }

    #[test]
    fn test_empty_file() {
        let report = analyze_source("");
        assert_eq!(report.metrics.total_tests, 0);
        assert_eq!(report.metrics.total_assertions, 0);
        assert!(report.issues.is_empty());
        assert_eq!(report.quality_score, 0);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let source = "it('a', () => { expect(x).toBeTruthy(); });";
        let first = analyze_source(source);
        let second = analyze_source(source);
        assert_eq!(first.issues.len(), second.issues.len());
        assert_eq!(first.quality_score, second.quality_score);
    }

    #[test]
    fn test_analyze_test_file_missing() {
        let err = analyze_test_file(Path::new("/nonexistent/a.test.ts")).unwrap_err();
        assert!(err.contains("failed to read"));
    }
}
