use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Course, CourseDetails, CoursePricing, Document};

/// Cross-collection inconsistencies, keyed by logical course id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub courses: usize,
    pub missing_details: Vec<String>,
    pub missing_pricing: Vec<String>,
    pub orphan_details: Vec<String>,
    pub orphan_pricing: Vec<String>,
    pub duplicate_details: Vec<String>,
    pub duplicate_pricing: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_details.is_empty()
            && self.missing_pricing.is_empty()
            && self.orphan_details.is_empty()
            && self.orphan_pricing.is_empty()
            && self.duplicate_details.is_empty()
            && self.duplicate_pricing.is_empty()
    }
}

pub fn audit_consistency(
    courses: &[Course],
    details: &[CourseDetails],
    pricing: &[CoursePricing],
) -> ConsistencyReport {
    let details_count = count_by_logical_key(details);
    let pricing_count = count_by_logical_key(pricing);

    let mut report = ConsistencyReport {
        courses: courses.len(),
        ..Default::default()
    };

    for course in courses {
        if !details_count.contains_key(course.id.as_str()) {
            report.missing_details.push(course.id.clone());
        }
        if !pricing_count.contains_key(course.id.as_str()) {
            report.missing_pricing.push(course.id.clone());
        }
    }

    report.orphan_details = orphans(courses, details);
    report.orphan_pricing = orphans(courses, pricing);
    report.duplicate_details = duplicates(&details_count);
    report.duplicate_pricing = duplicates(&pricing_count);

    report
}

fn count_by_logical_key<T: Document>(records: &[T]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.logical_key()).or_insert(0) += 1;
    }
    counts
}

fn orphans<T: Document>(courses: &[Course], records: &[T]) -> Vec<String> {
    let mut orphans: Vec<String> = records
        .iter()
        .map(|r| r.logical_key())
        .filter(|key| !courses.iter().any(|c| c.id == *key))
        .map(str::to_string)
        .collect();
    orphans.sort();
    orphans.dedup();
    orphans
}

fn duplicates(counts: &HashMap<&str, usize>) -> Vec<String> {
    let mut keys: Vec<String> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(key, _)| key.to_string())
        .collect();
    keys.sort();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str) -> Course {
        Course {
            key: Some(format!("k-{id}")),
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn details(course_id: &str) -> CourseDetails {
        CourseDetails {
            course_id: course_id.to_string(),
            ..Default::default()
        }
    }

    fn pricing(id: &str) -> CoursePricing {
        CoursePricing {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_consistent_triad() {
        let report = audit_consistency(&[course("py101")], &[details("py101")], &[pricing("py101")]);
        assert!(report.is_consistent());
        assert_eq!(report.courses, 1);
    }

    #[test]
    fn test_detects_every_kind_of_drift() {
        let report = audit_consistency(
            &[course("py101"), course("js101")],
            &[details("py101"), details("py101"), details("ghost")],
            &[pricing("js101"), pricing("old")],
        );

        assert!(!report.is_consistent());
        assert_eq!(report.missing_details, vec!["js101"]);
        assert_eq!(report.missing_pricing, vec!["py101"]);
        assert_eq!(report.orphan_details, vec!["ghost"]);
        assert_eq!(report.orphan_pricing, vec!["old"]);
        assert_eq!(report.duplicate_details, vec!["py101"]);
        assert!(report.duplicate_pricing.is_empty());
    }
}
