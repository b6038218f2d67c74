use std::collections::BTreeMap;

use crate::bands::round_to;
use crate::models::{ClassSummary, Ordered, Student, Subject, SUBJECTS};
use crate::stats::{mean, present_values};

pub fn appreciation(term_mean: Option<f64>) -> &'static str {
    match term_mean {
        None => "",
        Some(m) if m >= 16.0 => "Excellent",
        Some(m) if m >= 14.0 => "Très bien",
        Some(m) if m >= 12.0 => "Bien",
        Some(m) if m >= 10.0 => "Assez bien",
        Some(_) => "Insuffisant",
    }
}

pub fn degree(rank: u32) -> u32 {
    let raw = 100 - (i64::from(rank) - 1) * 10;
    raw.clamp(10, 100) as u32
}

/// Rank by descending mean; ties share the lowest rank. `None` stays unranked.
pub fn rank_desc(means: &[Option<f64>]) -> Vec<Option<u32>> {
    means
        .iter()
        .map(|m| {
            m.map(|m| {
                let better = means.iter().flatten().filter(|other| **other > m).count();
                better as u32 + 1
            })
        })
        .collect()
}

/// Groups rows by class; rows without a class form the `""` group.
pub fn by_class(students: &[Student]) -> BTreeMap<String, ClassSummary> {
    let mut groups: BTreeMap<Option<&str>, Vec<&Student>> = BTreeMap::new();
    for student in students {
        groups
            .entry(student.class.as_deref())
            .or_default()
            .push(student);
    }

    // Rank and label use the unrounded term mean; only `means` is rounded.
    let mut classes = Vec::with_capacity(groups.len());
    let mut term_means = Vec::with_capacity(groups.len());
    for (class, members) in groups {
        let means = SUBJECTS
            .iter()
            .map(|&subject| {
                let value = mean(&present_values(&members, subject)).and_then(|m| round_to(m, 2));
                (subject.key(), value)
            })
            .collect();
        term_means.push(mean(&present_values(&members, Subject::TermAverage)));
        classes.push((class.unwrap_or_default().to_string(), Ordered(means)));
    }

    let ranks = rank_desc(&term_means);

    classes
        .into_iter()
        .zip(term_means)
        .zip(ranks)
        .map(|(((class, means), term_mean), rank)| {
            let summary = ClassSummary {
                means,
                rank,
                degree: rank.map(degree),
                appreciation: appreciation(term_mean).to_string(),
            };
            (class, summary)
        })
        .collect()
}
