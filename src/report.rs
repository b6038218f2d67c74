use tracing::debug;

use crate::aggregates;
use crate::category::{is_female, is_male, is_repeat};
use crate::models::{Stats, StatsDocument, Student};
use crate::ranking;
use crate::stats::group_stats;

/// Rows of the roster satisfying `predicate`, borrowed from the roster.
pub fn population<'a>(
    students: &'a [Student],
    predicate: impl Fn(&Student) -> bool,
) -> Vec<&'a Student> {
    students.iter().filter(|s| predicate(*s)).collect()
}

pub fn build_stats(students: &[Student]) -> Stats {
    let overall = population(students, |_| true);
    let male = population(students, |s| is_male(s.sex.as_deref()));
    let female = population(students, |s| is_female(s.sex.as_deref()));
    let repeat = population(students, |s| is_repeat(s.repeat.as_deref()));
    let no_repeat = population(students, |s| !is_repeat(s.repeat.as_deref()));

    debug!(
        overall = overall.len(),
        male = male.len(),
        female = female.len(),
        repeat = repeat.len(),
        no_repeat = no_repeat.len(),
        "populations built"
    );

    let by_class = ranking::by_class(students);
    debug!(classes = by_class.len(), "classes ranked");

    Stats {
        overall: group_stats("overall", &overall),
        male: group_stats("male", &male),
        female: group_stats("female", &female),
        repeat: group_stats("repeat", &repeat),
        no_repeat: group_stats("no_repeat", &no_repeat),
        by_class,
        students: aggregates::student_aggregates(students),
        mentions: aggregates::mentions(students),
    }
}

pub fn render(students: &[Student], pretty: bool) -> serde_json::Result<String> {
    let document = StatsDocument {
        stats: build_stats(students),
    };
    if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
}
