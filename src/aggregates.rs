use crate::bands::{self, count_percent, MENTIONS};
use crate::category::{is_female, is_letters, is_male, is_repeat, is_science};
use crate::models::{
    BranchCounts, BySex, CountPercent, Ordered, RepeatCounts, SexBreakdown, SexCounts, Student,
    StudentAggregates,
};

fn count_where(students: &[&Student], predicate: impl Fn(&Student) -> bool) -> usize {
    students.iter().filter(|s| predicate(**s)).count()
}

fn sex_breakdown(members: &[&Student], total: usize) -> SexBreakdown {
    let repeat = count_where(members, |s| is_repeat(s.repeat.as_deref()));
    SexBreakdown {
        repeat: count_percent(repeat, total),
        no_repeat: count_percent(members.len() - repeat, total),
        st: count_percent(count_where(members, |s| is_science(s.branch.as_deref())), total),
        letters: count_percent(count_where(members, |s| is_letters(s.branch.as_deref())), total),
    }
}

/// Demographic counts over the whole roster. Every percentage is against
/// the total row count.
pub fn student_aggregates(students: &[Student]) -> StudentAggregates {
    let all: Vec<&Student> = students.iter().collect();
    let total = all.len();

    let males: Vec<&Student> = all
        .iter()
        .copied()
        .filter(|s| is_male(s.sex.as_deref()))
        .collect();
    let females: Vec<&Student> = all
        .iter()
        .copied()
        .filter(|s| is_female(s.sex.as_deref()))
        .collect();
    let repeat = count_where(&all, |s| is_repeat(s.repeat.as_deref()));

    StudentAggregates {
        sex: SexCounts {
            male: count_percent(males.len(), total),
            female: count_percent(females.len(), total),
            total: count_percent(total, total),
        },
        repeat: RepeatCounts {
            repeat: count_percent(repeat, total),
            no_repeat: count_percent(total - repeat, total),
            total: count_percent(total, total),
        },
        branch: BranchCounts {
            st: count_percent(count_where(&all, |s| is_science(s.branch.as_deref())), total),
            letters: count_percent(count_where(&all, |s| is_letters(s.branch.as_deref())), total),
            total: count_percent(total, total),
        },
        by_sex: BySex {
            male: sex_breakdown(&males, total),
            female: sex_breakdown(&females, total),
        },
    }
}

/// Honour-roll bands over the term-average.
pub fn mentions(students: &[Student]) -> Ordered<CountPercent> {
    let averages: Vec<f64> = students.iter().map(|s| s.term_average).collect();
    bands::bucket(&averages, &MENTIONS)
}
