use crate::bands::{self, GROUPES, PASS_BANDS, TRANCHES};
use crate::models::{GroupStats, Ordered, Student, Subject, SubjectStats, SUBJECTS};

/// Non-null scores of `subject` across the population.
pub fn present_values(students: &[&Student], subject: Subject) -> Vec<f64> {
    students.iter().filter_map(|s| s.score(subject)).collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor is the value count).
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Coefficient of variation in percent, from the rounded std and mean.
pub fn coefficient_of_variation(std: Option<f64>, mean: Option<f64>) -> Option<f64> {
    match (std, mean) {
        (Some(std), Some(mean)) if mean != 0.0 && mean.is_finite() => {
            bands::round_to(std / mean * 100.0, 1)
        }
        _ => None,
    }
}

pub fn subject_stats(values: &[f64]) -> SubjectStats {
    let present = values.len();
    let mean = mean(values).and_then(|m| bands::round_to(m, 2));
    let std = std_dev(values).and_then(|s| bands::round_to(s, 2));
    let cv = coefficient_of_variation(std, mean);

    let pass = bands::bucket(values, &PASS_BANDS);
    let [ge10, mid, lt8] = [0, 1, 2].map(|i| pass.0[i].1);

    SubjectStats {
        present,
        mean,
        std,
        cv,
        nb_ge10: ge10.count,
        pc_ge10: ge10.percent,
        nb_8_9: mid.count,
        pc_8_9: mid.percent,
        nb_lt8: lt8.count,
        pc_lt8: lt8.percent,
        tranches: bands::bucket(values, &TRANCHES),
        groupes: bands::bucket(values, &GROUPES),
    }
}

/// Statistics for every subject over one population.
pub fn group_stats(name: &str, students: &[&Student]) -> GroupStats {
    let subjects = SUBJECTS
        .iter()
        .map(|&subject| {
            (
                subject.key(),
                subject_stats(&present_values(students, subject)),
            )
        })
        .collect();

    GroupStats {
        group: name.to_string(),
        subjects: Ordered(subjects),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_and_twelve() {
        let stats = subject_stats(&[10.0, 12.0]);
        assert_eq!(stats.present, 2);
        assert_eq!(stats.mean, Some(11.0));
        assert_eq!(stats.std, Some(1.0));
        assert_eq!(stats.cv, Some(9.1));
        assert_eq!((stats.nb_ge10, stats.nb_8_9, stats.nb_lt8), (2, 0, 0));
        assert_eq!(stats.pc_ge10, 100.0);
        assert_eq!(stats.tranches.get("10-11.99").unwrap().count, 1);
        assert_eq!(stats.tranches.get("12-13.99").unwrap().count, 1);
        assert_eq!(stats.groupes.get("G4(12-13.99)").unwrap().count, 1);
    }

    #[test]
    fn empty_subject_has_zero_counts_and_null_moments() {
        let stats = subject_stats(&[]);
        assert_eq!(stats.present, 0);
        assert_eq!((stats.mean, stats.std, stats.cv), (None, None, None));
        assert_eq!((stats.nb_ge10, stats.nb_8_9, stats.nb_lt8), (0, 0, 0));
        assert_eq!((stats.pc_ge10, stats.pc_8_9, stats.pc_lt8), (0.0, 0.0, 0.0));
        assert!(stats
            .tranches
            .0
            .iter()
            .chain(stats.groupes.0.iter())
            .all(|(_, c)| c.count == 0 && c.percent == 0.0));
    }

    #[test]
    fn zero_mean_has_no_cv() {
        let stats = subject_stats(&[0.0, 0.0]);
        assert_eq!(stats.mean, Some(0.0));
        assert_eq!(stats.std, Some(0.0));
        assert_eq!(stats.cv, None);
    }

    #[test]
    fn pass_bands_partition_present() {
        let values = [3.0, 7.99, 8.0, 9.5, 9.99, 10.0, 15.25, 20.0];
        let stats = subject_stats(&values);
        assert_eq!(stats.nb_ge10 + stats.nb_8_9 + stats.nb_lt8, stats.present);
        assert_eq!((stats.nb_ge10, stats.nb_8_9, stats.nb_lt8), (3, 3, 2));
        assert_eq!(stats.pc_8_9, 37.5);
        let binned: usize = stats.tranches.0.iter().map(|(_, c)| c.count).sum();
        assert_eq!(binned, stats.present);
        let grouped: usize = stats.groupes.0.iter().map(|(_, c)| c.count).sum();
        assert_eq!(grouped, stats.present);
    }

    #[test]
    fn std_uses_population_divisor() {
        assert_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), Some(2.0));
        assert_eq!(std_dev(&[]), None);
    }
}
