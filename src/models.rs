use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Graded columns, in report order. The last one is the term-average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    Arabe,
    Amazigh,
    Francais,
    Anglais,
    Islamique,
    Civique,
    HistGeo,
    Math,
    Svt,
    Physique,
    Informatique,
    Arts,
    Musique,
    Sport,
    TermAverage,
}

pub const SUBJECTS: [Subject; 15] = [
    Subject::Arabe,
    Subject::Amazigh,
    Subject::Francais,
    Subject::Anglais,
    Subject::Islamique,
    Subject::Civique,
    Subject::HistGeo,
    Subject::Math,
    Subject::Svt,
    Subject::Physique,
    Subject::Informatique,
    Subject::Arts,
    Subject::Musique,
    Subject::Sport,
    Subject::TermAverage,
];

impl Subject {
    pub fn key(self) -> &'static str {
        match self {
            Subject::Arabe => "arabe",
            Subject::Amazigh => "amazigh",
            Subject::Francais => "francais",
            Subject::Anglais => "anglais",
            Subject::Islamique => "islamique",
            Subject::Civique => "civique",
            Subject::HistGeo => "histGeo",
            Subject::Math => "math",
            Subject::Svt => "svt",
            Subject::Physique => "physique",
            Subject::Informatique => "informatique",
            Subject::Arts => "arts",
            Subject::Musique => "musique",
            Subject::Sport => "sport",
            Subject::TermAverage => "moyenneSem1",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One roster row as read from the sheet, before numeric coercion. Name,
/// birth date and level columns are mapped but never aggregated, so they
/// are not kept.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub numero: Option<String>,
    pub sex: Option<String>,
    pub repeat: Option<String>,
    pub scores: [Option<String>; 15],
    pub branch: Option<String>,
    pub class: Option<String>,
}

/// A cleaned row. Only rows with a numeric term-average become students.
#[derive(Debug, Clone)]
pub struct Student {
    pub sex: Option<String>,
    pub repeat: Option<String>,
    pub grades: [Option<f64>; 14],
    pub term_average: f64,
    pub branch: Option<String>,
    pub class: Option<String>,
}

impl Student {
    pub fn score(&self, subject: Subject) -> Option<f64> {
        match subject {
            Subject::TermAverage => Some(self.term_average),
            other => self.grades[other.index()],
        }
    }
}

/// Map whose entries serialize in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordered<V>(pub Vec<(&'static str, V)>);

impl<V> Ordered<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

impl<V: Serialize> Serialize for Ordered<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountPercent {
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStats {
    pub present: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub cv: Option<f64>,
    pub nb_ge10: usize,
    pub pc_ge10: f64,
    pub nb_8_9: usize,
    pub pc_8_9: f64,
    pub nb_lt8: usize,
    pub pc_lt8: f64,
    pub tranches: Ordered<CountPercent>,
    pub groupes: Ordered<CountPercent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    pub group: String,
    pub subjects: Ordered<SubjectStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub means: Ordered<Option<f64>>,
    pub rank: Option<u32>,
    pub degree: Option<u32>,
    pub appreciation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SexCounts {
    pub male: CountPercent,
    pub female: CountPercent,
    pub total: CountPercent,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepeatCounts {
    pub repeat: CountPercent,
    pub no_repeat: CountPercent,
    pub total: CountPercent,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchCounts {
    pub st: CountPercent,
    pub letters: CountPercent,
    pub total: CountPercent,
}

#[derive(Debug, Clone, Serialize)]
pub struct SexBreakdown {
    pub repeat: CountPercent,
    pub no_repeat: CountPercent,
    pub st: CountPercent,
    pub letters: CountPercent,
}

#[derive(Debug, Clone, Serialize)]
pub struct BySex {
    pub male: SexBreakdown,
    pub female: SexBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentAggregates {
    pub sex: SexCounts,
    pub repeat: RepeatCounts,
    pub branch: BranchCounts,
    pub by_sex: BySex,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub overall: GroupStats,
    pub male: GroupStats,
    pub female: GroupStats,
    pub repeat: GroupStats,
    pub no_repeat: GroupStats,
    pub by_class: BTreeMap<String, ClassSummary>,
    pub students: StudentAggregates,
    pub mentions: Ordered<CountPercent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsDocument {
    pub stats: Stats,
}
