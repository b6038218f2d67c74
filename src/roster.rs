use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::RosterError;
use crate::models::{RawRecord, Student, SUBJECTS};

pub const DEFAULT_SHEET: &str = "PremièreTrimestre";

/// Logical columns of the roster, in sheet order.
pub const COLUMNS: [&str; 23] = [
    "numero",
    "nomPrenom",
    "dateNaissance",
    "sexe",
    "redouble",
    "arabe",
    "amazigh",
    "francais",
    "anglais",
    "islamique",
    "civique",
    "histGeo",
    "math",
    "svt",
    "physique",
    "informatique",
    "arts",
    "musique",
    "sport",
    "moyenneSem1",
    "branche",
    "classe",
    "niveau",
];

const ARABIC_HEADERS: [(&str, &str); 23] = [
    ("الرقم", "numero"),
    ("اللقب و الاسم", "nomPrenom"),
    ("تاريخ الميلاد", "dateNaissance"),
    ("الجنس", "sexe"),
    ("الإعادة", "redouble"),
    ("اللغة العربية", "arabe"),
    ("اللغة اﻷمازيغية", "amazigh"),
    ("اللغة الفرنسية", "francais"),
    ("اللغة الإنجليزية", "anglais"),
    ("التربية الإسلامية", "islamique"),
    ("التربية المدنية", "civique"),
    ("التاريخ والجغرافيا", "histGeo"),
    ("الرياضيات", "math"),
    ("ع الطبيعة و الحياة", "svt"),
    ("ع الفيزيائية والتكنولوجيا", "physique"),
    ("المعلوماتية", "informatique"),
    ("التربية التشكيلية", "arts"),
    ("التربية الموسيقية", "musique"),
    ("ت البدنية و الرياضية", "sport"),
    ("معدل الفصل", "moyenneSem1"),
    ("الشعبة", "branche"),
    ("القسم", "classe"),
    ("المستوى", "niveau"),
];

// Position of the first subject column inside COLUMNS.
const FIRST_SCORE_COLUMN: usize = 5;

/// Reads the requested sheet and returns the cleaned roster.
pub fn load(source: &Path, sheet: Option<&str>) -> Result<Vec<Student>, RosterError> {
    let path = resolve_sheet(source, sheet)?;
    info!(sheet = %path.display(), "reading roster");

    let file = std::fs::File::open(&path).map_err(|source| RosterError::Io {
        path: path.clone(),
        source,
    })?;
    let raw = read_records(file).map_err(|source| RosterError::Csv {
        path: path.clone(),
        source,
    })?;

    let read = raw.len();
    let students = clean(raw);
    info!(
        rows = read,
        kept = students.len(),
        dropped = read - students.len(),
        "roster cleaned"
    );
    Ok(students)
}

/// A directory holds one CSV export per sheet; a single file is a
/// one-sheet workbook named after its stem.
pub fn resolve_sheet(source: &Path, sheet: Option<&str>) -> Result<PathBuf, RosterError> {
    let metadata = std::fs::metadata(source).map_err(|err| RosterError::Io {
        path: source.to_path_buf(),
        source: err,
    })?;

    if metadata.is_dir() {
        let sheet = sheet.unwrap_or(DEFAULT_SHEET);
        let candidate = source.join(format!("{sheet}.csv"));
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(RosterError::SheetNotFound {
            sheet: sheet.to_string(),
            path: source.to_path_buf(),
        });
    }

    match sheet {
        Some(requested) if source.file_stem().and_then(|s| s.to_str()) != Some(requested) => {
            Err(RosterError::SheetNotFound {
                sheet: requested.to_string(),
                path: source.to_path_buf(),
            })
        }
        _ => Ok(source.to_path_buf()),
    }
}

pub fn canonical_header(header: &str) -> &str {
    let header = header.trim_start_matches('\u{feff}').trim();
    ARABIC_HEADERS
        .iter()
        .find(|(arabic, _)| *arabic == header)
        .map(|(_, logical)| *logical)
        .unwrap_or(header)
}

pub fn read_records<R: Read>(input: R) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| canonical_header(h).to_string())
        .collect();

    let positions: Vec<Option<usize>> = COLUMNS
        .iter()
        .map(|column| headers.iter().position(|h| h == column))
        .collect();

    for (column, position) in COLUMNS.iter().zip(&positions) {
        match position {
            Some(idx) => debug!(column, position = idx, "column mapped"),
            None => info!(column, "column missing, filled with nulls"),
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        // Blank cells are null; other text is kept exactly as written.
        let cell = |column: usize| -> Option<String> {
            positions[column]
                .and_then(|idx| row.get(idx))
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string)
        };

        records.push(RawRecord {
            numero: cell(0),
            sex: cell(3),
            repeat: cell(4),
            scores: std::array::from_fn(|i| cell(FIRST_SCORE_COLUMN + i)),
            branch: cell(20),
            class: cell(21),
        });
    }

    Ok(records)
}

/// Unparseable or non-finite text is treated as a missing grade.
pub fn parse_score(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub fn clean(raw: Vec<RawRecord>) -> Vec<Student> {
    let term_index = SUBJECTS.len() - 1;

    raw.into_iter()
        .filter_map(|record| {
            let Some(term_average) = parse_score(record.scores[term_index].as_deref()) else {
                debug!(numero = ?record.numero, "row dropped, no term-average");
                return None;
            };
            Some(Student {
                grades: std::array::from_fn(|i| parse_score(record.scores[i].as_deref())),
                term_average,
                sex: record.sex,
                repeat: record.repeat,
                branch: record.branch,
                class: record.class,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subject;

    #[test]
    fn maps_arabic_headers() {
        assert_eq!(canonical_header("معدل الفصل"), "moyenneSem1");
        assert_eq!(canonical_header("\u{feff}الرقم"), "numero");
        assert_eq!(canonical_header(" math "), "math");
        assert_eq!(canonical_header("unknown"), "unknown");
    }

    #[test]
    fn parses_scores_leniently() {
        assert_eq!(parse_score(Some(" 12.5 ")), Some(12.5));
        assert_eq!(parse_score(Some("abs")), None);
        assert_eq!(parse_score(Some("12,5")), None);
        assert_eq!(parse_score(Some("NaN")), None);
        assert_eq!(parse_score(None), None);
    }

    #[test]
    fn missing_columns_are_null_and_bad_rows_dropped() {
        let csv = "numero,sexe,math,moyenneSem1,classe\n\
                   1,M,14,16.5,1AM1\n\
                   2,F,x,9.5,\n\
                   3,F,11,abs,1AM1\n";
        let raw = read_records(csv.as_bytes()).unwrap();
        assert_eq!(raw.len(), 3);
        assert!(raw[0].branch.is_none());

        let students = clean(raw);
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].score(Subject::Math), Some(14.0));
        assert_eq!(students[0].score(Subject::Arabe), None);
        assert_eq!(students[1].score(Subject::Math), None);
        assert_eq!(students[1].class, None);
        assert_eq!(students[1].score(Subject::TermAverage), Some(9.5));
    }

    #[test]
    fn cell_text_is_kept_verbatim() {
        let csv = "sexe,redouble,moyenneSem1,classe\n m ,oui ,12,1AM1 \n   ,,13,\n";
        let students = clean(read_records(csv.as_bytes()).unwrap());
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].sex.as_deref(), Some(" m "));
        assert_eq!(students[0].repeat.as_deref(), Some("oui "));
        assert_eq!(students[0].class.as_deref(), Some("1AM1 "));
        assert_eq!(students[1].sex, None);
        assert!(!crate::category::is_male(students[0].sex.as_deref()));
    }

    #[test]
    fn arabic_sheet_is_read() {
        let csv = "الرقم,الجنس,الرياضيات,معدل الفصل,القسم\n7,ذكر,13,12.25,2AM3\n";
        let students = clean(read_records(csv.as_bytes()).unwrap());
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].sex.as_deref(), Some("ذكر"));
        assert_eq!(students[0].class.as_deref(), Some("2AM3"));
        assert_eq!(students[0].score(Subject::Math), Some(13.0));
    }

    #[test]
    fn resolves_sheet_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join(format!("{DEFAULT_SHEET}.csv"));
        std::fs::write(&sheet, "moyenneSem1\n12\n").unwrap();

        assert_eq!(resolve_sheet(dir.path(), None).unwrap(), sheet);
        let missing = resolve_sheet(dir.path(), Some("Trimestre2"));
        assert!(matches!(missing, Err(RosterError::SheetNotFound { .. })));
    }

    #[test]
    fn file_source_checks_requested_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Trimestre2.csv");
        std::fs::write(&file, "moyenneSem1\n12\n").unwrap();

        assert_eq!(resolve_sheet(&file, None).unwrap(), file);
        assert_eq!(resolve_sheet(&file, Some("Trimestre2")).unwrap(), file);
        assert!(matches!(
            resolve_sheet(&file, Some("Other")),
            Err(RosterError::SheetNotFound { .. })
        ));
        assert_eq!(load(&file, None).unwrap().len(), 1);
    }

    #[test]
    fn unreadable_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(&dir.path().join("nope.csv"), None);
        assert!(matches!(result, Err(RosterError::Io { .. })));
    }
}
