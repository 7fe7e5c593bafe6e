use crate::subject::{RawValue, Subject};
use std::collections::BTreeMap;
use std::io::Read;

/// Reads one exported specialty sheet. Columns are mapped by position through
/// `columns`; reading stops at the first row with an empty name.
pub(crate) fn parse_sheet<R: Read>(
    reader: R,
    profession: &str,
    columns: &BTreeMap<usize, String>,
) -> Result<Vec<Subject>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let name_column = columns
        .iter()
        .find(|(_, field)| field.as_str() == "name")
        .map(|(index, _)| *index);
    let mut subjects = Vec::new();

    let Some(name_column) = name_column else {
        return Ok(subjects);
    };

    for record in csv_reader.records() {
        let row = record?;
        let name = row.get(name_column).unwrap_or_default();
        if name.is_empty() {
            break;
        }

        let mut subject = Subject::new(name, profession);
        for (index, field) in columns {
            if *index == name_column {
                continue;
            }
            let Some(cell) = row.get(*index) else {
                continue;
            };
            if field == "group" {
                if !cell.is_empty() {
                    subject.group = Some(cell.to_string());
                }
                continue;
            }
            if let Some(value) = RawValue::from_cell(cell) {
                subject.set(field, value);
            }
        }
        subjects.push(subject);
    }

    Ok(subjects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> BTreeMap<usize, String> {
        [(0, "name"), (1, "residencyYears"), (3, "startSalary"), (4, "group")]
            .into_iter()
            .map(|(index, field)| (index, field.to_string()))
            .collect()
    }

    #[test]
    fn maps_columns_by_position() {
        let csv = "\
Specialty,Residency,Ignored,Start,Group
Dermatology, 1+3 ,x,350,clinic
Neurosurgery,7,,600,
";
        let subjects = parse_sheet(csv.as_bytes(), "MD/DO", &columns()).expect("sheet parses");

        assert_eq!(subjects.len(), 2);
        let derm = &subjects[0];
        assert_eq!(derm.name, "Dermatology");
        assert_eq!(derm.profession, "MD/DO");
        assert_eq!(derm.group.as_deref(), Some("clinic"));
        assert_eq!(derm.text("residencyYears"), Some("1+3"));
        assert_eq!(derm.number("startSalary"), Some(350.0));
        assert!(derm.field("Ignored").is_none());

        let neuro = &subjects[1];
        assert_eq!(neuro.group, None);
        assert_eq!(neuro.field("residencyYears"), Some(&RawValue::Number(7.0)));
    }

    #[test]
    fn stops_at_first_blank_name() {
        let csv = "\
Specialty,Residency,Ignored,Start
Pediatrics,3,,220
,,,
Notes row,should,not,load
";
        let subjects = parse_sheet(csv.as_bytes(), "MD/DO", &columns()).expect("sheet parses");
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].name, "Pediatrics");
    }

    #[test]
    fn short_rows_skip_missing_cells() {
        let csv = "Specialty,Residency\nFamily Medicine,3\n";
        let subjects = parse_sheet(csv.as_bytes(), "MD/DO", &columns()).expect("sheet parses");
        assert_eq!(subjects.len(), 1);
        assert!(subjects[0].field("startSalary").is_none());
    }
}
