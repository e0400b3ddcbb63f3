//! Practice dataset parsing.
//!
//! Comma-delimited text with a header row. Columns are matched by name so
//! their order does not matter. Bad rows are skipped, not fatal.

use thiserror::Error;
use tracing::warn;

use super::{normalize_code, validate_identifier_format, DirectoryError, DirectoryResult};
use crate::models::PracticeRecord;

const CODE_COLUMNS: &[&str] = &["code", "ods_code", "odscode"];
const NAME_COLUMNS: &[&str] = &["name", "practice_name"];
const LIST_SIZE_COLUMNS: &[&str] = &["list_size", "listsize", "patients"];
const ADDRESS_COLUMNS: &[&str] = &["address"];

/// Why a single row was rejected.
#[derive(Error, Debug, PartialEq)]
enum RowError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("unterminated quoted field")]
    UnterminatedQuote,

    #[error("invalid ODS code {0:?}")]
    InvalidCode(String),

    #[error("missing practice name")]
    EmptyName,

    #[error("invalid list size {0:?}")]
    InvalidListSize(String),
}

/// Column positions resolved from the header.
struct Columns {
    width: usize,
    code: usize,
    name: usize,
    list_size: usize,
    address: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> DirectoryResult<Self> {
        let find = |names: &[&str]| {
            header
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| DirectoryError::MissingColumn(names[0].to_string()))
        };

        Ok(Self {
            width: header.len(),
            code: require(CODE_COLUMNS)?,
            name: require(NAME_COLUMNS)?,
            list_size: require(LIST_SIZE_COLUMNS)?,
            address: find(ADDRESS_COLUMNS),
        })
    }

    fn record(&self, fields: &[String]) -> Result<PracticeRecord, RowError> {
        if fields.len() != self.width {
            return Err(RowError::FieldCount {
                expected: self.width,
                found: fields.len(),
            });
        }

        let code = &fields[self.code];
        if !validate_identifier_format(code) {
            return Err(RowError::InvalidCode(code.clone()));
        }

        let name = fields[self.name].trim();
        if name.is_empty() {
            return Err(RowError::EmptyName);
        }

        let raw_size = &fields[self.list_size];
        let list_size = raw_size
            .trim()
            .replace(',', "")
            .parse::<u32>()
            .map_err(|_| RowError::InvalidListSize(raw_size.clone()))?;

        let address = self
            .address
            .map(|i| fields[i].trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        Ok(PracticeRecord {
            code: normalize_code(code),
            name: name.to_string(),
            list_size,
            address,
        })
    }
}

/// Parse practice records from delimited text.
///
/// Fails only when there is no header or a required column is missing.
pub fn parse_practices(text: &str) -> DirectoryResult<Vec<PracticeRecord>> {
    let mut lines = text
        .trim_start_matches('\u{feff}')
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(DirectoryError::EmptyDataset)?;
    let header = split_fields(header_line).map_err(|_| DirectoryError::EmptyDataset)?;
    let columns = Columns::from_header(&header)?;

    let mut records = Vec::new();
    for (i, line) in lines {
        match split_fields(line).and_then(|fields| columns.record(&fields)) {
            Ok(record) => records.push(record),
            Err(reason) => warn!(line = i + 1, %reason, "skipping malformed practice row"),
        }
    }

    Ok(records)
}

/// Split one line on commas, honouring double quotes and `""` escapes.
fn split_fields(line: &str) -> Result<Vec<String>, RowError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(RowError::UnterminatedQuote);
    }
    fields.push(current);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("a,b,c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split_fields("a,,c").unwrap(), vec!["a", "", "c"]);
        assert_eq!(
            split_fields(r#"E87005,"Chelsea, Westminster",7200"#).unwrap(),
            vec!["E87005", "Chelsea, Westminster", "7200"]
        );
        assert_eq!(
            split_fields(r#""say ""hi""",x"#).unwrap(),
            vec![r#"say "hi""#, "x"]
        );
        assert_eq!(split_fields(r#""open,x"#), Err(RowError::UnterminatedQuote));
    }

    #[test]
    fn test_parse_reorders_columns_by_header() {
        let csv = "Practice_Name,List_Size,ODS_Code\nClifton Medical Practice,13500,l81002\n";
        let records = parse_practices(csv).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "L81002");
        assert_eq!(records[0].name, "Clifton Medical Practice");
        assert_eq!(records[0].list_size, 13500);
        assert_eq!(records[0].address, None);
    }

    #[test]
    fn test_parse_skips_malformed_rows() {
        let csv = "\
code,name,list_size,address
E87001,The Lister Medical Centre,8500,London
BAD,Too Short Code,1000,Nowhere
E87002,Missing Columns
E87003,Bloomsbury Surgery,lots,London
E87004,,15800,London
\"E87005\",\"Chelsea & Westminster Practice\",\"7,200\",London

Y03001,Manchester Health Centre,9800,
";
        let records = parse_practices(csv).unwrap();
        let codes: Vec<_> = records.iter().map(|p| p.code.as_str()).collect();

        assert_eq!(codes, vec!["E87001", "E87005", "Y03001"]);
        assert_eq!(records[1].list_size, 7200);
        assert_eq!(records[2].address, None);
    }

    #[test]
    fn test_parse_handles_bom_and_crlf() {
        let csv = "\u{feff}code,name,list_size\r\nA84001,Newcastle City Practice,8200\r\n";
        let records = parse_practices(csv).unwrap();
        assert_eq!(records[0].code, "A84001");
        assert_eq!(records[0].list_size, 8200);
    }

    #[test]
    fn test_parse_missing_column_fails() {
        let result = parse_practices("code,name\nE87001,Lister\n");
        assert!(matches!(result, Err(DirectoryError::MissingColumn(c)) if c == "list_size"));
    }

    #[test]
    fn test_parse_empty_text_fails() {
        assert!(matches!(parse_practices(""), Err(DirectoryError::EmptyDataset)));
        assert!(matches!(parse_practices("\n  \n"), Err(DirectoryError::EmptyDataset)));
    }
}
