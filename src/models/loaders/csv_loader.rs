use crate::error::{AppResult, FileError};
use crate::models::roster::RosterLine;
use std::path::Path;
use tracing::warn;

/// 读取 CSV 名单
///
/// 第一行无条件当作表头丢弃，不校验列名。各行列数可以不同。
/// 无法解码的记录记一条警告后跳过。
pub fn load_roster(csv_path: &Path) -> AppResult<Vec<RosterLine>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(csv_path)
        .map_err(|source| FileError::CsvReadFailed {
            path: csv_path.to_path_buf(),
            source,
        })?;

    let mut lines = Vec::new();
    // 行号取记录在文件中的起始行，空行也计数；表头占第 1 行
    for (idx, record) in reader.records().enumerate() {
        match record {
            Ok(record) => {
                let line_number = start_line(record.position()).unwrap_or(idx + 2);
                lines.push(RosterLine::new(line_number, record.iter()));
            }
            Err(e) => {
                let line_number = start_line(e.position()).unwrap_or(idx + 2);
                warn!("[第 {} 行] ⚠️ 无法解析，已跳过: {}", line_number, e);
            }
        }
    }

    Ok(lines)
}

fn start_line(position: Option<&csv::Position>) -> Option<usize> {
    position.map(|p| p.line() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_dropped_and_rows_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        std::fs::write(
            &path,
            "Name,Schema,x,Email,a,b,c,RobloxUsername\n\
             Jane Doe,Eng,,jane@co,,,,janedoe\n\
             \"Smith, Al\",Ops\n",
        )
        .unwrap();

        let lines = load_roster(&path).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 2);
        assert_eq!(lines[0].fields[7], "janedoe");
        assert_eq!(lines[1].line_number, 3);
        assert_eq!(lines[1].fields, vec!["Smith, Al", "Ops"]);
    }

    #[test]
    fn test_blank_lines_keep_file_line_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        std::fs::write(
            &path,
            "Name,Schema,x,Email\n\
             Jane Doe,Eng,,jane@co\n\
             \n\
             Bob Smith,Ops,,bob@co\n",
        )
        .unwrap();

        let lines = load_roster(&path).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 2);
        assert_eq!(lines[1].line_number, 4);
        assert_eq!(lines[1].fields[0], "Bob Smith");
    }

    #[test]
    fn test_header_only_file_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        std::fs::write(&path, "Name,Schema,x,Email\n").unwrap();

        assert!(load_roster(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_roster(&dir.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("CSV读取失败"));
    }
}
