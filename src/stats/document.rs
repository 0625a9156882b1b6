use std::fs;
use std::path::Path;

use crate::error::FlattenError;

/// Marker of the comment line that declares the data table's column names,
/// e.g. `# ColHeaders Index SegId NVoxels Volume_mm3 StructName ...`.
const COL_HEADERS_MARKER: &str = "# ColHeaders";

/// A FreeSurfer stats file split into the parts the flattener cares about:
/// the column names declared by the ColHeaders comment, and the raw
/// whitespace-delimited data lines (everything that is not a `#` comment).
#[derive(Debug)]
pub struct StatsDocument {
    /// Column names from the ColHeaders line, in declaration order, with the
    /// leading `#` and `ColHeaders` tokens already stripped.
    pub column_names: Vec<String>,
    /// Non-comment, non-empty lines in file order. Still untokenized.
    pub data_lines: Vec<String>,
}

/// Read `path` and split it into header-declared column names and data lines.
///
/// Comment lines start with `#`; exactly one of them is expected to start with
/// `# ColHeaders` (the first match wins). Lines are trimmed before the marker
/// check so indented comments still count.
pub fn load_stats_document(path: &Path) -> Result<StatsDocument, FlattenError> {
    let content = fs::read_to_string(path).map_err(|source| FlattenError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let header_line = content
        .lines()
        .find(|line| line.trim().starts_with(COL_HEADERS_MARKER))
        .ok_or_else(|| FlattenError::MissingHeader {
            path: path.to_path_buf(),
        })?;

    // Drop the `#` and `ColHeaders` tokens; the rest are the column names.
    let column_names: Vec<String> = header_line
        .split_whitespace()
        .skip(2)
        .map(str::to_string)
        .collect();

    let data_lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    Ok(StatsDocument {
        column_names,
        data_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_stats(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp stats file");
        file.write_all(content.as_bytes()).expect("write stats");
        file
    }

    #[test]
    fn splits_header_and_data_lines() {
        let file = write_stats(
            "# Title Segmentation Statistics\n\
             # ColHeaders Index SegId StructName Volume_mm3\n\
             1 4 Left-Lateral-Ventricle 7304.9\n\
             # some trailing comment\n\
             2 5 Left-Inf-Lat-Vent 408.3\n",
        );

        let doc = load_stats_document(file.path()).expect("well-formed stats file");
        assert_eq!(
            doc.column_names,
            vec!["Index", "SegId", "StructName", "Volume_mm3"]
        );
        assert_eq!(doc.data_lines.len(), 2);
        assert!(doc.data_lines[0].starts_with("1 4 Left-Lateral-Ventricle"));
    }

    #[test]
    fn indented_header_line_still_counts() {
        let file = write_stats("  # ColHeaders Index SegId StructName\n1 4 CSF\n");
        let doc = load_stats_document(file.path()).expect("indented header");
        assert_eq!(doc.column_names, vec!["Index", "SegId", "StructName"]);
    }

    #[test]
    fn first_colheaders_line_wins() {
        let file = write_stats(
            "# ColHeaders Index SegId StructName\n\
             # ColHeaders Other Names Here\n\
             1 4 CSF\n",
        );
        let doc = load_stats_document(file.path()).expect("duplicate headers");
        assert_eq!(doc.column_names, vec!["Index", "SegId", "StructName"]);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let file = write_stats("# ColHeaders Index SegId StructName\n\n1 4 CSF\n   \n");
        let doc = load_stats_document(file.path()).expect("blank lines");
        assert_eq!(doc.data_lines, vec!["1 4 CSF"]);
    }

    #[test]
    fn missing_header_is_reported_with_path() {
        let file = write_stats("# just a comment\n1 4 CSF\n");
        let err = load_stats_document(file.path()).unwrap_err();
        match &err {
            FlattenError::MissingHeader { path } => assert_eq!(path, file.path()),
            other => panic!("expected MissingHeader, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_path_is_a_file_access_error() {
        let err = load_stats_document(Path::new("no/such/dir/aseg.stats")).unwrap_err();
        assert!(matches!(err, FlattenError::FileAccess { .. }));
    }
}
