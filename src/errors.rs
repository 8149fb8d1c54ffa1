//! Error types produced while turning frame tables into a scene.

use std::fmt;

use thiserror::Error;

/// The three tables a frame workbook must provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    /// Member connectivity rows (start and end node ids).
    Members,
    /// Node position rows (id plus X, Y and Z coordinates).
    Nodes,
    /// Support condition rows (node id plus support type).
    Supports,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Members => "members",
            TableKind::Nodes => "node positions",
            TableKind::Supports => "support conditions",
        };
        f.write_str(name)
    }
}

/// A required table that was not present in the workbook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingTable {
    /// Which table is missing.
    pub kind: TableKind,
    /// The sheet name that was looked up.
    pub sheet: String,
}

impl fmt::Display for MissingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (sheet {:?})", self.kind, self.sheet)
    }
}

/// Error returned when one or more required tables are absent.
///
/// Every missing table is listed, not just the first one found.
///
/// # Examples
///
/// ```
/// use framescene::{build_scene, PipelineConfig, SceneError, TableKind, Workbook};
///
/// let workbook = Workbook::new();
/// let error = build_scene(&workbook, &PipelineConfig::default())
///     .expect_err("empty workbook is rejected");
/// match error {
///     SceneError::MissingTable(missing) => assert_eq!(
///         missing.kinds(),
///         vec![TableKind::Members, TableKind::Nodes, TableKind::Supports]
///     ),
///     other => panic!("unexpected error: {other:?}"),
/// }
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("required table(s) missing: {}", list_tables(.tables))]
pub struct MissingTableError {
    /// The missing tables, in members/nodes/supports order.
    pub tables: Vec<MissingTable>,
}

impl MissingTableError {
    /// Return only the kinds of the missing tables.
    #[must_use]
    pub fn kinds(&self) -> Vec<TableKind> {
        self.tables.iter().map(|table| table.kind).collect()
    }
}

/// Join the missing tables into a human readable list.
fn list_tables(tables: &[MissingTable]) -> String {
    tables
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error returned when a node row cannot be turned into a finite position.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("node row {row} has a malformed {field:?} value: {value}")]
pub struct MalformedNodeError {
    /// Zero-based index of the offending row within the node table.
    pub row: usize,
    /// Column name of the offending cell.
    pub field: String,
    /// The raw cell contents, rendered for display.
    pub value: String,
}

/// Error returned when a scene cannot be built at all.
///
/// Row-level problems such as unknown node ids or zero-length members are not
/// errors; they are counted in [`BuildReport`](crate::BuildReport) instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// Returned when the workbook lacks a required table.
    #[error(transparent)]
    MissingTable(#[from] MissingTableError),
    /// Returned when a node row fails validation under
    /// [`NodeValidation::Reject`](crate::NodeValidation::Reject).
    #[error(transparent)]
    MalformedNode(#[from] MalformedNodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_message_lists_every_table() {
        let error = MissingTableError {
            tables: vec![
                MissingTable {
                    kind: TableKind::Nodes,
                    sheet: "B".to_owned(),
                },
                MissingTable {
                    kind: TableKind::Supports,
                    sheet: "C".to_owned(),
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "required table(s) missing: node positions (sheet \"B\"), support conditions (sheet \"C\")"
        );
        assert_eq!(error.kinds(), vec![TableKind::Nodes, TableKind::Supports]);
    }

    #[test]
    fn scene_error_is_transparent() {
        let error = SceneError::from(MalformedNodeError {
            row: 3,
            field: "X".to_owned(),
            value: "\"abc\"".to_owned(),
        });
        assert_eq!(
            error.to_string(),
            "node row 3 has a malformed \"X\" value: \"abc\""
        );
    }
}
