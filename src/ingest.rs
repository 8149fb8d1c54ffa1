//! Schema validation between raw spreadsheet rows and typed frame records.
//!
//! The ingestion side hands over a [`Workbook`]: named sheets of rows, each row
//! a map from column name to raw cell value. [`Tables::from_workbook`] checks
//! that the required sheets exist and turns their rows into typed records so
//! the geometry builders never look at column names.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::config::TableSchema;
use crate::errors::{MissingTable, MissingTableError, TableKind};

/// One spreadsheet row: column name to raw cell value.
pub type RawRow = serde_json::Map<String, Value>;

/// Sheets of raw rows as produced by the ingestion collaborator.
///
/// Serializes as a JSON object mapping sheet names to arrays of row objects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workbook {
    /// Rows keyed by sheet name.
    sheets: BTreeMap<String, Vec<RawRow>>,
}

impl Workbook {
    /// Create a workbook with no sheets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet.
    pub fn insert_sheet(&mut self, name: impl Into<String>, rows: Vec<RawRow>) {
        self.sheets.insert(name.into(), rows);
    }

    /// Builder form of [`Workbook::insert_sheet`].
    #[must_use]
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        self.insert_sheet(name, rows);
        self
    }

    /// Rows of the named sheet, if present.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&[RawRow]> {
        self.sheets.get(name).map(Vec::as_slice)
    }

    /// Names of all sheets in sorted order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }
}

/// Build a [`RawRow`] from `(column, value)` pairs.
///
/// # Examples
/// ```
/// use framescene::row;
/// use serde_json::json;
///
/// let node = row([("Node", json!("N1")), ("X", json!(0.0)), ("Y", json!("2.5")), ("Z", json!(0))]);
/// assert_eq!(node["Y"], json!("2.5"));
/// ```
#[must_use]
pub fn row<K, const N: usize>(cells: [(K, Value); N]) -> RawRow
where
    K: Into<String>,
{
    cells
        .into_iter()
        .map(|(column, value)| (column.into(), value))
        .collect()
}

/// A raw cell together with the column it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Column name, kept for error reporting.
    pub column: String,
    /// Raw value; `Null` when the column is absent from the row.
    pub value: Value,
}

impl Cell {
    /// Read `column` from `row`, treating an absent column as blank.
    fn read(row: &RawRow, column: &str) -> Self {
        Self {
            column: column.to_owned(),
            value: row.get(column).cloned().unwrap_or(Value::Null),
        }
    }

    /// Interpret the cell as a node identifier.
    ///
    /// Integral numbers are keyed without a fractional part, so `1` and `1.0`
    /// both become `"1"`. Blank cells yield `None`.
    #[must_use]
    pub fn as_id(&self) -> Option<String> {
        match &self.value {
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number_key(number)),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Interpret the cell as a finite coordinate.
    ///
    /// Numeric strings are trimmed before parsing. Blank, non-numeric and
    /// non-finite cells yield `None`.
    #[must_use]
    pub fn as_coordinate(&self) -> Option<f64> {
        let value = match &self.value {
            Value::Number(number) => number.as_f64()?,
            Value::String(text) => text.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Interpret the cell as free text, blank when empty.
    fn as_text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Render a JSON number the way a spreadsheet key would print it.
fn number_key(number: &serde_json::Number) -> String {
    if let Some(integer) = number.as_i64() {
        return integer.to_string();
    }
    if let Some(integer) = number.as_u64() {
        return integer.to_string();
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() < 1.0e15 => {
            format!("{}", float as i64)
        }
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}

/// A node row after schema validation; coordinates are still raw cells.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRow {
    /// Node identifier cell.
    pub id: Cell,
    /// X coordinate cell.
    pub x: Cell,
    /// Y coordinate cell.
    pub y: Cell,
    /// Z coordinate cell.
    pub z: Cell,
}

impl NodeRow {
    /// Create a row from already-known values, using the default column names.
    ///
    /// # Examples
    /// ```
    /// use framescene::NodeRow;
    ///
    /// let row = NodeRow::new("N1", 1.0, 2.0, 3.0);
    /// assert_eq!(row.id.as_id().as_deref(), Some("N1"));
    /// assert_eq!(row.z.as_coordinate(), Some(3.0));
    /// ```
    #[must_use]
    pub fn new(id: &str, x: f64, y: f64, z: f64) -> Self {
        let schema = TableSchema::default();
        let raw = row([
            (schema.node_id_column.as_str(), Value::from(id)),
            (schema.x_column.as_str(), Value::from(x)),
            (schema.y_column.as_str(), Value::from(y)),
            (schema.z_column.as_str(), Value::from(z)),
        ]);
        Self::from_raw(&raw, &schema)
    }

    /// Pick the node columns out of a raw row.
    #[must_use]
    pub fn from_raw(raw: &RawRow, schema: &TableSchema) -> Self {
        Self {
            id: Cell::read(raw, &schema.node_id_column),
            x: Cell::read(raw, &schema.x_column),
            y: Cell::read(raw, &schema.y_column),
            z: Cell::read(raw, &schema.z_column),
        }
    }

    /// The three coordinate cells in X, Y, Z order.
    #[must_use]
    pub fn coordinates(&self) -> [&Cell; 3] {
        [&self.x, &self.y, &self.z]
    }
}

/// A member joining two nodes by id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberRecord {
    /// Id of the start node; empty when the cell was blank.
    pub start_node: String,
    /// Id of the end node; empty when the cell was blank.
    pub end_node: String,
}

impl MemberRecord {
    /// Create a member between two node ids.
    #[must_use]
    pub fn new(start_node: impl Into<String>, end_node: impl Into<String>) -> Self {
        Self {
            start_node: start_node.into(),
            end_node: end_node.into(),
        }
    }

    /// Pick the member columns out of a raw row.
    #[must_use]
    pub fn from_raw(raw: &RawRow, schema: &TableSchema) -> Self {
        let start = Cell::read(raw, &schema.start_node_column);
        let end = Cell::read(raw, &schema.end_node_column);
        Self::new(
            start.as_id().unwrap_or_default(),
            end.as_id().unwrap_or_default(),
        )
    }
}

/// Boundary condition attached to a node.
///
/// Matching is exact and case sensitive; anything unrecognised is kept
/// verbatim in [`SupportType::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SupportType {
    /// All translations restrained. The only type that gets a marker.
    Fixed,
    /// Pin support.
    Pinned,
    /// Roller support.
    Roller,
    /// Any other label, including blank.
    Other(String),
}

impl SupportType {
    /// The label as it appears in the support table.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SupportType::Fixed => "FIXED",
            SupportType::Pinned => "PINNED",
            SupportType::Roller => "ROLLER",
            SupportType::Other(label) => label,
        }
    }
}

impl From<&str> for SupportType {
    fn from(label: &str) -> Self {
        match label {
            "FIXED" => SupportType::Fixed,
            "PINNED" => SupportType::Pinned,
            "ROLLER" => SupportType::Roller,
            other => SupportType::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for SupportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SupportType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A support condition on a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SupportRecord {
    /// Id of the supported node; empty when the cell was blank.
    pub node_id: String,
    /// Support classification.
    pub support_type: SupportType,
}

impl SupportRecord {
    /// Create a support record.
    #[must_use]
    pub fn new(node_id: impl Into<String>, support_type: SupportType) -> Self {
        Self {
            node_id: node_id.into(),
            support_type,
        }
    }

    /// Pick the support columns out of a raw row.
    #[must_use]
    pub fn from_raw(raw: &RawRow, schema: &TableSchema) -> Self {
        let node = Cell::read(raw, &schema.support_node_column);
        let support_type = Cell::read(raw, &schema.support_type_column).as_text();
        Self::new(
            node.as_id().unwrap_or_default(),
            SupportType::from(support_type.as_str()),
        )
    }
}

/// The three frame tables in typed form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tables {
    /// Member connectivity, in sheet order.
    pub members: Vec<MemberRecord>,
    /// Node rows, in sheet order.
    pub nodes: Vec<NodeRow>,
    /// Support conditions, in sheet order.
    pub supports: Vec<SupportRecord>,
}

impl Tables {
    /// Validate that every required sheet exists, then decode the rows.
    ///
    /// # Errors
    ///
    /// Returns [`MissingTableError`] naming every absent sheet. No rows are
    /// decoded when any sheet is missing.
    pub fn from_workbook(
        workbook: &Workbook,
        schema: &TableSchema,
    ) -> Result<Self, MissingTableError> {
        let lookups = [
            (TableKind::Members, &schema.members_sheet),
            (TableKind::Nodes, &schema.nodes_sheet),
            (TableKind::Supports, &schema.supports_sheet),
        ];
        let missing: Vec<MissingTable> = lookups
            .iter()
            .filter(|(_, sheet)| workbook.sheet(sheet).is_none())
            .map(|(kind, sheet)| MissingTable {
                kind: *kind,
                sheet: (*sheet).clone(),
            })
            .collect();
        if !missing.is_empty() {
            return Err(MissingTableError { tables: missing });
        }

        let rows = |sheet: &str| workbook.sheet(sheet).unwrap_or_default();
        Ok(Self {
            members: rows(&schema.members_sheet)
                .iter()
                .map(|raw| MemberRecord::from_raw(raw, schema))
                .collect(),
            nodes: rows(&schema.nodes_sheet)
                .iter()
                .map(|raw| NodeRow::from_raw(raw, schema))
                .collect(),
            supports: rows(&schema.supports_sheet)
                .iter()
                .map(|raw| SupportRecord::from_raw(raw, schema))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn cell(value: Value) -> Cell {
        Cell {
            column: "X".to_owned(),
            value,
        }
    }

    #[test]
    fn ids_are_normalised() {
        assert_eq!(cell(json!("N1")).as_id().as_deref(), Some("N1"));
        assert_eq!(cell(json!(1)).as_id().as_deref(), Some("1"));
        assert_eq!(cell(json!(1.0)).as_id().as_deref(), Some("1"));
        assert_eq!(cell(json!(2.5)).as_id().as_deref(), Some("2.5"));
        assert_eq!(cell(json!("  ")).as_id(), None);
        assert_eq!(cell(Value::Null).as_id(), None);
    }

    #[test]
    fn coordinates_parse_numbers_and_numeric_text() {
        assert_eq!(cell(json!(3)).as_coordinate(), Some(3.0));
        assert_eq!(cell(json!(" -1.5 ")).as_coordinate(), Some(-1.5));
        assert_eq!(cell(json!("abc")).as_coordinate(), None);
        assert_eq!(cell(json!("")).as_coordinate(), None);
        assert_eq!(cell(json!("inf")).as_coordinate(), None);
        assert_eq!(cell(json!(true)).as_coordinate(), None);
        assert_eq!(cell(Value::Null).as_coordinate(), None);
    }

    #[test]
    fn support_type_matches_exactly() {
        assert_eq!(SupportType::from("FIXED"), SupportType::Fixed);
        assert_eq!(
            SupportType::from("fixed"),
            SupportType::Other("fixed".to_owned())
        );
        assert_eq!(SupportType::from("PINNED"), SupportType::Pinned);
        assert_eq!(SupportType::Roller.to_string(), "ROLLER");
    }

    #[test]
    fn rows_decode_with_default_schema() {
        let schema = TableSchema::default();
        let member = MemberRecord::from_raw(
            &row([("Start Node", json!(1)), ("End Node", json!("2"))]),
            &schema,
        );
        assert_eq!(member, MemberRecord::new("1", "2"));

        let blank = MemberRecord::from_raw(&row([("Start Node", json!("A"))]), &schema);
        assert_eq!(blank, MemberRecord::new("A", ""));

        let support = SupportRecord::from_raw(
            &row([("NodeID", json!("A")), ("SupportType", json!("FIXED"))]),
            &schema,
        );
        assert_eq!(support, SupportRecord::new("A", SupportType::Fixed));

        let untyped = SupportRecord::from_raw(&row([("NodeID", json!("A"))]), &schema);
        assert_eq!(untyped.support_type, SupportType::Other(String::new()));
    }

    #[test]
    fn missing_sheets_are_all_reported() {
        let workbook = Workbook::new().with_sheet("B", Vec::new());
        let error = Tables::from_workbook(&workbook, &TableSchema::default())
            .expect_err("members and supports missing");
        assert_eq!(error.kinds(), vec![TableKind::Members, TableKind::Supports]);
        assert_eq!(error.tables[0].sheet, "A");
    }

    #[test]
    fn empty_sheets_are_accepted() {
        let workbook = Workbook::new()
            .with_sheet("A", Vec::new())
            .with_sheet("B", Vec::new())
            .with_sheet("C", Vec::new());
        let tables =
            Tables::from_workbook(&workbook, &TableSchema::default()).expect("all sheets present");
        assert_eq!(tables, Tables::default());
    }

    #[test]
    fn workbook_deserializes_from_json() {
        let workbook: Workbook = serde_json::from_value(json!({
            "A": [{ "Start Node": "N1", "End Node": "N2" }],
            "B": [],
            "C": []
        }))
        .expect("valid workbook");
        assert_eq!(workbook.sheet_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(workbook.sheet("A").map(<[RawRow]>::len), Some(1));
    }
}
