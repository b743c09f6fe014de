use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use hikegear_catalog::{CellValue, RowKind, SheetRow};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::error::SheetError;

/// Name-cell text that marks a row as the start of a new category.
pub const DEFAULT_CATEGORY_KEYWORD: &str = "kategoria";

const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const WORKBOOK: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const WORKSHEETS: &str = "xl/worksheets/";

/// Number of leading columns read from each row.
const COLUMNS: usize = 3;

/// Options for reading a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOptions {
    /// Exact, case-sensitive name-cell text of a category marker row.
    pub category_keyword: String,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            category_keyword: DEFAULT_CATEGORY_KEYWORD.to_string(),
        }
    }
}

/// Read and classify the rows of the active worksheet of an `.xlsx` workbook.
///
/// The active worksheet is the tab selected when the workbook was saved. Every
/// row present in the sheet is returned, blank ones included, so row limits
/// count what the user sees.
pub fn read_rows<R: Read + Seek>(
    reader: R,
    options: &SheetOptions,
) -> Result<Vec<SheetRow>, SheetError> {
    let mut archive = ZipArchive::new(reader).map_err(|e| {
        log::debug!("Not a zip container: {e}");
        SheetError::not_xlsx()
    })?;

    let shared = match archive.by_name(SHARED_STRINGS) {
        Ok(file) => parse_shared_strings(BufReader::new(file))?,
        Err(zip::result::ZipError::FileNotFound) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    let sheet_name = match active_sheet_part(&mut archive)? {
        Some(part) if archive.file_names().any(|n| n == part) => part,
        _ => first_sheet_name(&archive).ok_or_else(SheetError::not_xlsx)?,
    };
    let sheet = archive.by_name(&sheet_name)?;
    let cells = parse_worksheet(BufReader::new(sheet), &shared)?;

    let rows: Vec<SheetRow> = cells
        .into_iter()
        .map(|row| classify_row(row, &options.category_keyword))
        .collect();

    log::debug!(
        "Read {} row(s) from {} ({} shared strings)",
        rows.len(),
        sheet_name,
        shared.len()
    );
    Ok(rows)
}

/// Read rows from a workbook on disk.
pub fn read_rows_from_path(path: &Path, options: &SheetOptions) -> Result<Vec<SheetRow>, SheetError> {
    let file = std::fs::File::open(path)?;
    read_rows(BufReader::new(file), options)
}

/// Tag a row as a category marker when its name cell is exactly `keyword`.
pub fn classify_row(cells: [CellValue; COLUMNS], keyword: &str) -> SheetRow {
    let [name, description, weight] = cells;
    let kind = if name.as_text() == Some(keyword) {
        RowKind::CategoryMarker
    } else {
        RowKind::Item
    };
    SheetRow {
        kind,
        name,
        description,
        weight,
    }
}

/// Lowest-numbered worksheet part (`sheet2.xml` before `sheet10.xml`).
///
/// Used when the workbook part or its relationships are missing.
fn first_sheet_name<R: Read + Seek>(archive: &ZipArchive<R>) -> Option<String> {
    archive
        .file_names()
        .filter(|n| n.starts_with(WORKSHEETS) && n.ends_with(".xml"))
        .min_by_key(|n| (sheet_number(n).unwrap_or(u32::MAX), n.to_string()))
        .map(str::to_string)
}

fn sheet_number(part: &str) -> Option<u32> {
    part.strip_prefix(WORKSHEETS)?
        .strip_prefix("sheet")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

// ---------------------------------------------------------------------------
// Workbook
// ---------------------------------------------------------------------------

/// Zip part of the active worksheet, as named by the workbook.
fn active_sheet_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Option<String>, SheetError> {
    let (active, sheet_ids) = match archive.by_name(WORKBOOK) {
        Ok(file) => parse_workbook(BufReader::new(file))?,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let Some(sheet_id) = sheet_ids.get(active).or_else(|| sheet_ids.first()) else {
        return Ok(None);
    };

    let targets = match archive.by_name(WORKBOOK_RELS) {
        Ok(file) => parse_relationships(BufReader::new(file))?,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let part = targets
        .into_iter()
        .find(|(id, _)| id == sheet_id)
        .map(|(_, target)| resolve_target(&target));
    log::debug!("Active sheet is tab {} ({:?})", active, part);
    Ok(part)
}

/// Active tab index and the relationship id of every sheet, in tab order.
fn parse_workbook<R: BufRead>(reader: R) -> Result<(usize, Vec<String>), SheetError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut active = 0usize;
    let mut sheet_ids = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"workbookView" => {
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.local_name().as_ref() == b"activeTab" {
                            active = String::from_utf8_lossy(&attr.value).trim().parse().unwrap_or(0);
                        }
                    }
                }
                b"sheet" => {
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.local_name().as_ref() == b"id" {
                            sheet_ids.push(String::from_utf8_lossy(&attr.value).to_string());
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok((active, sheet_ids))
}

/// `(Id, Target)` pairs of a relationships part.
fn parse_relationships<R: BufRead>(reader: R) -> Result<Vec<(String, String)>, SheetError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut relationships = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = Some(String::from_utf8_lossy(&attr.value).to_string()),
                        b"Target" => target = Some(String::from_utf8_lossy(&attr.value).to_string()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    relationships.push((id, target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// Relationship targets are relative to `xl/` unless they start with `/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}

// ---------------------------------------------------------------------------
// Shared string table
// ---------------------------------------------------------------------------

fn parse_shared_strings<R: BufRead>(reader: R) -> Result<Vec<String>, SheetError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    // Phonetic runs repeat the text in another script; skip them.
    let mut in_phonetic = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" => in_text = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(ref e) => {
                if e.local_name().as_ref() == b"si" {
                    strings.push(String::new());
                }
            }
            Event::Text(ref e) => {
                if in_text && !in_phonetic {
                    if let Some(ref mut s) = current {
                        s.push_str(&e.unescape()?);
                    }
                }
            }
            Event::CData(ref e) => {
                if in_text && !in_phonetic {
                    if let Some(ref mut s) = current {
                        s.push_str(&String::from_utf8_lossy(e));
                    }
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"si" => {
                    if let Some(s) = current.take() {
                        strings.push(s);
                    }
                }
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

// ---------------------------------------------------------------------------
// Worksheet
// ---------------------------------------------------------------------------

/// The cell currently being read.
#[derive(Default)]
struct PendingCell {
    column: Option<usize>,
    cell_type: String,
    value: String,
    inline: String,
}

fn parse_worksheet<R: BufRead>(
    reader: R,
    shared: &[String],
) -> Result<Vec<[CellValue; COLUMNS]>, SheetError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut rows = Vec::new();
    let mut current_row: Option<[CellValue; COLUMNS]> = None;
    let mut next_column = 0usize;
    let mut cell: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_inline_text = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    current_row = Some(Default::default());
                    next_column = 0;
                }
                b"c" => {
                    let pending = start_cell(e, next_column)?;
                    next_column = pending.column.map_or(next_column, |c| c.saturating_add(1));
                    cell = Some(pending);
                }
                b"v" => in_value = true,
                b"t" => in_inline_text = true,
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"row" => rows.push(Default::default()),
                // A valueless cell still advances the column position.
                b"c" => {
                    let pending = start_cell(e, next_column)?;
                    next_column = pending.column.map_or(next_column, |c| c.saturating_add(1));
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if let Some(ref mut pending) = cell {
                    if in_value {
                        pending.value.push_str(&e.unescape()?);
                    } else if in_inline_text {
                        pending.inline.push_str(&e.unescape()?);
                    }
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"v" => in_value = false,
                b"t" => in_inline_text = false,
                b"c" => {
                    if let Some(pending) = cell.take() {
                        if let (Some(col), Some(row)) = (pending.column, current_row.as_mut()) {
                            if col < COLUMNS {
                                row[col] = cell_value(&pending, shared)?;
                            }
                        }
                    }
                }
                b"row" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

fn start_cell(e: &BytesStart<'_>, position: usize) -> Result<PendingCell, SheetError> {
    let mut pending = PendingCell {
        column: Some(position),
        ..Default::default()
    };
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"r" => pending.column = column_index(&String::from_utf8_lossy(&attr.value)),
            b"t" => pending.cell_type = String::from_utf8_lossy(&attr.value).to_string(),
            _ => {}
        }
    }
    Ok(pending)
}

/// Zero-based column of a cell reference such as `"B12"` (B → 1).
fn column_index(reference: &str) -> Option<usize> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .map(|b| b.to_ascii_uppercase())
        .collect();
    if letters.is_empty() {
        return None;
    }
    // References too long to fit a usize are far beyond the columns read.
    let number = letters.iter().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?.checked_add(usize::from(b - b'A' + 1))
    });
    Some(number.map_or(usize::MAX, |n| n - 1))
}

fn cell_value(cell: &PendingCell, shared: &[String]) -> Result<CellValue, SheetError> {
    let value = cell.value.trim();
    let parsed = match cell.cell_type.as_str() {
        "s" => {
            let index: usize = value
                .parse()
                .map_err(|_| SheetError::format(format!("invalid shared string index '{value}'")))?;
            let text = shared.get(index).ok_or_else(|| {
                SheetError::format(format!("shared string index {index} out of range"))
            })?;
            CellValue::Text(text.clone())
        }
        "inlineStr" => CellValue::Text(cell.inline.clone()),
        "str" | "d" => CellValue::Text(cell.value.clone()),
        "b" => CellValue::Bool(value == "1"),
        "e" => CellValue::Empty,
        _ if value.is_empty() => CellValue::Empty,
        _ => parse_number(value)?,
    };
    Ok(parsed)
}

/// Numbers written without a decimal point or exponent are integers.
fn parse_number(value: &str) -> Result<CellValue, SheetError> {
    let bad = || SheetError::format(format!("invalid numeric cell '{value}'"));
    if value.contains(['.', 'e', 'E']) {
        return value.parse().map(CellValue::Float).map_err(|_| bad());
    }
    match value.parse::<i64>() {
        Ok(n) => Ok(CellValue::Int(n)),
        Err(_) => value.parse().map(CellValue::Float).map_err(|_| bad()),
    }
}
