use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>plecak</t></is></c><c r="B1" t="inlineStr"><is><t>OMW</t></is></c><c r="C1"><v>110</v></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>kategoria</t></is></c><c r="B2" t="inlineStr"><is><t>Sen</t></is></c></row>
<row r="3"><c r="A3" t="inlineStr"><is><t>karimata</t></is></c><c r="B3" t="inlineStr"><is><t>decathlon</t></is></c><c r="C3"><v>11</v></c></row>
</sheetData></worksheet>"#;

fn write_workbook(path: &Path) {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("xl/worksheets/sheet1.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(SHEET.as_bytes()).unwrap();
    fs::write(path, zip.finish().unwrap().into_inner()).unwrap();
}

fn hikegear(tmp: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hikegear"))
        .arg("--config")
        .arg(tmp.path().join("config.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("HIKEGEAR_MAX_ATTEMPTS")
        .env_remove("HIKEGEAR_TIMEOUT_SECS")
        .env_remove("HIKEGEAR_IMPORT_LABEL")
        .output()
        .unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn import_sheet_creates_gear_list() {
    let tmp = TempDir::new().unwrap();
    let xlsx = tmp.path().join("gear.xlsx");
    let gear = tmp.path().join("private.json");
    write_workbook(&xlsx);

    let out = hikegear(
        &tmp,
        &["import-sheet", xlsx.to_str().unwrap(), "--gear", gear.to_str().unwrap()],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let list = read_json(&gear);
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "importowane z pliku excel");
    assert_eq!(list[0]["items"][0]["name"], "plecak");
    assert_eq!(list[1]["name"], "Sen");
    assert_eq!(list[1]["items"][0]["weight"], 11);
}

#[test]
fn dry_run_leaves_gear_list_untouched() {
    let tmp = TempDir::new().unwrap();
    let xlsx = tmp.path().join("gear.xlsx");
    let gear = tmp.path().join("private.json");
    write_workbook(&xlsx);

    let out = hikegear(
        &tmp,
        &["import-sheet", xlsx.to_str().unwrap(), "--gear", gear.to_str().unwrap(), "--dry-run"],
    );
    assert!(out.status.success());
    assert!(!gear.exists());
}

#[test]
fn import_label_comes_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let xlsx = tmp.path().join("gear.xlsx");
    let gear = tmp.path().join("private.json");
    write_workbook(&xlsx);
    fs::write(
        tmp.path().join("config.toml"),
        "[import]\ncategory_label = \"from sheet\"\n",
    )
    .unwrap();

    let out = hikegear(
        &tmp,
        &["import-sheet", xlsx.to_str().unwrap(), "--gear", gear.to_str().unwrap()],
    );
    assert!(out.status.success());
    assert_eq!(read_json(&gear)[0]["name"], "from sheet");
}

#[test]
fn non_workbook_fails() {
    let tmp = TempDir::new().unwrap();
    let bogus = tmp.path().join("gear.xlsx");
    fs::write(&bogus, "name,description,weight\n").unwrap();

    let out = hikegear(
        &tmp,
        &["import-sheet", bogus.to_str().unwrap(), "--gear", "unused.json"],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains(".xlsx"));
}

#[test]
fn copy_backpack_respects_sharing() {
    let tmp = TempDir::new().unwrap();
    let record = tmp.path().join("backpack.json");
    let copy = tmp.path().join("copy.json");
    fs::write(
        &record,
        r#"{"id": 4, "owner": 1, "name": "Alps", "description": "", "list": [], "shared": false}"#,
    )
    .unwrap();

    let args = |requester: &'static str| {
        vec![
            "copy-backpack".to_string(),
            record.to_str().unwrap().to_string(),
            "--requester".to_string(),
            requester.to_string(),
            "--out".to_string(),
            copy.to_str().unwrap().to_string(),
        ]
    };

    let denied = args("2");
    let denied: Vec<&str> = denied.iter().map(String::as_str).collect();
    let out = hikegear(&tmp, &denied);
    assert!(!out.status.success());
    assert!(!copy.exists());

    let owner = args("1");
    let owner: Vec<&str> = owner.iter().map(String::as_str).collect();
    let out = hikegear(&tmp, &owner);
    assert!(out.status.success());
    assert_eq!(read_json(&copy)["name"], "Alps");
}

#[test]
fn config_path_prints_override() {
    let tmp = TempDir::new().unwrap();
    let out = hikegear(&tmp, &["config", "path"]);
    assert!(out.status.success());
    let printed = String::from_utf8_lossy(&out.stdout);
    assert!(printed.trim().ends_with("config.toml"));
}
