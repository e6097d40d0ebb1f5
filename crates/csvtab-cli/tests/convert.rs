//! Integration tests for batch conversion.

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

use csvtab_cli::convert::{ConvertConfig, ConvertMode, NameCase, run_convert};
use csvtab_ingest::SourceEncoding;

const ITEMS: &str = "Items\nid,name,price\nint,string,float\n1,apple,1.5\n2,pear,x\n";
const BUFFS: &str = "Buffs\nid,active\nint,bool\n10,true\n";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read output");
    serde_json::from_str(&text).expect("parse output")
}

fn utf8_config(source: &Path) -> ConvertConfig {
    ConvertConfig::new(source).with_encoding(SourceEncoding::Utf8)
}

#[test]
fn directory_converts_each_file_into_output_directory() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "item_list.csv", ITEMS);
    write(src.path(), "buff.csv", BUFFS);
    write(src.path(), "readme.txt", "not a table");

    let result = run_convert(&utf8_config(src.path()).with_output(out.path().join("json")))
        .expect("convert");

    assert_eq!(result.tables.len(), 2);
    assert_eq!(result.total_rows(), 3);
    assert!(result.combined_output.is_none());

    let items = read_json(&out.path().join("json").join("item_list.json"));
    assert_eq!(
        items,
        json!([
            {"id": 1, "name": "apple", "price": 1.5},
            {"id": 2, "name": "pear", "price": 0.0}
        ])
    );
    let buffs = read_json(&out.path().join("json").join("buff.json"));
    assert_eq!(buffs, json!([{"id": 10, "active": "true"}]));
}

#[test]
fn combined_output_maps_table_names_to_rows() {
    let src = TempDir::new().unwrap();
    write(src.path(), "item_list.csv", ITEMS);
    write(src.path(), "buff.csv", BUFFS);
    let target = src.path().join("out").join("all.cson");

    let result = run_convert(
        &utf8_config(src.path())
            .with_output(&target)
            .with_mode(ConvertMode::Lines)
            .with_name_case(NameCase::Pascal),
    )
    .expect("convert");

    assert_eq!(result.combined_output.as_deref(), Some(target.as_path()));
    let all = read_json(&target);
    assert_eq!(all["Buff"][0], json!(["Buffs"]));
    assert_eq!(all["ItemList"].as_array().map(Vec::len), Some(5));
    assert_eq!(all["ItemList"][4], json!(["2", "pear", "x"]));
}

#[test]
fn single_file_defaults_to_its_own_directory() {
    let src = TempDir::new().unwrap();
    write(src.path(), "buff.csv", BUFFS);

    let result = run_convert(&utf8_config(&src.path().join("buff.csv"))).expect("convert");

    assert_eq!(result.tables[0].output, src.path().join("buff.json"));
    assert!(src.path().join("buff.json").is_file());
}

#[test]
fn text_mode_wraps_each_file_in_its_table_name() {
    let src = TempDir::new().unwrap();
    write(src.path(), "buff.csv", BUFFS);

    run_convert(&utf8_config(src.path()).with_mode(ConvertMode::Text)).expect("convert");

    let buff = read_json(&src.path().join("buff.json"));
    assert_eq!(buff, json!({ "buff": BUFFS }));
}

#[test]
fn gbk_is_the_default_encoding() {
    let src = TempDir::new().unwrap();
    // "物品\nid,name\nint,string\n1,名称\n" encoded as GBK
    let mut bytes = vec![0xce, 0xef, 0xc6, 0xb7];
    bytes.extend_from_slice(b"\nid,name\nint,string\n1,");
    bytes.extend_from_slice(&[0xc3, 0xfb, 0xb3, 0xc6]);
    bytes.push(b'\n');
    fs::write(src.path().join("goods.csv"), bytes).unwrap();

    run_convert(&ConvertConfig::new(src.path())).expect("convert");

    let goods = read_json(&src.path().join("goods.json"));
    assert_eq!(goods, json!([{"id": 1, "name": "名称"}]));
}

#[test]
fn first_bad_file_halts_the_batch() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "a_short.csv", "title\nid\n");
    write(src.path(), "b_good.csv", BUFFS);

    let err = run_convert(&utf8_config(src.path()).with_output(out.path())).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("a_short.csv"), "{message}");
    assert!(message.contains("fewer than 3"), "{message}");
    assert!(!out.path().join("b_good.json").exists());
}

#[test]
fn missing_source_is_an_error() {
    let src = TempDir::new().unwrap();
    let result = run_convert(&utf8_config(&src.path().join("nope")));
    assert!(result.is_err());
}

#[test]
fn non_finite_float_halts_records_mode() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "rates.csv", "Rates\nid,rate\nint,float\n1,0.5\n2,nan\n");

    let err = run_convert(&utf8_config(src.path()).with_output(out.path())).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("rates.csv"), "{message}");
    assert!(message.contains("data row 2 field \"rate\""), "{message}");
    assert!(!out.path().join("rates.json").exists());
}
