//! 宣告式的回應解析層。
//!
//! 各端點只描述兩件事：資料容器在回應中的位置（點分路徑，可帶 `..`
//! 遞迴下探前綴）以及欄位表（上游欄位鍵對輸出欄名，有序）。
//! 三種容器形狀各有一個進入點：物件陣列、逗號串接字串陣列、單一物件。
//!
//! 容器缺漏是 [`Error::Parse`]；容器明確為 `null` 代表上游查無資料，
//! 回空表但欄位齊全；單筆資料內缺欄位則是該格 `Null`，不整筆失敗。

use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::record::{RecordSet, Value};

/// 值必須保持字串的欄名，即使內容全是數字。
const IDENTIFIER_COLUMNS: &[&str] = &[
    "代码",
    "股票代码",
    "基金代码",
    "债券代码",
    "正股代码",
    "期货代码",
    "股东代码",
    "行情ID",
    "市场编号",
    "市场类型",
    "板块编号",
    "债券评级",
    "申购代码",
];

pub(crate) fn is_identifier_column(name: &str) -> bool {
    IDENTIFIER_COLUMNS.contains(&name)
}

/// 依點分路徑找到容器。
///
/// 路徑段落 `..key` 表示從當前節點遞迴往下找第一個名為 `key` 的欄位，
/// 其餘段落是一般的物件鍵。
pub(crate) fn locate<'a>(payload: &'a Json, path: &str) -> Option<&'a Json> {
    let mut current = payload;
    for segment in split_path(path) {
        match segment {
            Segment::Key(key) => {
                current = current.get(key)?;
            }
            Segment::Descend(key) => {
                current = descend(current, key)?;
            }
        }
    }
    Some(current)
}

enum Segment<'a> {
    Key(&'a str),
    Descend(&'a str),
}

fn split_path(path: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = path;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix("..") {
            let end = stripped.find('.').unwrap_or(stripped.len());
            segments.push(Segment::Descend(&stripped[..end]));
            rest = &stripped[end..];
        } else if let Some(stripped) = rest.strip_prefix('.') {
            rest = stripped;
        } else {
            let end = rest.find('.').unwrap_or(rest.len());
            segments.push(Segment::Key(&rest[..end]));
            rest = &rest[end..];
        }
    }
    segments
}

/// 寬度優先找第一個名為 `key` 的欄位。
fn descend<'a>(node: &'a Json, key: &str) -> Option<&'a Json> {
    let mut queue = vec![node];
    while !queue.is_empty() {
        let mut next = Vec::new();
        for item in queue {
            match item {
                Json::Object(map) => {
                    if let Some(found) = map.get(key) {
                        return Some(found);
                    }
                    next.extend(map.values());
                }
                Json::Array(items) => next.extend(items.iter()),
                _ => {}
            }
        }
        queue = next;
    }
    None
}

fn expected_columns(fields: &[(&str, &str)]) -> RecordSet {
    RecordSet::with_columns(fields.iter().map(|(_, name)| *name))
}

fn require<'a>(payload: &'a Json, path: &str, context: &str) -> Result<Option<&'a Json>> {
    match locate(payload, path) {
        None => Err(Error::parse(
            context,
            format!("container '{}' not found in response", path),
        )),
        Some(Json::Null) => Ok(None),
        Some(found) => Ok(Some(found)),
    }
}

/// 物件陣列容器（榜單、報表列）。
///
/// 少數端點以物件包物件回傳同樣的資料，此處把物件的值視同陣列元素。
pub(crate) fn rows_of_objects(
    payload: &Json,
    path: &str,
    fields: &[(&str, &str)],
    context: &str,
) -> Result<RecordSet> {
    let mut set = expected_columns(fields);
    let container = match require(payload, path, context)? {
        Some(found) => found,
        None => return Ok(set),
    };

    let items: Vec<&Json> = match container {
        Json::Array(items) => items.iter().collect(),
        Json::Object(map) => map.values().collect(),
        other => {
            return Err(Error::parse(
                context,
                format!("container '{}' is not a list: {}", path, type_name(other)),
            ));
        }
    };

    for item in items {
        let object = item.as_object().ok_or_else(|| {
            Error::parse(context, format!("row in '{}' is not an object", path))
        })?;
        let row = fields
            .iter()
            .map(|(key, name)| match object.get(*key) {
                Some(raw) => Value::coerce(raw, is_identifier_column(name)),
                None => Value::Null,
            })
            .collect();
        set.push_row(row);
    }

    Ok(set)
}

/// 逗號串接字串陣列容器（K 線、資金流、成交明細）。
pub(crate) fn rows_of_csv(
    payload: &Json,
    path: &str,
    fields: &[(&str, &str)],
    context: &str,
) -> Result<RecordSet> {
    let mut set = expected_columns(fields);
    let container = match require(payload, path, context)? {
        Some(found) => found,
        None => return Ok(set),
    };

    let items = container.as_array().ok_or_else(|| {
        Error::parse(
            context,
            format!("container '{}' is not a list: {}", path, type_name(container)),
        )
    })?;

    for item in items {
        let line = item.as_str().ok_or_else(|| {
            Error::parse(context, format!("row in '{}' is not a string", path))
        })?;
        let cells: Vec<&str> = line.split(',').collect();
        let row = fields
            .iter()
            .enumerate()
            .map(|(i, (_, name))| match cells.get(i) {
                Some(cell) => Value::from_text(cell, is_identifier_column(name)),
                None => Value::Null,
            })
            .collect();
        set.push_row(row);
    }

    Ok(set)
}

/// 單一物件容器（個別證券基本資料）。
pub(crate) fn single_object(
    payload: &Json,
    path: &str,
    fields: &[(&str, &str)],
    context: &str,
) -> Result<RecordSet> {
    let mut set = expected_columns(fields);
    let container = match require(payload, path, context)? {
        Some(found) => found,
        None => return Ok(set),
    };

    let object = container.as_object().ok_or_else(|| {
        Error::parse(
            context,
            format!("container '{}' is not an object: {}", path, type_name(container)),
        )
    })?;

    let row = fields
        .iter()
        .map(|(key, name)| match object.get(*key) {
            Some(raw) => Value::coerce(raw, is_identifier_column(name)),
            None => Value::Null,
        })
        .collect();
    set.push_row(row);

    Ok(set)
}

/// 收集整份回應中所有名為 `key` 的字串值，依文件順序。
pub(crate) fn collect_strings(payload: &Json, key: &str) -> Vec<String> {
    let mut found = Vec::new();
    walk(payload, key, &mut found);
    found
}

fn walk(node: &Json, key: &str, found: &mut Vec<String>) {
    match node {
        Json::Object(map) => {
            for (name, value) in map {
                if name == key {
                    if let Some(s) = value.as_str() {
                        found.push(s.to_string());
                    }
                }
                walk(value, key, found);
            }
        }
        Json::Array(items) => {
            for item in items {
                walk(item, key, found);
            }
        }
        _ => {}
    }
}

fn type_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    const QUOTE_FIELDS: &[(&str, &str)] = &[
        ("f12", "代码"),
        ("f14", "名称"),
        ("f2", "最新价"),
        ("f3", "涨跌幅"),
    ];

    const KLINE_FIELDS: &[(&str, &str)] = &[
        ("f51", "日期"),
        ("f52", "开盘"),
        ("f53", "收盘"),
        ("f54", "最高"),
        ("f55", "最低"),
    ];

    #[test]
    fn test_rows_of_objects() {
        let payload = json!({
            "data": {
                "total": 2,
                "diff": [
                    {"f12": "600519", "f14": "贵州茅台", "f2": 1685.0, "f3": "-0.52"},
                    {"f12": "000001", "f14": "平安银行", "f2": "-", "f3": 1.2}
                ]
            }
        });

        let set = rows_of_objects(&payload, "data.diff", QUOTE_FIELDS, "quote list").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.columns(), &["代码", "名称", "最新价", "涨跌幅"]);
        assert_eq!(set.get(0, "代码"), Some(&Value::Text("600519".to_string())));
        assert_eq!(set.get(0, "最新价"), Some(&Value::Number(dec!(1685.0))));
        assert_eq!(set.get(1, "最新价"), Some(&Value::Null));
        assert_eq!(set.get(1, "涨跌幅"), Some(&Value::Number(dec!(1.2))));
    }

    #[test]
    fn test_rows_of_objects_keyed_container() {
        let payload = json!({
            "data": {
                "diff": {
                    "0": {"f12": "600519", "f14": "贵州茅台", "f2": 1685.0, "f3": 0.1}
                }
            }
        });

        let set = rows_of_objects(&payload, "data.diff", QUOTE_FIELDS, "quote list").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0, "名称"), Some(&Value::Text("贵州茅台".to_string())));
    }

    #[test]
    fn test_rows_of_csv_with_descend() {
        let payload = json!({
            "rc": 0,
            "data": {
                "code": "600519",
                "klines": [
                    "2024-01-02,1685.00,1697.50,1702.00,1680.11",
                    "2024-01-03,1695.00,1690.00,1700.00,-"
                ]
            }
        });

        let set = rows_of_csv(&payload, "..klines", KLINE_FIELDS, "kline").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0, "日期"), Some(&Value::Text("2024-01-02".to_string())));
        assert_eq!(set.get(0, "收盘"), Some(&Value::Number(dec!(1697.50))));
        assert_eq!(set.get(1, "最低"), Some(&Value::Null));
    }

    #[test]
    fn test_null_container_is_empty_set() {
        let payload = json!({"data": null});
        let set = rows_of_csv(&payload, "data", KLINE_FIELDS, "kline").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.columns().len(), KLINE_FIELDS.len());
    }

    #[test]
    fn test_missing_container_is_parse_error() {
        let payload = json!({"rc": 0});
        let result = rows_of_objects(&payload, "data.diff", QUOTE_FIELDS, "quote list");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let payload = json!({"data": {"diff": "not-a-list"}});
        let result = rows_of_objects(&payload, "data.diff", QUOTE_FIELDS, "quote list");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_single_object() {
        let payload = json!({
            "data": {"f57": "600519", "f58": "贵州茅台", "f162": 32.78}
        });
        let fields: &[(&str, &str)] =
            &[("f57", "代码"), ("f58", "名称"), ("f162", "市盈率(动)"), ("f999", "缺失")];

        let set = single_object(&payload, "data", fields, "base info").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0, "市盈率(动)"), Some(&Value::Number(dec!(32.78))));
        assert_eq!(set.get(0, "缺失"), Some(&Value::Null));
    }

    #[test]
    fn test_collect_strings() {
        let payload = json!({
            "Result": {
                "list": [
                    {"BaoGaoQi": "2024-03-31", "x": 1},
                    {"BaoGaoQi": "2023-12-31", "x": 2}
                ]
            }
        });
        assert_eq!(
            collect_strings(&payload, "BaoGaoQi"),
            vec!["2024-03-31".to_string(), "2023-12-31".to_string()]
        );
        assert!(collect_strings(&payload, "nope").is_empty());
    }

    #[test]
    fn test_locate_plain_path() {
        let payload = json!({"a": {"b": {"c": 1}}});
        assert_eq!(locate(&payload, "a.b.c"), Some(&json!(1)));
        assert_eq!(locate(&payload, "a.x"), None);
        assert_eq!(locate(&payload, "..c"), Some(&json!(1)));
    }
}
