use std::fmt;

use rust_decimal::Decimal;

use crate::util::text;

/// 表格內的單一欄位值。
///
/// 上游回傳的數字、看起來像數字的字串都會轉成 [`Value::Number`]；
/// 缺漏或 `-` / `--` 之類的佔位符一律是 [`Value::Null`]，不會讓整筆資料失敗。
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Decimal),
    Text(String),
    Null,
}

impl Value {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Number(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// 將上游 JSON 純量轉成欄位值。
    ///
    /// `keep_text` 用於代碼類欄位（股票代碼、市場編號等），
    /// 這類欄位即使全是數字也必須維持字串，避免 "000001" 變成 1。
    pub(crate) fn coerce(raw: &serde_json::Value, keep_text: bool) -> Value {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Number(n) => {
                if keep_text {
                    return Value::Text(n.to_string());
                }
                match text::to_decimal(&n.to_string()) {
                    Some(d) => Value::Number(d),
                    None => Value::Text(n.to_string()),
                }
            }
            serde_json::Value::String(s) => Value::from_text(s, keep_text),
            serde_json::Value::Bool(b) => Value::Text(b.to_string()),
            other => Value::Text(other.to_string()),
        }
    }

    /// K 線這類以逗號串接的欄位走這裡。
    pub(crate) fn from_text(s: &str, keep_text: bool) -> Value {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "-" || trimmed == "--" {
            return Value::Null;
        }
        if keep_text {
            return Value::Text(trimmed.to_string());
        }
        match text::to_decimal(trimmed) {
            Some(d) => Value::Number(d),
            None => Value::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(d) => write!(f, "{}", d),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => write!(f, ""),
        }
    }
}

/// 正規化後的表格資料：有序欄位加上逐列的值。
///
/// 各 facade 回傳的就是這個型別，回傳後由呼叫端持有，
/// 不會再被本函式庫改動。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RecordSet {
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecordSet {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 依列序號與欄名取值。
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    pub(crate) fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// 在指定位置插入一個所有列同值的欄位（例如把代碼、名稱補到最前面）。
    pub(crate) fn insert_column(&mut self, index: usize, name: impl Into<String>, value: Value) {
        let index = index.min(self.columns.len());
        self.columns.insert(index, name.into());
        for row in &mut self.rows {
            row.insert(index, value.clone());
        }
    }

    /// 在尾端加上一個逐列計算好的欄位。
    pub(crate) fn append_column(&mut self, name: impl Into<String>, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// 以新值整欄覆蓋，欄位不存在時不動作。
    pub(crate) fn replace_column(&mut self, name: &str, values: Vec<Value>) {
        if let Some(idx) = self.column_index(name) {
            debug_assert_eq!(values.len(), self.rows.len());
            for (row, value) in self.rows.iter_mut().zip(values) {
                row[idx] = value;
            }
        }
    }

    pub(crate) fn remove_column(&mut self, name: &str) {
        if let Some(idx) = self.column_index(name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    pub(crate) fn rename_column(&mut self, from: &str, to: impl Into<String>) {
        if let Some(idx) = self.column_index(from) {
            self.columns[idx] = to.into();
        }
    }

    /// 只保留指定欄位並照給定順序排列。
    pub(crate) fn select(&self, names: &[&str]) -> RecordSet {
        let indexes: Vec<Option<usize>> = names.iter().map(|n| self.column_index(n)).collect();
        let mut out = RecordSet::with_columns(names.iter().copied());
        for row in &self.rows {
            let picked = indexes
                .iter()
                .map(|idx| match idx {
                    Some(i) => row[*i].clone(),
                    None => Value::Null,
                })
                .collect();
            out.push_row(picked);
        }
        out
    }

    /// 合併另一個同欄位結構的表格，逐列附加在後。
    pub(crate) fn extend(&mut self, other: RecordSet) {
        if self.columns.is_empty() {
            *self = other;
            return;
        }
        debug_assert_eq!(self.columns, other.columns);
        self.rows.extend(other.rows);
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_coerce() {
        assert_eq!(
            Value::coerce(&serde_json::json!(12.5), false),
            Value::Number(dec!(12.5))
        );
        assert_eq!(
            Value::coerce(&serde_json::json!("1,234.56"), false),
            Value::Number(dec!(1234.56))
        );
        assert_eq!(
            Value::coerce(&serde_json::json!("600519"), true),
            Value::Text("600519".to_string())
        );
        assert_eq!(Value::coerce(&serde_json::json!("--"), false), Value::Null);
        assert_eq!(Value::coerce(&serde_json::Value::Null, false), Value::Null);
        assert_eq!(
            Value::coerce(&serde_json::json!("贵州茅台"), false),
            Value::Text("贵州茅台".to_string())
        );
    }

    #[test]
    fn test_record_set_columns() {
        let mut set = RecordSet::with_columns(["日期", "收盘"]);
        set.push_row(vec![
            Value::Text("2024-01-02".to_string()),
            Value::Number(dec!(1685.0)),
        ]);
        set.insert_column(0, "代码", Value::Text("600519".to_string()));

        assert_eq!(set.columns(), &["代码", "日期", "收盘"]);
        assert_eq!(
            set.get(0, "代码"),
            Some(&Value::Text("600519".to_string()))
        );
        assert_eq!(set.get(0, "收盘"), Some(&Value::Number(dec!(1685.0))));

        set.rename_column("收盘", "收盘价");
        assert!(set.column_index("收盘").is_none());
        assert_eq!(set.get(0, "收盘价"), Some(&Value::Number(dec!(1685.0))));

        let picked = set.select(&["收盘价", "代码"]);
        assert_eq!(picked.columns(), &["收盘价", "代码"]);
        assert_eq!(picked.get(0, "收盘价"), Some(&Value::Number(dec!(1685.0))));
    }

    #[test]
    fn test_push_row_pads_missing_cells() {
        let mut set = RecordSet::with_columns(["a", "b", "c"]);
        set.push_row(vec![Value::Number(dec!(1))]);
        assert_eq!(set.get(0, "b"), Some(&Value::Null));
        assert_eq!(set.get(0, "c"), Some(&Value::Null));
    }
}
