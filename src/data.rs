//! 用户代理提交的表单数据。
//!
//! 与 URL 编码的请求体或查询字符串结构一致：一个字段名可以对应多个值，
//! 值的顺序即提交顺序。

use std::collections::HashMap;

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    values: HashMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析 `a=1&b=2&a=3` 形式的 URL 编码文本，支持 `+` 与百分号转义。
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('?').unwrap_or(text);
        form_urlencoded::parse(text.as_bytes())
            .into_owned()
            .collect()
    }

    /// 追加一个值
    pub fn insert(&mut self, name: &str, value: &str) {
        self.values
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// 第一个值
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|v| v.first())
            .map(|s| s.as_str())
    }

    /// 所有值，字段不存在时为空切片
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values
            .get(name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut data = FormData::new();
        for (k, v) in iter {
            data.insert(k.as_ref(), v.as_ref());
        }
        data
    }
}
