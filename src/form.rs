// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 表单模型模块
//!
//! 以强类型的方式描述一个 HTML5 表单：
//! 1. [`Html`]：所有元素通用的全局属性。
//! 2. [`Field`]：封闭的字段类型集合，叶子字段与容器字段（`Div`、`FieldSet`）都是其变体。
//! 3. [`Form`]：具名、有序的字段序列。
//!
//! 字段树严格为树状结构，遍历顺序即插入顺序。

use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

use crate::field::*;
use crate::param::{FormMethod, OptionalBool, TextDirection};

/// 所有 HTML 元素通用的全局属性、ARIA 属性与 data 属性。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Html {
    pub class: Vec<String>,
    pub access_key: String,
    pub id: String,
    pub dir: Option<TextDirection>,
    pub lang: String,
    pub style: String,
    pub tab_index: String,
    pub title: String,
    pub translate: String,
    pub content_editable: OptionalBool,
    pub hidden: OptionalBool,
    pub role: String,
    /// 任意附加属性，例如 `data-*`
    pub data: BTreeMap<String, String>,
    /// 以 `aria-` 为前缀的属性
    pub aria: BTreeMap<String, String>,
}

impl Html {
    /// 返回元素的 id；若未设置，则以 `seed` 代替。
    pub fn ensure_id<'a>(&'a self, seed: &'a str) -> &'a str {
        if !self.id.is_empty() {
            &self.id
        } else {
            seed
        }
    }
}

/// 表单中的一个节点。
///
/// 新增字段类型时，回填逻辑中的 `match` 会在编译期提示需要处理的分支。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    Text(Input),
    Password(Input),
    Submit(Input),
    Tel(Input),
    Url(Input),
    Email(Input),
    Date(Input),
    Time(Input),
    Number(Input),
    Range(Input),
    Color(Input),
    Checkbox(Input),
    Radio(Input),
    File(Input),
    Image(Input),
    Reset(Input),
    ButtonInput(Input),
    Hidden(Input),
    Input(Input),
    Button(Button),
    Keygen(Keygen),
    TextArea(TextArea),
    Select(Select),
    DataList(DataList),
    Label(Label),
    Output(Output),
    Progress(Progress),
    Meter(Meter),
    /// 可嵌入字段序列中的纯文本
    PcData(String),
    Div(Div),
    FieldSet(FieldSet),
}

impl Field {
    /// 字段的提交名。没有提交名的类型返回 `None`。
    pub fn name(&self) -> Option<&str> {
        match self {
            Field::Text(i)
            | Field::Password(i)
            | Field::Submit(i)
            | Field::Tel(i)
            | Field::Url(i)
            | Field::Email(i)
            | Field::Date(i)
            | Field::Time(i)
            | Field::Number(i)
            | Field::Range(i)
            | Field::Color(i)
            | Field::Checkbox(i)
            | Field::Radio(i)
            | Field::File(i)
            | Field::Image(i)
            | Field::Reset(i)
            | Field::ButtonInput(i)
            | Field::Hidden(i)
            | Field::Input(i) => Some(&i.name),
            Field::Button(b) => Some(&b.name),
            Field::Keygen(k) => Some(&k.name),
            Field::TextArea(t) => Some(&t.name),
            Field::Select(s) => Some(&s.name),
            Field::Output(o) => Some(&o.name),
            Field::FieldSet(fs) => Some(&fs.name),
            Field::DataList(_)
            | Field::Label(_)
            | Field::Progress(_)
            | Field::Meter(_)
            | Field::PcData(_)
            | Field::Div(_) => None,
        }
    }

    /// 容器字段的子字段
    pub fn children(&self) -> Option<&[Field]> {
        match self {
            Field::Div(d) => Some(&d.fields),
            Field::FieldSet(fs) => Some(&fs.fields),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    /// `<input>` 类字段的内部结构
    pub fn as_input(&self) -> Option<&Input> {
        match self {
            Field::Text(i)
            | Field::Password(i)
            | Field::Submit(i)
            | Field::Tel(i)
            | Field::Url(i)
            | Field::Email(i)
            | Field::Date(i)
            | Field::Time(i)
            | Field::Number(i)
            | Field::Range(i)
            | Field::Color(i)
            | Field::Checkbox(i)
            | Field::Radio(i)
            | Field::File(i)
            | Field::Image(i)
            | Field::Reset(i)
            | Field::ButtonInput(i)
            | Field::Hidden(i)
            | Field::Input(i) => Some(i),
            _ => None,
        }
    }

    /// 字段当前的值，仅对单值字段有意义
    pub fn value(&self) -> Option<&str> {
        match self {
            Field::Button(b) => Some(&b.value),
            Field::Keygen(k) => Some(&k.value),
            Field::TextArea(t) => Some(&t.value),
            other => other.as_input().map(|i| i.value.as_str()),
        }
    }

    /// 单选框与复选框的选中状态
    pub fn is_checked(&self) -> bool {
        match self {
            Field::Checkbox(i) | Field::Radio(i) => i.checked,
            _ => false,
        }
    }
}

/// 一个 HTML5 表单。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Form {
    pub html: Html,
    pub accept_charset: String,
    pub enctype: String,
    pub action: String,
    pub method: FormMethod,
    pub name: String,
    pub target: String,
    pub autocomplete: bool,
    pub novalidate: bool,
    pub fields: Vec<Field>,
}

impl Form {
    pub fn new(name: &str, action: &str) -> Self {
        Self {
            name: name.to_string(),
            action: action.to_string(),
            ..Default::default()
        }
    }

    /// 追加任意数量的字段，返回自身以便链式调用
    pub fn add<I>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = Field>,
    {
        self.fields.extend(fields);
        self
    }

    /// 表单的 id，未设置时退化为表单名
    pub fn id(&self) -> &str {
        self.html.ensure_id(&self.name)
    }

    /// 以树的先序遍历顺序收集所有名为 `name` 的非容器字段。
    pub fn fields_named(&self, name: &str) -> Vec<&Field> {
        let mut found = Vec::new();
        collect_named(name, &self.fields, &mut found);
        found
    }

    /// 字段树中的节点总数（含容器本身）
    pub fn field_count(&self) -> usize {
        count_fields(&self.fields)
    }
}

fn collect_named<'a>(name: &str, fields: &'a [Field], found: &mut Vec<&'a Field>) {
    for field in fields {
        match field.children() {
            Some(children) => collect_named(name, children, found),
            None => {
                if field.name() == Some(name) {
                    found.push(field);
                }
            }
        }
    }
}

fn count_fields(fields: &[Field]) -> usize {
    fields
        .iter()
        .map(|f| 1 + f.children().map_or(0, count_fields))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> Form {
        let mut form = Form::new("login", "/submit");
        form.add(vec![
            Field::Text(Input::named("user")),
            Field::FieldSet(FieldSet::new(
                "extra",
                vec![
                    Field::Label(Label::new("remember", "Remember me")),
                    Field::Div(Div::new(vec![Field::Checkbox(
                        Input::named("remember").with_value("yes"),
                    )])),
                ],
            )),
            Field::PcData("fine print".to_string()),
        ]);
        form
    }

    #[test]
    fn test_new_form() {
        let form = Form::new("login", "/submit");
        assert_eq!(form.name, "login");
        assert_eq!(form.action, "/submit");
        assert_eq!(form.method, FormMethod::Get);
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_add_is_chainable() {
        let mut form = Form::new("f", "/");
        form.add(vec![Field::Text(Input::named("a"))])
            .add(vec![Field::Hidden(Input::named("b"))]);
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.fields[1].name(), Some("b"));
    }

    #[test]
    fn test_id_falls_back_to_name() {
        let mut form = Form::new("login", "/");
        assert_eq!(form.id(), "login");
        form.html.id = "form-1".to_string();
        assert_eq!(form.id(), "form-1");
    }

    #[test]
    fn test_fields_named_recurses() {
        let form = sample_form();
        let found = form.fields_named("remember");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value(), Some("yes"));
        // 容器本身不计入
        assert!(form.fields_named("extra").is_empty());
    }

    #[test]
    fn test_field_count() {
        assert_eq!(sample_form().field_count(), 6);
    }

    #[test]
    fn test_field_accessors() {
        let radio = Field::Radio(Input::named("box").with_value("fun"));
        assert_eq!(radio.name(), Some("box"));
        assert!(!radio.is_checked());
        assert!(!radio.is_container());
        assert_eq!(Field::Progress(Progress::default()).name(), None);
        assert_eq!(Field::Button(Button::new("go", "Go")).value(), Some("Go"));
    }

    #[test]
    fn test_serialize_to_json() {
        let form = sample_form();
        let json = serde_json::to_string(&form).unwrap();
        assert!(json.contains("\"Checkbox\""));
        let back: Form = serde_json::from_str(&json).unwrap();
        assert_eq!(back, form);
    }
}
