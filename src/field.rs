//! 表单叶子字段的数据结构。
//!
//! 所有 `<input>` 类字段共用 [`Input`]，其余元素各自拥有独立的结构体。
//! 这里只描述数据，不负责渲染。

use serde_derive::{Deserialize, Serialize};

use crate::form::{Field, Html};

/// 通用的 `<input>` 字段。
///
/// 很少直接使用，通常包裹在 `Field::Text`、`Field::Checkbox` 等变体中。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Input {
    pub html: Html,
    pub accept: String,
    pub alt: String,
    pub autocomplete: String,
    pub dirname: String,
    pub form: String,
    pub list: String,
    pub input_mode: String,
    pub max: String,
    pub min: String,
    pub max_length: String,
    pub name: String,
    pub pattern: String,
    pub placeholder: String,
    pub src: String,
    pub step: String,
    pub value: String,
    pub autofocus: bool,
    pub checked: bool,
    pub disabled: bool,
    pub multiple: bool,
    pub read_only: bool,
    pub required: bool,
    pub height: u64,
    pub width: u64,
    pub size: u64,
    /// 并非 `<input>` 的属性，方便为字段生成配套的 `<label>`
    pub label: String,
}

impl Input {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }
}

/// `<button>` 元素
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Button {
    pub html: Html,
    pub autofocus: bool,
    pub disabled: bool,
    pub form: String,
    pub menu: String,
    pub name: String,
    pub kind: String,
    pub value: String,
}

impl Button {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            ..Default::default()
        }
    }
}

/// `<keygen>` 元素
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Keygen {
    pub html: Html,
    pub challenge: String,
    pub form: String,
    pub key_type: String,
    pub name: String,
    pub autofocus: bool,
    pub disabled: bool,
    /// 用户代理提交的公钥
    pub value: String,
}

/// 多行文本输入框
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextArea {
    pub html: Html,
    pub autocomplete: String,
    pub dirname: String,
    pub form: String,
    pub name: String,
    pub placeholder: String,
    pub wrap: String,
    pub autofocus: bool,
    pub disabled: bool,
    pub read_only: bool,
    pub required: bool,
    pub cols: u64,
    pub max_length: u64,
    pub min_length: u64,
    pub rows: u64,
    pub value: String,
}

/// 下拉选择框
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Select {
    pub html: Html,
    pub autofocus: bool,
    pub disabled: bool,
    pub multiple: bool,
    pub required: bool,
    pub form: String,
    pub name: String,
    pub size: u64,
    pub options: Vec<OptionItem>,
    pub label: String,
}

/// `<select>` 中的一项：单个选项或选项分组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionItem {
    Option(SelectOption),
    OptGroup(OptGroup),
}

/// `<optgroup>` 选项分组
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptGroup {
    pub html: Html,
    pub label: String,
    pub disabled: bool,
    pub options: Vec<SelectOption>,
}

/// 单个 `<option>`。
///
/// `label` 是展示给用户的文本，`value` 是提交给服务端的值。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectOption {
    pub html: Html,
    pub disabled: bool,
    pub selected: bool,
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            ..Default::default()
        }
    }
}

/// 供其他字段引用的隐藏选项列表
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataList {
    pub html: Html,
    pub options: Vec<SelectOption>,
}

/// 字段标签。
///
/// 大多数情况下应优先使用字段自身的 `label` 属性。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Label {
    pub html: Html,
    pub for_name: String,
    pub form: String,
    pub text: String,
}

impl Label {
    pub fn new(for_name: &str, text: &str) -> Self {
        Self {
            for_name: for_name.to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }
}

/// 计算结果展示字段
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Output {
    pub html: Html,
    pub for_name: String,
    pub form: String,
    pub name: String,
}

/// 进度条
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub html: Html,
    pub value: f64,
    pub max: f64,
}

/// 通用计量条
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meter {
    pub html: Html,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub low: f64,
    pub high: f64,
    pub optimum: f64,
}

/// 通用分组容器（`<div>`）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Div {
    pub html: Html,
    pub fields: Vec<Field>,
}

impl Div {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }
}

/// 具名字段集（`<fieldset>`）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldSet {
    pub html: Html,
    pub form: String,
    pub name: String,
    pub disabled: bool,
    pub fields: Vec<Field>,
    /// 不是属性，渲染为 `<legend>`
    pub legend: String,
}

impl FieldSet {
    pub fn new(name: &str, fields: Vec<Field>) -> Self {
        Self {
            name: name.to_string(),
            fields,
            ..Default::default()
        }
    }
}
