// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 表单回填模块
//!
//! 将用户代理提交的数据合并回缓存中的字段树：
//! 1. 容器字段（`Div`、`FieldSet`）只做递归，自身不接收值。
//! 2. 单值字段：提交了非空值时覆盖 `value`，否则保留原值（默认值因此得以保留）。
//! 3. 单选框：提交值等于自身 `value` 时选中。
//! 4. 复选框：提交的多个值中包含自身 `value` 时选中。
//! 5. 下拉框：提交值命中的选项被标记为 `selected`。
//! 6. 其余没有提交形态的字段保持不变。
//!
//! 回填只修改值与选中状态，不改变字段树的形状与顺序，也不做任何校验。
//! 未知的提交字段被直接忽略。选中状态只会被置为 `true`，调用方应保证缓存前均为未选中。

use crate::data::FormData;
use crate::field::{OptionItem, Select};
use crate::form::{Field, Form};

/// 就地把 `data` 合并进 `form` 的字段中。
pub fn reconcile(form: &mut Form, data: &FormData) {
    reconcile_fields(&mut form.fields, data);
}

fn reconcile_fields(fields: &mut [Field], data: &FormData) {
    for field in fields.iter_mut() {
        match field {
            Field::Div(div) => reconcile_fields(&mut div.fields, data),
            Field::FieldSet(fieldset) => reconcile_fields(&mut fieldset.fields, data),
            Field::Radio(radio) => {
                if data.get(&radio.name) == Some(radio.value.as_str()) {
                    radio.checked = true;
                }
            }
            Field::Checkbox(checkbox) => {
                if data.get_all(&checkbox.name).contains(&checkbox.value) {
                    checkbox.checked = true;
                }
            }
            Field::Select(select) => reconcile_select(select, data),
            Field::Text(input)
            | Field::Password(input)
            | Field::Submit(input)
            | Field::Tel(input)
            | Field::Url(input)
            | Field::Email(input)
            | Field::Date(input)
            | Field::Time(input)
            | Field::Number(input)
            | Field::Range(input)
            | Field::Color(input)
            | Field::Image(input)
            | Field::ButtonInput(input)
            | Field::Hidden(input)
            | Field::Input(input) => merge_value(&mut input.value, &input.name, data),
            Field::Button(button) => merge_value(&mut button.value, &button.name, data),
            Field::Keygen(keygen) => merge_value(&mut keygen.value, &keygen.name, data),
            Field::TextArea(textarea) => merge_value(&mut textarea.value, &textarea.name, data),
            // 文件内容不会出现在 URL 编码数据中，重置按钮也不提交值
            Field::File(_)
            | Field::Reset(_)
            | Field::DataList(_)
            | Field::Label(_)
            | Field::Output(_)
            | Field::Progress(_)
            | Field::Meter(_)
            | Field::PcData(_) => {}
        }
    }
}

// 空字符串与未提交等同处理
fn merge_value(value: &mut String, name: &str, data: &FormData) {
    if let Some(submitted) = data.get(name) {
        if !submitted.is_empty() {
            *value = submitted.to_string();
        }
    }
}

fn reconcile_select(select: &mut Select, data: &FormData) {
    let submitted = data.get_all(&select.name);
    let submitted = if select.multiple {
        submitted
    } else {
        &submitted[..submitted.len().min(1)]
    };
    if submitted.is_empty() {
        return;
    }
    for item in select.options.iter_mut() {
        match item {
            OptionItem::Option(option) => {
                if submitted.contains(&option.value) {
                    option.selected = true;
                }
            }
            OptionItem::OptGroup(group) => {
                for option in group.options.iter_mut() {
                    if submitted.contains(&option.value) {
                        option.selected = true;
                    }
                }
            }
        }
    }
}
