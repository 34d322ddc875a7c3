// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 表单协议参数与常量模块
//!
//! 该模块定义了 `formengine` 遵循的约定常量和数据结构，包括：
//! - 安全令牌字段名、令牌长度与字母表。
//! - 缓存过期时长、清扫周期与容量的默认值。
//! - 表单方法、三态布尔以及文本方向的强类型枚举。

use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// 自动附加到表单中的安全令牌隐藏字段名。
///
/// `prepare` 写入与 `retrieve` 读取都使用该名称，表单生成后不应再修改。
pub const TOKEN_FIELD_NAME: &str = "__token__";

/// 安全令牌的默认长度
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// 令牌使用的字母表（大小写字母与数字）
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 表单在缓存中的默认保留时长：24 小时
pub const DEFAULT_EXPIRATION_SECS: u64 = 24 * 60 * 60;

/// 后台清扫过期表单的默认周期：5 分钟
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;

/// 内存缓存默认最多保存的表单数量
pub const DEFAULT_CACHE_SIZE: usize = 10_000;

/// 表单提交方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormMethod {
    /// 以查询字符串提交
    #[default]
    Get,
    /// 以请求体提交
    Post,
}

/// 可继承的布尔属性。
///
/// `None` 表示未设置，渲染时沿用父元素的取值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OptionalBool {
    #[default]
    None,
    True,
    False,
}

/// 文本书写方向（`dir` 属性）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDirection {
    /// 从左到右
    Ltr,
    /// 从右到左
    Rtl,
    /// 由用户代理决定
    Auto,
}

impl fmt::Display for FormMethod {
    /// 格式化为 `method` 属性的取值
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FormMethod::Get => write!(f, "GET"),
            FormMethod::Post => write!(f, "POST"),
        }
    }
}

impl fmt::Display for OptionalBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptionalBool::None => write!(f, ""),
            OptionalBool::True => write!(f, "true"),
            OptionalBool::False => write!(f, "false"),
        }
    }
}

impl fmt::Display for TextDirection {
    /// 格式化为 `dir` 属性的取值
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TextDirection::Ltr => write!(f, "ltr"),
            TextDirection::Rtl => write!(f, "rtl"),
            TextDirection::Auto => write!(f, "auto"),
        }
    }
}

impl OptionalBool {
    /// 是否显式设置过
    pub fn is_set(&self) -> bool {
        *self != OptionalBool::None
    }
}
