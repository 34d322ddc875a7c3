// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了表单缓存与回填流程中可能出现的各类异常情况。
//!
//! ## 设计意图
//! - **错误分类**：涵盖了缓存查找失败、提交数据缺少令牌、令牌生成失败以及配置读取错误。
//! - **非致命**：所有变体都以 `Result` 的形式返回给调用方，不会终止宿主进程。
//! - **用户友好**：通过实现 `std::fmt::Display`，确保错误信息可以被安全地记录到日志或返回给客户端。

use std::fmt;

/// 表单处理过程中发生的异常类型。
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exception {
    /// 缓存中不存在该令牌对应的表单。
    /// 令牌从未存在、已过期或已被消费，三种情况无法区分。
    FormNotFound,
    /// 提交的数据中没有携带安全令牌字段，通常意味着请求畸形或被伪造。
    NoToken,
    /// 操作系统随机源无法提供随机字节。
    TokenGenerationFailed,
    /// 令牌长度被设置为 0。
    InvalidTokenLength,
    /// 配置文件不存在或无法读取。
    ConfigUnreadable,
}

use Exception::*;

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormNotFound => write!(f, "Form not found"),
            NoToken => write!(f, "No token provided"),
            TokenGenerationFailed => write!(f, "Couldn't read from the system random source"),
            InvalidTokenLength => write!(f, "Security token length must be greater than zero"),
            ConfigUnreadable => write!(f, "Config file can't be read"),
        }
    }
}

impl std::error::Error for Exception {}
