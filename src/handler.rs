// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 表单处理器模块
//!
//! `FormHandler` 负责表单缓存与取回的完整生命周期：
//! 1. `prepare`：为表单附加安全令牌隐藏字段，并以令牌为键放入缓存。
//! 2. `retrieve`：根据提交数据中的令牌取回缓存表单，消费令牌后执行回填。
//!
//! 令牌只能使用一次，无论回填结果如何都不会被重放。

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};

use crate::cache::Cache;
use crate::config::Config;
use crate::data::FormData;
use crate::exception::Exception;
use crate::form::{Field, Form};
use crate::param::{DEFAULT_TOKEN_LENGTH, TOKEN_FIELD_NAME};
use crate::reconcile::reconcile;
use crate::token::security_field;

pub struct FormHandler<C: Cache> {
    cache: Arc<C>,
    /// 表单在缓存中的保留时长
    expiration: Duration,
    token_length: usize,
}

impl<C: Cache> FormHandler<C> {
    pub fn new(cache: Arc<C>, expiration: Duration) -> Self {
        Self {
            cache,
            expiration,
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }

    pub fn from_config(cache: Arc<C>, config: &Config) -> Self {
        Self {
            cache,
            expiration: config.expiration(),
            token_length: config.token_length(),
        }
    }

    /// 为表单附加安全令牌字段并放入缓存，返回令牌。
    ///
    /// 令牌字段追加在 `fields` 末尾，之后可凭该令牌取回表单。
    pub fn prepare(&self, mut form: Form) -> Result<String, Exception> {
        let field = security_field(self.token_length)?;
        let token = field.value.clone();
        form.fields.push(Field::Hidden(field));

        let expiration = chrono::Duration::from_std(self.expiration)
            .unwrap_or_else(|_| chrono::Duration::MAX);
        let expires_at = Utc::now()
            .checked_add_signed(expiration)
            .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);
        info!("表单 {} 已缓存，过期时间：{}", form.name, expires_at);
        self.cache.set(&token, form, expires_at);
        Ok(token)
    }

    /// 用提交数据回填缓存中的表单。
    ///
    /// 未提交的字段保持原值，因此带默认值的字段依然保留默认值。
    /// 表单在回填之前即从缓存中移除。
    pub fn retrieve(&self, data: &FormData) -> Result<Form, Exception> {
        let token = match data.get(TOKEN_FIELD_NAME) {
            Some(t) if !t.is_empty() => t,
            _ => {
                warn!("提交数据中缺少安全令牌字段 {}", TOKEN_FIELD_NAME);
                return Err(Exception::NoToken);
            }
        };

        let mut form = match self.cache.take(token) {
            Ok(form) => form,
            Err(e) => {
                warn!("令牌对应的表单不存在或已过期");
                return Err(e);
            }
        };
        debug!("令牌已消费，开始回填表单 {}", form.name);

        reconcile(&mut form, data);
        info!("表单 {} 已回填", form.name);
        Ok(form)
    }

    pub fn get(&self, token: &str) -> Result<Form, Exception> {
        self.cache.get(token)
    }

    pub fn remove(&self, token: &str) {
        self.cache.remove(token)
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }
}
