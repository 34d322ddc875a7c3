//! 安全令牌的生成。
//!
//! 令牌既是缓存的键，也以隐藏字段的形式写入渲染后的表单。

use log::error;
use rand_core::{OsRng, RngCore};

use crate::exception::Exception;
use crate::field::Input;
use crate::param::{TOKEN_ALPHABET, TOKEN_FIELD_NAME};

// 小于该值的字节可以均匀地映射到字母表上，其余字节丢弃重抽
const ACCEPT_BELOW: u8 = (256 / TOKEN_ALPHABET.len() * TOKEN_ALPHABET.len()) as u8;

/// 从操作系统随机源生成长度为 `length` 的字母数字令牌。
pub fn security_token(length: usize) -> Result<String, Exception> {
    if length == 0 {
        return Err(Exception::InvalidTokenLength);
    }
    let mut token = String::with_capacity(length);
    let mut buffer = vec![0u8; length * 2];
    while token.len() < length {
        if let Err(e) = OsRng.try_fill_bytes(&mut buffer) {
            error!("读取系统随机源失败：{}", e);
            return Err(Exception::TokenGenerationFailed);
        }
        for &byte in buffer.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if token.len() == length {
                break;
            }
            token.push(TOKEN_ALPHABET[byte as usize % TOKEN_ALPHABET.len()] as char);
        }
    }
    Ok(token)
}

// 日志中令牌只保留的前缀长度
const LOGGED_PREFIX: usize = 4;

/// 日志用的令牌摘要，只保留前几个字符
pub(crate) fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(LOGGED_PREFIX).collect();
    format!("{}***", prefix)
}

/// 携带新令牌的隐藏字段
pub fn security_field(length: usize) -> Result<Input, Exception> {
    Ok(Input::named(TOKEN_FIELD_NAME).with_value(&security_token(length)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length() {
        for len in [1, 16, 32, 100] {
            assert_eq!(security_token(len).unwrap().len(), len);
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        assert_eq!(security_token(0), Err(Exception::InvalidTokenLength));
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<String> = (0..1000).map(|_| security_token(32).unwrap()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_security_field() {
        let field = security_field(32).unwrap();
        assert_eq!(field.name, TOKEN_FIELD_NAME);
        assert_eq!(field.value.len(), 32);
        assert!(field.value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_redact_hides_token() {
        let token = security_token(32).unwrap();
        let logged = redact(&token);
        assert_eq!(logged, format!("{}***", &token[..4]));
        assert!(!logged.contains(&token));
        assert_eq!(redact("ab"), "ab***");
        assert_eq!(redact(""), "***");
    }

    proptest! {
        #[test]
        fn test_token_uses_alphabet(len in 1usize..200) {
            let token = security_token(len).unwrap();
            prop_assert_eq!(token.len(), len);
            prop_assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
        }
    }
}
