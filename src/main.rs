// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 表单缓存演示控制台
//!
//! 该程序基于 Tokio 运行时驱动一个 `FormHandler`，用于手工验证表单的缓存与回填流程。
//! 核心功能包括：
//! - 从 TOML 文件加载缓存过期时长、令牌长度等参数
//! - 启动后台清扫任务，定期回收过期表单
//! - 通过标准输入的指令准备表单、模拟提交并查看回填结果

use std::{process::ExitCode, sync::Arc};

use formengine::{
    field::{Button, Input},
    Config, Field, Form, FormData, FormHandler, FormMethod, MemoryCache, Sweeper,
};
use log::{debug, error, info, warn};
use log4rs;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    runtime::Builder,
};

fn main() -> ExitCode {
    // 1. 初始化日志系统：通过外部 YAML 灵活配置级别与输出目的地
    if let Err(e) = log4rs::init_file("config/log4rs.yaml", Default::default()) {
        eprintln!("无法初始化日志系统：{}", e);
        return ExitCode::FAILURE;
    }

    // 2. 环境配置加载：文件缺失时退回默认配置
    let config = match Config::from_toml("config/development.toml") {
        Ok(c) => {
            info!("配置文件已载入");
            c
        }
        Err(e) => {
            warn!("{}，使用默认配置", e);
            Config::new()
        }
    };
    info!(
        "表单过期时长：{}秒，令牌长度：{}",
        config.expiration_secs(),
        config.token_length()
    );

    // 3. 异步运行时定制：根据配置文件分配工作线程数
    let runtime = match Builder::new_multi_thread()
        .worker_threads(config.worker_threads())
        .enable_all()
        .build()
    {
        Ok(r) => r,
        Err(e) => {
            error!("无法构建Tokio运行时：{}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(console(config));
    ExitCode::SUCCESS
}

/// # 交互式控制台
///
/// 缓存由处理器与后台清扫任务共享，控制台退出前会显式停止清扫任务。
async fn console(config: Config) {
    let cache = Arc::new(MemoryCache::from_capacity(config.cache_size()));
    let handler = FormHandler::from_config(Arc::clone(&cache), &config);
    let sweeper = Sweeper::start(Arc::clone(&cache), config.sweep_interval());
    info!("后台清扫任务已启动，周期{:?}", config.sweep_interval());

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut input = String::new();
    loop {
        input.clear();
        match reader.read_line(&mut input).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("读取标准输入失败：{}", e);
                break;
            }
        }
        let line = input.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "" => {}
            "stop" => {
                println!("停机指令已激活，正在停止后台任务...");
                break;
            }
            "help" => {
                println!("== Formengine Help ==");
                println!("prepare        - 准备一个演示登录表单并输出令牌");
                println!("submit <query> - 以URL编码数据提交表单，如 submit username=matt&__token__=...");
                println!("status         - 查看缓存状态");
                println!("stop           - 停止并退出");
                println!("help           - 显示此帮助信息");
                println!("=====================");
            }
            "prepare" => match handler.prepare(demo_form()) {
                Ok(token) => println!("令牌：{}", token),
                Err(e) => println!("准备表单失败：{}", e),
            },
            "submit" => {
                let data = FormData::parse(rest);
                debug!("收到提交数据，共{}个字段", data.len());
                match handler.retrieve(&data) {
                    Ok(form) => match serde_json::to_string_pretty(&form) {
                        Ok(json) => println!("{}", json),
                        Err(e) => error!("序列化表单失败：{}", e),
                    },
                    Err(e) => println!("取回表单失败：{}", e),
                }
            }
            "status" => {
                println!("== Formengine 状态 ===");
                println!("缓存表单数: {}（软上限 {}）", cache.len(), cache.capacity());
                println!("表单过期时长: {:?}", handler.expiration());
                println!("=====================");
            }
            _ => {
                println!("无效的命令：{}", cmd);
            }
        }
    }

    sweeper.stop().await;
    info!("控制台已退出");
}

fn demo_form() -> Form {
    let mut form = Form::new("login", "/login");
    form.method = FormMethod::Post;
    form.add(vec![
        Field::Text(Input::named("username").with_label("用户名")),
        Field::Password(Input::named("password").with_label("密码")),
        Field::Checkbox(Input::named("remember").with_value("yes")),
        Field::Button(Button::new("submit", "登录")),
    ]);
    form
}
