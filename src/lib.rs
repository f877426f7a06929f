//! Model Catalog - AI 模型目录视图引擎
//!
//! 从一份扁平的模型描述记录出发，生成过滤子集、排序结果、分组结果，
//! 以及 公司 → 许可状态 → 父模型 → 子模型 的四层树。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
