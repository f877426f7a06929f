//! 核心数据模型模块
//!
//! 定义模型目录的核心数据结构：ModelRecord、视图参数和层级树节点。

pub mod model_record;
pub mod tree;
pub mod view;

pub use model_record::*;
pub use tree::*;
pub use view::*;
