//! 存储层模块
//!
//! 目录加载器与会话内不可变的记录存储。

pub mod factory;
pub mod loader;
pub mod store;

pub use factory::LoaderFactory;
pub use loader::{HttpLoader, JsonFileLoader, LoadError, RecordLoader, StaticLoader};
pub use store::RecordStore;
