// Config Infrastructure Layer
//
// 配置来源的具体实现

mod env_source;
mod static_source;

pub use env_source::*;
pub use static_source::*;
