// Config Domain Layer
//
// 存储连接配置的实体与校验规则

mod entities;

pub use entities::*;
