// Chat Domain - Value Objects
// 值对象是不可变的，通过值而非标识来比较

mod chat_id;
mod user_id;

pub use chat_id::*;
pub use user_id::*;

use thiserror::Error;

/// 标识符格式错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid identifier: {0:?}")]
pub struct InvalidIdentifier(pub String);
