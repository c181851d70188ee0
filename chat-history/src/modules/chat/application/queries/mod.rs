// Chat Queries - 查询定义和处理器

mod get_chat;
mod get_shared_chat;
mod list_chats;

pub use get_chat::*;
pub use get_shared_chat::*;
pub use list_chats::*;
