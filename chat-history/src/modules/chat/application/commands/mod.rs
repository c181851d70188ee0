// Chat Commands - 命令定义和处理器

mod clear_chats;
mod delete_chat;
mod save_chat;
mod share_chat;

pub use clear_chats::*;
pub use delete_chat::*;
pub use save_chat::*;
pub use share_chat::*;
