// Chat Infrastructure - Repositories
//
// StoreChatRepository: 基于键值存储的对话仓储
// - user:chat:{userId} 有序集合，成员为对话键，分数为最近活动毫秒时间戳
// - chat:{chatId} 哈希，保存对话字段

mod store_chat_repository;

pub use store_chat_repository::*;
