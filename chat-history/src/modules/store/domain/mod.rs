// Store Domain Layer
// 存储操作的值类型：字段映射、查询结果、批量命令与应答

mod commands;
mod values;

pub use commands::*;
pub use values::*;
