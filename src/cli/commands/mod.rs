mod rooms;
mod seed;

pub use rooms::cmd_list_rooms;
pub use seed::cmd_seed;
