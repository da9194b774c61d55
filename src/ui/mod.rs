pub mod icons;
pub mod output;
pub mod table;
pub mod theme;
pub mod tree;

pub use icons::Icons;
pub use output::{dim, error, header, info, section, success, warn};
pub use table::{questions_table, stats_table, users_table};
pub use theme::{theme, Theme};
pub use tree::reply_tree_lines;
