pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, found, header, info, not_found, success, warn};
pub use progress::Spinner;
pub use table::{counts_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
