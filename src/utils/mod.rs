pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod parsing;
pub mod progress;

pub use constants::*;
pub use coordinates::{is_valid_lat_lon, round_to_decimals};
pub use filename::{metadata_path, output_paths};
pub use parsing::{parse_float, parse_int};
pub use progress::ProgressReporter;
