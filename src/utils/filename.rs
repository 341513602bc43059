use crate::models::OutputPaths;
use crate::utils::constants::{
    HEAT_ENGAGEMENT_FILE, HEAT_PRESENCE_FILE, METADATA_FILE, POINTS_FILE,
};
use std::path::{Path, PathBuf};

/// Artifact paths for a conversion written into `out_dir`
pub fn output_paths(out_dir: &Path) -> OutputPaths {
    OutputPaths {
        points: out_dir.join(POINTS_FILE),
        heat_presence: out_dir.join(HEAT_PRESENCE_FILE),
        heat_engagement: out_dir.join(HEAT_ENGAGEMENT_FILE),
    }
}

/// Path of the run metadata file inside `out_dir`
pub fn metadata_path(out_dir: &Path) -> PathBuf {
    out_dir.join(METADATA_FILE)
}
