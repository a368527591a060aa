use crate::errors::StoreWriteError;
use crate::models::KickData;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub async fn load_data(path: &Path) -> KickData {
    let mut data = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                quarantine(path).await;
                KickData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => KickData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            KickData::default()
        }
    };

    for kick in &mut data.kicks {
        if kick.repair_date() {
            warn!(id = %kick.id, date = %kick.date, "repaired kick date from timestamp");
        }
    }

    data
}

/// Writes `data` to a sibling temp file, then renames it over `path`.
pub async fn persist_data(path: &Path, data: &KickData) -> Result<(), StoreWriteError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let tmp = sibling(path, ".tmp");
    if let Err(err) = fs::write(&tmp, payload).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    fs::rename(&tmp, path).await?;
    Ok(())
}

pub fn corrupt_path(path: &Path) -> PathBuf {
    sibling(path, ".corrupt")
}

// The unparsable file is kept so the next persist cannot overwrite it.
async fn quarantine(path: &Path) {
    let target = corrupt_path(path);
    match fs::rename(path, &target).await {
        Ok(()) => warn!(path = %target.display(), "moved unreadable data file aside"),
        Err(err) => error!("failed to move unreadable data file aside: {err}"),
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("kicks.json"));
    name.push(suffix);
    path.with_file_name(name)
}
