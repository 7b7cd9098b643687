use std::fs;
use std::path::Path;

pub fn ensure_data_dir(data_dir: &Path) -> std::io::Result<()> {
    ensure_dir(data_dir)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
