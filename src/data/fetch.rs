use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::data::table::SeriesTable;

/// Path of the gzip-compressed plot CSV for a site.
pub fn plot_data_path(data_dir: &Path, site_id: &str) -> PathBuf {
    data_dir.join("plot").join(format!("{site_id}.csv.gz"))
}

/// Path of the pre-built download archive for a site.
pub fn download_archive_path(data_dir: &Path, site_id: &str) -> PathBuf {
    data_dir.join("download").join(format!("{site_id}.csv.zip"))
}

/// Read and decompress a site's plot CSV.
pub fn fetch_plot_csv(data_dir: &Path, site_id: &str) -> Result<String, String> {
    let path = plot_data_path(data_dir, site_id);
    let file = std::fs::File::open(&path)
        .map_err(|e| format!("Cannot open plot data {}: {e}", path.display()))?;

    let mut text = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut text)
        .map_err(|e| format!("Cannot decompress plot data {}: {e}", path.display()))?;
    Ok(text)
}

/// Fetch and parse a site's full series table. This is the blocking body of
/// the background load a site window spawns.
pub fn load_series_table(data_dir: &Path, site_id: &str) -> Result<SeriesTable, String> {
    let csv = fetch_plot_csv(data_dir, site_id)?;
    SeriesTable::from_csv(&csv)
}

/// Copy the site's download archive to a user-chosen destination.
/// Returns the number of bytes written.
pub fn copy_download_archive(
    data_dir: &Path,
    site_id: &str,
    dest: &Path,
) -> Result<u64, String> {
    let src = download_archive_path(data_dir, site_id);
    std::fs::copy(&src, dest)
        .map_err(|e| format!("Cannot copy archive {}: {e}", src.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_data_dir() -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("hydroview_fetch_{unique}"));
        std::fs::create_dir_all(dir.join("plot")).unwrap();
        std::fs::create_dir_all(dir.join("download")).unwrap();
        dir
    }

    fn write_gz(path: &Path, text: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut enc = flate2::write::GzEncoder::new(file, flate2::Compression::fast());
        enc.write_all(text.as_bytes()).unwrap();
        enc.finish().unwrap();
    }

    #[test]
    fn fetches_and_parses_gzipped_plot_data() {
        let dir = scratch_data_dir();
        write_gz(
            &plot_data_path(&dir, "S1"),
            "Date,0,1\n1999-06-01,10,20\n1999-06-02,,5\n",
        );

        let table = load_series_table(&dir, "S1").unwrap();
        assert_eq!(table.labels, vec!["0", "1"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1].values, vec![None, Some(5.0)]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_site_is_an_error() {
        let dir = scratch_data_dir();
        let err = load_series_table(&dir, "nope").unwrap_err();
        assert!(err.contains("nope.csv.gz"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn corrupt_gzip_is_an_error() {
        let dir = scratch_data_dir();
        std::fs::write(plot_data_path(&dir, "S1"), b"not gzip at all").unwrap();
        assert!(load_series_table(&dir, "S1").is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn copies_download_archive() {
        let dir = scratch_data_dir();
        std::fs::write(download_archive_path(&dir, "S1"), b"zipbytes").unwrap();

        let dest = dir.join("saved.csv.zip");
        let written = copy_download_archive(&dir, "S1", &dest).unwrap();
        assert_eq!(written, 8);
        assert_eq!(std::fs::read(&dest).unwrap(), b"zipbytes");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
