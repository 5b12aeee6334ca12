//! Acquisition of OSM extracts: Geofabrik download, on-disk caching and
//! bzip2 decompression.
//!
//! Everything here is I/O plumbing around the core transformation. The core
//! only ever sees the readable stream this crate hands out, so download,
//! cache and decompression failures stay in this crate's error type.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;

use bzip2::read::BzDecoder;
use log::info;
use thiserror::Error;

const DOWNLOAD_BASE_URL: &str = "https://download.geofabrik.de";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A region-addressed extract together with its cache location.
///
/// Cached artifacts live in `cache_dir` under
/// `{continent}-{country}-latest.osm.bz2` (as downloaded) and
/// `{continent}-{country}-latest.osm` (decompressed).
#[derive(Debug, Clone)]
pub struct Extract {
    continent: String,
    country: String,
    cache_dir: PathBuf,
}

impl Extract {
    pub fn new(continent: &str, country: &str, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            continent: continent.to_string(),
            country: country.to_string(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Download URL of the compressed extract. Geofabrik paths are lowercase.
    pub fn url(&self) -> String {
        format!(
            "{DOWNLOAD_BASE_URL}/{}/{}-latest.osm.bz2",
            self.continent, self.country
        )
        .to_lowercase()
    }

    fn compressed_path(&self) -> PathBuf {
        self.cache_dir
            .join(format!("{}-{}-latest.osm.bz2", self.continent, self.country))
    }

    fn extract_path(&self) -> PathBuf {
        self.cache_dir
            .join(format!("{}-{}-latest.osm", self.continent, self.country))
    }

    /// Opens a readable stream over the decompressed extract, downloading
    /// and decompressing as needed. Cached artifacts are reused.
    ///
    /// # Errors
    ///
    /// Fails when the download fails or the cache directory is not writable.
    pub fn acquire(&self) -> Result<BufReader<File>, Error> {
        if let Some(cached) = self.cached()? {
            return Ok(cached);
        }
        self.refresh()?;
        match self.cached()? {
            Some(stream) => Ok(stream),
            None => Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "downloaded extract did not materialize",
            ))),
        }
    }

    /// Discards cached artifacts, forcing the next [`Extract::acquire`] to
    /// refetch.
    pub fn invalidate_cache(&self) -> Result<(), Error> {
        for path in [self.extract_path(), self.compressed_path()] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Downloads the compressed extract, overwriting a cached copy.
    pub fn refresh(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.cache_dir)?;
        let url = self.url();
        info!("downloading extract from {url}");
        // Extracts run into gigabytes; the default request timeout would
        // cut large downloads short
        let client = reqwest::blocking::Client::builder().timeout(None).build()?;
        let mut response = client.get(&url).send()?.error_for_status()?;
        let mut destination = File::create(self.compressed_path())?;
        io::copy(&mut response, &mut destination)?;
        Ok(())
    }

    fn cached(&self) -> Result<Option<BufReader<File>>, Error> {
        let extract = self.extract_path();
        if !extract.exists() && self.compressed_path().exists() {
            self.decompress()?;
        }
        if extract.exists() {
            return Ok(Some(BufReader::new(File::open(extract)?)));
        }
        Ok(None)
    }

    fn decompress(&self) -> Result<(), Error> {
        info!("decompressing {}", self.compressed_path().display());
        let compressed = File::open(self.compressed_path())?;
        let mut decoder = BzDecoder::new(BufReader::new(compressed));
        let mut destination = File::create(self.extract_path())?;
        io::copy(&mut decoder, &mut destination)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use bzip2::Compression;
    use bzip2::write::BzEncoder;

    use super::*;

    #[test]
    fn url_is_lowercased() {
        let extract = Extract::new("Europe", "Andorra", "/tmp");
        assert_eq!(
            extract.url(),
            "https://download.geofabrik.de/europe/andorra-latest.osm.bz2"
        );
    }

    #[test]
    fn cache_filenames_keep_the_region_name() {
        let extract = Extract::new("Europe", "Andorra", "/maps");
        assert_eq!(
            extract.compressed_path(),
            PathBuf::from("/maps/Europe-Andorra-latest.osm.bz2")
        );
        assert_eq!(
            extract.extract_path(),
            PathBuf::from("/maps/Europe-Andorra-latest.osm")
        );
    }

    #[test]
    fn acquire_decompresses_a_cached_archive() {
        let dir = tempfile::tempdir().unwrap();
        let extract = Extract::new("Europe", "Andorra", dir.path());

        let payload = b"<osm version=\"0.6\"></osm>";
        let file = File::create(extract.compressed_path()).unwrap();
        let mut encoder = BzEncoder::new(file, Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap();

        let mut stream = extract.acquire().unwrap();
        let mut content = Vec::new();
        stream.read_to_end(&mut content).unwrap();
        assert_eq!(content, payload);
        assert!(extract.extract_path().exists());
    }

    #[test]
    fn invalidate_cache_removes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let extract = Extract::new("Europe", "Andorra", dir.path());
        File::create(extract.compressed_path()).unwrap();
        File::create(extract.extract_path()).unwrap();

        extract.invalidate_cache().unwrap();
        assert!(!extract.compressed_path().exists());
        assert!(!extract.extract_path().exists());

        // A second invalidation finds nothing to delete
        extract.invalidate_cache().unwrap();
    }
}
