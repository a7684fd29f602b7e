use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::FetchError;

const CHUNK_SIZE: usize = 64 * 1024;

/// Blocking HTTP GET of package archives. The call returns only once the
/// body is fully on disk or the transfer has failed.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        self.download_with_progress(url, dest, None, |_downloaded, _total| {})
    }

    /// Streams the response body into `dest`, creating or truncating it.
    ///
    /// `dest` is only opened after a 2xx status, so an HTTP error leaves no
    /// file behind. A failure mid-body can leave a partial file; removing it
    /// is the caller's job.
    pub fn download_with_progress<F>(
        &self,
        url: &str,
        dest: &Path,
        cancel: Option<&CancelToken>,
        mut on_progress: F,
    ) -> Result<u64, FetchError>
    where
        F: FnMut(u64, Option<u64>),
    {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(FetchError::cancelled(url));
        }

        debug!(url, dest = %dest.display(), "requesting package archive");
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|err| FetchError::transport(url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url, status));
        }
        let total = response.content_length();

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|err| FetchError::write(url, parent, err))?;
        }
        let mut file = File::create(dest).map_err(|err| FetchError::write(url, dest, err))?;

        let mut buffer = vec![0_u8; CHUNK_SIZE];
        let mut downloaded = 0_u64;
        on_progress(downloaded, total);
        loop {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(FetchError::cancelled(url));
            }

            let read = response
                .read(&mut buffer)
                .map_err(|err| FetchError::transport(url, err))?;
            if read == 0 {
                break;
            }
            file.write_all(&buffer[..read])
                .map_err(|err| FetchError::write(url, dest, err))?;
            downloaded += read as u64;
            on_progress(downloaded, total);
        }
        file.flush().map_err(|err| FetchError::write(url, dest, err))?;

        debug!(url, bytes = downloaded, "package archive downloaded");
        Ok(downloaded)
    }
}

/// One-off download with a default client.
pub fn download(url: &str, dest: &Path) -> Result<(), FetchError> {
    let fetcher = Fetcher::new(concat!("nuplug/", env!("CARGO_PKG_VERSION")), None)
        .map_err(|err| FetchError::transport(url, err))?;
    fetcher.download(url, dest).map(|_| ())
}
