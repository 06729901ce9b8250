//! Single-file reads and writes through the contents API.

use tracing::info;

use super::{require, RepositoryManager};
use crate::codec::BlobCodec;
use crate::error::Error;
use crate::transport::encode_segment;
use crate::types::git::{ContentsPayload, ContentsWrite, ContentsWriteResult};
use crate::types::FileContents;

impl RepositoryManager {
    fn contents_path(&self, path: &str) -> Result<String, Error> {
        require(path, "file path")?;
        if path.starts_with('/') {
            return Err(Error::Validation(format!("file path must be relative: {path}")));
        }

        let escaped: Vec<String> = path.split('/').map(encode_segment).collect();
        Ok(self.path(&format!("/contents/{}", escaped.join("/"))))
    }

    /// Read a file at `reference` (branch name or sha).
    ///
    /// Returns the decoded text and the blob sha, which is the token
    /// [`update_file`](Self::update_file) expects.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound` if the file does not exist at that ref.
    pub async fn get_file_contents(&self, path: &str, reference: &str) -> Result<FileContents, Error> {
        require(reference, "ref")?;
        let url_path = self.contents_path(path)?;

        let payload: ContentsPayload = self
            .transport
            .request("GET", &url_path, Some(&[("ref", reference)][..]), None::<&()>)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    Error::FileNotFound {
                        path: path.to_string(),
                        reference: reference.to_string(),
                    }
                } else {
                    e
                }
            })?;

        Ok(FileContents {
            content: BlobCodec::decode(&payload.content)?,
            sha: payload.sha,
        })
    }

    /// Create a new file on `branch`; returns the new commit sha.
    ///
    /// # Errors
    ///
    /// The platform rejects the write if the file already exists.
    pub async fn create_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
    ) -> Result<String, Error> {
        self.write_file(path, content, message, branch, None).await
    }

    /// Replace a file on `branch`; returns the new commit sha.
    ///
    /// `sha` is the blob sha the content was read at.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if `sha` is no longer the file's current blob.
    pub async fn update_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
        sha: &str,
    ) -> Result<String, Error> {
        require(sha, "blob sha")?;
        self.write_file(path, content, message, branch, Some(sha)).await
    }

    async fn write_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
        sha: Option<&str>,
    ) -> Result<String, Error> {
        require(message, "commit message")?;
        require(branch, "branch name")?;
        let url_path = self.contents_path(path)?;

        let body = ContentsWrite {
            message,
            content: BlobCodec::encode(content),
            branch,
            sha,
        };

        let result: ContentsWriteResult = self
            .transport
            .request("PUT", &url_path, None, Some(&body))
            .await?;

        info!(repo = %self.full_name(), path, branch, commit = %result.commit.sha, "file written");
        Ok(result.commit.sha)
    }
}
