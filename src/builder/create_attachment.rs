use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::error::Result;

/// A file uploaded alongside a reply.
///
/// Files travel next to the JSON body rather than inside it; the transport is responsible for
/// turning them into a multipart request.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
#[must_use]
pub struct CreateAttachment {
    pub data: Vec<u8>,
    pub filename: String,
}

impl CreateAttachment {
    /// Builds an [`CreateAttachment`] from the raw attachment data.
    pub fn bytes(data: impl Into<Vec<u8>>, filename: impl Into<String>) -> CreateAttachment {
        CreateAttachment {
            data: data.into(),
            filename: filename.into(),
        }
    }

    /// Builds an [`CreateAttachment`] by reading a local file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if reading the file fails.
    ///
    /// [`Error::Io`]: crate::Error::Io
    pub async fn path(path: impl AsRef<Path>) -> Result<CreateAttachment> {
        let mut file = File::open(path.as_ref()).await?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).await?;

        let filename = path.as_ref().file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                "attachment path must not be a directory",
            )
        })?;

        Ok(CreateAttachment {
            data,
            filename: filename.to_string_lossy().to_string(),
        })
    }

    /// Builds an [`CreateAttachment`] by reading from a file handler.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] error if reading the file fails.
    ///
    /// [`Error::Io`]: crate::Error::Io
    pub async fn file(file: &File, filename: impl Into<String>) -> Result<CreateAttachment> {
        let mut data = Vec::new();
        file.try_clone().await?.read_to_end(&mut data).await?;

        Ok(CreateAttachment {
            data,
            filename: filename.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CreateAttachment;

    #[tokio::test]
    async fn path_rejects_directories() {
        let dir = std::env::temp_dir();
        assert!(CreateAttachment::path(dir).await.is_err());
    }

    #[tokio::test]
    async fn path_reads_the_file_name() {
        let path = std::env::temp_dir().join("riposte-attachment-test.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let attachment = CreateAttachment::path(&path).await.unwrap();
        assert_eq!(attachment.filename, "riposte-attachment-test.txt");
        assert_eq!(attachment.data, b"hello");

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
