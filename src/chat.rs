use log::debug;
use std::path::Path;

use crate::error::SuggestError;

/// Read an uploaded chat transcript. Only UTF-8 `.txt` files are accepted.
pub async fn read_chat_file(path: &Path) -> Result<String, SuggestError> {
    let is_txt = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        return Err(SuggestError::InvalidChatFile(format!(
            "{} is not a .txt file",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8(bytes).map_err(|_| {
        SuggestError::InvalidChatFile(format!("{} is not valid UTF-8 text", path.display()))
    })?;

    debug!("Read {} characters from {}", text.chars().count(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[tokio::test]
    async fn test_reads_txt_file() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "[10/01/24] Omar: I love hiking").unwrap();

        let text = read_chat_file(file.path()).await.unwrap();
        assert_eq!(text, "[10/01/24] Omar: I love hiking");
    }

    #[tokio::test]
    async fn test_uppercase_extension_accepted() {
        let file = Builder::new().suffix(".TXT").tempfile().unwrap();
        let text = read_chat_file(file.path()).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_other_extensions() {
        let file = Builder::new().suffix(".pdf").tempfile().unwrap();
        let result = read_chat_file(file.path()).await;
        assert!(matches!(result, Err(SuggestError::InvalidChatFile(_))));
    }

    #[tokio::test]
    async fn test_rejects_binary_content() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

        let result = read_chat_file(file.path()).await;
        assert!(matches!(result, Err(SuggestError::InvalidChatFile(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = read_chat_file(Path::new("/nonexistent/dir/chat.txt")).await;
        assert!(matches!(result, Err(SuggestError::Io(_))));
    }
}
