use crate::extractors::VideoId;

/// Sanitize filename for safe filesystem usage
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            match c {
                // Keep alphanumeric characters, spaces, hyphens, underscores, and dots
                c if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '.' => c,
                // Replace everything else with underscore
                _ => '_',
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Directory name for the files of one study session
pub fn session_dir_name(video_id: &VideoId) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    sanitize_filename(&format!("study_{}_{}", video_id, timestamp))
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Check if the current environment has required tools
pub async fn check_dependencies(yt_dlp_path: &str) -> Vec<String> {
    let mut missing = Vec::new();

    if !check_command_available(yt_dlp_path).await {
        missing.push(format!("{} - required to list YouTube caption tracks", yt_dlp_path));
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::extract_video_id;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello World!"), "Hello World_");
        assert_eq!(sanitize_filename("test/file?name"), "test_file_name");
        assert_eq!(sanitize_filename("  spaced  "), "spaced");
        assert_eq!(sanitize_filename("mcqs.txt"), "mcqs.txt");
    }

    #[test]
    fn test_session_dir_name() {
        let id = extract_video_id("https://youtu.be/a-b_c-d_e-f").unwrap();
        let name = session_dir_name(&id);
        assert!(name.starts_with("study_a-b_c-d_e-f_"));
        assert_eq!(name.len(), "study_a-b_c-d_e-f_".len() + "YYYYmmdd_HHMMSS".len());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one two\nthree\tfour "), 4);
    }

    #[tokio::test]
    async fn test_check_dependencies_reports_missing_tool() {
        let missing = check_dependencies("/nonexistent/yt-dlp-binary").await;
        assert_eq!(missing.len(), 1);
        assert!(missing[0].contains("caption tracks"));
    }
}
