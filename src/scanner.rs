use crate::error::{FaceMatchError, Result};
use face_match_common::{Role, DEFAULT_ROLES};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

/// フォルダ直下から「ロール名.拡張子」の写真を集める
///
/// 例: child.jpg, father.png。既定ロールの表示順で返す。
/// 同じロールが複数あればファイル名順で先のものを使う。
pub fn scan_role_photos(folder: &Path) -> Result<Vec<(Role, PathBuf)>> {
    if !folder.is_dir() {
        return Err(FaceMatchError::FolderNotFound(folder.display().to_string()));
    }

    let mut candidates: Vec<(String, PathBuf)> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .map(|ext| is_image_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .filter_map(|path| {
            let stem = path.file_stem()?.to_string_lossy().to_ascii_lowercase();
            Some((stem, path))
        })
        .collect();
    candidates.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));

    let mut photos = Vec::new();
    for (name, _) in DEFAULT_ROLES {
        let mut matches = candidates.iter().filter(|(stem, _)| stem == name);
        if let Some((_, path)) = matches.next() {
            for (_, skipped) in matches {
                tracing::warn!(role = name, path = %skipped.display(), "duplicate photo ignored");
            }
            photos.push((Role::new(*name), path.clone()));
        }
    }

    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_role_photos(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(FaceMatchError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_matches_role_names_in_role_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("mother.PNG"), b"dummy").unwrap();
        fs::write(dir.path().join("Child.jpg"), b"dummy").unwrap();
        fs::write(dir.path().join("vacation.jpg"), b"dummy").unwrap();
        fs::write(dir.path().join("father.txt"), b"text").unwrap();

        let photos = scan_role_photos(dir.path()).unwrap();
        let roles: Vec<&str> = photos.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(roles, vec!["child", "mother"]);
        assert!(photos[0].1.ends_with("Child.jpg"));
    }

    #[test]
    fn test_scan_duplicate_role_uses_first_by_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("father.png"), b"dummy").unwrap();
        fs::write(dir.path().join("father.jpg"), b"dummy").unwrap();

        let photos = scan_role_photos(dir.path()).unwrap();
        assert_eq!(photos.len(), 1);
        assert!(photos[0].1.ends_with("father.jpg"));
    }

    #[test]
    fn test_scan_ignores_subfolders() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("old")).unwrap();
        fs::write(dir.path().join("old").join("child.jpg"), b"dummy").unwrap();

        assert!(scan_role_photos(dir.path()).unwrap().is_empty());
    }
}
