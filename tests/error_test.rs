//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use face_match::cli::parse_photo_arg;
use face_match::error::FaceMatchError;
use face_match::scanner;
use face_match_common::{ErrorKind, Role, WidgetError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_role_photos(Path::new("/nonexistent/path/12345"));
    let err = result.unwrap_err();
    assert!(matches!(err, FaceMatchError::FolderNotFound(_)));
}

/// 写真のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_without_role_photos() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("vacation.jpg"), "dummy").unwrap();

    let result = scanner::scan_role_photos(dir.path());
    assert!(result.unwrap().is_empty());
}

/// FaceMatchErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        FaceMatchError::Config("테스트 설정 오류".to_string()),
        FaceMatchError::FileNotFound("child.jpg".to_string()),
        FaceMatchError::FolderNotFound("/path/to/folder".to_string()),
        FaceMatchError::NoPhotos("--photo".to_string()),
        FaceMatchError::InvalidPhotoArg("child".to_string()),
        FaceMatchError::CompareDisabled,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// WidgetErrorはメッセージをそのまま表示する
#[test]
fn test_widget_error_is_transparent() {
    let widget = WidgetError::UploadRejected {
        role: Role::new("father"),
        reason: "bad image".to_string(),
    };
    let expected = widget.to_string();
    let err: FaceMatchError = widget.into();

    assert!(matches!(&err, FaceMatchError::Widget(e) if e.kind() == ErrorKind::ServerRejection));
    assert_eq!(format!("{}", err), expected);
}

/// ROLE=PATH 形式でない指定
#[test]
fn test_invalid_photo_arg() {
    let err = parse_photo_arg("child.jpg").unwrap_err();
    assert!(matches!(err, FaceMatchError::InvalidPhotoArg(_)));
    assert!(format!("{}", err).contains("child.jpg"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: FaceMatchError = io_err.into();

    assert!(matches!(err, FaceMatchError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: FaceMatchError = json_err.into();

    assert!(matches!(err, FaceMatchError::JsonParse(_)));
}
