use face_match_common::WidgetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaceMatchError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("업로드할 사진이 없습니다: {0}")]
    NoPhotos(String),

    #[error("잘못된 사진 지정입니다 (ROLE=PATH 형식): {0}")]
    InvalidPhotoArg(String),

    #[error("아이(child) 사진이 업로드되지 않아 비교할 수 없습니다")]
    CompareDisabled,

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error("HTTP 클라이언트 오류: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("작업 실행 오류: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FaceMatchError>;
