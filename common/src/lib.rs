//! Face Match Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod role;
pub mod session;
pub mod protocol;
pub mod thumbnail;
pub mod view;
pub mod error;

pub use role::{default_roles, parse_role_list, Role, ANCHOR_ROLE, DEFAULT_ROLES};
pub use session::{Applied, SelectionTicket, SlotState, UploadSession, UploadTicket};
pub use protocol::{
    endpoint_url, parse_compare_response, parse_upload_response, ComparisonResult, Match,
    UploadResponse, COMPARE_ENDPOINT, FIELD_IMAGE, FIELD_ROLE, JPEG_MIME, UPLOAD_ENDPOINT,
};
pub use thumbnail::{cover_crop, CropRect, DEFAULT_JPEG_QUALITY, THUMBNAIL_SIZE};
pub use view::{format_similarity, ResultEntry, ResultView, INSUFFICIENT_MESSAGE};
pub use error::{ErrorKind, Result, WidgetError};
