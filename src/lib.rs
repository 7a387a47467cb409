//! face-match: 가족 얼굴 닮은꼴 비교 서버용 업로드 클라이언트

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod scanner;
pub mod thumbnail;
pub mod widget;
