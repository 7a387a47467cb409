use crate::error::{FaceMatchError, Result};
use clap::{Parser, Subcommand};
use face_match_common::Role;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "face-match")]
#[command(about = "가족 얼굴 닮은꼴 비교 - 사진 업로드 클라이언트", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 接続先サーバー（例: http://localhost:3000）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真1枚をサムネイル化してアップロード
    Upload {
        /// ロール名 (child/father/mother/...)
        #[arg(required = true)]
        role: String,

        /// 写真ファイル
        #[arg(required = true)]
        image: PathBuf,
    },

    /// アップロード済みの写真で比較
    Compare,

    /// 写真をまとめてアップロードし、比較まで実行
    Run {
        /// ROLE=PATH 形式で写真を指定（複数可）
        #[arg(short, long = "photo", value_parser = parse_photo_arg)]
        photos: Vec<(Role, PathBuf)>,

        /// 「ロール名.jpg」が入ったフォルダ
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// 224×224のJPEGサムネイルをローカルに保存（送信しない）
    Thumbnail {
        /// 入力画像
        #[arg(required = true)]
        image: PathBuf,

        /// 出力JPEG
        #[arg(required = true)]
        output: PathBuf,
    },

    /// 設定の表示・変更
    Config {
        /// サーバーURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// タイムアウト秒数を設定（0で無効）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `ROLE=PATH` を分解する
pub fn parse_photo_arg(arg: &str) -> Result<(Role, PathBuf)> {
    let (role, path) = arg
        .split_once('=')
        .ok_or_else(|| FaceMatchError::InvalidPhotoArg(arg.to_string()))?;
    let role = role.trim();
    let path = path.trim();
    if role.is_empty() || path.is_empty() {
        return Err(FaceMatchError::InvalidPhotoArg(arg.to_string()));
    }
    Ok((Role::new(role), PathBuf::from(path)))
}
