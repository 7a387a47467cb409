use clap::Parser;
use face_match::{cli, client, config, error, scanner, thumbnail, widget};
use cli::{Cli, Commands};
use client::FaceMatchClient;
use config::Config;
use error::{FaceMatchError, Result};
use face_match_common::{default_roles, Role, ResultView};
use futures::future::join_all;
use tracing_subscriber::EnvFilter;
use widget::{CompareTrigger, UploadOutcome, UploadWidget};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "face_match=debug" } else { "face_match=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn print_view(view: &ResultView) {
    println!("{}", view.to_text());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    // config サブコマンドは壊れた設定ファイルでも動く
    let config = match cli.command {
        Commands::Config { .. } => Config::load_for_repair()?,
        _ => Config::load()?,
    };

    let server = config.resolve_server(cli.server.as_deref());
    tracing::debug!(%server, "using server");

    match cli.command {
        Commands::Upload { role, image } => {
            println!("📷 face-match - 업로드\n");
            let role = Role::new(role);
            let client = FaceMatchClient::new(server, config.timeout())?;
            let widget = UploadWidget::new(client, default_roles(), config.jpeg_quality);

            widget.on_file_selected(&role, Some(image.as_path())).await?;
            println!("✔ {} ({}) 업로드 완료", role.label(), role);
        }

        Commands::Compare => {
            println!("🔍 face-match - 비교\n");
            let client = FaceMatchClient::new(server, config.timeout())?;
            let view = CompareTrigger::new(client).compare().await?;
            print_view(&view);
        }

        Commands::Run { mut photos, dir } => {
            println!("🚀 face-match - 일괄 처리\n");

            if let Some(dir) = &dir {
                for (role, path) in scanner::scan_role_photos(dir)? {
                    if !photos.iter().any(|(r, _)| *r == role) {
                        photos.push((role, path));
                    }
                }
            }
            if photos.is_empty() {
                let source = dir.map(|d| d.display().to_string()).unwrap_or_else(|| "--photo".into());
                return Err(FaceMatchError::NoPhotos(source));
            }

            // 1. Upload
            println!("[1/2] 사진 {}장 업로드 중...", photos.len());
            let client = FaceMatchClient::new(server, config.timeout())?;
            let mut roles = default_roles();
            roles.extend(photos.iter().map(|(r, _)| r.clone()));
            let widget = UploadWidget::new(client.clone(), roles, config.jpeg_quality);

            let uploads = photos
                .iter()
                .map(|(role, path)| widget.on_file_selected(role, Some(path.as_path())));
            let outcomes = join_all(uploads).await;

            for ((role, path), outcome) in photos.iter().zip(outcomes) {
                match outcome {
                    Ok(UploadOutcome::Uploaded) => println!("✔ {} ({})", role.label(), path.display()),
                    Ok(UploadOutcome::Stale) => println!("- {}: 이전 요청 결과 무시", role.label()),
                    Ok(UploadOutcome::Skipped) => {}
                    Err(e) => eprintln!("✖ {}", e),
                }
            }
            println!();

            // 2. Compare
            println!("[2/2] 비교 중...");
            let view = CompareTrigger::new(client)
                .on_compare_clicked(&widget.session())
                .await?;
            print_view(&view);

            println!("\n✅ 완료");
        }

        Commands::Thumbnail { image, output } => {
            let role = Role::new(
                image
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
            let jpeg = thumbnail::load_thumbnail(&role, &image, config.jpeg_quality)?;
            std::fs::write(&output, jpeg)?;
            println!("✔ 썸네일 저장: {}", output.display());
        }

        Commands::Config { set_server, set_timeout, show } => {
            let mut config = config;
            let changed = set_server.is_some() || set_timeout.is_some();

            if let Some(url) = set_server {
                config.set_server(url)?;
            }
            if let Some(secs) = set_timeout {
                config.timeout_seconds = (secs > 0).then_some(secs);
            }
            if changed {
                config.save()?;
                println!("✔ 설정을 저장했습니다");
            }

            if show || !changed {
                println!("설정:");
                println!("  서버: {}", config.server_url);
                println!(
                    "  타임아웃: {}",
                    config.timeout_seconds.map_or("없음".to_string(), |s| format!("{}초", s))
                );
                println!("  JPEG 품질: {}", config.jpeg_quality);
                println!("  파일: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
