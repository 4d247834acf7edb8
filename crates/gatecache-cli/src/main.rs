use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use gatecache_core::app::{AppBuilder, GET_FILE_CONTENTS, Gateway};
use gatecache_core::config::GatewayConfig;
use gatecache_core::domain::{ExecutionScope, FileRequest};
use gatecache_core::impls::{InMemoryTransport, LocalFileSystem};
use gatecache_core::observability::init_tracing;

/// gateway のファイルをキャッシュ経由で読み、デコード結果を JSON で表示する
#[derive(Debug, Parser)]
#[command(name = "gatecache", version)]
struct Cli {
    /// 読み込むファイル（相対パスは GATECACHE_ROOT / --root 基準）
    path: String,

    /// mtime が新しくなくても読み直す
    #[arg(long)]
    force_refresh: bool,

    /// 読み直した結果をキャッシュに保存しない
    #[arg(long)]
    no_store: bool,

    /// GATECACHE_SCOPE を上書き（privileged | remote）
    #[arg(long)]
    scope: Option<ExecutionScope>,

    /// GATECACHE_PROJECT を上書き
    #[arg(long)]
    project: Option<String>,

    /// GATECACHE_ROOT を上書き
    #[arg(long)]
    root: Option<PathBuf>,

    /// 同じリクエストを繰り返す回数（キャッシュの効き具合の確認用）
    #[arg(long, default_value_t = 1)]
    repeat: usize,
}

/// gateway を組み立てる。remote なら同じプロセス内に gateway を立てて転送する。
fn wire(config: &GatewayConfig) -> Result<(Gateway, Option<Gateway>), Box<dyn std::error::Error>> {
    let fs = match &config.root {
        Some(root) => LocalFileSystem::with_root(root),
        None => LocalFileSystem::new(),
    };
    let gateway = AppBuilder::new()
        .project(config.project.clone())
        .clock(Arc::new(fs))
        .build(&ExecutionScope::Privileged)?;

    if config.scope.is_privileged() {
        return Ok((gateway, None));
    }

    let handler = gateway
        .handler()
        .ok_or("in-process gateway was not built in privileged scope")?;
    let mut transport = InMemoryTransport::new();
    transport.register(config.project.clone(), GET_FILE_CONTENTS, Arc::new(handler));
    let client = AppBuilder::new()
        .project(config.project.clone())
        .transport(Arc::new(transport))
        .build(config)?;
    Ok((gateway, Some(client)))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env()?;
    if let Some(scope) = cli.scope {
        config.scope = scope;
    }
    if let Some(project) = cli.project {
        config.project = project;
    }
    if let Some(root) = cli.root {
        config.root = Some(root);
    }

    init_tracing(&config.log_filter)?;

    let (gateway, client) = wire(&config)?;
    let service = client.as_ref().unwrap_or(&gateway).service();
    tracing::info!(scope = %service.scope(), project = %config.project, "gatecache started");

    let request = FileRequest::new(cli.path)
        .force_refresh(cli.force_refresh)
        .store_in_cache(!cli.no_store);

    for _ in 0..cli.repeat.max(1) {
        let value = service.get(request.clone()).await?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    }

    if let Some(cache) = gateway.cache() {
        let counts = cache.counts().await;
        tracing::info!(
            entries = counts.entries,
            hits = counts.hits,
            refreshes = counts.refreshes,
            uncached_reads = counts.uncached_reads,
            "cache status"
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gatecache: {e}");
            ExitCode::FAILURE
        }
    }
}
