//! AppBuilder - Gateway の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - スコープに応じた戦略の選択（起動時に一度だけ）

use std::sync::Arc;

use super::cache::ArtifactCache;
use super::handler::GetFileContentsHandler;
use super::service::GatewayFileService;
use crate::decode::{Decoder, DecoderRegistry, RegistryError};
use crate::domain::ExecutionScope;
use crate::impls::{LocalFileSystem, LocalSource, RemoteSource};
use crate::ports::{FileSource, ModificationClock, ScopeResolver, Transport};

/// 既定の peer（project）名
pub const DEFAULT_PROJECT: &str = "gatecache";

/// AppBuilder は Gateway を構築
///
/// # 使用例
/// ```ignore
/// let gateway = AppBuilder::new()
///     .register("txt", TextDecoder)?
///     .expect_tags(&["json", "txt"])
///     .project("plant")
///     .build(&config)?;
/// ```
///
/// # Fail-fast 設計
/// - expect_tags() で期待される type tag を登録
/// - build() 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - Remote スコープで transport がなければ BuildError
pub struct AppBuilder {
    registry: DecoderRegistry,
    expected_tags: Option<Vec<String>>,
    project: String,
    clock: Option<Arc<dyn ModificationClock>>,
    transport: Option<Arc<dyn Transport>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing type tags: {0:?}. These tags were expected but have no decoder.")]
    MissingTypeTags(Vec<String>),

    #[error("remote scope requires a transport to reach project '{0}'")]
    MissingTransport(String),
}

impl AppBuilder {
    /// JSON decoder を登録済みの AppBuilder を作成
    pub fn new() -> Self {
        Self::with_registry(DecoderRegistry::with_defaults())
    }

    pub fn with_registry(registry: DecoderRegistry) -> Self {
        Self {
            registry,
            expected_tags: None,
            project: DEFAULT_PROJECT.to_string(),
            clock: None,
            transport: None,
        }
    }

    /// Decoder を登録
    pub fn register<D: Decoder + 'static>(
        mut self,
        tag: &str,
        decoder: D,
    ) -> Result<Self, RegistryError> {
        self.registry.register(tag, decoder)?;
        Ok(self)
    }

    /// 期待される type tag のリストを設定
    pub fn expect_tags(mut self, tags: &[&str]) -> Self {
        self.expected_tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }

    /// 転送先の peer 名
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// ファイルシステム（既定: LocalFileSystem）
    pub fn clock(mut self, clock: Arc<dyn ModificationClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// AppBuilder を構築して Gateway を生成
    ///
    /// # 検証
    /// - expect_tags() で設定された tag が全て登録されているかチェック
    /// - Remote なら transport が設定されているかチェック
    pub fn build(self, resolver: &dyn ScopeResolver) -> Result<Gateway, BuildError> {
        if let Some(expected_tags) = &self.expected_tags {
            let missing_tags: Vec<String> = expected_tags
                .iter()
                .filter(|tag| !self.registry.contains(tag))
                .cloned()
                .collect();
            if !missing_tags.is_empty() {
                return Err(BuildError::MissingTypeTags(missing_tags));
            }
        }

        let scope = resolver.current_scope();
        let registry = Arc::new(self.registry);

        let (local, source): (Option<Arc<LocalSource>>, Arc<dyn FileSource>) = match scope {
            ExecutionScope::Privileged => {
                let cache = Arc::new(ArtifactCache::new());
                let clock: Arc<dyn ModificationClock> = match self.clock {
                    Some(clock) => clock,
                    None => Arc::new(LocalFileSystem::new()),
                };
                let local = Arc::new(LocalSource::new(cache, registry, clock));
                let source: Arc<dyn FileSource> = local.clone();
                (Some(local), source)
            }
            ExecutionScope::Remote => {
                let Some(transport) = self.transport else {
                    return Err(BuildError::MissingTransport(self.project));
                };
                let source: Arc<dyn FileSource> =
                    Arc::new(RemoteSource::new(self.project.clone(), transport));
                (None, source)
            }
        };

        tracing::debug!(%scope, project = %self.project, "gateway file service ready");
        Ok(Gateway {
            project: self.project,
            local,
            service: GatewayFileService::new(scope, source),
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Gateway は組み立て済みのサービス一式
///
/// - Privileged: LocalSource と ArtifactCache を一つだけ持つ
/// - Remote: キャッシュを持たない（gateway 側のキャッシュが唯一）
pub struct Gateway {
    project: String,
    local: Option<Arc<LocalSource>>,
    service: GatewayFileService,
}

impl Gateway {
    pub fn scope(&self) -> ExecutionScope {
        self.service.scope()
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn cache(&self) -> Option<&Arc<ArtifactCache>> {
        self.local.as_ref().map(|local| local.cache())
    }

    pub fn service(&self) -> GatewayFileService {
        self.service.clone()
    }

    /// transport に登録する inbound handler（Privileged のときだけ）
    pub fn handler(&self) -> Option<GetFileContentsHandler> {
        self.local.clone().map(GetFileContentsHandler::new)
    }
}
