/// ログ基盤モジュール
///
/// Lambda環境向けの構造化ログ設定を提供する。
/// CloudWatch Logsで検索しやすいようJSON形式で出力する。
use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 本番のデフォルトログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

static INIT: Once = Once::new();

/// `RUST_LOG`からフィルタを構築する
///
/// 未設定または解釈できない場合は`default_level`を使う。
pub fn build_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 複数回呼び出しても最初の呼び出しのみ初期化を実行する。
///
/// # 使用例
/// ```ignore
/// use todo_api::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!(table = "todos", "Lambda function started");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        // テスト等で別のサブスクライバーが設定済みなら何もしない
        let _ = tracing_subscriber::registry()
            .with(build_env_filter(DEFAULT_LOG_LEVEL))
            .with(json_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(build_env_filter("debug"))
            .with(fmt_layer)
            .try_init();
    });
}
